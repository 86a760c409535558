fn main() {
    // BEGIN FRAGMENT: RustStyleFragment
    println!("A normal Rust-style fragment");
    // END FRAGMENT
}
