// BEGIN FRAGMENT: RustStyleFragment
fn main() {
    println!("A normal Rust-style fragment");
}
// END FRAGMENT
