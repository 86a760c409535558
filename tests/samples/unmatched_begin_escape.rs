// BEGIN FRAGMENT: Outer
// BEGIN ESCAPE
println!("hidden");
// END FRAGMENT
