// BEGIN FRAGMENT: Outer
println!("shown");
// END ESCAPE
// END FRAGMENT
