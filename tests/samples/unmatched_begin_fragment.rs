// BEGIN FRAGMENT: Hanging
println!("never closed");
