println!("no beginning");
// END FRAGMENT
