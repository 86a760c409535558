// BEGIN FRAGMENT: PythonStyleFragmentA
fn main() {
    println!("A normal Pythonic fragment");
}
// END FRAGMENT

#[cfg_attr(not(test), allow(dead_code))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Complex {
    a: i64,
    b: i64,
}

#[cfg_attr(not(test), allow(dead_code))]
impl Complex {
    fn new(_realpart: i64, _imagpart: i64) -> Self {
        Self {
            // BEGIN FRAGMENT: PythonStyleFragmentB
            a: 0,
            b: 1,
            // END FRAGMENT
        }
    }
}
