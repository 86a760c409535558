use fragx::{FragmentError, FragmentMap, FragmentParser};
use std::path::Path;

fn parse_file(name: &str) -> fragx::Result<FragmentMap> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/samples").join(name);
    let text = std::fs::read_to_string(&path).expect("sample file exists");
    FragmentParser::new(&text).map_fragments()
}

fn expected(pairs: &[(&str, &str)]) -> FragmentMap {
    pairs
        .iter()
        .map(|(name, text)| (name.to_string(), text.to_string()))
        .collect()
}

#[test]
fn test_empty_string() {
    assert!(FragmentParser::new("").map_fragments().unwrap().is_empty());
}

#[test]
fn test_pythonic_sample_with_two_fragments() {
    let parsed = parse_file("code_section_2.py").unwrap();
    assert_eq!(
        parsed,
        expected(&[
            (
                "PythonStyleFragmentA",
                "def main():\n    print(\"A normal Pythonic fragment\")"
            ),
            ("PythonStyleFragmentB", "self.a = 0\nself.b = 1"),
        ])
    );
}

#[test]
fn test_python_code_section() {
    assert_eq!(
        parse_file("code_section.py").unwrap(),
        expected(&[("PythonStyleFragment", "print(\"A normal Python code fragment\")")])
    );
}

#[test]
fn test_python_style_comments() {
    assert_eq!(
        parse_file("normal_py_style.py").unwrap(),
        expected(&[("PythonicFragment", "print('TEST')")])
    );
}

#[test]
fn test_rust_code_section() {
    assert_eq!(
        parse_file("code_section.rs").unwrap(),
        expected(&[("RustStyleFragment", "println!(\"A normal Rust-style fragment\");")])
    );
}

#[test]
fn test_rust_indentation_levels() {
    assert_eq!(
        parse_file("code_section_2.rs").unwrap(),
        expected(&[(
            "RustStyleFragment",
            "fn main() {\n    println!(\"A normal Rust-style fragment\");\n}"
        )])
    );
}

#[test]
fn test_nested_fragment_escape() {
    for name in ["nested_fragment_escape.c", "nested_fragment_escape.py"] {
        assert_eq!(
            parse_file(name).unwrap(),
            expected(&[("TestA", "This part\nis displayed"), ("TestB", "is displayed")]),
            "{name}"
        );
    }
}

#[test]
fn test_fragment_placed_inside_escape_text() {
    for name in ["nested_escape_test.c", "nested_escape_test.py"] {
        assert_eq!(
            parse_file(name).unwrap(),
            expected(&[("TestA", "This part is displayed")]),
            "{name}"
        );
    }
}

#[test]
fn test_unmatched_begin_fragment() {
    for name in ["unmatched_begin_fragment.py", "unmatched_begin_fragment.rs"] {
        let err = parse_file(name).unwrap_err();
        assert!(matches!(err, FragmentError::UnclosedFragment { line: 1, .. }), "{name}: {err}");
    }
}

#[test]
fn test_unmatched_end_fragment() {
    for name in ["unmatched_end_fragment.py", "unmatched_end_fragment.rs"] {
        let err = parse_file(name).unwrap_err();
        assert!(matches!(err, FragmentError::UnmatchedEndFragment { line: 2, .. }), "{name}: {err}");
    }
}

#[test]
fn test_unmatched_begin_escape() {
    for name in ["unmatched_begin_escape.py", "unmatched_begin_escape.rs"] {
        let err = parse_file(name).unwrap_err();
        assert!(matches!(err, FragmentError::UnclosedEscape { line: 2, .. }), "{name}: {err}");
    }
}

#[test]
fn test_unmatched_end_escape() {
    for name in ["unmatched_end_escape.py", "unmatched_end_escape.rs"] {
        let err = parse_file(name).unwrap_err();
        assert!(matches!(err, FragmentError::UnmatchedEndEscape { line: 3, .. }), "{name}: {err}");
        assert!(err.is_syntax_error());
    }
}
