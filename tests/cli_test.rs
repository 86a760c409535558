use anyhow::Result;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn sample(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/samples").join(name)
}

fn fragx(args: &[&str]) -> Result<Output> {
    Ok(Command::new(env!("CARGO_BIN_EXE_fragx"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()?)
}

#[test]
fn test_print_single_fragment_is_bare() -> Result<()> {
    let source = sample("code_section_2.py");
    let output = fragx(&["--print", "-f", "PythonStyleFragmentA", source.to_str().unwrap()])?;

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "def main():\n    print(\"A normal Pythonic fragment\")\n"
    );
    Ok(())
}

#[test]
fn test_print_all_fragments_with_headers() -> Result<()> {
    let source = sample("code_section_2.py");
    let source = source.to_str().unwrap();
    let output = fragx(&["--print", source])?;

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(&format!("# {}:PythonStyleFragmentA\n", source)));
    assert!(stdout.contains(&format!("# {}:PythonStyleFragmentB\n", source)));
    assert!(stdout.contains("self.a = 0\nself.b = 1\n"));
    Ok(())
}

#[test]
fn test_dry_run_writes_nothing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_dir = temp_dir.path().join("out");
    let source = sample("code_section_2.py");
    let output = fragx(&[
        "--dry-run",
        "-o",
        output_dir.to_str().unwrap(),
        source.to_str().unwrap(),
    ])?;

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Dry Run Analysis"));
    assert!(stdout.contains("(2 fragments)"));
    assert!(stdout.contains("PythonStyleFragmentA lines 3-6"));
    assert!(!output_dir.exists());
    Ok(())
}

#[test]
fn test_writes_json_and_reports_path() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let source = sample("code_section_2.py");
    let output = fragx(&[
        "-o",
        temp_dir.path().to_str().unwrap(),
        source.to_str().unwrap(),
    ])?;

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Output saved to"));
    assert!(temp_dir.path().join("fragments.json").exists());
    Ok(())
}

#[test]
fn test_marker_error_exits_with_syntax_code() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let source = sample("unmatched_end_fragment.py");
    let output = fragx(&[
        "-o",
        temp_dir.path().to_str().unwrap(),
        source.to_str().unwrap(),
    ])?;

    assert_eq!(output.status.code(), Some(2));
    assert!(!temp_dir.path().join("fragments.json").exists());
    Ok(())
}

#[test]
fn test_missing_source_exits_with_system_code() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let missing = temp_dir.path().join("nope.py");
    let output = fragx(&["--print", missing.to_str().unwrap()])?;

    assert_eq!(output.status.code(), Some(3));
    Ok(())
}

#[test]
fn test_unsupported_format_exits_with_config_code() -> Result<()> {
    let source = sample("code_section_2.py");
    let output = fragx(&["--dry-run", "--formats", "xml", source.to_str().unwrap()])?;

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).is_empty());
    Ok(())
}
