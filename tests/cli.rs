//! Tests that run the datapad binary against files in a temporary directory

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Run datapad with its config directory inside `home`
fn datapad(home: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_datapad"))
        .args(args)
        .arg("--no-history")
        .env("XDG_CONFIG_HOME", home.path())
        .output()
        .unwrap()
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_minify_in_place_keeps_minified_text() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("in.json");
    fs::write(&file, "{\"a\": 1, \"b\": [1, 2]}\n").unwrap();

    let output = datapad(&dir, &["--minify", "-w", arg(&file)]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(fs::read_to_string(&file).unwrap(), r#"{"a":1,"b":[1,2]}"#);
}

#[test]
fn test_convert_in_place_writes_beside_original() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("in.json");
    let original = "{\"name\": \"demo\", \"port\": 8080}\n";
    fs::write(&file, original).unwrap();

    let output = datapad(&dir, &["--to", "yaml", "-w", arg(&file)]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(fs::read_to_string(&file).unwrap(), original);
    assert_eq!(
        fs::read_to_string(dir.path().join("in.yaml")).unwrap(),
        "name: demo\nport: 8080\n"
    );
}

#[test]
fn test_broken_file_is_not_written_back() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("bad.json");
    fs::write(&file, "{\"a\":").unwrap();

    let output = datapad(&dir, &["-w", arg(&file)]);
    assert!(!output.status.success());
    assert_eq!(fs::read_to_string(&file).unwrap(), "{\"a\":");
}

#[test]
fn test_types_print_interfaces() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("user.json");
    fs::write(&file, r#"{"id": 7, "tags": ["a"]}"#).unwrap();

    let output = datapad(&dir, &["--types", arg(&file)]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "export interface User {\n  id: number;\n  tags: string[];\n}\n"
    );
}
