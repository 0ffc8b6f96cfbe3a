use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn mdtags(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mdtags"))
        .arg("--no-color")
        .args(args)
        .output()
        .expect("failed to run mdtags")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..").join("fixtures")
}

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, contents).unwrap();
    path
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

const BOLD_DOC: &str = r#"
[[blocks]]
kind = "paragraph"
children = ["Hello ", { kind = "bold", children = ["world"] }]
"#;

const NESTED_BOLD_DOC: &str = r#"
[[blocks]]
kind = "paragraph"
children = [{ kind = "bold", children = [{ kind = "bold", children = ["x"] }] }]
"#;

#[test]
fn renders_a_document() {
    let dir = TempDir::new().unwrap();
    let doc = write(&dir, "doc.toml", BOLD_DOC);
    let output = mdtags(&["render", path_str(&doc)]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "Hello **world**\n");
}

#[test]
fn bare_file_argument_means_render() {
    let dir = TempDir::new().unwrap();
    let doc = write(&dir, "doc.toml", BOLD_DOC);
    let output = mdtags(&[path_str(&doc)]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "Hello **world**\n");
}

#[test]
fn illegal_tree_exits_with_diagnostic() {
    let dir = TempDir::new().unwrap();
    let doc = write(&dir, "doc.toml", NESTED_BOLD_DOC);
    let output = mdtags(&["render", path_str(&doc)]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    let err = stderr(&output);
    assert!(err.contains("error[repeated-nesting]"), "{}", err);
    assert!(err.contains("illegal nested Bold inside Bold"), "{}", err);
}

#[test]
fn recover_flag_skips_validation() {
    let dir = TempDir::new().unwrap();
    let doc = write(&dir, "doc.toml", NESTED_BOLD_DOC);
    let output = mdtags(&["render", "--recover", path_str(&doc)]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "****x****\n");
}

#[test]
fn dialect_flag_overrides_file() {
    let dir = TempDir::new().unwrap();
    let doc = write(
        &dir,
        "doc.toml",
        r#"
dialect = "basic"

[[blocks]]
kind = "paragraph"
children = ["x", { kind = "superscript", children = ["2"] }]
"#,
    );
    let basic = mdtags(&["render", path_str(&doc)]);
    assert_eq!(stdout(&basic), "x^2\n");

    let reddit = mdtags(&["render", "--dialect", "reddit", path_str(&doc)]);
    assert_eq!(stdout(&reddit), "x^(2)\n");
}

#[test]
fn unknown_dialect_is_a_configuration_error() {
    let dir = TempDir::new().unwrap();
    let doc = write(&dir, "doc.toml", BOLD_DOC);
    let output = mdtags(&["render", "--dialect", "klingon", path_str(&doc)]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("unknown dialect `klingon`"), "{}", stderr(&output));
}

#[test]
fn malformed_toml_points_at_the_source() {
    let dir = TempDir::new().unwrap();
    let doc = write(&dir, "broken.toml", "[[blocks]]\nkind = \n");
    let output = mdtags(&["render", path_str(&doc)]);
    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("invalid document"), "{}", err);
    assert!(err.contains("broken.toml"), "{}", err);
}

#[test]
fn check_validates_without_rendering() {
    let dir = TempDir::new().unwrap();
    let good = write(&dir, "good.toml", BOLD_DOC);
    let output = mdtags(&["render", "--check", path_str(&good)]);
    assert!(output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("is valid basic markdown"));

    let bad = write(&dir, "bad.toml", NESTED_BOLD_DOC);
    let output = mdtags(&["render", "--check", path_str(&bad)]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn tree_dumps_the_built_nodes() {
    let dir = TempDir::new().unwrap();
    let doc = write(&dir, "doc.toml", BOLD_DOC);
    let output = mdtags(&["render", "--tree", path_str(&doc)]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.starts_with("Document("), "{}", out);
    assert!(out.contains("Bold("), "{}", out);
}

#[test]
fn missing_file_is_reported() {
    let output = mdtags(&["render", "/definitely/not/here.toml"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("cannot read"));
}

#[test]
fn bundled_fixtures_pass() {
    let fixtures = fixtures_dir();
    let output = mdtags(&["test", path_str(&fixtures)]);
    let err = stderr(&output);
    assert!(output.status.success(), "{}", err);
    assert!(err.contains("test result: ok."), "{}", err);
    assert!(!err.contains("FAIL"), "{}", err);
}

#[test]
fn fixture_failures_set_the_exit_code() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "good/bold.test.toml",
        &format!("expect_output = \"Hello **world**\"\n{}", BOLD_DOC),
    );
    write(
        &dir,
        "bad/wrong.test.toml",
        &format!("description = \"wrong output\"\nexpect_output = \"nope\"\n{}", BOLD_DOC),
    );

    let output = mdtags(&["test", path_str(dir.path())]);
    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("FAIL  wrong output"), "{}", err);
    assert!(err.contains("PASS  bold"), "{}", err);
    assert!(err.contains("1 passed, 1 failed (of 2)"), "{}", err);

    let only_good = mdtags(&["test", path_str(dir.path()), "-c", "good"]);
    assert!(only_good.status.success(), "{}", stderr(&only_good));
}

#[test]
fn lists_fixture_categories() {
    let output = mdtags(&["test", "--list-categories", path_str(&fixtures_dir())]);
    assert!(output.status.success());
    let err = stderr(&output);
    assert!(err.contains("basic ("), "{}", err);
    assert!(err.contains("reddit ("), "{}", err);
}

#[test]
fn category_selection_includes_subfolders_and_reports_unknown_names() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "inline/bold/plain.test.toml",
        &format!("expect_output = \"Hello **world**\"\n{}", BOLD_DOC),
    );
    write(
        &dir,
        "inline/loud.test.toml",
        &format!("expect_output = \"Hello **world**\"\n{}", BOLD_DOC),
    );

    let output = mdtags(&["test", path_str(dir.path()), "-c", "inline"]);
    let err = stderr(&output);
    assert!(output.status.success(), "{}", err);
    assert!(err.contains("inline/bold"), "{}", err);
    assert!(err.contains("2 passed, 0 failed"), "{}", err);

    let output = mdtags(&["test", path_str(dir.path()), "-c", "inl"]);
    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("category 'inl' not found"), "{}", err);
    assert!(err.contains("no matching categories found"), "{}", err);
}
