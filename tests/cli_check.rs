// tests/cli_check.rs - End-to-end runs of the jscheck binary
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn project(directories: &str) -> TempDir {
    let d = tempfile::tempdir().unwrap();
    let manifest = format!(r#"{{"name":"demo","directories":{directories}}}"#);
    fs::write(d.path().join("package.json"), manifest).unwrap();
    d
}

fn run_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_jscheck"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to execute jscheck")
}

fn stdout(o: &Output) -> String {
    String::from_utf8_lossy(&o.stdout).into_owned()
}

fn stderr(o: &Output) -> String {
    String::from_utf8_lossy(&o.stderr).into_owned()
}

#[test]
fn test_valid_files_exit_0() {
    let d = project(r#"{"lib": true}"#);
    fs::create_dir(d.path().join("lib")).unwrap();
    fs::write(d.path().join("index.js"), "import x from './lib/x.js'\nexport default x\n").unwrap();
    fs::write(d.path().join("lib/x.js"), "export default 1;\n").unwrap();

    let out = run_in(d.path(), &[]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(stderr(&out).matches("Checking ").count(), 2);
    assert_eq!(stdout(&out).matches("Done ").count(), 2);
    assert!(stdout(&out).contains("index.js"));
    assert!(stdout(&out).contains("x.js"));
}

#[test]
fn test_syntax_error_exit_3() {
    let d = project("{}");
    fs::write(d.path().join("broken.js"), "function f() {\n  return 1;\n").unwrap();

    let out = run_in(d.path(), &[]);
    assert_eq!(out.status.code(), Some(3));
    assert!(stderr(&out).contains("broken.js"));
    assert!(stderr(&out).contains("SyntaxError"));
    assert!(!stdout(&out).contains("Done"));
}

#[test]
fn test_failure_stops_before_later_directories() {
    let d = project(r#"{"a": true, "b": true}"#);
    fs::create_dir(d.path().join("a")).unwrap();
    fs::create_dir(d.path().join("b")).unwrap();
    fs::write(d.path().join("a/bad.js"), "let = ;\n").unwrap();
    fs::write(d.path().join("b/good.js"), "let ok = 1;\n").unwrap();

    let out = run_in(d.path(), &[]);
    assert_eq!(out.status.code(), Some(3));
    assert!(!stderr(&out).contains("good.js"));
}

#[test]
fn test_entry_script_not_checked() {
    let d = project("{}");
    fs::write(d.path().join("test.js"), "this is not javascript {{{").unwrap();

    let out = run_in(d.path(), &[]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(!stderr(&out).contains("test.js"));
}

#[test]
fn test_custom_entry_flag() {
    let d = project("{}");
    fs::write(d.path().join("check.js"), "}{").unwrap();

    let out = run_in(d.path(), &["--entry", "check.js"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
}

#[test]
fn test_no_js_files_no_output() {
    let d = project("{}");
    fs::write(d.path().join("README.md"), "# demo").unwrap();

    let out = run_in(d.path(), &[]);
    assert!(out.status.success());
    assert!(stdout(&out).is_empty());
    assert!(stderr(&out).is_empty());
}

#[test]
fn test_top_level_await_and_return_pass() {
    let d = project("{}");
    fs::write(
        d.path().join("main.js"),
        "const cfg = await load();\nif (!cfg) return;\nconsole.log(cfg);\n",
    )
    .unwrap();

    let out = run_in(d.path(), &[]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
}

#[test]
fn test_no_top_level_return_flag() {
    let d = project("{}");
    fs::write(d.path().join("main.js"), "return;\n").unwrap();

    let out = run_in(d.path(), &["--no-top-level-return"]);
    assert_eq!(out.status.code(), Some(3));
    assert!(stderr(&out).contains("'return' outside of function"));
}

#[test]
fn test_script_mode_from_config_file() {
    let d = project("{}");
    fs::write(d.path().join("jscheck.toml"), "[parser]\nsource_type = \"script\"\n").unwrap();
    fs::write(d.path().join("mod.js"), "export const a = 1;\n").unwrap();

    let out = run_in(d.path(), &[]);
    assert_eq!(out.status.code(), Some(3));
}

#[test]
fn test_missing_manifest_exit_2() {
    let d = tempfile::tempdir().unwrap();
    fs::write(d.path().join("a.js"), "1;").unwrap();

    let out = run_in(d.path(), &[]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("package.json"));
}

#[test]
fn test_manifest_without_directories_exit_2() {
    let d = tempfile::tempdir().unwrap();
    fs::write(d.path().join("package.json"), r#"{"name":"demo"}"#).unwrap();

    let out = run_in(d.path(), &[]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn test_missing_target_directory_exit_1() {
    let d = project(r#"{"lib": true}"#);

    let out = run_in(d.path(), &[]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("lib"));
}

#[test]
fn test_root_flag() {
    let outer = tempfile::tempdir().unwrap();
    let pkg = outer.path().join("pkg");
    fs::create_dir(&pkg).unwrap();
    fs::write(pkg.join("package.json"), r#"{"directories":{}}"#).unwrap();
    fs::write(pkg.join("a.js"), "var a = 1;\n").unwrap();

    let out = run_in(outer.path(), &["--root", "pkg"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(stdout(&out).contains("a.js"));
}

#[test]
fn test_unreadable_config_exit_2() {
    let d = project("{}");
    fs::write(d.path().join("jscheck.toml"), [0xc3, 0x28, 0x0a]).unwrap();
    fs::write(d.path().join("a.js"), "1;\n").unwrap();

    let out = run_in(d.path(), &[]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("Cannot read config"));
    assert!(!stdout(&out).contains("Done"));
}

#[test]
fn test_unreadable_js_entry_reports_path() {
    let d = project("{}");
    fs::create_dir(d.path().join("vendor.js")).unwrap();

    let out = run_in(d.path(), &[]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("error: Cannot read "));
    assert!(stderr(&out).contains("vendor.js: "));
}

#[test]
fn test_sloppy_only_code_exit_3() {
    let d = project("{}");
    fs::write(d.path().join("legacy.js"), "var o = {};\nwith (o) { x = 010; }\n").unwrap();

    let out = run_in(d.path(), &[]);
    assert_eq!(out.status.code(), Some(3));
    assert!(stderr(&out).contains("SyntaxError: 'with' in strict mode (2:1)"));

    let out = run_in(d.path(), &["--script"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
}
