// tests/unit_validator.rs
use std::fs;

use jscheck_core::config::Config;
use jscheck_core::error::CheckError;
use jscheck_core::reporting::{Event, Recorder};
use jscheck_core::validator::Validator;

#[test]
fn test_target_directories_from_manifest() {
    let d = tempfile::tempdir().unwrap();
    fs::write(
        d.path().join("package.json"),
        r#"{"directories": {"lib": true, "src": true}}"#,
    )
    .unwrap();
    let v = Validator::new(Config::new(d.path()).unwrap());
    assert_eq!(v.target_directories().unwrap(), vec![".", "lib", "src"]);
}

#[test]
fn test_manifest_in_other_location() {
    let d = tempfile::tempdir().unwrap();
    fs::create_dir(d.path().join("meta")).unwrap();
    fs::write(d.path().join("meta/package.json"), r#"{"directories":{"src":1}}"#).unwrap();
    let mut config = Config::new(d.path()).unwrap();
    config.manifest = d.path().join("meta/package.json");
    let v = Validator::new(config);
    assert_eq!(v.target_directories().unwrap(), vec![".", "src"]);
}

#[test]
fn test_mixed_project_halts_on_broken_file() {
    let d = tempfile::tempdir().unwrap();
    fs::write(d.path().join("package.json"), r#"{"directories":{"lib":true}}"#).unwrap();
    fs::create_dir(d.path().join("lib")).unwrap();
    fs::write(d.path().join("lib/broken.js"), "const x = {\n  a: 1,\n").unwrap();

    let v = Validator::new(Config::new(d.path()).unwrap());
    let mut rec = Recorder::new();
    let err = v.run(&mut rec).unwrap_err();

    let CheckError::Syntax { path, diagnostic } = err else {
        panic!("expected syntax error");
    };
    assert!(path.ends_with("broken.js"));
    assert_eq!(diagnostic.filename, path);
    assert!(matches!(rec.visible().last(), Some(Event::Checking(_))));
}

#[test]
fn test_directory_named_like_js_file_fails_read() {
    let d = tempfile::tempdir().unwrap();
    fs::write(d.path().join("package.json"), r#"{"directories":{}}"#).unwrap();
    fs::create_dir(d.path().join("vendor.js")).unwrap();

    let v = Validator::new(Config::new(d.path()).unwrap());
    let err = v.run(&mut Recorder::new()).unwrap_err();
    assert!(matches!(err, CheckError::ReadFile { .. }));
}
