// tests/working_dir.rs - Runs alone in its own binary because it changes the process cwd
use std::path::Path;

use jscheck_core::config::Config;
use jscheck_core::error::CheckError;
use jscheck_core::exit::JsCheckExit;

#[cfg(unix)]
#[test]
fn test_relative_root_with_deleted_cwd_is_error() {
    let d = tempfile::tempdir().unwrap();
    let gone = d.path().join("gone");
    std::fs::create_dir(&gone).unwrap();
    std::env::set_current_dir(&gone).unwrap();
    std::fs::remove_dir(&gone).unwrap();

    let err = Config::new(Path::new(".")).unwrap_err();
    std::env::set_current_dir(d.path()).unwrap();

    assert!(matches!(err, CheckError::WorkingDir { .. }));
    assert_eq!(JsCheckExit::from(&err), JsCheckExit::Error);

    // An absolute root never consults the working directory.
    assert!(Config::new(d.path()).is_ok());
}
