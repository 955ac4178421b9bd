use std::env;
use std::fs;

use temp_scope::{ScopeError, TemporaryScope};

#[test]
fn basic_test_scope_lifecycle() -> Result<(), ScopeError> {
    // Creates a temporary directory
    let scope = TemporaryScope::in_dir(env::temp_dir(), "T")?;
    let dir = scope.path().to_path_buf();

    let name = dir.file_name().and_then(|name| name.to_str()).unwrap();
    assert!(name.starts_with("T-"));
    assert_eq!(name.len(), "T-".len() + 6);
    assert_eq!(dir.parent(), Some(env::temp_dir().as_path()));
    assert!(dir.is_dir());

    // Performs the test
    let file_path = scope.random_file_path();
    scope.perform_test(|_| fs::write(&file_path, "Hello, world!"));
    assert!(file_path.is_file());
    assert_eq!(fs::read_dir(&scope).unwrap().count(), 1);

    // Removes the directory together with the file
    assert!(scope.close().is_removed());
    assert!(!file_path.exists());
    assert!(!dir.exists());
    Ok(())
}

#[test]
fn basic_test_explicit_release_is_idempotent() -> Result<(), ScopeError> {
    let mut scope = TemporaryScope::new()?;
    fs::write(scope.random_file_path(), [0u8; 16]).unwrap();

    assert!(scope.release().is_removed());
    assert!(scope.release().is_already_released());
    assert!(!scope.path().exists());
    Ok(())
}

#[test]
fn basic_test_missing_root_fails_construction() {
    let missing_root = env::temp_dir().join("nonexistent-path-xyz");

    let res = TemporaryScope::in_dir(&missing_root, "T");

    assert!(matches!(res, Err(ScopeError::Filesystem { .. })));
    assert!(!missing_root.exists());
}

#[test]
fn basic_test_absolute_prefix_is_rejected() -> Result<(), ScopeError> {
    let root = TemporaryScope::with_prefix("root")?;
    let elsewhere = TemporaryScope::with_prefix("elsewhere")?;
    let prefix = elsewhere.path().join("T");

    let res = TemporaryScope::in_dir(root.path(), prefix.to_str().unwrap());

    assert!(res.is_err_and(|error| error.is_invalid_prefix()));
    assert_eq!(fs::read_dir(elsewhere.path()).unwrap().count(), 0);
    Ok(())
}
