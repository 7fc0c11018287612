// src/tests/helpers_tests.rs

//! tests for `readers/helpers.rs`

use crate::readers::helpers::{expand_home, normalize_path, path_to_fpath};

use std::path::Path;

#[test]
fn test_expand_home() {
    let home = match std::env::var("HOME") {
        Ok(home) => home,
        Err(_) => return,
    };
    assert_eq!(expand_home("~"), home);
    assert_eq!(expand_home("~/logs/a.log"), format!("{}/logs/a.log", home));
}

#[test]
fn test_expand_home_unchanged() {
    assert_eq!(expand_home("/var/log/a.log"), "/var/log/a.log");
    assert_eq!(expand_home("logs/~a.log"), "logs/~a.log");
    assert_eq!(expand_home("~user/a.log"), "~user/a.log");
}

#[test]
fn test_normalize_path_absolute() {
    assert_eq!(normalize_path("/var/log/a.log"), "/var/log/a.log");
}

#[test]
fn test_normalize_path_relative() {
    let cwd = std::env::current_dir().unwrap();
    let expect = path_to_fpath(&cwd.join("logs/a.log"));
    assert_eq!(normalize_path("logs/a.log"), expect);
    assert!(Path::new(&normalize_path("a.log")).is_absolute());
}
