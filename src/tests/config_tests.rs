// src/tests/config_tests.rs

//! tests for `config.rs`

use crate::common::FPath;
use crate::config::{Config, ConfigError, SERVER_PID_DEFAULT};
use crate::data::datetime::{FixedOffset, TZ_OFFSET_SERVER};
use crate::debug::helpers::{create_temp_dir, create_temp_file, ntf_fpath, tmpdir_fpath, RecordingSink};
use crate::printer::diag::DiagLevel;

use std::path::Path;

const CONFIG_FULL: &str = r#"
[server]
input = "/var/log/access.log"
pid = "42"
device = "ua-1"
output = "/tmp/server_output.txt"

[local]
input = "/var/log/events.log"
output = "/tmp/local_output.txt"
tz_offset = "-05:00"
"#;

fn fpath(path: &str) -> FPath {
    FPath::from(path)
}

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.server_pid, SERVER_PID_DEFAULT);
    assert_eq!(config.server_device, None);
    assert_eq!(config.local_tz_offset, *TZ_OFFSET_SERVER);
}

#[test]
fn test_config_load_str_full() {
    let mut config = Config::default();
    config.load_str(CONFIG_FULL, &fpath("logrecon.toml")).unwrap();
    assert_eq!(config.server_input, "/var/log/access.log");
    assert_eq!(config.server_pid, "42");
    assert_eq!(config.server_device.as_deref(), Some("ua-1"));
    assert_eq!(config.server_output, "/tmp/server_output.txt");
    assert_eq!(config.local_input, "/var/log/events.log");
    assert_eq!(config.local_output, "/tmp/local_output.txt");
    assert_eq!(config.local_tz_offset, FixedOffset::west_opt(5 * 3600).unwrap());
}

#[test]
fn test_config_load_str_optional_keys() {
    let content = r#"
[server]
input = "/a"
pid = "42"
device = ""
output = "/b"

[local]
input = "/c"
output = "/d"
"#;
    let mut config = Config::default();
    config.load_str(content, &fpath("logrecon.toml")).unwrap();
    // empty device means any device
    assert_eq!(config.server_device, None);
    assert_eq!(config.local_tz_offset, *TZ_OFFSET_SERVER);
}

#[test]
fn test_config_load_str_relative_path() {
    let content = r#"
[server]
input = "access.log"
pid = "42"
output = "/b"

[local]
input = "/c"
output = "/d"
"#;
    let mut config = Config::default();
    config.load_str(content, &fpath("logrecon.toml")).unwrap();
    let input = Path::new(&config.server_input);
    assert!(input.is_absolute(), "{:?}", input);
    assert!(input.ends_with("access.log"), "{:?}", input);
}

/// values applied before the missing key are kept
#[test]
fn test_config_load_str_missing_key() {
    let content = r#"
[server]
input = "/a"
output = "/b"
"#;
    let mut config = Config::default();
    let result = config.load_str(content, &fpath("logrecon.toml"));
    assert!(matches!(result, Err(ConfigError::MissingKey("server", "pid"))), "{:?}", result);
    assert_eq!(config.server_input, "/a");
    assert_eq!(config.server_pid, SERVER_PID_DEFAULT);
    assert_eq!(config.server_output, Config::default().server_output);
}

#[test]
fn test_config_load_str_missing_section() {
    let content = r#"
[server]
input = "/a"
pid = "42"
output = "/b"
"#;
    let mut config = Config::default();
    let result = config.load_str(content, &fpath("logrecon.toml"));
    assert!(matches!(result, Err(ConfigError::MissingKey("local", "input"))), "{:?}", result);
    assert_eq!(config.server_pid, "42");
}

#[test]
fn test_config_load_str_bad_tz_offset() {
    let content = CONFIG_FULL.replace("-05:00", "noon");
    let mut config = Config::default();
    let result = config.load_str(&content, &fpath("logrecon.toml"));
    assert!(matches!(&result, Err(ConfigError::BadTzOffset(value)) if value == "noon"), "{:?}", result);
    assert_eq!(config.local_tz_offset, *TZ_OFFSET_SERVER);
    assert_eq!(config.local_output, "/tmp/local_output.txt");
}

#[test]
fn test_config_load_str_not_toml() {
    let mut config = Config::default();
    let result = config.load_str("[server\ninput = ", &fpath("logrecon.toml"));
    assert!(matches!(result, Err(ConfigError::Parse(_, _))), "{:?}", result);
    assert_eq!(config, Config::default());
}

#[test]
fn test_config_load_str_wrong_type() {
    let mut config = Config::default();
    let result = config.load_str("[server]\npid = 42\n", &fpath("logrecon.toml"));
    assert!(matches!(result, Err(ConfigError::Parse(_, _))), "{:?}", result);
}

#[test]
fn test_config_load_file() {
    let ntf = create_temp_file(CONFIG_FULL);
    let diag = RecordingSink::new(DiagLevel::Info);
    let mut config = Config::default();
    config.load(&ntf_fpath(&ntf), &diag).unwrap();
    assert_eq!(config.server_pid, "42");
    assert_eq!(diag.count(DiagLevel::Error), 0);
}

#[test]
fn test_config_load_file_not_found() {
    let tmpdir = create_temp_dir();
    let path = tmpdir_fpath(&tmpdir, "logrecon.toml");
    let diag = RecordingSink::new(DiagLevel::Info);
    let mut config = Config::default();
    let result = config.load(&path, &diag);
    assert!(matches!(result, Err(ConfigError::Read(_, _))), "{:?}", result);
    assert_eq!(config, Config::default());
    assert_eq!(diag.count(DiagLevel::Error), 1);
    assert!(diag.contains(DiagLevel::Error, "Something went wrong with the config file"));
}

#[test]
fn test_config_error_display() {
    let err = ConfigError::MissingKey("local", "output");
    let message = err.to_string();
    assert!(message.contains("output"), "{}", message);
    assert!(message.contains("[local]"), "{}", message);
}
