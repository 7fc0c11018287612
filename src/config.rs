// src/config.rs

//! Configuration of a reconcile run, loaded from a TOML file.
//!
//! ```toml
//! [server]
//! input = "~/logs/access.log"
//! pid = "e7a564d6b1d6e03e"
//! device = "ua-1"            # optional
//! output = "server_output.txt"
//!
//! [local]
//! input = "~/logs/events.log"
//! output = "local_output.txt"
//! tz_offset = "+08:00"       # optional
//! ```
//!
//! Keys are applied in the order above. Loading stops at the first problem,
//! which is reported; values applied before the problem are kept and the
//! remaining values are unchanged.

use crate::common::FPath;
use crate::data::datetime::{tz_offset_parse, FixedOffset, TZ_OFFSET_SERVER};
use crate::printer::diag::DiagnosticSink;
use crate::readers::helpers::normalize_path;

use std::fmt;

use ::serde::Deserialize;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

pub const SERVER_INPUT_DEFAULT: &str = "server_input.log";
pub const SERVER_PID_DEFAULT: &str = "e7a564d6b1d6e03e";
pub const SERVER_OUTPUT_DEFAULT: &str = "server_output.txt";
pub const LOCAL_INPUT_DEFAULT: &str = "local_input.log";
pub const LOCAL_OUTPUT_DEFAULT: &str = "local_output.txt";

/// Section of server settings.
pub const SECTION_SERVER: &str = "server";
/// Section of local settings.
pub const SECTION_LOCAL: &str = "local";

/// Settings of a reconcile run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// server access log to scan
    pub server_input: FPath,
    /// session id to match, query data key `p`
    pub server_pid: String,
    /// user agent to match; if `None` then the user agent of the local event
    pub server_device: Option<String>,
    /// where matched server records are written
    pub server_output: FPath,
    /// local event log to scan
    pub local_input: FPath,
    /// where the newest local record is written
    pub local_output: FPath,
    /// timezone offset of local event log datetimes
    pub local_tz_offset: FixedOffset,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_input: FPath::from(SERVER_INPUT_DEFAULT),
            server_pid: String::from(SERVER_PID_DEFAULT),
            server_device: None,
            server_output: FPath::from(SERVER_OUTPUT_DEFAULT),
            local_input: FPath::from(LOCAL_INPUT_DEFAULT),
            local_output: FPath::from(LOCAL_OUTPUT_DEFAULT),
            local_tz_offset: *TZ_OFFSET_SERVER,
        }
    }
}

/// Problem loading a configuration file.
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read.
    Read(FPath, std::io::Error),
    /// The file is not valid TOML or has values of the wrong type.
    Parse(FPath, toml::de::Error),
    /// A required key is missing; `(section, key)`.
    MissingKey(&'static str, &'static str),
    /// The `tz_offset` value is not a timezone offset.
    BadTzOffset(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read(path, err) => write!(f, "cannot read config file {:?}: {}", path, err),
            ConfigError::Parse(path, err) => write!(f, "cannot parse config file {:?}: {}", path, err),
            ConfigError::MissingKey(section, key) => {
                write!(f, "config file missing key {:?} in section [{}]", key, section)
            }
            ConfigError::BadTzOffset(value) => write!(f, "config file tz_offset {:?} is not valid", value),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read(_, err) => Some(err),
            ConfigError::Parse(_, err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ServerSection {
    input: Option<String>,
    pid: Option<String>,
    device: Option<String>,
    output: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LocalSection {
    input: Option<String>,
    output: Option<String>,
    tz_offset: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    server: Option<ServerSection>,
    local: Option<LocalSection>,
}

fn required(
    value: Option<String>,
    section: &'static str,
    key: &'static str,
) -> Result<String, ConfigError> {
    value.ok_or(ConfigError::MissingKey(section, key))
}

impl Config {
    /// Load the configuration file at `path` over the current values.
    ///
    /// A problem is reported to `diag` and returned; the values are left as
    /// described in the [module documentation](self).
    pub fn load(
        &mut self,
        path: &FPath,
        diag: &dyn DiagnosticSink,
    ) -> Result<(), ConfigError> {
        defn!("({:?})", path);
        let result = self.load_(path);
        if let Err(err) = &result {
            diag.error(&format!("Something went wrong with the config file: {}", err));
        }
        defx!("{:?}", result);

        result
    }

    /// Parse `content` as a configuration file over the current values.
    pub fn load_str(
        &mut self,
        content: &str,
        path: &FPath,
    ) -> Result<(), ConfigError> {
        let file: ConfigFile = match toml::from_str(content) {
            Ok(file) => file,
            Err(err) => return Err(ConfigError::Parse(path.clone(), err)),
        };
        self.apply(file)
    }

    fn load_(
        &mut self,
        path: &FPath,
    ) -> Result<(), ConfigError> {
        let content: String = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => return Err(ConfigError::Read(path.clone(), err)),
        };
        self.load_str(&content, path)
    }

    fn apply(
        &mut self,
        file: ConfigFile,
    ) -> Result<(), ConfigError> {
        let server: ServerSection = file.server.unwrap_or_default();
        self.server_input = normalize_path(&required(server.input, SECTION_SERVER, "input")?);
        self.server_pid = required(server.pid, SECTION_SERVER, "pid")?;
        self.server_device = server
            .device
            .filter(|device| !device.is_empty());
        self.server_output = normalize_path(&required(server.output, SECTION_SERVER, "output")?);

        let local: LocalSection = file.local.unwrap_or_default();
        self.local_input = normalize_path(&required(local.input, SECTION_LOCAL, "input")?);
        self.local_output = normalize_path(&required(local.output, SECTION_LOCAL, "output")?);
        if let Some(tz_offset) = local.tz_offset {
            self.local_tz_offset = match tz_offset_parse(&tz_offset) {
                Some(val) => val,
                None => return Err(ConfigError::BadTzOffset(tz_offset)),
            };
        }

        Ok(())
    }
}
