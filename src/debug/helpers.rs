// src/debug/helpers.rs

//! Miscellaneous helper functions for testing.

use crate::common::FPath;
use crate::printer::diag::{DiagLevel, DiagnosticSink};
use crate::readers::helpers::path_to_fpath;

use std::cell::RefCell;
#[allow(unused_imports)] // XXX: clippy wrongly marks this as unused
use std::io::Write; // for `NamedTempFile.write_all`

use ::lazy_static::lazy_static;
use ::si_trace_print::defñ;

#[doc(hidden)]
pub use ::tempfile::NamedTempFile;
#[doc(hidden)]
pub use ::tempfile::TempDir;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// temporary file helper functions
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// NamedTempFile instances default to this file name prefix.
pub const STR_TEMPFILE_PREFIX: &str = "tmp-logrecon-test-";

lazy_static! {
    pub static ref STRING_TEMPFILE_PREFIX: String = String::from(STR_TEMPFILE_PREFIX);
}

/// Small helper function for copying `NamedTempFile` path to a `FPath`.
pub fn ntf_fpath(ntf: &NamedTempFile) -> FPath {
    path_to_fpath(ntf.path())
}

/// Testing helper function to write a `[u8]` to a temporary file.
pub fn create_temp_file_bytes(data: &[u8]) -> NamedTempFile {
    let mut ntf = match ::tempfile::Builder::new()
        // use known prefix for easier cleanup
        .prefix::<str>(&STRING_TEMPFILE_PREFIX)
        .tempfile()
    {
        Ok(val) => val,
        Err(err) => {
            panic!("NamedTempFile::new() return Err {}", err);
        }
    };
    match ntf.write_all(data) {
        Ok(_) => {}
        Err(err) => {
            panic!("NamedTempFile::write_all() return Err {}", err);
        }
    }

    ntf
}

/// Testing helper function to write a `str` to a temporary file.
pub fn create_temp_file(data: &str) -> NamedTempFile {
    create_temp_file_bytes(data.as_bytes())
}

/// Create a temporary directory
pub fn create_temp_dir() -> TempDir {
    defñ!();
    match ::tempfile::tempdir() {
        Ok(val) => val,
        Err(err) => panic!("tempfile::tempdir() return Err {}", err),
    }
}

/// Path of `name` within `tempdir`. The file is not created.
pub fn tmpdir_fpath(
    tempdir: &TempDir,
    name: &str,
) -> FPath {
    path_to_fpath(&tempdir.path().join(name))
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// diagnostics helpers
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Testing [`DiagnosticSink`] that keeps every message at or above `level`.
///
/// [`DiagnosticSink`]: crate::printer::diag::DiagnosticSink
#[derive(Debug)]
pub struct RecordingSink {
    level: DiagLevel,
    messages: RefCell<Vec<(DiagLevel, String)>>,
}

impl RecordingSink {
    pub fn new(level: DiagLevel) -> RecordingSink {
        RecordingSink {
            level,
            messages: RefCell::new(Vec::new()),
        }
    }

    pub fn messages(&self) -> Vec<(DiagLevel, String)> {
        self.messages.borrow().clone()
    }

    /// Count of messages at exactly `level`.
    pub fn count(
        &self,
        level: DiagLevel,
    ) -> usize {
        self.messages
            .borrow()
            .iter()
            .filter(|(level_, _)| *level_ == level)
            .count()
    }

    /// Does any message at `level` contain `text`?
    pub fn contains(
        &self,
        level: DiagLevel,
        text: &str,
    ) -> bool {
        self.messages
            .borrow()
            .iter()
            .any(|(level_, message)| *level_ == level && message.contains(text))
    }
}

impl DiagnosticSink for RecordingSink {
    fn level(&self) -> DiagLevel {
        self.level
    }

    fn log(
        &self,
        level: DiagLevel,
        message: &str,
    ) {
        if !self.enabled(level) {
            return;
        }
        eprintln!("{}: {}", level, message);
        self.messages
            .borrow_mut()
            .push((level, message.to_string()));
    }
}
