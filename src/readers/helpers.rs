// src/readers/helpers.rs

//! Miscellaneous helper functions for _Readers_.

use std::path::PathBuf;

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

use crate::common::FPath;

/// Helper function for a slightly annoying set of calls.
pub fn path_to_fpath(path: &std::path::Path) -> FPath {
    // `PathBuf` to `String` https://stackoverflow.com/q/37388107/471376
    (*(path.to_string_lossy())).to_string()
}

/// Helper function for completeness.
pub fn fpath_to_path(path: &FPath) -> &std::path::Path {
    std::path::Path::new(path)
}

/// Expand a leading `~` to the `HOME` directory. If `HOME` is not set then
/// return `path` unchanged.
pub fn expand_home(path: &str) -> FPath {
    let rest: &str = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with(std::path::MAIN_SEPARATOR) => rest,
        _ => return FPath::from(path),
    };
    match std::env::var_os("HOME") {
        Some(home) => {
            let mut expanded: FPath = path_to_fpath(&PathBuf::from(home));
            expanded.push_str(rest);
            expanded
        }
        None => FPath::from(path),
    }
}

/// Expand a leading `~` then make `path` absolute against the current
/// directory. The path does not need to exist.
pub fn normalize_path(path: &str) -> FPath {
    defn!("({:?})", path);
    let expanded: FPath = expand_home(path);
    let path_ = fpath_to_path(&expanded);
    let normalized: FPath = if path_.is_absolute() {
        expanded.clone()
    } else {
        match std::env::current_dir() {
            Ok(cwd) => path_to_fpath(&cwd.join(path_)),
            Err(_err) => {
                defo!("current_dir() failed {}", _err);
                expanded.clone()
            }
        }
    };
    defx!("return {:?}", normalized);

    normalized
}
