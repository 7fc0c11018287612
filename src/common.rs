// src/common.rs
//
// common imports, type aliases, and other globals (avoids circular imports)

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// file-handling
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub use std::path::Path;

/// `F`ake `Path` or `F`ile `Path`
pub type FPath = String;

/// General purpose counting type
pub type Count = usize;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Lines
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// 1-based count of physical lines visited, counting back from the last
/// physical line of a file.
pub type LineIndex = usize;

/// 0-based position of a physical line, counting from the first physical line
/// of a file.
pub type LineNumber = usize;

/// Carriage return as char
#[allow(non_upper_case_globals)]
pub const CRc: char = '\r';

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// custom Result enum for scanning functions
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// `Result` Extended
/// for log scanning functions
///
/// A missing file is not an error; it means "no data available".
#[derive(Debug, PartialEq)]
pub enum ResultScan<T, E> {
    /// Contains the success data
    Found(T),
    /// The path does not refer to an existing regular file; nothing to return
    FileNotFound,
    /// Contains the error value, something bad happened
    Err(E),
}

impl<T, E> ResultScan<T, E> {
    /// Returns `true` if the result is [`Found`].
    ///
    /// [`Found`]: ResultScan::Found
    #[inline(always)]
    pub const fn is_found(&self) -> bool {
        matches!(*self, ResultScan::Found(_))
    }

    /// Returns `true` if the result is [`FileNotFound`].
    ///
    /// [`FileNotFound`]: ResultScan::FileNotFound
    #[inline(always)]
    pub const fn is_file_not_found(&self) -> bool {
        matches!(*self, ResultScan::FileNotFound)
    }

    /// Returns `true` if the result is [`Err`].
    ///
    /// [`Err`]: ResultScan::Err
    #[inline(always)]
    pub const fn is_err(&self) -> bool {
        matches!(*self, ResultScan::Err(_))
    }

    /// Converts from `ResultScan<T, E>` to [`Option<T>`].
    ///
    /// Converts `self` into an [`Option<T>`], consuming `self`,
    /// and discarding the error, if any.
    #[inline(always)]
    pub fn ok(self) -> Option<T> {
        match self {
            ResultScan::Found(x) => Some(x),
            ResultScan::FileNotFound => None,
            ResultScan::Err(_) => None,
        }
    }

    /// Converts from `ResultScan<T, E>` to [`Option<E>`].
    #[inline(always)]
    pub fn err(self) -> Option<E> {
        match self {
            ResultScan::Found(_) => None,
            ResultScan::FileNotFound => None,
            ResultScan::Err(x) => Some(x),
        }
    }

    /// Maps a `ResultScan<T, E>` to `ResultScan<U, E>` by applying `op` to a
    /// contained [`Found`] value.
    ///
    /// [`Found`]: ResultScan::Found
    #[inline(always)]
    pub fn map<U, F>(self, op: F) -> ResultScan<U, E>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            ResultScan::Found(x) => ResultScan::Found(op(x)),
            ResultScan::FileNotFound => ResultScan::FileNotFound,
            ResultScan::Err(err) => ResultScan::Err(err),
        }
    }
}

impl<T, E> std::fmt::Display for ResultScan<T, E>
where
    E: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResultScan::Found(_) => { write!(f, "ResultScan::Found") },
            ResultScan::FileNotFound => { write!(f, "ResultScan::FileNotFound") },
            ResultScan::Err(err) => { write!(f, "ResultScan::Err({})", err) },
        }
    }
}
