// src/readers/mod.rs

//! "Readers" for _logreconlib_.
//!
//! ## Overview of readers
//!
//! * A [`ReverseLogScanner`] reads a delimited text log file from the last
//!   line to the first line, creating records with a pluggable formatter,
//!   filters, and breaker.
//! * A [`ServerLogLoader`] drives a `ReverseLogScanner` to find the requests
//!   of a session in a server access log.
//! * A [`LocalLogLoader`] drives a `ReverseLogScanner` to find the newest
//!   event in the local event log.
//!
//! <br/>
//!
//! Also see [_Definitions of data_].
//!
//! <br/>
//!
//! _These are not rust "Readers"; these structs do not implement the trait
//! [`Read`]. These are "readers" in an informal sense._
//!
//! [_Definitions of data_]: crate::data
//! [`Read`]: std::io::Read
//! [`ReverseLogScanner`]: crate::readers::scanner::ReverseLogScanner
//! [`ServerLogLoader`]: crate::readers::serverlog::ServerLogLoader
//! [`LocalLogLoader`]: crate::readers::locallog::LocalLogLoader

pub mod helpers;
pub mod locallog;
pub mod scanner;
pub mod serverlog;
