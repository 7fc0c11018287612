// src/lib.rs

//! _logreconlib_ reconciles the newest local event log record against a
//! server access log by scanning the server log backward in time.
//!
//! The core is [`ReverseLogScanner`], which reads a delimited text log from
//! the last line to the first line through a pluggable formatter, filter
//! chain, and breaker.
//!
//! [`ReverseLogScanner`]: crate::readers::scanner::ReverseLogScanner

pub mod common;
pub mod config;
pub mod data;
pub mod debug;
pub mod printer;
pub mod readers;
pub mod reconcile;
#[cfg(test)]
pub mod tests;
