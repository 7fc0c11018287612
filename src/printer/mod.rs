// src/printer/mod.rs

//! The `printer` module is for writing to the user.
//!
//! [`diag`] reports diagnostic messages to stderr through an injected
//! [`DiagnosticSink`]. [`delimited`] writes records as delimited text files.
//!
//! [`DiagnosticSink`]: crate::printer::diag::DiagnosticSink

pub mod delimited;
pub mod diag;
