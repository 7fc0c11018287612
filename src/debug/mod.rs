// src/debug/mod.rs

//! The `debug` module is printer macros for the driver program and helper
//! functions for test builds.

#[cfg(test)]
pub mod helpers;

pub mod printers;
