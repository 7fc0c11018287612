// src/data/mod.rs

//! The `data` module is specialized data containers for
//! [`RawLine`]s, [`ServerRecord`]s, and [`LocalRecord`]s.
//!
//! ## Definitions of data
//!
//! ### Line
//!
//! A "physical line" is a sequence of bytes in a file that:
//!
//! * begin after a prior "line" or the beginning of a file.
//! * end with a newline character `'\n'` or the end of a file.
//!
//! A physical line is split into fields by a [`LineSplitter`], creating a
//! [`RawLine`].
//!
//! ### Record
//!
//! A "record" is the structured form of a `RawLine`, created by a
//! [`LineFormatter`]. A server access log line becomes a [`ServerRecord`],
//! a local event log line becomes a [`LocalRecord`].
//!
//! ### Query data
//!
//! The URL-query-encoded data field of a server access log line is decoded
//! into a [`QueryData`].
//!
//! [`RawLine`]: crate::data::rawline::RawLine
//! [`LineSplitter`]: crate::data::rawline::LineSplitter
//! [`LineFormatter`]: crate::readers::scanner::LineFormatter
//! [`ServerRecord`]: crate::data::record::ServerRecord
//! [`LocalRecord`]: crate::data::record::LocalRecord
//! [`QueryData`]: crate::data::querydata::QueryData

pub mod datetime;
pub mod querydata;
pub mod rawline;
pub mod record;
