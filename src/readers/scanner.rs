// src/readers/scanner.rs

//! Implements a [`ReverseLogScanner`], the driver of reading a delimited text
//! log from the last line to the first line.
//!
//! A scan is composed of three capabilities:
//! * a [`LineFormatter`] transforms each split line into a record
//! * a [`FilterChain`] of [`LineFilter`]s accepts or rejects each record
//! * a [`ScanBreaker`] decides when to stop reading older lines
//!
//! Each capability has a trivial default; [`IdentityFormatter`],
//! [`AcceptAll`], and [`NeverBreak`].
//!
//! Logs are append-only and chronologically ordered so reading from the last
//! line visits the newest entries first. A breaker allows finding recent
//! entries without formatting the rest of the file.
//!
//! [`ReverseLogScanner`]: self::ReverseLogScanner
//! [`LineFormatter`]: self::LineFormatter
//! [`FilterChain`]: self::FilterChain
//! [`LineFilter`]: self::LineFilter
//! [`ScanBreaker`]: self::ScanBreaker
//! [`IdentityFormatter`]: self::IdentityFormatter
//! [`AcceptAll`]: self::AcceptAll
//! [`NeverBreak`]: self::NeverBreak

use crate::common::{Count, FPath, LineIndex, LineNumber, Path, ResultScan};
use crate::data::rawline::{LineSplitter, RawLine};
use crate::printer::diag::{DiagLevel, DiagnosticSink};

use std::fmt;
use std::io::{Error, ErrorKind};

use ::bstr::ByteSlice; // provides `lines` and `to_str_lossy` on `[u8]`
use ::more_asserts::debug_assert_le;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// capabilities
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Position of a scan, passed to a [`ScanBreaker`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ScanProgress {
    /// 1-based count of physical lines visited, from the last line.
    pub line_index: LineIndex,
    /// 0-based position of the current line from the first line,
    /// `total lines - line_index`.
    pub line_number: LineNumber,
    /// Count of records accepted so far.
    pub accepted: Count,
}

/// Transform a [`RawLine`] into a record.
///
/// Must be total; a malformed line becomes a well-defined "empty" record.
///
/// [`RawLine`]: crate::data::rawline::RawLine
pub trait LineFormatter {
    type Record;

    fn format(
        &self,
        fields: RawLine,
    ) -> Self::Record;
}

/// Accept or reject a record. Must not have side effects.
pub trait LineFilter<R> {
    fn accept(
        &self,
        record: &R,
    ) -> bool;
}

impl<R, F> LineFilter<R> for F
where
    F: Fn(&R) -> bool,
{
    fn accept(
        &self,
        record: &R,
    ) -> bool {
        self(record)
    }
}

/// Decide if a scan stops at the current record. The current record is not
/// accepted when the scan stops.
pub trait ScanBreaker<R> {
    fn should_break(
        &self,
        progress: ScanProgress,
        record: &R,
    ) -> bool;
}

impl<R, F> ScanBreaker<R> for F
where
    F: Fn(ScanProgress, &R) -> bool,
{
    fn should_break(
        &self,
        progress: ScanProgress,
        record: &R,
    ) -> bool {
        self(progress, record)
    }
}

/// The record is the split line.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityFormatter;

impl LineFormatter for IdentityFormatter {
    type Record = RawLine;

    fn format(
        &self,
        fields: RawLine,
    ) -> RawLine {
        fields
    }
}

/// Accept every record.
#[derive(Clone, Copy, Debug, Default)]
pub struct AcceptAll;

impl<R> LineFilter<R> for AcceptAll {
    fn accept(
        &self,
        _record: &R,
    ) -> bool {
        true
    }
}

/// Never stop a scan.
#[derive(Clone, Copy, Debug, Default)]
pub struct NeverBreak;

impl<R> ScanBreaker<R> for NeverBreak {
    fn should_break(
        &self,
        _progress: ScanProgress,
        _record: &R,
    ) -> bool {
        false
    }
}

/// Stop once any record has been accepted, so a scan returns only the newest
/// accepted record.
#[derive(Clone, Copy, Debug, Default)]
pub struct LastAcceptedBreaker;

impl<R> ScanBreaker<R> for LastAcceptedBreaker {
    fn should_break(
        &self,
        progress: ScanProgress,
        _record: &R,
    ) -> bool {
        progress.accepted > 0
    }
}

/// Ordered [`LineFilter`]s. A record is accepted only if every filter accepts
/// it. Evaluation stops at the first rejection.
pub struct FilterChain<'a, R> {
    filters: Vec<Box<dyn LineFilter<R> + 'a>>,
}

impl<'a, R> fmt::Debug for FilterChain<'a, R> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("FilterChain")
            .field("len", &self.filters.len())
            .finish()
    }
}

impl<'a, R> Default for FilterChain<'a, R> {
    fn default() -> Self {
        FilterChain::new()
    }
}

impl<'a, R> FilterChain<'a, R> {
    /// An empty chain accepts every record.
    pub fn new() -> FilterChain<'a, R> {
        FilterChain { filters: Vec::new() }
    }

    /// Append `filter` to the end of the chain.
    pub fn with<F>(
        mut self,
        filter: F,
    ) -> FilterChain<'a, R>
    where
        F: LineFilter<R> + 'a,
    {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn push<F>(
        &mut self,
        filter: F,
    ) where
        F: LineFilter<R> + 'a,
    {
        self.filters.push(Box::new(filter));
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Does every filter accept `record`?
    pub fn accepts(
        &self,
        record: &R,
    ) -> bool {
        self.filters
            .iter()
            .all(|filter| filter.accept(record))
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// ReverseLogScanner
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// [`ReverseLogScanner.scan()`] results. The records are in scan order,
/// newest first.
///
/// [`ReverseLogScanner.scan()`]: self::ReverseLogScanner#method.scan
pub type ResultScanRecords<R> = ResultScan<Vec<R>, Error>;

/// Reads a delimited text log file from the last line to the first line.
///
/// A `ReverseLogScanner` holds no state between scans; each [`scan`] reads the
/// file anew.
///
/// [`scan`]: self::ReverseLogScanner#method.scan
pub struct ReverseLogScanner<'a> {
    path: FPath,
    splitter: LineSplitter,
    diag: &'a dyn DiagnosticSink,
}

impl<'a> fmt::Debug for ReverseLogScanner<'a> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("ReverseLogScanner")
            .field("path", &self.path)
            .field("splitter", &self.splitter)
            .field("diag level", &self.diag.level())
            .finish()
    }
}

impl<'a> ReverseLogScanner<'a> {
    pub fn new(
        path: FPath,
        splitter: LineSplitter,
        diag: &'a dyn DiagnosticSink,
    ) -> ReverseLogScanner<'a> {
        defñ!("ReverseLogScanner::new({:?}, {:?})", path, splitter);
        ReverseLogScanner { path, splitter, diag }
    }

    #[inline(always)]
    pub const fn path(&self) -> &FPath {
        &self.path
    }

    #[inline(always)]
    pub const fn splitter(&self) -> LineSplitter {
        self.splitter
    }

    fn log_file_not_found(&self) {
        self.diag.error(&format!(
            "The given path to the log file does not exist or is not a file: {:?}",
            self.path
        ));
    }

    /// Read the entire file. The file handle is closed before returning.
    /// A missing file or a failed read is logged here.
    fn read_file(&self) -> ResultScan<Vec<u8>, Error> {
        let path: &Path = Path::new(&self.path);
        if !path.is_file() {
            defñ!("not a file {:?}", path);
            self.log_file_not_found();
            return ResultScan::FileNotFound;
        }
        match std::fs::read(path) {
            Ok(buffer) => ResultScan::Found(buffer),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                // removed after the `is_file` check
                self.log_file_not_found();
                ResultScan::FileNotFound
            }
            Err(err) => {
                self.diag.error(&format!("Failed to read log file {:?}: {}", self.path, err));
                ResultScan::Err(err)
            }
        }
    }

    /// Scan the file from the last physical line to the first.
    ///
    /// For each line:
    /// 1. skip the line if it splits into zero fields
    /// 2. `formatter` creates the record
    /// 3. if `breaker` says to stop then stop; the record is not accepted
    /// 4. if `filters` accepts the record then append it to the results
    ///
    /// Returns [`FileNotFound`] if the path is not an existing regular file.
    ///
    /// [`FileNotFound`]: crate::common::ResultScan::FileNotFound
    pub fn scan<F, B>(
        &self,
        formatter: &F,
        filters: &FilterChain<'_, F::Record>,
        breaker: &B,
    ) -> ResultScanRecords<F::Record>
    where
        F: LineFormatter,
        B: ScanBreaker<F::Record> + ?Sized,
    {
        defn!("({:?}, {:?})", self.path, filters);
        let buffer: Vec<u8> = match self.read_file() {
            ResultScan::Found(buffer) => buffer,
            ResultScan::FileNotFound => {
                defx!("return FileNotFound");
                return ResultScan::FileNotFound;
            }
            ResultScan::Err(err) => {
                defx!("return Err({})", err);
                return ResultScan::Err(err);
            }
        };
        let lines: Vec<&[u8]> = buffer.lines().collect();
        let records = self.scan_lines(&lines, formatter, filters, breaker);
        defx!("return Found({} records)", records.len());

        ResultScan::Found(records)
    }

    /// Scan for only the newest record accepted by `filters`.
    pub fn scan_last<F>(
        &self,
        formatter: &F,
        filters: &FilterChain<'_, F::Record>,
    ) -> ResultScanRecords<F::Record>
    where
        F: LineFormatter,
    {
        self.scan(formatter, filters, &LastAcceptedBreaker)
    }

    /// The scan loop over the physical `lines` of a file, oldest line first
    /// in `lines`.
    fn scan_lines<F, B>(
        &self,
        lines: &[&[u8]],
        formatter: &F,
        filters: &FilterChain<'_, F::Record>,
        breaker: &B,
    ) -> Vec<F::Record>
    where
        F: LineFormatter,
        B: ScanBreaker<F::Record> + ?Sized,
    {
        let count_lines: Count = lines.len();
        let mut records: Vec<F::Record> = Vec::new();
        let mut line_index: LineIndex = 0;
        for line in lines.iter().rev() {
            line_index += 1;
            debug_assert_le!(line_index, count_lines);
            let fields: RawLine = self.splitter.split(&line.to_str_lossy());
            if fields.is_empty() {
                defo!("line_index {} is empty", line_index);
                continue;
            }
            let record = formatter.format(fields);
            let progress = ScanProgress {
                line_index,
                line_number: count_lines - line_index,
                accepted: records.len(),
            };
            if breaker.should_break(progress, &record) {
                defo!("break at {:?}", progress);
                self.diag.info(&format!("Reader break from line {}", line_index));
                break;
            }
            if !filters.accepts(&record) {
                continue;
            }
            records.push(record);
        }
        if self.diag.enabled(DiagLevel::Debug) {
            self.diag.debug(&format!(
                "Scanned {} of {} lines of {:?}, accepted {} records",
                line_index,
                count_lines,
                self.path,
                records.len()
            ));
        }

        records
    }
}
