// src/readers/locallog.rs

//! Scanning the local event log.
//!
//! A local event log line has three tab-delimited fields; a datetime without
//! a timezone, the user agent, and the payload sent to the server.

use crate::common::FPath;
use crate::data::datetime::{datetime_parse_local, FixedOffset, TZ_OFFSET_SERVER};
use crate::data::rawline::{LineSplitter, RawLine};
use crate::data::record::LocalRecord;
use crate::printer::diag::DiagnosticSink;
use crate::readers::scanner::{FilterChain, LineFormatter, ResultScanRecords, ReverseLogScanner};

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Count of fields of a well-formed local event log line.
pub const LOCAL_FIELD_COUNT: usize = 3;

/// Create a [`LocalRecord`] from a split local event log line.
///
/// The datetime is a wall-clock time at `tz_offset`. A line with the wrong
/// count of fields or an unparseable datetime becomes [`LocalRecord::empty`].
///
/// [`LocalRecord`]: crate::data::record::LocalRecord
/// [`LocalRecord::empty`]: crate::data::record::LocalRecord#method.empty
#[derive(Clone, Copy, Debug)]
pub struct LocalLineFormatter {
    tz_offset: FixedOffset,
}

impl LocalLineFormatter {
    pub const fn new(tz_offset: FixedOffset) -> LocalLineFormatter {
        LocalLineFormatter { tz_offset }
    }
}

impl Default for LocalLineFormatter {
    /// Local datetimes share the server offset.
    fn default() -> Self {
        LocalLineFormatter::new(*TZ_OFFSET_SERVER)
    }
}

impl LineFormatter for LocalLineFormatter {
    type Record = LocalRecord;

    fn format(
        &self,
        mut fields: RawLine,
    ) -> LocalRecord {
        if fields.len() != LOCAL_FIELD_COUNT {
            defñ!("{} fields, expected {}", fields.len(), LOCAL_FIELD_COUNT);
            return LocalRecord::empty();
        }
        let datetime = match datetime_parse_local(&fields[0], &self.tz_offset) {
            Some(dt) => dt,
            None => {
                defñ!("bad datetime {:?}", fields[0]);
                return LocalRecord::empty();
            }
        };

        LocalRecord {
            datetime: Some(datetime),
            user_agent: std::mem::take(&mut fields[1]),
            data: std::mem::take(&mut fields[2]),
        }
    }
}

/// Find the newest local event.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalLogLoader {
    formatter: LocalLineFormatter,
}

impl LocalLogLoader {
    pub const fn new(tz_offset: FixedOffset) -> LocalLogLoader {
        LocalLogLoader { formatter: LocalLineFormatter::new(tz_offset) }
    }

    /// The newest record at `path`; at most one record.
    pub fn load(
        &self,
        path: &FPath,
        diag: &dyn DiagnosticSink,
    ) -> ResultScanRecords<LocalRecord> {
        defn!("({:?})", path);
        let scanner = ReverseLogScanner::new(path.clone(), LineSplitter::tab(), diag);
        let result = scanner.scan_last(&self.formatter, &FilterChain::new());
        defx!("{}", result);

        result
    }
}
