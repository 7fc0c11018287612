// src/readers/serverlog.rs

//! Scanning a server access log.
//!
//! A server access log line has ten space-delimited, quote-aware fields, e.g.
//!
//! ```text
//! 10.1.2.3 2021-01-01T10:00:02+08:00 GET /e "-" p=42&s=%257B%257D 200 512 "-" "ua-1"
//! ```
//!
//! Of these, the [`ServerLineFormatter`] keeps the address (field 0), the
//! datetime (field 1), the method (field 2), the query data (field 5), the
//! status code (field 6), and the user agent (field 9).
//!
//! [`ServerLineFormatter`]: self::ServerLineFormatter

use crate::common::FPath;
use crate::data::datetime::{datetime_parse_server, dt_pass_filters, DateTimeL, DateTimeLOpt};
use crate::data::querydata::decode_query_data;
use crate::data::rawline::{LineSplitter, RawLine};
use crate::data::record::{ServerRecord, Timestamped};
use crate::printer::diag::DiagnosticSink;
use crate::readers::scanner::{
    FilterChain,
    LineFilter,
    LineFormatter,
    ResultScanRecords,
    ReverseLogScanner,
    ScanBreaker,
    ScanProgress,
};

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Count of fields of a well-formed server access log line.
pub const SERVER_FIELD_COUNT: usize = 10;

const FIELD_ADDRESS: usize = 0;
const FIELD_DATETIME: usize = 1;
const FIELD_METHOD: usize = 2;
const FIELD_DATA: usize = 5;
const FIELD_RETURN_CODE: usize = 6;
const FIELD_USER_AGENT: usize = 9;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// formatter
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Create a [`ServerRecord`] from a split server access log line.
///
/// A line with the wrong count of fields or an unparseable datetime becomes
/// [`ServerRecord::empty`]. A data field that fails to decode leaves
/// `data` as `None`; the other fields are kept.
///
/// [`ServerRecord`]: crate::data::record::ServerRecord
/// [`ServerRecord::empty`]: crate::data::record::ServerRecord#method.empty
#[derive(Clone, Copy, Debug, Default)]
pub struct ServerLineFormatter;

impl LineFormatter for ServerLineFormatter {
    type Record = ServerRecord;

    fn format(
        &self,
        mut fields: RawLine,
    ) -> ServerRecord {
        if fields.len() != SERVER_FIELD_COUNT {
            defñ!("{} fields, expected {}", fields.len(), SERVER_FIELD_COUNT);
            return ServerRecord::empty();
        }
        let datetime: DateTimeLOpt = datetime_parse_server(&fields[FIELD_DATETIME]);
        if datetime.is_none() {
            defñ!("bad datetime {:?}", fields[FIELD_DATETIME]);
            return ServerRecord::empty();
        }
        let data = match decode_query_data(&fields[FIELD_DATA]) {
            Ok(data) => Some(data),
            Err(_err) => {
                defñ!("bad data field: {}", _err);
                None
            }
        };

        ServerRecord {
            address: std::mem::take(&mut fields[FIELD_ADDRESS]),
            datetime,
            method: std::mem::take(&mut fields[FIELD_METHOD]),
            data,
            return_code: std::mem::take(&mut fields[FIELD_RETURN_CODE]),
            user_agent: std::mem::take(&mut fields[FIELD_USER_AGENT]),
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// filters
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Accept a [`ServerRecord`] of the target session id, and if given, the
/// target user agent.
///
/// [`ServerRecord`]: crate::data::record::ServerRecord
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerSessionFilter {
    session_id: String,
    user_agent: Option<String>,
}

impl ServerSessionFilter {
    pub fn new(
        session_id: &str,
        user_agent: Option<&str>,
    ) -> ServerSessionFilter {
        ServerSessionFilter {
            session_id: session_id.to_string(),
            user_agent: user_agent.map(String::from),
        }
    }
}

impl LineFilter<ServerRecord> for ServerSessionFilter {
    fn accept(
        &self,
        record: &ServerRecord,
    ) -> bool {
        // record has no data
        match &record.data {
            Some(data) if !data.is_empty() => {}
            _ => return false,
        }
        match record.session_id() {
            Some(session_id) if session_id == self.session_id => {}
            _ => return false,
        }
        match &self.user_agent {
            Some(user_agent) => record.user_agent == *user_agent,
            None => true,
        }
    }
}

/// Accept a [`ServerRecord`] whose payload, query data key `s`, equals the
/// expected payload.
///
/// [`ServerRecord`]: crate::data::record::ServerRecord
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PayloadFilter {
    payload: String,
}

impl PayloadFilter {
    pub fn new(payload: &str) -> PayloadFilter {
        PayloadFilter { payload: payload.to_string() }
    }
}

impl LineFilter<ServerRecord> for PayloadFilter {
    fn accept(
        &self,
        record: &ServerRecord,
    ) -> bool {
        record.payload() == Some(self.payload.as_str())
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// breaker
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Stop a scan at the first record with a datetime before `start`, or if
/// `end` is given, after `end`. Both bounds are inclusive.
///
/// A record without a datetime never stops the scan. If `end` is before
/// `start` then every record with a datetime stops the scan.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TimeWindowBreaker {
    start: DateTimeL,
    end: DateTimeLOpt,
}

impl TimeWindowBreaker {
    pub const fn new(
        start: DateTimeL,
        end: DateTimeLOpt,
    ) -> TimeWindowBreaker {
        TimeWindowBreaker { start, end }
    }

    /// Is `end` before `start`? No datetime is within such a window.
    pub fn is_reversed(&self) -> bool {
        matches!(self.end, Some(end) if end < self.start)
    }

    pub const fn start(&self) -> DateTimeL {
        self.start
    }

    pub const fn end(&self) -> DateTimeLOpt {
        self.end
    }
}

impl<R: Timestamped> ScanBreaker<R> for TimeWindowBreaker {
    fn should_break(
        &self,
        _progress: ScanProgress,
        record: &R,
    ) -> bool {
        match record.datetime() {
            Some(_dt) if self.is_reversed() => {
                defñ!("reversed window {:?}, break at {:?}", self, _dt);
                true
            }
            Some(dt) => dt_pass_filters(&dt, &Some(self.start), &self.end).is_fail(),
            None => false,
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// loader
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Find the server access log requests of a session sent at or after a
/// local event.
#[derive(Clone, Debug)]
pub struct ServerLogLoader {
    session_id: String,
    user_agent: Option<String>,
    payload: String,
    send_time: DateTimeL,
    /// Also require the payload to match.
    match_payload: bool,
}

impl ServerLogLoader {
    /// - `session_id` query data key `p` to match
    /// - `user_agent` to match, if given
    /// - `payload` the local event payload
    /// - `send_time` the local event datetime; older requests are not read
    pub fn new(
        session_id: &str,
        user_agent: Option<&str>,
        payload: &str,
        send_time: DateTimeL,
    ) -> ServerLogLoader {
        ServerLogLoader {
            session_id: session_id.to_string(),
            user_agent: user_agent.map(String::from),
            payload: payload.to_string(),
            send_time,
            match_payload: false,
        }
    }

    /// Also filter out requests whose payload differs from the local payload.
    pub fn with_payload_match(
        mut self,
        match_payload: bool,
    ) -> ServerLogLoader {
        self.match_payload = match_payload;
        self
    }

    pub fn payload(&self) -> &str {
        self.payload.as_str()
    }

    pub const fn send_time(&self) -> DateTimeL {
        self.send_time
    }

    /// Matching requests at `path`, newest first.
    pub fn load(
        &self,
        path: &FPath,
        diag: &dyn DiagnosticSink,
    ) -> ResultScanRecords<ServerRecord> {
        defn!("({:?}) {:?}", path, self);
        let scanner = ReverseLogScanner::new(path.clone(), LineSplitter::default(), diag);
        let mut filters: FilterChain<ServerRecord> = FilterChain::new()
            .with(ServerSessionFilter::new(&self.session_id, self.user_agent.as_deref()));
        if self.match_payload {
            filters.push(PayloadFilter::new(&self.payload));
        }
        let breaker = TimeWindowBreaker::new(self.send_time, None);
        let result = scanner.scan(&ServerLineFormatter, &filters, &breaker);
        defx!("{}", result);

        result
    }
}
