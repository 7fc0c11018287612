// src/data/record.rs

//! Structured records produced from a [`RawLine`] by a
//! [`LineFormatter`].
//!
//! A [`ServerRecord`] is one request of a server access log.
//! A [`LocalRecord`] is one event of the local event log.
//!
//! Records are immutable once created. A record created from a malformed line
//! is the "empty" record; all fields present with empty or `None` values.
//!
//! [`RawLine`]: crate::data::rawline::RawLine
//! [`LineFormatter`]: crate::readers::scanner::LineFormatter
//! [`ServerRecord`]: crate::data::record::ServerRecord
//! [`LocalRecord`]: crate::data::record::LocalRecord

use crate::data::datetime::{DateTimeL, DateTimeLOpt};
use crate::data::querydata::{QueryData, KEY_VALUE_SEPARATOR, PAIR_SEPARATOR};
use crate::data::rawline::RawLine;

/// Query data key of the session id.
pub const KEY_SESSION_ID: &str = "p";

/// Query data key of the client payload.
pub const KEY_PAYLOAD: &str = "s";

/// strftime pattern of datetimes written as column values.
pub const COLUMN_DT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// traits for records
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A record with a datetime, if one was parsed.
pub trait Timestamped {
    fn datetime(&self) -> DateTimeLOpt;
}

/// A record that can be written as one row of delimited output.
///
/// `column_names().len()` must equal `column_values().len()`.
pub trait Columns {
    fn column_names(&self) -> Vec<String>;
    fn column_values(&self) -> Vec<String>;
}

fn datetime_to_column(dt: &DateTimeLOpt) -> String {
    match dt {
        Some(dt) => dt.format(COLUMN_DT_FORMAT).to_string(),
        None => String::new(),
    }
}

impl Columns for RawLine {
    fn column_names(&self) -> Vec<String> {
        (0..self.len()).map(|i| i.to_string()).collect()
    }

    fn column_values(&self) -> Vec<String> {
        self.clone()
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// ServerRecord
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One request from a server access log.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ServerRecord {
    /// client address
    pub address: String,
    pub datetime: DateTimeLOpt,
    /// HTTP method
    pub method: String,
    /// Decoded query data. `None` if the line was malformed or the data
    /// field failed to decode.
    pub data: Option<QueryData>,
    /// HTTP status code, as written
    pub return_code: String,
    pub user_agent: String,
}

impl ServerRecord {
    /// The record of a malformed line.
    pub fn empty() -> ServerRecord {
        ServerRecord::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == ServerRecord::empty()
    }

    /// Value of `key` in the query data.
    pub fn query_value(
        &self,
        key: &str,
    ) -> Option<&str> {
        self.data
            .as_ref()
            .and_then(|data| data.get(key))
            .map(String::as_str)
    }

    /// The session id, query data key `p`.
    pub fn session_id(&self) -> Option<&str> {
        self.query_value(KEY_SESSION_ID)
    }

    /// The client payload, query data key `s`.
    pub fn payload(&self) -> Option<&str> {
        self.query_value(KEY_PAYLOAD)
    }
}

impl Timestamped for ServerRecord {
    fn datetime(&self) -> DateTimeLOpt {
        self.datetime
    }
}

impl Columns for ServerRecord {
    fn column_names(&self) -> Vec<String> {
        ["ip", "datetime", "method", "data", "return_code", "user_agent"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn column_values(&self) -> Vec<String> {
        let data: String = match &self.data {
            Some(data) => data
                .iter()
                .map(|(k, v)| format!("{}{}{}", k, KEY_VALUE_SEPARATOR, v))
                .collect::<Vec<String>>()
                .join(&PAIR_SEPARATOR.to_string()),
            None => String::new(),
        };
        vec![
            self.address.clone(),
            datetime_to_column(&self.datetime),
            self.method.clone(),
            data,
            self.return_code.clone(),
            self.user_agent.clone(),
        ]
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// LocalRecord
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One event from the local event log.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LocalRecord {
    pub datetime: DateTimeLOpt,
    pub user_agent: String,
    /// Payload as sent by the client; not decoded.
    pub data: String,
}

impl LocalRecord {
    /// The record of a malformed line.
    pub fn empty() -> LocalRecord {
        LocalRecord::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == LocalRecord::empty()
    }

    pub fn new(
        datetime: DateTimeL,
        user_agent: &str,
        data: &str,
    ) -> LocalRecord {
        LocalRecord {
            datetime: Some(datetime),
            user_agent: user_agent.to_string(),
            data: data.to_string(),
        }
    }
}

impl Timestamped for LocalRecord {
    fn datetime(&self) -> DateTimeLOpt {
        self.datetime
    }
}

impl Columns for LocalRecord {
    fn column_names(&self) -> Vec<String> {
        ["datetime", "user_agent", "data"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn column_values(&self) -> Vec<String> {
        vec![
            datetime_to_column(&self.datetime),
            self.user_agent.clone(),
            self.data.clone(),
        ]
    }
}
