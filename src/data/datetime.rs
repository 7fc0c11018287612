// src/data/datetime.rs

//! Functions to transform datetime substrings of log lines into chrono
//! [`DateTime`] instances, and to compare those instances against a datetime
//! window.
//!
//! The most relevant documents to understand this file are:
//! - `chrono` crate [`strftime`] format.
//!
//! [`DateTime`]: https://docs.rs/chrono/0.4.21/chrono/struct.DateTime.html
//! [`strftime`]: https://docs.rs/chrono/0.4.21/chrono/format/strftime/index.html

#![allow(non_camel_case_types)]

#[doc(hidden)]
pub use ::chrono::{
    DateTime,
    Duration,
    FixedOffset,
    NaiveDateTime,
    Offset,
    TimeZone,
    Utc,
};
use ::lazy_static::lazy_static;
use ::more_asserts::assert_le;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// DateTime strftime formatting
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Crate `chrono` [`strftime`] formatting pattern, passed to
/// chrono [`NaiveDateTime::parse_from_str`].
///
/// [`strftime`]: https://docs.rs/chrono/0.4.21/chrono/format/strftime/index.html
/// [`NaiveDateTime::parse_from_str`]: https://docs.rs/chrono/0.4.21/chrono/naive/struct.NaiveDateTime.html#method.parse_from_str
pub type DateTimePattern_str = str;

/// A chrono [`DateTime`] type used in _logreconlib_.
///
/// [`DateTime`]: https://docs.rs/chrono/0.4.21/chrono/struct.DateTime.html
pub type DateTimeL = DateTime<FixedOffset>;
pub type DateTimeLOpt = Option<DateTimeL>;

/// Server access log datetime, e.g. `2021-01-01T10:00:00+08:00`.
///
/// The server always writes the same offset so it is matched as literal text
/// and applied with [`TZ_OFFSET_SERVER`].
pub const SERVER_DT_PATTERN: &DateTimePattern_str = "%Y-%m-%dT%H:%M:%S+08:00";

/// Local event log datetime, e.g. `2021-01-01 10:00:00`. No timezone.
pub const LOCAL_DT_PATTERN: &DateTimePattern_str = "%Y-%m-%d %H:%M:%S";

/// Seconds east of UTC of the server access log datetimes.
pub const TZ_OFFSET_SERVER_SECS: i32 = 8 * 3600;

lazy_static! {
    /// Timezone offset of every server access log datetime.
    pub static ref TZ_OFFSET_SERVER: FixedOffset =
        FixedOffset::east_opt(TZ_OFFSET_SERVER_SECS).unwrap_or_else(|| Utc.fix());
}

/// Convert a [`&str`] to a chrono [`Option<DateTime<FixedOffset>>`]
/// instance.
///
/// - `data` to parse that has a datetime string
/// - strftime `pattern` to use for parsing; it must not have a timezone
///   specifier
/// - `tz_offset` timezone offset of the wall-clock time in `data`
///
/// The entire `data` must match `pattern`.
///
/// [`&str`]: str
/// [`Option<DateTime<FixedOffset>>`]: https://docs.rs/chrono/0.4.21/chrono/struct.DateTime.html#impl-DateTime%3CFixedOffset%3E
pub fn datetime_parse_from_str(
    data: &str,
    pattern: &DateTimePattern_str,
    tz_offset: &FixedOffset,
) -> DateTimeLOpt {
    defn!("(pattern {:?}, tz_offset {:?}, data {:?})", pattern, tz_offset, data);

    // no timezone in `pattern` so first convert to a `NaiveDateTime` instance
    let dt_naive = match NaiveDateTime::parse_from_str(data, pattern) {
        Ok(val) => val,
        Err(_err) => {
            defx!("NaiveDateTime.parse_from_str({:?}, {:?}) failed ParseError: {}", data, pattern, _err);
            return None;
        }
    };
    // second convert the `NaiveDateTime` instance to `DateTime<FixedOffset>` instance
    match tz_offset
        .from_local_datetime(&dt_naive)
        .single()
    {
        Some(val) => {
            defx!("return Some({:?})", val);

            Some(val)
        }
        None => {
            defx!("tz_offset.from_local_datetime({:?}) returned None, return None", dt_naive);
            None
        }
    }
}

/// Parse a server access log datetime, e.g. `2021-01-01T10:00:00+08:00`.
pub fn datetime_parse_server(data: &str) -> DateTimeLOpt {
    datetime_parse_from_str(data, SERVER_DT_PATTERN, &TZ_OFFSET_SERVER)
}

/// Parse a local event log datetime, e.g. `2021-01-01 10:00:00`, as a
/// wall-clock time at `tz_offset`.
pub fn datetime_parse_local(
    data: &str,
    tz_offset: &FixedOffset,
) -> DateTimeLOpt {
    datetime_parse_from_str(data, LOCAL_DT_PATTERN, tz_offset)
}

/// Parse a timezone offset string, e.g. `"+08:00"`, `"-0530"`, `"+0000"`.
pub fn tz_offset_parse(data: &str) -> Option<FixedOffset> {
    defn!("({:?})", data);
    let data = data.trim();
    // borrow a fixed datetime to let chrono do the `%z` parsing
    let dts: String = format!("2000-01-01T00:00:00{}", data);
    match DateTime::parse_from_str(dts.as_str(), "%Y-%m-%dT%H:%M:%S%z") {
        Ok(dt) => {
            defx!("return {:?}", dt.offset());
            Some(*dt.offset())
        }
        Err(_err) => {
            defx!("failed to parse {:?}: {}", data, _err);
            None
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// DateTime comparisons
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Describe the result of comparing one [`DateTimeL`] to two DateTime Filters
/// `(after, before)`.
///
/// [`DateTimeL`]: crate::data::datetime::DateTimeL
#[derive(Debug, Eq, PartialEq)]
pub enum Result_Filter_DateTime2 {
    /// like Pass
    InRange,
    /// like Fail
    BeforeRange,
    /// like Fail
    AfterRange,
}

impl Result_Filter_DateTime2 {
    #[inline(always)]
    pub const fn is_pass(&self) -> bool {
        matches!(*self, Result_Filter_DateTime2::InRange)
    }

    #[inline(always)]
    pub const fn is_fail(&self) -> bool {
        matches!(*self, Result_Filter_DateTime2::AfterRange | Result_Filter_DateTime2::BeforeRange)
    }
}

/// How does the passed [`DateTimeL`], `dt`, pass the optional `DateTimeLOpt`
/// filter instances,
/// `dt_filter_after` and `dt_filter_before`?  Is `dt` before ([`BeforeRange`]),
/// after ([`AfterRange`]), or in between ([`InRange`])?
///
/// A `None` filter is unbounded on that side. If both filters are `None` then
/// return `InRange`.
///
/// Comparisons are "inclusive" i.e. `dt` == `dt_filter_after` will return
/// `InRange`.
///
/// [`AfterRange`]: crate::data::datetime::Result_Filter_DateTime2::AfterRange
/// [`BeforeRange`]: crate::data::datetime::Result_Filter_DateTime2::BeforeRange
/// [`InRange`]: crate::data::datetime::Result_Filter_DateTime2::InRange
pub fn dt_pass_filters(
    dt: &DateTimeL,
    dt_filter_after: &DateTimeLOpt,
    dt_filter_before: &DateTimeLOpt,
) -> Result_Filter_DateTime2 {
    defn!("({:?}, {:?}, {:?})", dt, dt_filter_after, dt_filter_before);
    if let (Some(da), Some(db)) = (dt_filter_after, dt_filter_before) {
        assert_le!(da, db, "Bad datetime range values filter_after {:?} {:?} filter_before", da, db);
    }
    if let Some(da) = dt_filter_after {
        if dt < da {
            defx!("return {:?}", Result_Filter_DateTime2::BeforeRange);
            return Result_Filter_DateTime2::BeforeRange;
        }
    }
    if let Some(db) = dt_filter_before {
        if db < dt {
            defx!("return {:?}", Result_Filter_DateTime2::AfterRange);
            return Result_Filter_DateTime2::AfterRange;
        }
    }
    defx!("return {:?}", Result_Filter_DateTime2::InRange);

    Result_Filter_DateTime2::InRange
}
