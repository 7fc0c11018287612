// src/tests/datetime_tests.rs

//! tests for `datetime.rs` functions

use crate::data::datetime::{
    datetime_parse_local,
    datetime_parse_server,
    dt_pass_filters,
    tz_offset_parse,
    DateTimeL,
    DateTimeLOpt,
    FixedOffset,
    Result_Filter_DateTime2,
    TZ_OFFSET_SERVER,
};

use ::lazy_static::lazy_static;
use ::test_case::test_case;

lazy_static! {
    static ref DT_1000: DateTimeL = DateTimeL::parse_from_rfc3339("2021-01-01T10:00:00+08:00").unwrap();
    static ref DT_1005: DateTimeL = DateTimeL::parse_from_rfc3339("2021-01-01T10:05:00+08:00").unwrap();
    static ref DT_1010: DateTimeL = DateTimeL::parse_from_rfc3339("2021-01-01T10:10:00+08:00").unwrap();
    static ref FO_M5: FixedOffset = FixedOffset::west_opt(5 * 3600).unwrap();
}

#[test]
fn test_datetime_parse_server() {
    let dt = datetime_parse_server("2021-01-01T10:00:00+08:00");
    assert_eq!(dt, Some(*DT_1000));
    assert_eq!(dt.unwrap().offset(), &*TZ_OFFSET_SERVER);
}

#[test_case(""; "empty")]
#[test_case("2021-01-01T10:00:00"; "no offset")]
#[test_case("2021-01-01T10:00:00+09:00"; "other offset")]
#[test_case("2021-01-01 10:00:00+08:00"; "space separator")]
#[test_case("2021-13-01T10:00:00+08:00"; "bad month")]
#[test_case("2021-01-01T10:00:00+08:00 "; "trailing space")]
fn test_datetime_parse_server_bad(data: &str) {
    assert_eq!(datetime_parse_server(data), None);
}

#[test]
fn test_datetime_parse_local() {
    assert_eq!(datetime_parse_local("2021-01-01 10:00:00", &TZ_OFFSET_SERVER), Some(*DT_1000));
    let dt = datetime_parse_local("2021-01-01 10:00:00", &FO_M5).unwrap();
    assert_eq!(dt.offset(), &*FO_M5);
    assert_eq!(dt, DateTimeL::parse_from_rfc3339("2021-01-01T23:00:00+08:00").unwrap());
}

#[test_case(""; "empty")]
#[test_case("2021-01-01T10:00:00"; "T separator")]
#[test_case("2021-01-01 10:00"; "no seconds")]
#[test_case("ua-1"; "not a datetime")]
fn test_datetime_parse_local_bad(data: &str) {
    assert_eq!(datetime_parse_local(data, &TZ_OFFSET_SERVER), None);
}

#[test_case("+08:00", Some(8 * 3600))]
#[test_case("+0800", Some(8 * 3600))]
#[test_case("-05:30", Some(-(5 * 3600 + 30 * 60)))]
#[test_case(" +00:00 ", Some(0); "whitespace")]
#[test_case("", None; "empty")]
#[test_case("eight", None)]
fn test_tz_offset_parse(
    data: &str,
    expect_secs: Option<i32>,
) {
    let result = tz_offset_parse(data).map(|fo| fo.local_minus_utc());
    assert_eq!(result, expect_secs);
}

#[test_case(&DT_1000, &None, &None, Result_Filter_DateTime2::InRange; "no filters")]
#[test_case(&DT_1000, &Some(*DT_1005), &None, Result_Filter_DateTime2::BeforeRange; "before after-filter")]
#[test_case(&DT_1005, &Some(*DT_1005), &None, Result_Filter_DateTime2::InRange; "at after-filter")]
#[test_case(&DT_1010, &None, &Some(*DT_1005), Result_Filter_DateTime2::AfterRange; "after before-filter")]
#[test_case(&DT_1005, &None, &Some(*DT_1005), Result_Filter_DateTime2::InRange; "at before-filter")]
#[test_case(&DT_1005, &Some(*DT_1000), &Some(*DT_1010), Result_Filter_DateTime2::InRange; "within both")]
#[test_case(&DT_1010, &Some(*DT_1000), &Some(*DT_1005), Result_Filter_DateTime2::AfterRange; "after both")]
fn test_dt_pass_filters(
    dt: &DateTimeL,
    after: &DateTimeLOpt,
    before: &DateTimeLOpt,
    expect: Result_Filter_DateTime2,
) {
    let result = dt_pass_filters(dt, after, before);
    assert_eq!(result, expect);
    assert_eq!(result.is_pass(), !result.is_fail());
}
