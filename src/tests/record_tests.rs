// src/tests/record_tests.rs

//! tests for `record.rs`

use crate::data::datetime::{datetime_parse_server, DateTimeL};
use crate::data::querydata::decode_query_data;
use crate::data::rawline::RawLine;
use crate::data::record::{Columns, LocalRecord, ServerRecord, Timestamped};

fn dt() -> DateTimeL {
    datetime_parse_server("2021-01-01T10:00:02+08:00").unwrap()
}

fn server_record() -> ServerRecord {
    ServerRecord {
        address: String::from("10.1.2.3"),
        datetime: Some(dt()),
        method: String::from("GET"),
        data: Some(decode_query_data("s=%257B%257D&p=42").unwrap()),
        return_code: String::from("200"),
        user_agent: String::from("ua-1"),
    }
}

#[test]
fn test_server_record_empty() {
    let record = ServerRecord::empty();
    assert!(record.is_empty());
    assert_eq!(record.datetime(), None);
    assert_eq!(record.data, None);
    assert_eq!(record.session_id(), None);
    assert!(!server_record().is_empty());
}

#[test]
fn test_server_record_query_values() {
    let record = server_record();
    assert_eq!(record.session_id(), Some("42"));
    assert_eq!(record.payload(), Some("%7B%7D"));
    assert_eq!(record.query_value("x"), None);
    assert_eq!(record.datetime(), Some(dt()));
}

#[test]
fn test_server_record_columns() {
    let record = server_record();
    let names = record.column_names();
    let values = record.column_values();
    assert_eq!(names, vec!["ip", "datetime", "method", "data", "return_code", "user_agent"]);
    assert_eq!(names.len(), values.len());
    // data pairs are in key order
    assert_eq!(
        values,
        vec!["10.1.2.3", "2021-01-01 10:00:02", "GET", "p=42&s=%7B%7D", "200", "ua-1"]
    );
}

#[test]
fn test_server_record_empty_columns() {
    let record = ServerRecord::empty();
    assert_eq!(record.column_values(), vec![""; 6]);
}

#[test]
fn test_local_record() {
    let record = LocalRecord::new(dt(), "ua-1", "p=42&s=x");
    assert!(!record.is_empty());
    assert_eq!(record.datetime(), Some(dt()));
    assert_eq!(record.column_names(), vec!["datetime", "user_agent", "data"]);
    assert_eq!(record.column_values(), vec!["2021-01-01 10:00:02", "ua-1", "p=42&s=x"]);
}

#[test]
fn test_local_record_empty() {
    let record = LocalRecord::empty();
    assert!(record.is_empty());
    assert_eq!(record.column_values(), vec![""; 3]);
}

#[test]
fn test_rawline_columns() {
    let rawline: RawLine = vec![String::from("a"), String::from("b c")];
    assert_eq!(rawline.column_names(), vec!["0", "1"]);
    assert_eq!(rawline.column_values(), rawline);
}
