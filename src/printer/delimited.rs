// src/printer/delimited.rs

//! Write records as delimited text (CSV).
//!
//! The column names of the first record are the header row. All records
//! written together are expected to have the same columns.

use crate::common::Path;
use crate::data::record::Columns;

use std::fs::File;
use std::io::{BufWriter, Write};

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Field delimiter of written output.
pub const OUTPUT_DELIMITER: char = ',';
/// Quote char of written output.
pub const OUTPUT_QUOTE: char = '"';
/// Row terminator of written output.
pub const OUTPUT_LINE_TERMINATOR: &str = "\r\n";

/// Quote `field` if it contains the delimiter, the quote char, or a line
/// break. A quote char within a quoted field is doubled.
pub fn quote_field(field: &str) -> String {
    let needs_quote = field.contains(|c: char| {
        c == OUTPUT_DELIMITER || c == OUTPUT_QUOTE || c == '\r' || c == '\n'
    });
    if !needs_quote {
        return field.to_string();
    }
    let doubled = OUTPUT_QUOTE.to_string().repeat(2);
    let escaped = field.replace(OUTPUT_QUOTE, &doubled);

    format!("{}{}{}", OUTPUT_QUOTE, escaped, OUTPUT_QUOTE)
}

fn write_row<W: Write>(
    out: &mut W,
    fields: &[String],
) -> std::io::Result<()> {
    let row: Vec<String> = fields
        .iter()
        .map(|field| quote_field(field))
        .collect();
    write!(out, "{}{}", row.join(&OUTPUT_DELIMITER.to_string()), OUTPUT_LINE_TERMINATOR)
}

/// Write `records` to `out`, preceded by a header row. Writes nothing if
/// `records` is empty.
pub fn write_delimited_to<W: Write, R: Columns>(
    out: &mut W,
    records: &[R],
) -> std::io::Result<()> {
    defn!("({} records)", records.len());
    let first = match records.first() {
        Some(first) => first,
        None => {
            defx!("no records");
            return Ok(());
        }
    };
    write_row(out, &first.column_names())?;
    for record in records.iter() {
        write_row(out, &record.column_values())?;
    }
    out.flush()?;
    defx!();

    Ok(())
}

/// Create or truncate the file at `path` and write `records` to it.
pub fn write_delimited<R: Columns>(
    path: &Path,
    records: &[R],
) -> std::io::Result<()> {
    defn!("({:?})", path);
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_delimited_to(&mut writer, records)?;
    defx!();

    Ok(())
}
