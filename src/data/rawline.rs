// src/data/rawline.rs

//! Implement [`RawLine`] and the [`LineSplitter`] that creates it from one
//! physical line of a delimited text log.
//!
//! [`RawLine`]: crate::data::rawline::RawLine
//! [`LineSplitter`]: crate::data::rawline::LineSplitter

use crate::common::CRc;

use std::fmt;

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Ordered fields of one physical line.
///
/// Only lives during a single scan pass unless a formatter passes it through
/// unchanged.
pub type RawLine = Vec<String>;

/// Default field delimiter; server access logs are space-delimited.
pub const DELIMITER_DEFAULT: char = ' ';
/// Field delimiter of the local event log.
pub const DELIMITER_TAB: char = '\t';
/// Default quote character.
pub const QUOTE_DEFAULT: char = '"';

/// Splits a physical line into a [`RawLine`].
///
/// Quoting follows the common CSV dialect:
/// * a field that begins with the quote char ends at the matching quote char;
///   delimiters inside are literal
/// * a doubled quote char within a quoted field is one literal quote char
/// * a quote char within an unquoted field is literal
/// * consecutive delimiters produce empty fields
/// * an empty line produces zero fields
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct LineSplitter {
    delimiter: char,
    quote: char,
}

impl fmt::Debug for LineSplitter {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("LineSplitter")
            .field("delimiter", &self.delimiter.escape_debug().to_string())
            .field("quote", &self.quote)
            .finish()
    }
}

impl Default for LineSplitter {
    fn default() -> Self {
        LineSplitter::new(DELIMITER_DEFAULT, QUOTE_DEFAULT)
    }
}

/// States while walking the chars of one line.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum SplitState {
    FieldStart,
    Unquoted,
    Quoted,
    /// A quote char was seen inside a quoted field; it is either the closing
    /// quote or the first half of an escaped quote.
    QuoteInQuoted,
}

impl LineSplitter {
    pub const fn new(
        delimiter: char,
        quote: char,
    ) -> LineSplitter {
        LineSplitter { delimiter, quote }
    }

    /// Tab-delimited, double-quote quoted.
    pub const fn tab() -> LineSplitter {
        LineSplitter::new(DELIMITER_TAB, QUOTE_DEFAULT)
    }

    #[inline(always)]
    pub const fn delimiter(&self) -> char {
        self.delimiter
    }

    #[inline(always)]
    pub const fn quote(&self) -> char {
        self.quote
    }

    /// Split `line` into fields. `line` must not contain the line terminator
    /// `'\n'`; one trailing `'\r'` is ignored.
    pub fn split(
        &self,
        line: &str,
    ) -> RawLine {
        let line = line.strip_suffix(CRc).unwrap_or(line);
        let mut fields: RawLine = RawLine::new();
        if line.is_empty() {
            defñ!("empty line, return 0 fields");
            return fields;
        }
        let mut field: String = String::new();
        let mut state: SplitState = SplitState::FieldStart;
        for c in line.chars() {
            state = match state {
                SplitState::FieldStart | SplitState::Unquoted => {
                    if c == self.delimiter {
                        fields.push(std::mem::take(&mut field));
                        SplitState::FieldStart
                    } else if c == self.quote && state == SplitState::FieldStart {
                        SplitState::Quoted
                    } else {
                        field.push(c);
                        SplitState::Unquoted
                    }
                }
                SplitState::Quoted => {
                    if c == self.quote {
                        SplitState::QuoteInQuoted
                    } else {
                        field.push(c);
                        SplitState::Quoted
                    }
                }
                SplitState::QuoteInQuoted => {
                    if c == self.quote {
                        field.push(c);
                        SplitState::Quoted
                    } else if c == self.delimiter {
                        fields.push(std::mem::take(&mut field));
                        SplitState::FieldStart
                    } else {
                        // text after a closing quote is kept
                        field.push(c);
                        SplitState::Unquoted
                    }
                }
            };
        }
        fields.push(field);
        defñ!("{:?} split into {} fields", line, fields.len());

        fields
    }
}
