//! Raw parsing engine
//!
//! Pipeline: document bytes → [`split_records`] → per-record
//! [`trim_trailing`] → line-break stripping → [`record::parse_record`]
//! (classification, then field or preamble decoding). All stages are pure
//! functions over byte spans; records are subslices of the input.

pub mod field;
pub mod record;
pub mod scan;

use std::borrow::Cow;

use memchr::{memchr2, memchr_iter};

use crate::document::Document;
use crate::error::{Error, Result};

pub use record::Record;

/// Parse a complete document
pub fn parse_document(input: &[u8]) -> Result<Document<'_>> {
    let mut doc = Document::new();
    for raw in split_records(input)? {
        let trimmed = trim_trailing(raw)?;
        match strip_line_breaks(trimmed) {
            Cow::Borrowed(rec) => doc.push(record::parse_record(rec)?),
            Cow::Owned(rec) => doc.push(record::parse_record(&rec)?.into_owned()),
        }
    }
    Ok(doc)
}

/// Partition a document into top-level records.
///
/// The document splits on `@`; fragments accumulate into the current record
/// while its total `{` and `}` counts differ, so `@` bytes inside still-open
/// braces are absorbed into the record that contains them. A final record
/// that never balances is a hard error. Bytes before the first `@` form a
/// record of their own and fail classification downstream.
pub fn split_records(input: &[u8]) -> Result<Vec<&[u8]>> {
    let mut starts: Vec<usize> = Vec::new();
    if !input.is_empty() && input[0] != b'@' {
        starts.push(0);
    }
    starts.extend(memchr_iter(b'@', input));

    let mut records = Vec::new();
    let mut idx = 0;
    while idx < starts.len() {
        let rec_start = starts[idx];
        let mut opening = 0usize;
        let mut closing = 0usize;
        let rec_end = loop {
            let frag_start = starts[idx];
            let frag_end = starts.get(idx + 1).copied().unwrap_or(input.len());
            opening += memchr_iter(b'{', &input[frag_start..frag_end]).count();
            closing += memchr_iter(b'}', &input[frag_start..frag_end]).count();
            idx += 1;
            if opening == closing {
                break frag_end;
            }
            if idx == starts.len() {
                return Err(Error::UnbalancedBraces {
                    record: input[rec_start..].to_vec(),
                });
            }
        };
        records.push(&input[rec_start..rec_end]);
    }
    Ok(records)
}

/// Truncate a record immediately after its outermost closing brace,
/// discarding trailing commentary between records
pub fn trim_trailing(record: &[u8]) -> Result<&[u8]> {
    match scan::find_balanced(record, 0, b'{', b'}')? {
        Some((_, stop)) => Ok(&record[..=stop]),
        None => Err(Error::MissingDelimiter {
            expected: '{',
            record: record.to_vec(),
        }),
    }
}

/// Remove `\r` and `\n` from a record before header and field decoding.
///
/// Borrowed when the record contains none, so clean input stays zero-copy.
fn strip_line_breaks(record: &[u8]) -> Cow<'_, [u8]> {
    if memchr2(b'\r', b'\n', record).is_none() {
        Cow::Borrowed(record)
    } else {
        Cow::Owned(
            record
                .iter()
                .copied()
                .filter(|&b| b != b'\r' && b != b'\n')
                .collect(),
        )
    }
}
