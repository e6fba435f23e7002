//! Record classification and decoding
//!
//! A record is one `@type{...}` unit with its trailing commentary already
//! trimmed and line breaks stripped. The type keyword is classified before
//! any structure beyond the header is interpreted.

use std::borrow::Cow;

use memchr::memchr;

use crate::error::{Error, Result};
use crate::model::{Entry, Preamble, StringMacro};

use super::{field, scan};

/// A decoded record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record<'a> {
    /// A bibliography entry
    Entry(Entry<'a>),
    /// A `@string` macro definition
    String(StringMacro<'a>),
    /// A `@preamble`
    Preamble(Preamble<'a>),
}

impl Record<'_> {
    /// Convert to a version that owns all its bytes
    #[must_use]
    pub fn into_owned(self) -> Record<'static> {
        match self {
            Self::Entry(entry) => Record::Entry(entry.into_owned()),
            Self::String(string) => Record::String(string.into_owned()),
            Self::Preamble(preamble) => Record::Preamble(preamble.into_owned()),
        }
    }
}

/// Decode a single trimmed record into its typed form
pub fn parse_record(record: &[u8]) -> Result<Record<'_>> {
    let (ty, citekey) = classify(record)?;

    if ty.eq_ignore_ascii_case(b"string") {
        let fields =
            field::decode_fields(field_span(record)?).map_err(|e| e.with_record(record))?;
        return Ok(Record::String(StringMacro { fields }));
    }

    if ty.eq_ignore_ascii_case(b"preamble") {
        return Ok(Record::Preamble(Preamble {
            value: Cow::Borrowed(preamble_value(record)?),
        }));
    }

    let Some(citekey) = citekey else {
        return Err(Error::MissingDelimiter {
            expected: ',',
            record: record.to_vec(),
        });
    };
    let fields = field::decode_fields(field_span(record)?).map_err(|e| e.with_record(record))?;
    Ok(Record::Entry(Entry {
        ty: Cow::Borrowed(ty),
        citekey: Cow::Borrowed(citekey),
        fields,
    }))
}

/// Extract the type keyword and, for non-special records, the citekey.
///
/// The type keyword is the trimmed text between the first `@` and the first
/// `{`. The citekey is present only when the first `,` after the `{` occurs
/// before the first `=`; `string` and `preamble` (case-insensitive) bypass
/// citekey extraction.
pub fn classify(record: &[u8]) -> Result<(&[u8], Option<&[u8]>)> {
    let ty = entry_type(record)?;
    if ty.eq_ignore_ascii_case(b"string") || ty.eq_ignore_ascii_case(b"preamble") {
        return Ok((ty, None));
    }
    Ok((ty, citekey(record)?))
}

/// The trimmed bytes between the first `@` and the first `{`
fn entry_type(record: &[u8]) -> Result<&[u8]> {
    let at = memchr(b'@', record).ok_or_else(|| missing('@', record))?;
    let brace = memchr(b'{', record).ok_or_else(|| missing('{', record))?;
    if brace < at {
        return Err(missing('{', record));
    }
    Ok(record[at + 1..brace].trim_ascii())
}

/// The trimmed bytes between the opening brace and the first comma, when
/// that comma precedes the first `=`
fn citekey(record: &[u8]) -> Result<Option<&[u8]>> {
    let brace = memchr(b'{', record).ok_or_else(|| missing('{', record))?;
    let comma = memchr(b',', record);
    let equal = memchr(b'=', record);

    match (comma, equal) {
        (Some(c), None) if c > brace => Ok(Some(record[brace + 1..c].trim_ascii())),
        (Some(c), Some(e)) if c > brace && c < e => {
            Ok(Some(record[brace + 1..c].trim_ascii()))
        }
        _ => Ok(None),
    }
}

/// The field-list span: from just past the citekey comma (or past the opening
/// brace when there is none) up to the outermost closing brace
fn field_span(record: &[u8]) -> Result<&[u8]> {
    if record.last() != Some(&b'}') {
        return Err(missing('}', record));
    }
    let brace = memchr(b'{', record).ok_or_else(|| missing('{', record))?;
    let comma = memchr(b',', record);
    let equal = memchr(b'=', record);

    let split = match (comma, equal) {
        (Some(c), None) if c > brace => c,
        (Some(c), Some(e)) if c > brace && c < e => c,
        _ => brace,
    };
    Ok(&record[split + 1..record.len() - 1])
}

/// The trimmed, verbatim span inside a preamble record's outermost braces
pub fn preamble_value(record: &[u8]) -> Result<&[u8]> {
    match scan::find_balanced(record, 0, b'{', b'}')? {
        Some((start, stop)) => Ok(record[start + 1..stop].trim_ascii()),
        None => Err(missing('{', record)),
    }
}

fn missing(expected: char, record: &[u8]) -> Error {
    Error::MissingDelimiter {
        expected,
        record: record.to_vec(),
    }
}
