//! Field decoding for entry and string-macro bodies

use std::borrow::Cow;

use memchr::{memchr, memchr2};

use crate::error::{Error, Result};
use crate::model::{FieldValue, Fields};

use super::scan;

/// Decode a record body into an ordered field map.
///
/// `span` is everything between the record header and the outermost closing
/// brace. Repeatedly: find the next `=`; bytes before it (embedded commas and
/// spaces stripped) form the name; the value starts at the first non-space
/// byte after the `=` and is typed by its first byte. A repeated field name
/// overwrites the earlier value but keeps its original position.
///
/// Errors carry the local span; callers widen them to the full record with
/// [`Error::with_record`].
pub fn decode_fields(span: &[u8]) -> Result<Fields<'_>> {
    let mut fields = Fields::new();
    let mut work: &[u8] = span;

    loop {
        let Some(eq) = memchr(b'=', work) else {
            break;
        };
        let name = clean_name(&work[..eq]);
        work = &work[eq + 1..];

        let Some(start) = scan::first_non_space(work) else {
            return Err(Error::InvalidValueStart {
                record: span.to_vec(),
            });
        };
        work = &work[start..];

        let (value, consumed) = decode_value(work)?;
        fields.insert(name, value);
        work = &work[consumed.min(work.len())..];
    }

    Ok(fields)
}

/// Decode one value at the head of `work`; returns the value and how many
/// bytes to advance (one past the closing delimiter).
fn decode_value(work: &[u8]) -> Result<(FieldValue<'_>, usize)> {
    match work.first() {
        Some(b) if b.is_ascii_digit() => {
            let stop = scan::first_non_digit(work).unwrap_or(work.len());
            let n = parse_integer(&work[..stop], work)?;
            Ok((FieldValue::Integer(n), stop + 1))
        }
        Some(b'{') => {
            // work starts at the opening brace, so the group starts at 0
            let Some((_, stop)) = scan::find_balanced(work, 0, b'{', b'}')? else {
                return Err(Error::MissingDelimiter {
                    expected: '{',
                    record: work.to_vec(),
                });
            };
            Ok((FieldValue::Text(Cow::Borrowed(&work[1..stop])), stop + 1))
        }
        Some(b'"') => {
            let stop = scan::find_unescaped_quote(work).filter(|&p| p > 0);
            let Some(stop) = stop else {
                return Err(Error::MissingDelimiter {
                    expected: '"',
                    record: work.to_vec(),
                });
            };
            Ok((FieldValue::Text(Cow::Borrowed(&work[1..stop])), stop + 1))
        }
        _ => Err(Error::InvalidValueStart {
            record: work.to_vec(),
        }),
    }
}

/// Accumulate a non-negative decimal, checked against `i64` range
fn parse_integer(digits: &[u8], context: &[u8]) -> Result<i64> {
    let mut n: i64 = 0;
    for &b in digits {
        n = n
            .checked_mul(10)
            .and_then(|n| n.checked_add(i64::from(b - b'0')))
            .ok_or_else(|| Error::IntegerOutOfRange {
                record: context.to_vec(),
            })?;
    }
    Ok(n)
}

/// Strip embedded commas and spaces from a field name
fn clean_name(raw: &[u8]) -> Cow<'_, [u8]> {
    if memchr2(b',', b' ', raw).is_none() {
        Cow::Borrowed(raw)
    } else {
        Cow::Owned(
            raw.iter()
                .copied()
                .filter(|&b| b != b',' && b != b' ')
                .collect(),
        )
    }
}
