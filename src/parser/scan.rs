//! Low-level byte scanners
//!
//! Pure functions over immutable byte spans. Each scanner is linear in the
//! span it walks; delimiter hunting goes through `memchr`.

use memchr::{memchr, memchr2, memchr3};

use crate::error::{Error, Result};

/// Find the first outermost balanced `open`/`close` pair at or after `from`.
///
/// Returns `Ok(None)` when no `open` occurs in the span. Once an `open` is
/// found, a nesting counter runs until it returns to zero; the positions of
/// the opening and closing delimiter are returned. Input exhausted while the
/// counter is nonzero is malformed input, never a silent truncation.
pub fn find_balanced(
    bytes: &[u8],
    from: usize,
    open: u8,
    close: u8,
) -> Result<Option<(usize, usize)>> {
    if from >= bytes.len() {
        return Ok(None);
    }
    let Some(rel) = memchr(open, &bytes[from..]) else {
        return Ok(None);
    };
    let start = from + rel;

    let mut depth = 1usize;
    let mut cursor = start + 1;
    loop {
        let Some(rel) = memchr2(open, close, &bytes[cursor..]) else {
            return Err(Error::UnbalancedBraces {
                record: bytes[from..].to_vec(),
            });
        };
        let pos = cursor + rel;
        if bytes[pos] == open {
            depth += 1;
        } else {
            depth -= 1;
            if depth == 0 {
                return Ok(Some((start, pos)));
            }
        }
        cursor = pos + 1;
    }
}

/// Find the closing quote matching the quote that opens `bytes`.
///
/// The caller passes the span whose first byte is the opening quote, so
/// position 0 is only eligible when the span is a single byte. A candidate
/// `"` qualifies iff the preceding byte is not `\` and the running brace
/// balance at its position is exactly 0; braces may wrap literal quote
/// characters (`{"}`) that must not terminate the value.
#[must_use]
pub fn find_unescaped_quote(bytes: &[u8]) -> Option<usize> {
    match bytes.len() {
        0 => return None,
        1 => return (bytes[0] == b'"').then_some(0),
        _ => {}
    }

    let mut balance: i64 = 0;
    let mut cursor = 0usize;
    while let Some(rel) = memchr3(b'"', b'{', b'}', &bytes[cursor..]) {
        let pos = cursor + rel;
        match bytes[pos] {
            b'{' => balance += 1,
            b'}' => balance -= 1,
            _ => {
                if pos > 0 && bytes[pos - 1] != b'\\' && balance == 0 {
                    return Some(pos);
                }
            }
        }
        cursor = pos + 1;
    }
    None
}

/// Position of the first byte that is not ASCII whitespace
#[must_use]
pub fn first_non_space(bytes: &[u8]) -> Option<usize> {
    bytes.iter().position(|b| !b.is_ascii_whitespace())
}

/// Position of the first byte that is not an ASCII digit
#[must_use]
pub fn first_non_digit(bytes: &[u8]) -> Option<usize> {
    bytes.iter().position(|b| !b.is_ascii_digit())
}
