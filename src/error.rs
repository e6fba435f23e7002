//! Error types for the bibraw crate

use thiserror::Error;

/// Result type for bibraw operations
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for bibraw
///
/// Structural parse failures abort the whole document; no partial result is
/// returned. Variants carry the raw bytes of the offending record so callers
/// can report it verbatim.
#[derive(Error, Debug)]
pub enum Error {
    /// A record's brace counts never equalize before input ends
    #[error("unbalanced braces in record `{}`", snippet(.record))]
    UnbalancedBraces {
        /// Raw bytes of the offending record
        record: Vec<u8>,
    },

    /// A required `@`, `{`, `,`, `=` or closing `"` is absent
    #[error("expected `{expected}` in record `{}`", snippet(.record))]
    MissingDelimiter {
        /// The delimiter the grammar mandates at this point
        expected: char,
        /// Raw bytes of the offending record
        record: Vec<u8>,
    },

    /// A field value's first byte is none of digit, `{`, `"`
    #[error("expected value in braces, quotes, or digits in record `{}`", snippet(.record))]
    InvalidValueStart {
        /// Raw bytes of the offending record
        record: Vec<u8>,
    },

    /// A bare digit run does not fit in an `i64`
    #[error("integer value out of range in record `{}`", snippet(.record))]
    IntegerOutOfRange {
        /// Raw bytes of the offending record
        record: Vec<u8>,
    },

    /// A byte sequence failed strict ASCII (or UTF-8) decoding
    #[error("non-ascii content in `{}`", snippet(.bytes))]
    NonAsciiContent {
        /// The bytes that failed to decode
        bytes: Vec<u8>,
    },

    /// IO error from the file reading/writing shims
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Rebind a scanner-level error to the full enclosing record.
    ///
    /// Scanners attach the span they walked; the record decoder widens that
    /// to the whole record for diagnostics.
    #[must_use]
    pub fn with_record(self, record: &[u8]) -> Self {
        match self {
            Self::UnbalancedBraces { .. } => Self::UnbalancedBraces {
                record: record.to_vec(),
            },
            Self::MissingDelimiter { expected, .. } => Self::MissingDelimiter {
                expected,
                record: record.to_vec(),
            },
            Self::InvalidValueStart { .. } => Self::InvalidValueStart {
                record: record.to_vec(),
            },
            Self::IntegerOutOfRange { .. } => Self::IntegerOutOfRange {
                record: record.to_vec(),
            },
            other => other,
        }
    }

    /// The raw bytes of the offending record, when the variant carries them
    #[must_use]
    pub fn record(&self) -> Option<&[u8]> {
        match self {
            Self::UnbalancedBraces { record }
            | Self::MissingDelimiter { record, .. }
            | Self::InvalidValueStart { record }
            | Self::IntegerOutOfRange { record } => Some(record),
            Self::NonAsciiContent { bytes } => Some(bytes),
            Self::Io(_) => None,
        }
    }
}

/// Lossy, truncated rendering of raw record bytes for error messages
fn snippet(bytes: &[u8]) -> String {
    const MAX_LEN: usize = 60;
    let text = String::from_utf8_lossy(bytes);
    if text.chars().count() > MAX_LEN {
        let cut: String = text.chars().take(MAX_LEN).collect();
        format!("{cut}...")
    } else {
        text.into_owned()
    }
}
