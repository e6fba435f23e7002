//! A minimal, byte-oriented BibTeX reader and writer.
//!
//! `bibraw` parses bibliography files into typed records without resolving
//! string macros or interpreting LaTeX markup. Values borrow from the input
//! wherever the source bytes allow it, so parsing a large file costs little
//! more than the delimiter scan itself.
//!
//! # Quick start
//!
//! ```rust
//! use bibraw::{Document, to_string};
//!
//! let input = br#"@book{companion,
//!     author = {Goossens, Michel and Mittelbach, Franck},
//!     title = "The {LaTeX} Companion",
//!     year = 1993,
//! }"#;
//!
//! let doc = Document::parse(input)?;
//! let entry = doc.find_by_citekey(b"companion").unwrap();
//! assert_eq!(entry.get_integer(b"year"), Some(1993));
//! assert_eq!(
//!     entry.get_text(b"author"),
//!     Some(&b"Goossens, Michel and Mittelbach, Franck"[..])
//! );
//!
//! let rendered = to_string(&doc)?;
//! assert!(rendered.starts_with("@book{companion,"));
//! # Ok::<(), bibraw::Error>(())
//! ```
//!
//! # What it does not do
//!
//! String macro references are stored as definitions but never substituted
//! into field values, value concatenation with `#` is not recognized, and
//! bytes between records are discarded rather than preserved. Input is
//! treated as raw bytes; UTF-8 is only required where an API hands out
//! `String`.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
    missing_docs,
    missing_debug_implementations
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]

pub mod error;
pub mod fixtures;
pub mod model;
pub mod normalize;
pub mod parser;

mod document;
mod writer;

pub use document::{Document, DocumentBuilder, DocumentStats};
pub use error::{Error, Result};
pub use model::{Entry, Field, FieldValue, Fields, Preamble, StringMacro};
pub use normalize::{normalize, NormalizeOptions};
pub use writer::{to_file, to_string, to_string_with, Writer, WriterConfig};

/// Parse a document from raw bytes, borrowing from the input where possible
pub fn parse(input: &[u8]) -> Result<Document<'_>> {
    Document::parse(input)
}

/// Read and parse a file, returning a document that owns all its bytes
pub fn parse_file(path: impl AsRef<std::path::Path>) -> Result<Document<'static>> {
    let bytes = std::fs::read(path)?;
    Ok(Document::parse(&bytes)?.into_owned())
}

/// Convenience re-exports for glob imports
pub mod prelude {
    pub use crate::document::{Document, DocumentBuilder};
    pub use crate::error::{Error, Result};
    pub use crate::model::{Entry, Field, FieldValue, Fields, Preamble, StringMacro};
    pub use crate::normalize::{normalize, NormalizeOptions};
    pub use crate::writer::{to_string, to_string_with, Writer, WriterConfig};
    pub use crate::{parse, parse_file};
}
