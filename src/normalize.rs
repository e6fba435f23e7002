//! Normalization pass over parsed documents
//!
//! Parsing keeps raw bytes untouched; this pass produces a new owned
//! [`Document`] with keys lower-cased, strict-ASCII validation applied, and
//! whitespace runs in text values collapsed. Each knob can be switched off
//! individually.

use std::borrow::Cow;

use crate::document::Document;
use crate::error::{Error, Result};
use crate::model::{Entry, FieldValue, Fields, Preamble, StringMacro};

/// Options for [`normalize`]; everything defaults to on
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    /// Lower-case field names
    pub field_keys_lower: bool,
    /// Require field names to be strict ASCII
    pub field_keys_ascii: bool,
    /// Collapse whitespace runs in text values to single spaces and trim
    pub field_values_strip: bool,
    /// Require text values to be strict ASCII
    pub field_values_ascii: bool,
    /// Lower-case entry type keywords
    pub type_lower: bool,
    /// Require type keywords to be strict ASCII
    pub type_ascii: bool,
    /// Lower-case citekeys
    pub citekey_lower: bool,
    /// Require citekeys to be strict ASCII
    pub citekey_ascii: bool,
    /// Require preamble values to be strict ASCII
    pub preamble_values_ascii: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            field_keys_lower: true,
            field_keys_ascii: true,
            field_values_strip: true,
            field_values_ascii: true,
            type_lower: true,
            type_ascii: true,
            citekey_lower: true,
            citekey_ascii: true,
            preamble_values_ascii: true,
        }
    }
}

/// Produce a normalized, owned copy of a document
pub fn normalize(doc: &Document<'_>, options: &NormalizeOptions) -> Result<Document<'static>> {
    let mut out = Document::new();

    for entry in doc.entries() {
        out.add_entry(Entry {
            ty: normalize_name(&entry.ty, options.type_lower, options.type_ascii)?,
            citekey: normalize_name(&entry.citekey, options.citekey_lower, options.citekey_ascii)?,
            fields: normalize_fields(&entry.fields, options)?,
        });
    }

    for string in doc.strings() {
        out.add_string(StringMacro {
            fields: normalize_fields(&string.fields, options)?,
        });
    }

    for preamble in doc.preambles() {
        if options.preamble_values_ascii {
            ensure_ascii(&preamble.value)?;
        }
        out.add_preamble(Preamble {
            value: Cow::Owned(preamble.value.to_vec()),
        });
    }

    Ok(out)
}

fn normalize_fields(fields: &Fields<'_>, options: &NormalizeOptions) -> Result<Fields<'static>> {
    let mut out = Fields::new();
    for field in fields {
        let name = normalize_name(
            &field.name,
            options.field_keys_lower,
            options.field_keys_ascii,
        )?;
        let value = match &field.value {
            FieldValue::Integer(n) => FieldValue::Integer(*n),
            FieldValue::Text(text) => {
                let text = if options.field_values_strip {
                    collapse_whitespace(text)
                } else {
                    text.to_vec()
                };
                if options.field_values_ascii {
                    ensure_ascii(&text)?;
                }
                FieldValue::Text(Cow::Owned(text))
            }
        };
        out.insert(name, value);
    }
    Ok(out)
}

fn normalize_name(name: &[u8], lower: bool, ascii: bool) -> Result<Cow<'static, [u8]>> {
    if ascii {
        ensure_ascii(name)?;
    }
    let out = if lower {
        name.to_ascii_lowercase()
    } else {
        name.to_vec()
    };
    Ok(Cow::Owned(out))
}

/// Join whitespace-separated words with single spaces; leading, trailing,
/// and consecutive whitespace disappears
fn collapse_whitespace(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    for word in bytes
        .split(|b: &u8| b.is_ascii_whitespace())
        .filter(|w| !w.is_empty())
    {
        if !out.is_empty() {
            out.push(b' ');
        }
        out.extend_from_slice(word);
    }
    out
}

fn ensure_ascii(bytes: &[u8]) -> Result<()> {
    if bytes.is_ascii() {
        Ok(())
    } else {
        Err(Error::NonAsciiContent {
            bytes: bytes.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace(b" W"), b"W".to_vec());
        assert_eq!(collapse_whitespace(b"W "), b"W".to_vec());
        assert_eq!(collapse_whitespace(b" W "), b"W".to_vec());
        assert_eq!(collapse_whitespace(b" 1 2 "), b"1 2".to_vec());
        assert_eq!(collapse_whitespace(b"1  2"), b"1 2".to_vec());
        assert_eq!(collapse_whitespace(b" 1\t\t2"), b"1 2".to_vec());
        assert_eq!(collapse_whitespace(b""), Vec::<u8>::new());
    }

    #[test]
    fn test_normalize_lowers_and_collapses() {
        let input = b"@Book{Companion,Author={Goossens,   Michel},Year=1993,}";
        let doc = Document::parse(input).unwrap();
        let normalized = normalize(&doc, &NormalizeOptions::default()).unwrap();

        let entry = &normalized.entries()[0];
        assert_eq!(entry.ty(), b"book");
        assert_eq!(entry.citekey(), b"companion");
        assert_eq!(entry.get_text(b"author"), Some(&b"Goossens, Michel"[..]));
        assert_eq!(entry.get_integer(b"year"), Some(1993));
    }

    #[test]
    fn test_normalize_rejects_non_ascii() {
        let input = "@book{k\u{f6}rper,title={x},}".as_bytes().to_vec();
        let doc = Document::parse(&input).unwrap();
        let result = normalize(&doc, &NormalizeOptions::default());
        assert!(matches!(result, Err(Error::NonAsciiContent { .. })));
    }

    #[test]
    fn test_normalize_options_can_disable() {
        let input = "@book{K,title={ Zur Elektrodynamik bewegter K\u{f6}rper },}"
            .as_bytes()
            .to_vec();
        let doc = Document::parse(&input).unwrap();

        let options = NormalizeOptions {
            field_values_ascii: false,
            field_values_strip: false,
            citekey_lower: false,
            ..NormalizeOptions::default()
        };
        let normalized = normalize(&doc, &options).unwrap();
        let entry = &normalized.entries()[0];
        assert_eq!(entry.citekey(), b"K");
        assert_eq!(
            entry.get_text(b"title"),
            Some(" Zur Elektrodynamik bewegter K\u{f6}rper ".as_bytes())
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let input = b"@Book{A,Title={one   two three},Year=2001,}";
        let doc = Document::parse(input).unwrap();
        let once = normalize(&doc, &NormalizeOptions::default()).unwrap();
        let twice = normalize(&once, &NormalizeOptions::default()).unwrap();
        assert_eq!(once, twice);
    }
}
