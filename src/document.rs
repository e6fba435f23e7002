//! Parsed document representation

use ahash::AHashMap;

use crate::error::Result;
use crate::model::{Entry, Preamble, StringMacro};
use crate::parser::Record;

/// A parsed bibliography document
///
/// Three insertion-ordered sequences with no shared state. Documents are
/// immutable value objects produced in one pass; transformations such as
/// [`crate::normalize`] produce new `Document` values.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document<'a> {
    /// Bibliography entries
    entries: Vec<Entry<'a>>,
    /// String macro definitions, unresolved
    strings: Vec<StringMacro<'a>>,
    /// Preambles
    preambles: Vec<Preamble<'a>>,
}

impl<'a> Document<'a> {
    /// Create a new empty document
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a document from raw bytes
    pub fn parse(input: &'a [u8]) -> Result<Self> {
        crate::parser::parse_document(input)
    }

    /// All entries, in document order
    #[must_use]
    pub fn entries(&self) -> &[Entry<'a>] {
        &self.entries
    }

    /// All string macros, in document order
    #[must_use]
    pub fn strings(&self) -> &[StringMacro<'a>] {
        &self.strings
    }

    /// All preambles, in document order
    #[must_use]
    pub fn preambles(&self) -> &[Preamble<'a>] {
        &self.preambles
    }

    /// Find the first entry with the given citekey
    #[must_use]
    pub fn find_by_citekey(&self, citekey: &[u8]) -> Option<&Entry<'a>> {
        self.entries.iter().find(|e| e.citekey.as_ref() == citekey)
    }

    /// Find all entries of the given type (case-insensitive)
    #[must_use]
    pub fn find_by_type(&self, ty: &[u8]) -> Vec<&Entry<'a>> {
        self.entries
            .iter()
            .filter(|e| e.ty.eq_ignore_ascii_case(ty))
            .collect()
    }

    /// Add an entry
    pub fn add_entry(&mut self, entry: Entry<'a>) {
        self.entries.push(entry);
    }

    /// Add a string macro
    pub fn add_string(&mut self, string: StringMacro<'a>) {
        self.strings.push(string);
    }

    /// Add a preamble
    pub fn add_preamble(&mut self, preamble: Preamble<'a>) {
        self.preambles.push(preamble);
    }

    pub(crate) fn push(&mut self, record: Record<'a>) {
        match record {
            Record::Entry(entry) => self.entries.push(entry),
            Record::String(string) => self.strings.push(string),
            Record::Preamble(preamble) => self.preambles.push(preamble),
        }
    }

    /// Statistics about the document
    #[must_use]
    pub fn stats(&self) -> DocumentStats {
        let mut entries_by_type = AHashMap::new();
        for entry in &self.entries {
            let ty = String::from_utf8_lossy(&entry.ty).to_ascii_lowercase();
            *entries_by_type.entry(ty).or_insert(0) += 1;
        }
        DocumentStats {
            total_entries: self.entries.len(),
            total_strings: self.strings.len(),
            total_preambles: self.preambles.len(),
            entries_by_type,
        }
    }

    /// Convert to a version that owns all its bytes
    #[must_use]
    pub fn into_owned(self) -> Document<'static> {
        Document {
            entries: self.entries.into_iter().map(Entry::into_owned).collect(),
            strings: self
                .strings
                .into_iter()
                .map(StringMacro::into_owned)
                .collect(),
            preambles: self
                .preambles
                .into_iter()
                .map(Preamble::into_owned)
                .collect(),
        }
    }
}

/// Statistics about a document
#[derive(Debug, Clone)]
pub struct DocumentStats {
    /// Total number of entries
    pub total_entries: usize,
    /// Total number of string macros
    pub total_strings: usize,
    /// Total number of preambles
    pub total_preambles: usize,
    /// Entry counts by lower-cased type keyword
    pub entries_by_type: AHashMap<String, usize>,
}

/// Builder for creating documents programmatically
#[derive(Debug, Default)]
pub struct DocumentBuilder<'a> {
    doc: Document<'a>,
}

impl<'a> DocumentBuilder<'a> {
    /// Create a new builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry
    #[must_use]
    pub fn entry(mut self, entry: Entry<'a>) -> Self {
        self.doc.entries.push(entry);
        self
    }

    /// Add a string macro
    #[must_use]
    pub fn string(mut self, string: StringMacro<'a>) -> Self {
        self.doc.strings.push(string);
        self
    }

    /// Add a preamble
    #[must_use]
    pub fn preamble(mut self, preamble: Preamble<'a>) -> Self {
        self.doc.preambles.push(preamble);
        self
    }

    /// Build the document
    #[must_use]
    pub fn build(self) -> Document<'a> {
        self.doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldValue, Fields};
    use std::borrow::Cow;

    #[test]
    fn test_parse_and_query() {
        let input = b"@string{AW = {Addison-Wesley}}\n@book{companion,year=1993,}\n@BOOK{other,year=2001,}\n";
        let doc = Document::parse(input).unwrap();

        assert_eq!(doc.entries().len(), 2);
        assert_eq!(doc.strings().len(), 1);
        assert!(doc.find_by_citekey(b"companion").is_some());
        assert!(doc.find_by_citekey(b"missing").is_none());
        assert_eq!(doc.find_by_type(b"book").len(), 2);
    }

    #[test]
    fn test_stats() {
        let input = b"@preamble{\"x\"}@book{a,y=1,}@book{b,y=2,}@misc{c,y=3,}";
        let doc = Document::parse(input).unwrap();
        let stats = doc.stats();

        assert_eq!(stats.total_entries, 3);
        assert_eq!(stats.total_preambles, 1);
        assert_eq!(stats.total_strings, 0);
        assert_eq!(stats.entries_by_type.get("book"), Some(&2));
        assert_eq!(stats.entries_by_type.get("misc"), Some(&1));
    }

    #[test]
    fn test_builder() {
        let mut fields = Fields::new();
        fields.insert(Cow::Borrowed(&b"year"[..]), FieldValue::Integer(1993));

        let doc = DocumentBuilder::new()
            .entry(Entry {
                ty: Cow::Borrowed(&b"book"[..]),
                citekey: Cow::Borrowed(&b"companion"[..]),
                fields,
            })
            .preamble(Preamble {
                value: Cow::Borrowed(&b"\"\\makeatletter\""[..]),
            })
            .build();

        assert_eq!(doc.entries().len(), 1);
        assert_eq!(doc.preambles().len(), 1);
    }

    #[test]
    fn test_into_owned_detaches_from_input() {
        let owned = {
            let input = b"@book{a,title={T},}".to_vec();
            Document::parse(&input).unwrap().into_owned()
        };
        assert_eq!(owned.entries()[0].get_text(b"title"), Some(&b"T"[..]));
    }
}
