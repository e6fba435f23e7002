//! Data models for bibliography records
//!
//! Everything is byte-oriented: names, type keywords, citekeys and text
//! values are raw bytes from the source document. Parse products borrow from
//! the input where possible and can be detached with `into_owned`.

use std::borrow::Cow;
use std::fmt;

/// A bibliography entry (`@book{...}`, `@article{...}`, ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<'a> {
    /// Raw type keyword (e.g. `book`); case is preserved
    pub ty: Cow<'a, [u8]>,
    /// Citation key chosen by the source document; uniqueness is not enforced
    pub citekey: Cow<'a, [u8]>,
    /// Fields in order of first appearance
    pub fields: Fields<'a>,
}

impl<'a> Entry<'a> {
    /// Create a new entry with no fields
    #[must_use]
    pub const fn new(ty: &'a [u8], citekey: &'a [u8]) -> Self {
        Self {
            ty: Cow::Borrowed(ty),
            citekey: Cow::Borrowed(citekey),
            fields: Fields::new(),
        }
    }

    /// The raw type keyword
    #[must_use]
    pub fn ty(&self) -> &[u8] {
        &self.ty
    }

    /// The citation key
    #[must_use]
    pub fn citekey(&self) -> &[u8] {
        &self.citekey
    }

    /// Look up a field value by exact name
    #[must_use]
    pub fn get(&self, name: &[u8]) -> Option<&FieldValue<'a>> {
        self.fields.get(name)
    }

    /// Look up a text field's bytes by exact name
    #[must_use]
    pub fn get_text(&self, name: &[u8]) -> Option<&[u8]> {
        self.fields.get(name).and_then(FieldValue::as_text)
    }

    /// Look up an integer field by exact name
    #[must_use]
    pub fn get_integer(&self, name: &[u8]) -> Option<i64> {
        self.fields.get(name).and_then(FieldValue::as_integer)
    }

    /// Convert to a version that owns all its bytes
    #[must_use]
    pub fn into_owned(self) -> Entry<'static> {
        Entry {
            ty: Cow::Owned(self.ty.into_owned()),
            citekey: Cow::Owned(self.citekey.into_owned()),
            fields: self.fields.into_owned(),
        }
    }
}

/// A `@string{...}` macro definition record
///
/// The parser keeps the definition as-is; macro names are never substituted
/// into other records' field values.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StringMacro<'a> {
    /// The macro definitions, typically a single name/value pair
    pub fields: Fields<'a>,
}

impl StringMacro<'_> {
    /// Convert to a version that owns all its bytes
    #[must_use]
    pub fn into_owned(self) -> StringMacro<'static> {
        StringMacro {
            fields: self.fields.into_owned(),
        }
    }
}

/// A `@preamble{...}` record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preamble<'a> {
    /// Verbatim bytes from inside the record's outermost braces, surrounding
    /// whitespace trimmed; quote characters are kept, the value is not
    /// field-decoded
    pub value: Cow<'a, [u8]>,
}

impl Preamble<'_> {
    /// Convert to a version that owns all its bytes
    #[must_use]
    pub fn into_owned(self) -> Preamble<'static> {
        Preamble {
            value: Cow::Owned(self.value.into_owned()),
        }
    }
}

/// A field in an entry or string macro
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field<'a> {
    /// Field name, embedded commas and spaces stripped
    pub name: Cow<'a, [u8]>,
    /// Typed field value
    pub value: FieldValue<'a>,
}

impl Field<'_> {
    /// Convert to a version that owns all its bytes
    #[must_use]
    pub fn into_owned(self) -> Field<'static> {
        Field {
            name: Cow::Owned(self.name.into_owned()),
            value: self.value.into_owned(),
        }
    }
}

/// A typed field value
///
/// The braced/quoted delimiter distinction is discarded at parse time;
/// serialization always re-emits text values brace-delimited. The parser only
/// produces non-negative integers (the grammar has no sign); a negative value
/// built programmatically renders with a sign and will not re-parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// A bare digit run, stored as a native integer
    Integer(i64),
    /// Brace- or quote-delimited text, delimiters stripped
    Text(Cow<'a, [u8]>),
}

impl<'a> FieldValue<'a> {
    /// Text value from a static or borrowed byte slice
    #[must_use]
    pub const fn text(bytes: &'a [u8]) -> Self {
        Self::Text(Cow::Borrowed(bytes))
    }

    /// The text bytes, if this is a text value
    #[must_use]
    pub fn as_text(&self) -> Option<&[u8]> {
        match self {
            Self::Text(bytes) => Some(bytes),
            Self::Integer(_) => None,
        }
    }

    /// The integer, if this is an integer value
    #[must_use]
    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    /// Convert to a version that owns all its bytes
    #[must_use]
    pub fn into_owned(self) -> FieldValue<'static> {
        match self {
            Self::Integer(n) => FieldValue::Integer(n),
            Self::Text(bytes) => FieldValue::Text(Cow::Owned(bytes.into_owned())),
        }
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Text(bytes) => write!(f, "{}", String::from_utf8_lossy(bytes)),
        }
    }
}

/// An insertion-ordered field map
///
/// Re-inserting an existing name overwrites the value but keeps the original
/// position: last value wins, first position kept.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fields<'a>(Vec<Field<'a>>);

impl<'a> Fields<'a> {
    /// Create an empty field map
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Insert a field, overwriting in place when the name already exists
    pub fn insert(&mut self, name: Cow<'a, [u8]>, value: FieldValue<'a>) {
        if let Some(field) = self.0.iter_mut().find(|f| f.name == name) {
            field.value = value;
        } else {
            self.0.push(Field { name, value });
        }
    }

    /// Look up a value by exact name
    #[must_use]
    pub fn get(&self, name: &[u8]) -> Option<&FieldValue<'a>> {
        self.0
            .iter()
            .find(|f| f.name.as_ref() == name)
            .map(|f| &f.value)
    }

    /// Iterate fields in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Field<'a>> {
        self.0.iter()
    }

    /// Number of fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Convert to a version that owns all its bytes
    #[must_use]
    pub fn into_owned(self) -> Fields<'static> {
        Fields(self.0.into_iter().map(Field::into_owned).collect())
    }
}

impl<'a, 'b> IntoIterator for &'b Fields<'a> {
    type Item = &'b Field<'a>;
    type IntoIter = std::slice::Iter<'b, Field<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
