//! Serializer for rendering documents back to text

use std::io::{self, Write};

use crate::document::Document;
use crate::error::{Error, Result};
use crate::model::{Entry, FieldValue, Fields, Preamble, StringMacro};

/// Configuration for rendering
///
/// Formatting policy only: parsing the rendered output yields the same typed
/// values whatever `indent` and `width` are chosen, up to the whitespace that
/// wrapping introduces inside long text values.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Spaces prefixed to each field line and the closing brace line
    pub indent: usize,
    /// Column threshold at which text values wrap onto their own block
    pub width: usize,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            indent: 4,
            width: 79,
        }
    }
}

/// Document writer
#[derive(Debug)]
pub struct Writer<W: Write> {
    writer: W,
    config: WriterConfig,
}

impl<W: Write> Writer<W> {
    /// Create a new writer with default configuration
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            config: WriterConfig::default(),
        }
    }

    /// Create a new writer with custom configuration
    pub const fn with_config(writer: W, config: WriterConfig) -> Self {
        Self { writer, config }
    }

    /// Write a complete document: preambles first, then string macros, then
    /// entries, each followed by a blank line, in stored order
    pub fn write_document(&mut self, doc: &Document) -> io::Result<()> {
        for preamble in doc.preambles() {
            self.write_preamble(preamble)?;
            self.writer.write_all(b"\n")?;
        }
        for string in doc.strings() {
            self.write_string(string)?;
            self.writer.write_all(b"\n")?;
        }
        for entry in doc.entries() {
            self.write_entry(entry)?;
            self.writer.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Write a single entry
    pub fn write_entry(&mut self, entry: &Entry) -> io::Result<()> {
        self.writer.write_all(b"@")?;
        self.writer.write_all(&entry.ty)?;
        self.writer.write_all(b"{")?;
        self.writer.write_all(&entry.citekey)?;
        self.writer.write_all(b",\n")?;
        self.write_fields(&entry.fields)?;
        self.writer.write_all(b"}\n")
    }

    /// Write a string macro definition
    pub fn write_string(&mut self, string: &StringMacro) -> io::Result<()> {
        self.writer.write_all(b"@string{\n")?;
        self.write_fields(&string.fields)?;
        self.writer.write_all(b"}\n")
    }

    /// Write a preamble; its value goes out verbatim
    pub fn write_preamble(&mut self, preamble: &Preamble) -> io::Result<()> {
        self.writer.write_all(b"@preamble{")?;
        self.writer.write_all(&preamble.value)?;
        self.writer.write_all(b"}\n")
    }

    /// Write a field block, one `name = value,` line per field.
    ///
    /// Integers render as bare digits and never wrap. Text renders
    /// brace-delimited; when the one-line form would reach `width` columns,
    /// the value wraps onto its own block: lines word-wrapped to
    /// `width - 2*indent` columns and indented by `2*indent` spaces, with the
    /// closing brace on its own line indented by `indent`.
    fn write_fields(&mut self, fields: &Fields) -> io::Result<()> {
        let indent = self.config.indent;
        for field in fields {
            write!(self.writer, "{:indent$}", "")?;
            self.writer.write_all(&field.name)?;
            self.writer.write_all(b" = ")?;
            match &field.value {
                FieldValue::Integer(n) => write!(self.writer, "{n},")?,
                FieldValue::Text(text) => {
                    // "<indent><name> = {<text>},"
                    let one_line = indent + field.name.len() + 3 + text.len() + 3;
                    if one_line >= self.config.width {
                        self.write_wrapped(text)?;
                    } else {
                        self.writer.write_all(b"{")?;
                        self.writer.write_all(text)?;
                        self.writer.write_all(b"},")?;
                    }
                }
            }
            self.writer.write_all(b"\n")?;
        }
        Ok(())
    }

    fn write_wrapped(&mut self, text: &[u8]) -> io::Result<()> {
        let indent = self.config.indent;
        let columns = self.config.width.saturating_sub(2 * indent).max(1);
        let hanging = 2 * indent;

        self.writer.write_all(b"{\n")?;
        write!(self.writer, "{:hanging$}", "")?;
        for (i, line) in wrap_words(text, columns).iter().enumerate() {
            if i > 0 {
                self.writer.write_all(b"\n")?;
                write!(self.writer, "{:hanging$}", "")?;
            }
            self.writer.write_all(line)?;
        }
        self.writer.write_all(b"\n")?;
        write!(self.writer, "{:indent$}", "")?;
        self.writer.write_all(b"},")
    }
}

/// Greedy word wrap over ASCII whitespace; words longer than `columns` are
/// hard-split
fn wrap_words(text: &[u8], columns: usize) -> Vec<Vec<u8>> {
    let mut lines: Vec<Vec<u8>> = Vec::new();
    let mut current: Vec<u8> = Vec::new();

    for word in text
        .split(|b: &u8| b.is_ascii_whitespace())
        .filter(|w| !w.is_empty())
    {
        let mut word = word;
        loop {
            let needed = if current.is_empty() {
                word.len()
            } else {
                current.len() + 1 + word.len()
            };
            if needed <= columns {
                if !current.is_empty() {
                    current.push(b' ');
                }
                current.extend_from_slice(word);
                break;
            }
            if current.is_empty() {
                let (head, tail) = word.split_at(columns);
                lines.push(head.to_vec());
                word = tail;
            } else {
                lines.push(std::mem::take(&mut current));
            }
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Render a document to a string with the default configuration
pub fn to_string(doc: &Document) -> Result<String> {
    to_string_with(doc, &WriterConfig::default())
}

/// Render a document to a string with a custom configuration
pub fn to_string_with(doc: &Document, config: &WriterConfig) -> Result<String> {
    let mut buf = Vec::new();
    let mut writer = Writer::with_config(&mut buf, config.clone());
    writer.write_document(doc)?;
    String::from_utf8(buf).map_err(|e| Error::NonAsciiContent {
        bytes: e.into_bytes(),
    })
}

/// Render a document to a file
pub fn to_file(doc: &Document, path: impl AsRef<std::path::Path>) -> Result<()> {
    let file = std::fs::File::create(path)?;
    let mut writer = Writer::new(file);
    writer.write_document(doc)?;
    Ok(())
}
