use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter};
use serde_json::Serializer;
use thiserror::Error;

use crate::record::KeywordRecord;

const INDENT: &[u8] = b"    ";

/// Errors that can occur while writing keyword JSON.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to serialize keyword records: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write {path}: {source}")]
    Io { path: String, source: io::Error },
}

/// How string contents are encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// Escape everything outside printable ASCII as `\uXXXX`.
    #[default]
    Ascii,
    /// Write non-ASCII characters as raw UTF-8.
    Utf8,
}

/// Serialize records as a JSON array indented with four spaces.
pub fn render_json(
    records: &[KeywordRecord],
    encoding: Encoding,
) -> Result<Vec<u8>, OutputError> {
    let mut out = Vec::new();
    let pretty = PrettyFormatter::with_indent(INDENT);
    match encoding {
        Encoding::Ascii => {
            let formatter = AsciiFormatter { inner: pretty };
            let mut ser = Serializer::with_formatter(&mut out, formatter);
            records.serialize(&mut ser)?;
        }
        Encoding::Utf8 => {
            let mut ser = Serializer::with_formatter(&mut out, pretty);
            records.serialize(&mut ser)?;
        }
    }
    Ok(out)
}

/// Serialize records and write them to `path`, replacing any existing file.
pub fn write_json(
    records: &[KeywordRecord],
    path: &Path,
    encoding: Encoding,
) -> Result<(), OutputError> {
    let bytes = render_json(records, encoding)?;
    fs::write(path, bytes).map_err(|source| OutputError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Pretty printing with non-ASCII string contents escaped.
struct AsciiFormatter<'a> {
    inner: PrettyFormatter<'a>,
}

impl Formatter for AsciiFormatter<'_> {
    fn begin_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_array(writer)
    }

    fn end_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object(writer)
    }

    fn end_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.inner.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object_value(writer)
    }

    fn write_string_fragment<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut start = 0;
        for (idx, ch) in fragment.char_indices() {
            if matches!(ch, ' '..='~') {
                continue;
            }
            writer.write_all(fragment[start..idx].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{unit:04x}")?;
            }
            start = idx + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{render_json, Encoding};
    use crate::record::KeywordRecord;

    fn record(long: Option<&str>) -> KeywordRecord {
        KeywordRecord {
            keyword: "PORO".to_string(),
            section: "GRID".to_string(),
            short_description: "Grid block porosities".to_string(),
            long_description: long.map(str::to_string),
        }
    }

    fn render(records: &[KeywordRecord], encoding: Encoding) -> String {
        String::from_utf8(render_json(records, encoding).expect("render")).expect("utf8")
    }

    #[test]
    fn indents_with_four_spaces_in_field_order() {
        let json = render(&[record(Some("Porosity."))], Encoding::Ascii);
        assert_eq!(
            json,
            "[\n    {\n        \"keyword\": \"PORO\",\n        \"section\": \"GRID\",\n        \"short_description\": \"Grid block porosities\",\n        \"long_description\": \"Porosity.\"\n    }\n]"
        );
    }

    #[test]
    fn empty_list_renders_as_brackets() {
        assert_eq!(render(&[], Encoding::Ascii), "[]");
    }

    #[test]
    fn escapes_non_ascii_by_default() {
        let json = render(&[record(Some("m³ – 😀\u{7f}"))], Encoding::Ascii);
        assert!(json.contains(r#""long_description": "m\u00b3 \u2013 \ud83d\ude00\u007f""#));
        assert!(json.is_ascii());
    }

    #[test]
    fn utf8_mode_keeps_characters() {
        let json = render(&[record(Some("m³ \"q\"\n"))], Encoding::Utf8);
        assert!(json.contains(r#""long_description": "m³ \"q\"\n""#));
    }

    #[test]
    fn ascii_mode_keeps_standard_escapes() {
        let json = render(&[record(Some("a\tb\"c\\"))], Encoding::Ascii);
        assert!(json.contains(r#""long_description": "a\tb\"c\\""#));
    }
}
