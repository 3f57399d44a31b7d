//! XML reading utilities for table markup

use crate::docx::error::{DocxError, DocxResult};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::trace;

/// XML reader utilities for parsing WordprocessingML fragments
pub struct XmlParser;

impl XmlParser {
    /// Create a new XML reader from a string.
    ///
    /// Text is not trimmed: `w:t` content is significant, and whitespace between
    /// elements is ignored by [`XmlParser::for_each_child`].
    pub fn from_string(content: &str) -> Reader<&[u8]> {
        let mut reader = Reader::from_str(content);
        reader.config_mut().trim_text(false);
        reader
    }

    /// Local name of an element as text (`w:tbl` -> `tbl`)
    pub fn local_name(event: &BytesStart) -> String {
        String::from_utf8_lossy(event.local_name().as_ref()).into_owned()
    }

    /// Check an element's local name, ignoring any namespace prefix
    pub fn is(event: &BytesStart, expected: &str) -> bool {
        event.local_name().as_ref() == expected.as_bytes()
    }

    /// Get an attribute by local name, with or without the `w:` prefix.
    /// Empty values read as absent.
    pub fn get_w_attribute(event: &BytesStart, name: &str) -> DocxResult<Option<String>> {
        for attr in event.attributes() {
            let attr = attr?;
            if attr.key.local_name().as_ref() == name.as_bytes() {
                let value = attr
                    .unescape_value()
                    .map_err(|e| DocxError::XmlParse(e.to_string()))?;
                return Ok((!value.is_empty()).then(|| value.into_owned()));
            }
        }
        Ok(None)
    }

    /// The common `w:val` attribute
    pub fn get_val(event: &BytesStart) -> DocxResult<Option<String>> {
        Self::get_w_attribute(event, "val")
    }

    /// Parse an integer attribute value; non-numeric text is a hard error
    pub fn parse_int(element: &str, attribute: &str, value: &str) -> DocxResult<i64> {
        value.parse::<i64>().map_err(|_| DocxError::InvalidInteger {
            element: element.to_string(),
            attribute: attribute.to_string(),
            value: value.to_string(),
        })
    }

    /// Parse an on/off attribute. Only `1`, `true` and `on` are set.
    pub fn parse_flag(value: &str) -> bool {
        matches!(value, "1" | "true" | "on")
    }

    /// Consume the rest of an element whose start tag was just read
    pub fn finish(reader: &mut Reader<&[u8]>, event: &BytesStart, empty: bool) -> DocxResult<()> {
        if !empty {
            reader.read_to_end(event.name())?;
        }
        Ok(())
    }

    /// Skip an unsupported element and its subtree
    pub fn skip(reader: &mut Reader<&[u8]>, event: &BytesStart, empty: bool) -> DocxResult<()> {
        trace!(element = %Self::local_name(event), "skipping unsupported element");
        Self::finish(reader, event, empty)
    }

    /// Visit every child element of the element whose start tag was just read,
    /// up to and including its end tag.
    ///
    /// The callback receives each child's start tag and whether it was
    /// self-closing; for non-empty children it must consume through the
    /// matching end tag (by recursing or calling [`XmlParser::skip`]).
    pub fn for_each_child<'a, F>(reader: &mut Reader<&'a [u8]>, mut visit: F) -> DocxResult<()>
    where
        F: FnMut(&mut Reader<&'a [u8]>, &BytesStart<'a>, bool) -> DocxResult<()>,
    {
        loop {
            match reader.read_event()? {
                Event::Start(e) => visit(reader, &e, false)?,
                Event::Empty(e) => visit(reader, &e, true)?,
                Event::End(_) => return Ok(()),
                Event::Eof => {
                    return Err(DocxError::XmlParse("unexpected end of input".to_string()))
                }
                _ => {}
            }
        }
    }

    /// Collect the text content of the element whose start tag was just read.
    /// Child elements are skipped.
    pub fn read_text(reader: &mut Reader<&[u8]>) -> DocxResult<String> {
        let mut text = String::new();
        loop {
            match reader.read_event()? {
                Event::Text(t) => {
                    let unescaped = t.unescape().map_err(|e| DocxError::XmlParse(e.to_string()))?;
                    text.push_str(&unescaped);
                }
                Event::CData(t) => text.push_str(&String::from_utf8_lossy(&t)),
                Event::Start(e) => Self::skip(reader, &e, false)?,
                Event::End(_) => return Ok(text),
                Event::Eof => {
                    return Err(DocxError::XmlParse("unexpected end of input".to_string()))
                }
                _ => {}
            }
        }
    }
}
