//! Element-level event stream the decoder walks.
//!
//! The grammar in [`super::decoder`] only sees element-open (with attributes),
//! text and element-close events. [`XmlEventReader`] produces them from raw XML
//! with quick-xml; anything else that can yield [`XmlEvent`]s works too.

use crate::error::DecodeError;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::fmt::Display;
use std::io::BufRead;

#[derive(Debug, Clone, PartialEq)]
pub enum XmlEvent {
    Open {
        name: String,
        attributes: Vec<(String, String)>,
    },
    Text(String),
    Close {
        name: String,
    },
}

impl XmlEvent {
    pub fn open(name: &str) -> Self {
        XmlEvent::Open {
            name: name.to_string(),
            attributes: Vec::new(),
        }
    }

    pub fn close(name: &str) -> Self {
        XmlEvent::Close {
            name: name.to_string(),
        }
    }

    pub fn text(text: &str) -> Self {
        XmlEvent::Text(text.to_string())
    }

    /// Text made of XML whitespace only, such as indentation between elements.
    pub fn is_blank_text(&self) -> bool {
        matches!(self, XmlEvent::Text(text) if text.chars().all(|c| matches!(c, ' ' | '\t' | '\r' | '\n')))
    }
}

/// A source of element events. `Ok(None)` marks the end of input.
pub trait EventSource {
    fn next_event(&mut self) -> Result<Option<XmlEvent>, DecodeError>;
}

impl EventSource for std::vec::IntoIter<XmlEvent> {
    fn next_event(&mut self) -> Result<Option<XmlEvent>, DecodeError> {
        Ok(self.next())
    }
}

/// Adapts a quick-xml reader to [`EventSource`].
///
/// - `<a/>` is reported as an open followed by a close.
/// - Names are local names (namespace prefixes dropped).
/// - Text and attribute values are unescaped and passed through untrimmed,
///   whitespace-only text included. The grammar decides where it matters.
/// - Comments, processing instructions, the declaration and doctype are skipped.
pub struct XmlEventReader<R> {
    reader: Reader<R>,
    buf: Vec<u8>,
    pending_close: Option<String>,
}

impl<R: BufRead> XmlEventReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            reader: Reader::from_reader(source),
            buf: Vec::new(),
            pending_close: None,
        }
    }
}

impl<R: BufRead> EventSource for XmlEventReader<R> {
    fn next_event(&mut self) -> Result<Option<XmlEvent>, DecodeError> {
        if let Some(name) = self.pending_close.take() {
            return Ok(Some(XmlEvent::Close { name }));
        }

        loop {
            self.buf.clear();
            let event = self.reader.read_event_into(&mut self.buf).map_err(syntax)?;
            match event {
                Event::Start(e) => {
                    return Ok(Some(XmlEvent::Open {
                        name: element_name(&e)?,
                        attributes: attributes(&e)?,
                    }));
                }
                Event::Empty(e) => {
                    let name = element_name(&e)?;
                    let attributes = attributes(&e)?;
                    self.pending_close = Some(name.clone());
                    return Ok(Some(XmlEvent::Open { name, attributes }));
                }
                Event::End(e) => {
                    return Ok(Some(XmlEvent::Close {
                        name: utf8(e.local_name().as_ref())?,
                    }));
                }
                Event::Text(e) => {
                    let text = e.unescape().map_err(syntax)?;
                    if text.is_empty() {
                        continue;
                    }
                    return Ok(Some(XmlEvent::Text(text.into_owned())));
                }
                Event::CData(e) => {
                    let text = utf8(&e.into_inner())?;
                    if text.is_empty() {
                        continue;
                    }
                    return Ok(Some(XmlEvent::Text(text)));
                }
                Event::Eof => return Ok(None),
                Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => continue,
            }
        }
    }
}

fn element_name(e: &BytesStart<'_>) -> Result<String, DecodeError> {
    utf8(e.local_name().as_ref())
}

fn attributes(e: &BytesStart<'_>) -> Result<Vec<(String, String)>, DecodeError> {
    e.attributes()
        .map(|attr| {
            let attr = attr.map_err(syntax)?;
            let key = utf8(attr.key.local_name().as_ref())?;
            let value = attr.unescape_value().map_err(syntax)?.into_owned();
            Ok((key, value))
        })
        .collect()
}

fn utf8(bytes: &[u8]) -> Result<String, DecodeError> {
    std::str::from_utf8(bytes).map(str::to_string).map_err(syntax)
}

fn syntax(err: impl Display) -> DecodeError {
    DecodeError::Syntax(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(xml: &str) -> Result<Vec<XmlEvent>, DecodeError> {
        let mut reader = XmlEventReader::new(xml.as_bytes());
        let mut events = Vec::new();
        while let Some(event) = reader.next_event()? {
            events.push(event);
        }
        Ok(events)
    }

    #[test]
    fn test_reader_produces_element_events() {
        let events = collect(
            "<?xml version=\"1.0\"?><!-- saved --><a x=\"1 &amp; 2\">\n  <b/> v &lt;w&gt; <![CDATA[<raw>]]></a>",
        )
        .unwrap();

        assert_eq!(
            events,
            vec![
                XmlEvent::Open {
                    name: "a".into(),
                    attributes: vec![("x".into(), "1 & 2".into())],
                },
                XmlEvent::text("\n  "),
                XmlEvent::open("b"),
                XmlEvent::close("b"),
                XmlEvent::text(" v <w> "),
                XmlEvent::text("<raw>"),
                XmlEvent::close("a"),
            ]
        );
    }

    #[test]
    fn test_reader_keeps_whitespace_only_text() {
        let events = collect("<a> </a>").unwrap();
        assert_eq!(
            events,
            vec![XmlEvent::open("a"), XmlEvent::text(" "), XmlEvent::close("a")]
        );
        assert!(events[1].is_blank_text());
        assert!(!XmlEvent::text(" x ").is_blank_text());
    }

    #[test]
    fn test_reader_reports_mismatched_end_tag() {
        assert!(matches!(collect("<a><b></a>"), Err(DecodeError::Syntax(_))));
    }

    #[test]
    fn test_reader_uses_local_names() {
        let events = collect("<ns:a ns:k=\"v\"></ns:a>").unwrap();
        assert_eq!(
            events,
            vec![
                XmlEvent::Open {
                    name: "a".into(),
                    attributes: vec![("k".into(), "v".into())],
                },
                XmlEvent::close("a"),
            ]
        );
    }
}
