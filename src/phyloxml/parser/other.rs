use std::io::BufRead;

use quick_xml::encoding::Decoder;
use quick_xml::events::{BytesStart, Event};

use super::{PhyloXmlError, PhyloXmlParser};
use crate::phyloxml::diagnostics::DiagnosticSink;
use crate::phyloxml::models::Other;

/// An element being captured, with text read since its last child
struct OpenElement {
    element: Other,
    pending_text: String,
}

impl OpenElement {
    fn new(start: &BytesStart, decoder: Decoder) -> Result<Self, PhyloXmlError> {
        let mut element = Other::new(std::str::from_utf8(start.name().as_ref())?);
        for attr in start.attributes() {
            let attr = attr.map_err(quick_xml::Error::from)?;
            let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
            let value = attr.decode_and_unescape_value(decoder)?;
            element.attributes.push((key, value.into_owned()));
        }
        Ok(Self {
            element,
            pending_text: String::new(),
        })
    }

    /// Move pending text into the content; whitespace-only runs are dropped
    fn flush_text(&mut self) {
        let text = std::mem::take(&mut self.pending_text);
        if !text.trim().is_empty() {
            self.element.push_text(text);
        }
    }
}

impl<R: BufRead, S: DiagnosticSink> PhyloXmlParser<R, S> {
    /// Capture the element opened by `start` and everything inside it
    pub(super) fn parse_other(&mut self, start: &BytesStart) -> Result<Other, PhyloXmlError> {
        let mut stack = vec![OpenElement::new(start, self.reader.decoder())?];
        let mut buf = Vec::new();
        loop {
            let decoder = self.reader.decoder();
            match self.reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    if let Some(parent) = stack.last_mut() {
                        parent.flush_text();
                    }
                    stack.push(OpenElement::new(&e, decoder)?);
                }
                Event::Text(t) => {
                    let text = t.unescape().map_err(quick_xml::Error::from)?;
                    if let Some(current) = stack.last_mut() {
                        current.pending_text.push_str(&text);
                    }
                }
                Event::CData(t) => {
                    let text = t.decode().map_err(quick_xml::Error::from)?;
                    if let Some(current) = stack.last_mut() {
                        current.pending_text.push_str(&text);
                    }
                }
                Event::End(_) => {
                    if let Some(mut done) = stack.pop() {
                        done.flush_text();
                        match stack.last_mut() {
                            Some(parent) => parent.element.push_element(done.element),
                            None => return Ok(done.element),
                        }
                    }
                }
                Event::Eof => {
                    let element = stack
                        .first()
                        .map(|open| open.element.element_name.clone())
                        .unwrap_or_default();
                    return Err(PhyloXmlError::UnexpectedEof { element });
                }
                _ => {}
            }
            buf.clear();
        }
    }
}
