use std::io::BufRead;
use std::str::FromStr;

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, QName, ResolveResult};

use super::{PhyloXmlError, PhyloXmlParser};
use crate::phyloxml::diagnostics::DiagnosticSink;
use crate::phyloxml::vocabulary::{is_allowed, Tag, PHYLOXML_NAMESPACE};

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

impl<R: BufRead, S: DiagnosticSink> PhyloXmlParser<R, S> {
    /// Get the decoded, unescaped value of an unprefixed attribute
    pub(super) fn attribute(&self, e: &BytesStart, name: &str) -> Result<Option<String>, PhyloXmlError> {
        for attr in e.attributes() {
            let attr = attr.map_err(quick_xml::Error::from)?;
            if attr.key.as_ref() == name.as_bytes() {
                let value = attr.decode_and_unescape_value(self.reader.decoder())?;
                return Ok(Some(value.into_owned()));
            }
        }
        Ok(None)
    }

    /// Map an element name to the PhyloXML vocabulary
    ///
    /// Only names in the PhyloXML namespace, or in no namespace at all, are
    /// PhyloXML elements; a `<clade>` from any other namespace is foreign.
    pub(super) fn phyloxml_tag(&self, name: QName) -> Option<Tag> {
        match self.reader.resolve_element(name) {
            (ResolveResult::Bound(Namespace(ns)), local) if ns == PHYLOXML_NAMESPACE.as_bytes() => {
                Tag::from_name(local.as_ref())
            }
            (ResolveResult::Unbound, local) => Tag::from_name(local.as_ref()),
            _ => None,
        }
    }

    /// Read the text content of the element `tag` up to its end tag
    ///
    /// Text is returned verbatim. Nested elements are reported and skipped.
    pub(super) fn read_text(&mut self, tag: Tag) -> Result<String, PhyloXmlError> {
        let mut text = String::new();
        let mut buf = Vec::new();
        loop {
            match self.reader.read_event_into(&mut buf)? {
                Event::Text(t) => {
                    text.push_str(&t.unescape().map_err(quick_xml::Error::from)?);
                }
                Event::CData(t) => text.push_str(std::str::from_utf8(&t)?),
                Event::Start(e) => {
                    let e = e.into_owned();
                    self.unrecognized(format!(
                        "Unexpected <{}> inside {}; skipped",
                        String::from_utf8_lossy(e.name().as_ref()),
                        tag
                    ));
                    self.skip(&e)?;
                }
                Event::End(_) => return Ok(text),
                Event::Eof => {
                    return Err(PhyloXmlError::UnexpectedEof {
                        element: tag.as_str().to_string(),
                    })
                }
                _ => {}
            }
            buf.clear();
        }
    }

    /// Read trimmed text content; `None` if the element is empty
    pub(super) fn read_string(&mut self, tag: Tag) -> Result<Option<String>, PhyloXmlError> {
        let text = self.read_text(tag)?;
        let trimmed = text.trim();
        if trimmed.is_empty() {
            Ok(None)
        } else {
            Ok(Some(trimmed.to_string()))
        }
    }

    /// Read and parse text content, warning (and returning `None`) if it does
    /// not parse
    pub(super) fn read_parsed<T: FromStr>(&mut self, tag: Tag) -> Result<Option<T>, PhyloXmlError> {
        let text = self.read_text(tag)?;
        match text.trim().parse() {
            Ok(value) => Ok(Some(value)),
            Err(_) => {
                self.malformed(format!("Invalid value {:?} in {}", text, tag));
                Ok(None)
            }
        }
    }

    /// Parse an optional attribute, warning if it is present but invalid
    pub(super) fn parsed_attribute<T: FromStr>(
        &mut self,
        e: &BytesStart,
        name: &str,
    ) -> Result<Option<T>, PhyloXmlError> {
        let Some(raw) = self.attribute(e, name)? else {
            return Ok(None);
        };
        match raw.trim().parse() {
            Ok(value) => Ok(Some(value)),
            Err(_) => {
                self.malformed(format!(
                    "Invalid value {:?} for attribute {} of <{}>",
                    raw,
                    name,
                    String::from_utf8_lossy(e.local_name().as_ref())
                ));
                Ok(None)
            }
        }
    }

    /// Parse an optional xsd:boolean attribute
    pub(super) fn bool_attribute(
        &mut self,
        e: &BytesStart,
        name: &str,
    ) -> Result<Option<bool>, PhyloXmlError> {
        let Some(raw) = self.attribute(e, name)? else {
            return Ok(None);
        };
        let value = parse_bool(&raw);
        if value.is_none() {
            self.malformed(format!("Invalid boolean {:?} for attribute {}", raw, name));
        }
        Ok(value)
    }

    /// Get an attribute the schema requires, warning if it is missing
    pub(super) fn required_attribute(
        &mut self,
        e: &BytesStart,
        tag: Tag,
        name: &str,
    ) -> Result<Option<String>, PhyloXmlError> {
        let value = self.attribute(e, name)?;
        if value.is_none() {
            self.malformed(format!("{} is missing required attribute {}", tag, name));
        }
        Ok(value)
    }

    /// Warn if `value` is set and outside `allowed`; the value is kept
    pub(super) fn check_allowed(
        &mut self,
        what: &str,
        allowed: &[&str],
        value: Option<&str>,
    ) {
        if let Some(value) = value {
            if !is_allowed(allowed, value) {
                self.malformed(format!("{:?} is not an allowed value for {}", value, what));
            }
        }
    }

    /// Skip the element opened by `start`, including all of its content
    pub(super) fn skip(&mut self, start: &BytesStart) -> Result<(), PhyloXmlError> {
        let mut buf = Vec::new();
        self.reader.read_to_end_into(start.name(), &mut buf)?;
        Ok(())
    }

    /// Report an element found where it is not allowed, then skip it
    pub(super) fn skip_misplaced(
        &mut self,
        tag: Tag,
        parent: Tag,
        e: &BytesStart,
    ) -> Result<(), PhyloXmlError> {
        self.unrecognized(format!("{} is not allowed inside {}; skipped", tag, parent));
        self.skip(e)
    }

    /// Walk the child elements of `parent` until its end tag
    ///
    /// `on_child` is called with the cursor on each child's start tag and must
    /// consume the child completely. Returning `false` marks the child as
    /// unexpected; it is then reported and skipped. Children outside the
    /// PhyloXML vocabulary are always reported and skipped.
    pub(super) fn read_children<F>(&mut self, parent: Tag, mut on_child: F) -> Result<(), PhyloXmlError>
    where
        F: FnMut(&mut Self, Tag, &BytesStart<'static>) -> Result<bool, PhyloXmlError>,
    {
        let mut buf = Vec::new();
        loop {
            let event = self.reader.read_event_into(&mut buf)?.into_owned();
            buf.clear();

            match event {
                Event::Start(e) => match self.phyloxml_tag(e.name()) {
                    Some(tag) => {
                        if !on_child(self, tag, &e)? {
                            self.skip_misplaced(tag, parent, &e)?;
                        }
                    }
                    None => {
                        self.unrecognized(format!(
                            "Unknown element <{}> inside {}; skipped",
                            String::from_utf8_lossy(e.name().as_ref()),
                            parent
                        ));
                        self.skip(&e)?;
                    }
                },
                Event::End(_) => return Ok(()),
                Event::Eof => {
                    return Err(PhyloXmlError::UnexpectedEof {
                        element: parent.as_str().to_string(),
                    })
                }
                _ => {}
            }
        }
    }
}
