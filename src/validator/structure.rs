use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

use super::{SchemaValidator, SchemaViolation};
use crate::phyloxml::vocabulary::{Tag, PHYLOXML_NAMESPACE};

/// Attributes the PhyloXML schema marks as required
const REQUIRED_ATTRIBUTES: &[(Tag, &str)] = &[
    (Tag::Phylogeny, "rooted"),
    (Tag::Confidence, "type"),
    (Tag::Accession, "source"),
    (Tag::Domain, "from"),
    (Tag::Domain, "to"),
];

/// Structural checks that need no XSD engine
///
/// Verifies that the document is well-formed, that its root is `<phyloxml>`,
/// that `<phylogeny>` only occurs directly below the root, that `<clade>`
/// only occurs below `<phylogeny>` or another `<clade>`, and that the
/// attributes the schema requires are present. Elements outside
/// `<phylogeny>` (forward-compatible extensions) are only checked for
/// well-formedness.
#[derive(Debug, Clone, Default)]
pub struct StructuralValidator {
    require_namespace: bool,
}

impl StructuralValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also require the root element to be in the PhyloXML namespace
    pub fn require_namespace(mut self, require: bool) -> Self {
        self.require_namespace = require;
        self
    }
}

impl SchemaValidator for StructuralValidator {
    fn validate(&self, document: &[u8]) -> Result<(), SchemaViolation> {
        let mut reader = NsReader::from_reader(document);
        reader.config_mut().expand_empty_elements = true;

        // Local names of open elements, outermost first
        let mut open: Vec<Option<Tag>> = Vec::new();
        let mut phylogeny_depth: Option<usize> = None;
        let mut seen_root = false;
        let mut buf = Vec::new();

        loop {
            let position = reader.buffer_position() as u64;
            let violation = |message: String| SchemaViolation::at(message, position);

            let (resolved, event) = reader
                .read_resolved_event_into(&mut buf)
                .map_err(|e| violation(format!("Document is not well-formed: {}", e)))?;

            match event {
                Event::Start(e) => {
                    let tag = Tag::from_name(e.local_name().as_ref());
                    let parent = open.last().copied();

                    if open.is_empty() {
                        if seen_root {
                            return Err(violation("Document has more than one root element".into()));
                        }
                        seen_root = true;
                        if tag != Some(Tag::Phyloxml) {
                            return Err(violation(format!(
                                "Root element is <{}>, expected <phyloxml>",
                                String::from_utf8_lossy(e.name().as_ref())
                            )));
                        }
                        if self.require_namespace
                            && !matches!(resolved, ResolveResult::Bound(Namespace(ns)) if ns == PHYLOXML_NAMESPACE.as_bytes())
                        {
                            return Err(violation(format!(
                                "Root element is not in the {} namespace",
                                PHYLOXML_NAMESPACE
                            )));
                        }
                    } else if tag == Some(Tag::Phylogeny) {
                        if phylogeny_depth.is_some() {
                            return Err(violation("<phylogeny> nested inside <phylogeny>".into()));
                        }
                        if open.len() != 1 {
                            return Err(violation("<phylogeny> must be a child of <phyloxml>".into()));
                        }
                    } else if tag == Some(Tag::Clade)
                        && phylogeny_depth.is_some()
                        && !matches!(parent, Some(Some(Tag::Phylogeny)) | Some(Some(Tag::Clade)))
                    {
                        return Err(violation(
                            "<clade> must be a child of <phylogeny> or <clade>".into(),
                        ));
                    }

                    if tag == Some(Tag::Phylogeny) {
                        phylogeny_depth = Some(open.len());
                    }
                    if phylogeny_depth.is_some() {
                        if let Some(tag) = tag {
                            check_required_attributes(tag, &e).map_err(violation)?;
                        }
                    }
                    open.push(tag);
                }
                Event::End(_) => {
                    open.pop();
                    if phylogeny_depth == Some(open.len()) {
                        phylogeny_depth = None;
                    }
                }
                Event::Text(t) if open.is_empty() => {
                    let text = t
                        .unescape()
                        .map_err(|e| violation(format!("Invalid text: {}", e)))?;
                    if !text.trim().is_empty() {
                        return Err(violation("Text outside the root element".into()));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if !seen_root {
            return Err(SchemaViolation::new("Document has no root element"));
        }
        if !open.is_empty() {
            return Err(SchemaViolation::new(format!(
                "Document ended with {} unclosed element(s)",
                open.len()
            )));
        }
        Ok(())
    }
}

fn check_required_attributes(tag: Tag, e: &BytesStart) -> Result<(), String> {
    for &(_, name) in REQUIRED_ATTRIBUTES.iter().filter(|(t, _)| *t == tag) {
        let present = e
            .attributes()
            .flatten()
            .any(|attr| attr.key.local_name().as_ref() == name.as_bytes());
        if !present {
            return Err(format!("{} is missing required attribute {}", tag, name));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(document: &str) -> Result<(), SchemaViolation> {
        StructuralValidator::new().validate(document.as_bytes())
    }

    #[test]
    fn test_accepts_minimal_document() {
        let document = r#"<?xml version="1.0"?>
<phyloxml xmlns="http://www.phyloxml.org">
  <phylogeny rooted="true"><clade><clade/><clade/></clade></phylogeny>
  <foo:bar xmlns:foo="urn:x"><confidence/></foo:bar>
</phyloxml>"#;
        assert!(check(document).is_ok());
        assert!(StructuralValidator::new()
            .require_namespace(true)
            .validate(document.as_bytes())
            .is_ok());
    }

    #[test]
    fn test_rejects_wrong_root() {
        let err = check("<nexml/>").unwrap_err();
        assert!(err.message.contains("expected <phyloxml>"));
    }

    #[test]
    fn test_rejects_missing_namespace_when_required() {
        let validator = StructuralValidator::new().require_namespace(true);
        assert!(validator.validate(b"<phyloxml/>").is_err());
        assert!(check("<phyloxml/>").is_ok());
    }

    #[test]
    fn test_rejects_misplaced_clade() {
        let document = r#"<phyloxml><phylogeny rooted="true"><clade><taxonomy><clade/></taxonomy></clade></phylogeny></phyloxml>"#;
        assert!(check(document).is_err());
    }

    #[test]
    fn test_rejects_missing_required_attribute() {
        let document = r#"<phyloxml><phylogeny rooted="true"><clade><confidence>9</confidence></clade></phylogeny></phyloxml>"#;
        let err = check(document).unwrap_err();
        assert!(err.message.contains("type"));

        let document = r#"<phyloxml><phylogeny><clade/></phylogeny></phyloxml>"#;
        assert!(check(document).is_err());
    }

    #[test]
    fn test_rejects_malformed_xml() {
        assert!(check("<phyloxml><phylogeny rooted=\"true\"></phyloxml>").is_err());
        assert!(check("<phyloxml><phylogeny rooted=\"true\">").is_err());
        assert!(check("").is_err());
    }
}
