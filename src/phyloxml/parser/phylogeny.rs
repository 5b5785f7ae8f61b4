use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};

use super::{PhyloXmlError, PhyloXmlParser};
use crate::phyloxml::diagnostics::DiagnosticSink;
use crate::phyloxml::models::{Clade, Phylogeny};
use crate::phyloxml::vocabulary::Tag;
use crate::tree::{EdgeIndex, NodeIndex};

/// One level of the open-element stack while a phylogeny is being built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    /// Phylogeny level, outside any clade
    Phylogeny,
    /// Inside a clade; `edge` is the clade's parent edge (`None` for the root)
    Clade {
        node: NodeIndex,
        edge: Option<EdgeIndex>,
    },
}

impl<R: BufRead, S: DiagnosticSink> PhyloXmlParser<R, S> {
    /// Build one phylogeny; the cursor is just past its start tag
    pub(super) fn parse_phylogeny(&mut self, start: &BytesStart) -> Result<Phylogeny, PhyloXmlError> {
        let mut phylogeny = Phylogeny::new();
        match self.bool_attribute(start, "rooted")? {
            Some(rooted) => phylogeny.rooted = rooted,
            None => self.malformed("<phylogeny> has no valid rooted attribute; assuming false"),
        }
        phylogeny.rerootable = self.bool_attribute(start, "rerootable")?;
        phylogeny.branch_length_unit = self.attribute(start, "branch_length_unit")?;
        phylogeny.phylogeny_type = self.attribute(start, "type")?;

        let mut stack = vec![Frame::Phylogeny];
        let mut buf = Vec::new();
        loop {
            let event = self.reader.read_event_into(&mut buf)?.into_owned();
            buf.clear();

            match event {
                Event::Start(e) => {
                    let top = stack.last().copied().unwrap_or(Frame::Phylogeny);
                    match self.phyloxml_tag(e.name()) {
                        Some(Tag::Clade) => {
                            if let Some(frame) = self.open_clade(&mut phylogeny, top, &e)? {
                                stack.push(frame);
                            }
                        }
                        Some(tag) => match top {
                            Frame::Phylogeny => self.parse_phylogeny_child(&mut phylogeny, tag, &e)?,
                            Frame::Clade { node, edge } => {
                                self.parse_clade_child(&mut phylogeny, node, edge, tag, &e)?
                            }
                        },
                        None => {
                            self.unrecognized(format!(
                                "Unknown element <{}>; skipped",
                                String::from_utf8_lossy(e.name().as_ref())
                            ));
                            self.skip(&e)?;
                        }
                    }
                }
                Event::End(e) => {
                    let tag = self.phyloxml_tag(e.name());
                    match (stack.pop(), tag) {
                        (Some(Frame::Clade { .. }), Some(Tag::Clade)) => {}
                        (Some(Frame::Phylogeny), Some(Tag::Phylogeny)) if stack.is_empty() => {
                            return Ok(phylogeny);
                        }
                        (frame, _) => {
                            let expected = match frame {
                                Some(Frame::Clade { .. }) => "</clade>",
                                _ => "</phylogeny>",
                            };
                            return Err(PhyloXmlError::UnexpectedToken {
                                expected: expected.to_string(),
                                found: format!("</{}>", String::from_utf8_lossy(e.name().as_ref())),
                            });
                        }
                    }
                }
                Event::Eof => {
                    return Err(PhyloXmlError::UnexpectedEof {
                        element: Tag::Phylogeny.as_str().to_string(),
                    })
                }
                _ => {}
            }
        }
    }

    /// Attach a new clade below `parent`; `None` if the clade was skipped
    fn open_clade(
        &mut self,
        phylogeny: &mut Phylogeny,
        parent: Frame,
        start: &BytesStart,
    ) -> Result<Option<Frame>, PhyloXmlError> {
        let branch_length: Option<f64> = self.parsed_attribute(start, "branch_length")?;
        let clade = Clade {
            id_source: self.attribute(start, "id_source")?,
            ..Default::default()
        };

        match parent {
            Frame::Phylogeny => {
                if phylogeny.tree.root().is_some() {
                    self.malformed("<phylogeny> already has a root clade; extra root-level <clade> ignored");
                    self.skip(start)?;
                    return Ok(None);
                }
                if branch_length.is_some() {
                    self.malformed("Root clade has no parent edge; branch_length ignored");
                }
                let node = phylogeny.tree.add_node(clade);
                phylogeny.tree.set_root(node)?;
                Ok(Some(Frame::Clade { node, edge: None }))
            }
            Frame::Clade { node: parent, .. } => {
                let node = phylogeny.tree.add_node(clade);
                let edge = phylogeny.tree.add_edge(parent, node, branch_length)?;
                Ok(Some(Frame::Clade {
                    node,
                    edge: Some(edge),
                }))
            }
        }
    }

    fn parse_phylogeny_child(
        &mut self,
        phylogeny: &mut Phylogeny,
        tag: Tag,
        e: &BytesStart,
    ) -> Result<(), PhyloXmlError> {
        match tag {
            Tag::Name => phylogeny.name = self.read_string(tag)?,
            Tag::Id => phylogeny.id = Some(self.parse_id(tag, e)?),
            Tag::Description => phylogeny.description = self.read_string(tag)?,
            Tag::Date => phylogeny.date = self.read_string(tag)?,
            Tag::Confidence => {
                if let Some(confidence) = self.parse_confidence(e)? {
                    phylogeny.confidences.push(confidence);
                }
            }
            Tag::Property => {
                let property = self.parse_property(e)?;
                phylogeny.properties.push(property);
            }
            Tag::CladeRelation => {
                let relation = self.parse_clade_relation(e)?;
                phylogeny.clade_relations.push(relation);
            }
            Tag::SequenceRelation => {
                let relation = self.parse_sequence_relation(e)?;
                phylogeny.sequence_relations.push(relation);
            }
            _ => self.skip_misplaced(tag, Tag::Phylogeny, e)?,
        }
        Ok(())
    }

    fn parse_clade_child(
        &mut self,
        phylogeny: &mut Phylogeny,
        node: NodeIndex,
        edge: Option<EdgeIndex>,
        tag: Tag,
        e: &BytesStart,
    ) -> Result<(), PhyloXmlError> {
        if tag == Tag::BranchLength {
            let distance = self.read_parsed::<f64>(tag)?;
            match edge.and_then(|edge| phylogeny.tree.edge_mut(edge)) {
                Some(edge) => {
                    if distance.is_some() {
                        edge.distance = distance;
                    }
                }
                None => self.malformed("Root clade has no parent edge; <branch_length> ignored"),
            }
            return Ok(());
        }

        let clade = &mut phylogeny.tree[node];
        match tag {
            Tag::Name => clade.name = self.read_string(tag)?,
            Tag::Confidence => {
                if let Some(confidence) = self.parse_confidence(e)? {
                    clade.confidences.push(confidence);
                }
            }
            Tag::Width => clade.width = self.read_parsed(tag)?,
            Tag::Color => clade.color = Some(self.parse_color()?),
            Tag::NodeId => clade.node_id = Some(self.parse_id(tag, e)?),
            Tag::Taxonomy => clade.taxonomies.push(self.parse_taxonomy(e)?),
            Tag::Sequence => clade.sequences.push(self.parse_sequence(e)?),
            Tag::Events => clade.events = Some(self.parse_events()?),
            Tag::BinaryCharacters => {
                clade.binary_characters = Some(self.parse_binary_characters(e)?)
            }
            Tag::Distribution => clade.distributions.push(self.parse_distribution()?),
            Tag::Date => clade.date = Some(self.parse_date(e)?),
            Tag::Reference => clade.references.push(self.parse_reference(e)?),
            Tag::Property => clade.properties.push(self.parse_property(e)?),
            _ => self.skip_misplaced(tag, Tag::Clade, e)?,
        }
        Ok(())
    }
}
