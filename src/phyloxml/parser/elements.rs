use std::io::BufRead;

use quick_xml::events::BytesStart;

use super::{PhyloXmlError, PhyloXmlParser};
use crate::phyloxml::diagnostics::DiagnosticSink;
use crate::phyloxml::models::{
    BinaryCharacters, BranchColor, CladeRelation, Confidence, Date, Events, Id, Property,
    Reference, SequenceRelation, Taxonomy, Uri,
};
use crate::phyloxml::vocabulary::{
    Tag, EVENT_TYPES, PROPERTY_APPLIES_TO, PROPERTY_DATATYPES, SEQUENCE_RELATION_TYPES,
    TAXONOMY_RANKS,
};

impl<R: BufRead, S: DiagnosticSink> PhyloXmlParser<R, S> {
    /// Parse a `<confidence>`; `None` if its value is not a number
    pub(super) fn parse_confidence(
        &mut self,
        e: &BytesStart,
    ) -> Result<Option<Confidence>, PhyloXmlError> {
        let confidence_type = self.required_attribute(e, Tag::Confidence, "type")?;
        let value = self.read_parsed::<f64>(Tag::Confidence)?;
        Ok(value.map(|value| Confidence {
            confidence_type,
            value,
        }))
    }

    pub(super) fn parse_property(&mut self, e: &BytesStart) -> Result<Property, PhyloXmlError> {
        let property = Property {
            reference: self.required_attribute(e, Tag::Property, "ref")?,
            unit: self.attribute(e, "unit")?,
            datatype: self.required_attribute(e, Tag::Property, "datatype")?,
            applies_to: self.required_attribute(e, Tag::Property, "applies_to")?,
            id_ref: self.attribute(e, "id_ref")?,
            value: self.read_text(Tag::Property)?,
        };
        self.check_allowed(
            "property datatype",
            PROPERTY_DATATYPES,
            property.datatype.as_deref(),
        );
        self.check_allowed(
            "property applies_to",
            PROPERTY_APPLIES_TO,
            property.applies_to.as_deref(),
        );
        Ok(property)
    }

    /// Parse an `<id>` or `<node_id>`
    pub(super) fn parse_id(&mut self, tag: Tag, e: &BytesStart) -> Result<Id, PhyloXmlError> {
        let provider = match self.attribute(e, "provider")? {
            Some(provider) => Some(provider),
            None => self.attribute(e, "type")?,
        };
        Ok(Id {
            provider,
            value: self.read_string(tag)?.unwrap_or_default(),
        })
    }

    pub(super) fn parse_uri(&mut self, e: &BytesStart) -> Result<Uri, PhyloXmlError> {
        Ok(Uri {
            desc: self.attribute(e, "desc")?,
            uri_type: self.attribute(e, "type")?,
            value: self.read_string(Tag::Uri)?.unwrap_or_default(),
        })
    }

    pub(super) fn parse_date(&mut self, e: &BytesStart) -> Result<Date, PhyloXmlError> {
        let mut date = Date {
            unit: self.attribute(e, "unit")?,
            range: self.parsed_attribute(e, "range")?,
            ..Default::default()
        };
        self.read_children(Tag::Date, |parser, tag, _| {
            match tag {
                Tag::Desc => date.desc = parser.read_string(tag)?,
                Tag::Value => date.value = parser.read_parsed(tag)?,
                Tag::Minimum => date.minimum = parser.read_parsed(tag)?,
                Tag::Maximum => date.maximum = parser.read_parsed(tag)?,
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(date)
    }

    pub(super) fn parse_color(&mut self) -> Result<BranchColor, PhyloXmlError> {
        let (mut red, mut green, mut blue) = (None, None, None);
        self.read_children(Tag::Color, |parser, tag, _| {
            match tag {
                Tag::Red => red = parser.read_parsed::<u8>(tag)?,
                Tag::Green => green = parser.read_parsed::<u8>(tag)?,
                Tag::Blue => blue = parser.read_parsed::<u8>(tag)?,
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        if red.is_none() || green.is_none() || blue.is_none() {
            self.malformed("<color> needs <red>, <green> and <blue>; missing channels set to 0");
        }
        Ok(BranchColor::new(
            red.unwrap_or(0),
            green.unwrap_or(0),
            blue.unwrap_or(0),
        ))
    }

    pub(super) fn parse_events(&mut self) -> Result<Events, PhyloXmlError> {
        let mut events = Events::default();
        self.read_children(Tag::Events, |parser, tag, e| {
            match tag {
                Tag::Type => {
                    events.event_type = parser.read_string(tag)?;
                    parser.check_allowed("events type", EVENT_TYPES, events.event_type.as_deref());
                }
                Tag::Duplications => events.duplications = parser.read_parsed(tag)?,
                Tag::Speciations => events.speciations = parser.read_parsed(tag)?,
                Tag::Losses => events.losses = parser.read_parsed(tag)?,
                Tag::Confidence => events.confidence = parser.parse_confidence(e)?,
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(events)
    }

    pub(super) fn parse_binary_characters(
        &mut self,
        e: &BytesStart,
    ) -> Result<BinaryCharacters, PhyloXmlError> {
        let mut characters = BinaryCharacters {
            bc_type: self.required_attribute(e, Tag::BinaryCharacters, "type")?,
            gained_count: self.parsed_attribute(e, "gained_count")?,
            lost_count: self.parsed_attribute(e, "lost_count")?,
            present_count: self.parsed_attribute(e, "present_count")?,
            absent_count: self.parsed_attribute(e, "absent_count")?,
            ..Default::default()
        };
        self.read_children(Tag::BinaryCharacters, |parser, tag, _| {
            let list = match tag {
                Tag::Gained => &mut characters.gained,
                Tag::Lost => &mut characters.lost,
                Tag::Present => &mut characters.present,
                Tag::Absent => &mut characters.absent,
                _ => return Ok(false),
            };
            parser.read_children(tag, |parser, tag, _| {
                if tag != Tag::Bc {
                    return Ok(false);
                }
                if let Some(bc) = parser.read_string(tag)? {
                    list.push(bc);
                }
                Ok(true)
            })?;
            Ok(true)
        })?;
        Ok(characters)
    }

    pub(super) fn parse_reference(&mut self, e: &BytesStart) -> Result<Reference, PhyloXmlError> {
        let mut reference = Reference {
            doi: self.attribute(e, "doi")?,
            desc: None,
        };
        self.read_children(Tag::Reference, |parser, tag, _| {
            if tag != Tag::Desc {
                return Ok(false);
            }
            reference.desc = parser.read_string(tag)?;
            Ok(true)
        })?;
        Ok(reference)
    }

    pub(super) fn parse_clade_relation(
        &mut self,
        e: &BytesStart,
    ) -> Result<CladeRelation, PhyloXmlError> {
        let mut relation = CladeRelation {
            id_ref_0: self.required_attribute(e, Tag::CladeRelation, "id_ref_0")?,
            id_ref_1: self.required_attribute(e, Tag::CladeRelation, "id_ref_1")?,
            distance: self.parsed_attribute(e, "distance")?,
            relation_type: self.required_attribute(e, Tag::CladeRelation, "type")?,
            confidence: None,
        };
        self.read_children(Tag::CladeRelation, |parser, tag, e| {
            if tag != Tag::Confidence {
                return Ok(false);
            }
            relation.confidence = parser.parse_confidence(e)?;
            Ok(true)
        })?;
        Ok(relation)
    }

    pub(super) fn parse_sequence_relation(
        &mut self,
        e: &BytesStart,
    ) -> Result<SequenceRelation, PhyloXmlError> {
        let mut relation = SequenceRelation {
            id_ref_0: self.required_attribute(e, Tag::SequenceRelation, "id_ref_0")?,
            id_ref_1: self.required_attribute(e, Tag::SequenceRelation, "id_ref_1")?,
            distance: self.parsed_attribute(e, "distance")?,
            relation_type: self.required_attribute(e, Tag::SequenceRelation, "type")?,
            confidence: None,
        };
        self.check_allowed(
            "sequence_relation type",
            SEQUENCE_RELATION_TYPES,
            relation.relation_type.as_deref(),
        );
        self.read_children(Tag::SequenceRelation, |parser, tag, e| {
            if tag != Tag::Confidence {
                return Ok(false);
            }
            relation.confidence = parser.parse_confidence(e)?;
            Ok(true)
        })?;
        Ok(relation)
    }

    pub(super) fn parse_taxonomy(&mut self, e: &BytesStart) -> Result<Taxonomy, PhyloXmlError> {
        let mut taxonomy = Taxonomy {
            id_source: self.attribute(e, "id_source")?,
            ..Default::default()
        };
        self.read_children(Tag::Taxonomy, |parser, tag, e| {
            match tag {
                Tag::Id => taxonomy.id = Some(parser.parse_id(tag, e)?),
                Tag::Code => taxonomy.names.code = parser.read_string(tag)?,
                Tag::ScientificName => taxonomy.names.scientific_name = parser.read_string(tag)?,
                Tag::Authority => taxonomy.authority = parser.read_string(tag)?,
                Tag::CommonName => {
                    if let Some(name) = parser.read_string(tag)? {
                        taxonomy.names.common_names.push(name);
                    }
                }
                Tag::Synonym => {
                    if let Some(synonym) = parser.read_string(tag)? {
                        taxonomy.synonyms.push(synonym);
                    }
                }
                Tag::Rank => {
                    taxonomy.names.rank = parser.read_string(tag)?;
                    parser.check_allowed("taxonomy rank", TAXONOMY_RANKS, taxonomy.names.rank.as_deref());
                }
                Tag::Uri => taxonomy.uris.push(parser.parse_uri(e)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(taxonomy)
    }
}
