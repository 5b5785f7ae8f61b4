use std::io::BufRead;

use quick_xml::events::BytesStart;

use super::{PhyloXmlError, PhyloXmlParser};
use crate::phyloxml::diagnostics::DiagnosticSink;
use crate::phyloxml::models::{
    Accession, Annotation, DomainArchitecture, ProteinDomain, Sequence,
};
use crate::phyloxml::vocabulary::{Tag, SEQUENCE_TYPES};

impl<R: BufRead, S: DiagnosticSink> PhyloXmlParser<R, S> {
    pub(super) fn parse_sequence(&mut self, e: &BytesStart) -> Result<Sequence, PhyloXmlError> {
        let mut sequence = Sequence {
            seq_type: self.attribute(e, "type")?,
            id_source: self.attribute(e, "id_source")?,
            id_ref: self.attribute(e, "id_ref")?,
            ..Default::default()
        };
        self.check_allowed("sequence type", SEQUENCE_TYPES, sequence.seq_type.as_deref());

        self.read_children(Tag::Sequence, |parser, tag, e| {
            match tag {
                Tag::Symbol => sequence.symbol = parser.read_string(tag)?,
                Tag::Accession => sequence.accession = Some(parser.parse_accession(e)?),
                Tag::Name => sequence.name = parser.read_string(tag)?,
                Tag::Location => sequence.location = parser.read_string(tag)?,
                Tag::MolSeq => {
                    sequence.mol_seq_is_aligned = parser.bool_attribute(e, "is_aligned")?;
                    sequence.mol_seq = parser.read_string(tag)?;
                }
                Tag::Uri => sequence.uris.push(parser.parse_uri(e)?),
                Tag::Annotation => sequence.annotations.push(parser.parse_annotation(e)?),
                Tag::DomainArchitecture => {
                    sequence.domain_architecture = Some(parser.parse_domain_architecture(e)?)
                }
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(sequence)
    }

    fn parse_accession(&mut self, e: &BytesStart) -> Result<Accession, PhyloXmlError> {
        Ok(Accession {
            source: self.required_attribute(e, Tag::Accession, "source")?,
            value: self.read_string(Tag::Accession)?.unwrap_or_default(),
        })
    }

    fn parse_annotation(&mut self, e: &BytesStart) -> Result<Annotation, PhyloXmlError> {
        let mut annotation = Annotation {
            reference: self.attribute(e, "ref")?,
            source: self.attribute(e, "source")?,
            evidence: self.attribute(e, "evidence")?,
            annotation_type: self.attribute(e, "type")?,
            ..Default::default()
        };
        self.read_children(Tag::Annotation, |parser, tag, e| {
            match tag {
                Tag::Desc => annotation.desc = parser.read_string(tag)?,
                Tag::Confidence => annotation.confidence = parser.parse_confidence(e)?,
                Tag::Property => annotation.properties.push(parser.parse_property(e)?),
                Tag::Uri => annotation.uris.push(parser.parse_uri(e)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(annotation)
    }

    fn parse_domain_architecture(
        &mut self,
        e: &BytesStart,
    ) -> Result<DomainArchitecture, PhyloXmlError> {
        let mut architecture = DomainArchitecture {
            length: self.parsed_attribute(e, "length")?,
            domains: Vec::new(),
        };
        self.read_children(Tag::DomainArchitecture, |parser, tag, e| {
            if tag != Tag::Domain {
                return Ok(false);
            }
            let domain = parser.parse_domain(e)?;
            architecture.domains.push(domain);
            Ok(true)
        })?;
        Ok(architecture)
    }

    fn parse_domain(&mut self, e: &BytesStart) -> Result<ProteinDomain, PhyloXmlError> {
        let from = self.parsed_attribute(e, "from")?;
        let to = self.parsed_attribute(e, "to")?;
        if from.is_none() || to.is_none() {
            self.malformed("<domain> needs numeric from and to attributes");
        }
        Ok(ProteinDomain {
            from,
            to,
            confidence: self.parsed_attribute(e, "confidence")?,
            id: self.attribute(e, "id")?,
            value: self.read_string(Tag::Domain)?.unwrap_or_default(),
        })
    }
}
