//! Output descriptions of the PhyloXML elements, in schema order.

use std::borrow::Cow;

use super::config::BranchLengthMode;
use super::describe::{display, text, Describe, Field, MOL_SEQ, SEQUENCE_SYMBOL, TAXONOMY_CODE};
use crate::phyloxml::models::{
    Accession, Annotation, BinaryCharacters, BranchColor, Clade, CladeRelation, Confidence, Date,
    Distribution, DomainArchitecture, Events, Id, Phylogeny, Point, Polygon, Property,
    ProteinDomain, Reference, Sequence, SequenceRelation, Taxonomy, Uri,
};
use crate::phyloxml::vocabulary::{
    Tag, EVENT_TYPES, PROPERTY_APPLIES_TO, PROPERTY_DATATYPES, SEQUENCE_RELATION_TYPES,
    SEQUENCE_TYPES, TAXONOMY_RANKS,
};

/// A phylogeny as written with a given branch length placement
pub struct PhylogenyView<'a> {
    pub phylogeny: &'a Phylogeny,
    pub mode: BranchLengthMode,
}

impl Describe for PhylogenyView<'_> {
    fn tag(&self) -> Tag {
        Tag::Phylogeny
    }

    fn describe(&self) -> Vec<Field<'_>> {
        let p = self.phylogeny;
        vec![
            Field::required_attr("rooted", display(Some(p.rooted))),
            Field::attr("rerootable", display(p.rerootable)),
            Field::attr("branch_length_unit", text(&p.branch_length_unit)),
            Field::attr("type", text(&p.phylogeny_type)),
            Field::simple(Tag::Name, text(&p.name)),
            Field::view(p.id.as_ref().map(|id| IdView::new(Tag::Id, id))),
            Field::simple(Tag::Description, text(&p.description)),
            Field::simple(Tag::Date, text(&p.date)),
            Field::complex_array(&p.confidences),
            Field::Clades {
                tree: &p.tree,
                mode: self.mode,
            },
            Field::complex_array(&p.clade_relations),
            Field::complex_array(&p.sequence_relations),
            Field::complex_array(&p.properties),
        ]
    }
}

/// A clade without its children, together with the length of the branch
/// leading to it
pub struct CladeView<'a> {
    pub clade: &'a Clade,
    pub distance: Option<f64>,
    pub mode: BranchLengthMode,
}

impl Describe for CladeView<'_> {
    fn tag(&self) -> Tag {
        Tag::Clade
    }

    fn describe(&self) -> Vec<Field<'_>> {
        let c = self.clade;
        let (attribute, element) = match self.mode {
            BranchLengthMode::Attribute => (self.distance, None),
            BranchLengthMode::Element => (None, self.distance),
        };
        vec![
            Field::attr("id_source", text(&c.id_source)),
            Field::attr("branch_length", display(attribute)),
            Field::simple(Tag::Name, text(&c.name)),
            Field::simple(Tag::BranchLength, display(element)),
            Field::complex_array(&c.confidences),
            Field::simple(Tag::Width, display(c.width)),
            Field::complex(c.color.as_ref()),
            Field::view(c.node_id.as_ref().map(|id| IdView::new(Tag::NodeId, id))),
            Field::complex_array(&c.taxonomies),
            Field::complex_array(&c.sequences),
            Field::complex(c.events.as_ref()),
            Field::complex(c.binary_characters.as_ref()),
            Field::complex_array(&c.distributions),
            Field::complex(c.date.as_ref()),
            Field::complex_array(&c.references),
            Field::complex_array(&c.properties),
        ]
    }
}

/// `<id>` and `<node_id>` share a type but not a name
struct IdView<'a> {
    tag: Tag,
    id: &'a Id,
}

impl<'a> IdView<'a> {
    fn new(tag: Tag, id: &'a Id) -> Self {
        Self { tag, id }
    }
}

impl Describe for IdView<'_> {
    fn tag(&self) -> Tag {
        self.tag
    }

    fn describe(&self) -> Vec<Field<'_>> {
        vec![
            Field::attr("provider", text(&self.id.provider)),
            Field::text(self.id.value.as_str()),
        ]
    }
}

impl Describe for Confidence {
    fn tag(&self) -> Tag {
        Tag::Confidence
    }

    fn describe(&self) -> Vec<Field<'_>> {
        vec![
            Field::required_attr("type", text(&self.confidence_type)),
            Field::text(self.value.to_string()),
        ]
    }
}

impl Describe for Property {
    fn tag(&self) -> Tag {
        Tag::Property
    }

    fn describe(&self) -> Vec<Field<'_>> {
        vec![
            Field::required_attr("ref", text(&self.reference)),
            Field::attr("unit", text(&self.unit)),
            Field::enum_attr("datatype", text(&self.datatype), true, PROPERTY_DATATYPES),
            Field::enum_attr("applies_to", text(&self.applies_to), true, PROPERTY_APPLIES_TO),
            Field::attr("id_ref", text(&self.id_ref)),
            Field::text(self.value.as_str()),
        ]
    }
}

impl Describe for Uri {
    fn tag(&self) -> Tag {
        Tag::Uri
    }

    fn describe(&self) -> Vec<Field<'_>> {
        vec![
            Field::attr("desc", text(&self.desc)),
            Field::attr("type", text(&self.uri_type)),
            Field::text(self.value.as_str()),
        ]
    }
}

impl Describe for Reference {
    fn tag(&self) -> Tag {
        Tag::Reference
    }

    fn describe(&self) -> Vec<Field<'_>> {
        vec![
            Field::attr("doi", text(&self.doi)),
            Field::simple(Tag::Desc, text(&self.desc)),
        ]
    }
}

impl Describe for Date {
    fn tag(&self) -> Tag {
        Tag::Date
    }

    fn describe(&self) -> Vec<Field<'_>> {
        vec![
            Field::attr("unit", text(&self.unit)),
            Field::attr("range", display(self.range)),
            Field::simple(Tag::Desc, text(&self.desc)),
            Field::simple(Tag::Value, display(self.value)),
            Field::simple(Tag::Minimum, display(self.minimum)),
            Field::simple(Tag::Maximum, display(self.maximum)),
        ]
    }
}

impl Describe for BranchColor {
    fn tag(&self) -> Tag {
        Tag::Color
    }

    fn describe(&self) -> Vec<Field<'_>> {
        vec![
            Field::simple(Tag::Red, display(Some(self.red))),
            Field::simple(Tag::Green, display(Some(self.green))),
            Field::simple(Tag::Blue, display(Some(self.blue))),
        ]
    }
}

impl Describe for Taxonomy {
    fn tag(&self) -> Tag {
        Tag::Taxonomy
    }

    fn describe(&self) -> Vec<Field<'_>> {
        let names = &self.names;
        vec![
            Field::attr("id_source", text(&self.id_source)),
            Field::view(self.id.as_ref().map(|id| IdView::new(Tag::Id, id))),
            Field::pattern(Tag::Code, names.code.as_deref(), &TAXONOMY_CODE),
            Field::simple(Tag::ScientificName, text(&names.scientific_name)),
            Field::simple(Tag::Authority, text(&self.authority)),
            Field::SimpleArray {
                tag: Tag::CommonName,
                values: &names.common_names,
            },
            Field::SimpleArray {
                tag: Tag::Synonym,
                values: &self.synonyms,
            },
            Field::enum_simple(Tag::Rank, text(&names.rank), TAXONOMY_RANKS),
            Field::complex_array(&self.uris),
        ]
    }
}

impl Describe for Sequence {
    fn tag(&self) -> Tag {
        Tag::Sequence
    }

    fn describe(&self) -> Vec<Field<'_>> {
        let mol_seq = self.mol_seq.as_deref().map(|value| MolSeqView {
            value,
            is_aligned: self.mol_seq_is_aligned,
        });
        vec![
            Field::enum_attr("type", text(&self.seq_type), false, SEQUENCE_TYPES),
            Field::attr("id_source", text(&self.id_source)),
            Field::attr("id_ref", text(&self.id_ref)),
            Field::pattern(Tag::Symbol, self.symbol.as_deref(), &SEQUENCE_SYMBOL),
            Field::complex(self.accession.as_ref()),
            Field::simple(Tag::Name, text(&self.name)),
            Field::simple(Tag::Location, text(&self.location)),
            Field::view(mol_seq),
            Field::complex_array(&self.uris),
            Field::complex_array(&self.annotations),
            Field::complex(self.domain_architecture.as_ref()),
        ]
    }
}

struct MolSeqView<'a> {
    value: &'a str,
    is_aligned: Option<bool>,
}

impl Describe for MolSeqView<'_> {
    fn tag(&self) -> Tag {
        Tag::MolSeq
    }

    fn describe(&self) -> Vec<Field<'_>> {
        vec![
            Field::attr("is_aligned", display(self.is_aligned)),
            Field::Text {
                value: Cow::Borrowed(self.value),
                pattern: Some(&MOL_SEQ),
            },
        ]
    }
}

impl Describe for Accession {
    fn tag(&self) -> Tag {
        Tag::Accession
    }

    fn describe(&self) -> Vec<Field<'_>> {
        vec![
            Field::required_attr("source", text(&self.source)),
            Field::text(self.value.as_str()),
        ]
    }
}

impl Describe for Annotation {
    fn tag(&self) -> Tag {
        Tag::Annotation
    }

    fn describe(&self) -> Vec<Field<'_>> {
        vec![
            Field::attr("ref", text(&self.reference)),
            Field::attr("source", text(&self.source)),
            Field::attr("evidence", text(&self.evidence)),
            Field::attr("type", text(&self.annotation_type)),
            Field::simple(Tag::Desc, text(&self.desc)),
            Field::complex(self.confidence.as_ref()),
            Field::complex_array(&self.properties),
            Field::complex_array(&self.uris),
        ]
    }
}

impl Describe for DomainArchitecture {
    fn tag(&self) -> Tag {
        Tag::DomainArchitecture
    }

    fn describe(&self) -> Vec<Field<'_>> {
        vec![
            Field::required_attr("length", display(self.length)),
            Field::complex_array(&self.domains),
        ]
    }
}

impl Describe for ProteinDomain {
    fn tag(&self) -> Tag {
        Tag::Domain
    }

    fn describe(&self) -> Vec<Field<'_>> {
        vec![
            Field::required_attr("from", display(self.from)),
            Field::required_attr("to", display(self.to)),
            Field::attr("confidence", display(self.confidence)),
            Field::attr("id", text(&self.id)),
            Field::text(self.value.as_str()),
        ]
    }
}

impl Describe for Events {
    fn tag(&self) -> Tag {
        Tag::Events
    }

    fn describe(&self) -> Vec<Field<'_>> {
        vec![
            Field::enum_simple(Tag::Type, text(&self.event_type), EVENT_TYPES),
            Field::simple(Tag::Duplications, display(self.duplications)),
            Field::simple(Tag::Speciations, display(self.speciations)),
            Field::simple(Tag::Losses, display(self.losses)),
            Field::complex(self.confidence.as_ref()),
        ]
    }
}

impl Describe for BinaryCharacters {
    fn tag(&self) -> Tag {
        Tag::BinaryCharacters
    }

    fn describe(&self) -> Vec<Field<'_>> {
        vec![
            Field::required_attr("type", text(&self.bc_type)),
            Field::attr("gained_count", display(self.gained_count)),
            Field::attr("lost_count", display(self.lost_count)),
            Field::attr("present_count", display(self.present_count)),
            Field::attr("absent_count", display(self.absent_count)),
            character_list(Tag::Gained, &self.gained),
            character_list(Tag::Lost, &self.lost),
            character_list(Tag::Present, &self.present),
            character_list(Tag::Absent, &self.absent),
        ]
    }
}

fn character_list(tag: Tag, values: &[String]) -> Field<'_> {
    Field::view((!values.is_empty()).then_some(CharacterList { tag, values }))
}

/// One of the `<bc>` lists of `<binary_characters>`
struct CharacterList<'a> {
    tag: Tag,
    values: &'a [String],
}

impl Describe for CharacterList<'_> {
    fn tag(&self) -> Tag {
        self.tag
    }

    fn describe(&self) -> Vec<Field<'_>> {
        vec![Field::SimpleArray {
            tag: Tag::Bc,
            values: self.values,
        }]
    }
}

impl Describe for Distribution {
    fn tag(&self) -> Tag {
        Tag::Distribution
    }

    fn describe(&self) -> Vec<Field<'_>> {
        vec![
            Field::simple(Tag::Desc, text(&self.desc)),
            Field::complex_array(&self.points),
            Field::complex_array(&self.polygons),
        ]
    }
}

impl Describe for Point {
    fn tag(&self) -> Tag {
        Tag::Point
    }

    fn describe(&self) -> Vec<Field<'_>> {
        vec![
            Field::attr("geodetic_datum", text(&self.geodetic_datum)),
            Field::attr("alt_unit", text(&self.alt_unit)),
            Field::simple(Tag::Lat, display(self.lat)),
            Field::simple(Tag::Long, display(self.long)),
            Field::simple(Tag::Alt, display(self.alt)),
        ]
    }
}

impl Describe for Polygon {
    fn tag(&self) -> Tag {
        Tag::Polygon
    }

    fn describe(&self) -> Vec<Field<'_>> {
        vec![Field::complex_array(&self.points)]
    }
}

impl Describe for CladeRelation {
    fn tag(&self) -> Tag {
        Tag::CladeRelation
    }

    fn describe(&self) -> Vec<Field<'_>> {
        vec![
            Field::required_attr("id_ref_0", text(&self.id_ref_0)),
            Field::required_attr("id_ref_1", text(&self.id_ref_1)),
            Field::attr("distance", display(self.distance)),
            Field::required_attr("type", text(&self.relation_type)),
            Field::complex(self.confidence.as_ref()),
        ]
    }
}

impl Describe for SequenceRelation {
    fn tag(&self) -> Tag {
        Tag::SequenceRelation
    }

    fn describe(&self) -> Vec<Field<'_>> {
        vec![
            Field::required_attr("id_ref_0", text(&self.id_ref_0)),
            Field::required_attr("id_ref_1", text(&self.id_ref_1)),
            Field::attr("distance", display(self.distance)),
            Field::enum_attr(
                "type",
                text(&self.relation_type),
                true,
                SEQUENCE_RELATION_TYPES,
            ),
            Field::complex(self.confidence.as_ref()),
        ]
    }
}
