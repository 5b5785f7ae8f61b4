//! Nodes of a phylogeny.

use super::{
    BranchColor, Confidence, Date, Distribution, Id, Property, Reference, Sequence, Taxonomy,
};

/// Confidence type reported by [`Clade::bootstrap`]
pub const BOOTSTRAP: &str = "bootstrap";

/// A `<clade>` element without its children
///
/// Children and branch lengths are stored in the owning
/// [`Phylogeny`](super::Phylogeny)'s tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Clade {
    pub name: Option<String>,

    /// `id_source` attribute, a link target for `clade_relation`
    pub id_source: Option<String>,

    /// Branch width for display
    pub width: Option<f64>,

    pub node_id: Option<Id>,

    pub color: Option<BranchColor>,

    pub date: Option<Date>,

    pub events: Option<Events>,

    pub binary_characters: Option<BinaryCharacters>,

    pub confidences: Vec<Confidence>,
    pub taxonomies: Vec<Taxonomy>,
    pub sequences: Vec<Sequence>,
    pub distributions: Vec<Distribution>,
    pub references: Vec<Reference>,
    pub properties: Vec<Property>,
}

impl Clade {
    /// Creates a clade with only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Value of the first `bootstrap` confidence.
    pub fn bootstrap(&self) -> Option<f64> {
        self.confidences
            .iter()
            .find(|c| c.confidence_type.as_deref() == Some(BOOTSTRAP))
            .map(|c| c.value)
    }

    /// Scientific name of the first taxonomy.
    pub fn scientific_name(&self) -> Option<&str> {
        self.taxonomies.first().and_then(Taxonomy::scientific_name)
    }
}

/// Gene duplications, speciations and losses at a clade
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Events {
    /// `transfer`, `fusion`, `speciation_or_duplication`, ...
    pub event_type: Option<String>,

    pub duplications: Option<u32>,
    pub speciations: Option<u32>,
    pub losses: Option<u32>,

    pub confidence: Option<Confidence>,
}

/// Binary characters (presence/absence, gain/loss) at a clade
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinaryCharacters {
    /// `type` attribute. Required when writing.
    pub bc_type: Option<String>,

    pub gained_count: Option<u32>,
    pub lost_count: Option<u32>,
    pub present_count: Option<u32>,
    pub absent_count: Option<u32>,

    pub gained: Vec<String>,
    pub lost: Vec<String>,
    pub present: Vec<String>,
    pub absent: Vec<String>,
}
