//! A complete tree plus its tree-level metadata.

use super::{Clade, Confidence, Id, Property};
use crate::tree::{NodeIndex, RootedTree};

/// One `<phylogeny>` element
///
/// Clades live in [`Phylogeny::tree`]; each edge carries the branch length
/// between a clade and its parent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Phylogeny {
    pub name: Option<String>,

    pub id: Option<Id>,

    pub description: Option<String>,

    /// Free-text date of the phylogeny
    pub date: Option<String>,

    /// `rooted` attribute
    pub rooted: bool,

    /// `rerootable` attribute; `None` when absent
    pub rerootable: Option<bool>,

    /// `branch_length_unit` attribute
    pub branch_length_unit: Option<String>,

    /// `type` attribute, e.g. `gene_tree`
    pub phylogeny_type: Option<String>,

    pub confidences: Vec<Confidence>,
    pub properties: Vec<Property>,
    pub clade_relations: Vec<CladeRelation>,
    pub sequence_relations: Vec<SequenceRelation>,

    /// Clades and branch lengths
    pub tree: RootedTree<Clade>,
}

impl Phylogeny {
    pub fn new() -> Self {
        Self::default()
    }

    /// The root clade, if the phylogeny has any clades.
    pub fn root_clade(&self) -> Option<&Clade> {
        self.tree.root_node()
    }

    /// Index of the first clade (in document order) named `name`.
    pub fn clade_by_name(&self, name: &str) -> Option<NodeIndex> {
        self.tree.find(|clade| clade.name.as_deref() == Some(name))
    }

    /// Clade named `name`.
    pub fn get_clade(&self, name: &str) -> Option<&Clade> {
        self.clade_by_name(name).map(|index| &self.tree[index])
    }

    /// Sum of all branch lengths.
    pub fn total_distance(&self) -> f64 {
        self.tree.total_distance()
    }

    pub fn clade_count(&self) -> usize {
        self.tree.node_count()
    }
}

/// Link between two clades, e.g. a network connection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CladeRelation {
    /// Required when writing.
    pub id_ref_0: Option<String>,
    /// Required when writing.
    pub id_ref_1: Option<String>,
    pub distance: Option<f64>,
    /// Required when writing.
    pub relation_type: Option<String>,
    pub confidence: Option<Confidence>,
}

/// Link between two sequences, e.g. orthology or paralogy
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SequenceRelation {
    /// Required when writing.
    pub id_ref_0: Option<String>,
    /// Required when writing.
    pub id_ref_1: Option<String>,
    pub distance: Option<f64>,
    /// One of the sequence relation types. Required when writing.
    pub relation_type: Option<String>,
    pub confidence: Option<Confidence>,
}
