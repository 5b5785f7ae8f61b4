//! Molecular sequences and their annotations.

use super::{Confidence, Property, Uri};

/// A `<sequence>` element
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sequence {
    /// `type` attribute: `dna`, `rna` or `protein`
    pub seq_type: Option<String>,

    /// `id_source` attribute, a link target for `sequence_relation`
    pub id_source: Option<String>,

    /// `id_ref` attribute
    pub id_ref: Option<String>,

    /// Short symbol, at most 10 non-space characters, e.g. `adhB`
    pub symbol: Option<String>,

    pub accession: Option<Accession>,

    /// Full name, e.g. `alcohol dehydrogenase`
    pub name: Option<String>,

    /// Location of the sequence on a genome or chromosome
    pub location: Option<String>,

    /// Residues; letters and `.-?*_` only
    pub mol_seq: Option<String>,

    /// `is_aligned` attribute of `<mol_seq>`
    pub mol_seq_is_aligned: Option<bool>,

    pub uris: Vec<Uri>,

    /// Annotations in document order
    pub annotations: Vec<Annotation>,

    pub domain_architecture: Option<DomainArchitecture>,
}

/// Database accession of a sequence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Accession {
    /// Database name, e.g. `UniProtKB`. Required when writing.
    pub source: Option<String>,

    pub value: String,
}

impl Accession {
    pub fn new(source: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            value: value.into(),
        }
    }
}

/// A functional annotation of a sequence
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Annotation {
    /// `ref` attribute, e.g. `EC:1.1.1.1` or `GO:0004022`
    pub reference: Option<String>,

    pub source: Option<String>,

    pub evidence: Option<String>,

    /// `type` attribute
    pub annotation_type: Option<String>,

    pub desc: Option<String>,

    pub confidence: Option<Confidence>,

    pub properties: Vec<Property>,

    pub uris: Vec<Uri>,
}

/// Domain layout of a protein
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DomainArchitecture {
    /// Total sequence length. Required when writing.
    pub length: Option<u32>,

    /// Domains in document order
    pub domains: Vec<ProteinDomain>,
}

/// One domain of a [`DomainArchitecture`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProteinDomain {
    /// First residue (1-based). Required when writing.
    pub from: Option<u64>,

    /// Last residue. Required when writing.
    pub to: Option<u64>,

    pub confidence: Option<f64>,

    /// `id` attribute
    pub id: Option<String>,

    /// Domain name
    pub value: String,
}
