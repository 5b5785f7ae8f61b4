//! Taxonomic information attached to a clade.

use super::{Id, Uri};

/// Names that identify a taxon independently of PhyloXML
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxonNames {
    /// Short code, e.g. a UniProt species code such as `CLOAB`
    pub code: Option<String>,

    pub scientific_name: Option<String>,

    /// Common names in document order
    pub common_names: Vec<String>,

    /// Taxonomic rank, e.g. `genus`
    pub rank: Option<String>,
}

/// A `<taxonomy>` element
///
/// The generic naming fields live in [`TaxonNames`]; the remaining fields are
/// specific to PhyloXML.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Taxonomy {
    /// `id_source` attribute, a link target for `id_ref`
    pub id_source: Option<String>,

    /// Identifier, e.g. an NCBI taxonomy id
    pub id: Option<Id>,

    pub names: TaxonNames,

    pub authority: Option<String>,

    pub synonyms: Vec<String>,

    pub uris: Vec<Uri>,
}

impl Taxonomy {
    /// Creates a taxonomy holding only a scientific name.
    pub fn with_scientific_name(name: impl Into<String>) -> Self {
        Self {
            names: TaxonNames {
                scientific_name: Some(name.into()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn scientific_name(&self) -> Option<&str> {
        self.names.scientific_name.as_deref()
    }

    pub fn code(&self) -> Option<&str> {
        self.names.code.as_deref()
    }

    pub fn rank(&self) -> Option<&str> {
        self.names.rank.as_deref()
    }

    pub fn common_names(&self) -> &[String] {
        &self.names.common_names
    }
}
