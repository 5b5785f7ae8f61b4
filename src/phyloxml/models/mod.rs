//! Data models for PhyloXML documents
//!
//! Every recognized element maps to one plain struct. Optional elements and
//! attributes are `Option`s, repeated elements are `Vec`s in document order.

mod clade;
mod common;
mod distribution;
mod other;
mod phylogeny;
mod sequence;
mod taxonomy;

pub use clade::{BinaryCharacters, Clade, Events, BOOTSTRAP};
pub use common::{BranchColor, Confidence, Date, Id, Property, Reference, Uri};
pub use distribution::{Distribution, Point, Polygon};
pub use other::{Other, OtherContent};
pub use phylogeny::{CladeRelation, Phylogeny, SequenceRelation};
pub use sequence::{Accession, Annotation, DomainArchitecture, ProteinDomain, Sequence};
pub use taxonomy::{TaxonNames, Taxonomy};
