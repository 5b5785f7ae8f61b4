//! # phyloxml - Streaming PhyloXML for Rust
//!
//! `phyloxml` reads and writes [PhyloXML](http://www.phyloxml.org), the XML
//! format for phylogenetic trees annotated with taxonomy, sequences, events,
//! geographic distributions and arbitrary typed properties.
//!
//! ## Key Features
//!
//! - **Streaming Parser**: Trees are yielded one `<phylogeny>` at a time, so
//!   forests far larger than memory can be processed.
//!
//! - **Lenient Reading**: Problems below `<phylogeny>` (unknown elements,
//!   unparsable numbers, out-of-vocabulary values) are reported through a
//!   pluggable diagnostic sink instead of aborting the read.
//!
//! - **Checked Writing**: A phylogeny is validated against the schema's
//!   required fields and patterns before a single byte of it is written.
//!
//! - **Arena Trees**: Clades live in an index-based [`tree::RootedTree`] with
//!   branch lengths on the edges, so deep trees never recurse.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use phyloxml::phyloxml::PhyloXmlParser;
//!
//! let mut parser = PhyloXmlParser::open("trees.xml")?;
//! while let Some(tree) = parser.next_tree()? {
//!     println!(
//!         "{}: {} clades, total branch length {:.3}",
//!         tree.name.as_deref().unwrap_or("<unnamed>"),
//!         tree.clade_count(),
//!         tree.total_distance()
//!     );
//! }
//! # Ok::<(), phyloxml::phyloxml::PhyloXmlError>(())
//! ```
//!
//! ## Round Trip
//!
//! ```rust,no_run
//! use phyloxml::phyloxml::{BranchLengthMode, PhyloXmlParser, PhyloXmlWriter, WriterConfig};
//!
//! let trees: Vec<_> = PhyloXmlParser::open("in.xml")?
//!     .into_trees()
//!     .collect::<Result<_, _>>()?;
//!
//! let config = WriterConfig::with_branch_length(BranchLengthMode::Attribute);
//! let mut writer = PhyloXmlWriter::create("out.xml", config)?;
//! writer.write_all(&trees)?;
//! writer.finish()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! - [`tree`]: Generic rooted tree arena with weighted edges
//! - [`phyloxml`]: Data model, streaming parser and writer
//! - [`validator`]: Structural pre-validation and whole-file reports

#![deny(rustdoc::missing_crate_level_docs)]

pub mod phyloxml;
pub mod tree;
pub mod validator;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::phyloxml::diagnostics::{
        CollectingSink, DiagnosticSink, LogSink, Warning, WarningKind,
    };
    pub use crate::phyloxml::models::{
        Clade, Confidence, Distribution, Other, OtherContent, Phylogeny, Property, Sequence,
        Taxonomy,
    };
    pub use crate::phyloxml::{
        BranchLengthMode, PhyloXmlError, PhyloXmlParser, PhyloXmlWriter, WriteError,
        WriterConfig, WriterStats,
    };
    pub use crate::tree::{Edge, EdgeIndex, NodeIndex, RootedTree, TreeError};
    pub use crate::validator::{
        validate_phyloxml_file, SchemaValidator, SchemaViolation, StructuralValidator,
        ValidationReport,
    };
}
