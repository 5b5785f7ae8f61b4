//! # PhyloXML Module
//!
//! Streaming parsing and writing of PhyloXML, the XML format for
//! phylogenetic trees and the data attached to them.
//!
//! ## Design Goals
//!
//! - **Streaming**: One `<phylogeny>` is materialized at a time, so a file of
//!   many large trees never has to fit in memory at once
//! - **Forgiving**: Malformed or unknown content below `<phylogeny>` is
//!   reported to a [`DiagnosticSink`] and skipped; only broken XML is fatal
//! - **Forward compatible**: Top-level elements from other vocabularies are
//!   captured as [`Other`] and can be written back unchanged
//!
//! ## PhyloXML Structure
//!
//! ```text
//! phyloxml
//! ├── phylogeny* (rooted=...)
//! │   ├── name, id, description, date, confidence*
//! │   ├── clade (root)
//! │   │   ├── name, branch_length, confidence*, width, color, node_id
//! │   │   ├── taxonomy*, sequence*, events, binary_characters
//! │   │   ├── distribution*, date, reference*, property*
//! │   │   └── clade* (children, recursively)
//! │   ├── clade_relation*, sequence_relation*
//! │   └── property*
//! └── other elements (any namespace)
//! ```

pub mod diagnostics;
pub mod models;
pub mod parser;
pub mod vocabulary;
pub mod writer;

pub use diagnostics::{CollectingSink, DiagnosticSink, LogSink, Warning, WarningKind};
pub use models::{Clade, Other, Phylogeny};
pub use parser::{IntoTrees, PhyloXmlError, PhyloXmlParser, Trees};
pub use writer::{BranchLengthMode, PhyloXmlWriter, WriteError, WriterConfig, WriterStats};
