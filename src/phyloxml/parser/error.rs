use crate::tree::TreeError;
use crate::validator::SchemaViolation;

/// Errors that abort PhyloXML parsing
///
/// Recoverable problems are not errors; they are reported as
/// [`Warning`](crate::phyloxml::Warning)s through the parser's sink.
#[derive(Debug, thiserror::Error)]
pub enum PhyloXmlError {
    /// Error from the XML tokenizer (malformed XML, mismatched end tag, ...)
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// I/O error while reading the source
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 encoding error in text content
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// The document was rejected before streaming started
    #[error("Schema validation failed: {0}")]
    SchemaValidationFailed(SchemaViolation),

    /// Token sequence inconsistent with the document grammar
    #[error("Unexpected token: expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String },

    /// Document ended inside an open element
    #[error("Unexpected end of document inside <{element}>")]
    UnexpectedEof { element: String },

    /// Clade structure could not be assembled into a tree
    #[error("Invalid tree structure: {0}")]
    Tree(#[from] TreeError),
}
