//! # PhyloXML Validation Module
//!
//! Validation runs in two places:
//!
//! 1. **Before parsing**: [`PhyloXmlParser::open_validated`] hands the raw
//!    document to a [`SchemaValidator`]. A rejected document is never parsed.
//!    [`StructuralValidator`] ships with the crate; a full XSD engine can be
//!    plugged in behind the same trait.
//! 2. **As a report**: [`validate_phyloxml_file`] runs the structural checks,
//!    parses every phylogeny while collecting warnings, and checks that every
//!    tree can be written back out. The result is a [`ValidationReport`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use phyloxml::validator::validate_phyloxml_file;
//! use std::path::Path;
//!
//! match validate_phyloxml_file(Path::new("trees.xml")) {
//!     Ok(report) => println!("{}", report),
//!     Err(e) => eprintln!("Validation failed: {}", e),
//! }
//! ```
//!
//! [`PhyloXmlParser::open_validated`]: crate::phyloxml::PhyloXmlParser::open_validated

use std::path::Path;

use anyhow::{Context, Result};

pub use report::{CheckStatus, ValidationCheck, ValidationReport};
pub use structure::StructuralValidator;

mod content;
mod report;
mod structure;

/// Reason a document was rejected by a [`SchemaValidator`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}{}", .position.map(|p| format!(" (byte {})", p)).unwrap_or_default())]
pub struct SchemaViolation {
    pub message: String,
    /// Byte offset in the document, if known
    pub position: Option<u64>,
}

impl SchemaViolation {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            position: None,
        }
    }

    pub fn at(message: impl Into<String>, position: u64) -> Self {
        Self {
            message: message.into(),
            position: Some(position),
        }
    }
}

/// Validates a complete document before it is streamed
pub trait SchemaValidator {
    fn validate(&self, document: &[u8]) -> Result<(), SchemaViolation>;
}

/// Run every check against the PhyloXML file at `path`
pub fn validate_phyloxml_file(path: &Path) -> Result<ValidationReport> {
    let mut report = ValidationReport::new(path.display().to_string());

    let document = std::fs::read(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    report.add_check(ValidationCheck::ok("File readable"));

    match StructuralValidator::new().validate(&document) {
        Ok(()) => report.add_check(ValidationCheck::ok("Document structure")),
        Err(violation) => {
            report.add_check(ValidationCheck::failed(
                "Document structure",
                violation.to_string(),
            ));
            // Parsing a structurally broken document would only repeat the failure
            return Ok(report);
        }
    }

    content::check_content(&document, &mut report);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_validation_report_display() {
        let mut report = ValidationReport::new("trees.xml");
        report.add_check(ValidationCheck::ok("Test check 1"));
        report.add_check(ValidationCheck::warning("Test check 2", "This is a warning"));
        report.add_check(ValidationCheck::failed("Test check 3", "This failed"));

        let output = report.to_string();
        assert!(output.contains("✓"));
        assert!(output.contains("⚠"));
        assert!(output.contains("✗"));
        assert!(output.contains("1 passed, 1 warnings, 1 failed"));
        assert!(output.contains("Validation FAILED"));
    }

    #[test]
    fn test_schema_violation_display() {
        assert_eq!(SchemaViolation::new("bad").to_string(), "bad");
        assert_eq!(SchemaViolation::at("bad", 12).to_string(), "bad (byte 12)");
    }

    #[test]
    fn test_validate_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"<phyloxml xmlns="http://www.phyloxml.org">
  <phylogeny rooted="true">
    <clade><name>A</name><clade branch_length="0.1"><name>B</name></clade></clade>
  </phylogeny>
</phyloxml>"#
        )
        .unwrap();

        let report = validate_phyloxml_file(file.path()).unwrap();
        assert!(!report.has_failures(), "{}", report);
        assert!(!report.has_warnings(), "{}", report);
    }

    #[test]
    fn test_validate_file_with_structure_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "<nexml/>").unwrap();

        let report = validate_phyloxml_file(file.path()).unwrap();
        assert!(report.has_failures());
        assert_eq!(report.checks.len(), 2);
    }

    #[test]
    fn test_validate_missing_file() {
        assert!(validate_phyloxml_file(Path::new("/nonexistent/trees.xml")).is_err());
    }
}
