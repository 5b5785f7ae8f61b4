use serde::Deserialize;

/// How a clade's branch length is written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchLengthMode {
    /// `<clade branch_length="0.1">`
    Attribute,
    /// `<clade><branch_length>0.1</branch_length>`
    #[default]
    Element,
}

/// Configuration for the PhyloXML writer
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    /// Spaces per nesting level; 0 writes everything on one line
    pub indent: usize,

    /// Branch length representation, honored at every depth
    pub branch_length: BranchLengthMode,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            indent: 2,
            branch_length: BranchLengthMode::Element,
        }
    }
}

impl WriterConfig {
    /// No indentation or line breaks
    pub fn compact() -> Self {
        Self {
            indent: 0,
            ..Default::default()
        }
    }

    /// Default layout with the given branch length representation
    pub fn with_branch_length(mode: BranchLengthMode) -> Self {
        Self {
            branch_length: mode,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WriterConfig::default();
        assert_eq!(config.indent, 2);
        assert_eq!(config.branch_length, BranchLengthMode::Element);
        assert_eq!(WriterConfig::compact().indent, 0);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: WriterConfig = toml::from_str(r#"branch_length = "attribute""#).unwrap();
        assert_eq!(config.branch_length, BranchLengthMode::Attribute);
        assert_eq!(config.indent, 2);
    }
}
