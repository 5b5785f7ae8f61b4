use std::fmt;

/// Running totals of a [`PhyloXmlWriter`](super::PhyloXmlWriter)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriterStats {
    /// Number of `<phylogeny>` elements written
    pub trees_written: usize,
    /// Number of `<clade>` elements written
    pub clades_written: usize,
    /// Number of top-level non-PhyloXML elements written
    pub other_written: usize,
}

impl fmt::Display for WriterStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wrote {} phylogenies ({} clades) and {} other elements",
            self.trees_written, self.clades_written, self.other_written
        )
    }
}
