use std::io::BufRead;

use super::{PhyloXmlError, PhyloXmlParser};
use crate::phyloxml::diagnostics::DiagnosticSink;
use crate::phyloxml::models::Phylogeny;

/// Iterator over the remaining phylogenies of a borrowed parser
pub struct Trees<'a, R: BufRead, S: DiagnosticSink> {
    pub(super) parser: &'a mut PhyloXmlParser<R, S>,
}

impl<R: BufRead, S: DiagnosticSink> Iterator for Trees<'_, R, S> {
    type Item = Result<Phylogeny, PhyloXmlError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.parser.next_tree().transpose()
    }
}

/// Iterator over the remaining phylogenies of an owned parser
pub struct IntoTrees<R: BufRead, S: DiagnosticSink> {
    pub(super) parser: PhyloXmlParser<R, S>,
}

impl<R: BufRead, S: DiagnosticSink> IntoTrees<R, S> {
    /// Give the parser back, e.g. to read captured trailing content
    pub fn into_parser(self) -> PhyloXmlParser<R, S> {
        self.parser
    }
}

impl<R: BufRead, S: DiagnosticSink> Iterator for IntoTrees<R, S> {
    type Item = Result<Phylogeny, PhyloXmlError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.parser.next_tree() {
            Ok(Some(phylogeny)) => Some(Ok(phylogeny)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}
