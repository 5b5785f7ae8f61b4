//! Streaming PhyloXML parser using quick-xml
//!
//! [`PhyloXmlParser`] pulls tokens from the document one at a time and builds
//! one [`Phylogeny`] per call to [`PhyloXmlParser::next_tree`]. Only the tree
//! currently being built is held in memory, so forests of any size can be
//! processed one tree at a time.
//!
//! Elements after the last `<phylogeny>` (or a document whose root is not
//! `<phyloxml>` at all) are captured as generic [`Other`] values, available
//! through [`PhyloXmlParser::other`].

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;
use quick_xml::events::Event;
use quick_xml::NsReader;

use super::diagnostics::{DiagnosticSink, LogSink, Warning};
use super::models::{Other, Phylogeny};
use super::vocabulary::Tag;
use crate::validator::SchemaValidator;

pub use error::PhyloXmlError;
pub use iterators::{IntoTrees, Trees};

mod distribution;
mod elements;
mod error;
mod helpers;
mod iterators;
mod other;
mod phylogeny;
mod sequence;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StreamState {
    /// Nothing but the prologue has been read
    Prologue,
    /// Inside the `<phyloxml>` root element
    InDocument,
    /// End of document, or a fatal error was returned
    Finished,
}

/// Streaming parser for PhyloXML documents
pub struct PhyloXmlParser<R: BufRead, S: DiagnosticSink = LogSink> {
    reader: NsReader<R>,
    sink: S,
    state: StreamState,
    other: Vec<Other>,
    trees_parsed: usize,
}

impl<R: BufRead> PhyloXmlParser<R, LogSink> {
    /// Create a parser that reports warnings through the `log` crate
    pub fn new(reader: R) -> Self {
        Self::with_sink(reader, LogSink)
    }
}

impl<'a> PhyloXmlParser<&'a [u8], LogSink> {
    /// Create a parser over an in-memory document
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(document: &'a str) -> Self {
        Self::new(document.as_bytes())
    }
}

impl PhyloXmlParser<BufReader<File>, LogSink> {
    /// Open a PhyloXML file
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PhyloXmlError> {
        let file = File::open(path.as_ref())?;
        Ok(Self::new(BufReader::new(file)))
    }

    /// Validate a file with `validator`, then open it for streaming
    ///
    /// Nothing is parsed if validation fails.
    pub fn open_validated(
        path: impl AsRef<Path>,
        validator: &dyn SchemaValidator,
    ) -> Result<Self, PhyloXmlError> {
        let path = path.as_ref();
        let document = std::fs::read(path)?;
        validator
            .validate(&document)
            .map_err(PhyloXmlError::SchemaValidationFailed)?;
        debug!("{} passed schema validation", path.display());
        Self::open(path)
    }
}

impl<R: BufRead, S: DiagnosticSink> PhyloXmlParser<R, S> {
    /// Create a parser that reports warnings to `sink`
    pub fn with_sink(reader: R, sink: S) -> Self {
        let mut xml_reader = NsReader::from_reader(reader);
        // `<x/>` arrives as a start/end pair so every element has one code path
        xml_reader.config_mut().expand_empty_elements = true;

        Self {
            reader: xml_reader,
            sink,
            state: StreamState::Prologue,
            other: Vec::new(),
            trees_parsed: 0,
        }
    }

    /// Read the next phylogeny from the stream
    ///
    /// Returns `Ok(None)` once no further `<phylogeny>` remains. After an error
    /// the stream is finished and every later call returns `Ok(None)`.
    pub fn next_tree(&mut self) -> Result<Option<Phylogeny>, PhyloXmlError> {
        if self.state == StreamState::Finished {
            return Ok(None);
        }

        match self.read_next_tree() {
            Ok(Some(phylogeny)) => {
                self.trees_parsed += 1;
                debug!(
                    "Parsed phylogeny #{} ({} clades)",
                    self.trees_parsed,
                    phylogeny.clade_count()
                );
                Ok(Some(phylogeny))
            }
            Ok(None) => {
                self.state = StreamState::Finished;
                Ok(None)
            }
            Err(e) => {
                self.state = StreamState::Finished;
                Err(e)
            }
        }
    }

    /// Skip `index` phylogenies and return the one after them
    ///
    /// Counting starts at the current stream position; skipped trees are
    /// parsed and dropped.
    pub fn tree_at(&mut self, index: usize) -> Result<Option<Phylogeny>, PhyloXmlError> {
        for _ in 0..index {
            if self.next_tree()?.is_none() {
                return Ok(None);
            }
        }
        self.next_tree()
    }

    /// Iterate over the remaining phylogenies
    pub fn trees(&mut self) -> Trees<'_, R, S> {
        Trees { parser: self }
    }

    /// Iterate over the remaining phylogenies, consuming the parser
    pub fn into_trees(self) -> IntoTrees<R, S> {
        IntoTrees { parser: self }
    }

    /// Elements captured outside any `<phylogeny>` so far
    pub fn other(&self) -> &[Other] {
        &self.other
    }

    /// Number of phylogenies returned so far
    pub fn trees_parsed(&self) -> usize {
        self.trees_parsed
    }

    /// Whether the end of the document (or a fatal error) has been reached
    pub fn is_finished(&self) -> bool {
        self.state == StreamState::Finished
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consume the parser and return its diagnostics sink
    pub fn into_sink(self) -> S {
        self.sink
    }

    fn read_next_tree(&mut self) -> Result<Option<Phylogeny>, PhyloXmlError> {
        let mut buf = Vec::new();
        loop {
            let event = self.reader.read_event_into(&mut buf)?.into_owned();
            buf.clear();

            match event {
                Event::Start(e) => match self.phyloxml_tag(e.name()) {
                    Some(Tag::Phylogeny) => return self.parse_phylogeny(&e).map(Some),
                    Some(Tag::Phyloxml) if self.state == StreamState::Prologue => {
                        self.state = StreamState::InDocument;
                    }
                    _ => {
                        let other = self.parse_other(&e)?;
                        debug!("Captured <{}> outside any phylogeny", other.element_name);
                        self.other.push(other);
                        if self.state == StreamState::Prologue {
                            // The root element itself was not PhyloXML
                            return Ok(None);
                        }
                    }
                },
                Event::End(_) | Event::Eof => return Ok(None),
                _ => {}
            }
        }
    }

    fn malformed(&mut self, message: impl std::fmt::Display) {
        let position = self.reader.buffer_position();
        self.sink
            .warn(Warning::malformed(format!("{} (byte {})", message, position)));
    }

    fn unrecognized(&mut self, message: impl std::fmt::Display) {
        let position = self.reader.buffer_position();
        self.sink
            .warn(Warning::unrecognized(format!("{} (byte {})", message, position)));
    }
}
