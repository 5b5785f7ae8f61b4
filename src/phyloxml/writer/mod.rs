//! # PhyloXML Writer
//!
//! Serializes [`Phylogeny`] values (and captured [`Other`] elements) back to
//! PhyloXML.
//!
//! Each phylogeny is checked in full before any of it is written, so a
//! [`WriteError::RequiredFieldMissing`] or [`WriteError::PatternViolation`]
//! leaves the output exactly as it was before the call. Values outside a
//! schema enumeration are written anyway and reported to the
//! [`DiagnosticSink`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use phyloxml::phyloxml::{PhyloXmlParser, PhyloXmlWriter, WriterConfig};
//!
//! let mut parser = PhyloXmlParser::open("in.xml")?;
//! let mut writer = PhyloXmlWriter::create("out.xml", WriterConfig::default())?;
//! while let Some(tree) = parser.next_tree()? {
//!     writer.write(&tree)?;
//! }
//! writer.write_other(parser.other())?;
//! writer.finish()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::diagnostics::{DiagnosticSink, LogSink, Warning};
use super::models::{Clade, Other, OtherContent, Phylogeny};
use super::vocabulary::{is_allowed, Tag, PHYLOXML_NAMESPACE, SCHEMA_LOCATION, XSI_NAMESPACE};
use crate::tree::{NodeIndex, RootedTree};

pub use config::{BranchLengthMode, WriterConfig};
pub use error::WriteError;
pub use stats::WriterStats;

use describe::{Describe, Field};
use elements::{CladeView, PhylogenyView};

mod config;
mod describe;
mod elements;
mod error;
mod stats;

#[cfg(test)]
mod tests;

/// Streaming PhyloXML writer
///
/// The XML declaration and the opening `<phyloxml>` tag are written on
/// construction; [`finish`](Self::finish) writes the closing tag. A writer
/// dropped without `finish` leaves an unterminated document.
pub struct PhyloXmlWriter<W: Write, S: DiagnosticSink = LogSink> {
    writer: Writer<W>,
    config: WriterConfig,
    sink: S,
    stats: WriterStats,
}

impl<W: Write> PhyloXmlWriter<W> {
    /// Start a document on `inner`, logging warnings
    pub fn new(inner: W, config: WriterConfig) -> Result<Self, WriteError> {
        Self::with_sink(inner, config, LogSink)
    }
}

impl PhyloXmlWriter<BufWriter<File>> {
    /// Create (or truncate) the file at `path` and start a document in it
    pub fn create(path: impl AsRef<Path>, config: WriterConfig) -> Result<Self, WriteError> {
        let file = File::create(path)?;
        Self::new(BufWriter::new(file), config)
    }
}

impl<W: Write, S: DiagnosticSink> PhyloXmlWriter<W, S> {
    /// Start a document on `inner`, reporting warnings to `sink`
    pub fn with_sink(inner: W, config: WriterConfig, sink: S) -> Result<Self, WriteError> {
        let writer = if config.indent == 0 {
            Writer::new(inner)
        } else {
            Writer::new_with_indent(inner, b' ', config.indent)
        };

        let mut this = Self {
            writer,
            config,
            sink,
            stats: WriterStats::default(),
        };

        this.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        let mut root = BytesStart::new(Tag::Phyloxml.as_str());
        root.push_attribute(("xmlns:xsi", XSI_NAMESPACE));
        root.push_attribute(("xsi:schemaLocation", SCHEMA_LOCATION));
        root.push_attribute(("xmlns", PHYLOXML_NAMESPACE));
        this.writer.write_event(Event::Start(root))?;

        Ok(this)
    }

    /// Write one `<phylogeny>`
    ///
    /// Nothing is written if the phylogeny fails validation.
    pub fn write(&mut self, phylogeny: &Phylogeny) -> Result<(), WriteError> {
        let view = PhylogenyView {
            phylogeny,
            mode: self.config.branch_length,
        };
        validate(&view)?;
        self.emit(&view, false)?;

        self.stats.trees_written += 1;
        debug!(
            "Wrote phylogeny {:?} with {} clades",
            phylogeny.name.as_deref().unwrap_or(""),
            phylogeny.clade_count()
        );
        Ok(())
    }

    /// Write several phylogenies, stopping at the first error
    pub fn write_all<'p>(
        &mut self,
        phylogenies: impl IntoIterator<Item = &'p Phylogeny>,
    ) -> Result<(), WriteError> {
        for phylogeny in phylogenies {
            self.write(phylogeny)?;
        }
        Ok(())
    }

    /// Write elements from other vocabularies verbatim
    pub fn write_other(&mut self, elements: &[Other]) -> Result<(), WriteError> {
        for element in elements {
            self.emit_other(element)?;
            self.stats.other_written += 1;
        }
        Ok(())
    }

    /// Close `</phyloxml>`, flush, and hand back the destination
    pub fn finish(mut self) -> Result<W, WriteError> {
        self.writer
            .write_event(Event::End(BytesEnd::new(Tag::Phyloxml.as_str())))?;
        debug!("{}", self.stats);
        let mut inner = self.writer.into_inner();
        inner.flush()?;
        Ok(inner)
    }

    pub fn stats(&self) -> &WriterStats {
        &self.stats
    }

    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Write `item`. With `open_ended` the end tag is left for the caller,
    /// which has more children to add.
    fn emit(&mut self, item: &dyn Describe, open_ended: bool) -> Result<(), WriteError> {
        let tag = item.tag();
        let fields = item.describe();

        let mut start = BytesStart::new(tag.as_str());
        for field in &fields {
            if let Field::Attr {
                name,
                value: Some(value),
                allowed,
                ..
            } = field
            {
                if let Some(allowed) = allowed {
                    self.check_allowed(tag, name, value, allowed);
                }
                start.push_attribute((*name, value.as_ref()));
            }
        }

        if !open_ended && !fields.iter().any(Field::has_content) {
            self.writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        self.writer.write_event(Event::Start(start))?;
        for field in fields {
            self.emit_field(field)?;
        }
        if !open_ended {
            self.writer.write_event(Event::End(BytesEnd::new(tag.as_str())))?;
        }
        Ok(())
    }

    fn emit_field(&mut self, field: Field<'_>) -> Result<(), WriteError> {
        match field {
            Field::Attr { .. } => {}
            Field::Text { value, .. } => {
                if !value.is_empty() {
                    self.writer.write_event(Event::Text(BytesText::new(&value)))?;
                }
            }
            Field::Simple {
                tag,
                value: Some(value),
                allowed,
                ..
            } => {
                if let Some(allowed) = allowed {
                    self.check_allowed(tag, "value", &value, allowed);
                }
                self.emit_simple(tag, &value)?;
            }
            Field::Simple { value: None, .. } => {}
            Field::Pattern {
                tag,
                value: Some(value),
                ..
            } => self.emit_simple(tag, value)?,
            Field::Pattern { value: None, .. } => {}
            Field::Complex(item) => {
                if let Some(item) = item {
                    self.emit(item.as_ref(), false)?;
                }
            }
            Field::ComplexArray(items) => {
                for item in items {
                    self.emit(item.as_ref(), false)?;
                }
            }
            Field::SimpleArray { tag, values } => {
                for value in values {
                    self.emit_simple(tag, value)?;
                }
            }
            Field::Clades { tree, mode } => self.emit_clades(tree, mode)?,
        }
        Ok(())
    }

    fn emit_simple(&mut self, tag: Tag, value: &str) -> Result<(), WriteError> {
        if value.is_empty() {
            return Ok(());
        }
        self.writer
            .create_element(tag.as_str())
            .write_text_content(BytesText::new(value))?;
        Ok(())
    }

    /// Depth-first over the clade tree without recursion, so arbitrarily deep
    /// trees cannot exhaust the stack
    fn emit_clades(
        &mut self,
        tree: &RootedTree<Clade>,
        mode: BranchLengthMode,
    ) -> Result<(), WriteError> {
        enum Step {
            Enter(NodeIndex),
            Exit,
        }

        let Some(root) = tree.root() else {
            return Ok(());
        };

        let mut stack = vec![Step::Enter(root)];
        while let Some(step) = stack.pop() {
            match step {
                Step::Enter(index) => {
                    let view = CladeView {
                        clade: &tree[index],
                        distance: tree.parent_edge(index).and_then(|edge| edge.distance),
                        mode,
                    };
                    let is_leaf = tree.is_leaf(index);
                    self.emit(&view, !is_leaf)?;
                    self.stats.clades_written += 1;

                    if !is_leaf {
                        stack.push(Step::Exit);
                        let children: Vec<NodeIndex> = tree.children(index).collect();
                        stack.extend(children.into_iter().rev().map(Step::Enter));
                    }
                }
                Step::Exit => {
                    self.writer
                        .write_event(Event::End(BytesEnd::new(Tag::Clade.as_str())))?;
                }
            }
        }
        Ok(())
    }

    fn emit_other(&mut self, element: &Other) -> Result<(), WriteError> {
        enum Step<'o> {
            Enter(&'o Other),
            Text(&'o str),
            Exit(&'o str),
        }

        let mut stack = vec![Step::Enter(element)];
        while let Some(step) = stack.pop() {
            match step {
                Step::Enter(element) => {
                    let mut start = BytesStart::new(element.element_name.as_str());
                    for (name, value) in &element.attributes {
                        start.push_attribute((name.as_str(), value.as_str()));
                    }

                    if element.content.is_empty() {
                        self.writer.write_event(Event::Empty(start))?;
                        continue;
                    }

                    self.writer.write_event(Event::Start(start))?;
                    stack.push(Step::Exit(element.element_name.as_str()));
                    stack.extend(element.content.iter().rev().map(|item| match item {
                        OtherContent::Element(child) => Step::Enter(child),
                        OtherContent::Text(text) => Step::Text(text.as_str()),
                    }));
                }
                Step::Text(text) => {
                    self.writer.write_event(Event::Text(BytesText::new(text)))?;
                }
                Step::Exit(name) => {
                    self.writer.write_event(Event::End(BytesEnd::new(name)))?;
                }
            }
        }
        Ok(())
    }

    fn check_allowed(&mut self, element: Tag, what: &str, value: &str, allowed: &[&str]) {
        if !is_allowed(allowed, value) {
            self.sink.warn(Warning::malformed(format!(
                "{} {} {:?} is not an allowed value; writing it anyway",
                element, what, value
            )));
        }
    }
}

/// Check that `phylogeny` can be written: required fields present and
/// patterned values matching their pattern
pub fn check_phylogeny(phylogeny: &Phylogeny) -> Result<(), WriteError> {
    validate(&PhylogenyView {
        phylogeny,
        mode: BranchLengthMode::default(),
    })
}

/// Serialize `phylogenies` into a complete document held in memory
pub fn to_string(phylogenies: &[Phylogeny], config: WriterConfig) -> Result<String, WriteError> {
    let mut writer = PhyloXmlWriter::new(Vec::new(), config)?;
    writer.write_all(phylogenies)?;
    String::from_utf8(writer.finish()?)
        .map_err(|e| WriteError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

fn validate(item: &dyn Describe) -> Result<(), WriteError> {
    let element = item.tag().as_str();
    for field in item.describe() {
        match field {
            Field::Attr {
                name,
                value: None,
                required: true,
                ..
            } => {
                return Err(WriteError::RequiredFieldMissing {
                    element,
                    field: name,
                })
            }
            Field::Simple {
                tag,
                value: None,
                required: true,
                ..
            } => {
                return Err(WriteError::RequiredFieldMissing {
                    element,
                    field: tag.as_str(),
                })
            }
            Field::Text {
                value,
                pattern: Some(pattern),
            } => check_pattern(element, &value, pattern)?,
            Field::Pattern {
                tag,
                value: Some(value),
                pattern,
            } => check_pattern(tag.as_str(), value, pattern)?,
            Field::Complex(Some(item)) => validate(item.as_ref())?,
            Field::ComplexArray(items) => {
                for item in &items {
                    validate(item.as_ref())?;
                }
            }
            Field::Clades { tree, mode } => {
                for index in tree.preorder() {
                    validate(&CladeView {
                        clade: &tree[index],
                        distance: tree.parent_edge(index).and_then(|edge| edge.distance),
                        mode,
                    })?;
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn check_pattern(
    element: &'static str,
    value: &str,
    pattern: &'static describe::Pattern,
) -> Result<(), WriteError> {
    if value.is_empty() || pattern.is_match(value) {
        Ok(())
    } else {
        Err(WriteError::PatternViolation {
            element,
            value: value.to_string(),
            pattern: pattern.source,
        })
    }
}
