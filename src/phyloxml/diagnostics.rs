//! Recoverable problems found while reading or writing.
//!
//! Parsing never aborts for a malformed-but-understandable construct or an
//! element this crate does not know. Instead a [`Warning`] is handed to the
//! [`DiagnosticSink`] the parser (or writer) was constructed with.

use std::fmt;

use log::{debug, warn};

/// Category of a recoverable problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningKind {
    /// Understood element with bad content: too few polygon points, a value
    /// outside an allowed set, an unparsable number, a missing attribute
    MalformedStructure,
    /// Element this crate does not model, or one found in the wrong place
    UnrecognizedElement,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningKind::MalformedStructure => write!(f, "malformed structure"),
            WarningKind::UnrecognizedElement => write!(f, "unrecognized element"),
        }
    }
}

/// A recoverable problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    /// What went wrong
    pub kind: WarningKind,
    /// Human-readable description
    pub message: String,
}

impl Warning {
    /// Creates a [`WarningKind::MalformedStructure`] warning.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::MalformedStructure,
            message: message.into(),
        }
    }

    /// Creates a [`WarningKind::UnrecognizedElement`] warning.
    pub fn unrecognized(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::UnrecognizedElement,
            message: message.into(),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// Receiver for recoverable problems
pub trait DiagnosticSink {
    /// Called once per problem, in document order.
    fn warn(&mut self, warning: Warning);
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn warn(&mut self, warning: Warning) {
        (**self).warn(warning)
    }
}

/// Forwards every warning to `log::warn!`
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn warn(&mut self, warning: Warning) {
        warn!("{}", warning);
    }
}

/// Keeps every warning for later inspection
#[derive(Debug, Default, Clone)]
pub struct CollectingSink {
    warnings: Vec<Warning>,
}

impl CollectingSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Warnings received so far.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Number of warnings of the given kind.
    pub fn count(&self, kind: WarningKind) -> usize {
        self.warnings.iter().filter(|w| w.kind == kind).count()
    }

    /// Whether no warning has been received.
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Consumes the sink, returning the warnings.
    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}

impl DiagnosticSink for CollectingSink {
    fn warn(&mut self, warning: Warning) {
        debug!("{}", warning);
        self.warnings.push(warning);
    }
}
