//! Declarative output descriptions.
//!
//! Every element the writer emits is described as an ordered list of
//! [`Field`]s. The writer interprets the list twice: once to validate the
//! element (required fields, patterns) and once to emit it.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

use super::config::BranchLengthMode;
use crate::phyloxml::models::Clade;
use crate::phyloxml::vocabulary::Tag;
use crate::tree::RootedTree;

/// A regular expression compiled on first use
pub struct Pattern {
    pub source: &'static str,
    regex: OnceLock<Option<Regex>>,
}

impl Pattern {
    pub const fn new(source: &'static str) -> Self {
        Self {
            source,
            regex: OnceLock::new(),
        }
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.regex
            .get_or_init(|| Regex::new(self.source).ok())
            .as_ref()
            .map_or(false, |regex| regex.is_match(value))
    }
}

/// `taxonomy/code`
pub static TAXONOMY_CODE: Pattern = Pattern::new(r"^[a-zA-Z0-9_]{2,10}$");

/// `sequence/symbol`
pub static SEQUENCE_SYMBOL: Pattern = Pattern::new(r"^\S{1,10}$");

/// `sequence/mol_seq`
pub static MOL_SEQ: Pattern = Pattern::new(r"^[a-zA-Z.\-?*_]+$");

/// An element that can be written
pub trait Describe {
    /// Element name
    fn tag(&self) -> Tag;

    /// Attributes and content in schema order
    fn describe(&self) -> Vec<Field<'_>>;
}

impl<T: Describe + ?Sized> Describe for &T {
    fn tag(&self) -> Tag {
        (**self).tag()
    }

    fn describe(&self) -> Vec<Field<'_>> {
        (**self).describe()
    }
}

/// One instruction of an output description
pub enum Field<'a> {
    /// Attribute on the element's start tag
    Attr {
        name: &'static str,
        value: Option<Cow<'a, str>>,
        required: bool,
        allowed: Option<&'static [&'static str]>,
    },
    /// Text content of the element itself, optionally pattern-checked
    Text {
        value: Cow<'a, str>,
        pattern: Option<&'static Pattern>,
    },
    /// Child element holding a single scalar; omitted when absent or empty
    Simple {
        tag: Tag,
        value: Option<Cow<'a, str>>,
        required: bool,
        allowed: Option<&'static [&'static str]>,
    },
    /// Scalar child element that must match a pattern
    Pattern {
        tag: Tag,
        value: Option<&'a str>,
        pattern: &'static Pattern,
    },
    /// Nested complex element
    Complex(Option<Box<dyn Describe + 'a>>),
    /// Repeated complex elements
    ComplexArray(Vec<Box<dyn Describe + 'a>>),
    /// Repeated scalar elements
    SimpleArray { tag: Tag, values: &'a [String] },
    /// The clade tree of a phylogeny
    Clades {
        tree: &'a RootedTree<Clade>,
        mode: BranchLengthMode,
    },
}

impl<'a> Field<'a> {
    pub fn attr(name: &'static str, value: Option<Cow<'a, str>>) -> Self {
        Field::Attr {
            name,
            value,
            required: false,
            allowed: None,
        }
    }

    pub fn required_attr(name: &'static str, value: Option<Cow<'a, str>>) -> Self {
        Field::Attr {
            name,
            value,
            required: true,
            allowed: None,
        }
    }

    /// Attribute whose value should come from `allowed`
    pub fn enum_attr(
        name: &'static str,
        value: Option<Cow<'a, str>>,
        required: bool,
        allowed: &'static [&'static str],
    ) -> Self {
        Field::Attr {
            name,
            value,
            required,
            allowed: Some(allowed),
        }
    }

    pub fn simple(tag: Tag, value: Option<Cow<'a, str>>) -> Self {
        Field::Simple {
            tag,
            value,
            required: false,
            allowed: None,
        }
    }

    pub fn enum_simple(
        tag: Tag,
        value: Option<Cow<'a, str>>,
        allowed: &'static [&'static str],
    ) -> Self {
        Field::Simple {
            tag,
            value,
            required: false,
            allowed: Some(allowed),
        }
    }

    pub fn pattern(tag: Tag, value: Option<&'a str>, pattern: &'static Pattern) -> Self {
        Field::Pattern {
            tag,
            value,
            pattern,
        }
    }

    pub fn text(value: impl Into<Cow<'a, str>>) -> Self {
        Field::Text {
            value: value.into(),
            pattern: None,
        }
    }

    pub fn complex<T: Describe>(item: Option<&'a T>) -> Self {
        Field::Complex(item.map(|item| Box::new(item) as Box<dyn Describe + 'a>))
    }

    /// Nested element built from a view that exists only for output
    pub fn view<D: Describe + 'a>(view: Option<D>) -> Self {
        Field::Complex(view.map(|view| Box::new(view) as Box<dyn Describe + 'a>))
    }

    pub fn complex_array<T: Describe>(items: &'a [T]) -> Self {
        Field::ComplexArray(
            items
                .iter()
                .map(|item| Box::new(item) as Box<dyn Describe + 'a>)
                .collect(),
        )
    }

    /// Whether this field produces child content (as opposed to an attribute
    /// or nothing at all)
    pub fn has_content(&self) -> bool {
        match self {
            Field::Attr { .. } => false,
            Field::Text { value, .. } => !value.is_empty(),
            Field::Simple { value, .. } => value.as_deref().map_or(false, |v| !v.is_empty()),
            Field::Pattern { value, .. } => value.map_or(false, |v| !v.is_empty()),
            Field::Complex(item) => item.is_some(),
            Field::ComplexArray(items) => !items.is_empty(),
            Field::SimpleArray { values, .. } => !values.is_empty(),
            Field::Clades { tree, .. } => tree.root().is_some(),
        }
    }
}

/// Borrow an optional string
pub fn text(value: &Option<String>) -> Option<Cow<'_, str>> {
    value.as_deref().map(Cow::Borrowed)
}

/// Format an optional number or boolean
pub fn display<T: ToString>(value: Option<T>) -> Option<Cow<'static, str>> {
    value.map(|v| Cow::Owned(v.to_string()))
}
