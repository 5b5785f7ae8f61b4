//! Small value types shared by phylogenies, clades, taxonomies and sequences.

/// Type and numeric value of a support measure (bootstrap, posterior
/// probability, ...)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Confidence {
    /// `type` attribute, e.g. `bootstrap` or `probability`.
    /// Required when writing.
    pub confidence_type: Option<String>,

    /// Numeric support value
    pub value: f64,
}

impl Confidence {
    /// Creates a confidence of the given type.
    pub fn new(confidence_type: impl Into<String>, value: f64) -> Self {
        Self {
            confidence_type: Some(confidence_type.into()),
            value,
        }
    }
}

/// Custom typed data attached to a phylogeny, clade or annotation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Property {
    /// `ref` attribute, e.g. `NOAA:depth`
    pub reference: Option<String>,

    /// `unit` attribute, e.g. `METRIC:m`
    pub unit: Option<String>,

    /// `datatype` attribute, one of the `xsd:` types
    pub datatype: Option<String>,

    /// `applies_to` attribute
    pub applies_to: Option<String>,

    /// `id_ref` attribute pointing at an element with a matching `id_source`
    pub id_ref: Option<String>,

    /// Element text, kept verbatim (no trimming)
    pub value: String,
}

/// A link with optional description and type
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Uri {
    /// `desc` attribute
    pub desc: Option<String>,

    /// `type` attribute
    pub uri_type: Option<String>,

    /// The URI itself
    pub value: String,
}

impl Uri {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Default::default()
        }
    }
}

/// Identifier with an optional provider (`id`, `node_id`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Id {
    /// `provider` attribute (the legacy `type` attribute is accepted on input)
    pub provider: Option<String>,

    pub value: String,
}

impl Id {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            provider: None,
            value: value.into(),
        }
    }
}

/// Literature reference
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reference {
    /// `doi` attribute
    pub doi: Option<String>,

    /// Free-text description
    pub desc: Option<String>,
}

/// Date of a clade, usually in millions of years ago
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Date {
    /// `unit` attribute, e.g. `mya`
    pub unit: Option<String>,

    /// `range` attribute
    pub range: Option<f64>,

    pub desc: Option<String>,
    pub value: Option<f64>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
}

/// Branch colour used by tree viewers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BranchColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl BranchColor {
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}
