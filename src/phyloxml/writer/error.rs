/// Errors that can occur during writing
///
/// Validation errors are raised before any byte of the offending phylogeny is
/// emitted.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    /// I/O error on the destination
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from the XML writer
    #[error("XML writing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// A field the schema requires is absent
    #[error("<{element}> is missing required field {field}")]
    RequiredFieldMissing {
        element: &'static str,
        field: &'static str,
    },

    /// A value does not match the pattern the schema imposes on it
    #[error("<{element}> value {value:?} does not match {pattern}")]
    PatternViolation {
        element: &'static str,
        value: String,
        pattern: &'static str,
    },
}
