/// Error types for OOXML operations.
use thiserror::Error;

/// Result type for OOXML operations.
pub type Result<T> = std::result::Result<T, OoxmlError>;

/// Error types for OOXML operations.
#[derive(Error, Debug)]
pub enum OoxmlError {
    /// XML parsing or serialization error
    #[error("XML error: {0}")]
    Xml(String),

    /// A required child element is absent
    #[error("Missing element <{child}> under <{parent}>")]
    MissingElement { parent: String, child: String },

    /// A required attribute is absent
    #[error("Missing attribute {attr} on <{element}>")]
    MissingAttribute { element: String, attr: String },

    /// An attribute is present but its value cannot be interpreted
    #[error("Invalid value {value:?} for attribute {attr}")]
    InvalidAttribute { attr: String, value: String },

    /// A node handle does not belong to the tree it was used with
    #[error("Invalid node handle: {0}")]
    InvalidNode(usize),

    /// Invalid format
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<quick_xml::Error> for OoxmlError {
    fn from(err: quick_xml::Error) -> Self {
        OoxmlError::Xml(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for OoxmlError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        OoxmlError::Xml(err.to_string())
    }
}
