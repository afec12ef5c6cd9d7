//! Low-level XML object model for OOXML parts.
//!
//! - `tree`: the arena-backed element tree and its node handles
//! - `ns`: namespace URIs, the prefix map and qualified-name helpers
//! - `shape`: accessors and factories for inline drawing elements
pub mod ns;
pub mod shape;
pub mod tree;

pub use ns::{QName, nsmap, qn};
pub use tree::{Attribute, Element, NodeId, XmlTree};
