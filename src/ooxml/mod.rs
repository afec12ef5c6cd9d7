//! Office Open XML (OOXML) format implementation.
//!
//! This module provides reading and manipulation of the inline drawing content
//! of Word (.docx) document parts.
//!
//! The design follows the structure of the python-docx library, adapted for
//! Rust: element-level helpers over an arena XML tree, with thin proxy types
//! on top.
//!
//! # Architecture
//!
//! The module is organized into several layers:
//!
//! 1. **Element Layer** (`oxml`): XML tree, namespaces, and `wp:inline` element helpers
//! 2. **Shared Utilities** (`shared`, `error`): Common types used across the crate
//! 3. **Proxy Layer** (`docx`): Documents, runs and inline shapes
//!
//! # Example: Reading Inline Shapes
//!
//! ```rust
//! use docx_inline::ooxml::docx::Document;
//!
//! let doc = Document::from_xml(b"<w:document><w:body><w:p/></w:body></w:document>")?;
//! println!("Document contains {} inline shapes", doc.inline_shapes()?.len());
//! # Ok::<(), docx_inline::ooxml::OoxmlError>(())
//! ```
pub mod docx;
pub mod error;
pub mod oxml;
pub mod shared;

// Re-export error types
pub use error::{OoxmlError, Result};

// Re-export common units
pub use shared::{DEFAULT_DPI, Length};
