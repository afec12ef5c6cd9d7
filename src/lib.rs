//! docx-inline - Inline shapes for Word (.docx) documents
//!
//! This library reads and creates the graphical objects that sit inline in the
//! text of a Word document: pictures (embedded or linked), charts, and SmartArt
//! diagrams.
//!
//! # Features
//!
//! - **Shape inspection**: Read the display size and kind of every inline shape
//! - **Picture insertion**: Build a complete `<wp:inline>` picture from image bytes
//! - **Native sizing**: Pixel size from the `image` crate, resolution from PNG, JPEG
//!   (JFIF or Exif), BMP and TIFF metadata
//! - **Round-tripping**: Serialize the edited part back to XML
//!
//! # Example - Inserting a picture
//!
//! ```no_run
//! use docx_inline::ooxml::Length;
//! use docx_inline::ooxml::docx::{Document, ImagePart, PictureOptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let xml = std::fs::read("word/document.xml")?;
//! let mut doc = Document::from_xml(&xml)?;
//!
//! let image = ImagePart::open("logo.png")?;
//! let run = doc.add_run()?;
//! let options = PictureOptions::new().with_width(Length::from_inches(2.0));
//! doc.add_picture(run, &image, "rId9", &options)?;
//!
//! std::fs::write("word/document.xml", doc.to_xml()?)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Listing shapes
//!
//! ```no_run
//! use docx_inline::ooxml::docx::Document;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let doc = Document::from_xml(&std::fs::read("word/document.xml")?)?;
//! for shape in doc.inline_shapes()? {
//!     println!(
//!         "{}: {} x {}",
//!         shape.shape_type(doc.tree())?,
//!         shape.width(doc.tree())?,
//!         shape.height(doc.tree())?
//!     );
//! }
//! # Ok(())
//! # }
//! ```

pub mod ooxml;
