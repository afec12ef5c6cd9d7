/// Word (.docx) inline shape support.
///
/// This module provides the document-level proxies for reading and creating
/// inline graphical objects in the body of a Word document.
///
/// # Architecture
///
/// The module is organized around these key types:
/// - `Document`: The `word/document.xml` part and the tree it owns
/// - `Run`: A text run, the host of drawings
/// - `InlineShape`: A `<wp:inline>` object (picture, chart, SmartArt, ...)
/// - `InlineShapes`: The inline shapes of a document body, in order
/// - `ImagePart`: Image bytes with the pixel size and resolution from their header
///
/// # Example
///
/// ```rust
/// use docx_inline::ooxml::docx::{Document, WdInlineShape};
///
/// let doc = Document::new()?;
/// for shape in doc.inline_shapes()? {
///     if shape.shape_type(doc.tree())? == WdInlineShape::Picture {
///         println!("picture: {}", shape.width(doc.tree())?);
///     }
/// }
/// # Ok::<(), docx_inline::ooxml::OoxmlError>(())
/// ```
pub mod document;
pub mod enums;
pub mod format;
pub mod image;
pub mod options;
pub mod run;
pub mod shape;

pub use document::Document;
pub use enums::WdInlineShape;
pub use format::ImageFormat;
pub use self::image::{ImagePart, ImageResource};
pub use options::PictureOptions;
pub use run::Run;
pub use shape::{InlineShape, InlineShapes};
