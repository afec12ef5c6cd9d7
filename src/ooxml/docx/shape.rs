//! Inline shapes: graphical objects that sit in the text flow of a document.
//!
//! An inline shape is a `<wp:inline>` element inside a run's `<w:drawing>`.
//! Its `<a:graphicData>` names the schema of the object it holds through a
//! namespace URI, which is how pictures, charts and SmartArt diagrams are told
//! apart.
//!
//! # Example
//!
//! ```rust
//! use docx_inline::ooxml::docx::{Document, WdInlineShape};
//!
//! let doc = Document::from_xml(br#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"
//!     xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing"
//!     xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main">
//!   <w:body><w:p><w:r><w:drawing>
//!     <wp:inline>
//!       <wp:extent cx="914400" cy="457200"/>
//!       <wp:docPr id="1" name="Chart 1"/>
//!       <a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/chart"/></a:graphic>
//!     </wp:inline>
//!   </w:drawing></w:r></w:p></w:body>
//! </w:document>"#)?;
//!
//! let shapes = doc.inline_shapes()?;
//! let chart = shapes.get(0).unwrap();
//! assert_eq!(chart.shape_type(doc.tree())?, WdInlineShape::Chart);
//! assert_eq!(chart.width(doc.tree())?.inches(), 1.0);
//! # Ok::<(), docx_inline::ooxml::OoxmlError>(())
//! ```
use crate::ooxml::docx::enums::WdInlineShape;
use crate::ooxml::docx::image::ImageResource;
use crate::ooxml::docx::run::Run;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::oxml::ns;
use crate::ooxml::oxml::shape;
use crate::ooxml::oxml::tree::{NodeId, XmlTree};
use crate::ooxml::shared::Length;

/// Proxy for a `<wp:inline>` element, the container of an inline graphical
/// object.
///
/// The proxy is a bare node handle. It caches nothing, so its readings always
/// reflect the tree as it is when they are taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InlineShape {
    inline: NodeId,
}

impl InlineShape {
    /// Wrap an existing `wp:inline` element.
    #[inline]
    pub fn new(inline: NodeId) -> Self {
        Self { inline }
    }

    /// Wrap `node` after checking that it is a `wp:inline` element.
    pub fn from_element(tree: &XmlTree, node: NodeId) -> Result<Self> {
        if !tree.is(node, "wp:inline") {
            return Err(OoxmlError::InvalidFormat(format!(
                "Expected <wp:inline>, got <{}>",
                tree.tag(node)?
            )));
        }
        Ok(Self::new(node))
    }

    /// The wrapped `wp:inline` element.
    #[inline]
    pub fn element(&self) -> NodeId {
        self.inline
    }

    /// Append a new inline picture of `image` to `run`.
    ///
    /// Builds a `pic:pic` embedding the image through relationship `r_id`,
    /// wraps it in a `wp:inline` sized to the image's native extents and
    /// identified by `shape_id`, and appends it to the run inside a new
    /// `w:drawing`. The caller is responsible for `shape_id` being unique in
    /// the document.
    pub fn new_picture<I>(
        tree: &mut XmlTree,
        run: &Run,
        image: &I,
        r_id: &str,
        shape_id: i64,
    ) -> Result<Self>
    where
        I: ImageResource + ?Sized,
    {
        let (cx, cy) = (image.default_cx().emu(), image.default_cy().emu());
        let pic_id = 0;
        let pic = shape::new_pic(tree, pic_id, image.filename(), r_id, cx, cy)?;
        let inline = shape::new_inline(tree, cx, cy, shape_id, pic)?;
        run.add_drawing(tree, inline)?;
        log::debug!(
            "inserted picture {} ({}) as shape {} with extent {}x{}",
            image.filename(),
            r_id,
            shape_id,
            cx,
            cy
        );
        Ok(Self::new(inline))
    }

    /// Display width, from `wp:extent/@cx`.
    pub fn width(&self, tree: &XmlTree) -> Result<Length> {
        let ext = shape::extent(tree, self.inline)?;
        tree.attr_i64(ext, "cx").map(Length::new)
    }

    /// Display height, from `wp:extent/@cy`.
    pub fn height(&self, tree: &XmlTree) -> Result<Length> {
        let ext = shape::extent(tree, self.inline)?;
        tree.attr_i64(ext, "cy").map(Length::new)
    }

    /// Set the display width. A picture's own transform follows along.
    pub fn set_width(&self, tree: &mut XmlTree, width: Length) -> Result<()> {
        shape::set_extent(tree, self.inline, Some(width.emu()), None)
    }

    /// Set the display height. A picture's own transform follows along.
    pub fn set_height(&self, tree: &mut XmlTree, height: Length) -> Result<()> {
        shape::set_extent(tree, self.inline, None, Some(height.emu()))
    }

    /// Kind of graphical object held by this shape.
    ///
    /// Unrecognized graphic-data namespaces yield
    /// [`WdInlineShape::NotImplemented`] rather than an error, so documents
    /// carrying newer object kinds still read.
    pub fn shape_type(&self, tree: &XmlTree) -> Result<WdInlineShape> {
        let graphic_data = shape::graphic_data(tree, self.inline)?;
        let uri = shape::graphic_data_uri(tree, graphic_data)?;
        let kind = match uri {
            ns::DML_PICTURE => {
                let blip = shape::blip(tree, graphic_data)?;
                match shape::blip_link(tree, blip)? {
                    Some(_) => WdInlineShape::LinkedPicture,
                    None => WdInlineShape::Picture,
                }
            },
            ns::DML_CHART => WdInlineShape::Chart,
            ns::DML_DIAGRAM => WdInlineShape::SmartArt,
            _ => WdInlineShape::NotImplemented,
        };
        Ok(kind)
    }

    /// The shape identifier, `wp:docPr/@id`.
    pub fn shape_id(&self, tree: &XmlTree) -> Result<i64> {
        shape::doc_pr_id(tree, self.inline)
    }

    /// Relationship id of an embedded picture's image, if any.
    pub fn image_r_id<'t>(&self, tree: &'t XmlTree) -> Result<Option<&'t str>> {
        let graphic_data = shape::graphic_data(tree, self.inline)?;
        if shape::graphic_data_uri(tree, graphic_data)? != ns::DML_PICTURE {
            return Ok(None);
        }
        let blip = shape::blip(tree, graphic_data)?;
        shape::blip_embed(tree, blip)
    }
}

/// Sequence of the inline shapes in a document body, in document order.
///
/// The sequence is re-read from the tree on every access.
#[derive(Debug, Clone, Copy)]
pub struct InlineShapes<'a> {
    tree: &'a XmlTree,
    body: NodeId,
}

impl<'a> InlineShapes<'a> {
    pub fn new(tree: &'a XmlTree, body: NodeId) -> Self {
        Self { tree, body }
    }

    /// `w:p/w:r/w:drawing/wp:inline` anywhere under the body.
    ///
    /// Drawings nested in `mc:AlternateContent` or other wrappers are not
    /// counted, so an object Word stores twice (once per alternative) is not
    /// reported twice.
    fn elements(&self) -> Vec<NodeId> {
        let tree = self.tree;
        tree.descendants(self.body, "w:drawing")
            .into_iter()
            .filter(|drawing| {
                tree.parent(*drawing)
                    .filter(|r| tree.is(*r, "w:r"))
                    .and_then(|r| tree.parent(r))
                    .is_some_and(|p| tree.is(p, "w:p"))
            })
            .filter_map(|drawing| tree.first_child(drawing, "wp:inline"))
            .collect()
    }

    /// Number of inline shapes.
    pub fn len(&self) -> usize {
        self.elements().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The inline shape at `idx`, `None` when out of range.
    pub fn get(&self, idx: usize) -> Option<InlineShape> {
        self.elements().get(idx).copied().map(InlineShape::new)
    }

    pub fn iter(&self) -> impl Iterator<Item = InlineShape> {
        self.elements().into_iter().map(InlineShape::new)
    }
}

impl<'a> IntoIterator for InlineShapes<'a> {
    type Item = InlineShape;
    type IntoIter = std::iter::Map<std::vec::IntoIter<NodeId>, fn(NodeId) -> InlineShape>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements()
            .into_iter()
            .map(InlineShape::new as fn(NodeId) -> InlineShape)
    }
}
