/// Document - the main API for working with the inline content of a Word
/// document part.
use crate::ooxml::docx::image::ImageResource;
use crate::ooxml::docx::options::PictureOptions;
use crate::ooxml::docx::run::Run;
use crate::ooxml::docx::shape::{InlineShape, InlineShapes};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::oxml::tree::{NodeId, XmlTree};

/// A Word document body, as held in the `word/document.xml` part.
///
/// The document owns the element tree; runs and inline shapes handed out by
/// it are handles into that tree and are used together with
/// [`Document::tree`] or [`Document::tree_mut`].
///
/// # Examples
///
/// ```rust
/// use docx_inline::ooxml::docx::{Document, ImagePart, ImageResource, PictureOptions};
/// # fn png() -> Vec<u8> {
/// #     let mut d = Vec::new();
/// #     image::RgbaImage::new(96, 48)
/// #         .write_to(&mut std::io::Cursor::new(&mut d), image::ImageFormat::Png)
/// #         .unwrap();
/// #     d
/// # }
///
/// let mut doc = Document::new()?;
/// let run = doc.add_run()?;
/// let image = ImagePart::from_bytes(png(), Some("chart.png"))?;
///
/// let shape = doc.add_picture(run, &image, "rId5", &PictureOptions::default())?;
/// assert_eq!(shape.width(doc.tree())?, image.default_cx());
/// assert_eq!(doc.inline_shapes()?.len(), 1);
///
/// let xml = doc.to_xml()?;
/// assert!(xml.contains("r:embed=\"rId5\""));
/// # Ok::<(), docx_inline::ooxml::OoxmlError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    tree: XmlTree,
}

impl Document {
    /// Create an empty document: `<w:document><w:body/></w:document>`.
    pub fn new() -> Result<Self> {
        let mut tree = XmlTree::new("w:document")?;
        let body = tree.create_element("w:body")?;
        tree.append_child(tree.root(), body)?;
        Ok(Self { tree })
    }

    /// Parse the XML of a document part.
    pub fn from_xml(xml: &[u8]) -> Result<Self> {
        let tree = XmlTree::parse(xml)?;
        let doc = Self { tree };
        doc.body()?;
        Ok(doc)
    }

    /// Serialize the document part back to XML.
    pub fn to_xml(&self) -> Result<String> {
        self.tree.to_xml()
    }

    #[inline]
    pub fn tree(&self) -> &XmlTree {
        &self.tree
    }

    #[inline]
    pub fn tree_mut(&mut self) -> &mut XmlTree {
        &mut self.tree
    }

    /// The `w:body` element.
    pub fn body(&self) -> Result<NodeId> {
        self.tree.require_child(self.tree.root(), "w:body")
    }

    /// All runs in the body, in document order.
    pub fn runs(&self) -> Result<Vec<Run>> {
        let body = self.body()?;
        self.tree
            .descendants(body, "w:r")
            .into_iter()
            .map(|r| Run::new(&self.tree, r))
            .collect()
    }

    /// Append a paragraph holding one empty run and return the run.
    ///
    /// The paragraph goes before the body's final section properties, if any.
    pub fn add_run(&mut self) -> Result<Run> {
        let body = self.body()?;
        let paragraph = self.tree.create_element("w:p")?;
        let sect_pr = self
            .tree
            .child_elements(body)
            .last()
            .filter(|last| self.tree.is(*last, "w:sectPr"));
        match sect_pr {
            Some(sect_pr) => self.tree.insert_before(body, paragraph, sect_pr)?,
            None => self.tree.append_child(body, paragraph)?,
        }
        Run::append_to(&mut self.tree, paragraph)
    }

    /// The inline shapes in the body.
    pub fn inline_shapes(&self) -> Result<InlineShapes<'_>> {
        Ok(InlineShapes::new(&self.tree, self.body()?))
    }

    /// A shape id not yet used in this document.
    ///
    /// Drawing objects share their id space with every other numeric `id`
    /// attribute in the part, so this is one more than the largest of them,
    /// or 1 when there are none.
    pub fn next_shape_id(&self) -> Result<i64> {
        let root = self.tree.root();
        let mut max_id = 0;
        for node in std::iter::once(root).chain(self.tree.descendant_elements(root)) {
            let Some(id) = self.tree.attr(node, "id")? else {
                continue;
            };
            if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
                continue;
            }
            if let Ok(id) = id.parse::<i64>() {
                max_id = max_id.max(id);
            }
        }
        max_id.checked_add(1).ok_or_else(|| {
            OoxmlError::Other(format!("No shape id left after {}", max_id))
        })
    }

    /// Append a picture of `image` to `run`, related through `r_id`.
    ///
    /// The shape gets the next free shape id. Its size follows `options`:
    /// native when neither dimension is given, aspect-preserving when only
    /// one is.
    pub fn add_picture<I>(
        &mut self,
        run: Run,
        image: &I,
        r_id: &str,
        options: &PictureOptions,
    ) -> Result<InlineShape>
    where
        I: ImageResource + ?Sized,
    {
        let shape_id = self.next_shape_id()?;
        let shape = InlineShape::new_picture(&mut self.tree, &run, image, r_id, shape_id)?;
        if options.is_sized() {
            let (cx, cy) = image.scaled_dimensions(options.width, options.height);
            shape.set_width(&mut self.tree, cx)?;
            shape.set_height(&mut self.tree, cy)?;
        }
        Ok(shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::docx::enums::WdInlineShape;
    use crate::ooxml::docx::image::ImagePart;
    use crate::ooxml::docx::image::tests::png_bytes;
    use crate::ooxml::shared::Length;

    const DOC: &[u8] = br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"
            xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing"
            xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main"
            xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture"
            xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <w:body>
    <w:p>
      <w:r><w:t>Figure 1: </w:t></w:r>
      <w:r>
        <w:drawing>
          <wp:inline distT="0" distB="0" distL="0" distR="0">
            <wp:extent cx="1828800" cy="914400"/>
            <wp:docPr id="4" name="Picture 4"/>
            <a:graphic>
              <a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture">
                <pic:pic>
                  <pic:nvPicPr><pic:cNvPr id="0" name="linked.png"/><pic:cNvPicPr/></pic:nvPicPr>
                  <pic:blipFill><a:blip r:link="rId3"/></pic:blipFill>
                </pic:pic>
              </a:graphicData>
            </a:graphic>
          </wp:inline>
        </w:drawing>
      </w:r>
    </w:p>
    <w:sectPr><w:pgSz w:w="12240" w:h="15840"/></w:sectPr>
  </w:body>
</w:document>"#;

    #[test]
    fn test_reads_existing_shapes() {
        let doc = Document::from_xml(DOC).unwrap();
        let shapes = doc.inline_shapes().unwrap();
        assert_eq!(shapes.len(), 1);

        let shape = shapes.get(0).unwrap();
        assert_eq!(shape.width(doc.tree()).unwrap().inches(), 2.0);
        assert_eq!(shape.height(doc.tree()).unwrap().inches(), 1.0);
        assert_eq!(
            shape.shape_type(doc.tree()).unwrap(),
            WdInlineShape::LinkedPicture
        );
        assert_eq!(doc.runs().unwrap().len(), 2);
        assert_eq!(doc.runs().unwrap()[0].text(doc.tree()), "Figure 1: ");
    }

    #[test]
    fn test_next_shape_id() {
        assert_eq!(Document::new().unwrap().next_shape_id().unwrap(), 1);
        // docPr id 4 and cNvPr id 0
        assert_eq!(Document::from_xml(DOC).unwrap().next_shape_id().unwrap(), 5);

        let doc = Document::from_xml(
            br#"<w:document><w:body><w:bookmarkStart w:id="90" w:name="x"/><wp:docPr id="12"/><wp:docPr id="abc"/></w:body></w:document>"#,
        )
        .unwrap();
        // only unprefixed numeric ids count
        assert_eq!(doc.next_shape_id().unwrap(), 13);
    }

    #[test]
    fn test_next_shape_id_at_the_top_of_the_range() {
        let doc = Document::from_xml(
            br#"<w:document><w:body><wp:docPr id="9223372036854775807"/></w:body></w:document>"#,
        )
        .unwrap();
        assert!(matches!(doc.next_shape_id(), Err(OoxmlError::Other(_))));

        let mut doc = doc;
        let run = doc.add_run().unwrap();
        let image = ImagePart::from_bytes(png_bytes(8, 8, None), None).unwrap();
        assert!(
            doc.add_picture(run, &image, "rId1", &PictureOptions::default())
                .is_err()
        );
        // nothing was inserted
        assert!(doc.inline_shapes().unwrap().is_empty());

        // ids too large for i64 are not shape ids
        let doc = Document::from_xml(
            br#"<w:document><w:body><wp:docPr id="99999999999999999999"/><wp:docPr id="7"/></w:body></w:document>"#,
        )
        .unwrap();
        assert_eq!(doc.next_shape_id().unwrap(), 8);
    }

    #[test]
    fn test_from_xml_requires_body() {
        assert!(Document::from_xml(b"<w:document/>").is_err());
    }

    #[test]
    fn test_add_run_goes_before_sect_pr() {
        let mut doc = Document::from_xml(DOC).unwrap();
        let run = doc.add_run().unwrap();
        let body = doc.body().unwrap();
        let tree = doc.tree();

        let paragraph = tree.parent(run.element()).unwrap();
        let children: Vec<_> = tree.child_elements(body).collect();
        assert_eq!(children.len(), 3);
        assert_eq!(children[1], paragraph);
        assert!(tree.is(children[2], "w:sectPr"));
    }

    #[test]
    fn test_add_picture_native_size() {
        let mut doc = Document::from_xml(DOC).unwrap();
        let run = doc.add_run().unwrap();
        let image = ImagePart::from_bytes(png_bytes(72, 144, None), Some("tall.png")).unwrap();

        let shape = doc
            .add_picture(run, &image, "rId8", &PictureOptions::default())
            .unwrap();
        let tree = doc.tree();
        assert_eq!(shape.shape_id(tree).unwrap(), 5);
        assert_eq!(shape.width(tree).unwrap(), Length::from_inches(1.0));
        assert_eq!(shape.height(tree).unwrap(), Length::from_inches(2.0));
        assert_eq!(shape.shape_type(tree).unwrap(), WdInlineShape::Picture);
        assert_eq!(run.drawings(tree).len(), 1);

        let shapes = doc.inline_shapes().unwrap();
        assert_eq!(shapes.len(), 2);
        assert_eq!(shapes.get(1), Some(shape));
        assert_eq!(doc.next_shape_id().unwrap(), 6);
    }

    #[test]
    fn test_add_picture_scaled() {
        let mut doc = Document::new().unwrap();
        let run = doc.add_run().unwrap();
        let image = ImagePart::from_bytes(png_bytes(144, 72, None), None).unwrap();

        let options = PictureOptions::new().with_height(Length::from_inches(0.5));
        let shape = doc.add_picture(run, &image, "rId1", &options).unwrap();
        assert_eq!(shape.width(doc.tree()).unwrap().emu(), 914400);
        assert_eq!(shape.height(doc.tree()).unwrap().emu(), 457200);
    }

    #[test]
    fn test_inserted_picture_survives_serialization() {
        let mut doc = Document::new().unwrap();
        let run = doc.add_run().unwrap();
        let image = ImagePart::from_bytes(png_bytes(96, 96, Some(3780)), Some("a&b.png")).unwrap();
        doc.add_picture(run, &image, "rId2", &PictureOptions::default())
            .unwrap();

        let xml = doc.to_xml().unwrap();
        assert!(xml.contains("name=\"a&amp;b.png\""));

        let reread = Document::from_xml(xml.as_bytes()).unwrap();
        let shapes = reread.inline_shapes().unwrap();
        assert_eq!(shapes.len(), 1);
        let shape = shapes.get(0).unwrap();
        assert_eq!(shape.width(reread.tree()).unwrap().emu(), 914400);
        assert_eq!(shape.height(reread.tree()).unwrap().emu(), 914400);
        assert_eq!(
            shape.shape_type(reread.tree()).unwrap(),
            WdInlineShape::Picture
        );
        assert_eq!(shape.image_r_id(reread.tree()).unwrap(), Some("rId2"));
        assert_eq!(shape.shape_id(reread.tree()).unwrap(), 1);
    }
}
