//! Element-level access to inline drawings and pictures.
//!
//! These functions know the shape of the DrawingML subtrees involved and
//! nothing else: they read and build `wp:inline`, `a:graphic`, `pic:pic` and
//! friends on an [`XmlTree`]. The document-level proxies in
//! [`crate::ooxml::docx`] are built on top of them.
//!
//! # Example XML Structure
//!
//! ```xml
//! <wp:inline distT="0" distB="0" distL="0" distR="0">
//!   <wp:extent cx="914400" cy="457200"/>
//!   <wp:docPr id="1" name="Picture 1"/>
//!   <wp:cNvGraphicFramePr>
//!     <a:graphicFrameLocks noChangeAspect="1"/>
//!   </wp:cNvGraphicFramePr>
//!   <a:graphic>
//!     <a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture">
//!       <pic:pic>
//!         <pic:nvPicPr>
//!           <pic:cNvPr id="0" name="image.png"/>
//!           <pic:cNvPicPr/>
//!         </pic:nvPicPr>
//!         <pic:blipFill>
//!           <a:blip r:embed="rId5"/>
//!           <a:stretch><a:fillRect/></a:stretch>
//!         </pic:blipFill>
//!         <pic:spPr>
//!           <a:xfrm><a:off x="0" y="0"/><a:ext cx="914400" cy="457200"/></a:xfrm>
//!           <a:prstGeom prst="rect"/>
//!         </pic:spPr>
//!       </pic:pic>
//!     </a:graphicData>
//!   </a:graphic>
//! </wp:inline>
//! ```
use crate::ooxml::error::Result;
use crate::ooxml::oxml::ns;
use crate::ooxml::oxml::tree::{NodeId, XmlTree};

/// `wp:extent` of an inline.
pub fn extent(tree: &XmlTree, inline: NodeId) -> Result<NodeId> {
    tree.require_child(inline, "wp:extent")
}

/// `(cx, cy)` of an inline's extent, in EMU.
pub fn extent_cx_cy(tree: &XmlTree, inline: NodeId) -> Result<(i64, i64)> {
    let ext = extent(tree, inline)?;
    Ok((tree.attr_i64(ext, "cx")?, tree.attr_i64(ext, "cy")?))
}

/// `a:graphic/a:graphicData` of an inline.
pub fn graphic_data(tree: &XmlTree, inline: NodeId) -> Result<NodeId> {
    tree.require_path(inline, &["a:graphic", "a:graphicData"])
}

/// `@uri` of the graphic data, naming the schema of its content.
pub fn graphic_data_uri(tree: &XmlTree, graphic_data: NodeId) -> Result<&str> {
    tree.require_attr(graphic_data, "uri")
}

/// `pic:pic/pic:blipFill/a:blip` under a graphic-data element.
pub fn blip(tree: &XmlTree, graphic_data: NodeId) -> Result<NodeId> {
    tree.require_path(graphic_data, &["pic:pic", "pic:blipFill", "a:blip"])
}

/// `@r:link` of a blip: the relationship of an externally linked image.
pub fn blip_link(tree: &XmlTree, blip: NodeId) -> Result<Option<&str>> {
    tree.attr(blip, "r:link")
}

/// `@r:embed` of a blip: the relationship of an embedded image.
pub fn blip_embed(tree: &XmlTree, blip: NodeId) -> Result<Option<&str>> {
    tree.attr(blip, "r:embed")
}

/// `wp:docPr/@id` of an inline.
pub fn doc_pr_id(tree: &XmlTree, inline: NodeId) -> Result<i64> {
    let doc_pr = tree.require_child(inline, "wp:docPr")?;
    tree.attr_i64(doc_pr, "id")
}

/// Write the inline's extent and, for pictures, the matching
/// `pic:spPr/a:xfrm/a:ext`.
pub fn set_extent(tree: &mut XmlTree, inline: NodeId, cx: Option<i64>, cy: Option<i64>) -> Result<()> {
    let ext = extent(tree, inline)?;
    let pic_ext = graphic_data(tree, inline)
        .ok()
        .and_then(|gd| tree.first_child(gd, "pic:pic"))
        .and_then(|pic| {
            ["pic:spPr", "a:xfrm", "a:ext"]
                .iter()
                .try_fold(pic, |node, name| tree.first_child(node, name))
        });

    for target in std::iter::once(ext).chain(pic_ext) {
        if let Some(cx) = cx {
            tree.set_attr(target, "cx", cx.to_string())?;
        }
        if let Some(cy) = cy {
            tree.set_attr(target, "cy", cy.to_string())?;
        }
    }
    Ok(())
}

/// Build a detached `pic:pic` element.
///
/// `pic_id` goes into `pic:cNvPr/@id`, `filename` into its `@name`; `r_id`
/// is the relationship of the embedded image and `cx`/`cy` its displayed
/// size in EMU.
pub fn new_pic(
    tree: &mut XmlTree,
    pic_id: i64,
    filename: &str,
    r_id: &str,
    cx: i64,
    cy: i64,
) -> Result<NodeId> {
    let pic = tree.create_element("pic:pic")?;

    let nv_pic_pr = tree.create_element("pic:nvPicPr")?;
    let pic_id = pic_id.to_string();
    let c_nv_pr = tree.create_element_with("pic:cNvPr", &[("id", pic_id.as_str()), ("name", filename)])?;
    let c_nv_pic_pr = tree.create_element("pic:cNvPicPr")?;
    tree.append_child(nv_pic_pr, c_nv_pr)?;
    tree.append_child(nv_pic_pr, c_nv_pic_pr)?;

    let blip_fill = tree.create_element("pic:blipFill")?;
    let blip = tree.create_element_with("a:blip", &[("r:embed", r_id)])?;
    let stretch = tree.create_element("a:stretch")?;
    let fill_rect = tree.create_element("a:fillRect")?;
    tree.append_child(stretch, fill_rect)?;
    tree.append_child(blip_fill, blip)?;
    tree.append_child(blip_fill, stretch)?;

    let sp_pr = tree.create_element("pic:spPr")?;
    let xfrm = tree.create_element("a:xfrm")?;
    let off = tree.create_element_with("a:off", &[("x", "0"), ("y", "0")])?;
    let (cx, cy) = (cx.to_string(), cy.to_string());
    let ext = tree.create_element_with("a:ext", &[("cx", cx.as_str()), ("cy", cy.as_str())])?;
    tree.append_child(xfrm, off)?;
    tree.append_child(xfrm, ext)?;
    let prst_geom = tree.create_element_with("a:prstGeom", &[("prst", "rect")])?;
    let av_lst = tree.create_element("a:avLst")?;
    tree.append_child(prst_geom, av_lst)?;
    tree.append_child(sp_pr, xfrm)?;
    tree.append_child(sp_pr, prst_geom)?;

    tree.append_child(pic, nv_pic_pr)?;
    tree.append_child(pic, blip_fill)?;
    tree.append_child(pic, sp_pr)?;
    Ok(pic)
}

/// Build a detached `wp:inline` of size `cx` x `cy` holding `pic`.
///
/// `shape_id` becomes `wp:docPr/@id` and must be unique among the drawing
/// objects of the document.
pub fn new_inline(tree: &mut XmlTree, cx: i64, cy: i64, shape_id: i64, pic: NodeId) -> Result<NodeId> {
    let inline = tree.create_element_with(
        "wp:inline",
        &[("distT", "0"), ("distB", "0"), ("distL", "0"), ("distR", "0")],
    )?;

    let (cx, cy) = (cx.to_string(), cy.to_string());
    let extent = tree.create_element_with("wp:extent", &[("cx", cx.as_str()), ("cy", cy.as_str())])?;
    let id = shape_id.to_string();
    let name = format!("Picture {}", shape_id);
    let doc_pr = tree.create_element_with("wp:docPr", &[("id", id.as_str()), ("name", name.as_str())])?;

    let frame_pr = tree.create_element("wp:cNvGraphicFramePr")?;
    let locks = tree.create_element_with("a:graphicFrameLocks", &[("noChangeAspect", "1")])?;
    tree.append_child(frame_pr, locks)?;

    let graphic = tree.create_element("a:graphic")?;
    let graphic_data = tree.create_element_with("a:graphicData", &[("uri", ns::DML_PICTURE)])?;
    tree.append_child(graphic_data, pic)?;
    tree.append_child(graphic, graphic_data)?;

    tree.append_child(inline, extent)?;
    tree.append_child(inline, doc_pr)?;
    tree.append_child(inline, frame_pr)?;
    tree.append_child(inline, graphic)?;
    Ok(inline)
}
