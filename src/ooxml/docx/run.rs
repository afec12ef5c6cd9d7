/// Run proxy for DOCX documents.
///
/// A run (`<w:r>`) is the smallest unit of content in a paragraph that shares
/// one set of character formatting. Besides text, a run can carry drawings,
/// which is how inline pictures enter the text flow.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::oxml::tree::{NodeId, XmlTree};

/// Proxy for a `<w:r>` element.
///
/// Holds only the node handle; every read and write goes through the tree
/// passed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Run {
    r: NodeId,
}

impl Run {
    /// Wrap `r`, which must be a `w:r` element.
    pub fn new(tree: &XmlTree, r: NodeId) -> Result<Self> {
        if !tree.is(r, "w:r") {
            return Err(OoxmlError::InvalidFormat(format!(
                "Expected <w:r>, got <{}>",
                tree.tag(r)?
            )));
        }
        Ok(Self { r })
    }

    /// Create a new empty run at the end of `paragraph`.
    pub fn append_to(tree: &mut XmlTree, paragraph: NodeId) -> Result<Self> {
        let r = tree.create_element("w:r")?;
        tree.append_child(paragraph, r)?;
        Ok(Self { r })
    }

    /// The wrapped `w:r` element.
    #[inline]
    pub fn element(&self) -> NodeId {
        self.r
    }

    /// Append a `<w:drawing>` holding `inline` and return the drawing.
    pub fn add_drawing(&self, tree: &mut XmlTree, inline: NodeId) -> Result<NodeId> {
        let drawing = tree.create_element("w:drawing")?;
        tree.append_child(drawing, inline)?;
        tree.append_child(self.r, drawing)?;
        Ok(drawing)
    }

    /// The `<w:drawing>` children of this run.
    pub fn drawings(&self, tree: &XmlTree) -> Vec<NodeId> {
        tree.child_elements(self.r)
            .filter(|c| tree.is(*c, "w:drawing"))
            .collect()
    }

    /// Append text to the run in a new `<w:t>`.
    pub fn add_text(&self, tree: &mut XmlTree, text: &str) -> Result<()> {
        let t = tree.create_element("w:t")?;
        if text.starts_with(char::is_whitespace) || text.ends_with(char::is_whitespace) {
            tree.set_attr(t, "xml:space", "preserve")?;
        }
        let content = tree.create_text(text);
        tree.append_child(t, content)?;
        tree.append_child(self.r, t)
    }

    /// Text of the run: `w:t` content, with `w:tab` as a tab and `w:br`/`w:cr`
    /// as a line feed.
    pub fn text(&self, tree: &XmlTree) -> String {
        let mut text = String::new();
        for child in tree.child_elements(self.r) {
            if tree.is(child, "w:t") {
                text.extend(tree.children(child).filter_map(|c| tree.text(c)));
            } else if tree.is(child, "w:tab") {
                text.push('\t');
            } else if tree.is(child, "w:br") || tree.is(child, "w:cr") {
                text.push('\n');
            }
        }
        text
    }
}
