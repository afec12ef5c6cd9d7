//! Arena-backed XML element tree.
//!
//! Every node of a parsed (or built) document lives in a single node table
//! owned by [`XmlTree`]. Callers address nodes through [`NodeId`] handles,
//! which are plain indices: they are `Copy`, never own anything, and are only
//! meaningful together with the tree that issued them.
//!
//! Names are matched by namespace URI and local name, so `"w:r"` finds a run
//! element whatever prefix the producing application bound to the
//! WordprocessingML namespace.
//!
//! # Example
//!
//! ```rust
//! use docx_inline::ooxml::oxml::XmlTree;
//!
//! let xml = br#"<w:p xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:r/></w:p>"#;
//! let tree = XmlTree::parse(xml)?;
//! let run = tree.first_child(tree.root(), "w:r").unwrap();
//! assert_eq!(tree.tag(run)?, "w:r");
//! # Ok::<(), docx_inline::ooxml::OoxmlError>(())
//! ```
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::oxml::ns::{self, QName};
use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use smallvec::SmallVec;
use std::io::Cursor;

/// Handle to a node in an [`XmlTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in its tree's node table.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// An attribute with its resolved namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    prefix: Option<String>,
    local: String,
    namespace: Option<String>,
    value: String,
}

impl Attribute {
    /// Attribute name as written, e.g. `r:embed`.
    pub fn name(&self) -> String {
        match &self.prefix {
            Some(p) => format!("{}:{}", p, self.local),
            None => self.local.clone(),
        }
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    fn matches(&self, q: &QName<'_>) -> bool {
        if self.local != q.local {
            return false;
        }
        match (q.prefix, q.namespace()) {
            (None, _) => self.namespace.is_none() && self.prefix.is_none(),
            (Some(_), Some(uri)) => self.namespace.as_deref() == Some(uri),
            (Some(p), None) => self.prefix.as_deref() == Some(p),
        }
    }
}

/// An element node: its name, namespace and attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    prefix: Option<String>,
    local: String,
    namespace: Option<String>,
    attributes: Vec<Attribute>,
    /// `xmlns` declarations carried on this element: (prefix, uri); a `None`
    /// prefix is the default namespace.
    declarations: Vec<(Option<String>, String)>,
}

impl Element {
    #[inline]
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    #[inline]
    pub fn local_name(&self) -> &str {
        &self.local
    }

    /// Namespace URI of the element, if it is in one.
    #[inline]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Qualified name as written, e.g. `wp:inline`.
    pub fn tag(&self) -> String {
        match &self.prefix {
            Some(p) => format!("{}:{}", p, self.local),
            None => self.local.clone(),
        }
    }

    #[inline]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Value of the attribute named `name` (`"cx"`, `"r:embed"`).
    pub fn attr(&self, name: &str) -> Option<&str> {
        let q = QName::parse(name);
        self.attributes
            .iter()
            .find(|a| a.matches(&q))
            .map(|a| a.value.as_str())
    }

    /// Whether this element has the qualified name `name`.
    pub fn is(&self, name: &str) -> bool {
        let q = QName::parse(name);
        if self.local != q.local {
            return false;
        }
        match (q.prefix, q.namespace()) {
            (Some(_), Some(uri)) => self.namespace.as_deref() == Some(uri),
            (Some(p), None) => self.prefix.as_deref() == Some(p),
            (None, _) => self.prefix.is_none(),
        }
    }

    fn set_attr(&mut self, name: &str, value: String) -> Result<()> {
        let q = QName::parse(name);
        if let Some(existing) = self.attributes.iter_mut().find(|a| a.matches(&q)) {
            existing.value = value;
            return Ok(());
        }
        let namespace = match q.prefix {
            Some(p) => Some(
                ns::nsmap(p)
                    .ok_or_else(|| OoxmlError::Xml(format!("Unknown namespace prefix: {}", p)))?
                    .to_string(),
            ),
            None => None,
        };
        self.attributes.push(Attribute {
            prefix: q.prefix.map(str::to_string),
            local: q.local.to_string(),
            namespace,
            value,
        });
        Ok(())
    }
}

#[derive(Debug, Clone)]
enum NodeData {
    Element(Element),
    Text(String),
    Comment(String),
}

#[derive(Debug, Clone)]
struct Node {
    data: NodeData,
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 4]>,
}

/// An XML document held as a node table.
#[derive(Debug, Clone)]
pub struct XmlTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl XmlTree {
    /// Create a tree holding a single empty root element.
    pub fn new(root: &str) -> Result<Self> {
        let element = new_element(root)?;
        Ok(Self {
            nodes: vec![Node {
                data: NodeData::Element(element),
                parent: None,
                children: SmallVec::new(),
            }],
            root: NodeId(0),
        })
    }

    /// Parse an XML document.
    ///
    /// Prefixes that are not declared in the document fall back to the
    /// conventional bindings in [`ns::NSMAP`], so fragments copied out of a
    /// larger part still resolve.
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        let mut nodes: Vec<Node> = Vec::new();
        let mut stack: Vec<NodeId> = Vec::new();
        let mut scopes: Vec<Vec<(Option<String>, String)>> = Vec::new();
        let mut root: Option<NodeId> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    let (element, decls) = element_from_start(&e, &scopes)?;
                    let id = push_node(&mut nodes, &stack, NodeData::Element(element), &mut root)?;
                    stack.push(id);
                    scopes.push(decls);
                },
                Ok(Event::Empty(e)) => {
                    let (element, _) = element_from_start(&e, &scopes)?;
                    push_node(&mut nodes, &stack, NodeData::Element(element), &mut root)?;
                },
                Ok(Event::End(_)) => {
                    stack.pop();
                    scopes.pop();
                },
                Ok(Event::Text(e)) => {
                    if stack.is_empty() {
                        continue;
                    }
                    let text =
                        std::str::from_utf8(e.as_ref()).map_err(|e| OoxmlError::Xml(e.to_string()))?;
                    push_text(&mut nodes, &stack, text);
                },
                Ok(Event::CData(e)) => {
                    if stack.is_empty() {
                        continue;
                    }
                    let text =
                        std::str::from_utf8(e.as_ref()).map_err(|e| OoxmlError::Xml(e.to_string()))?;
                    push_text(&mut nodes, &stack, text);
                },
                Ok(Event::GeneralRef(e)) => {
                    if stack.is_empty() {
                        continue;
                    }
                    let name =
                        std::str::from_utf8(e.as_ref()).map_err(|e| OoxmlError::Xml(e.to_string()))?;
                    let resolved = resolve_entity(name).ok_or_else(|| {
                        OoxmlError::Xml(format!("Unknown entity reference: &{};", name))
                    })?;
                    push_text(&mut nodes, &stack, &resolved);
                },
                Ok(Event::Comment(e)) => {
                    if stack.is_empty() {
                        continue;
                    }
                    let text =
                        std::str::from_utf8(e.as_ref()).map_err(|e| OoxmlError::Xml(e.to_string()))?;
                    push_node(&mut nodes, &stack, NodeData::Comment(text.to_string()), &mut root)?;
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e.to_string())),
                _ => {},
            }
        }

        let root = root.ok_or_else(|| OoxmlError::Xml("Document has no root element".to_string()))?;
        log::trace!("parsed XML tree: {} bytes, {} nodes", xml.len(), nodes.len());
        Ok(Self { nodes, root })
    }

    /// The document element.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes in the table, detached ones included.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id.0).ok_or(OoxmlError::InvalidNode(id.0))
    }

    /// The element behind `id`.
    pub fn element(&self, id: NodeId) -> Result<&Element> {
        match &self.node(id)?.data {
            NodeData::Element(e) => Ok(e),
            _ => Err(OoxmlError::InvalidNode(id.0)),
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut Element> {
        match self.nodes.get_mut(id.0).map(|n| &mut n.data) {
            Some(NodeData::Element(e)) => Ok(e),
            _ => Err(OoxmlError::InvalidNode(id.0)),
        }
    }

    /// Qualified name of the element behind `id`.
    pub fn tag(&self, id: NodeId) -> Result<String> {
        Ok(self.element(id)?.tag())
    }

    /// Namespace URI of the element behind `id`.
    pub fn namespace_uri(&self, id: NodeId) -> Result<Option<&str>> {
        Ok(self.element(id)?.namespace())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|n| n.parent)
    }

    /// Text content of a text node; `None` for elements and comments.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.nodes.get(id.0).map(|n| &n.data) {
            Some(NodeData::Text(t)) => Some(t),
            _ => None,
        }
    }

    /// All child nodes of `id`, in document order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .get(id.0)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
            .iter()
            .copied()
    }

    /// Element children of `id`, in document order.
    pub fn child_elements(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .filter(|c| matches!(self.nodes[c.0].data, NodeData::Element(_)))
    }

    /// First child element of `id` named `name`.
    pub fn first_child(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.child_elements(id).find(|c| self.is(*c, name))
    }

    /// First child element of `id` named `name`, or a
    /// [`OoxmlError::MissingElement`] naming both ends.
    pub fn require_child(&self, id: NodeId, name: &str) -> Result<NodeId> {
        match self.first_child(id, name) {
            Some(c) => Ok(c),
            None => Err(OoxmlError::MissingElement {
                parent: self.tag(id)?,
                child: name.to_string(),
            }),
        }
    }

    /// Follow a chain of child names, e.g. `["a:graphic", "a:graphicData"]`.
    pub fn require_path(&self, id: NodeId, path: &[&str]) -> Result<NodeId> {
        path.iter().try_fold(id, |node, name| self.require_child(node, name))
    }

    /// All descendant elements of `id` (not `id` itself), in document order.
    pub fn descendant_elements(&self, id: NodeId) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut pending: Vec<NodeId> = self.child_elements(id).collect();
        pending.reverse();
        while let Some(node) = pending.pop() {
            found.push(node);
            let start = pending.len();
            pending.extend(self.child_elements(node));
            pending[start..].reverse();
        }
        found
    }

    /// Descendant elements of `id` named `name`, in document order.
    pub fn descendants(&self, id: NodeId, name: &str) -> Vec<NodeId> {
        self.descendant_elements(id)
            .into_iter()
            .filter(|node| self.is(*node, name))
            .collect()
    }

    /// Whether `id` is an element named `name`.
    pub fn is(&self, id: NodeId, name: &str) -> bool {
        self.element(id).map(|e| e.is(name)).unwrap_or(false)
    }

    /// Attribute value, `None` when the attribute is absent.
    pub fn attr(&self, id: NodeId, name: &str) -> Result<Option<&str>> {
        Ok(self.element(id)?.attr(name))
    }

    /// Attribute value, or a [`OoxmlError::MissingAttribute`].
    pub fn require_attr(&self, id: NodeId, name: &str) -> Result<&str> {
        let element = self.element(id)?;
        element.attr(name).ok_or_else(|| OoxmlError::MissingAttribute {
            element: element.tag(),
            attr: name.to_string(),
        })
    }

    /// Attribute value parsed as an integer.
    pub fn attr_i64(&self, id: NodeId, name: &str) -> Result<i64> {
        let value = self.require_attr(id, name)?;
        value.trim().parse().map_err(|_| OoxmlError::InvalidAttribute {
            attr: name.to_string(),
            value: value.to_string(),
        })
    }

    /// Set (or replace) an attribute.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: impl Into<String>) -> Result<()> {
        self.element_mut(id)?.set_attr(name, value.into())
    }

    /// Create a detached element named `name`.
    ///
    /// The prefix must be one of [`ns::NSMAP`]. The element joins the
    /// document once it is passed to [`XmlTree::append_child`].
    pub fn create_element(&mut self, name: &str) -> Result<NodeId> {
        let element = new_element(name)?;
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            data: NodeData::Element(element),
            parent: None,
            children: SmallVec::new(),
        });
        Ok(id)
    }

    /// Create a detached element and set its attributes in one go.
    pub fn create_element_with(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<NodeId> {
        let id = self.create_element(name)?;
        for (key, value) in attrs {
            self.set_attr(id, key, *value)?;
        }
        Ok(id)
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            data: NodeData::Text(text.into()),
            parent: None,
            children: SmallVec::new(),
        });
        id
    }

    /// Append the detached node `child` as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.element(parent)?;
        let node = self.node(child)?;
        if node.parent.is_some() || child == self.root || child == parent {
            return Err(OoxmlError::Other(format!(
                "Node {} is already attached to the tree",
                child.0
            )));
        }
        // walking up from parent must not meet child, or we'd build a cycle
        let mut cursor = self.parent(parent);
        while let Some(p) = cursor {
            if p == child {
                return Err(OoxmlError::Other(format!(
                    "Node {} is an ancestor of node {}",
                    child.0, parent.0
                )));
            }
            cursor = self.parent(p);
        }
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        Ok(())
    }

    /// Insert the detached node `child` into `parent` just before its child
    /// `reference`.
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: NodeId) -> Result<()> {
        let position = self
            .node(parent)?
            .children
            .iter()
            .position(|c| *c == reference)
            .ok_or_else(|| {
                OoxmlError::Other(format!(
                    "Node {} is not a child of node {}",
                    reference.0, parent.0
                ))
            })?;
        self.append_child(parent, child)?;
        let children = &mut self.nodes[parent.0].children;
        let appended = children.pop().unwrap_or(child);
        children.insert(position, appended);
        Ok(())
    }

    /// Serialize the tree, with an XML declaration, to a string.
    ///
    /// Any prefix used by an element or attribute that is not declared in
    /// scope gets an `xmlns` declaration on the element where it first
    /// appears, so nodes built with [`XmlTree::create_element`] serialize to
    /// well-formed XML.
    pub fn to_xml(&self) -> Result<String> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
            .map_err(|e| OoxmlError::Xml(format!("Failed to write XML declaration: {}", e)))?;

        let mut scopes: Vec<Vec<(Option<String>, String)>> = Vec::new();
        self.write_node(&mut writer, self.root, &mut scopes)?;

        let result = writer.into_inner().into_inner();
        log::trace!("serialized XML tree: {} bytes", result.len());
        String::from_utf8(result)
            .map_err(|e| OoxmlError::Xml(format!("Invalid UTF-8 in generated XML: {}", e)))
    }

    /// Serialize the subtree rooted at `id` without an XML declaration.
    pub fn subtree_to_xml(&self, id: NodeId) -> Result<String> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        let mut scopes = Vec::new();
        self.write_node(&mut writer, id, &mut scopes)?;
        String::from_utf8(writer.into_inner().into_inner())
            .map_err(|e| OoxmlError::Xml(format!("Invalid UTF-8 in generated XML: {}", e)))
    }

    fn write_node(
        &self,
        writer: &mut Writer<Cursor<Vec<u8>>>,
        id: NodeId,
        scopes: &mut Vec<Vec<(Option<String>, String)>>,
    ) -> Result<()> {
        let node = self.node(id)?;
        let element = match &node.data {
            NodeData::Text(text) => {
                return writer
                    .write_event(Event::Text(BytesText::new(text)))
                    .map_err(|e| OoxmlError::Xml(format!("Failed to write text: {}", e)));
            },
            NodeData::Comment(text) => {
                return writer
                    .write_event(Event::Comment(BytesText::from_escaped(text.as_str())))
                    .map_err(|e| OoxmlError::Xml(format!("Failed to write comment: {}", e)));
            },
            NodeData::Element(element) => element,
        };

        let mut decls = element.declarations.clone();
        let bind = |prefix: Option<&str>, uri: Option<&str>, decls: &mut Vec<(Option<String>, String)>| {
            let (Some(prefix), Some(uri)) = (prefix, uri) else {
                return;
            };
            if prefix == "xml" {
                return;
            }
            let bound = decls
                .iter()
                .chain(scopes.iter().rev().flatten())
                .find(|(p, _)| p.as_deref() == Some(prefix))
                .map(|(_, u)| u.as_str());
            if bound != Some(uri) {
                decls.push((Some(prefix.to_string()), uri.to_string()));
            }
        };
        bind(element.prefix(), element.namespace(), &mut decls);
        for attr in &element.attributes {
            bind(attr.prefix.as_deref(), attr.namespace.as_deref(), &mut decls);
        }

        let tag = element.tag();
        let mut start = BytesStart::new(tag.as_str());
        for (prefix, uri) in &decls {
            match prefix {
                Some(p) => start.push_attribute((format!("xmlns:{}", p).as_str(), uri.as_str())),
                None => start.push_attribute(("xmlns", uri.as_str())),
            }
        }
        for attr in &element.attributes {
            start.push_attribute((attr.name().as_str(), attr.value.as_str()));
        }

        if node.children.is_empty() {
            return writer
                .write_event(Event::Empty(start))
                .map_err(|e| OoxmlError::Xml(format!("Failed to write <{}>: {}", tag, e)));
        }

        writer
            .write_event(Event::Start(start))
            .map_err(|e| OoxmlError::Xml(format!("Failed to write <{}>: {}", tag, e)))?;
        scopes.push(decls);
        for child in node.children.iter() {
            self.write_node(writer, *child, scopes)?;
        }
        scopes.pop();
        writer
            .write_event(Event::End(BytesEnd::new(tag.as_str())))
            .map_err(|e| OoxmlError::Xml(format!("Failed to close <{}>: {}", tag, e)))
    }
}

fn new_element(name: &str) -> Result<Element> {
    let q = QName::parse(name);
    let namespace = match q.prefix {
        Some(p) => Some(
            ns::nsmap(p)
                .ok_or_else(|| OoxmlError::Xml(format!("Unknown namespace prefix: {}", p)))?
                .to_string(),
        ),
        None => None,
    };
    Ok(Element {
        prefix: q.prefix.map(str::to_string),
        local: q.local.to_string(),
        namespace,
        attributes: Vec::new(),
        declarations: Vec::new(),
    })
}

/// Resolve `prefix` against the declaration scopes, innermost first, then
/// against the well-known prefixes.
fn lookup(
    prefix: Option<&str>,
    local_decls: &[(Option<String>, String)],
    scopes: &[Vec<(Option<String>, String)>],
) -> Option<String> {
    let declared = local_decls
        .iter()
        .chain(scopes.iter().rev().flatten())
        .find(|(p, _)| p.as_deref() == prefix)
        .map(|(_, uri)| uri.clone());
    declared.or_else(|| prefix.and_then(ns::nsmap).map(str::to_string))
}

fn element_from_start(
    e: &BytesStart<'_>,
    scopes: &[Vec<(Option<String>, String)>],
) -> Result<(Element, Vec<(Option<String>, String)>)> {
    let mut declarations = Vec::new();
    let mut raw_attrs = Vec::new();

    for attr in e.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|e| OoxmlError::Xml(e.to_string()))?
            .to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| OoxmlError::Xml(e.to_string()))?
            .to_string();
        if key == "xmlns" {
            declarations.push((None, value));
        } else if let Some(prefix) = key.strip_prefix("xmlns:") {
            declarations.push((Some(prefix.to_string()), value));
        } else {
            raw_attrs.push((key, value));
        }
    }

    let name = std::str::from_utf8(e.name().as_ref())
        .map_err(|e| OoxmlError::Xml(e.to_string()))?
        .to_string();
    let q = QName::parse(&name);
    let namespace = lookup(q.prefix, &declarations, scopes);

    let attributes = raw_attrs
        .into_iter()
        .map(|(key, value)| {
            let q = QName::parse(&key);
            // unprefixed attributes are in no namespace
            let namespace = q.prefix.and_then(|p| lookup(Some(p), &declarations, scopes));
            Attribute {
                prefix: q.prefix.map(str::to_string),
                local: q.local.to_string(),
                namespace,
                value,
            }
        })
        .collect();

    let element = Element {
        prefix: q.prefix.map(str::to_string),
        local: q.local.to_string(),
        namespace,
        attributes,
        declarations: declarations.clone(),
    };
    Ok((element, declarations))
}

fn push_node(
    nodes: &mut Vec<Node>,
    stack: &[NodeId],
    data: NodeData,
    root: &mut Option<NodeId>,
) -> Result<NodeId> {
    let id = NodeId(nodes.len());
    let parent = stack.last().copied();
    if parent.is_none() {
        if !matches!(data, NodeData::Element(_)) {
            return Err(OoxmlError::Xml("Content outside the root element".to_string()));
        }
        if root.is_some() {
            return Err(OoxmlError::Xml("Document has more than one root element".to_string()));
        }
        *root = Some(id);
    }
    nodes.push(Node {
        data,
        parent,
        children: SmallVec::new(),
    });
    if let Some(parent) = parent {
        nodes[parent.0].children.push(id);
    }
    Ok(id)
}

/// Append text under the current element, merging with a preceding text node
/// so that entity references do not fragment the content.
fn push_text(nodes: &mut Vec<Node>, stack: &[NodeId], text: &str) {
    let Some(&parent) = stack.last() else {
        return;
    };
    if let Some(&last) = nodes[parent.0].children.last()
        && let NodeData::Text(existing) = &mut nodes[last.0].data
    {
        existing.push_str(text);
        return;
    }
    let id = NodeId(nodes.len());
    nodes.push(Node {
        data: NodeData::Text(text.to_string()),
        parent: Some(parent),
        children: SmallVec::new(),
    });
    nodes[parent.0].children.push(id);
}

fn resolve_entity(name: &str) -> Option<String> {
    if let Some(code) = name.strip_prefix('#') {
        let value = match code.strip_prefix('x').or_else(|| code.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => code.parse().ok()?,
        };
        return char::from_u32(value).map(String::from);
    }
    let resolved = match name {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        _ => return None,
    };
    Some(resolved.to_string())
}
