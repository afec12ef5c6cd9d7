//! Namespace URIs and qualified-name helpers for WordprocessingML and DrawingML.
//!
//! Element and attribute names throughout the crate are written in the
//! conventional prefixed form (`"wp:inline"`, `"r:embed"`). The prefixes are
//! resolved against [`NSMAP`], which carries the prefixes Word itself emits.
use phf::phf_map;

/// DrawingML main namespace
pub const DML_MAIN: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
/// DrawingML chart namespace
pub const DML_CHART: &str = "http://schemas.openxmlformats.org/drawingml/2006/chart";
/// DrawingML diagram (SmartArt) namespace
pub const DML_DIAGRAM: &str = "http://schemas.openxmlformats.org/drawingml/2006/diagram";
/// DrawingML picture namespace
pub const DML_PICTURE: &str = "http://schemas.openxmlformats.org/drawingml/2006/picture";
/// DrawingML wordprocessing drawing namespace
pub const DML_WORDPROCESSING_DRAWING: &str =
    "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing";
/// Wordprocessing shape namespace (Office 2010)
pub const WPS: &str = "http://schemas.microsoft.com/office/word/2010/wordprocessingShape";
/// Office relationships namespace
pub const OFC_RELATIONSHIPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
/// Markup compatibility namespace
pub const MC: &str = "http://schemas.openxmlformats.org/markup-compatibility/2006";
/// VML namespace
pub const VML: &str = "urn:schemas-microsoft-com:vml";
/// WordprocessingML main namespace
pub const WML_MAIN: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
/// XML namespace, bound to the `xml` prefix by definition
pub const XML: &str = "http://www.w3.org/XML/1998/namespace";

/// Prefix to namespace URI map.
pub static NSMAP: phf::Map<&'static str, &'static str> = phf_map! {
    "a" => DML_MAIN,
    "c" => DML_CHART,
    "dgm" => DML_DIAGRAM,
    "mc" => MC,
    "pic" => DML_PICTURE,
    "r" => OFC_RELATIONSHIPS,
    "v" => VML,
    "w" => WML_MAIN,
    "wp" => DML_WORDPROCESSING_DRAWING,
    "wps" => WPS,
    "xml" => XML,
};

/// Look up the namespace URI bound to `prefix`.
///
/// ```rust
/// use docx_inline::ooxml::oxml::ns::{nsmap, DML_PICTURE};
///
/// assert_eq!(nsmap("pic"), Some(DML_PICTURE));
/// assert_eq!(nsmap("nope"), None);
/// ```
#[inline]
pub fn nsmap(prefix: &str) -> Option<&'static str> {
    NSMAP.get(prefix).copied()
}

/// Reverse lookup: the conventional prefix for a namespace URI.
pub fn prefix_for(uri: &str) -> Option<&'static str> {
    NSMAP
        .entries()
        .find(|(_, u)| **u == uri)
        .map(|(p, _)| *p)
}

/// A qualified name split into its prefix and local part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QName<'a> {
    pub prefix: Option<&'a str>,
    pub local: &'a str,
}

impl<'a> QName<'a> {
    /// Split `"pfx:local"` (or a bare `"local"`).
    #[inline]
    pub fn parse(name: &'a str) -> Self {
        match name.split_once(':') {
            Some((prefix, local)) => Self {
                prefix: Some(prefix),
                local,
            },
            None => Self {
                prefix: None,
                local: name,
            },
        }
    }

    /// Namespace URI of this name according to [`NSMAP`].
    #[inline]
    pub fn namespace(&self) -> Option<&'static str> {
        self.prefix.and_then(nsmap)
    }
}

/// Clark notation (`{uri}local`) for a prefixed name, the form used in
/// diagnostics. Names with an unknown prefix are returned unchanged.
pub fn qn(name: &str) -> String {
    let q = QName::parse(name);
    match q.namespace() {
        Some(uri) => format!("{{{}}}{}", uri, q.local),
        None => name.to_string(),
    }
}

/// `xmlns:` declarations for the given prefixes, space separated.
pub fn nsdecls(prefixes: &[&str]) -> String {
    prefixes
        .iter()
        .filter_map(|p| nsmap(p).map(|uri| format!("xmlns:{}=\"{}\"", p, uri)))
        .collect::<Vec<_>>()
        .join(" ")
}
