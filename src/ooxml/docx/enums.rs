/// Enumerations for Word document elements.
///
/// This module provides enumerations used throughout the Word document API,
/// matching those found in the VBA API and python-docx.
use std::fmt;

/// Specifies the kind of graphical object held by an inline shape.
///
/// Corresponds to the VBA `WdInlineShapeType` enumeration; the discriminants
/// are the VBA values.
///
/// # Examples
///
/// ```rust
/// use docx_inline::ooxml::docx::enums::WdInlineShape;
///
/// assert_eq!(WdInlineShape::Picture.value(), 3);
/// assert_eq!(WdInlineShape::from_value(12), Some(WdInlineShape::Chart));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum WdInlineShape {
    /// Inline chart.
    Chart = 12,
    /// Linked picture: the image lives outside the package.
    LinkedPicture = 4,
    /// Embedded picture.
    Picture = 3,
    /// SmartArt diagram.
    SmartArt = 15,
    /// A graphical object of a kind this library does not model.
    NotImplemented = -6,
}

impl WdInlineShape {
    /// The VBA enumeration value.
    #[inline]
    pub const fn value(self) -> i8 {
        self as i8
    }

    /// Look up a member by its VBA value.
    ///
    /// Returns `None` if the value is not recognized.
    #[inline]
    pub fn from_value(value: i8) -> Option<Self> {
        match value {
            12 => Some(Self::Chart),
            4 => Some(Self::LinkedPicture),
            3 => Some(Self::Picture),
            15 => Some(Self::SmartArt),
            -6 => Some(Self::NotImplemented),
            _ => None,
        }
    }

    /// Whether the shape is a picture, linked or embedded.
    #[inline]
    pub const fn is_picture(self) -> bool {
        matches!(self, Self::Picture | Self::LinkedPicture)
    }
}

impl fmt::Display for WdInlineShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chart => write!(f, "CHART"),
            Self::LinkedPicture => write!(f, "LINKED_PICTURE"),
            Self::Picture => write!(f, "PICTURE"),
            Self::SmartArt => write!(f, "SMART_ART"),
            Self::NotImplemented => write!(f, "NOT_IMPLEMENTED"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_shape_values_round_trip() {
        for member in [
            WdInlineShape::Chart,
            WdInlineShape::LinkedPicture,
            WdInlineShape::Picture,
            WdInlineShape::SmartArt,
            WdInlineShape::NotImplemented,
        ] {
            assert_eq!(WdInlineShape::from_value(member.value()), Some(member));
        }
        assert_eq!(WdInlineShape::from_value(0), None);
    }

    #[test]
    fn test_inline_shape_display() {
        assert_eq!(WdInlineShape::LinkedPicture.to_string(), "LINKED_PICTURE");
        assert_eq!(WdInlineShape::NotImplemented.to_string(), "NOT_IMPLEMENTED");
        assert!(WdInlineShape::LinkedPicture.is_picture());
        assert!(!WdInlineShape::SmartArt.is_picture());
    }
}
