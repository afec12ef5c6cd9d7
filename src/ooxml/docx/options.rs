//! Placement options for inline pictures.
use crate::ooxml::shared::Length;

/// Options for placing a picture in a document.
///
/// # Examples
///
/// ```rust
/// use docx_inline::ooxml::Length;
/// use docx_inline::ooxml::docx::PictureOptions;
///
/// // Native size
/// let options = PictureOptions::default();
///
/// // Two inches wide, height scaled to keep the aspect ratio
/// let options = PictureOptions::new().with_width(Length::from_inches(2.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PictureOptions {
    /// Display width; `None` derives it from the image.
    pub width: Option<Length>,
    /// Display height; `None` derives it from the image.
    pub height: Option<Length>,
}

impl PictureOptions {
    /// Create a new `PictureOptions` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the display width.
    #[inline]
    pub fn with_width(mut self, width: Length) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the display height.
    #[inline]
    pub fn with_height(mut self, height: Length) -> Self {
        self.height = Some(height);
        self
    }

    /// Whether any size was requested.
    #[inline]
    pub fn is_sized(&self) -> bool {
        self.width.is_some() || self.height.is_some()
    }
}
