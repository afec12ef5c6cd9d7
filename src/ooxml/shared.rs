/// Measurement types shared by the element and proxy layers.
use std::fmt;

/// Resolution Word assumes for images that do not declare one.
pub const DEFAULT_DPI: u32 = 72;

/// A distance in English Metric Units, the integer unit every DrawingML
/// extent and offset is stored in.
///
/// One inch is 914,400 EMU, which divides evenly into centimeters (360,000),
/// millimeters (36,000), points (12,700) and twips (635).
///
/// # Examples
///
/// ```rust
/// use docx_inline::ooxml::Length;
///
/// let width = Length::from_inches(1.5);
/// assert_eq!(width.emu(), 1_371_600);
/// assert_eq!(width.pt(), 108.0);
/// assert_eq!(Length::from_px(300, 150), Length::from_inches(2.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Length(i64);

impl Length {
    pub const EMUS_PER_INCH: i64 = 914_400;
    pub const EMUS_PER_CM: i64 = 360_000;
    pub const EMUS_PER_MM: i64 = 36_000;
    pub const EMUS_PER_PT: i64 = 12_700;
    pub const EMUS_PER_TWIP: i64 = 635;

    #[inline]
    pub const fn new(emu: i64) -> Self {
        Self(emu)
    }

    /// `value` units of `per` EMU each, truncated toward zero.
    #[inline]
    fn scaled(value: f64, per: i64) -> Self {
        Self((value * per as f64) as i64)
    }

    #[inline]
    fn per(self, per: i64) -> f64 {
        self.0 as f64 / per as f64
    }

    #[inline]
    pub fn from_inches(inches: f64) -> Self {
        Self::scaled(inches, Self::EMUS_PER_INCH)
    }

    #[inline]
    pub fn from_cm(cm: f64) -> Self {
        Self::scaled(cm, Self::EMUS_PER_CM)
    }

    #[inline]
    pub fn from_mm(mm: f64) -> Self {
        Self::scaled(mm, Self::EMUS_PER_MM)
    }

    #[inline]
    pub fn from_pt(pt: f64) -> Self {
        Self::scaled(pt, Self::EMUS_PER_PT)
    }

    /// Physical size of `px` pixels printed at `dpi` dots per inch.
    ///
    /// A `dpi` of zero means the image declared no resolution;
    /// [`DEFAULT_DPI`] is used.
    pub fn from_px(px: u32, dpi: u32) -> Self {
        let dpi = match dpi {
            0 => DEFAULT_DPI,
            d => d,
        };
        Self(i64::from(px) * Self::EMUS_PER_INCH / i64::from(dpi))
    }

    /// Raw EMU value, as written to `cx`/`cy` attributes.
    #[inline]
    pub const fn emu(self) -> i64 {
        self.0
    }

    #[inline]
    pub fn inches(self) -> f64 {
        self.per(Self::EMUS_PER_INCH)
    }

    #[inline]
    pub fn cm(self) -> f64 {
        self.per(Self::EMUS_PER_CM)
    }

    #[inline]
    pub fn mm(self) -> f64 {
        self.per(Self::EMUS_PER_MM)
    }

    #[inline]
    pub fn pt(self) -> f64 {
        self.per(Self::EMUS_PER_PT)
    }

    /// Nearest whole number of twips.
    #[inline]
    pub fn twips(self) -> i64 {
        self.per(Self::EMUS_PER_TWIP).round() as i64
    }
}

impl From<i64> for Length {
    #[inline]
    fn from(emu: i64) -> Self {
        Self(emu)
    }
}

impl From<Length> for i64 {
    #[inline]
    fn from(len: Length) -> Self {
        len.0
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}emu", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_round_trips() {
        let cases = [
            (Length::from_inches(1.0), 914_400),
            (Length::from_cm(2.5), 900_000),
            (Length::from_mm(10.0), 360_000),
            (Length::from_pt(72.0), 914_400),
        ];
        for (len, emu) in cases {
            assert_eq!(len.emu(), emu);
        }

        let len = Length::new(914_400);
        assert_eq!(len.inches(), 1.0);
        assert_eq!(len.cm(), 2.54);
        assert_eq!(len.mm(), 25.4);
        assert_eq!(len.pt(), 72.0);
        assert_eq!(len.twips(), 1440);
        assert_eq!(i64::from(len), 914_400);
        assert_eq!(Length::from(12_700), Length::from_pt(1.0));
        assert_eq!(len.to_string(), "914400emu");
    }

    #[test]
    fn test_from_px() {
        assert_eq!(Length::from_px(96, 96).emu(), 914_400);
        assert_eq!(Length::from_px(72, 72).emu(), 914_400);
        assert_eq!(Length::from_px(72, 0).emu(), 914_400);
        assert_eq!(Length::from_px(150, 300).emu(), 457_200);
        assert_eq!(Length::from_px(0, 300), Length::default());
    }
}
