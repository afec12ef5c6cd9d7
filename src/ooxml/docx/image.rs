//! Image resources that can be placed in a document as inline pictures.
//!
//! An image resource knows what the picture factory needs: the file
//! name recorded on the picture, and its native display size. The native
//! size comes from the pixel dimensions and the resolution stored with the
//! image, so a 300 DPI scan is placed at its physical size rather than at
//! one pixel per point.
//!
//! Pixel dimensions come from the `image` crate's decoders. Resolution is
//! metadata those decoders do not report, so it is read here from the
//! container: PNG `pHYs`, JPEG JFIF density or Exif tags, the BMP info
//! header and TIFF resolution tags.
//!
//! # Example
//!
//! ```rust,no_run
//! use docx_inline::ooxml::docx::{ImagePart, ImageResource};
//!
//! let image = ImagePart::open("logo.png")?;
//! println!("{} is {} x {}", image.filename(), image.default_cx(), image.default_cy());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
use crate::ooxml::docx::format::ImageFormat;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::shared::{DEFAULT_DPI, Length};
use std::io::Cursor;
use std::path::Path;

/// Something that can be placed as an inline picture.
pub trait ImageResource {
    /// Native width of the image.
    fn default_cx(&self) -> Length;

    /// Native height of the image.
    fn default_cy(&self) -> Length;

    /// File name recorded on the picture element.
    fn filename(&self) -> &str;

    /// Display size for a requested `width` and/or `height`.
    ///
    /// With neither given the native size is used. With only one given, the
    /// other is scaled so the aspect ratio is kept.
    fn scaled_dimensions(&self, width: Option<Length>, height: Option<Length>) -> (Length, Length) {
        let (cx, cy) = (self.default_cx().emu(), self.default_cy().emu());
        match (width, height) {
            (None, None) => (Length::new(cx), Length::new(cy)),
            (Some(w), Some(h)) => (w, h),
            (Some(w), None) if cx != 0 => {
                (w, Length::new((cy as f64 * w.emu() as f64 / cx as f64).round() as i64))
            },
            (None, Some(h)) if cy != 0 => {
                (Length::new((cx as f64 * h.emu() as f64 / cy as f64).round() as i64), h)
            },
            (Some(w), None) => (w, Length::new(cy)),
            (None, Some(h)) => (Length::new(cx), h),
        }
    }
}

/// Pixel size and resolution of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HeaderInfo {
    px_width: u32,
    px_height: u32,
    horz_dpi: u32,
    vert_dpi: u32,
}

impl HeaderInfo {
    fn new(px_width: u32, px_height: u32, horz_dpi: u32, vert_dpi: u32) -> Self {
        let dpi = |d: u32| if d == 0 { DEFAULT_DPI } else { d };
        Self {
            px_width,
            px_height,
            horz_dpi: dpi(horz_dpi),
            vert_dpi: dpi(vert_dpi),
        }
    }
}

/// An image held in memory, ready to be related to a document part.
#[derive(Debug, Clone)]
pub struct ImagePart {
    blob: Vec<u8>,
    filename: String,
    format: Option<ImageFormat>,
    content_type: &'static str,
    info: HeaderInfo,
}

impl ImagePart {
    /// Load an image from raw bytes.
    ///
    /// Any format the `image` crate can decode is accepted. When `filename`
    /// is `None` the name defaults to `image.<ext>`.
    pub fn from_bytes(blob: Vec<u8>, filename: Option<&str>) -> Result<Self> {
        let reader = image::ImageReader::new(Cursor::new(blob.as_slice())).with_guessed_format()?;
        let decoded_as = reader.format();
        let (px_width, px_height) = reader
            .into_dimensions()
            .map_err(|e| OoxmlError::InvalidFormat(format!("Cannot read image dimensions: {}", e)))?;

        let format = ImageFormat::detect_from_bytes(&blob);
        let (horz, vert) = format.and_then(|f| read_dpi(f, &blob)).unwrap_or_default();
        if horz == 0 || vert == 0 {
            log::debug!("image declares no resolution, assuming {} dpi", DEFAULT_DPI);
        }
        let info = HeaderInfo::new(px_width, px_height, horz, vert);

        let extension = format
            .map(|f| f.extension())
            .or_else(|| decoded_as.and_then(|f| f.extensions_str().first().copied()))
            .unwrap_or("bin");
        let content_type = format
            .map(|f| f.mime_type())
            .or_else(|| decoded_as.map(|f| f.to_mime_type()))
            .unwrap_or("application/octet-stream");
        let filename = match filename {
            Some(name) => name.to_string(),
            None => format!("image.{}", extension),
        };
        log::debug!(
            "loaded image {}: {}x{} px at {}x{} dpi",
            filename,
            info.px_width,
            info.px_height,
            info.horz_dpi,
            info.vert_dpi
        );
        Ok(Self {
            blob,
            filename,
            format,
            content_type,
            info,
        })
    }

    /// Load an image file; the file name becomes the picture name.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let blob = std::fs::read(path)?;
        let filename = path.file_name().and_then(|n| n.to_str());
        Self::from_bytes(blob, filename)
    }

    #[inline]
    pub fn blob(&self) -> &[u8] {
        &self.blob
    }

    /// Detected container format, `None` for formats only the `image` crate
    /// knows about (WebP, for one).
    #[inline]
    pub fn format(&self) -> Option<ImageFormat> {
        self.format
    }

    /// MIME type of the image part.
    #[inline]
    pub fn content_type(&self) -> &'static str {
        self.content_type
    }

    #[inline]
    pub fn px_width(&self) -> u32 {
        self.info.px_width
    }

    #[inline]
    pub fn px_height(&self) -> u32 {
        self.info.px_height
    }

    /// Horizontal resolution in dots per inch.
    #[inline]
    pub fn horz_dpi(&self) -> u32 {
        self.info.horz_dpi
    }

    /// Vertical resolution in dots per inch.
    #[inline]
    pub fn vert_dpi(&self) -> u32 {
        self.info.vert_dpi
    }
}

impl ImageResource for ImagePart {
    fn default_cx(&self) -> Length {
        Length::from_px(self.info.px_width, self.info.horz_dpi)
    }

    fn default_cy(&self) -> Length {
        Length::from_px(self.info.px_height, self.info.vert_dpi)
    }

    fn filename(&self) -> &str {
        &self.filename
    }
}

/// Declared (horizontal, vertical) resolution in dots per inch; zero where
/// the image states none.
fn read_dpi(format: ImageFormat, data: &[u8]) -> Option<(u32, u32)> {
    match format {
        ImageFormat::Png => png_dpi(data),
        ImageFormat::Jpeg => jpeg_dpi(data),
        ImageFormat::Bmp => bmp_dpi(data),
        ImageFormat::Tiff => tiff_dpi(data),
        ImageFormat::Gif | ImageFormat::Emf | ImageFormat::Wmf => None,
    }
}

#[inline]
fn be_u16(data: &[u8], at: usize) -> Option<u16> {
    data.get(at..at + 2).map(|b| u16::from_be_bytes([b[0], b[1]]))
}

#[inline]
fn be_u32(data: &[u8], at: usize) -> Option<u32> {
    data.get(at..at + 4)
        .map(|b| u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
}

#[inline]
fn le_i32(data: &[u8], at: usize) -> Option<i32> {
    data.get(at..at + 4)
        .map(|b| i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
}

/// Dots per metre to dots per inch.
#[inline]
fn dpm_to_dpi(dpm: f64) -> u32 {
    (dpm * 0.0254).round() as u32
}

#[inline]
fn dpcm_to_dpi(dpcm: f64) -> u32 {
    (dpcm * 2.54).round() as u32
}

fn png_dpi(data: &[u8]) -> Option<(u32, u32)> {
    let mut pos = 8;
    while let (Some(len), Some(kind)) = (be_u32(data, pos), data.get(pos + 4..pos + 8)) {
        let body = pos + 8;
        match kind {
            // unit 1 is metres; unit 0 only gives an aspect ratio
            b"pHYs" if data.get(body + 8) == Some(&1) => {
                let x = dpm_to_dpi(be_u32(data, body)? as f64);
                let y = dpm_to_dpi(be_u32(data, body + 4)? as f64);
                return Some((x, y));
            },
            b"pHYs" | b"IDAT" | b"IEND" => return None,
            _ => {},
        }
        pos = body.checked_add(len as usize)?.checked_add(4)?;
    }
    None
}

/// JFIF density when it is given in real units, otherwise the Exif
/// resolution tags.
fn jpeg_dpi(data: &[u8]) -> Option<(u32, u32)> {
    let mut exif = None;
    let mut pos = 2;
    while data.get(pos) == Some(&0xFF) {
        let mut marker = *data.get(pos + 1)?;
        while marker == 0xFF {
            pos += 1;
            marker = *data.get(pos + 1)?;
        }
        pos += 2;
        // standalone markers carry no length
        if matches!(marker, 0x01 | 0xD0..=0xD9) {
            continue;
        }
        // start of scan: no metadata segments follow
        if marker == 0xDA {
            break;
        }
        let len = be_u16(data, pos)? as usize;
        let segment = data.get(pos + 2..pos + len)?;
        match marker {
            0xE0 if segment.starts_with(b"JFIF\0") => {
                let (x, y) = (be_u16(segment, 8)? as f64, be_u16(segment, 10)? as f64);
                match segment.get(7)? {
                    1 => return Some((x as u32, y as u32)),
                    2 => return Some((dpcm_to_dpi(x), dpcm_to_dpi(y))),
                    _ => {},
                }
            },
            0xE1 if exif.is_none() && segment.starts_with(b"Exif\0\0") => {
                exif = tiff_dpi(&segment[6..]);
            },
            _ => {},
        }
        pos += len;
    }
    exif
}

fn bmp_dpi(data: &[u8]) -> Option<(u32, u32)> {
    // the OS/2 core header (12 bytes) has no resolution fields
    if le_i32(data, 14)? < 40 {
        return None;
    }
    let dpi = |at: usize| le_i32(data, at).map(|d| dpm_to_dpi(d.max(0) as f64));
    Some((dpi(38)?, dpi(42)?))
}

/// XResolution / YResolution / ResolutionUnit from the first IFD of a TIFF
/// structure, which is also the layout of an Exif block.
fn tiff_dpi(data: &[u8]) -> Option<(u32, u32)> {
    let little = match data.get(0..2)? {
        b"II" => true,
        b"MM" => false,
        _ => return None,
    };
    let u16_at = |at: usize| {
        data.get(at..at + 2).map(|b| {
            if little {
                u16::from_le_bytes([b[0], b[1]])
            } else {
                u16::from_be_bytes([b[0], b[1]])
            }
        })
    };
    let u32_at = |at: usize| {
        data.get(at..at + 4).map(|b| {
            let b = [b[0], b[1], b[2], b[3]];
            if little {
                u32::from_le_bytes(b)
            } else {
                u32::from_be_bytes(b)
            }
        })
    };
    let rational = |offset: u32| -> Option<f64> {
        let at = offset as usize;
        let (num, den) = (u32_at(at)?, u32_at(at + 4)?);
        (den != 0).then(|| num as f64 / den as f64)
    };

    let ifd = u32_at(4)? as usize;
    let count = u16_at(ifd)? as usize;
    let (mut x_res, mut y_res) = (None, None);
    // inches unless stated otherwise
    let mut unit = 2;

    for i in 0..count {
        let entry = ifd + 2 + i * 12;
        match u16_at(entry)? {
            282 => x_res = rational(u32_at(entry + 8)?),
            283 => y_res = rational(u32_at(entry + 8)?),
            // SHORT values sit left-justified in the value slot
            296 => unit = u16_at(entry + 8)?,
            _ => {},
        }
    }

    let to_dpi = |res: Option<f64>| match (res, unit) {
        (Some(r), 2) => r.round() as u32,
        (Some(r), 3) => dpcm_to_dpi(r),
        _ => 0,
    };
    Some((to_dpi(x_res), to_dpi(y_res)))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::codecs::jpeg::{JpegEncoder, PixelDensity, PixelDensityUnit};
    use image::{DynamicImage, RgbImage, RgbaImage};

    fn encode(img: impl Into<DynamicImage>, format: image::ImageFormat) -> Vec<u8> {
        let mut data = Vec::new();
        img.into()
            .write_to(&mut Cursor::new(&mut data), format)
            .unwrap();
        data
    }

    /// A `w` x `h` PNG, with a pHYs chunk when `dpm` (dots per metre) is
    /// given.
    pub(crate) fn png_bytes(w: u32, h: u32, dpm: Option<u32>) -> Vec<u8> {
        let mut data = encode(RgbaImage::new(w, h), image::ImageFormat::Png);
        if let Some(dpm) = dpm {
            let mut chunk = b"pHYs".to_vec();
            chunk.extend_from_slice(&dpm.to_be_bytes());
            chunk.extend_from_slice(&dpm.to_be_bytes());
            chunk.push(1);
            let mut phys = 9u32.to_be_bytes().to_vec();
            phys.extend_from_slice(&chunk);
            phys.extend_from_slice(&crc32fast::hash(&chunk).to_be_bytes());
            // right after IHDR: signature (8) + IHDR chunk (25)
            data.splice(33..33, phys);
        }
        data
    }

    fn jpeg_bytes(w: u32, h: u32, density: Option<PixelDensity>) -> Vec<u8> {
        let mut data = Vec::new();
        let mut encoder = JpegEncoder::new_with_quality(&mut data, 75);
        if let Some(density) = density {
            encoder.set_pixel_density(density);
        }
        encoder.encode_image(&RgbImage::new(w, h)).unwrap();
        data
    }

    /// A big-endian Exif block carrying `dpi` as X/YResolution in inches.
    fn exif_block(dpi: u32) -> Vec<u8> {
        let mut tiff = b"MM\x00\x2A".to_vec();
        tiff.extend_from_slice(&8u32.to_be_bytes());
        tiff.extend_from_slice(&3u16.to_be_bytes());
        let mut entry = |tag: u16, ty: u16, value: u32| {
            tiff.extend_from_slice(&tag.to_be_bytes());
            tiff.extend_from_slice(&ty.to_be_bytes());
            tiff.extend_from_slice(&1u32.to_be_bytes());
            tiff.extend_from_slice(&value.to_be_bytes());
        };
        // rationals after the IFD: 8 + 2 + 3 * 12 + 4 = 50
        entry(282, 5, 50);
        entry(283, 5, 58);
        entry(296, 3, 2 << 16);
        tiff.extend_from_slice(&0u32.to_be_bytes());
        for _ in 0..2 {
            tiff.extend_from_slice(&dpi.to_be_bytes());
            tiff.extend_from_slice(&1u32.to_be_bytes());
        }

        let mut block = b"Exif\0\0".to_vec();
        block.extend(tiff);
        block
    }

    #[test]
    fn test_png_without_phys_uses_72_dpi() {
        let image = ImagePart::from_bytes(png_bytes(144, 72, None), Some("chart.png")).unwrap();
        assert_eq!(image.px_width(), 144);
        assert_eq!(image.px_height(), 72);
        assert_eq!(image.horz_dpi(), 72);
        assert_eq!(image.default_cx().emu(), 2 * 914400);
        assert_eq!(image.default_cy().emu(), 914400);
        assert_eq!(image.filename(), "chart.png");
        assert_eq!(image.format(), Some(ImageFormat::Png));
        assert_eq!(image.content_type(), "image/png");
    }

    #[test]
    fn test_png_phys_resolution() {
        // 3780 dots per metre is 96 dpi
        let image = ImagePart::from_bytes(png_bytes(96, 192, Some(3780)), None).unwrap();
        assert_eq!(image.horz_dpi(), 96);
        assert_eq!(image.vert_dpi(), 96);
        assert_eq!(image.default_cx().emu(), 914400);
        assert_eq!(image.default_cy().emu(), 2 * 914400);
        assert_eq!(image.filename(), "image.png");
    }

    #[test]
    fn test_jpeg_jfif_density() {
        let data = jpeg_bytes(600, 300, Some(PixelDensity::dpi(300)));
        let image = ImagePart::from_bytes(data, Some("scan.jpg")).unwrap();
        assert_eq!((image.px_width(), image.px_height()), (600, 300));
        assert_eq!(image.horz_dpi(), 300);
        assert_eq!(image.default_cx().emu(), 2 * 914400);
        assert_eq!(image.default_cy().emu(), 914400);

        let per_cm = PixelDensity {
            density: (118, 118),
            unit: PixelDensityUnit::Centimeters,
        };
        let image = ImagePart::from_bytes(jpeg_bytes(30, 30, Some(per_cm)), None).unwrap();
        assert_eq!(image.horz_dpi(), 300);
        assert_eq!(image.filename(), "image.jpeg");
    }

    #[test]
    fn test_jpeg_exif_resolution() {
        // the encoder writes an aspect-ratio-only JFIF header by default
        let mut data = jpeg_bytes(300, 150, None);
        let app0_end = 4 + be_u16(&data, 4).unwrap() as usize;
        let block = exif_block(150);
        let mut app1 = vec![0xFF, 0xE1];
        app1.extend_from_slice(&(block.len() as u16 + 2).to_be_bytes());
        app1.extend(block);
        data.splice(app0_end..app0_end, app1);

        let image = ImagePart::from_bytes(data, None).unwrap();
        assert_eq!((image.px_width(), image.px_height()), (300, 150));
        assert_eq!((image.horz_dpi(), image.vert_dpi()), (150, 150));
        assert_eq!(image.default_cx().emu(), 2 * 914400);

        // without Exif the same image falls back to 72 dpi
        let image = ImagePart::from_bytes(jpeg_bytes(300, 150, None), None).unwrap();
        assert_eq!(image.horz_dpi(), 72);
    }

    #[test]
    fn test_gif_and_bmp() {
        let gif = encode(RgbaImage::new(36, 18), image::ImageFormat::Gif);
        let image = ImagePart::from_bytes(gif, None).unwrap();
        assert_eq!(image.default_cx().emu(), 914400 / 2);
        assert_eq!(image.default_cy().emu(), 914400 / 4);
        assert_eq!(image.content_type(), "image/gif");

        let mut bmp = encode(RgbImage::new(192, 96), image::ImageFormat::Bmp);
        bmp[38..42].copy_from_slice(&3780i32.to_le_bytes());
        bmp[42..46].copy_from_slice(&3780i32.to_le_bytes());
        let image = ImagePart::from_bytes(bmp, None).unwrap();
        assert_eq!((image.px_width(), image.px_height()), (192, 96));
        assert_eq!(image.default_cx().emu(), 2 * 914400);
        assert_eq!(image.default_cy().emu(), 914400);
    }

    #[test]
    fn test_tiff() {
        let tiff = encode(RgbImage::new(20, 10), image::ImageFormat::Tiff);
        let image = ImagePart::from_bytes(tiff, None).unwrap();
        assert_eq!((image.px_width(), image.px_height()), (20, 10));
        assert_eq!(image.format(), Some(ImageFormat::Tiff));
        assert_eq!(image.filename(), "image.tiff");
    }

    #[test]
    fn test_tiff_resolution_tags() {
        let mut tiff = b"II\x2A\x00".to_vec();
        tiff.extend_from_slice(&8u32.to_le_bytes());
        tiff.extend_from_slice(&2u16.to_le_bytes());
        let mut entry = |tag: u16, ty: u16, value: u32| {
            tiff.extend_from_slice(&tag.to_le_bytes());
            tiff.extend_from_slice(&ty.to_le_bytes());
            tiff.extend_from_slice(&1u32.to_le_bytes());
            tiff.extend_from_slice(&value.to_le_bytes());
        };
        // rationals after the IFD: 8 + 2 + 2 * 12 + 4 = 38
        entry(282, 5, 38);
        entry(296, 3, 3);
        tiff.extend_from_slice(&0u32.to_le_bytes());
        tiff.extend_from_slice(&236u32.to_le_bytes());
        tiff.extend_from_slice(&2u32.to_le_bytes());

        // 118 dots per cm; no YResolution entry
        assert_eq!(tiff_dpi(&tiff), Some((300, 0)));
        assert_eq!(tiff_dpi(&exif_block(200)[6..]), Some((200, 200)));
        assert_eq!(tiff_dpi(b"XX\x2A\x00"), None);
    }

    #[test]
    fn test_format_without_a_resolution_reader() {
        let webp = encode(RgbaImage::new(144, 36), image::ImageFormat::WebP);
        let image = ImagePart::from_bytes(webp, None).unwrap();
        assert_eq!((image.px_width(), image.px_height()), (144, 36));
        assert_eq!(image.format(), None);
        assert_eq!(image.content_type(), "image/webp");
        assert_eq!(image.filename(), "image.webp");
        assert_eq!((image.horz_dpi(), image.vert_dpi()), (72, 72));
        assert_eq!(image.default_cx().emu(), 2 * 914400);
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let err = ImagePart::from_bytes(b"plain text, not pixels".to_vec(), None).unwrap_err();
        assert!(matches!(err, OoxmlError::InvalidFormat(_)));
    }

    #[test]
    fn test_open_reads_file_and_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        std::fs::write(&path, png_bytes(72, 36, None)).unwrap();

        let image = ImagePart::open(&path).unwrap();
        assert_eq!(image.filename(), "logo.png");
        assert_eq!((image.px_width(), image.px_height()), (72, 36));
        assert_eq!(image.blob(), std::fs::read(&path).unwrap().as_slice());

        let missing = ImagePart::open(dir.path().join("missing.png"));
        assert!(matches!(missing, Err(OoxmlError::Io(_))));
    }

    #[test]
    fn test_scaled_dimensions_keeps_aspect_ratio() {
        let image = ImagePart::from_bytes(png_bytes(144, 72, None), None).unwrap();
        let (w, h) = image.scaled_dimensions(None, None);
        assert_eq!((w.emu(), h.emu()), (1828800, 914400));

        let (w, h) = image.scaled_dimensions(Some(Length::from_inches(1.0)), None);
        assert_eq!((w.emu(), h.emu()), (914400, 457200));

        let (w, h) = image.scaled_dimensions(None, Some(Length::from_inches(2.0)));
        assert_eq!((w.emu(), h.emu()), (3657600, 1828800));

        let (w, h) = image.scaled_dimensions(Some(Length::new(5)), Some(Length::new(7)));
        assert_eq!((w.emu(), h.emu()), (5, 7));
    }
}
