//! Bitmap decoding for the accepted input formats.

use std::io::Cursor;

use image::{DynamicImage, ImageReader};

use super::{read_orientation, LoadError, Orientation, SourceFormat};

/// A decoded bitmap before orientation correction.
#[derive(Debug, Clone)]
pub struct DecodedBitmap {
    pub image: DynamicImage,
    /// Width as stored in the file.
    pub width: u32,
    /// Height as stored in the file.
    pub height: u32,
    pub format: SourceFormat,
    /// EXIF orientation; only read for JPEG input.
    pub orientation: Option<Orientation>,
}

/// Detect the container format of `bytes`.
///
/// # Errors
///
/// Returns `LoadError::EmptyData` for empty input and
/// `LoadError::UnsupportedFormat` for anything but GIF, JPEG, PNG, WebP or BMP.
pub fn detect_format(bytes: &[u8]) -> Result<SourceFormat, LoadError> {
    if bytes.is_empty() {
        return Err(LoadError::EmptyData);
    }

    let format = image::guess_format(bytes).map_err(|_| LoadError::UnsupportedFormat)?;
    SourceFormat::from_image_format(format).ok_or(LoadError::UnsupportedFormat)
}

/// Decode image bytes without applying any orientation correction.
///
/// # Errors
///
/// Returns the errors of [`detect_format`], or `LoadError::CorruptedFile`
/// if the decoder rejects the data.
pub fn decode_bitmap(bytes: &[u8]) -> Result<DecodedBitmap, LoadError> {
    let format = detect_format(bytes)?;

    let mut reader = ImageReader::new(Cursor::new(bytes));
    reader.set_format(format.to_image_format());
    let image = reader
        .decode()
        .map_err(|e| LoadError::CorruptedFile(e.to_string()))?;

    let orientation = match format {
        SourceFormat::Jpeg => read_orientation(bytes),
        _ => None,
    };

    log::debug!(
        "Decoded {:?} image: {}x{}, orientation {:?}",
        format,
        image.width(),
        image.height(),
        orientation
    );

    Ok(DecodedBitmap {
        width: image.width(),
        height: image.height(),
        image,
        format,
        orientation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::exif::with_orientation_tag;
    use image::{ImageFormat, RgbImage};

    fn encoded(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, image::Rgb([10, 20, 30])));
        let mut bytes = Cursor::new(Vec::new());
        img.write_to(&mut bytes, format).unwrap();
        bytes.into_inner()
    }

    #[test]
    fn test_detect_accepted_formats() {
        assert_eq!(detect_format(&encoded(2, 2, ImageFormat::Png)).unwrap(), SourceFormat::Png);
        assert_eq!(detect_format(&encoded(2, 2, ImageFormat::Jpeg)).unwrap(), SourceFormat::Jpeg);
        assert_eq!(detect_format(&encoded(2, 2, ImageFormat::Gif)).unwrap(), SourceFormat::Gif);
        assert_eq!(detect_format(&encoded(2, 2, ImageFormat::Bmp)).unwrap(), SourceFormat::Bmp);
        assert_eq!(detect_format(&encoded(2, 2, ImageFormat::WebP)).unwrap(), SourceFormat::WebP);
    }

    #[test]
    fn test_detect_empty() {
        assert!(matches!(detect_format(&[]), Err(LoadError::EmptyData)));
    }

    #[test]
    fn test_detect_unknown() {
        assert!(matches!(
            detect_format(b"definitely not an image"),
            Err(LoadError::UnsupportedFormat)
        ));
    }

    #[test]
    fn test_decode_png() {
        let bitmap = decode_bitmap(&encoded(7, 3, ImageFormat::Png)).unwrap();
        assert_eq!((bitmap.width, bitmap.height), (7, 3));
        assert_eq!(bitmap.format, SourceFormat::Png);
        assert_eq!(bitmap.orientation, None);
    }

    #[test]
    fn test_decode_truncated_png() {
        let bytes = encoded(16, 16, ImageFormat::Png);
        let result = decode_bitmap(&bytes[..bytes.len() / 2]);
        assert!(matches!(result, Err(LoadError::CorruptedFile(_))));
    }

    #[test]
    fn test_decode_jpeg_reads_orientation() {
        let bytes = with_orientation_tag(&encoded(8, 4, ImageFormat::Jpeg), 6);
        let bitmap = decode_bitmap(&bytes).unwrap();
        assert_eq!(bitmap.orientation, Some(Orientation::Rotate90CW));
        // Dimensions are reported as stored, before correction.
        assert_eq!((bitmap.width, bitmap.height), (8, 4));
    }
}
