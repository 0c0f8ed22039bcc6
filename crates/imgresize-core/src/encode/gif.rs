//! GIF encoding.

use image::codecs::gif::GifEncoder;
use image::{Frame, RgbaImage};

use super::{validate_pixels, EncodeError};

/// Encode RGBA pixel data to a single-frame GIF.
pub fn encode_gif(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, EncodeError> {
    validate_pixels(pixels, width, height, 4)?;

    let frame_image = RgbaImage::from_raw(width, height, pixels.to_vec()).ok_or(
        EncodeError::InvalidPixelData {
            expected: (width as usize) * (height as usize) * 4,
            actual: pixels.len(),
        },
    )?;

    let mut bytes = Vec::new();
    {
        // The trailer is written when the encoder is dropped.
        let mut encoder = GifEncoder::new(&mut bytes);
        encoder
            .encode_frame(Frame::new(frame_image))
            .map_err(|e| EncodeError::EncodingFailed {
                format: "GIF",
                message: e.to_string(),
            })?;
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_gif_header() {
        let pixels = vec![255u8; 4 * 4 * 4];
        let gif = encode_gif(&pixels, 4, 4).unwrap();
        assert_eq!(&gif[0..6], b"GIF89a");
        assert_eq!(*gif.last().unwrap(), 0x3B);
    }

    #[test]
    fn test_encode_gif_decodes_back() {
        let pixels = vec![0u8; 9 * 5 * 4];
        let gif = encode_gif(&pixels, 9, 5).unwrap();
        let img = image::load_from_memory(&gif).unwrap();
        assert_eq!((img.width(), img.height()), (9, 5));
    }

    #[test]
    fn test_encode_gif_short_buffer() {
        assert!(matches!(
            encode_gif(&[0u8; 10], 4, 4),
            Err(EncodeError::InvalidPixelData { .. })
        ));
    }
}
