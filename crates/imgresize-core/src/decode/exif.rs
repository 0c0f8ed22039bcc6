//! EXIF orientation extraction.

use std::io::Cursor;

use exif::{In, Reader, Tag};

use super::Orientation;

/// Read the EXIF orientation tag from JPEG bytes.
///
/// Returns `None` when the container has no EXIF segment, the tag is
/// missing, or its value is outside 1-8. None of these are errors.
pub fn read_orientation(bytes: &[u8]) -> Option<Orientation> {
    let mut cursor = Cursor::new(bytes);
    let exif = match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif,
        Err(e) => {
            log::trace!("No readable EXIF data: {}", e);
            return None;
        }
    };

    let value = exif
        .get_field(Tag::Orientation, In::PRIMARY)?
        .value
        .get_uint(0)?;

    let orientation = Orientation::from_exif(value);
    if orientation.is_none() {
        log::debug!("Ignoring out-of-range EXIF orientation {}", value);
    }
    orientation
}

/// Insert an APP1 EXIF segment carrying only an orientation tag into JPEG bytes.
#[cfg(test)]
pub(crate) fn with_orientation_tag(jpeg: &[u8], tag: u16) -> Vec<u8> {
    let tiff: Vec<u8> = [
        &b"II"[..],
        &[0x2A, 0x00, 0x08, 0x00, 0x00, 0x00],
        // IFD0 with a single entry
        &[0x01, 0x00],
        &[0x12, 0x01, 0x03, 0x00, 0x01, 0x00, 0x00, 0x00],
        &tag.to_le_bytes(),
        &[0x00, 0x00],
        &[0x00, 0x00, 0x00, 0x00],
    ]
    .concat();

    let segment_len = (2 + 6 + tiff.len()) as u16;
    let mut out = Vec::with_capacity(jpeg.len() + segment_len as usize + 2);
    out.extend_from_slice(&jpeg[..2]);
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&segment_len.to_be_bytes());
    out.extend_from_slice(b"Exif\0\0");
    out.extend_from_slice(&tiff);
    out.extend_from_slice(&jpeg[2..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_jpeg() -> Vec<u8> {
        crate::encode::encode_jpeg(&[200u8; 4 * 2 * 3], 4, 2, 90).unwrap()
    }

    #[test]
    fn test_no_exif_segment() {
        assert_eq!(read_orientation(&plain_jpeg()), None);
    }

    #[test]
    fn test_invalid_data() {
        assert_eq!(read_orientation(&[0x00, 0x01, 0x02]), None);
        assert_eq!(read_orientation(&[]), None);
    }

    #[test]
    fn test_reads_orientation_tag() {
        for tag in 1..=8u16 {
            let bytes = with_orientation_tag(&plain_jpeg(), tag);
            assert_eq!(
                read_orientation(&bytes),
                Orientation::from_exif(tag as u32),
                "tag {tag}"
            );
        }
    }

    #[test]
    fn test_out_of_range_tag_is_ignored() {
        let bytes = with_orientation_tag(&plain_jpeg(), 9);
        assert_eq!(read_orientation(&bytes), None);
    }

    #[test]
    fn test_tagged_jpeg_still_decodes() {
        let bytes = with_orientation_tag(&plain_jpeg(), 6);
        let img = image::load_from_memory(&bytes).unwrap();
        assert_eq!((img.width(), img.height()), (4, 2));
    }
}
