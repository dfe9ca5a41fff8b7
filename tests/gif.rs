use imgmeta::gif::{self, GifTag};
use std::io::Cursor;

fn screen_descriptor(version: &[u8; 3], flags: u8, aspect: u8) -> Vec<u8> {
    let mut v = Vec::new();
    v.extend_from_slice(b"GIF");
    v.extend_from_slice(version);
    v.extend_from_slice(&400u16.to_le_bytes());
    v.extend_from_slice(&300u16.to_le_bytes());
    v.push(flags);
    v.push(7); // background colour index
    v.push(aspect);
    v
}

#[test]
fn reads_89a_descriptor() {
    // global table, 8 bits colour resolution, sorted, 256 entries
    let mut cur = Cursor::new(screen_descriptor(b"89a", 0xFF, 49));
    let dirs = gif::read_metadata_from(&mut cur).unwrap();
    let d = &dirs[0];

    assert!(!d.has_errors());
    assert_eq!(d.get_string(GifTag::FormatVersion), Some("89a"));
    assert_eq!(d.get_int(GifTag::ImageWidth), Some(400));
    assert_eq!(d.get_int(GifTag::ImageHeight), Some(300));
    assert_eq!(d.get_int(GifTag::ColorTableSize), Some(256));
    assert_eq!(d.get_bool(GifTag::IsColorTableSorted), Some(true));
    assert_eq!(d.get_int(GifTag::BitsPerPixel), Some(8));
    assert_eq!(d.get_bool(GifTag::HasGlobalColorTable), Some(true));
    assert_eq!(d.get_int(GifTag::BackgroundColorIndex), Some(7));
    assert_eq!(d.get_float(GifTag::PixelAspectRatio), Some(1.0));
}

#[test]
fn gif87a_has_no_sort_flag_and_zero_aspect_is_absent() {
    let mut cur = Cursor::new(screen_descriptor(b"87a", 0x00, 0));
    let dirs = gif::read_metadata_from(&mut cur).unwrap();
    let d = &dirs[0];

    assert!(!d.contains(GifTag::IsColorTableSorted));
    assert!(!d.contains(GifTag::PixelAspectRatio));
    assert_eq!(d.get_int(GifTag::ColorTableSize), Some(2));
    assert_eq!(d.get_int(GifTag::BitsPerPixel), Some(1));
    assert_eq!(d.get_bool(GifTag::HasGlobalColorTable), Some(false));
}

#[test]
fn bad_signature() {
    let mut data = screen_descriptor(b"89a", 0, 0);
    data[0] = b'J';
    let dirs = gif::read_metadata_from(&mut Cursor::new(data)).unwrap();
    assert_eq!(dirs[0].errors(), ["Invalid GIF file signature"]);
    assert_eq!(dirs[0].tag_count(), 0);
}

#[test]
fn unknown_version() {
    let dirs = gif::read_metadata_from(&mut Cursor::new(screen_descriptor(b"90a", 0, 0))).unwrap();
    assert_eq!(dirs[0].errors(), ["Unexpected GIF version"]);
    assert_eq!(dirs[0].tag_count(), 0);
}

#[test]
fn truncated_descriptor_is_io_error() {
    let mut data = screen_descriptor(b"89a", 0, 0);
    data.truncate(11);
    assert!(gif::read_metadata_from(&mut Cursor::new(data)).unwrap_err().is_io());
}
