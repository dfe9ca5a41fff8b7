use imgmeta::psd::{self, PsdTag};
use std::io::Cursor;

fn header(version: u16) -> Vec<u8> {
    let mut v = Vec::new();
    v.extend_from_slice(b"8BPS");
    v.extend_from_slice(&version.to_be_bytes());
    v.extend_from_slice(&[0; 6]);
    v.extend_from_slice(&4u16.to_be_bytes()); // channels
    v.extend_from_slice(&1080i32.to_be_bytes()); // height
    v.extend_from_slice(&1920i32.to_be_bytes()); // width
    v.extend_from_slice(&16u16.to_be_bytes()); // depth
    v.extend_from_slice(&3u16.to_be_bytes()); // RGB
    v
}

#[test]
fn reads_header() {
    let dirs = psd::read_metadata_from(&mut Cursor::new(header(1))).unwrap();
    let d = &dirs[0];

    assert!(!d.has_errors());
    assert_eq!(d.get_int(PsdTag::ChannelCount), Some(4));
    assert_eq!(d.get_int(PsdTag::ImageHeight), Some(1080));
    assert_eq!(d.get_int(PsdTag::ImageWidth), Some(1920));
    assert_eq!(d.get_int(PsdTag::BitsPerChannel), Some(16));
    assert_eq!(d.get_int(PsdTag::ColorMode), Some(3));
    assert_eq!(d.description(PsdTag::ColorMode.code()).as_deref(), Some("RGB"));
    assert_eq!(d.description(PsdTag::ChannelCount.code()).as_deref(), Some("4 channels"));
}

#[test]
fn accepts_large_document_version() {
    let dirs = psd::read_metadata_from(&mut Cursor::new(header(2))).unwrap();
    assert!(!dirs[0].has_errors());
    assert_eq!(dirs[0].tag_count(), 5);
}

#[test]
fn rejects_other_versions() {
    let dirs = psd::read_metadata_from(&mut Cursor::new(header(3))).unwrap();
    assert_eq!(dirs[0].errors(), ["Invalid PSD file version (must be 1 or 2)"]);
    assert_eq!(dirs[0].tag_count(), 0);
}

#[test]
fn rejects_bad_signature() {
    let mut data = header(1);
    data[3] = b'X';
    let dirs = psd::read_metadata_from(&mut Cursor::new(data)).unwrap();
    assert_eq!(dirs[0].errors(), ["Invalid PSD file signature"]);
}

#[test]
fn truncated_header_is_io_error() {
    let mut data = header(1);
    data.truncate(20);
    assert!(psd::read_metadata_from(&mut Cursor::new(data)).unwrap_err().is_io());
}
