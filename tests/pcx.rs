use imgmeta::pcx::{self, PcxReader, PcxTag};
use imgmeta::{DirectoryKind, FormatReader, Metadata, SequentialReader};
use std::io::Cursor;

fn make_header(palette_type: u16, h_scr: u16, v_scr: u16) -> Vec<u8> {
    let mut v = vec![
        0x0A, // identifier
        5,    // version
        0x01, // RLE encoding
        8,    // bits per pixel
    ];
    for field in [1u16, 2, 639, 479, 300, 200] {
        v.extend_from_slice(&field.to_le_bytes());
    }
    v.extend((0u8..48).collect::<Vec<_>>()); // EGA palette
    v.push(0); // reserved
    v.push(3); // color planes
    v.extend_from_slice(&640u16.to_le_bytes());
    v.extend_from_slice(&palette_type.to_le_bytes());
    v.extend_from_slice(&h_scr.to_le_bytes());
    v.extend_from_slice(&v_scr.to_le_bytes());
    v.resize(128, 0);
    v
}

#[test]
fn reads_well_formed_header() {
    let mut cur = Cursor::new(make_header(1, 1024, 768));
    let dirs = pcx::read_metadata_from(&mut cur).expect("read failed");

    assert_eq!(dirs.len(), 1);
    let d = &dirs[0];
    assert_eq!(d.kind(), DirectoryKind::Pcx);
    assert!(!d.has_errors());
    assert_eq!(d.get_int(PcxTag::Version), Some(5));
    assert_eq!(d.get_int(PcxTag::BitsPerPixel), Some(8));
    assert_eq!(d.get_int(PcxTag::XMin), Some(1));
    assert_eq!(d.get_int(PcxTag::YMin), Some(2));
    assert_eq!(d.get_int(PcxTag::XMax), Some(639));
    assert_eq!(d.get_int(PcxTag::YMax), Some(479));
    assert_eq!(d.get_int(PcxTag::HorizontalDpi), Some(300));
    assert_eq!(d.get_int(PcxTag::VerticalDpi), Some(200));
    assert_eq!(d.get_bytes(PcxTag::Palette).map(<[u8]>::len), Some(48));
    assert_eq!(d.get_bytes(PcxTag::Palette).unwrap()[47], 47);
    assert_eq!(d.get_int(PcxTag::ColorPlanes), Some(3));
    assert_eq!(d.get_int(PcxTag::BytesPerLine), Some(640));
    assert_eq!(d.get_int(PcxTag::PaletteType), Some(1));
    assert_eq!(d.get_int(PcxTag::HScrSize), Some(1024));
    assert_eq!(d.get_int(PcxTag::VScrSize), Some(768));
}

#[test]
fn zero_optional_fields_are_not_recorded() {
    let mut cur = Cursor::new(make_header(0, 0, 0));
    let dirs = pcx::read_metadata_from(&mut cur).unwrap();
    let d = &dirs[0];

    assert!(!d.has_errors());
    assert!(!d.contains(PcxTag::PaletteType));
    assert!(!d.contains(PcxTag::HScrSize));
    assert!(!d.contains(PcxTag::VScrSize));
    assert!(d.contains(PcxTag::BytesPerLine));
}

#[test]
fn optional_fields_recorded_independently() {
    let mut cur = Cursor::new(make_header(0, 800, 0));
    let dirs = pcx::read_metadata_from(&mut cur).unwrap();
    let d = &dirs[0];

    assert!(!d.contains(PcxTag::PaletteType));
    assert_eq!(d.get_int(PcxTag::HScrSize), Some(800));
    assert!(!d.contains(PcxTag::VScrSize));
}

#[test]
fn bad_identifier_yields_single_error_and_no_tags() {
    let mut data = make_header(1, 1, 1);
    data[0] = 0x0B;
    let mut cur = Cursor::new(data);
    let dirs = pcx::read_metadata_from(&mut cur).expect("content faults are not I/O errors");

    let d = &dirs[0];
    assert_eq!(d.errors().len(), 1);
    assert!(d.errors()[0].contains("Invalid PCX identifier byte"));
    assert_eq!(d.tag_count(), 0);
}

#[test]
fn bad_encoding_keeps_version() {
    let mut data = make_header(1, 1, 1);
    data[2] = 0x00;
    let mut cur = Cursor::new(data);
    let dirs = pcx::read_metadata_from(&mut cur).unwrap();

    let d = &dirs[0];
    assert_eq!(d.errors(), ["Invalid PCX encoding byte"]);
    assert_eq!(d.get_int(PcxTag::Version), Some(5));
    assert_eq!(d.tag_count(), 1);
}

#[test]
fn truncated_header_is_io_error() {
    let mut data = make_header(1, 1, 1);
    // cut inside XMax
    data.truncate(9);
    let mut cur = Cursor::new(data);
    let err = pcx::read_metadata_from(&mut cur).unwrap_err();
    assert!(err.is_io());
}

#[test]
fn truncation_keeps_directory_with_decoded_fields() {
    let mut data = make_header(1, 1, 1);
    data.truncate(9);
    let mut cur = Cursor::new(data);
    let mut reader = SequentialReader::with_byte_order(&mut cur, false);
    let mut metadata = Metadata::new();

    assert!(PcxReader.extract(&mut reader, &mut metadata).is_err());
    assert_eq!(metadata.len(), 1);
    let d = &metadata.directories()[0];
    assert_eq!(d.get_int(PcxTag::YMin), Some(2));
    assert!(!d.contains(PcxTag::XMax));
}

#[test]
fn earlier_directories_survive_a_later_fault() {
    let mut metadata = Metadata::new();

    let mut good = Cursor::new(make_header(0, 0, 0));
    let mut reader = SequentialReader::new(&mut good);
    PcxReader.extract(&mut reader, &mut metadata).unwrap();

    let mut bad = Cursor::new(vec![0xFFu8; 128]);
    let mut reader = SequentialReader::new(&mut bad);
    PcxReader.extract(&mut reader, &mut metadata).unwrap();

    assert_eq!(metadata.len(), 2);
    assert!(!metadata.directories()[0].has_errors());
    assert_eq!(metadata.directories()[0].get_int(PcxTag::XMax), Some(639));
    assert!(metadata.directories()[1].has_errors());
}

#[test]
fn describes_version_and_planes() {
    let mut cur = Cursor::new(make_header(2, 0, 0));
    let dirs = pcx::read_metadata_from(&mut cur).unwrap();
    let d = &dirs[0];

    assert_eq!(d.description(PcxTag::Version.code()).as_deref(), Some("3.0 or better"));
    assert_eq!(d.description(PcxTag::ColorPlanes.code()).as_deref(), Some("24-bit color"));
    assert_eq!(d.description(PcxTag::PaletteType.code()).as_deref(), Some("Grayscale"));
    assert_eq!(d.tag_name(PcxTag::HorizontalDpi.code()), "Horizontal DPI");
}
