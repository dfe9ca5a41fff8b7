//! ZSoft PCX header.
//!
//! The 128-byte header is little-endian. Palette type and screen size were
//! added in later revisions of the format and older encoders leave them
//! zeroed, so they are only recorded when nonzero.

use crate::directory::{Directory, DirectoryKind, Metadata, TagValue, tag_enum};
use crate::error::Result;
use crate::format::{Fault, FormatReader, ImageFormat, invalid, settle};
use crate::reader::SequentialReader;
use std::io::Read;
use std::path::Path;
use tracing::debug;

tag_enum! {
    pub enum PcxTag {
        Version = 1 => "Version",
        BitsPerPixel = 2 => "Bits Per Pixel",
        XMin = 3 => "X Min",
        YMin = 4 => "Y Min",
        XMax = 5 => "X Max",
        YMax = 6 => "Y Max",
        HorizontalDpi = 7 => "Horizontal DPI",
        VerticalDpi = 8 => "Vertical DPI",
        Palette = 9 => "Palette",
        ColorPlanes = 10 => "Color Planes",
        BytesPerLine = 11 => "Bytes Per Line",
        PaletteType = 12 => "Palette Type",
        HScrSize = 13 => "H Scr Size",
        VScrSize = 14 => "V Scr Size",
    }
}

pub struct PcxReader;

impl FormatReader for PcxReader {
    fn extract(&self, reader: &mut SequentialReader<'_>, metadata: &mut Metadata) -> Result<()> {
        reader.set_motorola_byte_order(false);
        let directory = metadata.add_directory(Directory::new(DirectoryKind::Pcx));
        debug!("reading PCX header");
        let outcome = read_fields(reader, directory);
        settle(directory, outcome)
    }
}

fn read_fields(r: &mut SequentialReader<'_>, d: &mut Directory) -> std::result::Result<(), Fault> {
    if r.get_u8()? != 0x0A {
        return invalid("Invalid PCX identifier byte");
    }
    d.set(PcxTag::Version, r.get_u8()?);
    if r.get_u8()? != 0x01 {
        return invalid("Invalid PCX encoding byte");
    }
    d.set(PcxTag::BitsPerPixel, r.get_u8()?);
    d.set(PcxTag::XMin, r.get_u16()?);
    d.set(PcxTag::YMin, r.get_u16()?);
    d.set(PcxTag::XMax, r.get_u16()?);
    d.set(PcxTag::YMax, r.get_u16()?);
    d.set(PcxTag::HorizontalDpi, r.get_u16()?);
    d.set(PcxTag::VerticalDpi, r.get_u16()?);
    d.set(PcxTag::Palette, r.get_bytes(48)?);
    r.skip(1)?;
    d.set(PcxTag::ColorPlanes, r.get_u8()?);
    d.set(PcxTag::BytesPerLine, r.get_u16()?);

    for tag in [PcxTag::PaletteType, PcxTag::HScrSize, PcxTag::VScrSize] {
        let value = r.get_u16()?;
        if value != 0 {
            d.set(tag, value);
        }
    }
    Ok(())
}

pub(crate) fn describe(code: i32, value: &TagValue) -> Option<String> {
    let TagValue::Int(v) = value else {
        return None;
    };
    let text = match (PcxTag::from_code(code)?, *v) {
        (PcxTag::Version, 0) => "2.5 with fixed EGA palette information",
        (PcxTag::Version, 2) => "2.8 with modifiable EGA palette information",
        (PcxTag::Version, 3) => "2.8 without palette information (default palette)",
        (PcxTag::Version, 4) => "PC Paintbrush for Windows",
        (PcxTag::Version, 5) => "3.0 or better",
        (PcxTag::ColorPlanes, 3) => "24-bit color",
        (PcxTag::ColorPlanes, 4) => "16 colors",
        (PcxTag::PaletteType, 1) => "Color or B&W",
        (PcxTag::PaletteType, 2) => "Grayscale",
        _ => return None,
    };
    Some(text.to_string())
}

pub fn read_metadata(path: impl AsRef<Path>) -> Result<Vec<crate::Directory>> {
    crate::api::read_metadata(path, ImageFormat::Pcx)
}

pub fn read_metadata_from<R: Read>(stream: &mut R) -> Result<Vec<crate::Directory>> {
    crate::api::read_metadata_from(stream, ImageFormat::Pcx)
}
