//! Windows/OS2 bitmap header.
//!
//! Layout (little-endian): a 14-byte file header (`BM`, file size, two
//! reserved words, pixel array offset) followed by a DIB header whose first
//! field is its own size.

use crate::directory::{Directory, DirectoryKind, Metadata, TagValue, tag_enum};
use crate::error::Result;
use crate::format::{Fault, FormatReader, ImageFormat, invalid, settle};
use crate::reader::SequentialReader;
use std::io::Read;
use std::path::Path;
use tracing::{debug, trace};

tag_enum! {
    pub enum BmpTag {
        HeaderSize = -1 => "Header Size",
        ImageHeight = 1 => "Image Height",
        ImageWidth = 2 => "Image Width",
        ColourPlanes = 3 => "Planes",
        BitsPerPixel = 4 => "Bits Per Pixel",
        Compression = 5 => "Compression",
        XPixelsPerMeter = 6 => "X Pixels per Meter",
        YPixelsPerMeter = 7 => "Y Pixels per Meter",
        PaletteColourCount = 8 => "Palette Colour Count",
        ImportantColourCount = 9 => "Important Colour Count",
    }
}

const BITMAP_CORE_HEADER_SIZE: i32 = 12;
const BITMAP_INFO_HEADER_SIZE: i32 = 40;

pub struct BmpReader;

impl FormatReader for BmpReader {
    fn extract(&self, reader: &mut SequentialReader<'_>, metadata: &mut Metadata) -> Result<()> {
        reader.set_motorola_byte_order(false);
        let directory = metadata.add_directory(Directory::new(DirectoryKind::BmpHeader));
        debug!("reading BMP header");
        let outcome = read_fields(reader, directory);
        settle(directory, outcome)
    }
}

fn read_fields(r: &mut SequentialReader<'_>, d: &mut Directory) -> std::result::Result<(), Fault> {
    if r.get_u16()? != 0x4D42 {
        return invalid("Invalid BMP magic number");
    }
    // file size, two reserved words, pixel array offset
    r.skip(4 + 2 + 2 + 4)?;

    let header_size = r.get_i32()?;
    d.set(BmpTag::HeaderSize, header_size);
    trace!(header_size, "DIB header");

    // V4 and V5 headers extend BITMAPINFOHEADER with the same leading fields
    if header_size >= BITMAP_INFO_HEADER_SIZE {
        d.set(BmpTag::ImageWidth, r.get_i32()?);
        d.set(BmpTag::ImageHeight, r.get_i32()?);
        d.set(BmpTag::ColourPlanes, r.get_u16()?);
        d.set(BmpTag::BitsPerPixel, r.get_u16()?);
        d.set(BmpTag::Compression, r.get_i32()?);
        // raw image size
        r.skip(4)?;
        d.set(BmpTag::XPixelsPerMeter, r.get_i32()?);
        d.set(BmpTag::YPixelsPerMeter, r.get_i32()?);
        d.set(BmpTag::PaletteColourCount, r.get_i32()?);
        d.set(BmpTag::ImportantColourCount, r.get_i32()?);
    } else if header_size == BITMAP_CORE_HEADER_SIZE {
        d.set(BmpTag::ImageWidth, r.get_u16()?);
        d.set(BmpTag::ImageHeight, r.get_u16()?);
        d.set(BmpTag::ColourPlanes, r.get_u16()?);
        d.set(BmpTag::BitsPerPixel, r.get_u16()?);
    } else {
        return invalid(format!("Unexpected DIB header size: {}", header_size));
    }
    Ok(())
}

pub(crate) fn describe(code: i32, value: &TagValue) -> Option<String> {
    let TagValue::Int(v) = value else {
        return None;
    };
    match BmpTag::from_code(code)? {
        BmpTag::Compression => {
            let text = match *v {
                0 => "None",
                1 => "RLE 8-bit/pixel",
                2 => "RLE 4-bit/pixel",
                3 => "Bit field",
                4 => "JPEG",
                5 => "PNG",
                6 => "Bit field (alpha)",
                _ => return Some(format!("Unknown ({})", v)),
            };
            Some(text.to_string())
        }
        BmpTag::ImageWidth | BmpTag::ImageHeight => Some(format!("{} pixels", v)),
        BmpTag::BitsPerPixel => Some(format!("{} bits", v)),
        _ => None,
    }
}

pub fn read_metadata(path: impl AsRef<Path>) -> Result<Vec<crate::Directory>> {
    crate::api::read_metadata(path, ImageFormat::Bmp)
}

pub fn read_metadata_from<R: Read>(stream: &mut R) -> Result<Vec<crate::Directory>> {
    crate::api::read_metadata_from(stream, ImageFormat::Bmp)
}
