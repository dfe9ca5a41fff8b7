//! GIF logical screen descriptor.

use crate::directory::{Directory, DirectoryKind, Metadata, TagValue, tag_enum};
use crate::error::Result;
use crate::format::{Fault, FormatReader, ImageFormat, invalid, settle};
use crate::reader::SequentialReader;
use std::io::Read;
use std::path::Path;
use tracing::debug;

tag_enum! {
    pub enum GifTag {
        FormatVersion = 1 => "GIF Format Version",
        ImageWidth = 2 => "Image Width",
        ImageHeight = 3 => "Image Height",
        ColorTableSize = 4 => "Color Table Size",
        IsColorTableSorted = 5 => "Is Color Table Sorted",
        BitsPerPixel = 6 => "Bits per Pixel",
        HasGlobalColorTable = 7 => "Has Global Color Table",
        BackgroundColorIndex = 8 => "Background Color Index",
        PixelAspectRatio = 9 => "Pixel Aspect Ratio",
    }
}

const GIF_87A: &str = "87a";
const GIF_89A: &str = "89a";

pub struct GifReader;

impl FormatReader for GifReader {
    fn extract(&self, reader: &mut SequentialReader<'_>, metadata: &mut Metadata) -> Result<()> {
        reader.set_motorola_byte_order(false);
        let directory = metadata.add_directory(Directory::new(DirectoryKind::GifHeader));
        debug!("reading GIF header");
        let outcome = read_fields(reader, directory);
        settle(directory, outcome)
    }
}

fn read_fields(r: &mut SequentialReader<'_>, d: &mut Directory) -> std::result::Result<(), Fault> {
    if r.get_bytes(3)? != b"GIF" {
        return invalid("Invalid GIF file signature");
    }
    let version = r.get_string(3)?;
    if version != GIF_87A && version != GIF_89A {
        return invalid("Unexpected GIF version");
    }
    d.set(GifTag::FormatVersion, version.as_str());
    d.set(GifTag::ImageWidth, r.get_u16()?);
    d.set(GifTag::ImageHeight, r.get_u16()?);

    let flags = r.get_u8()?;
    d.set(GifTag::ColorTableSize, 1u32 << ((flags & 0x07) + 1));
    // the sort flag only exists from 89a onward
    if version == GIF_89A {
        d.set(GifTag::IsColorTableSorted, flags & 0x08 != 0);
    }
    d.set(GifTag::BitsPerPixel, ((flags & 0x70) >> 4) + 1);
    d.set(GifTag::HasGlobalColorTable, flags & 0x80 != 0);

    d.set(GifTag::BackgroundColorIndex, r.get_u8()?);

    let aspect = r.get_u8()?;
    if aspect != 0 {
        d.set(GifTag::PixelAspectRatio, (aspect as f64 + 15.0) / 64.0);
    }
    Ok(())
}

pub(crate) fn describe(code: i32, value: &TagValue) -> Option<String> {
    match (GifTag::from_code(code)?, value) {
        (GifTag::ImageWidth | GifTag::ImageHeight, TagValue::Int(v)) => {
            Some(format!("{} pixels", v))
        }
        (GifTag::IsColorTableSorted | GifTag::HasGlobalColorTable, TagValue::Bool(b)) => {
            Some(if *b { "Yes" } else { "No" }.to_string())
        }
        (GifTag::PixelAspectRatio, TagValue::Float(v)) => Some(format!("{:.3}", v)),
        _ => None,
    }
}

pub fn read_metadata(path: impl AsRef<Path>) -> Result<Vec<crate::Directory>> {
    crate::api::read_metadata(path, ImageFormat::Gif)
}

pub fn read_metadata_from<R: Read>(stream: &mut R) -> Result<Vec<crate::Directory>> {
    crate::api::read_metadata_from(stream, ImageFormat::Gif)
}
