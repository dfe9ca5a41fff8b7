//! Photoshop (PSD/PSB) file header. Big-endian.

use crate::directory::{Directory, DirectoryKind, Metadata, TagValue, tag_enum};
use crate::error::Result;
use crate::format::{Fault, FormatReader, ImageFormat, invalid, settle};
use crate::reader::SequentialReader;
use std::io::Read;
use std::path::Path;
use tracing::debug;

tag_enum! {
    pub enum PsdTag {
        ChannelCount = 1 => "Channel Count",
        ImageHeight = 2 => "Image Height",
        ImageWidth = 3 => "Image Width",
        BitsPerChannel = 4 => "Bits Per Channel",
        ColorMode = 5 => "Color Mode",
    }
}

/// `8BPS`
const PSD_SIGNATURE: u32 = 0x3842_5053;

pub struct PsdReader;

impl FormatReader for PsdReader {
    fn extract(&self, reader: &mut SequentialReader<'_>, metadata: &mut Metadata) -> Result<()> {
        reader.set_motorola_byte_order(true);
        let directory = metadata.add_directory(Directory::new(DirectoryKind::PsdHeader));
        debug!("reading PSD header");
        let outcome = read_fields(reader, directory);
        settle(directory, outcome)
    }
}

fn read_fields(r: &mut SequentialReader<'_>, d: &mut Directory) -> std::result::Result<(), Fault> {
    if r.get_u32()? != PSD_SIGNATURE {
        return invalid("Invalid PSD file signature");
    }
    // 1 = PSD, 2 = PSB (large document)
    let version = r.get_u16()?;
    if version != 1 && version != 2 {
        return invalid("Invalid PSD file version (must be 1 or 2)");
    }
    // reserved, should be zero
    r.skip(6)?;

    d.set(PsdTag::ChannelCount, r.get_u16()?);
    d.set(PsdTag::ImageHeight, r.get_i32()?);
    d.set(PsdTag::ImageWidth, r.get_i32()?);
    d.set(PsdTag::BitsPerChannel, r.get_u16()?);
    d.set(PsdTag::ColorMode, r.get_u16()?);
    Ok(())
}

pub(crate) fn describe(code: i32, value: &TagValue) -> Option<String> {
    let TagValue::Int(v) = value else {
        return None;
    };
    match PsdTag::from_code(code)? {
        PsdTag::ChannelCount => Some(format!(
            "{} channel{}",
            v,
            if *v == 1 { "" } else { "s" }
        )),
        PsdTag::ImageHeight | PsdTag::ImageWidth => Some(format!(
            "{} pixel{}",
            v,
            if *v == 1 { "" } else { "s" }
        )),
        PsdTag::BitsPerChannel => Some(format!(
            "{} bit{} per channel",
            v,
            if *v == 1 { "" } else { "s" }
        )),
        PsdTag::ColorMode => {
            let text = match *v {
                0 => "Bitmap",
                1 => "Grayscale",
                2 => "Indexed",
                3 => "RGB",
                4 => "CMYK",
                7 => "Multichannel",
                8 => "Duotone",
                9 => "Lab",
                _ => return Some(format!("Unknown color mode ({})", v)),
            };
            Some(text.to_string())
        }
    }
}

pub fn read_metadata(path: impl AsRef<Path>) -> Result<Vec<crate::Directory>> {
    crate::api::read_metadata(path, ImageFormat::Psd)
}

pub fn read_metadata_from<R: Read>(stream: &mut R) -> Result<Vec<crate::Directory>> {
    crate::api::read_metadata_from(stream, ImageFormat::Psd)
}
