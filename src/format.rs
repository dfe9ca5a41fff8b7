use crate::directory::{Directory, Metadata};
use crate::error::{Error, Result};
use crate::reader::SequentialReader;
use serde::Serialize;
use std::io;
use tracing::warn;

/// A decoder for one fixed-layout file header.
///
/// `extract` consumes the reader from its current position, appends one new
/// directory to `metadata` and fills it. Malformed content is recorded on
/// that directory; only stream failures come back as `Err`, and even then the
/// directory stays in `metadata` with the fields decoded so far.
pub trait FormatReader: Send + Sync {
    fn extract(&self, reader: &mut SequentialReader<'_>, metadata: &mut Metadata) -> Result<()>;
}

/// Why decoding of a directory's fields stopped early.
pub(crate) enum Fault {
    /// Structurally invalid content; recorded on the directory.
    Invalid(String),
    /// The stream could not supply a field.
    Io(io::Error),
}

impl From<io::Error> for Fault {
    fn from(e: io::Error) -> Self {
        Fault::Io(e)
    }
}

pub(crate) fn invalid<T>(message: impl Into<String>) -> std::result::Result<T, Fault> {
    Err(Fault::Invalid(message.into()))
}

/// Maps the outcome of a field sequence onto the two failure tiers.
pub(crate) fn settle(
    directory: &mut Directory,
    outcome: std::result::Result<(), Fault>,
) -> Result<()> {
    match outcome {
        Ok(()) => Ok(()),
        Err(Fault::Invalid(message)) => {
            warn!(directory = directory.name(), %message, "invalid header content");
            directory.add_error(message);
            Ok(())
        }
        Err(Fault::Io(e)) => Err(Error::Io(e)),
    }
}

/// The file formats the facade can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
pub enum ImageFormat {
    Bmp,
    Gif,
    Psd,
    Pcx,
    Jpeg,
}

impl ImageFormat {
    pub fn name(&self) -> &'static str {
        match self {
            ImageFormat::Bmp => "BMP",
            ImageFormat::Gif => "GIF",
            ImageFormat::Psd => "PSD",
            ImageFormat::Pcx => "PCX",
            ImageFormat::Jpeg => "JPEG",
        }
    }

    /// Byte order the format's header starts in; `true` is big-endian.
    pub fn motorola_byte_order(&self) -> bool {
        match self {
            ImageFormat::Bmp | ImageFormat::Gif | ImageFormat::Pcx => false,
            ImageFormat::Psd | ImageFormat::Jpeg => true,
        }
    }

    /// Guesses the format from the first bytes of a file.
    pub fn detect(head: &[u8]) -> Option<Self> {
        match head {
            [0xFF, 0xD8, ..] => Some(ImageFormat::Jpeg),
            [b'B', b'M', ..] => Some(ImageFormat::Bmp),
            [b'G', b'I', b'F', b'8', ..] => Some(ImageFormat::Gif),
            [b'8', b'B', b'P', b'S', ..] => Some(ImageFormat::Psd),
            [0x0A, 0..=5, 0x01, ..] => Some(ImageFormat::Pcx),
            _ => None,
        }
    }

    /// The header reader for formats decoded straight off the stream.
    /// JPEG goes through the segment reader instead.
    pub fn header_reader(&self) -> Option<&'static dyn FormatReader> {
        match self {
            ImageFormat::Bmp => Some(&crate::bmp::BmpReader),
            ImageFormat::Gif => Some(&crate::gif::GifReader),
            ImageFormat::Psd => Some(&crate::psd::PsdReader),
            ImageFormat::Pcx => Some(&crate::pcx::PcxReader),
            ImageFormat::Jpeg => None,
        }
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
