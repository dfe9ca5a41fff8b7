/// Failures that abort a whole read.
///
/// Malformed-but-readable content never shows up here; it is recorded as an
/// error string on the directory being decoded.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("jpeg: {0}")]
    Jpeg(String),
    #[error("unknown JPEG segment type 0x{0:02X}")]
    UnknownSegmentType(u8),
    #[error("unrecognized file format")]
    UnrecognizedFormat,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn is_io(&self) -> bool {
        matches!(self, Error::Io(_))
    }
}
