pub mod directory;
pub mod error;
pub mod reader;
pub mod format;
pub mod segments;
pub mod util;
pub mod logging;

pub mod bmp;
pub mod gif;
pub mod psd;
pub mod pcx;
pub mod jpeg;
pub mod file_system;

pub mod api;

pub use api::{detect_format, read_any, read_metadata, read_metadata_from, read_segments, read_segments_from};
pub use directory::{Directory, DirectoryKind, Metadata, TagValue};
pub use error::{Error, Result};
pub use format::{FormatReader, ImageFormat};
pub use reader::SequentialReader;
pub use segments::{JpegSegmentData, JpegSegmentReader, JpegSegmentType};
