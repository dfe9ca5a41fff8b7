use crate::{
    directory::{Directory, DirectoryKind, Metadata},
    error::{Error, Result},
    file_system,
    format::ImageFormat,
    jpeg,
    reader::SequentialReader,
    segments::{JpegSegmentData, JpegSegmentReader, JpegSegmentType},
};
use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};
use tracing::{debug, instrument, warn};

/// Read the metadata of a file whose format is known.
///
/// The file is opened and closed within this call. The returned directories
/// are the format's own, in decoding order, followed by a `File` directory
/// with the file's size and timestamps.
///
/// # Example
/// ```no_run
/// use imgmeta::{ImageFormat, read_metadata};
///
/// let dirs = read_metadata("scan.pcx", ImageFormat::Pcx)?;
/// for d in &dirs {
///     for e in d.errors() {
///         eprintln!("{}: {}", d.name(), e);
///     }
/// }
/// # Ok::<(), imgmeta::Error>(())
/// ```
#[instrument(skip_all, fields(path = %path.as_ref().display(), format = %format))]
pub fn read_metadata(path: impl AsRef<Path>, format: ImageFormat) -> Result<Vec<Directory>> {
    let path = path.as_ref();
    let mut metadata = {
        let mut stream = BufReader::new(File::open(path)?);
        extract(&mut stream, format)?
    };
    metadata.add_directory(file_system::read_directory(path)?);
    Ok(metadata.into_directories())
}

/// Read the metadata from an already open stream.
///
/// The stream stays with the caller and is left wherever decoding stopped.
/// Malformed content is reported through [`Directory::errors`]; an `Err` means
/// the stream ended (or failed) while a required field was being read.
pub fn read_metadata_from<R: Read>(stream: &mut R, format: ImageFormat) -> Result<Vec<Directory>> {
    Ok(extract(stream, format)?.into_directories())
}

/// Sniff the format from the file's first bytes, then read it.
pub fn read_any(path: impl AsRef<Path>) -> Result<Vec<Directory>> {
    let path = path.as_ref();
    let format = detect_format(path)?;
    debug!(%format, "detected format");
    read_metadata(path, format)
}

pub fn detect_format(path: impl AsRef<Path>) -> Result<ImageFormat> {
    let mut head = Vec::with_capacity(4);
    File::open(path)?.take(4).read_to_end(&mut head)?;
    ImageFormat::detect(&head).ok_or(Error::UnrecognizedFormat)
}

fn extract(stream: &mut dyn Read, format: ImageFormat) -> Result<Metadata> {
    let mut reader = SequentialReader::with_byte_order(stream, format.motorola_byte_order());
    let mut metadata = Metadata::new();
    match format.header_reader() {
        Some(header) => header.extract(&mut reader, &mut metadata)?,
        None => {
            match JpegSegmentReader::with_filter(&jpeg::segment_types()).read_segments(&mut reader) {
                Ok(segments) => jpeg::process_segments(&segments, &mut metadata),
                // unparseable segment structure is bad content, not a failed stream
                Err(Error::Jpeg(message)) => {
                    warn!(%message, "invalid JPEG segment structure");
                    let mut directory = Directory::new(DirectoryKind::Jpeg);
                    directory.add_error(message);
                    metadata.add_directory(directory);
                }
                Err(e) => return Err(e),
            }
        }
    }
    Ok(metadata)
}

/// Demultiplex the segments of a JPEG file, optionally keeping only `filter`.
pub fn read_segments(
    path: impl AsRef<Path>,
    filter: Option<&[JpegSegmentType]>,
) -> Result<JpegSegmentData> {
    let mut stream = BufReader::new(File::open(path)?);
    read_segments_from(&mut stream, filter)
}

pub fn read_segments_from<R: Read>(
    stream: &mut R,
    filter: Option<&[JpegSegmentType]>,
) -> Result<JpegSegmentData> {
    let segment_reader = match filter {
        Some(types) => JpegSegmentReader::with_filter(types),
        None => JpegSegmentReader::new(),
    };
    let mut reader = SequentialReader::new(stream);
    segment_reader.read_segments(&mut reader)
}
