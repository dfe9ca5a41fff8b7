//! Directories decoded from JPEG segment payloads: the frame header (SOFn)
//! and comments (COM).

use crate::directory::{Directory, DirectoryKind, Metadata, TagValue, tag_enum};
use crate::error::Result;
use crate::format::ImageFormat;
use crate::reader::SequentialReader;
use crate::segments::{JpegSegmentData, JpegSegmentType};
use std::io::{Cursor, Read};
use std::path::Path;
use tracing::debug;

tag_enum! {
    pub enum JpegTag {
        CompressionType = -3 => "Compression Type",
        DataPrecision = 0 => "Data Precision",
        ImageHeight = 1 => "Image Height",
        ImageWidth = 3 => "Image Width",
        NumberOfComponents = 5 => "Number of Components",
        Component1 = 6 => "Component 1",
        Component2 = 7 => "Component 2",
        Component3 = 8 => "Component 3",
        Component4 = 9 => "Component 4",
    }
}

tag_enum! {
    pub enum JpegCommentTag {
        Comment = 0 => "JPEG Comment",
    }
}

const COMPONENT_TAGS: [JpegTag; 4] = [
    JpegTag::Component1,
    JpegTag::Component2,
    JpegTag::Component3,
    JpegTag::Component4,
];

/// Segment types the JPEG facade needs from the stream.
pub fn segment_types() -> Vec<JpegSegmentType> {
    JpegSegmentType::ALL
        .iter()
        .copied()
        .filter(|t| t.is_start_of_frame() || *t == JpegSegmentType::Com)
        .collect()
}

/// Decodes a start-of-frame segment into a JPEG directory.
pub struct JpegReader;

impl JpegReader {
    pub fn extract(&self, segment: &[u8], kind: JpegSegmentType, metadata: &mut Metadata) {
        let directory = metadata.add_directory(Directory::new(DirectoryKind::Jpeg));
        // SOF0..SOF15 map onto compression process 0..15
        directory.set(
            JpegTag::CompressionType,
            kind.byte() - JpegSegmentType::Sof0.byte(),
        );

        let mut cur = Cursor::new(segment);
        let mut r = SequentialReader::new(&mut cur);
        // the segment is already in memory, so running short is bad content
        if let Err(e) = read_frame(&mut r, directory) {
            directory.add_error(format!("Truncated {} segment: {}", kind.name(), e));
        }
    }

    /// Decodes every start-of-frame segment present in `segments`.
    pub fn read_jpeg_segments(&self, segments: &JpegSegmentData, metadata: &mut Metadata) {
        for kind in segments.segment_types().filter(|t| t.is_start_of_frame()) {
            for payload in segments.segments(kind) {
                self.extract(payload, kind, metadata);
            }
        }
    }
}

fn read_frame(r: &mut SequentialReader<'_>, d: &mut Directory) -> std::io::Result<()> {
    d.set(JpegTag::DataPrecision, r.get_u8()?);
    d.set(JpegTag::ImageHeight, r.get_u16()?);
    d.set(JpegTag::ImageWidth, r.get_u16()?);
    let count = r.get_u8()?;
    d.set(JpegTag::NumberOfComponents, count);

    // id, sampling factors (horizontal in the high nibble), quantization table
    for i in 0..count as usize {
        let component = r.get_bytes(3)?;
        if let Some(tag) = COMPONENT_TAGS.get(i) {
            d.set(*tag, component);
        }
    }
    Ok(())
}

/// Turns each COM segment into its own comment directory.
pub struct JpegCommentReader;

impl JpegCommentReader {
    pub fn extract(&self, segment: &[u8], metadata: &mut Metadata) {
        let directory = metadata.add_directory(Directory::new(DirectoryKind::JpegComment));
        directory.set(
            JpegCommentTag::Comment,
            String::from_utf8_lossy(segment).into_owned(),
        );
    }

    pub fn read_jpeg_segments(&self, segments: &JpegSegmentData, metadata: &mut Metadata) {
        for payload in segments.segments(JpegSegmentType::Com) {
            self.extract(payload, metadata);
        }
    }
}

/// Runs the segment decoders over demultiplexed segment data.
pub fn process_segments(segments: &JpegSegmentData, metadata: &mut Metadata) {
    debug!(
        types = segments.segment_types().count(),
        "decoding JPEG segments"
    );
    JpegReader.read_jpeg_segments(segments, metadata);
    JpegCommentReader.read_jpeg_segments(segments, metadata);
}

pub(crate) fn describe(code: i32, value: &TagValue) -> Option<String> {
    match (JpegTag::from_code(code)?, value) {
        (JpegTag::CompressionType, TagValue::Int(v)) => {
            let text = match *v {
                0 => "Baseline",
                1 => "Extended sequential, Huffman",
                2 => "Progressive, Huffman",
                3 => "Lossless, Huffman",
                5 => "Differential sequential, Huffman",
                6 => "Differential progressive, Huffman",
                7 => "Differential lossless, Huffman",
                8 => "Reserved for JPEG extensions",
                9 => "Extended sequential, arithmetic",
                10 => "Progressive, arithmetic",
                11 => "Lossless, arithmetic",
                13 => "Differential sequential, arithmetic",
                14 => "Differential progressive, arithmetic",
                15 => "Differential lossless, arithmetic",
                _ => return Some(format!("Unknown type: {}", v)),
            };
            Some(text.to_string())
        }
        (JpegTag::DataPrecision, TagValue::Int(v)) => Some(format!("{} bits", v)),
        (JpegTag::ImageHeight | JpegTag::ImageWidth, TagValue::Int(v)) => {
            Some(format!("{} pixels", v))
        }
        (
            JpegTag::Component1 | JpegTag::Component2 | JpegTag::Component3 | JpegTag::Component4,
            TagValue::Bytes(b),
        ) if b.len() == 3 => {
            let name = match b[0] {
                1 => "Y",
                2 => "Cb",
                3 => "Cr",
                4 => "I",
                5 => "Q",
                _ => "Unknown",
            };
            Some(format!(
                "{} component: Quantization table {}, Sampling factors {} horiz/{} vert",
                name,
                b[2],
                b[1] >> 4,
                b[1] & 0x0F
            ))
        }
        _ => None,
    }
}

pub fn read_metadata(path: impl AsRef<Path>) -> Result<Vec<crate::Directory>> {
    crate::api::read_metadata(path, ImageFormat::Jpeg)
}

pub fn read_metadata_from<R: Read>(stream: &mut R) -> Result<Vec<crate::Directory>> {
    crate::api::read_metadata_from(stream, ImageFormat::Jpeg)
}
