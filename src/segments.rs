use crate::error::{Error, Result};
use crate::reader::SequentialReader;
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Typed view over the JPEG marker bytes that introduce a length-prefixed
/// segment.
///
/// Markers without a payload (SOI, EOI, RSTn, TEM) are not segments and have
/// no variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum JpegSegmentType {
    Sof0 = 0xC0,
    Sof1 = 0xC1,
    Sof2 = 0xC2,
    Sof3 = 0xC3,
    Dht = 0xC4,
    Sof5 = 0xC5,
    Sof6 = 0xC6,
    Sof7 = 0xC7,
    Jpg = 0xC8,
    Sof9 = 0xC9,
    Sof10 = 0xCA,
    Sof11 = 0xCB,
    Dac = 0xCC,
    Sof13 = 0xCD,
    Sof14 = 0xCE,
    Sof15 = 0xCF,
    Sos = 0xDA,
    Dqt = 0xDB,
    Dnl = 0xDC,
    Dri = 0xDD,
    Dhp = 0xDE,
    Exp = 0xDF,
    App0 = 0xE0,
    App1 = 0xE1,
    App2 = 0xE2,
    App3 = 0xE3,
    App4 = 0xE4,
    App5 = 0xE5,
    App6 = 0xE6,
    App7 = 0xE7,
    App8 = 0xE8,
    App9 = 0xE9,
    AppA = 0xEA,
    AppB = 0xEB,
    AppC = 0xEC,
    AppD = 0xED,
    AppE = 0xEE,
    AppF = 0xEF,
    Com = 0xFE,
}

impl JpegSegmentType {
    pub const ALL: [JpegSegmentType; 39] = [
        Self::Sof0, Self::Sof1, Self::Sof2, Self::Sof3, Self::Dht,
        Self::Sof5, Self::Sof6, Self::Sof7, Self::Jpg, Self::Sof9,
        Self::Sof10, Self::Sof11, Self::Dac, Self::Sof13, Self::Sof14,
        Self::Sof15, Self::Sos, Self::Dqt, Self::Dnl, Self::Dri,
        Self::Dhp, Self::Exp, Self::App0, Self::App1, Self::App2,
        Self::App3, Self::App4, Self::App5, Self::App6, Self::App7,
        Self::App8, Self::App9, Self::AppA, Self::AppB, Self::AppC,
        Self::AppD, Self::AppE, Self::AppF, Self::Com,
    ];

    pub fn byte(self) -> u8 {
        self as u8
    }

    pub fn is_start_of_frame(self) -> bool {
        matches!(
            self,
            Self::Sof0
                | Self::Sof1
                | Self::Sof2
                | Self::Sof3
                | Self::Sof5
                | Self::Sof6
                | Self::Sof7
                | Self::Sof9
                | Self::Sof10
                | Self::Sof11
                | Self::Sof13
                | Self::Sof14
                | Self::Sof15
        )
    }

    /// Segments that may carry metadata worth decoding.
    pub fn can_contain_metadata(self) -> bool {
        let b = self.byte();
        (0xE0..=0xEF).contains(&b) || self == Self::Com || self.is_start_of_frame()
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Sof0 => "SOF0 (Baseline DCT)",
            Self::Sof1 => "SOF1 (Extended sequential DCT)",
            Self::Sof2 => "SOF2 (Progressive DCT)",
            Self::Sof3 => "SOF3 (Lossless)",
            Self::Dht => "DHT (Define Huffman Table)",
            Self::Sof5 => "SOF5 (Differential sequential DCT)",
            Self::Sof6 => "SOF6 (Differential progressive DCT)",
            Self::Sof7 => "SOF7 (Differential lossless)",
            Self::Jpg => "JPG (JPEG extensions)",
            Self::Sof9 => "SOF9 (Extended sequential DCT, arithmetic)",
            Self::Sof10 => "SOF10 (Progressive DCT, arithmetic)",
            Self::Sof11 => "SOF11 (Lossless, arithmetic)",
            Self::Dac => "DAC (Define Arithmetic Coding)",
            Self::Sof13 => "SOF13 (Differential sequential DCT, arithmetic)",
            Self::Sof14 => "SOF14 (Differential progressive DCT, arithmetic)",
            Self::Sof15 => "SOF15 (Differential lossless, arithmetic)",
            Self::Sos => "SOS (Start Of Scan)",
            Self::Dqt => "DQT (Define Quantization Table)",
            Self::Dnl => "DNL (Define Number of Lines)",
            Self::Dri => "DRI (Define Restart Interval)",
            Self::Dhp => "DHP (Define Hierarchical Progression)",
            Self::Exp => "EXP (Expand Reference Components)",
            Self::App0 => "APP0",
            Self::App1 => "APP1",
            Self::App2 => "APP2",
            Self::App3 => "APP3",
            Self::App4 => "APP4",
            Self::App5 => "APP5",
            Self::App6 => "APP6",
            Self::App7 => "APP7",
            Self::App8 => "APP8",
            Self::App9 => "APP9",
            Self::AppA => "APPA",
            Self::AppB => "APPB",
            Self::AppC => "APPC",
            Self::AppD => "APPD",
            Self::AppE => "APPE",
            Self::AppF => "APPF",
            Self::Com => "COM (Comment)",
        }
    }
}

impl TryFrom<u8> for JpegSegmentType {
    type Error = Error;

    fn try_from(b: u8) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.byte() == b)
            .ok_or(Error::UnknownSegmentType(b))
    }
}

impl std::fmt::Display for JpegSegmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw JPEG segment payloads grouped by segment type.
///
/// Each type keeps its occurrences in the order they were added, which for
/// data produced by [`JpegSegmentReader`] is stream order.
#[derive(Debug, Default, Clone)]
pub struct JpegSegmentData {
    segments: BTreeMap<JpegSegmentType, Vec<Vec<u8>>>,
}

impl JpegSegmentData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_segment(&mut self, kind: JpegSegmentType, bytes: Vec<u8>) {
        self.segments.entry(kind).or_default().push(bytes);
    }

    /// Adds a segment keyed by its raw marker byte. Fails for bytes that do
    /// not name a known segment type.
    pub fn add_segment_byte(&mut self, marker: u8, bytes: Vec<u8>) -> Result<()> {
        let kind = JpegSegmentType::try_from(marker)?;
        self.add_segment(kind, bytes);
        Ok(())
    }

    /// First occurrence of `kind`.
    pub fn segment(&self, kind: JpegSegmentType) -> Option<&[u8]> {
        self.segment_at(kind, 0)
    }

    pub fn segment_at(&self, kind: JpegSegmentType, occurrence: usize) -> Option<&[u8]> {
        self.segments
            .get(&kind)
            .and_then(|list| list.get(occurrence))
            .map(Vec::as_slice)
    }

    /// All occurrences of `kind` in insertion order. Empty when none were
    /// added; clone the iterator to walk it again.
    pub fn segments(
        &self,
        kind: JpegSegmentType,
    ) -> impl Iterator<Item = &[u8]> + Clone + '_ {
        self.segments
            .get(&kind)
            .map(Vec::as_slice)
            .unwrap_or(&[])
            .iter()
            .map(Vec::as_slice)
    }

    pub fn segment_count(&self, kind: JpegSegmentType) -> usize {
        self.segments.get(&kind).map_or(0, Vec::len)
    }

    /// Removes one occurrence; later occurrences move down by one.
    pub fn remove_segment_occurrence(
        &mut self,
        kind: JpegSegmentType,
        occurrence: usize,
    ) -> Option<Vec<u8>> {
        let list = self.segments.get_mut(&kind)?;
        if occurrence >= list.len() {
            return None;
        }
        let removed = list.remove(occurrence);
        if list.is_empty() {
            self.segments.remove(&kind);
        }
        Some(removed)
    }

    pub fn remove_segment(&mut self, kind: JpegSegmentType) {
        self.segments.remove(&kind);
    }

    pub fn contains_segment(&self, kind: JpegSegmentType) -> bool {
        self.segments.contains_key(&kind)
    }

    /// Distinct types holding at least one occurrence, ordered by marker byte.
    pub fn segment_types(&self) -> impl Iterator<Item = JpegSegmentType> + '_ {
        self.segments.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

const MARKER_SOI: u16 = 0xFFD8;
const MARKER_EOI: u8 = 0xD9;

/// Splits a JPEG stream into its segments, up to the first scan.
///
/// With a filter only the listed types are kept; everything else is skipped
/// without being buffered.
#[derive(Debug, Default, Clone)]
pub struct JpegSegmentReader {
    filter: Option<Vec<JpegSegmentType>>,
}

impl JpegSegmentReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(types: &[JpegSegmentType]) -> Self {
        Self {
            filter: Some(types.to_vec()),
        }
    }

    fn wants(&self, kind: JpegSegmentType) -> bool {
        self.filter.as_ref().is_none_or(|f| f.contains(&kind))
    }

    pub fn read_segments(&self, reader: &mut SequentialReader<'_>) -> Result<JpegSegmentData> {
        reader.set_motorola_byte_order(true);

        let magic = reader.get_u16()?;
        if magic != MARKER_SOI {
            return Err(Error::Jpeg(format!(
                "JPEG data is expected to begin with 0xFFD8 not 0x{:04X}",
                magic
            )));
        }

        let mut data = JpegSegmentData::new();
        loop {
            let lead = reader.get_u8()?;
            if lead != 0xFF {
                return Err(Error::Jpeg(format!(
                    "expected JPEG segment start identifier 0xFF, not 0x{:02X}",
                    lead
                )));
            }
            // any number of 0xFF fill bytes may precede the marker
            let mut marker = reader.get_u8()?;
            while marker == 0xFF {
                marker = reader.get_u8()?;
            }
            if marker == 0x00 {
                return Err(Error::Jpeg(
                    "expected non-zero byte as part of JPEG marker identifier".into(),
                ));
            }
            if marker == JpegSegmentType::Sos.byte() || marker == MARKER_EOI {
                // scan data has no length prefix; nothing past here is read
                debug!(segments = data.segments.len(), "reached 0x{:02X}, stopping", marker);
                return Ok(data);
            }

            let length = reader.get_u16()?;
            if length < 2 {
                return Err(Error::Jpeg(format!(
                    "JPEG segment size would be less than zero ({})",
                    length as i32 - 2
                )));
            }
            let payload_len = (length - 2) as usize;

            match JpegSegmentType::try_from(marker) {
                Ok(kind) if self.wants(kind) => {
                    trace!(%kind, payload_len, "keeping segment");
                    let bytes = reader.get_bytes(payload_len)?;
                    data.add_segment(kind, bytes);
                }
                other => {
                    if other.is_err() {
                        debug!("skipping unrecognized marker 0x{:02X}", marker);
                    }
                    if !reader.try_skip(payload_len as u64)? {
                        return Ok(data);
                    }
                }
            }
        }
    }
}
