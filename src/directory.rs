use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A decoded tag value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TagValue {
    Int(i64),
    Bool(bool),
    Float(f64),
    Bytes(Vec<u8>),
    Str(String),
    Date(DateTime<Utc>),
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Int(v) => write!(f, "{}", v),
            TagValue::Bool(v) => write!(f, "{}", v),
            TagValue::Float(v) => write!(f, "{}", v),
            TagValue::Bytes(b) if b.len() <= 16 => {
                let parts: Vec<String> = b.iter().map(|x| x.to_string()).collect();
                write!(f, "{}", parts.join(" "))
            }
            TagValue::Bytes(b) => write!(f, "[{} bytes]", b.len()),
            TagValue::Str(s) => f.write_str(s),
            TagValue::Date(d) => write!(f, "{}", d.to_rfc3339()),
        }
    }
}

impl From<i64> for TagValue {
    fn from(v: i64) -> Self {
        TagValue::Int(v)
    }
}
impl From<i32> for TagValue {
    fn from(v: i32) -> Self {
        TagValue::Int(v as i64)
    }
}
impl From<i16> for TagValue {
    fn from(v: i16) -> Self {
        TagValue::Int(v as i64)
    }
}
impl From<u8> for TagValue {
    fn from(v: u8) -> Self {
        TagValue::Int(v as i64)
    }
}
impl From<u16> for TagValue {
    fn from(v: u16) -> Self {
        TagValue::Int(v as i64)
    }
}
impl From<u32> for TagValue {
    fn from(v: u32) -> Self {
        TagValue::Int(v as i64)
    }
}
impl From<u64> for TagValue {
    fn from(v: u64) -> Self {
        TagValue::Int(i64::try_from(v).unwrap_or(i64::MAX))
    }
}
impl From<bool> for TagValue {
    fn from(v: bool) -> Self {
        TagValue::Bool(v)
    }
}
impl From<f64> for TagValue {
    fn from(v: f64) -> Self {
        TagValue::Float(v)
    }
}
impl From<Vec<u8>> for TagValue {
    fn from(v: Vec<u8>) -> Self {
        TagValue::Bytes(v)
    }
}
impl From<String> for TagValue {
    fn from(v: String) -> Self {
        TagValue::Str(v)
    }
}
impl From<&str> for TagValue {
    fn from(v: &str) -> Self {
        TagValue::Str(v.to_string())
    }
}
impl From<DateTime<Utc>> for TagValue {
    fn from(v: DateTime<Utc>) -> Self {
        TagValue::Date(v)
    }
}

/// Declares a tag enum with a fixed code and display name per variant.
macro_rules! tag_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident = $code:expr => $label:expr,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($variant,)+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            pub fn code(self) -> i32 {
                match self {
                    $($name::$variant => $code,)+
                }
            }

            pub fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            pub fn from_code(code: i32) -> Option<Self> {
                Self::ALL.iter().copied().find(|t| t.code() == code)
            }
        }

        impl From<$name> for i32 {
            fn from(tag: $name) -> i32 {
                tag.code()
            }
        }
    };
}

pub(crate) use tag_enum;

/// The closed set of directory variants this crate produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DirectoryKind {
    BmpHeader,
    GifHeader,
    PsdHeader,
    Pcx,
    Jpeg,
    JpegComment,
    FileMetadata,
}

impl DirectoryKind {
    pub fn name(&self) -> &'static str {
        match self {
            DirectoryKind::BmpHeader => "BMP Header",
            DirectoryKind::GifHeader => "GIF Header",
            DirectoryKind::PsdHeader => "PSD Header",
            DirectoryKind::Pcx => "PCX",
            DirectoryKind::Jpeg => "JPEG",
            DirectoryKind::JpegComment => "JpegComment",
            DirectoryKind::FileMetadata => "File",
        }
    }

    pub fn tag_name(&self, code: i32) -> Option<&'static str> {
        match self {
            DirectoryKind::BmpHeader => crate::bmp::BmpTag::from_code(code).map(|t| t.name()),
            DirectoryKind::GifHeader => crate::gif::GifTag::from_code(code).map(|t| t.name()),
            DirectoryKind::PsdHeader => crate::psd::PsdTag::from_code(code).map(|t| t.name()),
            DirectoryKind::Pcx => crate::pcx::PcxTag::from_code(code).map(|t| t.name()),
            DirectoryKind::Jpeg => crate::jpeg::JpegTag::from_code(code).map(|t| t.name()),
            DirectoryKind::JpegComment => {
                crate::jpeg::JpegCommentTag::from_code(code).map(|t| t.name())
            }
            DirectoryKind::FileMetadata => {
                crate::file_system::FileTag::from_code(code).map(|t| t.name())
            }
        }
    }
}

impl fmt::Display for DirectoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tag values decoded from one structural unit of a file, plus any
/// non-fatal errors met while decoding it.
#[derive(Debug, Clone, Serialize)]
pub struct Directory {
    kind: DirectoryKind,
    tags: BTreeMap<i32, TagValue>,
    errors: Vec<String>,
}

impl Directory {
    pub fn new(kind: DirectoryKind) -> Self {
        Self {
            kind,
            tags: BTreeMap::new(),
            errors: Vec::new(),
        }
    }

    pub fn kind(&self) -> DirectoryKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Sets a tag, replacing any earlier value for the same code.
    pub fn set(&mut self, tag: impl Into<i32>, value: impl Into<TagValue>) {
        self.tags.insert(tag.into(), value.into());
    }

    pub fn get(&self, tag: impl Into<i32>) -> Option<&TagValue> {
        self.tags.get(&tag.into())
    }

    pub fn get_int(&self, tag: impl Into<i32>) -> Option<i64> {
        match self.get(tag) {
            Some(TagValue::Int(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn get_bool(&self, tag: impl Into<i32>) -> Option<bool> {
        match self.get(tag) {
            Some(TagValue::Bool(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn get_float(&self, tag: impl Into<i32>) -> Option<f64> {
        match self.get(tag) {
            Some(TagValue::Float(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn get_string(&self, tag: impl Into<i32>) -> Option<&str> {
        match self.get(tag) {
            Some(TagValue::Str(s)) => Some(s),
            _ => None,
        }
    }

    pub fn get_bytes(&self, tag: impl Into<i32>) -> Option<&[u8]> {
        match self.get(tag) {
            Some(TagValue::Bytes(b)) => Some(b),
            _ => None,
        }
    }

    pub fn contains(&self, tag: impl Into<i32>) -> bool {
        self.tags.contains_key(&tag.into())
    }

    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    /// Tags in ascending code order.
    pub fn tags(&self) -> impl Iterator<Item = (i32, &TagValue)> {
        self.tags.iter().map(|(k, v)| (*k, v))
    }

    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn tag_name(&self, code: i32) -> String {
        self.kind
            .tag_name(code)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Unknown tag (0x{:04x})", code))
    }

    /// Human-readable rendering of a tag's value, if the tag is set.
    pub fn description(&self, code: i32) -> Option<String> {
        let value = self.tags.get(&code)?;
        let specific = match self.kind {
            DirectoryKind::BmpHeader => crate::bmp::describe(code, value),
            DirectoryKind::GifHeader => crate::gif::describe(code, value),
            DirectoryKind::PsdHeader => crate::psd::describe(code, value),
            DirectoryKind::Pcx => crate::pcx::describe(code, value),
            DirectoryKind::Jpeg => crate::jpeg::describe(code, value),
            DirectoryKind::JpegComment => None,
            DirectoryKind::FileMetadata => crate::file_system::describe(code, value),
        };
        Some(specific.unwrap_or_else(|| value.to_string()))
    }
}

/// Ordered collection of the directories read from one file.
#[derive(Debug, Default, Serialize)]
pub struct Metadata {
    directories: Vec<Directory>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a directory and returns a handle to it for further decoding.
    pub fn add_directory(&mut self, directory: Directory) -> &mut Directory {
        self.directories.push(directory);
        self.directories
            .last_mut()
            .expect("directory was just pushed")
    }

    pub fn directories(&self) -> &[Directory] {
        &self.directories
    }

    pub fn directories_of(&self, kind: DirectoryKind) -> impl Iterator<Item = &Directory> {
        self.directories.iter().filter(move |d| d.kind == kind)
    }

    pub fn first_of(&self, kind: DirectoryKind) -> Option<&Directory> {
        self.directories_of(kind).next()
    }

    pub fn has_errors(&self) -> bool {
        self.directories.iter().any(Directory::has_errors)
    }

    pub fn len(&self) -> usize {
        self.directories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directories.is_empty()
    }

    pub fn into_directories(self) -> Vec<Directory> {
        self.directories
    }
}
