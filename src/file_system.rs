use crate::directory::{Directory, DirectoryKind, TagValue, tag_enum};
use crate::error::Result;
use chrono::{DateTime, Utc};
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

tag_enum! {
    pub enum FileTag {
        FileName = 1 => "File Name",
        FileSize = 2 => "File Size",
        FileModifiedDate = 3 => "File Modified Date",
        FileCreatedDate = 4 => "File Created Date",
    }
}

/// Builds the directory describing the file itself (name, size, times).
///
/// Failing to stat the file is an I/O error. A platform that does not track
/// creation time gets an error string on the directory instead.
pub fn read_directory(path: impl AsRef<Path>) -> Result<Directory> {
    let path = path.as_ref();
    let meta = fs::metadata(path)?;
    let mut directory = Directory::new(DirectoryKind::FileMetadata);

    if let Some(name) = path.file_name() {
        directory.set(FileTag::FileName, name.to_string_lossy().into_owned());
    }
    directory.set(FileTag::FileSize, meta.len());
    directory.set(FileTag::FileModifiedDate, DateTime::<Utc>::from(meta.modified()?));

    match meta.created() {
        Ok(created) => directory.set(FileTag::FileCreatedDate, DateTime::<Utc>::from(created)),
        Err(e) if e.kind() == io::ErrorKind::Unsupported => {
            directory.add_error("File creation time is not available on this platform");
        }
        Err(e) => return Err(e.into()),
    }

    debug!(path = %path.display(), size = meta.len(), "collected file metadata");
    Ok(directory)
}

pub(crate) fn describe(code: i32, value: &TagValue) -> Option<String> {
    match (FileTag::from_code(code)?, value) {
        (FileTag::FileSize, TagValue::Int(v)) => Some(format!("{} bytes", v)),
        (FileTag::FileModifiedDate | FileTag::FileCreatedDate, TagValue::Date(d)) => {
            Some(d.format("%a %b %d %H:%M:%S %:z %Y").to_string())
        }
        _ => None,
    }
}
