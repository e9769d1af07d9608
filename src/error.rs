//! Error types for WAD decoding.

use std::fmt;
use std::io;

use thiserror::Error;

/// Where a failed seek was headed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeekTarget {
    Header,
    Directory,
    Lump { name: String },
}

impl fmt::Display for SeekTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeekTarget::Header => write!(f, "header"),
            SeekTarget::Directory => write!(f, "directory"),
            SeekTarget::Lump { name } => write!(f, "lump '{}'", name),
        }
    }
}

/// Header field being read when the source ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderField {
    Magic,
    LumpCount,
    DirectoryOffset,
}

impl fmt::Display for HeaderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HeaderField::Magic => "magic",
            HeaderField::LumpCount => "lump count",
            HeaderField::DirectoryOffset => "directory offset",
        })
    }
}

/// Directory entry field being read when the source ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryField {
    Offset,
    Length,
    Name,
}

impl fmt::Display for EntryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EntryField::Offset => "offset",
            EntryField::Length => "length",
            EntryField::Name => "name",
        })
    }
}

/// All errors the decoder can produce.
///
/// A short lump is not an error: the bounded lump reader simply reaches
/// end-of-data early.
#[derive(Debug, Error)]
pub enum Error {
    /// Seeking the source to an absolute position failed.
    #[error("cannot seek to {target} at position {position}")]
    Seek {
        target: SeekTarget,
        position: i64,
        #[source]
        source: io::Error,
    },

    /// The first four bytes are neither `IWAD` nor `PWAD`.
    #[error("invalid WAD tag {}", show_bytes(.found))]
    InvalidMagic { found: Vec<u8> },

    /// The source ended (or failed) inside the 12-byte header.
    #[error("truncated header while reading {field}")]
    TruncatedHeader {
        field: HeaderField,
        #[source]
        source: io::Error,
    },

    /// The source ended (or failed) inside directory entry `index`.
    #[error("truncated directory entry {index} while reading {field}")]
    TruncatedEntry {
        index: usize,
        field: EntryField,
        #[source]
        source: io::Error,
    },

    /// A lump's byte range does not fit the source.
    #[error("lump '{name}' at offset {offset} with length {length} exceeds source of {source_len} bytes")]
    LumpOutOfBounds {
        name: String,
        offset: i32,
        length: i32,
        source_len: u64,
    },

    /// Opening or inspecting a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

fn show_bytes(bytes: &[u8]) -> String {
    format!("{:?}", String::from_utf8_lossy(bytes))
}

/// Seek `source` to the absolute `position`, rejecting negative positions
/// before the source is touched.
pub(crate) fn seek_to<R: io::Seek + ?Sized>(
    source: &mut R,
    position: i64,
    target: SeekTarget,
) -> Result<()> {
    u64::try_from(position)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "negative seek position"))
        .and_then(|start| source.seek(io::SeekFrom::Start(start)))
        .map(|_| ())
        .map_err(|source| Error::Seek { target, position, source })
}
