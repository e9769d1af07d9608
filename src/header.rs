//! The 12-byte WAD header.
//!
//! ```text
//! [0x00] Magic "IWAD" or "PWAD"   (4 bytes)
//! [0x04] NumLumps                 (i32 LE)
//! [0x08] DirectoryOffset          (i32 LE, absolute)
//! ```

use std::fmt;
use std::io::Read;

use byteorder::{LittleEndian, ReadBytesExt};
use log::debug;

use crate::directory::{read_directory, Directory};
use crate::error::{seek_to, Error, HeaderField, Result, SeekTarget};
use crate::ByteSource;

/// Size of the header in bytes.
pub const HEADER_SIZE: u64 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WadType {
    IWAD,
    PWAD,
}

impl WadType {
    /// Recognise a magic tag. Matching is exact and case-sensitive.
    pub fn from_magic(magic: &[u8]) -> Option<WadType> {
        match magic {
            b"IWAD" => Some(WadType::IWAD),
            b"PWAD" => Some(WadType::PWAD),
            _ => None,
        }
    }

    /// The literal label, `"IWAD"` or `"PWAD"`.
    pub fn label(self) -> &'static str {
        match self {
            WadType::IWAD => "IWAD",
            WadType::PWAD => "PWAD",
        }
    }
}

impl fmt::Display for WadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Decoded WAD header.
///
/// The count and offset are kept exactly as stored; negative or oversized
/// values only fail once the directory is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub wad_type: WadType,
    pub directory_entry_count: i32,
    pub directory_start: i32,
}

impl Header {
    /// Read the directory this header points at. See [`read_directory`].
    pub fn directory<R: ByteSource + ?Sized>(&self, source: &mut R) -> Result<Directory> {
        read_directory(self, source)
    }
}

/// Read and validate the header at the start of `source`.
///
/// The source is first rewound to position 0. On success it is left at
/// byte 12; on failure its position is unspecified.
pub fn read_header<R: ByteSource + ?Sized>(source: &mut R) -> Result<Header> {
    seek_to(source, 0, SeekTarget::Header)?;

    let mut magic = Vec::with_capacity(4);
    Read::take(&mut *source, 4)
        .read_to_end(&mut magic)
        .map_err(|e| truncated(HeaderField::Magic, e))?;
    let wad_type = match WadType::from_magic(&magic) {
        Some(t) => t,
        None => return Err(Error::InvalidMagic { found: magic }),
    };

    let directory_entry_count = source
        .read_i32::<LittleEndian>()
        .map_err(|e| truncated(HeaderField::LumpCount, e))?;
    let directory_start = source
        .read_i32::<LittleEndian>()
        .map_err(|e| truncated(HeaderField::DirectoryOffset, e))?;

    let header = Header {
        wad_type,
        directory_entry_count,
        directory_start,
    };
    debug!(
        "{} header: {} lumps, directory at {}",
        wad_type, directory_entry_count, directory_start
    );
    Ok(header)
}

fn truncated(field: HeaderField, source: std::io::Error) -> Error {
    Error::TruncatedHeader { field, source }
}
