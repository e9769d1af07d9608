//! Lump descriptors and bounded access to lump contents.

use std::io::{Read, Take};

use log::trace;

use crate::error::{seek_to, Error, Result, SeekTarget};
use crate::ByteSource;

/// Reader over one lump's bytes, borrowed from the source.
pub type LumpReader<'a, R> = Take<&'a mut R>;

/// One directory entry. Describes a byte range of the source; owns no
/// lump data.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Lump {
    pub name: String,
    pub file_offset: i32,
    pub size: i32,
}

impl Lump {
    /// Open this lump's contents. See [`open_lump`].
    pub fn open<'a, R: ByteSource + ?Sized>(&self, source: &'a mut R) -> Result<LumpReader<'a, R>> {
        open_lump(self, source)
    }

    /// Read this lump's contents into memory. See [`read_lump`].
    pub fn read<R: ByteSource + ?Sized>(&self, source: &mut R) -> Result<Vec<u8>> {
        read_lump(self, source)
    }

    /// Check that the lump lies within a source of `source_len` bytes.
    pub fn check_bounds(&self, source_len: u64) -> Result<()> {
        let fits = match (u64::try_from(self.file_offset), u64::try_from(self.size)) {
            (Ok(offset), Ok(size)) => offset + size <= source_len,
            _ => false,
        };
        if fits {
            Ok(())
        } else {
            Err(Error::LumpOutOfBounds {
                name: self.name.clone(),
                offset: self.file_offset,
                length: self.size,
                source_len,
            })
        }
    }
}

/// Seek to `lump` and return a reader yielding at most `lump.size` bytes.
///
/// Nothing is read or checked up front. If the source holds fewer bytes
/// than the lump claims, the reader ends early; a negative size reads as
/// empty. The reader borrows `source`, so no other operation can move the
/// cursor while it is alive.
pub fn open_lump<'a, R: ByteSource + ?Sized>(lump: &Lump, source: &'a mut R) -> Result<LumpReader<'a, R>> {
    seek_to(
        source,
        i64::from(lump.file_offset),
        SeekTarget::Lump {
            name: lump.name.clone(),
        },
    )?;
    trace!("opened lump '{}' at {} ({} bytes)", lump.name, lump.file_offset, lump.size);
    let limit = u64::try_from(lump.size).unwrap_or(0);
    Ok(Read::take(source, limit))
}

/// Read a whole lump into memory.
///
/// A short lump yields the bytes that were available.
pub fn read_lump<R: ByteSource + ?Sized>(lump: &Lump, source: &mut R) -> Result<Vec<u8>> {
    let mut reader = open_lump(lump, source)?;
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    Ok(data)
}
