//! The lump directory.
//!
//! Starting at the header's directory offset, one 16-byte entry per lump:
//!
//! ```text
//! [+0x00] LumpOffset  (i32 LE, absolute)
//! [+0x04] LumpLength  (i32 LE)
//! [+0x08] Name        (8 bytes, NUL-padded, not necessarily NUL-terminated)
//! ```

use std::io::Read;
use std::ops::Index;
use std::slice;

use byteorder::{LittleEndian, ReadBytesExt};
use log::{debug, trace};

use crate::error::{seek_to, EntryField, Error, Result, SeekTarget};
use crate::header::Header;
use crate::lump::Lump;
use crate::ByteSource;

/// Size of one directory entry in bytes.
pub const ENTRY_SIZE: u64 = 16;

/// Width of the name field in bytes.
pub const NAME_SIZE: usize = 8;

// Cap on up-front allocation for untrusted entry counts.
const MAX_PREALLOC: usize = 4096;

/// Decode a fixed-width name field.
///
/// The name ends at the first NUL byte. Without one, all eight bytes are
/// used. Non-UTF-8 bytes are replaced, nothing else is checked.
pub fn decode_name(raw: &[u8; NAME_SIZE]) -> String {
    let end = raw.iter().position(|&b| b == 0).unwrap_or(NAME_SIZE);
    String::from_utf8_lossy(&raw[..end]).into_owned()
}

/// The lumps of a WAD in on-disk order.
///
/// Names may repeat or be empty; nothing is sorted, merged or filtered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directory {
    lumps: Vec<Lump>,
}

impl Directory {
    pub fn len(&self) -> usize {
        self.lumps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lumps.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Lump> {
        self.lumps.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Lump> {
        self.lumps.get(index)
    }

    /// First lump called `name`, in directory order.
    pub fn find(&self, name: &str) -> Option<&Lump> {
        self.lumps.iter().find(|l| l.name == name)
    }

    /// Lump names in directory order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.lumps.iter().map(|l| l.name.as_str())
    }

    /// Check every lump against a source of `source_len` bytes, reporting
    /// the first lump that does not fit.
    pub fn check_bounds(&self, source_len: u64) -> Result<()> {
        self.lumps.iter().try_for_each(|l| l.check_bounds(source_len))
    }

    pub fn as_slice(&self) -> &[Lump] {
        &self.lumps
    }

    pub fn into_vec(self) -> Vec<Lump> {
        self.lumps
    }
}

impl Index<usize> for Directory {
    type Output = Lump;

    fn index(&self, index: usize) -> &Lump {
        &self.lumps[index]
    }
}

impl IntoIterator for Directory {
    type Item = Lump;
    type IntoIter = std::vec::IntoIter<Lump>;

    fn into_iter(self) -> Self::IntoIter {
        self.lumps.into_iter()
    }
}

impl<'a> IntoIterator for &'a Directory {
    type Item = &'a Lump;
    type IntoIter = slice::Iter<'a, Lump>;

    fn into_iter(self) -> Self::IntoIter {
        self.lumps.iter()
    }
}

/// Seek to the directory described by `header` and decode its entries.
///
/// Only one seek happens; entries are then read back to back. A count of
/// zero or less gives an empty directory after the seek. Any short read
/// fails the whole call with [`Error::TruncatedEntry`].
pub fn read_directory<R: ByteSource + ?Sized>(header: &Header, source: &mut R) -> Result<Directory> {
    seek_to(source, i64::from(header.directory_start), SeekTarget::Directory)?;

    let count = usize::try_from(header.directory_entry_count).unwrap_or(0);
    let mut lumps = Vec::with_capacity(count.min(MAX_PREALLOC));
    for index in 0..count {
        let lump = read_entry(source, index)?;
        trace!(
            "entry {}: '{}' at {} ({} bytes)",
            index,
            lump.name,
            lump.file_offset,
            lump.size
        );
        lumps.push(lump);
    }

    debug!(
        "read {} directory entries at {}",
        lumps.len(),
        header.directory_start
    );
    Ok(Directory { lumps })
}

fn read_entry<R: Read + ?Sized>(source: &mut R, index: usize) -> Result<Lump> {
    let file_offset = source
        .read_i32::<LittleEndian>()
        .map_err(|e| truncated(index, EntryField::Offset, e))?;
    let size = source
        .read_i32::<LittleEndian>()
        .map_err(|e| truncated(index, EntryField::Length, e))?;
    let mut raw_name = [0u8; NAME_SIZE];
    source
        .read_exact(&mut raw_name)
        .map_err(|e| truncated(index, EntryField::Name, e))?;

    Ok(Lump {
        name: decode_name(&raw_name),
        file_offset,
        size,
    })
}

fn truncated(index: usize, field: EntryField, source: std::io::Error) -> Error {
    Error::TruncatedEntry { index, field, source }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::WadType;
    use std::io::{self, Cursor, Seek, SeekFrom};

    fn entry(offset: i32, size: i32, name: &[u8; 8]) -> Vec<u8> {
        let mut v = offset.to_le_bytes().to_vec();
        v.extend_from_slice(&size.to_le_bytes());
        v.extend_from_slice(name);
        v
    }

    fn header(count: i32, start: i32) -> Header {
        Header {
            wad_type: WadType::PWAD,
            directory_entry_count: count,
            directory_start: start,
        }
    }

    /// Counts reads so tests can tell whether entries were decoded.
    struct CountingSource {
        inner: Cursor<Vec<u8>>,
        reads: usize,
        last_seek: Option<SeekFrom>,
    }

    impl Read for CountingSource {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.reads += 1;
            self.inner.read(buf)
        }
    }

    impl Seek for CountingSource {
        fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
            self.last_seek = Some(pos);
            self.inner.seek(pos)
        }
    }

    #[test]
    fn name_stops_at_first_nul() {
        assert_eq!(decode_name(b"E1M1\0\0\0\0"), "E1M1");
        assert_eq!(decode_name(b"A\0BCDEFG"), "A");
        assert_eq!(decode_name(b"\0\0\0\0\0\0\0\0"), "");
    }

    #[test]
    fn name_without_nul_uses_all_bytes() {
        assert_eq!(decode_name(b"12345678"), "12345678");
    }

    #[test]
    fn empty_directory_seeks_but_does_not_read() {
        for count in [0, -5] {
            let mut src = CountingSource {
                inner: Cursor::new(vec![0xffu8; 64]),
                reads: 0,
                last_seek: None,
            };
            let dir = read_directory(&header(count, 40), &mut src).unwrap();
            assert!(dir.is_empty());
            assert_eq!(src.reads, 0);
            assert_eq!(src.last_seek, Some(SeekFrom::Start(40)));
        }
    }

    #[test]
    fn preserves_disk_order() {
        let names: [&[u8; 8]; 4] = [
            b"ZZZ\0\0\0\0\0",
            b"AAA\0\0\0\0\0",
            b"MMM\0\0\0\0\0",
            b"BBB\0\0\0\0\0",
        ];
        let mut data = vec![0u8; 4];
        for (i, name) in names.iter().enumerate() {
            data.extend(entry(i as i32 * 10, i as i32, name));
        }
        let dir = read_directory(&header(4, 4), &mut Cursor::new(data)).unwrap();
        assert_eq!(dir.names().collect::<Vec<_>>(), ["ZZZ", "AAA", "MMM", "BBB"]);
        assert_eq!(dir[2].file_offset, 20);
        assert_eq!(dir[3].size, 3);
    }

    #[test]
    fn duplicate_and_empty_names_are_kept() {
        let mut data = entry(0, 0, b"F_START\0");
        data.extend(entry(0, 0, b"\0\0\0\0\0\0\0\0"));
        data.extend(entry(0, 0, b"F_START\0"));
        let dir = read_directory(&header(3, 0), &mut Cursor::new(data)).unwrap();
        assert_eq!(dir.names().collect::<Vec<_>>(), ["F_START", "", "F_START"]);
        assert!(std::ptr::eq(dir.find("F_START").unwrap(), &dir[0]));
        assert!(dir.find("F_END").is_none());
    }

    #[test]
    fn truncated_entry_reports_index_and_field() {
        let mut data = entry(1, 2, b"ONE\0\0\0\0\0");
        data.extend(entry(3, 4, b"TWO\0\0\0\0\0"));
        let full = data.len();

        let cases = [
            (full - 1, EntryField::Name),
            (full - 10, EntryField::Length),
            (full - 14, EntryField::Offset),
        ];
        for (len, expected) in cases {
            let mut src = Cursor::new(data[..len].to_vec());
            match read_directory(&header(2, 0), &mut src) {
                Err(Error::TruncatedEntry { index, field, source }) => {
                    assert_eq!(index, 1);
                    assert_eq!(field, expected);
                    assert_eq!(source.kind(), io::ErrorKind::UnexpectedEof);
                }
                other => panic!("unexpected result {:?}", other),
            }
        }
    }

    #[test]
    fn negative_directory_offset_is_a_seek_error() {
        let mut src = Cursor::new(vec![0u8; 32]);
        match read_directory(&header(1, -16), &mut src) {
            Err(Error::Seek { target, position, .. }) => {
                assert_eq!(target, SeekTarget::Directory);
                assert_eq!(position, -16);
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn offset_past_end_fails_on_first_entry() {
        let mut src = Cursor::new(vec![0u8; 32]);
        match read_directory(&header(1, 1000), &mut src) {
            Err(Error::TruncatedEntry { index: 0, field: EntryField::Offset, .. }) => {}
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn check_bounds_reports_first_bad_lump() {
        let mut data = entry(0, 8, b"OK\0\0\0\0\0\0");
        data.extend(entry(4, 100, b"BIG\0\0\0\0\0"));
        data.extend(entry(-1, 1, b"NEG\0\0\0\0\0"));
        let dir = read_directory(&header(3, 0), &mut Cursor::new(data)).unwrap();
        match dir.check_bounds(48) {
            Err(Error::LumpOutOfBounds { name, .. }) => assert_eq!(name, "BIG"),
            other => panic!("unexpected result {:?}", other),
        }
        assert!(Directory { lumps: vec![dir[0].clone()] }.check_bounds(48).is_ok());
    }

    #[test]
    fn accessors_agree_with_disk_order() {
        let mut data = entry(16, 4, b"PLAYPAL\0");
        data.extend(entry(20, 8, b"COLORMAP"));
        let dir = read_directory(&header(2, 0), &mut Cursor::new(data)).unwrap();

        assert_eq!(dir.get(1).map(|l| l.name.as_str()), Some("COLORMAP"));
        assert!(dir.get(2).is_none());
        assert_eq!(dir.as_slice().len(), 2);
        assert_eq!(dir.iter().count(), (&dir).into_iter().count());

        let owned: Vec<Lump> = dir.clone().into_iter().collect();
        assert_eq!(owned, dir.clone().into_vec());
        assert_eq!(owned[0].file_offset, 16);
        assert_eq!(owned[1].size, 8);
    }
}
