//! Reader for WAD lump archives.
//!
//! A WAD starts with a 12-byte [`Header`] naming its type (`IWAD` or
//! `PWAD`), the number of lumps and where the [`Directory`] lives. The
//! directory lists every [`Lump`] by name, offset and size. Lump contents
//! are never interpreted; [`open_lump`] hands back a bounded reader over
//! the raw bytes.
//!
//! Every operation takes the byte source by mutable reference and starts
//! with an absolute seek, so header, directory and lump reads can be
//! issued in any order against the same source, one at a time.
//!
//! ```no_run
//! use std::fs::File;
//! use std::io::Read;
//!
//! # fn main() -> wadfile::Result<()> {
//! let mut f = File::open("doom1.wad")?;
//! let header = wadfile::read_header(&mut f)?;
//! let directory = header.directory(&mut f)?;
//! if let Some(lump) = directory.find("PLAYPAL") {
//!     let mut palette = Vec::new();
//!     lump.open(&mut f)?.read_to_end(&mut palette)?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod directory;
pub mod error;
pub mod header;
pub mod lump;
pub mod wad;

use std::io::{Read, Seek};

pub use directory::{decode_name, read_directory, Directory};
pub use error::{EntryField, Error, HeaderField, Result, SeekTarget};
pub use header::{read_header, Header, WadType};
pub use lump::{open_lump, read_lump, Lump, LumpReader};
pub use wad::Wad;

/// A seekable byte source the decoders read from.
///
/// Implemented for everything that is `Read + Seek`.
pub trait ByteSource: Read + Seek {}

impl<T: Read + Seek + ?Sized> ByteSource for T {}
