use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::info;

use crate::directory::{read_directory, Directory};
use crate::error::Result;
use crate::header::{read_header, Header, WadType};
use crate::ByteSource;

/// Header and directory of one WAD.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wad {
    pub header: Header,
    pub directory: Directory,
}

impl Wad {
    /// Read the header, then the directory, from `source`.
    pub fn read<R: ByteSource + ?Sized>(source: &mut R) -> Result<Wad> {
        let header = read_header(source)?;
        let directory = read_directory(&header, source)?;
        Ok(Wad { header, directory })
    }

    /// Read header and directory information from the WAD file at `path`.
    /// The file is closed again before returning. Lump contents are not
    /// read; reopen the file and use [`crate::open_lump`] for that.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Wad> {
        let path = path.as_ref();
        info!("reading WAD file {}", path.display());
        let mut f = BufReader::new(File::open(path)?);
        Wad::read(&mut f)
    }

    pub fn wad_type(&self) -> WadType {
        self.header.wad_type
    }

    /// Lump names in directory order.
    pub fn lump_names(&self) -> Vec<String> {
        self.directory.names().map(str::to_owned).collect()
    }
}
