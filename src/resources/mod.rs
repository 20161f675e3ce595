//! Acquiring rom data, either from a single file or from a zip archive of roms.
use std::{
    fs,
    io::{Read, Seek},
    path::Path,
};
use zip::read::ZipArchive;

use crate::ResourceError;

/// Represents an archive of roms
/// it contains all kind of information about the information of the archives
pub struct RomArchive<R> {
    archive: ZipArchive<R>,
}

impl<R: Read + Seek> RomArchive<R> {
    /// Will open the rom archive contained in the reader.
    pub fn from_reader(reader: R) -> Result<Self, ResourceError> {
        Ok(RomArchive {
            archive: ZipArchive::new(reader)?,
        })
    }

    /// Will return all the rom names available to be chosen
    pub fn file_names(&self) -> Vec<&'_ str> {
        let mut names: Vec<&str> = self.archive.file_names().collect();
        names.sort_unstable();
        names
    }

    /// Will decompress the rom with the given name from the zip archive
    pub fn get_file_data(&mut self, name: &str) -> Result<Rom, ResourceError> {
        let mut file = self.archive.by_name(name)?;
        let mut data = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut data)?;
        Ok(Rom::new(name, data))
    }
}

impl RomArchive<fs::File> {
    /// Will open the rom archive at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ResourceError> {
        Self::from_reader(fs::File::open(path)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents a single rom with it's information
pub struct Rom {
    /// The rom name
    name: String,
    /// The raw program, copied into memory at `0x200`
    data: Box<[u8]>,
}

impl Rom {
    /// Will generate a new rom based of the given data
    pub fn new<D: Into<Box<[u8]>>>(name: &str, data: D) -> Self {
        Rom {
            name: name.to_string(),
            data: data.into(),
        }
    }

    /// Will read the rom from the given file, the file name becomes the rom name.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ResourceError> {
        let path = path.as_ref();
        let data = fs::read(path)?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        log::debug!("Read {} bytes from {}", data.len(), path.display());
        Ok(Rom::new(&name, data))
    }

    /// Will return a slice internal values of the given data
    pub fn get_data(&self) -> &[u8] {
        &self.data
    }

    /// Will return the name of the rom.
    pub fn get_name(&self) -> &str {
        &self.name
    }
}
