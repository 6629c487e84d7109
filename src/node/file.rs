//! Blobs backed by files on disk.

use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use crate::node::Blob;

/// A blob whose content lives in a file.
///
/// The file is opened lazily on every [`Blob::new_stream`] call, so a missing
/// or unreadable file surfaces as an I/O error while content is being loaded.
#[derive(Debug, Clone)]
pub struct FileBlob {
    path: PathBuf,
}

impl FileBlob {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        FileBlob {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl Blob for FileBlob {
    fn new_stream(&self) -> std::io::Result<Box<dyn Read + '_>> {
        let file = File::open(&self.path)?;
        Ok(Box::new(BufReader::new(file)))
    }

    fn length(&self) -> Option<u64> {
        fs::metadata(&self.path).ok().map(|metadata| metadata.len())
    }
}
