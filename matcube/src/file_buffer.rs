//! Read-only file buffers for scanning
//!
//! A MAT-file is consumed as one contiguous byte range. Memory mapping is
//! preferred; if the map fails (unsupported filesystem, exotic platform)
//! the file is read into an owned allocation instead. Either way the
//! buffer is released on drop.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::{debug, warn};
use matcube_core::{Endian, MatError, HEADER_LEN};
use memmap2::Mmap;

use crate::error::{Error, Result};

enum Backing {
    Mapped(Mmap),
    Owned(Vec<u8>),
}

/// Whole-file read-only buffer with detected byte order
pub struct FileBuffer {
    backing: Backing,
    endian: Endian,
}

impl FileBuffer {
    /// Map or read the file at `path` and detect its byte order
    ///
    /// Fails when the file is shorter than the 128-byte header or when the
    /// endian marker at bytes 126..128 is unrecognized.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path)?;
        let len = file.metadata()?.len();
        if len < HEADER_LEN as u64 {
            return Err(Error::Format(MatError::FileTooSmall));
        }

        // SAFETY: the mapping is read-only and stays alive for as long as
        // any slice of it does, since all views borrow from this struct.
        let backing = match unsafe { Mmap::map(&file) } {
            Ok(mmap) => {
                debug!("mapped {} ({len} bytes)", path.display());
                Backing::Mapped(mmap)
            }
            Err(err) => {
                warn!(
                    "mmap failed for {} ({err}), falling back to buffered read",
                    path.display()
                );
                let mut data = Vec::with_capacity(len as usize);
                file.read_to_end(&mut data)?;
                if (data.len() as u64) != len {
                    return Err(Error::Format(MatError::FileTooSmall));
                }
                Backing::Owned(data)
            }
        };

        let bytes = match &backing {
            Backing::Mapped(mmap) => &mmap[..],
            Backing::Owned(data) => &data[..],
        };
        let endian = Endian::from_marker([bytes[126], bytes[127]])
            .ok_or(Error::Format(MatError::UnknownEndianness))?;

        Ok(Self { backing, endian })
    }

    /// The full file contents
    pub fn bytes(&self) -> &[u8] {
        match &self.backing {
            Backing::Mapped(mmap) => &mmap[..],
            Backing::Owned(data) => &data[..],
        }
    }

    /// Byte order declared by the file header
    pub fn endian(&self) -> Endian {
        self.endian
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_file(name: &str, contents: &[u8]) -> std::path::PathBuf {
        let path =
            std::env::temp_dir().join(format!("matcube-fb-{}-{name}", std::process::id()));
        let mut file = File::create(&path).unwrap();
        file.write_all(contents).unwrap();
        path
    }

    fn header_with_marker(marker: [u8; 2]) -> Vec<u8> {
        let mut bytes = vec![b' '; HEADER_LEN];
        bytes[126] = marker[0];
        bytes[127] = marker[1];
        bytes
    }

    #[test]
    fn test_detects_little_endian() {
        let path = temp_file("le", &header_with_marker(*b"IM"));
        let buffer = FileBuffer::open(&path).unwrap();
        assert_eq!(buffer.endian(), Endian::Little);
        assert_eq!(buffer.bytes().len(), HEADER_LEN);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_detects_big_endian() {
        let path = temp_file("be", &header_with_marker(*b"MI"));
        let buffer = FileBuffer::open(&path).unwrap();
        assert_eq!(buffer.endian(), Endian::Big);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_rejects_bad_marker() {
        let path = temp_file("bad", &header_with_marker(*b"XY"));
        assert!(matches!(
            FileBuffer::open(&path),
            Err(Error::Format(MatError::UnknownEndianness))
        ));
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_rejects_short_file() {
        let path = temp_file("short", &[0u8; 64]);
        assert!(matches!(
            FileBuffer::open(&path),
            Err(Error::Format(MatError::FileTooSmall))
        ));
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            FileBuffer::open("/nonexistent/matcube-test.mat"),
            Err(Error::Io(_))
        ));
    }
}
