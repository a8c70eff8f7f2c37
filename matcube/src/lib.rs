//! matcube - MAT5 hyperspectral cube reader and writer
//!
//! This library reads and writes numeric arrays in the MATLAB Level-5
//! container format directly from raw bytes, with no external matrix-I/O
//! dependency. It targets the hyperspectral-viewer use case: rank-3 cubes
//! and rank-2 auxiliary arrays (wavelength tables, masks).
//!
//! ## Architecture
//!
//! The codec is split into specification and implementation:
//!
//! - **matcube-core**: pure MAT5 format definitions, tag and matrix
//!   parsing over borrowed slices, overflow-checked validation (no I/O)
//! - **matcube**: memory-mapped file buffers, zlib decompression,
//!   scanning with visitors, owned cube values, and the writer
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use matcube::MatFile;
//!
//! fn example() -> Result<(), matcube::Error> {
//!     let file = MatFile::open("scene.mat")?;
//!     for info in file.list_3d_variables()? {
//!         println!("{}: {:?} ({})", info.name, info.dims, info.data_type);
//!     }
//!     let (cube, name) = file.first_3d_cube()?;
//!     println!("loaded {name}, {} elements", cube.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Guarantees
//!
//! - Every length field is bounds- and overflow-checked before use
//! - Compressed elements are scanned transparently, with bounded nesting
//! - Loaded cubes are normalized to host byte order
//! - Well-formed matrices the codec cannot load (complex, unsupported
//!   class) are skipped, never an error

// Re-export core format definitions
pub use matcube_core::{
    align8, element_count, mi, mx, parse_matrix, read_element, CubeElement, Endian, MatDataType,
    MatError, ParsedMatrix, RawElement, COMPLEX_FLAG, HEADER_LEN, MAX_NAME_LEN,
};

pub mod cube;
pub mod error;
pub mod file_buffer;
mod inflate;
mod scan;
pub mod write;

pub use cube::{Cube, CubeInfo};
pub use error::{Error, Result};
pub use file_buffer::FileBuffer;
pub use write::{save_3d_cube, save_wavelengths};

use scan::{scan_elements, ListVisitor, LoadVisitor, MatrixVisitor};
use std::path::Path;

/// An open MAT-file ready for scanning
///
/// Holds the whole file (memory-mapped when possible) for the lifetime of
/// the handle; all queries scan the element stream on demand.
pub struct MatFile {
    buffer: FileBuffer,
}

impl MatFile {
    /// Open and validate the MAT-file at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            buffer: FileBuffer::open(path)?,
        })
    }

    /// Byte order declared by the file header
    pub fn endian(&self) -> Endian {
        self.buffer.endian()
    }

    fn run<V: MatrixVisitor>(&self, visitor: &mut V) -> Result<()> {
        scan_elements(
            self.buffer.bytes(),
            HEADER_LEN,
            self.buffer.endian(),
            0,
            visitor,
        )?;
        Ok(())
    }

    /// Load the first rank-3 cube in the file, regardless of name
    pub fn first_3d_cube(&self) -> Result<(Cube, String)> {
        let mut visitor = LoadVisitor::first(3);
        self.run(&mut visitor)?;
        visitor.found.ok_or(Error::VariableNotFound)
    }

    /// Load the rank-3 cube with an exact byte-equal name
    pub fn cube_by_name(&self, name: &str) -> Result<(Cube, String)> {
        let mut visitor = LoadVisitor::by_name(name, 3);
        self.run(&mut visitor)?;
        visitor.found.ok_or(Error::VariableNotFound)
    }

    /// Load the rank-2 array with an exact byte-equal name
    pub fn array_2d_by_name(&self, name: &str) -> Result<(Cube, String)> {
        let mut visitor = LoadVisitor::by_name(name, 2);
        self.run(&mut visitor)?;
        visitor.found.ok_or(Error::VariableNotFound)
    }

    /// List every rank-3 variable in file-encounter order
    pub fn list_3d_variables(&self) -> Result<Vec<CubeInfo>> {
        let mut visitor = ListVisitor::new(3);
        self.run(&mut visitor)?;
        Ok(visitor.entries)
    }

    /// List every rank-2 variable in file-encounter order
    pub fn list_2d_variables(&self) -> Result<Vec<CubeInfo>> {
        let mut visitor = ListVisitor::new(2);
        self.run(&mut visitor)?;
        Ok(visitor.entries)
    }
}

/// Load the first rank-3 cube from the file at `path`
pub fn load_first_3d_double_cube<P: AsRef<Path>>(path: P) -> Result<(Cube, String)> {
    MatFile::open(path)?.first_3d_cube()
}

/// Load the rank-3 cube named `name` from the file at `path`
pub fn load_cube_by_name<P: AsRef<Path>>(path: P, name: &str) -> Result<(Cube, String)> {
    MatFile::open(path)?.cube_by_name(name)
}

/// List every rank-3 variable in the file at `path`
pub fn list_mat_cube_variables<P: AsRef<Path>>(path: P) -> Result<Vec<CubeInfo>> {
    MatFile::open(path)?.list_3d_variables()
}

/// Load the rank-2 array named `name` from the file at `path`
pub fn load_2d_array_by_name<P: AsRef<Path>>(path: P, name: &str) -> Result<(Cube, String)> {
    MatFile::open(path)?.array_2d_by_name(name)
}

/// List every rank-2 variable in the file at `path`
pub fn list_mat_2d_variables<P: AsRef<Path>>(path: P) -> Result<Vec<CubeInfo>> {
    MatFile::open(path)?.list_2d_variables()
}
