//! Owned cube values returned to callers
//!
//! A [`Cube`] owns its payload outright: the scanner copies matrix bytes
//! out of the (possibly memory-mapped) file buffer and normalizes them to
//! host byte order before handing the cube over, so a cube never borrows
//! from the file it came from. Dropping the cube releases the buffer.

use matcube_core::{element_count, CubeElement, MatDataType, MatError, RETAINED_DIMS};

use crate::error::{Error, Result};

/// One loaded numeric array of rank 1 to 3, in host byte order
#[derive(Debug, Clone, PartialEq)]
pub struct Cube {
    data: Vec<u8>,
    dims: [usize; RETAINED_DIMS],
    rank: usize,
    data_type: MatDataType,
}

impl Cube {
    /// Build a cube from a typed element slice
    ///
    /// `values` must hold exactly `product(dims[..rank])` elements and
    /// dimensions past the rank must be 1.
    pub fn from_elements<T: CubeElement>(
        dims: [usize; RETAINED_DIMS],
        rank: usize,
        values: &[T],
    ) -> Result<Self> {
        if rank == 0 || rank > RETAINED_DIMS {
            return Err(Error::Format(MatError::InvalidRank));
        }
        if dims[rank..].iter().any(|&d| d != 1) {
            return Err(Error::Format(MatError::InvalidDimensions));
        }
        let count = element_count(dims, rank)?;
        if count != values.len() {
            return Err(Error::Format(MatError::DataSizeMismatch));
        }

        Ok(Self {
            data: bytemuck::cast_slice(values).to_vec(),
            dims,
            rank,
            data_type: T::data_type(),
        })
    }

    pub(crate) fn from_raw(
        data: Vec<u8>,
        dims: [usize; RETAINED_DIMS],
        rank: usize,
        data_type: MatDataType,
    ) -> Self {
        Self {
            data,
            dims,
            rank,
            data_type,
        }
    }

    /// Raw payload bytes in host byte order, column-major
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Declared dimensions; entries past the rank are 1
    pub fn dims(&self) -> [usize; RETAINED_DIMS] {
        self.dims
    }

    /// Number of declared dimensions (1 to 3)
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Numeric element type
    pub fn data_type(&self) -> MatDataType {
        self.data_type
    }

    /// Total element count
    pub fn len(&self) -> usize {
        self.data.len() / self.data_type.element_size()
    }

    /// Whether the cube holds no elements
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Copy the payload out as typed values
    ///
    /// Fails with [`MatError::TypeMismatch`] when `T` differs from the
    /// stored numeric class. Copies rather than borrowing because the
    /// byte buffer carries no alignment guarantee for wider elements.
    pub fn values<T: CubeElement>(&self) -> Result<Vec<T>> {
        if T::data_type() != self.data_type {
            return Err(Error::Format(MatError::TypeMismatch));
        }
        if self.data.len() % std::mem::size_of::<T>() != 0 {
            return Err(Error::Format(MatError::DataSizeMismatch));
        }
        Ok(bytemuck::pod_collect_to_vec(&self.data))
    }
}

/// Listing entry describing one matrix variable without its payload
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CubeInfo {
    /// Variable name, `"unnamed"` when the file omits it
    pub name: String,
    /// Dimensions; entries past the rank are 1
    pub dims: [usize; RETAINED_DIMS],
    /// Numeric element type
    pub data_type: MatDataType,
}

/// Reverse the bytes of every element in place
///
/// Used when a big-endian file is loaded on (or written from) a
/// little-endian host and vice versa. Single-byte elements need no swap.
pub(crate) fn swap_elements_in_place(bytes: &mut [u8], element_size: usize) {
    if element_size <= 1 {
        return;
    }
    for element in bytes.chunks_exact_mut(element_size) {
        element.reverse();
    }
}
