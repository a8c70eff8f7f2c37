//! Overflow-checked size arithmetic for attacker-controllable lengths
//!
//! Every length field in a MAT5 file is untrusted input. These helpers
//! are pure functions with no I/O.

use crate::error::{MatError, Result};
use crate::format::RETAINED_DIMS;

/// Compute the element count of an array from its retained dimensions
///
/// Rejects a rank of zero and any zero dimension; the product is computed
/// with overflow checks. Dimensions beyond the retained three do not
/// contribute, so arrays of higher rank fail the later byte-count match
/// and are skipped rather than mis-sized.
pub fn element_count(dims: [usize; RETAINED_DIMS], rank: usize) -> Result<usize> {
    if rank == 0 {
        return Err(MatError::InvalidDimensions);
    }

    let mut total: usize = 1;
    for &dim in &dims[..rank.min(RETAINED_DIMS)] {
        if dim == 0 {
            return Err(MatError::InvalidDimensions);
        }
        total = total.checked_mul(dim).ok_or(MatError::SizeOverflow)?;
    }

    Ok(total)
}

/// Expected payload size in bytes for an array of the given shape
pub fn expected_byte_len(
    dims: [usize; RETAINED_DIMS],
    rank: usize,
    element_size: usize,
) -> Result<usize> {
    element_count(dims, rank)?
        .checked_mul(element_size)
        .ok_or(MatError::SizeOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_count() {
        assert_eq!(element_count([2, 3, 4], 3), Ok(24));
        assert_eq!(element_count([5, 7, 1], 2), Ok(35));
        assert_eq!(element_count([10, 1, 1], 1), Ok(10));
    }

    #[test]
    fn test_rejects_zero() {
        assert_eq!(element_count([0, 3, 4], 3), Err(MatError::InvalidDimensions));
        assert_eq!(element_count([2, 3, 0], 3), Err(MatError::InvalidDimensions));
        assert_eq!(element_count([1, 1, 1], 0), Err(MatError::InvalidDimensions));
    }

    #[test]
    fn test_overflow() {
        assert_eq!(
            element_count([usize::MAX, 2, 1], 2),
            Err(MatError::SizeOverflow)
        );
        assert_eq!(
            expected_byte_len([usize::MAX / 4, 1, 1], 1, 8),
            Err(MatError::SizeOverflow)
        );
    }

    #[test]
    fn test_expected_byte_len() {
        assert_eq!(expected_byte_len([2, 3, 4], 3, 4), Ok(96));
        assert_eq!(expected_byte_len([16, 16, 1], 2, 2), Ok(512));
    }
}
