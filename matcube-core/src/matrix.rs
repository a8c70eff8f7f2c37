//! MATRIX element parsing
//!
//! A `miMATRIX` payload holds the array-flags, dimensions, name, and
//! real-data sub-elements. Writers are free to order and encode them in
//! several ways, so sub-elements are recognized by type and parse state
//! rather than by position. A well-formed matrix the codec cannot load
//! (complex, wrong class, size mismatch) parses successfully with
//! `supported == false`; only structural damage is an error.

use crate::error::{MatError, Result};
use crate::format::{mi, Endian, COMPLEX_FLAG, MAX_NAME_LEN, MAX_REPORTED_DIMS, RETAINED_DIMS};
use crate::numeric::MatDataType;
use crate::tag::{read_element, RawElement};
use crate::validation::expected_byte_len;

/// Borrowed view of one parsed MATRIX element
///
/// `real_data` points into the scanned buffer and is not yet normalized
/// to host byte order.
#[derive(Debug, Clone, Copy)]
pub struct ParsedMatrix<'a> {
    /// Whether this codec can load the array
    pub supported: bool,
    /// Retained dimensions; entries past the rank stay 1
    pub dims: [usize; RETAINED_DIMS],
    /// Full dimension count reported by the file
    pub rank: usize,
    /// Numeric type of the real data (meaningful only when supported)
    pub data_type: MatDataType,
    /// Raw real-data bytes in file byte order
    pub real_data: &'a [u8],
    name: [u8; MAX_NAME_LEN],
    name_len: usize,
}

impl ParsedMatrix<'_> {
    /// Variable name bytes, truncated to 255, empty when absent
    pub fn name(&self) -> &[u8] {
        &self.name[..self.name_len]
    }

    /// Size of one element in bytes
    pub fn element_size(&self) -> usize {
        self.data_type.element_size()
    }
}

fn is_name_type(mi_type: u32) -> bool {
    matches!(
        mi_type,
        mi::INT8 | mi::UINT8 | mi::UTF8 | mi::UTF16 | mi::UTF32
    )
}

fn parse_dimensions(
    elem: &RawElement<'_>,
    endian: Endian,
) -> Result<([usize; RETAINED_DIMS], usize)> {
    let elem_size = match elem.mi_type {
        mi::INT32 | mi::UINT32 => 4,
        mi::INT64 | mi::UINT64 => 8,
        _ => return Err(MatError::InvalidDimensions),
    };
    let signed = matches!(elem.mi_type, mi::INT32 | mi::INT64);

    let byte_len = elem.byte_len();
    if byte_len == 0 || byte_len % elem_size != 0 {
        return Err(MatError::InvalidDimensions);
    }
    let rank = byte_len / elem_size;
    if rank > MAX_REPORTED_DIMS {
        return Err(MatError::InvalidDimensions);
    }

    let mut dims = [1usize; RETAINED_DIMS];
    for i in 0..rank {
        let raw: u64 = if elem_size == 4 {
            let value = endian.read_u32(&elem.payload[i * 4..]);
            if signed {
                let signed_value = value as i32;
                if signed_value <= 0 {
                    return Err(MatError::InvalidDimensions);
                }
                signed_value as u64
            } else {
                if value == 0 {
                    return Err(MatError::InvalidDimensions);
                }
                u64::from(value)
            }
        } else {
            let value = endian.read_u64(&elem.payload[i * 8..]);
            if signed {
                let signed_value = value as i64;
                if signed_value <= 0 {
                    return Err(MatError::InvalidDimensions);
                }
                signed_value as u64
            } else {
                if value == 0 {
                    return Err(MatError::InvalidDimensions);
                }
                value
            }
        };

        let dim = usize::try_from(raw).map_err(|_| MatError::SizeOverflow)?;
        if i < RETAINED_DIMS {
            dims[i] = dim;
        }
    }

    Ok((dims, rank))
}

/// Parse one MATRIX element payload into a [`ParsedMatrix`] view
///
/// Errors only on structurally invalid sub-element tags; everything the
/// codec merely cannot load comes back with `supported == false`.
pub fn parse_matrix(payload: &[u8], endian: Endian) -> Result<ParsedMatrix<'_>> {
    let mut matrix = ParsedMatrix {
        supported: false,
        dims: [1; RETAINED_DIMS],
        rank: 0,
        data_type: MatDataType::F64,
        real_data: &[],
        name: [0; MAX_NAME_LEN],
        name_len: 0,
    };

    let mut has_flags = false;
    let mut has_dims = false;
    let mut has_name = false;
    let mut has_data = false;

    let mut pos = 0;
    while payload.len().saturating_sub(pos) >= 8 {
        let (elem, next) = read_element(payload, pos, endian)?;
        pos = next;

        if !has_flags && elem.mi_type == mi::UINT32 && elem.byte_len() >= 8 {
            let flags = endian.read_u32(elem.payload);
            let class = flags & 0xFF;
            let complex = flags & COMPLEX_FLAG != 0;
            matrix.supported = !complex && MatDataType::from_mx_class(class).is_some();
            has_flags = true;
            continue;
        }

        if !has_dims
            && matches!(
                elem.mi_type,
                mi::INT32 | mi::UINT32 | mi::INT64 | mi::UINT64
            )
        {
            match parse_dimensions(&elem, endian) {
                Ok((dims, rank)) => {
                    matrix.dims = dims;
                    matrix.rank = rank;
                }
                Err(_) => {
                    matrix.supported = false;
                    matrix.rank = 0;
                }
            }
            has_dims = true;
            continue;
        }

        if !has_name && is_name_type(elem.mi_type) {
            let copy_len = elem.byte_len().min(MAX_NAME_LEN);
            matrix.name[..copy_len].copy_from_slice(&elem.payload[..copy_len]);
            matrix.name_len = copy_len;
            has_name = true;
            continue;
        }

        if !has_data && matrix.supported && has_flags {
            if let Some(data_type) = MatDataType::from_mi_type(elem.mi_type) {
                matrix.data_type = data_type;
                matrix.real_data = elem.payload;
                has_data = true;
            }
        }
    }

    if !has_flags || !has_dims || !matrix.supported || !has_data {
        matrix.supported = false;
        return Ok(matrix);
    }

    match expected_byte_len(matrix.dims, matrix.rank, matrix.element_size()) {
        Ok(expected) if expected == matrix.real_data.len() => {}
        _ => matrix.supported = false,
    }

    Ok(matrix)
}
