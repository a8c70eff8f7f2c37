//! Numeric classes supported by the codec
//!
//! MAT5 stores a class id in the array flags and a separate element type
//! on the real-data sub-element; this module maps between the two and the
//! in-memory representation.

use crate::format::{mi, mx};

/// Numeric element types this codec loads and saves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatDataType {
    /// 64-bit floating point (mxDOUBLE_CLASS / miDOUBLE)
    F64,
    /// 32-bit floating point (mxSINGLE_CLASS / miSINGLE)
    F32,
    /// 8-bit signed integer
    I8,
    /// 8-bit unsigned integer
    U8,
    /// 16-bit signed integer
    I16,
    /// 16-bit unsigned integer
    U16,
}

impl MatDataType {
    /// Size of one element in bytes
    pub const fn element_size(self) -> usize {
        match self {
            MatDataType::F64 => 8,
            MatDataType::F32 => 4,
            MatDataType::I8 | MatDataType::U8 => 1,
            MatDataType::I16 | MatDataType::U16 => 2,
        }
    }

    /// Element type id used on the real-data sub-element tag
    pub const fn mi_type(self) -> u32 {
        match self {
            MatDataType::F64 => mi::DOUBLE,
            MatDataType::F32 => mi::SINGLE,
            MatDataType::I8 => mi::INT8,
            MatDataType::U8 => mi::UINT8,
            MatDataType::I16 => mi::INT16,
            MatDataType::U16 => mi::UINT16,
        }
    }

    /// Array class id stored in the array-flags sub-element
    pub const fn mx_class(self) -> u32 {
        match self {
            MatDataType::F64 => mx::DOUBLE,
            MatDataType::F32 => mx::SINGLE,
            MatDataType::I8 => mx::INT8,
            MatDataType::U8 => mx::UINT8,
            MatDataType::I16 => mx::INT16,
            MatDataType::U16 => mx::UINT16,
        }
    }

    /// Map a real-data element type id to a supported numeric type
    pub const fn from_mi_type(mi_type: u32) -> Option<Self> {
        match mi_type {
            mi::DOUBLE => Some(MatDataType::F64),
            mi::SINGLE => Some(MatDataType::F32),
            mi::INT8 => Some(MatDataType::I8),
            mi::UINT8 => Some(MatDataType::U8),
            mi::INT16 => Some(MatDataType::I16),
            mi::UINT16 => Some(MatDataType::U16),
            _ => None,
        }
    }

    /// Map an array class id to a supported numeric type
    pub const fn from_mx_class(class: u32) -> Option<Self> {
        match class {
            mx::DOUBLE => Some(MatDataType::F64),
            mx::SINGLE => Some(MatDataType::F32),
            mx::INT8 => Some(MatDataType::I8),
            mx::UINT8 => Some(MatDataType::U8),
            mx::INT16 => Some(MatDataType::I16),
            mx::UINT16 => Some(MatDataType::U16),
            _ => None,
        }
    }
}

impl core::fmt::Display for MatDataType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MatDataType::F64 => write!(f, "f64"),
            MatDataType::F32 => write!(f, "f32"),
            MatDataType::I8 => write!(f, "i8"),
            MatDataType::U8 => write!(f, "u8"),
            MatDataType::I16 => write!(f, "i16"),
            MatDataType::U16 => write!(f, "u16"),
        }
    }
}

/// Trait for types that can back a loaded cube
///
/// Bounded by `bytemuck::Pod` so cube payloads can be reinterpreted as
/// plain byte buffers and back without undefined behavior.
pub trait CubeElement: bytemuck::Pod + PartialEq {
    /// The MAT5 numeric type tag for this element type
    fn data_type() -> MatDataType;
}

impl CubeElement for f64 {
    fn data_type() -> MatDataType {
        MatDataType::F64
    }
}

impl CubeElement for f32 {
    fn data_type() -> MatDataType {
        MatDataType::F32
    }
}

impl CubeElement for i8 {
    fn data_type() -> MatDataType {
        MatDataType::I8
    }
}

impl CubeElement for u8 {
    fn data_type() -> MatDataType {
        MatDataType::U8
    }
}

impl CubeElement for i16 {
    fn data_type() -> MatDataType {
        MatDataType::I16
    }
}

impl CubeElement for u16 {
    fn data_type() -> MatDataType {
        MatDataType::U16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mi_round_trip() {
        for dt in [
            MatDataType::F64,
            MatDataType::F32,
            MatDataType::I8,
            MatDataType::U8,
            MatDataType::I16,
            MatDataType::U16,
        ] {
            assert_eq!(MatDataType::from_mi_type(dt.mi_type()), Some(dt));
            assert_eq!(MatDataType::from_mx_class(dt.mx_class()), Some(dt));
        }
    }

    #[test]
    fn test_unsupported_ids() {
        // miINT32 is valid for dimensions but not as a cube payload
        assert_eq!(MatDataType::from_mi_type(mi::INT32), None);
        assert_eq!(MatDataType::from_mi_type(mi::MATRIX), None);
        // mxCELL_CLASS (1) and mxSTRUCT_CLASS (2) are unsupported
        assert_eq!(MatDataType::from_mx_class(1), None);
        assert_eq!(MatDataType::from_mx_class(2), None);
    }

    #[test]
    fn test_element_sizes() {
        assert_eq!(MatDataType::F64.element_size(), 8);
        assert_eq!(MatDataType::F32.element_size(), 4);
        assert_eq!(MatDataType::I16.element_size(), 2);
        assert_eq!(MatDataType::U8.element_size(), 1);
        assert_eq!(<f32 as CubeElement>::data_type(), MatDataType::F32);
    }
}
