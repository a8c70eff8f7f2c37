//! MAT5 on-wire constants and endianness primitives
//!
//! Layout of a Level-5 MAT-file: 116 bytes of descriptive text, 8
//! subsystem-specific bytes, a 2-byte version word, a 2-byte endian
//! marker, then a stream of tagged elements.

/// Total size of the fixed file header in bytes
pub const HEADER_LEN: usize = 128;

/// Length of the descriptive text field at the start of the header
pub const HEADER_TEXT_LEN: usize = 116;

/// Version word stored at bytes 124..126
pub const HEADER_VERSION: u16 = 0x0100;

/// Endian marker for little-endian files, bytes 126..128
pub const ENDIAN_LITTLE_MARKER: [u8; 2] = *b"IM";

/// Endian marker for big-endian files, bytes 126..128
pub const ENDIAN_BIG_MARKER: [u8; 2] = *b"MI";

/// Alignment boundary for element payloads
pub const ALIGNMENT: usize = 8;

/// Bit in the first array-flags word marking a complex-valued array
pub const COMPLEX_FLAG: u32 = 0x0800;

/// Maximum dimension count a dimensions sub-element may declare
pub const MAX_REPORTED_DIMS: usize = 16;

/// Number of dimensions retained by this codec (rank <= 3)
pub const RETAINED_DIMS: usize = 3;

/// Maximum variable-name length in bytes
pub const MAX_NAME_LEN: usize = 255;

/// MAT5 element type identifiers ("mi" types)
pub mod mi {
    pub const INT8: u32 = 1;
    pub const UINT8: u32 = 2;
    pub const INT16: u32 = 3;
    pub const UINT16: u32 = 4;
    pub const INT32: u32 = 5;
    pub const UINT32: u32 = 6;
    pub const SINGLE: u32 = 7;
    pub const DOUBLE: u32 = 9;
    pub const INT64: u32 = 12;
    pub const UINT64: u32 = 13;
    pub const MATRIX: u32 = 14;
    pub const COMPRESSED: u32 = 15;
    pub const UTF8: u32 = 16;
    pub const UTF16: u32 = 17;
    pub const UTF32: u32 = 18;
}

/// MAT5 array class identifiers ("mx" classes)
pub mod mx {
    pub const DOUBLE: u32 = 6;
    pub const SINGLE: u32 = 7;
    pub const INT8: u32 = 8;
    pub const UINT8: u32 = 9;
    pub const INT16: u32 = 10;
    pub const UINT16: u32 = 11;
}

/// Byte order of a MAT5 buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Endian {
    Little,
    Big,
}

impl Endian {
    /// Byte order of the host
    pub const fn host() -> Self {
        if cfg!(target_endian = "little") {
            Endian::Little
        } else {
            Endian::Big
        }
    }

    /// Detect byte order from the 2-byte marker at header bytes 126..128
    pub fn from_marker(marker: [u8; 2]) -> Option<Self> {
        match marker {
            ENDIAN_LITTLE_MARKER => Some(Endian::Little),
            ENDIAN_BIG_MARKER => Some(Endian::Big),
            _ => None,
        }
    }

    /// Read a u16 at the start of `bytes` in this byte order
    ///
    /// Panics if `bytes` holds fewer than 2 bytes; callers bounds-check.
    pub fn read_u16(self, bytes: &[u8]) -> u16 {
        let value = u16::from_le_bytes([bytes[0], bytes[1]]);
        match self {
            Endian::Little => value,
            Endian::Big => value.swap_bytes(),
        }
    }

    /// Read a u32 at the start of `bytes` in this byte order
    ///
    /// Panics if `bytes` holds fewer than 4 bytes; callers bounds-check.
    pub fn read_u32(self, bytes: &[u8]) -> u32 {
        let value = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        match self {
            Endian::Little => value,
            Endian::Big => value.swap_bytes(),
        }
    }

    /// Read a u64 at the start of `bytes` in this byte order
    ///
    /// Panics if `bytes` holds fewer than 8 bytes; callers bounds-check.
    pub fn read_u64(self, bytes: &[u8]) -> u64 {
        let value = u64::from_le_bytes([
            bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
        ]);
        match self {
            Endian::Little => value,
            Endian::Big => value.swap_bytes(),
        }
    }
}

/// Round `value` up to the next 8-byte boundary, saturating at `usize::MAX`
///
/// The saturated value never passes a bounds check, so overflow here turns
/// into a clean parse failure downstream.
pub const fn align8(value: usize) -> usize {
    if value > usize::MAX - (ALIGNMENT - 1) {
        usize::MAX
    } else {
        (value + (ALIGNMENT - 1)) & !(ALIGNMENT - 1)
    }
}
