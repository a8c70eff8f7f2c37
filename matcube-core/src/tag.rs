//! Element tag decoding
//!
//! Every MAT5 element starts with an 8-byte tag. Two encodings exist,
//! disambiguated by the upper half of the first word: the small-element
//! form packs a length of at most 4 into the high 16 bits and carries the
//! payload in the second word; the regular form stores the length in the
//! second word and the payload after the tag, padded to 8 bytes.

use crate::error::{MatError, Result};
use crate::format::{align8, Endian};

/// Borrowed view of one decoded element
///
/// Never owns memory; `payload` points into the scanned buffer and its
/// length equals the bounds-checked declared length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawElement<'a> {
    /// Element type id (`mi` constant)
    pub mi_type: u32,
    /// Payload bytes, exactly the declared length
    pub payload: &'a [u8],
}

impl RawElement<'_> {
    /// Declared payload length in bytes
    pub fn byte_len(&self) -> usize {
        self.payload.len()
    }
}

/// Decode the element tag at `pos`, returning the element and the offset
/// of the next tag
///
/// The final element of a buffer may legally omit its trailing padding;
/// in that case the next offset is clamped to the payload end. All length
/// arithmetic is overflow-checked; a length reaching past the buffer is
/// a hard error, never a short slice.
pub fn read_element(data: &[u8], pos: usize, endian: Endian) -> Result<(RawElement<'_>, usize)> {
    if pos > data.len() || data.len() - pos < 8 {
        return Err(MatError::TruncatedElement);
    }

    let word0 = endian.read_u32(&data[pos..]);

    if word0 >> 16 != 0 {
        // Small-element form: type and length share the first word and the
        // 4-byte payload slot doubles as padding.
        let mi_type = word0 & 0xFFFF;
        let byte_len = (word0 >> 16) as usize;
        if byte_len > 4 {
            return Err(MatError::InvalidTag);
        }

        let payload = &data[pos + 4..pos + 4 + byte_len];
        return Ok((RawElement { mi_type, payload }, pos + 8));
    }

    let mi_type = word0;
    let byte_len = endian.read_u32(&data[pos + 4..]) as usize;

    let payload_pos = pos.checked_add(8).ok_or(MatError::SizeOverflow)?;
    if byte_len > data.len() - payload_pos {
        return Err(MatError::TruncatedElement);
    }
    let payload_end = payload_pos + byte_len;

    let padded = align8(byte_len);
    if padded == usize::MAX {
        return Err(MatError::SizeOverflow);
    }
    let mut next = payload_pos
        .checked_add(padded)
        .ok_or(MatError::SizeOverflow)?;
    if next > data.len() {
        // Some writers omit the padding after the last element.
        next = payload_end;
    }

    Ok((
        RawElement {
            mi_type,
            payload: &data[payload_pos..payload_end],
        },
        next,
    ))
}
