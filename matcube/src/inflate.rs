//! zlib decompression for COMPRESSED elements
//!
//! A COMPRESSED element wraps a zlib stream whose decompressed size is not
//! declared anywhere, so the output buffer starts at 64 KiB and doubles
//! until the stream ends. The decompressed bytes are a fresh element
//! stream with no file header.

use flate2::{Decompress, FlushDecompress, Status};
use matcube_core::MatError;

use crate::error::{Error, Result};

const INITIAL_CAPACITY: usize = 64 * 1024;

/// Inflate one zlib stream into an owned buffer
pub(crate) fn inflate_zlib(input: &[u8]) -> Result<Vec<u8>> {
    if input.is_empty() {
        return Err(Error::Format(MatError::CorruptStream));
    }

    let mut inflater = Decompress::new(true);
    let mut buffer = vec![0u8; INITIAL_CAPACITY];

    loop {
        let total_out = inflater.total_out() as usize;
        if total_out == buffer.len() {
            let grown = buffer
                .len()
                .checked_mul(2)
                .ok_or(Error::Format(MatError::SizeOverflow))?;
            buffer.resize(grown, 0);
        }

        let total_in = inflater.total_in() as usize;
        let out_start = inflater.total_out() as usize;
        let status = inflater
            .decompress(
                &input[total_in..],
                &mut buffer[out_start..],
                FlushDecompress::None,
            )
            .map_err(|_| Error::Format(MatError::CorruptStream))?;

        match status {
            Status::StreamEnd => {
                buffer.truncate(inflater.total_out() as usize);
                return Ok(buffer);
            }
            Status::Ok => {}
            // Output space is grown before every call, so BufError can only
            // mean the input ran out before the stream ended.
            Status::BufError => return Err(Error::Format(MatError::CorruptStream)),
        }
    }
}
