//! MAT5 writer
//!
//! Output is always little-endian regardless of host: the header carries
//! the "IM" marker and multi-byte values are swapped on big-endian hosts.
//! Matrices are written uncompressed with the regular tag form throughout,
//! which every MAT5 reader accepts.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::Path;

use matcube_core::{
    align8, element_count, mi, Endian, MatDataType, MatError, ENDIAN_LITTLE_MARKER,
    HEADER_TEXT_LEN, HEADER_VERSION,
};

use crate::cube::{swap_elements_in_place, Cube};
use crate::error::{Error, Result};

const HEADER_TEXT: &[u8] = b"MATLAB 5.0 MAT-file, Created by matcube";

fn write_tag<W: Write>(writer: &mut W, mi_type: u32, num_bytes: u32) -> Result<()> {
    writer.write_all(&mi_type.to_le_bytes())?;
    writer.write_all(&num_bytes.to_le_bytes())?;
    Ok(())
}

fn write_padding<W: Write>(writer: &mut W, padding: usize) -> Result<()> {
    const ZEROS: [u8; 8] = [0; 8];
    writer.write_all(&ZEROS[..padding])?;
    Ok(())
}

fn padded_len(num_bytes: u32) -> Result<(u32, usize)> {
    let padded = align8(num_bytes as usize);
    if padded == usize::MAX {
        return Err(Error::Format(MatError::SizeOverflow));
    }
    Ok((num_bytes, padded - num_bytes as usize))
}

/// Write the 128-byte file header: descriptive text padded with spaces,
/// zeroed subsystem bytes, the version word, and the endian marker.
fn write_mat_header<W: Write>(writer: &mut W) -> Result<()> {
    let mut text = [b' '; HEADER_TEXT_LEN];
    text[..HEADER_TEXT.len()].copy_from_slice(HEADER_TEXT);
    writer.write_all(&text)?;
    writer.write_all(&[0u8; 8])?;
    writer.write_all(&HEADER_VERSION.to_le_bytes())?;
    writer.write_all(&ENDIAN_LITTLE_MARKER)?;
    Ok(())
}

/// Serialize one numeric array as a MATRIX element
///
/// The enclosing tag's declared length is the exact sum of the four
/// sub-elements including their padding, computed with overflow checks.
fn write_numeric_matrix<W: Write>(
    writer: &mut W,
    name: &str,
    dims: &[usize],
    data_type: MatDataType,
    data: &[u8],
) -> Result<()> {
    let element_size = data_type.element_size();

    let mut retained = [1usize; 3];
    if dims.is_empty() || dims.len() > 3 {
        return Err(Error::Format(MatError::InvalidRank));
    }
    retained[..dims.len()].copy_from_slice(dims);
    let count = element_count(retained, dims.len())?;
    let expected = count
        .checked_mul(element_size)
        .ok_or(Error::Format(MatError::SizeOverflow))?;
    if expected != data.len() {
        return Err(Error::Format(MatError::DataSizeMismatch));
    }

    let data_bytes =
        u32::try_from(data.len()).map_err(|_| Error::Format(MatError::SizeOverflow))?;
    let (data_bytes, data_pad) = padded_len(data_bytes)?;
    let name_bytes =
        u32::try_from(name.len()).map_err(|_| Error::Format(MatError::SizeOverflow))?;
    let (name_bytes, name_pad) = padded_len(name_bytes)?;
    let dims_bytes = u32::try_from(dims.len() * 4).map_err(|_| Error::Format(MatError::SizeOverflow))?;
    let (dims_bytes, dims_pad) = padded_len(dims_bytes)?;

    let total: u64 = 16
        + 8
        + u64::from(dims_bytes)
        + dims_pad as u64
        + 8
        + u64::from(name_bytes)
        + name_pad as u64
        + 8
        + u64::from(data_bytes)
        + data_pad as u64;
    let total = u32::try_from(total).map_err(|_| Error::Format(MatError::SizeOverflow))?;

    write_tag(writer, mi::MATRIX, total)?;

    // Array flags: class id in the low byte of the first word, no flags set
    write_tag(writer, mi::UINT32, 8)?;
    writer.write_all(&data_type.mx_class().to_le_bytes())?;
    writer.write_all(&0u32.to_le_bytes())?;

    write_tag(writer, mi::INT32, dims_bytes)?;
    for &dim in dims {
        let dim = i32::try_from(dim).map_err(|_| Error::Format(MatError::SizeOverflow))?;
        writer.write_all(&dim.to_le_bytes())?;
    }
    write_padding(writer, dims_pad)?;

    write_tag(writer, mi::INT8, name_bytes)?;
    writer.write_all(name.as_bytes())?;
    write_padding(writer, name_pad)?;

    write_tag(writer, data_type.mi_type(), data_bytes)?;
    if Endian::host() == Endian::Big && element_size > 1 {
        let mut swapped = data.to_vec();
        swap_elements_in_place(&mut swapped, element_size);
        writer.write_all(&swapped)?;
    } else {
        writer.write_all(data)?;
    }
    write_padding(writer, data_pad)?;

    Ok(())
}

/// Create a new MAT-file at `path` holding one rank-3 cube
///
/// Truncates any existing file.
pub fn save_3d_cube<P: AsRef<Path>>(path: P, name: &str, cube: &Cube) -> Result<()> {
    if cube.rank() != 3 {
        return Err(Error::Format(MatError::InvalidRank));
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_mat_header(&mut writer)?;
    write_numeric_matrix(
        &mut writer,
        name,
        &cube.dims(),
        cube.data_type(),
        cube.data(),
    )?;
    writer.flush()?;
    Ok(())
}

/// Append a float64 N-by-1 wavelength vector to an existing MAT-file
///
/// Strictly additive: seeks to the end and writes one more MATRIX
/// element without touching existing bytes.
pub fn save_wavelengths<P: AsRef<Path>>(path: P, name: &str, values: &[f64]) -> Result<()> {
    if values.is_empty() {
        return Err(Error::Format(MatError::InvalidDimensions));
    }

    let file = OpenOptions::new().read(true).write(true).open(path)?;
    let mut writer = BufWriter::new(file);
    writer.seek(SeekFrom::End(0))?;
    write_numeric_matrix(
        &mut writer,
        name,
        &[values.len(), 1],
        MatDataType::F64,
        bytemuck::cast_slice(values),
    )?;
    writer.flush()?;
    Ok(())
}
