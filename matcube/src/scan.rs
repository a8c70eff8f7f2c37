//! Element stream scanning and the load/list visitors
//!
//! The scanner walks top-level elements of a buffer, parsing each MATRIX
//! and feeding the supported ones to a visitor. COMPRESSED elements are
//! inflated and scanned as nested streams, with an explicit depth bound so
//! an adversarial file cannot exhaust the call stack. Visitors steer the
//! walk through a sum-typed outcome instead of out-parameter stop flags.

use log::debug;
use matcube_core::{element_count, mi, parse_matrix, Endian, MatError, ParsedMatrix};

use crate::cube::{swap_elements_in_place, Cube, CubeInfo};
use crate::error::{Error, Result};
use crate::inflate::inflate_zlib;

/// Maximum nesting of COMPRESSED elements before the scan aborts
pub(crate) const MAX_COMPRESSION_DEPTH: usize = 16;

/// Visitor verdict after seeing one supported matrix
pub(crate) enum ScanOutcome {
    Continue,
    Stop,
}

/// Callback invoked for every supported matrix in encounter order
pub(crate) trait MatrixVisitor {
    fn visit(&mut self, matrix: &ParsedMatrix<'_>, endian: Endian) -> Result<ScanOutcome>;
}

/// Walk all elements from `start` to the end of `data`
///
/// Unsupported and malformed matrices are skipped; a structurally invalid
/// top-level tag aborts the whole scan.
pub(crate) fn scan_elements(
    data: &[u8],
    start: usize,
    endian: Endian,
    depth: usize,
    visitor: &mut dyn MatrixVisitor,
) -> Result<ScanOutcome> {
    let mut pos = start;
    while data.len().saturating_sub(pos) >= 8 {
        let (elem, next) = matcube_core::read_element(data, pos, endian)?;
        pos = next;

        match elem.mi_type {
            mi::MATRIX => match parse_matrix(elem.payload, endian) {
                Ok(matrix) if matrix.supported => {
                    if let ScanOutcome::Stop = visitor.visit(&matrix, endian)? {
                        return Ok(ScanOutcome::Stop);
                    }
                }
                Ok(matrix) => {
                    debug!(
                        "skipping unsupported matrix \"{}\" (rank {})",
                        String::from_utf8_lossy(matrix.name()),
                        matrix.rank
                    );
                }
                Err(err) => debug!("skipping malformed matrix element: {err}"),
            },
            mi::COMPRESSED => {
                if depth >= MAX_COMPRESSION_DEPTH {
                    return Err(Error::Format(MatError::NestingTooDeep));
                }
                let inflated = inflate_zlib(elem.payload)?;
                debug!(
                    "inflated compressed element: {} -> {} bytes (depth {})",
                    elem.byte_len(),
                    inflated.len(),
                    depth + 1
                );
                if let ScanOutcome::Stop = scan_elements(&inflated, 0, endian, depth + 1, visitor)?
                {
                    return Ok(ScanOutcome::Stop);
                }
            }
            _ => {}
        }
    }

    Ok(ScanOutcome::Continue)
}

/// Visitor that loads the first matrix matching a rank and optional name
pub(crate) struct LoadVisitor {
    target_name: Option<Vec<u8>>,
    expected_rank: usize,
    pub found: Option<(Cube, String)>,
}

impl LoadVisitor {
    /// Load the first matrix of the given rank regardless of name
    pub fn first(expected_rank: usize) -> Self {
        Self {
            target_name: None,
            expected_rank,
            found: None,
        }
    }

    /// Load the first matrix of the given rank with an exact byte-equal name
    pub fn by_name(name: &str, expected_rank: usize) -> Self {
        Self {
            target_name: Some(name.as_bytes().to_vec()),
            expected_rank,
            found: None,
        }
    }
}

impl MatrixVisitor for LoadVisitor {
    fn visit(&mut self, matrix: &ParsedMatrix<'_>, endian: Endian) -> Result<ScanOutcome> {
        if self.found.is_some() {
            return Ok(ScanOutcome::Stop);
        }
        if matrix.rank != self.expected_rank {
            return Ok(ScanOutcome::Continue);
        }
        if let Some(target) = &self.target_name {
            if matrix.name() != target.as_slice() {
                return Ok(ScanOutcome::Continue);
            }
        }

        let count = element_count(matrix.dims, matrix.rank)?;
        let byte_count = count
            .checked_mul(matrix.element_size())
            .ok_or(Error::Format(MatError::SizeOverflow))?;
        if byte_count != matrix.real_data.len() {
            return Err(Error::Format(MatError::DataSizeMismatch));
        }

        let mut data = matrix.real_data.to_vec();
        if endian != Endian::host() {
            swap_elements_in_place(&mut data, matrix.element_size());
        }

        let dims = [
            matrix.dims[0],
            matrix.dims[1],
            if self.expected_rank == 3 {
                matrix.dims[2]
            } else {
                1
            },
        ];
        let name = String::from_utf8_lossy(matrix.name()).into_owned();
        self.found = Some((
            Cube::from_raw(data, dims, self.expected_rank, matrix.data_type),
            name,
        ));
        Ok(ScanOutcome::Stop)
    }
}

/// Visitor that lists every matrix of a rank without loading payloads
pub(crate) struct ListVisitor {
    expected_rank: usize,
    pub entries: Vec<CubeInfo>,
}

impl ListVisitor {
    pub fn new(expected_rank: usize) -> Self {
        Self {
            expected_rank,
            entries: Vec::with_capacity(8),
        }
    }
}

impl MatrixVisitor for ListVisitor {
    fn visit(&mut self, matrix: &ParsedMatrix<'_>, _endian: Endian) -> Result<ScanOutcome> {
        if matrix.rank != self.expected_rank {
            return Ok(ScanOutcome::Continue);
        }

        let name = if matrix.name().is_empty() {
            "unnamed".to_string()
        } else {
            String::from_utf8_lossy(matrix.name()).into_owned()
        };
        self.entries.push(CubeInfo {
            name,
            dims: [
                matrix.dims[0],
                matrix.dims[1],
                if self.expected_rank == 3 {
                    matrix.dims[2]
                } else {
                    1
                },
            ],
            data_type: matrix.data_type,
        });
        Ok(ScanOutcome::Continue)
    }
}
