//! Shared fixtures for file-level tests: temp paths and hand-built MAT5
//! byte streams in either byte order.

#![allow(dead_code)]

use std::path::PathBuf;

use matcube::{mi, HEADER_LEN};

/// Temp file removed on drop
pub struct TempFile {
    pub path: PathBuf,
}

impl TempFile {
    pub fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "matcube-test-{}-{name}.mat",
            std::process::id()
        ));
        Self { path }
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

fn put_u32(out: &mut Vec<u8>, value: u32, big: bool) {
    if big {
        out.extend_from_slice(&value.to_be_bytes());
    } else {
        out.extend_from_slice(&value.to_le_bytes());
    }
}

/// One regular-form element with 8-byte payload padding
pub fn sub_element(mi_type: u32, payload: &[u8], big: bool) -> Vec<u8> {
    let mut out = Vec::new();
    put_u32(&mut out, mi_type, big);
    put_u32(&mut out, payload.len() as u32, big);
    out.extend_from_slice(payload);
    while out.len() % 8 != 0 {
        out.push(0);
    }
    out
}

/// One MATRIX element with flags, dims, name, and data sub-elements
///
/// `data` must already be in the file's byte order.
pub fn matrix_element(
    name: &[u8],
    dims: &[i32],
    class: u32,
    data_mi_type: u32,
    data: &[u8],
    big: bool,
) -> Vec<u8> {
    let mut flags = Vec::new();
    put_u32(&mut flags, class, big);
    put_u32(&mut flags, 0, big);

    let mut dim_bytes = Vec::new();
    for &dim in dims {
        put_u32(&mut dim_bytes, dim as u32, big);
    }

    let mut payload = Vec::new();
    payload.extend_from_slice(&sub_element(mi::UINT32, &flags, big));
    payload.extend_from_slice(&sub_element(mi::INT32, &dim_bytes, big));
    if !name.is_empty() {
        payload.extend_from_slice(&sub_element(mi::INT8, name, big));
    }
    payload.extend_from_slice(&sub_element(data_mi_type, data, big));
    sub_element(mi::MATRIX, &payload, big)
}

/// A complete MAT-file: 128-byte header plus the given element stream
pub fn mat_file(elements: &[Vec<u8>], big: bool) -> Vec<u8> {
    let mut out = vec![b' '; 116];
    out.extend_from_slice(&[0u8; 8]);
    if big {
        out.extend_from_slice(&0x0100u16.to_be_bytes());
        out.extend_from_slice(b"MI");
    } else {
        out.extend_from_slice(&0x0100u16.to_le_bytes());
        out.extend_from_slice(b"IM");
    }
    assert_eq!(out.len(), HEADER_LEN);
    for element in elements {
        out.extend_from_slice(element);
    }
    out
}

/// Wrap an element stream in a COMPRESSED element
pub fn compressed_element(inner: &[u8], big: bool) -> Vec<u8> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;
    use std::io::Write;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(inner).unwrap();
    sub_element(mi::COMPRESSED, &encoder.finish().unwrap(), big)
}
