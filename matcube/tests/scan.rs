//! Element-stream scanning over hand-built files: byte order, compressed
//! payloads, and damaged streams.

mod common;

use common::{compressed_element, mat_file, matrix_element, sub_element, TempFile};

use matcube::{
    list_mat_cube_variables, load_cube_by_name, load_first_3d_double_cube, mi, mx, Error,
    MatDataType, COMPLEX_FLAG,
};

fn f32_cube_values() -> Vec<f32> {
    (0..24).map(|v| v as f32 * 1.25 - 3.0).collect()
}

fn le_f32_cube(name: &[u8]) -> Vec<u8> {
    let data: Vec<u8> = f32_cube_values()
        .iter()
        .flat_map(|v| v.to_le_bytes())
        .collect();
    matrix_element(name, &[2, 3, 4], mx::SINGLE, mi::SINGLE, &data, false)
}

#[test]
fn test_big_endian_file_decodes_like_little() {
    let values = f32_cube_values();
    let be_data: Vec<u8> = values.iter().flat_map(|v| v.to_be_bytes()).collect();
    let be_matrix = matrix_element(b"cube", &[2, 3, 4], mx::SINGLE, mi::SINGLE, &be_data, true);

    let le_file = TempFile::new("endian-le");
    let be_file = TempFile::new("endian-be");
    std::fs::write(&le_file.path, mat_file(&[le_f32_cube(b"cube")], false)).unwrap();
    std::fs::write(&be_file.path, mat_file(&[be_matrix], true)).unwrap();

    let (from_le, _) = load_cube_by_name(&le_file.path, "cube").unwrap();
    let (from_be, _) = load_cube_by_name(&be_file.path, "cube").unwrap();
    assert_eq!(from_le.values::<f32>().unwrap(), values);
    assert_eq!(from_be.values::<f32>().unwrap(), values);
}

#[test]
fn test_compressed_stream_is_transparent() {
    let plain = TempFile::new("plain");
    let packed = TempFile::new("packed");
    std::fs::write(&plain.path, mat_file(&[le_f32_cube(b"cube")], false)).unwrap();
    std::fs::write(
        &packed.path,
        mat_file(&[compressed_element(&le_f32_cube(b"cube"), false)], false),
    )
    .unwrap();

    let (from_plain, _) = load_cube_by_name(&plain.path, "cube").unwrap();
    let (from_packed, _) = load_cube_by_name(&packed.path, "cube").unwrap();
    assert_eq!(from_plain, from_packed);
}

#[test]
fn test_listing_preserves_encounter_order() {
    let first = le_f32_cube(b"alpha");
    let data: Vec<u8> = (0..8u16).flat_map(|v| v.to_le_bytes()).collect();
    let flat = matrix_element(b"table", &[4, 2], mx::UINT16, mi::UINT16, &data, false);
    let second = le_f32_cube(b"beta");

    let file = TempFile::new("order");
    std::fs::write(&file.path, mat_file(&[first, flat, second], false)).unwrap();

    let listing = list_mat_cube_variables(&file.path).unwrap();
    let names: Vec<&str> = listing.iter().map(|info| info.name.as_str()).collect();
    assert_eq!(names, ["alpha", "beta"]);
}

#[test]
fn test_corrupt_declared_length_fails_cleanly() {
    let file = TempFile::new("corrupt");
    let mut bytes = mat_file(&[le_f32_cube(b"cube")], false);
    // Stretch the top-level tag length far past the end of the file
    bytes[132..136].copy_from_slice(&0x7FFF_FFF0u32.to_le_bytes());
    std::fs::write(&file.path, bytes).unwrap();

    assert!(matches!(
        list_mat_cube_variables(&file.path),
        Err(Error::Format(_))
    ));

    // An untouched file scans fine afterwards
    let clean = TempFile::new("clean");
    std::fs::write(&clean.path, mat_file(&[le_f32_cube(b"cube")], false)).unwrap();
    assert_eq!(list_mat_cube_variables(&clean.path).unwrap().len(), 1);
}

#[test]
fn test_truncated_file_fails_cleanly() {
    let file = TempFile::new("truncated");
    let mut bytes = mat_file(&[le_f32_cube(b"cube")], false);
    bytes.truncate(bytes.len() - 10);
    std::fs::write(&file.path, bytes).unwrap();

    assert!(list_mat_cube_variables(&file.path).is_err());
}

#[test]
fn test_complex_matrix_is_skipped() {
    // Flags word carries the complex bit, so the data sub-element holds
    // twice the real-only byte count and the matrix must be passed over.
    let mut flags = Vec::new();
    flags.extend_from_slice(&(mx::DOUBLE | COMPLEX_FLAG).to_le_bytes());
    flags.extend_from_slice(&0u32.to_le_bytes());
    let mut payload = Vec::new();
    payload.extend_from_slice(&sub_element(mi::UINT32, &flags, false));
    payload.extend_from_slice(&sub_element(
        mi::INT32,
        &[2i32, 1, 1]
            .iter()
            .flat_map(|v| v.to_le_bytes())
            .collect::<Vec<u8>>(),
        false,
    ));
    payload.extend_from_slice(&sub_element(mi::INT8, b"z", false));
    payload.extend_from_slice(&sub_element(mi::DOUBLE, &[0u8; 32], false));
    let complex = sub_element(mi::MATRIX, &payload, false);

    let file = TempFile::new("complex");
    std::fs::write(&file.path, mat_file(&[complex], false)).unwrap();

    assert!(matches!(
        load_first_3d_double_cube(&file.path),
        Err(Error::VariableNotFound)
    ));
}

#[test]
fn test_unnamed_matrix_listed_as_unnamed() {
    let data: Vec<u8> = (0..24).map(|v| v as f32).flat_map(|v| v.to_le_bytes()).collect();
    let anonymous = matrix_element(b"", &[2, 3, 4], mx::SINGLE, mi::SINGLE, &data, false);

    let file = TempFile::new("unnamed");
    std::fs::write(&file.path, mat_file(&[anonymous], false)).unwrap();

    let listing = list_mat_cube_variables(&file.path).unwrap();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].name, "unnamed");
    assert_eq!(listing[0].data_type, MatDataType::F32);
}

#[test]
fn test_unknown_top_level_element_skipped() {
    // An INT8 blob at top level is not a matrix and must be stepped over
    let blob = sub_element(mi::INT8, &[9u8; 40], false);
    let file = TempFile::new("blob");
    std::fs::write(&file.path, mat_file(&[blob, le_f32_cube(b"cube")], false)).unwrap();

    let listing = list_mat_cube_variables(&file.path).unwrap();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].name, "cube");
}
