//! Read a MAT-file back: list its variables, then load the first cube

use matcube::{MatFile, Result};
use std::time::Instant;

fn main() -> Result<()> {
    env_logger::init();

    let filename = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "example_cube.mat".to_string());

    if !std::path::Path::new(&filename).exists() {
        println!("File '{filename}' not found!");
        println!("   Run 'cargo run --example write_cube' first");
        return Ok(());
    }

    let start = Instant::now();
    let file = MatFile::open(&filename)?;
    println!(
        "Opened '{filename}' ({:?} byte order) in {:?}",
        file.endian(),
        start.elapsed()
    );

    println!("\nRank-3 variables:");
    for info in file.list_3d_variables()? {
        println!("   {}: {:?} ({})", info.name, info.dims, info.data_type);
    }
    println!("Rank-2 variables:");
    for info in file.list_2d_variables()? {
        println!("   {}: {:?} ({})", info.name, info.dims, info.data_type);
    }

    let start = Instant::now();
    let (cube, name) = file.first_3d_cube()?;
    println!(
        "\nLoaded '{name}': {:?} {} ({} elements) in {:?}",
        cube.dims(),
        cube.data_type(),
        cube.len(),
        start.elapsed()
    );

    if let Ok(values) = cube.values::<f32>() {
        let (min, max) = values
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        println!("   Value range: {min:.4} .. {max:.4}");
    }

    Ok(())
}
