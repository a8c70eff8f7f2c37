//! Write a synthetic hyperspectral cube and its wavelength table to a MAT-file

use matcube::{save_3d_cube, save_wavelengths, Cube, Result};
use std::time::Instant;

fn main() -> Result<()> {
    env_logger::init();

    let filename = "example_cube.mat";

    // A small scene: 64 x 64 pixels, 31 spectral bands
    let (rows, cols, bands) = (64usize, 64usize, 31usize);
    println!("Building {rows} x {cols} x {bands} cube...");

    let values = build_demo_cube(rows, cols, bands);
    let cube = Cube::from_elements([rows, cols, bands], 3, &values)?;

    let start = Instant::now();
    save_3d_cube(filename, "reflectance", &cube)?;
    println!("Cube written in {:?}", start.elapsed());

    // 400nm to 700nm in 10nm steps, appended after the cube
    let wavelengths: Vec<f64> = (0..bands).map(|i| 400.0 + 10.0 * i as f64).collect();
    save_wavelengths(filename, "wavelengths", &wavelengths)?;
    println!("Wavelength table appended ({} entries)", wavelengths.len());

    println!("\nRun 'cargo run --example read_cube' to read it back!");
    Ok(())
}

/// Smooth synthetic reflectance values in column-major order
fn build_demo_cube(rows: usize, cols: usize, bands: usize) -> Vec<f32> {
    let mut values = Vec::with_capacity(rows * cols * bands);
    for band in 0..bands {
        for col in 0..cols {
            for row in 0..rows {
                let spatial = ((row + col) as f32 * 0.05).sin() * 0.5 + 0.5;
                let spectral = (band as f32 / bands as f32) * 0.8 + 0.1;
                values.push(spatial * spectral);
            }
        }
    }
    values
}
