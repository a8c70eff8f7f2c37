#![cfg_attr(not(feature = "std"), no_std)]

//! matcube-core - MATLAB Level-5 (MAT5) format definitions
//!
//! This crate provides the pure, I/O-free half of the MAT5 codec: on-wire
//! constants, endianness primitives, overflow-checked size arithmetic, and
//! the tag and matrix parsers that operate on borrowed byte slices.
//! File access, decompression, and the writer live in the `matcube` crate.

#[cfg(test)]
extern crate std;

pub mod error;
pub mod format;
pub mod matrix;
pub mod numeric;
pub mod tag;
pub mod validation;

pub use error::*;
pub use format::*;
pub use matrix::*;
pub use numeric::*;
pub use tag::*;
pub use validation::*;
