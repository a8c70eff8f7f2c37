//! Error types for MAT5 parsing and writing

/// Errors that can occur while decoding or encoding MAT5 data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatError {
    /// File shorter than the 128-byte MAT5 header
    FileTooSmall,
    /// Endian marker at bytes 126..128 is neither "IM" nor "MI"
    UnknownEndianness,
    /// A tag needs more bytes than the buffer holds
    TruncatedElement,
    /// A tag is structurally invalid (e.g. small-element length > 4)
    InvalidTag,
    /// Dimension count or value out of range
    InvalidDimensions,
    /// Rank does not match the requested operation
    InvalidRank,
    /// Numeric class outside the supported set, or complex-flagged
    UnsupportedClass,
    /// Real-data byte count does not match dims x element size
    DataSizeMismatch,
    /// Requested element type differs from the stored numeric class
    TypeMismatch,
    /// zlib stream corrupt or truncated
    CorruptStream,
    /// Size arithmetic overflowed
    SizeOverflow,
    /// Compressed elements nested deeper than the allowed bound
    NestingTooDeep,
}

impl core::fmt::Display for MatError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            MatError::FileTooSmall => "file smaller than MAT5 header",
            MatError::UnknownEndianness => "unrecognized endian marker",
            MatError::TruncatedElement => "element extends beyond buffer",
            MatError::InvalidTag => "invalid element tag",
            MatError::InvalidDimensions => "invalid dimensions",
            MatError::InvalidRank => "rank mismatch",
            MatError::UnsupportedClass => "unsupported numeric class",
            MatError::DataSizeMismatch => "data size does not match dimensions",
            MatError::TypeMismatch => "element type mismatch",
            MatError::CorruptStream => "corrupt or truncated zlib stream",
            MatError::SizeOverflow => "size arithmetic overflow",
            MatError::NestingTooDeep => "compressed elements nested too deeply",
        };
        write!(f, "{msg}")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MatError {}

/// Result type for MAT5 parsing operations
pub type Result<T> = core::result::Result<T, MatError>;
