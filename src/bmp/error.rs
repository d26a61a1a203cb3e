use std::io;

use thiserror::Error;

/// Broad class of a decode failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Not a BMP, or corrupt at the header level
    Format,
    /// A valid BMP using a feature this decoder does not implement
    UnsupportedFormat,
    /// Non-positive width
    InvalidDimensions,
    /// Pixel data shorter than the header geometry implies
    TruncatedData,
    /// Output or staging buffer could not be allocated
    AllocationFailure,
}

/// Errors produced while decoding a BMP stream
///
/// Every variant names the stage that failed; use [`BmpError::kind`] to
/// branch on the class of failure.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BmpError {
    /// Fewer than 14 bytes were available for the file header
    #[error("could not read BMP file header: {0}")]
    FileHeader(#[source] io::Error),
    /// The file does not start with `BM`
    #[error("not a valid BMP file (magic number mismatch, found {:02x} {:02x})", .found[0], .found[1])]
    BadMagic {
        /// The two bytes found instead
        found: [u8; 2],
    },
    /// Fewer than 40 bytes were available for the info header
    #[error("could not read BMP info header: {0}")]
    InfoHeader(#[source] io::Error),
    /// Bit depth other than 24
    #[error("not a 24-bit BMP file (bit depth {0})")]
    BitDepth(u16),
    /// Compression other than BI_RGB
    #[error("compressed BMP files are not supported (compression type {0})")]
    Compression(u32),
    /// Width is zero or negative
    #[error("invalid image width {0}")]
    Width(i32),
    /// Buffer sizes for the declared dimensions overflow `usize`
    #[error("image dimensions {width}x{height} exceed addressable memory")]
    TooLarge {
        /// Declared width
        width: usize,
        /// Declared height
        height: usize,
    },
    /// The allocator refused a buffer
    #[error("could not allocate {bytes} bytes for the {buffer}")]
    Allocation {
        /// Which buffer was being allocated
        buffer: &'static str,
        /// Requested size
        bytes: usize,
    },
    /// The stream could not be positioned at the pixel data
    #[error("could not seek to pixel data at offset {offset}: {source}")]
    PixelSeek {
        /// Offset from the file header
        offset: u64,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
    /// A scanline could not be read in full
    #[error("could not read pixel data row {row} of {height}: {source}")]
    Row {
        /// On-disk row index
        row: usize,
        /// Total number of rows
        height: usize,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl BmpError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::FileHeader(_) | Self::BadMagic { .. } | Self::InfoHeader(_) => ErrorKind::Format,
            Self::BitDepth(_) | Self::Compression(_) => ErrorKind::UnsupportedFormat,
            Self::Width(_) => ErrorKind::InvalidDimensions,
            Self::PixelSeek { .. } | Self::Row { .. } => ErrorKind::TruncatedData,
            Self::TooLarge { .. } | Self::Allocation { .. } => ErrorKind::AllocationFailure,
        }
    }
}
