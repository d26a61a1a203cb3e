//! bmp_qr - read QR codes out of BMP images
//!
//! Decodes uncompressed 24-bit BMP files into top-down 8-bit grayscale
//! buffers and hands them to a QR recognizer.
//!
//! ```no_run
//! let symbols = bmp_qr::scan_file("code.bmp").unwrap();
//! for symbol in &symbols {
//!     println!("{}", symbol);
//! }
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// BMP container parsing and pixel decoding
pub mod bmp;
/// Core data structures (GrayImage)
pub mod models;
/// QR symbol recognition on grayscale frames
pub mod recognize;
/// Helpers for the command-line tools (file collection, stats, env config)
pub mod tools;
/// Utility functions (grayscale conversion)
pub mod utils;

pub use bmp::{BmpError, ErrorKind};
pub use models::GrayImage;
pub use recognize::{Payload, RecognizeError, Recognizer, Symbol};

use rayon::prelude::*;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from the file-level entry points
#[derive(Debug, Error)]
pub enum ScanError {
    /// The file could not be opened
    #[error("cannot open BMP file '{}': {source}", .path.display())]
    Open {
        /// Path that failed to open
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
    /// The file is not a decodable 24-bit BMP
    #[error("'{}': {source}", .path.display())]
    Decode {
        /// Path of the offending file
        path: PathBuf,
        /// Decoder error
        #[source]
        source: BmpError,
    },
    /// The recognizer could not take the image
    #[error(transparent)]
    Recognize(#[from] RecognizeError),
}

/// Decode a BMP file into a grayscale image
pub fn decode_file<P: AsRef<Path>>(path: P) -> Result<GrayImage, ScanError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ScanError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    bmp::decode(&mut BufReader::new(file)).map_err(|source| ScanError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Detect and decode QR symbols in a grayscale image
///
/// # Returns
/// One [`Symbol`] per detected symbol, in detection order. Symbols that fail
/// to decode are included with the engine's error.
pub fn scan_image(image: &GrayImage) -> Result<Vec<Symbol>, RecognizeError> {
    let mut recognizer = Recognizer::new();
    recognizer.load(image)?;
    Ok(recognizer.end())
}

/// Decode a BMP file and scan it for QR symbols
pub fn scan_file<P: AsRef<Path>>(path: P) -> Result<Vec<Symbol>, ScanError> {
    let image = decode_file(path)?;
    Ok(scan_image(&image)?)
}

/// Scan many BMP files in parallel
///
/// Results are returned in the same order as `paths`. Each file is decoded
/// and scanned independently; one failure does not affect the others.
pub fn scan_files<P>(paths: &[P]) -> Vec<Result<Vec<Symbol>, ScanError>>
where
    P: AsRef<Path> + Sync,
{
    paths.par_iter().map(scan_file).collect()
}
