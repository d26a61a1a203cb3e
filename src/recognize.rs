//! QR symbol recognition on grayscale buffers
//!
//! The recognizer owns its input buffer the way quirc does: size it with
//! [`Recognizer::resize`], copy samples into [`Recognizer::begin`], then call
//! [`Recognizer::end`] to detect and decode every symbol in the frame.
//! Detection and decoding are delegated to `rqrr`.

use std::fmt;

use log::debug;
use rqrr::{DeQRError, PreparedImage};
use thiserror::Error;

use crate::models::GrayImage;

/// Errors raised while preparing the recognizer buffer
#[derive(Debug, Error)]
pub enum RecognizeError {
    /// `width * height` overflows
    #[error("recognizer buffer {width}x{height} is too large")]
    TooLarge {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
    },
    /// The allocator refused the buffer
    #[error("could not allocate {bytes} bytes for the recognizer buffer")]
    Allocation {
        /// Requested size
        bytes: usize,
    },
}

/// Decoded contents of one symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    /// Decoded text
    pub text: String,
    /// Symbol version (1-40)
    pub version: usize,
    /// Error correction level as reported by the engine
    pub ecc_level: u16,
    /// Mask pattern (0-7)
    pub mask: u16,
}

/// One detected symbol and the result of decoding it
#[derive(Debug)]
pub struct Symbol {
    /// 1-based position in detection order
    pub index: usize,
    /// Payload, or the engine's reason for rejecting the symbol
    pub outcome: Result<Payload, DeQRError>,
}

impl Symbol {
    /// Decoded text, if the symbol decoded
    pub fn text(&self) -> Option<&str> {
        self.outcome.as_ref().ok().map(|p| p.text.as_str())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Ok(payload) => write!(f, "QR Code #{}: Payload: \"{}\"", self.index, payload.text),
            Err(err) => write!(f, "QR Code #{}: Decode failed: {}", self.index, err),
        }
    }
}

/// Owns the grayscale frame handed to the recognition engine
#[derive(Debug, Default)]
pub struct Recognizer {
    width: usize,
    height: usize,
    buffer: Vec<u8>,
}

impl Recognizer {
    /// Create a recognizer with an empty 0x0 frame
    pub fn new() -> Self {
        Self::default()
    }

    /// Resize the frame to exactly `width * height` samples
    ///
    /// Existing contents are discarded.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), RecognizeError> {
        let bytes = width
            .checked_mul(height)
            .ok_or(RecognizeError::TooLarge { width, height })?;

        self.buffer.clear();
        self.buffer
            .try_reserve_exact(bytes)
            .map_err(|_| RecognizeError::Allocation { bytes })?;
        self.buffer.resize(bytes, 0);
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Frame dimensions as `(width, height)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Writable frame buffer, exactly `width * height` bytes
    pub fn begin(&mut self) -> &mut [u8] {
        &mut self.buffer
    }

    /// Resize to `image` and copy its samples into the frame
    pub fn load(&mut self, image: &GrayImage) -> Result<(), RecognizeError> {
        self.resize(image.width(), image.height())?;
        self.begin().copy_from_slice(image.pixels());
        Ok(())
    }

    /// Detect and decode all symbols in the current frame
    ///
    /// Decode failures are reported per symbol and never abort the scan.
    pub fn end(&self) -> Vec<Symbol> {
        if self.buffer.is_empty() {
            return Vec::new();
        }

        let width = self.width;
        let buffer = &self.buffer;
        let mut prepared =
            PreparedImage::prepare_from_greyscale(self.width, self.height, |x, y| {
                buffer[y * width + x]
            });
        let grids = prepared.detect_grids();
        debug!("Engine found {} candidate grid(s)", grids.len());

        grids
            .iter()
            .enumerate()
            .map(|(i, grid)| Symbol {
                index: i + 1,
                outcome: grid.decode().map(|(meta, text)| Payload {
                    text,
                    version: meta.version.0,
                    ecc_level: meta.ecc_level,
                    mask: meta.mask,
                }),
            })
            .collect()
    }
}
