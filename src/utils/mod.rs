//! Utility functions for image processing
//!
//! - Grayscale conversion (BGR scanlines to BT.601 luminance)

pub mod grayscale;
