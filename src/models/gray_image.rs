/// Owned 8-bit grayscale image, row-major with row 0 at the visual top
///
/// The pixel buffer always holds exactly `width * height` samples; there is
/// no stride or row padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayImage {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl GrayImage {
    /// Wrap an existing luminance buffer
    ///
    /// Returns `None` when `pixels.len()` is not exactly `width * height`.
    pub fn new(width: usize, height: usize, pixels: Vec<u8>) -> Option<Self> {
        let expected = width.checked_mul(height)?;
        if pixels.len() != expected {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    /// Get image width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get image height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get `(width, height)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Borrow all samples, row-major
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Borrow one row of samples (`y` counted from the top)
    pub fn row(&self, y: usize) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        Some(&self.pixels[start..start + self.width])
    }

    /// Get the sample at (x, y), `None` when out of bounds
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    /// Release the buffer to the caller as `(width, height, pixels)`
    pub fn into_parts(self) -> (usize, usize, Vec<u8>) {
        (self.width, self.height, self.pixels)
    }
}
