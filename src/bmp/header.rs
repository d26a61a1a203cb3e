//! On-disk BMP headers
//!
//! Both headers are packed little-endian structures. Fields are pulled out of
//! fixed-size byte arrays at explicit offsets instead of relying on any
//! in-memory struct layout.

use super::error::BmpError;

/// Size of the BITMAPFILEHEADER in bytes
pub const FILE_HEADER_SIZE: usize = 14;
/// Size of the BITMAPINFOHEADER in bytes
pub const INFO_HEADER_SIZE: usize = 40;
/// The two magic bytes every BMP file starts with
pub const MAGIC: [u8; 2] = *b"BM";

fn u16_at(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

fn u32_at(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

fn i32_at(bytes: &[u8], offset: usize) -> i32 {
    u32_at(bytes, offset) as i32
}

/// BITMAPFILEHEADER
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    /// Total file size as recorded in the header (not checked against the stream)
    pub file_size: u32,
    /// First reserved field
    pub reserved1: u16,
    /// Second reserved field
    pub reserved2: u16,
    /// Offset from the start of the file to the first pixel row
    pub pixel_data_offset: u32,
}

impl FileHeader {
    /// Parse the 14-byte file header, checking the `BM` magic
    pub fn parse(bytes: &[u8; FILE_HEADER_SIZE]) -> Result<Self, BmpError> {
        let magic = [bytes[0], bytes[1]];
        if magic != MAGIC {
            return Err(BmpError::BadMagic { found: magic });
        }

        Ok(Self {
            file_size: u32_at(bytes, 2),
            reserved1: u16_at(bytes, 6),
            reserved2: u16_at(bytes, 8),
            pixel_data_offset: u32_at(bytes, 10),
        })
    }
}

/// BITMAPINFOHEADER
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfoHeader {
    /// Declared size of this header (40 for BITMAPINFOHEADER)
    pub header_size: u32,
    /// Width in pixels
    pub width: i32,
    /// Height in pixels; the sign encodes row order
    pub height: i32,
    /// Color planes
    pub planes: u16,
    /// Bits per pixel
    pub bit_depth: u16,
    /// Compression scheme (0 = BI_RGB)
    pub compression: u32,
    /// Size of the pixel data, may be 0 for BI_RGB
    pub image_size: u32,
    /// Horizontal resolution in pixels per meter
    pub x_pixels_per_meter: i32,
    /// Vertical resolution in pixels per meter
    pub y_pixels_per_meter: i32,
    /// Palette entries in use
    pub colors_used: u32,
    /// Palette entries required to display the image
    pub colors_important: u32,
}

impl InfoHeader {
    /// Parse the 40-byte info header. No field is validated here.
    pub fn parse(bytes: &[u8; INFO_HEADER_SIZE]) -> Self {
        Self {
            header_size: u32_at(bytes, 0),
            width: i32_at(bytes, 4),
            height: i32_at(bytes, 8),
            planes: u16_at(bytes, 12),
            bit_depth: u16_at(bytes, 14),
            compression: u32_at(bytes, 16),
            image_size: u32_at(bytes, 20),
            x_pixels_per_meter: i32_at(bytes, 24),
            y_pixels_per_meter: i32_at(bytes, 28),
            colors_used: u32_at(bytes, 32),
            colors_important: u32_at(bytes, 36),
        }
    }
}

/// Order in which scanlines are stored on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOrder {
    /// First stored row is the bottom of the image (positive height)
    BottomUp,
    /// First stored row is the top of the image (negative height)
    TopDown,
}

/// Validated headers of a 24-bit uncompressed BMP
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BmpHeaders {
    /// File header
    pub file: FileHeader,
    /// Info header
    pub info: InfoHeader,
}

impl BmpHeaders {
    /// Width in pixels
    pub fn width(&self) -> usize {
        self.info.width.unsigned_abs() as usize
    }

    /// Number of rows, regardless of storage order
    pub fn height(&self) -> usize {
        self.info.height.unsigned_abs() as usize
    }

    /// Storage order of scanlines
    pub fn row_order(&self) -> RowOrder {
        if self.info.height < 0 {
            RowOrder::TopDown
        } else {
            RowOrder::BottomUp
        }
    }

    /// Bytes per on-disk scanline including padding
    pub fn row_stride(&self) -> Option<usize> {
        super::row_stride(self.width())
    }

    /// Offset of the first pixel row from the start of the file
    pub fn pixel_data_offset(&self) -> u64 {
        u64::from(self.file.pixel_data_offset)
    }
}
