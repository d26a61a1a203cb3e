//! Uncompressed 24-bit BMP decoding to grayscale
//!
//! Only the classic BITMAPFILEHEADER + BITMAPINFOHEADER layout with 24 bits
//! per pixel and BI_RGB storage is accepted. Pixels are converted to 8-bit
//! luminance as the rows are read, so the full color image is never held in
//! memory.
//!
//! ```no_run
//! use std::fs::File;
//! use std::io::BufReader;
//!
//! let mut reader = BufReader::new(File::open("code.bmp").unwrap());
//! let image = bmp_qr::bmp::decode(&mut reader).unwrap();
//! println!("{}x{}", image.width(), image.height());
//! ```

mod error;
mod header;

pub use error::{BmpError, ErrorKind};
pub use header::{
    BmpHeaders, FILE_HEADER_SIZE, FileHeader, INFO_HEADER_SIZE, InfoHeader, MAGIC, RowOrder,
};

use std::io::{self, Cursor, Read, Seek, SeekFrom};

use log::{debug, trace, warn};

use crate::models::GrayImage;
use crate::utils::grayscale::{BGR_PIXEL_SIZE, bgr_row_to_grayscale};

/// Bits per pixel accepted by the decoder
pub const SUPPORTED_BIT_DEPTH: u16 = 24;
/// BI_RGB
pub const COMPRESSION_NONE: u32 = 0;

/// Bytes per on-disk scanline for a 24-bit image of `width` pixels
///
/// Scanlines are padded to a multiple of 4 bytes. Returns `None` on overflow.
pub fn row_stride(width: usize) -> Option<usize> {
    Some(width.checked_mul(BGR_PIXEL_SIZE)?.checked_add(3)? & !3)
}

/// Check whether `bytes` look like a BMP this decoder understands
///
/// Only the magic and the info header size are inspected. Any info header at
/// least as large as BITMAPINFOHEADER is accepted, matching [`read_headers`],
/// which reads the leading 40 bytes of V4/V5 headers. Smaller (OS/2 core)
/// headers are rejected since their fields sit at different offsets.
pub fn probe(bytes: &[u8]) -> bool {
    match (bytes.get(0..2), bytes.get(14..18)) {
        (Some(magic), Some(size)) => {
            let header_size = u32::from_le_bytes([size[0], size[1], size[2], size[3]]);
            magic == MAGIC && header_size >= INFO_HEADER_SIZE as u32
        }
        _ => false,
    }
}

/// Decode a BMP stream positioned at its first byte
pub fn decode<R: Read + Seek>(reader: &mut R) -> Result<GrayImage, BmpError> {
    BmpDecoder::new(reader).decode()
}

/// Decode a BMP held in memory
pub fn decode_bytes(bytes: &[u8]) -> Result<GrayImage, BmpError> {
    decode(&mut Cursor::new(bytes))
}

/// Read and validate the headers without touching pixel data
pub fn read_headers<R: Read>(reader: &mut R) -> Result<BmpHeaders, BmpError> {
    let mut file_bytes = [0u8; FILE_HEADER_SIZE];
    reader
        .read_exact(&mut file_bytes)
        .map_err(BmpError::FileHeader)?;
    let file = FileHeader::parse(&file_bytes)?;

    let mut info_bytes = [0u8; INFO_HEADER_SIZE];
    reader
        .read_exact(&mut info_bytes)
        .map_err(BmpError::InfoHeader)?;
    let info = InfoHeader::parse(&info_bytes);

    trace!("Header size: {}", info.header_size);
    trace!("Width: {}", info.width);
    trace!("Height: {}", info.height);
    trace!("Bit depth: {}", info.bit_depth);
    trace!("Compression: {}", info.compression);
    trace!("Pixel data offset: {}", file.pixel_data_offset);

    if info.header_size != INFO_HEADER_SIZE as u32 {
        warn!(
            "Info header size is {}, expected {}; decoding as BITMAPINFOHEADER",
            info.header_size, INFO_HEADER_SIZE
        );
    }
    if info.bit_depth != SUPPORTED_BIT_DEPTH {
        return Err(BmpError::BitDepth(info.bit_depth));
    }
    if info.compression != COMPRESSION_NONE {
        return Err(BmpError::Compression(info.compression));
    }
    if info.width <= 0 {
        return Err(BmpError::Width(info.width));
    }

    Ok(BmpHeaders { file, info })
}

fn try_reserve(buffer: &'static str, bytes: usize) -> Result<Vec<u8>, BmpError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(bytes)
        .map_err(|_| BmpError::Allocation { buffer, bytes })?;
    Ok(buf)
}

/// A 24-bit BMP decoder over a seekable stream
///
/// Headers can be inspected before committing to the pixel decode:
///
/// ```no_run
/// use std::io::Cursor;
/// use bmp_qr::bmp::BmpDecoder;
///
/// fn main() -> Result<(), bmp_qr::BmpError> {
///     let bytes = std::fs::read("code.bmp").unwrap();
///     let mut decoder = BmpDecoder::new(Cursor::new(bytes));
///     let headers = decoder.decode_headers()?;
///     println!("{}x{} {:?}", headers.width(), headers.height(), headers.row_order());
///     let image = decoder.decode()?;
///     println!("{} samples", image.pixels().len());
///     Ok(())
/// }
/// ```
pub struct BmpDecoder<R> {
    reader: R,
    headers: Option<BmpHeaders>,
}

impl<R: Read + Seek> BmpDecoder<R> {
    /// Create a decoder reading from `reader`, which must be positioned at
    /// the start of the BMP
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            headers: None,
        }
    }

    /// Parse and validate the headers; repeated calls return the cached result
    pub fn decode_headers(&mut self) -> Result<BmpHeaders, BmpError> {
        if let Some(headers) = self.headers {
            return Ok(headers);
        }
        let headers = read_headers(&mut self.reader)?;
        self.headers = Some(headers);
        Ok(headers)
    }

    /// Headers, if already decoded
    pub fn headers(&self) -> Option<&BmpHeaders> {
        self.headers.as_ref()
    }

    /// Decode the whole image into a top-down grayscale buffer
    ///
    /// On error nothing is returned; buffers allocated so far are dropped.
    pub fn decode(mut self) -> Result<GrayImage, BmpError> {
        let headers = self.decode_headers()?;
        let width = headers.width();
        let height = headers.height();

        let too_large = || BmpError::TooLarge { width, height };
        let stride = headers.row_stride().ok_or_else(too_large)?;
        let pixel_count = width.checked_mul(height).ok_or_else(too_large)?;

        let mut pixels = try_reserve("grayscale buffer", pixel_count)?;
        let mut row = try_reserve("row buffer", stride)?;

        // Capacity is only committed once the stream is known to hold every row
        let offset = headers.pixel_data_offset();
        self.check_available(offset, stride, height)?;
        pixels.resize(pixel_count, 0);
        row.resize(stride, 0);

        self.reader
            .seek(SeekFrom::Start(offset))
            .map_err(|source| BmpError::PixelSeek { offset, source })?;

        let order = headers.row_order();
        for y in 0..height {
            self.reader
                .read_exact(&mut row)
                .map_err(|source| BmpError::Row {
                    row: y,
                    height,
                    source,
                })?;

            let dest = match order {
                RowOrder::BottomUp => height - 1 - y,
                RowOrder::TopDown => y,
            };
            let start = dest * width;
            bgr_row_to_grayscale(&row, &mut pixels[start..start + width]);
        }

        debug!("Decoded {}x{} BMP ({:?}, stride {})", width, height, order, stride);

        GrayImage::new(width, height, pixels).ok_or_else(too_large)
    }

    /// Fail with the first missing row if the stream ends before
    /// `height` rows of `stride` bytes starting at `offset`
    fn check_available(
        &mut self,
        offset: u64,
        stride: usize,
        height: usize,
    ) -> Result<(), BmpError> {
        let end = self
            .reader
            .seek(SeekFrom::End(0))
            .map_err(|source| BmpError::PixelSeek { offset, source })?;
        let complete_rows = end.saturating_sub(offset) / stride as u64;
        if complete_rows >= height as u64 {
            return Ok(());
        }

        // complete_rows < height, so it fits in usize
        let row = complete_rows as usize;
        debug!(
            "Stream ends after {} bytes; pixel data holds {} of {} rows",
            end, row, height
        );
        Err(BmpError::Row {
            row,
            height,
            source: io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "pixel data ends before the last row",
            ),
        })
    }
}
