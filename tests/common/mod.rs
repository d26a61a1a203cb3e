//! BMP fixtures shared by the integration tests
#![allow(dead_code)]

use qrcode::{Color, QrCode};
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

pub const PIXEL_OFFSET_AT: usize = 10;
pub const HEADER_SIZE_AT: usize = 14;
pub const WIDTH_AT: usize = 18;
pub const HEIGHT_AT: usize = 22;
pub const BIT_DEPTH_AT: usize = 28;
pub const COMPRESSION_AT: usize = 30;
pub const PIXELS_AT: usize = 54;

pub const RED: [u8; 3] = [255, 0, 0];
pub const GREEN: [u8; 3] = [0, 255, 0];
pub const BLUE: [u8; 3] = [0, 0, 255];
pub const WHITE: [u8; 3] = [255, 255, 255];
pub const BLACK: [u8; 3] = [0, 0, 0];

pub const MODULE_PX: usize = 4;
pub const QUIET_ZONE: usize = 4;

pub fn stride(width: usize) -> usize {
    (width * 3 + 3) & !3
}

/// Reference luminance, floor(0.299R + 0.587G + 0.114B)
pub fn expected_luma([r, g, b]: [u8; 3]) -> u8 {
    (0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64) as u8
}

/// Encode `disk_rows` (RGB pixels, in on-disk order) as a 24-bit BMP.
///
/// The stored height is negated when `top_down` is set.
pub fn encode_bmp24(width: usize, disk_rows: &[Vec<[u8; 3]>], top_down: bool) -> Vec<u8> {
    let height = disk_rows.len();
    let row_size = stride(width);
    let pixel_bytes = row_size * height;
    let stored_height = if top_down {
        -(height as i32)
    } else {
        height as i32
    };

    let mut out = Vec::with_capacity(PIXELS_AT + pixel_bytes);
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&((PIXELS_AT + pixel_bytes) as u32).to_le_bytes());
    out.extend_from_slice(&[0u8; 4]);
    out.extend_from_slice(&(PIXELS_AT as u32).to_le_bytes());

    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&(width as i32).to_le_bytes());
    out.extend_from_slice(&stored_height.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&24u16.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&(pixel_bytes as u32).to_le_bytes());
    out.extend_from_slice(&2835i32.to_le_bytes());
    out.extend_from_slice(&2835i32.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    assert_eq!(out.len(), PIXELS_AT);

    for row in disk_rows {
        assert_eq!(row.len(), width, "row width mismatch");
        for &[r, g, b] in row {
            out.extend_from_slice(&[b, g, r]);
        }
        out.resize(out.len() + row_size - width * 3, 0);
    }
    out
}

/// Render a top-down image as a conventional bottom-up BMP.
pub fn render_bmp24<F>(width: usize, height: usize, pixel: F) -> Vec<u8>
where
    F: Fn(usize, usize) -> [u8; 3],
{
    let rows: Vec<Vec<[u8; 3]>> = (0..height)
        .rev()
        .map(|y| (0..width).map(|x| pixel(x, y)).collect())
        .collect();
    encode_bmp24(width, &rows, false)
}

/// Render a top-down image as a negative-height BMP.
pub fn render_bmp24_top_down<F>(width: usize, height: usize, pixel: F) -> Vec<u8>
where
    F: Fn(usize, usize) -> [u8; 3],
{
    let rows: Vec<Vec<[u8; 3]>> = (0..height)
        .map(|y| (0..width).map(|x| pixel(x, y)).collect())
        .collect();
    encode_bmp24(width, &rows, true)
}

pub fn set_u16(bytes: &mut [u8], offset: usize, value: u16) {
    bytes[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
}

pub fn set_u32(bytes: &mut [u8], offset: usize, value: u32) {
    bytes[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

pub fn set_i32(bytes: &mut [u8], offset: usize, value: i32) {
    bytes[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

static TEMP_FILE_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Write `contents` to a fresh file under the system temp dir.
pub fn write_temp_file(name: &str, contents: &[u8]) -> PathBuf {
    let mut path = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before UNIX epoch")
        .as_nanos();
    let sequence = TEMP_FILE_COUNTER.fetch_add(1, Ordering::Relaxed);
    path.push(format!("bmpqr_{nanos}_{sequence}_{name}"));
    fs::write(&path, contents).expect("failed to write temp file");
    path
}


/// Rasterize `text` as a QR symbol; returns (size_px, pixel lookup)
pub fn qr_raster(
    text: &str,
    dark: [u8; 3],
    light: [u8; 3],
) -> (usize, impl Fn(usize, usize) -> [u8; 3]) {
    let code = QrCode::new(text.as_bytes()).expect("payload should be encodable");
    let modules = code.width();
    let colors = code.to_colors();
    let size = (modules + 2 * QUIET_ZONE) * MODULE_PX;

    let lookup = move |x: usize, y: usize| {
        let mx = x / MODULE_PX;
        let my = y / MODULE_PX;
        let inside = (QUIET_ZONE..QUIET_ZONE + modules).contains(&mx)
            && (QUIET_ZONE..QUIET_ZONE + modules).contains(&my);
        if inside && colors[(my - QUIET_ZONE) * modules + (mx - QUIET_ZONE)] == Color::Dark {
            dark
        } else {
            light
        }
    };
    (size, lookup)
}

/// Bottom-up BMP holding a QR symbol for `text`
pub fn qr_bmp(text: &str, dark: [u8; 3], light: [u8; 3]) -> Vec<u8> {
    let (size, lookup) = qr_raster(text, dark, light);
    render_bmp24(size, size, lookup)
}
