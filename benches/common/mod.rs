/// Build a bottom-up 24-bit BMP filled with a repeating gradient.
pub fn synthetic_bmp(width: usize, height: usize) -> Vec<u8> {
    let stride = (width * 3 + 3) & !3;
    let pixel_bytes = stride * height;

    let mut out = Vec::with_capacity(54 + pixel_bytes);
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&((54 + pixel_bytes) as u32).to_le_bytes());
    out.extend_from_slice(&[0u8; 4]);
    out.extend_from_slice(&54u32.to_le_bytes());
    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&(width as i32).to_le_bytes());
    out.extend_from_slice(&(height as i32).to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&24u16.to_le_bytes());
    out.extend_from_slice(&[0u8; 24]);

    for y in 0..height {
        for x in 0..width {
            out.extend_from_slice(&[(x + y) as u8, (x * 3) as u8, (y * 5) as u8]);
        }
        out.resize(out.len() + stride - width * 3, 0);
    }
    out
}
