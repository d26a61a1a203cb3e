use crate::bmp::{self, BmpError, BmpHeaders};
use crate::{GrayImage, ScanError};
use std::env;
use std::fs;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Read and validate only the headers of a BMP file.
pub fn read_headers<P: AsRef<Path>>(path: P) -> Result<BmpHeaders, ScanError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ScanError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    bmp::read_headers(&mut BufReader::new(file)).map_err(|source: BmpError| ScanError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Summary statistics for grayscale data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrayStats {
    /// Minimum grayscale value.
    pub min: u8,
    /// Maximum grayscale value.
    pub max: u8,
    /// Average grayscale value.
    pub avg: u8,
}

/// Compute min/max/avg for a grayscale image.
pub fn grayscale_stats(image: &GrayImage) -> GrayStats {
    let gray = image.pixels();
    let mut min = u8::MAX;
    let mut max = u8::MIN;
    let mut sum: u64 = 0;
    for &v in gray {
        min = min.min(v);
        max = max.max(v);
        sum += v as u64;
    }
    if gray.is_empty() {
        return GrayStats {
            min: 0,
            max: 0,
            avg: 0,
        };
    }
    let avg = (sum / gray.len() as u64) as u8;
    GrayStats { min, max, avg }
}

fn parse_limit(value: &str) -> Option<usize> {
    value
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|v| if v == 0 { None } else { Some(v) })
}

/// Default batch limit from environment variables.
///
/// Returns `None` (no limit) when `BMPQR_BATCH_LIMIT` is unset, unparsable or `0`.
pub fn batch_limit_from_env() -> Option<usize> {
    env::var("BMPQR_BATCH_LIMIT")
        .ok()
        .and_then(|value| parse_limit(&value))
}

/// Expand files and directories into a sorted list of BMP paths.
///
/// Directories are walked recursively and only `.bmp` files are kept;
/// paths naming files are kept whatever their extension.
pub fn collect_bmp_files<P: AsRef<Path>>(inputs: &[P], limit: Option<usize>) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for input in inputs {
        let input = input.as_ref();
        if input.is_dir() {
            files.extend(collect_dir(input));
        } else {
            files.push(input.to_path_buf());
        }
    }

    files.sort();
    files.dedup();
    if let Some(limit) = limit {
        files.truncate(limit);
    }
    files
}

fn collect_dir(root: &Path) -> Vec<PathBuf> {
    let mut stack = vec![root.to_path_buf()];
    let mut images = Vec::new();

    while let Some(dir) = stack.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(_) => continue,
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
                continue;
            }
            if let Some(ext) = path.extension() {
                if ext.to_string_lossy().eq_ignore_ascii_case("bmp") {
                    images.push(path);
                }
            }
        }
    }

    images
}
