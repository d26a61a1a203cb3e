use bmp_qr::tools::{grayscale_stats, read_headers};
use bmp_qr::{ScanError, decode_file, scan_image};
use clap::{ArgAction, Parser};
use log::{Level, info};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

#[derive(Parser)]
#[command(
    name = "qrtool",
    version,
    about = "Decode QR codes from uncompressed 24-bit BMP images"
)]
struct Cli {
    /// BMP file to scan
    bmp_file: PathBuf,
    /// Print header and grayscale information before scanning
    #[arg(long)]
    info: bool,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn setup_logger(verbose: u8, quiet: bool) {
    let log_level = if quiet {
        Level::Error
    } else {
        match verbose {
            0 => Level::Warn,
            1 => Level::Info,
            2 => Level::Debug,
            _ => Level::Trace,
        }
    };

    if let Err(err) = simple_logger::init_with_level(log_level) {
        eprintln!("Failed to initialize logger: {}", err);
    }
    info!("Log level: {}", log_level);
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logger(cli.verbose, cli.quiet);

    match scan_cmd(&cli.bmp_file, cli.info) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            if is_load_failure(&err) {
                eprintln!("Failed to load BMP: {}", cli.bmp_file.display());
            }
            ExitCode::FAILURE
        }
    }
}

/// Whether `err` happened before a grayscale image was available
fn is_load_failure(err: &ScanError) -> bool {
    matches!(err, ScanError::Open { .. } | ScanError::Decode { .. })
}

fn scan_cmd(path: &Path, show_info: bool) -> Result<(), ScanError> {
    if show_info {
        let headers = read_headers(path)?;
        println!(
            "Image: {} ({}x{}, {:?}, stride {} bytes, pixel data at offset {})",
            path.display(),
            headers.width(),
            headers.height(),
            headers.row_order(),
            headers.row_stride().unwrap_or(0),
            headers.pixel_data_offset()
        );
    }

    let start = Instant::now();
    let image = decode_file(path)?;
    info!(
        "Loaded {}x{} BMP in {:.2?}",
        image.width(),
        image.height(),
        start.elapsed()
    );

    if show_info {
        let stats = grayscale_stats(&image);
        println!(
            "Grayscale range: {}-{}, average: {}",
            stats.min, stats.max, stats.avg
        );
    }

    let symbols = scan_image(&image)?;
    if symbols.is_empty() {
        println!("No QR codes found in the image.");
        return Ok(());
    }

    println!("Found {} QR code(s) in the image:", symbols.len());
    for symbol in &symbols {
        println!("  {}", symbol);
    }
    Ok(())
}
