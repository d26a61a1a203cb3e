use bmp_qr::scan_files;
use bmp_qr::tools::{batch_limit_from_env, collect_bmp_files};
use clap::Parser;
use log::Level;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

#[derive(Parser)]
#[command(
    name = "batch_scan",
    version,
    about = "Scan many BMP files in parallel and report the reading rate"
)]
struct Cli {
    /// BMP files or directories to scan (directories are walked recursively)
    #[arg(required = true)]
    paths: Vec<PathBuf>,
    /// Maximum number of files to scan (defaults to BMPQR_BATCH_LIMIT)
    #[arg(long)]
    limit: Option<usize>,
    /// Log decoder details
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let level = if cli.verbose { Level::Debug } else { Level::Warn };
    if let Err(err) = simple_logger::init_with_level(level) {
        eprintln!("Failed to initialize logger: {}", err);
    }

    let limit = cli.limit.or_else(batch_limit_from_env);
    let files = collect_bmp_files(&cli.paths, limit);
    if files.is_empty() {
        eprintln!("No BMP files found");
        return ExitCode::FAILURE;
    }

    let start = Instant::now();
    let results = scan_files(&files);
    let elapsed = start.elapsed();

    let mut hits = 0usize;
    let mut errors = 0usize;
    for (i, (path, result)) in files.iter().zip(&results).enumerate() {
        match result {
            Ok(symbols) if symbols.iter().any(|s| s.text().is_some()) => {
                hits += 1;
                println!(
                    "  [{}] {} -> hit ({} symbol(s))",
                    i + 1,
                    path.display(),
                    symbols.len()
                );
            }
            Ok(_) => println!("  [{}] {} -> miss", i + 1, path.display()),
            Err(err) => {
                errors += 1;
                println!("  [{}] {} -> error: {}", i + 1, path.display(), err);
            }
        }
    }

    let total = files.len();
    let rate = (hits as f64 / total as f64) * 100.0;
    println!("\n=====================================");
    println!("Reading rate: {}/{} = {:.2}%", hits, total, rate);
    println!("Load errors: {}", errors);
    println!("Total time: {:.2?}", elapsed);
    println!("=====================================");

    ExitCode::SUCCESS
}
