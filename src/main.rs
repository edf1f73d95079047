use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use walkdir::WalkDir;

use chromapress::{
    AnalysisReport, InitStrategy, LevelStats, Orchestrator, PixelMap, QuantizeOptions,
    ANALYSIS_LEVELS,
};

const IMAGE_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "bmp", "gif", "tiff", "webp"];

#[derive(ValueEnum, Clone, Copy, Debug)]
enum InitArg {
    Random,
    PlusPlus,
}

#[derive(Parser, Debug)]
#[command(
    name = "chromapress",
    version,
    about = "Lossy image compression via k-means color quantization"
)]
struct Args {
    /// Image file to compress, or a directory of images for batch mode
    input: PathBuf,

    /// Number of colors in the output palette
    #[arg(short = 'c', long = "colors", default_value_t = 16)]
    colors: usize,

    /// Compress at every preset level and write a JSON report
    #[arg(short = 'a', long = "analysis")]
    analysis: bool,

    /// Output directory
    #[arg(short = 'o', long = "output", default_value = "output")]
    output: PathBuf,

    /// Seed for the center initialization RNG
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Center initialization strategy
    #[arg(long, value_enum, default_value = "plus-plus")]
    init: InitArg,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.colors < 1 {
        bail!("color count must be at least 1, got {}", args.colors);
    }

    fs::create_dir_all(&args.output)
        .with_context(|| format!("failed to create output directory {}", args.output.display()))?;

    let options = QuantizeOptions {
        init: match args.init {
            InitArg::Random => InitStrategy::RandomSample,
            InitArg::PlusPlus => InitStrategy::PlusPlus,
        },
        seed: args.seed,
        ..QuantizeOptions::default()
    };

    let inputs = collect_inputs(&args.input)?;

    println!("=== chromapress: k-means color quantization ===\n");

    for input in &inputs {
        if args.analysis {
            run_analysis(input, &args.output, &options)?;
        } else {
            run_single(input, &args.output, args.colors, &options)?;
        }
    }

    Ok(())
}

/// A file argument is taken as-is; a directory is walked for every image it
/// contains.
fn collect_inputs(input: &Path) -> Result<Vec<PathBuf>> {
    if !input.is_dir() {
        return Ok(vec![input.to_path_buf()]);
    }

    let mut inputs = Vec::new();
    for entry in WalkDir::new(input) {
        let entry = entry.with_context(|| format!("failed to walk {}", input.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let is_image = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
            .unwrap_or(false);
        if is_image {
            inputs.push(entry.into_path());
        }
    }

    if inputs.is_empty() {
        bail!("no images found under {}", input.display());
    }
    inputs.sort();
    Ok(inputs)
}

fn decode(input: &Path) -> Result<Orchestrator> {
    let step_start = Instant::now();
    println!("Step 1: Decoding {}...", input.display());

    let pixels = PixelMap::from_path(input)
        .with_context(|| format!("failed to load {}", input.display()))?;
    let orchestrator = Orchestrator::new(pixels);

    println!(
        "✓ {}x{} ({} pixels, {} distinct colors) [{:.2}s]\n",
        orchestrator.pixel_map().width(),
        orchestrator.pixel_map().height(),
        orchestrator.pixel_map().pixel_count(),
        orchestrator.distinct_colors(),
        step_start.elapsed().as_secs_f64()
    );

    Ok(orchestrator)
}

fn run_single(
    input: &Path,
    output_dir: &Path,
    colors: usize,
    options: &QuantizeOptions,
) -> Result<()> {
    let orchestrator = decode(input)?;

    let step_start = Instant::now();
    println!("Step 2: Quantizing to {} colors...", colors);
    let mut output = orchestrator.compress(colors, options)?;
    println!(
        "✓ {} in {} iterations, {} colors used [{:.2}s]\n",
        if output.stats.converged {
            "converged"
        } else {
            "stopped at iteration cap"
        },
        output.stats.iterations,
        output.stats.colors_used,
        step_start.elapsed().as_secs_f64()
    );

    let step_start = Instant::now();
    println!("Step 3: Saving...");
    let path = save_level(input, output_dir, colors, &mut output.stats, &output.image)?;
    println!(
        "✓ {} ({:.1} KB) [{:.2}s]\n",
        path.display(),
        output.stats.file_size_bytes.unwrap_or(0) as f64 / 1024.0,
        step_start.elapsed().as_secs_f64()
    );

    println!(
        "Compression ratio (colors): {:.2}x, mse {:.2}",
        output.stats.compression_ratio, output.stats.mean_squared_error
    );

    Ok(())
}

fn run_analysis(input: &Path, output_dir: &Path, options: &QuantizeOptions) -> Result<()> {
    let orchestrator = decode(input)?;

    let step_start = Instant::now();
    println!("Step 2: Quantizing at levels {:?}...\n", ANALYSIS_LEVELS);

    let mut collected: Vec<LevelStats> = Vec::new();
    for output in orchestrator.analyze(&ANALYSIS_LEVELS, options)? {
        let mut stats = output.stats;
        let path = save_level(input, output_dir, stats.k, &mut stats, &output.image)?;
        println!(
            "  k={:<4} {} colors used, mse {:>8.2} -> {}",
            stats.k,
            stats.colors_used,
            stats.mean_squared_error,
            path.display()
        );
        collected.push(stats);
    }
    println!(
        "\n✓ All levels complete [{:.2}s]\n",
        step_start.elapsed().as_secs_f64()
    );

    let report = orchestrator.report(collected);
    let report_path = output_dir.join(format!("{}_report.json", file_stem(input)));
    write_report(&report, &report_path)?;

    print_summary(&report);
    println!("\nReport written to {}", report_path.display());

    Ok(())
}

fn save_level(
    input: &Path,
    output_dir: &Path,
    k: usize,
    stats: &mut LevelStats,
    image: &image::RgbImage,
) -> Result<PathBuf> {
    let path = output_dir.join(format!("{}_compressed_{}.png", file_stem(input), k));
    image
        .save(&path)
        .with_context(|| format!("failed to save {}", path.display()))?;

    let on_disk = fs::metadata(&path)
        .with_context(|| format!("failed to stat {}", path.display()))?
        .len();
    stats.file_size_bytes = Some(on_disk);

    Ok(path)
}

fn write_report(report: &AnalysisReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn print_summary(report: &AnalysisReport) {
    println!("=== Analysis Summary ===");
    println!(
        "{:<10} {:>12} {:>12} {:>10} {:>10}",
        "colors", "used", "file size", "ratio", "mse"
    );
    for level in &report.levels {
        println!(
            "{:<10} {:>12} {:>9.1} KB {:>9.2}x {:>10.2}",
            level.k,
            level.colors_used,
            level.file_size_bytes.unwrap_or(0) as f64 / 1024.0,
            level.compression_ratio,
            level.mean_squared_error
        );
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string())
}
