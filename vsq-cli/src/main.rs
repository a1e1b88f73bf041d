//! VSQ Converter CLI Application
//!
//! Command-line front end for the vsq-converter library. It adds:
//! - CSV input reading and .vsq output writing
//! - Argument parsing and optional TOML configuration
//! - Console summary (statistics, warnings, live preview)
//! - A machine-readable JSON result object (--json)

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

use vsq_converter::{convert, ConversionOutcome, ConversionSettings, Table};

mod config;
mod result;

use result::{ConversionFailure, ConversionResult};

/// VSQ Converter - Turn tabular CAN frame lists into replay scripts
#[derive(Parser, Debug)]
#[command(name = "vsq-cli")]
#[command(about = "Convert CSV CAN frame lists into VSQ replay scripts", long_about = None)]
#[command(version)]
struct Args {
    /// Path to the input CSV file (header row + one frame per row)
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Output .vsq file (default: input name with .vsq extension)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Sequence name written into the document header (default: output stem)
    #[arg(long, value_name = "NAME")]
    name: Option<String>,

    /// Path to a TOML configuration file (flags override it)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Default timeout in milliseconds for rows without one
    #[arg(long, value_name = "MS")]
    timeout: Option<u32>,

    /// CAN channel label (e.g. CAN1, CAN2)
    #[arg(long, value_name = "CHANNEL")]
    channel: Option<String>,

    /// Treat every identifier as extended (29-bit)
    #[arg(long)]
    force_extended: bool,

    /// Emit cyclic-transmission groups with this interval in milliseconds
    #[arg(long, value_name = "MS", num_args = 0..=1, default_missing_value = "50")]
    cyclic: Option<u32>,

    /// Print the result object as JSON instead of the console summary
    #[arg(long)]
    json: bool,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    log::info!("VSQ Converter CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using converter library v{}", vsq_converter::VERSION);

    if let Err(e) = run(&args) {
        if args.json {
            let failure = ConversionFailure::new(format!("{:#}", e));
            // Failure objects are flat; serialization cannot fail here
            println!(
                "{}",
                serde_json::to_string_pretty(&failure).unwrap_or_default()
            );
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let app_config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => config::AppConfig::default(),
    };

    let output_path = resolve_output_path(args, &app_config);
    let settings = resolve_settings(args, &app_config, &output_path);

    let chatty = !args.json && !args.quiet;
    if chatty {
        println!("═══════════════════════════════════════════════");
        println!("  VSQ Converter");
        println!("═══════════════════════════════════════════════\n");
        println!("Input:  {:?}", args.input);
        println!("Output: {:?}\n", output_path);
    }

    let table = Table::from_csv_path(&args.input)
        .with_context(|| format!("Failed to read input table: {:?}", args.input))?;
    log::debug!(
        "input table: {} columns, {} rows",
        table.headers().len(),
        table.rows().len()
    );

    let outcome = convert(&table, &settings).context("Conversion failed")?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create output directory: {:?}", parent))?;
        }
    }
    fs::write(&output_path, &outcome.document)
        .with_context(|| format!("Failed to write output file: {:?}", output_path))?;
    log::info!("wrote {:?}", output_path);

    let filename = output_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    if args.json {
        let result = ConversionResult::from_outcome(filename, &outcome, &settings);
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if chatty {
        print_summary(&outcome);
        println!("\n✓ Wrote {:?}", output_path);
    }

    Ok(())
}

/// Decide where the .vsq file goes (flag > config > next to the input)
fn resolve_output_path(args: &Args, app_config: &config::AppConfig) -> PathBuf {
    if let Some(output) = &args.output {
        return output.clone();
    }

    let stem = app_config
        .output
        .name
        .clone()
        .or_else(|| {
            args.input
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "sequence".to_string());

    let directory = app_config
        .output
        .directory
        .clone()
        .or_else(|| args.input.parent().map(Path::to_path_buf))
        .unwrap_or_default();

    directory.join(format!("{}.vsq", stem))
}

/// Merge config-file settings with command-line flags (flags win)
fn resolve_settings(
    args: &Args,
    app_config: &config::AppConfig,
    output_path: &Path,
) -> ConversionSettings {
    let mut settings = app_config.conversion.clone();

    if let Some(timeout) = args.timeout {
        settings = settings.with_default_timeout(timeout);
    }
    if let Some(channel) = &args.channel {
        settings = settings.with_channel(channel.clone());
    }
    if args.force_extended {
        settings = settings.with_force_extended(true);
    }
    if let Some(interval) = args.cyclic {
        settings = settings.with_cyclic(interval);
    }

    let sequence_name = args.name.clone().unwrap_or_else(|| {
        output_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "GeneratedSequence".to_string())
    });
    settings.with_sequence_name(sequence_name)
}

/// Print the conversion statistics, warnings and preview
fn print_summary(outcome: &ConversionOutcome) {
    let report = &outcome.report;

    println!("📊 Conversion Summary:");
    println!("  Frames:   {}", report.processed);
    println!("  Standard: {}", report.standard_ids);
    println!("  Extended: {}", report.extended_ids);

    println!("\nDetected columns:");
    for (role, header) in &report.detected_columns {
        println!("  {:<10} -> {}", role, header);
    }

    if !report.warnings.is_empty() {
        println!("\n⚠ Warnings:");
        for warning in &report.warnings {
            println!("  {}", warning);
        }
    }

    if !report.preview.is_empty() {
        println!("\nPreview (first {} frames):", report.preview.len());
        for entry in &report.preview {
            println!(
                "  {:>2}. {} dlc={} [{}] timeout={}ms",
                entry.line_num, entry.can_id, entry.dlc, entry.data, entry.timeout_ms
            );
        }
    }
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
