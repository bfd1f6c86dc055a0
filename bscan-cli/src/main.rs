//! Boundary Scan Reader CLI Application
//!
//! This is the command-line interface for the boundary scan reader.
//! It uses the bscan-decoder library and adds:
//! - Input selection (XDC, BSDL, captured sample streams, config file)
//! - The polling loop over a scan-chain transport
//! - Change report printing with relative timestamps
//! - Raw hex dumps when no BSDL is available

use anyhow::{Context, Result};
use bscan_decoder::{sample_boundary, ChangeDetector, Decoder, DecoderConfig, ScanChain};
use clap::Parser;
use std::path::PathBuf;
use std::time::{Duration, Instant};

mod config;
mod replay;
mod report;

use replay::ReplayChain;

/// Boundary Scan Reader - monitor pin states over JTAG boundary scan
#[derive(Parser, Debug)]
#[command(name = "bscan-cli")]
#[command(about = "Decode and monitor JTAG boundary-scan samples (XDC + BSDL)", long_about = None)]
#[command(version)]
struct Args {
    /// Path to the XDC constraints file mapping pins to signals
    #[arg(long, value_name = "FILE")]
    xdc: Option<PathBuf>,

    /// Path to the BSDL file describing the boundary register
    #[arg(long, value_name = "FILE")]
    bsdl: Option<PathBuf>,

    /// Sensitivity list: report only signals named in this string
    #[arg(short, long, value_name = "LIST")]
    sensitivity: Option<String>,

    /// Replay captured sample lines from this file (default: stdin)
    #[arg(short, long, value_name = "FILE")]
    replay: Option<PathBuf>,

    /// Delay between scan samples in milliseconds
    #[arg(long, value_name = "MS")]
    interval_ms: Option<u64>,

    /// Maximum number of samples to process (for testing)
    #[arg(long, value_name = "COUNT")]
    max_samples: Option<u64>,

    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

/// Effective settings after merging flags over the config file
#[derive(Debug, Default)]
struct Settings {
    xdc: Option<PathBuf>,
    bsdl: Option<PathBuf>,
    replay: Option<PathBuf>,
    sensitivity: Option<String>,
    clock_signal: Option<String>,
    interval_ms: u64,
    max_samples: Option<u64>,
}

impl Settings {
    fn merge(args: Args, file: config::AppConfig) -> Self {
        Self {
            xdc: args.xdc.or(file.input.xdc),
            bsdl: args.bsdl.or(file.input.bsdl),
            replay: args.replay.or(file.input.replay),
            sensitivity: args.sensitivity.or(file.monitor.sensitivity),
            clock_signal: file.monitor.clock_signal,
            interval_ms: args.interval_ms.or(file.monitor.interval_ms).unwrap_or(0),
            max_samples: args.max_samples.or(file.monitor.max_samples),
        }
    }
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Boundary Scan Reader CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using decoder library v{}", bscan_decoder::VERSION);

    let file_config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => config::AppConfig::default(),
    };
    let settings = Settings::merge(args, file_config);

    if settings.xdc.is_none() && settings.bsdl.is_none() && settings.replay.is_none() {
        // No arguments - show help
        println!("Boundary Scan Reader - No input specified");
        println!("\nQuick Start:");
        println!("  bscan-cli --bsdl part.bsd --xdc board.xdc --replay capture.hex");
        println!("  some-jtag-dump | bscan-cli --bsdl part.bsd --xdc board.xdc");
        println!("\nFor a config file:");
        println!("  bscan-cli --config config.toml");
        println!("\nUse --help for more options");
        return Ok(());
    }

    monitor(&settings)
}

/// Load inputs, resolve the chain and run the polling loop
fn monitor(settings: &Settings) -> Result<()> {
    println!("═══════════════════════════════════════════════");
    println!("  Boundary Scan Reader");
    println!("═══════════════════════════════════════════════\n");

    // Load input files
    let mut decoder = Decoder::new();
    match &settings.xdc {
        Some(path) => decoder
            .add_xdc(path)
            .with_context(|| format!("Could not load XDC file {:?}", path))?,
        None => log::warn!("No XDC file, so cannot associate pins to top-level port signals"),
    }
    match &settings.bsdl {
        Some(path) => decoder
            .add_bsdl(path)
            .with_context(|| format!("Could not load BSDL file {:?}", path))?,
        None => log::warn!("No BSDL file, so cannot decode boundary scan information"),
    }

    // Resolve bits to signals
    let mut decoder_config = DecoderConfig::new();
    if let Some(sensitivity) = &settings.sensitivity {
        decoder_config = decoder_config.with_sensitivity(sensitivity.clone());
    }
    if let Some(clock) = &settings.clock_signal {
        decoder_config = decoder_config.with_clock_signal(clock.clone());
    }
    let chain = decoder.resolve(&decoder_config);

    // Show chain stats
    let stats = chain.stats();
    println!("Boundary chain:");
    if let Some(part) = &stats.part_name {
        println!("  Part:  {}", part);
    }
    println!("  Pins:  {}", stats.pins);
    println!(
        "  Bits:  {} ({} visible, {} active)\n",
        stats.boundary_bits, stats.visible_bits, stats.active_bits
    );

    if let Some(sensitivity) = &settings.sensitivity {
        println!("Applying sensitivity list '{}'", sensitivity);
        for (_, signal) in chain.active_bits() {
            println!("Adding '{}' to sensitivity list.", signal);
        }
        println!();
    }

    // Open the sample source
    let mut transport: Box<dyn ScanChain> = match &settings.replay {
        Some(path) => Box::new(
            ReplayChain::from_path(path)
                .with_context(|| format!("Could not open replay file {:?}", path))?,
        ),
        None => {
            log::info!("Reading samples from stdin");
            Box::new(ReplayChain::from_stdin())
        }
    };

    let raw_mode = chain.is_empty();
    let bit_count = chain.len();
    let mut detector = ChangeDetector::new(chain);

    // Poll until the source is exhausted or the sample limit is reached
    let start = Instant::now();
    let mut samples: u64 = 0;
    loop {
        let Some(captured) = sample_boundary(transport.as_mut(), bit_count)? else {
            log::info!("Sample source exhausted after {} samples", samples);
            break;
        };

        if raw_mode {
            report::print_hex_dump("boundary data", &captured);
        } else {
            let changes = detector.detect(&captured);
            if !changes.is_empty() {
                let elapsed_ms = start.elapsed().as_millis() as u64;
                report::print_changes(elapsed_ms, &changes);
            }
        }

        samples += 1;
        if settings.max_samples.is_some_and(|max| samples >= max) {
            log::info!("Reached sample limit of {}", samples);
            break;
        }
        if settings.interval_ms > 0 {
            std::thread::sleep(Duration::from_millis(settings.interval_ms));
        }
    }

    Ok(())
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
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
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
