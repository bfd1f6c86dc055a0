//! Standalone chain resolution tool
//!
//! Loads an XDC and a BSDL file and prints the resolved boundary chain:
//! every defined cell with its pin, signal and visibility.
//!
//! Usage:
//!   resolve_chain <file.bsd> [file.xdc] [sensitivity]

use bscan_decoder::{Decoder, DecoderConfig, UNKNOWN_SIGNAL};
use std::env;
use std::path::PathBuf;
use std::process;

fn main() {
    env_logger::init();

    let mut args = env::args().skip(1);
    let Some(bsdl) = args.next().map(PathBuf::from) else {
        eprintln!("Usage: resolve_chain <file.bsd> [file.xdc] [sensitivity]");
        process::exit(2);
    };
    let xdc = args.next().map(PathBuf::from);
    let sensitivity = args.next();

    let mut decoder = Decoder::new();
    if let Err(e) = decoder.add_bsdl(&bsdl) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
    if let Some(xdc) = &xdc {
        if let Err(e) = decoder.add_xdc(xdc) {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }

    let mut config = DecoderConfig::new();
    if let Some(s) = sensitivity {
        config = config.with_sensitivity(s);
    }

    let chain = decoder.resolve(&config);
    let stats = chain.stats();

    println!(
        "Part: {}",
        stats.part_name.as_deref().unwrap_or(UNKNOWN_SIGNAL)
    );
    println!(
        "{} boundary bits, {} pins, {} visible, {} active",
        stats.boundary_bits, stats.pins, stats.visible_bits, stats.active_bits
    );
    println!();

    for (index, bit) in chain.bits().iter().enumerate() {
        let Some(cell) = &bit.cell else { continue };
        println!(
            "bit#{:<5} {:30} pin {:8} signal {:24} {}{}",
            index,
            cell.full_name,
            cell.pin_name,
            bit.resolved.signal_name,
            if bit.resolved.show { "show" } else { "hide" },
            if bit.resolved.ignore { " (ignored)" } else { "" },
        );
    }
}
