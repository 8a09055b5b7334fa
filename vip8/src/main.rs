use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use vip8_core::{Chip8, Quirks};

mod audio;
mod keymap;
mod run;

/// A CHIP-8 virtual machine.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// ROM file to load and run
    rom: PathBuf,

    /// Pixel scale factor for the window
    #[arg(long, default_value_t = 10)]
    scale: u32,

    /// Increment I by X + 1 after FX55/FX65 block stores and loads
    #[arg(long)]
    increment_index: bool,

    /// Wrap FX1E index additions at the 4KiB address space instead of 16 bits
    #[arg(long)]
    index_wrap_4k: bool,

    /// Disable the beeper
    #[arg(long)]
    mute: bool,

    /// Print a trace line for every executed instruction
    #[arg(long)]
    trace: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let rom = std::fs::read(&args.rom)
        .with_context(|| format!("unable to read ROM {}", args.rom.display()))?;

    let quirks = Quirks {
        increment_index_on_block_io: args.increment_index,
        index_add_wraps_address_space: args.index_wrap_4k,
    };
    let mut chip8 = Chip8::with_quirks(quirks);
    chip8.load_rom(&rom).context("unable to load ROM")?;

    run::run(chip8, args.scale, args.mute, args.trace)
}
