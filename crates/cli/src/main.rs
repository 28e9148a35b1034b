//! 6809 single-board-computer runner.
//!
//! This binary wires the board together and runs it. It performs:
//! 1. **Setup:** Builds the address space with the ACIA window and optional ROM image.
//! 2. **Loading:** Loads an Intel HEX or S-record program into RAM.
//! 3. **Run:** Boots the processor from the ROM vector or the program address and
//!    steps it until the program counter reaches `0xFFFF`.

use std::io;
use std::panic;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use clap::error::ErrorKind;
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use sbc6809_core::AddressSpace;
use sbc6809_core::common::{ConfigError, LoadError};
use sbc6809_core::config::Config;
use sbc6809_core::core::FetchCore;
use sbc6809_core::sim::harness::{self, BootTarget, RunOptions};
use sbc6809_core::sim::loader;
use sbc6809_core::soc::devices::StdioHost;

#[derive(Parser, Debug)]
#[command(
    name = "sbc6809",
    author,
    version,
    about = "6809 single-board computer: runs S-record/Intel HEX programs and ROM images",
    long_about = "Runs a 6809 program against 32 KiB RAM (0x0000-0x7FFF), 16 KiB ROM (0xC000-0xFFFF) and a 6850 ACIA console.\n\nExamples:\n  sbc6809 --load hello.s19\n  sbc6809 --load monitor.hex --load-addr 0x0100 --verbose\n  sbc6809 --rom assist09.bin --acia-addr 0xE000"
)]
struct Cli {
    /// Program image to load into RAM (.hex, .s19, .s09, .srec).
    #[arg(long, value_name = "PATH")]
    load: Option<PathBuf>,

    /// Program start address in hex; defaults to the first address the image wrote.
    #[arg(long = "load-addr", value_name = "HEX", value_parser = parse_hex)]
    load_addr: Option<u16>,

    /// ACIA status register address in hex; the data register follows it.
    #[arg(long = "acia-addr", value_name = "HEX", value_parser = parse_hex)]
    acia_addr: Option<u16>,

    /// Raw binary ROM image mapped at 0xC000-0xFFFF.
    #[arg(long, value_name = "PATH")]
    rom: Option<PathBuf>,

    /// JSON configuration file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print load, boot, and final register diagnostics.
    #[arg(long)]
    verbose: bool,

    /// Trace disassembly of the first instructions executed.
    #[arg(long)]
    disassemble: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("console output failed: {0}")]
    Io(#[from] io::Error),
}

/// Parses a 16-bit hex value with an optional `0x` or `$` prefix.
fn parse_hex(s: &str) -> Result<u16, String> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .or_else(|| s.strip_prefix('$'))
        .unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(format!("'{s}' is not a hex address"));
    }
    u16::from_str_radix(digits, 16).map_err(|e| format!("'{s}': {e}"))
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Exit status after the user stops a run with Ctrl-C.
const EXIT_INTERRUPTED: i32 = 130;

/// Leaves terminal raw mode before the default panic report.
///
/// Release builds abort on panic, so `Drop` on the console host never runs.
fn install_panic_hook() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = crossterm::terminal::disable_raw_mode();
        default_hook(info);
    }));
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = e.print();
            process::exit(code);
        }
    };

    init_tracing(cli.verbose);
    install_panic_hook();
    println!(
        "\nsbc6809 v{} - 6809 single-board computer",
        env!("CARGO_PKG_VERSION")
    );

    match cmd_run(&cli) {
        Ok(Outcome::Halted) => {}
        Ok(Outcome::Interrupted) => process::exit(EXIT_INTERRUPTED),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    /// The program counter reached `0xFFFF`.
    Halted,
    /// The user pressed Ctrl-C on the console.
    Interrupted,
}

/// Builds the board, loads ROM and program, then boots and runs until halt.
fn cmd_run(cli: &Cli) -> Result<Outcome, CliError> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(base) = cli.acia_addr {
        config.console.base = base;
    }

    let mut bus = AddressSpace::with_config(StdioHost::new(), &config);

    let rom_vector = match &cli.rom {
        Some(path) => {
            let vector = bus.load_rom_file(path)?;
            if cli.verbose {
                println!("Reset vector (ROM): 0x{vector:x}");
            }
            Some(vector)
        }
        None => None,
    };

    let first_write = match &cli.load {
        Some(path) => {
            let report = loader::load_image(&mut bus, path, &config.load)?;
            if cli.verbose {
                let program = BootTarget::resolve(
                    None,
                    cli.load_addr,
                    Some(report.first_address),
                    config.boot.default_origin,
                );
                println!(
                    "Loaded {} to address 0x{:04X}",
                    path.display(),
                    program.address()
                );
            }
            Some(report.first_address)
        }
        None => None,
    };

    let target = BootTarget::resolve(
        rom_vector,
        cli.load_addr,
        first_write,
        config.boot.default_origin,
    );

    if cli.verbose {
        match config.console_data_address() {
            Some(data) => println!("ACIA: Control 0x{:X} Data 0x{data:X}", config.console.base),
            None => println!("ACIA: Control 0x{:X} Data none", config.console.base),
        }
    }

    debug!("no instruction-set engine linked, running the fetch-only core");
    let mut cpu = FetchCore::new(bus);
    harness::boot(&mut cpu, target, config.boot.stack_pointer);

    if let BootTarget::Direct(pc) = target {
        if cli.verbose {
            println!("Setting PC: 0x{pc:x}\n");
        } else {
            println!("\n");
        }
    }

    let options = RunOptions::from_config(&config, cli.disassemble);
    let summary = harness::run_until(&mut cpu, &options, &mut io::stdout(), |cpu| {
        cpu.bus_mut().console_mut().host_mut().poll_interrupt()
    })?;
    // Leaves raw mode before the closing diagnostics.
    drop(cpu);

    if summary.interrupted {
        println!("\nInterrupted at PC 0x{:04X}", summary.registers.pc);
        return Ok(Outcome::Interrupted);
    }
    if cli.verbose {
        println!("\n\n{} Cycles:{}", summary.registers, summary.cycles);
    } else {
        println!("\n");
    }
    Ok(Outcome::Halted)
}
