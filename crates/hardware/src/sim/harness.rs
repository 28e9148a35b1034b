//! Boot and run loop.
//!
//! This module drives a [`Processor`] from power-on to halt. It performs:
//! 1. **Boot target resolution:** ROM reset vector, explicit load address, the
//!    loader's first-write address, or the default origin, in that order.
//! 2. **Boot:** Installs the stack pointer, resets the engine, and overrides
//!    the program counter when booting without ROM.
//! 3. **Run loop:** Optionally traces disassembly, then steps until the
//!    program counter reaches `0xFFFF`, or until a caller-supplied stop check fires.

use std::io::{self, Write};

use tracing::debug;

use crate::common::constants::{HALT_PC, TRACE_CYCLE_LIMIT};
use crate::config::Config;
use crate::core::{Processor, RegisterSnapshot};

/// Where execution begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootTarget {
    /// The engine's reset sequence fetches the ROM vector (value shown for diagnostics).
    ResetVector(u16),
    /// The program counter is set directly after reset.
    Direct(u16),
}

impl BootTarget {
    /// Picks the boot target.
    ///
    /// A loaded ROM always wins and the program load address is not applied.
    /// Without ROM, an explicit address beats the loader's first-write
    /// address; a missing or zero address falls back to `default_origin`.
    pub fn resolve(
        rom_vector: Option<u16>,
        explicit: Option<u16>,
        first_write: Option<u16>,
        default_origin: u16,
    ) -> Self {
        if let Some(vector) = rom_vector {
            return Self::ResetVector(vector);
        }
        match explicit.or(first_write) {
            Some(addr) if addr != 0 => Self::Direct(addr),
            _ => Self::Direct(default_origin),
        }
    }

    /// Returns the address execution is expected to start at.
    pub const fn address(self) -> u16 {
        match self {
            Self::ResetVector(addr) | Self::Direct(addr) => addr,
        }
    }
}

/// Installs the stack pointer, resets, and applies a direct boot address.
pub fn boot<P: Processor + ?Sized>(cpu: &mut P, target: BootTarget, stack_pointer: u16) {
    cpu.set_stack_pointer(stack_pointer);
    cpu.reset();
    if let BootTarget::Direct(pc) = target {
        cpu.set_pc(pc);
    }
    debug!(pc = cpu.pc(), sp = stack_pointer, "processor booted");
}

/// Run loop settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Write a disassembly line before each step.
    pub disassemble: bool,
    /// Stop tracing once this many cycles have elapsed.
    pub trace_cycle_limit: u64,
}

impl RunOptions {
    /// Builds run options from the configuration.
    pub const fn from_config(config: &Config, disassemble: bool) -> Self {
        Self {
            disassemble,
            trace_cycle_limit: config.trace.cycle_limit,
        }
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            disassemble: false,
            trace_cycle_limit: TRACE_CYCLE_LIMIT,
        }
    }
}

/// What a finished run looked like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Total cycles reported by the engine.
    pub cycles: u64,
    /// Instructions executed.
    pub steps: u64,
    /// Registers at halt.
    pub registers: RegisterSnapshot,
    /// True if the stop check ended the run before the halt address.
    pub interrupted: bool,
}

/// Steps `cpu` until its program counter reaches `0xFFFF`.
///
/// The sentinel check happens before each step, so the instruction at the
/// halt address is never executed. Trace lines go to `trace`.
///
/// # Errors
///
/// Returns any error raised while writing to `trace`.
pub fn run<P, W>(cpu: &mut P, options: &RunOptions, trace: &mut W) -> io::Result<RunSummary>
where
    P: Processor + ?Sized,
    W: Write + ?Sized,
{
    run_until(cpu, options, trace, |_| false)
}

/// Like [`run`], but also ends the run early once `stop` returns true.
///
/// `stop` is consulted before every step, after the halt check.
///
/// # Errors
///
/// Returns any error raised while writing to `trace`.
pub fn run_until<P, W, F>(
    cpu: &mut P,
    options: &RunOptions,
    trace: &mut W,
    mut stop: F,
) -> io::Result<RunSummary>
where
    P: Processor + ?Sized,
    W: Write + ?Sized,
    F: FnMut(&mut P) -> bool,
{
    let mut cycles = 0u64;
    let mut steps = 0u64;
    let mut interrupted = false;
    loop {
        let pc = cpu.pc();
        if options.disassemble && cycles < options.trace_cycle_limit {
            let line = cpu.disassemble(pc);
            writeln!(trace, "{}", line.text)?;
        }
        if pc == HALT_PC {
            debug!(cycles, steps, "halt address reached");
            break;
        }
        if stop(&mut *cpu) {
            debug!(pc, cycles, steps, "run stopped before halt");
            interrupted = true;
            break;
        }
        cycles += u64::from(cpu.step());
        steps += 1;
    }
    trace.flush()?;
    Ok(RunSummary {
        cycles,
        steps,
        registers: cpu.registers(),
        interrupted,
    })
}
