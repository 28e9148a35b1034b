//! Processor capability.
//!
//! The instruction-set engine is external to this crate. It is consumed
//! through two narrow traits:
//! 1. **`MemoryBus`:** what the engine calls for every memory access; the
//!    address space implements it and is handed to the engine at construction.
//! 2. **`Processor`:** what the harness calls to boot, step, trace, and
//!    inspect the engine.
//!
//! [`FetchCore`] is a stand-in engine that satisfies both seams without
//! implementing any instruction semantics.

/// Stand-in engine that fetches one byte per step.
pub mod fetch;

use std::fmt;

pub use fetch::FetchCore;

/// Byte-wide memory access, called back by the processor engine.
pub trait MemoryBus {
    /// Reads one byte. May have side effects (console input is consumed).
    fn read8(&mut self, addr: u16) -> u8;

    /// Writes one byte.
    fn write8(&mut self, addr: u16, val: u8);
}

impl<B: MemoryBus + ?Sized> MemoryBus for &mut B {
    fn read8(&mut self, addr: u16) -> u8 {
        (**self).read8(addr)
    }

    fn write8(&mut self, addr: u16, val: u8) {
        (**self).write8(addr, val);
    }
}

/// One disassembled instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disassembly {
    /// Human-readable listing line.
    pub text: String,
    /// Encoded length of the instruction in bytes.
    pub length: u16,
}

/// Register file snapshot for diagnostic printing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegisterSnapshot {
    /// Program counter.
    pub pc: u16,
    /// Accumulator A.
    pub a: u8,
    /// Accumulator B.
    pub b: u8,
    /// Index register X.
    pub x: u16,
    /// Index register Y.
    pub y: u16,
    /// Hardware stack pointer.
    pub sp: u16,
    /// Condition codes.
    pub cc: u8,
}

impl fmt::Display for RegisterSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PC:0x{:04X} A:0x{:02X} B:0x{:02X} X:0x{:04X} Y:0x{:04X} SP:0x{:04X} CC:0x{:02X}",
            self.pc, self.a, self.b, self.x, self.y, self.sp, self.cc
        )
    }
}

/// An 8-bit processor engine driven one instruction at a time.
pub trait Processor {
    /// Performs a hardware reset (the engine loads PC from its reset vector).
    fn reset(&mut self);

    /// Returns the program counter.
    fn pc(&self) -> u16;

    /// Overrides the program counter.
    fn set_pc(&mut self, pc: u16);

    /// Overrides the stack pointer.
    fn set_stack_pointer(&mut self, sp: u16);

    /// Executes one instruction and returns the cycles it consumed.
    fn step(&mut self) -> u32;

    /// Disassembles the instruction at `addr`.
    fn disassemble(&mut self, addr: u16) -> Disassembly;

    /// Returns a snapshot of the register file.
    fn registers(&self) -> RegisterSnapshot;
}
