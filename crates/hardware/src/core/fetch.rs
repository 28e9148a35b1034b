//! Fetch-only stand-in engine.
//!
//! `FetchCore` walks memory one byte per step without decoding anything. It
//! lets the harness, the bus, and the console run end to end before an
//! instruction-set engine is linked, and it exercises the same `MemoryBus`
//! calls a real engine makes: a big-endian reset vector fetch at
//! `0xFFFE/0xFFFF` and one opcode fetch per step.

use crate::core::{Disassembly, MemoryBus, Processor, RegisterSnapshot};

/// Address of the high byte of the reset vector.
const RESET_VECTOR: u16 = 0xFFFE;

/// Processor stand-in that fetches one byte per one-cycle step.
#[derive(Debug)]
pub struct FetchCore<B> {
    bus: B,
    pc: u16,
    sp: u16,
}

impl<B: MemoryBus> FetchCore<B> {
    /// Creates a core attached to `bus`. Registers start at zero until reset.
    pub const fn new(bus: B) -> Self {
        Self { bus, pc: 0, sp: 0 }
    }

    /// Returns the attached bus.
    pub const fn bus(&self) -> &B {
        &self.bus
    }

    /// Returns the attached bus mutably.
    pub const fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }
}

impl<B: MemoryBus> Processor for FetchCore<B> {
    fn reset(&mut self) {
        let hi = self.bus.read8(RESET_VECTOR);
        let lo = self.bus.read8(RESET_VECTOR.wrapping_add(1));
        self.pc = u16::from_be_bytes([hi, lo]);
    }

    fn pc(&self) -> u16 {
        self.pc
    }

    fn set_pc(&mut self, pc: u16) {
        self.pc = pc;
    }

    fn set_stack_pointer(&mut self, sp: u16) {
        self.sp = sp;
    }

    fn step(&mut self) -> u32 {
        let _opcode = self.bus.read8(self.pc);
        self.pc = self.pc.wrapping_add(1);
        1
    }

    fn disassemble(&mut self, addr: u16) -> Disassembly {
        let byte = self.bus.read8(addr);
        Disassembly {
            text: format!("{addr:04X}  {byte:02X}        FCB   ${byte:02X}"),
            length: 1,
        }
    }

    fn registers(&self) -> RegisterSnapshot {
        RegisterSnapshot {
            pc: self.pc,
            sp: self.sp,
            ..RegisterSnapshot::default()
        }
    }
}
