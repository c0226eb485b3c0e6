//! Addressing modes and effective-address resolution.
//!
//! The 6502 core has 13 addressing modes:
//! - Implicit: no operand (CLC, RTS, ...)
//! - Accumulator: operates on A (ASL A, ...)
//! - Immediate: #$nn, the operand byte is the value
//! - ZeroPage: $nn
//! - ZeroPageX / ZeroPageY: $nn,X / $nn,Y — wraps within page zero
//! - Absolute: $nnnn
//! - AbsoluteX / AbsoluteY: $nnnn,X / $nnnn,Y — may cross a page
//! - Indirect: ($nnnn), JMP only, with the page-wrap hardware bug
//! - IndirectX: ($nn,X) — pointer in page zero, indexed before the read
//! - IndirectY: ($nn),Y — pointer in page zero, indexed after the read
//! - Relative: signed branch offset from the PC after the instruction

use famicom_core::Bus;

use crate::Ricoh2a03;
use crate::opcodes::Operand;

/// The closed set of addressing modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    Implicit,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndirectX,
    IndirectY,
    Relative,
}

impl AddressingMode {
    /// Operand bytes following the opcode. Instruction length is this
    /// plus one.
    #[must_use]
    pub const fn operand_len(self) -> u16 {
        match self {
            Self::Implicit | Self::Accumulator => 0,
            Self::Immediate
            | Self::ZeroPage
            | Self::ZeroPageX
            | Self::ZeroPageY
            | Self::IndirectX
            | Self::IndirectY
            | Self::Relative => 1,
            Self::Absolute | Self::AbsoluteX | Self::AbsoluteY | Self::Indirect => 2,
        }
    }
}

/// Where an instruction's data lives once the mode is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Target {
    /// Implicit and Relative modes: nothing to read or write.
    None,
    /// The accumulator itself.
    Accumulator,
    /// An immediate value carried in the instruction.
    Immediate(u8),
    /// A memory address.
    Memory(u16),
}

/// A resolved effective address plus the page-crossing observation that
/// feeds conditional cycle accounting.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Resolved {
    pub target: Target,
    pub page_crossed: bool,
}

impl Resolved {
    const fn at(addr: u16) -> Self {
        Self {
            target: Target::Memory(addr),
            page_crossed: false,
        }
    }

    const fn indexed(base: u16, addr: u16) -> Self {
        Self {
            target: Target::Memory(addr),
            page_crossed: (base & 0xFF00) != (addr & 0xFF00),
        }
    }
}

impl Ricoh2a03 {
    /// Compute the effective target for a fetched instruction.
    ///
    /// Indirect modes read their pointers through the bus here; the data
    /// read (if any) happens later in execution.
    pub(crate) fn resolve<B: Bus>(
        &mut self,
        bus: &mut B,
        mode: AddressingMode,
        operand: Operand,
    ) -> Resolved {
        match (mode, operand) {
            (AddressingMode::Implicit | AddressingMode::Relative, _) => Resolved {
                target: Target::None,
                page_crossed: false,
            },
            (AddressingMode::Accumulator, _) => Resolved {
                target: Target::Accumulator,
                page_crossed: false,
            },
            (AddressingMode::Immediate, Operand::Byte(value)) => Resolved {
                target: Target::Immediate(value),
                page_crossed: false,
            },
            (AddressingMode::ZeroPage, Operand::Byte(base)) => Resolved::at(u16::from(base)),
            (AddressingMode::ZeroPageX, Operand::Byte(base)) => {
                Resolved::at(u16::from(base.wrapping_add(self.regs.x)))
            }
            (AddressingMode::ZeroPageY, Operand::Byte(base)) => {
                Resolved::at(u16::from(base.wrapping_add(self.regs.y)))
            }
            (AddressingMode::Absolute, Operand::Word(addr)) => Resolved::at(addr),
            (AddressingMode::AbsoluteX, Operand::Word(base)) => {
                Resolved::indexed(base, base.wrapping_add(u16::from(self.regs.x)))
            }
            (AddressingMode::AbsoluteY, Operand::Word(base)) => {
                Resolved::indexed(base, base.wrapping_add(u16::from(self.regs.y)))
            }
            (AddressingMode::Indirect, Operand::Word(ptr)) => {
                Resolved::at(self.read_word_page_bug(bus, ptr))
            }
            (AddressingMode::IndirectX, Operand::Byte(base)) => {
                let ptr = base.wrapping_add(self.regs.x);
                let lo = bus.read(u16::from(ptr));
                let hi = bus.read(u16::from(ptr.wrapping_add(1)));
                Resolved::at(u16::from_le_bytes([lo, hi]))
            }
            (AddressingMode::IndirectY, Operand::Byte(ptr)) => {
                let lo = bus.read(u16::from(ptr));
                let hi = bus.read(u16::from(ptr.wrapping_add(1)));
                let base = u16::from_le_bytes([lo, hi]);
                Resolved::indexed(base, base.wrapping_add(u16::from(self.regs.y)))
            }
            // Operand width is a pure function of the mode, so the decoder
            // can never hand us a mismatched pair.
            (mode, operand) => unreachable!("operand {operand:?} for mode {mode:?}"),
        }
    }

    /// Read a 16-bit word (little-endian).
    pub(crate) fn read_word<B: Bus>(&self, bus: &mut B, addr: u16) -> u16 {
        let lo = bus.read(addr);
        let hi = bus.read(addr.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }

    /// Read a 16-bit word with the 6502 indirect-JMP page bug: when the
    /// pointer's low byte is $FF, the high byte comes from the start of
    /// the *same* page rather than the next one.
    pub(crate) fn read_word_page_bug<B: Bus>(&self, bus: &mut B, addr: u16) -> u16 {
        let lo = bus.read(addr);
        let hi_addr = (addr & 0xFF00) | (addr.wrapping_add(1) & 0x00FF);
        let hi = bus.read(hi_addr);
        u16::from_le_bytes([lo, hi])
    }
}
