//! CPU fault taxonomy.
//!
//! None of these are recoverable: cycle-accurate emulation cannot resume
//! mid-instruction, so every variant ends the execution pass. They are
//! still distinguished so the host can report a table bug differently
//! from malformed cartridge data.

use thiserror::Error;

use crate::addressing::AddressingMode;
use crate::opcodes::Mnemonic;

/// A fault raised during decode or execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CpuError {
    /// The opcode byte has no entry in the decode table. Stems from the
    /// program data, not from this implementation: the documented
    /// instruction set leaves 105 opcode bytes unassigned.
    #[error("illegal opcode ${opcode:02X} at ${pc:04X}")]
    IllegalOpcode { opcode: u8, pc: u16 },

    /// An opcode or operand byte was fetched from an address with no
    /// backing store — the instruction runs past the end of mapped ROM.
    #[error("incomplete instruction at ${pc:04X}: operand fetch past mapped memory")]
    IncompleteInstruction { pc: u16 },

    /// A cycle cost was requested for a mnemonic/mode pair the decode
    /// table never produces. Only reachable if the table itself is wrong,
    /// so this is a programming-invariant violation rather than a runtime
    /// condition.
    #[error("{mnemonic:?} does not support addressing mode {mode:?}")]
    UnsupportedMode {
        mnemonic: Mnemonic,
        mode: AddressingMode,
    },
}
