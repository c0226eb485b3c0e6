//! Instruction decode table and cycle costs.
//!
//! The documented 6502 instruction set covers 151 of the 256 opcode
//! bytes; the rest decode to `None` and raise a fault when fetched.
//! Cycle costs here are base costs — conditional penalties for page
//! crossings and taken branches are added during execution.

use crate::addressing::AddressingMode;
use crate::error::CpuError;

/// Instruction mnemonics, one per documented operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mnemonic {
    // Loads and stores
    Lda,
    Ldx,
    Ldy,
    Sta,
    Stx,
    Sty,
    // Register transfers
    Tax,
    Tay,
    Txa,
    Tya,
    Tsx,
    Txs,
    // Stack
    Pha,
    Php,
    Pla,
    Plp,
    // Arithmetic and logic
    Adc,
    Sbc,
    And,
    Ora,
    Eor,
    Cmp,
    Cpx,
    Cpy,
    Bit,
    // Shifts and rotates
    Asl,
    Lsr,
    Rol,
    Ror,
    // Increments and decrements
    Inc,
    Dec,
    Inx,
    Iny,
    Dex,
    Dey,
    // Control flow
    Jmp,
    Jsr,
    Rts,
    Rti,
    Brk,
    // Branches
    Bpl,
    Bmi,
    Bvc,
    Bvs,
    Bcc,
    Bcs,
    Bne,
    Beq,
    // Flag manipulation
    Clc,
    Sec,
    Cli,
    Sei,
    Clv,
    Cld,
    Sed,
    // No operation
    Nop,
}

impl Mnemonic {
    /// Read-class instructions pay one extra cycle when an indexed
    /// address crosses a page boundary. Write-class and read-modify-write
    /// instructions always pay the fixed cost instead.
    #[must_use]
    pub const fn page_cross_penalty(self) -> bool {
        matches!(
            self,
            Self::Lda
                | Self::Ldx
                | Self::Ldy
                | Self::And
                | Self::Ora
                | Self::Eor
                | Self::Adc
                | Self::Sbc
                | Self::Cmp
        )
    }
}

/// One row of the decode table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpEntry {
    pub mnemonic: Mnemonic,
    pub mode: AddressingMode,
}

/// Raw operand bytes fetched after the opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    None,
    Byte(u8),
    Word(u16),
}

/// A fully fetched and decoded instruction.
#[derive(Debug, Clone, Copy)]
pub struct Instruction {
    pub opcode: u8,
    pub mnemonic: Mnemonic,
    pub mode: AddressingMode,
    pub operand: Operand,
}

macro_rules! decode_table {
    ($($code:literal => $mnemonic:ident $mode:ident),* $(,)?) => {{
        let mut table: [Option<OpEntry>; 256] = [None; 256];
        $(
            table[$code] = Some(OpEntry {
                mnemonic: Mnemonic::$mnemonic,
                mode: AddressingMode::$mode,
            });
        )*
        table
    }};
}

/// Opcode byte to instruction, indexed directly.
pub static OPCODES: [Option<OpEntry>; 256] = decode_table! {
    // LDA
    0xA9 => Lda Immediate,
    0xA5 => Lda ZeroPage,
    0xB5 => Lda ZeroPageX,
    0xAD => Lda Absolute,
    0xBD => Lda AbsoluteX,
    0xB9 => Lda AbsoluteY,
    0xA1 => Lda IndirectX,
    0xB1 => Lda IndirectY,
    // LDX
    0xA2 => Ldx Immediate,
    0xA6 => Ldx ZeroPage,
    0xB6 => Ldx ZeroPageY,
    0xAE => Ldx Absolute,
    0xBE => Ldx AbsoluteY,
    // LDY
    0xA0 => Ldy Immediate,
    0xA4 => Ldy ZeroPage,
    0xB4 => Ldy ZeroPageX,
    0xAC => Ldy Absolute,
    0xBC => Ldy AbsoluteX,
    // STA
    0x85 => Sta ZeroPage,
    0x95 => Sta ZeroPageX,
    0x8D => Sta Absolute,
    0x9D => Sta AbsoluteX,
    0x99 => Sta AbsoluteY,
    0x81 => Sta IndirectX,
    0x91 => Sta IndirectY,
    // STX
    0x86 => Stx ZeroPage,
    0x96 => Stx ZeroPageY,
    0x8E => Stx Absolute,
    // STY
    0x84 => Sty ZeroPage,
    0x94 => Sty ZeroPageX,
    0x8C => Sty Absolute,
    // Register transfers
    0xAA => Tax Implicit,
    0xA8 => Tay Implicit,
    0x8A => Txa Implicit,
    0x98 => Tya Implicit,
    0xBA => Tsx Implicit,
    0x9A => Txs Implicit,
    // Stack
    0x48 => Pha Implicit,
    0x08 => Php Implicit,
    0x68 => Pla Implicit,
    0x28 => Plp Implicit,
    // ADC
    0x69 => Adc Immediate,
    0x65 => Adc ZeroPage,
    0x75 => Adc ZeroPageX,
    0x6D => Adc Absolute,
    0x7D => Adc AbsoluteX,
    0x79 => Adc AbsoluteY,
    0x61 => Adc IndirectX,
    0x71 => Adc IndirectY,
    // SBC
    0xE9 => Sbc Immediate,
    0xE5 => Sbc ZeroPage,
    0xF5 => Sbc ZeroPageX,
    0xED => Sbc Absolute,
    0xFD => Sbc AbsoluteX,
    0xF9 => Sbc AbsoluteY,
    0xE1 => Sbc IndirectX,
    0xF1 => Sbc IndirectY,
    // AND
    0x29 => And Immediate,
    0x25 => And ZeroPage,
    0x35 => And ZeroPageX,
    0x2D => And Absolute,
    0x3D => And AbsoluteX,
    0x39 => And AbsoluteY,
    0x21 => And IndirectX,
    0x31 => And IndirectY,
    // ORA
    0x09 => Ora Immediate,
    0x05 => Ora ZeroPage,
    0x15 => Ora ZeroPageX,
    0x0D => Ora Absolute,
    0x1D => Ora AbsoluteX,
    0x19 => Ora AbsoluteY,
    0x01 => Ora IndirectX,
    0x11 => Ora IndirectY,
    // EOR
    0x49 => Eor Immediate,
    0x45 => Eor ZeroPage,
    0x55 => Eor ZeroPageX,
    0x4D => Eor Absolute,
    0x5D => Eor AbsoluteX,
    0x59 => Eor AbsoluteY,
    0x41 => Eor IndirectX,
    0x51 => Eor IndirectY,
    // CMP
    0xC9 => Cmp Immediate,
    0xC5 => Cmp ZeroPage,
    0xD5 => Cmp ZeroPageX,
    0xCD => Cmp Absolute,
    0xDD => Cmp AbsoluteX,
    0xD9 => Cmp AbsoluteY,
    0xC1 => Cmp IndirectX,
    0xD1 => Cmp IndirectY,
    // CPX / CPY
    0xE0 => Cpx Immediate,
    0xE4 => Cpx ZeroPage,
    0xEC => Cpx Absolute,
    0xC0 => Cpy Immediate,
    0xC4 => Cpy ZeroPage,
    0xCC => Cpy Absolute,
    // BIT
    0x24 => Bit ZeroPage,
    0x2C => Bit Absolute,
    // ASL
    0x0A => Asl Accumulator,
    0x06 => Asl ZeroPage,
    0x16 => Asl ZeroPageX,
    0x0E => Asl Absolute,
    0x1E => Asl AbsoluteX,
    // LSR
    0x4A => Lsr Accumulator,
    0x46 => Lsr ZeroPage,
    0x56 => Lsr ZeroPageX,
    0x4E => Lsr Absolute,
    0x5E => Lsr AbsoluteX,
    // ROL
    0x2A => Rol Accumulator,
    0x26 => Rol ZeroPage,
    0x36 => Rol ZeroPageX,
    0x2E => Rol Absolute,
    0x3E => Rol AbsoluteX,
    // ROR
    0x6A => Ror Accumulator,
    0x66 => Ror ZeroPage,
    0x76 => Ror ZeroPageX,
    0x6E => Ror Absolute,
    0x7E => Ror AbsoluteX,
    // INC / DEC
    0xE6 => Inc ZeroPage,
    0xF6 => Inc ZeroPageX,
    0xEE => Inc Absolute,
    0xFE => Inc AbsoluteX,
    0xC6 => Dec ZeroPage,
    0xD6 => Dec ZeroPageX,
    0xCE => Dec Absolute,
    0xDE => Dec AbsoluteX,
    // Register increments and decrements
    0xE8 => Inx Implicit,
    0xC8 => Iny Implicit,
    0xCA => Dex Implicit,
    0x88 => Dey Implicit,
    // Control flow
    0x4C => Jmp Absolute,
    0x6C => Jmp Indirect,
    0x20 => Jsr Absolute,
    0x60 => Rts Implicit,
    0x40 => Rti Implicit,
    0x00 => Brk Implicit,
    // Branches
    0x10 => Bpl Relative,
    0x30 => Bmi Relative,
    0x50 => Bvc Relative,
    0x70 => Bvs Relative,
    0x90 => Bcc Relative,
    0xB0 => Bcs Relative,
    0xD0 => Bne Relative,
    0xF0 => Beq Relative,
    // Flag manipulation
    0x18 => Clc Implicit,
    0x38 => Sec Implicit,
    0x58 => Cli Implicit,
    0x78 => Sei Implicit,
    0xB8 => Clv Implicit,
    0xD8 => Cld Implicit,
    0xF8 => Sed Implicit,
    // No operation
    0xEA => Nop Implicit,
};

/// Base cycle cost for a decoded instruction, before conditional
/// penalties.
///
/// # Errors
///
/// Returns [`CpuError::UnsupportedMode`] for pairings the decode table
/// never produces.
pub fn base_cycles(mnemonic: Mnemonic, mode: AddressingMode) -> Result<u32, CpuError> {
    use AddressingMode as M;
    use Mnemonic as Op;

    let cycles = match (mnemonic, mode) {
        // Read-class ALU and load instructions share one cost shape.
        (
            Op::Lda | Op::Ldx | Op::Ldy | Op::And | Op::Ora | Op::Eor | Op::Adc | Op::Sbc
            | Op::Cmp | Op::Cpx | Op::Cpy | Op::Bit,
            M::Immediate,
        ) => 2,
        (
            Op::Lda | Op::Ldx | Op::Ldy | Op::And | Op::Ora | Op::Eor | Op::Adc | Op::Sbc
            | Op::Cmp | Op::Cpx | Op::Cpy | Op::Bit,
            M::ZeroPage,
        ) => 3,
        (
            Op::Lda | Op::Ldy | Op::And | Op::Ora | Op::Eor | Op::Adc | Op::Sbc | Op::Cmp,
            M::ZeroPageX,
        ) => 4,
        (Op::Ldx, M::ZeroPageY) => 4,
        (
            Op::Lda | Op::Ldx | Op::Ldy | Op::And | Op::Ora | Op::Eor | Op::Adc | Op::Sbc
            | Op::Cmp | Op::Cpx | Op::Cpy | Op::Bit,
            M::Absolute,
        ) => 4,
        (
            Op::Lda | Op::Ldy | Op::And | Op::Ora | Op::Eor | Op::Adc | Op::Sbc | Op::Cmp,
            M::AbsoluteX,
        ) => 4,
        (
            Op::Lda | Op::Ldx | Op::And | Op::Ora | Op::Eor | Op::Adc | Op::Sbc | Op::Cmp,
            M::AbsoluteY,
        ) => 4,
        (
            Op::Lda | Op::And | Op::Ora | Op::Eor | Op::Adc | Op::Sbc | Op::Cmp,
            M::IndirectX,
        ) => 6,
        (
            Op::Lda | Op::And | Op::Ora | Op::Eor | Op::Adc | Op::Sbc | Op::Cmp,
            M::IndirectY,
        ) => 5,

        // Stores never take the page-cross penalty; indexed absolute
        // forms pay the extra cycle unconditionally.
        (Op::Sta | Op::Stx | Op::Sty, M::ZeroPage) => 3,
        (Op::Sta | Op::Sty, M::ZeroPageX) | (Op::Stx, M::ZeroPageY) => 4,
        (Op::Sta | Op::Stx | Op::Sty, M::Absolute) => 4,
        (Op::Sta, M::AbsoluteX | M::AbsoluteY) => 5,
        (Op::Sta, M::IndirectX | M::IndirectY) => 6,

        // Read-modify-write instructions.
        (Op::Asl | Op::Lsr | Op::Rol | Op::Ror, M::Accumulator) => 2,
        (Op::Asl | Op::Lsr | Op::Rol | Op::Ror | Op::Inc | Op::Dec, M::ZeroPage) => 5,
        (Op::Asl | Op::Lsr | Op::Rol | Op::Ror | Op::Inc | Op::Dec, M::ZeroPageX) => 6,
        (Op::Asl | Op::Lsr | Op::Rol | Op::Ror | Op::Inc | Op::Dec, M::Absolute) => 6,
        (Op::Asl | Op::Lsr | Op::Rol | Op::Ror | Op::Inc | Op::Dec, M::AbsoluteX) => 7,

        // Single-byte register and flag operations.
        (
            Op::Tax | Op::Tay | Op::Txa | Op::Tya | Op::Tsx | Op::Txs | Op::Inx | Op::Iny
            | Op::Dex | Op::Dey | Op::Clc | Op::Sec | Op::Cli | Op::Sei | Op::Clv | Op::Cld
            | Op::Sed | Op::Nop,
            M::Implicit,
        ) => 2,

        // Stack operations.
        (Op::Pha | Op::Php, M::Implicit) => 3,
        (Op::Pla | Op::Plp, M::Implicit) => 4,

        // Control flow.
        (Op::Jmp, M::Absolute) => 3,
        (Op::Jmp, M::Indirect) => 5,
        (Op::Jsr, M::Absolute) => 6,
        (Op::Rts | Op::Rti, M::Implicit) => 6,
        (Op::Brk, M::Implicit) => 7,

        // Branches cost 2 not taken; taken and page-cross penalties are
        // added during execution.
        (
            Op::Bpl | Op::Bmi | Op::Bvc | Op::Bvs | Op::Bcc | Op::Bcs | Op::Bne | Op::Beq,
            M::Relative,
        ) => 2,

        (mnemonic, mode) => return Err(CpuError::UnsupportedMode { mnemonic, mode }),
    };
    Ok(cycles)
}
