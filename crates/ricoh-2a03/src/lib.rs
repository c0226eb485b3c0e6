//! Ricoh 2A03 CPU emulator.
//!
//! The 2A03 embeds a 6502 core with the decimal-mode ALU circuitry cut:
//! the D flag can be set and cleared but arithmetic is always binary.
//! This crate implements the 151 documented instructions with
//! cycle-accurate costs, including the conditional penalties for page
//! crossings and taken branches, plus the NMI/IRQ/reset sequences.
//!
//! The CPU is instruction-stepped: [`Ricoh2a03::step`] runs one whole
//! instruction (or one interrupt entry) and reports how many cycles it
//! consumed, so a machine driver can keep collaborators in lockstep.

pub mod addressing;
mod error;
pub mod flags;
mod opcodes;
mod registers;

pub use error::CpuError;
pub use opcodes::{Instruction, Mnemonic, Operand};
pub use registers::Registers;

use famicom_core::{Bus, Cpu};

use crate::addressing::{Resolved, Target};
use crate::opcodes::{OPCODES, base_cycles};

/// Interrupt vector locations at the top of the address space.
pub const NMI_VECTOR: u16 = 0xFFFA;
pub const RESET_VECTOR: u16 = 0xFFFC;
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Cycles consumed by an NMI or IRQ entry sequence.
const INTERRUPT_CYCLES: u32 = 7;

/// The 2A03 CPU core.
#[derive(Debug, Clone)]
pub struct Ricoh2a03 {
    pub regs: Registers,
    nmi_pending: bool,
    irq_pending: bool,
}

impl Ricoh2a03 {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            regs: Registers::new(),
            nmi_pending: false,
            irq_pending: false,
        }
    }

    /// True when an NMI has been latched and will be serviced by the
    /// next [`step`](Cpu::step). Machine drivers use this to let the
    /// interrupt entry pre-empt pending DMA work.
    #[must_use]
    pub const fn nmi_pending(&self) -> bool {
        self.nmi_pending
    }

    /// Current program counter.
    #[must_use]
    pub const fn pc(&self) -> u16 {
        self.regs.pc
    }

    /// Latch a non-maskable interrupt. Edge-triggered: one latch is
    /// serviced exactly once.
    pub fn nmi(&mut self) {
        self.nmi_pending = true;
    }

    /// Latch a maskable interrupt request. Held until I clears.
    pub fn interrupt(&mut self) {
        self.irq_pending = true;
    }

    // --- stack ---

    fn push<B: Bus>(&mut self, bus: &mut B, value: u8) {
        let addr = self.regs.push_addr();
        bus.write(addr, value);
    }

    fn push_word<B: Bus>(&mut self, bus: &mut B, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.push(bus, hi);
        self.push(bus, lo);
    }

    fn pull<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let addr = self.regs.pop_addr();
        bus.read(addr)
    }

    fn pull_word<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let lo = self.pull(bus);
        let hi = self.pull(bus);
        u16::from_le_bytes([lo, hi])
    }

    // --- fetch and decode ---

    /// Fetch one instruction byte, advancing PC. `start` is the address
    /// of the opcode, reported on fault so the whole instruction can be
    /// located.
    fn fetch_byte<B: Bus>(&mut self, bus: &mut B, start: u16) -> Result<u8, CpuError> {
        let byte = bus
            .fetch(self.regs.pc)
            .ok_or(CpuError::IncompleteInstruction { pc: start })?;
        self.regs.pc = self.regs.pc.wrapping_add(1);
        Ok(byte)
    }

    /// Fetch and decode the instruction at PC, advancing PC past it.
    fn fetch_instruction<B: Bus>(&mut self, bus: &mut B) -> Result<Instruction, CpuError> {
        let start = self.regs.pc;
        let opcode = self.fetch_byte(bus, start)?;
        let entry = OPCODES[usize::from(opcode)]
            .ok_or(CpuError::IllegalOpcode { opcode, pc: start })?;

        let operand = match entry.mode.operand_len() {
            0 => Operand::None,
            1 => Operand::Byte(self.fetch_byte(bus, start)?),
            _ => {
                let lo = self.fetch_byte(bus, start)?;
                let hi = self.fetch_byte(bus, start)?;
                Operand::Word(u16::from_le_bytes([lo, hi]))
            }
        };

        Ok(Instruction {
            opcode,
            mnemonic: entry.mnemonic,
            mode: entry.mode,
            operand,
        })
    }

    // --- data movement through resolved targets ---

    fn read_target<B: Bus>(&self, bus: &mut B, target: Target) -> u8 {
        match target {
            Target::Immediate(value) => value,
            Target::Accumulator => self.regs.a,
            Target::Memory(addr) => bus.read(addr),
            Target::None => 0,
        }
    }

    fn write_target<B: Bus>(&mut self, bus: &mut B, target: Target, value: u8) {
        match target {
            Target::Accumulator => self.regs.a = value,
            Target::Memory(addr) => bus.write(addr, value),
            Target::Immediate(_) | Target::None => {}
        }
    }

    // --- ALU ---

    /// Binary add with carry. The 2A03 ignores the D flag, so there is
    /// no decimal path.
    fn adc(&mut self, value: u8) {
        let carry = u16::from(self.regs.p.is_set(flags::C));
        let sum = u16::from(self.regs.a) + u16::from(value) + carry;
        let result = (sum & 0xFF) as u8;
        self.regs.p.set(flags::C, sum > 0xFF);
        // Overflow: operands agree in sign but the result does not.
        self.regs.p.set(
            flags::V,
            (self.regs.a ^ result) & (value ^ result) & 0x80 != 0,
        );
        self.regs.a = result;
        self.regs.p.set_zn(result);
    }

    /// SBC is ADC of the one's complement; borrow is the inverted carry.
    fn sbc(&mut self, value: u8) {
        self.adc(!value);
    }

    fn compare(&mut self, register: u8, value: u8) {
        self.regs.p.set(flags::C, register >= value);
        self.regs.p.set_zn(register.wrapping_sub(value));
    }

    fn asl(&mut self, value: u8) -> u8 {
        self.regs.p.set(flags::C, value & 0x80 != 0);
        let result = value << 1;
        self.regs.p.set_zn(result);
        result
    }

    fn lsr(&mut self, value: u8) -> u8 {
        self.regs.p.set(flags::C, value & 0x01 != 0);
        let result = value >> 1;
        self.regs.p.set_zn(result);
        result
    }

    fn rol(&mut self, value: u8) -> u8 {
        let carry_in = u8::from(self.regs.p.is_set(flags::C));
        self.regs.p.set(flags::C, value & 0x80 != 0);
        let result = (value << 1) | carry_in;
        self.regs.p.set_zn(result);
        result
    }

    fn ror(&mut self, value: u8) -> u8 {
        let carry_in = u8::from(self.regs.p.is_set(flags::C)) << 7;
        self.regs.p.set(flags::C, value & 0x01 != 0);
        let result = (value >> 1) | carry_in;
        self.regs.p.set_zn(result);
        result
    }

    /// BIT: Z from A & M, N and V copied straight from the operand.
    fn bit(&mut self, value: u8) {
        self.regs.p.set(flags::Z, self.regs.a & value == 0);
        self.regs.p.set(flags::N, value & flags::N != 0);
        self.regs.p.set(flags::V, value & flags::V != 0);
    }

    /// Take (or skip) a conditional branch, returning the extra cycles:
    /// 0 not taken, 1 taken within the page, 2 taken across a page. The
    /// page comparison is against the PC after the branch instruction.
    fn branch(&mut self, taken: bool, offset: u8) -> u32 {
        if !taken {
            return 0;
        }
        let base = self.regs.pc;
        let target = base.wrapping_add(i16::from(offset as i8) as u16);
        self.regs.pc = target;
        if (base & 0xFF00) == (target & 0xFF00) { 1 } else { 2 }
    }

    const fn branch_offset(operand: Operand) -> u8 {
        match operand {
            Operand::Byte(offset) => offset,
            Operand::None | Operand::Word(_) => 0,
        }
    }

    // --- interrupt entry ---

    /// NMI entry: push PC then P (B clear), jump through `$FFFA`. The
    /// I flag is left alone; NMI cannot be masked so it does not need to
    /// mask followers either, and handlers commonly rely on P surviving
    /// the round trip through RTI unchanged.
    fn service_nmi<B: Bus>(&mut self, bus: &mut B) -> u32 {
        log::trace!("NMI taken at ${:04X}", self.regs.pc);
        self.push_word(bus, self.regs.pc);
        let p = self.regs.p.for_push(false);
        self.push(bus, p);
        self.regs.pc = self.read_word(bus, NMI_VECTOR);
        INTERRUPT_CYCLES
    }

    /// IRQ entry: like NMI but through `$FFFE`, and I is set so the
    /// handler is not immediately re-entered.
    fn service_irq<B: Bus>(&mut self, bus: &mut B) -> u32 {
        log::trace!("IRQ taken at ${:04X}", self.regs.pc);
        self.push_word(bus, self.regs.pc);
        let p = self.regs.p.for_push(false);
        self.push(bus, p);
        self.regs.p.set(flags::I, true);
        self.regs.pc = self.read_word(bus, IRQ_VECTOR);
        INTERRUPT_CYCLES
    }

    // --- execution ---

    fn execute<B: Bus>(&mut self, bus: &mut B, instr: Instruction) -> Result<u32, CpuError> {
        let mut cycles = base_cycles(instr.mnemonic, instr.mode)?;
        let resolved = self.resolve(bus, instr.mode, instr.operand);
        if resolved.page_crossed && instr.mnemonic.page_cross_penalty() {
            cycles += 1;
        }
        cycles += self.run_operation(bus, instr, resolved);
        Ok(cycles)
    }

    /// Perform the instruction's effect. Returns extra cycles beyond the
    /// base cost (branches only).
    #[allow(clippy::too_many_lines)]
    fn run_operation<B: Bus>(
        &mut self,
        bus: &mut B,
        instr: Instruction,
        resolved: Resolved,
    ) -> u32 {
        match instr.mnemonic {
            Mnemonic::Lda => {
                self.regs.a = self.read_target(bus, resolved.target);
                self.regs.p.set_zn(self.regs.a);
            }
            Mnemonic::Ldx => {
                self.regs.x = self.read_target(bus, resolved.target);
                self.regs.p.set_zn(self.regs.x);
            }
            Mnemonic::Ldy => {
                self.regs.y = self.read_target(bus, resolved.target);
                self.regs.p.set_zn(self.regs.y);
            }
            Mnemonic::Sta => self.write_target(bus, resolved.target, self.regs.a),
            Mnemonic::Stx => self.write_target(bus, resolved.target, self.regs.x),
            Mnemonic::Sty => self.write_target(bus, resolved.target, self.regs.y),

            Mnemonic::Tax => {
                self.regs.x = self.regs.a;
                self.regs.p.set_zn(self.regs.x);
            }
            Mnemonic::Tay => {
                self.regs.y = self.regs.a;
                self.regs.p.set_zn(self.regs.y);
            }
            Mnemonic::Txa => {
                self.regs.a = self.regs.x;
                self.regs.p.set_zn(self.regs.a);
            }
            Mnemonic::Tya => {
                self.regs.a = self.regs.y;
                self.regs.p.set_zn(self.regs.a);
            }
            Mnemonic::Tsx => {
                self.regs.x = self.regs.s;
                self.regs.p.set_zn(self.regs.x);
            }
            // TXS is the one transfer that does not touch flags.
            Mnemonic::Txs => self.regs.s = self.regs.x,

            Mnemonic::Pha => {
                let a = self.regs.a;
                self.push(bus, a);
            }
            Mnemonic::Php => {
                let value = self.regs.p.for_push(true);
                self.push(bus, value);
            }
            Mnemonic::Pla => {
                self.regs.a = self.pull(bus);
                self.regs.p.set_zn(self.regs.a);
            }
            Mnemonic::Plp => {
                let value = self.pull(bus);
                self.regs.p.restore(value);
            }

            Mnemonic::Adc => {
                let value = self.read_target(bus, resolved.target);
                self.adc(value);
            }
            Mnemonic::Sbc => {
                let value = self.read_target(bus, resolved.target);
                self.sbc(value);
            }
            Mnemonic::And => {
                self.regs.a &= self.read_target(bus, resolved.target);
                self.regs.p.set_zn(self.regs.a);
            }
            Mnemonic::Ora => {
                self.regs.a |= self.read_target(bus, resolved.target);
                self.regs.p.set_zn(self.regs.a);
            }
            Mnemonic::Eor => {
                self.regs.a ^= self.read_target(bus, resolved.target);
                self.regs.p.set_zn(self.regs.a);
            }
            Mnemonic::Cmp => {
                let value = self.read_target(bus, resolved.target);
                self.compare(self.regs.a, value);
            }
            Mnemonic::Cpx => {
                let value = self.read_target(bus, resolved.target);
                self.compare(self.regs.x, value);
            }
            Mnemonic::Cpy => {
                let value = self.read_target(bus, resolved.target);
                self.compare(self.regs.y, value);
            }
            Mnemonic::Bit => {
                let value = self.read_target(bus, resolved.target);
                self.bit(value);
            }

            Mnemonic::Asl => {
                let value = self.read_target(bus, resolved.target);
                let result = self.asl(value);
                self.write_target(bus, resolved.target, result);
            }
            Mnemonic::Lsr => {
                let value = self.read_target(bus, resolved.target);
                let result = self.lsr(value);
                self.write_target(bus, resolved.target, result);
            }
            Mnemonic::Rol => {
                let value = self.read_target(bus, resolved.target);
                let result = self.rol(value);
                self.write_target(bus, resolved.target, result);
            }
            Mnemonic::Ror => {
                let value = self.read_target(bus, resolved.target);
                let result = self.ror(value);
                self.write_target(bus, resolved.target, result);
            }

            Mnemonic::Inc => {
                let value = self.read_target(bus, resolved.target).wrapping_add(1);
                self.regs.p.set_zn(value);
                self.write_target(bus, resolved.target, value);
            }
            Mnemonic::Dec => {
                let value = self.read_target(bus, resolved.target).wrapping_sub(1);
                self.regs.p.set_zn(value);
                self.write_target(bus, resolved.target, value);
            }
            Mnemonic::Inx => {
                self.regs.x = self.regs.x.wrapping_add(1);
                self.regs.p.set_zn(self.regs.x);
            }
            Mnemonic::Iny => {
                self.regs.y = self.regs.y.wrapping_add(1);
                self.regs.p.set_zn(self.regs.y);
            }
            Mnemonic::Dex => {
                self.regs.x = self.regs.x.wrapping_sub(1);
                self.regs.p.set_zn(self.regs.x);
            }
            Mnemonic::Dey => {
                self.regs.y = self.regs.y.wrapping_sub(1);
                self.regs.p.set_zn(self.regs.y);
            }

            Mnemonic::Jmp => {
                if let Target::Memory(addr) = resolved.target {
                    self.regs.pc = addr;
                }
            }
            Mnemonic::Jsr => {
                if let Target::Memory(addr) = resolved.target {
                    // Hardware pushes the address of the last byte of
                    // the JSR; RTS adds one back.
                    let return_addr = self.regs.pc.wrapping_sub(1);
                    self.push_word(bus, return_addr);
                    self.regs.pc = addr;
                }
            }
            Mnemonic::Rts => {
                let addr = self.pull_word(bus);
                self.regs.pc = addr.wrapping_add(1);
            }
            Mnemonic::Rti => {
                let status = self.pull(bus);
                self.regs.p.restore(status);
                self.regs.pc = self.pull_word(bus);
            }
            Mnemonic::Brk => {
                // PC is past the opcode; the pushed address skips one
                // more byte, leaving a padding byte after BRK.
                let return_addr = self.regs.pc.wrapping_add(1);
                self.push_word(bus, return_addr);
                let status = self.regs.p.for_push(true);
                self.push(bus, status);
                self.regs.p.set(flags::I, true);
                self.regs.pc = self.read_word(bus, IRQ_VECTOR);
            }

            Mnemonic::Bpl => {
                let taken = !self.regs.p.is_set(flags::N);
                return self.branch(taken, Self::branch_offset(instr.operand));
            }
            Mnemonic::Bmi => {
                let taken = self.regs.p.is_set(flags::N);
                return self.branch(taken, Self::branch_offset(instr.operand));
            }
            Mnemonic::Bvc => {
                let taken = !self.regs.p.is_set(flags::V);
                return self.branch(taken, Self::branch_offset(instr.operand));
            }
            Mnemonic::Bvs => {
                let taken = self.regs.p.is_set(flags::V);
                return self.branch(taken, Self::branch_offset(instr.operand));
            }
            Mnemonic::Bcc => {
                let taken = !self.regs.p.is_set(flags::C);
                return self.branch(taken, Self::branch_offset(instr.operand));
            }
            Mnemonic::Bcs => {
                let taken = self.regs.p.is_set(flags::C);
                return self.branch(taken, Self::branch_offset(instr.operand));
            }
            Mnemonic::Bne => {
                let taken = !self.regs.p.is_set(flags::Z);
                return self.branch(taken, Self::branch_offset(instr.operand));
            }
            Mnemonic::Beq => {
                let taken = self.regs.p.is_set(flags::Z);
                return self.branch(taken, Self::branch_offset(instr.operand));
            }

            Mnemonic::Clc => self.regs.p.set(flags::C, false),
            Mnemonic::Sec => self.regs.p.set(flags::C, true),
            Mnemonic::Cli => self.regs.p.set(flags::I, false),
            Mnemonic::Sei => self.regs.p.set(flags::I, true),
            Mnemonic::Clv => self.regs.p.set(flags::V, false),
            Mnemonic::Cld => self.regs.p.set(flags::D, false),
            Mnemonic::Sed => self.regs.p.set(flags::D, true),

            Mnemonic::Nop => {}
        }
        0
    }
}

impl Default for Ricoh2a03 {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Bus> Cpu<B> for Ricoh2a03 {
    type Error = CpuError;

    /// Run one instruction, or one interrupt entry if a latched
    /// interrupt takes priority over fetch. NMI is serviced regardless
    /// of the I flag; IRQ stays latched while I is set.
    fn step(&mut self, bus: &mut B) -> Result<u32, CpuError> {
        if self.nmi_pending {
            self.nmi_pending = false;
            return Ok(self.service_nmi(bus));
        }
        if self.irq_pending && !self.regs.p.is_set(flags::I) {
            self.irq_pending = false;
            return Ok(self.service_irq(bus));
        }

        let instr = self.fetch_instruction(bus)?;
        self.execute(bus, instr)
    }

    /// Reset: registers return to their documented power-up values
    /// (A = X = Y = 0, S = `$FD` after the three phantom pushes,
    /// P = I|U) and PC loads from `$FFFC`.
    fn reset(&mut self, bus: &mut B) {
        self.regs = Registers::new();
        self.regs.pc = self.read_word(bus, RESET_VECTOR);
        self.nmi_pending = false;
        self.irq_pending = false;
        log::debug!("reset: PC <- ${:04X}", self.regs.pc);
    }

    fn interrupt(&mut self) {
        self.irq_pending = true;
    }

    fn nmi(&mut self) {
        self.nmi_pending = true;
    }

    fn pc(&self) -> u16 {
        self.regs.pc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use famicom_core::SimpleBus;

    fn cpu_at(pc: u16) -> Ricoh2a03 {
        let mut cpu = Ricoh2a03::new();
        cpu.regs.pc = pc;
        cpu
    }

    #[test]
    fn adc_sets_carry_and_overflow() {
        let mut cpu = Ricoh2a03::new();

        cpu.regs.a = 0x50;
        cpu.adc(0x50);
        assert_eq!(cpu.regs.a, 0xA0);
        assert!(cpu.regs.p.is_set(flags::V), "0x50 + 0x50 overflows signed");
        assert!(!cpu.regs.p.is_set(flags::C));
        assert!(cpu.regs.p.is_set(flags::N));

        cpu.regs.p.set(flags::C, false);
        cpu.regs.a = 0xFF;
        cpu.adc(0x01);
        assert_eq!(cpu.regs.a, 0x00);
        assert!(cpu.regs.p.is_set(flags::C));
        assert!(cpu.regs.p.is_set(flags::Z));
        assert!(!cpu.regs.p.is_set(flags::V));
    }

    #[test]
    fn sbc_borrows_through_inverted_carry() {
        let mut cpu = Ricoh2a03::new();
        cpu.regs.p.set(flags::C, true); // no borrow
        cpu.regs.a = 0x50;
        cpu.sbc(0x30);
        assert_eq!(cpu.regs.a, 0x20);
        assert!(cpu.regs.p.is_set(flags::C), "no borrow out");

        cpu.regs.a = 0x10;
        cpu.sbc(0x20);
        assert_eq!(cpu.regs.a, 0xF0);
        assert!(!cpu.regs.p.is_set(flags::C), "borrow out clears carry");
    }

    #[test]
    fn decimal_flag_is_stored_but_ignored() {
        let mut cpu = Ricoh2a03::new();
        cpu.regs.p.set(flags::D, true);
        cpu.regs.a = 0x09;
        cpu.adc(0x01);
        // Binary result, not BCD 0x10.
        assert_eq!(cpu.regs.a, 0x0A);
        assert!(cpu.regs.p.is_set(flags::D));
    }

    #[test]
    fn illegal_opcode_faults_with_location() {
        let mut cpu = cpu_at(0x0400);
        let mut bus = SimpleBus::new();
        bus.write(0x0400, 0x02); // unassigned byte
        let err = cpu.step(&mut bus).unwrap_err();
        assert_eq!(
            err,
            CpuError::IllegalOpcode {
                opcode: 0x02,
                pc: 0x0400
            }
        );
    }

    #[test]
    fn nmi_entry_skips_the_i_flag() {
        let mut cpu = cpu_at(0x8000);
        let mut bus = SimpleBus::new();
        bus.write(NMI_VECTOR, 0x00);
        bus.write(NMI_VECTOR + 1, 0x90);
        cpu.regs.p.set(flags::I, false);

        cpu.nmi();
        assert!(cpu.nmi_pending());
        let cycles = cpu.step(&mut bus).unwrap();

        assert_eq!(cycles, 7);
        assert_eq!(cpu.regs.pc, 0x9000);
        assert!(!cpu.regs.p.is_set(flags::I), "NMI entry leaves I alone");
        // Pushed copy has B clear, U set.
        let pushed_p = bus.peek(0x01FB);
        assert_eq!(pushed_p & flags::B, 0);
        assert_eq!(pushed_p & flags::U, flags::U);
    }

    #[test]
    fn irq_respects_the_i_flag() {
        let mut cpu = cpu_at(0x8000);
        let mut bus = SimpleBus::new();
        bus.write(0x8000, 0xEA); // NOP
        bus.write(IRQ_VECTOR, 0x00);
        bus.write(IRQ_VECTOR + 1, 0xA0);

        cpu.interrupt();
        // I is set at power-up, so the NOP runs instead.
        assert_eq!(cpu.step(&mut bus).unwrap(), 2);
        assert_eq!(cpu.regs.pc, 0x8001);

        // Clearing I lets the latched IRQ through.
        cpu.regs.p.set(flags::I, false);
        assert_eq!(cpu.step(&mut bus).unwrap(), 7);
        assert_eq!(cpu.regs.pc, 0xA000);
        assert!(cpu.regs.p.is_set(flags::I), "IRQ entry masks followers");
    }

    #[test]
    fn reset_restores_power_up_state_and_loads_the_vector() {
        let mut cpu = Ricoh2a03::new();
        let mut bus = SimpleBus::new();
        bus.write(RESET_VECTOR, 0x34);
        bus.write(RESET_VECTOR + 1, 0x12);

        // Dirty every register to show reset does not keep them.
        cpu.regs.a = 0x11;
        cpu.regs.x = 0x22;
        cpu.regs.y = 0x33;
        cpu.regs.s = 0x80;
        cpu.regs.p.set(flags::C, true);

        cpu.reset(&mut bus);
        assert_eq!(cpu.regs.pc, 0x1234);
        assert_eq!(cpu.regs.s, 0xFD, "SP lands at $FD, not a relative drop");
        assert_eq!((cpu.regs.a, cpu.regs.x, cpu.regs.y), (0, 0, 0));
        assert!(cpu.regs.p.is_set(flags::I));
        assert!(!cpu.regs.p.is_set(flags::C));

        // A second reset leaves SP at $FD rather than drifting lower.
        cpu.reset(&mut bus);
        assert_eq!(cpu.regs.s, 0xFD);
    }

    #[test]
    fn bit_copies_high_operand_bits() {
        let mut cpu = Ricoh2a03::new();
        cpu.regs.a = 0x01;
        cpu.bit(0xC0);
        assert!(cpu.regs.p.is_set(flags::N));
        assert!(cpu.regs.p.is_set(flags::V));
        assert!(cpu.regs.p.is_set(flags::Z), "A & M == 0");
    }

    #[test]
    fn rotates_move_carry_through_bit_boundaries() {
        let mut cpu = Ricoh2a03::new();
        cpu.regs.p.set(flags::C, true);
        assert_eq!(cpu.rol(0x80), 0x01);
        assert!(cpu.regs.p.is_set(flags::C));

        cpu.regs.p.set(flags::C, true);
        assert_eq!(cpu.ror(0x01), 0x80);
        assert!(cpu.regs.p.is_set(flags::C));
    }
}
