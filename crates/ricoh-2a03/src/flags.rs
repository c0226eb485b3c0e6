//! Processor status register (P).
//!
//! Bit layout, low to high: C, Z, I, D, B, U, V, N. B is not a physical
//! flag — it only exists on copies of P pushed to the stack. U (bit 5)
//! always reads as 1. The 2A03 stores the D flag but its ALU ignores it.

/// Carry.
pub const C: u8 = 0x01;
/// Zero.
pub const Z: u8 = 0x02;
/// Interrupt disable.
pub const I: u8 = 0x04;
/// Decimal mode (stored but ignored by the 2A03 ALU).
pub const D: u8 = 0x08;
/// Break (only meaningful on pushed copies of P).
pub const B: u8 = 0x10;
/// Unused, always 1.
pub const U: u8 = 0x20;
/// Overflow.
pub const V: u8 = 0x40;
/// Negative.
pub const N: u8 = 0x80;

/// Processor status flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status(pub u8);

impl Status {
    /// Power-up value: I and U set.
    #[must_use]
    pub const fn power_up() -> Self {
        Self(I | U)
    }

    #[must_use]
    pub const fn is_set(self, mask: u8) -> bool {
        self.0 & mask != 0
    }

    pub fn set(&mut self, mask: u8, value: bool) {
        if value {
            self.0 |= mask;
        } else {
            self.0 &= !mask;
        }
    }

    /// Set Z and N from a result byte.
    pub fn set_zn(&mut self, value: u8) {
        self.set(Z, value == 0);
        self.set(N, value & 0x80 != 0);
    }

    /// The value pushed to the stack. U is always set; B is set only when
    /// the push originates from BRK or PHP, not from interrupt entry.
    #[must_use]
    pub const fn for_push(self, brk: bool) -> u8 {
        if brk { self.0 | U | B } else { (self.0 | U) & !B }
    }

    /// Restore from a stack copy. B is discarded, U forced to 1.
    pub fn restore(&mut self, value: u8) {
        self.0 = (value | U) & !B;
    }
}
