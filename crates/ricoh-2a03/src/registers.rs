//! CPU register file.

use crate::flags::Status;

/// The 2A03 register set.
///
/// - A: accumulator
/// - X, Y: index registers
/// - S: stack pointer, an offset into the fixed stack page `$0100-$01FF`
/// - PC: program counter
/// - P: processor status
///
/// S arithmetic wraps modulo 256 and never carries into another page; PC
/// arithmetic wraps modulo 65536.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registers {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub s: u8,
    pub pc: u16,
    pub p: Status,
}

impl Registers {
    /// Power-up state. PC is loaded from the reset vector separately.
    ///
    /// S is $FD because the reset sequence performs three phantom pushes
    /// (decrements with no writes) from $00.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            s: 0xFD,
            pc: 0,
            p: Status::power_up(),
        }
    }

    /// Stack address for the next push; decrements S.
    pub fn push_addr(&mut self) -> u16 {
        let addr = 0x0100 | u16::from(self.s);
        self.s = self.s.wrapping_sub(1);
        addr
    }

    /// Stack address for the next pop; increments S first.
    pub fn pop_addr(&mut self) -> u16 {
        self.s = self.s.wrapping_add(1);
        0x0100 | u16::from(self.s)
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}
