//! Memory bus interface.

/// Memory and I/O bus interface.
///
/// Components access memory and peripherals through this trait. The bus
/// handles address decoding and routing to the appropriate device. Every
/// address resolves: reads from unmapped regions return whatever the bus
/// implementation latches (open bus), and writes to read-only regions are
/// dropped. There is no fault path for ordinary data access.
pub trait Bus {
    /// Read a byte from the given address.
    fn read(&mut self, address: u16) -> u8;

    /// Write a byte to the given address.
    fn write(&mut self, address: u16, value: u8);

    /// Read a byte for instruction fetch.
    ///
    /// Returns `None` when no backing store maps the address. This lets the
    /// CPU distinguish a fetch that ran off the end of mapped ROM (a fatal
    /// decode condition) from an ordinary open-bus data read.
    fn fetch(&mut self, address: u16) -> Option<u8> {
        Some(self.read(address))
    }
}

/// A flat 64K memory with no mirroring or peripherals.
///
/// Used by CPU tests that need a bus without machine-specific routing.
pub struct SimpleBus {
    memory: [u8; 0x10000],
}

impl SimpleBus {
    #[must_use]
    pub fn new() -> Self {
        Self {
            memory: [0; 0x10000],
        }
    }

    /// Copy a program into memory starting at `base`.
    pub fn load(&mut self, base: u16, bytes: &[u8]) {
        for (i, &byte) in bytes.iter().enumerate() {
            self.memory[base.wrapping_add(i as u16) as usize] = byte;
        }
    }

    /// Read without side effects (for test assertions).
    #[must_use]
    pub fn peek(&self, address: u16) -> u8 {
        self.memory[address as usize]
    }
}

impl Default for SimpleBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus for SimpleBus {
    fn read(&mut self, address: u16) -> u8 {
        self.memory[address as usize]
    }

    fn write(&mut self, address: u16, value: u8) {
        self.memory[address as usize] = value;
    }
}
