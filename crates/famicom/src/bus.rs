//! CPU address routing.
//!
//! Implements `famicom_core::Bus` for the machine. Every address
//! resolves to exactly one backing cell:
//!
//! - $0000-$1FFF: 2K internal RAM, mirrored every $0800
//! - $2000-$3FFF: 8 PPU registers, mirrored every 8 bytes
//! - $4000-$4017: APU/IO registers ($4014 triggers OAM DMA)
//! - $4020-$FFFF: cartridge, delegated to the active mapper
//!
//! There is no fault on unmapped data access: reads return the last
//! value latched on the bus, writes into ROM are dropped. Only
//! instruction fetch distinguishes unbacked addresses, so the CPU can
//! report running off the end of mapped ROM.

use famicom_core::Bus;

use crate::cartridge::Mapper;
use crate::ppu::Ppu;

/// The CPU-side bus.
pub struct CpuBus {
    /// 2K internal RAM ($0000-$07FF, mirrored to $1FFF).
    pub ram: [u8; 2048],
    /// Video-timing collaborator.
    pub ppu: Ppu,
    /// Cartridge mapper.
    pub cartridge: Box<dyn Mapper>,
    /// OAM DMA pending page (set when $4014 is written).
    pub oam_dma_page: Option<u8>,
    /// APU/IO register latches ($4000-$4017). The APU itself is not
    /// modeled; writes land here so the region still behaves as mapped.
    io: [u8; 0x18],
    /// Last value driven on the data lines; unmapped reads return it.
    open_bus: u8,
}

impl CpuBus {
    #[must_use]
    pub fn new(cartridge: Box<dyn Mapper>, ppu: Ppu) -> Self {
        Self {
            ram: [0; 2048],
            ppu,
            cartridge,
            oam_dma_page: None,
            io: [0; 0x18],
            open_bus: 0,
        }
    }

    /// Peek a byte from RAM without side effects (for observation).
    #[must_use]
    pub fn peek_ram(&self, addr: u16) -> u8 {
        self.ram[(addr & 0x07FF) as usize]
    }

    /// Latched APU/IO register value (for observation). `addr` must be
    /// in `$4000-$4017`.
    #[must_use]
    pub fn peek_io(&self, addr: u16) -> u8 {
        self.io[(addr - 0x4000) as usize]
    }
}

impl Bus for CpuBus {
    fn read(&mut self, addr: u16) -> u8 {
        let value = match addr {
            0x0000..=0x1FFF => self.ram[(addr & 0x07FF) as usize],
            0x2000..=0x3FFF => self.ppu.cpu_read(addr & 0x0007, self.cartridge.as_mut()),
            // APU/IO registers are write-only from the CPU's side here;
            // reads see the floating bus.
            0x4000..=0x401F => self.open_bus,
            _ => self.cartridge.cpu_read(addr).unwrap_or(self.open_bus),
        };
        self.open_bus = value;
        value
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.open_bus = value;
        match addr {
            0x0000..=0x1FFF => self.ram[(addr & 0x07FF) as usize] = value,
            0x2000..=0x3FFF => {
                self.ppu
                    .cpu_write(addr & 0x0007, value, self.cartridge.as_mut());
            }
            0x4014 => self.oam_dma_page = Some(value),
            0x4000..=0x4017 => self.io[(addr - 0x4000) as usize] = value,
            0x4018..=0x401F => {} // Disabled test-mode registers
            _ => self.cartridge.cpu_write(addr, value),
        }
    }

    fn fetch(&mut self, addr: u16) -> Option<u8> {
        match addr {
            0x4020..=0xFFFF => {
                let value = self.cartridge.cpu_read(addr)?;
                self.open_bus = value;
                Some(value)
            }
            _ => Some(self.read(addr)),
        }
    }
}
