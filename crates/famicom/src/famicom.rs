//! Top-level machine: step scheduling and interrupt/DMA arbitration.

use famicom_core::{Bus, Cpu};
use ricoh_2a03::{CpuError, Ricoh2a03};
use thiserror::Error;

use crate::bus::CpuBus;
use crate::cartridge::Mapper;
use crate::config::Region;
use crate::ppu::Ppu;

/// PPU dots per CPU cycle.
const PPU_DOTS_PER_CPU_CYCLE: u32 = 3;

/// A fault that stops the machine. Not recoverable: execution cannot
/// resume mid-instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StepError {
    #[error("CPU fault: {0}")]
    Cpu(#[from] CpuError),
}

/// The assembled machine: CPU, bus, and collaborators, owned as one
/// value so multiple independent instances can coexist and tests stay
/// isolated.
pub struct Famicom {
    cpu: Ricoh2a03,
    bus: CpuBus,
    /// Total CPU cycles executed since power-up. Parity feeds the OAM
    /// DMA cost.
    cpu_cycles: u64,
    region: Region,
}

impl Famicom {
    /// Assemble a machine around a cartridge. The CPU comes up with PC
    /// loaded from the reset vector.
    #[must_use]
    pub fn new(cartridge: Box<dyn Mapper>, region: Region) -> Self {
        let bus = CpuBus::new(cartridge, Ppu::new(region));
        let mut machine = Self {
            cpu: Ricoh2a03::new(),
            bus,
            cpu_cycles: 0,
            region,
        };
        machine.cpu.reset(&mut machine.bus);
        machine
    }

    /// Advance one instruction, one interrupt entry, or one DMA burst.
    ///
    /// Arbitration order: a latched NMI pre-empts pending DMA, which
    /// pre-empts instruction fetch. The PPU is then clocked three dots
    /// per consumed CPU cycle, and a fresh NMI edge is latched into the
    /// CPU for the next step.
    ///
    /// # Errors
    ///
    /// Propagates CPU faults (illegal opcode, fetch past mapped ROM).
    /// The machine must not be stepped again after an error.
    pub fn step(&mut self) -> Result<u32, StepError> {
        let cycles = if self.cpu.nmi_pending() {
            self.cpu.step(&mut self.bus)?
        } else if let Some(page) = self.bus.oam_dma_page.take() {
            self.run_oam_dma(page)
        } else {
            self.cpu.step(&mut self.bus)?
        };
        self.cpu_cycles += u64::from(cycles);

        for _ in 0..cycles * PPU_DOTS_PER_CPU_CYCLE {
            self.bus.ppu.tick();
        }
        if self.bus.ppu.take_nmi() {
            self.cpu.nmi();
        }

        Ok(cycles)
    }

    /// Run one frame's worth of CPU cycles.
    ///
    /// # Errors
    ///
    /// Propagates the first fault from [`step`](Self::step).
    pub fn run_frame(&mut self) -> Result<u64, StepError> {
        let start = self.cpu_cycles;
        let target = start + self.region.cpu_cycles_per_frame();
        while self.cpu_cycles < target {
            self.step()?;
        }
        Ok(self.cpu_cycles - start)
    }

    /// Reset the CPU through the reset vector. RAM and cartridge
    /// contents are untouched.
    pub fn reset(&mut self) {
        self.cpu.reset(&mut self.bus);
    }

    /// Latch an NMI directly, bypassing the PPU. Normally the VBlank
    /// edge raises it; this exists for harnesses that drive the
    /// interrupt path in isolation.
    pub fn raise_nmi(&mut self) {
        self.cpu.nmi();
    }

    /// Copy one 256-byte page into OAM. The CPU is stalled for 513
    /// cycles, 514 when the burst starts on an odd CPU cycle.
    fn run_oam_dma(&mut self, page: u8) -> u32 {
        log::trace!("OAM DMA from page ${page:02X}");
        let base = u16::from(page) << 8;
        for offset in 0..=0xFF_u8 {
            let value = self.bus.read(base | u16::from(offset));
            let dest = self.bus.ppu.oam_addr().wrapping_add(offset);
            self.bus.ppu.write_oam(dest, value);
        }
        513 + u32::from(self.cpu_cycles % 2 == 1)
    }

    /// Reference to the CPU.
    #[must_use]
    pub fn cpu(&self) -> &Ricoh2a03 {
        &self.cpu
    }

    /// Mutable reference to the CPU.
    pub fn cpu_mut(&mut self) -> &mut Ricoh2a03 {
        &mut self.cpu
    }

    /// Reference to the bus.
    #[must_use]
    pub fn bus(&self) -> &CpuBus {
        &self.bus
    }

    /// Mutable reference to the bus.
    pub fn bus_mut(&mut self) -> &mut CpuBus {
        &mut self.bus
    }

    /// Total CPU cycles executed.
    #[must_use]
    pub fn cpu_cycles(&self) -> u64 {
        self.cpu_cycles
    }

    /// Video region.
    #[must_use]
    pub fn region(&self) -> Region {
        self.region
    }
}
