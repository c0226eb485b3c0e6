//! Famicom/NES machine emulation.
//!
//! Wires the [`ricoh_2a03`] CPU to the machine's address space: 2K of
//! mirrored internal RAM, the PPU register window, APU/IO latches, and
//! a pluggable cartridge mapper. The [`Famicom`] value owns the whole
//! assembly and drives it one instruction at a time, arbitrating NMI
//! and OAM DMA between instructions.

pub mod bus;
pub mod cartridge;
pub mod config;
mod famicom;
pub mod ppu;

pub use bus::CpuBus;
pub use config::Region;
pub use famicom::{Famicom, StepError};
pub use ppu::Ppu;
