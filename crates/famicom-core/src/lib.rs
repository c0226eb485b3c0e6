//! Core traits for step-driven, cycle-accurate emulation.
//!
//! A CPU executes one instruction per `step` call and reports its true
//! hardware cycle cost; the machine's scheduler uses that count to keep
//! every other component in lockstep.

mod bus;
mod cpu;

pub use bus::{Bus, SimpleBus};
pub use cpu::Cpu;
