//! CPU core trait.

use crate::Bus;

/// A CPU that executes one instruction (or interrupt service) per step.
///
/// The type parameter `B` is the bus type this CPU operates on. The bus is
/// passed in, not owned, so the machine can route it to other components
/// between steps.
pub trait Cpu<B: Bus> {
    /// Fault type surfaced by `step`.
    type Error;

    /// Execute one instruction or pending interrupt service.
    ///
    /// Returns the cycles consumed, including conditional penalties (page
    /// crossing, branch taken). Faults are not recoverable: the machine
    /// cannot resume mid-instruction, so a caller that receives an error
    /// must halt and report it.
    fn step(&mut self, bus: &mut B) -> Result<u32, Self::Error>;

    /// Reset the CPU to its power-up state, loading PC from the reset
    /// vector. Does not touch memory contents.
    fn reset(&mut self, bus: &mut B);

    /// Request a maskable interrupt.
    fn interrupt(&mut self);

    /// Signal a non-maskable interrupt. Edge-triggered: one signal is
    /// serviced exactly once.
    fn nmi(&mut self);

    /// Current program counter.
    fn pc(&self) -> u16;
}
