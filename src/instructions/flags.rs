//! # Flag Instructions
//!
//! Set and clear individual status flags: CLC, SEC, CLI, SEI, CLD, SED, CLV.
//! There is no SEV on the 6502.

use crate::status::Flags;
use crate::{MemoryBus, CPU};

pub(crate) fn execute_clc<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.status.set_flag(Flags::CARRY, false);
}

pub(crate) fn execute_sec<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.status.set_flag(Flags::CARRY, true);
}

/// Clears I. A pending IRQ is taken at the next instruction boundary.
pub(crate) fn execute_cli<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.status.set_flag(Flags::INTERRUPT_DISABLE, false);
}

pub(crate) fn execute_sei<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.status.set_flag(Flags::INTERRUPT_DISABLE, true);
}

pub(crate) fn execute_cld<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.status.set_flag(Flags::DECIMAL, false);
}

pub(crate) fn execute_sed<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.status.set_flag(Flags::DECIMAL, true);
}

pub(crate) fn execute_clv<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.status.set_flag(Flags::OVERFLOW, false);
}
