//! # Increment and Decrement Instructions
//!
//! - INC, DEC: read-modify-write on memory
//! - INX, INY, DEX, DEY: registers
//!
//! All wrap modulo 256 and update N and Z. C and V are untouched.

use super::Operand;
use crate::{MemoryBus, CPU};

/// Adds `delta` to the memory operand and returns the stored result.
pub(crate) fn step_memory<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand, delta: i8) -> u8 {
    let result = cpu.read_operand(operand).wrapping_add_signed(delta);
    cpu.write_operand(operand, result);
    cpu.status.update_nz(result);
    result
}

pub(crate) fn execute_inc<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    step_memory(cpu, operand, 1);
}

pub(crate) fn execute_dec<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    step_memory(cpu, operand, -1);
}

pub(crate) fn execute_inx<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.x = cpu.x.wrapping_add(1);
    cpu.status.update_nz(cpu.x);
}

pub(crate) fn execute_iny<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.y = cpu.y.wrapping_add(1);
    cpu.status.update_nz(cpu.y);
}

pub(crate) fn execute_dex<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.x = cpu.x.wrapping_sub(1);
    cpu.status.update_nz(cpu.x);
}

pub(crate) fn execute_dey<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.y = cpu.y.wrapping_sub(1);
    cpu.status.update_nz(cpu.y);
}
