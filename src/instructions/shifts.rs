//! # Shift and Rotate Instructions
//!
//! This module implements bit shift and rotate operations:
//! - ASL: Arithmetic Shift Left
//! - LSR: Logical Shift Right
//! - ROL: Rotate Left through carry
//! - ROR: Rotate Right through carry
//!
//! Each operates on the accumulator (accumulator mode) or on memory
//! (read-modify-write). The bit shifted out lands in C.

use super::Operand;
use crate::{MemoryBus, CPU};

/// Applies a shift to the operand, stores it back, updates N, Z, C and
/// returns the shifted value.
///
/// `shift` maps `(value, carry_in)` to `(result, carry_out)`.
pub(crate) fn modify<M, F>(cpu: &mut CPU<M>, operand: Operand, shift: F) -> u8
where
    M: MemoryBus,
    F: FnOnce(u8, bool) -> (u8, bool),
{
    let value = cpu.read_operand(operand);
    let (result, carry) = shift(value, cpu.flag_c());
    cpu.write_operand(operand, result);
    cpu.status.update_carry(carry);
    cpu.status.update_nz(result);
    result
}

pub(crate) fn asl(value: u8, _carry: bool) -> (u8, bool) {
    (value << 1, value & 0x80 != 0)
}

pub(crate) fn lsr(value: u8, _carry: bool) -> (u8, bool) {
    (value >> 1, value & 0x01 != 0)
}

pub(crate) fn rol(value: u8, carry: bool) -> (u8, bool) {
    ((value << 1) | carry as u8, value & 0x80 != 0)
}

pub(crate) fn ror(value: u8, carry: bool) -> (u8, bool) {
    ((value >> 1) | ((carry as u8) << 7), value & 0x01 != 0)
}

pub(crate) fn execute_asl<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    modify(cpu, operand, asl);
}

pub(crate) fn execute_lsr<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    modify(cpu, operand, lsr);
}

pub(crate) fn execute_rol<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    modify(cpu, operand, rol);
}

pub(crate) fn execute_ror<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    modify(cpu, operand, ror);
}
