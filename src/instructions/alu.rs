//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! This module implements arithmetic and logical operations:
//! - ADC: Add with Carry
//! - SBC: Subtract with Carry (borrow = !C)
//! - AND, ORA, EOR: Bitwise logic on the accumulator
//! - CMP, CPX, CPY: Register comparisons
//! - BIT: Bit test
//!
//! ## Decimal Mode
//!
//! With D set (and decimal mode enabled in [`CpuConfig`](crate::CpuConfig)),
//! ADC and SBC treat both operands as packed BCD and correct each nibble.
//! Flag behaviour follows the NMOS part: N and V come from the intermediate
//! binary result, Z from the final BCD byte.

use super::Operand;
use crate::status::Flags;
use crate::{MemoryBus, CPU};

/// Executes the ADC (Add with Carry) instruction.
///
/// Adds the operand plus the carry flag to the accumulator. Updates N, V, Z, C.
pub(crate) fn execute_adc<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    let value = cpu.read_operand(operand);
    add_with_carry(cpu, value);
}

/// Executes the SBC (Subtract with Carry) instruction.
///
/// Computes `A - M - (1 - C)`. C is set when no borrow occurred.
pub(crate) fn execute_sbc<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    let value = cpu.read_operand(operand);
    subtract_with_borrow(cpu, value);
}

fn decimal_active<M: MemoryBus>(cpu: &CPU<M>) -> bool {
    cpu.config.decimal_mode && cpu.status.test_flag(Flags::DECIMAL)
}

/// Shared by ADC and RRA.
pub(crate) fn add_with_carry<M: MemoryBus>(cpu: &mut CPU<M>, value: u8) {
    let a = cpu.a;
    let carry_in = cpu.status.carry_bit();
    let binary = a as u16 + value as u16 + carry_in as u16;

    if !decimal_active(cpu) {
        cpu.status.update_carry(binary > 0xFF);
        cpu.status.update_overflow(binary, a, value);
        cpu.status.update_nz(binary as u8);
        cpu.a = binary as u8;
        return;
    }

    let mut lo = (a & 0x0F) as u16 + (value & 0x0F) as u16 + carry_in as u16;
    let mut hi = (a >> 4) as u16 + (value >> 4) as u16;
    if lo > 9 {
        lo += 6;
    }
    if lo > 0x0F {
        hi += 1;
    }

    // N and V observe the high nibble before its decimal correction
    let intermediate = (hi << 4) | (lo & 0x0F);
    cpu.status.update_overflow(intermediate, a, value);
    cpu.status.set_flag(Flags::NEGATIVE, intermediate & 0x80 != 0);

    if hi > 9 {
        hi += 6;
    }
    let result = ((hi << 4) | (lo & 0x0F)) as u8;

    cpu.status.update_carry(hi > 0x0F);
    cpu.status.set_flag(Flags::ZERO, result == 0);
    cpu.a = result;
}

/// Shared by SBC and ISC.
pub(crate) fn subtract_with_borrow<M: MemoryBus>(cpu: &mut CPU<M>, value: u8) {
    let a = cpu.a;
    let borrow = 1 - cpu.status.carry_bit() as i16;
    let binary = a as i16 - value as i16 - borrow;

    // Binary flags hold in both modes on NMOS
    cpu.status.update_carry(binary >= 0);
    cpu.status.update_overflow(binary as u16, a, !value);
    cpu.status.set_flag(Flags::NEGATIVE, binary as u8 & 0x80 != 0);

    if !decimal_active(cpu) {
        cpu.status.set_flag(Flags::ZERO, binary as u8 == 0);
        cpu.a = binary as u8;
        return;
    }

    let mut lo = (a & 0x0F) as i16 - (value & 0x0F) as i16 - borrow;
    let mut hi = (a >> 4) as i16 - (value >> 4) as i16;
    if lo < 0 {
        lo -= 6;
        hi -= 1;
    }
    if hi < 0 {
        hi -= 6;
    }
    let result = ((hi as u8) << 4) | (lo as u8 & 0x0F);

    cpu.status.set_flag(Flags::ZERO, result == 0);
    cpu.a = result;
}

/// Executes the AND (Logical AND) instruction.
pub(crate) fn execute_and<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    let value = cpu.read_operand(operand);
    cpu.a &= value;
    cpu.status.update_nz(cpu.a);
}

/// Executes the ORA (Logical Inclusive OR) instruction.
pub(crate) fn execute_ora<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    let value = cpu.read_operand(operand);
    cpu.a |= value;
    cpu.status.update_nz(cpu.a);
}

/// Executes the EOR (Exclusive OR) instruction.
pub(crate) fn execute_eor<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    let value = cpu.read_operand(operand);
    cpu.a ^= value;
    cpu.status.update_nz(cpu.a);
}

/// Register comparison: C = reg >= value, N and Z from `reg - value`.
pub(crate) fn compare<M: MemoryBus>(cpu: &mut CPU<M>, register: u8, value: u8) {
    let result = register.wrapping_sub(value);
    cpu.status.update_carry(register >= value);
    cpu.status.update_nz(result);
}

pub(crate) fn execute_cmp<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    let value = cpu.read_operand(operand);
    let register = cpu.a;
    compare(cpu, register, value);
}

pub(crate) fn execute_cpx<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    let value = cpu.read_operand(operand);
    let register = cpu.x;
    compare(cpu, register, value);
}

pub(crate) fn execute_cpy<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    let value = cpu.read_operand(operand);
    let register = cpu.y;
    compare(cpu, register, value);
}

/// Executes the BIT (Bit Test) instruction.
///
/// Z from `A & M`; N and V copied from bits 7 and 6 of M. A is unchanged.
pub(crate) fn execute_bit<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    let value = cpu.read_operand(operand);
    cpu.status.set_flag(Flags::ZERO, cpu.a & value == 0);
    cpu.status.set_flag(Flags::NEGATIVE, value & 0x80 != 0);
    cpu.status.set_flag(Flags::OVERFLOW, value & 0x40 != 0);
}
