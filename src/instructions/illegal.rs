//! # Undocumented Instructions
//!
//! NMOS 6502 opcodes outside the documented set. Most are combinations of two
//! documented operations sharing one decode:
//!
//! - SLO (ASL + ORA), RLA (ROL + AND), SRE (LSR + EOR), RRA (ROR + ADC)
//! - DCP (DEC + CMP), ISC (INC + SBC)
//! - SAX (store A & X), LAX (load A and X)
//! - ANC, ALR, ARR, AXS: immediate-mode AND variants
//!
//! The unstable group (XAA, AHX, SHX, SHY, TAS, LAS) depends on analog
//! effects on real silicon. The behaviour here follows the commonly
//! documented model: XAA and LAX #imm use the magic constant 0xEE, and the
//! high-byte stores AND the value with (base address high byte + 1).

use super::alu::{add_with_carry, compare, subtract_with_borrow};
use super::inc_dec::step_memory;
use super::shifts::{self, modify};
use super::Operand;
use crate::addressing::AddressingMode;
use crate::status::Flags;
use crate::{MemoryBus, CPU};

/// Constant ORed into A by the unstable XAA and LAX #imm opcodes.
pub const MAGIC: u8 = 0xEE;

pub(crate) fn execute_slo<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    let shifted = modify(cpu, operand, shifts::asl);
    cpu.a |= shifted;
    cpu.status.update_nz(cpu.a);
}

pub(crate) fn execute_rla<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    let rotated = modify(cpu, operand, shifts::rol);
    cpu.a &= rotated;
    cpu.status.update_nz(cpu.a);
}

pub(crate) fn execute_sre<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    let shifted = modify(cpu, operand, shifts::lsr);
    cpu.a ^= shifted;
    cpu.status.update_nz(cpu.a);
}

/// ROR memory, then ADC the result using the carry the rotate produced.
pub(crate) fn execute_rra<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    let rotated = modify(cpu, operand, shifts::ror);
    add_with_carry(cpu, rotated);
}

pub(crate) fn execute_sax<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    cpu.memory.write(operand.address(), cpu.a & cpu.x);
}

pub(crate) fn execute_lax<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    let mut value = cpu.read_operand(operand);
    if operand.mode == AddressingMode::Immediate {
        value &= cpu.a | MAGIC;
    }
    cpu.a = value;
    cpu.x = value;
    cpu.status.update_nz(value);
}

pub(crate) fn execute_dcp<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    let value = step_memory(cpu, operand, -1);
    let a = cpu.a;
    compare(cpu, a, value);
}

pub(crate) fn execute_isc<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    let value = step_memory(cpu, operand, 1);
    subtract_with_borrow(cpu, value);
}

/// AND #imm, then copy N into C.
pub(crate) fn execute_anc<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    let value = cpu.read_operand(operand);
    cpu.a &= value;
    cpu.status.update_nz(cpu.a);
    cpu.status.update_carry(cpu.a & 0x80 != 0);
}

/// AND #imm, then LSR A.
pub(crate) fn execute_alr<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    let value = cpu.read_operand(operand) & cpu.a;
    let (result, carry) = shifts::lsr(value, false);
    cpu.a = result;
    cpu.status.update_carry(carry);
    cpu.status.update_nz(result);
}

/// AND #imm, then ROR A, with its own flag rules.
///
/// Binary: C = bit 6, V = bit 6 ^ bit 5 of the result. In decimal mode the
/// NMOS part also applies a nibble fix-up to each half.
pub(crate) fn execute_arr<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    let anded = cpu.read_operand(operand) & cpu.a;
    let carry_in = cpu.flag_c();
    let mut result = (anded >> 1) | ((carry_in as u8) << 7);

    cpu.status.update_nz(result);

    let decimal = cpu.config.decimal_mode && cpu.status.test_flag(Flags::DECIMAL);
    if !decimal {
        cpu.status.update_carry(result & 0x40 != 0);
        let overflow = ((result >> 6) ^ (result >> 5)) & 0x01 != 0;
        cpu.status.set_flag(Flags::OVERFLOW, overflow);
        cpu.a = result;
        return;
    }

    cpu.status.set_flag(Flags::OVERFLOW, (anded ^ result) & 0x40 != 0);

    let lo = anded & 0x0F;
    let hi = anded >> 4;
    if lo + (lo & 0x01) > 5 {
        result = (result & 0xF0) | (result.wrapping_add(6) & 0x0F);
    }
    let carry = hi + (hi & 0x01) > 5;
    if carry {
        result = result.wrapping_add(0x60);
    }
    cpu.status.update_carry(carry);
    cpu.a = result;
}

/// A = (A | MAGIC) & X & #imm.
pub(crate) fn execute_xaa<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    let value = cpu.read_operand(operand);
    cpu.a = (cpu.a | MAGIC) & cpu.x & value;
    cpu.status.update_nz(cpu.a);
}

/// X = (A & X) - #imm, C set when no borrow. Decimal mode is ignored.
pub(crate) fn execute_axs<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    let value = cpu.read_operand(operand);
    let anded = cpu.a & cpu.x;
    cpu.x = anded.wrapping_sub(value);
    cpu.status.update_carry(anded >= value);
    cpu.status.update_nz(cpu.x);
}

/// Stores `value & (H + 1)` where H is the high byte of the unindexed base
/// address. On a page crossing the stored value also replaces the high byte
/// of the target address.
fn store_high_and<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand, value: u8, index: u8) {
    let address = operand.address();
    let base = address.wrapping_sub(index as u16);
    let stored = value & ((base >> 8) as u8).wrapping_add(1);

    let address = if operand.page_crossed() {
        ((stored as u16) << 8) | (address & 0x00FF)
    } else {
        address
    };
    cpu.memory.write(address, stored);
}

pub(crate) fn execute_ahx<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    let value = cpu.a & cpu.x;
    let index = cpu.y;
    store_high_and(cpu, operand, value, index);
}

pub(crate) fn execute_shy<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    let (value, index) = (cpu.y, cpu.x);
    store_high_and(cpu, operand, value, index);
}

pub(crate) fn execute_shx<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    let (value, index) = (cpu.x, cpu.y);
    store_high_and(cpu, operand, value, index);
}

/// SP = A & X, then store like AHX.
pub(crate) fn execute_tas<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    cpu.sp = cpu.a & cpu.x;
    let (value, index) = (cpu.sp, cpu.y);
    store_high_and(cpu, operand, value, index);
}

/// A = X = SP = M & SP.
pub(crate) fn execute_las<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    let value = cpu.read_operand(operand) & cpu.sp;
    cpu.a = value;
    cpu.x = value;
    cpu.sp = value;
    cpu.status.update_nz(value);
}

#[cfg(test)]
mod tests {
    use crate::{FlatMemory, MemoryBus, CPU};

    fn run(program: &[u8], setup: impl FnOnce(&mut CPU<FlatMemory>)) -> CPU<FlatMemory> {
        let mut mem = FlatMemory::new();
        mem.load(0x0000, program);
        let mut cpu = CPU::new(mem);
        setup(&mut cpu);
        cpu.step().unwrap();
        cpu
    }

    #[test]
    fn test_lax_loads_both_registers() {
        let cpu = run(&[0xA7, 0x10], |cpu| cpu.memory_mut().write(0x0010, 0x8F));
        assert_eq!(cpu.a(), 0x8F);
        assert_eq!(cpu.x(), 0x8F);
        assert!(cpu.flag_n());
    }

    #[test]
    fn test_lax_immediate_uses_magic_constant() {
        let cpu = run(&[0xAB, 0xFF], |cpu| cpu.set_a(0x01));
        assert_eq!(cpu.a(), 0xEF);
        assert_eq!(cpu.x(), 0xEF);
    }

    #[test]
    fn test_sax_stores_a_and_x() {
        let cpu = run(&[0x87, 0x20], |cpu| {
            cpu.set_a(0xF0);
            cpu.set_x(0x3C);
        });
        assert_eq!(cpu.memory().read(0x0020), 0x30);
    }

    #[test]
    fn test_dcp_decrements_then_compares() {
        let cpu = run(&[0xC7, 0x10], |cpu| {
            cpu.memory_mut().write(0x0010, 0x43);
            cpu.set_a(0x42);
        });
        assert_eq!(cpu.memory().read(0x0010), 0x42);
        assert!(cpu.flag_z());
        assert!(cpu.flag_c());
    }

    #[test]
    fn test_isc_increments_then_subtracts() {
        let cpu = run(&[0xE7, 0x10], |cpu| {
            cpu.memory_mut().write(0x0010, 0x0F);
            cpu.set_a(0x20);
            cpu.set_flag_c(true);
        });
        assert_eq!(cpu.memory().read(0x0010), 0x10);
        assert_eq!(cpu.a(), 0x10);
    }

    #[test]
    fn test_slo_shifts_then_ors() {
        let cpu = run(&[0x07, 0x10], |cpu| {
            cpu.memory_mut().write(0x0010, 0x81);
            cpu.set_a(0x01);
        });
        assert_eq!(cpu.memory().read(0x0010), 0x02);
        assert_eq!(cpu.a(), 0x03);
        assert!(cpu.flag_c());
    }

    #[test]
    fn test_axs_subtracts_from_a_and_x() {
        let cpu = run(&[0xCB, 0x02], |cpu| {
            cpu.set_a(0x0F);
            cpu.set_x(0x07);
        });
        assert_eq!(cpu.x(), 0x05);
        assert!(cpu.flag_c());
    }

    #[test]
    fn test_arr_binary_flags() {
        let cpu = run(&[0x6B, 0xFF], |cpu| {
            cpu.set_a(0xC0);
            cpu.set_flag_c(false);
        });
        assert_eq!(cpu.a(), 0x60);
        assert!(cpu.flag_c());
        assert!(!cpu.flag_v());
    }

    #[test]
    fn test_shy_masks_with_base_high_byte() {
        // SHY $1200,X with X=0x10 stores Y & 0x13
        let cpu = run(&[0x9C, 0x00, 0x12], |cpu| {
            cpu.set_x(0x10);
            cpu.set_y(0xFF);
        });
        assert_eq!(cpu.memory().read(0x1210), 0x13);
    }
}
