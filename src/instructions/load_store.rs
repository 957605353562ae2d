//! # Load and Store Instructions
//!
//! - LDA, LDX, LDY: load a register from memory, updating N and Z
//! - STA, STX, STY: store a register to memory, no flags affected

use super::Operand;
use crate::{MemoryBus, CPU};

pub(crate) fn execute_lda<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    cpu.a = cpu.read_operand(operand);
    cpu.status.update_nz(cpu.a);
}

pub(crate) fn execute_ldx<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    cpu.x = cpu.read_operand(operand);
    cpu.status.update_nz(cpu.x);
}

pub(crate) fn execute_ldy<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    cpu.y = cpu.read_operand(operand);
    cpu.status.update_nz(cpu.y);
}

pub(crate) fn execute_sta<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    cpu.memory.write(operand.address(), cpu.a);
}

pub(crate) fn execute_stx<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    cpu.memory.write(operand.address(), cpu.x);
}

pub(crate) fn execute_sty<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    cpu.memory.write(operand.address(), cpu.y);
}
