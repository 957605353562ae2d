//! # Control Flow Instructions
//!
//! This module implements control flow operations:
//! - BRK: Force Interrupt
//! - JMP: Jump to address (absolute or indirect)
//! - JSR/RTS: Subroutine call and return
//! - RTI: Return from interrupt
//! - NOP: No operation, including the undocumented multi-byte variants
//!
//! BRK is a software interrupt that:
//! 1. Sets the B flag
//! 2. Pushes PC+2 to the stack (high byte first, then low byte)
//! 3. Pushes processor status to stack with B flag set
//! 4. Sets the I (interrupt disable) flag
//! 5. Loads PC from IRQ vector at $FFFE/F

use super::Operand;
use crate::interrupts::{self, Interrupt};
use crate::{MemoryBus, CPU};

/// Executes the BRK (Force Interrupt) instruction.
///
/// The engine has already advanced PC by one; the byte after BRK is a
/// padding byte, so the pushed return address is the opcode address + 2.
///
/// Cycle timing: 7 cycles (fixed)
pub(crate) fn execute_brk<M: MemoryBus>(cpu: &mut CPU<M>) {
    let return_address = cpu.pc.wrapping_add(1);
    interrupts::enter(cpu, Interrupt::Brk, return_address);
}

/// Executes the JMP (Jump) instruction.
///
/// The resolver has already followed the pointer for JMP (ind), including the
/// page-wrap bug: JMP ($10FF) reads from $10FF and $1000 (not $1100).
pub(crate) fn execute_jmp<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    cpu.pc = operand.address();
}

/// Executes the JSR (Jump to Subroutine) instruction.
///
/// Pushes the address of the last byte of the JSR instruction (return
/// address - 1), high byte first, then jumps.
pub(crate) fn execute_jsr<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    let return_address = cpu.pc.wrapping_sub(1);
    cpu.push_word(return_address);
    cpu.pc = operand.address();
}

/// Executes the RTS (Return from Subroutine) instruction.
pub(crate) fn execute_rts<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.pc = cpu.pull_word().wrapping_add(1);
}

/// Executes the RTI (Return from Interrupt) instruction.
///
/// Pulls status (ignoring B and bit 5) then PC. Unlike RTS, the pulled PC
/// is used as-is.
pub(crate) fn execute_rti<M: MemoryBus>(cpu: &mut CPU<M>) {
    let status = cpu.pull();
    cpu.status.load_pulled(status);
    cpu.pc = cpu.pull_word();
}

/// Executes NOP and its undocumented variants.
///
/// The multi-byte variants still perform their operand read, which matters
/// for memory-mapped I/O with read side effects.
pub(crate) fn execute_nop<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    if let Some(target) = operand.target {
        cpu.memory.read(target.address);
    }
}
