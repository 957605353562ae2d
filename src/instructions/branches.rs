//! # Branch Instructions
//!
//! This module implements the conditional branch operations:
//! - BCC/BCS: Branch on Carry Clear/Set
//! - BNE/BEQ: Branch on Zero Clear/Set
//! - BPL/BMI: Branch on Negative Clear/Set
//! - BVC/BVS: Branch on Overflow Clear/Set
//!
//! All branch instructions use relative addressing with a signed 8-bit offset
//! measured from the address of the next instruction.
//!
//! Cycle timing:
//! - 2 cycles if branch not taken
//! - 3 cycles if branch taken to same page
//! - 4 cycles if branch taken to different page
//!
//! No flags are affected.

use super::Operand;
use crate::status::Flags;
use crate::{MemoryBus, CPU};

/// Branches when `flag` equals `expected`. Returns the extra cycles.
pub(crate) fn branch_on<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: Operand,
    flag: Flags,
    expected: bool,
) -> u8 {
    if cpu.status.test_flag(flag) != expected {
        return 0;
    }

    // The resolver already measured the target against the next instruction
    cpu.pc = operand.address();

    if operand.page_crossed() {
        2
    } else {
        1
    }
}
