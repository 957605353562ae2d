//! # Stack Instructions
//!
//! This module implements stack push and pull operations:
//! - PHA: Push Accumulator
//! - PHP: Push Processor Status (B and bit 5 set in the pushed copy)
//! - PLA: Pull Accumulator (updates N and Z)
//! - PLP: Pull Processor Status (B and bit 5 of the pulled byte ignored)
//!
//! The stack lives in page one (0x0100-0x01FF) and grows downward. SP wraps
//! within the page in both directions.

use crate::{MemoryBus, CPU};

pub(crate) fn execute_pha<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.push(cpu.a);
}

pub(crate) fn execute_php<M: MemoryBus>(cpu: &mut CPU<M>) {
    let pushed = cpu.status.to_pushed(true);
    cpu.push(pushed);
}

pub(crate) fn execute_pla<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.a = cpu.pull();
    cpu.status.update_nz(cpu.a);
}

pub(crate) fn execute_plp<M: MemoryBus>(cpu: &mut CPU<M>) {
    let pulled = cpu.pull();
    cpu.status.load_pulled(pulled);
}

#[cfg(test)]
mod tests {
    use crate::{FlatMemory, MemoryBus, CPU};

    #[test]
    fn test_php_sets_break_in_pushed_copy() {
        let mut mem = FlatMemory::new();
        mem.load(0x0000, &[0x08]); // PHP
        let mut cpu = CPU::new(mem);
        cpu.set_status(0x20);

        cpu.step().unwrap();

        assert_eq!(cpu.memory().read(0x01FD), 0x30);
        assert_eq!(cpu.sp(), 0xFC);
    }

    #[test]
    fn test_pla_sets_flags() {
        let mut mem = FlatMemory::new();
        mem.load(0x0000, &[0x68]); // PLA
        mem.write(0x01FE, 0x80);
        let mut cpu = CPU::new(mem);

        cpu.step().unwrap();

        assert_eq!(cpu.a(), 0x80);
        assert!(cpu.flag_n());
        assert!(!cpu.flag_z());
        assert_eq!(cpu.sp(), 0xFE);
    }
}
