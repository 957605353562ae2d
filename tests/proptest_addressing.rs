//! Property-based tests for effective address resolution.

use mos65xx::{resolve, AddressingMode, FlatMemory, MemoryBus, CPU};
use proptest::prelude::*;

/// Memory with `bytes` at `pc`, read through the resolver's fetch closure.
fn memory_with(pc: u16, bytes: &[u8]) -> FlatMemory {
    let mut memory = FlatMemory::new();
    memory.load(pc, bytes);
    memory
}

proptest! {
    /// Zero page indexing wraps within page zero
    #[test]
    fn prop_zero_page_indexed_wraps(base in any::<u8>(), index in any::<u8>()) {
        let memory = memory_with(0x8000, &[0xB5, base]);
        let fetch = |addr| memory.read(addr);

        let x = resolve(AddressingMode::ZeroPageX, 0x8000, index, 0, fetch).unwrap();
        prop_assert_eq!(x.address, base.wrapping_add(index) as u16);
        prop_assert!(!x.page_crossed);

        let y = resolve(AddressingMode::ZeroPageY, 0x8000, 0, index, fetch).unwrap();
        prop_assert_eq!(y.address, base.wrapping_add(index) as u16);
    }

    /// Absolute indexing wraps at 64K and flags page crossings
    #[test]
    fn prop_absolute_indexed(base in any::<u16>(), index in any::<u8>()) {
        let memory = memory_with(0x8000, &[0xBD, base as u8, (base >> 8) as u8]);
        let fetch = |addr| memory.read(addr);

        let ea = resolve(AddressingMode::AbsoluteX, 0x8000, index, 0, fetch).unwrap();
        let expected = base.wrapping_add(index as u16);
        prop_assert_eq!(ea.address, expected);
        prop_assert_eq!(ea.page_crossed, (base & 0xFF00) != (expected & 0xFF00));
    }

    /// (zp,X) reads its pointer from page zero, wrapping at 0xFF
    #[test]
    fn prop_indexed_indirect_pointer_wraps(zp in any::<u8>(), x in any::<u8>(), target in any::<u16>()) {
        let mut memory = memory_with(0x8000, &[0xA1, zp]);
        let pointer = zp.wrapping_add(x);
        memory.write(pointer as u16, target as u8);
        memory.write(pointer.wrapping_add(1) as u16, (target >> 8) as u8);

        let ea = resolve(AddressingMode::IndirectX, 0x8000, x, 0, |addr| memory.read(addr)).unwrap();
        prop_assert_eq!(ea.address, target);
        prop_assert!(!ea.page_crossed);
    }

    /// (zp),Y adds Y after the pointer is read and flags page crossings
    #[test]
    fn prop_indirect_indexed(zp in any::<u8>(), y in any::<u8>(), base in any::<u16>()) {
        let mut memory = memory_with(0x8000, &[0xB1, zp]);
        memory.write(zp as u16, base as u8);
        memory.write(zp.wrapping_add(1) as u16, (base >> 8) as u8);

        let ea = resolve(AddressingMode::IndirectY, 0x8000, 0, y, |addr| memory.read(addr)).unwrap();
        let expected = base.wrapping_add(y as u16);
        prop_assert_eq!(ea.address, expected);
        prop_assert_eq!(ea.page_crossed, (base & 0xFF00) != (expected & 0xFF00));
    }

    /// JMP ($xxFF) fetches its high byte from the start of the same page
    #[test]
    fn prop_indirect_jump_page_bug(page in 0x02u8..0x7F, lo in any::<u8>(), hi in any::<u8>()) {
        let pointer = (page as u16) << 8 | 0xFF;
        let mut memory = memory_with(0x8000, &[0x6C, 0xFF, page]);
        memory.write(pointer, lo);
        memory.write(pointer & 0xFF00, hi);
        memory.write(pointer.wrapping_add(1), !hi);

        let ea = resolve(AddressingMode::Indirect, 0x8000, 0, 0, |addr| memory.read(addr)).unwrap();
        prop_assert_eq!(ea.address, (hi as u16) << 8 | lo as u16);
    }

    /// Branch targets are relative to the following instruction
    #[test]
    fn prop_relative_target(pc in any::<u16>(), offset in any::<u8>()) {
        let memory = memory_with(pc, &[0xD0, offset]);
        let ea = resolve(AddressingMode::Relative, pc, 0, 0, |addr| memory.read(addr)).unwrap();

        let next = pc.wrapping_add(2);
        let expected = next.wrapping_add_signed(offset as i8 as i16);
        prop_assert_eq!(ea.address, expected);
        prop_assert_eq!(ea.page_crossed, (next & 0xFF00) != (expected & 0xFF00));
    }

    /// LDA abs,X costs one extra cycle exactly when the index crosses a page
    #[test]
    fn prop_page_penalty_cycles(base in 0x0200u16..0x7F00, x in any::<u8>()) {
        let mut memory = FlatMemory::new();
        memory.write(0xFFFC, 0x00);
        memory.write(0xFFFD, 0x80);
        memory.load(0x8000, &[0xBD, base as u8, (base >> 8) as u8]);
        let mut cpu = CPU::new(memory);
        cpu.set_x(x);

        let crossed = (base & 0xFF00) != (base.wrapping_add(x as u16) & 0xFF00);
        prop_assert_eq!(cpu.step().unwrap(), 4 + crossed as u8);
    }

    /// Stores never take the page penalty
    #[test]
    fn prop_store_has_fixed_cost(base in 0x0200u16..0x7F00, y in any::<u8>()) {
        let mut memory = FlatMemory::new();
        memory.write(0xFFFC, 0x00);
        memory.write(0xFFFD, 0x80);
        memory.load(0x8000, &[0x99, base as u8, (base >> 8) as u8]); // STA abs,Y
        let mut cpu = CPU::new(memory);
        cpu.set_a(0x5A);
        cpu.set_y(y);

        prop_assert_eq!(cpu.step().unwrap(), 5);
        prop_assert_eq!(cpu.memory().read(base.wrapping_add(y as u16)), 0x5A);
    }
}

#[test]
fn test_implied_and_accumulator_have_no_address() {
    let memory = FlatMemory::new();
    let fetch = |addr| memory.read(addr);
    assert!(resolve(AddressingMode::Implied, 0x8000, 0, 0, fetch).is_none());
    assert!(resolve(AddressingMode::Accumulator, 0x8000, 0, 0, fetch).is_none());
}
