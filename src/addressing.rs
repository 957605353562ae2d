//! # Addressing Modes
//!
//! This module defines the 13 addressing modes supported by the 6502 processor
//! and the resolver that turns an addressing mode plus the bytes following the
//! opcode into an effective address.
//!
//! All byte arithmetic wraps modulo 256 and all word arithmetic wraps modulo
//! 65536, exactly as the address lines of the real part do.

/// 6502 addressing mode enumeration.
///
/// The addressing mode determines how the CPU interprets the operand bytes
/// that follow an opcode and how it calculates the effective memory address
/// for the operation.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implied, Accumulator
/// - **1 byte**: Immediate, ZeroPage, ZeroPageX, ZeroPageY, Relative, IndirectX, IndirectY
/// - **2 bytes**: Absolute, AbsoluteX, AbsoluteY, Indirect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AddressingMode {
    /// No operand, operation implied by instruction.
    ///
    /// Examples: CLC, RTS, NOP
    Implied,

    /// Operates directly on the accumulator register.
    ///
    /// Examples: LSR A, ROL A, ASL A
    Accumulator,

    /// 8-bit constant operand in instruction.
    ///
    /// Example: LDA #$10
    Immediate,

    /// Signed 8-bit offset for branch instructions, relative to the address
    /// of the following instruction.
    Relative,

    /// 8-bit address in zero page (0x00-0xFF).
    ZeroPage,

    /// Zero page address indexed by X. Wraps within zero page.
    ZeroPageX,

    /// Zero page address indexed by Y. Wraps within zero page.
    ZeroPageY,

    /// Full 16-bit address.
    Absolute,

    /// 16-bit address indexed by X register.
    ///
    /// May incur +1 cycle penalty if page boundary is crossed.
    AbsoluteX,

    /// 16-bit address indexed by Y register.
    ///
    /// May incur +1 cycle penalty if page boundary is crossed.
    AbsoluteY,

    /// Indirect jump through 16-bit pointer. Only used by JMP.
    ///
    /// Reproduces the page-wrap bug: JMP ($10FF) reads the high byte
    /// from $1000, not $1100.
    Indirect,

    /// Indexed indirect: (ZP + X) then dereference.
    ///
    /// Example: LDA ($40,X)
    IndirectX,

    /// Indirect indexed: ZP dereference then + Y.
    ///
    /// Example: LDA ($40),Y
    /// May incur +1 cycle penalty if page boundary is crossed.
    IndirectY,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode.
    pub const fn operand_bytes(self) -> u8 {
        match self {
            AddressingMode::Implied | AddressingMode::Accumulator => 0,
            AddressingMode::Immediate
            | AddressingMode::Relative
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::IndirectX
            | AddressingMode::IndirectY => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
        }
    }

    /// Total instruction length including the opcode byte (1-3).
    pub const fn instruction_len(self) -> u8 {
        1 + self.operand_bytes()
    }

    /// Returns true if this mode designates a memory location.
    pub const fn touches_memory(self) -> bool {
        !matches!(self, AddressingMode::Implied | AddressingMode::Accumulator)
    }
}

/// The result of resolving an addressing mode for one instruction.
///
/// Transient: produced while executing an instruction and consumed by its
/// handler immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectiveAddress {
    /// Final address the instruction operates on.
    ///
    /// For Immediate mode this is the address of the literal byte, so that
    /// reading it yields the operand value.
    pub address: u16,

    /// True if indexing (or a taken branch) moved the address to a
    /// different 256-byte page than the base.
    pub page_crossed: bool,
}

impl EffectiveAddress {
    const fn new(address: u16, page_crossed: bool) -> Self {
        Self {
            address,
            page_crossed,
        }
    }

    fn indexed(base: u16, index: u8) -> Self {
        let address = base.wrapping_add(index as u16);
        Self::new(address, crosses_page(base, address))
    }
}

/// Returns true if `a` and `b` lie in different 256-byte pages.
#[inline]
pub fn crosses_page(a: u16, b: u16) -> bool {
    (a & 0xFF00) != (b & 0xFF00)
}

/// Reads a little-endian word from zero page, wrapping the high byte
/// fetch from 0xFF back to 0x00.
fn read_zero_page_word<F: Fn(u16) -> u8>(fetch: &F, pointer: u8) -> u16 {
    let lo = fetch(pointer as u16) as u16;
    let hi = fetch(pointer.wrapping_add(1) as u16) as u16;
    (hi << 8) | lo
}

/// Resolves the effective address for `mode`.
///
/// `pc` is the address of the opcode byte. `fetch` reads memory without
/// side effects; indirect modes call it twice to assemble a pointer.
///
/// Returns `None` for Implied and Accumulator modes, which have no memory
/// operand.
///
/// # Examples
///
/// ```
/// use mos65xx::addressing::{resolve, AddressingMode};
///
/// // LDA $FF,X with X = 0x02 wraps inside zero page
/// let bytes = [0xB5u8, 0xFF];
/// let ea = resolve(AddressingMode::ZeroPageX, 0x0000, 0x02, 0x00, |addr| {
///     bytes.get(addr as usize).copied().unwrap_or(0)
/// })
/// .unwrap();
/// assert_eq!(ea.address, 0x0001);
/// assert!(!ea.page_crossed);
/// ```
pub fn resolve<F>(mode: AddressingMode, pc: u16, x: u8, y: u8, fetch: F) -> Option<EffectiveAddress>
where
    F: Fn(u16) -> u8,
{
    let operand_addr = pc.wrapping_add(1);
    let byte = || fetch(operand_addr);
    let word = || {
        let lo = fetch(operand_addr) as u16;
        let hi = fetch(operand_addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    };

    let resolved = match mode {
        AddressingMode::Implied | AddressingMode::Accumulator => return None,
        AddressingMode::Immediate => EffectiveAddress::new(operand_addr, false),
        AddressingMode::Relative => {
            let next = pc.wrapping_add(mode.instruction_len() as u16);
            let offset = byte() as i8;
            let target = next.wrapping_add_signed(offset as i16);
            EffectiveAddress::new(target, crosses_page(next, target))
        }
        AddressingMode::ZeroPage => EffectiveAddress::new(byte() as u16, false),
        AddressingMode::ZeroPageX => EffectiveAddress::new(byte().wrapping_add(x) as u16, false),
        AddressingMode::ZeroPageY => EffectiveAddress::new(byte().wrapping_add(y) as u16, false),
        AddressingMode::Absolute => EffectiveAddress::new(word(), false),
        AddressingMode::AbsoluteX => EffectiveAddress::indexed(word(), x),
        AddressingMode::AbsoluteY => EffectiveAddress::indexed(word(), y),
        AddressingMode::Indirect => {
            let pointer = word();
            let lo = fetch(pointer) as u16;
            // High byte never carries into the next page
            let hi_addr = (pointer & 0xFF00) | (pointer.wrapping_add(1) & 0x00FF);
            let hi = fetch(hi_addr) as u16;
            EffectiveAddress::new((hi << 8) | lo, false)
        }
        AddressingMode::IndirectX => {
            let pointer = byte().wrapping_add(x);
            EffectiveAddress::new(read_zero_page_word(&fetch, pointer), false)
        }
        AddressingMode::IndirectY => {
            let base = read_zero_page_word(&fetch, byte());
            EffectiveAddress::indexed(base, y)
        }
    };

    Some(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_with(entries: &[(u16, u8)]) -> impl Fn(u16) -> u8 + '_ {
        move |addr| {
            entries
                .iter()
                .find(|(a, _)| *a == addr)
                .map(|(_, v)| *v)
                .unwrap_or(0)
        }
    }

    #[test]
    fn test_instruction_lengths() {
        assert_eq!(AddressingMode::Implied.instruction_len(), 1);
        assert_eq!(AddressingMode::Accumulator.instruction_len(), 1);
        assert_eq!(AddressingMode::Immediate.instruction_len(), 2);
        assert_eq!(AddressingMode::IndirectY.instruction_len(), 2);
        assert_eq!(AddressingMode::Indirect.instruction_len(), 3);
        assert_eq!(AddressingMode::AbsoluteX.instruction_len(), 3);
    }

    #[test]
    fn test_implied_has_no_address() {
        let fetch = memory_with(&[]);
        assert_eq!(resolve(AddressingMode::Implied, 0x8000, 0, 0, &fetch), None);
        assert_eq!(resolve(AddressingMode::Accumulator, 0x8000, 0, 0, &fetch), None);
    }

    #[test]
    fn test_immediate_points_at_literal() {
        let fetch = memory_with(&[(0x8001, 0x42)]);
        let ea = resolve(AddressingMode::Immediate, 0x8000, 0, 0, &fetch).unwrap();
        assert_eq!(ea.address, 0x8001);
    }

    #[test]
    fn test_absolute_x_page_cross() {
        let fetch = memory_with(&[(0x8001, 0xF0), (0x8002, 0x12)]);
        let ea = resolve(AddressingMode::AbsoluteX, 0x8000, 0x20, 0, &fetch).unwrap();
        assert_eq!(ea.address, 0x1310);
        assert!(ea.page_crossed);

        let ea = resolve(AddressingMode::AbsoluteX, 0x8000, 0x0F, 0, &fetch).unwrap();
        assert_eq!(ea.address, 0x12FF);
        assert!(!ea.page_crossed);
    }

    #[test]
    fn test_absolute_y_wraps_address_space() {
        let fetch = memory_with(&[(0x8001, 0xFF), (0x8002, 0xFF)]);
        let ea = resolve(AddressingMode::AbsoluteY, 0x8000, 0, 0x02, &fetch).unwrap();
        assert_eq!(ea.address, 0x0001);
        assert!(ea.page_crossed);
    }

    #[test]
    fn test_indirect_page_wrap_bug() {
        let fetch = memory_with(&[
            (0x8001, 0xFF),
            (0x8002, 0x30),
            (0x30FF, 0x80),
            (0x3000, 0x40),
            (0x3100, 0x50),
        ]);
        let ea = resolve(AddressingMode::Indirect, 0x8000, 0, 0, &fetch).unwrap();
        assert_eq!(ea.address, 0x4080);
    }

    #[test]
    fn test_indirect_x_wraps_pointer_in_zero_page() {
        // ($FE,X) with X=1 -> pointer at $FF, high byte from $00
        let fetch = memory_with(&[(0x8001, 0xFE), (0x00FF, 0x34), (0x0000, 0x12)]);
        let ea = resolve(AddressingMode::IndirectX, 0x8000, 0x01, 0, &fetch).unwrap();
        assert_eq!(ea.address, 0x1234);
    }

    #[test]
    fn test_indirect_y_page_cross() {
        let fetch = memory_with(&[(0x8001, 0x40), (0x0040, 0xFF), (0x0041, 0x20)]);
        let ea = resolve(AddressingMode::IndirectY, 0x8000, 0, 0x01, &fetch).unwrap();
        assert_eq!(ea.address, 0x2100);
        assert!(ea.page_crossed);
    }

    #[test]
    fn test_relative_backward_across_page() {
        // Branch at 0x8100 with offset -4 -> next = 0x8102, target = 0x80FE
        let fetch = memory_with(&[(0x8101, 0xFC)]);
        let ea = resolve(AddressingMode::Relative, 0x8100, 0, 0, &fetch).unwrap();
        assert_eq!(ea.address, 0x80FE);
        assert!(ea.page_crossed);
    }
}
