//! # Processor Status Register
//!
//! The 6502 status register packs seven flags into one byte (NV-BDIZC).
//! Bit 5 has no flag behind it and always reads back as 1.
//!
//! The B flag only exists in copies of the register pushed to the stack;
//! it is kept here so a pushed or pulled byte round-trips, but hardware
//! interrupts never set it on the live register.

use bitflags::bitflags;

bitflags! {
    /// Individual status flags, one bit each.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Flags: u8 {
        const CARRY = 0b0000_0001;
        const ZERO = 0b0000_0010;
        const INTERRUPT_DISABLE = 0b0000_0100;
        const DECIMAL = 0b0000_1000;
        const BREAK = 0b0001_0000;
        const UNUSED = 0b0010_0000;
        const OVERFLOW = 0b0100_0000;
        const NEGATIVE = 0b1000_0000;
    }
}

impl Flags {
    /// Flags touched by an N/Z update.
    pub const NZ: Flags = Flags::NEGATIVE.union(Flags::ZERO);

    /// Flags touched by a compare (N, Z, C).
    pub const NZC: Flags = Flags::NZ.union(Flags::CARRY);

    /// Flags touched by ADC/SBC (N, V, Z, C).
    pub const NVZC: Flags = Flags::NZC.union(Flags::OVERFLOW);

    /// Every real flag (bit 5 excluded).
    pub const ALL: Flags = Flags::NVZC
        .union(Flags::BREAK)
        .union(Flags::DECIMAL)
        .union(Flags::INTERRUPT_DISABLE);
}

/// Power-on value of the status register: I set, bit 5 and B set (0x34).
pub const RESET_STATUS: u8 = 0x34;

/// The processor status register.
///
/// # Examples
///
/// ```
/// use mos65xx::{Flags, StatusRegister};
///
/// let mut p = StatusRegister::default();
/// p.update_nz(0x80);
/// assert!(p.test_flag(Flags::NEGATIVE));
/// assert!(!p.test_flag(Flags::ZERO));
/// assert_eq!(p.bits() & 0x20, 0x20); // bit 5 always reads as 1
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusRegister {
    flags: Flags,
}

impl StatusRegister {
    /// Creates a register from a raw byte. Bit 5 is forced on.
    pub fn from_bits(bits: u8) -> Self {
        Self {
            flags: Flags::from_bits_retain(bits) | Flags::UNUSED,
        }
    }

    /// Returns the packed byte. Bit 5 is always 1.
    pub fn bits(&self) -> u8 {
        (self.flags | Flags::UNUSED).bits()
    }

    /// Byte pushed to the stack by PHP/BRK/IRQ/NMI.
    ///
    /// `brk` selects the B bit of the pushed copy only.
    pub fn to_pushed(&self, brk: bool) -> u8 {
        let mut flags = self.flags | Flags::UNUSED;
        flags.set(Flags::BREAK, brk);
        flags.bits()
    }

    /// Loads a byte pulled from the stack by PLP/RTI.
    ///
    /// The B bit and bit 5 of the pulled byte are not latched.
    pub fn load_pulled(&mut self, bits: u8) {
        let pulled = Flags::from_bits_retain(bits) - Flags::BREAK;
        self.flags = pulled | Flags::UNUSED | (self.flags & Flags::BREAK);
    }

    pub fn set_flag(&mut self, flag: Flags, value: bool) {
        self.flags.set(flag, value);
    }

    pub fn test_flag(&self, flag: Flags) -> bool {
        self.flags.contains(flag)
    }

    /// Sets Negative from bit 7 and Zero from `value == 0`.
    #[inline]
    pub fn update_nz(&mut self, value: u8) {
        self.flags.set(Flags::ZERO, value == 0);
        self.flags.set(Flags::NEGATIVE, value & 0x80 != 0);
    }

    #[inline]
    pub fn update_carry(&mut self, carry: bool) {
        self.flags.set(Flags::CARRY, carry);
    }

    /// Signed overflow of `lhs + rhs` producing `result`.
    ///
    /// Overflow iff both operands share a sign that differs from the
    /// sign of the result. For subtraction pass the complemented operand.
    #[inline]
    pub fn update_overflow(&mut self, result: u16, lhs: u8, rhs: u8) {
        let result = result as u8;
        let overflow = (lhs ^ result) & (rhs ^ result) & 0x80 != 0;
        self.flags.set(Flags::OVERFLOW, overflow);
    }

    /// Carry flag as 0 or 1.
    #[inline]
    pub fn carry_bit(&self) -> u8 {
        self.flags.contains(Flags::CARRY) as u8
    }

    pub fn flags(&self) -> Flags {
        self.flags | Flags::UNUSED
    }
}

impl Default for StatusRegister {
    fn default() -> Self {
        Self::from_bits(RESET_STATUS)
    }
}
