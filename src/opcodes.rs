//! # Opcode Metadata Table
//!
//! This module contains the complete 256-entry opcode table that serves as the
//! single source of truth for 6502 instruction decoding.
//!
//! The table covers:
//! - **151 documented instructions** - Official NMOS 6502 opcodes
//! - **105 undocumented opcodes** - Stable and unstable NMOS side effects,
//!   NOP variants, and the twelve KIL opcodes that lock up the processor
//!
//! Each entry records the mnemonic, addressing mode, base cycle cost, whether
//! an indexed page crossing adds a cycle, whether the opcode is undocumented,
//! and the set of status flags the instruction can modify.
//!
//! The page penalty is recorded per opcode rather than per addressing mode:
//! stores and read-modify-write instructions always take the long path, so
//! `STA $1234,X` and `ASL $1234,X` never pay the extra cycle even though
//! they index.

use std::fmt;

use crate::addressing::AddressingMode;
use crate::status::Flags;

/// Instruction mnemonics, documented and undocumented.
///
/// One variant per operation, not per encoding. Alternate encodings of the
/// same operation (the extra SBC at 0xEB, the multi-byte NOPs, the twelve
/// KIL opcodes) share a variant and differ only in their table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mnemonic {
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,

    // Undocumented
    /// ASL memory, then ORA.
    Slo,
    /// ROL memory, then AND.
    Rla,
    /// LSR memory, then EOR.
    Sre,
    /// ROR memory, then ADC.
    Rra,
    /// Store A & X.
    Sax,
    /// Load A and X.
    Lax,
    /// DEC memory, then CMP.
    Dcp,
    /// INC memory, then SBC.
    Isc,
    /// AND immediate, copy N into C.
    Anc,
    /// AND immediate, then LSR A.
    Alr,
    /// AND immediate, then ROR A with odd flags.
    Arr,
    /// Unstable: A = (A | magic) & X & imm. Also known as ANE.
    Xaa,
    /// X = (A & X) - imm. Also known as SBX.
    Axs,
    /// Store A & X & (H+1). Also known as SHA.
    Ahx,
    /// Store Y & (H+1).
    Shy,
    /// Store X & (H+1).
    Shx,
    /// SP = A & X, then store SP & (H+1).
    Tas,
    /// A, X, SP = memory & SP.
    Las,
    /// Locks the processor. Also known as JAM or HLT.
    Kil,
}

impl Mnemonic {
    /// Three-letter assembler name.
    pub const fn as_str(self) -> &'static str {
        use Mnemonic::*;
        match self {
            Adc => "ADC",
            And => "AND",
            Asl => "ASL",
            Bcc => "BCC",
            Bcs => "BCS",
            Beq => "BEQ",
            Bit => "BIT",
            Bmi => "BMI",
            Bne => "BNE",
            Bpl => "BPL",
            Brk => "BRK",
            Bvc => "BVC",
            Bvs => "BVS",
            Clc => "CLC",
            Cld => "CLD",
            Cli => "CLI",
            Clv => "CLV",
            Cmp => "CMP",
            Cpx => "CPX",
            Cpy => "CPY",
            Dec => "DEC",
            Dex => "DEX",
            Dey => "DEY",
            Eor => "EOR",
            Inc => "INC",
            Inx => "INX",
            Iny => "INY",
            Jmp => "JMP",
            Jsr => "JSR",
            Lda => "LDA",
            Ldx => "LDX",
            Ldy => "LDY",
            Lsr => "LSR",
            Nop => "NOP",
            Ora => "ORA",
            Pha => "PHA",
            Php => "PHP",
            Pla => "PLA",
            Plp => "PLP",
            Rol => "ROL",
            Ror => "ROR",
            Rti => "RTI",
            Rts => "RTS",
            Sbc => "SBC",
            Sec => "SEC",
            Sed => "SED",
            Sei => "SEI",
            Sta => "STA",
            Stx => "STX",
            Sty => "STY",
            Tax => "TAX",
            Tay => "TAY",
            Tsx => "TSX",
            Txa => "TXA",
            Txs => "TXS",
            Tya => "TYA",
            Slo => "SLO",
            Rla => "RLA",
            Sre => "SRE",
            Rra => "RRA",
            Sax => "SAX",
            Lax => "LAX",
            Dcp => "DCP",
            Isc => "ISC",
            Anc => "ANC",
            Alr => "ALR",
            Arr => "ARR",
            Xaa => "XAA",
            Axs => "AXS",
            Ahx => "AHX",
            Shy => "SHY",
            Shx => "SHX",
            Tas => "TAS",
            Las => "LAS",
            Kil => "KIL",
        }
    }

    /// Status flags this instruction may modify.
    pub const fn affected_flags(self) -> Flags {
        use Mnemonic::*;
        match self {
            Adc | Sbc | Rra | Isc | Arr => Flags::NVZC,
            And | Ora | Eor | Dec | Dex | Dey | Inc | Inx | Iny | Lda | Ldx | Ldy | Pla | Tax
            | Tay | Tsx | Txa | Tya | Lax | Las | Xaa => Flags::NZ,
            Asl | Lsr | Rol | Ror | Cmp | Cpx | Cpy | Slo | Rla | Sre | Dcp | Anc | Alr | Axs => {
                Flags::NZC
            }
            Bit => Flags::NEGATIVE.union(Flags::OVERFLOW).union(Flags::ZERO),
            Brk => Flags::BREAK.union(Flags::INTERRUPT_DISABLE),
            Clc | Sec => Flags::CARRY,
            Cld | Sed => Flags::DECIMAL,
            Cli | Sei => Flags::INTERRUPT_DISABLE,
            Clv => Flags::OVERFLOW,
            Plp | Rti => Flags::ALL,
            Bcc | Bcs | Beq | Bmi | Bne | Bpl | Bvc | Bvs | Jmp | Jsr | Rts | Nop | Pha | Php
            | Sta | Stx | Sty | Txs | Sax | Ahx | Shy | Shx | Tas | Kil => Flags::empty(),
        }
    }

    /// Conditional branches (relative addressing, taken/page penalties).
    pub const fn is_branch(self) -> bool {
        use Mnemonic::*;
        matches!(self, Bcc | Bcs | Beq | Bmi | Bne | Bpl | Bvc | Bvs)
    }

    /// Instructions that load PC themselves rather than falling through.
    pub const fn is_control_flow(self) -> bool {
        use Mnemonic::*;
        self.is_branch() || matches!(self, Jmp | Jsr | Rts | Rti | Brk)
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata for a single 6502 opcode.
///
/// # Examples
///
/// ```
/// use mos65xx::{lookup, AddressingMode, Mnemonic};
///
/// let lda_imm = lookup(0xA9);
/// assert_eq!(lda_imm.mnemonic, Mnemonic::Lda);
/// assert_eq!(lda_imm.addressing_mode, AddressingMode::Immediate);
/// assert_eq!(lda_imm.base_cycles, 2);
/// assert_eq!(lda_imm.size_bytes(), 2);
/// assert!(!lda_imm.illegal);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    /// The opcode byte itself.
    pub code: u8,

    pub mnemonic: Mnemonic,

    pub addressing_mode: AddressingMode,

    /// Documented minimum cycle cost, before page or branch penalties.
    ///
    /// KIL opcodes never complete and carry 0.
    pub base_cycles: u8,

    /// One extra cycle when the indexed address crosses a page.
    pub page_penalty: bool,

    /// Undocumented opcode.
    pub illegal: bool,

    /// Status flags the instruction may modify.
    pub affected_flags: Flags,
}

impl Opcode {
    /// Total instruction size in bytes (opcode + operands).
    pub const fn size_bytes(&self) -> u8 {
        self.addressing_mode.instruction_len()
    }

    /// True for the opcodes that lock up the processor.
    pub const fn is_halt(&self) -> bool {
        matches!(self.mnemonic, Mnemonic::Kil)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:02X} {} {:?}", self.code, self.mnemonic, self.addressing_mode)
    }
}

const fn entry(
    code: u8,
    mnemonic: Mnemonic,
    addressing_mode: AddressingMode,
    base_cycles: u8,
    page_penalty: bool,
    illegal: bool,
) -> Opcode {
    Opcode {
        code,
        mnemonic,
        addressing_mode,
        base_cycles,
        page_penalty,
        illegal,
        affected_flags: mnemonic.affected_flags(),
    }
}

const fn doc(code: u8, m: Mnemonic, mode: AddressingMode, cycles: u8, penalty: bool) -> Opcode {
    entry(code, m, mode, cycles, penalty, false)
}

const fn ill(code: u8, m: Mnemonic, mode: AddressingMode, cycles: u8, penalty: bool) -> Opcode {
    entry(code, m, mode, cycles, penalty, true)
}

/// Looks up the table entry for an opcode byte. Total: every byte decodes.
#[inline]
pub fn lookup(opcode: u8) -> &'static Opcode {
    &OPCODE_TABLE[opcode as usize]
}

use AddressingMode::*;
use Mnemonic::*;

/// Complete 256-entry opcode table indexed by opcode byte value.
///
/// Built at compile time and read-only for the life of the process.
pub static OPCODE_TABLE: [Opcode; 256] = [
    doc(0x00, Brk, Implied, 7, false),
    doc(0x01, Ora, IndirectX, 6, false),
    ill(0x02, Kil, Implied, 0, false),
    ill(0x03, Slo, IndirectX, 8, false),
    ill(0x04, Nop, ZeroPage, 3, false),
    doc(0x05, Ora, ZeroPage, 3, false),
    doc(0x06, Asl, ZeroPage, 5, false),
    ill(0x07, Slo, ZeroPage, 5, false),
    doc(0x08, Php, Implied, 3, false),
    doc(0x09, Ora, Immediate, 2, false),
    doc(0x0A, Asl, Accumulator, 2, false),
    ill(0x0B, Anc, Immediate, 2, false),
    ill(0x0C, Nop, Absolute, 4, false),
    doc(0x0D, Ora, Absolute, 4, false),
    doc(0x0E, Asl, Absolute, 6, false),
    ill(0x0F, Slo, Absolute, 6, false),
    //
    doc(0x10, Bpl, Relative, 2, false),
    doc(0x11, Ora, IndirectY, 5, true),
    ill(0x12, Kil, Implied, 0, false),
    ill(0x13, Slo, IndirectY, 8, false),
    ill(0x14, Nop, ZeroPageX, 4, false),
    doc(0x15, Ora, ZeroPageX, 4, false),
    doc(0x16, Asl, ZeroPageX, 6, false),
    ill(0x17, Slo, ZeroPageX, 6, false),
    doc(0x18, Clc, Implied, 2, false),
    doc(0x19, Ora, AbsoluteY, 4, true),
    ill(0x1A, Nop, Implied, 2, false),
    ill(0x1B, Slo, AbsoluteY, 7, false),
    ill(0x1C, Nop, AbsoluteX, 4, true),
    doc(0x1D, Ora, AbsoluteX, 4, true),
    doc(0x1E, Asl, AbsoluteX, 7, false),
    ill(0x1F, Slo, AbsoluteX, 7, false),
    //
    doc(0x20, Jsr, Absolute, 6, false),
    doc(0x21, And, IndirectX, 6, false),
    ill(0x22, Kil, Implied, 0, false),
    ill(0x23, Rla, IndirectX, 8, false),
    doc(0x24, Bit, ZeroPage, 3, false),
    doc(0x25, And, ZeroPage, 3, false),
    doc(0x26, Rol, ZeroPage, 5, false),
    ill(0x27, Rla, ZeroPage, 5, false),
    doc(0x28, Plp, Implied, 4, false),
    doc(0x29, And, Immediate, 2, false),
    doc(0x2A, Rol, Accumulator, 2, false),
    ill(0x2B, Anc, Immediate, 2, false),
    doc(0x2C, Bit, Absolute, 4, false),
    doc(0x2D, And, Absolute, 4, false),
    doc(0x2E, Rol, Absolute, 6, false),
    ill(0x2F, Rla, Absolute, 6, false),
    //
    doc(0x30, Bmi, Relative, 2, false),
    doc(0x31, And, IndirectY, 5, true),
    ill(0x32, Kil, Implied, 0, false),
    ill(0x33, Rla, IndirectY, 8, false),
    ill(0x34, Nop, ZeroPageX, 4, false),
    doc(0x35, And, ZeroPageX, 4, false),
    doc(0x36, Rol, ZeroPageX, 6, false),
    ill(0x37, Rla, ZeroPageX, 6, false),
    doc(0x38, Sec, Implied, 2, false),
    doc(0x39, And, AbsoluteY, 4, true),
    ill(0x3A, Nop, Implied, 2, false),
    ill(0x3B, Rla, AbsoluteY, 7, false),
    ill(0x3C, Nop, AbsoluteX, 4, true),
    doc(0x3D, And, AbsoluteX, 4, true),
    doc(0x3E, Rol, AbsoluteX, 7, false),
    ill(0x3F, Rla, AbsoluteX, 7, false),
    //
    doc(0x40, Rti, Implied, 6, false),
    doc(0x41, Eor, IndirectX, 6, false),
    ill(0x42, Kil, Implied, 0, false),
    ill(0x43, Sre, IndirectX, 8, false),
    ill(0x44, Nop, ZeroPage, 3, false),
    doc(0x45, Eor, ZeroPage, 3, false),
    doc(0x46, Lsr, ZeroPage, 5, false),
    ill(0x47, Sre, ZeroPage, 5, false),
    doc(0x48, Pha, Implied, 3, false),
    doc(0x49, Eor, Immediate, 2, false),
    doc(0x4A, Lsr, Accumulator, 2, false),
    ill(0x4B, Alr, Immediate, 2, false),
    doc(0x4C, Jmp, Absolute, 3, false),
    doc(0x4D, Eor, Absolute, 4, false),
    doc(0x4E, Lsr, Absolute, 6, false),
    ill(0x4F, Sre, Absolute, 6, false),
    //
    doc(0x50, Bvc, Relative, 2, false),
    doc(0x51, Eor, IndirectY, 5, true),
    ill(0x52, Kil, Implied, 0, false),
    ill(0x53, Sre, IndirectY, 8, false),
    ill(0x54, Nop, ZeroPageX, 4, false),
    doc(0x55, Eor, ZeroPageX, 4, false),
    doc(0x56, Lsr, ZeroPageX, 6, false),
    ill(0x57, Sre, ZeroPageX, 6, false),
    doc(0x58, Cli, Implied, 2, false),
    doc(0x59, Eor, AbsoluteY, 4, true),
    ill(0x5A, Nop, Implied, 2, false),
    ill(0x5B, Sre, AbsoluteY, 7, false),
    ill(0x5C, Nop, AbsoluteX, 4, true),
    doc(0x5D, Eor, AbsoluteX, 4, true),
    doc(0x5E, Lsr, AbsoluteX, 7, false),
    ill(0x5F, Sre, AbsoluteX, 7, false),
    //
    doc(0x60, Rts, Implied, 6, false),
    doc(0x61, Adc, IndirectX, 6, false),
    ill(0x62, Kil, Implied, 0, false),
    ill(0x63, Rra, IndirectX, 8, false),
    ill(0x64, Nop, ZeroPage, 3, false),
    doc(0x65, Adc, ZeroPage, 3, false),
    doc(0x66, Ror, ZeroPage, 5, false),
    ill(0x67, Rra, ZeroPage, 5, false),
    doc(0x68, Pla, Implied, 4, false),
    doc(0x69, Adc, Immediate, 2, false),
    doc(0x6A, Ror, Accumulator, 2, false),
    ill(0x6B, Arr, Immediate, 2, false),
    doc(0x6C, Jmp, Indirect, 5, false),
    doc(0x6D, Adc, Absolute, 4, false),
    doc(0x6E, Ror, Absolute, 6, false),
    ill(0x6F, Rra, Absolute, 6, false),
    //
    doc(0x70, Bvs, Relative, 2, false),
    doc(0x71, Adc, IndirectY, 5, true),
    ill(0x72, Kil, Implied, 0, false),
    ill(0x73, Rra, IndirectY, 8, false),
    ill(0x74, Nop, ZeroPageX, 4, false),
    doc(0x75, Adc, ZeroPageX, 4, false),
    doc(0x76, Ror, ZeroPageX, 6, false),
    ill(0x77, Rra, ZeroPageX, 6, false),
    doc(0x78, Sei, Implied, 2, false),
    doc(0x79, Adc, AbsoluteY, 4, true),
    ill(0x7A, Nop, Implied, 2, false),
    ill(0x7B, Rra, AbsoluteY, 7, false),
    ill(0x7C, Nop, AbsoluteX, 4, true),
    doc(0x7D, Adc, AbsoluteX, 4, true),
    doc(0x7E, Ror, AbsoluteX, 7, false),
    ill(0x7F, Rra, AbsoluteX, 7, false),
    //
    ill(0x80, Nop, Immediate, 2, false),
    doc(0x81, Sta, IndirectX, 6, false),
    ill(0x82, Nop, Immediate, 2, false),
    ill(0x83, Sax, IndirectX, 6, false),
    doc(0x84, Sty, ZeroPage, 3, false),
    doc(0x85, Sta, ZeroPage, 3, false),
    doc(0x86, Stx, ZeroPage, 3, false),
    ill(0x87, Sax, ZeroPage, 3, false),
    doc(0x88, Dey, Implied, 2, false),
    ill(0x89, Nop, Immediate, 2, false),
    doc(0x8A, Txa, Implied, 2, false),
    ill(0x8B, Xaa, Immediate, 2, false),
    doc(0x8C, Sty, Absolute, 4, false),
    doc(0x8D, Sta, Absolute, 4, false),
    doc(0x8E, Stx, Absolute, 4, false),
    ill(0x8F, Sax, Absolute, 4, false),
    //
    doc(0x90, Bcc, Relative, 2, false),
    doc(0x91, Sta, IndirectY, 6, false),
    ill(0x92, Kil, Implied, 0, false),
    ill(0x93, Ahx, IndirectY, 6, false),
    doc(0x94, Sty, ZeroPageX, 4, false),
    doc(0x95, Sta, ZeroPageX, 4, false),
    doc(0x96, Stx, ZeroPageY, 4, false),
    ill(0x97, Sax, ZeroPageY, 4, false),
    doc(0x98, Tya, Implied, 2, false),
    doc(0x99, Sta, AbsoluteY, 5, false),
    doc(0x9A, Txs, Implied, 2, false),
    ill(0x9B, Tas, AbsoluteY, 5, false),
    ill(0x9C, Shy, AbsoluteX, 5, false),
    doc(0x9D, Sta, AbsoluteX, 5, false),
    ill(0x9E, Shx, AbsoluteY, 5, false),
    ill(0x9F, Ahx, AbsoluteY, 5, false),
    //
    doc(0xA0, Ldy, Immediate, 2, false),
    doc(0xA1, Lda, IndirectX, 6, false),
    doc(0xA2, Ldx, Immediate, 2, false),
    ill(0xA3, Lax, IndirectX, 6, false),
    doc(0xA4, Ldy, ZeroPage, 3, false),
    doc(0xA5, Lda, ZeroPage, 3, false),
    doc(0xA6, Ldx, ZeroPage, 3, false),
    ill(0xA7, Lax, ZeroPage, 3, false),
    doc(0xA8, Tay, Implied, 2, false),
    doc(0xA9, Lda, Immediate, 2, false),
    doc(0xAA, Tax, Implied, 2, false),
    ill(0xAB, Lax, Immediate, 2, false),
    doc(0xAC, Ldy, Absolute, 4, false),
    doc(0xAD, Lda, Absolute, 4, false),
    doc(0xAE, Ldx, Absolute, 4, false),
    ill(0xAF, Lax, Absolute, 4, false),
    //
    doc(0xB0, Bcs, Relative, 2, false),
    doc(0xB1, Lda, IndirectY, 5, true),
    ill(0xB2, Kil, Implied, 0, false),
    ill(0xB3, Lax, IndirectY, 5, true),
    doc(0xB4, Ldy, ZeroPageX, 4, false),
    doc(0xB5, Lda, ZeroPageX, 4, false),
    doc(0xB6, Ldx, ZeroPageY, 4, false),
    ill(0xB7, Lax, ZeroPageY, 4, false),
    doc(0xB8, Clv, Implied, 2, false),
    doc(0xB9, Lda, AbsoluteY, 4, true),
    doc(0xBA, Tsx, Implied, 2, false),
    ill(0xBB, Las, AbsoluteY, 4, true),
    doc(0xBC, Ldy, AbsoluteX, 4, true),
    doc(0xBD, Lda, AbsoluteX, 4, true),
    doc(0xBE, Ldx, AbsoluteY, 4, true),
    ill(0xBF, Lax, AbsoluteY, 4, true),
    //
    doc(0xC0, Cpy, Immediate, 2, false),
    doc(0xC1, Cmp, IndirectX, 6, false),
    ill(0xC2, Nop, Immediate, 2, false),
    ill(0xC3, Dcp, IndirectX, 8, false),
    doc(0xC4, Cpy, ZeroPage, 3, false),
    doc(0xC5, Cmp, ZeroPage, 3, false),
    doc(0xC6, Dec, ZeroPage, 5, false),
    ill(0xC7, Dcp, ZeroPage, 5, false),
    doc(0xC8, Iny, Implied, 2, false),
    doc(0xC9, Cmp, Immediate, 2, false),
    doc(0xCA, Dex, Implied, 2, false),
    ill(0xCB, Axs, Immediate, 2, false),
    doc(0xCC, Cpy, Absolute, 4, false),
    doc(0xCD, Cmp, Absolute, 4, false),
    doc(0xCE, Dec, Absolute, 6, false),
    ill(0xCF, Dcp, Absolute, 6, false),
    //
    doc(0xD0, Bne, Relative, 2, false),
    doc(0xD1, Cmp, IndirectY, 5, true),
    ill(0xD2, Kil, Implied, 0, false),
    ill(0xD3, Dcp, IndirectY, 8, false),
    ill(0xD4, Nop, ZeroPageX, 4, false),
    doc(0xD5, Cmp, ZeroPageX, 4, false),
    doc(0xD6, Dec, ZeroPageX, 6, false),
    ill(0xD7, Dcp, ZeroPageX, 6, false),
    doc(0xD8, Cld, Implied, 2, false),
    doc(0xD9, Cmp, AbsoluteY, 4, true),
    ill(0xDA, Nop, Implied, 2, false),
    ill(0xDB, Dcp, AbsoluteY, 7, false),
    ill(0xDC, Nop, AbsoluteX, 4, true),
    doc(0xDD, Cmp, AbsoluteX, 4, true),
    doc(0xDE, Dec, AbsoluteX, 7, false),
    ill(0xDF, Dcp, AbsoluteX, 7, false),
    //
    doc(0xE0, Cpx, Immediate, 2, false),
    doc(0xE1, Sbc, IndirectX, 6, false),
    ill(0xE2, Nop, Immediate, 2, false),
    ill(0xE3, Isc, IndirectX, 8, false),
    doc(0xE4, Cpx, ZeroPage, 3, false),
    doc(0xE5, Sbc, ZeroPage, 3, false),
    doc(0xE6, Inc, ZeroPage, 5, false),
    ill(0xE7, Isc, ZeroPage, 5, false),
    doc(0xE8, Inx, Implied, 2, false),
    doc(0xE9, Sbc, Immediate, 2, false),
    doc(0xEA, Nop, Implied, 2, false),
    ill(0xEB, Sbc, Immediate, 2, false),
    doc(0xEC, Cpx, Absolute, 4, false),
    doc(0xED, Sbc, Absolute, 4, false),
    doc(0xEE, Inc, Absolute, 6, false),
    ill(0xEF, Isc, Absolute, 6, false),
    //
    doc(0xF0, Beq, Relative, 2, false),
    doc(0xF1, Sbc, IndirectY, 5, true),
    ill(0xF2, Kil, Implied, 0, false),
    ill(0xF3, Isc, IndirectY, 8, false),
    ill(0xF4, Nop, ZeroPageX, 4, false),
    doc(0xF5, Sbc, ZeroPageX, 4, false),
    doc(0xF6, Inc, ZeroPageX, 6, false),
    ill(0xF7, Isc, ZeroPageX, 6, false),
    doc(0xF8, Sed, Implied, 2, false),
    doc(0xF9, Sbc, AbsoluteY, 4, true),
    ill(0xFA, Nop, Implied, 2, false),
    ill(0xFB, Isc, AbsoluteY, 7, false),
    ill(0xFC, Nop, AbsoluteX, 4, true),
    doc(0xFD, Sbc, AbsoluteX, 4, true),
    doc(0xFE, Inc, AbsoluteX, 7, false),
    ill(0xFF, Isc, AbsoluteX, 7, false),
];
