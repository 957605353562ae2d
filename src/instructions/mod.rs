//! # 6502 Instruction Implementations
//!
//! This module contains the implementations of all 6502 instructions, organized by category.
//! Each instruction is a standalone function that takes a mutable reference to the CPU and
//! the already-resolved [`Operand`].
//!
//! By the time a handler runs, the engine has resolved the effective address and advanced
//! PC past the instruction. Handlers mutate registers, flags and memory. Branch handlers
//! return the extra cycles they cost; everything else is charged from the opcode table.
//!
//! ## Categories
//!
//! - **alu**: Arithmetic and logic operations (ADC, SBC, AND, ORA, EOR, CMP, CPX, CPY, BIT)
//! - **branches**: Conditional branch instructions (BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS)
//! - **shifts**: Shift and rotate operations (ASL, LSR, ROL, ROR)
//! - **load_store**: Load and store instructions (LDA, LDX, LDY, STA, STX, STY)
//! - **inc_dec**: Increment and decrement operations (INC, DEC, INX, INY, DEX, DEY)
//! - **control**: Control flow instructions (JMP, JSR, RTS, RTI, BRK, NOP)
//! - **stack**: Stack operations (PHA, PHP, PLA, PLP)
//! - **flags**: Status flag manipulation (CLC, SEC, CLI, SEI, CLD, SED, CLV)
//! - **transfer**: Register transfer operations (TAX, TAY, TXA, TYA, TSX, TXS)
//! - **illegal**: Undocumented NMOS opcodes (SLO, RLA, SRE, RRA, SAX, LAX, DCP, ISC, ...)

pub mod alu;
pub mod branches;
pub mod control;
pub mod flags;
pub mod illegal;
pub mod inc_dec;
pub mod load_store;
pub mod shifts;
pub mod stack;
pub mod transfer;

use crate::addressing::{AddressingMode, EffectiveAddress};
use crate::opcodes::Mnemonic;
use crate::status::Flags;
use crate::{MemoryBus, CPU};

/// A decoded operand: the addressing mode plus the resolved address.
///
/// `target` is `None` for Implied and Accumulator modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Operand {
    pub mode: AddressingMode,
    pub target: Option<EffectiveAddress>,
}

impl Operand {
    /// Effective address, or 0 when the mode has none.
    pub fn address(&self) -> u16 {
        self.target.map_or(0, |t| t.address)
    }

    pub fn page_crossed(&self) -> bool {
        self.target.is_some_and(|t| t.page_crossed)
    }
}

/// Runs the handler for `mnemonic` and returns any cycles beyond the
/// opcode's base cost and page penalty.
pub(crate) fn execute<M: MemoryBus>(cpu: &mut CPU<M>, mnemonic: Mnemonic, operand: Operand) -> u8 {
    use Mnemonic::*;

    match mnemonic {
        // ALU
        Adc => alu::execute_adc(cpu, operand),
        Sbc => alu::execute_sbc(cpu, operand),
        And => alu::execute_and(cpu, operand),
        Ora => alu::execute_ora(cpu, operand),
        Eor => alu::execute_eor(cpu, operand),
        Cmp => alu::execute_cmp(cpu, operand),
        Cpx => alu::execute_cpx(cpu, operand),
        Cpy => alu::execute_cpy(cpu, operand),
        Bit => alu::execute_bit(cpu, operand),

        // Branches
        Bcc => return branches::branch_on(cpu, operand, Flags::CARRY, false),
        Bcs => return branches::branch_on(cpu, operand, Flags::CARRY, true),
        Bne => return branches::branch_on(cpu, operand, Flags::ZERO, false),
        Beq => return branches::branch_on(cpu, operand, Flags::ZERO, true),
        Bpl => return branches::branch_on(cpu, operand, Flags::NEGATIVE, false),
        Bmi => return branches::branch_on(cpu, operand, Flags::NEGATIVE, true),
        Bvc => return branches::branch_on(cpu, operand, Flags::OVERFLOW, false),
        Bvs => return branches::branch_on(cpu, operand, Flags::OVERFLOW, true),

        // Shifts
        Asl => shifts::execute_asl(cpu, operand),
        Lsr => shifts::execute_lsr(cpu, operand),
        Rol => shifts::execute_rol(cpu, operand),
        Ror => shifts::execute_ror(cpu, operand),

        // Loads and stores
        Lda => load_store::execute_lda(cpu, operand),
        Ldx => load_store::execute_ldx(cpu, operand),
        Ldy => load_store::execute_ldy(cpu, operand),
        Sta => load_store::execute_sta(cpu, operand),
        Stx => load_store::execute_stx(cpu, operand),
        Sty => load_store::execute_sty(cpu, operand),

        // Increments and decrements
        Inc => inc_dec::execute_inc(cpu, operand),
        Dec => inc_dec::execute_dec(cpu, operand),
        Inx => inc_dec::execute_inx(cpu),
        Iny => inc_dec::execute_iny(cpu),
        Dex => inc_dec::execute_dex(cpu),
        Dey => inc_dec::execute_dey(cpu),

        // Control flow
        Jmp => control::execute_jmp(cpu, operand),
        Jsr => control::execute_jsr(cpu, operand),
        Rts => control::execute_rts(cpu),
        Rti => control::execute_rti(cpu),
        Brk => control::execute_brk(cpu),
        Nop => control::execute_nop(cpu, operand),

        // Stack
        Pha => stack::execute_pha(cpu),
        Php => stack::execute_php(cpu),
        Pla => stack::execute_pla(cpu),
        Plp => stack::execute_plp(cpu),

        // Flags
        Clc => flags::execute_clc(cpu),
        Sec => flags::execute_sec(cpu),
        Cli => flags::execute_cli(cpu),
        Sei => flags::execute_sei(cpu),
        Cld => flags::execute_cld(cpu),
        Sed => flags::execute_sed(cpu),
        Clv => flags::execute_clv(cpu),

        // Transfers
        Tax => transfer::execute_tax(cpu),
        Tay => transfer::execute_tay(cpu),
        Txa => transfer::execute_txa(cpu),
        Tya => transfer::execute_tya(cpu),
        Tsx => transfer::execute_tsx(cpu),
        Txs => transfer::execute_txs(cpu),

        // Undocumented
        Slo => illegal::execute_slo(cpu, operand),
        Rla => illegal::execute_rla(cpu, operand),
        Sre => illegal::execute_sre(cpu, operand),
        Rra => illegal::execute_rra(cpu, operand),
        Sax => illegal::execute_sax(cpu, operand),
        Lax => illegal::execute_lax(cpu, operand),
        Dcp => illegal::execute_dcp(cpu, operand),
        Isc => illegal::execute_isc(cpu, operand),
        Anc => illegal::execute_anc(cpu, operand),
        Alr => illegal::execute_alr(cpu, operand),
        Arr => illegal::execute_arr(cpu, operand),
        Xaa => illegal::execute_xaa(cpu, operand),
        Axs => illegal::execute_axs(cpu, operand),
        Ahx => illegal::execute_ahx(cpu, operand),
        Shy => illegal::execute_shy(cpu, operand),
        Shx => illegal::execute_shx(cpu, operand),
        Tas => illegal::execute_tas(cpu, operand),
        Las => illegal::execute_las(cpu, operand),

        // Intercepted by the engine before dispatch
        Kil => {}
    }

    0
}
