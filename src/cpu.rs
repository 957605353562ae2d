//! # CPU State and Execution
//!
//! This module contains the CPU struct representing the 6502 processor state and
//! the fetch-decode-execute loop.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: Accumulator (A), index registers (X, Y)
//! - **Program counter** (PC): 16-bit address of next instruction
//! - **Stack pointer** (SP): 8-bit offset into stack page (0x0100-0x01FF)
//! - **Status register**: N, V, B, D, I, Z, C packed in a [`StatusRegister`]
//! - **Cycle counter**: u64 monotonically increasing cycle count
//!
//! ## Execution Model
//!
//! The CPU executes instructions via:
//! - `step()`: Execute one instruction (or service one interrupt) synchronously
//! - `run_for_cycles()`: Execute until a cycle budget is exhausted
//! - `tick()`: Advance by one clock period, paying down the cost of the
//!   previous instruction before fetching the next one
//!
//! ## PC Convention
//!
//! The engine advances PC past the whole instruction *before* dispatching to
//! the handler. Handlers for JMP, JSR, RTS, RTI, BRK and taken branches
//! overwrite PC; every other handler leaves it alone.
//!
//! ## Lifecycle
//!
//! `NeverStarted -> Running <-> Paused -> Stopped`. `Stopped` is terminal and
//! is also entered when a KIL opcode is executed.

use crate::addressing::{resolve, AddressingMode};
use crate::instructions::{self, Operand};
use crate::interrupts::{self, Interrupt, InterruptController};
use crate::opcodes::lookup;
use crate::status::{Flags, StatusRegister, RESET_STATUS};
use crate::{ExecutionError, MemoryBus};

/// Reset value of the stack pointer.
pub const RESET_SP: u8 = 0xFD;

/// Base address of the hardware stack page.
pub const STACK_BASE: u16 = 0x0100;

/// Execution lifecycle of a CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunState {
    /// Created, never started by a clock. `step()` still works.
    NeverStarted,
    /// Consuming clock ticks.
    Running,
    /// Ignoring clock ticks until resumed.
    Paused,
    /// Terminal. Reached by an explicit stop or a KIL opcode.
    Stopped,
}

/// Behavioural options for a CPU instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CpuConfig {
    /// Honour the D flag in ADC/SBC. The Ricoh 2A03 has no decimal mode.
    pub decimal_mode: bool,
}

impl CpuConfig {
    /// NMOS 6502/6510 behaviour.
    pub const NMOS: CpuConfig = CpuConfig { decimal_mode: true };

    /// Ricoh 2A03/2A07 behaviour (decimal mode disabled).
    pub const RICOH_2A03: CpuConfig = CpuConfig {
        decimal_mode: false,
    };

    pub fn with_decimal_mode(mut self, enabled: bool) -> Self {
        self.decimal_mode = enabled;
        self
    }
}

impl Default for CpuConfig {
    fn default() -> Self {
        Self::NMOS
    }
}

/// Point-in-time copy of the programmer-visible registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Registers {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    pub status: u8,
    pub cycles: u64,
    pub state: RunState,
}

/// 6502 CPU state and execution context.
///
/// The CPU struct contains all processor state including registers, flags, program counter,
/// stack pointer, and cycle counter. It is generic over the memory implementation via the
/// `MemoryBus` trait.
///
/// # Examples
///
/// ```
/// use mos65xx::{CPU, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00);
/// memory.write(0xFFFD, 0x80);
///
/// let cpu = CPU::new(memory);
/// assert_eq!(cpu.pc(), 0x8000);
/// assert_eq!(cpu.sp(), 0xFD);
/// assert!(cpu.flag_i());
/// assert_eq!(cpu.cycles(), 0);
/// ```
pub struct CPU<M: MemoryBus> {
    /// Accumulator register
    pub(crate) a: u8,

    /// X index register
    pub(crate) x: u8,

    /// Y index register
    pub(crate) y: u8,

    /// Program counter (address of next instruction)
    pub(crate) pc: u16,

    /// Stack pointer (0x0100 + sp gives full stack address)
    pub(crate) sp: u8,

    pub(crate) status: StatusRegister,

    /// Total CPU cycles charged since initialization
    pub(crate) cycles: u64,

    /// Cycles of the last instruction still to be paid by clock ticks
    pub(crate) outstanding: u8,

    pub(crate) interrupts: InterruptController,

    pub(crate) state: RunState,

    /// Opcode and address of the KIL that stopped the CPU, if any
    pub(crate) jam: Option<(u8, u16)>,

    pub(crate) config: CpuConfig,

    pub(crate) memory: M,
}

impl<M: MemoryBus> CPU<M> {
    /// Creates a new CPU with the given memory bus.
    ///
    /// The CPU is initialized to the power-on reset state:
    /// - PC is loaded from the reset vector at 0xFFFC/0xFFFD (little-endian)
    /// - SP is 0xFD
    /// - Status is 0x34 (I set, B and bit 5 set)
    /// - A, X, Y are zeroed
    pub fn new(memory: M) -> Self {
        Self::with_config(memory, CpuConfig::default())
    }

    /// Creates a CPU with explicit behavioural options.
    pub fn with_config(memory: M, config: CpuConfig) -> Self {
        let mut cpu = Self {
            a: 0,
            x: 0,
            y: 0,
            pc: 0,
            sp: RESET_SP,
            status: StatusRegister::from_bits(RESET_STATUS),
            cycles: 0,
            outstanding: 0,
            interrupts: InterruptController::new(),
            state: RunState::NeverStarted,
            jam: None,
            config,
            memory,
        };
        cpu.pc = cpu.read_word(interrupts::RESET_VECTOR);
        cpu
    }

    /// Executes one instruction, or services one pending interrupt, and
    /// returns the number of cycles it cost.
    ///
    /// Bypasses the clock: the cost is charged to the cycle counter
    /// immediately and nothing is left outstanding.
    ///
    /// # Errors
    ///
    /// - `ExecutionError::Jammed` when the fetched opcode is a KIL. The CPU
    ///   is now `Stopped`.
    /// - `ExecutionError::Halted` when the CPU was already `Stopped`.
    ///
    /// # Examples
    ///
    /// ```
    /// use mos65xx::{CPU, FlatMemory, MemoryBus};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.load(0x0000, &[0xA9, 0x05]); // LDA #$05
    ///
    /// let mut cpu = CPU::new(mem); // reset vector reads 0x0000
    /// assert_eq!(cpu.step().unwrap(), 2);
    /// assert_eq!(cpu.a(), 0x05);
    /// ```
    pub fn step(&mut self) -> Result<u8, ExecutionError> {
        if self.state == RunState::Stopped {
            return Err(ExecutionError::Halted);
        }

        let cycles = self.execute_next()?;
        self.cycles += cycles as u64;
        self.outstanding = 0;

        Ok(cycles)
    }

    /// Runs the CPU for a specified number of cycles.
    ///
    /// Returns the actual number of cycles consumed, which may exceed the
    /// budget by up to one instruction. `u64::MAX` runs until the CPU halts.
    pub fn run_for_cycles(&mut self, cycle_budget: u64) -> Result<u64, ExecutionError> {
        let start_cycles = self.cycles;
        let target_cycles = start_cycles.saturating_add(cycle_budget);

        while self.cycles < target_cycles {
            self.step()?;
        }

        Ok(self.cycles - start_cycles)
    }

    /// Advances the CPU by one clock period.
    ///
    /// While the previous instruction's cost is outstanding the tick pays it
    /// down by one. Once nothing is outstanding the next instruction (or
    /// interrupt) executes on this tick, and its remaining cost becomes
    /// outstanding.
    ///
    /// Ticks are ignored unless the CPU is `Running`.
    pub fn tick(&mut self) -> Result<(), ExecutionError> {
        match self.state {
            RunState::Running => {}
            RunState::Stopped => return Err(ExecutionError::Halted),
            RunState::NeverStarted | RunState::Paused => return Ok(()),
        }

        if self.outstanding > 0 {
            self.outstanding -= 1;
            return Ok(());
        }

        let cycles = self.execute_next()?;
        self.cycles += cycles as u64;
        self.outstanding = cycles.saturating_sub(1);

        Ok(())
    }

    /// Fetch, decode, execute. Returns the total cost of what ran.
    fn execute_next(&mut self) -> Result<u8, ExecutionError> {
        let interrupt_disable = self.status.test_flag(Flags::INTERRUPT_DISABLE);
        if let Some(kind) = self.interrupts.next(interrupt_disable) {
            return Ok(self.service(kind));
        }

        let pc = self.pc;
        let opcode = lookup(self.memory.read(pc));

        if opcode.is_halt() {
            self.state = RunState::Stopped;
            self.jam = Some((opcode.code, pc));
            log::warn!("KIL opcode 0x{:02X} at PC: 0x{:04X}, CPU halted", opcode.code, pc);
            return Err(ExecutionError::Jammed {
                opcode: opcode.code,
                pc,
            });
        }

        let mode = opcode.addressing_mode;
        let target = resolve(mode, pc, self.x, self.y, |addr| self.memory.read(addr));

        log::trace!(
            "{:04X}  {:02X}  {} {:?}  A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X}",
            pc,
            opcode.code,
            opcode.mnemonic,
            mode,
            self.a,
            self.x,
            self.y,
            self.status.bits(),
            self.sp
        );

        self.pc = pc.wrapping_add(opcode.size_bytes() as u16);

        let extra = instructions::execute(self, opcode.mnemonic, Operand { mode, target });

        let page_penalty = opcode.page_penalty && target.is_some_and(|t| t.page_crossed);

        Ok(opcode.base_cycles + page_penalty as u8 + extra)
    }

    fn service(&mut self, kind: Interrupt) -> u8 {
        log::debug!("servicing {:?} at PC: 0x{:04X}", kind, self.pc);
        self.interrupts.acknowledge(kind);
        let return_addr = self.pc;
        interrupts::enter(self, kind, return_addr)
    }

    // ========== Lifecycle ==========

    /// Begins accepting clock ticks.
    pub fn start(&mut self) -> Result<(), ExecutionError> {
        match self.state {
            RunState::NeverStarted => {
                self.state = RunState::Running;
                Ok(())
            }
            RunState::Running | RunState::Paused => Err(ExecutionError::AlreadyRunning),
            RunState::Stopped => Err(ExecutionError::Halted),
        }
    }

    /// Stops consuming ticks until `resume()`.
    pub fn pause(&mut self) -> Result<(), ExecutionError> {
        match self.state {
            RunState::Running => {
                self.state = RunState::Paused;
                Ok(())
            }
            RunState::NeverStarted => Err(ExecutionError::NotStarted),
            RunState::Paused => Err(ExecutionError::NotRunning),
            RunState::Stopped => Err(ExecutionError::Halted),
        }
    }

    pub fn resume(&mut self) -> Result<(), ExecutionError> {
        match self.state {
            RunState::Paused => {
                self.state = RunState::Running;
                Ok(())
            }
            _ => Err(ExecutionError::NotPaused),
        }
    }

    /// Moves to the terminal `Stopped` state. Idempotent.
    pub fn stop(&mut self) {
        if self.state != RunState::Stopped {
            log::debug!("CPU stopped at PC: 0x{:04X}", self.pc);
        }
        self.state = RunState::Stopped;
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// The KIL opcode and its address, if one halted this CPU.
    pub fn jammed_at(&self) -> Option<(u8, u16)> {
        self.jam
    }

    /// Cycles of the current instruction not yet paid by `tick()`.
    pub fn outstanding_cycles(&self) -> u8 {
        self.outstanding
    }

    pub fn config(&self) -> CpuConfig {
        self.config
    }

    // ========== Interrupt Requests ==========

    /// Raises the IRQ line. Serviced at the next instruction boundary
    /// once the I flag is clear.
    pub fn request_irq(&mut self) {
        self.interrupts.request(Interrupt::Irq);
    }

    /// Latches an NMI. Serviced at the next instruction boundary.
    pub fn request_nmi(&mut self) {
        self.interrupts.request(Interrupt::Nmi);
    }

    /// Latches a reset. Highest priority; discards other pending requests
    /// when serviced.
    pub fn request_reset(&mut self) {
        self.interrupts.request(Interrupt::Reset);
    }

    /// Latches a software interrupt, serviced like BRK but without
    /// consuming an opcode.
    pub fn request_brk(&mut self) {
        self.interrupts.request(Interrupt::Brk);
    }

    pub fn interrupts(&self) -> &InterruptController {
        &self.interrupts
    }

    // ========== Stack ==========

    pub(crate) fn push(&mut self, value: u8) {
        self.memory.write(STACK_BASE | self.sp as u16, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    pub(crate) fn pull(&mut self) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        self.memory.read(STACK_BASE | self.sp as u16)
    }

    pub(crate) fn push_word(&mut self, value: u16) {
        self.push((value >> 8) as u8);
        self.push(value as u8);
    }

    pub(crate) fn pull_word(&mut self) -> u16 {
        let lo = self.pull() as u16;
        let hi = self.pull() as u16;
        (hi << 8) | lo
    }

    pub(crate) fn read_word(&self, addr: u16) -> u16 {
        let lo = self.memory.read(addr) as u16;
        let hi = self.memory.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    // ========== Operand Access ==========

    /// Reads the operand: memory for addressed modes, A otherwise.
    pub(crate) fn read_operand(&self, operand: Operand) -> u8 {
        match operand.target {
            Some(target) => self.memory.read(target.address),
            None => self.a,
        }
    }

    /// Writes the operand back: memory for addressed modes, A for
    /// accumulator mode.
    pub(crate) fn write_operand(&mut self, operand: Operand, value: u8) {
        match operand.target {
            Some(target) => self.memory.write(target.address, value),
            None => {
                debug_assert_eq!(operand.mode, AddressingMode::Accumulator);
                self.a = value;
            }
        }
    }

    // ========== Register Getters ==========

    pub fn a(&self) -> u8 {
        self.a
    }

    pub fn x(&self) -> u8 {
        self.x
    }

    pub fn y(&self) -> u8 {
        self.y
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Returns the stack pointer value.
    ///
    /// The full stack address is 0x0100 + SP. The stack grows downward from 0x01FF.
    pub fn sp(&self) -> u8 {
        self.sp
    }

    /// Returns the status register as a packed byte (NV1BDIZC).
    pub fn status(&self) -> u8 {
        self.status.bits()
    }

    pub fn status_register(&self) -> &StatusRegister {
        &self.status
    }

    /// Returns the total number of CPU cycles charged since initialization.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Copies all programmer-visible registers at once.
    pub fn registers(&self) -> Registers {
        Registers {
            a: self.a,
            x: self.x,
            y: self.y,
            sp: self.sp,
            pc: self.pc,
            status: self.status.bits(),
            cycles: self.cycles,
            state: self.state,
        }
    }

    pub fn memory(&self) -> &M {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    // ========== Status Flag Getters ==========

    pub fn flag_n(&self) -> bool {
        self.status.test_flag(Flags::NEGATIVE)
    }

    pub fn flag_v(&self) -> bool {
        self.status.test_flag(Flags::OVERFLOW)
    }

    pub fn flag_b(&self) -> bool {
        self.status.test_flag(Flags::BREAK)
    }

    pub fn flag_d(&self) -> bool {
        self.status.test_flag(Flags::DECIMAL)
    }

    pub fn flag_i(&self) -> bool {
        self.status.test_flag(Flags::INTERRUPT_DISABLE)
    }

    pub fn flag_z(&self) -> bool {
        self.status.test_flag(Flags::ZERO)
    }

    pub fn flag_c(&self) -> bool {
        self.status.test_flag(Flags::CARRY)
    }

    // ========== Setters (test harnesses, debuggers) ==========

    pub fn set_a(&mut self, value: u8) {
        self.a = value;
    }

    pub fn set_x(&mut self, value: u8) {
        self.x = value;
    }

    pub fn set_y(&mut self, value: u8) {
        self.y = value;
    }

    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    pub fn set_sp(&mut self, value: u8) {
        self.sp = value;
    }

    pub fn set_status(&mut self, value: u8) {
        self.status = StatusRegister::from_bits(value);
    }

    pub fn set_flag_n(&mut self, value: bool) {
        self.status.set_flag(Flags::NEGATIVE, value);
    }

    pub fn set_flag_v(&mut self, value: bool) {
        self.status.set_flag(Flags::OVERFLOW, value);
    }

    pub fn set_flag_b(&mut self, value: bool) {
        self.status.set_flag(Flags::BREAK, value);
    }

    pub fn set_flag_d(&mut self, value: bool) {
        self.status.set_flag(Flags::DECIMAL, value);
    }

    pub fn set_flag_i(&mut self, value: bool) {
        self.status.set_flag(Flags::INTERRUPT_DISABLE, value);
    }

    pub fn set_flag_z(&mut self, value: bool) {
        self.status.set_flag(Flags::ZERO, value);
    }

    pub fn set_flag_c(&mut self, value: bool) {
        self.status.set_flag(Flags::CARRY, value);
    }
}
