//! # MOS 6502/6510 CPU Core
//!
//! A cycle-counting NMOS 6502 CPU core with a paced clock scheduler.
//!
//! This crate provides the processor (registers, status flags, the 256-entry opcode table
//! including the undocumented opcodes, the 13 addressing modes, decimal arithmetic and
//! interrupt handling) together with a threaded clock that paces it at a real hardware
//! frequency. Memory is supplied by the host through the `MemoryBus` trait.
//!
//! ## Quick Start
//!
//! ```rust
//! use mos65xx::{CPU, FlatMemory, MemoryBus};
//!
//! // Create 64KB flat memory
//! let mut memory = FlatMemory::new();
//!
//! // Set reset vector to point to program start at 0x8000
//! memory.write(0xFFFC, 0x00); // Low byte
//! memory.write(0xFFFD, 0x80); // High byte
//! memory.load(0x8000, &[0xA9, 0x05, 0x69, 0x02]); // LDA #$05, ADC #$02
//!
//! // Initialize CPU - it will load PC from the reset vector
//! let mut cpu = CPU::new(memory);
//! assert_eq!(cpu.pc(), 0x8000);
//!
//! cpu.step().unwrap();
//! cpu.step().unwrap();
//! assert_eq!(cpu.a(), 0x07);
//! assert_eq!(cpu.cycles(), 4);
//! ```
//!
//! ## Running on a clock
//!
//! ```rust,no_run
//! use mos65xx::{ClockConfig, FlatMemory, Machine, CPU};
//!
//! let cpu = CPU::new(FlatMemory::new());
//! let mut machine = Machine::new(cpu, ClockConfig::PAL_C64);
//!
//! machine.start().unwrap();
//! std::thread::sleep(std::time::Duration::from_millis(20));
//! machine.pause().unwrap();
//! println!("{:?}", machine.registers());
//! machine.stop().unwrap();
//! ```
//!
//! ## Modules
//!
//! - `cpu` - CPU state, lifecycle and the fetch-decode-execute loop
//! - `opcodes` - Opcode metadata table
//! - `addressing` - Addressing modes and effective address resolution
//! - `status` - Status register and flag helpers
//! - `interrupts` - Pending interrupt latch and priority arbitration
//! - `clock` - Threaded clock scheduler and tick watchers
//! - `machine` - A CPU driven by a clock, shared across threads
//! - `memory` - MemoryBus trait and a flat 64KB implementation
//!
//! ## Logging
//!
//! The crate logs through the `log` facade. Per-instruction traces are emitted at
//! `trace` level, interrupt servicing at `debug`, clock lifecycle at `info`, and
//! KIL halts and watcher failures at `warn`. Install any `log` backend to see them.

pub mod addressing;
pub mod clock;
pub mod cpu;
pub mod interrupts;
pub mod machine;
pub mod memory;
pub mod opcodes;
pub mod status;

// Internal instruction implementations (not part of public API)
mod instructions;

use std::fmt;

// Re-export public API
pub use addressing::{resolve, AddressingMode, EffectiveAddress};
pub use clock::{ClockConfig, ClockScheduler, ClockState, Tick, TickWatcher, WatcherId};
pub use cpu::{CpuConfig, Registers, RunState, CPU};
pub use interrupts::{Interrupt, InterruptController};
pub use machine::{Machine, SharedCpu};
pub use memory::{FlatMemory, MemoryBus};
pub use opcodes::{lookup, Mnemonic, Opcode, OPCODE_TABLE};
pub use status::{Flags, StatusRegister};

/// Errors that can occur during CPU execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionError {
    /// A KIL opcode was fetched. The CPU is now stopped.
    ///
    /// Contains the opcode byte and its address for debugging purposes.
    Jammed { opcode: u8, pc: u16 },

    /// The CPU is stopped and will not execute further instructions.
    Halted,

    /// A lifecycle operation needed the CPU to have been started.
    NotStarted,

    /// `start()` on a CPU that is already running or paused.
    AlreadyRunning,

    /// `pause()` on a CPU that is not running.
    NotRunning,

    /// `resume()` on a CPU that is not paused.
    NotPaused,
}

impl fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ExecutionError::Jammed { opcode, pc } => {
                write!(f, "KIL opcode 0x{:02X} at 0x{:04X} jammed the CPU", opcode, pc)
            }
            ExecutionError::Halted => write!(f, "CPU is halted"),
            ExecutionError::NotStarted => write!(f, "CPU has not been started"),
            ExecutionError::AlreadyRunning => write!(f, "CPU is already running"),
            ExecutionError::NotRunning => write!(f, "CPU is not running"),
            ExecutionError::NotPaused => write!(f, "CPU is not paused"),
        }
    }
}

impl std::error::Error for ExecutionError {}

/// Errors reported by the clock scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockError {
    /// Frequency of 0 Hz, or above 1 GHz (sub-nanosecond period).
    InvalidFrequency(u64),

    /// `start()` with no watchers registered.
    NoWatchers,

    /// `start()` while running or paused.
    AlreadyRunning,

    /// `pause()` while not running.
    NotRunning,

    /// `resume()` while not paused.
    NotPaused,

    /// Watcher registration or reconfiguration while the clock is active.
    ModifiedWhileRunning,

    /// `remove_watcher()` with an id that is not registered.
    UnknownWatcher(WatcherId),

    /// The clock thread could not be spawned.
    SpawnFailed,

    /// A watcher panicked on the clock thread. All watchers were lost.
    WatcherPanicked,
}

impl fmt::Display for ClockError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ClockError::InvalidFrequency(hz) => write!(f, "invalid clock frequency: {} Hz", hz),
            ClockError::NoWatchers => write!(f, "clock has no watchers"),
            ClockError::AlreadyRunning => write!(f, "clock is already running"),
            ClockError::NotRunning => write!(f, "clock is not running"),
            ClockError::NotPaused => write!(f, "clock is not paused"),
            ClockError::ModifiedWhileRunning => {
                write!(f, "clock can only be modified while stopped")
            }
            ClockError::UnknownWatcher(id) => write!(f, "no watcher {}", id),
            ClockError::SpawnFailed => write!(f, "failed to spawn clock thread"),
            ClockError::WatcherPanicked => write!(f, "a tick watcher panicked"),
        }
    }
}

impl std::error::Error for ClockError {}

/// Errors from driving a [`Machine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachineError {
    Execution(ExecutionError),
    Clock(ClockError),
}

impl fmt::Display for MachineError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MachineError::Execution(e) => write!(f, "execution error: {}", e),
            MachineError::Clock(e) => write!(f, "clock error: {}", e),
        }
    }
}

impl std::error::Error for MachineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MachineError::Execution(e) => Some(e),
            MachineError::Clock(e) => Some(e),
        }
    }
}

impl From<ExecutionError> for MachineError {
    fn from(e: ExecutionError) -> Self {
        MachineError::Execution(e)
    }
}

impl From<ClockError> for MachineError {
    fn from(e: ClockError) -> Self {
        MachineError::Clock(e)
    }
}
