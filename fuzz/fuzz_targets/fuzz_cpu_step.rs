//! Fuzz target for CPU step execution.
//!
//! Builds an arbitrary register file and memory image, optionally raises
//! interrupts, then executes a few instructions. Any panic is a bug; a KIL
//! must leave the CPU stopped.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use mos65xx::{CpuConfig, ExecutionError, FlatMemory, MemoryBus, RunState, CPU};

#[derive(Debug, Arbitrary)]
struct FuzzCpuState {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    status: u8,
    decimal_enabled: bool,
}

#[derive(Debug, Arbitrary)]
struct FuzzInterrupts {
    irq: bool,
    nmi: bool,
    brk: bool,
    reset: bool,
}

#[derive(Debug, Arbitrary)]
struct FuzzMemory {
    /// Bytes at the reset vector target
    instruction_bytes: [u8; 8],
    zero_page: [u8; 256],
    stack_page: [u8; 256],
    /// Mapped at 0x4000 for absolute and indexed modes
    main_memory: [u8; 256],
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    cpu_state: FuzzCpuState,
    interrupts: FuzzInterrupts,
    memory: FuzzMemory,
    steps: u8,
}

fuzz_target!(|input: FuzzInput| {
    let mut memory = FlatMemory::new();
    memory.load(0x0000, &input.memory.zero_page);
    memory.load(0x0100, &input.memory.stack_page);
    memory.load(0x4000, &input.memory.main_memory);
    memory.load(0x8000, &input.memory.instruction_bytes);

    // Every vector points back into the fuzzed code
    for vector in [0xFFFA, 0xFFFC, 0xFFFE] {
        memory.write(vector, 0x00);
        memory.write(vector + 1, 0x80);
    }

    let config = CpuConfig::NMOS.with_decimal_mode(input.cpu_state.decimal_enabled);
    let mut cpu = CPU::with_config(memory, config);
    cpu.set_a(input.cpu_state.a);
    cpu.set_x(input.cpu_state.x);
    cpu.set_y(input.cpu_state.y);
    cpu.set_sp(input.cpu_state.sp);
    cpu.set_status(input.cpu_state.status);

    if input.interrupts.irq {
        cpu.request_irq();
    }
    if input.interrupts.nmi {
        cpu.request_nmi();
    }
    if input.interrupts.brk {
        cpu.request_brk();
    }
    if input.interrupts.reset {
        cpu.request_reset();
    }

    for _ in 0..=(input.steps % 16) {
        let before = cpu.cycles();
        match cpu.step() {
            Ok(cycles) => {
                assert!((2..=8).contains(&cycles));
                assert_eq!(cpu.cycles(), before + cycles as u64);
                assert_eq!(cpu.status() & 0x20, 0x20);
            }
            Err(ExecutionError::Jammed { .. }) => {
                assert_eq!(cpu.state(), RunState::Stopped);
                assert_eq!(cpu.step(), Err(ExecutionError::Halted));
                break;
            }
            Err(e) => panic!("unexpected error: {}", e),
        }
    }
});
