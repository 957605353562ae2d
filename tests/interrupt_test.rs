//! Integration tests for CPU interrupt support.
//!
//! These tests verify the interrupt sequence and arbitration:
//! - 7-cycle entry sequence for IRQ, NMI, BRK and RESET
//! - I flag respect (IRQ held pending while I is set)
//! - Priority RESET > NMI > BRK > IRQ
//! - B bit in the pushed status byte
//! - RTI returning to the interrupted instruction

use mos65xx::{FlatMemory, Interrupt, MemoryBus, CPU};

const MAIN: u16 = 0x8000;
const IRQ_HANDLER: u16 = 0x9000;
const NMI_HANDLER: u16 = 0xA000;
const RESET_HANDLER: u16 = 0xB000;

fn setup_cpu() -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFA, (NMI_HANDLER & 0xFF) as u8);
    memory.write(0xFFFB, (NMI_HANDLER >> 8) as u8);
    memory.write(0xFFFC, (MAIN & 0xFF) as u8);
    memory.write(0xFFFD, (MAIN >> 8) as u8);
    memory.write(0xFFFE, (IRQ_HANDLER & 0xFF) as u8);
    memory.write(0xFFFF, (IRQ_HANDLER >> 8) as u8);

    // Main program: NOPs
    for addr in MAIN..MAIN + 0x10 {
        memory.write(addr, 0xEA);
    }
    // Handlers: RTI
    memory.write(IRQ_HANDLER, 0x40);
    memory.write(NMI_HANDLER, 0x40);
    memory.write(RESET_HANDLER, 0xEA);

    let mut cpu = CPU::new(memory);
    cpu.set_status(0x20); // all flags clear, I included
    cpu
}

#[test]
fn test_irq_sequence() {
    let mut cpu = setup_cpu();
    cpu.step().unwrap(); // NOP at 0x8000
    cpu.set_flag_c(true);

    cpu.request_irq();
    let cycles = cpu.step().unwrap();

    assert_eq!(cycles, 7);
    assert_eq!(cpu.pc(), IRQ_HANDLER);
    assert!(cpu.flag_i());
    assert_eq!(cpu.sp(), 0xFA);

    // Return address is the next instruction, status pushed with B clear
    assert_eq!(cpu.memory().read(0x01FD), 0x80);
    assert_eq!(cpu.memory().read(0x01FC), 0x01);
    assert_eq!(cpu.memory().read(0x01FB), 0x21);
    assert!(!cpu.flag_b());
    assert!(!cpu.interrupts().is_pending(Interrupt::Irq));
}

#[test]
fn test_rti_resumes_interrupted_program() {
    let mut cpu = setup_cpu();
    cpu.step().unwrap();
    cpu.request_irq();
    cpu.step().unwrap(); // enter handler

    assert_eq!(cpu.step().unwrap(), 6); // RTI
    assert_eq!(cpu.pc(), 0x8001);
    assert!(!cpu.flag_i());
    assert_eq!(cpu.sp(), 0xFD);
}

#[test]
fn test_irq_masked_by_i_flag() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x8001, 0x58); // CLI
    cpu.set_flag_i(true);
    cpu.request_irq();

    // NOP runs; the IRQ stays pending
    assert_eq!(cpu.step().unwrap(), 2);
    assert_eq!(cpu.pc(), 0x8001);
    assert!(cpu.interrupts().is_pending(Interrupt::Irq));

    // CLI runs; IRQ taken at the next boundary
    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 0x8002);

    assert_eq!(cpu.step().unwrap(), 7);
    assert_eq!(cpu.pc(), IRQ_HANDLER);
}

#[test]
fn test_nmi_ignores_i_flag() {
    let mut cpu = setup_cpu();
    cpu.set_flag_i(true);
    cpu.request_nmi();

    assert_eq!(cpu.step().unwrap(), 7);
    assert_eq!(cpu.pc(), NMI_HANDLER);
    assert_eq!(cpu.memory().read(0x01FB) & 0x10, 0, "B clear for NMI");
}

#[test]
fn test_nmi_beats_irq() {
    let mut cpu = setup_cpu();
    cpu.request_irq();
    cpu.request_nmi();

    cpu.step().unwrap();
    assert_eq!(cpu.pc(), NMI_HANDLER);
    assert!(cpu.interrupts().is_pending(Interrupt::Irq));

    // I was set on entry; the RTI restores I clear and the IRQ follows
    cpu.step().unwrap();
    assert_eq!(cpu.pc(), MAIN);
    cpu.step().unwrap();
    assert_eq!(cpu.pc(), IRQ_HANDLER);
}

#[test]
fn test_injected_brk_beats_irq() {
    let mut cpu = setup_cpu();
    cpu.request_irq();
    cpu.request_brk();

    cpu.step().unwrap();
    assert_eq!(cpu.pc(), IRQ_HANDLER);
    assert_eq!(cpu.memory().read(0x01FB) & 0x10, 0x10, "B set for BRK");
    assert!(cpu.flag_b());
    assert!(cpu.interrupts().is_pending(Interrupt::Irq));
    assert!(!cpu.interrupts().is_pending(Interrupt::Brk));
}

#[test]
fn test_nmi_then_brk_then_irq() {
    let mut cpu = setup_cpu();
    cpu.request_irq();
    cpu.request_brk();
    cpu.request_nmi();

    // NMI first; its entry sets I
    cpu.step().unwrap();
    assert_eq!(cpu.pc(), NMI_HANDLER);
    assert_eq!(cpu.memory().read(0x01FB) & 0x10, 0);

    // BRK is not masked by I, so it preempts the NMI handler's first instruction
    assert_eq!(cpu.step().unwrap(), 7);
    assert_eq!(cpu.pc(), IRQ_HANDLER);
    assert_eq!(cpu.memory().read(0x01F8) & 0x10, 0x10);
    assert_eq!(cpu.sp(), 0xF7);

    // IRQ still waits behind the I flag
    assert!(cpu.interrupts().is_pending(Interrupt::Irq));
    assert!(!cpu.interrupts().is_pending(Interrupt::Brk));
}

#[test]
fn test_reset_wins_and_clears_pending() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0xFFFC, (RESET_HANDLER & 0xFF) as u8);
    cpu.memory_mut().write(0xFFFD, (RESET_HANDLER >> 8) as u8);
    cpu.set_a(0x55);
    cpu.set_x(0x66);
    cpu.set_sp(0x80);

    cpu.request_irq();
    cpu.request_brk();
    cpu.request_nmi();
    cpu.request_reset();

    assert_eq!(cpu.step().unwrap(), 7);
    assert_eq!(cpu.pc(), RESET_HANDLER);
    assert_eq!(cpu.a(), 0);
    assert_eq!(cpu.x(), 0);
    assert_eq!(cpu.y(), 0);
    assert_eq!(cpu.sp(), 0xFD);
    assert_eq!(cpu.status(), 0x34);
    assert!(!cpu.interrupts().has_pending());

    // Nothing was pushed
    assert_eq!(cpu.memory().read(0x0180), 0x00);
}

#[test]
fn test_brk_opcode_sequence() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x8000, 0x00); // BRK
    cpu.set_flag_n(true);

    assert_eq!(cpu.step().unwrap(), 7);
    assert_eq!(cpu.pc(), IRQ_HANDLER);
    assert_eq!(cpu.memory().read(0x01FD), 0x80);
    assert_eq!(cpu.memory().read(0x01FC), 0x02);
    assert_eq!(cpu.memory().read(0x01FB), 0xB0);
    assert!(cpu.flag_i());

    // RTI skips the padding byte
    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 0x8002);
}

#[test]
fn test_interrupts_serviced_by_tick() {
    let mut cpu = setup_cpu();
    cpu.start().unwrap();
    cpu.request_nmi();

    cpu.tick().unwrap();
    assert_eq!(cpu.pc(), NMI_HANDLER);
    assert_eq!(cpu.outstanding_cycles(), 6);
}
