//! Tests for ADC and SBC in binary and decimal mode.

use mos65xx::{CpuConfig, FlatMemory, MemoryBus, CPU};

fn setup_cpu() -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    CPU::new(memory)
}

/// Runs `opcode #value` with the given A, C and D and returns the CPU.
fn run_immediate(opcode: u8, a: u8, value: u8, carry: bool, decimal: bool) -> CPU<FlatMemory> {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x8000, opcode);
    cpu.memory_mut().write(0x8001, value);
    cpu.set_a(a);
    cpu.set_flag_c(carry);
    cpu.set_flag_d(decimal);
    cpu.step().unwrap();
    cpu
}

// ========== Binary ADC ==========

#[test]
fn test_adc_basic_addition() {
    let cpu = run_immediate(0x69, 0x10, 0x20, false, false);
    assert_eq!(cpu.a(), 0x30);
    assert!(!cpu.flag_c());
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_n());
    assert!(!cpu.flag_v());
}

#[test]
fn test_adc_carry_in_and_out() {
    let cpu = run_immediate(0x69, 0xFF, 0x00, true, false);
    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_c());
    assert!(cpu.flag_z());
}

#[test]
fn test_adc_signed_overflow() {
    // 0x7F + 0x01 = 0x80: positive + positive gives negative
    let cpu = run_immediate(0x69, 0x7F, 0x01, false, false);
    assert_eq!(cpu.a(), 0x80);
    assert!(cpu.flag_v());
    assert!(cpu.flag_n());
    assert!(!cpu.flag_c());

    // 0x80 + 0xFF = 0x7F with carry: negative + negative gives positive
    let cpu = run_immediate(0x69, 0x80, 0xFF, false, false);
    assert_eq!(cpu.a(), 0x7F);
    assert!(cpu.flag_v());
    assert!(cpu.flag_c());
}

// ========== Binary SBC ==========

#[test]
fn test_sbc_no_borrow() {
    let cpu = run_immediate(0xE9, 0x50, 0x20, true, false);
    assert_eq!(cpu.a(), 0x30);
    assert!(cpu.flag_c());
    assert!(!cpu.flag_v());
}

#[test]
fn test_sbc_with_borrow_in() {
    let cpu = run_immediate(0xE9, 0x50, 0x20, false, false);
    assert_eq!(cpu.a(), 0x2F);
    assert!(cpu.flag_c());
}

#[test]
fn test_sbc_underflow_clears_carry() {
    let cpu = run_immediate(0xE9, 0x00, 0x01, true, false);
    assert_eq!(cpu.a(), 0xFF);
    assert!(!cpu.flag_c());
    assert!(cpu.flag_n());
}

#[test]
fn test_sbc_result_zero() {
    let cpu = run_immediate(0xE9, 0x42, 0x42, true, false);
    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_z());
    assert!(cpu.flag_c());
}

// ========== Decimal mode ==========

#[test]
fn test_adc_decimal_nine_plus_one() {
    let cpu = run_immediate(0x69, 0x09, 0x01, false, true);
    assert_eq!(cpu.a(), 0x10);
    assert!(!cpu.flag_c());
}

#[test]
fn test_adc_decimal_table() {
    // (a, m, carry in, result, carry out)
    let cases = [
        (0x00, 0x00, false, 0x00, false),
        (0x12, 0x34, false, 0x46, false),
        (0x15, 0x27, false, 0x42, false),
        (0x50, 0x50, false, 0x00, true),
        (0x99, 0x99, false, 0x98, true),
        (0x99, 0x00, true, 0x00, true),
        (0x45, 0x54, true, 0x00, true),
    ];

    for (a, m, c, result, carry) in cases {
        let cpu = run_immediate(0x69, a, m, c, true);
        assert_eq!(cpu.a(), result, "{:02X} + {:02X} + {}", a, m, c as u8);
        assert_eq!(cpu.flag_c(), carry, "{:02X} + {:02X} + {}", a, m, c as u8);
        assert_eq!(cpu.flag_z(), result == 0);
    }
}

#[test]
fn test_adc_decimal_n_and_v_from_uncorrected_high_nibble() {
    // (a, m, carry in, result, N, V)
    let cases = [
        (0x79, 0x00, true, 0x80, true, true),
        (0x99, 0x01, false, 0x00, true, false),
        (0x50, 0x50, false, 0x00, true, true),
        (0x01, 0x01, false, 0x02, false, false),
    ];

    for (a, m, c, result, n, v) in cases {
        let cpu = run_immediate(0x69, a, m, c, true);
        assert_eq!(cpu.a(), result, "{:02X} + {:02X} + {}", a, m, c as u8);
        assert_eq!(cpu.flag_n(), n, "N for {:02X} + {:02X} + {}", a, m, c as u8);
        assert_eq!(cpu.flag_v(), v, "V for {:02X} + {:02X} + {}", a, m, c as u8);
    }
}

#[test]
fn test_sbc_decimal_n_and_v_follow_binary() {
    // 0x00 - 0x01 is 0xFF in binary: N set, no overflow
    let cpu = run_immediate(0xE9, 0x00, 0x01, true, true);
    assert_eq!(cpu.a(), 0x99);
    assert!(cpu.flag_n());
    assert!(!cpu.flag_v());

    // 0x80 - 0x01 is 0x7F in binary: N clear, signed overflow
    let cpu = run_immediate(0xE9, 0x80, 0x01, true, true);
    assert_eq!(cpu.a(), 0x79);
    assert!(!cpu.flag_n());
    assert!(cpu.flag_v());
    assert!(cpu.flag_c());
}

#[test]
fn test_sbc_decimal_table() {
    // (a, m, carry in, result, carry out)
    let cases = [
        (0x46, 0x12, true, 0x34, true),
        (0x40, 0x13, true, 0x27, true),
        (0x32, 0x02, false, 0x29, true),
        (0x12, 0x21, true, 0x91, false),
        (0x00, 0x01, true, 0x99, false),
        (0x50, 0x50, true, 0x00, true),
    ];

    for (a, m, c, result, carry) in cases {
        let cpu = run_immediate(0xE9, a, m, c, true);
        assert_eq!(cpu.a(), result, "{:02X} - {:02X} - {}", a, m, !c as u8);
        assert_eq!(cpu.flag_c(), carry, "{:02X} - {:02X} - {}", a, m, !c as u8);
        assert_eq!(cpu.flag_z(), result == 0);
    }
}

#[test]
fn test_decimal_flag_ignored_when_disabled() {
    let mut memory = FlatMemory::new();
    memory.load(0x0000, &[0xF8, 0x69, 0x09, 0x38, 0xE9, 0x01]); // SED; ADC #$09; SEC; SBC #$01
    let mut cpu = CPU::with_config(memory, CpuConfig::RICOH_2A03);
    cpu.set_a(0x09);

    cpu.step().unwrap();
    assert!(cpu.flag_d());

    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x12);

    cpu.step().unwrap();
    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x11);
}

#[test]
fn test_cld_returns_to_binary() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0xD8, 0x69, 0x01]); // CLD; ADC #$01
    cpu.set_flag_d(true);
    cpu.set_a(0x09);

    cpu.step().unwrap();
    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x0A);
}
