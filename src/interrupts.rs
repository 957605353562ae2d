//! # Interrupt Controller
//!
//! Latches pending interrupt requests and decides, at each instruction
//! boundary, which one (if any) the CPU services next.
//!
//! ## Priority
//!
//! `RESET > NMI > BRK > IRQ`. At most one request is serviced per boundary;
//! the others stay latched. IRQ is masked while the I flag is set and stays
//! pending until the mask is lifted.
//!
//! ## Vectors
//!
//! | Source | Vector        | Pushes PC/P | B in pushed P |
//! |--------|---------------|-------------|---------------|
//! | NMI    | 0xFFFA/0xFFFB | yes         | 0             |
//! | RESET  | 0xFFFC/0xFFFD | no          | -             |
//! | BRK    | 0xFFFE/0xFFFF | yes         | 1             |
//! | IRQ    | 0xFFFE/0xFFFF | yes         | 0             |

use bitflags::bitflags;

use crate::cpu::{RESET_SP, CPU};
use crate::status::{Flags, StatusRegister, RESET_STATUS};
use crate::MemoryBus;

pub const NMI_VECTOR: u16 = 0xFFFA;
pub const RESET_VECTOR: u16 = 0xFFFC;
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Cycles taken by any interrupt sequence, including reset.
pub const INTERRUPT_CYCLES: u8 = 7;

/// An interrupt source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Interrupt {
    Reset,
    Nmi,
    Brk,
    Irq,
}

impl Interrupt {
    /// Highest priority first.
    pub const PRIORITY: [Interrupt; 4] = [
        Interrupt::Reset,
        Interrupt::Nmi,
        Interrupt::Brk,
        Interrupt::Irq,
    ];

    pub const fn vector(self) -> u16 {
        match self {
            Interrupt::Nmi => NMI_VECTOR,
            Interrupt::Reset => RESET_VECTOR,
            Interrupt::Brk | Interrupt::Irq => IRQ_VECTOR,
        }
    }

    /// Whether the I flag holds this source off.
    pub const fn is_maskable(self) -> bool {
        matches!(self, Interrupt::Irq)
    }

    const fn pending_bit(self) -> Pending {
        match self {
            Interrupt::Reset => Pending::RESET,
            Interrupt::Nmi => Pending::NMI,
            Interrupt::Brk => Pending::BRK,
            Interrupt::Irq => Pending::IRQ,
        }
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    struct Pending: u8 {
        const RESET = 0b0001;
        const NMI = 0b0010;
        const BRK = 0b0100;
        const IRQ = 0b1000;
    }
}

/// Pending-request latch with fixed priority arbitration.
///
/// # Examples
///
/// ```
/// use mos65xx::{Interrupt, InterruptController};
///
/// let mut ic = InterruptController::new();
/// ic.request(Interrupt::Irq);
/// ic.request(Interrupt::Nmi);
///
/// assert_eq!(ic.next(false), Some(Interrupt::Nmi));
/// ic.acknowledge(Interrupt::Nmi);
///
/// // IRQ is masked while I is set
/// assert_eq!(ic.next(true), None);
/// assert_eq!(ic.next(false), Some(Interrupt::Irq));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterruptController {
    pending: Pending,
}

impl InterruptController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latches a request. Repeated requests before service collapse into one.
    pub fn request(&mut self, kind: Interrupt) {
        log::trace!("{:?} requested", kind);
        self.pending.insert(kind.pending_bit());
    }

    pub fn is_pending(&self, kind: Interrupt) -> bool {
        self.pending.contains(kind.pending_bit())
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Highest-priority request eligible for service, or `None`.
    ///
    /// Does not clear anything; call [`acknowledge`](Self::acknowledge)
    /// once the sequence has been entered.
    pub fn next(&self, interrupt_disable: bool) -> Option<Interrupt> {
        Interrupt::PRIORITY
            .into_iter()
            .filter(|kind| self.is_pending(*kind))
            .find(|kind| !(kind.is_maskable() && interrupt_disable))
    }

    /// Clears a serviced request. Servicing a reset discards everything.
    pub fn acknowledge(&mut self, kind: Interrupt) {
        match kind {
            Interrupt::Reset => self.pending = Pending::empty(),
            other => self.pending.remove(other.pending_bit()),
        }
    }

    /// Drops a request without servicing it (e.g. a device lowering IRQ).
    pub fn withdraw(&mut self, kind: Interrupt) {
        self.pending.remove(kind.pending_bit());
    }
}

/// Runs the entry sequence for `kind` on `cpu` and returns its cycle cost.
///
/// `return_addr` is the PC pushed to the stack. For a BRK opcode that is the
/// opcode address + 2; for injected requests it is the current PC.
pub(crate) fn enter<M: MemoryBus>(cpu: &mut CPU<M>, kind: Interrupt, return_addr: u16) -> u8 {
    if kind == Interrupt::Reset {
        cpu.a = 0;
        cpu.x = 0;
        cpu.y = 0;
        cpu.sp = RESET_SP;
        cpu.status = StatusRegister::from_bits(RESET_STATUS);
        cpu.pc = cpu.read_word(RESET_VECTOR);
        log::debug!("reset, PC: 0x{:04X}", cpu.pc);
        return INTERRUPT_CYCLES;
    }

    // BRK raises B on the live register too; IRQ and NMI leave it alone
    let brk = kind == Interrupt::Brk;
    if brk {
        cpu.status.set_flag(Flags::BREAK, true);
    }
    cpu.push_word(return_addr);
    let pushed = cpu.status.to_pushed(brk);
    cpu.push(pushed);
    cpu.status.set_flag(Flags::INTERRUPT_DISABLE, true);
    cpu.pc = cpu.read_word(kind.vector());

    INTERRUPT_CYCLES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order() {
        let mut ic = InterruptController::new();
        for kind in Interrupt::PRIORITY.iter().rev() {
            ic.request(*kind);
        }

        assert_eq!(ic.next(false), Some(Interrupt::Reset));
        ic.acknowledge(Interrupt::Reset);
        assert!(!ic.has_pending());
    }

    #[test]
    fn test_brk_beats_irq() {
        let mut ic = InterruptController::new();
        ic.request(Interrupt::Irq);
        ic.request(Interrupt::Brk);

        assert_eq!(ic.next(false), Some(Interrupt::Brk));
        ic.acknowledge(Interrupt::Brk);
        assert_eq!(ic.next(false), Some(Interrupt::Irq));
    }

    #[test]
    fn test_masked_irq_stays_pending() {
        let mut ic = InterruptController::new();
        ic.request(Interrupt::Irq);

        assert_eq!(ic.next(true), None);
        assert!(ic.is_pending(Interrupt::Irq));
    }

    #[test]
    fn test_nmi_and_brk_ignore_mask() {
        let mut ic = InterruptController::new();
        ic.request(Interrupt::Brk);
        assert_eq!(ic.next(true), Some(Interrupt::Brk));

        ic.request(Interrupt::Nmi);
        assert_eq!(ic.next(true), Some(Interrupt::Nmi));
    }

    #[test]
    fn test_withdraw() {
        let mut ic = InterruptController::new();
        ic.request(Interrupt::Irq);
        ic.withdraw(Interrupt::Irq);
        assert_eq!(ic.next(false), None);
    }
}
