//! # Clocked Machine
//!
//! Couples a [`CPU`] with a [`ClockScheduler`]. The CPU lives behind a mutex
//! shared with the clock thread, which calls [`CPU::tick`] once per period.
//! Everything else on [`Machine`] (register snapshots, interrupt requests,
//! lifecycle) runs on the caller's thread and takes the same lock, so each
//! call observes the CPU between two ticks.
//!
//! When the CPU halts (KIL) its watcher stops the clock.

use std::ops::ControlFlow;
use std::sync::{Arc, Mutex};

use crate::clock::{lock, ClockConfig, ClockScheduler, ClockState, Tick, TickWatcher, WatcherId};
use crate::cpu::{Registers, RunState, CPU};
use crate::{ClockError, ExecutionError, MachineError, MemoryBus};

/// A CPU shared between the clock thread and its owner.
pub type SharedCpu<M> = Arc<Mutex<CPU<M>>>;

/// Forwards clock ticks to a shared CPU.
struct CpuDriver<M: MemoryBus> {
    cpu: SharedCpu<M>,
}

impl<M: MemoryBus + Send> TickWatcher for CpuDriver<M> {
    fn on_tick(&mut self, tick: Tick) -> ControlFlow<()> {
        let mut cpu = lock(&self.cpu);
        match cpu.tick() {
            Ok(()) => ControlFlow::Continue(()),
            Err(e) => {
                log::warn!("stopping clock at tick {}: {}", tick.index, e);
                ControlFlow::Break(())
            }
        }
    }
}

/// A CPU paced by its own clock thread.
///
/// # Examples
///
/// ```
/// use mos65xx::{ClockConfig, FlatMemory, Machine, RunState, CPU};
///
/// let mut mem = FlatMemory::new();
/// mem.load(0x0000, &[0xE8, 0x02]); // INX, KIL
///
/// let mut machine = Machine::new(CPU::new(mem), ClockConfig::ONE_MHZ);
/// machine.start().unwrap();
/// machine.wait().unwrap();
///
/// assert_eq!(machine.state(), RunState::Stopped);
/// assert_eq!(machine.registers().x, 1);
/// ```
pub struct Machine<M: MemoryBus + Send + 'static> {
    cpu: SharedCpu<M>,
    clock: ClockScheduler,
}

impl<M: MemoryBus + Send + 'static> Machine<M> {
    pub fn new(cpu: CPU<M>, config: ClockConfig) -> Self {
        let cpu = Arc::new(Mutex::new(cpu));
        let mut clock = ClockScheduler::new(config);
        clock.register(Box::new(CpuDriver {
            cpu: Arc::clone(&cpu),
        }));
        Self { cpu, clock }
    }

    /// Adds a watcher notified after the CPU on every tick.
    pub fn add_watcher<W>(&mut self, watcher: W) -> Result<WatcherId, ClockError>
    where
        W: TickWatcher + 'static,
    {
        self.clock.add_watcher(watcher)
    }

    /// Handle to the shared CPU, e.g. for a device watcher that raises IRQs.
    pub fn cpu(&self) -> SharedCpu<M> {
        Arc::clone(&self.cpu)
    }

    /// Runs `f` with exclusive access to the CPU.
    pub fn with_cpu<R>(&self, f: impl FnOnce(&mut CPU<M>) -> R) -> R {
        f(&mut lock(&self.cpu))
    }

    pub fn clock(&self) -> &ClockScheduler {
        &self.clock
    }

    /// Starts the CPU and its clock.
    pub fn start(&mut self) -> Result<(), MachineError> {
        // Hold the CPU so no tick lands before it is marked running
        let mut cpu = lock(&self.cpu);
        match cpu.state() {
            RunState::NeverStarted => {}
            RunState::Stopped => return Err(ExecutionError::Halted.into()),
            RunState::Running | RunState::Paused => {
                return Err(ExecutionError::AlreadyRunning.into())
            }
        }
        self.clock.start()?;
        cpu.start()?;
        log::info!("machine started at PC: 0x{:04X}", cpu.pc());
        Ok(())
    }

    /// Pauses the clock and the CPU. On error neither is changed.
    pub fn pause(&mut self) -> Result<(), MachineError> {
        let mut cpu = lock(&self.cpu);
        self.clock.pause()?;
        if let Err(e) = cpu.pause() {
            self.clock.resume()?;
            return Err(e.into());
        }
        Ok(())
    }

    /// Resumes the CPU and its clock. On error neither is changed.
    pub fn resume(&mut self) -> Result<(), MachineError> {
        let mut cpu = lock(&self.cpu);
        cpu.resume()?;
        if let Err(e) = self.clock.resume() {
            cpu.pause()?;
            return Err(e.into());
        }
        Ok(())
    }

    /// Stops the clock and moves the CPU to `Stopped`. Idempotent.
    pub fn stop(&mut self) -> Result<(), MachineError> {
        let stopped = self.clock.stop();
        lock(&self.cpu).stop();
        stopped.map_err(MachineError::from)
    }

    /// Blocks until the clock stops on its own, which happens when the CPU
    /// halts or a watcher breaks.
    pub fn wait(&mut self) -> Result<(), MachineError> {
        self.clock.wait()?;
        Ok(())
    }

    /// Executes one instruction directly, bypassing the clock.
    ///
    /// # Errors
    ///
    /// `ClockError::AlreadyRunning` while the clock is delivering ticks.
    pub fn step(&mut self) -> Result<u8, MachineError> {
        if self.clock.state() == ClockState::Running {
            return Err(ClockError::AlreadyRunning.into());
        }
        Ok(lock(&self.cpu).step()?)
    }

    pub fn registers(&self) -> Registers {
        lock(&self.cpu).registers()
    }

    pub fn state(&self) -> RunState {
        lock(&self.cpu).state()
    }

    pub fn request_irq(&self) {
        lock(&self.cpu).request_irq();
    }

    pub fn request_nmi(&self) {
        lock(&self.cpu).request_nmi();
    }

    pub fn request_reset(&self) {
        lock(&self.cpu).request_reset();
    }
}
