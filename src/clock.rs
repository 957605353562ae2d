//! # Clock Scheduler
//!
//! A background thread that emits ticks at a fixed frequency and delivers
//! each one, in registration order, to a list of [`TickWatcher`]s.
//!
//! ## Lifecycle
//!
//! `Stopped -> Running <-> Paused -> Stopped`. A stopped scheduler can be
//! started again.
//!
//! Watchers are owned by the scheduler while it is stopped and by the clock
//! thread while it runs; `stop()` joins the thread and takes them back. The
//! watcher list and the configuration can therefore only change while the
//! clock is stopped.
//!
//! ## Pacing
//!
//! Tick deadlines are computed from a monotonic [`Instant`], one period
//! apart. The thread sleeps until shortly before each deadline and spins for
//! the remainder. A tick delivered one period or more after its deadline
//! is counted as late; late ticks are still delivered, never skipped.
//!
//! Pause is observed at tick boundaries: the thread finishes delivering the
//! current tick to every watcher, then blocks on a condition variable until
//! resumed or stopped.
//!
//! # Examples
//!
//! ```
//! use std::ops::ControlFlow;
//! use std::sync::atomic::{AtomicU64, Ordering};
//! use std::sync::Arc;
//! use mos65xx::{ClockConfig, ClockScheduler, ClockState, Tick};
//!
//! let seen = Arc::new(AtomicU64::new(0));
//! let counter = Arc::clone(&seen);
//!
//! let mut clock = ClockScheduler::new(ClockConfig::new(100_000).unwrap());
//! clock
//!     .add_watcher(move |tick: Tick| -> ControlFlow<()> {
//!         counter.fetch_add(1, Ordering::SeqCst);
//!         if tick.index == 99 {
//!             ControlFlow::Break(())
//!         } else {
//!             ControlFlow::Continue(())
//!         }
//!     })
//!     .unwrap();
//!
//! clock.start().unwrap();
//! clock.wait().unwrap();
//!
//! assert_eq!(clock.state(), ClockState::Stopped);
//! assert_eq!(seen.load(Ordering::SeqCst), 100);
//! ```

use std::fmt;
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::ClockError;

const NANOS_PER_SECOND: u64 = 1_000_000_000;

/// Below this much remaining time the clock thread spins instead of sleeping.
const SPIN_THRESHOLD: Duration = Duration::from_micros(200);

/// Clock frequency.
///
/// # Examples
///
/// ```
/// use mos65xx::ClockConfig;
///
/// let pal = ClockConfig::PAL_C64;
/// assert_eq!(pal.frequency_hz(), 985_248);
/// assert_eq!(pal.period_nanos(), 1_014);
///
/// assert!(ClockConfig::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u64", into = "u64")
)]
pub struct ClockConfig {
    frequency_hz: u64,
}

impl ClockConfig {
    /// Highest accepted frequency: one tick per nanosecond.
    pub const MAX_FREQUENCY_HZ: u64 = NANOS_PER_SECOND;

    /// Commodore 64, NTSC (6567 VIC-II).
    pub const NTSC_C64: ClockConfig = ClockConfig {
        frequency_hz: 1_022_727,
    };

    /// Commodore 64, PAL (6569 VIC-II).
    pub const PAL_C64: ClockConfig = ClockConfig {
        frequency_hz: 985_248,
    };

    /// NES/Famicom, NTSC (2A03).
    pub const NTSC_NES: ClockConfig = ClockConfig {
        frequency_hz: 1_789_773,
    };

    pub const ONE_MHZ: ClockConfig = ClockConfig {
        frequency_hz: 1_000_000,
    };

    /// Validates and creates a config.
    ///
    /// # Errors
    ///
    /// `ClockError::InvalidFrequency` for 0 Hz or anything above
    /// [`MAX_FREQUENCY_HZ`](Self::MAX_FREQUENCY_HZ).
    pub const fn new(frequency_hz: u64) -> Result<Self, ClockError> {
        if frequency_hz == 0 || frequency_hz > Self::MAX_FREQUENCY_HZ {
            return Err(ClockError::InvalidFrequency(frequency_hz));
        }
        Ok(ClockConfig { frequency_hz })
    }

    pub const fn frequency_hz(&self) -> u64 {
        self.frequency_hz
    }

    /// Tick period in whole nanoseconds: `1e9 / frequency`, truncated.
    pub const fn period_nanos(&self) -> u64 {
        NANOS_PER_SECOND / self.frequency_hz
    }

    pub const fn period(&self) -> Duration {
        Duration::from_nanos(self.period_nanos())
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self::ONE_MHZ
    }
}

impl TryFrom<u64> for ClockConfig {
    type Error = ClockError;

    fn try_from(frequency_hz: u64) -> Result<Self, Self::Error> {
        Self::new(frequency_hz)
    }
}

impl From<ClockConfig> for u64 {
    fn from(config: ClockConfig) -> u64 {
        config.frequency_hz
    }
}

/// One clock tick as seen by a watcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Ticks delivered before this one since the clock was last started.
    pub index: u64,

    /// Delivered one period or more after its deadline.
    pub late: bool,
}

/// Receives clock ticks on the clock thread.
///
/// Return `ControlFlow::Break(())` to stop the clock. The current tick is
/// still delivered to the remaining watchers first.
///
/// Closures `FnMut(Tick) -> ControlFlow<()>` are watchers too.
pub trait TickWatcher: Send {
    fn on_tick(&mut self, tick: Tick) -> ControlFlow<()>;
}

impl<F> TickWatcher for F
where
    F: FnMut(Tick) -> ControlFlow<()> + Send,
{
    fn on_tick(&mut self, tick: Tick) -> ControlFlow<()> {
        self(tick)
    }
}

/// Handle returned by [`ClockScheduler::add_watcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WatcherId(u64);

impl fmt::Display for WatcherId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Stopped,
    Running,
    Paused,
}

type Watchers = Vec<(WatcherId, Box<dyn TickWatcher>)>;

struct Control {
    state: ClockState,
    stop_requested: bool,
}

struct Shared {
    control: Mutex<Control>,
    wake: Condvar,
    ticks: AtomicU64,
    late_ticks: AtomicU64,
}

/// Locks a mutex, recovering the data if a holder panicked.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Drives tick watchers from a background thread at a fixed frequency.
pub struct ClockScheduler {
    config: ClockConfig,
    watchers: Watchers,
    next_id: u64,
    shared: Arc<Shared>,
    worker: Option<JoinHandle<Watchers>>,
}

impl ClockScheduler {
    pub fn new(config: ClockConfig) -> Self {
        Self {
            config,
            watchers: Vec::new(),
            next_id: 0,
            shared: Arc::new(Shared {
                control: Mutex::new(Control {
                    state: ClockState::Stopped,
                    stop_requested: false,
                }),
                wake: Condvar::new(),
                ticks: AtomicU64::new(0),
                late_ticks: AtomicU64::new(0),
            }),
            worker: None,
        }
    }

    pub fn config(&self) -> ClockConfig {
        self.config
    }

    /// Changes the frequency. Only while stopped.
    pub fn reconfigure(&mut self, config: ClockConfig) -> Result<(), ClockError> {
        self.ensure_stopped()?;
        log::debug!(
            "clock reconfigured: {} Hz -> {} Hz",
            self.config.frequency_hz(),
            config.frequency_hz()
        );
        self.config = config;
        Ok(())
    }

    /// Registers a watcher. Watchers are notified in registration order.
    ///
    /// # Errors
    ///
    /// `ClockError::ModifiedWhileRunning` unless the clock is stopped.
    pub fn add_watcher<W>(&mut self, watcher: W) -> Result<WatcherId, ClockError>
    where
        W: TickWatcher + 'static,
    {
        self.ensure_stopped()?;
        Ok(self.register(Box::new(watcher)))
    }

    pub(crate) fn register(&mut self, watcher: Box<dyn TickWatcher>) -> WatcherId {
        let id = WatcherId(self.next_id);
        self.next_id += 1;
        self.watchers.push((id, watcher));
        id
    }

    /// Unregisters a watcher and hands it back.
    pub fn remove_watcher(&mut self, id: WatcherId) -> Result<Box<dyn TickWatcher>, ClockError> {
        self.ensure_stopped()?;
        let position = self
            .watchers
            .iter()
            .position(|(watcher_id, _)| *watcher_id == id)
            .ok_or(ClockError::UnknownWatcher(id))?;
        Ok(self.watchers.remove(position).1)
    }

    /// Number of registered watchers. Zero while the clock thread holds them.
    pub fn watcher_count(&self) -> usize {
        self.watchers.len()
    }

    pub fn state(&self) -> ClockState {
        lock(&self.shared.control).state
    }

    pub fn is_running(&self) -> bool {
        self.state() == ClockState::Running
    }

    /// Ticks delivered since the last start.
    pub fn ticks(&self) -> u64 {
        self.shared.ticks.load(Ordering::Relaxed)
    }

    /// Ticks delivered one period or more late since the last start.
    pub fn late_ticks(&self) -> u64 {
        self.shared.late_ticks.load(Ordering::Relaxed)
    }

    /// Spawns the clock thread.
    ///
    /// # Errors
    ///
    /// - `ClockError::AlreadyRunning` while running or paused
    /// - `ClockError::NoWatchers` with nothing registered
    pub fn start(&mut self) -> Result<(), ClockError> {
        self.reclaim()?;
        if self.worker.is_some() {
            return Err(ClockError::AlreadyRunning);
        }
        if self.watchers.is_empty() {
            return Err(ClockError::NoWatchers);
        }

        {
            let mut control = lock(&self.shared.control);
            control.state = ClockState::Running;
            control.stop_requested = false;
        }
        self.shared.ticks.store(0, Ordering::Relaxed);
        self.shared.late_ticks.store(0, Ordering::Relaxed);

        let watchers = std::mem::take(&mut self.watchers);
        let shared = Arc::clone(&self.shared);
        let period = self.config.period();

        let spawned = thread::Builder::new()
            .name("mos65xx-clock".into())
            .spawn(move || run(&shared, period, watchers));

        match spawned {
            Ok(handle) => {
                log::info!("clock started at {} Hz", self.config.frequency_hz());
                self.worker = Some(handle);
                Ok(())
            }
            Err(e) => {
                log::warn!("failed to spawn clock thread: {}", e);
                lock(&self.shared.control).state = ClockState::Stopped;
                Err(ClockError::SpawnFailed)
            }
        }
    }

    /// Suspends tick delivery after the current tick.
    pub fn pause(&mut self) -> Result<(), ClockError> {
        let mut control = lock(&self.shared.control);
        if control.state != ClockState::Running {
            return Err(ClockError::NotRunning);
        }
        control.state = ClockState::Paused;
        log::debug!("clock paused");
        Ok(())
    }

    pub fn resume(&mut self) -> Result<(), ClockError> {
        let mut control = lock(&self.shared.control);
        if control.state != ClockState::Paused {
            return Err(ClockError::NotPaused);
        }
        control.state = ClockState::Running;
        self.shared.wake.notify_all();
        log::debug!("clock resumed");
        Ok(())
    }

    /// Stops the clock thread and takes back the watchers. Returns once the
    /// thread has exited. Stopping a stopped clock does nothing.
    ///
    /// Must not be called from a watcher; return `ControlFlow::Break(())`
    /// instead.
    ///
    /// # Errors
    ///
    /// `ClockError::WatcherPanicked` if a watcher panicked on the clock
    /// thread. The watchers are lost and the clock is stopped.
    pub fn stop(&mut self) -> Result<(), ClockError> {
        if self.worker.is_none() {
            return Ok(());
        }

        {
            let mut control = lock(&self.shared.control);
            control.stop_requested = true;
        }
        self.shared.wake.notify_all();

        self.join()
    }

    /// Blocks until the clock stops on its own (a watcher returned
    /// `ControlFlow::Break`), then takes back the watchers.
    ///
    /// # Errors
    ///
    /// - `ClockError::NotRunning` if the clock is paused, which would never
    ///   end on its own
    /// - `ClockError::WatcherPanicked` as for [`stop`](Self::stop)
    pub fn wait(&mut self) -> Result<(), ClockError> {
        if self.worker.is_none() {
            return Ok(());
        }
        if self.state() == ClockState::Paused {
            return Err(ClockError::NotRunning);
        }
        self.join()
    }

    fn join(&mut self) -> Result<(), ClockError> {
        let Some(handle) = self.worker.take() else {
            return Ok(());
        };
        let joined = handle.join();

        {
            let mut control = lock(&self.shared.control);
            control.state = ClockState::Stopped;
            control.stop_requested = false;
        }

        match joined {
            Ok(watchers) => {
                self.watchers = watchers;
                log::info!(
                    "clock stopped after {} ticks ({} late)",
                    self.ticks(),
                    self.late_ticks()
                );
                Ok(())
            }
            Err(_) => {
                log::warn!("clock thread panicked; watchers dropped");
                Err(ClockError::WatcherPanicked)
            }
        }
    }

    /// Joins a clock thread that already stopped itself.
    fn reclaim(&mut self) -> Result<(), ClockError> {
        if self.worker.is_some() && self.state() == ClockState::Stopped {
            self.join()?;
        }
        Ok(())
    }

    fn ensure_stopped(&mut self) -> Result<(), ClockError> {
        self.reclaim()?;
        if self.worker.is_some() {
            return Err(ClockError::ModifiedWhileRunning);
        }
        Ok(())
    }
}

impl Drop for ClockScheduler {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            log::warn!("error stopping clock on drop: {}", e);
        }
    }
}

/// Marks the clock stopped when the thread exits, panics included.
struct StoppedOnExit<'a>(&'a Shared);

impl Drop for StoppedOnExit<'_> {
    fn drop(&mut self) {
        lock(&self.0.control).state = ClockState::Stopped;
    }
}

fn run(shared: &Shared, period: Duration, mut watchers: Watchers) -> Watchers {
    let _stopped = StoppedOnExit(shared);
    let mut index = 0u64;
    let mut deadline = Instant::now() + period;

    while let Some(resumed) = wait_while_paused(shared) {
        if resumed {
            deadline = Instant::now() + period;
        }

        let late = wait_until(deadline, period);
        if late && shared.late_ticks.fetch_add(1, Ordering::Relaxed) == 0 {
            log::warn!("clock falling behind at tick {}", index);
        }

        let tick = Tick { index, late };
        let mut halt = false;
        for (id, watcher) in watchers.iter_mut() {
            if watcher.on_tick(tick).is_break() {
                log::debug!("watcher {} stopped the clock at tick {}", id, index);
                halt = true;
            }
        }

        index += 1;
        shared.ticks.store(index, Ordering::Relaxed);
        if halt {
            break;
        }
        deadline += period;
    }

    watchers
}

/// Blocks while paused. `None` when a stop was requested, otherwise whether
/// the thread was paused (so the caller re-anchors its deadline).
fn wait_while_paused(shared: &Shared) -> Option<bool> {
    let mut control = lock(&shared.control);
    let mut paused = false;
    loop {
        if control.stop_requested {
            return None;
        }
        if control.state != ClockState::Paused {
            return Some(paused);
        }
        paused = true;
        control = shared
            .wake
            .wait(control)
            .unwrap_or_else(PoisonError::into_inner);
    }
}

/// Waits for `deadline`. Returns true if it had already passed by at least
/// one period.
fn wait_until(deadline: Instant, period: Duration) -> bool {
    let now = Instant::now();
    if now >= deadline {
        return now.duration_since(deadline) >= period;
    }

    let remaining = deadline - now;
    if remaining > SPIN_THRESHOLD {
        thread::sleep(remaining - SPIN_THRESHOLD);
    }
    while Instant::now() < deadline {
        std::hint::spin_loop();
    }
    false
}
