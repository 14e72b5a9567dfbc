//! Fixed-cadence periodic scheduling.
//!
//! Provides the [`PeriodicScheduler`] trait the controller arms its tick
//! with, and [`RepeatingTimer`], an implementation driven by any
//! [`TimeSource`].
//!
//! Deadlines sit on a grid anchored at the moment of scheduling: the k-th
//! tick is due at `anchor + k * interval`, no matter how long earlier
//! callbacks took. If servicing falls behind by more than one period, the
//! callback runs once and the missed deadlines are skipped (and counted).

use crate::time::{TimeDuration, TimeInstant, TimeSource};
use crate::types::TickOutcome;

/// Opaque identifier of a scheduled repeating task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PeriodicHandle(u32);

impl PeriodicHandle {
    /// Creates a handle from a raw id. Meant for scheduler implementations.
    #[inline]
    pub const fn from_raw(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw id.
    #[inline]
    pub const fn id(&self) -> u32 {
        self.0
    }
}

/// Timing information returned by service operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServiceTiming<D> {
    /// Nothing is scheduled.
    Idle,

    /// A task is scheduled. Service again after the specified delay.
    Delay(D),

    /// The callback just returned [`TickOutcome::Stop`] and the task has been
    /// deregistered.
    Complete,
}

/// Errors that can occur when scheduling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SchedulerError {
    /// The interval is zero.
    ZeroInterval,
    /// A task is already scheduled and the scheduler has a single slot.
    AlreadyScheduled,
}

impl core::fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SchedulerError::ZeroInterval => write!(f, "interval must be non-zero"),
            SchedulerError::AlreadyScheduled => write!(f, "a periodic task is already scheduled"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SchedulerError {}

/// Trait for abstracting a repeating-timer facility.
///
/// There is no cancel operation: a task ends when its callback returns
/// [`TickOutcome::Stop`]. A platform whose own timer calls the tick directly
/// reports that return through [`stop`](Self::stop).
pub trait PeriodicScheduler {
    /// Duration type used for intervals and delays.
    type Duration: TimeDuration;

    /// Schedules a repeating task with its first deadline one `interval`
    /// from now.
    fn schedule(&mut self, interval: Self::Duration) -> Result<PeriodicHandle, SchedulerError>;

    /// Runs `on_tick` if the scheduled task is due.
    ///
    /// Call this from the timer interrupt, or from a loop honoring the
    /// returned delay.
    fn service<F: FnMut() -> TickOutcome>(&mut self, on_tick: F) -> ServiceTiming<Self::Duration>;

    /// Drops the scheduled task after a tick run outside
    /// [`service`](Self::service) returned [`TickOutcome::Stop`].
    ///
    /// Does nothing when no task is scheduled.
    fn stop(&mut self);

    /// Returns true while a task is scheduled.
    fn is_scheduled(&self) -> bool;
}

#[derive(Debug, Clone, Copy)]
struct Task<I> {
    handle: PeriodicHandle,
    anchor: I,
    interval_ms: u64,
    /// Index of the last deadline that has been serviced (0 = none yet).
    fired: u64,
}

/// Single-slot repeating timer on top of a [`TimeSource`].
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `T` - Time source implementation type
pub struct RepeatingTimer<'t, I: TimeInstant, T: TimeSource<I>> {
    time_source: &'t T,
    task: Option<Task<I>>,
    next_id: u32,
    skipped: u32,
}

impl<'t, I: TimeInstant, T: TimeSource<I>> RepeatingTimer<'t, I, T> {
    /// Creates a timer with nothing scheduled.
    pub fn new(time_source: &'t T) -> Self {
        Self {
            time_source,
            task: None,
            next_id: 0,
            skipped: 0,
        }
    }

    /// Returns the handle of the scheduled task, if any.
    pub fn handle(&self) -> Option<PeriodicHandle> {
        self.task.map(|task| task.handle)
    }

    /// Returns how many deadlines were dropped because servicing fell behind.
    pub fn skipped_ticks(&self) -> u32 {
        self.skipped
    }

    /// Returns the time left until the next deadline, if a task is scheduled.
    pub fn until_next(&self) -> Option<I::Duration> {
        let task = self.task.as_ref()?;
        let elapsed = self.elapsed_ms(task);
        let next = task.interval_ms.saturating_mul(task.fired + 1);
        Some(I::Duration::from_millis(next.saturating_sub(elapsed)))
    }

    fn elapsed_ms(&self, task: &Task<I>) -> u64 {
        self.time_source
            .now()
            .duration_since(task.anchor)
            .as_millis()
    }
}

impl<I: TimeInstant, T: TimeSource<I>> PeriodicScheduler for RepeatingTimer<'_, I, T> {
    type Duration = I::Duration;

    fn schedule(&mut self, interval: I::Duration) -> Result<PeriodicHandle, SchedulerError> {
        if self.task.is_some() {
            return Err(SchedulerError::AlreadyScheduled);
        }

        let interval_ms = interval.as_millis();
        if interval_ms == 0 {
            return Err(SchedulerError::ZeroInterval);
        }

        let handle = PeriodicHandle(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.task = Some(Task {
            handle,
            anchor: self.time_source.now(),
            interval_ms,
            fired: 0,
        });

        debug!("scheduled task {} every {} ms", handle.0, interval_ms);
        Ok(handle)
    }

    fn service<F: FnMut() -> TickOutcome>(&mut self, mut on_tick: F) -> ServiceTiming<I::Duration> {
        let Some(mut task) = self.task else {
            return ServiceTiming::Idle;
        };

        let elapsed = self.elapsed_ms(&task);
        let due = elapsed / task.interval_ms;

        if due <= task.fired {
            let next = task.interval_ms * (task.fired + 1);
            return ServiceTiming::Delay(I::Duration::from_millis(next - elapsed));
        }

        let missed = due - task.fired - 1;
        if missed > 0 {
            warn!("skipping {} missed deadline(s)", missed);
            self.skipped = self
                .skipped
                .saturating_add(u32::try_from(missed).unwrap_or(u32::MAX));
        }
        task.fired = due;

        match on_tick() {
            TickOutcome::Stop => {
                debug!("task {} stopped", task.handle.0);
                self.task = None;
                ServiceTiming::Complete
            }
            TickOutcome::Continue => {
                self.task = Some(task);
                let next = task.interval_ms * (due + 1);
                ServiceTiming::Delay(I::Duration::from_millis(next - elapsed))
            }
        }
    }

    fn stop(&mut self) {
        if let Some(_task) = self.task.take() {
            debug!("task {} stopped outside service", _task.handle.0);
        }
    }

    fn is_scheduled(&self) -> bool {
        self.task.is_some()
    }
}
