//! Shared test infrastructure for countdown-timer integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use std::cell::Cell;
use std::rc::Rc;

use countdown_timer::{
    Config, CountdownController, DisplaySurface, Edge, EdgeInterruptPin, PeriodicHandle,
    PeriodicScheduler, RepeatingTimer, SchedulerError, ServiceTiming, TickOutcome, TimeDuration,
    TimeInstant, TimeSource,
};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    const ZERO: Self = TestDuration(0);

    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0 - earlier.0)
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given number of milliseconds
    pub fn advance(&self, millis: u64) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + millis));
    }

    pub fn millis(&self) -> u64 {
        self.current_time.get().0
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Mock Display
// ============================================================================

/// One call made on the display
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayOp {
    Clear,
    Text {
        x: i32,
        y: i32,
        scale: u8,
        text: String,
    },
    Flush,
}

/// Error returned by a display configured to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusError;

/// Mock display that records every call for testing
#[derive(Debug, Default)]
pub struct MockDisplay {
    ops: Vec<DisplayOp>,
    failing_flushes: u32,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `count` flushes fail, simulating bus errors
    pub fn fail_flushes(&mut self, count: u32) {
        self.failing_flushes = count;
    }

    pub fn ops(&self) -> &[DisplayOp] {
        &self.ops
    }

    pub fn clear_history(&mut self) {
        self.ops.clear();
    }

    /// All texts drawn, in order
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DisplayOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// The N of every "Timer: N" drawn, in order
    pub fn countdown_values(&self) -> Vec<u32> {
        self.texts()
            .iter()
            .filter_map(|text| text.strip_prefix("Timer: "))
            .map(|n| n.parse().unwrap())
            .collect()
    }

    /// How many times the idle menu was drawn
    pub fn menu_renders(&self) -> usize {
        self.texts()
            .iter()
            .filter(|text| **text == "Menu Cronometro")
            .count()
    }
}

impl DisplaySurface for MockDisplay {
    type Error = BusError;

    fn clear(&mut self) -> Result<(), BusError> {
        self.ops.push(DisplayOp::Clear);
        Ok(())
    }

    fn draw_text(&mut self, x: i32, y: i32, scale: u8, text: &str) -> Result<(), BusError> {
        self.ops.push(DisplayOp::Text {
            x,
            y,
            scale,
            text: text.to_string(),
        });
        Ok(())
    }

    fn flush(&mut self) -> Result<(), BusError> {
        if self.failing_flushes > 0 {
            self.failing_flushes -= 1;
            return Err(BusError);
        }
        self.ops.push(DisplayOp::Flush);
        Ok(())
    }
}

// ============================================================================
// Manual Scheduler
// ============================================================================

/// Scheduler where every `service` call counts as a due tick.
///
/// Holds no references, so controllers built on it can cross threads.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    active: Option<PeriodicHandle>,
    interval: Option<TestDuration>,
    schedules: u32,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times `schedule` succeeded
    pub fn schedule_count(&self) -> u32 {
        self.schedules
    }

    pub fn last_interval(&self) -> Option<TestDuration> {
        self.interval
    }
}

impl PeriodicScheduler for ManualScheduler {
    type Duration = TestDuration;

    fn schedule(&mut self, interval: TestDuration) -> Result<PeriodicHandle, SchedulerError> {
        if self.active.is_some() {
            return Err(SchedulerError::AlreadyScheduled);
        }
        let handle = PeriodicHandle::from_raw(self.schedules);
        self.schedules += 1;
        self.active = Some(handle);
        self.interval = Some(interval);
        Ok(handle)
    }

    fn service<F: FnMut() -> TickOutcome>(&mut self, mut on_tick: F) -> ServiceTiming<TestDuration> {
        if self.active.is_none() {
            return ServiceTiming::Idle;
        }
        match on_tick() {
            TickOutcome::Stop => {
                self.active = None;
                ServiceTiming::Complete
            }
            TickOutcome::Continue => ServiceTiming::Delay(self.interval.unwrap_or(TestDuration::ZERO)),
        }
    }

    fn stop(&mut self) {
        self.active = None;
    }

    fn is_scheduled(&self) -> bool {
        self.active.is_some()
    }
}

// ============================================================================
// Mock Pin
// ============================================================================

/// Mock edge-interrupt pin; clones share the same line, so a test can keep
/// one clone to latch edges while the button owns the other
#[derive(Debug, Clone, Default)]
pub struct MockPin {
    listening: Rc<Cell<Option<Edge>>>,
    pending: Rc<Cell<bool>>,
}

impl MockPin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latch an edge like the hardware would
    pub fn press(&self) {
        self.pending.set(true);
    }

    pub fn listening(&self) -> Option<Edge> {
        self.listening.get()
    }

    pub fn is_latched(&self) -> bool {
        self.pending.get()
    }
}

impl EdgeInterruptPin for MockPin {
    fn listen(&mut self, edge: Edge) {
        self.listening.set(Some(edge));
    }

    fn is_pending(&self, edge: Edge) -> bool {
        self.pending.get() && self.listening.get() == Some(edge)
    }

    fn clear_pending(&mut self, _edge: Edge) {
        self.pending.set(false);
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

pub type TimedController<'t> =
    CountdownController<MockDisplay, RepeatingTimer<'t, TestInstant, MockTimeSource>>;

pub type ManualController = CountdownController<MockDisplay, ManualScheduler>;

/// Controller on a real `RepeatingTimer` driven by `clock`
pub fn timed_controller(clock: &MockTimeSource, duration_secs: u32) -> TimedController<'_> {
    CountdownController::new(
        MockDisplay::new(),
        RepeatingTimer::new(clock),
        Config::default().with_duration(duration_secs),
    )
    .unwrap()
}

/// Controller on a `ManualScheduler`
pub fn manual_controller(duration_secs: u32) -> ManualController {
    CountdownController::new(
        MockDisplay::new(),
        ManualScheduler::new(),
        Config::default().with_duration(duration_secs),
    )
    .unwrap()
}

/// Service the controller until its tick stops, returning the number of ticks run
pub fn run_to_completion(controller: &mut ManualController) -> u32 {
    let mut ticks = 0;
    loop {
        match controller.service() {
            ServiceTiming::Delay(_) => ticks += 1,
            ServiceTiming::Complete => return ticks + 1,
            ServiceTiming::Idle => return ticks,
        }
    }
}
