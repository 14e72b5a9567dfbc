//! RP2040 clock for the countdown tick.
//!
//! The 64-bit microsecond counter never stops, so a [`RepeatingTimer`]
//! anchored on it keeps whole-second deadlines across alarm latency.
//!
//! [`RepeatingTimer`]: countdown_timer::RepeatingTimer

use fugit::{MicrosDurationU64, TimerInstantU64};
use countdown_timer::{TimeDuration, TimeInstant, TimeSource};

/// Span between two counter readings, in microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Duration(MicrosDurationU64);

impl Duration {
    /// Alarm countdown for this span. The alarm register is 32 bits wide,
    /// so anything past ~71 minutes saturates.
    pub fn as_alarm_micros(&self) -> u32 {
        u32::try_from(self.0.to_micros()).unwrap_or(u32::MAX)
    }
}

impl TimeDuration for Duration {
    const ZERO: Self = Duration(MicrosDurationU64::from_ticks(0));

    fn as_millis(&self) -> u64 {
        self.0.to_millis()
    }

    fn from_millis(millis: u64) -> Self {
        Duration(MicrosDurationU64::millis(millis))
    }
}

/// Raw counter reading; one tick per microsecond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Instant(TimerInstantU64<1_000_000>);

impl TimeInstant for Instant {
    type Duration = Duration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        // 64-bit microsecond counter; wraps after half a million years.
        let ticks = self.0.ticks().wrapping_sub(earlier.0.ticks());
        Duration(MicrosDurationU64::from_ticks(ticks))
    }
}

impl From<TimerInstantU64<1_000_000>> for Instant {
    fn from(instant: TimerInstantU64<1_000_000>) -> Self {
        Instant(instant)
    }
}

/// Reads the counter of the shared `TIMER` peripheral.
pub struct HardwareTimer {
    timer: rp_pico::hal::Timer,
}

impl HardwareTimer {
    /// `timer` is `Copy`; the alarm taken from it stays usable.
    pub fn new(timer: rp_pico::hal::Timer) -> Self {
        Self { timer }
    }
}

impl TimeSource<Instant> for HardwareTimer {
    fn now(&self) -> Instant {
        Instant(self.timer.get_counter())
    }
}
