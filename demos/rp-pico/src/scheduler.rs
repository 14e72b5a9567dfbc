//! Repeating timer driven by an RP2040 alarm.
//!
//! The [`RepeatingTimer`] keeps the whole-second grid; the alarm is only
//! re-armed with whatever delay it reports, so interrupt latency never
//! accumulates.

use countdown_timer::{
    PeriodicHandle, PeriodicScheduler, RepeatingTimer, SchedulerError, ServiceTiming, TickOutcome,
};
use fugit::MicrosDurationU32;
use rp_pico::hal::timer::{Alarm, Alarm0};
use rtt_target::rprintln;

use crate::time::{Duration, HardwareTimer, Instant};

/// [`PeriodicScheduler`] raising `TIMER_IRQ_0` at every deadline.
pub struct AlarmScheduler {
    timer: RepeatingTimer<'static, Instant, HardwareTimer>,
    alarm: Alarm0,
}

impl AlarmScheduler {
    /// Take over `alarm` and enable its interrupt.
    ///
    /// The NVIC line still has to be unmasked by the caller.
    pub fn new(time_source: &'static HardwareTimer, mut alarm: Alarm0) -> Self {
        alarm.enable_interrupt();
        Self {
            timer: RepeatingTimer::new(time_source),
            alarm,
        }
    }

    /// Deadlines dropped because servicing fell behind.
    pub fn skipped_ticks(&self) -> u32 {
        self.timer.skipped_ticks()
    }

    fn arm(&mut self, delay: Duration) {
        // A zero countdown would never fire.
        let micros = delay.as_alarm_micros().max(1);
        if self.alarm.schedule(MicrosDurationU32::micros(micros)).is_err() {
            rprintln!("alarm rejected a {} us delay", micros);
        }
    }
}

impl PeriodicScheduler for AlarmScheduler {
    type Duration = Duration;

    fn schedule(&mut self, interval: Duration) -> Result<PeriodicHandle, SchedulerError> {
        let handle = self.timer.schedule(interval)?;
        self.arm(interval);
        Ok(handle)
    }

    fn service<F: FnMut() -> TickOutcome>(&mut self, on_tick: F) -> ServiceTiming<Duration> {
        self.alarm.clear_interrupt();

        let timing = self.timer.service(on_tick);
        match timing {
            ServiceTiming::Delay(delay) => self.arm(delay),
            ServiceTiming::Complete => {
                rprintln!("countdown finished, {} tick(s) skipped so far", self.skipped_ticks());
            }
            ServiceTiming::Idle => {}
        }
        timing
    }

    fn stop(&mut self) {
        // A pending alarm still fires once and finds nothing to service.
        self.timer.stop();
    }

    fn is_scheduled(&self) -> bool {
        self.timer.is_scheduled()
    }
}
