//! Countdown controller.
//!
//! Provides [`CountdownController`], which owns the countdown state, the
//! display and the periodic scheduler. Button presses arm a periodic tick;
//! each tick renders the remaining time and counts down until the controller
//! returns to the idle menu and re-arms itself.

use crate::display::{DisplaySurface, Frame};
use crate::scheduler::{PeriodicHandle, PeriodicScheduler, SchedulerError, ServiceTiming};
use crate::state::{Effect, Event, transition};
use crate::time::TimeDuration;
use crate::types::{Config, ConfigError, Phase, PressOutcome, TickOutcome, TimerState};

/// Everything a tick touches. Kept apart from the scheduler so the scheduler
/// can borrow it while running the tick callback.
struct Countdown<D> {
    display: D,
    state: TimerState,
    handle: Option<PeriodicHandle>,
    duration_secs: u32,
    render_failures: u32,
}

impl<D: DisplaySurface> Countdown<D> {
    fn render(&mut self, frame: Frame) {
        if let Err(_err) = frame.render(&mut self.display) {
            self.render_failures = self.render_failures.saturating_add(1);
            warn!(
                "render of {} failed: {}",
                frame,
                defmt::Debug2Format(&_err)
            );
        }
    }

    fn tick(&mut self) -> TickOutcome {
        let next = transition(self.state, Event::Tick, self.duration_secs);
        self.state = next.state;

        let outcome = match next.effect {
            Effect::Render { frame, outcome } => {
                trace!("tick: {}", frame);
                self.render(frame);
                outcome
            }
            Effect::Stop => TickOutcome::Stop,
            Effect::None | Effect::Schedule => unreachable!("a tick never schedules"),
        };

        if outcome == TickOutcome::Stop {
            info!("countdown finished, button re-armed");
            self.handle = None;
        }
        outcome
    }
}

/// Drives a button-armed countdown on a display.
///
/// The controller is the single owner of the countdown state. Platform code
/// forwards the button interrupt to [`on_button_press`](Self::on_button_press)
/// and the timer interrupt to [`service`](Self::service) (or calls
/// [`on_tick`](Self::on_tick) directly when its own timer facility invokes
/// the callback). Share it between interrupt handlers through
/// [`SharedController`](crate::SharedController).
///
/// Rendering happens inside whichever context delivers the event and may
/// block on bus I/O for the duration of a frame transfer.
///
/// # Type Parameters
/// * `D` - Display implementation type
/// * `S` - Periodic scheduler implementation type
pub struct CountdownController<D: DisplaySurface, S: PeriodicScheduler> {
    countdown: Countdown<D>,
    scheduler: S,
    config: Config,
}

impl<D: DisplaySurface, S: PeriodicScheduler> CountdownController<D, S> {
    /// Creates an armed controller with the full duration loaded.
    ///
    /// Draws nothing; call [`show_welcome`](Self::show_welcome) or
    /// [`show_menu`](Self::show_menu) during boot.
    pub fn new(display: D, scheduler: S, config: Config) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            countdown: Countdown {
                display,
                state: TimerState::armed(config.duration_secs),
                handle: None,
                duration_secs: config.duration_secs,
                render_failures: 0,
            },
            scheduler,
            config,
        })
    }

    /// Draws the boot greeting.
    pub fn show_welcome(&mut self) {
        self.countdown.render(Frame::Welcome);
    }

    /// Draws the idle menu.
    pub fn show_menu(&mut self) {
        self.countdown.render(Frame::Menu);
    }

    /// Handles a button press.
    ///
    /// Starts a countdown if the controller is armed; otherwise does nothing.
    /// If the scheduler refuses the tick, the controller stays armed.
    pub fn on_button_press(&mut self) -> Result<PressOutcome, SchedulerError> {
        let next = transition(self.countdown.state, Event::Press, self.config.duration_secs);
        if next.effect != Effect::Schedule {
            debug!("press ignored, countdown running");
            return Ok(PressOutcome::Ignored);
        }

        let interval = S::Duration::from_millis(u64::from(self.config.tick_interval_ms));
        let handle = self.scheduler.schedule(interval).inspect_err(|_err| {
            warn!("could not schedule countdown tick: {}", _err);
        })?;

        self.countdown.state = next.state;
        self.countdown.handle = Some(handle);
        info!("countdown started: {} s", self.config.duration_secs);
        Ok(PressOutcome::Started)
    }

    /// Runs one tick.
    ///
    /// Renders `"Timer: N"` and counts down, or, once the count has reached
    /// zero, draws the menu, re-arms and returns [`TickOutcome::Stop`]. On
    /// `Stop` the scheduler is told to drop its task so the next press can
    /// schedule again.
    pub fn on_tick(&mut self) -> TickOutcome {
        let outcome = self.countdown.tick();
        if outcome == TickOutcome::Stop {
            self.scheduler.stop();
        }
        outcome
    }

    /// Lets the scheduler run the tick if one is due.
    pub fn service(&mut self) -> ServiceTiming<S::Duration> {
        let countdown = &mut self.countdown;
        self.scheduler.service(|| countdown.tick())
    }

    /// Returns the current countdown state.
    pub fn state(&self) -> TimerState {
        self.countdown.state
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        self.countdown.state.phase()
    }

    /// Returns true if a press would start a countdown.
    pub fn is_armed(&self) -> bool {
        self.countdown.state.armed
    }

    /// Returns the seconds left in the current countdown.
    pub fn remaining(&self) -> u32 {
        self.countdown.state.remaining
    }

    /// Returns the handle of the running tick, if a countdown is active.
    pub fn handle(&self) -> Option<PeriodicHandle> {
        self.countdown.handle
    }

    /// Returns the configuration.
    pub fn config(&self) -> Config {
        self.config
    }

    /// Returns how many render steps failed since boot.
    pub fn render_failures(&self) -> u32 {
        self.countdown.render_failures
    }

    /// Returns a reference to the display.
    pub fn display(&self) -> &D {
        &self.countdown.display
    }

    /// Returns a mutable reference to the display.
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.countdown.display
    }

    /// Returns a reference to the scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
}
