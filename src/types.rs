//! Core types shared by the controller, the scheduler and callers.

use crate::{DEFAULT_DURATION_SECS, TICK_INTERVAL_MS};

/// Countdown state owned by a controller.
///
/// `armed` is true only while no countdown is active, and `remaining` stays
/// within `0..=duration`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerState {
    /// Seconds left in the current countdown.
    pub remaining: u32,
    /// Whether a button press may start a new countdown.
    pub armed: bool,
}

impl TimerState {
    /// Boot state: armed, with the full duration loaded.
    #[inline]
    pub const fn armed(duration_secs: u32) -> Self {
        Self {
            remaining: duration_secs,
            armed: true,
        }
    }

    /// Returns the phase this state corresponds to.
    #[inline]
    pub fn phase(&self) -> Phase {
        if self.armed {
            Phase::Idle
        } else {
            Phase::Running {
                remaining: self.remaining,
            }
        }
    }
}

/// Coarse view of a [`TimerState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Waiting for a button press.
    Idle,
    /// Counting down. `remaining` reaches 0 one tick before the reset.
    Running {
        /// Seconds still to be shown.
        remaining: u32,
    },
}

/// Value a periodic callback hands back to its scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// Keep the task scheduled.
    Continue,
    /// Deregister the task permanently.
    Stop,
}

/// Result of a button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressOutcome {
    /// The press armed a new countdown.
    Started,
    /// A countdown was already running; nothing changed.
    Ignored,
}

/// Controller configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Countdown length in seconds.
    pub duration_secs: u32,
    /// Period between ticks in milliseconds.
    pub tick_interval_ms: u32,
}

impl Config {
    /// Returns a copy with a different countdown length.
    #[inline]
    pub const fn with_duration(mut self, duration_secs: u32) -> Self {
        self.duration_secs = duration_secs;
        self
    }

    /// Returns a copy with a different tick period.
    #[inline]
    pub const fn with_tick_interval(mut self, tick_interval_ms: u32) -> Self {
        self.tick_interval_ms = tick_interval_ms;
        self
    }

    /// Checks the configuration for values the scheduler cannot honor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            duration_secs: DEFAULT_DURATION_SECS,
            tick_interval_ms: TICK_INTERVAL_MS,
        }
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A tick period of zero would fire continuously.
    ZeroTickInterval,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::ZeroTickInterval => write!(f, "tick interval must be non-zero"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
