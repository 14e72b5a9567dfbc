#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`CountdownController`**: Owns the countdown state, reacts to button presses and ticks
//! - **`TimerState`**: Remaining seconds plus the armed flag
//! - **`DisplaySurface`**: Trait to implement for your display (clear, draw text, flush)
//! - **`Frame`**: One full screen (welcome, menu, countdown)
//! - **`ButtonInterrupt`** / **`EdgeInterruptPin`**: Edge-triggered button input
//! - **`PeriodicScheduler`**: Trait for a fixed-cadence repeating tick
//! - **`RepeatingTimer`**: `PeriodicScheduler` on top of any `TimeSource`
//! - **`SharedController`**: Critical-section guarded slot for sharing state with interrupt handlers
//! - **`transition`**: The pure state machine behind the controller
//!
//! The countdown shows `"Timer: N"` once per tick for N = duration down to 1,
//! then draws the idle menu on the following tick and re-arms the button.

#[macro_use]
mod log;

pub mod button;
pub mod controller;
pub mod display;
pub mod scheduler;
pub mod shared;
pub mod state;
pub mod time;
pub mod types;

pub use button::{ButtonInterrupt, Edge, EdgeInterruptPin};
pub use controller::CountdownController;
pub use display::{DisplaySurface, Frame, TextBuffer, countdown_text};
pub use scheduler::{PeriodicHandle, PeriodicScheduler, RepeatingTimer, SchedulerError, ServiceTiming};
pub use shared::SharedController;
pub use state::{Effect, Event, Transition, transition};
pub use time::{TimeDuration, TimeInstant, TimeSource};
pub use types::{Config, ConfigError, Phase, PressOutcome, TickOutcome, TimerState};

/// Countdown length used by [`Config::default`].
pub const DEFAULT_DURATION_SECS: u32 = 10;

/// Period between countdown ticks.
pub const TICK_INTERVAL_MS: u32 = 1000;

/// Maximum length of one line of display text.
pub const TEXT_CAPACITY: usize = 20;

/// How long the boot greeting stays on screen.
pub const WELCOME_DURATION_MS: u32 = 1500;
