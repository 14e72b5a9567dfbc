//! Pure countdown state machine.
//!
//! [`transition`] maps a state and an event to the next state plus the side
//! effect the caller must perform. It touches no hardware, so every path can
//! be exercised on the host.

use crate::display::Frame;
use crate::types::{TickOutcome, TimerState};

/// Input to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Falling edge on the start button.
    Press,
    /// Periodic tick.
    Tick,
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Effect {
    /// Nothing to do.
    None,
    /// Arm the periodic tick.
    Schedule,
    /// Draw `frame`, then hand `outcome` back to the scheduler.
    Render {
        /// Screen to draw.
        frame: Frame,
        /// Whether the tick keeps running.
        outcome: TickOutcome,
    },
    /// Tick arrived with no countdown active; stop without drawing.
    Stop,
}

/// A state change and the effect that goes with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    /// State after the event.
    pub state: TimerState,
    /// Effect to perform.
    pub effect: Effect,
}

/// Computes the next state for `event`.
///
/// `duration_secs` is the value `remaining` is reloaded with on a press and
/// on completion.
pub fn transition(state: TimerState, event: Event, duration_secs: u32) -> Transition {
    match (event, state.armed) {
        (Event::Press, true) => Transition {
            state: TimerState {
                remaining: duration_secs,
                armed: false,
            },
            effect: Effect::Schedule,
        },
        (Event::Press, false) => Transition {
            state,
            effect: Effect::None,
        },
        (Event::Tick, true) => Transition {
            state,
            effect: Effect::Stop,
        },
        (Event::Tick, false) => match state.remaining.checked_sub(1) {
            Some(next) => Transition {
                state: TimerState {
                    remaining: next,
                    armed: false,
                },
                effect: Effect::Render {
                    frame: Frame::Countdown(state.remaining),
                    outcome: TickOutcome::Continue,
                },
            },
            // The zero tick resets instead of showing "Timer: 0".
            None => Transition {
                state: TimerState::armed(duration_secs),
                effect: Effect::Render {
                    frame: Frame::Menu,
                    outcome: TickOutcome::Stop,
                },
            },
        },
    }
}
