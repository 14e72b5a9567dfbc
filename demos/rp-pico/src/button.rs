//! GPIO edge interrupts for the countdown button.

use countdown_timer::{Edge, EdgeInterruptPin};
use rp_pico::hal::gpio::{FunctionSioInput, Interrupt, Pin, PinId, PullUp};

/// Pulled-up input pin raising `IO_IRQ_BANK0` on edges.
pub struct PicoButton<I: PinId> {
    pin: Pin<I, FunctionSioInput, PullUp>,
}

impl<I: PinId> PicoButton<I> {
    /// Wrap a pin already configured as a pulled-up input.
    pub fn new(pin: Pin<I, FunctionSioInput, PullUp>) -> Self {
        Self { pin }
    }
}

fn interrupt_for(edge: Edge) -> Interrupt {
    match edge {
        Edge::Falling => Interrupt::EdgeLow,
        Edge::Rising => Interrupt::EdgeHigh,
    }
}

impl<I: PinId> EdgeInterruptPin for PicoButton<I> {
    fn listen(&mut self, edge: Edge) {
        self.pin.set_interrupt_enabled(interrupt_for(edge), true);
    }

    fn is_pending(&self, edge: Edge) -> bool {
        self.pin.interrupt_status(interrupt_for(edge))
    }

    fn clear_pending(&mut self, edge: Edge) {
        self.pin.clear_interrupt(interrupt_for(edge));
    }
}
