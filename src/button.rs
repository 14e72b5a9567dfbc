//! Edge-triggered button input.
//!
//! [`ButtonInterrupt`] wraps a pin that can raise an interrupt on a signal
//! edge. Call [`ButtonInterrupt::handle`] from the interrupt vector; the
//! handler runs once per edge and nothing is queued.

/// Signal edge that raises the interrupt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// High to low. An active-low button being pressed.
    Falling,
    /// Low to high.
    Rising,
}

/// Trait for abstracting a GPIO pin with edge-interrupt support.
///
/// Implement this for your HAL's input pin. Enabling the interrupt in the
/// interrupt controller (NVIC or equivalent) stays with the platform code.
pub trait EdgeInterruptPin {
    /// Enables the interrupt for `edge` on this pin.
    fn listen(&mut self, edge: Edge);

    /// Returns true if an `edge` event is latched on this pin.
    fn is_pending(&self, edge: Edge) -> bool;

    /// Acknowledges a latched `edge` event.
    fn clear_pending(&mut self, edge: Edge);
}

/// A button whose edge events are delivered to a handler.
pub struct ButtonInterrupt<P: EdgeInterruptPin> {
    pin: P,
    edge: Edge,
}

impl<P: EdgeInterruptPin> ButtonInterrupt<P> {
    /// Configures `pin` to interrupt on `edge`.
    ///
    /// Any event latched before configuration is discarded.
    pub fn configure(mut pin: P, edge: Edge) -> Self {
        pin.clear_pending(edge);
        pin.listen(edge);
        trace!("button configured");
        Self { pin, edge }
    }

    /// Runs `handler` if this button has a pending edge.
    ///
    /// Clears the event before calling the handler so an edge arriving while
    /// the handler runs is latched again instead of lost. Returns false when
    /// the interrupt was raised by another pin sharing the vector.
    pub fn handle<F: FnOnce()>(&mut self, handler: F) -> bool {
        if !self.pin.is_pending(self.edge) {
            return false;
        }

        self.pin.clear_pending(self.edge);
        handler();
        true
    }

    /// Returns the configured edge.
    pub fn edge(&self) -> Edge {
        self.edge
    }

    /// Releases the pin.
    pub fn free(self) -> P {
        self.pin
    }
}
