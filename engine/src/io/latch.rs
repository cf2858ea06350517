// engine/src/io/latch.rs
#![forbid(unsafe_code)]

use super::sensor::{Actuator, Button};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputEvent {
    Hold(Button),
    Release(Button),
}

/**
 * Actuator that remembers which buttons are held and every call it received.
 *
 * Holding an already-held button or releasing a released one is recorded in
 * the event log but leaves the held set unchanged.
 */
#[derive(Clone, Debug, Default)]
pub struct InputLatch {
    held: [bool; Button::COUNT],
    events: Vec<InputEvent>,
    presses: u64,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_held(&self, button: Button) -> bool {
        self.held[button.idx()]
    }

    pub fn held(&self) -> Vec<Button> {
        Button::ALL
            .iter()
            .copied()
            .filter(|b| self.is_held(*b))
            .collect()
    }

    pub fn any_held(&self) -> bool {
        self.held.iter().any(|&h| h)
    }

    pub fn events(&self) -> &[InputEvent] {
        &self.events
    }

    /// Number of transitions from released to held.
    pub fn presses(&self) -> u64 {
        self.presses
    }
}

impl Actuator for InputLatch {
    fn hold(&mut self, button: Button) {
        self.events.push(InputEvent::Hold(button));
        if !self.held[button.idx()] {
            self.presses += 1;
        }
        self.held[button.idx()] = true;
    }

    fn release(&mut self, button: Button) {
        self.events.push(InputEvent::Release(button));
        self.held[button.idx()] = false;
    }
}
