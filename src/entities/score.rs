//! Pipes passed in the current session.

use crate::entities::Entity;

#[derive(Debug, Clone, Default)]
pub struct Score {
    value: u32,
    /// Logical y of the digits' top edge.
    pub y: f64,
}

impl Score {
    pub fn new(window_height: f64) -> Self {
        Self {
            value: 0,
            y: window_height * 0.1,
        }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn add(&mut self) {
        self.value = self.value.saturating_add(1);
    }
}

impl Entity for Score {
    fn tick(&mut self) {}

    fn reset(&mut self) {
        self.value = 0;
    }
}
