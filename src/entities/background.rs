//! Static backdrop.

use crate::entities::Entity;

#[derive(Debug, Clone, Default)]
pub struct Background;

impl Background {
    pub fn new() -> Self {
        Self
    }
}

impl Entity for Background {
    fn tick(&mut self) {}
}
