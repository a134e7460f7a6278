//! Scrolling ground strip.

use crate::assets::Size;
use crate::core::config::GameConfig;
use crate::core::constants::FLOOR_SPEED;
use crate::entities::Entity;

#[derive(Debug, Clone)]
pub struct Floor {
    pub x: f64,
    /// Top edge; equals the viewport height.
    pub y: f64,
    pub w: f64,
    pub h: f64,
    vel_x: f64,
    /// How far the base image can shift before it wraps.
    x_extra: f64,
}

impl Floor {
    pub fn new(config: &GameConfig, size: Size) -> Self {
        Self {
            x: 0.0,
            y: config.window.viewport_height(),
            w: size.w,
            h: size.h,
            vel_x: FLOOR_SPEED,
            x_extra: size.w - config.window.width,
        }
    }

    pub fn is_scrolling(&self) -> bool {
        self.vel_x != 0.0
    }
}

impl Entity for Floor {
    fn tick(&mut self) {
        if self.x_extra > 0.0 {
            self.x = -((-self.x + self.vel_x) % self.x_extra);
        }
    }

    fn stop(&mut self) {
        self.vel_x = 0.0;
    }

    fn reset(&mut self) {
        self.x = 0.0;
        self.vel_x = FLOOR_SPEED;
    }
}
