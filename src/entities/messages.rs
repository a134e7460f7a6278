//! Splash and game-over banners.

use crate::assets::Size;
use crate::core::collision::Rect;
use crate::core::config::GameConfig;
use crate::entities::Entity;

#[derive(Debug, Clone)]
pub struct WelcomeMessage {
    pub rect: Rect,
}

impl WelcomeMessage {
    pub fn new(config: &GameConfig, size: Size) -> Self {
        Self {
            rect: centered(config, size, 0.12),
        }
    }
}

impl Entity for WelcomeMessage {
    fn tick(&mut self) {}
}

#[derive(Debug, Clone)]
pub struct GameOverMessage {
    pub rect: Rect,
}

impl GameOverMessage {
    pub fn new(config: &GameConfig, size: Size) -> Self {
        Self {
            rect: centered(config, size, 0.2),
        }
    }
}

impl Entity for GameOverMessage {
    fn tick(&mut self) {}
}

fn centered(config: &GameConfig, size: Size, top_ratio: f64) -> Rect {
    Rect::new(
        (config.window.width - size.w) / 2.0,
        config.window.height * top_ratio,
        size.w,
        size.h,
    )
}
