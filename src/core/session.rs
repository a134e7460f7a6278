//! One run of the game, from splash screen to game over.

use crate::assets::Images;
use crate::core::config::GameConfig;
use crate::entities::*;
use rand::rngs::StdRng;

/// All entities of a session. Dropped and rebuilt when GameOver exits.
#[derive(Debug, Clone)]
pub struct Session {
    pub background: Background,
    pub floor: Floor,
    pub player: Player,
    pub pipes: Pipes,
    pub score: Score,
    pub welcome: WelcomeMessage,
    pub game_over: GameOverMessage,
}

impl Session {
    pub fn new(config: &GameConfig, images: &Images, rng: StdRng) -> Self {
        Self {
            background: Background::new(),
            floor: Floor::new(config, images.base.size),
            player: Player::new(config, images.player_size()),
            pipes: Pipes::new(config, images.pipe.size, rng),
            score: Score::new(config.window.height),
            welcome: WelcomeMessage::new(config, images.welcome_message.size),
            game_over: GameOverMessage::new(config, images.game_over.size),
        }
    }

    /// Entities animated on the splash screen, in draw order.
    pub fn splash_entities(&mut self) -> Vec<EntityMut<'_>> {
        vec![
            EntityMut::Background(&mut self.background),
            EntityMut::Floor(&mut self.floor),
            EntityMut::Player(&mut self.player),
            EntityMut::WelcomeMessage(&mut self.welcome),
        ]
    }

    pub fn play_entities(&mut self) -> Vec<EntityMut<'_>> {
        vec![
            EntityMut::Background(&mut self.background),
            EntityMut::Floor(&mut self.floor),
            EntityMut::Pipes(&mut self.pipes),
            EntityMut::Score(&mut self.score),
            EntityMut::Player(&mut self.player),
        ]
    }

    pub fn game_over_entities(&mut self) -> Vec<EntityMut<'_>> {
        vec![
            EntityMut::Background(&mut self.background),
            EntityMut::Floor(&mut self.floor),
            EntityMut::Pipes(&mut self.pipes),
            EntityMut::Score(&mut self.score),
            EntityMut::Player(&mut self.player),
            EntityMut::GameOverMessage(&mut self.game_over),
        ]
    }
}
