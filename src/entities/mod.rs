//! Scene entities.
//!
//! Every entity advances one frame per `tick`; `stop` freezes its scrolling
//! or animation for the GameOver phase and `reset` returns it to the state a
//! fresh session starts from. The session iterates over them through
//! [`EntityMut`], a closed set of borrowed variants.

pub mod background;
pub mod floor;
pub mod messages;
pub mod pipes;
pub mod player;
pub mod score;

pub use background::Background;
pub use floor::Floor;
pub use messages::{GameOverMessage, WelcomeMessage};
pub use pipes::{PipePair, Pipes};
pub use player::{CrashCause, Player, PlayerMode, PlayerModeError};
pub use score::Score;

pub trait Entity {
    fn tick(&mut self);

    fn stop(&mut self) {}

    fn reset(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Background,
    Floor,
    Player,
    Pipes,
    Score,
    WelcomeMessage,
    GameOverMessage,
}

pub enum EntityMut<'a> {
    Background(&'a mut Background),
    Floor(&'a mut Floor),
    Player(&'a mut Player),
    Pipes(&'a mut Pipes),
    Score(&'a mut Score),
    WelcomeMessage(&'a mut WelcomeMessage),
    GameOverMessage(&'a mut GameOverMessage),
}

macro_rules! dispatch {
    ($target:expr, $entity:ident => $body:expr) => {
        match $target {
            EntityMut::Background($entity) => $body,
            EntityMut::Floor($entity) => $body,
            EntityMut::Player($entity) => $body,
            EntityMut::Pipes($entity) => $body,
            EntityMut::Score($entity) => $body,
            EntityMut::WelcomeMessage($entity) => $body,
            EntityMut::GameOverMessage($entity) => $body,
        }
    };
}

impl EntityMut<'_> {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityMut::Background(_) => EntityKind::Background,
            EntityMut::Floor(_) => EntityKind::Floor,
            EntityMut::Player(_) => EntityKind::Player,
            EntityMut::Pipes(_) => EntityKind::Pipes,
            EntityMut::Score(_) => EntityKind::Score,
            EntityMut::WelcomeMessage(_) => EntityKind::WelcomeMessage,
            EntityMut::GameOverMessage(_) => EntityKind::GameOverMessage,
        }
    }

    pub fn tick(&mut self) {
        dispatch!(self, entity => entity.tick())
    }

    pub fn stop(&mut self) {
        dispatch!(self, entity => entity.stop())
    }

    pub fn reset(&mut self) {
        dispatch!(self, entity => entity.reset())
    }
}
