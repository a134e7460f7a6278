//! Core game state and logic.

pub mod clock;
pub mod collision;
pub mod config;
pub mod constants;
pub mod game;
pub mod game_loop;
pub mod session;

pub use clock::{FrameTimer, Pacer, SimulatedPacer, SystemPacer};
pub use collision::Rect;
pub use config::{AppConfig, GameConfig, Window};
pub use game::{Game, Phase, StepOutcome};
pub use game_loop::GameLoop;
pub use session::Session;
