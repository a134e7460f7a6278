//! Terminal front end.

pub mod layout;
pub mod scene;

use crate::assets::{Images, SoundCue};
use crate::core::config::GameConfig;
use crate::core::game::{Game, Phase};
use crate::core::session::Session;
use crate::telemetry::TelemetrySnapshot;
use ratatui::backend::Backend;
use ratatui::Terminal;
use std::io::{self, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("terminal draw failed: {0}")]
    Io(#[from] io::Error),
}

/// Everything needed to draw one frame.
pub struct FrameView<'a> {
    pub phase: Phase,
    pub session: &'a Session,
    pub images: &'a Images,
    pub config: &'a GameConfig,
    pub telemetry: TelemetrySnapshot,
}

impl<'a> FrameView<'a> {
    pub fn new(game: &'a Game, telemetry: TelemetrySnapshot) -> Self {
        Self {
            phase: game.phase(),
            session: game.session(),
            images: game.images(),
            config: game.config(),
            telemetry,
        }
    }
}

pub trait Renderer {
    fn render(&mut self, view: &FrameView<'_>) -> Result<(), RenderError>;

    /// Only called for cues whose clip was loaded.
    fn play_cue(&mut self, _cue: SoundCue) {}
}

/// Draws with ratatui; point and hit cues ring the terminal bell.
pub struct TerminalRenderer<B: Backend> {
    terminal: Terminal<B>,
    bell: Box<dyn Write>,
    pending_bell: bool,
    bells_rung: u64,
}

impl<B: Backend> TerminalRenderer<B> {
    pub fn new(terminal: Terminal<B>) -> Self {
        Self {
            terminal,
            bell: Box::new(io::sink()),
            pending_bell: false,
            bells_rung: 0,
        }
    }

    pub fn with_bell(mut self, out: impl Write + 'static) -> Self {
        self.bell = Box::new(out);
        self
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub fn bells_rung(&self) -> u64 {
        self.bells_rung
    }
}

impl<B: Backend> Renderer for TerminalRenderer<B> {
    fn render(&mut self, view: &FrameView<'_>) -> Result<(), RenderError> {
        self.terminal.draw(|frame| scene::draw_scene(frame, view))?;
        if std::mem::take(&mut self.pending_bell) {
            self.bell.write_all(b"\x07")?;
            self.bell.flush()?;
            self.bells_rung += 1;
        }
        Ok(())
    }

    fn play_cue(&mut self, cue: SoundCue) {
        if matches!(cue, SoundCue::Point | SoundCue::Hit) {
            self.pending_bell = true;
        }
    }
}

/// Draws nothing. Counts frames and records cues.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames: u64,
    pub cues: Vec<SoundCue>,
}

impl Renderer for NullRenderer {
    fn render(&mut self, _view: &FrameView<'_>) -> Result<(), RenderError> {
        self.frames += 1;
        Ok(())
    }

    fn play_cue(&mut self, cue: SoundCue) {
        self.cues.push(cue);
    }
}
