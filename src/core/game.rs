//! Splash / Play / GameOver state machine.
//!
//! `Game::step` runs exactly one frame of the current phase. When a phase
//! exits, the following phase's frame runs in the same step with no input,
//! so a single tap never triggers two actions.

use crate::assets::{Images, SoundCue};
use crate::core::collision::{check_collision, mark_crossings};
use crate::core::config::GameConfig;
use crate::core::session::Session;
use crate::entities::{CrashCause, Entity, EntityMut, PlayerMode};
use crate::input::InputSignals;
use crate::utils::{ScoreRecord, ScoreSink};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Splash,
    Play,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    Quit,
}

pub struct Game {
    config: GameConfig,
    images: Images,
    sink: Arc<dyn ScoreSink>,
    rng: StdRng,
    player_id: Uuid,
    phase: Phase,
    session: Session,
    cues: Vec<SoundCue>,
}

impl Game {
    pub fn new(
        config: GameConfig,
        images: Images,
        sink: Arc<dyn ScoreSink>,
        mut rng: StdRng,
    ) -> Self {
        let session = Session::new(&config, &images, StdRng::seed_from_u64(rng.gen()));
        Self {
            config,
            images,
            sink,
            rng,
            player_id: Uuid::new_v4(),
            phase: Phase::Splash,
            session,
            cues: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn images(&self) -> &Images {
        &self.images
    }

    pub fn player_id(&self) -> Uuid {
        self.player_id
    }

    /// Sound cues raised since the last call, oldest first.
    pub fn drain_cues(&mut self) -> Vec<SoundCue> {
        std::mem::take(&mut self.cues)
    }

    /// Run one frame. Quit wins over every other signal.
    pub fn step(&mut self, input: InputSignals) -> StepOutcome {
        if input.quit {
            info!(phase = ?self.phase, score = self.session.score.value(), "quit_requested");
            return StepOutcome::Quit;
        }

        let mut signals = input;
        while let Some(next) = self.run_phase(signals) {
            self.enter(next);
            signals = InputSignals::default();
        }
        StepOutcome::Continue
    }

    fn run_phase(&mut self, input: InputSignals) -> Option<Phase> {
        match self.phase {
            Phase::Splash => self.splash_frame(input),
            Phase::Play => self.play_frame(input),
            Phase::GameOver => self.game_over_frame(input),
        }
    }

    fn enter(&mut self, next: Phase) {
        debug!(from = ?self.phase, to = ?next, "phase_changed");
        match next {
            Phase::Splash => {
                let rng = StdRng::seed_from_u64(self.rng.gen());
                self.session = Session::new(&self.config, &self.images, rng);
            }
            Phase::Play => {
                self.cues.push(SoundCue::Swoosh);
                self.session.score.reset();
                match self.session.player.set_mode(PlayerMode::Normal) {
                    Ok(()) => self.cues.push(SoundCue::Wing),
                    Err(error) => warn!(%error, "player_mode_rejected"),
                }
            }
            Phase::GameOver => {
                for mut entity in self.session.game_over_entities() {
                    entity.stop();
                }
            }
        }
        self.phase = next;
    }

    fn splash_frame(&mut self, input: InputSignals) -> Option<Phase> {
        if input.tap {
            return Some(Phase::Play);
        }
        tick_all(self.session.splash_entities());
        None
    }

    fn play_frame(&mut self, input: InputSignals) -> Option<Phase> {
        let player_rect = self.session.player.rect();
        let collision = check_collision(&player_rect, &self.session.floor, &self.session.pipes);
        if let Some(cause) = collision {
            self.crash(cause);
            return Some(Phase::GameOver);
        }

        let session = &mut self.session;
        for _ in 0..mark_crossings(&player_rect, &mut session.pipes) {
            session.score.add();
            self.cues.push(SoundCue::Point);
        }

        if input.tap && session.player.flap() {
            self.cues.push(SoundCue::Wing);
        }

        tick_all(session.play_entities());
        None
    }

    fn game_over_frame(&mut self, input: InputSignals) -> Option<Phase> {
        if input.tap && self.session.player.rests_on(self.session.floor.y) {
            self.submit_score();
            return Some(Phase::Splash);
        }
        tick_all(self.session.game_over_entities());
        None
    }

    fn crash(&mut self, cause: CrashCause) {
        info!(?cause, score = self.session.score.value(), "player_crashed");
        if let Err(error) = self.session.player.crash(cause) {
            warn!(%error, "player_mode_rejected");
        }
        self.cues.push(SoundCue::Hit);
        if cause == CrashCause::Pipe {
            self.cues.push(SoundCue::Die);
        }
    }

    fn submit_score(&self) {
        let record = ScoreRecord::new(self.player_id, self.session.score.value());
        info!(score = record.score, "session_finished");
        self.sink.submit(record);
    }
}

fn tick_all(entities: Vec<EntityMut<'_>>) {
    for mut entity in entities {
        entity.tick();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink(Mutex<Vec<ScoreRecord>>);

    impl ScoreSink for RecordingSink {
        fn submit(&self, record: ScoreRecord) {
            self.0.lock().unwrap().push(record);
        }
    }

    const TAP: InputSignals = InputSignals {
        tap: true,
        quit: false,
    };
    const IDLE: InputSignals = InputSignals {
        tap: false,
        quit: false,
    };

    fn game() -> (Game, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::default());
        let game = Game::new(
            GameConfig::default(),
            Images::placeholder(),
            sink.clone(),
            StdRng::seed_from_u64(42),
        );
        (game, sink)
    }

    #[test]
    fn test_quit_wins_in_every_phase() {
        let (mut g, _) = game();
        let quit = InputSignals {
            tap: true,
            quit: true,
        };
        assert_eq!(g.step(quit), StepOutcome::Quit);
        assert_eq!(g.phase(), Phase::Splash);

        g.step(TAP);
        assert_eq!(g.step(quit), StepOutcome::Quit);
    }

    #[test]
    fn test_tap_on_splash_starts_play_without_flapping_twice() {
        let (mut g, _) = game();
        g.step(IDLE);
        assert_eq!(g.phase(), Phase::Splash);
        assert_eq!(g.step(TAP), StepOutcome::Continue);
        assert_eq!(g.phase(), Phase::Play);
        assert_eq!(g.session().player.mode(), PlayerMode::Normal);
        assert_eq!(g.drain_cues(), vec![SoundCue::Swoosh, SoundCue::Wing]);
        assert!(g.drain_cues().is_empty());
    }

    #[test]
    fn test_floor_crash_enters_game_over_and_freezes_scene() {
        let (mut g, sink) = game();
        g.step(TAP);
        let floor_y = g.session().floor.y;
        let h = g.session().player.h;
        g.session_mut().player.y = floor_y - h;
        g.drain_cues();

        g.step(IDLE);
        assert_eq!(g.phase(), Phase::GameOver);
        assert_eq!(g.session().player.mode(), PlayerMode::Crash);
        assert!(!g.session().pipes.is_scrolling());
        assert!(!g.session().floor.is_scrolling());
        assert_eq!(g.drain_cues(), vec![SoundCue::Hit]);
        assert!(sink.0.lock().unwrap().is_empty());
    }

    #[test]
    fn test_game_over_exit_needs_tap_and_floor_contact() {
        let (mut g, sink) = game();
        g.step(TAP);
        // Park a pipe on top of the bird while it is still high up
        let x = g.session().player.x;
        {
            let pair = &mut g.session_mut().pipes.pairs_mut()[0];
            pair.x = x;
            pair.gap_y = 400.0;
        }
        g.session_mut().player.y = 100.0;
        g.step(IDLE);
        assert_eq!(g.phase(), Phase::GameOver);
        assert!(g.drain_cues().ends_with(&[SoundCue::Hit, SoundCue::Die]));

        // Airborne: tapping does nothing
        g.step(TAP);
        assert_eq!(g.phase(), Phase::GameOver);

        // Let the bird fall to the floor without tapping
        for _ in 0..60 {
            g.step(IDLE);
        }
        assert!(g.session().player.rests_on(g.session().floor.y));
        assert_eq!(g.phase(), Phase::GameOver);
        assert!(sink.0.lock().unwrap().is_empty());

        g.step(TAP);
        assert_eq!(g.phase(), Phase::Splash);
        assert_eq!(sink.0.lock().unwrap().len(), 1);
        assert_eq!(g.session().player.mode(), PlayerMode::ShowMenu);
        assert_eq!(g.session().score.value(), 0);
    }

    #[test]
    fn test_flap_in_play_raises_wing_cue() {
        let (mut g, _) = game();
        g.step(TAP);
        g.drain_cues();
        g.step(TAP);
        assert_eq!(g.drain_cues(), vec![SoundCue::Wing]);
        assert!(g.session().player.vel_y < 0.0);
    }
}
