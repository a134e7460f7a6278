//! Integration test: a full session through the state machine.
//!
//! Splash -> Play (steered through pipe gaps) -> GameOver -> Splash, checking
//! score, sound cues and the single score submission.

use flappy::assets::{Images, SoundCue};
use flappy::core::{Game, GameConfig, Phase, StepOutcome};
use flappy::input::InputSignals;
use flappy::utils::{ScoreRecord, ScoreSink};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::{Arc, Mutex};

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

fn new_game(seed: u64) -> (Game, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    let game = Game::new(
        GameConfig::default(),
        Images::placeholder(),
        sink.clone(),
        StdRng::seed_from_u64(seed),
    );
    (game, sink)
}

/// Park the bird in the middle of the gap of the nearest pair it has not cleared.
fn steer(game: &mut Game) {
    let session = game.session_mut();
    let player_x = session.player.x;
    let player_h = session.player.h;
    let width = session.pipes.pipe_size().w;
    let gap = session.pipes.gap();
    if let Some(pair) = session
        .pipes
        .pairs()
        .iter()
        .find(|pair| pair.x + width > player_x)
    {
        session.player.y = pair.gap_y + (gap - player_h) / 2.0;
        session.player.vel_y = 0.0;
    }
}

#[test]
fn test_full_session_scores_and_submits_once() {
    let (mut game, sink) = new_game(2024);
    let mut cues = Vec::new();

    assert_eq!(game.step(TAP), StepOutcome::Continue);
    assert_eq!(game.phase(), Phase::Play);
    cues.extend(game.drain_cues());

    let mut frames = 0;
    while game.session().score.value() < 3 {
        steer(&mut game);
        game.step(IDLE);
        cues.extend(game.drain_cues());
        assert_eq!(game.phase(), Phase::Play, "crashed while steering");
        frames += 1;
        assert!(frames < 1000, "never scored three points");
    }

    // Stop steering and let gravity finish the run
    let mut frames = 0;
    while game.phase() == Phase::Play {
        game.step(IDLE);
        cues.extend(game.drain_cues());
        frames += 1;
        assert!(frames < 500, "never crashed");
    }
    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(game.session().score.value(), 3);

    let mut frames = 0;
    let floor_y = game.session().floor.y;
    while !game.session().player.rests_on(floor_y) {
        game.step(IDLE);
        frames += 1;
        assert!(frames < 500, "bird never reached the floor");
    }
    assert!(sink.0.lock().unwrap().is_empty());

    game.step(TAP);
    assert_eq!(game.phase(), Phase::Splash);
    assert_eq!(game.session().score.value(), 0);

    let records = sink.0.lock().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].score, 3);
    assert_eq!(records[0].player_id, game.player_id());

    assert_eq!(&cues[..2], &[SoundCue::Swoosh, SoundCue::Wing]);
    let points = cues.iter().filter(|c| **c == SoundCue::Point).count();
    assert_eq!(points, 3);
    assert!(cues.contains(&SoundCue::Hit));
}

#[test]
fn test_pipes_freeze_after_crash() {
    let (mut game, _) = new_game(7);
    game.step(TAP);
    let mut frames = 0;
    while game.phase() == Phase::Play {
        game.step(IDLE);
        frames += 1;
        assert!(frames < 500);
    }

    let xs: Vec<f64> = game.session().pipes.pairs().iter().map(|p| p.x).collect();
    let floor_x = game.session().floor.x;
    for _ in 0..10 {
        game.step(IDLE);
    }
    let after: Vec<f64> = game.session().pipes.pairs().iter().map(|p| p.x).collect();
    assert_eq!(xs, after);
    assert_eq!(game.session().floor.x, floor_x);
    assert!(!game.session().pipes.is_scrolling());
}

#[test]
fn test_quit_from_game_over_does_not_submit() {
    let (mut game, sink) = new_game(11);
    game.step(TAP);
    while game.phase() == Phase::Play {
        game.step(IDLE);
    }
    let quit = InputSignals {
        tap: true,
        quit: true,
    };
    assert_eq!(game.step(quit), StepOutcome::Quit);
    assert!(sink.0.lock().unwrap().is_empty());
}
