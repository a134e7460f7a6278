//! The main loop: input, one state-machine step, telemetry, sound, draw,
//! then sleep until the next frame.

use crate::assets::Sounds;
use crate::core::clock::{FrameTimer, Pacer};
use crate::core::game::{Game, StepOutcome};
use crate::input::InputSource;
use crate::telemetry::TelemetrySampler;
use crate::ui::{FrameView, Renderer};
use tracing::{info, warn};

pub struct GameLoop<I: InputSource, R: Renderer, P: Pacer> {
    game: Game,
    input: I,
    renderer: R,
    pacer: P,
    timer: FrameTimer,
    sampler: TelemetrySampler,
    sounds: Sounds,
    frames: u64,
}

impl<I: InputSource, R: Renderer, P: Pacer> GameLoop<I, R, P> {
    pub fn new(
        game: Game,
        input: I,
        renderer: R,
        pacer: P,
        sampler: TelemetrySampler,
        sounds: Sounds,
    ) -> Self {
        let timer = FrameTimer::new(game.config().frame_duration(), pacer.now());
        Self {
            game,
            input,
            renderer,
            pacer,
            timer,
            sampler,
            sounds,
            frames: 0,
        }
    }

    /// Run frames until the player quits. Returns the number of frames run.
    pub fn run(&mut self) -> u64 {
        info!(fps = self.game.config().fps, "game_loop_started");
        while self.run_frame() == StepOutcome::Continue {}
        info!(
            frames = self.frames,
            stats = ?self.sampler.stats(),
            "game_loop_stopped"
        );
        self.frames
    }

    pub fn run_frame(&mut self) -> StepOutcome {
        let input = self.input.poll();
        if self.game.step(input) == StepOutcome::Quit {
            return StepOutcome::Quit;
        }

        let now = self.pacer.now();
        let fps = self.timer.record_frame(now);
        self.sampler.sample(now, fps);

        for cue in self.game.drain_cues() {
            if self.sounds.is_loaded(cue) {
                self.renderer.play_cue(cue);
            }
        }

        let view = FrameView::new(&self.game, self.sampler.gauges().snapshot());
        if let Err(error) = self.renderer.render(&view) {
            warn!(%error, frame = self.frames, "render_failed");
        }

        let wait = self.timer.until_next_frame(self.pacer.now());
        self.pacer.sleep(wait);
        self.frames += 1;
        StepOutcome::Continue
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn pacer(&self) -> &P {
        &self.pacer
    }

    pub fn sampler(&self) -> &TelemetrySampler {
        &self.sampler
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetError, AssetProvider, Images, SoundCue};
    use crate::core::clock::SimulatedPacer;
    use crate::core::config::GameConfig;
    use crate::core::game::Phase;
    use crate::input::{InputSignals, ScriptedInput};
    use crate::telemetry::{Gauges, LatencyProbe, NetCounters, NetTotals, TelemetryError};
    use crate::ui::NullRenderer;
    use crate::utils::LogScoreSink;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    struct InstantProbe;

    impl LatencyProbe for InstantProbe {
        fn measure(&self) -> Result<Duration, TelemetryError> {
            Ok(Duration::from_millis(3))
        }
    }

    struct FlatCounters;

    impl NetCounters for FlatCounters {
        fn read(&mut self) -> Result<NetTotals, TelemetryError> {
            Ok(NetTotals::default())
        }
    }

    struct AllClips;

    impl AssetProvider for AllClips {
        fn fetch(&self, _name: &str) -> Result<Vec<u8>, AssetError> {
            Ok(vec![0])
        }
    }

    fn build(
        rt: &tokio::runtime::Runtime,
        script: Vec<InputSignals>,
        sounds: Sounds,
    ) -> GameLoop<ScriptedInput, NullRenderer, SimulatedPacer> {
        let start = Instant::now();
        let pacer = SimulatedPacer::starting_at(start);
        let game = Game::new(
            GameConfig::default(),
            Images::placeholder(),
            Arc::new(LogScoreSink),
            StdRng::seed_from_u64(8),
        );
        let sampler = TelemetrySampler::new(
            Gauges::new(),
            rt.handle().clone(),
            Arc::new(InstantProbe),
            Box::new(FlatCounters),
            start,
        );
        GameLoop::new(
            game,
            ScriptedInput::quitting_after(script),
            NullRenderer::default(),
            pacer,
            sampler,
            sounds,
        )
    }

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap()
    }

    #[test]
    fn test_runs_until_quit_at_target_rate() {
        let rt = runtime();
        let mut game_loop = build(&rt, vec![InputSignals::default(); 90], Sounds::empty());
        let frames = game_loop.run();
        assert_eq!(frames, 90);
        assert_eq!(game_loop.renderer().frames, 90);

        let fps = game_loop.sampler().gauges().snapshot().fps;
        assert!((fps - 30.0).abs() < 0.5, "fps was {fps}");
        assert_eq!(game_loop.sampler().stats().bandwidth_reads, 2);
        rt.shutdown_background();
    }

    #[test]
    fn test_quit_frame_is_not_rendered() {
        let rt = runtime();
        let mut game_loop = build(&rt, vec![], Sounds::empty());
        assert_eq!(game_loop.run_frame(), StepOutcome::Quit);
        assert_eq!(game_loop.renderer().frames, 0);
        rt.shutdown_background();
    }

    #[test]
    fn test_cues_reach_renderer_only_when_loaded() {
        let rt = runtime();
        let tap = InputSignals {
            tap: true,
            quit: false,
        };

        let mut silent = build(&rt, vec![tap], Sounds::empty());
        silent.run_frame();
        assert_eq!(silent.game().phase(), Phase::Play);
        assert!(silent.renderer().cues.is_empty());

        let mut loud = build(&rt, vec![tap], Sounds::load(&AllClips));
        loud.run_frame();
        assert_eq!(loud.renderer().cues, vec![SoundCue::Swoosh, SoundCue::Wing]);
        rt.shutdown_background();
    }
}
