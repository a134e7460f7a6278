//! Scrolling pipe pairs.

use crate::assets::Size;
use crate::core::collision::Rect;
use crate::core::config::{GameConfig, Window};
use crate::core::constants::{PIPE_SPAWN_OFFSET, PIPE_SPEED};
use crate::entities::Entity;
use rand::rngs::StdRng;
use rand::Rng;

/// An upper and a lower pipe sharing one x position.
#[derive(Debug, Clone, PartialEq)]
pub struct PipePair {
    pub x: f64,
    /// Top edge of the gap; the upper pipe ends here.
    pub gap_y: f64,
    /// Set once the player has crossed this pair and scored it.
    pub passed: bool,
}

impl PipePair {
    pub fn new(x: f64, gap_y: f64) -> Self {
        Self {
            x,
            gap_y,
            passed: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Pipes {
    pairs: Vec<PipePair>,
    vel_x: f64,
    size: Size,
    gap: f64,
    window: Window,
    rng: StdRng,
}

impl Pipes {
    pub fn new(config: &GameConfig, size: Size, rng: StdRng) -> Self {
        let mut pipes = Self {
            pairs: Vec::new(),
            vel_x: PIPE_SPEED,
            size,
            gap: config.pipe_gap,
            window: config.window,
            rng,
        };
        pipes.spawn_initial();
        pipes
    }

    /// Active pairs, ordered by x.
    pub fn pairs(&self) -> &[PipePair] {
        &self.pairs
    }

    pub fn pairs_mut(&mut self) -> &mut [PipePair] {
        &mut self.pairs
    }

    pub fn pipe_size(&self) -> Size {
        self.size
    }

    pub fn gap(&self) -> f64 {
        self.gap
    }

    pub fn is_scrolling(&self) -> bool {
        self.vel_x != 0.0
    }

    pub fn upper_rect(&self, pair: &PipePair) -> Rect {
        Rect::new(pair.x, pair.gap_y - self.size.h, self.size.w, self.size.h)
    }

    pub fn lower_rect(&self, pair: &PipePair) -> Rect {
        Rect::new(pair.x, pair.gap_y + self.gap, self.size.w, self.size.h)
    }

    pub fn center_x(&self, pair: &PipePair) -> f64 {
        pair.x + self.size.w / 2.0
    }

    fn spawn_initial(&mut self) {
        let first_x = self.window.width + self.size.w * 3.0;
        let second_x = first_x + self.size.w * 3.5;
        for x in [first_x, second_x] {
            let mut pair = self.random_pair();
            pair.x = x;
            self.pairs.push(pair);
        }
    }

    fn random_pair(&mut self) -> PipePair {
        let viewport = self.window.viewport_height();
        let span = (viewport * 0.6 - self.gap) as i64;
        let offset = if span > 0 {
            self.rng.gen_range(0..span)
        } else {
            0
        };
        let gap_y = (offset + (viewport * 0.2) as i64) as f64;
        PipePair::new(self.window.width + PIPE_SPAWN_OFFSET, gap_y)
    }

    fn can_spawn(&self) -> bool {
        match self.pairs.last() {
            None => true,
            Some(last) => self.window.width - (last.x + self.size.w) > self.size.w * 2.5,
        }
    }
}

impl Entity for Pipes {
    fn tick(&mut self) {
        if self.can_spawn() {
            let pair = self.random_pair();
            self.pairs.push(pair);
        }
        let width = self.size.w;
        self.pairs.retain(|pair| pair.x >= -width);
        for pair in &mut self.pairs {
            pair.x += self.vel_x;
        }
    }

    fn stop(&mut self) {
        self.vel_x = 0.0;
    }

    fn reset(&mut self) {
        self.vel_x = PIPE_SPEED;
        self.pairs.clear();
        self.spawn_initial();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn pipes(seed: u64) -> Pipes {
        Pipes::new(
            &GameConfig::default(),
            Size::new(52.0, 320.0),
            StdRng::seed_from_u64(seed),
        )
    }

    #[test]
    fn test_initial_pairs_start_off_screen() {
        let p = pipes(1);
        assert_eq!(p.pairs().len(), 2);
        assert_eq!(p.pairs()[0].x, 288.0 + 52.0 * 3.0);
        assert_eq!(p.pairs()[1].x, 288.0 + 52.0 * 6.5);
        assert!(p.pairs().iter().all(|pair| !pair.passed));
    }

    #[test]
    fn test_gap_stays_inside_viewport_band() {
        let mut p = pipes(9);
        let viewport = GameConfig::default().window.viewport_height();
        for _ in 0..2000 {
            p.tick();
            for pair in p.pairs() {
                assert!(pair.gap_y >= (viewport * 0.2).floor());
                assert!(pair.gap_y + p.gap() <= viewport * 0.8 + 1.0);
            }
        }
    }

    #[test]
    fn test_x_strictly_decreases_while_scrolling() {
        let mut p = pipes(2);
        let before = p.pairs()[0].x;
        p.tick();
        assert_eq!(p.pairs()[0].x, before + PIPE_SPEED);
    }

    #[test]
    fn test_pairs_stay_ordered_and_get_removed() {
        let mut p = pipes(4);
        for _ in 0..500 {
            p.tick();
            let xs: Vec<f64> = p.pairs().iter().map(|pair| pair.x).collect();
            assert!(xs.windows(2).all(|w| w[0] < w[1]));
            assert!(xs.iter().all(|&x| x >= -52.0 + PIPE_SPEED));
        }
        assert!(p.pairs().len() <= 4);
    }

    #[test]
    fn test_stop_freezes_scrolling() {
        let mut p = pipes(5);
        p.stop();
        let xs: Vec<f64> = p.pairs().iter().map(|pair| pair.x).collect();
        p.tick();
        let after: Vec<f64> = p.pairs().iter().map(|pair| pair.x).collect();
        assert_eq!(xs, after);
        assert!(!p.is_scrolling());
    }

    #[test]
    fn test_rects_frame_the_gap() {
        let p = pipes(6);
        let pair = PipePair::new(100.0, 150.0);
        let upper = p.upper_rect(&pair);
        let lower = p.lower_rect(&pair);
        assert_eq!(upper.bottom(), 150.0);
        assert_eq!(lower.y, 150.0 + p.gap());
        assert_eq!(p.center_x(&pair), 126.0);
    }

    #[test]
    fn test_reset_respawns_initial_pairs() {
        let mut p = pipes(7);
        for _ in 0..100 {
            p.tick();
        }
        p.stop();
        p.reset();
        assert_eq!(p.pairs().len(), 2);
        assert!(p.is_scrolling());
    }
}
