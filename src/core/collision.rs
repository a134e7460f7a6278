//! Hit tests between the player, the floor and the pipes.

use crate::entities::{CrashCause, Floor, Pipes};

/// Axis-aligned box in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.w / 2.0
    }

    /// Interiors intersect. Boxes that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Floor is checked first so a bird skimming the ground between two
/// lower pipes is reported as a floor crash.
pub fn check_collision(player: &Rect, floor: &Floor, pipes: &Pipes) -> Option<CrashCause> {
    if player.bottom() >= floor.y {
        return Some(CrashCause::Floor);
    }
    let hit_pipe = pipes.pairs().iter().any(|pair| {
        player.overlaps(&pipes.upper_rect(pair)) || player.overlaps(&pipes.lower_rect(pair))
    });
    hit_pipe.then_some(CrashCause::Pipe)
}

/// Mark every pair whose center the player has reached and return how many
/// were newly marked. A marked pair never counts again.
pub fn mark_crossings(player: &Rect, pipes: &mut Pipes) -> u32 {
    let half_width = pipes.pipe_size().w / 2.0;
    let player_center = player.center_x();
    let mut crossed = 0;
    for pair in pipes.pairs_mut() {
        if !pair.passed && pair.x + half_width <= player_center {
            pair.passed = true;
            crossed += 1;
        }
    }
    crossed
}
