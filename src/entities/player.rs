//! The bird.

use crate::assets::Size;
use crate::core::collision::Rect;
use crate::core::config::GameConfig;
use crate::core::constants::*;
use crate::entities::Entity;
use thiserror::Error;

/// Ordered: a session only ever moves forward through these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PlayerMode {
    /// Idle bob on the splash screen.
    ShowMenu,
    Normal,
    Crash,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrashCause {
    Floor,
    Pipe,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("player mode cannot go back from {from:?} to {to:?}")]
pub struct PlayerModeError {
    pub from: PlayerMode,
    pub to: PlayerMode,
}

/// Per-mode motion parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Motion {
    acc_y: f64,
    max_vel_y: f64,
    min_vel_y: f64,
    vel_rot: f64,
    rot_min: f64,
    rot_max: f64,
    flap_vel: f64,
}

impl Motion {
    fn show_menu() -> Self {
        Self {
            acc_y: SHOW_MENU_ACCELERATION,
            max_vel_y: SHOW_MENU_VELOCITY_LIMIT,
            min_vel_y: -SHOW_MENU_VELOCITY_LIMIT,
            vel_rot: 0.0,
            rot_min: 0.0,
            rot_max: 0.0,
            flap_vel: 0.0,
        }
    }

    fn normal() -> Self {
        Self {
            acc_y: GRAVITY,
            max_vel_y: MAX_FALL_SPEED,
            min_vel_y: MAX_RISE_SPEED,
            vel_rot: ROTATION_SPEED,
            rot_min: ROTATION_MIN,
            rot_max: ROTATION_MAX,
            flap_vel: FLAP_VELOCITY,
        }
    }

    fn crash(self) -> Self {
        Self {
            acc_y: CRASH_ACCELERATION,
            max_vel_y: CRASH_MAX_FALL_SPEED,
            vel_rot: CRASH_ROTATION_SPEED,
            ..self
        }
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    /// Positive is downward.
    pub vel_y: f64,
    /// Degrees, positive tilts the beak up.
    pub rot: f64,
    mode: PlayerMode,
    motion: Motion,
    flapped: bool,
    frame: u32,
    wing_step: usize,
    wings_stopped: bool,
    min_y: f64,
    max_y: f64,
    spawn_y: f64,
    crash_cause: Option<CrashCause>,
}

impl Player {
    pub fn new(config: &GameConfig, size: Size) -> Self {
        let spawn_y = ((config.window.height - size.h) / 2.0).floor();
        let mut player = Self {
            x: (config.window.width * PLAYER_X_RATIO).floor(),
            y: spawn_y,
            w: size.w,
            h: size.h,
            vel_y: 0.0,
            rot: 0.0,
            mode: PlayerMode::ShowMenu,
            motion: Motion::show_menu(),
            flapped: false,
            frame: 0,
            wing_step: 0,
            wings_stopped: false,
            min_y: -2.0 * size.h,
            max_y: config.window.viewport_height() - size.h * 0.75,
            spawn_y,
            crash_cause: None,
        };
        player.enter_show_menu();
        player
    }

    pub fn mode(&self) -> PlayerMode {
        self.mode
    }

    pub fn crash_cause(&self) -> Option<CrashCause> {
        self.crash_cause
    }

    /// Index into the three wing sprites.
    pub fn sprite_index(&self) -> usize {
        WING_CYCLE[self.wing_step]
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }

    pub fn set_mode(&mut self, mode: PlayerMode) -> Result<(), PlayerModeError> {
        if mode < self.mode {
            return Err(PlayerModeError {
                from: self.mode,
                to: mode,
            });
        }
        self.mode = mode;
        match mode {
            PlayerMode::ShowMenu => self.enter_show_menu(),
            PlayerMode::Normal => self.enter_normal(),
            PlayerMode::Crash => self.enter_crash(),
        }
        Ok(())
    }

    /// Record what was hit and switch to the crash fall.
    pub fn crash(&mut self, cause: CrashCause) -> Result<(), PlayerModeError> {
        self.set_mode(PlayerMode::Crash)?;
        self.crash_cause = Some(cause);
        Ok(())
    }

    /// Upward impulse. Only honoured in normal flight and below the ceiling margin.
    pub fn flap(&mut self) -> bool {
        if self.mode != PlayerMode::Normal || self.y <= self.min_y {
            return false;
        }
        self.vel_y = self.motion.flap_vel;
        self.flapped = true;
        self.rot = FLAP_ROTATION;
        true
    }

    /// Bottom edge is on (or within a pixel of) the floor line.
    pub fn rests_on(&self, floor_y: f64) -> bool {
        self.y + self.h >= floor_y - 1.0
    }

    fn enter_show_menu(&mut self) {
        self.motion = Motion::show_menu();
        self.vel_y = SHOW_MENU_VELOCITY;
        self.rot = 0.0;
        self.flapped = false;
    }

    fn enter_normal(&mut self) {
        self.motion = Motion::normal();
        self.vel_y = FLAP_VELOCITY;
        self.rot = FLAP_ROTATION;
        self.flapped = false;
    }

    fn enter_crash(&mut self) {
        self.wings_stopped = true;
        self.motion = self.motion.crash();
        self.vel_y = CRASH_VELOCITY;
    }

    fn advance_wings(&mut self) {
        self.frame = self.frame.wrapping_add(1);
        if !self.wings_stopped && self.frame % WING_FRAME_TICKS == 0 {
            self.wing_step = (self.wing_step + 1) % WING_CYCLE.len();
        }
    }

    fn tick_show_menu(&mut self) {
        if self.vel_y >= self.motion.max_vel_y || self.vel_y <= self.motion.min_vel_y {
            self.motion.acc_y = -self.motion.acc_y;
        }
        self.vel_y += self.motion.acc_y;
        self.y += self.vel_y;
    }

    fn tick_normal(&mut self) {
        if self.vel_y < self.motion.max_vel_y && !self.flapped {
            self.vel_y = (self.vel_y + self.motion.acc_y).min(self.motion.max_vel_y);
        }
        self.flapped = false;
        self.y = (self.y + self.vel_y).clamp(self.min_y, self.max_y);
        self.rotate();
    }

    fn tick_crash(&mut self) {
        if (self.min_y..=self.max_y).contains(&self.y) {
            self.y = (self.y + self.vel_y).clamp(self.min_y, self.max_y);
            // A bird that hit the floor stays level
            if self.crash_cause != Some(CrashCause::Floor) {
                self.rotate();
            }
        }
        if self.vel_y < self.motion.max_vel_y {
            self.vel_y = (self.vel_y + self.motion.acc_y).min(self.motion.max_vel_y);
        }
    }

    fn rotate(&mut self) {
        self.rot = (self.rot + self.motion.vel_rot).clamp(self.motion.rot_min, self.motion.rot_max);
    }
}

impl Entity for Player {
    fn tick(&mut self) {
        self.advance_wings();
        match self.mode {
            PlayerMode::ShowMenu => self.tick_show_menu(),
            PlayerMode::Normal => self.tick_normal(),
            PlayerMode::Crash => self.tick_crash(),
        }
    }

    fn stop(&mut self) {
        self.wings_stopped = true;
    }

    fn reset(&mut self) {
        self.y = self.spawn_y;
        self.mode = PlayerMode::ShowMenu;
        self.frame = 0;
        self.wing_step = 0;
        self.wings_stopped = false;
        self.crash_cause = None;
        self.enter_show_menu();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player::new(&GameConfig::default(), Size::new(34.0, 24.0))
    }

    #[test]
    fn test_spawn_position() {
        let p = player();
        assert_eq!(p.x, 57.0);
        assert_eq!(p.y, 244.0);
        assert_eq!(p.mode(), PlayerMode::ShowMenu);
    }

    #[test]
    fn test_modes_only_move_forward() {
        let mut p = player();
        assert!(p.set_mode(PlayerMode::Normal).is_ok());
        assert_eq!(
            p.set_mode(PlayerMode::ShowMenu),
            Err(PlayerModeError {
                from: PlayerMode::Normal,
                to: PlayerMode::ShowMenu
            })
        );
        assert!(p.crash(CrashCause::Pipe).is_ok());
        assert!(p.set_mode(PlayerMode::Normal).is_err());
        assert_eq!(p.mode(), PlayerMode::Crash);
        assert_eq!(p.crash_cause(), Some(CrashCause::Pipe));
    }

    #[test]
    fn test_gravity_accumulates_to_max_fall_speed() {
        let mut p = player();
        p.set_mode(PlayerMode::Normal).unwrap();
        p.y = 0.0;
        for _ in 0..40 {
            p.tick();
        }
        assert_eq!(p.vel_y, MAX_FALL_SPEED);
    }

    #[test]
    fn test_flap_overrides_downward_velocity() {
        let mut p = player();
        p.set_mode(PlayerMode::Normal).unwrap();
        p.vel_y = 8.0;
        assert!(p.flap());
        assert_eq!(p.vel_y, FLAP_VELOCITY);
        let before = p.y;
        p.tick();
        // The flap frame moves by the full impulse, gravity resumes next frame
        assert_eq!(p.y, before + FLAP_VELOCITY);
        p.tick();
        assert_eq!(p.vel_y, FLAP_VELOCITY + GRAVITY);
    }

    #[test]
    fn test_flap_ignored_outside_normal_mode() {
        let mut p = player();
        assert!(!p.flap());
        p.set_mode(PlayerMode::Normal).unwrap();
        p.crash(CrashCause::Floor).unwrap();
        let vel = p.vel_y;
        assert!(!p.flap());
        assert_eq!(p.vel_y, vel);
    }

    #[test]
    fn test_show_menu_bob_stays_near_spawn() {
        let mut p = player();
        for _ in 0..200 {
            p.tick();
            assert!((p.y - 244.0).abs() < 40.0);
        }
    }

    #[test]
    fn test_wing_frames_cycle_every_five_ticks() {
        let mut p = player();
        let mut seen = Vec::new();
        for _ in 0..20 {
            p.tick();
            seen.push(p.sprite_index());
        }
        assert_eq!(seen[3], 0);
        assert_eq!(seen[4], 1);
        assert_eq!(seen[9], 2);
        assert_eq!(seen[14], 1);
        assert_eq!(seen[19], 0);
    }

    #[test]
    fn test_crash_falls_to_floor_and_stops() {
        let config = GameConfig::default();
        let mut p = player();
        p.set_mode(PlayerMode::Normal).unwrap();
        p.crash(CrashCause::Pipe).unwrap();
        let frozen = p.sprite_index();
        for _ in 0..100 {
            p.tick();
        }
        assert!(p.rests_on(config.window.viewport_height()));
        assert_eq!(p.sprite_index(), frozen);
        assert_eq!(p.rot, ROTATION_MIN);
    }

    #[test]
    fn test_floor_crash_does_not_rotate() {
        let mut p = player();
        p.set_mode(PlayerMode::Normal).unwrap();
        p.crash(CrashCause::Floor).unwrap();
        let rot = p.rot;
        for _ in 0..10 {
            p.tick();
        }
        assert_eq!(p.rot, rot);
    }

    #[test]
    fn test_reset_starts_new_session() {
        let mut p = player();
        p.set_mode(PlayerMode::Normal).unwrap();
        p.crash(CrashCause::Pipe).unwrap();
        p.reset();
        assert_eq!(p.mode(), PlayerMode::ShowMenu);
        assert_eq!(p.y, 244.0);
        assert!(p.crash_cause().is_none());
    }
}
