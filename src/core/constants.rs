// Window and pacing
pub const WINDOW_WIDTH: f64 = 288.0;
pub const WINDOW_HEIGHT: f64 = 512.0;
pub const VIEWPORT_RATIO: f64 = 0.79;
pub const TARGET_FPS: u32 = 30;
pub const FPS_SAMPLE_WINDOW: usize = 10;

// Player placement and animation
pub const PLAYER_X_RATIO: f64 = 0.2;
pub const WING_CYCLE: [usize; 4] = [0, 1, 2, 1];
pub const WING_FRAME_TICKS: u32 = 5;

// Player physics, show-menu bob
pub const SHOW_MENU_VELOCITY: f64 = 1.0;
pub const SHOW_MENU_ACCELERATION: f64 = 0.5;
pub const SHOW_MENU_VELOCITY_LIMIT: f64 = 4.0;

// Player physics, normal flight
pub const GRAVITY: f64 = 1.0;
pub const MAX_FALL_SPEED: f64 = 10.0;
pub const MAX_RISE_SPEED: f64 = -8.0;
pub const FLAP_VELOCITY: f64 = -9.0;
pub const FLAP_ROTATION: f64 = 80.0;
pub const ROTATION_SPEED: f64 = -3.0;
pub const ROTATION_MIN: f64 = -90.0;
pub const ROTATION_MAX: f64 = 20.0;

// Player physics, crash fall
pub const CRASH_ACCELERATION: f64 = 2.0;
pub const CRASH_VELOCITY: f64 = 7.0;
pub const CRASH_MAX_FALL_SPEED: f64 = 15.0;
pub const CRASH_ROTATION_SPEED: f64 = -8.0;

// Pipes and floor
pub const PIPE_SPEED: f64 = -5.0;
pub const PIPE_GAP: f64 = 120.0;
pub const PIPE_SPAWN_OFFSET: f64 = 10.0;
pub const FLOOR_SPEED: f64 = 4.0;

// Fallback sprite sizes (width, height) used when an image is unavailable
pub const PLAYER_SPRITE_SIZE: (f64, f64) = (34.0, 24.0);
pub const PIPE_SPRITE_SIZE: (f64, f64) = (52.0, 320.0);
pub const BASE_SPRITE_SIZE: (f64, f64) = (336.0, 112.0);
pub const BACKGROUND_SPRITE_SIZE: (f64, f64) = (288.0, 512.0);
pub const WELCOME_SPRITE_SIZE: (f64, f64) = (184.0, 267.0);
pub const GAME_OVER_SPRITE_SIZE: (f64, f64) = (192.0, 42.0);
pub const DIGIT_SPRITE_SIZE: (f64, f64) = (24.0, 36.0);

// Telemetry
pub const METRICS_PORT: u16 = 8000;
pub const LATENCY_PROBE_INTERVAL_SECONDS: u64 = 5;
pub const BANDWIDTH_SAMPLE_INTERVAL_SECONDS: u64 = 1;
pub const LATENCY_PROBE_TIMEOUT_MS: u64 = 2000;
pub const DEFAULT_PROBE_URL: &str = "http://localhost:8000/metrics";

// Remote collaborators
pub const ASSET_BASE_URL: &str = "https://23202513b.s3.eu-west-1.amazonaws.com/assets/";
pub const ASSET_FETCH_TIMEOUT_SECONDS: u64 = 5;
pub const SCORE_SUBMIT_TIMEOUT_SECONDS: u64 = 5;

// Local files under ~/.flappy/
pub const CONFIG_FILE: &str = "config.json";
pub const LOG_FILE: &str = "flappy.log";
