//! Sprite catalogue.
//!
//! Only the dimensions of each sprite matter to the game: they size the
//! hitboxes and placement. Presence decides whether the renderer draws it.

use crate::assets::{AssetError, AssetProvider};
use crate::core::constants::*;
use image::ImageReader;
use rand::Rng;
use std::io::Cursor;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub w: f64,
    pub h: f64,
}

impl Size {
    pub const fn new(w: f64, h: f64) -> Self {
        Self { w, h }
    }

    const fn from_pair(pair: (f64, f64)) -> Self {
        Self::new(pair.0, pair.1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub size: Size,
    pub loaded: bool,
}

impl Sprite {
    pub const fn absent(fallback: Size) -> Self {
        Self {
            size: fallback,
            loaded: false,
        }
    }

    pub const fn loaded(size: Size) -> Self {
        Self { size, loaded: true }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundTheme {
    Day,
    Night,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BirdColor {
    Red,
    Blue,
    Yellow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipeColor {
    Green,
    Red,
}

impl BackgroundTheme {
    pub const ALL: [BackgroundTheme; 2] = [BackgroundTheme::Day, BackgroundTheme::Night];

    fn asset_name(self) -> &'static str {
        match self {
            Self::Day => "sprites/background-day.png",
            Self::Night => "sprites/background-night.png",
        }
    }
}

impl BirdColor {
    pub const ALL: [BirdColor; 3] = [BirdColor::Red, BirdColor::Blue, BirdColor::Yellow];

    fn asset_names(self) -> [String; 3] {
        let prefix = match self {
            Self::Red => "redbird",
            Self::Blue => "bluebird",
            Self::Yellow => "yellowbird",
        };
        ["upflap", "midflap", "downflap"].map(|flap| format!("sprites/{prefix}-{flap}.png"))
    }
}

impl PipeColor {
    pub const ALL: [PipeColor; 2] = [PipeColor::Green, PipeColor::Red];

    fn asset_name(self) -> &'static str {
        match self {
            Self::Green => "sprites/pipe-green.png",
            Self::Red => "sprites/pipe-red.png",
        }
    }
}

/// Randomly chosen look for a process run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: BackgroundTheme,
    pub bird: BirdColor,
    pub pipe: PipeColor,
}

impl Theme {
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self {
            background: BackgroundTheme::ALL[rng.gen_range(0..BackgroundTheme::ALL.len())],
            bird: BirdColor::ALL[rng.gen_range(0..BirdColor::ALL.len())],
            pipe: PipeColor::ALL[rng.gen_range(0..PipeColor::ALL.len())],
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: BackgroundTheme::Day,
            bird: BirdColor::Yellow,
            pipe: PipeColor::Green,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Images {
    pub theme: Theme,
    pub numbers: [Sprite; 10],
    pub game_over: Sprite,
    pub welcome_message: Sprite,
    pub base: Sprite,
    pub background: Sprite,
    /// Wing frames: up, mid, down.
    pub player: [Sprite; 3],
    /// Upper and lower pipes share one image (the upper is flipped).
    pub pipe: Sprite,
}

impl Images {
    /// Every sprite absent, sized like the stock artwork.
    pub fn placeholder() -> Self {
        Self {
            theme: Theme::default(),
            numbers: [Sprite::absent(Size::from_pair(DIGIT_SPRITE_SIZE)); 10],
            game_over: Sprite::absent(Size::from_pair(GAME_OVER_SPRITE_SIZE)),
            welcome_message: Sprite::absent(Size::from_pair(WELCOME_SPRITE_SIZE)),
            base: Sprite::absent(Size::from_pair(BASE_SPRITE_SIZE)),
            background: Sprite::absent(Size::from_pair(BACKGROUND_SPRITE_SIZE)),
            player: [Sprite::absent(Size::from_pair(PLAYER_SPRITE_SIZE)); 3],
            pipe: Sprite::absent(Size::from_pair(PIPE_SPRITE_SIZE)),
        }
    }

    /// Fetch every sprite, picking a random background, bird and pipe colour.
    pub fn load<R: Rng>(provider: &dyn AssetProvider, rng: &mut R) -> Self {
        let mut images = Self::placeholder();
        images.theme = Theme::random(rng);

        for (digit, sprite) in images.numbers.iter_mut().enumerate() {
            *sprite = load_sprite(provider, &format!("sprites/{digit}.png"), sprite.size);
        }
        images.game_over = load_sprite(provider, "sprites/gameover.png", images.game_over.size);
        images.welcome_message =
            load_sprite(provider, "sprites/message.png", images.welcome_message.size);
        images.base = load_sprite(provider, "sprites/base.png", images.base.size);
        images.background = load_sprite(
            provider,
            images.theme.background.asset_name(),
            images.background.size,
        );
        let fallback = images.player[0].size;
        for (sprite, name) in images
            .player
            .iter_mut()
            .zip(images.theme.bird.asset_names())
        {
            *sprite = load_sprite(provider, &name, fallback);
        }
        images.pipe = load_sprite(provider, images.theme.pipe.asset_name(), images.pipe.size);

        debug!(
            loaded = images.loaded_count(),
            theme = ?images.theme,
            "images_loaded"
        );
        images
    }

    pub fn player_size(&self) -> Size {
        self.player[0].size
    }

    /// True when every digit of `value` has a sprite to draw with.
    pub fn can_draw_number(&self, value: u32) -> bool {
        value
            .to_string()
            .bytes()
            .all(|b| self.numbers[(b - b'0') as usize].loaded)
    }

    fn loaded_count(&self) -> usize {
        self.numbers
            .iter()
            .chain(self.player.iter())
            .chain([
                &self.game_over,
                &self.welcome_message,
                &self.base,
                &self.background,
                &self.pipe,
            ])
            .filter(|s| s.loaded)
            .count()
    }
}

fn load_sprite(provider: &dyn AssetProvider, name: &str, fallback: Size) -> Sprite {
    match provider.fetch(name).and_then(|bytes| decode_dimensions(&bytes)) {
        Ok(size) => Sprite::loaded(size),
        Err(error) => {
            warn!(asset = name, %error, "asset_load_failed");
            Sprite::absent(fallback)
        }
    }
}

/// Read only the image header to get its pixel dimensions.
pub fn decode_dimensions(bytes: &[u8]) -> Result<Size, AssetError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(AssetError::Format)?;
    let (w, h) = reader.into_dimensions()?;
    Ok(Size::new(w as f64, h as f64))
}
