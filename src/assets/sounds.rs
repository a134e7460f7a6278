//! Sound clips and the cues that trigger them.

use crate::assets::AssetProvider;
use std::collections::HashMap;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Die,
    Hit,
    Point,
    Swoosh,
    Wing,
}

impl SoundCue {
    pub const ALL: [SoundCue; 5] = [
        SoundCue::Die,
        SoundCue::Hit,
        SoundCue::Point,
        SoundCue::Swoosh,
        SoundCue::Wing,
    ];

    fn stem(self) -> &'static str {
        match self {
            Self::Die => "die",
            Self::Hit => "hit",
            Self::Point => "point",
            Self::Swoosh => "swoosh",
            Self::Wing => "wing",
        }
    }

    /// Asset name; Windows builds use the wav variants.
    pub fn asset_name(self) -> String {
        let ext = if cfg!(windows) { "wav" } else { "ogg" };
        format!("audio/{}.{}", self.stem(), ext)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Sounds {
    clips: HashMap<SoundCue, Vec<u8>>,
}

impl Sounds {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn load(provider: &dyn AssetProvider) -> Self {
        let mut clips = HashMap::new();
        for cue in SoundCue::ALL {
            let name = cue.asset_name();
            match provider.fetch(&name) {
                Ok(bytes) if !bytes.is_empty() => {
                    clips.insert(cue, bytes);
                }
                Ok(_) => warn!(asset = %name, "sound_asset_empty"),
                Err(error) => warn!(asset = %name, %error, "asset_load_failed"),
            }
        }
        Self { clips }
    }

    pub fn is_loaded(&self, cue: SoundCue) -> bool {
        self.clips.contains_key(&cue)
    }

    pub fn clip(&self, cue: SoundCue) -> Option<&[u8]> {
        self.clips.get(&cue).map(Vec::as_slice)
    }
}
