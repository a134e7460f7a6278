//! Sprite and sound assets.
//!
//! Assets are fetched once at startup through an [`AssetProvider`]. A failed
//! fetch is never fatal: the asset is marked absent, nothing is drawn or
//! played for it, and physics falls back to the stock sprite sizes.

pub mod images;
pub mod provider;
pub mod sounds;

pub use images::*;
pub use provider::*;
pub use sounds::*;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("request for {name} failed: {source}")]
    Http {
        name: String,
        #[source]
        source: Box<ureq::Error>,
    },
    #[error("failed to read {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("failed to detect image format: {0}")]
    Format(#[source] std::io::Error),
}
