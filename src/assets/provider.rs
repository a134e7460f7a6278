//! Asset providers: remote URL store and local directory.

use crate::assets::AssetError;
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

/// Source of raw asset bytes, addressed by logical name (e.g. `sprites/base.png`).
pub trait AssetProvider: Send + Sync {
    fn fetch(&self, name: &str) -> Result<Vec<u8>, AssetError>;
}

/// Fetches assets over HTTP from a base URL.
pub struct HttpAssetProvider {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpAssetProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        let mut base_url = base_url.to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self { agent, base_url }
    }

    pub fn url_for(&self, name: &str) -> String {
        format!("{}{}", self.base_url, name.trim_start_matches('/'))
    }
}

impl AssetProvider for HttpAssetProvider {
    fn fetch(&self, name: &str) -> Result<Vec<u8>, AssetError> {
        let url = self.url_for(name);
        let response = self
            .agent
            .get(&url)
            .set("User-Agent", "flappy-assets")
            .call()
            .map_err(|e| AssetError::Http {
                name: name.to_string(),
                source: Box::new(e),
            })?;

        let mut bytes = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut bytes)
            .map_err(|e| AssetError::Io {
                name: name.to_string(),
                source: e,
            })?;
        Ok(bytes)
    }
}

/// Reads assets from a directory laid out like the remote store.
pub struct DirAssetProvider {
    root: PathBuf,
}

impl DirAssetProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetProvider for DirAssetProvider {
    fn fetch(&self, name: &str) -> Result<Vec<u8>, AssetError> {
        let path = self.root.join(name.trim_start_matches('/'));
        std::fs::read(&path).map_err(|e| AssetError::Io {
            name: name.to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_url_for_joins_with_single_slash() {
        let provider = HttpAssetProvider::new("http://assets.test/base", Duration::from_secs(1));
        assert_eq!(
            provider.url_for("sprites/base.png"),
            "http://assets.test/base/sprites/base.png"
        );
        let provider = HttpAssetProvider::new("http://assets.test/base/", Duration::from_secs(1));
        assert_eq!(
            provider.url_for("/audio/wing.ogg"),
            "http://assets.test/base/audio/wing.ogg"
        );
    }

    #[test]
    fn test_dir_provider_reads_and_reports_missing() {
        let root = std::env::temp_dir().join(format!("flappy-assets-{}", std::process::id()));
        fs::create_dir_all(root.join("audio")).unwrap();
        fs::write(root.join("audio/wing.ogg"), b"clip").unwrap();

        let provider = DirAssetProvider::new(&root);
        assert_eq!(provider.fetch("audio/wing.ogg").unwrap(), b"clip".to_vec());

        let err = provider.fetch("audio/missing.ogg").unwrap_err();
        assert!(err.to_string().contains("audio/missing.ogg"));

        fs::remove_dir_all(root).ok();
    }
}
