//! Local file helpers for ~/.flappy/ (config file and log file).

use serde::de::DeserializeOwned;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

/// Get the ~/.flappy/ directory path, creating it if needed.
pub fn flappy_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(".flappy");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the full path for a file in ~/.flappy/.
pub fn data_path(filename: &str) -> io::Result<PathBuf> {
    Ok(flappy_dir()?.join(filename))
}

/// Load a JSON file from ~/.flappy/, returning `T::default()` if missing or invalid.
pub fn load_json_or_default<T: Default + DeserializeOwned>(filename: &str) -> T {
    match data_path(filename) {
        Ok(path) => load_json_at(&path).unwrap_or_default(),
        Err(_) => T::default(),
    }
}

/// Load a JSON file from an explicit path. `None` if missing or unparsable.
pub fn load_json_at<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let json = fs::read_to_string(path).ok()?;
    serde_json::from_str(&json).ok()
}

/// Open ~/.flappy/<filename> for appending, creating it if needed.
pub fn open_append(filename: &str) -> io::Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(data_path(filename)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("flappy-persistence-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_load_missing_returns_none() {
        let loaded: Option<Vec<String>> = load_json_at(&scratch_path("missing.json"));
        assert!(loaded.is_none());
    }

    #[test]
    fn test_load_invalid_returns_none() {
        let path = scratch_path("invalid.json");
        fs::write(&path, "{ not json").unwrap();
        let loaded: Option<Vec<String>> = load_json_at(&path);
        assert!(loaded.is_none());
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_valid_json() {
        let path = scratch_path("valid.json");
        fs::write(&path, r#"["hello", "world"]"#).unwrap();
        let loaded: Option<Vec<String>> = load_json_at(&path);
        assert_eq!(loaded, Some(vec!["hello".to_string(), "world".to_string()]));
        fs::remove_file(path).ok();
    }
}
