//! File system utilities.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Save data to a JSON file with pretty printing.
///
/// The file is written in place; an interrupted write can leave it truncated.
pub fn save_json<T: serde::Serialize + ?Sized>(path: &Path, data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, json)?;
    Ok(())
}

/// Load JSON data from a file.
pub fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Ensure a directory exists
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)?;
    Ok(())
}

/// Absolute form of a path for display, without requiring it to exist.
pub fn display_path(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_json_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.json");
        save_json(&path, &vec!["a", "b"]).unwrap();
        let loaded: Vec<String> = load_json(&path).unwrap();
        assert_eq!(loaded, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_load_json_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result: Result<Vec<String>> = load_json(&dir.path().join("missing.json"));
        assert!(result.is_err());
    }

    #[test]
    fn test_display_path_is_absolute() {
        assert!(display_path(Path::new("mikrotik_images")).is_absolute());
    }
}
