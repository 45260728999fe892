//! Saving a displayed image to disk.

use crate::error::Result;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Prefix of every downloaded file name.
pub const FILE_PREFIX: &str = "ai-generated-";

/// `ai-generated-<unix-ms>.png` for the given instant.
///
/// The extension is always `png`, whatever the service actually returned.
pub fn download_file_name(at: SystemTime) -> String {
    let millis = at
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    format!("{FILE_PREFIX}{millis}.png")
}

/// Writes `data` as `dir/file_name`, creating `dir` if needed.
pub fn save_to_dir(dir: impl AsRef<Path>, file_name: &str, data: &[u8]) -> Result<PathBuf> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    std::fs::write(&path, data)?;
    tracing::debug!(path = %path.display(), bytes = data.len(), "saved image");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_file_name_pattern() {
        let at = UNIX_EPOCH + Duration::from_millis(1_700_000_000_123);
        assert_eq!(download_file_name(at), "ai-generated-1700000000123.png");

        let now = download_file_name(SystemTime::now());
        let digits = now
            .strip_prefix(FILE_PREFIX)
            .and_then(|s| s.strip_suffix(".png"))
            .unwrap();
        assert!(!digits.is_empty());
        assert!(digits.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_save_to_dir() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested");
        let path = save_to_dir(&target, "ai-generated-1.png", b"bytes").unwrap();

        assert_eq!(path, target.join("ai-generated-1.png"));
        assert_eq!(std::fs::read(path).unwrap(), b"bytes");
    }
}
