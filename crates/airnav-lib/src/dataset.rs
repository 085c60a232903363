use std::env;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::debug;

use crate::error::{Error, Result};

/// Environment variable overriding the default data directory.
pub const DATA_DIR_ENV: &str = "AIRNAV_DATA_DIR";

/// Region loaded when no prefix is given.
pub const DEFAULT_REGION: &str = "Cat";

/// Locations of the three airspace data files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AirSpaceFiles {
    /// Navigation points (`<prefix>_nav.txt`).
    pub points: PathBuf,
    /// Segments (`<prefix>_seg.txt`).
    pub segments: PathBuf,
    /// Airports (`<prefix>_aer.txt`).
    pub airports: PathBuf,
}

impl AirSpaceFiles {
    pub fn new(
        points: impl Into<PathBuf>,
        segments: impl Into<PathBuf>,
        airports: impl Into<PathBuf>,
    ) -> Self {
        Self {
            points: points.into(),
            segments: segments.into(),
            airports: airports.into(),
        }
    }

    /// The conventional file names for a region prefix such as `Cat` or `Esp`.
    pub fn for_region(dir: impl AsRef<Path>, prefix: &str) -> Self {
        let dir = dir.as_ref();
        Self {
            points: dir.join(format!("{prefix}_nav.txt")),
            segments: dir.join(format!("{prefix}_seg.txt")),
            airports: dir.join(format!("{prefix}_aer.txt")),
        }
    }
}

/// Resolve the directory holding airspace data.
///
/// The resolution order:
/// 1. Explicit `target` argument when provided.
/// 2. `AIRNAV_DATA_DIR` environment variable.
/// 3. Platform-specific project data directory.
pub fn resolve_data_dir(target: Option<&Path>) -> Result<PathBuf> {
    if let Some(explicit) = target {
        debug!(path = %explicit.display(), "using explicit data directory");
        return Ok(explicit.to_path_buf());
    }

    if let Some(env_path) = env::var_os(DATA_DIR_ENV) {
        let path = PathBuf::from(env_path);
        debug!(path = %path.display(), "using data directory from {DATA_DIR_ENV}");
        return Ok(path);
    }

    default_data_dir()
}

/// Platform data directory, e.g. `~/.local/share/airnav` on Linux.
pub fn default_data_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("org", "airnav", "airnav").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(normalize_data_dir(dirs.data_dir()))
}

fn normalize_data_dir(path: &Path) -> PathBuf {
    #[cfg(windows)]
    {
        collapse_repeated_dirs(path)
    }
    #[cfg(not(windows))]
    {
        path.to_path_buf()
    }
}

/// `directories` can yield `%APPDATA%\airnav\airnav\data` on Windows; drop the
/// repeated component.
#[cfg(windows)]
fn collapse_repeated_dirs(path: &Path) -> PathBuf {
    let mut collapsed = PathBuf::new();
    let mut previous: Option<String> = None;
    for component in path.components() {
        let current = component.as_os_str().to_string_lossy().to_ascii_lowercase();
        if previous.as_deref() == Some(current.as_str()) {
            continue;
        }
        collapsed.push(component);
        previous = Some(current);
    }
    collapsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_files_follow_naming_convention() {
        let files = AirSpaceFiles::for_region("/data", "Esp");
        assert_eq!(files.points, PathBuf::from("/data/Esp_nav.txt"));
        assert_eq!(files.segments, PathBuf::from("/data/Esp_seg.txt"));
        assert_eq!(files.airports, PathBuf::from("/data/Esp_aer.txt"));
    }

    #[test]
    fn explicit_directory_wins() {
        let resolved = resolve_data_dir(Some(Path::new("/srv/airnav"))).unwrap();
        assert_eq!(resolved, PathBuf::from("/srv/airnav"));
    }
}
