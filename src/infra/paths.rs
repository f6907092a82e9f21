// src/infra/paths.rs — Config and data locations
//
// INTERVIEW_COACH_HOME overrides everything: config and data both live under it.
// Otherwise config is ~/.interview-coach/ and data follows the platform data dir.

use directories::{BaseDirs, ProjectDirs};
use std::path::PathBuf;

const HOME_ENV: &str = "INTERVIEW_COACH_HOME";

fn coach_home() -> Option<PathBuf> {
    std::env::var_os(HOME_ENV).map(PathBuf::from)
}

fn home_dir() -> PathBuf {
    BaseDirs::new()
        .map(|b| b.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Configuration directory: $INTERVIEW_COACH_HOME/ or ~/.interview-coach/
pub fn config_dir() -> PathBuf {
    if let Some(home) = coach_home() {
        return home;
    }
    home_dir().join(".interview-coach")
}

/// Data directory: $INTERVIEW_COACH_HOME/data/ or the platform local data dir.
pub fn data_dir() -> PathBuf {
    if let Some(home) = coach_home() {
        return home.join("data");
    }
    match ProjectDirs::from("", "", "interview-coach") {
        Some(dirs) => dirs.data_local_dir().to_path_buf(),
        None => config_dir().join("data"),
    }
}

pub fn db_path() -> PathBuf {
    data_dir().join("interview-coach.db")
}

pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Create the config and data directories if missing.
pub fn ensure_dirs() -> std::io::Result<()> {
    std::fs::create_dir_all(config_dir())?;
    std::fs::create_dir_all(data_dir())?;
    Ok(())
}
