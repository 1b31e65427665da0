use std::path::PathBuf;

use dirs_next::home_dir;

pub fn expand_tilde(path: &str) -> PathBuf {
    let p = path.trim();
    if p == "~" {
        return home_dir().unwrap_or_else(|| PathBuf::from("~"));
    }
    if let Some(rest) = p.strip_prefix("~/") {
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    if let Some(rest) = p.strip_prefix("~\\") {
        // Windows-style
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    PathBuf::from(p)
}

/// Environment variable overriding where the terminal UI writes its diagnostic log.
pub const LOG_PATH_ENV: &str = "PROVADMIN_LOG_PATH";

/// Diagnostic log location: `PROVADMIN_LOG_PATH` when set, otherwise [`default_log_path`].
pub fn log_path() -> PathBuf {
    match std::env::var(LOG_PATH_ENV) {
        Ok(path) if !path.trim().is_empty() => expand_tilde(&path),
        _ => default_log_path(),
    }
}

/// Default location of the diagnostic log written while the terminal UI owns the screen.
pub fn default_log_path() -> PathBuf {
    dirs_next::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("provadmin")
        .join("provadmin.log")
}
