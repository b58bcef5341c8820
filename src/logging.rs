//! Diagnostic logging. The dashboard owns the terminal, so events go to
//! `<data_dir>/networth.log` instead of stderr.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::Level;

pub fn log_path(data_dir: &Path) -> PathBuf {
    data_dir.join("networth.log")
}

/// Unknown level names fall back to `info`.
pub fn parse_level(name: &str) -> Level {
    name.trim().parse().unwrap_or(Level::INFO)
}

/// Install the global subscriber. Logging is best effort: if the file cannot
/// be opened the app runs without it.
pub fn init(data_dir: &Path, level: &str) {
    if std::fs::create_dir_all(data_dir).is_err() {
        return;
    }
    let file = match OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path(data_dir))
    {
        Ok(f) => f,
        Err(_) => return,
    };

    let _ = tracing_subscriber::fmt()
        .with_max_level(parse_level(level))
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), Level::DEBUG);
        assert_eq!(parse_level("WARN"), Level::WARN);
        assert_eq!(parse_level(" trace "), Level::TRACE);
        assert_eq!(parse_level("loud"), Level::INFO);
    }

    #[test]
    fn test_log_path() {
        assert_eq!(log_path(Path::new("/d")), PathBuf::from("/d/networth.log"));
    }
}
