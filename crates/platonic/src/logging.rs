//! Log file setup.
//!
//! The terminal belongs to the scene, so log lines go to a file in the
//! platform data directory instead of stderr.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use env_logger::{Env, Target};
use platonic_config::Config;

const LOG_FILE: &str = "platonic.log";

/// Path of the log file.
pub fn log_path() -> Option<PathBuf> {
    Config::project_dirs().map(|dirs| dirs.data_local_dir().join(LOG_FILE))
}

/// Route the `log` facade to the log file, filtered by `RUST_LOG`
/// (default `info`). Logging stays off when the file cannot be opened.
pub fn init() {
    let Some(path) = log_path() else {
        return;
    };
    if let Some(parent) = path.parent()
        && fs::create_dir_all(parent).is_err()
    {
        return;
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_path_is_log_file() {
        if let Some(path) = log_path() {
            assert!(path.ends_with(LOG_FILE));
            assert!(path.parent().is_some());
        }
    }
}
