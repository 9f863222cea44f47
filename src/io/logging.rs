use std::fs::{self, OpenOptions};
use std::path::Path;
use std::str::FromStr;
use std::sync::Mutex;

use tracing::Level;

/// Install the global subscriber, appending plain-text lines to `path`.
///
/// The TUI owns stdout, so log output never goes to the terminal. Failure to
/// open the log file leaves logging disabled rather than aborting startup.
pub fn init_logging(path: &Path, level: &str) {
    let level = Level::from_str(level).unwrap_or(Level::INFO);

    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
        && let Err(e) = fs::create_dir_all(dir)
    {
        eprintln!("warning: could not create log dir {}: {}", dir.display(), e);
        return;
    }

    let file = match OpenOptions::new().create(true).append(true).open(path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("warning: could not open log file {}: {}", path.display(), e);
            return;
        }
    };

    let result = tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_max_level(level)
        .try_init();
    if let Err(e) = result {
        eprintln!("warning: logging already initialized: {}", e);
    }
}
