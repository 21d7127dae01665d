use std::{fs::File, io, path::Path, sync::Mutex};

use anyhow::Context as _;
use tracing::Level;

/// Maps the `-v` count to the most verbose level that gets recorded.
pub(crate) fn level_from_verbosity(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Installs a subscriber writing to stderr.
pub(crate) fn init_stderr(verbose: u8) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(level_from_verbosity(verbose))
        .with_writer(io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
        .context("Failed to install log subscriber")
}

/// Installs a subscriber appending plain text to `path`.
///
/// The terminal game owns stdout and stderr, so this is the only way to get
/// its logs.
pub(crate) fn init_file(verbose: u8, path: &Path) -> anyhow::Result<()> {
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_max_level(level_from_verbosity(verbose))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
        .context("Failed to install log subscriber")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(level_from_verbosity(0), Level::WARN);
        assert_eq!(level_from_verbosity(1), Level::INFO);
        assert_eq!(level_from_verbosity(2), Level::DEBUG);
        assert_eq!(level_from_verbosity(7), Level::TRACE);
    }
}
