use std::{fs::OpenOptions, path::Path};

use anyhow::Context as _;
use env_logger::{Builder, Env, Target};

/// Sends log records to `path`, appending to the file.
///
/// The terminal belongs to the UI while a game runs, so logs never go to
/// stderr. The filter is read from `RUST_LOG` and defaults to `info`.
pub fn init(path: &Path) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .context("Failed to initialize logger")?;
    Ok(())
}
