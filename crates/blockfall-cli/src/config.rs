use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use blockfall_engine::PieceSeed;
use serde::{Deserialize, Serialize};

pub const DEFAULT_FPS: u32 = 60;
const MAX_FPS: u32 = 1000;

/// Settings for the `play` command.
///
/// Read from an optional JSON file; every key may be omitted.
///
/// ```json
/// { "seed": "0123456789abcdef0123456789abcdef", "fps": 30, "log_file": "blockfall.log" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayConfig {
    /// Fixed piece sequence; random for every game when unset.
    pub seed: Option<PieceSeed>,
    /// Ticks and frames per second.
    pub fps: u32,
    /// Where log records go. Logging is off when unset.
    pub log_file: Option<PathBuf>,
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            seed: None,
            fps: DEFAULT_FPS,
            log_file: None,
        }
    }
}

impl PlayConfig {
    pub fn load<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let reader = io::BufReader::new(file);
        let config: Self = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config JSON file: {}", path.display()))?;
        Ok(config)
    }

    /// Replaces values with the ones given on the command line.
    #[must_use]
    pub fn with_overrides(
        self,
        seed: Option<PieceSeed>,
        fps: Option<u32>,
        log_file: Option<PathBuf>,
    ) -> Self {
        Self {
            seed: seed.or(self.seed),
            fps: fps.unwrap_or(self.fps),
            log_file: log_file.or(self.log_file),
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            (1..=MAX_FPS).contains(&self.fps),
            "fps must be between 1 and {MAX_FPS}, got {}",
            self.fps
        );
        Ok(())
    }
}
