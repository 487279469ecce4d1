use std::path::PathBuf;

use blockfall_engine::PieceSeed;
use log::info;

use crate::{command::play::app::PlayApp, config::PlayConfig, logging, tui::Tui};

mod app;
mod screen;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// JSON config file with `seed`, `fps` and `log_file` keys
    #[clap(long)]
    pub(crate) config: Option<PathBuf>,
    /// Piece sequence seed as 32 hex digits (random if omitted)
    #[clap(long)]
    pub(crate) seed: Option<PieceSeed>,
    /// Ticks and frames per second [default: 60]
    #[clap(long)]
    pub(crate) fps: Option<u32>,
    /// Append log records to this file
    #[clap(long)]
    pub(crate) log_file: Option<PathBuf>,
}

impl PlayArg {
    fn to_config(&self) -> anyhow::Result<PlayConfig> {
        let base = match &self.config {
            Some(path) => PlayConfig::load(path)?,
            None => PlayConfig::default(),
        };
        let config = base.with_overrides(self.seed, self.fps, self.log_file.clone());
        config.validate()?;
        Ok(config)
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let config = arg.to_config()?;
    if let Some(path) = &config.log_file {
        logging::init(path)?;
    }
    info!("[Play] starting with {config:?}");

    let mut app = PlayApp::new(&config);
    Tui::new().run(&mut app)?;

    info!("[Play] exiting");
    Ok(())
}
