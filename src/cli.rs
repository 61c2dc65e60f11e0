use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

/// Browse the Pokémon catalog in the terminal.
#[derive(Debug, Parser)]
#[command(name = "pokelist", version, about)]
pub struct Cli {
    /// Config file (default: ~/.config/pokelist/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Catalog API base URL
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Items fetched per page
    #[arg(long, value_name = "N")]
    pub page_size: Option<u32>,

    /// Keep fetched data in memory only
    #[arg(long)]
    pub no_cache: bool,

    /// Write logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded config.
    pub fn apply(&self, config: &mut Config) {
        if let Some(base_url) = &self.base_url {
            config.api.base_url = base_url.clone();
        }
        if let Some(page_size) = self.page_size {
            config.paging.page_size = page_size;
        }
        if self.no_cache {
            config.cache.enabled = false;
        }
        if let Some(log_file) = &self.log_file {
            config.logging.file = Some(log_file.clone());
        }
    }
}
