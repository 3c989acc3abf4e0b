/// Config file loading and creation for the elovote CLI.
///
/// Config lives at ~/.config/elovote/config.toml.
/// All fields are optional — CLI args override config values.
use elovote_core::EloConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::bail;

/// Rating table location when neither `--data` nor the config file name one.
pub const DEFAULT_DATA_PATH: &str = "data/items.json";

/// Candidate list location when neither `--list` nor the config file name one.
pub const DEFAULT_LIST_PATH: &str = "data/items.txt";

#[derive(Deserialize, Default, Debug)]
pub struct ElovoteConfig {
    pub data: Option<String>,
    pub list: Option<String>,
    pub seed: Option<u64>,
    pub chain: Option<bool>,
    pub prune_missing: Option<bool>,
    #[serde(default)]
    pub elo: EloConfig,
}

const DEFAULT_CONFIG_TEMPLATE: &str = "\
# elovote configuration
# All values here can be overridden by CLI flags.

# Rating table (JSON, rewritten after every vote)
# data = \"data/items.json\"

# Candidate list, one name per line (or a JSON array of strings)
# list = \"data/items.txt\"

# Fixed random seed for reproducible sessions
# seed = 42

# After a vote, keep one of the two items in the next pair
# chain = true

# `elovote sync` drops names that are no longer in the list
# prune_missing = false

[elo]
# Probability of a completely random pair
exploration_rate = 0.2

# Pool size as a fraction of the catalog; also the probability of
# pairing against the most distant ratings instead of the closest
top_fraction = 0.1

# Starting values for new items
default_rating = 1000.0
default_rounds = 0
";

/// Returns the default config path: ~/.config/elovote/config.toml
pub fn config_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| bail("HOME environment variable not set"));
    PathBuf::from(home).join(".config").join("elovote").join("config.toml")
}

pub fn parse_config(content: &str) -> Result<ElovoteConfig, toml::de::Error> {
    toml::from_str(content)
}

/// Load config from a file path. Returns default (all None) if file doesn't exist.
pub fn load_config(path: &Path) -> ElovoteConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_config(&content)
            .unwrap_or_else(|e| bail(format!("Failed to parse config at {}: {e}", path.display()))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => ElovoteConfig::default(),
        Err(e) => bail(format!("Failed to read config at {}: {e}", path.display())),
    }
}

/// Create the default config file. Errors if it already exists.
pub fn create_default_config(path: &Path) {
    if path.exists() {
        bail(format!("Config file already exists at {}", path.display()));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .unwrap_or_else(|e| bail(format!("Failed to create directory {}: {e}", parent.display())));
    }

    std::fs::write(path, DEFAULT_CONFIG_TEMPLATE)
        .unwrap_or_else(|e| bail(format!("Failed to write config to {}: {e}", path.display())));
}
