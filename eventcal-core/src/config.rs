//! Global eventcal configuration at ~/.config/eventcal/config.toml

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{EventCalError, EventCalResult};
use crate::marker::MarkerPalette;
use crate::selection::AfterCompletePolicy;
use crate::store::FileStorage;

static DEFAULT_DATA_DIR: &str = "~/.local/share/eventcal";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    pub after_complete: AfterCompletePolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCalConfig {
    /// Where events.json and pastEvents.json live
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default)]
    pub marker: MarkerPalette,

    #[serde(default)]
    pub selection: SelectionConfig,
}

impl Default for EventCalConfig {
    fn default() -> Self {
        EventCalConfig {
            data_dir: default_data_dir(),
            marker: MarkerPalette::default(),
            selection: SelectionConfig::default(),
        }
    }
}

impl EventCalConfig {
    pub fn config_path() -> EventCalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| EventCalError::Config("Could not determine config directory".into()))?
            .join("eventcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config, writing a commented default file on first run.
    ///
    /// `EVENTCAL_DATA_DIR` overrides `data_dir`.
    pub fn load() -> EventCalResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> EventCalResult<Self> {
        Self::load_from_sources(path, Environment::with_prefix("EVENTCAL"))
    }

    /// Load `path`, with values from `env` taking precedence.
    pub fn load_from_sources(path: &Path, env: Environment) -> EventCalResult<Self> {
        Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(env)
            .build()
            .map_err(|e| EventCalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| EventCalError::Config(e.to_string()))
    }

    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();
        PathBuf::from(full_path_str)
    }

    pub fn storage(&self) -> FileStorage {
        FileStorage::new(self.data_path())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> EventCalResult<()> {
        let palette = MarkerPalette::default();
        let contents = format!(
            "\
# eventcal configuration

# Where events are stored:
# data_dir = \"{}\"

# Calendar highlighting:
# [marker]
# accent_color = \"{}\"
# interior_color = \"{}\"
# text_color = \"{}\"

# What tapping a day does once a full range is selected (\"reset\" or \"extend\"):
# [selection]
# after_complete = \"reset\"
",
            DEFAULT_DATA_DIR, palette.accent_color, palette.interior_color, palette.text_color
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                EventCalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| EventCalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
