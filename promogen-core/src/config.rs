//! Global promogen configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{PromoError, PromoResult};
use crate::validate::validate_time;

static DEFAULT_EVENTS_DIR: &str = "events";
static DEFAULT_FORM_TIME: &str = "22:00";

fn default_events_dir() -> PathBuf {
    PathBuf::from(DEFAULT_EVENTS_DIR)
}

fn default_form_time() -> String {
    DEFAULT_FORM_TIME.to_string()
}

/// Configuration at ~/.config/promogen/config.toml, overridable with
/// `PROMOGEN_*` environment variables (`PROMOGEN_PUBLISH__BASE_BRANCH=dev`).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PromogenConfig {
    /// Site repository. Discovered from the working directory when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,

    /// Event folders, relative to the root.
    #[serde(default = "default_events_dir")]
    pub events_dir: PathBuf,

    /// Time offered when `new` prompts for one.
    #[serde(default = "default_form_time")]
    pub default_time: String,

    #[serde(default)]
    pub publish: PublishConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct PublishConfig {
    pub remote: String,
    pub base_branch: String,
    pub branch_prefix: String,
    pub sync_fork: bool,
}

impl Default for PublishConfig {
    fn default() -> Self {
        PublishConfig {
            remote: "origin".to_string(),
            base_branch: "main".to_string(),
            branch_prefix: "events/".to_string(),
            sync_fork: true,
        }
    }
}

impl Default for PromogenConfig {
    fn default() -> Self {
        PromogenConfig {
            root: None,
            events_dir: default_events_dir(),
            default_time: default_form_time(),
            publish: PublishConfig::default(),
        }
    }
}

impl PromogenConfig {
    pub fn config_path() -> PromoResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| PromoError::Config("Could not determine config directory".into()))?
            .join("promogen");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, creating a commented file on first run.
    pub fn load() -> PromoResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> PromoResult<Self> {
        let mut config: Self = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(
                Environment::with_prefix("PROMOGEN")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e| PromoError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| PromoError::Config(e.to_string()))?;

        config.default_time = validate_time(&config.default_time)
            .map_err(|e| PromoError::Config(format!("default_time: {e}")))?;

        Ok(config)
    }

    /// `root` with `~` expanded.
    pub fn root_path(&self) -> Option<PathBuf> {
        self.root
            .as_ref()
            .map(|root| PathBuf::from(shellexpand::tilde(&root.to_string_lossy()).into_owned()))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> PromoResult<()> {
        let contents = format!(
            "\
# promogen configuration

# Site repository (found by walking up from the current directory if unset):
# root = \"~/code/promo-site\"

# Event folders, relative to the root:
# events_dir = \"{DEFAULT_EVENTS_DIR}\"

# Time suggested when `promogen new` asks for one:
# default_time = \"{DEFAULT_FORM_TIME}\"

# [publish]
# remote = \"origin\"
# base_branch = \"main\"
# branch_prefix = \"events/\"
# sync_fork = true
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                PromoError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| PromoError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
