//! Application configuration loading.
//!
//! Configuration is read once at startup from a YAML file.  Every key is
//! optional; anything missing falls back to the defaults in [`AppConfig`].
//!
//! The expected YAML structure is:
//! ```yaml
//! listen_address: "0.0.0.0:8080"
//! poll:
//!   recheck_interval_ms: 200
//!   deadline_ms: 1200
//!   policy: stop_on_success      # or log_and_continue
//! distance:
//!   empty_input_policy: standard # or zero_on_empty
//! people:
//!   - { id: 1, name: "ada" }
//! ```

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::data::Person;
use crate::distance::EmptyInputPolicy;
use crate::poll::{PollConfig, SuccessPolicy, DEFAULT_DEADLINE, DEFAULT_RECHECK_INTERVAL};

/// Address the REST server binds when none is configured.
pub const DEFAULT_LISTEN_ADDRESS: &str = "127.0.0.1:8080";

// ── Private YAML deserialization types ────────────────────────────────────────

/// Top-level wrapper that maps directly onto the YAML file layout.
///
/// Kept private – callers work with [`AppConfig`] / [`ConfigManager`].
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    listen_address: Option<String>,
    #[serde(default)]
    poll: PollSection,
    #[serde(default)]
    distance: DistanceSection,
    #[serde(default)]
    people: Vec<PersonEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PollSection {
    recheck_interval_ms: Option<u64>,
    deadline_ms: Option<u64>,
    #[serde(default)]
    policy: SuccessPolicy,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct DistanceSection {
    #[serde(default)]
    empty_input_policy: EmptyInputPolicy,
}

#[derive(Debug, Deserialize)]
struct PersonEntry {
    id: u64,
    name: String,
}

// ── Public data structures ────────────────────────────────────────────────────

/// Startup parameters for the whole application.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub listen_address: String,
    pub poll: PollConfig,
    pub empty_input_policy: EmptyInputPolicy,
    /// Records seeded into the in-memory person store.
    pub people: Vec<Person>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_address: DEFAULT_LISTEN_ADDRESS.to_string(),
            poll: PollConfig::default(),
            empty_input_policy: EmptyInputPolicy::default(),
            people: Vec::new(),
        }
    }
}

impl From<ConfigFile> for AppConfig {
    fn from(file: ConfigFile) -> Self {
        let recheck = file
            .poll
            .recheck_interval_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_RECHECK_INTERVAL);
        let deadline = file
            .poll
            .deadline_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_DEADLINE);

        Self {
            listen_address: file
                .listen_address
                .unwrap_or_else(|| DEFAULT_LISTEN_ADDRESS.to_string()),
            poll: PollConfig::new(recheck, deadline).with_policy(file.poll.policy),
            empty_input_policy: file.distance.empty_input_policy,
            people: file
                .people
                .into_iter()
                .map(|p| Person::new(p.id, p.name))
                .collect(),
        }
    }
}

// ── ConfigManager ─────────────────────────────────────────────────────────────

/// Loads and holds the application configuration.
#[derive(Debug, Default)]
pub struct ConfigManager {
    config: AppConfig,

    /// Set to `true` after a successful [`load_from_file`](Self::load_from_file).
    loaded: bool,
}

impl ConfigManager {
    /// Creates a manager holding the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `path` and replaces the current configuration.
    ///
    /// On failure the previous configuration is reset to the defaults and
    /// [`is_loaded`](Self::is_loaded) reports `false`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened, if the YAML is
    /// structurally invalid, or if the poll settings fail validation.
    pub fn load_from_file(&mut self, path: &Path) -> Result<()> {
        info!("Loading configuration from: {}", path.display());

        self.config = AppConfig::default();
        self.loaded = false;

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open configuration file: {}", path.display()))?;

        let config = Self::parse(&content)
            .with_context(|| format!("Failed to parse YAML file: {}", path.display()))?;

        debug!(
            listen_address = %config.listen_address,
            recheck_interval = ?config.poll.recheck_interval,
            deadline = ?config.poll.deadline,
            policy = %config.poll.policy,
            empty_input_policy = %config.empty_input_policy,
            people = config.people.len(),
            "Configuration parsed"
        );

        if config.poll.recheck_interval >= config.poll.deadline {
            warn!(
                "recheck_interval_ms ({:?}) is not shorter than deadline_ms ({:?})",
                config.poll.recheck_interval, config.poll.deadline
            );
        }

        self.config = config;
        self.loaded = true;
        info!("Configuration loaded");
        Ok(())
    }

    /// Parse YAML text into an [`AppConfig`].  An empty document yields the
    /// defaults.
    pub fn parse(content: &str) -> Result<AppConfig> {
        let file: ConfigFile = if content.trim().is_empty() {
            ConfigFile::default()
        } else {
            serde_yaml::from_str(content)?
        };
        let config = AppConfig::from(file);
        config.poll.validate()?;
        Ok(config)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Consume the manager, keeping only the configuration.
    pub fn into_config(self) -> AppConfig {
        self.config
    }

    /// Returns `true` after a successful call to [`load_from_file`](Self::load_from_file).
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
