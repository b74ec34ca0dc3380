use schnapsen_bot::BotVariant;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

/// Pairs between progress reports when the config does not say otherwise.
pub const DEFAULT_PROGRESS_INTERVAL: usize = 500;
/// Seed given to each bot's own RNG unless overridden per agent.
pub const DEFAULT_BOT_SEED: u64 = 2025;
const RUN_ID_ALLOWED: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";

/// Head-to-head experiment between a candidate bot and a baseline bot.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ExperimentConfig {
    pub run_id: String,
    pub games: GamesConfig,
    pub candidate: AgentConfig,
    pub baseline: AgentConfig,
    pub outputs: OutputsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ExperimentConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|source| ConfigError::Read {
            source,
            path: path.clone(),
        })?;
        let mut cfg: ExperimentConfig = serde_yaml::from_reader(BufReader::new(file))
            .map_err(|source| ConfigError::Parse {
                source,
                path: path.clone(),
            })?;
        cfg.validate()
            .map_err(|source| ConfigError::Invalid { path, source })?;
        Ok(cfg)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let mut cfg: ExperimentConfig =
            serde_yaml::from_str(yaml).map_err(|source| ConfigError::Parse {
                source,
                path: PathBuf::from("<inline>"),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        Ok(cfg)
    }

    /// Checks every field; normalizes the logging level in place.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        validate_run_id(&self.run_id)?;
        self.games.validate()?;
        self.candidate.validate("candidate")?;
        self.baseline.validate("baseline")?;
        if self.candidate.name == self.baseline.name {
            return Err(ValidationError::InvalidField {
                field: "baseline.name".to_string(),
                message: format!(
                    "agent name '{}' is used by both candidate and baseline",
                    self.baseline.name
                ),
            });
        }
        self.outputs.validate(&self.run_id)?;
        self.logging.normalize();
        Ok(())
    }

    pub fn resolved_outputs(&self) -> ResolvedOutputs {
        ResolvedOutputs {
            jsonl: resolve_template(&self.run_id, &self.outputs.jsonl),
            summary_md: resolve_template(&self.run_id, &self.outputs.summary_md),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GamesConfig {
    /// Each pair is two games on the same deal with the roles swapped.
    pub pairs: usize,
    /// Pair `p` is dealt from an RNG seeded with `seed + p`.
    #[serde(default)]
    pub seed: u64,
    #[serde(default = "default_progress_interval")]
    pub progress_interval: usize,
}

impl GamesConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.pairs == 0 {
            return Err(ValidationError::InvalidField {
                field: "games.pairs".to_string(),
                message: "number of game pairs must be greater than zero".to_string(),
            });
        }
        if self.progress_interval == 0 {
            return Err(ValidationError::InvalidField {
                field: "games.progress_interval".to_string(),
                message: "progress interval must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

fn default_progress_interval() -> usize {
    DEFAULT_PROGRESS_INTERVAL
}

/// One side of the experiment.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AgentConfig {
    pub name: String,
    /// Variant label such as `pu_afro`.
    pub variant: String,
    #[serde(default = "default_bot_seed")]
    pub seed: u64,
}

impl AgentConfig {
    pub fn bot_variant(&self) -> Result<BotVariant, String> {
        self.variant.parse()
    }

    fn validate(&self, role: &str) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::InvalidField {
                field: format!("{role}.name"),
                message: "agent name must not be empty".to_string(),
            });
        }
        if !self.name.chars().all(|c| RUN_ID_ALLOWED.contains(c)) {
            return Err(ValidationError::InvalidField {
                field: format!("{role}.name"),
                message: format!("agent name '{}' contains invalid characters", self.name),
            });
        }
        self.bot_variant()
            .map_err(|message| ValidationError::InvalidField {
                field: format!("{role}.variant"),
                message,
            })?;
        Ok(())
    }
}

fn default_bot_seed() -> u64 {
    DEFAULT_BOT_SEED
}

/// Output paths; `{run_id}` is substituted.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputsConfig {
    pub jsonl: String,
    pub summary_md: String,
}

impl OutputsConfig {
    fn validate(&self, run_id: &str) -> Result<(), ValidationError> {
        for (label, value) in [
            ("outputs.jsonl", &self.jsonl),
            ("outputs.summary_md", &self.summary_md),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::InvalidField {
                    field: label.to_string(),
                    message: "path must not be empty".to_string(),
                });
            }
            if resolve_template(run_id, value).file_name().is_none() {
                return Err(ValidationError::InvalidField {
                    field: label.to_string(),
                    message: "resolved path does not name a file".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Structured logging is off unless asked for.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "info".to_string()
}

fn validate_run_id(run_id: &str) -> Result<(), ValidationError> {
    if run_id.trim().is_empty() {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id must not be empty".to_string(),
        });
    }
    if !run_id.chars().all(|c| RUN_ID_ALLOWED.contains(c)) {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id may only contain alphanumeric characters, '.', '_' or '-'".to_string(),
        });
    }
    Ok(())
}

fn resolve_template(run_id: &str, template: &str) -> PathBuf {
    PathBuf::from(template.replace("{run_id}", run_id))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub jsonl: PathBuf,
    pub summary_md: PathBuf,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
