use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;
use tumbling_core::{Language, LenientValue, RoutineMeta, Track};

const PASS_COUNT: usize = 2;

/// Root judge configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct JudgeConfig {
    #[serde(default)]
    pub language: Option<String>,
    /// Optional JSON element table replacing the built-in catalog.
    #[serde(default)]
    pub catalog: Option<PathBuf>,
    pub routine: RoutineConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl JudgeConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: JudgeConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        validate_language(self.language.as_deref())?;
        self.routine.validate()?;
        self.logging.normalize();
        self.logging.validate()?;
        Ok(())
    }

    pub fn language(&self) -> Language {
        self.language
            .as_deref()
            .and_then(Language::parse)
            .unwrap_or_default()
    }
}

/// Routine metadata and the two passes, as written by a coach.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RoutineConfig {
    #[serde(default)]
    pub track: Option<String>,
    #[serde(default)]
    pub level: Option<Label>,
    #[serde(default)]
    pub gender: Option<String>,
    pub passes: Vec<Vec<Option<SlotEntry>>>,
}

impl RoutineConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.passes.len() != PASS_COUNT {
            return Err(ValidationError::InvalidField {
                field: "routine.passes".to_string(),
                message: format!(
                    "exactly {PASS_COUNT} passes are required, found {}",
                    self.passes.len()
                ),
            });
        }

        let track = self.meta().track;
        let capacity = track.pass_capacity();
        for (index, pass) in self.passes.iter().enumerate() {
            if pass.len() > capacity {
                return Err(ValidationError::InvalidField {
                    field: format!("routine.passes[{index}]"),
                    message: format!(
                        "{track} passes hold at most {capacity} elements, found {}",
                        pass.len()
                    ),
                });
            }

            for (slot, entry) in pass.iter().enumerate() {
                if let Some(SlotEntry::Detailed { id, .. }) = entry {
                    if id.trim().is_empty() {
                        return Err(ValidationError::InvalidField {
                            field: format!("routine.passes[{index}][{slot}].id"),
                            message: "element id must not be empty".to_string(),
                        });
                    }
                }
            }
        }

        Ok(())
    }

    /// Resolve free-text labels into the typed metadata.
    pub fn meta(&self) -> RoutineMeta {
        let level = self.level.as_ref().map(Label::as_text);
        RoutineMeta::from_labels(
            self.track.as_deref(),
            level.as_deref(),
            self.gender.as_deref(),
        )
    }

    pub fn track(&self) -> Track {
        self.meta().track
    }
}

/// A level written either as a letter or as a number.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Label {
    Number(i64),
    Text(String),
}

impl Label {
    pub fn as_text(&self) -> String {
        match self {
            Label::Number(value) => value.to_string(),
            Label::Text(value) => value.clone(),
        }
    }
}

/// One pass entry: a bare element id or an id with an explicit value.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SlotEntry {
    Id(String),
    Detailed {
        id: String,
        #[serde(default)]
        value: Option<LenientValue>,
    },
}

impl SlotEntry {
    pub fn id(&self) -> &str {
        match self {
            SlotEntry::Id(id) | SlotEntry::Detailed { id, .. } => id.trim(),
        }
    }

    /// Explicit value, if one was given and is not blank.
    pub fn value(&self) -> Option<&LenientValue> {
        match self {
            SlotEntry::Id(_) => None,
            SlotEntry::Detailed { value, .. } => value.as_ref().filter(|value| !value.is_blank()),
        }
    }
}

/// Output artifact configuration.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct OutputConfig {
    #[serde(default)]
    pub json: Option<PathBuf>,
}

/// Logging configuration defaults to plain stderr output.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
            log_file: default_log_file(),
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.level().is_none() {
            return Err(ValidationError::InvalidField {
                field: "logging.tracing_level".to_string(),
                message: format!("unknown tracing level '{}'", self.tracing_level),
            });
        }
        if self.enable_structured && self.log_file.components().count() == 0 {
            return Err(ValidationError::InvalidField {
                field: "logging.log_file".to_string(),
                message: "structured logging needs a log file path".to_string(),
            });
        }
        Ok(())
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
    "warn".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("tumbling-judge.jsonl")
}

fn validate_language(language: Option<&str>) -> Result<(), ValidationError> {
    match language {
        Some(raw) if Language::parse(raw).is_none() => Err(ValidationError::InvalidField {
            field: "language".to_string(),
            message: format!("unsupported language '{raw}'"),
        }),
        _ => Ok(()),
    }
}

/// Errors surfaced when loading configuration files.
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

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
