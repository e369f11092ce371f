//! Configuration loading and typed config structures for the Psyche engine.
//!
//! The canonical configuration lives in `psyche-config.yaml` at the project
//! root. Every field has a default, so an empty document (or no file at
//! all) yields a working engine with the built-in behavior table.

use std::path::Path;

use psyche_stimulus::{StimulusCatalogEntry, StimulusDispatcher};
use psyche_types::{AspectKind, ModelKind};
use serde::Deserialize;

use crate::decision::{DecisionMaker, EmptyEffectsPolicy};
use crate::importance::{
    DEFAULT_COMPLETION_DECAY, DEFAULT_STARVATION_RATE, ImportanceFactors, ImportanceState,
    PriorityFactors,
};
use crate::weights::{DEFAULT_BASE_WEIGHT, DEFAULT_MIN_WEIGHT, WeightTable};

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The configuration parsed but holds an unusable value.
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level engine configuration.
///
/// Mirrors the structure of `psyche-config.yaml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EngineConfig {
    /// Decision-making parameters.
    #[serde(default)]
    pub decision: DecisionConfig,

    /// Importance and priority rates.
    #[serde(default)]
    pub importance: ImportanceConfig,

    /// Stimulus catalog. Replaces the built-in table when present.
    #[serde(default)]
    pub stimuli: Option<Vec<StimulusCatalogEntry>>,

    /// Seed for the scenario runner's random source.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            decision: DecisionConfig::default(),
            importance: ImportanceConfig::default(),
            stimuli: None,
            seed: default_seed(),
        }
    }
}

impl EngineConfig {
    /// Load and validate configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let decision = &self.decision;
        if decision.emotion_model.category() != AspectKind::Emotion {
            return Err(invalid(
                "decision.emotion_model",
                format!("{} is not an emotion model", decision.emotion_model),
            ));
        }
        if !decision.min_weight.is_finite() || decision.min_weight <= 0.0 {
            return Err(invalid(
                "decision.min_weight",
                format!("must be positive, got {}", decision.min_weight),
            ));
        }
        if !decision.base_weight.is_finite() || decision.base_weight < 0.0 {
            return Err(invalid(
                "decision.base_weight",
                format!("must be non-negative, got {}", decision.base_weight),
            ));
        }
        let importance = &self.importance;
        if !importance.starvation_rate.is_finite() || importance.starvation_rate < 0.0 {
            return Err(invalid(
                "importance.starvation_rate",
                format!("must be non-negative, got {}", importance.starvation_rate),
            ));
        }
        if !importance.completion_decay.is_finite() || importance.completion_decay < 0.0 {
            return Err(invalid(
                "importance.completion_decay",
                format!("must be non-negative, got {}", importance.completion_decay),
            ));
        }
        Ok(())
    }

    /// The stimulus dispatcher this configuration describes.
    pub fn dispatcher(&self) -> StimulusDispatcher {
        self.stimuli.as_ref().map_or_else(StimulusDispatcher::builtin, |entries| {
            StimulusDispatcher::from_catalog(entries.iter().cloned())
        })
    }

    /// A decision maker configured from the `decision` section.
    pub fn decision_maker(&self) -> DecisionMaker {
        let decision = &self.decision;
        DecisionMaker::new(decision.emotion_model)
            .with_empty_effects(decision.empty_effects)
            .with_weights(WeightTable::standard_with_limits(
                decision.base_weight,
                decision.min_weight,
            ))
    }
}

/// Decision-making configuration.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DecisionConfig {
    /// Emotion model that emotion effects write to.
    #[serde(default = "default_emotion_model")]
    pub emotion_model: ModelKind,

    /// What to do with a stimulus that carries no effects.
    #[serde(default)]
    pub empty_effects: EmptyEffectsPolicy,

    /// Weight every behavior starts from before personality bonuses.
    #[serde(default = "default_base_weight")]
    pub base_weight: f32,

    /// Floor applied to every behavior weight.
    #[serde(default = "default_min_weight")]
    pub min_weight: f32,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            emotion_model: default_emotion_model(),
            empty_effects: EmptyEffectsPolicy::default(),
            base_weight: default_base_weight(),
            min_weight: default_min_weight(),
        }
    }
}

/// Importance and priority rates.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ImportanceConfig {
    /// Starvation growth per second.
    #[serde(default = "default_starvation_rate")]
    pub starvation_rate: f32,

    /// Completion decay per second.
    #[serde(default = "default_completion_decay")]
    pub completion_decay: f32,
}

impl Default for ImportanceConfig {
    fn default() -> Self {
        Self {
            starvation_rate: default_starvation_rate(),
            completion_decay: default_completion_decay(),
        }
    }
}

impl ImportanceConfig {
    /// A fresh importance state using these rates.
    pub fn state(&self, importance: ImportanceFactors, priority: PriorityFactors) -> ImportanceState {
        ImportanceState::new(importance, priority)
            .with_rates(self.starvation_rate, self.completion_decay)
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

const fn default_seed() -> u64 {
    42
}

const fn default_emotion_model() -> ModelKind {
    ModelKind::Ekman
}

const fn default_base_weight() -> f32 {
    DEFAULT_BASE_WEIGHT
}

const fn default_min_weight() -> f32 {
    DEFAULT_MIN_WEIGHT
}

const fn default_starvation_rate() -> f32 {
    DEFAULT_STARVATION_RATE
}

const fn default_completion_decay() -> f32 {
    DEFAULT_COMPLETION_DECAY
}
