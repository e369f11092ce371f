//! Error types for the scenario runner binary.
//!
//! [`EngineError`] wraps every failure mode during startup and scenario
//! construction so that `main` can propagate with `?`.

/// Top-level error for the scenario runner.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: psyche_core::ConfigError,
    },

    /// The scenario file could not be read.
    #[error("failed to read scenario file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The scenario file is not valid YAML or does not match the schema.
    #[error("failed to parse scenario YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A character's traits or aspects were rejected.
    #[error("aspect error: {source}")]
    Aspect {
        /// The underlying aspect error.
        #[from]
        source: psyche_aspects::AspectError,
    },

    /// A role, relationship, or group was rejected.
    #[error("social error: {source}")]
    Social {
        /// The underlying social error.
        #[from]
        source: psyche_social::SocialError,
    },

    /// The scenario references something it never defines.
    #[error("scenario error: {message}")]
    Scenario {
        /// Description of the inconsistency.
        message: String,
    },
}

impl From<serde_yml::Error> for EngineError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}
