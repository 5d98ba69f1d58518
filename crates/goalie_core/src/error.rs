use thiserror::Error;

/// Invalid tuning values rejected by `GoalieConfig::validate`
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be finite and non-negative, got {value}")]
    InvalidDistance { field: &'static str, value: f32 },

    #[error("hysteresis band {band} is inverted: hold {hold} < enter {enter}")]
    InvertedHysteresis {
        band: &'static str,
        enter: f32,
        hold: f32,
    },

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },
}

#[derive(Error, Debug)]
pub enum GoalieError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid snapshot: {0}")]
    Snapshot(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GoalieError {
    /// Errors caused by the caller's input rather than the environment
    pub fn is_input_error(&self) -> bool {
        match self {
            GoalieError::Config(_) => true,
            GoalieError::Snapshot(_) => true,
            GoalieError::Json(_) => true,
            GoalieError::Yaml(_) => true,
            GoalieError::Io(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, GoalieError>;
