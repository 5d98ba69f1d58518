//! # Goalie Configuration Module
//!
//! 모든 튜닝 상수를 중앙에서 관리하는 설정 시스템.
//!
//! Every tactical threshold of the keeper lives here instead of in the
//! control flow, so profiles can be swapped without touching the decision
//! code.
//!
//! ## Usage
//! ```rust
//! use goalie_core::engine::config::GoalieConfig;
//!
//! let config = GoalieConfig::default();
//! let sweeper = GoalieConfig::sweeper();
//! assert!(sweeper.positioning.press_enter_distance > config.positioning.press_enter_distance);
//! ```
//!
//! ## Environment Variables
//!
//! - `GOALIE_PROFILE`: Select preset (sweeper, line, standard)

mod cascade_config;
mod dash_power_config;
mod dispatcher_config;
mod planner_config;
mod positioning_config;

pub use cascade_config::CascadeConfig;
pub use dash_power_config::DashPowerConfig;
pub use dispatcher_config::DispatcherConfig;
pub use planner_config::PlannerConfig;
pub use positioning_config::PositioningConfig;

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

use crate::error::{ConfigError, Result};

/// Full keeper configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GoalieConfig {
    pub dispatcher: DispatcherConfig,
    pub positioning: PositioningConfig,
    pub planner: PlannerConfig,
    pub cascade: CascadeConfig,
    pub dash: DashPowerConfig,
}

impl GoalieConfig {
    /// 기본 프로필
    pub fn standard() -> Self {
        Self::default()
    }

    /// Sweeper keeper: engages opponents earlier and holds a press longer
    pub fn sweeper() -> Self {
        let mut cfg = Self::default();
        cfg.positioning.press_enter_distance = 6.5;
        cfg.positioning.press_exit_distance = 8.5;
        cfg.positioning.home_enter_distance = 13.0;
        cfg.positioning.home_hold_distance = 16.0;
        cfg
    }

    /// Line keeper: stays deep and only presses at very short range
    pub fn line_keeper() -> Self {
        let mut cfg = Self::default();
        cfg.positioning.press_enter_distance = 4.0;
        cfg.positioning.press_exit_distance = 6.0;
        cfg.planner.base_move_x = -45.0;
        cfg
    }

    /// Preset by name; unknown names fall back to the standard profile
    pub fn from_profile(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "sweeper" => Self::sweeper(),
            "line" | "line_keeper" => Self::line_keeper(),
            _ => Self::standard(),
        }
    }

    /// Load from environment variable GOALIE_PROFILE or use default
    pub fn from_env_or_default() -> Self {
        Self::from_profile(&env::var("GOALIE_PROFILE").unwrap_or_default())
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let cfg: GoalieConfig = serde_yaml::from_str(yaml)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: GoalieConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load a YAML (`.yaml`/`.yml`) or JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
            .unwrap_or(false);
        if is_yaml {
            Self::from_yaml_str(&text)
        } else {
            Self::from_json_str(&text)
        }
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Reject values the decision code cannot work with.
    ///
    /// The two hysteresis bands are checked independently and never unified.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let p = &self.positioning;
        let c = &self.cascade;

        let distances = [
            ("positioning.home_enter_distance", p.home_enter_distance),
            ("positioning.home_hold_distance", p.home_hold_distance),
            ("positioning.press_enter_distance", p.press_enter_distance),
            ("positioning.press_exit_distance", p.press_exit_distance),
            ("positioning.conservative_arrive_dist", p.conservative_arrive_dist),
            ("positioning.home_arrive_dist", p.home_arrive_dist),
            ("cascade.x_buf", c.x_buf),
            ("cascade.danger_goal_depth", c.danger_goal_depth),
            ("cascade.block_x_offset", c.block_x_offset),
            ("planner.goal_line_depth", self.planner.goal_line_depth),
            ("planner.y_buf", self.planner.y_buf),
            ("planner.x_back", self.planner.x_back),
            ("dispatcher.home_tolerance", self.dispatcher.home_tolerance),
            ("dispatcher.catch_margin", self.dispatcher.catch_margin),
        ];
        for (field, value) in distances {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidDistance { field, value });
            }
        }

        if p.home_hold_distance < p.home_enter_distance {
            return Err(ConfigError::InvertedHysteresis {
                band: "home",
                enter: p.home_enter_distance,
                hold: p.home_hold_distance,
            });
        }
        if p.press_exit_distance < p.press_enter_distance {
            return Err(ConfigError::InvertedHysteresis {
                band: "press",
                enter: p.press_enter_distance,
                hold: p.press_exit_distance,
            });
        }

        let positives = [
            ("cascade.dist_thr_floor", c.dist_thr_floor),
            ("cascade.tackle_max_body_angle", c.tackle_max_body_angle),
            ("positioning.conservative_power_rate", p.conservative_power_rate),
            ("dash.standard_power_rate", self.dash.standard_power_rate),
        ];
        for (field, value) in positives {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        Ok(())
    }
}

// ========== Tests ==========
