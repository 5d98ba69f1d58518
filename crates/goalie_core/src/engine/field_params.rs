//! Field and server parameters
//!
//! Geometry and physics constants of the simulator the keeper plays in.
//! The keeper never owns these; the world model hands them over with every
//! snapshot, so they live in a plain serde value with simulator defaults.
//!
//! ## Coordinate System
//! - X: 0 = centre spot, negative = our half, `-pitch_half_length` = our goal line
//! - Y: 0 = centre line of the pitch, goal posts at `±goal_half_width`

use serde::{Deserialize, Serialize};

use super::geometry::Vec2;

/// Standard simulator values
pub mod defaults {
    pub const PITCH_HALF_LENGTH: f32 = 52.5;
    pub const GOAL_HALF_WIDTH: f32 = 7.01;
    pub const PENALTY_AREA_LENGTH: f32 = 16.5;
    pub const PENALTY_AREA_HALF_WIDTH: f32 = 20.16;
    pub const MAX_DASH_POWER: f32 = 100.0;
    pub const MIN_DASH_POWER: f32 = -100.0;
    /// Catchable area rectangle (length x width) in front of the keeper
    pub const CATCHABLE_AREA_L: f32 = 1.2;
    pub const CATCHABLE_AREA_W: f32 = 1.0;
    pub const CATCH_BAN_CYCLE: u64 = 5;
    pub const BALL_DECAY: f32 = 0.94;
    pub const PLAYER_DECAY: f32 = 0.4;
    pub const STAMINA_MAX: f32 = 8000.0;
    pub const STAMINA_INC_MAX: f32 = 45.0;
}

/// Axis-aligned rectangle given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub length: f32,
    pub width: f32,
}

impl Rect {
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.left
            && p.x <= self.left + self.length
            && p.y >= self.top
            && p.y <= self.top + self.width
    }
}

/// Simulator parameters consumed by the keeper
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FieldParams {
    pub pitch_half_length: f32,
    pub goal_half_width: f32,
    pub penalty_area_length: f32,
    pub penalty_area_half_width: f32,
    pub max_dash_power: f32,
    pub min_dash_power: f32,
    pub catchable_area_l: f32,
    pub catchable_area_w: f32,
    pub catch_ban_cycle: u64,
    pub ball_decay: f32,
    pub player_decay: f32,
    pub stamina_max: f32,
    pub stamina_inc_max: f32,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            pitch_half_length: defaults::PITCH_HALF_LENGTH,
            goal_half_width: defaults::GOAL_HALF_WIDTH,
            penalty_area_length: defaults::PENALTY_AREA_LENGTH,
            penalty_area_half_width: defaults::PENALTY_AREA_HALF_WIDTH,
            max_dash_power: defaults::MAX_DASH_POWER,
            min_dash_power: defaults::MIN_DASH_POWER,
            catchable_area_l: defaults::CATCHABLE_AREA_L,
            catchable_area_w: defaults::CATCHABLE_AREA_W,
            catch_ban_cycle: defaults::CATCH_BAN_CYCLE,
            ball_decay: defaults::BALL_DECAY,
            player_decay: defaults::PLAYER_DECAY,
            stamina_max: defaults::STAMINA_MAX,
            stamina_inc_max: defaults::STAMINA_INC_MAX,
        }
    }
}

impl FieldParams {
    /// Radius within which the keeper can catch the ball
    pub fn catchable_area(&self) -> f32 {
        let half_w = self.catchable_area_w * 0.5;
        (half_w * half_w + self.catchable_area_l * self.catchable_area_l).sqrt()
    }

    /// X of our penalty area front line
    pub fn our_penalty_area_line_x(&self) -> f32 {
        -self.pitch_half_length + self.penalty_area_length
    }

    /// Centre of our goal mouth
    pub fn our_goal_center(&self) -> Vec2 {
        Vec2::new(-self.pitch_half_length, 0.0)
    }

    /// Home spot one unit in front of our goal line
    pub fn goalie_home(&self) -> Vec2 {
        Vec2::new(-self.pitch_half_length + 1.0, 0.0)
    }

    /// Our penalty area shrunk by one unit on the front and both sides.
    ///
    /// The keeper only catches inside this box so a ball on the line is
    /// never claimed illegally.
    pub fn own_catch_area(&self) -> Rect {
        Rect {
            left: -self.pitch_half_length,
            top: -self.penalty_area_half_width + 1.0,
            length: self.penalty_area_length - 1.0,
            width: self.penalty_area_half_width * 2.0 - 2.0,
        }
    }

    /// Clamp a dash power into the simulator's accepted range
    pub fn normalize_dash_power(&self, power: f32) -> f32 {
        power.clamp(self.min_dash_power, self.max_dash_power)
    }
}
