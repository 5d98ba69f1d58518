//! Positioning state machine tuning

use serde::{Deserialize, Serialize};

use crate::engine::geometry::Vec2;

/// Hysteresis bands and fixed spots of the positioning state machine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PositioningConfig {
    // === Dead-ball stance ===
    /// Spot taken on throw-ins and corners (기본: (-49, 0))
    pub conservative_point: Vec2,
    /// Arrival radius at the conservative spot
    pub conservative_arrive_dist: f32,
    /// Fraction of max dash power used on the way there
    pub conservative_power_rate: f32,

    // === Return home ===
    /// Ball distance below which the keeper returns home (기본: 15.0)
    pub home_enter_distance: f32,
    /// Same threshold while pressing, wider so a press is not dropped early (기본: 18.0)
    pub home_hold_distance: f32,
    /// X of both home points
    pub home_point_x: f32,
    /// |Y| of the home points; the sign follows the ball's half
    pub home_point_y: f32,
    pub home_arrive_dist: f32,

    // === Pressing ===
    /// Opponent distance to trigger a press when not pressing (기본: 5.0)
    pub press_enter_distance: f32,
    /// Opponent distance that keeps an active press alive; also the clear line (기본: 7.0)
    pub press_exit_distance: f32,
    /// A teammate reaching the ball more than this many cycles earlier has the better claim
    pub teammate_step_margin: u32,
}

impl Default for PositioningConfig {
    fn default() -> Self {
        Self {
            conservative_point: Vec2::new(-49.0, 0.0),
            conservative_arrive_dist: 1.0,
            conservative_power_rate: 0.5,

            home_enter_distance: 15.0,
            home_hold_distance: 18.0,
            home_point_x: -51.0,
            home_point_y: 6.0,
            home_arrive_dist: 1.0,

            press_enter_distance: 5.0,
            press_exit_distance: 7.0,
            teammate_step_margin: 1,
        }
    }
}

impl PositioningConfig {
    /// Home threshold for the current pressing state
    pub fn home_threshold(&self, pressing: bool) -> f32 {
        if pressing {
            self.home_hold_distance
        } else {
            self.home_enter_distance
        }
    }

    /// Press threshold for the current pressing state
    pub fn press_threshold(&self, pressing: bool) -> f32 {
        if pressing {
            self.press_exit_distance
        } else {
            self.press_enter_distance
        }
    }

    /// Home point on the ball's lateral half
    pub fn home_point(&self, ball_y: f32) -> Vec2 {
        if ball_y >= 0.0 {
            Vec2::new(self.home_point_x, self.home_point_y)
        } else {
            Vec2::new(self.home_point_x, -self.home_point_y)
        }
    }
}
