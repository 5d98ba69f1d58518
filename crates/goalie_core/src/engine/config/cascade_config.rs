//! Movement refinement cascade tuning

use serde::{Deserialize, Serialize};

use crate::engine::judge::TackleLimits;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CascadeConfig {
    /// Minimum success probability for a tackle (1.0 = only certain tackles)
    pub tackle_min_probability: f32,
    /// Largest tackle direction off the body, in degrees
    pub tackle_max_body_angle: f32,
    /// Power rate applied when walking backwards with the ball in view
    pub back_power_rate: f32,

    // === Arrival thresholds ===
    /// Arrival radius as a fraction of ball distance
    pub dist_thr_rate: f32,
    /// Lateral arrival radius as a fraction of ball distance
    pub lateral_dist_thr_rate: f32,
    /// Lower bound for both arrival radii
    pub dist_thr_floor: f32,
    /// X deviation tolerated before correcting depth
    pub x_buf: f32,

    // === Deep cross ===
    /// Target within this of the goal half-width counts as a post target
    pub deep_cross_y_margin: f32,
    /// Ball direction from our goal beyond this (degrees) is a deep cross
    pub deep_cross_angle: f32,
    /// Body angle held while waiting for the cross
    pub cross_body_angle: f32,

    // === Dangerous state ===
    pub danger_goal_depth: f32,
    pub danger_lateral_margin: f32,
    /// Opponent within this of the ball is about to shoot
    pub danger_opponent_ball_dist: f32,
    /// Block point sits this far behind the shooter
    pub block_x_offset: f32,

    // === X correction ===
    pub correct_x_opponent_step: u32,
    pub correct_x_ball_dist: f32,
    /// Beyond this ball distance a plain walk is used instead of a look-ball walk
    pub correct_x_far_ball_dist: f32,

    // === Body direction ===
    pub body_angle_tolerance: f32,
    /// Ball direction from our goal at or beyond this keeps the body on the play
    pub body_danger_angle: f32,
    pub body_opponent_ball_dist: f32,
    pub body_ball_dist: f32,
    pub body_y_diff: f32,

    // === Go to target ===
    /// Body within this of ±90° counts as sideways
    pub sideways_tolerance: f32,
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self {
            tackle_min_probability: 1.0,
            tackle_max_body_angle: 98.0,
            back_power_rate: 0.7,

            dist_thr_rate: 0.1,
            lateral_dist_thr_rate: 0.08,
            dist_thr_floor: 0.5,
            x_buf: 0.5,

            deep_cross_y_margin: 0.8,
            deep_cross_angle: 60.0,
            cross_body_angle: 10.0,

            danger_goal_depth: 11.0,
            danger_lateral_margin: 1.0,
            danger_opponent_ball_dist: 2.0,
            block_x_offset: 2.5,

            correct_x_opponent_step: 4,
            correct_x_ball_dist: 18.0,
            correct_x_far_ball_dist: 30.0,

            body_angle_tolerance: 5.0,
            body_danger_angle: 60.0,
            body_opponent_ball_dist: 7.0,
            body_ball_dist: 20.0,
            body_y_diff: 1.0,

            sideways_tolerance: 7.0,
        }
    }
}

impl CascadeConfig {
    pub fn tackle_limits(&self) -> TackleLimits {
        TackleLimits {
            min_probability: self.tackle_min_probability,
            max_body_angle: self.tackle_max_body_angle,
        }
    }

    /// Arrival radius scaled by ball distance
    pub fn dist_thr(&self, ball_dist: f32) -> f32 {
        (ball_dist * self.dist_thr_rate).max(self.dist_thr_floor)
    }

    /// Lateral arrival radius scaled by ball distance
    pub fn lateral_dist_thr(&self, ball_dist: f32) -> f32 {
        (ball_dist * self.lateral_dist_thr_rate).max(self.dist_thr_floor)
    }
}
