//! Dash power model tuning (zone/stamina table)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashPowerConfig {
    /// X distance to the target above which the keeper always sprints
    pub urgent_x_diff: f32,

    // === Ball around midfield ===
    /// Ball X above which play is considered far away (기본: -30.0)
    pub midfield_ball_x: f32,
    /// Stamina ratio under which the keeper throttles further
    pub midfield_full_stamina_rate: f32,
    /// Fraction of the recovery increment used when throttled
    pub midfield_throttle_rate: f32,

    // === Ball in our defensive third ===
    /// |ball Y| above which the ball is wide of the box
    pub wide_ball_y: f32,
    /// Ball X velocity above which the ball is moving away from our goal
    pub ball_leaving_vel_x: f32,
    pub ball_leaving_rate: f32,
    /// Opponent intercept steps at or below which the threat is imminent
    pub imminent_opponent_step: u32,
    pub tired_stamina_rate: f32,
    pub tired_inc_rate: f32,
    /// Fraction of max power used otherwise
    pub standard_power_rate: f32,

    // === Ball inside our penalty area ===
    /// |ball Y| under which the ball is central
    pub central_ball_y: f32,
}

impl Default for DashPowerConfig {
    fn default() -> Self {
        Self {
            urgent_x_diff: 3.0,

            midfield_ball_x: -30.0,
            midfield_full_stamina_rate: 0.9,
            midfield_throttle_rate: 0.5,

            wide_ball_y: 20.0,
            ball_leaving_vel_x: 1.0,
            ball_leaving_rate: 0.5,
            imminent_opponent_step: 3,
            tired_stamina_rate: 0.7,
            tired_inc_rate: 0.7,
            standard_power_rate: 0.6,

            central_ball_y: 15.0,
        }
    }
}
