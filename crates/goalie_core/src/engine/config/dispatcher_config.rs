//! Role dispatcher tuning

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    // === Kick-off stoppage ===
    /// Ball closer than this to the centre spot
    pub stoppage_ball_center_dist: f32,
    /// Ball slower than this
    pub stoppage_ball_speed: f32,
    /// Keeper further than this from home still has to walk back
    pub home_tolerance: f32,

    // === Controlled walk home ===
    pub home_arrive_dist: f32,
    pub home_brake_margin: f32,
    pub home_extra_cycles: u32,
    pub home_allow_stop: bool,
    pub home_kp: f32,
    pub home_ki: f32,
    pub home_urgent: bool,

    /// Safety margin subtracted from the catchable radius
    pub catch_margin: f32,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            stoppage_ball_center_dist: 0.1,
            stoppage_ball_speed: 0.05,
            home_tolerance: 0.5,

            home_arrive_dist: 0.5,
            home_brake_margin: 1.0,
            home_extra_cycles: 30,
            home_allow_stop: true,
            home_kp: 0.5,
            home_ki: 0.1,
            home_urgent: false,

            catch_margin: 0.05,
        }
    }
}
