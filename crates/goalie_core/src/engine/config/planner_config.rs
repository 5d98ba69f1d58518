//! Station point planner tuning

use serde::{Deserialize, Serialize};

/// Geometry constants of the station point planner
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Standard defensive line X (기본: -43.0)
    pub base_move_x: f32,
    /// Line used when snapping to a post (기본: -49.0)
    pub danger_move_x: f32,

    // === Extreme-angle guard ===
    /// Ball Y beyond goal half-width + this on the positive side triggers the guard
    pub positive_pole_margin: f32,
    /// Ball Y beyond -(goal half-width + this) triggers the guard
    pub negative_pole_margin: f32,
    /// Open interval of ball-to-post directions (degrees) on the positive side
    pub positive_pole_band: (f32, f32),
    /// Open interval of ball-to-post directions (degrees) on the negative side
    pub negative_pole_band: (f32, f32),
    /// Lateral offset past the post for the snapped target
    pub pole_snap_offset: f32,

    // === Near-goal-line guard ===
    /// Ball within this depth of our goal line
    pub goal_line_depth: f32,
    /// ...and further than goal half-width + this from the centre
    pub goal_line_lateral_margin: f32,
    /// Target Y sits this far inside the post
    pub post_inset: f32,

    // === Shot-line bisection ===
    /// Depth of the reference point behind the goal line
    pub x_back: f32,
    /// Maximum cycles the ball point is projected ahead
    pub ball_pred_cycle: u32,
    /// Safety buffer kept inside each post
    pub y_buf: f32,
    /// Minimum X gap between ball point and reference point
    pub min_ball_point_gap: f32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            base_move_x: -43.0,
            danger_move_x: -49.0,

            positive_pole_margin: 5.0,
            negative_pole_margin: 3.0,
            positive_pole_band: (-140.0, -90.0),
            negative_pole_band: (90.0, 145.0),
            pole_snap_offset: 0.001,

            goal_line_depth: 9.0,
            goal_line_lateral_margin: 2.8,
            post_inset: 0.4,

            x_back: 4.0,
            ball_pred_cycle: 8,
            y_buf: 0.5,
            min_ball_point_gap: 0.1,
        }
    }
}
