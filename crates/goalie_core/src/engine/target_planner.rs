//! Station point planner
//!
//! Computes where the keeper should stand this cycle. Pure function of the
//! snapshot: no state, recomputed from scratch every cycle.
//!
//! ## Priority
//! 1. Extreme-angle guard: ball wide and level with a post → cover that post
//! 2. Near-goal-line guard: ball deep and wide → stand just inside the near post
//! 3. Shot line: stand on the line from the ball to a point behind the goal,
//!    at a fixed depth, clamped inside the posts

use serde::Serialize;
use tracing::debug;

use super::config::PlannerConfig;
use super::geometry::{direction_deg, inertia_n_step_point, line_y_at, Vec2};
use super::world::WorldSnapshot;

/// Which rule produced the station point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StationKind {
    PositivePole,
    NegativePole,
    GoalLinePost,
    ShotLine,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StationPoint {
    pub point: Vec2,
    pub kind: StationKind,
}

/// Cycles until either side can play the ball; 0 while someone controls it
pub fn ball_reach_step(wm: &WorldSnapshot) -> u32 {
    if wm.kickable_teammate || wm.kickable_opponent {
        0
    } else {
        wm.intercept.teammate_step.min(wm.intercept.opponent_step)
    }
}

pub fn station_point(wm: &WorldSnapshot, cfg: &PlannerConfig) -> StationPoint {
    let base_pos = wm.ball_inertia_point(ball_reach_step(wm));

    if let Some(sp) = extreme_angle_target(wm, cfg, base_pos) {
        return sp;
    }
    if let Some(sp) = goal_line_target(wm, cfg, base_pos) {
        return sp;
    }
    shot_line_target(wm, cfg, base_pos)
}

fn extreme_angle_target(
    wm: &WorldSnapshot,
    cfg: &PlannerConfig,
    base_pos: Vec2,
) -> Option<StationPoint> {
    let field = &wm.field;
    let half_w = field.goal_half_width;

    if base_pos.y > half_w + cfg.positive_pole_margin {
        let pole = Vec2::new(-field.pitch_half_length, half_w);
        let angle = direction_deg(pole - base_pos);
        let (lo, hi) = cfg.positive_pole_band;
        if lo < angle && angle < hi {
            debug!(angle, "station: positive pole");
            return Some(StationPoint {
                point: Vec2::new(cfg.danger_move_x, half_w + cfg.pole_snap_offset),
                kind: StationKind::PositivePole,
            });
        }
    } else if base_pos.y < -half_w - cfg.negative_pole_margin {
        let pole = Vec2::new(-field.pitch_half_length, -half_w);
        let angle = direction_deg(pole - base_pos);
        let (lo, hi) = cfg.negative_pole_band;
        if lo < angle && angle < hi {
            debug!(angle, "station: negative pole");
            return Some(StationPoint {
                point: Vec2::new(cfg.danger_move_x, -half_w - cfg.pole_snap_offset),
                kind: StationKind::NegativePole,
            });
        }
    }
    None
}

fn goal_line_target(
    wm: &WorldSnapshot,
    cfg: &PlannerConfig,
    base_pos: Vec2,
) -> Option<StationPoint> {
    let field = &wm.field;
    if base_pos.x < -field.pitch_half_length + cfg.goal_line_depth
        && base_pos.y.abs() > field.goal_half_width + cfg.goal_line_lateral_margin
    {
        let mut y = field.goal_half_width - cfg.post_inset;
        if base_pos.y < 0.0 {
            y = -y;
        }
        debug!(y, "station: goal line post");
        return Some(StationPoint {
            point: Vec2::new(cfg.base_move_x, y),
            kind: StationKind::GoalLinePost,
        });
    }
    None
}

fn shot_line_target(wm: &WorldSnapshot, cfg: &PlannerConfig, base_pos: Vec2) -> StationPoint {
    let field = &wm.field;
    let base_point = Vec2::new(-field.pitch_half_length - cfg.x_back, 0.0);

    let mut ball_point = if wm.kickable_opponent {
        base_pos
    } else {
        let pred_cycle = cfg.ball_pred_cycle.min(wm.intercept.opponent_step);
        inertia_n_step_point(base_pos, wm.ball.vel, pred_cycle, field.ball_decay)
    };

    if ball_point.x < base_point.x + cfg.min_ball_point_gap {
        ball_point.x = base_point.x + cfg.min_ball_point_gap;
    }

    let y_limit = field.goal_half_width - cfg.y_buf;
    let move_y = line_y_at(ball_point, base_point, cfg.base_move_x).clamp(-y_limit, y_limit);

    debug!(
        ball_x = ball_point.x,
        ball_y = ball_point.y,
        move_y,
        "station: shot line"
    );
    StationPoint {
        point: Vec2::new(cfg.base_move_x, move_y),
        kind: StationKind::ShotLine,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_support::SnapshotBuilder;
    use proptest::prelude::*;

    fn plan(wm: &WorldSnapshot) -> StationPoint {
        station_point(wm, &PlannerConfig::default())
    }

    #[test]
    fn test_reach_step_zero_when_controlled() {
        let wm = SnapshotBuilder::new().intercept(5, 3, 4).build();
        assert_eq!(ball_reach_step(&wm), 3);
        let wm = SnapshotBuilder::new()
            .intercept(5, 3, 4)
            .kickable_opponent(true)
            .build();
        assert_eq!(ball_reach_step(&wm), 0);
    }

    #[test]
    fn test_central_ball_targets_center_of_line() {
        let wm = SnapshotBuilder::new().ball_pos(-10.0, 0.0).build();
        let sp = plan(&wm);
        assert_eq!(sp.kind, StationKind::ShotLine);
        assert_eq!(sp.point, Vec2::new(-43.0, 0.0));
    }

    #[test]
    fn test_shot_line_follows_ball_side() {
        let wm = SnapshotBuilder::new().ball_pos(-20.0, 10.0).build();
        let sp = plan(&wm);
        assert_eq!(sp.kind, StationKind::ShotLine);
        // line from (-20, 10) to (-56.5, 0), evaluated at x = -43
        let expected = 10.0 * (-43.0 + 56.5) / (-20.0 + 56.5);
        assert!((sp.point.y - expected).abs() < 1e-4);
    }

    #[test]
    fn test_shot_line_clamped_inside_posts() {
        let wm = SnapshotBuilder::new().ball_pos(-10.0, 30.0).build();
        let sp = plan(&wm);
        assert_eq!(sp.kind, StationKind::ShotLine);
        assert!((sp.point.y - (7.01 - 0.5)).abs() < 1e-4);
    }

    #[test]
    fn test_positive_pole_guard() {
        // post is behind and below the ball: direction about -101 degrees
        let wm = SnapshotBuilder::new().ball_pos(-50.0, 20.0).build();
        let sp = plan(&wm);
        assert_eq!(sp.kind, StationKind::PositivePole);
        assert_eq!(sp.point.x, -49.0);
        assert!((sp.point.y - 7.011).abs() < 1e-4);
    }

    #[test]
    fn test_negative_pole_guard() {
        let wm = SnapshotBuilder::new().ball_pos(-50.0, -15.0).build();
        let sp = plan(&wm);
        assert_eq!(sp.kind, StationKind::NegativePole);
        assert!((sp.point.y + 7.011).abs() < 1e-4);
    }

    #[test]
    fn test_ball_behind_goal_line_covers_near_post() {
        // the post lies ahead of a ball behind the line, so the pole band does
        // not match and the goal-line guard takes over
        let wm = SnapshotBuilder::new()
            .ball_pos(-60.0, 25.0)
            .kickable_opponent(true)
            .build();
        let sp = plan(&wm);
        assert_eq!(sp.kind, StationKind::GoalLinePost);
        assert!((sp.point.y - (7.01 - 0.4)).abs() < 1e-4);
        assert_eq!(sp.point.x, -43.0);
    }

    #[test]
    fn test_goal_line_guard_negative_side() {
        // shallow enough that the post direction (~150 degrees) is outside the pole band
        let wm = SnapshotBuilder::new().ball_pos(-44.0, -12.0).build();
        let sp = plan(&wm);
        assert_eq!(sp.kind, StationKind::GoalLinePost);
        assert!((sp.point.y + 6.61).abs() < 1e-4);
    }

    #[test]
    fn test_unreachable_ball_keeps_finite_target() {
        let wm = SnapshotBuilder::new()
            .ball_pos(-10.0, 3.0)
            .intercept(10, 3_000_000_000, 3_000_000_000)
            .build();
        let sp = plan(&wm);
        assert_eq!(sp.kind, StationKind::ShotLine);
        assert!(sp.point.x.is_finite() && sp.point.y.is_finite());

        let reachable = SnapshotBuilder::new()
            .ball_pos(-10.0, 3.0)
            .intercept(10, 3, 3)
            .build();
        assert!((sp.point.y - plan(&reachable).point.y).abs() < 1e-4);
    }

    #[test]
    fn test_ball_point_projection_limited_by_opponent() {
        // ball rolling toward the positive side; an opponent reaching it in 1
        // cycle limits the projection to one step
        let near = SnapshotBuilder::new()
            .ball_pos(-20.0, 0.0)
            .ball_vel(0.0, 2.0)
            .intercept(20, 20, 1)
            .build();
        let far = SnapshotBuilder::new()
            .ball_pos(-20.0, 0.0)
            .ball_vel(0.0, 2.0)
            .intercept(20, 20, 30)
            .build();
        let y_near = plan(&near).point.y;
        let y_far = plan(&far).point.y;
        assert!(y_near > 0.0);
        assert!(y_far > y_near);
    }

    proptest! {
        #[test]
        fn prop_planner_is_pure(
            bx in -60.0f32..60.0, by in -40.0f32..40.0,
            vx in -3.0f32..3.0, vy in -3.0f32..3.0,
            opp_step in 0u32..40, tm_step in 0u32..40,
        ) {
            let wm = SnapshotBuilder::new()
                .ball_pos(bx, by)
                .ball_vel(vx, vy)
                .intercept(10, tm_step, opp_step)
                .build();
            prop_assert_eq!(plan(&wm), plan(&wm));
        }

        #[test]
        fn prop_shot_line_y_within_posts(
            bx in -60.0f32..60.0, by in -40.0f32..40.0,
            vx in -3.0f32..3.0, vy in -3.0f32..3.0,
            opp_step in 0u32..40,
        ) {
            let wm = SnapshotBuilder::new()
                .ball_pos(bx, by)
                .ball_vel(vx, vy)
                .intercept(10, 10, opp_step)
                .build();
            let sp = plan(&wm);
            if sp.kind == StationKind::ShotLine {
                let limit = wm.field.goal_half_width - 0.5;
                prop_assert!(sp.point.y >= -limit && sp.point.y <= limit);
                prop_assert_eq!(sp.point.x, -43.0);
            }
        }
    }
}
