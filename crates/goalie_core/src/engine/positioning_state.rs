//! Positioning state machine
//!
//! Top-level stance decision while the keeper neither owns nor chases the
//! ball: conservative dead-ball stance, return home, press a close
//! opponent, or hold the computed station point.
//!
//! The pressing flag is the only state that survives a cycle. Both the
//! home-return and the pressing thresholds depend on it:
//!
//! | threshold | not pressing | pressing |
//! |-----------|--------------|----------|
//! | return home (ball distance) | 15.0 | 18.0 |
//! | press (opponent distance)   | 5.0  | 7.0  |
//!
//! An active press is cleared once the opponent is at least 7.0 away.

use serde::Serialize;
use tracing::debug;

use super::action::{BodyAction, Decision, Gaze};
use super::config::GoalieConfig;
use super::geometry::Vec2;
use super::judge::SituationJudge;
use super::movement_cascade::run_cascade;
use super::rules::{first_match, Step};
use super::target_planner::station_point;
use super::world::WorldSnapshot;

/// Pressing flag carried across cycles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PressingState {
    pub active: bool,
    /// Cycle of the last set or clear
    pub last_transition: Option<u64>,
}

impl PressingState {
    fn set(&mut self, cycle: u64) {
        if !self.active {
            self.active = true;
            self.last_transition = Some(cycle);
        }
    }

    fn clear(&mut self, cycle: u64) {
        if self.active {
            self.active = false;
            self.last_transition = Some(cycle);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PositioningPhase {
    DeadBallConservative,
    ReturnHome,
    Pressing,
    Stationing,
}

pub struct PositioningContext<'a> {
    pub wm: &'a WorldSnapshot,
    pub config: &'a GoalieConfig,
    pub judge: &'a dyn SituationJudge,
    pub pressing: &'a mut PressingState,
}

fn positioning_steps<'a>() -> [Step<PositioningContext<'a>, PositioningPhase>; 3] {
    [
        Step::new(PositioningPhase::DeadBallConservative, dead_ball_conservative),
        Step::new(PositioningPhase::ReturnHome, return_home),
        Step::new(PositioningPhase::Pressing, press_opponent),
    ]
}

/// Run the state machine for one cycle, updating `pressing` in place
pub fn run_positioning(
    wm: &WorldSnapshot,
    config: &GoalieConfig,
    judge: &dyn SituationJudge,
    pressing: &mut PressingState,
) -> Decision {
    let mut ctx = PositioningContext {
        wm,
        config,
        judge,
        pressing,
    };
    let (phase, mut decision) = match first_match(&positioning_steps(), &mut ctx) {
        Some(hit) => hit,
        None => (PositioningPhase::Stationing, stationing(&ctx)),
    };
    decision.route.phase = Some(phase);
    debug!(
        cycle = wm.cycle,
        ?phase,
        pressing = ctx.pressing.active,
        "positioning decision"
    );
    decision
}

/// Walk to `target` at `power`, or just turn the neck once there
fn go_to_or_hold(wm: &WorldSnapshot, target: Vec2, dist_thr: f32, power: f32) -> BodyAction {
    if (wm.me.pos - target).norm() < dist_thr {
        BodyAction::Turn { moment: 0.0 }
    } else {
        BodyAction::GoToPoint {
            target,
            dist_thr,
            max_power: power,
        }
    }
}

fn dead_ball_conservative(ctx: &mut PositioningContext) -> Option<Decision> {
    let wm = ctx.wm;
    if !wm.mode.is_conservative_restart() {
        return None;
    }
    let cfg = &ctx.config.positioning;
    debug!(mode = ?wm.mode, "dead ball: conservative position");
    let body = go_to_or_hold(
        wm,
        cfg.conservative_point,
        cfg.conservative_arrive_dist,
        wm.field.max_dash_power * cfg.conservative_power_rate,
    );
    Some(Decision::new(body, Gaze::GoalieWideScan, "ConservativePos"))
}

fn return_home(ctx: &mut PositioningContext) -> Option<Decision> {
    let wm = ctx.wm;
    let cfg = &ctx.config.positioning;
    let ball_dist = wm.ball_dist();
    if ball_dist >= cfg.home_threshold(ctx.pressing.active) {
        return None;
    }

    ctx.pressing.clear(wm.cycle);
    let home = cfg.home_point(wm.ball.pos.y);
    debug!(ball_dist, x = home.x, y = home.y, "ball close: return home");
    let body = go_to_or_hold(wm, home, cfg.home_arrive_dist, wm.field.max_dash_power);
    Some(Decision::new(body, Gaze::GoalieWideScan, "ReturnHome"))
}

fn press_opponent(ctx: &mut PositioningContext) -> Option<Decision> {
    let wm = ctx.wm;
    let cfg = &ctx.config.positioning;
    let field = &wm.field;

    let area_center = Vec2::new(
        field.our_penalty_area_line_x() + field.penalty_area_length / 2.0,
        0.0,
    );
    let opp_dist = wm
        .opponents
        .iter()
        .map(|opp| (opp.pos - area_center).norm())
        .fold(1.0e6_f32, f32::min);

    let steps = &wm.intercept;
    let teammate_better = wm.kickable_teammate
        || steps.teammate_step.saturating_add(cfg.teammate_step_margin) < steps.self_step;

    if ctx.pressing.active && teammate_better {
        debug!("support arrived: stop pressing");
        ctx.pressing.clear(wm.cycle);
    }

    let press_threshold = cfg.press_threshold(ctx.pressing.active);
    let home_threshold = cfg.home_threshold(ctx.pressing.active);

    if opp_dist < press_threshold && !teammate_better && wm.ball_dist() >= home_threshold {
        ctx.pressing.set(wm.cycle);
        debug!(opp_dist, "press close opponent");
        return Some(Decision::new(BodyAction::ChaseBall, Gaze::TrackBall, "Press"));
    }

    if ctx.pressing.active && opp_dist >= cfg.press_exit_distance {
        debug!(opp_dist, "opponent gone: stop pressing");
        ctx.pressing.clear(wm.cycle);
    }
    None
}

fn stationing(ctx: &PositioningContext) -> Decision {
    let sp = station_point(ctx.wm, &ctx.config.planner);
    debug!(kind = ?sp.kind, x = sp.point.x, y = sp.point.y, "station point");
    run_cascade(ctx.wm, ctx.config, ctx.judge, sp.point)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::judge::HintJudge;
    use crate::engine::test_support::SnapshotBuilder;
    use crate::engine::world::GameMode;
    use proptest::prelude::*;

    /// X of the pressing reference point with default field parameters
    const AREA_CENTER_X: f32 = -27.75;

    fn run(wm: &WorldSnapshot, pressing: &mut PressingState) -> Decision {
        run_positioning(wm, &GoalieConfig::default(), &HintJudge, pressing)
    }

    fn active_since(cycle: u64) -> PressingState {
        PressingState {
            active: true,
            last_transition: Some(cycle),
        }
    }

    #[test]
    fn test_dead_ball_goes_to_conservative_point() {
        let wm = SnapshotBuilder::new()
            .mode(GameMode::CornerKick)
            .self_pos(-45.0, 5.0)
            .build();
        let mut pressing = PressingState::default();
        let decision = run(&wm, &mut pressing);
        assert_eq!(decision.route.phase, Some(PositioningPhase::DeadBallConservative));
        assert_eq!(decision.label, "ConservativePos");
        assert_eq!(
            decision.body,
            BodyAction::GoToPoint {
                target: Vec2::new(-49.0, 0.0),
                dist_thr: 1.0,
                max_power: 50.0
            }
        );
        assert_eq!(decision.gaze, Gaze::GoalieWideScan);
    }

    #[test]
    fn test_dead_ball_ignores_pressing_state() {
        let wm = SnapshotBuilder::new()
            .mode(GameMode::KickIn)
            .self_pos(-49.0, 0.5)
            .ball_pos(-40.0, 0.0)
            .opponent(AREA_CENTER_X, 0.0)
            .build();
        let mut pressing = active_since(40);
        let decision = run(&wm, &mut pressing);
        assert_eq!(decision.label, "ConservativePos");
        // already on the spot
        assert_eq!(decision.body, BodyAction::Turn { moment: 0.0 });
        assert_eq!(pressing, active_since(40));
    }

    #[test]
    fn test_close_ball_returns_home_on_ball_side() {
        let wm = SnapshotBuilder::new()
            .self_pos(-50.0, 0.0)
            .ball_pos(-41.0, 4.0)
            .build();
        let mut pressing = PressingState::default();
        let decision = run(&wm, &mut pressing);
        assert_eq!(decision.route.phase, Some(PositioningPhase::ReturnHome));
        assert_eq!(decision.move_target(), Some(Vec2::new(-51.0, 6.0)));
        assert_eq!(decision.power(), Some(100.0));

        let wm = SnapshotBuilder::new()
            .self_pos(-50.0, 0.0)
            .ball_pos(-41.0, -4.0)
            .build();
        let decision = run(&wm, &mut pressing);
        assert_eq!(decision.move_target(), Some(Vec2::new(-51.0, -6.0)));
    }

    #[test]
    fn test_home_band_widens_while_pressing() {
        // ball 17 away: outside the normal band, inside the pressing one
        let wm = SnapshotBuilder::new()
            .cycle(200)
            .self_pos(-50.0, 0.0)
            .ball_pos(-33.0, 0.0)
            .build();

        let mut idle = PressingState::default();
        let decision = run(&wm, &mut idle);
        assert_eq!(decision.route.phase, Some(PositioningPhase::Stationing));

        let mut pressing = active_since(150);
        let decision = run(&wm, &mut pressing);
        assert_eq!(decision.route.phase, Some(PositioningPhase::ReturnHome));
        assert!(!pressing.active);
        assert_eq!(pressing.last_transition, Some(200));
    }

    #[test]
    fn test_press_close_opponent() {
        let wm = SnapshotBuilder::new()
            .cycle(300)
            .self_pos(-50.0, 0.0)
            .ball_pos(-34.0, 0.0)
            .opponent(AREA_CENTER_X - 4.0, 0.0)
            .build();
        let mut pressing = PressingState::default();
        let decision = run(&wm, &mut pressing);
        assert_eq!(decision.route.phase, Some(PositioningPhase::Pressing));
        assert_eq!(decision.body, BodyAction::ChaseBall);
        assert_eq!(decision.gaze, Gaze::TrackBall);
        assert_eq!(pressing, active_since(300));
    }

    #[test]
    fn test_press_needs_tighter_distance_to_enter() {
        let wm = SnapshotBuilder::new()
            .self_pos(-50.0, 0.0)
            .ball_pos(-25.0, 0.0)
            .opponent(AREA_CENTER_X - 6.0, 0.0)
            .build();

        let mut idle = PressingState::default();
        let decision = run(&wm, &mut idle);
        assert_eq!(decision.route.phase, Some(PositioningPhase::Stationing));
        assert!(!idle.active);

        let mut pressing = active_since(10);
        let decision = run(&wm, &mut pressing);
        assert_eq!(decision.route.phase, Some(PositioningPhase::Pressing));
        assert_eq!(pressing, active_since(10));
    }

    #[test]
    fn test_press_cleared_when_opponent_leaves() {
        let wm = SnapshotBuilder::new()
            .cycle(120)
            .self_pos(-50.0, 0.0)
            .ball_pos(-25.0, 0.0)
            .opponent(AREA_CENTER_X + 7.5, 0.0)
            .build();
        let mut pressing = active_since(100);
        let decision = run(&wm, &mut pressing);
        assert_eq!(decision.route.phase, Some(PositioningPhase::Stationing));
        assert_eq!(
            pressing,
            PressingState {
                active: false,
                last_transition: Some(120)
            }
        );
    }

    #[test]
    fn test_teammate_claim_clears_press_and_falls_through() {
        let wm = SnapshotBuilder::new()
            .cycle(130)
            .self_pos(-50.0, 0.0)
            .ball_pos(-25.0, 0.0)
            .opponent(AREA_CENTER_X - 3.0, 0.0)
            .kickable_teammate(true)
            .build();
        let mut pressing = active_since(100);
        let decision = run(&wm, &mut pressing);
        assert!(!pressing.active);
        assert_eq!(pressing.last_transition, Some(130));
        assert_eq!(decision.route.phase, Some(PositioningPhase::Stationing));
        assert!(decision.route.step.is_some());
    }

    #[test]
    fn test_teammate_step_margin() {
        let base = || {
            SnapshotBuilder::new()
                .self_pos(-50.0, 0.0)
                .ball_pos(-25.0, 0.0)
                .opponent(AREA_CENTER_X - 3.0, 0.0)
        };

        // teammate two cycles earlier: better claim
        let wm = base().intercept(10, 8, 5).build();
        let mut pressing = PressingState::default();
        assert_ne!(run(&wm, &mut pressing).body, BodyAction::ChaseBall);

        // one cycle earlier is not enough
        let wm = base().intercept(10, 9, 5).build();
        let mut pressing = PressingState::default();
        assert_eq!(run(&wm, &mut pressing).body, BodyAction::ChaseBall);
    }

    #[test]
    fn test_unreachable_teammate_does_not_block_press() {
        let wm = SnapshotBuilder::new()
            .self_pos(-50.0, 0.0)
            .ball_pos(-25.0, 0.0)
            .opponent(AREA_CENTER_X - 2.25, 0.0)
            .intercept(10, u32::MAX, 5)
            .build();
        let mut pressing = PressingState::default();
        assert_eq!(run(&wm, &mut pressing).body, BodyAction::ChaseBall);
        assert!(pressing.active);
    }

    #[test]
    fn test_keeper_on_station_holds_when_ball_unreachable() {
        // shot line from (-10, 3) to (-56.5, 0) crosses x = -43 here
        let y = 3.0 * 13.5 / 46.5;
        let wm = SnapshotBuilder::new()
            .self_pos(-43.0, y)
            .ball_pos(-10.0, 3.0)
            .intercept(10, 3_000_000_000, 3_000_000_000)
            .build();
        let mut pressing = PressingState::default();
        let decision = run(&wm, &mut pressing);
        assert_eq!(decision.route.phase, Some(PositioningPhase::Stationing));
        assert!(!matches!(decision.body, BodyAction::StopDash { .. }));
    }

    #[test]
    fn test_no_opponents_never_presses() {
        let wm = SnapshotBuilder::new()
            .self_pos(-50.0, 0.0)
            .ball_pos(-10.0, 0.0)
            .build();
        let mut pressing = PressingState::default();
        let decision = run(&wm, &mut pressing);
        assert_eq!(decision.route.phase, Some(PositioningPhase::Stationing));
        assert_eq!(pressing, PressingState::default());
    }

    proptest! {
        #[test]
        fn prop_pressing_does_not_chatter(dists in prop::collection::vec(0.0f32..12.0, 1..60)) {
            let cfg = GoalieConfig::default();
            let mut pressing = PressingState::default();
            for (i, d) in dists.iter().enumerate() {
                let wm = SnapshotBuilder::new()
                    .cycle(i as u64)
                    .self_pos(-50.0, 0.0)
                    .ball_pos(-25.0, 0.0)
                    .opponent(AREA_CENTER_X + d, 0.0)
                    .build();
                let before = pressing.active;
                run_positioning(&wm, &cfg, &HintJudge, &mut pressing);
                if !before && pressing.active {
                    prop_assert!(*d < cfg.positioning.press_enter_distance);
                }
                if before && !pressing.active {
                    prop_assert!(*d >= cfg.positioning.press_exit_distance);
                }
            }
        }
    }
}
