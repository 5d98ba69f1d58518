//! Movement refinement cascade
//!
//! Turns the station point into one primitive action. Steps run in a fixed
//! priority order; the first one that produces an action ends the cycle.
//!
//! ## Order
//! 1. Tackle
//! 2. Deep-cross preparation
//! 3. Stop at the station point
//! 4. Block a shooter in front of goal
//! 5. Depth (X) correction
//! 6. Body direction, opponent-aware
//! 7. Lateral move to the station point
//! 8. Body direction, unconditional
//! 9. Idle: hold and watch

use serde::Serialize;
use tracing::debug;

use super::action::{BodyAction, Decision, Gaze};
use super::config::GoalieConfig;
use super::dash_power::basic_dash_power;
use super::geometry::{angle_diff, Vec2};
use super::judge::SituationJudge;
use super::rules::{first_match, Step};
use super::world::WorldSnapshot;

/// Steps of the cascade, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CascadeStep {
    Tackle,
    PrepareDeepCross,
    StopAtMovePoint,
    BlockDangerousShooter,
    CorrectX,
    CorrectBodyDirWithOpponent,
    GoToMovePoint,
    CorrectBodyDir,
    Idle,
}

pub struct CascadeContext<'a> {
    pub wm: &'a WorldSnapshot,
    pub config: &'a GoalieConfig,
    pub judge: &'a dyn SituationJudge,
    pub move_point: Vec2,
}

impl CascadeContext<'_> {
    fn ball_dist(&self) -> f32 {
        self.wm.ball_dist()
    }

    fn dash_power(&self, target: Vec2) -> f32 {
        basic_dash_power(self.wm, &self.config.dash, target)
    }

    /// Walk to `target` keeping the ball in view.
    ///
    /// Outside play-on the look-ball walk is not available: a plain walk is
    /// used and, once within `dist_thr`, the body turns to `body_angle`.
    fn look_ball_move(&self, target: Vec2, body_angle: f32, dist_thr: f32, power: f32) -> BodyAction {
        if self.wm.mode.allows_look_ball_move() {
            BodyAction::GoToPointLookBall {
                target,
                dist_thr,
                power,
                back_power_rate: self.config.cascade.back_power_rate,
            }
        } else {
            go_to_point_or_turn(self.wm, target, dist_thr, power, body_angle)
        }
    }
}

/// Plain walk, or a turn to `fallback_angle` when already within `dist_thr`
pub(crate) fn go_to_point_or_turn(
    wm: &WorldSnapshot,
    target: Vec2,
    dist_thr: f32,
    power: f32,
    fallback_angle: f32,
) -> BodyAction {
    if (wm.me.pos - target).norm() < dist_thr {
        BodyAction::TurnToAngle {
            angle: fallback_angle,
        }
    } else {
        BodyAction::GoToPoint {
            target,
            dist_thr,
            max_power: power,
        }
    }
}

fn cascade_steps<'a>() -> [Step<CascadeContext<'a>, CascadeStep>; 8] {
    [
        Step::new(CascadeStep::Tackle, try_tackle),
        Step::new(CascadeStep::PrepareDeepCross, prepare_deep_cross),
        Step::new(CascadeStep::StopAtMovePoint, stop_at_move_point),
        Step::new(CascadeStep::BlockDangerousShooter, block_dangerous_shooter),
        Step::new(CascadeStep::CorrectX, correct_x),
        Step::new(CascadeStep::CorrectBodyDirWithOpponent, correct_body_dir_with_opp),
        Step::new(CascadeStep::GoToMovePoint, go_to_station),
        Step::new(CascadeStep::CorrectBodyDir, correct_body_dir_any),
    ]
}

/// Run the cascade toward `move_point`; always yields a decision
pub fn run_cascade(
    wm: &WorldSnapshot,
    config: &GoalieConfig,
    judge: &dyn SituationJudge,
    move_point: Vec2,
) -> Decision {
    let mut ctx = CascadeContext {
        wm,
        config,
        judge,
        move_point,
    };
    let (step, mut decision) = first_match(&cascade_steps(), &mut ctx)
        .unwrap_or_else(|| (CascadeStep::Idle, idle()));
    decision.route.step = Some(step);
    debug!(cycle = wm.cycle, ?step, label = decision.label, "cascade decision");
    decision
}

fn idle() -> Decision {
    Decision::new(
        BodyAction::Turn { moment: 0.0 },
        Gaze::GoalieWideScan,
        "OnlyTurnNeck",
    )
}

fn try_tackle(ctx: &mut CascadeContext) -> Option<Decision> {
    let opportunity = ctx
        .judge
        .tackle_opportunity(ctx.wm, ctx.config.cascade.tackle_limits())?;
    debug!(probability = opportunity.probability, "tackle");
    Some(Decision::new(
        BodyAction::Tackle {
            direction: opportunity.direction,
        },
        Gaze::TrackBall,
        "Tackle",
    ))
}

fn prepare_deep_cross(ctx: &mut CascadeContext) -> Option<Decision> {
    let cfg = &ctx.config.cascade;
    let wm = ctx.wm;
    let move_point = ctx.move_point;

    if move_point.y.abs() < wm.field.goal_half_width - cfg.deep_cross_y_margin {
        return None;
    }
    if wm.ball_angle_from_own_goal().abs() < cfg.deep_cross_angle {
        return None;
    }

    let dist_thr = cfg.dist_thr(ctx.ball_dist());
    if (wm.self_inertia_final_point() - move_point).norm() > dist_thr {
        let power = ctx.dash_power(move_point);
        debug!(power, "deep cross: need to move");
        let body = ctx.look_ball_move(move_point, wm.ball_angle_from_self(), dist_thr, power);
        return Some(Decision::new(body, Gaze::TrackBall, "DeepCrossMove"));
    }

    let body_angle = if wm.ball.pos.y < 0.0 {
        cfg.cross_body_angle
    } else {
        -cfg.cross_body_angle
    };
    debug!(body_angle, "deep cross: hold");
    Some(Decision::new(
        BodyAction::TurnToAngle { angle: body_angle },
        Gaze::GoalieWideScan,
        "PrepareCross",
    ))
}

fn stop_at_move_point(ctx: &mut CascadeContext) -> Option<Decision> {
    let wm = ctx.wm;
    let dist_thr = ctx.config.cascade.dist_thr(ctx.ball_dist());

    if (wm.me.pos - ctx.move_point).norm() >= dist_thr {
        return None;
    }
    if (wm.self_inertia_final_point() - ctx.move_point).norm() < dist_thr {
        debug!("stop: inertia stay");
        return None;
    }
    debug!("stop: stop dash");
    Some(Decision::new(
        BodyAction::StopDash {
            save_recovery: true,
        },
        Gaze::GoalieWideScan,
        "Stop",
    ))
}

fn block_dangerous_shooter(ctx: &mut CascadeContext) -> Option<Decision> {
    let cfg = &ctx.config.cascade;
    let wm = ctx.wm;
    let ball_next = wm.ball_next();

    let in_danger = (ctx.move_point.x - wm.me.pos.x).abs() > cfg.x_buf
        && ball_next.x < -wm.field.pitch_half_length + cfg.danger_goal_depth
        && ball_next.y.abs() < wm.field.goal_half_width + cfg.danger_lateral_margin;
    if !in_danger {
        return None;
    }

    let shooter = wm
        .nearest_opponent_to_ball()
        .filter(|opp| opp.dist_to_ball < cfg.danger_opponent_ball_dist)?;

    let mut block_point = Vec2::new(shooter.pos.x - cfg.block_x_offset, ctx.move_point.y);
    if wm.me.pos.x < block_point.x {
        block_point.x = wm.me.pos.x;
    }
    debug!(x = block_point.x, y = block_point.y, "block opponent kicker");

    if let Some(mut decision) = go_to_move_point(ctx, block_point) {
        decision.label = "BlockOpp";
        return Some(decision);
    }

    let dist_thr = cfg.dist_thr(ctx.ball_dist());
    let body = ctx.look_ball_move(
        block_point,
        wm.ball_angle_from_self(),
        dist_thr,
        wm.field.max_dash_power,
    );
    Some(Decision::new(body, Gaze::TrackBall, "BlockOpp"))
}

fn correct_x(ctx: &mut CascadeContext) -> Option<Decision> {
    let cfg = &ctx.config.cascade;
    let wm = ctx.wm;
    let move_point = ctx.move_point;

    if (move_point.x - wm.me.pos.x).abs() < cfg.x_buf {
        return None;
    }

    let ball_dist = ctx.ball_dist();
    let uncontested =
        !wm.kickable_opponent && wm.intercept.opponent_step >= cfg.correct_x_opponent_step;
    if !uncontested && ball_dist <= cfg.correct_x_ball_dist {
        return None;
    }

    let power = ctx.dash_power(move_point);
    debug!(power, "correct x");

    if !wm.kickable_opponent && ball_dist > cfg.correct_x_far_ball_dist {
        let side = if wm.me.body > 0.0 { 90.0 } else { -90.0 };
        let body = go_to_point_or_turn(wm, move_point, cfg.x_buf, power, side);
        return Some(Decision::new(body, Gaze::TrackBall, "CorrectX"));
    }

    let body = ctx.look_ball_move(move_point, wm.ball_angle_from_self(), cfg.x_buf, power);
    Some(Decision::new(body, Gaze::TrackBall, "CorrectX"))
}

fn correct_body_dir(ctx: &CascadeContext, consider_opp: bool) -> Option<Decision> {
    let cfg = &ctx.config.cascade;
    let wm = ctx.wm;

    let target_angle = if wm.ball_next().y < 0.0 { -90.0 } else { 90.0 };
    let diff = angle_diff(wm.me.body, target_angle);
    if diff < cfg.body_angle_tolerance {
        return None;
    }

    if wm.ball_angle_from_own_goal().abs() >= cfg.body_danger_angle {
        debug!("correct body: danger area");
        return None;
    }

    let opp_ball_dist = wm
        .nearest_opponent_to_ball()
        .map(|opp| opp.dist_to_ball)
        .unwrap_or(100.0);
    let y_settled =
        (ctx.move_point.y - wm.me.pos.y).abs() < cfg.body_y_diff && !wm.kickable_opponent;

    if !consider_opp
        || opp_ball_dist > cfg.body_opponent_ball_dist
        || ctx.ball_dist() > cfg.body_ball_dist
        || y_settled
    {
        debug!(target_angle, diff, consider_opp, "correct body");
        let label = if consider_opp {
            "CorrectBodyWithOpp"
        } else {
            "CorrectBody"
        };
        return Some(Decision::new(
            BodyAction::TurnToAngle {
                angle: target_angle,
            },
            Gaze::GoalieWideScan,
            label,
        ));
    }

    None
}

fn correct_body_dir_with_opp(ctx: &mut CascadeContext) -> Option<Decision> {
    correct_body_dir(ctx, true)
}

fn correct_body_dir_any(ctx: &mut CascadeContext) -> Option<Decision> {
    correct_body_dir(ctx, false)
}

fn go_to_station(ctx: &mut CascadeContext) -> Option<Decision> {
    go_to_move_point(ctx, ctx.move_point)
}

/// Lateral move toward `target`, dashing sideways when the body already allows it
fn go_to_move_point(ctx: &CascadeContext, target: Vec2) -> Option<Decision> {
    let cfg = &ctx.config.cascade;
    let wm = ctx.wm;

    let dist_thr = cfg.lateral_dist_thr(ctx.ball_dist());
    let y_diff = (target.y - wm.me.pos.y).abs();
    if y_diff < dist_thr {
        return None;
    }

    let mut power = ctx.dash_power(target);
    let body = wm.me.body;

    if (body.abs() - 90.0).abs() < cfg.sideways_tolerance {
        let required = y_diff / wm.me.dash_rate;
        if power > required {
            power = required;
        }
        let moving_up = target.y > wm.me.pos.y;
        if (moving_up && body < 0.0) || (!moving_up && body > 0.0) {
            power = -power;
        }
        let power = wm.field.normalize_dash_power(power);
        debug!(power, "go to move point: sideways dash");
        return Some(Decision::new(
            BodyAction::Dash { power },
            Gaze::GoalieWideScan,
            "CorrectY(1)",
        ));
    }

    debug!(power, "go to move point: walk");
    let body = ctx.look_ball_move(target, wm.ball_angle_from_self(), dist_thr, power);
    Some(Decision::new(body, Gaze::TrackBall, "CorrectPos"))
}
