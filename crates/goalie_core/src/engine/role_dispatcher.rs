//! Role dispatcher
//!
//! Picks the keeper's top-level behavior once per cycle, in fixed priority:
//! kick-off walk home, catch, clear, chase, then positioning.

use serde::Serialize;
use tracing::debug;

use super::action::{ArrivalControl, BodyAction, Decision, Gaze};
use super::config::GoalieConfig;
use super::judge::SituationJudge;
use super::positioning_state::{run_positioning, PressingState};
use super::rules::{first_match, Step};
use super::world::WorldSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchBranch {
    GoHome,
    Catch,
    ClearBall,
    ChaseBall,
    Position,
}

pub struct DispatchContext<'a> {
    pub wm: &'a WorldSnapshot,
    pub config: &'a GoalieConfig,
    pub judge: &'a dyn SituationJudge,
    pub pressing: &'a mut PressingState,
}

fn dispatch_steps<'a>() -> [Step<DispatchContext<'a>, DispatchBranch>; 4] {
    [
        Step::new(DispatchBranch::GoHome, kickoff_go_home),
        Step::new(DispatchBranch::Catch, catch_ball),
        Step::new(DispatchBranch::ClearBall, clear_ball),
        Step::new(DispatchBranch::ChaseBall, chase_ball),
    ]
}

/// Dispatch one cycle
pub fn dispatch(
    wm: &WorldSnapshot,
    config: &GoalieConfig,
    judge: &dyn SituationJudge,
    pressing: &mut PressingState,
) -> Decision {
    let mut ctx = DispatchContext {
        wm,
        config,
        judge,
        pressing,
    };
    let (branch, mut decision) = match first_match(&dispatch_steps(), &mut ctx) {
        Some(hit) => hit,
        None => (
            DispatchBranch::Position,
            run_positioning(wm, config, judge, ctx.pressing),
        ),
    };
    decision.route.branch = Some(branch);
    debug!(cycle = wm.cycle, ?branch, label = decision.label, "dispatch");
    decision
}

/// Kick-off stoppage: ball resting on the centre spot while the keeper is off home
fn kickoff_go_home(ctx: &mut DispatchContext) -> Option<Decision> {
    let wm = ctx.wm;
    let cfg = &ctx.config.dispatcher;
    let home = wm.field.goalie_home();

    let stoppage = wm.ball.pos.norm() < cfg.stoppage_ball_center_dist
        && wm.ball.vel.norm() < cfg.stoppage_ball_speed
        && (wm.me.pos - home).norm() > cfg.home_tolerance;
    if !stoppage {
        return None;
    }

    debug!(x = wm.me.pos.x, y = wm.me.pos.y, "kick-off: walk home");
    Some(Decision::new(
        BodyAction::GoToPointControlled {
            target: home,
            dist_thr: cfg.home_arrive_dist,
            max_power: wm.field.max_dash_power,
            control: ArrivalControl {
                brake_margin: cfg.home_brake_margin,
                extra_cycles: cfg.home_extra_cycles,
                allow_stop: cfg.home_allow_stop,
                kp: cfg.home_kp,
                ki: cfg.home_ki,
                urgent: cfg.home_urgent,
            },
        },
        Gaze::GoalieWideScan,
        "GoHome",
    ))
}

fn catch_ball(ctx: &mut DispatchContext) -> Option<Decision> {
    let wm = ctx.wm;
    let field = &wm.field;

    let ban_over = wm
        .me
        .last_catch_cycle
        .map_or(true, |last| wm.cycle > last + field.catch_ban_cycle);
    let in_reach = wm.ball_dist() < field.catchable_area() - ctx.config.dispatcher.catch_margin;
    let in_area = field.own_catch_area().contains(wm.ball.pos);

    if ban_over && in_reach && in_area {
        debug!(ball_dist = wm.ball_dist(), "catch");
        return Some(Decision::new(BodyAction::Catch, Gaze::TrackBall, "Catch"));
    }
    None
}

fn clear_ball(ctx: &mut DispatchContext) -> Option<Decision> {
    ctx.wm.me.kickable.then(|| {
        debug!("clear ball");
        Decision::new(BodyAction::ClearBall, Gaze::ScanField, "ClearBall")
    })
}

fn chase_ball(ctx: &mut DispatchContext) -> Option<Decision> {
    ctx.judge.is_ball_chase_situation(ctx.wm).then(|| {
        debug!("chase ball");
        Decision::new(BodyAction::ChaseBall, Gaze::TrackBall, "ChaseBall")
    })
}
