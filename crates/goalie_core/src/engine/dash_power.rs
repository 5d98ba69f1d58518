//! Dash power model
//!
//! Trades urgency against stamina: sprint only when far off the target depth
//! or when a threat is close, otherwise stay near the recovery increment.

use tracing::trace;

use super::config::DashPowerConfig;
use super::geometry::Vec2;
use super::world::WorldSnapshot;

/// Basic dash power for moving toward `move_point`
pub fn basic_dash_power(wm: &WorldSnapshot, cfg: &DashPowerConfig, move_point: Vec2) -> f32 {
    let field = &wm.field;
    let max_power = field.max_dash_power;
    let inc = wm.stamina_increment();
    let ball = &wm.ball;

    if (wm.me.pos.x - move_point.x).abs() > cfg.urgent_x_diff {
        return max_power;
    }

    let (zone, power) = if ball.pos.x > cfg.midfield_ball_x {
        if wm.me.stamina < field.stamina_max * cfg.midfield_full_stamina_rate {
            ("midfield_throttled", inc * cfg.midfield_throttle_rate)
        } else {
            ("midfield", inc)
        }
    } else if ball.pos.x > field.our_penalty_area_line_x() {
        if ball.pos.y.abs() > cfg.wide_ball_y {
            ("third_wide", inc)
        } else if ball.vel.x > cfg.ball_leaving_vel_x {
            ("third_ball_leaving", inc * cfg.ball_leaving_rate)
        } else if wm.intercept.opponent_step <= cfg.imminent_opponent_step {
            ("third_imminent", max_power)
        } else if wm.me.stamina < field.stamina_max * cfg.tired_stamina_rate {
            ("third_tired", inc * cfg.tired_inc_rate)
        } else {
            ("third", max_power * cfg.standard_power_rate)
        }
    } else if ball.pos.y.abs() < cfg.central_ball_y || ball.pos.y * wm.me.pos.y < 0.0 {
        ("box_central", max_power)
    } else {
        ("box_near_side", inc)
    };

    trace!(zone, power, "dash power");
    power
}
