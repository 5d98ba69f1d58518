//! World snapshot
//!
//! Read-only view of the match handed to the keeper once per cycle. Every
//! field is produced by the external world model; the keeper never mutates
//! it and never keeps it across cycles.

use serde::{Deserialize, Serialize};

use super::field_params::FieldParams;
use super::geometry::{direction_deg, Vec2};
use crate::error::{GoalieError, Result};

/// Current restart phase as reported by the referee
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    #[default]
    PlayOn,
    BeforeKickOff,
    KickOff,
    KickIn,
    CornerKick,
    FreeKick,
    GoalKick,
    PenaltyTaken,
    Other,
}

impl GameMode {
    /// Throw-ins and corners: the keeper drops back to a fixed spot
    pub fn is_conservative_restart(self) -> bool {
        matches!(self, GameMode::KickIn | GameMode::CornerKick)
    }

    /// Modes where the keeper may walk backwards while watching the ball
    pub fn allows_look_ball_move(self) -> bool {
        matches!(self, GameMode::PlayOn | GameMode::PenaltyTaken)
    }
}

/// The keeper's own body state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelfState {
    pub pos: Vec2,
    #[serde(default = "zero_vec")]
    pub vel: Vec2,
    /// Body direction in degrees
    #[serde(default)]
    pub body: f32,
    #[serde(default = "default_stamina")]
    pub stamina: f32,
    #[serde(default = "default_recovery")]
    pub recovery: f32,
    /// Distance gained per unit of dash power
    #[serde(default = "default_dash_rate")]
    pub dash_rate: f32,
    /// Ball is within the keeper's kickable area
    #[serde(default)]
    pub kickable: bool,
    /// Cycle of the last successful catch, if any
    #[serde(default)]
    pub last_catch_cycle: Option<u64>,
}

fn zero_vec() -> Vec2 {
    Vec2::zeros()
}

fn default_stamina() -> f32 {
    super::field_params::defaults::STAMINA_MAX
}

fn default_recovery() -> f32 {
    1.0
}

fn default_dash_rate() -> f32 {
    0.006
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BallState {
    pub pos: Vec2,
    #[serde(default = "zero_vec")]
    pub vel: Vec2,
}

/// Another player as seen by the world model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerObservation {
    pub pos: Vec2,
    pub dist_to_ball: f32,
}

/// Predicted cycles until first ball contact, per side
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct InterceptSteps {
    pub self_step: u32,
    pub teammate_step: u32,
    pub opponent_step: u32,
}

impl Default for InterceptSteps {
    fn default() -> Self {
        Self {
            self_step: 100,
            teammate_step: 100,
            opponent_step: 100,
        }
    }
}

/// Pre-computed judgements the world model attaches to the snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JudgeHints {
    pub ball_chase_situation: bool,
    pub tackle_probability: f32,
    /// Tackle direction in degrees relative to the body
    pub tackle_direction: f32,
}

/// Everything the keeper knows about the current cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub cycle: u64,
    #[serde(default)]
    pub mode: GameMode,
    #[serde(rename = "self")]
    pub me: SelfState,
    pub ball: BallState,
    /// Sorted by distance to the ball, nearest first
    #[serde(default)]
    pub opponents: Vec<PlayerObservation>,
    /// Sorted by distance to the ball, nearest first.
    ///
    /// The built-in decision steps only read `intercept.teammate_step` and
    /// `kickable_teammate`; the list is carried for custom `SituationJudge`
    /// implementations.
    #[serde(default)]
    pub teammates: Vec<PlayerObservation>,
    #[serde(default)]
    pub intercept: InterceptSteps,
    #[serde(default)]
    pub kickable_teammate: bool,
    #[serde(default)]
    pub kickable_opponent: bool,
    #[serde(default)]
    pub hints: JudgeHints,
    #[serde(default)]
    pub field: FieldParams,
}

impl WorldSnapshot {
    /// Parse a snapshot and restore the nearest-to-ball ordering of the player lists
    pub fn from_json_str(json: &str) -> Result<Self> {
        let mut wm: WorldSnapshot = serde_json::from_str(json)?;
        wm.sort_players_by_ball_distance();
        wm.check_finite()?;
        Ok(wm)
    }

    pub fn sort_players_by_ball_distance(&mut self) {
        self.opponents
            .sort_by(|a, b| a.dist_to_ball.total_cmp(&b.dist_to_ball));
        self.teammates
            .sort_by(|a, b| a.dist_to_ball.total_cmp(&b.dist_to_ball));
    }

    fn check_finite(&self) -> Result<()> {
        let vectors = [self.me.pos, self.me.vel, self.ball.pos, self.ball.vel];
        if vectors.iter().any(|v| !v.x.is_finite() || !v.y.is_finite()) {
            return Err(GoalieError::Snapshot(format!(
                "non-finite position or velocity at cycle {}",
                self.cycle
            )));
        }
        Ok(())
    }

    pub fn ball_dist(&self) -> f32 {
        (self.ball.pos - self.me.pos).norm()
    }

    /// Direction from the keeper to the ball, in degrees
    pub fn ball_angle_from_self(&self) -> f32 {
        direction_deg(self.ball.pos - self.me.pos)
    }

    /// Ball position one cycle ahead
    pub fn ball_next(&self) -> Vec2 {
        self.ball.pos + self.ball.vel
    }

    /// Opponent nearest to the ball
    pub fn nearest_opponent_to_ball(&self) -> Option<&PlayerObservation> {
        self.opponents.first()
    }

    /// Where the keeper ends up if it stops dashing now
    pub fn self_inertia_final_point(&self) -> Vec2 {
        super::geometry::inertia_final_point(self.me.pos, self.me.vel, self.field.player_decay)
    }

    /// Ball position after `steps` cycles under ball decay
    pub fn ball_inertia_point(&self, steps: u32) -> Vec2 {
        super::geometry::inertia_n_step_point(
            self.ball.pos,
            self.ball.vel,
            steps,
            self.field.ball_decay,
        )
    }

    /// Ball direction seen from the centre of our goal, in degrees
    pub fn ball_angle_from_own_goal(&self) -> f32 {
        direction_deg(self.ball.pos - self.field.our_goal_center())
    }

    /// Stamina recovered per cycle at the current recovery rate
    pub fn stamina_increment(&self) -> f32 {
        self.field.stamina_inc_max * self.me.recovery
    }
}
