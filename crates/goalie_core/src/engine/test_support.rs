//! Snapshot builder for unit tests

use super::field_params::FieldParams;
use super::geometry::Vec2;
use super::world::{
    BallState, GameMode, InterceptSteps, JudgeHints, PlayerObservation, SelfState, WorldSnapshot,
};

/// Fluent builder with a quiet open-play default: keeper on its line,
/// ball stationary 30 units upfield, nobody else around.
pub struct SnapshotBuilder {
    wm: WorldSnapshot,
    opponents: Vec<Vec2>,
    teammates: Vec<Vec2>,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self {
            wm: WorldSnapshot {
                cycle: 100,
                mode: GameMode::PlayOn,
                me: SelfState {
                    pos: Vec2::new(-50.0, 0.0),
                    vel: Vec2::zeros(),
                    body: 0.0,
                    stamina: 8000.0,
                    recovery: 1.0,
                    dash_rate: 0.006,
                    kickable: false,
                    last_catch_cycle: None,
                },
                ball: BallState {
                    pos: Vec2::new(-20.0, 5.0),
                    vel: Vec2::zeros(),
                },
                opponents: Vec::new(),
                teammates: Vec::new(),
                intercept: InterceptSteps::default(),
                kickable_teammate: false,
                kickable_opponent: false,
                hints: JudgeHints::default(),
                field: FieldParams::default(),
            },
            opponents: Vec::new(),
            teammates: Vec::new(),
        }
    }

    pub fn cycle(mut self, cycle: u64) -> Self {
        self.wm.cycle = cycle;
        self
    }

    pub fn mode(mut self, mode: GameMode) -> Self {
        self.wm.mode = mode;
        self
    }

    pub fn self_pos(mut self, x: f32, y: f32) -> Self {
        self.wm.me.pos = Vec2::new(x, y);
        self
    }

    pub fn self_vel(mut self, x: f32, y: f32) -> Self {
        self.wm.me.vel = Vec2::new(x, y);
        self
    }

    pub fn body(mut self, deg: f32) -> Self {
        self.wm.me.body = deg;
        self
    }

    pub fn stamina(mut self, stamina: f32) -> Self {
        self.wm.me.stamina = stamina;
        self
    }

    pub fn kickable(mut self, kickable: bool) -> Self {
        self.wm.me.kickable = kickable;
        self
    }

    pub fn last_catch(mut self, cycle: u64) -> Self {
        self.wm.me.last_catch_cycle = Some(cycle);
        self
    }

    pub fn ball_pos(mut self, x: f32, y: f32) -> Self {
        self.wm.ball.pos = Vec2::new(x, y);
        self
    }

    pub fn ball_vel(mut self, x: f32, y: f32) -> Self {
        self.wm.ball.vel = Vec2::new(x, y);
        self
    }

    pub fn opponent(mut self, x: f32, y: f32) -> Self {
        self.opponents.push(Vec2::new(x, y));
        self
    }

    pub fn teammate(mut self, x: f32, y: f32) -> Self {
        self.teammates.push(Vec2::new(x, y));
        self
    }

    pub fn intercept(mut self, self_step: u32, teammate_step: u32, opponent_step: u32) -> Self {
        self.wm.intercept = InterceptSteps {
            self_step,
            teammate_step,
            opponent_step,
        };
        self
    }

    pub fn kickable_teammate(mut self, on: bool) -> Self {
        self.wm.kickable_teammate = on;
        self
    }

    pub fn kickable_opponent(mut self, on: bool) -> Self {
        self.wm.kickable_opponent = on;
        self
    }

    pub fn chase_hint(mut self, on: bool) -> Self {
        self.wm.hints.ball_chase_situation = on;
        self
    }

    pub fn tackle_hint(mut self, probability: f32, direction: f32) -> Self {
        self.wm.hints.tackle_probability = probability;
        self.wm.hints.tackle_direction = direction;
        self
    }

    pub fn build(mut self) -> WorldSnapshot {
        let ball = self.wm.ball.pos;
        let observe = |pos: &Vec2| PlayerObservation {
            pos: *pos,
            dist_to_ball: (pos - ball).norm(),
        };
        self.wm.opponents = self.opponents.iter().map(observe).collect();
        self.wm.teammates = self.teammates.iter().map(observe).collect();
        self.wm.sort_players_by_ball_distance();
        self.wm
    }
}
