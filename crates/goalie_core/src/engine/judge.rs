//! External judgements
//!
//! Two predicates the keeper consumes but does not own: whether the ball
//! should be chased outright, and whether a tackle is worth attempting.
//! Both depend on interception and tackle models that belong to the world
//! model, so they sit behind a trait.

use super::world::WorldSnapshot;

/// A tackle the keeper may attempt this cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TackleOpportunity {
    pub probability: f32,
    /// Direction relative to the body, in degrees
    pub direction: f32,
}

/// Bounds a tackle must satisfy before the keeper commits to it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TackleLimits {
    pub min_probability: f32,
    /// Largest tackle direction off the body, in degrees
    pub max_body_angle: f32,
}

pub trait SituationJudge {
    /// Whether the keeper should leave its station and chase the ball
    fn is_ball_chase_situation(&self, wm: &WorldSnapshot) -> bool;

    /// A favorable tackle against a ball-owning opponent, if one exists
    fn tackle_opportunity(
        &self,
        wm: &WorldSnapshot,
        limits: TackleLimits,
    ) -> Option<TackleOpportunity>;
}

/// Judge that trusts the hints pre-computed by the world model
#[derive(Debug, Clone, Copy, Default)]
pub struct HintJudge;

impl SituationJudge for HintJudge {
    fn is_ball_chase_situation(&self, wm: &WorldSnapshot) -> bool {
        wm.hints.ball_chase_situation
    }

    fn tackle_opportunity(
        &self,
        wm: &WorldSnapshot,
        limits: TackleLimits,
    ) -> Option<TackleOpportunity> {
        let hints = &wm.hints;
        if !wm.kickable_opponent
            || hints.tackle_probability < limits.min_probability
            || hints.tackle_direction.abs() > limits.max_body_angle
        {
            return None;
        }
        Some(TackleOpportunity {
            probability: wm.hints.tackle_probability,
            direction: wm.hints.tackle_direction,
        })
    }
}
