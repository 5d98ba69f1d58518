//! Keeper output for one cycle
//!
//! Exactly one `BodyAction` and one `Gaze` are produced per cycle. The
//! locomotion and neck primitives that execute them belong to the agent
//! runtime.

use serde::Serialize;

use super::geometry::Vec2;
use super::movement_cascade::CascadeStep;
use super::positioning_state::PositioningPhase;
use super::role_dispatcher::DispatchBranch;

/// Arrival control for the controlled walk back to the home spot
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArrivalControl {
    /// Distance from the target at which braking starts
    pub brake_margin: f32,
    /// Extra cycles granted to reach the target
    pub extra_cycles: u32,
    pub allow_stop: bool,
    /// Proportional gain
    pub kp: f32,
    /// Integral gain
    pub ki: f32,
    pub urgent: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BodyAction {
    /// Turn by a relative moment (degrees)
    Turn { moment: f32 },
    /// Turn until the body faces an absolute direction (degrees)
    TurnToAngle { angle: f32 },
    Dash { power: f32 },
    GoToPoint {
        target: Vec2,
        dist_thr: f32,
        max_power: f32,
    },
    GoToPointControlled {
        target: Vec2,
        dist_thr: f32,
        max_power: f32,
        control: ArrivalControl,
    },
    /// Move to a point while keeping the ball in view, walking backwards if needed
    GoToPointLookBall {
        target: Vec2,
        dist_thr: f32,
        power: f32,
        back_power_rate: f32,
    },
    StopDash { save_recovery: bool },
    Catch,
    ClearBall,
    Tackle { direction: f32 },
    /// Hand the cycle to the external ball-chase behavior
    ChaseBall,
}

/// Neck/perception directive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Gaze {
    TrackBall,
    ScanField,
    GoalieWideScan,
}

/// Which layer produced the decision
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Route {
    pub branch: Option<DispatchBranch>,
    pub phase: Option<PositioningPhase>,
    pub step: Option<CascadeStep>,
}

/// The single command emitted for a cycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Decision {
    pub body: BodyAction,
    pub gaze: Gaze,
    /// Short debug tag of the behavior that fired
    pub label: &'static str,
    pub route: Route,
}

impl Decision {
    pub fn new(body: BodyAction, gaze: Gaze, label: &'static str) -> Self {
        Self {
            body,
            gaze,
            label,
            route: Route::default(),
        }
    }

    /// Target point of a movement command, if any
    pub fn move_target(&self) -> Option<Vec2> {
        match self.body {
            BodyAction::GoToPoint { target, .. }
            | BodyAction::GoToPointControlled { target, .. }
            | BodyAction::GoToPointLookBall { target, .. } => Some(target),
            _ => None,
        }
    }

    /// Power of a movement command, if any
    pub fn power(&self) -> Option<f32> {
        match self.body {
            BodyAction::Dash { power } => Some(power),
            BodyAction::GoToPoint { max_power, .. }
            | BodyAction::GoToPointControlled { max_power, .. } => Some(max_power),
            BodyAction::GoToPointLookBall { power, .. } => Some(power),
            _ => None,
        }
    }
}
