pub mod action;
pub mod config; // 튜닝 상수 (presets + YAML/JSON loading)
pub mod controller;
pub mod dash_power;
pub mod field_params;
pub mod geometry;
pub mod judge;
pub mod movement_cascade;
pub mod positioning_state;
pub mod role_dispatcher;
pub mod rules; // first-match rule chains shared by every decision layer
pub mod target_planner;
pub mod world;

#[cfg(test)]
pub(crate) mod test_support;

pub use action::{ArrivalControl, BodyAction, Decision, Gaze, Route};
pub use controller::GoalieController;
pub use judge::{HintJudge, SituationJudge, TackleLimits, TackleOpportunity};
pub use positioning_state::{PositioningPhase, PressingState};
pub use role_dispatcher::DispatchBranch;
pub use movement_cascade::CascadeStep;
pub use target_planner::{StationKind, StationPoint};
pub use world::{GameMode, WorldSnapshot};
