//! # goalie_core - Goalkeeper Decision Controller
//!
//! Decides the keeper's single action per simulation cycle from a world
//! snapshot: catch, clear, chase, or hold a computed station point.
//!
//! ## Features
//! - Hysteretic pressing and home-return stance
//! - Shot-line station point with near-post guards
//! - Ordered movement cascade with stamina-aware dash power
//! - All tactical thresholds in `engine::config` (YAML/JSON loadable)
//!
//! ## Usage
//! ```rust
//! use goalie_core::{GoalieController, WorldSnapshot};
//!
//! let json = r#"{
//!     "cycle": 1,
//!     "self": { "pos": [-50.0, 0.0] },
//!     "ball": { "pos": [-10.0, 3.0] }
//! }"#;
//! let wm = WorldSnapshot::from_json_str(json).unwrap();
//! let mut keeper = GoalieController::default();
//! let decision = keeper.decide(&wm);
//! println!("{}: {:?}", decision.label, decision.body);
//! ```

// Doc formatting lints - purely cosmetic, fix incrementally
#![allow(clippy::doc_lazy_continuation)]
// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]

pub mod engine;
pub mod error;

pub use engine::config::GoalieConfig;
pub use engine::{BodyAction, Decision, GoalieController, Gaze, WorldSnapshot};
pub use error::{ConfigError, GoalieError, Result};
