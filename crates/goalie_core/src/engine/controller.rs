//! Keeper controller
//!
//! Owns the configuration, the situation judge and the pressing state.
//! One controller per agent; each instance keeps its own history.

use tracing::info;

use super::action::Decision;
use super::config::GoalieConfig;
use super::judge::{HintJudge, SituationJudge};
use super::positioning_state::PressingState;
use super::role_dispatcher::dispatch;
use super::world::WorldSnapshot;

pub struct GoalieController<J: SituationJudge = HintJudge> {
    config: GoalieConfig,
    judge: J,
    pressing: PressingState,
}

impl GoalieController<HintJudge> {
    pub fn new(config: GoalieConfig) -> Self {
        Self::with_judge(config, HintJudge)
    }
}

impl Default for GoalieController<HintJudge> {
    fn default() -> Self {
        Self::new(GoalieConfig::default())
    }
}

impl<J: SituationJudge> GoalieController<J> {
    pub fn with_judge(config: GoalieConfig, judge: J) -> Self {
        Self {
            config,
            judge,
            pressing: PressingState::default(),
        }
    }

    /// Decide the action for one cycle
    pub fn decide(&mut self, wm: &WorldSnapshot) -> Decision {
        let was_pressing = self.pressing.active;
        let decision = dispatch(wm, &self.config, &self.judge, &mut self.pressing);
        if was_pressing != self.pressing.active {
            info!(
                cycle = wm.cycle,
                pressing = self.pressing.active,
                "pressing state changed"
            );
        }
        decision
    }

    pub fn pressing(&self) -> PressingState {
        self.pressing
    }

    pub fn config(&self) -> &GoalieConfig {
        &self.config
    }

    /// Forget the pressing history, e.g. between matches
    pub fn reset(&mut self) {
        self.pressing = PressingState::default();
    }
}
