//! Seeded end-to-end session driver.
//!
//! Runs the agent against a fresh core state until death or a floor cap,
//! with a step ceiling as a wedge guard. Summaries serialize to JSON for
//! balance sweeps.

use serde::Serialize;

use nd_core::advisor::AdvisorHandle;
use nd_core::treasure::{TreasureAction, TreasureKind};
use nd_core::{Action, ApplyOutcome, GameRng, GameState, Status};

use crate::advisor::HeuristicAdvisor;
use crate::agent::Agent;

/// Session parameters.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub seed: u64,
    /// Stop the session once this floor is reached
    pub max_floors: u32,
    /// Hard ceiling on applied actions, independent of progress
    pub max_steps: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            max_floors: 60,
            max_steps: 2_000,
        }
    }
}

/// Result of one driven session.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub floors_reached: u32,
    pub died: bool,
    pub final_hp: i32,
    pub final_power: i32,
    pub final_credits: i32,
    pub final_alert: i32,
    pub modules_owned: usize,
    pub contracts_active: usize,
    pub log_lines: usize,
    /// Opening tactical read from the local advisor
    pub opening_advice: String,
}

/// The screen's always-legal exit, used when the agent's pick is refused.
fn escape_action(state: &GameState) -> Action {
    match state.status {
        Status::Playing => Action::ResolveNode(0),
        Status::Resolving => Action::Acknowledge,
        Status::Shopping => Action::LeaveShop,
        Status::EventInteraction => Action::EventChoice(1),
        Status::TreasureInteraction => {
            let kind = state
                .current_treasure
                .as_ref()
                .map(|treasure| treasure.kind)
                .unwrap_or(TreasureKind::DataCache);
            Action::Treasure(match kind {
                TreasureKind::CryptoMiner => TreasureAction::Ignore,
                _ => TreasureAction::Leave,
            })
        }
        Status::GameOver => Action::Restart,
    }
}

/// Drive one full session and summarize it.
pub fn run_session(config: &SessionConfig) -> (GameState, RunSummary) {
    let mut state = GameState::new(GameRng::new(config.seed));
    let agent = Agent::new();
    let mut advisor = AdvisorHandle::new(HeuristicAdvisor);

    let opening_advice = advisor
        .request(state.floor, &state.player, &state.current_cards)
        .unwrap_or_default();

    for _ in 0..config.max_steps {
        if state.status == Status::GameOver || state.floor >= config.max_floors {
            break;
        }
        let action = agent.decide(&state);
        if state.apply(action) == ApplyOutcome::Rejected {
            // Escape actions are legal on every screen, so the step bound
            // is the only other wedge guard needed.
            let _ = state.apply(escape_action(&state));
        }
    }

    let summary = RunSummary {
        seed: config.seed,
        floors_reached: state.floor,
        died: state.status == Status::GameOver,
        final_hp: state.player.hp,
        final_power: state.player.power,
        final_credits: state.player.credits,
        final_alert: state.player.security_alert,
        modules_owned: state.player.modules.len(),
        contracts_active: state.player.active_contracts.len(),
        log_lines: state.log.len(),
        opening_advice,
    };
    (state, summary)
}
