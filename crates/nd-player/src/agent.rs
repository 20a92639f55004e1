//! Heuristic decision policy.
//!
//! The agent weighs hp pressure against alert pressure: fights to cool the
//! grid down, rests when integrity runs low, shops when it can afford to,
//! and takes push-your-luck branches only from a position of strength.

use nd_core::alert::AlertPhase;
use nd_core::event::EventKind;
use nd_core::modules::stack_cost;
use nd_core::room::{RoomCardData, RoomType};
use nd_core::shop::{repair_cost, shop_inventory};
use nd_core::treasure::{CORE_POWER_GATE, TreasureAction, TreasureKind};
use nd_core::{Action, FLOOR_CARDS, GameState, MODULE_STACK_CAP, Status};

/// Deterministic policy over a read-only game state.
#[derive(Debug, Default)]
pub struct Agent;

impl Agent {
    pub fn new() -> Self {
        Self
    }

    /// Pick the next action for the current screen.
    pub fn decide(&self, state: &GameState) -> Action {
        match state.status {
            Status::Playing => Action::ResolveNode(self.pick_node(state)),
            Status::Resolving => Action::Acknowledge,
            Status::Shopping => self.shop_action(state),
            Status::EventInteraction => {
                Action::EventChoice(self.pick_event_choice(state))
            }
            Status::TreasureInteraction => Action::Treasure(self.pick_treasure(state)),
            Status::GameOver => Action::Restart,
        }
    }

    fn pick_node(&self, state: &GameState) -> usize {
        let mut best = 0;
        let mut best_score = f64::MIN;
        for (index, card) in state.current_cards.iter().enumerate() {
            let score = self.score_card(state, card);
            if score > best_score {
                best_score = score;
                best = index;
            }
        }
        best.min(FLOOR_CARDS - 1)
    }

    fn score_card(&self, state: &GameState, card: &RoomCardData) -> f64 {
        let player = &state.player;
        let hp_ratio = player.hp as f64 / player.max_hp.max(1) as f64;
        let alert = player.security_alert as f64;
        let hurt = 1.0 - hp_ratio;

        match card.room {
            // Combat cools the grid; worth more the hotter it runs, less
            // the weaker the hull
            RoomType::Enemy => 50.0 + alert * 0.8 - hurt * 80.0,
            RoomType::Elite => 35.0 + alert * 0.9 - hurt * 120.0 + player.power as f64 * 0.3,
            RoomType::Boss => 15.0 + alert * 0.5 - hurt * 150.0 + player.power as f64 * 0.5,
            RoomType::Rest => 25.0 + hurt * 140.0 - card.alert_penalty as f64,
            RoomType::Treasure => 45.0 + if player.credits < 60 { 15.0 } else { 0.0 },
            RoomType::Event => 40.0,
            RoomType::Merchant => {
                if player.credits >= 60 {
                    30.0 + (player.credits as f64 / 10.0).min(40.0)
                } else {
                    5.0
                }
            }
        }
    }

    fn shop_action(&self, state: &GameState) -> Action {
        let player = &state.player;
        let tuning = &state.tuning;

        if player.hp * 2 < player.max_hp
            && player.credits >= repair_cost(player.security_alert, tuning)
        {
            return Action::BuyRepair;
        }

        if let Some(shop) = state.active_shop_type {
            let mut cheapest: Option<(i32, nd_core::modules::ModuleEffect)> = None;
            for def in shop_inventory(shop) {
                let owned = player.module_count(def.effect);
                if owned >= MODULE_STACK_CAP {
                    continue;
                }
                let cost =
                    stack_cost(def, owned, player.security_alert, tuning.stack_price_growth);
                if cost <= player.credits
                    && cheapest.map_or(true, |(best, _)| cost < best)
                {
                    cheapest = Some((cost, def.effect));
                }
            }
            if let Some((_, effect)) = cheapest {
                return Action::BuyModule(effect);
            }
        }

        Action::LeaveShop
    }

    fn pick_event_choice(&self, state: &GameState) -> usize {
        let player = &state.player;
        let Some(kind) = state.current_event else {
            return 0;
        };
        match kind {
            EventKind::RogueAiSignal => {
                if player.security_alert >= 40 && player.credits >= 75 {
                    1 // mask the signal
                } else if player.phase() == AlertPhase::Stealth {
                    0 // merge while the heat is affordable
                } else {
                    2
                }
            }
            EventKind::CorruptedDataBank => {
                if player.security_alert >= 50 && player.power > 4 {
                    1 // purge
                } else if player.security_alert <= 30 {
                    0 // siphon
                } else {
                    2
                }
            }
            EventKind::SecurityCheckpoint => {
                if player.security_alert >= 45 && player.hp > 20 {
                    0 // smash
                } else if player.phase() == AlertPhase::Stealth {
                    1 // trojan
                } else {
                    2
                }
            }
        }
    }

    fn pick_treasure(&self, state: &GameState) -> TreasureAction {
        let player = &state.player;
        let Some(treasure) = state.current_treasure.as_ref() else {
            return TreasureAction::Leave;
        };
        match treasure.kind {
            TreasureKind::DataCache => {
                if treasure.cache_layer == 1 {
                    if player.hp > 60 {
                        TreasureAction::Breach
                    } else {
                        TreasureAction::Extract
                    }
                } else if player.power >= CORE_POWER_GATE && player.hp > 40 {
                    TreasureAction::DecryptCore
                } else {
                    TreasureAction::Leave
                }
            }
            TreasureKind::DarkContract => {
                let affordable = treasure
                    .offers
                    .iter()
                    .position(|offer| offer.cost <= player.credits);
                match affordable {
                    Some(index) if player.has_contract_capacity() => {
                        TreasureAction::Sign(index)
                    }
                    _ => TreasureAction::Leave,
                }
            }
            TreasureKind::CryptoMiner => {
                if player.security_alert < 50 {
                    TreasureAction::Install
                } else {
                    TreasureAction::Ignore
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nd_core::room::build_floor_cards;
    use nd_core::{GameRng, GameState};

    fn state_with(types: [RoomType; FLOOR_CARDS]) -> GameState {
        let mut state = GameState::new(GameRng::new(11));
        let mut rng = GameRng::new(3);
        state.current_cards = build_floor_cards(1, 0, 0, Some(types), &mut rng);
        state
    }

    #[test]
    fn test_prefers_rest_when_hurt() {
        let mut state = state_with([RoomType::Enemy, RoomType::Rest, RoomType::Event]);
        state.player.hp = 15;
        let agent = Agent::new();
        assert_eq!(agent.decide(&state), Action::ResolveNode(1));
    }

    #[test]
    fn test_prefers_combat_when_hot() {
        let mut state = state_with([RoomType::Enemy, RoomType::Rest, RoomType::Merchant]);
        state.player.security_alert = 85;
        let agent = Agent::new();
        assert_eq!(agent.decide(&state), Action::ResolveNode(0));
    }

    #[test]
    fn test_acknowledges_resolutions() {
        let mut state = state_with([RoomType::Enemy; FLOOR_CARDS]);
        state.apply(Action::ResolveNode(0));
        assert_eq!(state.status, Status::Resolving);
        assert_eq!(Agent::new().decide(&state), Action::Acknowledge);
    }

    #[test]
    fn test_broke_agent_leaves_the_shop() {
        let mut state = state_with([RoomType::Merchant; FLOOR_CARDS]);
        state.apply(Action::ResolveNode(0));
        assert_eq!(state.status, Status::Shopping);
        assert_eq!(state.player.credits, 0);
        assert_eq!(Agent::new().decide(&state), Action::LeaveShop);
    }

    #[test]
    fn test_rich_agent_buys_from_the_shelf() {
        let mut state = state_with([RoomType::Merchant; FLOOR_CARDS]);
        state.apply(Action::ResolveNode(0));
        state.player.credits = 500;
        let action = Agent::new().decide(&state);
        assert!(matches!(action, Action::BuyModule(_)));
        assert_eq!(state.apply(action), nd_core::ApplyOutcome::Applied);
    }

    #[test]
    fn test_shop_loop_terminates() {
        let mut state = state_with([RoomType::Merchant; FLOOR_CARDS]);
        state.apply(Action::ResolveNode(0));
        state.player.credits = 1_000;
        let agent = Agent::new();
        for _ in 0..200 {
            let action = agent.decide(&state);
            state.apply(action);
            if state.status != Status::Shopping {
                return;
            }
        }
        panic!("agent never left the shop");
    }
}
