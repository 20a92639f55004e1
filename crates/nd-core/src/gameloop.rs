//! Run state machine.
//!
//! [`GameState`] is the single root value of a run. Every player input is an
//! [`Action`]; [`GameState::apply`] is the only entry point, and an illegal
//! action in the current status is a silent no-op. Resolution math works on
//! player snapshots, so the authoritative state only changes when an action
//! actually lands.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::alert::{AlertPhase, lockdown_heal_multiplier};
use crate::combat::resolve_combat;
use crate::consts::FLOOR_CARDS;
use crate::contract::{ContractEvent, update_contracts};
use crate::event::{EventKind, apply_event_choice, random_event};
use crate::modules::{ModifierBundle, ModuleEffect};
use crate::player::PlayerStats;
use crate::room::{RoomCardData, RoomType, ShopType, apply_hunter_override, build_floor_cards};
use crate::rng::GameRng;
use crate::shop::{purchase_module, purchase_repair};
use crate::treasure::{TreasureAction, TreasureState, apply_treasure_action, open_treasure, roll_treasure};
use crate::tuning::Tuning;

const GAME_OVER_TEXT: &str = "CRITICAL SYSTEM FAILURE. SIGNAL LOST.";

/// Log entry categories, used by presentation layers for styling.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum LogKind {
    Info,
    Combat,
    Gain,
    Danger,
    Alert,
}

/// One line of the append-only run log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub floor: u32,
    pub message: String,
    pub kind: LogKind,
}

/// Which screen of the run is active.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Status {
    /// Picking one of the three nodes
    Playing,
    /// Modal acknowledgment of the last resolution
    Resolving,
    Shopping,
    EventInteraction,
    TreasureInteraction,
    /// Terminal; only Restart leaves it
    GameOver,
}

/// Player inputs, 1:1 with the presentation layer's controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Resolve the node at an index of the current triple
    ResolveNode(usize),
    /// Dismiss the resolution modal
    Acknowledge,
    /// Pick an event branch by index
    EventChoice(usize),
    BuyModule(ModuleEffect),
    BuyRepair,
    LeaveShop,
    Treasure(TreasureAction),
    /// Rip out the crypto miner for an hp price
    PurgeMiner,
    /// Throw away the run and start over
    Restart,
}

/// Whether an action landed. Rejections leave the state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    Rejected,
}

/// Root state of one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub floor: u32,
    pub player: PlayerStats,
    pub current_cards: [RoomCardData; FLOOR_CARDS],
    pub log: Vec<LogEntry>,
    pub status: Status,
    pub last_resolution_text: Option<String>,
    /// Floor of the most recent boss kill, feeding the selector's
    /// accumulating-risk rule
    pub last_boss_floor: u32,
    /// Scouted path carried across a sub-screen
    pub pending_next_room_types: Option<[RoomType; FLOOR_CARDS]>,
    pub active_shop_type: Option<ShopType>,
    pub current_event: Option<EventKind>,
    pub current_treasure: Option<TreasureState>,
    pub rng: GameRng,
    pub tuning: Tuning,
}

impl GameState {
    /// Start a run with the shipped balance.
    pub fn new(rng: GameRng) -> Self {
        Self::with_tuning(rng, Tuning::default())
    }

    /// Start a run with custom balance knobs.
    pub fn with_tuning(rng: GameRng, tuning: Tuning) -> Self {
        Self::fresh(rng, tuning, "System Online. Connection established.")
    }

    fn fresh(mut rng: GameRng, tuning: Tuning, boot_message: &str) -> Self {
        let cards = build_floor_cards(1, 0, 0, None, &mut rng);
        Self {
            floor: 1,
            player: PlayerStats::new(),
            current_cards: cards,
            log: vec![LogEntry {
                floor: 1,
                message: boot_message.to_string(),
                kind: LogKind::Info,
            }],
            status: Status::Playing,
            last_resolution_text: None,
            last_boss_floor: 0,
            pending_next_room_types: None,
            active_shop_type: None,
            current_event: None,
            current_treasure: None,
            rng,
            tuning,
        }
    }

    /// Rebuild a full run from a seed and a recorded action sequence.
    pub fn replay(seed: u64, actions: &[Action]) -> Self {
        let mut state = Self::new(GameRng::new(seed));
        for action in actions {
            let _ = state.apply(*action);
        }
        state
    }

    /// Apply one player action. The only mutation entry point.
    pub fn apply(&mut self, action: Action) -> ApplyOutcome {
        if action == Action::Restart {
            self.restart();
            return ApplyOutcome::Applied;
        }
        match (self.status, action) {
            (Status::Playing, Action::ResolveNode(index)) => self.resolve_node(index),
            (Status::Playing, Action::PurgeMiner) => self.purge_miner(),
            (Status::Resolving, Action::Acknowledge) => {
                self.status = Status::Playing;
                ApplyOutcome::Applied
            }
            (Status::EventInteraction, Action::EventChoice(choice)) => self.apply_event(choice),
            (Status::Shopping, Action::BuyModule(effect)) => self.buy_module(effect),
            (Status::Shopping, Action::BuyRepair) => self.buy_repair(),
            (Status::Shopping, Action::LeaveShop) => self.leave_shop(),
            (Status::TreasureInteraction, Action::Treasure(treasure_action)) => {
                self.apply_treasure(treasure_action)
            }
            _ => ApplyOutcome::Rejected,
        }
    }

    fn restart(&mut self) {
        // The RNG stream continues across restarts, keeping whole sessions
        // a function of the initial seed and the action sequence.
        let rng = self.rng.clone();
        let tuning = self.tuning.clone();
        *self = Self::fresh(rng, tuning, "System Rebooted. New Run Initiated.");
    }

    fn push_log(&mut self, message: impl Into<String>, kind: LogKind) {
        self.log.push(LogEntry {
            floor: self.floor,
            message: message.into(),
            kind,
        });
    }

    fn log_alert_change(&mut self, delta: i32) {
        if delta > 0 {
            self.push_log(format!("Alert Increased by {delta}%"), LogKind::Alert);
        } else if delta < 0 {
            self.push_log(format!("Alert Decreased by {}%", -delta), LogKind::Gain);
        }
    }

    /// Flat miner payout at the start of a standard resolution.
    fn miner_income(&mut self) {
        if self.player.has_crypto_miner {
            let income = self.tuning.miner_income;
            self.player.gain_credits(income);
            self.push_log(format!("Crypto Miner: +{income} Crypto"), LogKind::Gain);
        }
    }

    fn resolve_node(&mut self, index: usize) -> ApplyOutcome {
        if index >= FLOOR_CARDS {
            return ApplyOutcome::Rejected;
        }
        let mut card = self.current_cards[index].clone();

        // Kill Switch pre-step: at >= 90 alert any action can be ambushed,
        // even one that would have opened a shop or event.
        if self.player.phase() == AlertPhase::KillSwitch
            && self.rng.chance(self.tuning.kill_switch_chance)
        {
            apply_hunter_override(&mut card);
            self.push_log("KILL SWITCH TRIGGERED: HUNTER SPAWNED", LogKind::Danger);
        }

        match card.room {
            RoomType::Merchant => {
                self.pending_next_room_types = Some(card.next_scout_info);
                self.active_shop_type = Some(card.shop_type.unwrap_or(ShopType::General));
                self.status = Status::Shopping;
                ApplyOutcome::Applied
            }
            RoomType::Event => {
                self.pending_next_room_types = Some(card.next_scout_info);
                self.current_event = Some(random_event(&mut self.rng));
                self.status = Status::EventInteraction;
                ApplyOutcome::Applied
            }
            RoomType::Treasure => {
                self.pending_next_room_types = Some(card.next_scout_info);
                let kind = roll_treasure(self.floor, self.player.has_crypto_miner, &mut self.rng);
                self.current_treasure = Some(open_treasure(kind, self.floor, &mut self.rng));
                self.status = Status::TreasureInteraction;
                ApplyOutcome::Applied
            }
            RoomType::Rest => self.resolve_rest(card),
            RoomType::Enemy | RoomType::Elite | RoomType::Boss => self.resolve_combat_node(card),
        }
    }

    fn resolve_combat_node(&mut self, card: RoomCardData) -> ApplyOutcome {
        self.miner_income();

        let mut player = self.player.clone();
        player.apply_alert(card.alert_penalty);
        let bundle = ModifierBundle::from_modules(&player.modules);
        let outcome =
            resolve_combat(player, &card, self.floor, &bundle, &mut self.rng, &self.tuning);

        self.log_alert_change(card.alert_penalty);
        self.push_log(outcome.log.clone(), LogKind::Combat);

        if outcome.died {
            self.player = outcome.player;
            self.status = Status::GameOver;
            self.last_resolution_text = Some(GAME_OVER_TEXT.to_string());
            return ApplyOutcome::Applied;
        }

        let mut player = outcome.player;
        let contract_messages = update_contracts(
            &mut player,
            ContractEvent::CombatWin {
                elite: card.room == RoomType::Elite,
                damage_taken: outcome.damage_taken,
            },
            &mut self.rng,
        );
        for message in contract_messages {
            self.push_log(message, LogKind::Info);
        }

        self.advance_floor(
            player,
            outcome.narrative,
            outcome.boss_defeated,
            Some(card.next_scout_info),
        );
        ApplyOutcome::Applied
    }

    fn resolve_rest(&mut self, card: RoomCardData) -> ApplyOutcome {
        self.miner_income();

        let mut player = self.player.clone();
        player.apply_alert(card.alert_penalty);

        let (log, narrative) = if card.alert_penalty > 10 {
            // Deep Reboot variant
            player.hp = player.max_hp;
            (
                format!("Deep System Reboot: Fully Restored. Alert +{}", card.alert_penalty),
                "You initiated a complete system flush and restart. You are fully \
                 operational, but the extensive downtime revealed your location to everyone."
                    .to_string(),
            )
        } else {
            let throttle = lockdown_heal_multiplier(player.security_alert);
            let base = (player.max_hp as f64 * 0.4).floor();
            let heal = (base * throttle).floor() as i32;
            player.heal(heal);
            let interference = if throttle < 1.0 {
                " (Lockdown Interference -20%)"
            } else {
                ""
            };
            let narrative = if throttle < 1.0 {
                "Network lockdown active. Repair protocols were throttled by security \
                 interference."
            } else {
                "You found a quiet node to repair subroutines."
            };
            (
                format!("System Repair: +{heal} Integrity.{interference} Alert +0."),
                narrative.to_string(),
            )
        };

        self.log_alert_change(card.alert_penalty);
        self.push_log(log, LogKind::Gain);
        self.advance_floor(player, narrative, false, Some(card.next_scout_info));
        ApplyOutcome::Applied
    }

    fn apply_event(&mut self, choice: usize) -> ApplyOutcome {
        let Some(kind) = self.current_event else {
            return ApplyOutcome::Rejected;
        };
        let Some(outcome) =
            apply_event_choice(kind, choice, self.player.clone(), self.floor, &mut self.rng)
        else {
            return ApplyOutcome::Rejected;
        };

        self.log_alert_change(outcome.alert_change);
        let kind = if outcome.alert_change > 0 {
            LogKind::Danger
        } else {
            LogKind::Gain
        };
        self.push_log(outcome.log.clone(), kind);

        if outcome.player.is_dead() {
            self.player = outcome.player;
            self.status = Status::GameOver;
            self.last_resolution_text = Some(GAME_OVER_TEXT.to_string());
            return ApplyOutcome::Applied;
        }

        let pending = self.pending_next_room_types;
        self.advance_floor(outcome.player, outcome.narrative, false, pending);
        ApplyOutcome::Applied
    }

    fn buy_module(&mut self, effect: ModuleEffect) -> ApplyOutcome {
        let Some(shop) = self.active_shop_type else {
            return ApplyOutcome::Rejected;
        };
        match purchase_module(self.player.clone(), effect, shop, &self.tuning) {
            Some((player, log)) => {
                self.player = player;
                self.push_log(log, LogKind::Gain);
                ApplyOutcome::Applied
            }
            None => ApplyOutcome::Rejected,
        }
    }

    fn buy_repair(&mut self) -> ApplyOutcome {
        match purchase_repair(self.player.clone(), &self.tuning) {
            Some((player, log)) => {
                self.player = player;
                self.push_log(log, LogKind::Gain);
                ApplyOutcome::Applied
            }
            None => ApplyOutcome::Rejected,
        }
    }

    fn leave_shop(&mut self) -> ApplyOutcome {
        let mut player = self.player.clone();
        player.apply_alert(self.tuning.shop_leave_alert);
        let pending = self.pending_next_room_types;
        self.advance_floor(
            player,
            "You jack out of the black market node. The transaction signals have \
             slightly increased the local security alert."
                .to_string(),
            false,
            pending,
        );
        ApplyOutcome::Applied
    }

    fn apply_treasure(&mut self, action: TreasureAction) -> ApplyOutcome {
        let Some(mut state) = self.current_treasure.take() else {
            return ApplyOutcome::Rejected;
        };
        let Some(outcome) = apply_treasure_action(
            &mut state,
            action,
            self.player.clone(),
            self.floor,
            &mut self.rng,
            &self.tuning,
        ) else {
            self.current_treasure = Some(state);
            return ApplyOutcome::Rejected;
        };

        self.push_log(outcome.log.clone(), LogKind::Gain);
        if outcome.done {
            let pending = self.pending_next_room_types;
            self.advance_floor(outcome.player, outcome.narrative, false, pending);
        } else {
            self.player = outcome.player;
            self.current_treasure = Some(state);
        }
        ApplyOutcome::Applied
    }

    fn purge_miner(&mut self) -> ApplyOutcome {
        if !self.player.has_crypto_miner || self.player.hp <= self.tuning.miner_purge_hp {
            return ApplyOutcome::Rejected;
        }
        self.player.hp -= self.tuning.miner_purge_hp;
        self.player.has_crypto_miner = false;
        let cost = self.tuning.miner_purge_hp;
        self.push_log(format!("Crypto Miner purged: -{cost} Integrity"), LogKind::Info);
        ApplyOutcome::Applied
    }

    /// Shared floor turnover for every resolution path.
    fn advance_floor(
        &mut self,
        mut player: PlayerStats,
        resolution_text: String,
        boss_defeated: bool,
        forced: Option<[RoomType; FLOOR_CARDS]>,
    ) {
        let next_floor = self.floor + 1;
        let last_boss_floor = if boss_defeated {
            self.floor
        } else {
            self.last_boss_floor
        };

        let mut drift = self.tuning.passive_alert_drift;
        if player.has_crypto_miner {
            drift += self.tuning.miner_alert_drift;
        }
        player.apply_alert(drift);

        let alert = player.security_alert;
        let contract_messages = update_contracts(
            &mut player,
            ContractEvent::FloorAdvance { alert },
            &mut self.rng,
        );
        for message in contract_messages {
            self.push_log(message, LogKind::Info);
        }

        let cards = build_floor_cards(
            next_floor,
            player.security_alert,
            last_boss_floor,
            forced,
            &mut self.rng,
        );

        self.player = player;
        self.floor = next_floor;
        self.current_cards = cards;
        self.status = Status::Resolving;
        self.last_resolution_text = Some(resolution_text);
        self.last_boss_floor = last_boss_floor;
        self.pending_next_room_types = None;
        self.active_shop_type = None;
        self.current_event = None;
        self.current_treasure = None;
    }
}
