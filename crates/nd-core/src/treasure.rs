//! Treasure sub-flow: data caches, dark contracts, and the crypto miner.
//!
//! A treasure node no longer resolves inline; it opens an interactive
//! branch whose costs and rewards live on the individual choices. The
//! data cache is a layered push-your-luck dig, the contract desk sells
//! side objectives, and the miner is a one-time installation.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::alert::{reward_multiplier, sweep_credit_bonus};
use crate::contract::{Contract, generate_offers};
use crate::modules::MODULE_CATALOG;
use crate::player::PlayerStats;
use crate::rng::GameRng;
use crate::tuning::Tuning;

/// Hp price of forcing the second cache layer.
pub const BREACH_HP_COST: i32 = 15;
/// Hp price of decrypting the core.
pub const CORE_HP_COST: i32 = 10;
/// Minimum power required to attempt the core.
pub const CORE_POWER_GATE: i32 = 15;

/// Treasure node sub-variant.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum TreasureKind {
    DataCache,
    DarkContract,
    CryptoMiner,
}

/// Live state of an open treasure interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreasureState {
    pub kind: TreasureKind,
    /// Current data-cache layer (1 or 2)
    pub cache_layer: u8,
    /// Remaining contract offers at a Dark-Contract desk
    pub offers: Vec<Contract>,
}

/// Player input inside the treasure sub-flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TreasureAction {
    /// Take the modest layer-1 reward and leave
    Extract,
    /// Pay hp to open layer 2
    Breach,
    /// Pay hp to decrypt the core (power-gated)
    DecryptCore,
    /// Walk away from the node
    Leave,
    /// Sign the contract at an offer index
    Sign(usize),
    /// Install the crypto miner
    Install,
    /// Decline the miner
    Ignore,
}

/// Roll the sub-variant for a freshly entered treasure node.
///
/// Early floors favor plain caches; deeper floors shift toward contracts
/// and the miner. An already-installed miner re-rolls to a cache.
pub fn roll_treasure(floor: u32, has_miner: bool, rng: &mut GameRng) -> TreasureKind {
    let (cache, contract) = match floor {
        0..=5 => (0.70, 0.20),
        6..=12 => (0.50, 0.30),
        _ => (0.40, 0.35),
    };
    let u = rng.uniform();
    let kind = if u < cache {
        TreasureKind::DataCache
    } else if u < cache + contract {
        TreasureKind::DarkContract
    } else {
        TreasureKind::CryptoMiner
    };
    if kind == TreasureKind::CryptoMiner && has_miner {
        TreasureKind::DataCache
    } else {
        kind
    }
}

/// Build the interaction state for a rolled treasure kind.
pub fn open_treasure(kind: TreasureKind, floor: u32, rng: &mut GameRng) -> TreasureState {
    let offers = if kind == TreasureKind::DarkContract {
        generate_offers(floor, rng)
    } else {
        Vec::new()
    };
    TreasureState {
        kind,
        cache_layer: 1,
        offers,
    }
}

/// Result of a treasure action.
#[derive(Debug, Clone)]
pub struct TreasureOutcome {
    pub player: PlayerStats,
    pub log: String,
    pub narrative: String,
    /// When false the interaction stays open for further actions
    pub done: bool,
}

fn scaled_credits(base: f64, floor: u32, alert: i32, tuning: &Tuning) -> i32 {
    (base * tuning.scaling(floor) * reward_multiplier(alert) * sweep_credit_bonus(alert)).floor()
        as i32
}

/// Apply a treasure action against the open interaction.
///
/// Returns None for an illegal action (wrong kind, unaffordable cost,
/// failed gate); state and player are unchanged in that case.
pub fn apply_treasure_action(
    state: &mut TreasureState,
    action: TreasureAction,
    mut player: PlayerStats,
    floor: u32,
    rng: &mut GameRng,
    tuning: &Tuning,
) -> Option<TreasureOutcome> {
    match (state.kind, action) {
        (TreasureKind::DataCache, TreasureAction::Extract) if state.cache_layer == 1 => {
            let gain = scaled_credits(40.0, floor, player.security_alert, tuning);
            player.gain_credits(gain);
            Some(TreasureOutcome {
                player,
                log: format!("Data Cache skimmed: +{gain} Crypto"),
                narrative: "You pulled the surface shards and ghosted before the cache \
                            could fingerprint you."
                    .to_string(),
                done: true,
            })
        }
        (TreasureKind::DataCache, TreasureAction::Breach) if state.cache_layer == 1 => {
            if player.hp <= BREACH_HP_COST {
                return None;
            }
            player.hp -= BREACH_HP_COST;
            let def = rng.choose(&MODULE_CATALOG).expect("catalog is not empty");
            let installed = player.add_module(def.effect);
            let gain = scaled_credits(90.0, floor, player.security_alert, tuning);
            player.gain_credits(gain);
            state.cache_layer = 2;
            let log = if installed {
                format!("Layer 2 breached: acquired {}, +{gain} Crypto, -{BREACH_HP_COST} HP", def.name)
            } else {
                format!("Layer 2 breached: {} at capacity, +{gain} Crypto, -{BREACH_HP_COST} HP", def.name)
            };
            Some(TreasureOutcome {
                player,
                log,
                narrative: "The second layer cracks open under brute force. Deeper still, \
                            something encrypted is humming."
                    .to_string(),
                done: false,
            })
        }
        (TreasureKind::DataCache, TreasureAction::DecryptCore) if state.cache_layer == 2 => {
            if player.power < CORE_POWER_GATE || player.hp <= CORE_HP_COST {
                return None;
            }
            player.hp -= CORE_HP_COST;
            let def = rng.choose(&MODULE_CATALOG).expect("catalog is not empty");
            let mut copies = 0;
            for _ in 0..2 {
                if player.add_module(def.effect) {
                    copies += 1;
                }
            }
            let gain = scaled_credits(150.0, floor, player.security_alert, tuning);
            player.gain_credits(gain);
            Some(TreasureOutcome {
                player,
                log: format!(
                    "Core decrypted: {} x{copies}, +{gain} Crypto, -{CORE_HP_COST} HP",
                    def.name
                ),
                narrative: "The core unfolds into clean, weaponized source. Worth every \
                            burned circuit."
                    .to_string(),
                done: true,
            })
        }
        (TreasureKind::DataCache, TreasureAction::Leave) => Some(TreasureOutcome {
            player,
            log: "Cache abandoned.".to_string(),
            narrative: "You cut the link and leave the rest of the archive to the dark."
                .to_string(),
            done: true,
        }),
        (TreasureKind::DarkContract, TreasureAction::Sign(index)) => {
            let contract = state.offers.get(index)?.clone();
            if !player.has_contract_capacity() || !player.spend_credits(contract.cost) {
                return None;
            }
            state.offers.remove(index);
            let log = format!(
                "Contract signed: {} (-{} Crypto)",
                contract.kind.name(),
                contract.cost
            );
            player.active_contracts.push(contract);
            Some(TreasureOutcome {
                player,
                log,
                narrative: "The broker's terms scroll past. You sign with a checksum."
                    .to_string(),
                done: false,
            })
        }
        (TreasureKind::DarkContract, TreasureAction::Leave) => Some(TreasureOutcome {
            player,
            log: "Left the contract desk.".to_string(),
            narrative: "You back out of the broker's node. Some deals smell worse than \
                        the sprawl."
                .to_string(),
            done: true,
        }),
        (TreasureKind::CryptoMiner, TreasureAction::Install) => {
            if player.has_crypto_miner {
                return None;
            }
            player.has_crypto_miner = true;
            Some(TreasureOutcome {
                player,
                log: "Crypto Miner installed: +10 Crypto/room, +4 Alert/floor".to_string(),
                narrative: "The rig spins up, already chewing cycles. Every node in the \
                            sector can hear it hum."
                    .to_string(),
                done: true,
            })
        }
        (TreasureKind::CryptoMiner, TreasureAction::Ignore) => Some(TreasureOutcome {
            player,
            log: "Miner rig ignored.".to_string(),
            narrative: "Passive income, active signature. You leave the rig cold."
                .to_string(),
            done: true,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache_state() -> TreasureState {
        TreasureState {
            kind: TreasureKind::DataCache,
            cache_layer: 1,
            offers: Vec::new(),
        }
    }

    #[test]
    fn test_roll_reroll_when_miner_owned() {
        let mut rng = GameRng::new(3);
        for _ in 0..200 {
            let kind = roll_treasure(20, true, &mut rng);
            assert_ne!(kind, TreasureKind::CryptoMiner);
        }
    }

    #[test]
    fn test_extract_closes_the_node() {
        let mut state = cache_state();
        let mut rng = GameRng::new(4);
        let outcome = apply_treasure_action(
            &mut state,
            TreasureAction::Extract,
            PlayerStats::new(),
            1,
            &mut rng,
            &Tuning::default(),
        )
        .unwrap();
        assert!(outcome.done);
        assert!(outcome.player.credits > 0);
    }

    #[test]
    fn test_breach_pays_hp_and_opens_layer_two() {
        let mut state = cache_state();
        let mut rng = GameRng::new(4);
        let outcome = apply_treasure_action(
            &mut state,
            TreasureAction::Breach,
            PlayerStats::new(),
            1,
            &mut rng,
            &Tuning::default(),
        )
        .unwrap();
        assert!(!outcome.done);
        assert_eq!(state.cache_layer, 2);
        assert!(outcome.player.hp <= 100 - BREACH_HP_COST);
        assert!(!outcome.player.modules.is_empty());
    }

    #[test]
    fn test_breach_refused_on_low_hp() {
        let mut state = cache_state();
        let mut rng = GameRng::new(4);
        let mut player = PlayerStats::new();
        player.hp = BREACH_HP_COST;
        assert!(
            apply_treasure_action(
                &mut state,
                TreasureAction::Breach,
                player,
                1,
                &mut rng,
                &Tuning::default(),
            )
            .is_none()
        );
        assert_eq!(state.cache_layer, 1, "state untouched on refusal");
    }

    #[test]
    fn test_core_requires_power_gate() {
        let mut state = cache_state();
        state.cache_layer = 2;
        let mut rng = GameRng::new(4);
        let mut player = PlayerStats::new();
        player.power = CORE_POWER_GATE - 1;
        assert!(
            apply_treasure_action(
                &mut state,
                TreasureAction::DecryptCore,
                player.clone(),
                1,
                &mut rng,
                &Tuning::default(),
            )
            .is_none()
        );

        player.power = CORE_POWER_GATE;
        let outcome = apply_treasure_action(
            &mut state,
            TreasureAction::DecryptCore,
            player,
            1,
            &mut rng,
            &Tuning::default(),
        )
        .unwrap();
        assert!(outcome.done);
        assert!(outcome.player.modules.len() >= 1);
    }

    #[test]
    fn test_core_rejected_from_layer_one() {
        let mut state = cache_state();
        let mut rng = GameRng::new(4);
        assert!(
            apply_treasure_action(
                &mut state,
                TreasureAction::DecryptCore,
                PlayerStats::new(),
                1,
                &mut rng,
                &Tuning::default(),
            )
            .is_none()
        );
    }

    #[test]
    fn test_contract_signing_and_capacity() {
        let mut rng = GameRng::new(8);
        let mut state = open_treasure(TreasureKind::DarkContract, 3, &mut rng);
        assert_eq!(state.offers.len(), 3);

        let mut player = PlayerStats::new();
        player.credits = 10_000;

        let outcome = apply_treasure_action(
            &mut state,
            TreasureAction::Sign(0),
            player,
            3,
            &mut rng,
            &Tuning::default(),
        )
        .unwrap();
        assert!(!outcome.done);
        assert_eq!(outcome.player.active_contracts.len(), 1);
        assert_eq!(state.offers.len(), 2);

        let outcome = apply_treasure_action(
            &mut state,
            TreasureAction::Sign(0),
            outcome.player,
            3,
            &mut rng,
            &Tuning::default(),
        )
        .unwrap();
        assert_eq!(outcome.player.active_contracts.len(), 2);

        // Third signature exceeds capacity: refused, offer retained
        let offers_left = state.offers.len();
        assert!(
            apply_treasure_action(
                &mut state,
                TreasureAction::Sign(0),
                outcome.player,
                3,
                &mut rng,
                &Tuning::default(),
            )
            .is_none()
        );
        assert_eq!(state.offers.len(), offers_left);
    }

    #[test]
    fn test_signing_needs_credits() {
        let mut rng = GameRng::new(8);
        let mut state = open_treasure(TreasureKind::DarkContract, 3, &mut rng);
        let player = PlayerStats::new();
        assert_eq!(player.credits, 0);
        assert!(
            apply_treasure_action(
                &mut state,
                TreasureAction::Sign(0),
                player,
                3,
                &mut rng,
                &Tuning::default(),
            )
            .is_none()
        );
    }

    #[test]
    fn test_miner_install_is_singular() {
        let mut rng = GameRng::new(8);
        let mut state = open_treasure(TreasureKind::CryptoMiner, 3, &mut rng);
        let outcome = apply_treasure_action(
            &mut state,
            TreasureAction::Install,
            PlayerStats::new(),
            3,
            &mut rng,
            &Tuning::default(),
        )
        .unwrap();
        assert!(outcome.player.has_crypto_miner);

        assert!(
            apply_treasure_action(
                &mut state,
                TreasureAction::Install,
                outcome.player,
                3,
                &mut rng,
                &Tuning::default(),
            )
            .is_none()
        );
    }

    #[test]
    fn test_kind_action_mismatch_rejected() {
        let mut state = cache_state();
        let mut rng = GameRng::new(8);
        assert!(
            apply_treasure_action(
                &mut state,
                TreasureAction::Install,
                PlayerStats::new(),
                1,
                &mut rng,
                &Tuning::default(),
            )
            .is_none()
        );
    }
}
