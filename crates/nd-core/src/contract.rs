//! Dark contracts: timed side objectives.
//!
//! Contracts are signed at a Dark-Contract treasure node for an upfront
//! cost and advance on two run events: combat victories and floor advances.
//! They resolve by completion (payout), expiry, or failure.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::modules::MODULE_CATALOG;
use crate::player::PlayerStats;
use crate::rng::GameRng;

/// Alert threshold a Chaos Bet pays out at.
pub const CHAOS_BET_ALERT: i32 = 80;

/// Credits granted in place of a module payout when every roll is at cap.
const FENCE_VALUE: i32 = 60;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum ContractKind {
    /// Survive N floors without entering combat; any combat win voids it
    GhostRun,
    /// Destroy an Elite
    Wetwork,
    /// Be at high alert when a floor turns over
    ChaosBet,
    /// Clear N floors before the timer runs out
    Speedrun,
    /// Win combats without taking a single point of damage
    Untouchable,
}

impl ContractKind {
    pub const fn name(&self) -> &'static str {
        match self {
            ContractKind::GhostRun => "Ghost Run",
            ContractKind::Wetwork => "Wetwork",
            ContractKind::ChaosBet => "Chaos Bet",
            ContractKind::Speedrun => "Speedrun",
            ContractKind::Untouchable => "Untouchable",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            ContractKind::GhostRun => "Descend without engaging. One kill voids the deal.",
            ContractKind::Wetwork => "A rival wants an Elite gone. Make it happen.",
            ContractKind::ChaosBet => "Keep the grid burning. Pay out at 80% alert on turnover.",
            ContractKind::Speedrun => "Depth is money. Clear floors before the window closes.",
            ContractKind::Untouchable => "Win clean. Not a scratch.",
        }
    }
}

/// One signed or offered contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub kind: ContractKind,
    /// Upfront signing cost in credits
    pub cost: i32,
    /// Credit payout on completion (0 when the payout is a module)
    pub payout_credits: i32,
    /// Whether completion grants a random module instead of credits
    pub payout_module: bool,
    pub target: u32,
    pub progress: u32,
    /// Floors remaining before expiry
    pub duration_floors: u32,
}

impl Contract {
    /// Build a floor-scaled offer for a contract kind.
    pub fn offer(kind: ContractKind, floor: u32) -> Self {
        let f = floor as i32;
        match kind {
            ContractKind::GhostRun => Self {
                kind,
                cost: 30 + 2 * f,
                payout_credits: 120 + 10 * f,
                payout_module: false,
                target: 4,
                progress: 0,
                duration_floors: 6,
            },
            ContractKind::Wetwork => Self {
                kind,
                cost: 40 + 2 * f,
                payout_credits: 0,
                payout_module: true,
                target: 1,
                progress: 0,
                duration_floors: 8,
            },
            ContractKind::ChaosBet => Self {
                kind,
                cost: 25 + 2 * f,
                payout_credits: 150 + 12 * f,
                payout_module: false,
                target: 1,
                progress: 0,
                duration_floors: 10,
            },
            ContractKind::Speedrun => Self {
                kind,
                cost: 35 + 2 * f,
                payout_credits: 130 + 10 * f,
                payout_module: false,
                target: 5,
                progress: 0,
                duration_floors: 5,
            },
            ContractKind::Untouchable => Self {
                kind,
                cost: 45 + 3 * f,
                payout_credits: 160 + 12 * f,
                payout_module: false,
                target: 2,
                progress: 0,
                duration_floors: 8,
            },
        }
    }
}

/// Run events contracts react to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContractEvent {
    CombatWin { elite: bool, damage_taken: i32 },
    FloorAdvance { alert: i32 },
}

/// Advance every active contract against an event.
///
/// Applies payouts directly to the player and returns log lines describing
/// completions, failures, and expiries.
pub fn update_contracts(
    player: &mut PlayerStats,
    event: ContractEvent,
    rng: &mut GameRng,
) -> Vec<String> {
    let mut messages = Vec::new();
    let mut contracts = std::mem::take(&mut player.active_contracts);
    let mut payouts: Vec<Contract> = Vec::new();

    contracts.retain_mut(|contract| match event {
        ContractEvent::CombatWin { elite, damage_taken } => {
            match contract.kind {
                ContractKind::GhostRun => {
                    messages.push(format!("Contract voided: {}", contract.kind.name()));
                    return false;
                }
                ContractKind::Wetwork if elite => contract.progress += 1,
                ContractKind::Untouchable if damage_taken == 0 => contract.progress += 1,
                _ => {}
            }
            if contract.progress >= contract.target {
                payouts.push(contract.clone());
                return false;
            }
            true
        }
        ContractEvent::FloorAdvance { alert } => {
            match contract.kind {
                ContractKind::GhostRun | ContractKind::Speedrun => contract.progress += 1,
                ContractKind::ChaosBet if alert >= CHAOS_BET_ALERT => contract.progress += 1,
                _ => {}
            }
            if contract.progress >= contract.target {
                payouts.push(contract.clone());
                return false;
            }
            contract.duration_floors = contract.duration_floors.saturating_sub(1);
            if contract.duration_floors == 0 {
                messages.push(format!("Contract expired: {}", contract.kind.name()));
                return false;
            }
            true
        }
    });

    player.active_contracts = contracts;

    for contract in payouts {
        if contract.payout_module {
            let def = rng
                .choose(&MODULE_CATALOG)
                .expect("catalog is not empty");
            if player.add_module(def.effect) {
                messages.push(format!(
                    "Contract complete: {} - payout {}",
                    contract.kind.name(),
                    def.name
                ));
            } else {
                player.gain_credits(FENCE_VALUE);
                messages.push(format!(
                    "Contract complete: {} - {} at cap, fenced for {} Crypto",
                    contract.kind.name(),
                    def.name,
                    FENCE_VALUE
                ));
            }
        } else {
            player.gain_credits(contract.payout_credits);
            messages.push(format!(
                "Contract complete: {} - payout {} Crypto",
                contract.kind.name(),
                contract.payout_credits
            ));
        }
    }

    messages
}

/// Generate up to three distinct contract offers for a Dark-Contract node.
pub fn generate_offers(floor: u32, rng: &mut GameRng) -> Vec<Contract> {
    use strum::IntoEnumIterator;
    let mut kinds: Vec<ContractKind> = ContractKind::iter().collect();
    rng.shuffle(&mut kinds);
    kinds
        .into_iter()
        .take(3)
        .map(|kind| Contract::offer(kind, floor))
        .collect()
}
