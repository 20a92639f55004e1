//! Player state.
//!
//! A [`PlayerStats`] value is the single mutable snapshot of the runner.
//! Resolution functions take a snapshot, transform it, and return it; the
//! state machine owns the authoritative copy. All range invariants (hp,
//! alert, power floor, stack caps) are enforced here at the mutators.

use serde::{Deserialize, Serialize};

use crate::alert::{AlertPhase, clamp_alert};
use crate::consts::{
    CONTRACT_CAP, INITIAL_CREDITS, INITIAL_HP, INITIAL_POWER, INITIAL_SHIELD, MODULE_STACK_CAP,
    POWER_FLOOR,
};
use crate::contract::Contract;
use crate::modules::{ModuleEffect, OVERCLOCK_MAX_HP_LOSS, OVERCLOCK_POWER_GAIN};

/// The runner's mutable stats for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub hp: i32,
    pub max_hp: i32,
    /// Processing power; determines kill speed
    pub power: i32,
    /// Flat damage reduction
    pub shield: i32,
    pub credits: i32,
    /// Heat meter, always within [0, 100]
    pub security_alert: i32,
    /// Owned module copies, order irrelevant, at most 5 per effect
    pub modules: Vec<ModuleEffect>,
    /// In-progress side objectives, at most 2
    pub active_contracts: Vec<Contract>,
    /// Singular passive-income installation
    pub has_crypto_miner: bool,
}

impl PlayerStats {
    pub fn new() -> Self {
        Self {
            hp: INITIAL_HP,
            max_hp: INITIAL_HP,
            power: INITIAL_POWER,
            shield: INITIAL_SHIELD,
            credits: INITIAL_CREDITS,
            security_alert: 0,
            modules: Vec::new(),
            active_contracts: Vec::new(),
            has_crypto_miner: false,
        }
    }

    /// Current network phase.
    pub fn phase(&self) -> AlertPhase {
        AlertPhase::of(self.security_alert)
    }

    /// Apply a signed alert delta, clamped to the legal range.
    pub fn apply_alert(&mut self, delta: i32) {
        self.security_alert = clamp_alert(self.security_alert + delta);
    }

    /// Owned copies of a module.
    pub fn module_count(&self, effect: ModuleEffect) -> usize {
        self.modules.iter().filter(|m| **m == effect).count()
    }

    /// Add one copy of a module, honoring the stack cap.
    ///
    /// Overclock applies its permanent stat trade immediately, once per
    /// acquired copy. Returns false (state unchanged) at the cap.
    pub fn add_module(&mut self, effect: ModuleEffect) -> bool {
        if self.module_count(effect) >= MODULE_STACK_CAP {
            return false;
        }
        self.modules.push(effect);
        if effect == ModuleEffect::Overclock {
            self.power += OVERCLOCK_POWER_GAIN;
            self.max_hp -= OVERCLOCK_MAX_HP_LOSS;
            self.hp = self.hp.min(self.max_hp);
        }
        true
    }

    /// Heal up to max hp.
    pub fn heal(&mut self, amount: i32) {
        self.hp = (self.hp + amount.max(0)).min(self.max_hp);
    }

    /// Take damage; hp never drops below 0.
    pub fn take_damage(&mut self, amount: i32) {
        self.hp = (self.hp - amount.max(0)).max(0);
    }

    /// Reduce power, respecting the gameplay floor of 1.
    pub fn drain_power(&mut self, amount: i32) {
        self.power = (self.power - amount.max(0)).max(POWER_FLOOR);
    }

    pub fn gain_credits(&mut self, amount: i32) {
        self.credits += amount.max(0);
    }

    /// Spend credits if affordable. Returns false (state unchanged) otherwise.
    pub fn spend_credits(&mut self, cost: i32) -> bool {
        if self.credits < cost {
            return false;
        }
        self.credits -= cost;
        true
    }

    /// Whether another contract can be signed.
    pub fn has_contract_capacity(&self) -> bool {
        self.active_contracts.len() < CONTRACT_CAP
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self::new()
    }
}
