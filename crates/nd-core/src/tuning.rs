//! Balance configuration.
//!
//! All difficulty/economy knobs in one serializable struct, owned by
//! [`crate::GameState`]. `Default` reproduces the shipped balance.

use serde::{Deserialize, Serialize};

/// Balance knobs for a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    /// Per-floor exponential scaling base for enemy stats and loot
    pub floor_scaling: f64,
    /// Flat multiplier on enemy power and hp
    pub hard_mode_factor: f64,
    /// Enemy power before scaling and class multipliers
    pub enemy_base_power: f64,
    /// Enemy hp before scaling and class multipliers
    pub enemy_base_hp: f64,
    /// Base credit drop before scaling and multipliers
    pub enemy_base_credits: f64,
    /// Alert drift applied on every floor advance
    pub passive_alert_drift: i32,
    /// Extra drift while the crypto miner is installed
    pub miner_alert_drift: i32,
    /// Flat credit income per standard resolution with the miner installed
    pub miner_income: i32,
    /// Hp cost of purging the crypto miner
    pub miner_purge_hp: i32,
    /// Emergency repair base price (before Lockdown markup)
    pub repair_base_cost: i32,
    /// Hp restored by an emergency repair
    pub repair_heal: i32,
    /// Alert drift applied when leaving a shop
    pub shop_leave_alert: i32,
    /// Chance of a Hunter ambush per action while in the Kill Switch phase
    pub kill_switch_chance: f64,
    /// Compounding per-copy price growth for repeat module purchases
    pub stack_price_growth: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            floor_scaling: 1.035,
            hard_mode_factor: 1.2,
            enemy_base_power: 10.0,
            enemy_base_hp: 20.0,
            enemy_base_credits: 6.0,
            passive_alert_drift: 1,
            miner_alert_drift: 4,
            miner_income: 10,
            miner_purge_hp: 20,
            repair_base_cost: 41,
            repair_heal: 30,
            shop_leave_alert: 5,
            kill_switch_chance: 0.25,
            stack_price_growth: 1.12,
        }
    }
}

impl Tuning {
    /// Exponential difficulty scale for a floor.
    pub fn scaling(&self, floor: u32) -> f64 {
        self.floor_scaling.powi(floor as i32)
    }
}
