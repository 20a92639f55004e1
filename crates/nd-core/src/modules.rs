//! Passive upgrade modules.
//!
//! The catalog is static; a player owns a multiset of copies (up to
//! [`crate::consts::MODULE_STACK_CAP`] per module). Per-resolution effects
//! are aggregated once into a [`ModifierBundle`] so combat and economy math
//! never re-derive them from the raw list.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::alert::lockdown_price_multiplier;

/// Identity of a passive module. One catalog entry per variant.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum ModuleEffect {
    /// Recover hp on every kill
    Vampire,
    /// Counter-intrusion routines add to effective power
    Thorns,
    /// Percentage bonus on credit gains
    Miner,
    /// Chance to negate a full round of damage
    NanoArmor,
    /// Instant +power / -max hp trade, applied once per purchase
    Overclock,
    /// Chance to defuse a round of incoming damage
    LogicBomb,
    /// Flat per-round damage reduction
    Guardian,
}

/// Static catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleDef {
    pub effect: ModuleEffect,
    pub name: &'static str,
    pub description: &'static str,
    pub base_cost: i32,
}

/// The full module catalog.
pub const MODULE_CATALOG: [ModuleDef; 7] = [
    ModuleDef {
        effect: ModuleEffect::Vampire,
        name: "Vampire Kernel",
        description: "Recover 2 HP when destroying enemies.",
        base_cost: 75,
    },
    ModuleDef {
        effect: ModuleEffect::Thorns,
        name: "Thorns Protocol",
        description: "Deals 3 DMG to attacker per cycle.",
        base_cost: 101,
    },
    ModuleDef {
        effect: ModuleEffect::Miner,
        name: "Crypto Miner",
        description: "+20% Crypto gain from all sources.",
        base_cost: 60,
    },
    ModuleDef {
        effect: ModuleEffect::NanoArmor,
        name: "Nano-Armor",
        description: "+8% chance to Negate all damage.",
        base_cost: 126,
    },
    ModuleDef {
        effect: ModuleEffect::Overclock,
        name: "Overclock",
        description: "+3 RAM, but -10 Max Integrity.",
        base_cost: 90,
    },
    ModuleDef {
        effect: ModuleEffect::LogicBomb,
        name: "Logic Bomb",
        description: "12% chance to reflect 50% damage taken.",
        base_cost: 113,
    },
    ModuleDef {
        effect: ModuleEffect::Guardian,
        name: "Guardian Angel",
        description: "Flat -2 Damage reduction.",
        base_cost: 143,
    },
];

/// Overclock's instant stat trade.
pub const OVERCLOCK_POWER_GAIN: i32 = 3;
pub const OVERCLOCK_MAX_HP_LOSS: i32 = 10;

/// Catalog lookup.
pub fn module_def(effect: ModuleEffect) -> &'static ModuleDef {
    MODULE_CATALOG
        .iter()
        .find(|def| def.effect == effect)
        .expect("every effect has a catalog entry")
}

/// Repeat-purchase price: compounding growth per owned copy, with the
/// Lockdown markup applied on top.
pub fn stack_cost(def: &ModuleDef, owned: usize, alert: i32, growth: f64) -> i32 {
    let stacked = def.base_cost as f64 * growth.powi(owned as i32);
    (stacked * lockdown_price_multiplier(alert)).ceil() as i32
}

/// Per-resolution modifier aggregation over an owned module multiset.
///
/// Computed once at the top of a resolution and handed to the combat and
/// economy math, so tooltips and outcomes cannot drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ModifierBundle {
    /// Hp restored on a kill (2 per Vampire copy)
    pub vampire_heal: i32,
    /// Added to effective power (3 per Thorns copy)
    pub thorns_power: i32,
    /// Credit gain multiplier (1 + 0.2 per Miner copy)
    pub credit_multiplier: f64,
    /// Chance per round to negate all damage (0.08 per Nano-Armor copy)
    pub nano_negate_chance: f64,
    /// Chance per round to defuse the incoming hit (0.12 per Logic Bomb copy)
    pub logic_bomb_chance: f64,
    /// Flat per-round damage reduction (2 per Guardian copy)
    pub guardian_flat: i32,
}

impl ModifierBundle {
    pub fn from_modules(modules: &[ModuleEffect]) -> Self {
        let count = |effect: ModuleEffect| modules.iter().filter(|m| **m == effect).count() as i32;
        let vampire = count(ModuleEffect::Vampire);
        let thorns = count(ModuleEffect::Thorns);
        let miner = count(ModuleEffect::Miner);
        let nano = count(ModuleEffect::NanoArmor);
        let logic = count(ModuleEffect::LogicBomb);
        let guardian = count(ModuleEffect::Guardian);
        Self {
            vampire_heal: 2 * vampire,
            thorns_power: 3 * thorns,
            credit_multiplier: 1.0 + 0.2 * miner as f64,
            nano_negate_chance: 0.08 * nano as f64,
            logic_bomb_chance: 0.12 * logic as f64,
            guardian_flat: 2 * guardian,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_covers_every_effect() {
        use strum::IntoEnumIterator;
        for effect in ModuleEffect::iter() {
            assert_eq!(module_def(effect).effect, effect);
        }
    }

    #[test]
    fn test_stack_cost_curve() {
        let def = ModuleDef {
            effect: ModuleEffect::Vampire,
            name: "test",
            description: "",
            base_cost: 100,
        };
        // First copy at base price, outside Lockdown
        assert_eq!(stack_cost(&def, 0, 0, 1.12), 100);
        // Third copy during Lockdown: ceil(100 * 1.12^2 * 1.25) = 157
        assert_eq!(stack_cost(&def, 2, 70, 1.12), 157);
    }

    #[test]
    fn test_bundle_aggregation() {
        let modules = vec![
            ModuleEffect::Vampire,
            ModuleEffect::Vampire,
            ModuleEffect::Thorns,
            ModuleEffect::Miner,
            ModuleEffect::Guardian,
            ModuleEffect::Guardian,
            ModuleEffect::Guardian,
        ];
        let bundle = ModifierBundle::from_modules(&modules);
        assert_eq!(bundle.vampire_heal, 4);
        assert_eq!(bundle.thorns_power, 3);
        assert!((bundle.credit_multiplier - 1.2).abs() < 1e-9);
        assert_eq!(bundle.guardian_flat, 6);
        assert!((bundle.nano_negate_chance - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_bundle_is_neutral() {
        let bundle = ModifierBundle::from_modules(&[]);
        assert_eq!(bundle.vampire_heal, 0);
        assert_eq!(bundle.thorns_power, 0);
        assert!((bundle.credit_multiplier - 1.0).abs() < 1e-9);
        assert_eq!(bundle.guardian_flat, 0);
    }
}
