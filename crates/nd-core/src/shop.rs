//! Merchant sub-flow: module sales and emergency repairs.
//!
//! Each merchant node carries a shop sub-type that filters the catalog.
//! Prices read the Lockdown markup at purchase time; every rejection
//! (maxed stack, empty wallet, off-shelf module) is a silent no-op.

use crate::alert::lockdown_price_multiplier;
use crate::modules::{MODULE_CATALOG, ModuleDef, ModuleEffect, stack_cost};
use crate::player::PlayerStats;
use crate::room::ShopType;
use crate::tuning::Tuning;

/// The catalog as stocked by a shop sub-type.
pub fn shop_inventory(shop: ShopType) -> Vec<&'static ModuleDef> {
    MODULE_CATALOG
        .iter()
        .filter(|def| match shop {
            ShopType::Hardware => matches!(
                def.effect,
                ModuleEffect::NanoArmor | ModuleEffect::Overclock | ModuleEffect::Guardian
            ),
            ShopType::Software => matches!(
                def.effect,
                ModuleEffect::Vampire
                    | ModuleEffect::Thorns
                    | ModuleEffect::Miner
                    | ModuleEffect::LogicBomb
            ),
            ShopType::General => true,
        })
        .collect()
}

/// Current price of an emergency repair.
pub fn repair_cost(alert: i32, tuning: &Tuning) -> i32 {
    (tuning.repair_base_cost as f64 * lockdown_price_multiplier(alert)).ceil() as i32
}

/// Buy one copy of a module from the active shop.
///
/// Returns None (player unchanged) when the module is not on this shelf,
/// the stack is maxed, or credits are short.
pub fn purchase_module(
    mut player: PlayerStats,
    effect: ModuleEffect,
    shop: ShopType,
    tuning: &Tuning,
) -> Option<(PlayerStats, String)> {
    let def = *shop_inventory(shop)
        .iter()
        .find(|d| d.effect == effect)?;
    let owned = player.module_count(effect);
    let cost = stack_cost(def, owned, player.security_alert, tuning.stack_price_growth);
    if !player.spend_credits(cost) {
        return None;
    }
    if !player.add_module(effect) {
        return None;
    }
    let log = format!("Installed {} (Lvl {}) for {} Crypto", def.name, owned + 1, cost);
    Some((player, log))
}

/// Buy an emergency repair.
pub fn purchase_repair(mut player: PlayerStats, tuning: &Tuning) -> Option<(PlayerStats, String)> {
    let cost = repair_cost(player.security_alert, tuning);
    if !player.spend_credits(cost) {
        return None;
    }
    player.heal(tuning.repair_heal);
    let log = format!("Emergency repair: +{} Integrity for {} Crypto", tuning.repair_heal, cost);
    Some((player, log))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hardware_stocks_defense_only() {
        let shelf = shop_inventory(ShopType::Hardware);
        assert_eq!(shelf.len(), 3);
        assert!(shelf.iter().all(|d| matches!(
            d.effect,
            ModuleEffect::NanoArmor | ModuleEffect::Overclock | ModuleEffect::Guardian
        )));
    }

    #[test]
    fn test_software_stocks_offense_and_utility() {
        let shelf = shop_inventory(ShopType::Software);
        assert_eq!(shelf.len(), 4);
        assert!(!shelf.iter().any(|d| d.effect == ModuleEffect::Guardian));
    }

    #[test]
    fn test_general_stocks_everything() {
        assert_eq!(shop_inventory(ShopType::General).len(), MODULE_CATALOG.len());
    }

    #[test]
    fn test_repair_cost_lockdown_markup() {
        let tuning = Tuning::default();
        assert_eq!(repair_cost(0, &tuning), 41);
        // ceil(41 * 1.25) = 52
        assert_eq!(repair_cost(70, &tuning), 52);
    }

    #[test]
    fn test_purchase_deducts_and_installs() {
        let mut player = PlayerStats::new();
        player.credits = 200;
        let (player, log) =
            purchase_module(player, ModuleEffect::Vampire, ShopType::Software, &Tuning::default())
                .unwrap();
        assert_eq!(player.credits, 125);
        assert_eq!(player.module_count(ModuleEffect::Vampire), 1);
        assert!(log.contains("Vampire Kernel"));
    }

    #[test]
    fn test_purchase_rejected_off_shelf() {
        let mut player = PlayerStats::new();
        player.credits = 10_000;
        assert!(
            purchase_module(player, ModuleEffect::Guardian, ShopType::Software, &Tuning::default())
                .is_none()
        );
    }

    #[test]
    fn test_purchase_rejected_without_credits() {
        let player = PlayerStats::new();
        assert!(
            purchase_module(player, ModuleEffect::Vampire, ShopType::General, &Tuning::default())
                .is_none()
        );
    }

    #[test]
    fn test_sixth_copy_rejected_without_charge() {
        let mut player = PlayerStats::new();
        player.credits = 100_000;
        let tuning = Tuning::default();
        for _ in 0..5 {
            let (next, _) =
                purchase_module(player, ModuleEffect::Miner, ShopType::General, &tuning).unwrap();
            player = next;
        }
        let before = player.credits;
        assert!(
            purchase_module(player.clone(), ModuleEffect::Miner, ShopType::General, &tuning)
                .is_none()
        );
        assert_eq!(player.credits, before, "no deduction on a rejected purchase");
    }

    #[test]
    fn test_price_compounds_per_copy() {
        let mut player = PlayerStats::new();
        player.credits = 100_000;
        let tuning = Tuning::default();
        let (player, _) =
            purchase_module(player, ModuleEffect::Miner, ShopType::General, &tuning).unwrap();
        let first_cost = 100_000 - player.credits;
        let (player, _) =
            purchase_module(player, ModuleEffect::Miner, ShopType::General, &tuning).unwrap();
        let second_cost = 100_000 - first_cost - player.credits;
        assert!(second_cost > first_cost);
    }

    #[test]
    fn test_repair_heals_capped() {
        let mut player = PlayerStats::new();
        player.credits = 100;
        player.hp = 90;
        let (player, _) = purchase_repair(player, &Tuning::default()).unwrap();
        assert_eq!(player.hp, 100);
        assert_eq!(player.credits, 59);
    }
}
