//! Combat resolution.
//!
//! Combat is instantaneous but simulated round-by-round: the player always
//! strikes first, the kill blow draws no return fire, and each surviving
//! round rolls the defensive module procs independently. The caller applies
//! the card's alert delta before invoking, so all multipliers here read the
//! post-change alert.

use crate::alert::{AlertPhase, alert_multiplier, reward_multiplier, sweep_credit_bonus};
use crate::modules::ModifierBundle;
use crate::player::PlayerStats;
use crate::room::{RoomCardData, RoomType};
use crate::rng::GameRng;
use crate::tuning::Tuning;

/// Stealth first-strike damage bonus.
const FIRST_STRIKE_FACTOR: f64 = 1.7;

/// Outcome of a resolved combat.
#[derive(Debug, Clone)]
pub struct CombatOutcome {
    pub player: PlayerStats,
    pub rounds: u32,
    pub damage_taken: i32,
    pub credits_gained: i32,
    pub boss_defeated: bool,
    pub died: bool,
    pub log: String,
    pub narrative: String,
}

/// Rounds needed to destroy an enemy, given the opening hit.
///
/// Always at least 1; the first strike is round one and the remainder is
/// ground out at `effective_power` per round.
pub fn rounds_to_kill(enemy_hp: i32, first_hit: i32, effective_power: i32) -> u32 {
    let remaining = enemy_hp - first_hit;
    if remaining <= 0 {
        1
    } else {
        1 + (remaining as f64 / effective_power.max(1) as f64).ceil() as u32
    }
}

/// Damage the enemy lands per round after flat mitigation.
pub fn incoming_per_round(enemy_power: i32, shield: i32, guardian_flat: i32) -> i32 {
    (enemy_power - shield - guardian_flat).max(0)
}

fn class_multiplier(room: RoomType) -> f64 {
    match room {
        RoomType::Boss => 2.5,
        RoomType::Elite => 1.5,
        _ => 1.0,
    }
}

fn class_credit_multiplier(room: RoomType) -> f64 {
    match room {
        RoomType::Boss => 10.0,
        RoomType::Elite => 3.0,
        _ => 1.0,
    }
}

/// Resolve a combat node against a player snapshot.
pub fn resolve_combat(
    mut player: PlayerStats,
    card: &RoomCardData,
    floor: u32,
    bundle: &ModifierBundle,
    rng: &mut GameRng,
    tuning: &Tuning,
) -> CombatOutcome {
    let scaling = tuning.scaling(floor);
    let class_mult = class_multiplier(card.room);
    let alert_mult = alert_multiplier(player.security_alert);

    let enemy_power = (tuning.enemy_base_power
        * scaling
        * tuning.hard_mode_factor
        * class_mult
        * alert_mult)
        .floor() as i32;
    let enemy_hp =
        (tuning.enemy_base_hp * scaling * tuning.hard_mode_factor * class_mult).floor() as i32;

    let effective_power = player.power + bundle.thorns_power;
    let stealth = player.phase() == AlertPhase::Stealth;
    let first_hit = if stealth {
        (effective_power as f64 * FIRST_STRIKE_FACTOR).floor() as i32
    } else {
        effective_power
    };

    let rounds = rounds_to_kill(enemy_hp, first_hit, effective_power);
    let incoming = incoming_per_round(enemy_power, player.shield, bundle.guardian_flat);

    let mut damage_taken = 0;
    for _ in 0..rounds.saturating_sub(1) {
        if bundle.nano_negate_chance > 0.0 && rng.chance(bundle.nano_negate_chance) {
            continue;
        }
        if bundle.logic_bomb_chance > 0.0 && rng.chance(bundle.logic_bomb_chance) {
            continue;
        }
        damage_taken += incoming;
    }

    // Post-combat gains run on the raw hp so a lethal hit stays lethal even
    // through vampire recovery, matching the resolution order of the rest
    // of the engine.
    let mut hp = player.hp - damage_taken;
    let boss = card.room == RoomType::Boss;
    player.power += if boss { 5 } else { 1 };
    if bundle.vampire_heal > 0 {
        hp = (hp + bundle.vampire_heal).min(player.max_hp);
    }

    let sweep = sweep_credit_bonus(player.security_alert);
    let variance = 0.8 + rng.uniform() * 0.4;
    let base_gain = tuning.enemy_base_credits
        * scaling
        * class_credit_multiplier(card.room)
        * variance
        * reward_multiplier(player.security_alert)
        * sweep;
    let credits_gained = ((base_gain.floor()) * bundle.credit_multiplier).floor() as i32;
    player.gain_credits(credits_gained);

    let died = hp <= 0;
    player.hp = hp.max(0);

    let alert_pct = ((alert_mult - 1.0) * 100.0).floor() as i32;
    let heat_pct = ((reward_multiplier(player.security_alert) - 1.0) * 100.0).floor() as i32;
    let mut log = format!("Combat: Took {damage_taken} DMG");
    if alert_pct > 10 {
        log.push_str(&format!(" (High Alert: Enemy DMG +{alert_pct}%)"));
    }
    log.push_str(&format!(". Gained {credits_gained} Crypto"));
    if heat_pct > 10 {
        log.push_str(&format!(" (High Heat: +{heat_pct}% Crypto)"));
    }
    if sweep > 1.0 {
        log.push_str(" (Active Sweep: x1.3 Crypto)");
    }
    log.push('.');
    if stealth {
        log.push_str(" (Stealth: First Hit x1.7)");
    }

    let narrative = if card.name == "HUNTER KILLER" {
        "INTERCEPTION! The System Hunter found you. You barely survived the ambush.".to_string()
    } else {
        format!(
            "You engaged the {}. Security alert: {}%. Enemy strikes amplified by {}%. \
             Firewall held for {} cycles.",
            card.name, player.security_alert, alert_pct, rounds
        )
    };

    CombatOutcome {
        player,
        rounds,
        damage_taken,
        credits_gained,
        boss_defeated: boss,
        died,
        log,
        narrative,
    }
}
