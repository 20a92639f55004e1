//! Local tactical-analysis implementation.
//!
//! Stands in for the external advisor service: same contract, no network.
//! The text covers the concerns a human would weigh (alert pressure,
//! integrity, affordability, the scouted path) and never touches game
//! state.

use nd_core::FLOOR_CARDS;
use nd_core::advisor::{Advisor, AdvisorError};
use nd_core::alert::AlertPhase;
use nd_core::modules::{ModuleEffect, module_def};
use nd_core::player::PlayerStats;
use nd_core::room::RoomCardData;

/// Rule-based advice source.
#[derive(Debug, Default)]
pub struct HeuristicAdvisor;

impl Advisor for HeuristicAdvisor {
    fn tactical_analysis(
        &mut self,
        floor: u32,
        player: &PlayerStats,
        cards: &[RoomCardData; FLOOR_CARDS],
    ) -> Result<String, AdvisorError> {
        let phase = AlertPhase::of(player.security_alert);
        let mut lines = vec![format!(
            "Depth {floor}: {} at {}% alert, {}/{} integrity.",
            phase.label(),
            player.security_alert,
            player.hp,
            player.max_hp
        )];

        match phase {
            AlertPhase::Stealth => lines.push(
                "Heat is low; your opening strike carries the x1.7 stealth bonus. \
                 Spend it on the richest target."
                    .to_string(),
            ),
            AlertPhase::ActiveSweep => lines.push(
                "Sweep pays a 1.3x crypto premium. Loot now, but watch the meter."
                    .to_string(),
            ),
            AlertPhase::Lockdown => lines.push(
                "Lockdown inflates prices and throttles repairs. A fight would cool \
                 the grid."
                    .to_string(),
            ),
            AlertPhase::KillSwitch => lines.push(
                "KILL SWITCH armed: every action risks a Hunter. Drop the alert \
                 immediately."
                    .to_string(),
            ),
        }

        if player.hp * 3 < player.max_hp {
            lines.push("Integrity critical. Favor a repair node over any engagement.".to_string());
        }

        let mut seen: Vec<ModuleEffect> = Vec::new();
        let mut loadout = Vec::new();
        for effect in &player.modules {
            if !seen.contains(effect) {
                seen.push(*effect);
                let def = module_def(*effect);
                loadout.push(format!("{} x{}", def.name, player.module_count(*effect)));
            }
        }
        if !loadout.is_empty() {
            lines.push(format!("Loadout: {}.", loadout.join(", ")));
        }

        let (best, card) = cards
            .iter()
            .enumerate()
            .max_by_key(|(_, card)| {
                // Cheap proxy ranking: cooling beats loot while hot, loot
                // beats cooling while cold
                let cooling = -card.alert_penalty;
                if player.security_alert >= 60 { cooling } else { -cooling }
            })
            .expect("three cards");
        let scouted: Vec<String> = card
            .next_scout_info
            .iter()
            .map(|room| room.to_string())
            .collect();
        lines.push(format!(
            "Option {}: [{}] {} scouts into [{}].",
            best + 1,
            card.room,
            card.name,
            scouted.join(", ")
        ));

        Ok(lines.join(" "))
    }
}
