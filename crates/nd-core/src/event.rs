//! Interactive event encounters.
//!
//! An event node picks one of a small set of fixed scenarios; each offers
//! labeled choices with distinct stat/alert trades. The chosen deltas flow
//! through the same clamping rules as every other resolution.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::modules::MODULE_CATALOG;
use crate::player::PlayerStats;
use crate::rng::GameRng;

/// One selectable branch of a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventChoiceDef {
    pub label: &'static str,
    pub summary: &'static str,
    pub risk: &'static str,
}

/// Fixed scenario templates.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum EventKind {
    RogueAiSignal,
    CorruptedDataBank,
    SecurityCheckpoint,
}

impl EventKind {
    pub const fn title(&self) -> &'static str {
        match self {
            EventKind::RogueAiSignal => "Rogue AI Signal",
            EventKind::CorruptedDataBank => "Corrupted Data Bank",
            EventKind::SecurityCheckpoint => "Security Checkpoint",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            EventKind::RogueAiSignal => {
                "You intercept a fragmented signal from a rogue AI. It offers power in \
                 exchange for exposing your location."
            }
            EventKind::CorruptedDataBank => {
                "A massive, unguarded server. It's glitching heavily. You could try to \
                 siphon funds or purge the corruption to lower your signature."
            }
            EventKind::SecurityCheckpoint => {
                "You stumbled into a dormant security hub. Systems are waking up."
            }
        }
    }

    pub const fn choices(&self) -> &'static [EventChoiceDef] {
        match self {
            EventKind::RogueAiSignal => &[
                EventChoiceDef {
                    label: "Merge Protocols",
                    summary: "+2 RAM, +15 Alert",
                    risk: "High Alert",
                },
                EventChoiceDef {
                    label: "Mask Signal",
                    summary: "-15 Alert, -75 Crypto",
                    risk: "Cost: Crypto",
                },
                EventChoiceDef {
                    label: "Sever Connection",
                    summary: "No Effect",
                    risk: "Safe",
                },
            ],
            EventKind::CorruptedDataBank => &[
                EventChoiceDef {
                    label: "Siphon Funds",
                    summary: "Gain High Crypto, +15 Alert",
                    risk: "Greedy",
                },
                EventChoiceDef {
                    label: "Purge Corruption",
                    summary: "-20 Alert, -3 RAM (Burnout)",
                    risk: "Tactical",
                },
                EventChoiceDef {
                    label: "Leave",
                    summary: "No Effect",
                    risk: "Safe",
                },
            ],
            EventKind::SecurityCheckpoint => &[
                EventChoiceDef {
                    label: "Smash Console",
                    summary: "-15 Alert, -10 HP (Sparks)",
                    risk: "Aggressive",
                },
                EventChoiceDef {
                    label: "Inject Trojan",
                    summary: "+15 Alert, +1 Module (Random)",
                    risk: "High Risk",
                },
                EventChoiceDef {
                    label: "Stealth Bypass",
                    summary: "No Effect",
                    risk: "Cautious",
                },
            ],
        }
    }
}

/// Pick a scenario for a freshly entered event node.
pub fn random_event(rng: &mut GameRng) -> EventKind {
    use strum::IntoEnumIterator;
    let kinds: Vec<EventKind> = EventKind::iter().collect();
    *rng.choose(&kinds).expect("at least one scenario")
}

/// Result of an event choice.
#[derive(Debug, Clone)]
pub struct EventOutcome {
    pub player: PlayerStats,
    pub alert_change: i32,
    pub log: String,
    pub narrative: String,
}

/// Apply a chosen branch to a player snapshot.
///
/// Returns None for an out-of-range choice index (illegal action, no-op).
pub fn apply_event_choice(
    kind: EventKind,
    choice: usize,
    mut player: PlayerStats,
    floor: u32,
    rng: &mut GameRng,
) -> Option<EventOutcome> {
    if choice >= kind.choices().len() {
        return None;
    }

    let mut alert_change = 0;
    let (log, narrative) = match (kind, choice) {
        (EventKind::RogueAiSignal, 0) => {
            player.power += 2;
            alert_change = 15;
            (
                "Merged with Rogue AI: +2 RAM, +15 Alert".to_string(),
                "You accepted the raw data stream. Your processing power surged, but the \
                 massive signal spike alerted every subsystem in the sector."
                    .to_string(),
            )
        }
        (EventKind::RogueAiSignal, 1) => {
            player.credits = (player.credits - 75).max(0);
            alert_change = -15;
            (
                "Signal Masked: -15 Alert, -75 Crypto".to_string(),
                "You spent heavy resources to scramble your digital footprint, confusing \
                 local scanners."
                    .to_string(),
            )
        }
        (EventKind::CorruptedDataBank, 0) => {
            let gain = (100.0 * (1.0 + floor as f64 * 0.1)).floor() as i32;
            player.gain_credits(gain);
            alert_change = 15;
            (
                format!("Siphoned Funds: +{gain} Crypto, +15 Alert"),
                "Greed is good. You drained the accounts, but the theft didn't go unnoticed."
                    .to_string(),
            )
        }
        (EventKind::CorruptedDataBank, 1) => {
            player.drain_power(3);
            alert_change = -20;
            (
                "System Purge: -20 Alert, -3 RAM".to_string(),
                "You actively hunted down and deleted your own logs from the corrupted \
                 server, frying some of your circuits in the process."
                    .to_string(),
            )
        }
        (EventKind::SecurityCheckpoint, 0) => {
            player.hp = (player.hp - 10).max(1);
            alert_change = -15;
            (
                "Console Destroyed: -15 Alert, -10 Integrity".to_string(),
                "Subtlety is overrated. You smashed the surveillance hub before it could \
                 broadcast, taking some feedback damage."
                    .to_string(),
            )
        }
        (EventKind::SecurityCheckpoint, 1) => {
            alert_change = 15;
            let def = rng.choose(&MODULE_CATALOG).expect("catalog is not empty");
            let installed = player.add_module(def.effect);
            let log = if installed {
                format!("Trojan Installed: Acquired {}, +15 Alert", def.name)
            } else {
                format!("Trojan Installed: {} already at capacity, +15 Alert", def.name)
            };
            (
                log,
                format!(
                    "You risked detection to inject a worm. It returned with a payload: {}.",
                    def.name
                ),
            )
        }
        // The trailing "walk away" branch of every scenario
        _ => (
            "Event Bypassed.".to_string(),
            "You chose not to interact with the anomaly, slipping away unseen.".to_string(),
        ),
    };

    player.apply_alert(alert_change);

    Some(EventOutcome {
        player,
        alert_change,
        log,
        narrative,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_protocols() {
        let mut rng = GameRng::new(1);
        let outcome =
            apply_event_choice(EventKind::RogueAiSignal, 0, PlayerStats::new(), 1, &mut rng)
                .unwrap();
        assert_eq!(outcome.player.power, 12);
        assert_eq!(outcome.player.security_alert, 15);
    }

    #[test]
    fn test_mask_signal_floors_credits() {
        let mut rng = GameRng::new(1);
        let mut player = PlayerStats::new();
        player.credits = 40;
        player.security_alert = 50;
        let outcome =
            apply_event_choice(EventKind::RogueAiSignal, 1, player, 1, &mut rng).unwrap();
        assert_eq!(outcome.player.credits, 0, "cost floored at zero");
        assert_eq!(outcome.player.security_alert, 35);
    }

    #[test]
    fn test_siphon_scales_with_floor() {
        let mut rng = GameRng::new(1);
        let outcome =
            apply_event_choice(EventKind::CorruptedDataBank, 0, PlayerStats::new(), 10, &mut rng)
                .unwrap();
        assert_eq!(outcome.player.credits, 200);
    }

    #[test]
    fn test_purge_respects_power_floor() {
        let mut rng = GameRng::new(1);
        let mut player = PlayerStats::new();
        player.power = 2;
        player.security_alert = 10;
        let outcome =
            apply_event_choice(EventKind::CorruptedDataBank, 1, player, 1, &mut rng).unwrap();
        assert_eq!(outcome.player.power, 1);
        assert_eq!(outcome.player.security_alert, 0, "alert clamped at zero");
    }

    #[test]
    fn test_smash_console_cannot_kill() {
        let mut rng = GameRng::new(1);
        let mut player = PlayerStats::new();
        player.hp = 5;
        let outcome =
            apply_event_choice(EventKind::SecurityCheckpoint, 0, player, 1, &mut rng).unwrap();
        assert_eq!(outcome.player.hp, 1);
    }

    #[test]
    fn test_trojan_grants_a_module() {
        let mut rng = GameRng::new(1);
        let outcome =
            apply_event_choice(EventKind::SecurityCheckpoint, 1, PlayerStats::new(), 1, &mut rng)
                .unwrap();
        assert_eq!(outcome.player.modules.len(), 1);
        assert_eq!(outcome.player.security_alert, 15);
    }

    #[test]
    fn test_walk_away_is_neutral() {
        let mut rng = GameRng::new(1);
        let before = PlayerStats::new();
        let outcome =
            apply_event_choice(EventKind::RogueAiSignal, 2, before.clone(), 1, &mut rng).unwrap();
        assert_eq!(outcome.player, before);
        assert_eq!(outcome.alert_change, 0);
    }

    #[test]
    fn test_out_of_range_choice_rejected() {
        let mut rng = GameRng::new(1);
        assert!(
            apply_event_choice(EventKind::RogueAiSignal, 3, PlayerStats::new(), 1, &mut rng)
                .is_none()
        );
    }

    #[test]
    fn test_every_scenario_has_two_or_three_choices() {
        use strum::IntoEnumIterator;
        for kind in EventKind::iter() {
            let n = kind.choices().len();
            assert!((2..=3).contains(&n));
        }
    }
}
