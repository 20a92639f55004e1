//! Room type selection and encounter card generation.
//!
//! The selector is a stateless probabilistic classifier over (floor, alert,
//! floors-since-boss); the factory turns selected types into concrete cards
//! with flavor names, alert deltas, and a three-type scout preview of the
//! following floor.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::consts::{BOSS_DROUGHT_FLOORS, FLOOR_CARDS};
use crate::rng::GameRng;

/// Encounter node category.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum RoomType {
    Enemy,
    Elite,
    Boss,
    Treasure,
    Event,
    Rest,
    Merchant,
}

impl RoomType {
    pub const fn is_combat(&self) -> bool {
        matches!(self, RoomType::Enemy | RoomType::Elite | RoomType::Boss)
    }
}

/// Merchant sub-variant, deciding which modules are on the shelf.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum ShopType {
    Hardware,
    Software,
    General,
}

/// One selectable encounter node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomCardData {
    pub room: RoomType,
    pub name: String,
    pub description: String,
    /// Informational difficulty indicator for presentation layers
    pub difficulty_scale: f64,
    /// Signed alert delta applied when this node is chosen
    pub alert_penalty: i32,
    /// Present on Merchant cards only
    pub shop_type: Option<ShopType>,
    /// Types of the next floor's triple if this node is chosen
    pub next_scout_info: [RoomType; FLOOR_CARDS],
}

const ENEMY_NAMES: &[&str] = &[
    "Security Drone",
    "Script Kiddie",
    "Data Leech",
    "Firewall Sentinel",
    "Cyber-Rat",
];
const ELITE_NAMES: &[&str] = &["Black Ice", "Corp Assassin", "Mech-Enforcer", "Netrunner Phantom"];
const BOSS_NAMES: &[&str] = &["Mainframe Core", "Project 2501", "CEO Avatar", "The Architect"];
const TREASURE_NAMES: &[&str] =
    &["Encrypted Cache", "Bitcoin Wallet", "Abandon Server", "Hardware Drop"];
const REST_NAMES: &[&str] = &["Safe House", "VPN Tunnel", "Repair Node", "Offline Shelter"];
const EVENT_NAMES: &[&str] = &[
    "Glitch Storm",
    "Rogue AI Contact",
    "Corrupted Sector",
    "Data Surge",
    "Mysterious Signal",
];
const MERCHANT_NAMES: &[&str] = &["Black Market", "Rogue Dealer", "Darknet Node", "Fence"];

fn name_table(room: RoomType) -> &'static [&'static str] {
    match room {
        RoomType::Enemy => ENEMY_NAMES,
        RoomType::Elite => ELITE_NAMES,
        RoomType::Boss => BOSS_NAMES,
        RoomType::Treasure => TREASURE_NAMES,
        RoomType::Rest => REST_NAMES,
        RoomType::Event => EVENT_NAMES,
        RoomType::Merchant => MERCHANT_NAMES,
    }
}

/// Alert deltas for combat nodes; fighting is the primary way to cool down.
const ENEMY_ALERT: i32 = -7;
const ELITE_ALERT: i32 = -13;
const BOSS_ALERT: i32 = -30;

/// Pick the category of one encounter node.
///
/// Rules are evaluated in strict priority order; later rules are only
/// reached when earlier ones miss.
pub fn select_room_type(floor: u32, alert: i32, last_boss_floor: u32, rng: &mut GameRng) -> RoomType {
    // 1. Accumulating boss risk: the longer the player dodges a boss, the
    //    more certain one becomes, accelerated by heat.
    let since_boss = floor.saturating_sub(last_boss_floor);
    if since_boss > BOSS_DROUGHT_FLOORS {
        let chance =
            (since_boss - BOSS_DROUGHT_FLOORS) as f64 * 5.0 + alert as f64 * 0.5;
        if rng.uniform() * 100.0 < chance {
            return RoomType::Boss;
        }
    }

    // 2. Early boss opportunity
    if floor > 5 && rng.chance(0.015) {
        return RoomType::Boss;
    }

    // 3. High heat skews loot toward riskier, richer categories
    if alert > 20 && rng.chance(alert as f64 / 500.0) {
        return if rng.chance(0.6) {
            RoomType::Elite
        } else {
            RoomType::Treasure
        };
    }

    // 4. Standard distribution, cumulative boundaries over one draw
    let u = rng.uniform();
    if u < 0.40 {
        RoomType::Enemy
    } else if u < 0.55 {
        RoomType::Event
    } else if u < 0.65 {
        RoomType::Treasure
    } else if u < 0.75 {
        RoomType::Rest
    } else if u < 0.85 {
        RoomType::Merchant
    } else if u < 0.95 {
        RoomType::Elite
    } else {
        RoomType::Enemy
    }
}

/// Scout preview: the types the *next* floor's triple would hold.
///
/// Evaluated with the current alert and boss history rather than the values
/// that will actually hold on arrival; a forward simulation hint, not a
/// lookahead lock.
fn scout_preview(
    floor: u32,
    alert: i32,
    last_boss_floor: u32,
    rng: &mut GameRng,
) -> [RoomType; FLOOR_CARDS] {
    [
        select_room_type(floor + 1, alert, last_boss_floor, rng),
        select_room_type(floor + 1, alert, last_boss_floor, rng),
        select_room_type(floor + 1, alert, last_boss_floor, rng),
    ]
}

/// Build the three selectable cards for a floor.
///
/// `forced` carries a prior scout's types; when present they are used
/// verbatim, which is what keeps scouting truthful.
pub fn build_floor_cards(
    floor: u32,
    alert: i32,
    last_boss_floor: u32,
    forced: Option<[RoomType; FLOOR_CARDS]>,
    rng: &mut GameRng,
) -> [RoomCardData; FLOOR_CARDS] {
    let types = forced.unwrap_or_else(|| {
        [
            select_room_type(floor, alert, last_boss_floor, rng),
            select_room_type(floor, alert, last_boss_floor, rng),
            select_room_type(floor, alert, last_boss_floor, rng),
        ]
    });

    types.map(|room| build_card(room, floor, alert, last_boss_floor, rng))
}

fn build_card(
    room: RoomType,
    floor: u32,
    alert: i32,
    last_boss_floor: u32,
    rng: &mut GameRng,
) -> RoomCardData {
    let mut name = (*rng.choose(name_table(room)).expect("name tables are non-empty")).to_string();
    let mut shop_type = None;

    let (description, alert_penalty) = match room {
        RoomType::Treasure => ("Valuable resources. Risk: Increases Alert Level.".to_string(), 5),
        RoomType::Rest => {
            if rng.chance(0.3) {
                name = "System Reboot Node".to_string();
                (
                    "Complete system restore (100% HP). Risk: Massive Alert Increase (+15)."
                        .to_string(),
                    15,
                )
            } else {
                ("Network quiet zone. Repairs Integrity (40%).".to_string(), 0)
            }
        }
        RoomType::Event => ("Unpredictable interaction. Choose your approach.".to_string(), 0),
        RoomType::Merchant => {
            let (variant, shop_name, text) = match rng.rn2(3) {
                0 => (ShopType::Hardware, "Hardware Outpost", "Defensive upgrades and core systems."),
                1 => (ShopType::Software, "Software Den", "Utility scripts and offensive protocols."),
                _ => (ShopType::General, "Black Market", "Anything and everything. For a price."),
            };
            shop_type = Some(variant);
            name = shop_name.to_string();
            (text.to_string(), 5)
        }
        RoomType::Boss => ("EXTREME DANGER.".to_string(), BOSS_ALERT),
        RoomType::Elite => ("Hostile entity. Combat lowers Alert Level.".to_string(), ELITE_ALERT),
        RoomType::Enemy => ("Hostile entity. Combat lowers Alert Level.".to_string(), ENEMY_ALERT),
    };

    RoomCardData {
        room,
        name,
        description,
        difficulty_scale: 1.0 + floor as f64 * 0.03,
        alert_penalty,
        shop_type,
        next_scout_info: scout_preview(floor, alert, last_boss_floor, rng),
    }
}

/// Rewrite a chosen card into the Kill-Switch Hunter ambush, preserving its
/// scouted path.
pub fn apply_hunter_override(card: &mut RoomCardData) {
    card.room = RoomType::Boss;
    card.name = "HUNTER KILLER".to_string();
    card.description = "SYSTEM COUNTERMEASURE DEPLOYED. RUNTIME INTERRUPTED.".to_string();
    card.alert_penalty = -20;
    card.shop_type = None;
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_selector_stays_in_domain() {
        let mut rng = GameRng::new(42);
        for floor in 1..200 {
            for alert in [0, 25, 50, 75, 100] {
                let room = select_room_type(floor, alert, 0, &mut rng);
                assert!(RoomType::iter().any(|t| t == room));
            }
        }
    }

    #[test]
    fn test_boss_guaranteed_after_long_drought() {
        // since_boss = 51 gives (51-30)*5 = 105 > 100: rule 1 always fires
        let mut rng = GameRng::new(7);
        for _ in 0..50 {
            assert_eq!(select_room_type(51, 0, 0, &mut rng), RoomType::Boss);
        }
    }

    #[test]
    fn test_boss_rate_monotonic_in_drought() {
        let sample = |gap: u32| {
            let mut rng = GameRng::new(123);
            let mut bosses = 0;
            for _ in 0..4000 {
                if select_room_type(gap, 0, 0, &mut rng) == RoomType::Boss {
                    bosses += 1;
                }
            }
            bosses
        };
        let short = sample(33);
        let long = sample(45);
        assert!(long > short, "boss odds must grow with the drought: {short} vs {long}");
    }

    #[test]
    fn test_forced_types_used_verbatim() {
        let mut rng = GameRng::new(9);
        let forced = [RoomType::Rest, RoomType::Merchant, RoomType::Boss];
        let cards = build_floor_cards(10, 0, 0, Some(forced), &mut rng);
        for (card, expected) in cards.iter().zip(forced) {
            assert_eq!(card.room, expected);
        }
    }

    #[test]
    fn test_card_alert_penalties() {
        let mut rng = GameRng::new(11);
        let cards = build_floor_cards(
            4,
            0,
            0,
            Some([RoomType::Enemy, RoomType::Elite, RoomType::Boss]),
            &mut rng,
        );
        assert_eq!(cards[0].alert_penalty, -7);
        assert_eq!(cards[1].alert_penalty, -13);
        assert_eq!(cards[2].alert_penalty, -30);
    }

    #[test]
    fn test_merchant_card_has_shop_type() {
        let mut rng = GameRng::new(13);
        let cards = build_floor_cards(
            2,
            0,
            0,
            Some([RoomType::Merchant, RoomType::Merchant, RoomType::Merchant]),
            &mut rng,
        );
        for card in &cards {
            assert!(card.shop_type.is_some());
            assert_eq!(card.alert_penalty, 5);
        }
    }

    #[test]
    fn test_scout_preview_always_three_wide() {
        let mut rng = GameRng::new(17);
        let cards = build_floor_cards(1, 0, 0, None, &mut rng);
        for card in &cards {
            assert_eq!(card.next_scout_info.len(), FLOOR_CARDS);
        }
    }

    #[test]
    fn test_hunter_override_keeps_scout_path() {
        let mut rng = GameRng::new(19);
        let mut card = build_floor_cards(3, 0, 0, Some([RoomType::Rest; 3]), &mut rng)[0].clone();
        let scouted = card.next_scout_info;
        apply_hunter_override(&mut card);
        assert_eq!(card.room, RoomType::Boss);
        assert_eq!(card.alert_penalty, -20);
        assert_eq!(card.next_scout_info, scouted);
    }
}
