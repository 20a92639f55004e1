//! Fixed structural constants for the run core.
//!
//! Balance knobs that a deployment might want to tweak live in
//! [`crate::tuning::Tuning`]; the values here define the shape of the game
//! rather than its difficulty.

/// Starting hull integrity
pub const INITIAL_HP: i32 = 100;
/// Starting processing power
pub const INITIAL_POWER: i32 = 10;
/// Starting firewall strength
pub const INITIAL_SHIELD: i32 = 0;
/// Starting credits
pub const INITIAL_CREDITS: i32 = 0;

/// Alert meter range
pub const ALERT_MIN: i32 = 0;
pub const ALERT_MAX: i32 = 100;

/// Alert phase boundaries (half-open ranges, upper bound exclusive)
pub const STEALTH_MAX: i32 = 30;
pub const ACTIVE_SWEEP_MAX: i32 = 60;
pub const LOCKDOWN_MAX: i32 = 90;

/// Number of selectable nodes per floor, and scout preview width
pub const FLOOR_CARDS: usize = 3;

/// Maximum copies of a single module
pub const MODULE_STACK_CAP: usize = 5;

/// Maximum concurrent contracts
pub const CONTRACT_CAP: usize = 2;

/// Floors without a boss kill before the accumulating boss risk kicks in
pub const BOSS_DROUGHT_FLOORS: u32 = 30;

/// Gameplay floor for power: effects that reduce power never take it below this
pub const POWER_FLOOR: i32 = 1;
