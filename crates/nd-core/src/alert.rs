//! The Security Alert meter and its derived modifiers.
//!
//! A single 0-100 heat value gates four named network phases. Combat
//! difficulty, credit rewards, shop prices and healing all read the phase or
//! the raw value through the helpers here; nothing else interprets the
//! meter.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::consts::{ACTIVE_SWEEP_MAX, ALERT_MAX, ALERT_MIN, LOCKDOWN_MAX, STEALTH_MAX};

/// Network response phase, derived from the alert value.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum AlertPhase {
    /// [0, 30): first strike deals x1.7 damage
    Stealth,
    /// [30, 60): credit gains x1.3
    ActiveSweep,
    /// [60, 90): shop prices x1.25, rest healing x0.8
    Lockdown,
    /// [90, 100]: 25% Hunter ambush per action
    KillSwitch,
}

impl AlertPhase {
    /// Phase for an alert value.
    pub const fn of(alert: i32) -> Self {
        if alert < STEALTH_MAX {
            AlertPhase::Stealth
        } else if alert < ACTIVE_SWEEP_MAX {
            AlertPhase::ActiveSweep
        } else if alert < LOCKDOWN_MAX {
            AlertPhase::Lockdown
        } else {
            AlertPhase::KillSwitch
        }
    }

    /// Display label used by presentation layers.
    pub const fn label(&self) -> &'static str {
        match self {
            AlertPhase::Stealth => "STEALTH MODE",
            AlertPhase::ActiveSweep => "ACTIVE SWEEP",
            AlertPhase::Lockdown => "LOCKDOWN",
            AlertPhase::KillSwitch => "KILL SWITCH",
        }
    }
}

/// Clamp a raw alert value into the legal range.
pub const fn clamp_alert(value: i32) -> i32 {
    if value < ALERT_MIN {
        ALERT_MIN
    } else if value > ALERT_MAX {
        ALERT_MAX
    } else {
        value
    }
}

/// Enemy damage multiplier: +66% at full alert.
pub fn alert_multiplier(alert: i32) -> f64 {
    1.0 + alert as f64 / 150.0
}

/// Credit reward multiplier: +100% at full alert.
pub fn reward_multiplier(alert: i32) -> f64 {
    1.0 + alert as f64 / 100.0
}

/// Active Sweep credit bonus, 1.3 inside the phase and 1.0 outside.
pub fn sweep_credit_bonus(alert: i32) -> f64 {
    if AlertPhase::of(alert) == AlertPhase::ActiveSweep {
        1.3
    } else {
        1.0
    }
}

/// Lockdown shop markup, 1.25 inside the phase and 1.0 outside.
pub fn lockdown_price_multiplier(alert: i32) -> f64 {
    if AlertPhase::of(alert) == AlertPhase::Lockdown {
        1.25
    } else {
        1.0
    }
}

/// Lockdown healing throttle, 0.8 inside the phase and 1.0 outside.
pub fn lockdown_heal_multiplier(alert: i32) -> f64 {
    if AlertPhase::of(alert) == AlertPhase::Lockdown {
        0.8
    } else {
        1.0
    }
}
