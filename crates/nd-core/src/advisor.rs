//! Tactical advisor boundary.
//!
//! The advisor is an external collaborator: it reads the current floor,
//! player, and card triple and returns free-form advice text. It has no
//! effect on game state, must never block an action, and a failed request
//! degrades to a fixed placeholder. [`AdvisorHandle`] adds the
//! single-flight latch that keeps one request outstanding at a time.

use thiserror::Error;

use crate::consts::FLOOR_CARDS;
use crate::player::PlayerStats;
use crate::room::RoomCardData;

/// Placeholder shown when the advisor cannot be reached.
pub const FALLBACK_ADVICE: &str = "Tactical mainframe offline. Unable to process neural link.";

#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("advisor link offline: {0}")]
    Offline(String),
    #[error("advisor request already in flight")]
    Busy,
}

/// An advice source. Implementations may call out to anything; the core
/// only consumes the resulting text.
pub trait Advisor {
    fn tactical_analysis(
        &mut self,
        floor: u32,
        player: &PlayerStats,
        cards: &[RoomCardData; FLOOR_CARDS],
    ) -> Result<String, AdvisorError>;
}

/// Wraps an [`Advisor`] with the duplicate-request guard and the fallback
/// mapping. Game state never depends on anything returned from here.
#[derive(Debug)]
pub struct AdvisorHandle<A> {
    inner: A,
    busy: bool,
}

impl<A: Advisor> AdvisorHandle<A> {
    pub fn new(inner: A) -> Self {
        Self { inner, busy: false }
    }

    /// Whether a request is outstanding.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Mark a request as in flight. Returns false if one already is; the
    /// caller must not issue a second request in that case.
    pub fn begin(&mut self) -> bool {
        if self.busy {
            return false;
        }
        self.busy = true;
        true
    }

    /// Settle the outstanding request, mapping failure to the fixed
    /// fallback text.
    pub fn complete(&mut self, result: Result<String, AdvisorError>) -> String {
        self.busy = false;
        result.unwrap_or_else(|_| FALLBACK_ADVICE.to_string())
    }

    /// Synchronous convenience path: guard, query, settle.
    ///
    /// Returns None when a request is already outstanding.
    pub fn request(
        &mut self,
        floor: u32,
        player: &PlayerStats,
        cards: &[RoomCardData; FLOOR_CARDS],
    ) -> Option<String> {
        if !self.begin() {
            return None;
        }
        let result = self.inner.tactical_analysis(floor, player, cards);
        Some(self.complete(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::GameRng;
    use crate::room::build_floor_cards;

    struct FailingAdvisor;

    impl Advisor for FailingAdvisor {
        fn tactical_analysis(
            &mut self,
            _floor: u32,
            _player: &PlayerStats,
            _cards: &[RoomCardData; FLOOR_CARDS],
        ) -> Result<String, AdvisorError> {
            Err(AdvisorError::Offline("link severed".to_string()))
        }
    }

    struct EchoAdvisor;

    impl Advisor for EchoAdvisor {
        fn tactical_analysis(
            &mut self,
            floor: u32,
            _player: &PlayerStats,
            _cards: &[RoomCardData; FLOOR_CARDS],
        ) -> Result<String, AdvisorError> {
            Ok(format!("floor {floor}: hold the line"))
        }
    }

    fn fixture() -> (PlayerStats, [RoomCardData; FLOOR_CARDS]) {
        let mut rng = GameRng::new(1);
        (PlayerStats::new(), build_floor_cards(1, 0, 0, None, &mut rng))
    }

    #[test]
    fn test_failure_maps_to_fallback() {
        let (player, cards) = fixture();
        let mut handle = AdvisorHandle::new(FailingAdvisor);
        let advice = handle.request(1, &player, &cards).unwrap();
        assert_eq!(advice, FALLBACK_ADVICE);
        assert!(!handle.is_busy(), "latch released after failure");
    }

    #[test]
    fn test_success_passes_through() {
        let (player, cards) = fixture();
        let mut handle = AdvisorHandle::new(EchoAdvisor);
        let advice = handle.request(3, &player, &cards).unwrap();
        assert!(advice.contains("floor 3"));
    }

    #[test]
    fn test_single_flight_latch() {
        let (player, cards) = fixture();
        let mut handle = AdvisorHandle::new(EchoAdvisor);
        assert!(handle.begin());
        assert!(!handle.begin(), "second begin refused while outstanding");
        assert!(handle.request(1, &player, &cards).is_none());
        handle.complete(Ok("done".to_string()));
        assert!(handle.request(1, &player, &cards).is_some());
    }
}
