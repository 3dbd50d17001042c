//! Game configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::autosolve::CandidatePolicy;

/// Default pause between auto-solve moves.
pub const DEFAULT_AUTO_SOLVE_DELAY: Duration = Duration::from_millis(100);

/// Settings for one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KlondikeConfig {
    /// Shuffle seed. `None` draws a fresh seed from entropy.
    pub seed: Option<u64>,

    /// Which tableau cards the auto-solver considers.
    pub candidate_policy: CandidatePolicy,

    /// Pause the playback driver takes after each auto-solve move.
    pub auto_solve_delay: Duration,

    /// Open an auto-solve session as soon as the board becomes
    /// auto-completable.
    pub auto_trigger: bool,
}

impl Default for KlondikeConfig {
    fn default() -> Self {
        Self {
            seed: None,
            candidate_policy: CandidatePolicy::default(),
            auto_solve_delay: DEFAULT_AUTO_SOLVE_DELAY,
            auto_trigger: true,
        }
    }
}

impl KlondikeConfig {
    /// Use a fixed shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_candidate_policy(mut self, policy: CandidatePolicy) -> Self {
        self.candidate_policy = policy;
        self
    }

    #[must_use]
    pub fn with_auto_solve_delay(mut self, delay: Duration) -> Self {
        self.auto_solve_delay = delay;
        self
    }

    #[must_use]
    pub fn with_auto_trigger(mut self, enabled: bool) -> Self {
        self.auto_trigger = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = KlondikeConfig::default();
        assert_eq!(config.seed, None);
        assert_eq!(config.candidate_policy, CandidatePolicy::TopOnly);
        assert_eq!(config.auto_solve_delay, Duration::from_millis(100));
        assert!(config.auto_trigger);
    }

    #[test]
    fn test_builder_pattern() {
        let config = KlondikeConfig::default()
            .with_seed(123)
            .with_candidate_policy(CandidatePolicy::AllResident)
            .with_auto_solve_delay(Duration::ZERO)
            .with_auto_trigger(false);

        assert_eq!(config.seed, Some(123));
        assert_eq!(config.candidate_policy, CandidatePolicy::AllResident);
        assert_eq!(config.auto_solve_delay, Duration::ZERO);
        assert!(!config.auto_trigger);
    }

    #[test]
    fn test_serialization() {
        let config = KlondikeConfig::default().with_seed(7);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: KlondikeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
