//! Configuration for live highlighting.

use std::time::Duration;

use super::nearest::NearestPolicy;

/// Shortest allowed re-evaluation interval.
pub const MIN_TICK: Duration = Duration::from_secs(1);

/// Configuration for the highlight controller.
#[derive(Debug, Clone)]
pub struct HighlightConfig {
    /// How often the designated departure is re-evaluated while tracking.
    /// Departures are minute-grained, so anything tighter than a few seconds
    /// only adds churn.
    pub tick: Duration,

    /// Which departure counts as "next".
    pub policy: NearestPolicy,
}

impl HighlightConfig {
    /// Create a new configuration. The tick is clamped to at least one second.
    pub fn new(tick: Duration, policy: NearestPolicy) -> Self {
        Self {
            tick: tick.max(MIN_TICK),
            policy,
        }
    }

    /// Set the re-evaluation interval (clamped to at least one second).
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick.max(MIN_TICK);
        self
    }

    /// Set the nearest-departure policy.
    pub fn with_policy(mut self, policy: NearestPolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_secs(30),
            policy: NearestPolicy::NextUpcoming,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = HighlightConfig::default();
        assert_eq!(config.tick, Duration::from_secs(30));
        assert_eq!(config.policy, NearestPolicy::NextUpcoming);
    }

    #[test]
    fn builder() {
        let config = HighlightConfig::default()
            .with_tick(Duration::from_secs(1))
            .with_policy(NearestPolicy::AbsoluteClosest);

        assert_eq!(config.tick, Duration::from_secs(1));
        assert_eq!(config.policy, NearestPolicy::AbsoluteClosest);
    }

    #[test]
    fn tick_is_clamped() {
        let config = HighlightConfig::new(Duration::ZERO, NearestPolicy::NextUpcoming);
        assert_eq!(config.tick, MIN_TICK);

        let config = HighlightConfig::default().with_tick(Duration::from_millis(10));
        assert_eq!(config.tick, MIN_TICK);
    }
}
