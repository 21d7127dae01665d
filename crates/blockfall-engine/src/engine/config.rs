use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::generator::PieceSeed;

/// Default fall period: one `tick` every 500 ms.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 500;

/// Game settings shared by every frontend.
///
/// The tick interval is a fixed period; it does not change with score.
///
/// Missing fields take their defaults when deserializing, so `{}` is a
/// valid configuration:
///
/// ```
/// use blockfall_engine::GameConfig;
///
/// let config: GameConfig = serde_json::from_str(r#"{"tick_interval_ms": 250}"#).unwrap();
/// assert_eq!(config.tick_interval_ms, 250);
/// assert_eq!(config.seed, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Milliseconds between two `tick` actions.
    pub tick_interval_ms: u64,
    /// Seed for the piece generator; random when absent.
    pub seed: Option<PieceSeed>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            seed: None,
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tick_interval() {
        assert_eq!(
            GameConfig::default().tick_interval(),
            Duration::from_millis(500)
        );
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: GameConfig =
            serde_json::from_str(r#"{"seed": "0000000000000000000000000000002a"}"#).unwrap();
        assert_eq!(config.tick_interval_ms, DEFAULT_TICK_INTERVAL_MS);
        assert_eq!(config.seed, Some(PieceSeed::from(42_u128)));
    }

    #[test]
    fn test_deserialize_rejects_unknown_fields() {
        assert!(serde_json::from_str::<GameConfig>(r#"{"level": 3}"#).is_err());
    }
}
