//! Engine configuration.
//!
//! Loaded from TOML; any omitted field takes the `basic` preset's value.

use hotstuff_types::Address;
use hotstuff_validator::{ProposerPolicy, ValidatorSet};
use serde::{Deserialize, Serialize};

use crate::EngineError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Timeout of one consensus round, in milliseconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Minimum gap between the timestamps of consecutive blocks, in the
    /// header's time unit (seconds for the basic preset, milliseconds for
    /// the event-driven one).
    #[serde(default = "default_block_period")]
    pub block_period: u64,

    /// Proposer policy of the validator set the engine is given. The engine
    /// reads the policy from its [`ValidatorSet`], so build the set with
    /// [`Config::validator_set`].
    #[serde(default)]
    pub leader_policy: ProposerPolicy,

    /// Blocks between validator-set checkpoints.
    #[serde(default = "default_epoch")]
    pub epoch: u64,

    /// Skip the wall-clock timestamp check.
    #[serde(default)]
    pub test: bool,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_request_timeout() -> u64 {
    6000
}

fn default_block_period() -> u64 {
    3
}

fn default_epoch() -> u64 {
    30000
}

// ── Impl ───────────────────────────────────────────────────────────────

impl Config {
    /// Basic HotStuff: 6 s round timeout, 3 s blocks.
    pub fn basic() -> Self {
        Self {
            request_timeout: default_request_timeout(),
            block_period: default_block_period(),
            leader_policy: ProposerPolicy::RoundRobin,
            epoch: default_epoch(),
            test: false,
        }
    }

    /// Event-driven HotStuff: 4 s round timeout, 2000 ms blocks, no epochs.
    pub fn event_driven() -> Self {
        Self {
            request_timeout: 4000,
            block_period: 2000,
            leader_policy: ProposerPolicy::RoundRobin,
            epoch: 0,
            test: false,
        }
    }

    /// A validator set over `addresses` running this config's `leader_policy`.
    pub fn validator_set(&self, addresses: impl IntoIterator<Item = Address>) -> ValidatorSet {
        ValidatorSet::new(addresses, self.leader_policy)
    }

    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, EngineError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| EngineError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, EngineError> {
        toml::from_str(s).map_err(|e| EngineError::Config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("Config is always serializable to TOML")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::basic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets() {
        let basic = Config::basic();
        assert_eq!(basic.request_timeout, 6000);
        assert_eq!(basic.block_period, 3);
        assert_eq!(basic.epoch, 30000);
        assert!(!basic.test);

        let event = Config::event_driven();
        assert_eq!(event.request_timeout, 4000);
        assert_eq!(event.block_period, 2000);
        assert_eq!(event.epoch, 0);
        assert_eq!(event.leader_policy, ProposerPolicy::RoundRobin);
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = Config::event_driven();
        let parsed = Config::from_toml_str(&config.to_toml_string()).expect("should parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = Config::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config, Config::basic());
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            leader_policy = "sticky"
            test = true
        "#;
        let config = Config::from_toml_str(toml).expect("should parse");
        assert_eq!(config.leader_policy, ProposerPolicy::Sticky);
        assert!(config.test);
        assert_eq!(config.block_period, 3);
    }

    #[test]
    fn validator_set_follows_leader_policy() {
        let config = Config::from_toml_str("leader_policy = \"sticky\"").unwrap();
        let set = config.validator_set((1..=4).map(|i| Address::new([i; 20])));
        assert_eq!(set.policy(), ProposerPolicy::Sticky);
        assert_eq!(set.size(), 4);
    }

    #[test]
    fn unknown_policy_is_config_error() {
        let result = Config::from_toml_str("leader_policy = \"lottery\"");
        assert!(matches!(result, Err(EngineError::Config(_))));
    }

    #[test]
    fn missing_file_returns_config_error() {
        let result = Config::from_toml_file("/nonexistent/hotstuff.toml");
        assert!(matches!(result, Err(EngineError::Config(_))));
    }
}
