use std::env;
use std::time::Duration;

use crate::history::DEFAULT_HISTORY_LIMIT;
use crate::possession::SwitchPolicy;

/// Settings the session core needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub history_limit: usize,
    pub switch_policy: SwitchPolicy,
    /// When set, possession time only accrues while the game clock runs.
    pub possession_follows_clock: bool,
    pub home_name: String,
    pub away_name: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            switch_policy: SwitchPolicy::LastWriteWins,
            possession_follows_clock: false,
            home_name: "UC Davis".to_string(),
            away_name: "Opponent".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    pub tick: Duration,
    pub auto_switch_delay: Duration,
    pub history_limit: usize,
    pub home_name: String,
    pub away_name: String,
    pub cancel_pending_switch: bool,
    pub possession_follows_clock: bool,
    pub log_file: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        let session = SessionConfig::default();
        Self {
            tick: Duration::from_millis(1000),
            auto_switch_delay: Duration::from_millis(500),
            history_limit: session.history_limit,
            home_name: session.home_name,
            away_name: session.away_name,
            cancel_pending_switch: false,
            possession_follows_clock: false,
            log_file: "polo_terminal.log".to_string(),
        }
    }
}

impl TrackerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let tick_ms = parse_or(&lookup, "LIVE_TICK_MS", 1000u64).clamp(100, 10_000);
        let switch_ms = parse_or(&lookup, "LIVE_AUTO_SWITCH_MS", 500u64).min(10_000);
        let history_limit =
            parse_or(&lookup, "LIVE_HISTORY_LIMIT", defaults.history_limit).clamp(2, 1000);
        Self {
            tick: Duration::from_millis(tick_ms),
            auto_switch_delay: Duration::from_millis(switch_ms),
            history_limit,
            home_name: non_empty_or(&lookup, "LIVE_HOME_NAME", defaults.home_name),
            away_name: non_empty_or(&lookup, "LIVE_AWAY_NAME", defaults.away_name),
            cancel_pending_switch: flag(&lookup, "LIVE_CANCEL_PENDING_SWITCH"),
            possession_follows_clock: flag(&lookup, "LIVE_POSSESSION_FOLLOWS_CLOCK"),
            log_file: non_empty_or(&lookup, "LIVE_LOG_FILE", defaults.log_file),
        }
    }

    pub fn session(&self) -> SessionConfig {
        SessionConfig {
            history_limit: self.history_limit,
            switch_policy: if self.cancel_pending_switch {
                SwitchPolicy::CancelOnChange
            } else {
                SwitchPolicy::LastWriteWins
            },
            possession_follows_clock: self.possession_follows_clock,
            home_name: self.home_name.clone(),
            away_name: self.away_name.clone(),
        }
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    lookup(key)
        .and_then(|val| val.trim().parse::<T>().ok())
        .unwrap_or(default)
}

fn non_empty_or(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: String) -> String {
    lookup(key)
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
        .unwrap_or(default)
}

fn flag(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> bool {
    lookup(key)
        .map(|val| matches!(val.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> TrackerConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        TrackerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(config_from(&[]), TrackerConfig::default());
    }

    #[test]
    fn values_are_clamped_and_bad_values_ignored() {
        let cfg = config_from(&[
            ("LIVE_TICK_MS", "5"),
            ("LIVE_AUTO_SWITCH_MS", "oops"),
            ("LIVE_HISTORY_LIMIT", "1"),
            ("LIVE_HOME_NAME", "  "),
            ("LIVE_AWAY_NAME", "Stanford"),
            ("LIVE_CANCEL_PENDING_SWITCH", "TRUE"),
        ]);
        assert_eq!(cfg.tick, Duration::from_millis(100));
        assert_eq!(cfg.auto_switch_delay, Duration::from_millis(500));
        assert_eq!(cfg.history_limit, 2);
        assert_eq!(cfg.home_name, "UC Davis");
        assert_eq!(cfg.away_name, "Stanford");

        let session = cfg.session();
        assert_eq!(session.switch_policy, SwitchPolicy::CancelOnChange);
        assert!(!session.possession_follows_clock);
    }
}
