//! Planner configuration read from the environment
//!
//! Variables:
//!   PLANNER_STORE_PATH      JSON file mirroring the card store (default "cards.json")
//!   PLANNER_PERSIST_POLICY  "log" (default) or "fail"
//!   PLANNER_USER_ID         user whose cards are planned (default "default-user")
//!   PLANNER_CURRENCY        currency for new cards without one (default "RUB")

use std::env;
use std::path::PathBuf;

use crate::cards::DEFAULT_CURRENCY;
use crate::error::Result;
use crate::store::{PersistPolicy, DEFAULT_USER_ID};

/// Card store file used when PLANNER_STORE_PATH is unset
pub const DEFAULT_STORE_PATH: &str = "cards.json";

#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    pub store_path: PathBuf,
    pub persist_policy: PersistPolicy,
    pub user_id: String,
    pub currency: String,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            persist_policy: PersistPolicy::default(),
            user_id: DEFAULT_USER_ID.to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl PlannerConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup; unset or blank keys keep defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let persist_policy = match get("PLANNER_PERSIST_POLICY") {
            Some(value) => value.parse()?,
            None => defaults.persist_policy,
        };

        Ok(Self {
            store_path: get("PLANNER_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.store_path),
            persist_policy,
            user_id: get("PLANNER_USER_ID").unwrap_or(defaults.user_id),
            currency: get("PLANNER_CURRENCY")
                .map(|c| c.trim().to_uppercase())
                .unwrap_or(defaults.currency),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = PlannerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, PlannerConfig::default());
        assert_eq!(config.user_id, "default-user");
        assert_eq!(config.currency, "RUB");
        assert_eq!(config.store_path, PathBuf::from("cards.json"));
    }

    #[test]
    fn test_overrides() {
        let config = PlannerConfig::from_lookup(lookup(&[
            ("PLANNER_STORE_PATH", "/tmp/cards.json"),
            ("PLANNER_PERSIST_POLICY", "fail"),
            ("PLANNER_USER_ID", "alice"),
            ("PLANNER_CURRENCY", "usd"),
        ]))
        .unwrap();

        assert_eq!(config.store_path, PathBuf::from("/tmp/cards.json"));
        assert_eq!(config.persist_policy, PersistPolicy::FailRequest);
        assert_eq!(config.user_id, "alice");
        assert_eq!(config.currency, "USD");
    }

    #[test]
    fn test_blank_values_keep_defaults() {
        let config = PlannerConfig::from_lookup(lookup(&[("PLANNER_USER_ID", "  ")])).unwrap();
        assert_eq!(config.user_id, "default-user");
    }

    #[test]
    fn test_bad_policy_rejected() {
        assert!(PlannerConfig::from_lookup(lookup(&[("PLANNER_PERSIST_POLICY", "maybe")])).is_err());
    }
}
