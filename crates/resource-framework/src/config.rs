//! # Service Configuration
//!
//! Values threaded into a [`LifecycleService`](crate::service::LifecycleService) at
//! construction time. Nothing here is global: the system identity used for audit
//! stamping is plain configuration.

use crate::merge::MergeMode;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Acting identity recorded when no authenticated caller exists.
    pub system_actor: String,
    pub merge_mode: MergeMode,
    /// Channel capacity of the in-memory store actor.
    pub store_buffer: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            system_actor: "system".to_string(),
            merge_mode: MergeMode::Replace,
            store_buffer: 32,
        }
    }
}

impl ServiceConfig {
    /// Reads `<PREFIX>_SYSTEM_ACTOR`, `<PREFIX>_MERGE_MODE` and `<PREFIX>_STORE_BUFFER`,
    /// keeping the default for any variable that is unset.
    pub fn from_env(prefix: &str) -> Result<Self, ConfigError> {
        Self::from_lookup(prefix, |key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup(
        prefix: &str,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let key = format!("{prefix}_SYSTEM_ACTOR");
        if let Some(actor) = lookup(&key) {
            let actor = actor.trim();
            if actor.is_empty() {
                return Err(ConfigError::Invalid {
                    key,
                    reason: "must not be blank".into(),
                });
            }
            config.system_actor = actor.to_string();
        }

        let key = format!("{prefix}_MERGE_MODE");
        if let Some(mode) = lookup(&key) {
            config.merge_mode = mode
                .parse()
                .map_err(|reason| ConfigError::Invalid { key, reason })?;
        }

        let key = format!("{prefix}_STORE_BUFFER");
        if let Some(buffer) = lookup(&key) {
            config.store_buffer = match buffer.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        key,
                        reason: format!("expected a positive integer, got '{buffer}'"),
                    })
                }
            };
        }

        Ok(config)
    }
}
