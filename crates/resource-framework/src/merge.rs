//! # Merge Mode
//!
//! Controls how a caller-supplied update is projected onto a loaded entity.
//!
//! Identity and creation-audit fields are never part of an update, whatever the mode.
//! The mode only decides what an *absent* business field means:
//!
//! | Mode | Absent field |
//! |------|--------------|
//! | [`MergeMode::Replace`] | overwritten with the empty/default value |
//! | [`MergeMode::Patch`] | left as loaded |
//!
//! `Replace` is the default: callers resend the full desired state on every update.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeMode {
    #[default]
    Replace,
    Patch,
}

impl MergeMode {
    /// Resolves one optional field of an update against its loaded value.
    pub fn resolve<V: Default>(self, current: V, incoming: Option<V>) -> V {
        match (self, incoming) {
            (_, Some(value)) => value,
            (MergeMode::Replace, None) => V::default(),
            (MergeMode::Patch, None) => current,
        }
    }
}

impl fmt::Display for MergeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeMode::Replace => write!(f, "replace"),
            MergeMode::Patch => write!(f, "patch"),
        }
    }
}

impl FromStr for MergeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "replace" => Ok(MergeMode::Replace),
            "patch" => Ok(MergeMode::Patch),
            other => Err(format!("unknown merge mode '{other}' (expected 'replace' or 'patch')")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_overwrites_absent_fields_with_default() {
        let merged: Option<String> = MergeMode::Replace.resolve(Some("old".into()), None);
        assert_eq!(merged, None);
        assert_eq!(MergeMode::Replace.resolve(String::from("old"), None), "");
    }

    #[test]
    fn patch_keeps_absent_fields() {
        assert_eq!(MergeMode::Patch.resolve(String::from("old"), None), "old");
        assert_eq!(
            MergeMode::Patch.resolve(String::from("old"), Some("new".into())),
            "new"
        );
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(" Patch ".parse::<MergeMode>(), Ok(MergeMode::Patch));
        assert_eq!("REPLACE".parse::<MergeMode>(), Ok(MergeMode::Replace));
        assert!("delta".parse::<MergeMode>().is_err());
    }
}
