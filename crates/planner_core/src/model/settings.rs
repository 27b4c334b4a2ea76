//! User settings layered over the domain defaults.
//!
//! # Invariants
//! - Absent keys fall back to defaults field by field.
//! - Target overrides may be partial; each field falls back independently.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-metric target override. `None` keeps the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week_target: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_target: Option<u32>,
}

/// Resolved weekly/yearly targets for one metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Targets {
    pub week_target: u32,
    pub year_target: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Couples slot completion with task completion.
    pub mirror_done: bool,
    /// Re-adds missing seed tasks when the week is reset.
    pub auto_seed: bool,
    /// Custom zone labels keyed by zone id.
    pub zone_labels: BTreeMap<String, String>,
    pub metric_targets: BTreeMap<String, TargetOverride>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mirror_done: true,
            auto_seed: true,
            zone_labels: BTreeMap::new(),
            metric_targets: BTreeMap::new(),
        }
    }
}
