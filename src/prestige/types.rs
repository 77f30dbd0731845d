use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Permanent record of ascensions. Survives every reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrestigeRecord {
    pub times_ascended: u32,
    pub lifetime_tokens: u64,
    pub upgrades: BTreeSet<String>,
}

/// Summary of a completed ascension.
#[derive(Debug, Clone, PartialEq)]
pub struct AscensionReport {
    pub tokens_earned: u64,
    pub total_evidence_before: f64,
    pub times_ascended: u32,
    pub starting_evidence: f64,
}
