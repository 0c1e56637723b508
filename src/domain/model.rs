use serde::{Deserialize, Serialize};

/// One row of the unique-parent-organization target list (`search_these.csv`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetRecord {
    pub parent_organization: String,
    pub contract_name: String,
    pub organization_marketing_name: String,
}

/// A prepared SERP lookup: the raw subject, the query built from the
/// template, and the sanitized file name the response will be saved under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchJob {
    pub subject: String,
    pub query: String,
    pub file_name: String,
}

/// Tally of what happened during a search run. Per-subject failures do not
/// abort the run, so the summary carries all three counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    pub written: usize,
    pub skipped: usize,
    pub failed: usize,
}
