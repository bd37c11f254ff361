/*!
 * Session Report
 * Human-readable summary emitted when a tracking session stops
 */

use super::stats::Stats;
use crate::core::limits::{BASE_OVERHEAD_MB, VIEW_OVERHEAD_MB};
use crate::core::types::{Address, Category};
use serde::Serialize;
use std::fmt;

/// Final report for one session. `Display` renders the form written to
/// standard output at stop time.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub stats: Stats,
    /// Suggested `expected_usage_mb` for a future visualized run, estimated
    /// from the span of addresses the session saw. Present only when this
    /// run had visualization off and performed at least one allocation.
    pub suggested_budget_mb: Option<f32>,
}

impl Report {
    pub(super) fn new(
        stats: Stats,
        base_address: Address,
        highest_address: Address,
        view_enabled: bool,
    ) -> Self {
        let mut budget_mb =
            highest_address.saturating_sub(base_address) as f32 / 1_000_000.0 + BASE_OVERHEAD_MB;
        if !view_enabled {
            // The suggestion targets a visualized rerun, which costs extra.
            budget_mb += VIEW_OVERHEAD_MB;
        }
        let suggested_budget_mb = (!view_enabled && stats.alloc_count > 0).then_some(budget_mb);
        Self {
            stats,
            suggested_budget_mb,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "===================================================================";
        writeln!(f, "{rule}")?;
        writeln!(
            f,
            "allocations:   count={}\tbytes={}",
            self.stats.alloc_count, self.stats.alloc_bytes
        )?;
        writeln!(
            f,
            "reallocations: count={}\tdelta bytes={}",
            self.stats.realloc_count, self.stats.realloc_delta_bytes
        )?;
        writeln!(
            f,
            "frees:         count={}\tbytes={}",
            self.stats.free_count, self.stats.free_bytes
        )?;
        writeln!(f)?;
        writeln!(f, "allocations by category:")?;
        let by_category = Category::ALL
            .iter()
            .map(|c| format!("{}={}", c, self.stats.count_for(*c)))
            .collect::<Vec<_>>()
            .join(" | ");
        writeln!(f, "  {by_category}")?;
        writeln!(f)?;
        writeln!(f, "peak live usage: {} bytes", self.stats.peak_bytes)?;
        if let Some(mb) = self.suggested_budget_mb {
            writeln!(
                f,
                "suggested expected-usage parameter for a visualized run: {mb:.1} MB"
            )?;
        }
        write!(f, "{rule}")
    }
}
