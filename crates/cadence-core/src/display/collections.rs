//! Collection wrapper types for displaying groups of plans.

use std::{fmt, ops::Index};

use crate::models::PlanSummary;

/// Newtype wrapper for displaying plan summaries in store insertion order.
///
/// # Examples
///
/// ```rust
/// use cadence_core::{display::PlanSummaries, models::PlanSummary};
/// use jiff::Timestamp;
///
/// let summary = PlanSummary {
///     id: "launch".to_string(),
///     title: "Product launch".to_string(),
///     active: true,
///     total_items: 4,
///     completed_items: 1,
///     updated_at: Timestamp::now(),
/// };
///
/// let output = PlanSummaries(vec![summary]).to_string();
/// assert!(output.starts_with("Available plans:\n"));
/// assert!(output.contains("launch (active): Product launch - 1/4 items completed"));
/// ```
pub struct PlanSummaries(pub Vec<PlanSummary>);

impl PlanSummaries {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of plan summaries in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get a reference to the plan summary at the given index.
    pub fn get(&self, index: usize) -> Option<&PlanSummary> {
        self.0.get(index)
    }

    /// Get an iterator over the plan summaries.
    pub fn iter(&self) -> std::slice::Iter<'_, PlanSummary> {
        self.0.iter()
    }

    /// The summary flagged as the store's active plan.
    pub fn active(&self) -> Option<&PlanSummary> {
        self.0.iter().find(|s| s.active)
    }
}

impl Index<usize> for PlanSummaries {
    type Output = PlanSummary;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for PlanSummaries {
    type Item = PlanSummary;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PlanSummaries {
    type Item = &'a PlanSummary;
    type IntoIter = std::slice::Iter<'a, PlanSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for PlanSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No plans available. Create a plan with the 'create' command.");
        }

        writeln!(f, "Available plans:")?;
        for summary in &self.0 {
            write!(f, "{summary}")?;
        }
        Ok(())
    }
}
