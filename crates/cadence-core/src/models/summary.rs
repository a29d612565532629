//! Plan summary types.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{ItemStatus, Plan};

/// Summary information about a plan with item statistics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanSummary {
    /// Plan ID
    pub id: String,
    /// Title of the plan
    pub title: String,
    /// Whether this is the store's active plan
    pub active: bool,
    /// Total number of items
    pub total_items: usize,
    /// Number of completed items
    pub completed_items: usize,
    /// Last update timestamp
    pub updated_at: Timestamp,
}

impl PlanSummary {
    /// Summarise a plan, flagging it as active or not.
    pub fn from_plan(plan: &Plan, active: bool) -> Self {
        Self {
            id: plan.id.clone(),
            title: plan.title.clone(),
            active,
            total_items: plan.items.len(),
            completed_items: plan.count(ItemStatus::Completed),
            updated_at: plan.updated_at,
        }
    }
}
