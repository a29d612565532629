//! Item status enumeration.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a plan item.
///
/// `Draft` and `Ready` form the active subset: items the flow still has to
/// run. `Completed` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    /// Item has not been picked up yet
    #[default]
    Draft,

    /// Item has been selected and is about to run
    Ready,

    /// Item ran successfully
    Completed,

    /// Item's executor reported an error
    Failed,
}

impl FromStr for ItemStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(ItemStatus::Draft),
            "ready" => Ok(ItemStatus::Ready),
            "completed" => Ok(ItemStatus::Completed),
            "failed" => Ok(ItemStatus::Failed),
            _ => Err(format!(
                "Invalid item status: {s}. Valid statuses are: {}",
                ItemStatus::ALL
                    .iter()
                    .map(ItemStatus::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
        }
    }
}

impl ItemStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [ItemStatus; 4] = [
        ItemStatus::Draft,
        ItemStatus::Ready,
        ItemStatus::Completed,
        ItemStatus::Failed,
    ];

    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Draft => "draft",
            ItemStatus::Ready => "ready",
            ItemStatus::Completed => "completed",
            ItemStatus::Failed => "failed",
        }
    }

    /// Whether the item still awaits execution.
    pub fn is_active(&self) -> bool {
        matches!(self, ItemStatus::Draft | ItemStatus::Ready)
    }

    /// Bracketed marker used in rendered plans.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cadence_core::models::ItemStatus;
    ///
    /// assert_eq!(ItemStatus::Completed.mark(), "[✓]");
    /// assert_eq!(ItemStatus::Ready.mark(), "[→]");
    /// assert_eq!(ItemStatus::Failed.mark(), "[!]");
    /// assert_eq!(ItemStatus::Draft.mark(), "[ ]");
    /// ```
    pub fn mark(&self) -> &'static str {
        match self {
            ItemStatus::Completed => "[✓]",
            ItemStatus::Ready => "[→]",
            ItemStatus::Failed => "[!]",
            ItemStatus::Draft => "[ ]",
        }
    }
}
