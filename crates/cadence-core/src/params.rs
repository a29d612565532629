//! Parameter structures for plan store operations.
//!
//! These structures are shared by every interface (CLI, MCP, the execution
//! flow) and carry no framework-specific derives beyond serde. Interface
//! layers wrap them with their own derives:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │   MCP Params    │    │  Core Params    │
//! │  (clap derives) │───▶│ (serde derives) │───▶│ (minimal deps)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! JSON schema generation is available behind the `schema` feature.
//!
//! Values that arrive from the outside world (item indices, status names)
//! are kept in their raw form here and validated by the store, so a bad
//! value surfaces as a typed store error rather than a parse failure.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::{Item, ItemStatus};

/// Parameters for operations requiring just a plan ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the plan to operate on
    pub id: String,
}

impl Id {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Parameters for operations that fall back to the active plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct PlanRef {
    /// Plan ID; the active plan is used when omitted
    #[serde(default)]
    pub id: Option<String>,
}

impl PlanRef {
    /// Refers to the plan with the given ID.
    pub fn id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
        }
    }

    /// Refers to whichever plan is active.
    pub fn active() -> Self {
        Self { id: None }
    }
}

/// Parameters for creating a new plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreatePlan {
    /// Unique identifier for the plan
    pub id: String,
    /// Title of the plan (required)
    pub title: String,
    /// Items in execution order (at least one)
    pub items: Vec<Item>,
}

/// Parameters for updating an existing plan.
///
/// Items that are unchanged at the same index keep their status and notes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdatePlan {
    /// ID of the plan to update
    pub id: String,
    /// New title
    #[serde(default)]
    pub title: Option<String>,
    /// Replacement item list
    #[serde(default)]
    pub items: Option<Vec<Item>>,
}

/// Parameters for setting the status and/or notes of one item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct MarkItem {
    /// Plan ID; the active plan is used when omitted
    #[serde(default)]
    pub plan_id: Option<String>,
    /// Index of the item to update (0-based)
    pub index: i64,
    /// Status to set: draft, ready, completed or failed
    #[serde(default)]
    pub status: Option<String>,
    /// Notes to record for the item
    #[serde(default)]
    pub notes: Option<String>,
}

impl MarkItem {
    /// Marks item `index` of plan `plan_id` with `status`.
    pub fn status(plan_id: impl Into<String>, index: usize, status: ItemStatus) -> Self {
        Self {
            plan_id: Some(plan_id.into()),
            index: i64::try_from(index).unwrap_or(i64::MAX),
            status: Some(status.as_str().to_string()),
            notes: None,
        }
    }

    /// Adds notes to the mark.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}
