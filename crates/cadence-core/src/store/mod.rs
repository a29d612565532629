//! The plan store interface and its in-process backend.
//!
//! A [`PlanStore`] owns every plan keyed by ID plus an optional pointer to
//! the active plan. It is the only reader and writer of plan state; callers
//! never see the underlying collection.
//!
//! Backends:
//!
//! - [`MemoryStore`]: insertion-ordered, process-local
//! - [`crate::db::Database`]: SQLite-backed, persistent
//!
//! Both delegate validation and mutation rules to [`crate::models::Plan`].

use crate::{
    error::Result,
    models::{Plan, PlanSummary},
    params::{CreatePlan, MarkItem, UpdatePlan},
};

pub mod memory;

pub use memory::MemoryStore;

/// Keyed collection of plans with an active-plan pointer.
///
/// Invariants every implementation upholds:
///
/// - `len(statuses) == len(items) == len(notes)` for every returned plan
/// - the active pointer, when set, names an existing plan
/// - `list_plans` returns plans in creation order
pub trait PlanStore: Send {
    /// Creates a plan and makes it active.
    ///
    /// # Errors
    ///
    /// `AlreadyExists` when the ID is taken (the existing plan is left
    /// untouched), `InvalidInput` for an empty title or item list.
    fn create_plan(&mut self, params: &CreatePlan) -> Result<Plan>;

    /// Replaces the title and/or items of a plan.
    ///
    /// Returns the updated plan and a list of human-readable changes.
    ///
    /// # Errors
    ///
    /// `NotFound` when the plan does not exist.
    fn update_plan(&mut self, params: &UpdatePlan) -> Result<(Plan, Vec<String>)>;

    /// Fetches a plan, falling back to the active plan when `id` is `None`.
    ///
    /// # Errors
    ///
    /// `NoActivePlan` when no ID is given and none is active, `NotFound`
    /// when the plan does not exist.
    fn get_plan(&self, id: Option<&str>) -> Result<Plan>;

    /// Points the active pointer at an existing plan.
    ///
    /// # Errors
    ///
    /// `NotFound` when the plan does not exist.
    fn set_active_plan(&mut self, id: &str) -> Result<Plan>;

    /// Sets the status and/or notes of one item.
    ///
    /// Returns the updated plan and the validated item index.
    ///
    /// # Errors
    ///
    /// Plan resolution errors as for [`PlanStore::get_plan`],
    /// `IndexOutOfRange` and `InvalidInput` for an unknown status.
    fn mark_item(&mut self, params: &MarkItem) -> Result<(Plan, usize)>;

    /// Removes a plan, clearing the active pointer if it named this plan.
    ///
    /// # Errors
    ///
    /// `NotFound` when the plan does not exist.
    fn delete_plan(&mut self, id: &str) -> Result<Plan>;

    /// Summaries of every plan in creation order.
    fn list_plans(&self) -> Result<Vec<PlanSummary>>;

    /// The active plan's ID, if any.
    fn active_plan_id(&self) -> Result<Option<String>>;
}

/// Resolves an optional plan ID against the active pointer.
pub(crate) fn resolve_plan_id(id: Option<&str>, active: Option<String>) -> Result<String> {
    match id {
        Some(id) => Ok(id.to_string()),
        None => active.ok_or(crate::error::PlannerError::NoActivePlan),
    }
}
