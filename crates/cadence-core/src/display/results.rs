//! Result wrapper types for displaying store operation outcomes.
//!
//! Every mutating store operation answers with the rendered plan, prefixed
//! by a one-line confirmation.

use std::fmt;

use crate::models::Plan;

/// Wrapper type for displaying the result of a create operation.
///
/// # Examples
///
/// ```rust
/// use cadence_core::{display::CreateResult, models::{Item, Plan}};
///
/// let plan = Plan::new("launch", "Product launch", vec![Item::new("Announce")]).unwrap();
/// let output = CreateResult::new(plan).to_string();
/// assert!(output.starts_with("Plan created successfully with ID: launch\n\n"));
/// assert!(output.contains("0. [ ] Content: Announce"));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    /// Create a new CreateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Plan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Plan created successfully with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of update operations.
///
/// Used for plan updates, item marks and activation; `headline` names the
/// operation and `changes` lists what was modified.
pub struct UpdateResult<T> {
    pub resource: T,
    pub headline: String,
    pub changes: Vec<String>,
}

impl UpdateResult<Plan> {
    /// Result of a plan update.
    pub fn updated(resource: Plan, changes: Vec<String>) -> Self {
        let headline = format!("Plan updated successfully: {}", resource.id);
        Self {
            resource,
            headline,
            changes,
        }
    }

    /// Result of marking one item.
    pub fn marked(resource: Plan, index: usize) -> Self {
        let headline = format!("Item {index} updated in plan '{}'.", resource.id);
        Self {
            resource,
            headline,
            changes: Vec::new(),
        }
    }

    /// Result of switching the active plan.
    pub fn activated(resource: Plan) -> Self {
        let headline = format!("Plan '{}' is now active.", resource.id);
        Self {
            resource,
            headline,
            changes: Vec::new(),
        }
    }
}

impl fmt::Display for UpdateResult<Plan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.headline)?;

        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of delete operations.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    /// Create a new DeleteResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<Plan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Plan '{}' has been deleted.", self.resource.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Item;

    fn plan() -> Plan {
        Plan::new("p", "Title", vec![Item::new("one"), Item::new("two")]).unwrap()
    }

    #[test]
    fn test_update_result_lists_changes() {
        let result = UpdateResult::updated(plan(), vec!["Title changed to 'Title'".to_string()]);
        let output = result.to_string();
        assert!(output.starts_with("Plan updated successfully: p\n"));
        assert!(output.contains("Changes made:\n- Title changed to 'Title'\n"));
        assert!(output.contains("Plan: Title (ID: p)"));
    }

    #[test]
    fn test_marked_and_activated_headlines() {
        assert!(UpdateResult::marked(plan(), 1)
            .to_string()
            .starts_with("Item 1 updated in plan 'p'.\n\nPlan: Title"));
        assert!(UpdateResult::activated(plan())
            .to_string()
            .starts_with("Plan 'p' is now active.\n"));
    }

    #[test]
    fn test_delete_result() {
        assert_eq!(
            DeleteResult::new(plan()).to_string(),
            "Plan 'p' has been deleted.\n"
        );
    }
}
