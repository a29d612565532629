//! Plan handler operations that return formatted wrapper types for the Planner.
//!
//! The CLI and the MCP server render these results directly, so both
//! interfaces produce identical text for the same operation.

use super::Planner;
use crate::{
    display::{CreateResult, DeleteResult, PlanSummaries, UpdateResult},
    error::Result,
    models::Plan,
    params::{CreatePlan, Id, MarkItem, UpdatePlan},
};

impl Planner {
    /// Handle listing plans.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use cadence_core::PlannerBuilder;
    /// # async {
    /// let planner = PlannerBuilder::new().build().await?;
    /// let summaries = planner.list_plans_summary().await?;
    /// println!("{summaries}");
    /// # Result::<(), cadence_core::PlannerError>::Ok(())
    /// # };
    /// ```
    pub async fn list_plans_summary(&self) -> Result<PlanSummaries> {
        Ok(PlanSummaries(self.list_plans().await?))
    }

    /// Handle creating a new plan.
    pub async fn create_plan_result(&self, params: &CreatePlan) -> Result<CreateResult<Plan>> {
        Ok(CreateResult::new(self.create_plan(params).await?))
    }

    /// Handle updating a plan, listing the changes that were made.
    pub async fn update_plan_result(&self, params: &UpdatePlan) -> Result<UpdateResult<Plan>> {
        let (plan, changes) = self.update_plan(params).await?;
        Ok(UpdateResult::updated(plan, changes))
    }

    /// Handle marking a single item.
    pub async fn mark_item_result(&self, params: &MarkItem) -> Result<UpdateResult<Plan>> {
        let (plan, index) = self.mark_item(params).await?;
        Ok(UpdateResult::marked(plan, index))
    }

    /// Handle switching the active plan.
    pub async fn set_active_plan_result(&self, params: &Id) -> Result<UpdateResult<Plan>> {
        Ok(UpdateResult::activated(self.set_active_plan(params).await?))
    }

    /// Handle deleting a plan.
    pub async fn delete_plan_result(&self, params: &Id) -> Result<DeleteResult<Plan>> {
        Ok(DeleteResult::new(self.delete_plan(params).await?))
    }
}
