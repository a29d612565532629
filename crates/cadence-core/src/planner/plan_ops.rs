//! Plan operations for the Planner.

use super::Planner;
use crate::{
    error::Result,
    models::{Plan, PlanSummary},
    params::{CreatePlan, Id, MarkItem, PlanRef, UpdatePlan},
};

impl Planner {
    /// Creates a new plan and makes it the active plan.
    pub async fn create_plan(&self, params: &CreatePlan) -> Result<Plan> {
        let params = params.clone();
        self.with_store(move |store| store.create_plan(&params)).await
    }

    /// Replaces the title and/or items of an existing plan.
    ///
    /// Returns the updated plan together with a description of each change.
    pub async fn update_plan(&self, params: &UpdatePlan) -> Result<(Plan, Vec<String>)> {
        let params = params.clone();
        self.with_store(move |store| store.update_plan(&params)).await
    }

    /// Retrieves a plan by ID, or the active plan when no ID is given.
    pub async fn get_plan(&self, params: &PlanRef) -> Result<Plan> {
        let id = params.id.clone();
        self.with_store(move |store| store.get_plan(id.as_deref()))
            .await
    }

    /// Makes an existing plan the active plan.
    pub async fn set_active_plan(&self, params: &Id) -> Result<Plan> {
        let id = params.id.clone();
        self.with_store(move |store| store.set_active_plan(&id)).await
    }

    /// Sets the status and/or notes of a single item.
    pub async fn mark_item(&self, params: &MarkItem) -> Result<(Plan, usize)> {
        let params = params.clone();
        self.with_store(move |store| store.mark_item(&params)).await
    }

    /// Deletes a plan, returning it as it was before removal.
    pub async fn delete_plan(&self, params: &Id) -> Result<Plan> {
        let id = params.id.clone();
        self.with_store(move |store| store.delete_plan(&id)).await
    }

    /// Lists every plan in creation order.
    pub async fn list_plans(&self) -> Result<Vec<PlanSummary>> {
        self.with_store(|store| store.list_plans()).await
    }

    /// The active plan's ID, if any.
    pub async fn active_plan_id(&self) -> Result<Option<String>> {
        self.with_store(|store| store.active_plan_id()).await
    }
}
