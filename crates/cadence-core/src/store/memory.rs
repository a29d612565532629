//! In-process plan store.

use log::debug;

use super::{resolve_plan_id, PlanStore};
use crate::{
    error::{PlannerError, Result},
    models::{Plan, PlanSummary},
    params::{CreatePlan, MarkItem, UpdatePlan},
};

/// Plan store kept entirely in memory, ordered by creation.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    plans: Vec<Plan>,
    active: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.plans.iter().position(|p| p.id == id)
    }

    fn plan_mut(&mut self, id: &str) -> Result<&mut Plan> {
        self.plans
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| PlannerError::not_found(id))
    }
}

impl PlanStore for MemoryStore {
    fn create_plan(&mut self, params: &CreatePlan) -> Result<Plan> {
        if self.position(&params.id).is_some() {
            return Err(PlannerError::AlreadyExists {
                id: params.id.clone(),
            });
        }

        let plan = Plan::new(&params.id, &params.title, params.items.clone())?;
        debug!("Created plan {} with {} items", plan.id, plan.items.len());

        self.plans.push(plan.clone());
        self.active = Some(plan.id.clone());
        Ok(plan)
    }

    fn update_plan(&mut self, params: &UpdatePlan) -> Result<(Plan, Vec<String>)> {
        let plan = self.plan_mut(&params.id)?;
        let changes = plan.apply_update(params.title.as_deref(), params.items.clone())?;
        Ok((plan.clone(), changes))
    }

    fn get_plan(&self, id: Option<&str>) -> Result<Plan> {
        let id = resolve_plan_id(id, self.active.clone())?;
        let mut plan = self
            .plans
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| PlannerError::not_found(&id))?;
        plan.normalize();
        Ok(plan)
    }

    fn set_active_plan(&mut self, id: &str) -> Result<Plan> {
        let plan = self.get_plan(Some(id))?;
        self.active = Some(plan.id.clone());
        Ok(plan)
    }

    fn mark_item(&mut self, params: &MarkItem) -> Result<(Plan, usize)> {
        let id = resolve_plan_id(params.plan_id.as_deref(), self.active.clone())?;
        let plan = self.plan_mut(&id)?;
        let index = plan.apply_mark(params.index, params.status.as_deref(), params.notes.as_deref())?;
        Ok((plan.clone(), index))
    }

    fn delete_plan(&mut self, id: &str) -> Result<Plan> {
        let position = self.position(id).ok_or_else(|| PlannerError::not_found(id))?;
        let plan = self.plans.remove(position);

        if self.active.as_deref() == Some(id) {
            self.active = None;
        }
        Ok(plan)
    }

    fn list_plans(&self) -> Result<Vec<PlanSummary>> {
        Ok(self
            .plans
            .iter()
            .map(|p| PlanSummary::from_plan(p, self.active.as_deref() == Some(p.id.as_str())))
            .collect())
    }

    fn active_plan_id(&self) -> Result<Option<String>> {
        Ok(self.active.clone())
    }
}
