//! The flow's view of its target plan.
//!
//! The store is authoritative, but bookkeeping writes may fail. When they do,
//! the session records a correction and applies it to its own copy of the
//! plan with [`Plan::force_status`]. Corrections are re-applied after every
//! refresh until the store agrees, so an item settled during this run is
//! never selected again.

use std::collections::BTreeMap;

use log::{debug, warn};

use crate::{
    error::FlowError,
    models::{ItemStatus, Plan},
    params::{MarkItem, PlanRef},
    planner::Planner,
};

pub(crate) struct Session {
    planner: Planner,
    plan_id: String,
    view: Plan,
    corrections: BTreeMap<usize, (ItemStatus, Option<String>)>,
}

impl Session {
    /// Loads the target plan.
    pub(crate) async fn open(planner: Planner, plan_id: &str) -> Result<Self, FlowError> {
        let mut view = planner
            .get_plan(&PlanRef::id(plan_id))
            .await
            .map_err(|e| {
                warn!("Plan {plan_id} could not be loaded: {e}");
                FlowError::PlanMissing {
                    id: plan_id.to_string(),
                }
            })?;
        view.normalize();

        Ok(Self {
            planner,
            plan_id: plan_id.to_string(),
            view,
            corrections: BTreeMap::new(),
        })
    }

    pub(crate) fn view(&self) -> &Plan {
        &self.view
    }

    /// Re-reads the plan from the store.
    ///
    /// Returns `false` once the plan no longer exists. Other store errors
    /// keep the cached view.
    pub(crate) async fn refresh(&mut self) -> bool {
        match self.planner.get_plan(&PlanRef::id(&self.plan_id)).await {
            Ok(plan) => {
                self.adopt(plan);
                true
            }
            Err(e) if e.is_missing_plan() => {
                warn!("Plan {} disappeared from the store: {e}", self.plan_id);
                false
            }
            Err(e) => {
                warn!("Refreshing plan {} failed, using cached view: {e}", self.plan_id);
                true
            }
        }
    }

    /// Records `status` (and optional notes) for one item.
    ///
    /// Never fails: if the store rejects the write the change is applied to
    /// the session's view instead.
    pub(crate) async fn mark(&mut self, index: usize, status: ItemStatus, notes: Option<String>) {
        let mut params = MarkItem::status(&self.plan_id, index, status);
        params.notes.clone_from(&notes);

        match self.planner.mark_item(&params).await {
            Ok((plan, _)) => {
                self.corrections.remove(&index);
                self.adopt(plan);
            }
            Err(e) => {
                warn!(
                    "Marking item {index} of plan {} as {status} failed, correcting in memory: {e}",
                    self.plan_id
                );
                if self.view.force_status(index, status, notes.as_deref()) {
                    self.corrections.insert(index, (status, notes));
                }
            }
        }
    }

    /// Rendered plan text, from the freshest state available.
    pub(crate) async fn plan_text(&mut self) -> String {
        if self.refresh().await {
            self.view.to_string()
        } else {
            format!("Error: plan {} not found", self.plan_id)
        }
    }

    fn adopt(&mut self, mut plan: Plan) {
        plan.normalize();
        self.view = plan;

        let view = &mut self.view;
        self.corrections.retain(|&index, (status, notes)| {
            if index >= view.items.len() {
                debug!("Dropping correction for item {index}, no longer in the plan");
                return false;
            }
            let agreed = view.status(index) == *status
                && notes.as_deref().map_or(true, |n| view.note(index) == n);
            if agreed {
                debug!("Store caught up with correction for item {index}");
            } else {
                view.force_status(index, *status, notes.as_deref());
            }
            !agreed
        });
    }
}
