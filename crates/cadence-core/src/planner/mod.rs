//! Async facade over a [`PlanStore`].
//!
//! The [`Planner`] is the handle every interface (CLI, MCP server, execution
//! flow) uses to talk to plan state. Store backends are synchronous; the
//! planner serializes access through a mutex and runs each call on the
//! blocking thread pool.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Handlers     │    │   Operations    │    │   PlanStore     │
//! │ (plan_handlers) │───▶│   (plan_ops)    │───▶│ (memory/sqlite) │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!   Display wrappers       spawn_blocking         Plan state
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for [`Planner`] instances
//! - [`plan_ops`]: One async method per store operation
//! - [`plan_handlers`]: The same operations wrapped in display types
//!
//! # Examples
//!
//! ```rust
//! use cadence_core::{models::Item, params::{CreatePlan, PlanRef}, PlannerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new().in_memory().build().await?;
//!
//! planner
//!     .create_plan(&CreatePlan {
//!         id: "launch".to_string(),
//!         title: "Product launch".to_string(),
//!         items: vec![Item::new("Announce the release")],
//!     })
//!     .await?;
//!
//! let plan = planner.get_plan(&PlanRef::active()).await?;
//! assert_eq!(plan.id, "launch");
//! # Ok(())
//! # }
//! ```

use std::sync::{Arc, Mutex};

use tokio::task;

use crate::{
    error::{PlannerError, Result},
    store::PlanStore,
};

pub mod builder;
pub mod plan_handlers;
pub mod plan_ops;


pub use builder::PlannerBuilder;

/// Shared handle to a plan store.
///
/// Cloning is cheap; clones operate on the same store.
#[derive(Clone)]
pub struct Planner {
    store: Arc<Mutex<Box<dyn PlanStore>>>,
}

impl Planner {
    pub(crate) fn new(store: Box<dyn PlanStore>) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Runs `f` against the store on the blocking pool.
    pub(crate) async fn with_store<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut dyn PlanStore) -> Result<T> + Send + 'static,
    {
        let store = Arc::clone(&self.store);

        task::spawn_blocking(move || {
            let mut guard = store.lock().map_err(|_| PlannerError::Configuration {
                message: "Plan store lock poisoned".to_string(),
            })?;
            f(&mut **guard)
        })
        .await
        .map_err(|e| PlannerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}

impl std::fmt::Debug for Planner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Planner").finish_non_exhaustive()
    }
}
