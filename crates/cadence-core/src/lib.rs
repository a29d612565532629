//! Core library for the Cadence plan execution engine.
//!
//! This crate keeps plans of ordered work items, drives each item through
//! its status lifecycle with pluggable executors, and renders the results.
//!
//! # Architecture
//!
//! - **Plan store** ([`store`], [`db`]): keyed plans with an active-plan
//!   pointer, in memory or in SQLite
//! - **Planner** ([`planner`]): async facade shared by every interface
//! - **Executors** ([`executor`]): run items; selected per item kind
//! - **Drafting** ([`drafting`]): turns a request into a plan and writes the
//!   closing summary
//! - **Flow** ([`flow`]): the execution loop tying the pieces together
//! - **Display** ([`display`]): human-readable rendering of plans and
//!   operation results
//!
//! # Quick Start
//!
//! ```rust
//! use cadence_core::{models::Item, params::{CreatePlan, MarkItem}, ItemStatus, PlannerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_database_path(Some("plans.db"))
//!     .build()
//!     .await?;
//!
//! let plan = planner
//!     .create_plan(&CreatePlan {
//!         id: "launch".to_string(),
//!         title: "Product launch".to_string(),
//!         items: vec![Item::new("Announce"), Item::new("Demo")],
//!     })
//!     .await?;
//! println!("{plan}");
//!
//! planner
//!     .mark_item(&MarkItem::status("launch", 0, ItemStatus::Completed))
//!     .await?;
//!
//! for summary in &planner.list_plans_summary().await? {
//!     println!("{}: {}/{}", summary.id, summary.completed_items, summary.total_items);
//! }
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod display;
pub mod drafting;
pub mod error;
pub mod executor;
pub mod flow;
pub mod models;
pub mod params;
pub mod planner;
pub mod store;

// Re-export commonly used types
pub use db::Database;
pub use display::{
    CreateResult, DeleteResult, LocalDateTime, OperationStatus, PlanSummaries, UpdateResult,
};
pub use drafting::{CommandDrafter, Drafter, PlanSpec};
pub use error::{DraftError, ExecutionError, FlowError, PlannerError, Result};
pub use executor::{CommandExecutor, Executor, ExecutorRegistry, ExecutorSelector};
pub use flow::{Flow, FlowBuilder, FlowState};
pub use models::{Item, ItemKind, ItemStatus, Plan, PlanSummary};
pub use params::{CreatePlan, Id, MarkItem, PlanRef, UpdatePlan};
pub use planner::{Planner, PlannerBuilder};
pub use store::{MemoryStore, PlanStore};
