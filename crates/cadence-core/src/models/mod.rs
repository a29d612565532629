//! Data models for plans and their items.
//!
//! Display implementations live in [`crate::display::models`] so the data
//! structures stay free of presentation logic.
//!
//! # Examples
//!
//! ```rust
//! use cadence_core::models::{Item, ItemKind, ItemStatus, Plan};
//!
//! let plan = Plan::new(
//!     "launch",
//!     "Product launch",
//!     vec![
//!         Item::new("Announce the release").with_tags(["#release"]),
//!         Item::new("Share the demo").with_media_prompt("A screenshot of the dashboard"),
//!     ],
//! )
//! .unwrap();
//!
//! assert_eq!(plan.status(0), ItemStatus::Draft);
//! assert_eq!(plan.items[1].kind(), ItemKind::Media);
//! assert_eq!(plan.next_active(), Some(0));
//! ```

pub mod item;
pub mod plan;
pub mod status;
pub mod summary;


pub use item::{Item, ItemKind};
pub use plan::Plan;
pub use status::ItemStatus;
pub use summary::PlanSummary;
