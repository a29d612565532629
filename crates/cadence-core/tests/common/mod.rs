#![allow(dead_code)]

use cadence_core::{CreatePlan, Item, Planner, PlannerBuilder};
use tempfile::TempDir;

/// Helper function to create a test planner
pub async fn create_test_planner() -> (TempDir, Planner) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let planner = PlannerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create planner");
    (temp_dir, planner)
}

/// Create parameters for a plan with `n` plain text items.
pub fn text_plan(id: &str, n: usize) -> CreatePlan {
    CreatePlan {
        id: id.to_string(),
        title: format!("Plan {id}"),
        items: (0..n).map(|i| Item::new(format!("item {i}"))).collect(),
    }
}
