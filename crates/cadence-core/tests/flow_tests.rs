#![cfg(unix)]

mod common;

use std::{sync::Arc, time::Duration};

use cadence_core::{
    CommandDrafter, CommandExecutor, ExecutorRegistry, Flow, ItemStatus, MarkItem, PlanRef,
};
use common::{create_test_planner, text_plan};

#[tokio::test]
async fn test_command_executors_over_sqlite() {
    let (_temp_dir, planner) = create_test_planner().await;
    planner.create_plan(&text_plan("nightly", 3)).await.unwrap();
    planner
        .mark_item(&MarkItem::status("nightly", 0, ItemStatus::Completed))
        .await
        .unwrap();

    // Fails on the item whose prompt mentions "item 2".
    let registry = ExecutorRegistry::new().with(
        "text",
        Arc::new(CommandExecutor::new(
            "shell",
            "if grep -q 'Content: \"item 2\"'; then echo 'disk full' >&2; exit 1; else echo ok; fi",
        )),
    );

    let output = Flow::builder(planner.clone(), registry)
        .plan_id("nightly")
        .build()
        .execute("")
        .await;

    let plan = planner.get_plan(&PlanRef::id("nightly")).await.unwrap();
    assert_eq!(
        plan.statuses,
        vec![ItemStatus::Completed, ItemStatus::Completed, ItemStatus::Failed]
    );
    assert!(plan.note(2).starts_with("Error: command exited with"));
    assert!(plan.note(2).contains("disk full"));
    assert!(output.starts_with("ok\nError executing item 2:"));
    assert!(output.ends_with("Plan completed:\n\nok"));
}

#[tokio::test]
async fn test_command_drafter_builds_the_plan() {
    let (_temp_dir, planner) = create_test_planner().await;

    let drafter = CommandDrafter::new(
        r#"if grep -q '"task":"draft"'; then echo '{"title": "Drafted", "items": [{"content": "one"}, {"content": "two", "media_prompt": "a chart"}]}'; else echo 'All done.'; fi"#,
    );
    let registry = ExecutorRegistry::new()
        .with("text", Arc::new(CommandExecutor::new("writer", "echo written")))
        .with("media", Arc::new(CommandExecutor::new("artist", "echo drawn")));

    let output = Flow::builder(planner.clone(), registry)
        .plan_id("drafted")
        .drafter(Arc::new(drafter))
        .executor_timeout(Duration::from_secs(10))
        .build()
        .execute("Report on the quarter")
        .await;

    assert_eq!(output, "written\ndrawn\nPlan completed:\n\nAll done.");
    let plan = planner.get_plan(&PlanRef::active()).await.unwrap();
    assert_eq!(plan.id, "drafted");
    assert_eq!(plan.title, "Drafted");
    assert_eq!(plan.statuses, vec![ItemStatus::Completed; 2]);
}

#[tokio::test]
async fn test_finish_marker_stops_the_run() {
    let (_temp_dir, planner) = create_test_planner().await;
    planner.create_plan(&text_plan("short", 4)).await.unwrap();

    let registry = ExecutorRegistry::new().with(
        "text",
        Arc::new(CommandExecutor::new("poster", "echo 'quota reached: STOP'").with_finish_marker("STOP")),
    );

    let output = Flow::builder(planner.clone(), registry)
        .plan_id("short")
        .build()
        .execute("")
        .await;

    let plan = planner.get_plan(&PlanRef::id("short")).await.unwrap();
    assert_eq!(plan.count(ItemStatus::Completed), 1);
    assert_eq!(plan.count(ItemStatus::Draft), 3);
    assert!(output.starts_with("quota reached: STOP\nPlan completed:"));
}
