use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a Command with --no-color flag and a database
/// inside `dir`
fn cadence_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cadence").expect("Failed to find cadence binary");
    let db_path = dir.path().join("cli_test.db");
    cmd.arg("--no-color")
        .arg("--database-file")
        .arg(db_path);
    cmd
}

fn create_plan(dir: &TempDir, id: &str, items: &[&str]) {
    let mut args = vec!["plan", "create", id, "Weekly posts"];
    for item in items {
        args.extend(["--item", *item]);
    }
    cadence_cmd(dir).args(&args).assert().success();
}

#[test]
fn test_cli_create_plan_success() {
    let temp_dir = create_cli_test_environment();

    cadence_cmd(&temp_dir)
        .args([
            "plan",
            "create",
            "weekly",
            "Weekly posts",
            "--item",
            "Monday",
            "--item",
            "Friday",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Plan created successfully with ID: weekly",
        ))
        .stdout(predicate::str::contains("0. [ ] Content: Monday"))
        .stdout(predicate::str::contains("1. [ ] Content: Friday"));
}

#[test]
fn test_cli_create_plan_from_items_file() {
    let temp_dir = create_cli_test_environment();
    let items_path = temp_dir.path().join("items.json");
    fs::write(
        &items_path,
        r##"[{"content": "Teaser", "tags": ["#launch"]}, {"content": "Poster", "media_prompt": "a rocket at dawn"}]"##,
    )
    .unwrap();

    cadence_cmd(&temp_dir)
        .args(["plan", "create", "launch", "Launch", "--items-file"])
        .arg(&items_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Tags: #launch"))
        .stdout(predicate::str::contains("Media Prompt: a rocket at dawn"));
}

#[test]
fn test_cli_create_without_items_fails() {
    let temp_dir = create_cli_test_environment();

    cadence_cmd(&temp_dir)
        .args(["plan", "create", "empty", "Empty"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to create plan"));
}

#[test]
fn test_cli_duplicate_create_fails() {
    let temp_dir = create_cli_test_environment();
    create_plan(&temp_dir, "weekly", &["Monday"]);

    cadence_cmd(&temp_dir)
        .args(["plan", "create", "weekly", "Again", "--item", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_cli_list_empty_plans() {
    let temp_dir = create_cli_test_environment();

    cadence_cmd(&temp_dir)
        .args(["plan", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No plans available."));
}

#[test]
fn test_cli_default_command_lists_plans() {
    let temp_dir = create_cli_test_environment();
    create_plan(&temp_dir, "weekly", &["Monday", "Friday"]);

    cadence_cmd(&temp_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Available plans:"))
        .stdout(predicate::str::contains(
            "weekly (active): Weekly posts - 0/2 items completed",
        ));
}

#[test]
fn test_cli_mark_and_show() {
    let temp_dir = create_cli_test_environment();
    create_plan(&temp_dir, "weekly", &["Monday", "Friday"]);

    cadence_cmd(&temp_dir)
        .args(["plan", "mark", "1", "--status", "failed", "--notes", "rate limited"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Item 1 updated in plan 'weekly'."));

    cadence_cmd(&temp_dir)
        .args(["plan", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. [!] Content: Friday"))
        .stdout(predicate::str::contains("Notes: rate limited"));
}

#[test]
fn test_cli_mark_rejects_bad_input() {
    let temp_dir = create_cli_test_environment();
    create_plan(&temp_dir, "weekly", &["Monday"]);

    cadence_cmd(&temp_dir)
        .args(["plan", "mark", "-1", "--status", "completed"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid item index: -1"));

    cadence_cmd(&temp_dir)
        .args(["plan", "mark", "0", "--status", "finished"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to mark item"));
}

#[test]
fn test_cli_update_keeps_identical_items() {
    let temp_dir = create_cli_test_environment();
    create_plan(&temp_dir, "weekly", &["Monday", "Friday"]);

    cadence_cmd(&temp_dir)
        .args(["plan", "mark", "0", "--status", "completed"])
        .assert()
        .success();

    cadence_cmd(&temp_dir)
        .args([
            "plan", "update", "weekly", "--item", "Monday", "--item", "Saturday",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plan updated successfully: weekly"))
        .stdout(predicate::str::contains("0. [✓] Content: Monday"))
        .stdout(predicate::str::contains("1. [ ] Content: Saturday"));
}

#[test]
fn test_cli_activate_and_delete() {
    let temp_dir = create_cli_test_environment();
    create_plan(&temp_dir, "first", &["a"]);
    create_plan(&temp_dir, "second", &["b"]);

    cadence_cmd(&temp_dir)
        .args(["plan", "activate", "first"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plan 'first' is now active."));

    cadence_cmd(&temp_dir)
        .args(["plan", "delete", "first"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plan 'first' has been deleted."));

    cadence_cmd(&temp_dir)
        .args(["plan", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No active plan"));

    cadence_cmd(&temp_dir)
        .args(["plan", "show", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No plan found with ID: ghost"));
}

#[cfg(unix)]
#[test]
fn test_cli_run_active_plan() {
    let temp_dir = create_cli_test_environment();
    create_plan(&temp_dir, "weekly", &["Monday", "Friday"]);

    cadence_cmd(&temp_dir)
        .args(["run", "--executor", "text=echo posted"])
        .assert()
        .success()
        .stdout(predicate::str::contains("posted\nposted\nPlan completed:"))
        .stdout(predicate::str::contains(
            "Success: Plan 'weekly' finished with 2/2 items completed",
        ));

    cadence_cmd(&temp_dir)
        .args(["plan", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "weekly (active): Weekly posts - 2/2 items completed",
        ));
}

#[cfg(unix)]
#[test]
fn test_cli_run_request_without_drafter() {
    let temp_dir = create_cli_test_environment();

    cadence_cmd(&temp_dir)
        .args([
            "run",
            "Announce the beta",
            "--plan-id",
            "beta",
            "--executor",
            "text=cat > /dev/null; echo done",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("done\nPlan completed:"));

    cadence_cmd(&temp_dir)
        .args(["plan", "show", "beta"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plan: Plan for: Announce the beta (ID: beta)"))
        .stdout(predicate::str::contains("0. [✓] Content: Announce the beta"));
}

#[cfg(unix)]
#[test]
fn test_cli_run_unknown_primary_fails() {
    let temp_dir = create_cli_test_environment();

    cadence_cmd(&temp_dir)
        .args(["run", "--executor", "text=cat", "--primary", "media"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Primary executor 'media' is not registered"));
}

#[test]
fn test_cli_run_requires_executor() {
    let temp_dir = create_cli_test_environment();

    cadence_cmd(&temp_dir)
        .args(["run", "anything"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--executor"));
}

#[cfg(unix)]
#[test]
fn test_cli_run_output_resembling_failure_succeeds() {
    let temp_dir = create_cli_test_environment();
    create_plan(&temp_dir, "weekly", &["Monday"]);

    cadence_cmd(&temp_dir)
        .args([
            "run",
            "--plan-id",
            "weekly",
            "--executor",
            "text=echo 'Execution failed: nothing to post'",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Execution failed: nothing to post\n"))
        .stdout(predicate::str::contains(
            "Success: Plan 'weekly' finished with 1/1 items completed",
        ));

    cadence_cmd(&temp_dir)
        .args(["plan", "show", "weekly"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0. [✓] Content: Monday"));
}

#[cfg(unix)]
#[test]
fn test_cli_run_reports_failed_items() {
    let temp_dir = create_cli_test_environment();
    create_plan(&temp_dir, "weekly", &["Monday"]);

    cadence_cmd(&temp_dir)
        .args([
            "run",
            "--executor",
            "text=grep -q 'The plan has been completed' && echo summary || exit 3",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Error executing item 0:"))
        .stdout(predicate::str::contains(
            "Error: Plan 'weekly' finished with 0/1 items completed, 1 failed",
        ));
}

#[cfg(unix)]
#[test]
fn test_cli_run_drafting_over_existing_plan_fails() {
    let temp_dir = create_cli_test_environment();
    create_plan(&temp_dir, "weekly", &["Monday"]);

    cadence_cmd(&temp_dir)
        .args(["run", "Replace it", "--plan-id", "weekly", "--executor", "text=cat"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Plan run did not start"))
        .stderr(predicate::str::contains("already exists"));
}
