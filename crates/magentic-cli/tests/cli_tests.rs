use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// A `mui` command with plain output, bound to a database in `dir`
fn mui_cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("mui").expect("Failed to find mui binary");
    cmd.env_remove("MAGENTIC_USER")
        .arg("--no-color")
        .arg("--database-file")
        .arg(dir.join("cli_test.db"));
    cmd
}

fn write_file(dir: &Path, name: &str, contents: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("Failed to write test file");
    path.to_string_lossy().into_owned()
}

#[test]
fn test_cli_list_empty_plans() {
    let temp_dir = create_cli_test_environment();

    mui_cmd(temp_dir.path())
        .args(["plan", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No plans found."));

    mui_cmd(temp_dir.path())
        .args(["--user", "bob", "plan", "delete", "1", "--confirm"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Plan with ID 1 not found"));

    mui_cmd(temp_dir.path())
        .args(["--user", "alice", "plan", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("New Plan"));
}

#[test]
fn test_cli_create_blank_plan() {
    let temp_dir = create_cli_test_environment();

    mui_cmd(temp_dir.path())
        .args(["plan", "create"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created plan with ID: 1"))
        .stdout(predicate::str::contains("# 1. New Plan"));
}

#[test]
fn test_cli_import_and_search() {
    let temp_dir = create_cli_test_environment();
    let file = write_file(
        temp_dir.path(),
        "trip.json",
        r#"{"task": "Plan a Trip", "steps": [{"title": "Book hotel"}]}"#,
    );

    mui_cmd(temp_dir.path())
        .args(["plan", "import", &file])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plan a Trip"))
        .stdout(predicate::str::contains("Book hotel"));
    mui_cmd(temp_dir.path()).args(["plan", "create"]).assert().success();

    mui_cmd(temp_dir.path())
        .args(["plan", "list", "--search", "TRIP"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plan a Trip"))
        .stdout(predicate::str::contains("New Plan").not());
}

#[test]
fn test_cli_import_rejects_non_json_file() {
    let temp_dir = create_cli_test_environment();
    let file = write_file(temp_dir.path(), "plan.txt", r#"{"task": "x"}"#);

    mui_cmd(temp_dir.path())
        .args(["plan", "import", &file])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please upload a JSON file"));
}

#[test]
fn test_cli_import_rejects_malformed_json() {
    let temp_dir = create_cli_test_environment();
    let file = write_file(temp_dir.path(), "plan.json", "{broken");

    mui_cmd(temp_dir.path())
        .args(["plan", "import", &file])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid JSON file format"));

    mui_cmd(temp_dir.path())
        .args(["plan", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No plans found."));

    mui_cmd(temp_dir.path())
        .args(["--user", "bob", "plan", "delete", "1", "--confirm"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Plan with ID 1 not found"));

    mui_cmd(temp_dir.path())
        .args(["--user", "alice", "plan", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("New Plan"));
}

#[test]
fn test_cli_export_omits_id() {
    let temp_dir = create_cli_test_environment();
    mui_cmd(temp_dir.path()).args(["plan", "create"]).assert().success();

    mui_cmd(temp_dir.path())
        .args(["plan", "export", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"task\": \"New Plan\""))
        .stdout(predicate::str::contains("\"id\"").not());
}

#[test]
fn test_cli_delete_requires_confirmation() {
    let temp_dir = create_cli_test_environment();
    mui_cmd(temp_dir.path()).args(["plan", "create"]).assert().success();

    mui_cmd(temp_dir.path())
        .args(["plan", "delete", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--confirm"));

    mui_cmd(temp_dir.path())
        .args(["plan", "delete", "1", "--confirm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted plan with ID: 1"));

    mui_cmd(temp_dir.path())
        .args(["plan", "show", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Plan with ID 1 not found"));
}

#[test]
fn test_cli_use_plan_and_sidebar() {
    let temp_dir = create_cli_test_environment();
    mui_cmd(temp_dir.path()).args(["plan", "create"]).assert().success();

    mui_cmd(temp_dir.path())
        .args(["plan", "use", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plan: New Plan"));

    mui_cmd(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("## Today"))
        .stdout(predicate::str::contains("Plan: New Plan"));
}

#[test]
fn test_cli_learn_plan_once() {
    let temp_dir = create_cli_test_environment();
    let file = write_file(
        temp_dir.path(),
        "learned.json",
        r#"{"task": "Summarize inbox", "steps": [{"title": "Read mail"}]}"#,
    );
    mui_cmd(temp_dir.path())
        .args(["session", "create", "Inbox"])
        .assert()
        .success();

    mui_cmd(temp_dir.path())
        .args(["plan", "learn", "--session", "1", "--message", "3", &file])
        .assert()
        .success()
        .stdout(predicate::str::contains("Learned from session: 1"));

    mui_cmd(temp_dir.path())
        .args(["plan", "learn", "--session", "1", "--message", "3", &file])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already learned"));

    mui_cmd(temp_dir.path())
        .args(["plan", "learned", "--session", "1", "--message", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("A plan was learned"));
}

#[test]
fn test_cli_session_rename_and_delete() {
    let temp_dir = create_cli_test_environment();
    mui_cmd(temp_dir.path())
        .args(["session", "create", "Draft", "--team-id", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created session with ID: 1"));

    mui_cmd(temp_dir.path())
        .args(["session", "rename", "1", "Final"])
        .assert()
        .success()
        .stdout(predicate::str::contains("**Final**"));

    mui_cmd(temp_dir.path())
        .args(["session", "list", "--flat"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Final"));

    mui_cmd(temp_dir.path())
        .args(["session", "delete", "1", "--confirm"])
        .assert()
        .success();

    mui_cmd(temp_dir.path())
        .args(["session", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No sessions found."));
}

#[test]
fn test_cli_session_create_rejects_blank_name() {
    let temp_dir = create_cli_test_environment();

    mui_cmd(temp_dir.path())
        .args(["session", "create", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("session name cannot be empty"));
}

#[test]
fn test_cli_settings_flow() {
    let temp_dir = create_cli_test_environment();

    mui_cmd(temp_dir.path())
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Approval policy: auto-conservative"))
        .stdout(predicate::str::contains("gpt-4.1-2025-04-14"));

    mui_cmd(temp_dir.path())
        .args(["settings", "set", "--approval-policy", "always", "--bing-search", "true"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Approval policy: always"))
        .stdout(predicate::str::contains("Bing search: yes"));

    mui_cmd(temp_dir.path())
        .args(["settings", "preset", "openrouter"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Model configuration set to OpenRouter"));

    mui_cmd(temp_dir.path())
        .args(["settings", "allow-site", "example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- example.com"));

    mui_cmd(temp_dir.path())
        .args(["settings", "reset"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Approval policy: auto-conservative"))
        .stdout(predicate::str::contains("Any website may be visited."));
}

#[test]
fn test_cli_model_config_import_rejects_missing_clients() {
    let temp_dir = create_cli_test_environment();
    let file = write_file(
        temp_dir.path(),
        "models.yaml",
        "orchestrator_client: {}\ncoder_client: {}\n",
    );

    mui_cmd(temp_dir.path())
        .args(["settings", "import-model-config", &file])
        .assert()
        .failure()
        .stderr(predicate::str::contains("web_surfer_client"))
        .stderr(predicate::str::contains("file_surfer_client"));
}

#[test]
fn test_cli_users_are_separate() {
    let temp_dir = create_cli_test_environment();
    mui_cmd(temp_dir.path())
        .args(["--user", "alice", "plan", "create"])
        .assert()
        .success();

    mui_cmd(temp_dir.path())
        .env("MAGENTIC_USER", "bob")
        .args(["plan", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No plans found."));

    mui_cmd(temp_dir.path())
        .args(["--user", "bob", "plan", "delete", "1", "--confirm"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Plan with ID 1 not found"));

    mui_cmd(temp_dir.path())
        .args(["--user", "alice", "plan", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("New Plan"));
}
