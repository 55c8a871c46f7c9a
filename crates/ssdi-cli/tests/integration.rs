#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn ssdi(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ssdi").unwrap();
    cmd.current_dir(dir.path())
        .env("SSDI_ROOT", dir.path())
        .env_remove("SSDI_USER");
    cmd
}

fn init_seeded(dir: &TempDir) {
    ssdi(dir).args(["init", "--seed"]).assert().success();
}

fn json_output(cmd: &mut Command) -> serde_json::Value {
    let out = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&out).expect("stdout should be JSON")
}

// ---------------------------------------------------------------------------
// ssdi init
// ---------------------------------------------------------------------------

#[test]
fn init_creates_config_and_store() {
    let dir = TempDir::new().unwrap();
    ssdi(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("created: .ssdi/config.yaml"));

    assert!(dir.path().join(".ssdi/config.yaml").exists());
    assert!(dir.path().join(".ssdi/tracker.db").exists());
}

#[test]
fn init_is_idempotent() {
    let dir = TempDir::new().unwrap();
    ssdi(&dir).arg("init").assert().success();
    ssdi(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("exists:  .ssdi/config.yaml"));
}

#[test]
fn seeding_twice_is_skipped() {
    let dir = TempDir::new().unwrap();
    init_seeded(&dir);
    ssdi(&dir)
        .args(["init", "--seed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("skipped"));

    let entries = json_output(ssdi(&dir).args(["tracking", "list", "--json"]));
    assert_eq!(entries.as_array().unwrap().len(), 4);
}

#[test]
fn commands_require_init() {
    let dir = TempDir::new().unwrap();
    ssdi(&dir)
        .arg("action-items")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not initialized"));
}

#[test]
fn writes_before_seeding_report_unknown_user() {
    let dir = TempDir::new().unwrap();
    ssdi(&dir).arg("init").assert().success();
    ssdi(&dir)
        .args([
            "tracking",
            "add",
            "--type",
            "letter",
            "--title",
            "Notice of Award",
            "--description",
            "Benefits approved",
            "--source",
            "mail",
            "--priority",
            "medium",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("user not found: 1"))
        .stderr(predicate::str::contains("store unavailable").not());
}

// ---------------------------------------------------------------------------
// ssdi action-items / tracking complete
// ---------------------------------------------------------------------------

#[test]
fn action_items_lists_overdue_first() {
    let dir = TempDir::new().unwrap();
    init_seeded(&dir);

    let items = json_output(ssdi(&dir).args(["action-items", "--json"]));
    let needs = items["needsAttention"].as_array().unwrap();
    assert_eq!(needs.len(), 4);
    assert_eq!(needs[0]["title"], "Request for Additional Documentation");
    assert_eq!(needs[0]["isOverdue"], true);
    assert_eq!(needs[2]["type"], "missing_document");
    assert_eq!(needs[2]["title"], "Specialist Reports");
    assert_eq!(items["completed"].as_array().unwrap().len(), 6);
}

#[test]
fn action_items_table_output() {
    let dir = TempDir::new().unwrap();
    init_seeded(&dir);
    ssdi(&dir)
        .arg("action-items")
        .assert()
        .success()
        .stdout(predicate::str::contains("Needs attention (4)"))
        .stdout(predicate::str::contains("OVERDUE"))
        .stdout(predicate::str::contains("Completed in the last 7 days (6)"));
}

#[test]
fn completing_tracking_entry_moves_it_to_completed() {
    let dir = TempDir::new().unwrap();
    init_seeded(&dir);

    let entries = json_output(ssdi(&dir).args(["tracking", "list", "--json"]));
    let id = entries
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["title"] == "Medical Exam Appointment")
        .unwrap()["id"]
        .as_i64()
        .unwrap();

    ssdi(&dir)
        .args(["tracking", "complete", &id.to_string()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed"));

    let items = json_output(ssdi(&dir).args(["action-items", "--json"]));
    let needs = items["needsAttention"].as_array().unwrap();
    assert!(needs.iter().all(|i| i["id"] != id || i["type"] != "required_action"));
    assert!(items["completed"]
        .as_array()
        .unwrap()
        .iter()
        .any(|i| i["type"] == "completed_action" && i["id"] == id));
}

#[test]
fn completing_as_another_user_fails() {
    let dir = TempDir::new().unwrap();
    init_seeded(&dir);

    ssdi(&dir)
        .args(["--user", "2", "tracking", "complete", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found or not owned"));

    let entries = json_output(ssdi(&dir).args(["tracking", "list", "--json"]));
    let entry = entries
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["id"] == 2)
        .unwrap()
        .clone();
    assert_eq!(entry["isActionRequired"], true);
    assert!(entry["actionCompletedAt"].is_null());
}

#[test]
fn tracking_add_with_deadline_requires_action() {
    let dir = TempDir::new().unwrap();
    init_seeded(&dir);

    let entry = json_output(ssdi(&dir).args([
        "tracking",
        "add",
        "--type",
        "appointment",
        "--title",
        "Consultative Exam",
        "--description",
        "SSA scheduled exam",
        "--source",
        "social_security",
        "--priority",
        "high",
        "--deadline",
        "2099-01-31",
        "--json",
    ]));
    assert_eq!(entry["isActionRequired"], true);
    assert_eq!(entry["actionDeadline"], "2099-01-31T23:59:59Z");

    let items = json_output(ssdi(&dir).args(["action-items", "--json"]));
    let needs = items["needsAttention"].as_array().unwrap();
    // Future deadline: after both overdue entries, before undated documents.
    assert_eq!(needs[2]["title"], "Consultative Exam");
    assert_eq!(needs[2]["isOverdue"], false);
}

#[test]
fn invalid_enum_value_is_rejected_by_parser() {
    let dir = TempDir::new().unwrap();
    init_seeded(&dir);
    ssdi(&dir)
        .args(["section", "status", "1", "finished"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid section status"));
}

// ---------------------------------------------------------------------------
// sections, documents, contacts, progress
// ---------------------------------------------------------------------------

#[test]
fn uploading_missing_document_resolves_it() {
    let dir = TempDir::new().unwrap();
    init_seeded(&dir);

    let docs = json_output(ssdi(&dir).args(["document", "list", "2", "--json"]));
    let specialist = docs
        .as_array()
        .unwrap()
        .iter()
        .find(|d| d["name"] == "Specialist Reports")
        .unwrap()["id"]
        .as_i64()
        .unwrap();

    ssdi(&dir)
        .args(["document", "status", &specialist.to_string(), "uploaded"])
        .assert()
        .success();

    let items = json_output(ssdi(&dir).args(["action-items", "--json"]));
    assert_eq!(items["needsAttention"].as_array().unwrap().len(), 3);
    assert_eq!(items["completed"].as_array().unwrap().len(), 7);
}

#[test]
fn document_add_with_file_is_uploaded() {
    let dir = TempDir::new().unwrap();
    init_seeded(&dir);
    let doc = json_output(ssdi(&dir).args([
        "document",
        "add",
        "4",
        "--name",
        "Reconsideration Form",
        "--category",
        "legal",
        "--file-name",
        "ssa-561.pdf",
        "--json",
    ]));
    assert_eq!(doc["status"], "uploaded");
    assert!(doc["uploadedAt"].is_string());
}

#[test]
fn progress_reports_percentage() {
    let dir = TempDir::new().unwrap();
    init_seeded(&dir);
    let p = json_output(ssdi(&dir).args(["progress", "--json"]));
    assert_eq!(p["total"], 4);
    assert_eq!(p["percentage"], 50);

    ssdi(&dir)
        .args(["section", "status", "2", "complete"])
        .assert()
        .success();
    ssdi(&dir)
        .arg("progress")
        .assert()
        .success()
        .stdout(predicate::str::contains("75% complete (3 of 4 sections)"));
}

#[test]
fn contacts_add_list_delete() {
    let dir = TempDir::new().unwrap();
    init_seeded(&dir);

    ssdi(&dir)
        .args(["contact", "add", "--name", "Dr. Martinez", "--email", "not-an-email"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("email"));

    let contact = json_output(ssdi(&dir).args([
        "contact",
        "add",
        "--name",
        "Sarah Johnson",
        "--email",
        "sarah.johnson@ssa.gov",
        "--role",
        "SSA Representative",
        "--json",
    ]));
    let id = contact["id"].as_i64().unwrap().to_string();

    ssdi(&dir)
        .args(["contact", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sarah Johnson"));

    ssdi(&dir)
        .args(["--user", "2", "contact", "delete", &id])
        .assert()
        .failure();
    ssdi(&dir).args(["contact", "delete", &id]).assert().success();

    let contacts = json_output(ssdi(&dir).args(["contact", "list", "--json"]));
    assert!(contacts.as_array().unwrap().is_empty());
}
