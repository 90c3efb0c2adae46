use assert_cmd::Command;
use predicates::str::contains;
use tempfile::{tempdir, NamedTempFile};

fn script_command(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("expense_core_cli").unwrap();
    cmd.env("EXPENSE_CORE_CLI_SCRIPT", "1")
        .env("EXPENSE_CORE_HOME", home)
        .env("RUST_LOG", "off");
    cmd
}

#[test]
fn script_mode_runs_group_flow_and_exports() {
    let home = tempdir().unwrap();
    let export = NamedTempFile::new().unwrap();
    let input = format!(
        "add-expense 30 Food \"Team lunch\"\n\
         set-budget Food 25\n\
         budgets\n\
         create-group Trip Asha\n\
         add-expense 100 Other Hotel --group Trip\n\
         group Trip\n\
         export {}\n\
         exit\n",
        export.path().display()
    );

    script_command(home.path())
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Achievement Unlocked: 🎉 First Expense!"))
        .stdout(contains("EXCEEDED"))
        .stdout(contains("Asha pays You ₹50.00"))
        .stdout(contains("Exported 2 expense(s)"));

    let csv = std::fs::read_to_string(export.path()).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("ID,Description,Amount,Category,Date,Recurring,GroupID")
    );
    let rows: Vec<&str> = lines.collect();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().any(|row| row.contains("Hotel")));
    assert!(rows.iter().any(|row| row.contains("Team lunch")));
}

#[test]
fn unknown_command_suggests_nearest_match() {
    let home = tempdir().unwrap();
    script_command(home.path())
        .write_stdin("dashbord\nexit\n")
        .assert()
        .success()
        .stdout(contains("Suggestion: `dashboard`?"));
}

#[test]
fn invalid_amount_is_reported_and_session_continues() {
    let home = tempdir().unwrap();
    script_command(home.path())
        .write_stdin("add-expense ten Food snack\nstreak\n")
        .assert()
        .success()
        .stderr(contains("`ten` is not a valid amount"))
        .stdout(contains("No activity yet."));
}
