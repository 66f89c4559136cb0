use super::*;

#[test]
fn test_new_report_is_running_and_idle() {
    let report = RunReport::new("sales_silver");
    assert_eq!(report.pipeline, "sales_silver");
    assert_eq!(report.run_id.len(), 8);
    assert_eq!(report.stage, RunStage::Idle);
    assert_eq!(report.status, RunStatus::Running);
    assert!(report.finished_at.is_none());
    assert_eq!(report.counts, RunCounts::default());
}

#[test]
fn test_complete_returns_to_idle() {
    let mut report = RunReport::new("sales_silver");
    report.enter(RunStage::Extracting);
    report.enter(RunStage::Classifying);
    report.enter(RunStage::Loading);
    report.enter(RunStage::Committing);
    report.complete();

    assert_eq!(report.stage, RunStage::Idle);
    assert_eq!(report.status, RunStatus::Completed);
    assert!(report.finished_at.is_some());
    assert!(report.is_success());
}

#[test]
fn test_no_input_is_success() {
    let mut report = RunReport::new("sales_silver");
    report.enter(RunStage::Extracting);
    report.complete_no_input();

    assert_eq!(report.status, RunStatus::NoInput);
    assert!(report.is_success());
    assert!(report.error.is_none());
}

#[test]
fn test_abort_records_error_and_stage() {
    let mut report = RunReport::new("sales_silver");
    report.enter(RunStage::Loading);
    report.abort("[S003] SQL execution failed: connection lost");

    assert_eq!(report.stage, RunStage::Aborted);
    assert_eq!(report.status, RunStatus::Aborted);
    assert!(!report.is_success());
    assert!(report.error.as_deref().unwrap().contains("[S003]"));
}

#[test]
fn test_report_serde_round_trip() {
    let mut report = RunReport::new("sales_silver");
    report.counts.extracted = 5;
    report.counts.valid = 4;
    report.counts.invalid = 1;
    report.complete();

    let json = serde_json::to_string(&report).unwrap();
    let loaded: RunReport = serde_json::from_str(&json).unwrap();
    assert_eq!(loaded.run_id, report.run_id);
    assert_eq!(loaded.counts.extracted, 5);
    assert_eq!(loaded.status, RunStatus::Completed);
}

#[test]
fn test_stage_display() {
    assert_eq!(RunStage::Extracting.to_string(), "extracting");
    assert_eq!(RunStage::Committing.to_string(), "committing");
    assert_eq!(RunStatus::NoInput.to_string(), "no input");
}
