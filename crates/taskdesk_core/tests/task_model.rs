use chrono::NaiveDate;
use serde_json::json;
use taskdesk_core::{Deadline, Task, TaskError, DEFAULT_PRIORITY, DEFAULT_STATUS};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid calendar date")
}

#[test]
fn new_task_sets_defaults() {
    let task = Task::new("Write report", "Q3 numbers", "Work", date(2025, 12, 31));

    assert!(!task.id.is_empty());
    assert_eq!(task.title, "Write report");
    assert_eq!(task.description, "Q3 numbers");
    assert_eq!(task.category, "Work");
    assert_eq!(task.deadline, Deadline::Date(date(2025, 12, 31)));
    assert_eq!(task.priority, DEFAULT_PRIORITY);
    assert_eq!(task.status, DEFAULT_STATUS);
}

#[test]
fn generated_ids_are_unique() {
    let a = Task::new("a", "", "", date(2025, 1, 1));
    let b = Task::new("a", "", "", date(2025, 1, 1));
    assert_ne!(a.id, b.id);
}

#[test]
fn parse_accepts_fixed_pattern_and_rejects_others() {
    let task = Task::parse("Test", "Desc", "Personal", "2025-12-31").expect("deadline should parse");
    assert_eq!(task.deadline.as_date(), Some(date(2025, 12, 31)));

    let err = Task::parse("Test", "Desc", "Personal", "2025/12/31").unwrap_err();
    assert!(matches!(err, TaskError::InvalidDeadline { ref value, .. } if value == "2025/12/31"));
    assert!(err.to_string().contains("YYYY-MM-DD"));
}

#[test]
fn serialization_uses_expected_wire_fields() {
    let task = Task::new("Test", "Desc", "Personal", date(2025, 3, 9))
        .with_priority(42)
        .with_status("Done")
        .with_id("task-1");

    let value = task.to_json();
    assert_eq!(
        value,
        json!({
            "id": "task-1",
            "title": "Test",
            "description": "Desc",
            "category": "Personal",
            "deadline": "2025-03-09",
            "priority": 42,
            "status": "Done",
        })
    );
    assert_eq!(serde_json::to_value(&task).unwrap(), value);
}

#[test]
fn json_roundtrip_preserves_all_fields() {
    let tasks = [
        Task::new("Test", "Descripción", "Personal", date(2025, 12, 31)).with_priority(7),
        Task::new("", "", "", date(1999, 2, 28)).with_status(""),
        Task::new("raw", "kept", "Misc", Deadline::Raw("next week".into())).with_priority(0),
    ];

    for task in tasks {
        let decoded = Task::from_json(task.to_json()).expect("record should decode");
        assert_eq!(decoded, task);
    }
}

#[test]
fn deserialize_applies_defaults_for_missing_fields() {
    let task = Task::from_json(json!({})).expect("record should decode");

    assert!(!task.id.is_empty());
    assert_eq!(task.title, "Untitled");
    assert_eq!(task.description, "");
    assert_eq!(task.category, "General");
    assert_eq!(task.deadline, Deadline::Date(date(2000, 1, 1)));
    assert_eq!(task.priority, 5);
    assert_eq!(task.status, "Pending");
}

#[test]
fn deserialize_treats_null_and_empty_id_as_absent() {
    let task = Task::from_json(json!({ "id": "", "title": null, "priority": null })).expect("record should decode");
    assert!(!task.id.is_empty());
    assert_eq!(task.title, "Untitled");
    assert_eq!(task.priority, 5);
}

#[test]
fn deserialize_keeps_unparseable_deadline_as_raw() {
    let task = Task::from_json(json!({ "id": "x", "deadline": "tomorrow-ish" })).expect("record should decode");
    assert_eq!(task.deadline, Deadline::Raw("tomorrow-ish".into()));
    assert_eq!(task.to_json()["deadline"], "tomorrow-ish");
}

#[test]
fn deserialize_coerces_hand_edited_priorities() {
    let cases = [
        (json!(7.0), 7),
        (json!("7"), 7),
        (json!("high"), 5),
        (json!(2.5), 5),
        (json!([1]), 5),
    ];
    for (priority, expected) in cases {
        let task = Task::from_json(json!({ "id": "p", "priority": priority.clone() }))
            .expect("priority variants should decode");
        assert_eq!(task.priority, expected, "priority {priority}");
    }
}

#[test]
fn deserialize_rejects_wrong_field_types() {
    let err = Task::from_json(json!({ "title": 42 })).unwrap_err();
    assert!(matches!(err, TaskError::Decode(_)));

    let err = Task::from_json(json!(["not", "an", "object"])).unwrap_err();
    assert!(matches!(err, TaskError::Decode(_)));
}
