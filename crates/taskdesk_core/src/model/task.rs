//! Task domain model.
//!
//! # Responsibility
//! - Define the record listed, edited and prioritized by callers.
//! - Provide construction helpers with documented defaults.
//! - Define the JSON wire shape used by the task file.
//!
//! # Invariants
//! - `id` is generated once and never rewritten by core code.
//! - Serialization renders `Deadline::Date` as `YYYY-MM-DD` and passes
//!   `Deadline::Raw` through unchanged, so every task round-trips losslessly.
//! - Deserialization never fails on missing fields; see `TaskRecord`.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Fixed textual pattern for persisted deadlines.
pub const DEADLINE_FORMAT: &str = "%Y-%m-%d";
/// Priority assigned when the caller provides none.
pub const DEFAULT_PRIORITY: i64 = 5;
/// Status label assigned when the caller provides none.
pub const DEFAULT_STATUS: &str = "Pending";

const DEFAULT_TITLE: &str = "Untitled";
const DEFAULT_CATEGORY: &str = "General";
const DEFAULT_DEADLINE: (i32, u32, u32) = (2000, 1, 1);

/// Opaque task identifier. Generated ids are UUIDv4 strings.
pub type TaskId = String;

pub type TaskResult<T> = Result<T, TaskError>;

/// Returns a fresh unique task identifier.
pub fn generate_task_id() -> TaskId {
    Uuid::new_v4().to_string()
}

/// Errors raised while building or decoding a task.
#[derive(Debug)]
pub enum TaskError {
    /// Deadline text did not match `DEADLINE_FORMAT`.
    InvalidDeadline {
        value: String,
        source: chrono::ParseError,
    },
    /// JSON value does not have the task record shape.
    Decode(serde_json::Error),
}

impl Display for TaskError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDeadline { value, source } => {
                write!(f, "invalid deadline `{value}` (expected YYYY-MM-DD): {source}")
            }
            Self::Decode(err) => write!(f, "invalid task record: {err}"),
        }
    }
}

impl Error for TaskError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidDeadline { source, .. } => Some(source),
            Self::Decode(err) => Some(err),
        }
    }
}

/// Task deadline.
///
/// Presentation layers may accept free text that is not a date; that text is
/// kept as `Raw` instead of being dropped or silently replaced.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Deadline {
    /// Calendar date without time of day.
    Date(NaiveDate),
    /// Unparseable text preserved verbatim.
    Raw(String),
}

impl Deadline {
    /// Parses `text` with `DEADLINE_FORMAT`, failing on mismatch.
    pub fn parse_date(text: &str) -> TaskResult<NaiveDate> {
        NaiveDate::parse_from_str(text, DEADLINE_FORMAT).map_err(|source| {
            TaskError::InvalidDeadline {
                value: text.to_string(),
                source,
            }
        })
    }

    /// Lenient conversion: dates become `Date`, anything else `Raw`.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        match NaiveDate::parse_from_str(&text, DEADLINE_FORMAT) {
            Ok(date) => Self::Date(date),
            Err(_) => Self::Raw(text),
        }
    }

    /// Returns the calendar date when this deadline was parsed.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(date) => Some(*date),
            Self::Raw(_) => None,
        }
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, Self::Raw(_))
    }
}

impl Default for Deadline {
    fn default() -> Self {
        let (year, month, day) = DEFAULT_DEADLINE;
        match NaiveDate::from_ymd_opt(year, month, day) {
            Some(date) => Self::Date(date),
            None => Self::Raw(format!("{year:04}-{month:02}-{day:02}")),
        }
    }
}

impl Display for Deadline {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Date(date) => write!(f, "{}", date.format(DEADLINE_FORMAT)),
            Self::Raw(text) => f.write_str(text),
        }
    }
}

impl From<NaiveDate> for Deadline {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl Serialize for Deadline {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Deadline {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(Self::from_text(text))
    }
}

/// Single to-do record.
///
/// Field order matches the persisted record layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TaskRecord")]
pub struct Task {
    /// Stable identifier; sole lookup and merge key.
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub deadline: Deadline,
    /// Higher is more urgent. Strategies emit values in `0..=100`.
    pub priority: i64,
    /// Free-form status label.
    pub status: String,
}

impl Task {
    /// Creates a task with a generated id, default priority and status.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        deadline: impl Into<Deadline>,
    ) -> Self {
        Self {
            id: generate_task_id(),
            title: title.into(),
            description: description.into(),
            category: category.into(),
            deadline: deadline.into(),
            priority: DEFAULT_PRIORITY,
            status: DEFAULT_STATUS.to_string(),
        }
    }

    /// Creates a task from a textual deadline.
    ///
    /// # Errors
    /// - `TaskError::InvalidDeadline` when `deadline` is not `YYYY-MM-DD`.
    pub fn parse(
        title: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        deadline: &str,
    ) -> TaskResult<Self> {
        let date = Deadline::parse_date(deadline)?;
        Ok(Self::new(title, description, category, date))
    }

    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Replaces the generated id with a caller-provided one.
    ///
    /// Used by import/edit paths where identity already exists. An empty id
    /// is treated as absent and keeps the generated one.
    pub fn with_id(mut self, id: impl Into<TaskId>) -> Self {
        let id = id.into();
        if !id.is_empty() {
            self.id = id;
        }
        self
    }

    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }

    /// Assigns a fresh id when none is present.
    ///
    /// Returns `true` when an id was generated.
    pub fn ensure_id(&mut self) -> bool {
        if self.has_id() {
            return false;
        }
        self.id = generate_task_id();
        true
    }

    /// Whole days from `today` until the deadline; `None` for raw deadlines.
    pub fn days_until(&self, today: NaiveDate) -> Option<i64> {
        self.deadline
            .as_date()
            .map(|deadline| (deadline - today).num_days())
    }

    /// Renders the persisted record as a JSON object.
    pub fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "title": self.title,
            "description": self.description,
            "category": self.category,
            "deadline": self.deadline.to_string(),
            "priority": self.priority,
            "status": self.status,
        })
    }

    /// Decodes a persisted record, applying per-field defaults.
    ///
    /// # Errors
    /// - `TaskError::Decode` when `value` is not an object or a present field
    ///   has the wrong JSON type.
    pub fn from_json(value: Value) -> TaskResult<Self> {
        serde_json::from_value(value).map_err(TaskError::Decode)
    }
}

/// Reads hand-edited priorities: integers, integral floats (`7.0`) and
/// numeric strings (`"7"`). Anything else yields `None`.
fn priority_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().and_then(integral_priority)),
        Value::String(text) => {
            let text = text.trim();
            text.parse::<i64>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().and_then(integral_priority))
        }
        _ => None,
    }
}

fn integral_priority(value: f64) -> Option<i64> {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Some(value as i64)
    } else {
        None
    }
}

/// Lenient on-disk shape. Absent and `null` fields fall back to defaults;
/// see `priority_from_value` for priority coercion.
#[derive(Deserialize)]
struct TaskRecord {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    deadline: Option<Deadline>,
    #[serde(default)]
    priority: Option<Value>,
    #[serde(default)]
    status: Option<String>,
}

impl From<TaskRecord> for Task {
    fn from(record: TaskRecord) -> Self {
        let mut task = Self {
            id: record.id.unwrap_or_default(),
            title: record.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            description: record.description.unwrap_or_default(),
            category: record
                .category
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            deadline: record.deadline.unwrap_or_default(),
            priority: record
                .priority
                .as_ref()
                .and_then(priority_from_value)
                .unwrap_or(DEFAULT_PRIORITY),
            status: record.status.unwrap_or_else(|| DEFAULT_STATUS.to_string()),
        };
        task.ensure_id();
        task
    }
}

#[cfg(test)]
mod tests {
    use super::{Deadline, Task, TaskError, DEFAULT_PRIORITY, DEFAULT_STATUS};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid calendar date")
    }

    #[test]
    fn deadline_display_uses_fixed_pattern() {
        assert_eq!(Deadline::Date(date(2025, 3, 7)).to_string(), "2025-03-07");
        assert_eq!(Deadline::Raw("next friday".into()).to_string(), "next friday");
    }

    #[test]
    fn deadline_from_text_keeps_unparseable_input() {
        assert_eq!(
            Deadline::from_text("2025-12-31"),
            Deadline::Date(date(2025, 12, 31))
        );
        assert_eq!(
            Deadline::from_text("31/12/2025"),
            Deadline::Raw("31/12/2025".into())
        );
        assert!(Deadline::from_text("").is_raw());
    }

    #[test]
    fn default_deadline_is_start_of_2000() {
        assert_eq!(Deadline::default(), Deadline::Date(date(2000, 1, 1)));
    }

    #[test]
    fn parse_propagates_format_mismatch() {
        let err = Task::parse("t", "d", "c", "12/31/2025").unwrap_err();
        match err {
            TaskError::InvalidDeadline { value, .. } => assert_eq!(value, "12/31/2025"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn builders_apply_and_empty_id_is_ignored() {
        let task = Task::new("t", "d", "c", date(2025, 1, 1))
            .with_priority(9)
            .with_status("Done")
            .with_id("");
        assert!(task.has_id());
        assert_eq!(task.priority, 9);
        assert_eq!(task.status, "Done");

        let fresh = Task::new("t", "d", "c", date(2025, 1, 1));
        assert_eq!(fresh.priority, DEFAULT_PRIORITY);
        assert_eq!(fresh.status, DEFAULT_STATUS);
    }

    #[test]
    fn ensure_id_only_fills_missing_id() {
        let mut task = Task::new("t", "d", "c", date(2025, 1, 1));
        let original = task.id.clone();
        assert!(!task.ensure_id());
        assert_eq!(task.id, original);

        task.id.clear();
        assert!(task.ensure_id());
        assert!(!task.id.is_empty());
    }

    #[test]
    fn priority_from_value_accepts_hand_edited_numbers() {
        use super::priority_from_value;
        use serde_json::json;

        assert_eq!(priority_from_value(&json!(7)), Some(7));
        assert_eq!(priority_from_value(&json!(7.0)), Some(7));
        assert_eq!(priority_from_value(&json!(" 12 ")), Some(12));
        assert_eq!(priority_from_value(&json!("3.0")), Some(3));
        assert_eq!(priority_from_value(&json!(7.5)), None);
        assert_eq!(priority_from_value(&json!("high")), None);
        assert_eq!(priority_from_value(&json!(true)), None);
        assert_eq!(priority_from_value(&json!(1e300)), None);
    }

    #[test]
    fn days_until_counts_calendar_days() {
        let task = Task::new("t", "d", "c", date(2025, 1, 10));
        assert_eq!(task.days_until(date(2025, 1, 5)), Some(5));
        assert_eq!(task.days_until(date(2025, 1, 12)), Some(-2));

        let raw = Task::new("t", "d", "c", Deadline::Raw("soon".into()));
        assert_eq!(raw.days_until(date(2025, 1, 5)), None);
    }
}
