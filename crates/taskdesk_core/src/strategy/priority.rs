//! Priority strategy contract and built-in variants.
//!
//! # Responsibility
//! - Define `PriorityStrategy`, the single capability every policy exposes.
//! - Provide manual, date-based and category-based policies.
//!
//! # Invariants
//! - `assign_priority` writes exactly one field and returns the same task.
//! - Date policy output is a pure function of deadline and "today".
//! - Category policy never invents weights: unknown categories map to `0`.

use crate::config::CoreConfig;
use crate::model::task::Task;
use chrono::{Local, NaiveDate};
use log::{debug, warn};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Priority emitted for tasks due today or overdue.
pub const URGENT_PRIORITY: i64 = 100;
/// Distance (in days) at which date-based priority bottoms out.
pub const DATE_HORIZON_DAYS: i64 = 30;
/// Lowest priority emitted by the date policy for future deadlines.
pub const MIN_DATE_PRIORITY: i64 = 1;
/// Priority for categories missing from the weight table.
pub const UNKNOWN_CATEGORY_PRIORITY: i64 = 0;

/// Policy that computes and writes a task's priority.
pub trait PriorityStrategy {
    /// Short stable name used in logs and CLI selection.
    fn name(&self) -> &'static str;

    /// Computes the priority for `task` without modifying it.
    fn calculate_priority(&self, task: &Task) -> i64;

    /// Writes the computed priority onto `task` and returns it for chaining.
    fn assign_priority<'a>(&self, task: &'a mut Task) -> &'a mut Task {
        let previous = task.priority;
        task.priority = self.calculate_priority(task);
        debug!(
            "event=priority_assign module=strategy status=ok strategy={} task_id={} previous={} priority={}",
            self.name(),
            task.id,
            previous,
            task.priority
        );
        task
    }
}

/// Keeps the priority the user entered.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualPriorityStrategy;

impl PriorityStrategy for ManualPriorityStrategy {
    fn name(&self) -> &'static str {
        "manual"
    }

    fn calculate_priority(&self, task: &Task) -> i64 {
        task.priority
    }
}

/// Raises urgency as the deadline approaches.
///
/// `days = deadline - today` in whole calendar days:
/// - `days <= 0` -> `URGENT_PRIORITY`
/// - otherwise   -> `max(MIN_DATE_PRIORITY, DATE_HORIZON_DAYS - days)`
#[derive(Debug, Clone, Copy, Default)]
pub struct DatePriorityStrategy {
    today: Option<NaiveDate>,
}

impl DatePriorityStrategy {
    /// Uses the local calendar date at each evaluation.
    pub fn new() -> Self {
        Self { today: None }
    }

    /// Pins "today" to a fixed date.
    pub fn with_today(today: NaiveDate) -> Self {
        Self { today: Some(today) }
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

impl PriorityStrategy for DatePriorityStrategy {
    fn name(&self) -> &'static str {
        "date"
    }

    fn calculate_priority(&self, task: &Task) -> i64 {
        match task.days_until(self.today()) {
            Some(days) => date_priority(days),
            None => {
                // Raw deadlines carry no date to measure against.
                warn!(
                    "event=priority_assign module=strategy status=skipped strategy=date task_id={} reason=raw_deadline",
                    task.id
                );
                task.priority
            }
        }
    }
}

/// Maps remaining whole days to a date-based priority.
pub fn date_priority(days_remaining: i64) -> i64 {
    if days_remaining <= 0 {
        return URGENT_PRIORITY;
    }
    (DATE_HORIZON_DAYS - days_remaining).max(MIN_DATE_PRIORITY)
}

/// Looks the category up in a configured weight table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPriorityStrategy {
    weights: BTreeMap<String, i64>,
}

impl CategoryPriorityStrategy {
    pub fn new<I, K>(weights: I) -> Self
    where
        I: IntoIterator<Item = (K, i64)>,
        K: Into<String>,
    {
        Self {
            weights: weights
                .into_iter()
                .map(|(category, weight)| (category.into(), weight))
                .collect(),
        }
    }

    pub fn weights(&self) -> &BTreeMap<String, i64> {
        &self.weights
    }
}

impl PriorityStrategy for CategoryPriorityStrategy {
    fn name(&self) -> &'static str {
        "category"
    }

    fn calculate_priority(&self, task: &Task) -> i64 {
        self.weights
            .get(&task.category)
            .copied()
            .unwrap_or(UNKNOWN_CATEGORY_PRIORITY)
    }
}

/// Run-time selector for the built-in strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    Manual,
    Date,
    Category,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 3] = [Self::Manual, Self::Date, Self::Category];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Date => "date",
            Self::Category => "category",
        }
    }
}

impl Display for StrategyKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "manual" => Ok(Self::Manual),
            "date" | "deadline" => Ok(Self::Date),
            "category" => Ok(Self::Category),
            other => Err(format!(
                "unsupported priority strategy `{other}`; expected manual|date|category"
            )),
        }
    }
}

/// Builds the strategy for `kind`, reading category weights from `config`.
pub fn build_strategy(kind: StrategyKind, config: &CoreConfig) -> Box<dyn PriorityStrategy> {
    match kind {
        StrategyKind::Manual => Box::new(ManualPriorityStrategy),
        StrategyKind::Date => Box::new(DatePriorityStrategy::new()),
        StrategyKind::Category => Box::new(CategoryPriorityStrategy::new(
            config.category_weights.clone(),
        )),
    }
}
