//! Plain-text table rendering for task listings.

use std::io::{self, Write};
use taskdesk_core::Task;

const COLUMNS: [(&str, usize); 7] = [
    ("ID", 36),
    ("Title", 20),
    ("Description", 28),
    ("Category", 14),
    ("Deadline", 12),
    ("Status", 12),
    ("Priority", 8),
];

pub fn write_table(out: &mut impl Write, tasks: &[Task]) -> io::Result<()> {
    let header: Vec<String> = COLUMNS
        .iter()
        .map(|(name, width)| cell(name, *width))
        .collect();
    writeln!(out, "{}", header.join(" | "))?;
    let rule: Vec<String> = COLUMNS.iter().map(|(_, width)| "-".repeat(*width)).collect();
    writeln!(out, "{}", rule.join("-+-"))?;

    for task in tasks {
        let values = [
            task.id.clone(),
            task.title.clone(),
            task.description.clone(),
            task.category.clone(),
            task.deadline.to_string(),
            task.status.clone(),
            task.priority.to_string(),
        ];
        let row: Vec<String> = values
            .iter()
            .zip(COLUMNS.iter())
            .map(|(value, (_, width))| cell(value, *width))
            .collect();
        writeln!(out, "{}", row.join(" | "))?;
    }

    writeln!(out, "{} task(s)", tasks.len())
}

pub fn write_detail(out: &mut impl Write, task: &Task) -> io::Result<()> {
    writeln!(out, "id:          {}", task.id)?;
    writeln!(out, "title:       {}", task.title)?;
    writeln!(out, "description: {}", task.description)?;
    writeln!(out, "category:    {}", task.category)?;
    writeln!(out, "deadline:    {}", task.deadline)?;
    writeln!(out, "status:      {}", task.status)?;
    writeln!(out, "priority:    {}", task.priority)
}

/// Pads or truncates `value` to exactly `width` characters.
fn cell(value: &str, width: usize) -> String {
    let flattened = value.replace(['\n', '\r'], " ");
    if flattened.chars().count() <= width {
        return format!("{flattened:<width$}");
    }
    let mut truncated: String = flattened.chars().take(width.saturating_sub(1)).collect();
    truncated.push('~');
    truncated
}

#[cfg(test)]
mod tests {
    use super::{cell, write_table};
    use chrono::NaiveDate;
    use taskdesk_core::Task;

    #[test]
    fn cell_pads_and_truncates() {
        assert_eq!(cell("ab", 4), "ab  ");
        assert_eq!(cell("abcdef", 4), "abc~");
        assert_eq!(cell("a\nb", 3), "a b");
    }

    #[test]
    fn table_lists_every_task() {
        let deadline = NaiveDate::from_ymd_opt(2025, 5, 4).expect("valid calendar date");
        let tasks = vec![
            Task::new("one", "", "Home", deadline).with_priority(3),
            Task::new("two", "", "Work", deadline),
        ];
        let mut out = Vec::new();
        write_table(&mut out, &tasks).expect("table should render");

        let text = String::from_utf8(out).expect("output should be utf-8");
        assert!(text.contains("Title"));
        assert!(text.contains("2025-05-04"));
        assert!(text.contains(&tasks[0].id));
        assert!(text.trim_end().ends_with("2 task(s)"));
    }
}
