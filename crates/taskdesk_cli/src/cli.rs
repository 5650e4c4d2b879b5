//! Command-line surface.

use crate::draft::TaskDraft;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use taskdesk_core::StrategyKind;

#[derive(Debug, Parser)]
#[command(name = "taskdesk", version, about = "Single-user task manager")]
pub struct Cli {
    /// Task collection file (overrides the settings file).
    #[arg(long, global = true)]
    pub data_file: Option<PathBuf>,

    /// JSON settings file with `data_file` and `category_weights`.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long, global = true)]
    pub log_dir: Option<String>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the task table.
    List {
        /// Sort by priority before listing.
        #[arg(long)]
        sort: bool,
        /// With --sort, lowest priority first.
        #[arg(long, requires = "sort")]
        ascending: bool,
    },
    /// Print one task.
    Show { id: String },
    /// Create a task.
    Add(TaskFields),
    /// Change fields of an existing task.
    Edit {
        id: String,
        #[command(flatten)]
        fields: TaskFields,
    },
    /// Remove a task.
    Delete { id: String },
    /// Reorder the stored collection by priority.
    Sort {
        #[arg(long)]
        ascending: bool,
    },
    /// Recompute one task's priority.
    Prioritize {
        id: String,
        /// manual|date|category
        #[arg(long)]
        strategy: StrategyKind,
    },
    /// Recompute every task's priority.
    PrioritizeAll {
        /// manual|date|category
        #[arg(long)]
        strategy: StrategyKind,
    },
}

/// Editor form fields. Unset fields keep their current value.
#[derive(Debug, Clone, Default, Args)]
pub struct TaskFields {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    /// YYYY-MM-DD; other text is stored as-is.
    #[arg(long)]
    pub deadline: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    /// Integer; non-numeric input falls back to the default.
    #[arg(long)]
    pub priority: Option<String>,
}

impl TaskFields {
    /// Overlays the provided fields onto `draft`.
    pub fn merge_into(self, mut draft: TaskDraft) -> TaskDraft {
        if let Some(title) = self.title {
            draft.title = title;
        }
        if let Some(description) = self.description {
            draft.description = description;
        }
        if let Some(category) = self.category {
            draft.category = category;
        }
        if let Some(deadline) = self.deadline {
            draft.deadline = deadline;
        }
        if let Some(status) = self.status {
            draft.status = status;
        }
        if let Some(priority) = self.priority {
            draft.priority = priority;
        }
        draft
    }
}
