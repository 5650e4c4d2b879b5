//! Command execution against the task manager.
//!
//! # Responsibility
//! - Resolve settings and the data file, then open `TaskManager`.
//! - Map each subcommand onto the manager's CRUD + listing contract.
//!
//! # Invariants
//! - Lookups happen before edit/delete so unknown ids are reported, not
//!   silently persisted.
//! - Listing never reorders storage unless `--sort` is passed.

use crate::cli::{Cli, Command, TaskFields};
use crate::draft::TaskDraft;
use crate::render::{write_detail, write_table};
use log::info;
use std::error::Error;
use std::io::Write;
use std::path::PathBuf;
use taskdesk_core::{
    build_strategy, CoreConfig, JsonTaskStore, PriorityStrategy, TaskManager, DEFAULT_PRIORITY,
};

pub type CommandResult = Result<(), Box<dyn Error>>;

/// Settings file (if any) overlaid with command-line overrides.
pub fn resolve_config(cli: &Cli) -> Result<CoreConfig, Box<dyn Error>> {
    let mut config = match &cli.config {
        Some(path) => CoreConfig::load(path)?,
        None => CoreConfig::default(),
    };
    if let Some(data_file) = &cli.data_file {
        config.data_file = data_file.clone();
    }
    Ok(config)
}

pub fn open_manager(data_file: PathBuf) -> Result<TaskManager<JsonTaskStore>, Box<dyn Error>> {
    let store = JsonTaskStore::open(data_file)?;
    Ok(TaskManager::new(store)?)
}

pub fn run(cli: Cli, out: &mut impl Write) -> CommandResult {
    let config = resolve_config(&cli)?;
    let mut manager = open_manager(config.data_file.clone())?;
    info!(
        "event=cli_command module=cli status=start data_file={}",
        config.data_file.display()
    );

    match cli.command {
        Command::List { sort, ascending } => {
            if sort {
                manager.sort_tasks(!ascending)?;
            }
            write_table(out, manager.get_all_tasks())?;
        }
        Command::Show { id } => {
            let task = manager
                .get_task(&id)
                .ok_or_else(|| format!("task not found: {id}"))?;
            write_detail(out, task)?;
        }
        Command::Add(fields) => {
            let draft = fields.merge_into(TaskDraft::default());
            let id = manager.add_task(draft.to_new_task(DEFAULT_PRIORITY))?;
            writeln!(out, "added {id}")?;
        }
        Command::Edit { id, fields } => edit(&mut manager, &id, fields, out)?,
        Command::Delete { id } => {
            if manager.get_task(&id).is_none() {
                return Err(format!("task not found: {id}").into());
            }
            let removed = manager.delete_task(&id)?;
            writeln!(out, "deleted {id} ({removed} removed)")?;
        }
        Command::Sort { ascending } => {
            manager.sort_tasks(!ascending)?;
            write_table(out, manager.get_all_tasks())?;
        }
        Command::Prioritize { id, strategy } => {
            let strategy = build_strategy(strategy, &config);
            let priority = manager
                .apply_priority(&id, strategy.as_ref())?
                .ok_or_else(|| format!("task not found: {id}"))?;
            writeln!(out, "{id} priority={priority} strategy={}", strategy.name())?;
        }
        Command::PrioritizeAll { strategy } => {
            let strategy = build_strategy(strategy, &config);
            let count = manager.apply_priority_all(strategy.as_ref())?;
            writeln!(out, "reprioritized {count} task(s) strategy={}", strategy.name())?;
        }
    }

    Ok(())
}

fn edit(
    manager: &mut TaskManager<JsonTaskStore>,
    id: &str,
    fields: TaskFields,
    out: &mut impl Write,
) -> CommandResult {
    let mut task = manager
        .get_task(id)
        .cloned()
        .ok_or_else(|| format!("task not found: {id}"))?;

    let current_priority = task.priority;
    let draft = fields.merge_into(TaskDraft::from_task(&task));
    draft.apply_to(&mut task, current_priority);
    manager.update_task(task)?;
    writeln!(out, "updated {id}")?;
    Ok(())
}
