//! Manage notebook notes and recurring tasks.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Subcommand;

use bloomlog_garden_model::garden::uuid_v4;
use bloomlog_garden_model::notebook::{ItemKind, Notebook, Recurrence, TimelineItem};
use bloomlog_garden_model::LoadedGarden;
use bloomlog_recurrence_engine::{extend_all, generate, split_delete, split_update, EditScope, Revision};

#[derive(Subcommand)]
pub enum NotebookAction {
    /// Add a note or task
    Add {
        /// Item title
        title: String,

        /// Create a task instead of a note
        #[arg(long)]
        task: bool,

        /// Longer description
        #[arg(long)]
        description: Option<String>,

        /// Item date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Recurrence (tasks only): none, weekly, biweekly, fourweekly, monthly, quarterly, yearly
        #[arg(long, default_value = "none")]
        recurrence: String,

        /// Attached photo path, relative to the garden root
        #[arg(long)]
        photo: Option<String>,
    },

    /// Toggle a task's completion flag
    Done {
        /// Item id
        id: String,
    },

    /// Edit an item
    Edit {
        /// Item id
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,

        /// New date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Edit scope for recurring tasks: single or future
        #[arg(long, default_value = "single")]
        scope: String,
    },

    /// Remove an item
    Remove {
        /// Item id
        id: String,

        /// Delete scope for recurring tasks: single or future
        #[arg(long, default_value = "single")]
        scope: String,
    },

    /// Top up every recurring series to the planning horizon
    Extend,

    /// List items in a date window
    List {
        /// Window start (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Window end, inclusive (defaults to one month from today)
        #[arg(long)]
        to: Option<NaiveDate>,
    },
}

pub fn run(path: PathBuf, action: NotebookAction) -> anyhow::Result<()> {
    let mut garden =
        LoadedGarden::load(&path).map_err(|e| anyhow::anyhow!("Failed to load garden: {e}"))?;
    let today = chrono::Local::now().date_naive();

    match action {
        NotebookAction::Add {
            title,
            task,
            description,
            date,
            recurrence,
            photo,
        } => {
            if title.trim().is_empty() {
                return Err(anyhow::anyhow!("Title must not be empty"));
            }
            let recurrence: Recurrence = recurrence.parse().map_err(|e| anyhow::anyhow!("{e}"))?;
            if !task && recurrence.is_recurring() {
                return Err(anyhow::anyhow!("Notes cannot recur; use --task"));
            }

            let base = TimelineItem {
                id: uuid_v4(),
                kind: if task { ItemKind::Task } else { ItemKind::Note },
                title,
                description,
                date: date.unwrap_or(today),
                photo_path: photo,
                done: false,
                recurrence,
                series_id: None,
            };

            let items = generate(&base, today);
            let count = items.len();
            println!("Added '{}' ({})", base.title, base.id);
            if count > 1 {
                println!("  Generated {} occurrences through the planning horizon", count);
            }
            garden.notebook.add_items(items);
        }

        NotebookAction::Done { id } => {
            let item = garden
                .notebook
                .find(&id)
                .ok_or_else(|| anyhow::anyhow!("Unknown item: {id}"))?;
            if item.kind != ItemKind::Task {
                return Err(anyhow::anyhow!("Only tasks can be completed"));
            }
            let mut edited = item.clone();
            edited.done = !edited.done;
            let state = if edited.done { "done" } else { "open" };
            garden.notebook.update_item(edited);
            println!("Task {id} marked {state}");
        }

        NotebookAction::Edit {
            id,
            title,
            description,
            date,
            scope,
        } => {
            let item = garden
                .notebook
                .find(&id)
                .ok_or_else(|| anyhow::anyhow!("Unknown item: {id}"))?;
            let mut edited = item.clone();
            if let Some(title) = title {
                if title.trim().is_empty() {
                    return Err(anyhow::anyhow!("Title must not be empty"));
                }
                edited.title = title;
            }
            if let Some(description) = description {
                edited.description = Some(description);
            }
            if let Some(date) = date {
                edited.date = date;
            }

            let scope = parse_scope(&scope)?;
            let revision = split_update(&garden.notebook.items, &edited, scope, today);
            let summary = apply(&mut garden.notebook, revision);
            println!("Edited {id} ({summary})");
        }

        NotebookAction::Remove { id, scope } => {
            let item = garden
                .notebook
                .find(&id)
                .ok_or_else(|| anyhow::anyhow!("Unknown item: {id}"))?
                .clone();
            let scope = parse_scope(&scope)?;
            let revision = split_delete(&garden.notebook.items, &item, scope);
            let summary = apply(&mut garden.notebook, revision);
            println!("Removed {id} ({summary})");
        }

        NotebookAction::Extend => {
            let extension = extend_all(&garden.notebook.items, today);
            let count = extension.count();
            garden.notebook.add_items(extension.added);
            println!("Extended recurring series: {count} occurrences added");
        }

        NotebookAction::List { from, to } => {
            let from = from.unwrap_or(today);
            let to = to.unwrap_or_else(|| {
                today
                    .checked_add_months(chrono::Months::new(1))
                    .unwrap_or(today)
            });
            let items = garden.notebook.window(from, to);
            println!("Notebook {from} .. {to} ({} items)", items.len());
            for item in items {
                let marker = match (item.kind, item.done) {
                    (ItemKind::Note, _) => " n ",
                    (ItemKind::Task, true) => "[x]",
                    (ItemKind::Task, false) => "[ ]",
                };
                let rule = if item.recurrence.is_recurring() {
                    format!(" ({:?})", item.recurrence).to_lowercase()
                } else {
                    String::new()
                };
                println!("  {} {} {}{}  {}", marker, item.date, item.title, rule, item.id);
            }
            return Ok(());
        }
    }

    garden
        .save()
        .map_err(|e| anyhow::anyhow!("Failed to save garden: {e}"))?;
    Ok(())
}

fn parse_scope(s: &str) -> anyhow::Result<EditScope> {
    match s {
        "single" => Ok(EditScope::Single),
        "future" => Ok(EditScope::Future),
        other => Err(anyhow::anyhow!("Unknown scope: {other}. Use: single, future")),
    }
}

/// Apply an engine revision to the notebook, returning a short summary.
fn apply(notebook: &mut Notebook, revision: Revision) -> String {
    let removed = notebook.delete_items(&revision.remove);
    let updated = revision.update.len();
    for item in revision.update {
        notebook.update_item(item);
    }
    let added = revision.add.len();
    notebook.add_items(revision.add);
    format!("{removed} removed, {updated} updated, {added} added")
}
