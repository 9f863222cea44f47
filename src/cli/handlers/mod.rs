mod console;
pub use console::ConsoleSurface;

use std::io::BufRead;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::store::KeyValueStore;
use crate::model::task::{Priority, TaskId};
use crate::ops::task_list::{TaskError, TaskList};
use crate::view::html::{render_list_html, render_stats_html};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Run one subcommand against an initialized list.
///
/// Confirmations are read from `input` line by line.
pub fn dispatch<S: KeyValueStore, R: BufRead>(
    command: Commands,
    list: &mut TaskList<S>,
    input: R,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        // Read commands
        Commands::List(args) => cmd_list(list, input, args, json),
        Commands::Stats => cmd_stats(list, json),
        Commands::Html(args) => cmd_html(list, input, args),

        // Write commands
        Commands::Add(args) => cmd_add(list, input, args, json),
        Commands::Toggle(args) => cmd_toggle(list, input, args, json),
        Commands::Delete(args) => cmd_delete(list, input, args, json),
        Commands::Clear(args) => cmd_clear(list, input, args, json),
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list<S: KeyValueStore, R: BufRead>(
    list: &mut TaskList<S>,
    input: R,
    args: FilterArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut surface = ConsoleSurface::new(input, false);
    list.set_filter(&mut surface, &args.filter);

    if json {
        println!("{}", serde_json::to_string_pretty(&list.filtered_tasks())?);
        return Ok(());
    }

    let view = list.list_view();
    if view.is_empty() {
        println!("No tasks");
    }
    for row in &view.rows {
        println!("{}", format_task_line(row));
    }
    Ok(())
}

fn cmd_stats<S: KeyValueStore>(
    list: &TaskList<S>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let stats = list.stats();
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("{}", format_stats(stats));
    }
    Ok(())
}

fn cmd_html<S: KeyValueStore, R: BufRead>(
    list: &mut TaskList<S>,
    input: R,
    args: FilterArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut surface = ConsoleSurface::new(input, false);
    list.set_filter(&mut surface, &args.filter);
    println!("{}", render_stats_html(list.stats()));
    println!("{}", render_list_html(&list.list_view()));
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add<S: KeyValueStore, R: BufRead>(
    list: &mut TaskList<S>,
    input: R,
    args: AddArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let priority: Priority = args
        .priority
        .parse()
        .map_err(|_| TaskError::InvalidPriority(args.priority.clone()))?;
    let text = args.text.join(" ");

    let mut surface = ConsoleSurface::new(input, false);
    let id = list
        .add_task(&mut surface, &text, priority)
        .ok_or(TaskError::EmptyText)?;
    print_task(list, id, json)
}

fn cmd_toggle<S: KeyValueStore, R: BufRead>(
    list: &mut TaskList<S>,
    input: R,
    args: IdArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut surface = ConsoleSurface::new(input, false);
    if !list.toggle_task(&mut surface, args.id) {
        return Err(TaskError::NotFound(args.id).into());
    }
    print_task(list, args.id, json)
}

fn cmd_delete<S: KeyValueStore, R: BufRead>(
    list: &mut TaskList<S>,
    input: R,
    args: DeleteArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if list.find(args.id).is_none() {
        return Err(TaskError::NotFound(args.id).into());
    }

    let mut surface = ConsoleSurface::new(input, args.yes);
    let deleted = list.delete_task(&mut surface, args.id);
    if json {
        println!("{}", serde_json::json!({ "deleted": deleted, "id": args.id }));
    } else if deleted {
        println!("deleted {}", args.id);
    } else {
        println!("cancelled");
    }
    Ok(())
}

fn cmd_clear<S: KeyValueStore, R: BufRead>(
    list: &mut TaskList<S>,
    input: R,
    args: ClearArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let pending = list.stats().completed;

    let mut surface = ConsoleSurface::new(input, args.yes);
    let cleared = list.clear_completed(&mut surface);
    if json {
        println!("{}", serde_json::json!({ "cleared": cleared }));
    } else if cleared > 0 {
        println!("cleared {} task{}", cleared, plural(cleared));
    } else if pending > 0 {
        println!("cancelled");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn print_task<S: KeyValueStore>(
    list: &TaskList<S>,
    id: TaskId,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let task = list.find(id).ok_or(TaskError::NotFound(id))?;
    if json {
        println!("{}", serde_json::to_string_pretty(task)?);
        return Ok(());
    }
    let row = list
        .list_view()
        .rows
        .into_iter()
        .find(|r| r.id == id);
    match row {
        Some(row) => println!("{}", format_task_line(&row)),
        // Hidden by the current filter
        None => println!("{} {}", if task.completed { "done" } else { "open" }, id),
    }
    Ok(())
}
