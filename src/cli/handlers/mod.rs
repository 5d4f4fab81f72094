use std::path::Path;

use log::info;
use regex::Regex;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::storage::JsonFileStorage;
use crate::ops::progress::Progress;
use crate::ops::task_store::{Mutation, TaskStore, moved};

/// Errors the command line reports before touching the store
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("no task #{number} (the list has {len})")]
    NoSuchTask { number: usize, len: usize },
    #[error("invalid --grep pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

type CliStore = TaskStore<JsonFileStorage>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli, data_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let Some(cmd) = cli.command else {
        return Ok(());
    };
    let mut store = TaskStore::open(JsonFileStorage::new(data_dir));

    match cmd {
        // Read commands
        Commands::List(args) => cmd_list(&store, args, json),
        Commands::Stats => cmd_stats(&store, json),

        // Write commands
        Commands::Add(args) => cmd_add(&mut store, args),
        Commands::Toggle(args) => cmd_toggle(&mut store, args),
        Commands::Rename(args) => cmd_rename(&mut store, args),
        Commands::Rm(args) => cmd_rm(&mut store, args),
        Commands::Mv(args) => cmd_mv(&mut store, args),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Turn a 1-based task number into an index, or report it out of range.
fn resolve_number(store: &CliStore, number: usize) -> Result<usize, CliError> {
    if number == 0 || number > store.len() {
        return Err(CliError::NoSuchTask {
            number,
            len: store.len(),
        });
    }
    Ok(number - 1)
}

fn print_task(store: &CliStore, index: usize) {
    if let Some(task) = store.get(index) {
        println!(
            "{}",
            format_task_line(index + 1, task, number_width(store.len()))
        );
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(store: &CliStore, args: ListArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let pattern = args.grep.as_deref().map(Regex::new).transpose().map_err(CliError::from)?;

    let selected: Vec<(usize, &crate::model::task::Task)> = store
        .tasks()
        .iter()
        .enumerate()
        .map(|(i, task)| (i + 1, task))
        .filter(|(_, task)| {
            if args.todo && task.completed {
                return false;
            }
            if args.done && !task.completed {
                return false;
            }
            if let Some(re) = &pattern
                && !re.is_match(&task.name)
            {
                return false;
            }
            true
        })
        .collect();

    if json {
        let results: Vec<TaskJson> = selected
            .iter()
            .map(|(number, task)| task_to_json(*number, task))
            .collect();
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        let width = number_width(store.len());
        for (number, task) in &selected {
            println!("{}", format_task_line(*number, task, width));
        }
    }
    Ok(())
}

fn cmd_stats(store: &CliStore, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let progress = Progress::of(store.tasks());
    if json {
        println!("{}", serde_json::to_string_pretty(&stats_to_json(&progress))?);
    } else {
        for line in format_stats(&progress) {
            println!("{}", line);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(store: &mut CliStore, args: AddArgs) -> Result<(), Box<dyn std::error::Error>> {
    // Blank names are dropped silently, same as in the UI
    if store.add(&args.text.join(" "))? == Mutation::Applied {
        info!("event=cli_add count={}", store.len());
        print_task(store, store.len() - 1);
    }
    Ok(())
}

fn cmd_toggle(store: &mut CliStore, args: TaskNumberArg) -> Result<(), Box<dyn std::error::Error>> {
    let index = resolve_number(store, args.number)?;
    store.toggle(index)?;
    print_task(store, index);
    Ok(())
}

fn cmd_rename(store: &mut CliStore, args: RenameArgs) -> Result<(), Box<dyn std::error::Error>> {
    let index = resolve_number(store, args.number)?;
    if store.rename(index, &args.text.join(" "))? == Mutation::Applied {
        print_task(store, index);
    }
    Ok(())
}

fn cmd_rm(store: &mut CliStore, args: TaskNumberArg) -> Result<(), Box<dyn std::error::Error>> {
    let index = resolve_number(store, args.number)?;
    let name = store.tasks()[index].name.clone();
    store.delete(index)?;
    println!("removed: {}", name);
    Ok(())
}

fn cmd_mv(store: &mut CliStore, args: MvArgs) -> Result<(), Box<dyn std::error::Error>> {
    let from = resolve_number(store, args.from)?;
    let to = resolve_number(store, args.to)?;
    if from != to {
        let order = moved(store.tasks(), from, to);
        store.reorder(order)?;
    }
    print_task(store, to);
    Ok(())
}
