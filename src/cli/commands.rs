use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tk", about = concat!("[x] tickoff v", env!("CARGO_PKG_VERSION"), " - a to-do list you can finish"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different data directory
    #[arg(short = 'C', long = "data-dir", global = true)]
    pub data_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a task to the bottom of the list
    Add(AddArgs),
    /// List tasks with their numbers
    List(ListArgs),
    /// Mark a task done, or not done again
    Toggle(TaskNumberArg),
    /// Change a task's name
    Rename(RenameArgs),
    /// Delete a task
    Rm(TaskNumberArg),
    /// Move a task to another position
    Mv(MvArgs),
    /// Show completion statistics
    Stats,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task name (words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

#[derive(Args)]
pub struct ListArgs {
    /// Only tasks still to do
    #[arg(long, conflicts_with = "done")]
    pub todo: bool,
    /// Only completed tasks
    #[arg(long)]
    pub done: bool,
    /// Only tasks whose name matches this regex
    #[arg(long)]
    pub grep: Option<String>,
}

#[derive(Args)]
pub struct TaskNumberArg {
    /// Task number as shown by `tk list` (1-based)
    pub number: usize,
}

#[derive(Args)]
pub struct RenameArgs {
    /// Task number as shown by `tk list` (1-based)
    pub number: usize,
    /// New name (words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

#[derive(Args)]
pub struct MvArgs {
    /// Task number to move
    pub from: usize,
    /// Position it should end up at
    pub to: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_tui() {
        let cli = Cli::try_parse_from(["tk"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.json);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["tk", "list", "--json", "-C", "/tmp/x"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.data_dir.as_deref(), Some("/tmp/x"));
    }

    #[test]
    fn add_joins_words() {
        let cli = Cli::try_parse_from(["tk", "add", "Buy", "milk"]).unwrap();
        match cli.command {
            Some(Commands::Add(args)) => assert_eq!(args.text, vec!["Buy", "milk"]),
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn todo_and_done_conflict() {
        assert!(Cli::try_parse_from(["tk", "list", "--todo", "--done"]).is_err());
    }

    #[test]
    fn non_numeric_task_number_is_rejected() {
        assert!(Cli::try_parse_from(["tk", "toggle", "first"]).is_err());
    }
}
