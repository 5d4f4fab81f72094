use clap::Parser;
use tickoff::cli::commands::Cli;
use tickoff::cli::handlers;
use tickoff::io::config_io::read_config;
use tickoff::io::data_dir::resolve_data_dir;
use tickoff::logging::{default_log_level, init_logging};

fn main() {
    let cli = Cli::parse();
    let data_dir = resolve_data_dir(cli.data_dir.as_deref());

    let config = match read_config(&data_dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let level = config.log.level.as_deref().unwrap_or(default_log_level());
    if let Err(e) = init_logging(level, &data_dir.join("logs")) {
        eprintln!("warning: logging disabled: {}", e);
    }

    let result = match cli.command {
        // No subcommand → launch TUI
        None => tickoff::tui::run(&data_dir, config),
        Some(_) => handlers::dispatch(cli, &data_dir),
    };
    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
