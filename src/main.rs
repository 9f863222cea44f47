use clap::Parser;
use chaos_todo::cli::commands::Cli;
use chaos_todo::cli::handlers::{self, ConsoleSurface};
use chaos_todo::io::config_io;
use chaos_todo::io::logging::init_logging;
use chaos_todo::io::store::FileStore;
use chaos_todo::ops::task_list::{ListOptions, TaskList};

fn main() {
    if let Err(e) = run(Cli::parse()) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(config_io::default_config_path);
    let config = config_io::read_config(&config_path)?;

    init_logging(&config_io::resolve_log_path(&config), &config.log.level);

    let store_path = config_io::resolve_store_path(&config, cli.store.as_deref());
    tracing::info!("using store {}", store_path.display());
    let store = FileStore::open(store_path)?;
    let mut list = TaskList::new(store, ListOptions::from(&config));

    match cli.command {
        None => {
            // No subcommand → launch TUI
            chaos_todo::tui::run(&mut list, &config.ui)
        }
        Some(command) => {
            let stdin = std::io::stdin();
            list.initialize(&mut ConsoleSurface::new(stdin.lock(), false));
            handlers::dispatch(command, &mut list, stdin.lock(), cli.json)
        }
    }
}
