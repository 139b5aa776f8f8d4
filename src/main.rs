use clap::Parser;
use std::path::Path;

use materials_drawer::cli::{Cli, Commands};
use materials_drawer::config::Config;
use materials_drawer::library::Library;
use materials_drawer::{main_lib, Drawer, Result};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Log to a file when MATERIALS_DRAWER_LOG is set, to stderr with --verbose
    if let Ok(log_file) = std::env::var("MATERIALS_DRAWER_LOG") {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)?;
        env_logger::Builder::new()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else if cli.verbose {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Debug)
            .init();
    }

    log::info!("Materials drawer starting up");

    let config = Config::load(cli.config.as_deref().map(Path::new))?;
    let library = Library::load(cli.library.as_deref().map(Path::new))?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let mut drawer = Drawer::new(library, &config);
            drawer.open();
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            main_lib::run_interactive(&mut drawer, stdin, &mut stdout, config.toast_duration())
                .await
        }
        Commands::Execute { commands, output } => {
            let mut drawer = Drawer::new(library, &config);
            drawer.open();
            main_lib::execute_commands(&mut drawer, &commands, output.as_deref())
        }
        Commands::DumpLibrary { output } => main_lib::dump_library(&library, output.as_deref()),
    }
}
