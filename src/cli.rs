use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "materials-drawer")]
#[command(about = "Browse teaching materials, course catalogues and tool panels")]
pub struct Cli {
    /// Path to a JSON configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,
    /// Path to a JSON library (forests and catalogue); the built-in demo library by default
    #[arg(short, long, global = true)]
    pub library: Option<String>,
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Read commands from stdin and print the drawer state after each (default)
    Run,
    /// Apply commands in order and print the resulting state as JSON
    Execute {
        /// Commands to apply (e.g. "tab:mine", "enter:m-f1", "mkdir:笔记")
        #[arg(required = true)]
        commands: Vec<String>,
        /// Output file for the resulting state (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print the library as JSON
    DumpLibrary {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
}
