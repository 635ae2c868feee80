mod commands;
mod config;
mod printer;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    edit, export, init, new_script, scenes, stats, EditArgs, ExportArgs, InitArgs, NewArgs,
    ScriptTarget,
};
use tracing_subscriber::EnvFilter;

/// Scripta - screenplay authoring from the command line
#[derive(Parser, Debug)]
#[command(name = "scripta")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Show debug logs
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a scripta.config.json in the current directory
    Init(InitArgs),

    /// Create and save a new script
    New(NewArgs),

    /// Apply a JSON batch of mutations to a saved script
    Edit(EditArgs),

    /// Export a script as Fountain text or print HTML
    Export(ExportArgs),

    /// Page count, runtime and dialogue/action split
    Stats(ScriptTarget),

    /// List scenes grouped by act
    Scenes(ScriptTarget),
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "scripta=debug" } else { "scripta=info" };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?.display().to_string();

    match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::New(args) => new_script(args, &cwd),
        Command::Edit(args) => edit(args, &cwd),
        Command::Export(args) => export(args, &cwd),
        Command::Stats(target) => stats(target, &cwd),
        Command::Scenes(target) => scenes(target, &cwd),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
