use crate::commands::open_store;
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Script title
    #[arg(short, long)]
    pub title: Option<String>,

    /// Author name
    #[arg(short, long)]
    pub author: Option<String>,
}

pub fn new_script(args: NewArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let mut store = open_store(&config, cwd)?;

    if let Some(title) = args.title {
        store.set_title(title);
    }
    if let Some(author) = args.author {
        store.set_author(author);
    }
    store.save()?;

    let doc = store.document();
    println!("{} Created {}", "✓".green(), doc.title().bright_white());
    println!("  id: {}", doc.id());

    Ok(())
}
