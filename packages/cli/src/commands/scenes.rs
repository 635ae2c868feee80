use crate::commands::{load_target, open_store, ScriptTarget};
use crate::config::Config;
use anyhow::Result;
use colored::Colorize;

pub fn scenes(target: ScriptTarget, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let mut store = open_store(&config, cwd)?;
    load_target(&mut store, &target)?;

    for (act, scenes) in store.act_groups().iter() {
        println!("{}", act.bright_blue().bold());

        if scenes.is_empty() {
            println!("  {}", "(no scenes)".dimmed());
            continue;
        }

        for scene in scenes {
            let heading = if scene.heading.is_empty() {
                "(untitled scene)".dimmed().to_string()
            } else {
                scene.heading.clone()
            };
            let size = format!("{} elements", scene.element_ids.len());
            println!("  {:>3}. {}  {}", scene.number, heading, size.dimmed());
        }
    }

    Ok(())
}
