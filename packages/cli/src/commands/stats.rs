use crate::commands::{load_target, open_store, ScriptTarget};
use crate::config::Config;
use anyhow::Result;
use colored::Colorize;

const TOP_CHARACTERS: usize = 5;

pub fn stats(target: ScriptTarget, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let mut store = open_store(&config, cwd)?;
    load_target(&mut store, &target)?;

    let analytics = store.analytics();

    println!("{}", store.document().title().bright_white().bold());
    println!("  Pages:       {}", analytics.page_count);
    println!("  Runtime:     ~{} min", analytics.runtime_minutes);
    println!("  Scenes:      {}", analytics.scene_count);
    println!("  Characters:  {}", analytics.character_count);
    println!(
        "  Dialogue:    {}%  Action: {}%  ({})",
        analytics.dialogue, analytics.action, analytics.ratio
    );

    let top = analytics.top_characters(TOP_CHARACTERS);
    if !top.is_empty() {
        println!();
        println!("{}", "Top characters".bright_blue().bold());
        for character in top {
            println!(
                "  {:<20} {} cues, {} scenes",
                character.name,
                character.dialogue_count,
                character.scene_appearances.len()
            );
        }
    }

    Ok(())
}
