use crate::commands::open_store;
use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use scripta_common::KeyValueStorage;
use scripta_editor::{Mutation, ScriptStore};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Script id
    pub id: String,

    /// JSON file holding an array of mutations
    pub mutations: PathBuf,
}

/// Outcome of applying a mutation batch
#[derive(Debug, Default)]
pub(crate) struct BatchReport {
    pub applied: usize,
    /// (position in batch, reason)
    pub rejected: Vec<(usize, String)>,
}

pub(crate) fn apply_batch<S: KeyValueStorage>(
    store: &mut ScriptStore<S>,
    batch: Vec<Mutation>,
) -> BatchReport {
    let mut report = BatchReport::default();

    for (index, mutation) in batch.into_iter().enumerate() {
        match store.try_apply(mutation) {
            Ok(_) => report.applied += 1,
            Err(err) => report.rejected.push((index, err.to_string())),
        }
    }

    report
}

pub fn edit(args: EditArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let mut store = open_store(&config, cwd)?;
    store
        .try_load(Some(&args.id))
        .with_context(|| format!("Cannot load script {}", args.id))?;

    let json = fs::read_to_string(&args.mutations)
        .with_context(|| format!("Cannot read {}", args.mutations.display()))?;
    let batch: Vec<Mutation> =
        serde_json::from_str(&json).context("Mutation file must be a JSON array of mutations")?;
    let total = batch.len();

    let report = apply_batch(&mut store, batch);

    for (index, reason) in &report.rejected {
        eprintln!("  {} #{} {}", "✗".red(), index + 1, reason.red());
    }

    if report.applied > 0 {
        store.save()?;
    }

    let summary = format!("Applied {} of {} mutations", report.applied, total);
    if report.rejected.is_empty() {
        println!("{} {}", "✓".green(), summary);
    } else {
        println!("{} {}", "⚠️".yellow(), summary);
    }

    Ok(())
}
