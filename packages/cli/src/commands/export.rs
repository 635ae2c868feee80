use crate::commands::{load_target, open_store, ScriptTarget};
use crate::config::{Config, ExportFormat};
use crate::printer::FilePrinter;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use scripta_compiler_fountain::{compile_to_fountain, fountain_file_name};
use scripta_compiler_html::{compile_to_html, export_to_print, CompileOptions};
use scripta_model::{Element, ExportOptions};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub target: ScriptTarget,

    /// Output format (defaults to the configured format)
    #[arg(short, long, value_enum)]
    pub format: Option<ExportFormat>,

    /// Output file (defaults to `<title>.<ext>` in the current directory)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Write to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,

    /// Skip the HTML title page
    #[arg(long)]
    pub no_title_page: bool,
}

pub fn export(args: ExportArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let mut store = open_store(&config, cwd)?;
    load_target(&mut store, &args.target)?;

    let doc = store.document();
    let format = args.format.unwrap_or(config.default_format);
    let options = doc
        .export_options()
        .with_title_page(config.include_title_page && !args.no_title_page);

    if args.stdout {
        print!("{}", render(format, &options, doc.elements()));
        return Ok(());
    }

    let out = args
        .out
        .unwrap_or_else(|| PathBuf::from(cwd).join(default_file_name(format, doc.title())));

    match format {
        ExportFormat::Fountain => {
            write_file(&out, &compile_to_fountain(&options, doc.elements()))?;
        }
        ExportFormat::Html => {
            export_to_print(&mut FilePrinter::new(&out), &options, doc.elements())?;
        }
    }

    println!(
        "{} Exported {} → {}",
        "✓".green(),
        options.display_title().bright_white(),
        out.display()
    );

    Ok(())
}

fn render(format: ExportFormat, options: &ExportOptions, elements: &[Element]) -> String {
    match format {
        ExportFormat::Fountain => compile_to_fountain(options, elements),
        ExportFormat::Html => compile_to_html(options, elements, CompileOptions::default()),
    }
}

/// `<title or "screenplay">.<ext>`, with path separators replaced
fn default_file_name(format: ExportFormat, title: &str) -> String {
    let safe_title = title.replace(['/', '\\'], "-");
    let name = fountain_file_name(&safe_title);
    match format {
        ExportFormat::Fountain => name,
        ExportFormat::Html => Path::new(&name)
            .with_extension(format.extension())
            .display()
            .to_string(),
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content)?;
    Ok(())
}
