use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

use badgekit::designer::symmetry::check_invariant;
use badgekit::{
    format_mm, init_logging, BadgeDocument, Config, DocumentStore, FileDocumentStore,
    FormatPreset, Point, BUILD_DATE, VERSION,
};

/// Inspect and create BadgeKit badge documents.
#[derive(Debug, Parser)]
#[command(name = "badgekit", version)]
struct Cli {
    /// Config file (defaults to the per-user config)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print a summary of a document and check its symmetry pairs
    Inspect { file: PathBuf },
    /// Print the template variables used by a document
    Variables { file: PathBuf },
    /// Write an empty document
    New {
        file: PathBuf,
        #[arg(long, default_value = "large")]
        format: FormatPreset,
        #[arg(long, default_value = "Untitled badge")]
        name: String,
    },
    /// List documents in the configured document store
    List,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.json_logs)?;
    tracing::debug!("badgekit {} (built {})", VERSION, BUILD_DATE);

    let config = match &cli.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::load_or_default(),
    };

    match cli.command {
        Command::Inspect { file } => inspect(&file, &config),
        Command::Variables { file } => {
            let mut document = BadgeDocument::load_from_file(&file)?;
            document.refresh_variables();
            for name in &document.variables {
                println!("{}", name);
            }
            Ok(())
        }
        Command::New { file, format, name } => {
            if file.exists() {
                bail!("{} already exists", file.display());
            }
            BadgeDocument::new(name, format.format()).save_to_file(&file)?;
            tracing::info!("Created {} on {}", file.display(), format);
            Ok(())
        }
        Command::List => {
            let store = FileDocumentStore::from_settings(&config.storage);
            for id in store.list()? {
                println!("{}", id);
            }
            Ok(())
        }
    }
}

fn inspect(file: &Path, config: &Config) -> anyhow::Result<()> {
    let document = BadgeDocument::load_from_file(file)?;
    let dpi = config.designer.dpi;
    let (width, height) = document.format.pixel_size(dpi);
    let (cx, cy) = document.format.center(dpi);

    println!("{}", document.metadata.name);
    let preset = document
        .format
        .preset()
        .map_or_else(|| "custom".to_string(), |p| p.to_string());
    println!("  format:    {} [{}]", document.format, preset);
    println!(
        "  canvas:    {} x {} px @ {} dpi ({} x {})",
        width,
        height,
        dpi,
        format_mm(width, dpi),
        format_mm(height, dpi)
    );
    println!("  elements:  {}", document.elements.len());
    println!("  images:    {}", document.uploaded_images.len());
    println!("  pairs:     {}", document.symmetry_pairs.len());
    println!("  variables: {}", document.variables.join(", "));

    let violations = check_invariant(
        &document.elements,
        &document.symmetry_pairs,
        Point::new(cx, cy),
        1e-6,
    );
    for v in &violations {
        println!(
            "  ! pair {} -> {}: {}",
            v.pair.parent_id, v.pair.clone_id, v.reason
        );
    }
    if !violations.is_empty() {
        bail!("{} symmetry pair(s) out of sync", violations.len());
    }
    Ok(())
}
