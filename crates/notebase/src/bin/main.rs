//! Notebase CLI

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use notebase::prelude::*;
use notebase::{load_config, load_store, save_store};
use notebase_export::{ExportFormat, StoreStatsExporter, StoreStatsRecord};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Notebase - personal knowledge base over a JSON snapshot
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// YAML configuration file
    #[arg(short, long, env = "NOTEBASE_CONFIG")]
    config: Option<PathBuf>,

    /// Snapshot file to read (and write, for mutating commands)
    #[arg(short, long, env = "NOTEBASE_SNAPSHOT")]
    snapshot: Option<PathBuf>,

    /// Log filter, overriding RUST_LOG and the configured level
    #[arg(long)]
    log_level: Option<String>,

    /// Emit compact JSON instead of pretty-printed output
    #[arg(long, action = clap::ArgAction::SetTrue)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Note, folder, tag and link statistics
    Stats {
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,
    },
    /// Search notes; any filter flag switches to advanced search
    Search {
        /// Text to look for (case-insensitive)
        query: Option<String>,
        /// Field the text must occur in: all, title, content, path
        #[arg(long)]
        scope: Option<ContentScope>,
        /// Only notes updated within: all, 7d, 30d, 90d
        #[arg(long)]
        since: Option<DateRange>,
        /// Require one of these tags (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Require one of these folders (repeatable)
        #[arg(long = "folder")]
        folders: Vec<String>,
    },
    /// Notes linking to a title
    Backlinks { title: String },
    /// Node and edge lists for rendering
    Graph,
    /// Folder tree with recursive note counts
    Folders,
    /// Create a note and save the snapshot
    New {
        title: String,
        #[arg(long, default_value = "")]
        content: String,
        #[arg(long)]
        folder: Option<String>,
    },
    /// Print the effective configuration as YAML
    Config,
    /// Per-note CSV index
    ExportCsv {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    Json,
    Csv,
}

impl From<OutputFormat> for ExportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => ExportFormat::Json,
            OutputFormat::Csv => ExportFormat::Csv,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = load_config(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(snapshot) = &args.snapshot {
        config.snapshot_path = Some(snapshot.clone());
    }
    if args.compact {
        config.pretty_json = false;
    }

    let filter = match &args.log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    log::debug!("Notebase v{}", env!("CARGO_PKG_VERSION"));

    if let Command::Config = args.command {
        print!("{}", config.to_yaml()?);
        return Ok(());
    }

    let Some(snapshot_path) = config.snapshot_path.clone() else {
        bail!("No snapshot file: pass --snapshot, set NOTEBASE_SNAPSHOT or snapshot_path");
    };
    let mut store = load_store(&snapshot_path)
        .await
        .with_context(|| format!("Failed to load snapshot {}", snapshot_path.display()))?;

    let pretty = config.pretty_json;
    match args.command {
        Command::Stats { format } => {
            let stats = StoreStatsRecord::from_store(&store);
            println!("{}", StoreStatsExporter::export(&stats, format.into())?);
        }
        Command::Search {
            query,
            scope,
            since,
            tags,
            folders,
        } => {
            let engine = SearchEngine::with_config(&store, &config);
            let advanced = scope.is_some() || since.is_some() || !tags.is_empty() || !folders.is_empty();

            let results = if advanced {
                let mut search = SearchQuery::new(query.unwrap_or_default())
                    .with_tags(tags)
                    .in_folders(folders);
                if let Some(scope) = scope {
                    search = search.scope(scope);
                }
                if let Some(since) = since {
                    search = search.updated_within(since);
                }
                engine.run(search)
            } else {
                engine.search(query.as_deref().unwrap_or_default())
            };

            log::info!("{} notes matched", results.len());
            print_json(&engine.hits(&results), pretty)?;
        }
        Command::Backlinks { title } => {
            let engine = SearchEngine::new(&store);
            let backlinks = store.backlinks_of(&title);
            print_json(&engine.hits(&backlinks), pretty)?;
        }
        Command::Graph => {
            println!("{}", GraphExport::from_store(&store).to_json(pretty)?);
        }
        Command::Folders => {
            let hierarchy = store.folders();
            let tree: Vec<_> = hierarchy
                .folders()
                .map(|folder| {
                    serde_json::json!({
                        "folder": folder,
                        "notes": hierarchy.notes_in(folder).len(),
                        "totalNotes": hierarchy.note_count(folder),
                    })
                })
                .collect();
            print_json(&tree, pretty)?;
        }
        Command::New {
            title,
            content,
            folder,
        } => {
            if title.trim().is_empty() {
                bail!("Note title cannot be empty");
            }
            let note = store.create(title, content, folder.as_deref());
            println!("{}", note.id());
            save_store(&store, &snapshot_path, pretty)
                .await
                .with_context(|| format!("Failed to save snapshot {}", snapshot_path.display()))?;
        }
        Command::Config => unreachable!("handled before the snapshot is loaded"),
        Command::ExportCsv { output } => {
            let csv = NoteIndexExporter::to_csv(&store)?;
            match output {
                Some(path) => {
                    tokio::fs::write(&path, csv)
                        .await
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    log::info!("Wrote note index to {}", path.display());
                }
                None => print!("{}", csv),
            }
        }
    }

    Ok(())
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T, pretty: bool) -> Result<()> {
    println!("{}", notebase_core::to_json_string(value, "output", pretty)?);
    Ok(())
}
