use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use manaview::{
    app::{App, EXPORT_FILE_NAME, EXPORT_MIME_TYPE},
    scryfall::ScryfallClient,
    storage::{BlobStore, MemoryStore, SledStore},
    value_utils::value_display,
    view::PAGE_SIZE_CHOICES,
};

#[derive(Debug, Parser)]
#[command(name = "manaview", version, about = "View, search, and analyze a card collection CSV")]
struct Cli {
    /// Directory for persisted data (overrides MANAVIEW_PATH)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load a collection CSV file and persist it for later commands
    Load { file: PathBuf },
    /// Load the bundled sample collection
    Sample,
    /// Print a page of the collection table
    View {
        /// Case-insensitive substring matched against every column
        #[arg(long, default_value = "")]
        search: String,
        /// Column to sort by
        #[arg(long)]
        sort: Option<String>,
        /// Sort descending instead of ascending
        #[arg(long)]
        desc: bool,
        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long, default_value_t = manaview::DEFAULT_PAGE_SIZE)]
        page_size: usize,
        /// Column to hide from the output (repeatable)
        #[arg(long = "hide")]
        hidden: Vec<String>,
    },
    /// List the collection's columns
    Columns,
    /// Print the estimated collection value
    Value,
    /// Resolve and print the card image URL for a row index
    Image { row: usize },
    /// Write the originally loaded CSV back out, byte for byte
    Export {
        #[arg(long, default_value = EXPORT_FILE_NAME)]
        out: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Store directory priority: --data-dir, MANAVIEW_PATH, the platform data
/// dir, then ~/.manaview as a last resort.
fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    if let Ok(env_path) = std::env::var("MANAVIEW_PATH") {
        return Ok(PathBuf::from(env_path));
    }
    if let Some(data_dir) = dirs::data_dir() {
        return Ok(data_dir.join("manaview"));
    }
    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".manaview"));
    }
    anyhow::bail!("could not determine a data directory: no HOME or platform data dir")
}

/// Opens the durable store, falling back to a volatile one when persistence
/// is unavailable so every command still works for this invocation.
fn open_store(data_dir: Option<PathBuf>) -> Arc<dyn BlobStore> {
    let path = match resolve_data_dir(data_dir) {
        Ok(dir) => dir.join("store.db"),
        Err(err) => {
            eprintln!("warning: {err:#}; continuing without persistence");
            return Arc::new(MemoryStore::new());
        }
    };
    match SledStore::open(&path) {
        Ok(store) => Arc::new(store),
        Err(err) => {
            eprintln!("warning: failed to open store at {:?}: {err:#}; continuing without persistence", path);
            Arc::new(MemoryStore::new())
        }
    }
}

fn open_app(data_dir: Option<PathBuf>) -> Result<App> {
    let store = open_store(data_dir);
    let resolver = ScryfallClient::new()?;
    Ok(App::new(store, Box::new(resolver)))
}

fn run(cli: Cli) -> Result<()> {
    let mut app = open_app(cli.data_dir)?;

    match cli.command {
        Command::Load { file } => {
            let text = fs::read_to_string(&file)
                .with_context(|| format!("failed to read {:?}", file))?;
            app.load_csv(&text)?;
            print_summary(&app);
        }
        Command::Sample => {
            app.load_sample()?;
            print_summary(&app);
        }
        Command::View {
            search,
            sort,
            desc,
            page,
            page_size,
            hidden,
        } => {
            app.set_page_size(page_size);
            app.set_search(&search);
            if let Some(column) = sort {
                app.toggle_sort(&column);
                if desc {
                    app.toggle_sort(&column);
                }
            }
            for column in &hidden {
                app.set_column_hidden(column, true);
            }
            app.set_page(page.saturating_sub(1));
            print_table(&app);
        }
        Command::Columns => {
            let Some(dataset) = app.dataset() else {
                println!("No collection loaded. Run `manaview load <file>` or `manaview sample`.");
                return Ok(());
            };
            for column in &dataset.columns {
                if dataset.scryfall_column.as_deref() == Some(column.as_str()) {
                    println!("{}  (Scryfall ID)", column);
                } else {
                    println!("{}", column);
                }
            }
        }
        Command::Value => {
            println!("Estimated value: {:.2}", app.estimated_value());
        }
        Command::Image { row } => {
            let name = app.card_name(row).unwrap_or_else(|| "Card".to_string());
            let url = app.card_image(row)?;
            println!("{}: {}", name, url);
        }
        Command::Export { out } => {
            let text = app.export()?.to_string();
            fs::write(&out, text).with_context(|| format!("failed to write {:?}", out))?;
            println!("Exported to {} ({})", out.display(), EXPORT_MIME_TYPE);
        }
    }
    Ok(())
}

fn print_summary(app: &App) {
    let snapshot = app.view();
    println!(
        "Loaded {} rows, {} columns. Estimated value: {:.2}",
        snapshot.total_rows,
        snapshot.columns.len(),
        app.estimated_value()
    );
    if app.has_images() {
        println!("Scryfall images available; use `manaview image <row>`.");
    }
}

fn print_table(app: &App) {
    let snapshot = app.view();
    if snapshot.total_rows == 0 {
        println!("No collection loaded. Run `manaview load <file>` or `manaview sample`.");
        return;
    }

    let widths = snapshot.column_widths();
    let header: Vec<String> = snapshot
        .columns
        .iter()
        .map(|column| {
            let marker = match &snapshot.sort {
                Some((sorted, direction)) if sorted == column => {
                    if direction.is_descending() {
                        " v"
                    } else {
                        " ^"
                    }
                }
                _ => "",
            };
            format!(
                "{:<width$}",
                format!("{}{}", column, marker),
                width = widths[column] + 2
            )
        })
        .collect();
    println!("{}", header.join(" "));

    for row in &snapshot.rows {
        let cells: Vec<String> = snapshot
            .columns
            .iter()
            .map(|column| {
                let text = row
                    .data
                    .get(column)
                    .map(value_display)
                    .unwrap_or_default();
                format!("{:<width$}", text, width = widths[column] + 2)
            })
            .collect();
        println!("{}", cells.join(" "));
    }

    let start = snapshot.page_index * app.view_state().page_size + 1;
    let end = start + snapshot.rows.len().saturating_sub(1);
    println!(
        "Showing {} to {} of {} results (page {} of {}, page sizes: {:?})",
        if snapshot.rows.is_empty() { 0 } else { start },
        if snapshot.rows.is_empty() { 0 } else { end },
        snapshot.filtered_rows,
        snapshot.page_index + 1,
        snapshot.page_count.max(1),
        PAGE_SIZE_CHOICES
    );
}
