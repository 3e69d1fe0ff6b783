//! listview - Entry Point

use clap::{Parser, ValueEnum};
use listview::integration::{parse_filter_arg, run_request, ListRequest};
use listview::model::AppError;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Output format for the computed view.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// The full view as pretty-printed JSON
    #[default]
    Json,
    /// One row per record, a summary line and the page strip
    Text,
}

/// listview - search, filter, sort and page a record export
#[derive(Parser, Debug)]
#[command(name = "listview")]
#[command(version)]
#[command(about = "Search, filter, sort and page a JSON array of records")]
pub struct Args {
    /// Path to a JSON array of records ("-" or omitted reads from stdin)
    pub file: Option<PathBuf>,

    /// List screen to use (businesses, locations, users, units, or one from the config file)
    #[arg(long)]
    pub screen: Option<String>,

    /// Search text, applied immediately
    #[arg(short, long)]
    pub query: Option<String>,

    /// Filter selection as NAME=VALUE (repeatable)
    #[arg(short, long = "filter", value_name = "NAME=VALUE", value_parser = parse_filter_arg)]
    pub filters: Vec<(String, String)>,

    /// Sort key registered on the screen
    #[arg(long)]
    pub sort: Option<String>,

    /// Page to show (must be positive)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: Option<u32>,

    /// Records per page (must be positive)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: Option<u32>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Path to log file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Print the known screens and exit
    #[arg(long)]
    pub list_screens: bool,

    /// More log detail (-v debug, -vv trace) when RUST_LOG is unset
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// The request these flags describe.
    pub fn request(&self) -> ListRequest {
        ListRequest {
            query: self.query.clone(),
            filters: self.filters.clone(),
            sort: self.sort.clone(),
            page: self.page.map(|p| p as usize),
            page_size: self.page_size.map(|s| s as usize),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    run(args)?;
    Ok(())
}

fn run(args: Args) -> Result<(), AppError> {
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = listview::config::load_config_with_precedence(args.config.clone())?;
        let merged = listview::config::merge_config(config_file)?;
        let with_env = listview::config::apply_env_overrides(merged)?;
        listview::config::apply_cli_overrides(with_env, args.screen.clone(), args.log_file.clone())?
    };

    listview::logging::init(
        &config.log_file_path,
        listview::logging::default_directive(args.verbose),
    )?;

    info!(config = ?config, "Configuration loaded and resolved");

    if args.list_screens {
        for screen in config.screens.values() {
            println!("{}", screen.describe());
        }
        return Ok(());
    }

    let source = listview::source::detect_record_source(args.file.clone())?;
    let loaded = source.read()?;
    if !loaded.skipped.is_empty() {
        eprintln!(
            "warning: skipped {} malformed record(s) in {}",
            loaded.skipped.len(),
            source.label().display()
        );
    }
    let records = loaded.into_record_set();

    let screen = Arc::new(config.default_screen()?.clone());
    let columns = screen.searchable_fields().to_vec();
    let view = run_request(&records, screen, &args.request())?;

    info!(
        total = view.total_count,
        page = view.page_number,
        page_count = view.page_count,
        "view computed"
    );

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&*view)?),
        OutputFormat::Text => print!("{}", view.render_text(&columns)),
    }

    Ok(())
}
