//! pricebase CLI
//!
//! Downloads a supplier price list and writes the enriched product base.

mod spinner;

use std::path::PathBuf;

use clap::Parser;
use owo_colors::OwoColorize;
use owo_colors::Stream::{Stderr, Stdout};

use pricebase_lib::{Config, Overrides, PipelineError, RunSummary};

use crate::spinner::SpinnerProgress;

#[derive(Parser)]
#[command(name = "pricebase")]
#[command(about = "Build base.xlsx from a remote .xls/.xlsx price list", long_about = None)]
struct Cli {
    /// Price list URL (the SOURCE_URL environment variable takes priority)
    url: Option<String>,

    /// Directory with products.xlsx / products_files.csv; output goes here too
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Zero-based sheet index in the price list
    #[arg(long)]
    sheet: Option<usize>,

    /// Catalog file name to try before the standard ones
    #[arg(long)]
    catalog: Option<String>,

    /// Output file name (default: base.xlsx)
    #[arg(short, long)]
    output: Option<String>,

    /// Also write <output>.search.json for the search page
    #[arg(long)]
    search_json: bool,

    /// Config file (default: pricebase.toml in the working directory, if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// No spinner and no summary; errors only
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let overrides = Overrides {
        source_url: cli.url,
        work_dir: cli.dir,
        sheet_index: cli.sheet,
        catalog_file: cli.catalog,
        output_name: cli.output,
        search_json: cli.search_json,
        config_file: cli.config,
    };

    if let Err(e) = run(overrides, cli.quiet) {
        eprintln!(
            "{} {e}",
            "ERROR:".if_supports_color(Stderr, |t| t.bright_red())
        );
        std::process::exit(e.exit_code());
    }
}

fn run(overrides: Overrides, quiet: bool) -> Result<(), PipelineError> {
    let config = Config::resolve(overrides)?;

    let progress = SpinnerProgress::new(quiet);
    let result = pricebase_lib::run(&config, &progress);
    progress.finish();

    let summary = result?;
    if !quiet {
        print_summary(&summary);
    }
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    println!(
        "{} {} rows written to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        summary.rows,
        summary
            .output
            .display()
            .if_supports_color(Stdout, |t| t.bold()),
    );
    println!(
        "  {} row {}",
        "Header:".if_supports_color(Stdout, |t| t.cyan()),
        summary.header_row + 1
    );
    if summary.columns.price.is_none() {
        println!(
            "  {} no VAT-inclusive price column, prices set to 0",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
        );
    }
    match &summary.catalog {
        Some(path) => println!(
            "  {} {} ({})",
            "Names from catalog:".if_supports_color(Stdout, |t| t.cyan()),
            summary.names_replaced,
            path.display()
        ),
        None => println!(
            "  {} no products file, names and site links not enriched",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
        ),
    }
    if summary.documents_csv.is_none() {
        println!(
            "  {} no document CSV, Documents column carries site links only",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
        );
    }
    println!(
        "  {} {}",
        "Site links:".if_supports_color(Stdout, |t| t.cyan()),
        summary.site_links
    );
    println!(
        "  {} {}",
        "Articles with documents:".if_supports_color(Stdout, |t| t.cyan()),
        summary.documented_articles
    );
    if let Some(path) = &summary.search_json {
        println!(
            "  {} {}",
            "Search base:".if_supports_color(Stdout, |t| t.cyan()),
            path.display()
        );
    }
}
