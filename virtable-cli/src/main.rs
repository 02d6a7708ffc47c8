//! Interactive terminal front-end for a virtualized person table.
//!
//! Generates a large table, then reads commands from stdin and prints the
//! window of rows the virtualizer selects. Logs go to a file because stdout
//! is the display.

mod data;
mod error;
mod layout;
mod session;

use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;
use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use simplelog::{Config, LevelFilter, WriteLogger};
use virtable_lib::virtualizer::{ViewportMetrics, VirtualizerOptions};
use virtable_lib::model::Person;
use virtable_lib::{RowStore, TableView, ViewConfig};

use error::CliError;
use layout::{LINE_HEIGHT, Layout};
use session::Session;

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "virtable")]
#[command(about = "Filter, sort and scroll a large generated table")]
#[command(version)]
struct Args {
    /// Number of rows to generate
    #[arg(long, default_value_t = 10_000)]
    rows: usize,

    /// Seed for reproducible data
    #[arg(long)]
    seed: Option<u64>,

    /// Viewport height in pixels (one text line is 10px)
    #[arg(long, default_value_t = 200)]
    height: u64,

    /// Table width in terminal columns
    #[arg(long, default_value_t = 100)]
    width: usize,

    /// Rows rendered beyond each edge of the viewport
    #[arg(long, default_value_t = 5)]
    overscan: usize,

    /// Estimated row height in pixels before measurement
    #[arg(long, default_value_t = LINE_HEIGHT)]
    estimate: u32,

    /// Quiet period before text and range filters apply
    #[arg(long, value_name = "MS", default_value_t = 500)]
    debounce_ms: u64,

    /// Keep estimated heights instead of measuring rendered rows
    #[arg(long)]
    no_measure: bool,

    /// Log file path
    #[arg(long, value_name = "PATH", default_value = "virtable.log")]
    log_file: PathBuf,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn view_config(&self) -> ViewConfig {
        let mut virtualizer = VirtualizerOptions::new()
            .estimate_size(self.estimate)
            .overscan(self.overscan);
        if self.no_measure {
            virtualizer = virtualizer.without_measurement();
        }
        ViewConfig::new()
            .debounce(Duration::from_millis(self.debounce_ms))
            .virtualizer(virtualizer)
    }
}

fn init_logging(args: &Args) -> Result<(), CliError> {
    let level = if args.verbose {
        LevelFilter::Trace
    } else {
        LevelFilter::Debug
    };
    let log_file = File::create(&args.log_file)?;
    WriteLogger::init(level, Config::default(), log_file)?;
    Ok(())
}

async fn run(args: Args) -> Result<(), CliError> {
    init_logging(&args)?;

    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    info!("Generating {} rows with seed {seed}", args.rows);
    let rows = data::make_data(args.rows, &mut StdRng::seed_from_u64(seed), Utc::now());

    let columns = Person::columns();
    let layout = Layout::new(columns.len(), args.width);
    info!("{} columns, {} cells wide", columns.len(), layout.cell_width());
    let mut view = TableView::new(RowStore::new(rows), columns, args.view_config());
    view.set_viewport(ViewportMetrics::new(0, args.height));

    Session::new(view, layout).run().await
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();
    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
