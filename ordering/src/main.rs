//! Main entry point for the ordering binary
//!
//! Reads commands from stdin (or a script file) and drives one order
//! session against the configured catalog.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::signal;

use ordering::{
    command::HELP,
    services::{load_catalog, ConsolePresenter, EmbeddedCatalog, FileCatalog, OutputFormat},
    ConfigOverrides, DeskConfig, OrderDesk, OrderEvent, OrderingResult, Presenter,
};
use shared::{logging, session_debug, session_info};

/// Storefront order desk: build an order and get a call-to-order summary
#[derive(Parser)]
#[command(name = "ordering")]
#[command(about = "Build a storefront order from the terminal")]
pub struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// JSON catalog to use instead of the embedded menu
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Supplement for a half-meter pizza, e.g. "3dt"
    #[arg(long)]
    pub half_supplement: Option<String>,

    /// Supplement for a full-meter pizza, e.g. "5dt"
    #[arg(long)]
    pub full_supplement: Option<String>,

    /// Read commands from this file instead of stdin
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Emit one JSON object per line instead of text
    #[arg(long)]
    pub json: bool,
}

#[tokio::main]
async fn main() -> OrderingResult<()> {
    let args = Args::parse();

    ConfigOverrides::init_env();
    logging::init_tracing_with_level(Some(&args.log_level));

    let overrides = ConfigOverrides {
        catalog: args.catalog.clone(),
        half_supplement: args.half_supplement.clone(),
        full_supplement: args.full_supplement.clone(),
    }
    .with_env_defaults();
    let config = DeskConfig::from_overrides(overrides)?;

    let catalog = match &config.catalog_path {
        Some(path) => load_catalog(&FileCatalog::new(path)).await?,
        None => load_catalog(&EmbeddedCatalog).await?,
    };

    let format = if args.json { OutputFormat::Json } else { OutputFormat::Text };
    let mut desk = OrderDesk::new(Arc::new(catalog), config, ConsolePresenter::new(format));
    let session_id = desk.session_id().clone();

    logging::log_startup(&session_id, "order desk");
    session_debug!(
        session_id,
        "Input: {}",
        args.script
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "stdin".to_string())
    );

    let reason = match &args.script {
        Some(path) => {
            let file = tokio::fs::File::open(path).await?;
            run(&mut desk, BufReader::new(file)).await?
        }
        None => {
            if !args.json {
                println!("{HELP}");
            }
            run(&mut desk, BufReader::new(tokio::io::stdin())).await?
        }
    };

    logging::log_shutdown(&session_id, reason);
    session_info!(
        session_id,
        lines = desk.session().line_count(),
        "Final total {}",
        desk.session().total()
    );
    logging::log_success(&session_id, "Order desk stopped gracefully");
    Ok(())
}

/// Feed lines to the desk until quit, end of input or Ctrl+C
async fn run<P, R>(desk: &mut OrderDesk<P>, reader: R) -> OrderingResult<&'static str>
where
    P: Presenter,
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let ctrl_c = signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            result = &mut ctrl_c => {
                if let Err(err) = result {
                    logging::log_error(desk.session_id(), "Signal handling", &err);
                }
                return Ok("Received Ctrl+C signal");
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    return Ok("End of input");
                };
                // Bad lines are already reported to the presenter
                if let Ok(Some(OrderEvent::Quit)) = desk.handle_line(&line) {
                    return Ok("Customer quit");
                }
            }
        }
    }
}
