//! Command execution for the cafe finder CLI
//!
//! Loads configuration, ingests the sheet into a [`SessionState`], applies
//! the initial search and filters, renders, and optionally hands control to
//! the interactive command loop.

use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

use crate::app::models::FilterToken;
use crate::app::services::csv_ingest::{CsvIngestor, ParseResult};
use crate::app::services::filter_engine::FilterEngine;
use crate::app::services::renderer::{JsonRenderer, Renderer, TextRenderer};
use crate::app::services::session::SessionState;
use crate::app::services::transport::{SheetSource, Transport};
use crate::cli::args::Args;
use crate::cli::interactive::{CommandOutcome, SessionCommand, describe_filters};
use crate::config::{FinderConfig, OutputFormat};
use crate::{CafeError, Result};

/// Run the CLI with parsed arguments
pub async fn run(args: Args) -> Result<()> {
    setup_logging(&args)?;

    let config = load_configuration(&args)?;
    let source = args.source(&config);
    let transport = Transport::new(&config)?;

    let mut session = SessionState::new(FilterEngine::new(config.thresholds));
    apply_initial_state(&mut session, &args);

    let show_progress = !args.quiet && config.output_format == OutputFormat::Text;
    let ingest_error = match ingest(&transport, &source, show_progress).await {
        Ok(result) => {
            if args.show_stats {
                report_stats(&result);
            }
            session.replace_records(result.records);
            None
        }
        Err(error) => {
            session.record_failure(&error);
            Some(error)
        }
    };

    let mut renderer = build_renderer(&config);
    renderer.render(&session.view())?;

    if args.interactive && ingest_error.is_none() {
        run_interactive(&mut session, renderer.as_mut()).await?;
    }

    match ingest_error {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

/// Set up structured logging on stderr
pub fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    // Create filter, RUST_LOG wins over the CLI level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("cafe_finder={}", log_level)));

    // Set up subscriber: compact output in quiet mode, uptime timestamps otherwise
    let result = if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };
    result.map_err(|e| CafeError::configuration(format!("Failed to initialize logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using layered approach (defaults -> file -> args)
pub fn load_configuration(args: &Args) -> Result<FinderConfig> {
    let config_path = match &args.config_file {
        Some(path) => Some(path.clone()),
        None => FinderConfig::default_config_path().ok(),
    };

    let config = match config_path {
        Some(path) => FinderConfig::load_from(&path)?,
        None => {
            warn!("No configuration directory available, using defaults");
            FinderConfig::default()
        }
    };

    // Command-line flags override file values
    let config = args.apply_to_config(config);
    config.validate()?;
    Ok(config)
}

/// Apply `--search`, `--pin` and `--filter` through the session mutation points
fn apply_initial_state(session: &mut SessionState, args: &Args) {
    // Pins go through the search box, so blank ones must not linger there
    for phrase in &args.pins {
        session.set_search_term(phrase);
        if session.pin_search().is_none() {
            warn!("Ignoring blank --pin value");
            session.clear_search();
        }
    }

    for name in &args.filters {
        let token = FilterToken::parse(name);
        if let FilterToken::Unrecognized(raw) = &token {
            warn!("Unrecognized filter '{}' will be ignored", raw);
        }
        if !session.active_filters().contains(&token) {
            session.toggle_token(token);
        }
    }

    if let Some(search) = &args.search {
        session.set_search_term(search);
    }
}

/// Open the source and stream it through the ingestor
pub async fn ingest(
    transport: &Transport,
    source: &SheetSource,
    show_progress: bool,
) -> Result<ParseResult> {
    let chunks = transport.open(source).await?;

    let progress = if show_progress {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.green} Loading cafes... {bytes}")
        {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    } else {
        ProgressBar::hidden()
    };

    let tracker = progress.clone();
    let chunks = chunks.inspect(move |chunk| {
        if let Ok(bytes) = chunk {
            tracker.inc(bytes.len() as u64);
        }
    });

    let result = CsvIngestor::new().ingest_stream(chunks).await;
    progress.finish_and_clear();

    let result = result?;
    if result.stats.has_anomalies() {
        warn!(
            "{} ragged rows and {} unterminated quotes were read best-effort",
            result.stats.ragged_rows, result.stats.unterminated_quotes
        );
    }
    info!(
        "Loaded {} cafes from {}",
        result.records.len(),
        source.describe()
    );
    Ok(result)
}

fn build_renderer(config: &FinderConfig) -> Box<dyn Renderer> {
    match config.output_format {
        OutputFormat::Text => Box::new(TextRenderer::new(io::stdout(), config.color)),
        OutputFormat::Json => Box::new(JsonRenderer::new(io::stdout())),
    }
}

fn report_stats(result: &ParseResult) {
    let stats = &result.stats;
    eprintln!("Ingestion statistics:");
    eprintln!("  Bytes read:           {}", stats.bytes_consumed);
    eprintln!("  Lines seen:           {}", stats.lines_seen);
    eprintln!("  Data rows:            {}", stats.data_rows());
    eprintln!("  Blank lines skipped:  {}", stats.blank_lines_skipped);
    eprintln!("  Blank rows rejected:  {}", stats.blank_rows_rejected);
    eprintln!("  Ragged rows:          {}", stats.ragged_rows);
    eprintln!("  Unterminated quotes:  {}", stats.unterminated_quotes);
    eprintln!("  Records built:        {}", stats.records_built);
}

/// Read session commands from stdin until `quit` or end of input
async fn run_interactive(session: &mut SessionState, renderer: &mut dyn Renderer) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt()?;

    while let Some(line) = lines.next_line().await? {
        let outcome = match SessionCommand::parse(&line) {
            Ok(command) => command.apply(session),
            Err(message) => CommandOutcome::Message(message),
        };

        match outcome {
            CommandOutcome::Render => {
                eprintln!("{}", describe_filters(session));
                renderer.render(&session.view())?;
            }
            CommandOutcome::Message(message) => eprintln!("{}", message),
            CommandOutcome::Quit => break,
        }
        prompt()?;
    }
    Ok(())
}

fn prompt() -> Result<()> {
    let mut stderr = io::stderr();
    write!(stderr, "> ")?;
    stderr.flush()?;
    Ok(())
}
