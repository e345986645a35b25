use anyhow::{Context, Result};
use clap::Parser;
use ffip::config::FinderConfig;
use ffip::finder::Finder;
use ffip::server;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use termcolor::{BufferedStandardStream, ColorChoice};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ffip")]
#[command(about = "Index a project's file paths and answer fuzzy queries, one per line")]
struct Cli {
    /// Project root to index
    root: PathBuf,

    /// Config file (defaults to <config dir>/ffip/config.json when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Maximum number of files to index
    #[arg(long = "max-files", value_name = "N")]
    max_files: Option<usize>,

    /// Maximum number of results per query
    #[arg(short, long, value_name = "K")]
    limit: Option<usize>,

    /// Leave out paths matching this glob (repeatable)
    #[arg(long = "ignore", value_name = "GLOB")]
    ignore: Vec<String>,

    /// Skip dot-files and dot-directories
    #[arg(long)]
    no_hidden: bool,

    /// Honour .gitignore and .ignore files
    #[arg(long)]
    gitignore: bool,

    /// Highlight matched characters when writing to a terminal
    #[arg(long)]
    highlight: bool,

    /// Show a spinner on stderr while indexing
    #[arg(long)]
    progress: bool,

    /// Answer this single query and exit
    #[arg(long, value_name = "QUERY")]
    once: Option<String>,

    /// Serve the protocol on a Unix socket instead of stdin/stdout
    #[arg(long, value_name = "SOCKET", conflicts_with = "once")]
    listen: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn setup_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn load_config(cli: &Cli) -> Result<FinderConfig> {
    let mut config = match &cli.config {
        Some(path) => FinderConfig::load(path)?,
        None => FinderConfig::load_default()?,
    };

    if let Some(max_files) = cli.max_files {
        config.max_candidates = max_files;
    }
    if let Some(limit) = cli.limit {
        config.result_limit = limit;
    }
    config.ignore_patterns.extend(cli.ignore.iter().cloned());
    if cli.no_hidden {
        config.include_hidden = false;
    }
    if cli.gitignore {
        config.respect_gitignore = true;
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli.log_level);

    let config = load_config(&cli)?;
    let progress = cli.progress && io::stderr().is_terminal();
    let finder = Finder::with_progress(&cli.root, config, progress)
        .with_context(|| format!("Failed to index {}", cli.root.display()))?;

    debug!(
        files = finder.corpus().len(),
        truncated = finder.corpus().truncated(),
        "ready"
    );

    if let Some(socket) = &cli.listen {
        return serve_socket(&finder, socket);
    }

    let choice = if cli.highlight && io::stdout().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = BufferedStandardStream::stdout(choice);

    if let Some(query) = &cli.once {
        return server::answer_once(&finder, query, &mut stdout, cli.highlight);
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    server::serve_lines(&finder, &mut input, &mut stdout, cli.highlight)?;
    Ok(())
}

#[cfg(unix)]
fn serve_socket(finder: &Finder, socket: &std::path::Path) -> Result<()> {
    let server = server::listener::SocketServer::bind(socket)?;
    server.run(finder, None)
}

#[cfg(not(unix))]
fn serve_socket(_finder: &Finder, _socket: &std::path::Path) -> Result<()> {
    anyhow::bail!("--listen is only supported on Unix")
}
