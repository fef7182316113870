//! Robots-Lens main entry point
//!
//! This is the command-line interface for the Robots-Lens policy workbench.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use robots_lens::config::{load_config_with_hash, Config};
use robots_lens::output::{
    render_analysis, render_check, render_json, render_matrix, render_url_verdicts, OutputFormat,
};
use robots_lens::service::{
    AnalyzeRequest, CheckUrlRequest, CompareRequest, ErrorBody, MultiTestRequest, RobotsLens,
    TestUrlRequest,
};
use robots_lens::RequestError;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Robots-Lens: a robots.txt policy workbench
///
/// Validates and parses robots.txt files, tests URLs against them for any set of
/// user agents, and diffs two versions of a policy.
#[derive(Parser, Debug)]
#[command(name = "robots-lens")]
#[command(version)]
#[command(about = "A robots.txt policy workbench", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate, lint and parse a robots.txt document
    Analyze(Source),

    /// Show a unified diff between two robots.txt files
    Compare {
        /// The older version
        first: PathBuf,
        /// The newer version
        second: PathBuf,
    },

    /// Test URLs against one robots.txt document
    Test {
        #[command(flatten)]
        source: RobotsSource,

        /// URL or path to test (repeatable)
        #[arg(short, long = "url", required = true)]
        urls: Vec<String>,

        /// User agent to test as (repeatable, defaults from config)
        #[arg(short, long = "agent")]
        agents: Vec<String>,
    },

    /// Test URLs against several robots.txt files
    MultiTest {
        /// robots.txt file (repeatable)
        #[arg(short, long = "robots-file", required = true)]
        files: Vec<PathBuf>,

        /// URL or path to test (repeatable)
        #[arg(short, long = "url", required = true)]
        urls: Vec<String>,

        /// User agent to test as (repeatable, defaults from config)
        #[arg(short, long = "agent")]
        agents: Vec<String>,
    },

    /// Report the HTTP status of a URL (HEAD, following redirects)
    CheckUrl {
        url: String,
    },
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct Source {
    /// Fetch the document from this URL
    #[arg(long)]
    url: Option<String>,

    /// Read the document from this file
    #[arg(long)]
    file: Option<PathBuf>,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct RobotsSource {
    /// Fetch robots.txt from this URL
    #[arg(long)]
    robots_url: Option<String>,

    /// Read robots.txt from this file
    #[arg(long)]
    robots_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            if let Some(request_error) = e.downcast_ref::<RequestError>() {
                let body = ErrorBody {
                    error: request_error.to_string(),
                };
                match render_json(&body) {
                    Ok(json) => println!("{}", json),
                    Err(_) => eprintln!("Error: {}", request_error),
                }
            } else {
                tracing::error!("{:#}", e);
                eprintln!("Error: {:#}", e);
            }
            ExitCode::FAILURE
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so that stdout only carries command output.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("robots_lens=info,warn"),
            1 => EnvFilter::new("robots_lens=debug,info"),
            2 => EnvFilter::new("robots_lens=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

fn load_configuration(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        tracing::debug!("No configuration file given, using defaults");
        return Ok(Config::default());
    };

    tracing::info!("Loading configuration from: {}", path.display());
    let (config, hash) = load_config_with_hash(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);
    Ok(config)
}

fn read_file(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

async fn run(cli: Cli) -> anyhow::Result<String> {
    let config = load_configuration(cli.config.as_deref())?;
    let lens = RobotsLens::new(config)?;
    let format = cli.format;

    let output = match cli.command {
        Command::Analyze(source) => {
            let request = AnalyzeRequest {
                content: source.file.as_deref().map(read_file).transpose()?,
                url: source.url,
            };
            let response = lens.analyze(request).await?;
            match format {
                OutputFormat::Json => render_json(&response)?,
                OutputFormat::Text => render_analysis(&response),
            }
        }
        Command::Compare { first, second } => {
            let request = CompareRequest {
                content1: Some(read_file(&first)?),
                content2: Some(read_file(&second)?),
            };
            let response = lens.compare(request)?;
            match format {
                OutputFormat::Json => render_json(&response)?,
                OutputFormat::Text => response.diff.iter().map(|line| format!("{}\n", line)).collect(),
            }
        }
        Command::Test {
            source,
            urls,
            agents,
        } => {
            let request = TestUrlRequest {
                robots_url: source.robots_url,
                robots_content: source.robots_file.as_deref().map(read_file).transpose()?,
                test_urls: urls,
                user_agents: Some(agents),
            };
            let response = lens.test_urls(request).await?;
            match format {
                OutputFormat::Json => render_json(&response)?,
                OutputFormat::Text => render_url_verdicts(&response.results),
            }
        }
        Command::MultiTest {
            files,
            urls,
            agents,
        } => {
            let robots_contents = files
                .iter()
                .map(|path| read_file(path))
                .collect::<anyhow::Result<Vec<_>>>()?;
            let request = MultiTestRequest {
                robots_contents,
                test_urls: urls,
                user_agents: Some(agents),
            };
            let response = lens.multi_test(request)?;
            match format {
                OutputFormat::Json => render_json(&response)?,
                OutputFormat::Text => render_matrix(&response.results),
            }
        }
        Command::CheckUrl { url } => {
            let response = lens.check_url(CheckUrlRequest { url: Some(url) }).await?;
            match format {
                OutputFormat::Json => render_json(&response)?,
                OutputFormat::Text => render_check(&response),
            }
        }
    };

    Ok(if output.ends_with('\n') {
        output
    } else {
        format!("{}\n", output)
    })
}
