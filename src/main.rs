//! dept-api-contract - contract checks for the departments, users and website-links API.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use dept_api_contract as app;

use app::client::ApiClient;
use app::config::{AppConfig, ConfigLoadResult};
use app::contract::{self, Suite, SuiteKind};
use app::logging;
use app::runner::Runner;

/// Run HTTP contract checks against a live server.
#[derive(Parser)]
#[command(name = "dept-api-contract", version)]
struct Cli {
    /// Config file (default: config.toml next to the executable, then the user config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Use config.toml from current directory (dev mode)
    #[arg(long)]
    dev: bool,

    /// Override server.base_url (also read from BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Override auth.token (also read from API_TOKEN)
    #[arg(long)]
    token: Option<String>,

    /// Suites to run; repeatable
    #[arg(long = "suite", value_enum)]
    suites: Vec<SuiteKind>,

    /// Only run cases whose id contains this text
    #[arg(long)]
    filter: Option<String>,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// List cases without running them
    #[arg(long)]
    list: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let (config, source) = match load_config(&cli) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::from(2);
        }
    };

    let _log_guard = logging::init(&config.logging);
    match &source {
        Some(path) => tracing::info!("Config loaded from {:?}", path),
        None => tracing::info!("No config file found, using defaults"),
    }

    let suites = contract::select(&cli.suites);
    if cli.list {
        print_cases(&suites);
        return ExitCode::SUCCESS;
    }

    match run(&cli, config, &suites) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

/// Resolve, load and override configuration. Returns the file actually read, if any.
fn load_config(cli: &Cli) -> anyhow::Result<(AppConfig, Option<PathBuf>)> {
    let candidates: Vec<PathBuf> = if let Some(path) = &cli.config {
        vec![path.clone()]
    } else if cli.dev {
        vec![PathBuf::from("config.toml")]
    } else {
        std::iter::once(AppConfig::default_path())
            .chain(AppConfig::user_path())
            .collect()
    };

    let mut loaded = None;
    for path in candidates {
        match AppConfig::try_load(&path) {
            ConfigLoadResult::Loaded(config) => {
                loaded = Some((config, path));
                break;
            }
            ConfigLoadResult::Missing if cli.config.is_some() => {
                bail!("config file {} does not exist", path.display());
            }
            ConfigLoadResult::Missing => {}
            ConfigLoadResult::Invalid(e) => {
                return Err(e).with_context(|| format!("invalid config file {}", path.display()));
            }
        }
    }

    let (mut config, source) = match loaded {
        Some((config, path)) => (config, Some(path)),
        None => (AppConfig::default(), None),
    };

    config.apply_env();
    config.apply_overrides(cli.base_url.clone(), cli.token.clone());
    config.validate().context("invalid configuration after overrides")?;

    Ok((config, source))
}

/// Run the selected suites and print the report. Returns true when nothing failed.
fn run(cli: &Cli, config: AppConfig, suites: &[Suite]) -> anyhow::Result<bool> {
    let rt = tokio::runtime::Runtime::new().context("failed to create tokio runtime")?;

    let client = ApiClient::new(&config.server, &config.auth).context("failed to build HTTP client")?;
    tracing::info!("Target: {}", client.base_url());

    let runner = Runner::new(client, config.auth, config.fixtures).with_filter(cli.filter.clone());
    let report = rt.block_on(runner.run(suites));

    match cli.format {
        OutputFormat::Text => print!("{}", report.render_text()),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }

    Ok(report.is_success())
}

fn print_cases(suites: &[Suite]) {
    for suite in suites {
        println!("[{}] {} cases", suite.name, suite.case_count());
        for (group, case) in suite.cases() {
            println!("  {:<16} {} ({group})", case.id, case.title);
        }
    }
}
