use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

use carbon_cli::app::{self, App};
use carbon_cli::config::CliConfig;
use carbon_cli::console::StdConsole;
use carbon_cli::logging;
use carbon_core::i18n::{Locale, Translator};
use carbon_core::router::Route;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Personal carbon-footprint estimator.
///
/// Talks to the carbon backend for login, estimates, history and regional
/// statistics. Settings come from `carbon.toml`, then `CARBON_API_URL`, then
/// the flags below.
#[derive(Debug, Parser)]
struct Cli {
    /// TOML config file. Defaults to `carbon.toml` in the working directory
    /// when it exists.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Gateway backend to use.
    #[arg(long)]
    backend: Option<String>,

    /// Backend origin, e.g. `http://127.0.0.1:5000`.
    #[arg(long)]
    api_url: Option<String>,

    /// Interface language: `zh` or `en`.
    #[arg(long)]
    locale: Option<String>,

    /// Log filter, e.g. `debug` or `carbon_core=trace,warn`.
    #[arg(long)]
    log_level: Option<String>,

    /// Also append log records to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Screen to open first, e.g. `/history`.
    #[arg(long, default_value = "/")]
    start: String,
}

impl Cli {
    fn apply(
        self,
        config: &mut CliConfig,
    ) -> String {
        if let Some(backend) = self.backend {
            config.gateway.backend = backend;
        }
        if let Some(url) = self.api_url {
            config.gateway.base_url = url;
        }
        if let Some(locale) = self.locale {
            config.locale = Some(locale);
        }
        if let Some(level) = self.log_level {
            config.logging.level = level;
        }
        if let Some(file) = self.log_file {
            config.logging.file = Some(file);
        }
        self.start
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = CliConfig::resolve(cli.config.as_deref())?;
    config.apply_env(|key| std::env::var(key).ok());
    let start = cli.apply(&mut config);

    logging::init_from_config(&config.logging).context("setting up logging")?;
    let locale: Locale = config.locale()?;

    debug!(
        backend = %config.gateway.backend,
        base_url = %config.gateway.base_url,
        "connecting"
    );
    let registry = app::build_registry();
    let gateway = registry
        .create(&config.gateway)
        .await
        .context("creating gateway")?;

    info!(%locale, "starting");
    let mut app = App::new(gateway.as_ref(), StdConsole, Translator::new(locale));
    app.run(Route::from_path(&start)).await
}
