//! # spacetraders-resources
//!
//! Command-line front end for the resource layer.
//!
//! ```text
//! spacetraders-resources read spacetraders://agent/info spacetraders://ships/list
//! spacetraders-resources list
//! ```
//!
//! Settings come from `SPACETRADERS_*` environment variables; flags override them.
//! Logs go to stderr and honour `RUST_LOG`.

use clap::{Parser, Subcommand};
use resource_framework::tracing::setup_tracing;
use spacetraders_resources::lifecycle::config::MAX_PAGE_LIMIT;
use spacetraders_resources::lifecycle::{Config, ResourceSystem};
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info, warn};

#[derive(Debug, Parser)]
#[command(name = "spacetraders-resources", version, about = "Read SpaceTraders state through spacetraders:// identifiers")]
struct Cli {
    /// API base URL [env: SPACETRADERS_BASE_URL]
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Agent bearer token [env: SPACETRADERS_TOKEN]
    #[arg(long, global = true)]
    token: Option<String>,

    /// Items requested per page, at most 20 [env: SPACETRADERS_PAGE_LIMIT]
    #[arg(long, global = true, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_PAGE_LIMIT)))]
    page_limit: Option<u32>,

    /// Timeout for a single remote call, in seconds [env: SPACETRADERS_TIMEOUT_SECS]
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: Option<u64>,

    /// Upper bound on pages fetched for one collection [env: SPACETRADERS_MAX_PAGES]
    #[arg(long, global = true, value_parser = clap::value_parser!(u32).range(1..))]
    max_pages: Option<u32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve identifiers and print each resource as JSON
    Read {
        #[arg(required = true, value_name = "URI")]
        uris: Vec<String>,
    },
    /// List every resource template
    List,
}

impl Cli {
    fn config(&self) -> Result<Config, String> {
        let mut config = Config::from_env().map_err(|e| e.to_string())?;
        if let Some(url) = &self.base_url {
            config.base_url = url.clone();
        }
        if let Some(token) = &self.token {
            config.token = Some(token.clone());
        }
        if let Some(limit) = self.page_limit {
            config.page_limit = limit;
        }
        if let Some(secs) = self.timeout_secs {
            config.call_timeout = Duration::from_secs(secs);
        }
        if let Some(max) = self.max_pages {
            config.max_pages = max;
        }
        config.validate().map_err(|e| e.to_string())?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    setup_tracing();
    let cli = Cli::parse();

    let system = match cli.config().and_then(|c| ResourceSystem::from_config(&c).map_err(|e| e.to_string())) {
        Ok(system) => system,
        Err(e) => {
            error!(error = %e, "Startup failed");
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Command::List => match serde_json::to_string_pretty(&system.catalogue()) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("error: {e}");
                ExitCode::FAILURE
            }
        },
        Command::Read { uris } => {
            let on_signal = system.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    warn!("Interrupted, cancelling in-flight reads");
                    on_signal.shutdown();
                }
            });

            let mut failures = 0usize;
            for uri in &uris {
                match system.read(uri).await {
                    Ok(payload) => {
                        let document = serde_json::json!({ "uri": uri, "resource": payload });
                        match serde_json::to_string_pretty(&document) {
                            Ok(json) => println!("{json}"),
                            Err(e) => {
                                failures += 1;
                                eprintln!("{uri}: could not render: {e}");
                            }
                        }
                    }
                    Err(e) => {
                        failures += 1;
                        eprintln!("{uri}: {e}");
                    }
                }
            }

            info!(requested = uris.len(), failures, "Done");
            if failures == 0 {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
