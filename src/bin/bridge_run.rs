use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use bridge_adapter::{Adapter, ExternalBridge, RunResult, RuntimeConfig};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bridge-run")]
#[command(about = "Send a run result through an external adapter bridge", long_about = None)]
#[command(version)]
struct Cli {
    /// Runtime configuration file
    #[arg(short, long, default_value = "runtime.yaml")]
    config: PathBuf,

    /// Name of the bridge to call
    #[arg(short, long)]
    bridge: String,

    /// Static parameters merged into the run data, as a JSON object
    #[arg(short, long)]
    params: Option<String>,

    /// Run result JSON file. Reads stdin when omitted.
    input: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if verbose {
            "bridge_adapter=debug".to_string()
        } else {
            "bridge_adapter=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();
}

fn read_input(path: Option<&PathBuf>) -> anyhow::Result<RunResult> {
    let content = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    serde_json::from_str(&content).context("parsing run result")
}

async fn run(cli: Cli) -> anyhow::Result<RunResult> {
    let config = RuntimeConfig::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?
        .apply_env()?;

    let mut bridge = ExternalBridge::from_config(&cli.bridge, &config)?;
    if let Some(params) = &cli.params {
        let params: serde_json::Value =
            serde_json::from_str(params).context("parsing --params")?;
        bridge = bridge.with_params(params);
    }

    let input = read_input(cli.input.as_ref())?;
    Ok(bridge.perform(input, &config).await)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(result) => {
            match serde_json::to_string_pretty(&result) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return ExitCode::from(2);
                }
            }
            if result.status.is_errored() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Bridge run failed");
            ExitCode::from(2)
        }
    }
}
