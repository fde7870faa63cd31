use anyhow::Result;
use calc_client::{
    CalculatorHandler,
    api::KNOWN_OPERATORS,
    config,
    host::{self, TerminalHost},
    ui::{MemoryPage, Notifier},
};
use clap::Parser;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "calc", version, about = "Send a calculation to a calculator server")]
struct Cli {
    /// First operand, read as a form field (non-numeric text is sent as null)
    #[arg(allow_negative_numbers = true, required_unless_present = "interactive")]
    a: Option<String>,

    /// Second operand
    #[arg(allow_negative_numbers = true, required_unless_present = "interactive")]
    b: Option<String>,

    #[arg(required_unless_present = "interactive", help = operator_help())]
    op: Option<String>,

    /// Read "A B OP" lines from stdin
    #[arg(short, long, conflicts_with_all = ["a", "b", "op"])]
    interactive: bool,

    /// Path to the YAML configuration file
    #[arg(long, env = "CONFIG_PATH")]
    config: Option<String>,

    /// Server base URL, overrides api.base_url
    #[arg(long, env = "CALC_BASE_URL")]
    base_url: Option<String>,

    /// Log level, overrides logs.level (RUST_LOG wins over both)
    #[arg(long)]
    log_level: Option<String>,
}

fn operator_help() -> String {
    format!(
        "Operator token, passed to the server unchecked (known: {})",
        KNOWN_OPERATORS.join(", ")
    )
}

/// Prints notices to stderr without waiting for acknowledgement.
struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, message: &str) {
        eprintln!("{}", message);
    }
}

/// Validates that a log level string is valid
fn validate_log_level(level: &str) -> Result<()> {
    level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .map_err(|_| {
            anyhow::anyhow!(
                "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
                level
            )
        })?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (before logging setup)
    let loaded = match &cli.config {
        Some(path) => config::load_from(path).await,
        None => config::load().await,
    };
    let mut config = match loaded {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(base_url) = cli.base_url.clone() {
        config.api.base_url = base_url;
    }

    let log_level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.logs.level.clone());
    if let Err(e) = validate_log_level(&log_level) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .json()
        .init();

    info!("Starting calc with log level: {}", log_level);

    let page = Arc::new(MemoryPage::calculator());
    let notifier: Arc<dyn Notifier> = Arc::new(TerminalNotifier);
    let handler = CalculatorHandler::from_config(&config.api, page.clone(), notifier.clone())?;
    let mut terminal = TerminalHost::new(page, handler.into_callback(), notifier, tokio::io::stdout());

    let code = if cli.interactive {
        let summary = terminal
            .run_lines(BufReader::new(tokio::io::stdin()))
            .await?;
        info!(
            "Session finished: {} resolved, {} failed, {} skipped",
            summary.resolved, summary.failed, summary.skipped
        );
        summary.exit_code()
    } else {
        // clap guarantees all three are present outside interactive mode
        let (a, b, op) = (
            cli.a.unwrap_or_default(),
            cli.b.unwrap_or_default(),
            cli.op.unwrap_or_default(),
        );
        let outcome = terminal.fire(&a, &b, &op).await?;
        host::exit_code(&outcome)
    };

    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
