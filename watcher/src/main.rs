use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use data_manager::ReqwestTransport;
use shared_types::{Tag, ViewerConfig};
use std::path::PathBuf;
use system_integration::{Dashboard, TagRefresh};
use telemetry_watch::{load_config, ConsoleCharts, TokioDriver, TracingView};
use tokio::signal;
use tokio::task::LocalSet;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

type WatchDashboard = Dashboard<ReqwestTransport, ConsoleCharts>;

#[derive(Parser)]
#[command(name = "telemetry-watch")]
#[command(about = "Poll a telemetry API and log the latest values", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// API base URL, overriding the config file
    #[arg(short, long, global = true)]
    endpoint: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll tags until Ctrl-C
    Watch {
        /// Tags to watch (comma-separated)
        #[arg(short, long, value_delimiter = ',', required_unless_present = "all")]
        tags: Vec<String>,

        /// Watch every tag the API lists
        #[arg(long, conflicts_with = "tags")]
        all: bool,

        /// Poll interval in milliseconds
        #[arg(short, long)]
        interval: Option<String>,
    },
    /// Check that the API answers `/tags`
    Test,
    /// List available tags
    Tags,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; library crates log through `log` and are picked
    // up by the subscriber's log bridge
    let filter = if cli.debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let mut config = load_config(cli.config.as_deref())?;
    if let Some(endpoint) = cli.endpoint.as_deref() {
        config.set_endpoint(endpoint);
    }

    // Warnings are logged when the session starts
    let validation = config.validate();
    if !validation.is_valid {
        for message in &validation.errors {
            error!("{message}");
        }
        bail!("invalid configuration");
    }

    // Dashboard state is single-threaded; everything runs on one LocalSet
    let local = LocalSet::new();
    local
        .run_until(async move {
            match cli.command {
                Commands::Watch {
                    tags,
                    all,
                    interval,
                } => watch(config, tags, all, interval).await,
                Commands::Test => test_connection(config).await,
                Commands::Tags => list_tags(config).await,
            }
        })
        .await
}

fn build_dashboard(config: ViewerConfig) -> Result<WatchDashboard> {
    let transport = ReqwestTransport::new()?;
    Ok(Dashboard::new(
        config,
        transport,
        ConsoleCharts::default(),
        TracingView::default(),
        TokioDriver::default(),
    ))
}

async fn watch(
    config: ViewerConfig,
    tags: Vec<String>,
    all: bool,
    interval: Option<String>,
) -> Result<()> {
    let dashboard = build_dashboard(config)?;
    if let Some(interval) = interval {
        let applied = dashboard.set_poll_interval(&interval);
        info!("Poll interval: {applied}ms");
    }

    let selected: Vec<Tag> = if all {
        match dashboard.refresh_tags().await? {
            TagRefresh::Applied(tags) => tags,
            TagRefresh::Superseded => Vec::new(),
        }
    } else {
        tags.into_iter().map(Tag::from).collect()
    };
    if selected.is_empty() {
        bail!("no tags to watch");
    }

    for tag in &selected {
        dashboard.toggle(tag)?;
    }
    dashboard.start()?;
    info!(
        "Watching {} tag(s), press Ctrl-C to stop",
        dashboard.session().selection().len()
    );

    signal::ctrl_c().await?;
    info!("Received shutdown signal");
    dashboard.stop();
    Ok(())
}

async fn test_connection(config: ViewerConfig) -> Result<()> {
    let dashboard = build_dashboard(config)?;
    match dashboard.test_connection().await {
        Ok(_) => {
            info!("Connection OK");
            Ok(())
        }
        Err(e) => {
            error!("Connection failed: {e}");
            Err(e.into())
        }
    }
}

async fn list_tags(config: ViewerConfig) -> Result<()> {
    let dashboard = build_dashboard(config)?;
    if let TagRefresh::Applied(tags) = dashboard.refresh_tags().await? {
        info!("{} tag(s) available", tags.len());
    }
    Ok(())
}
