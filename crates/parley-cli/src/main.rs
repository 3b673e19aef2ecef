use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use parley_cli::{
    config::Config,
    repl::{self, Console},
};
use parley_graph::{load_graph_from_file, ConversationEngine, Loaded};

#[derive(Parser)]
#[command(name = "parley")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Chat with a keyword answer graph from the terminal")]
struct Cli {
    /// Extra configuration file, layered over config/default.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Answer-graph file (overrides graph.path)
    #[arg(long)]
    graph: Option<PathBuf>,

    /// Seed for answer selection (overrides engine.seed)
    #[arg(long)]
    seed: Option<u64>,

    /// Print every turn event as JSON on stderr
    #[arg(long)]
    events: bool,
}

fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;
    if let Some(graph) = cli.graph {
        config.graph.path = graph;
    }
    if let Some(seed) = cli.seed {
        config.engine.seed = Some(seed);
    }

    init_logging(&config);

    let Loaded { graph, report } = load_graph_from_file(&config.graph.path)
        .with_context(|| format!("Failed to load answer graph {}", config.graph.path.display()))?;
    if !report.is_empty() {
        tracing::warn!("{} lines skipped or flagged while loading", report.len());
    }

    let mut engine = ConversationEngine::new(&graph, config.engine.clone())?;

    let mut console = Console {
        output: io::stdout().lock(),
        events: cli.events.then(io::stderr),
    };
    repl::run(&mut engine, io::stdin().lock(), &mut console)?;

    Ok(())
}

fn init_logging(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let registry = tracing_subscriber::registry().with(env_filter);

    // logs go to stderr so stdout carries only the conversation
    match config.logging.format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
                .init();
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty().with_writer(io::stderr))
                .init();
        }
    }
}
