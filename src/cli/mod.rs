use crate::agent::actions::builtin::builtin_catalog;
use crate::agent::{ActionRegistry, Agent, FunctionCallingLanguage, Goal, RegistryFilter};
use crate::config::Config;
use crate::providers::openai::OpenAIClient;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

const DEFAULT_GOAL_NAME: &str = "Helpful Assistant";
const DEFAULT_GOAL_DESCRIPTION: &str =
    "You are a helpful AI assistant. Use the available tools to help users with their tasks.";

#[derive(Parser)]
#[command(name = "oxiagent")]
#[command(version, about = "Goal-directed AI agent loop")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a task through the agent loop
    Run {
        /// The task or question for the agent
        task: String,
        /// Override the model from config
        #[arg(long)]
        model: Option<String>,
        /// Override the iteration cap from config
        #[arg(long)]
        max_iterations: Option<usize>,
        /// Path to a config file (defaults to ./oxiagent.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// List the built-in capability catalog
    Tools,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            task,
            model,
            max_iterations,
            config,
        } => run_task(&task, model, max_iterations, config.as_deref()).await,
        Commands::Tools => {
            list_tools();
            Ok(())
        }
    }
}

async fn run_task(
    task: &str,
    model: Option<String>,
    max_iterations: Option<usize>,
    config_path: Option<&Path>,
) -> Result<()> {
    let mut config = Config::load(config_path)?;
    if let Some(model) = model {
        config.provider.model = model;
    }
    config.validate()?;

    let catalog = builtin_catalog();
    let mut registry = ActionRegistry::from_catalog(&catalog, &RegistryFilter::default());
    registry.register_terminal(&catalog)?;

    let goals = vec![Goal::new(1, DEFAULT_GOAL_NAME, DEFAULT_GOAL_DESCRIPTION)];

    let client = match config.provider.base_url.clone() {
        Some(base_url) => OpenAIClient::with_base_url(
            config.provider.api_key.clone(),
            config.provider.model.clone(),
            config.provider.max_tokens,
            base_url,
        ),
        None => OpenAIClient::new(
            config.provider.api_key.clone(),
            config.provider.model.clone(),
            config.provider.max_tokens,
        ),
    };

    let agent = Agent::new(
        goals,
        Arc::new(FunctionCallingLanguage::new()),
        registry,
        Arc::new(client),
    )
    .with_max_iterations(max_iterations.unwrap_or(config.agent.max_iterations));

    info!("starting run with model '{}'", config.provider.model);
    let outcome = agent.run(task, None, None).await?;

    println!(
        "--- Final memory ({:?} after {} iterations) ---",
        outcome.halt, outcome.iterations
    );
    for (i, entry) in outcome.memory.entries(None).iter().enumerate() {
        let content = entry.text().map_or_else(
            || serde_json::to_string(&entry.content).unwrap_or_default(),
            ToString::to_string,
        );
        println!("{:>2}. [{}] {}", i + 1, entry.kind, content);
    }
    Ok(())
}

fn list_tools() {
    let catalog = builtin_catalog();
    for (name, capability) in catalog.iter() {
        let marker = if capability.terminal() { " (terminal)" } else { "" };
        println!("{}{} — {}", name, marker, capability.description());
    }
}
