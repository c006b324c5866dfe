use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use review_council::agents::{default_agents, AgentCoordinator};
use review_council::cli::{infer_language, Cli, Commands, ConfigAction, Display, OutputFormat};
use review_council::config::{CouncilConfig, CONFIG_FILE_NAME};
use review_council::error::{CouncilError, Result};
use review_council::output::{AgentInfo, OutputWriter};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            Display::new().print_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("review_council=debug")
    } else {
        EnvFilter::new("review_council=info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
    let writer = OutputWriter::new(cli.output);

    match cli.command {
        Commands::Review {
            path,
            language,
            priority,
        } => cmd_review(&config_path, cli.output, path, language, priority).await,
        Commands::Agents => cmd_agents(&writer),
        Commands::Config { action } => cmd_config(&config_path, &writer, action).await,
    }
}

async fn cmd_review(
    config_path: &std::path::Path,
    output: OutputFormat,
    path: PathBuf,
    language: Option<String>,
    priority: Option<review_council::cli::PriorityArg>,
) -> Result<()> {
    let mut config = CouncilConfig::load(config_path).await?;
    if let Some(priority) = priority {
        config.project.priority = priority.into();
    }

    let code = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| CouncilError::UnreviewableSource {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    let language = language.unwrap_or_else(|| infer_language(&path).to_string());

    if output == OutputFormat::Text {
        Display::new().print_status(&format!(
            "Reviewing {} as {} (priority: {})",
            path.display(),
            language,
            config.project.priority
        ));
    }

    let coordinator = AgentCoordinator::from_config(&config)?;
    let outcome = coordinator.run_review(&code, &language).await;

    let writer =
        OutputWriter::new(output).with_max_suggestions(config.review.max_suggestions_shown);
    writer.emit_outcome(&outcome);
    Ok(())
}

fn cmd_agents(writer: &OutputWriter) -> Result<()> {
    let roster: Vec<AgentInfo> = default_agents()
        .iter()
        .map(|agent| AgentInfo::from_agent(agent.as_ref()))
        .collect();
    if writer.format() == OutputFormat::Text {
        Display::new().print_header("Review Agents");
    }
    writer.emit_roster(&roster);
    Ok(())
}

async fn cmd_config(
    config_path: &std::path::Path,
    writer: &OutputWriter,
    action: ConfigAction,
) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = CouncilConfig::load(config_path).await?;
            let rendered =
                toml::to_string_pretty(&config).map_err(|e| CouncilError::Config(e.to_string()))?;
            writer.emit_message(&rendered);
        }
        ConfigAction::Init => {
            let target = std::path::Path::new(CONFIG_FILE_NAME);
            if target.exists() {
                return Err(CouncilError::Config(format!(
                    "{CONFIG_FILE_NAME} already exists"
                )));
            }
            CouncilConfig::default().save(target).await?;
            writer.emit_message(&format!("Wrote {CONFIG_FILE_NAME}"));
        }
    }
    Ok(())
}
