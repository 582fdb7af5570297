//! CLI for the crewgate delegation service

use clap::Parser;
use crewgate::{ChatCompletionEngine, CrewService, CrewgateConfig, EngineExt};
use crewgate_cli::{
    commands::{self, CapabilityRunner, parse_json_arg},
    error::CliError,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "crewgate")]
#[command(about = "CLI for the crewgate delegation service", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(long, short = 'c', global = true, default_value = "crewgate.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Write a starter config file
    Init {
        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
    #[command(flatten)]
    Capability(CapabilityCommand),
}

#[derive(clap::Subcommand)]
enum CapabilityCommand {
    /// Analyze arbitrary data
    Analyze {
        /// Data to analyze (JSON, or plain text)
        #[arg(long, short = 'd')]
        data: String,
    },
    /// Personalized recommendations for a user profile
    Recommend {
        /// User profile (JSON, or plain text)
        #[arg(long, short = 'd')]
        data: String,
    },
    /// Sentiment of a piece of text
    Sentiment {
        /// Text to classify
        #[arg(long, short = 't')]
        text: String,
    },
    /// Generate content on a topic
    GenerateContent {
        /// What to write about
        #[arg(long)]
        topic: String,
        /// What to write (blog post, tweet, ...)
        #[arg(long)]
        content_type: String,
    },
    /// Analysis, sentiment, recommendations and a summary in one run
    Comprehensive {
        /// Data to analyze (JSON, or plain text)
        #[arg(long, short = 'd')]
        data: String,
    },
}

fn load_config(path: &Path) -> Result<CrewgateConfig, CliError> {
    if path.exists() {
        Ok(CrewgateConfig::load_from_file(path)?)
    } else {
        eprintln!(
            "⚠️  {} not found, using default configuration",
            path.display()
        );
        Ok(CrewgateConfig::default())
    }
}

fn runner(config: CrewgateConfig) -> Result<CapabilityRunner, CliError> {
    let engine = ChatCompletionEngine::from_config(&config.llm)
        .map_err(|e| CliError::InvalidInput(e.to_string()))?;
    if !engine.has_api_key() {
        return Err(CliError::InvalidInput(format!(
            "${} is not set",
            config.llm.api_key_env
        )));
    }
    Ok(CapabilityRunner::new(
        CrewService::new(engine.shared()),
        config,
    ))
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    crewgate::load_dotenv();

    let command = match cli.command {
        Some(Commands::Init { force }) => {
            commands::run_init(&cli.config, force).await?;
            return Ok(());
        }
        Some(Commands::Capability(command)) => command,
        None => {
            println!("crewgate - delegate analysis work to an agent crew");
            println!("Use --help for more information");
            return Ok(());
        }
    };

    let runner = runner(load_config(&cli.config)?)?;
    let output = match command {
        CapabilityCommand::Analyze { data } => runner.analyze(parse_json_arg(&data)).await?,
        CapabilityCommand::Recommend { data } => runner.recommend(parse_json_arg(&data)).await?,
        CapabilityCommand::Sentiment { text } => runner.sentiment(text).await?,
        CapabilityCommand::GenerateContent {
            topic,
            content_type,
        } => runner.generate_content(topic, content_type).await?,
        CapabilityCommand::Comprehensive { data } => {
            runner.comprehensive(parse_json_arg(&data)).await?
        }
    };

    println!("{}", output);
    Ok(())
}
