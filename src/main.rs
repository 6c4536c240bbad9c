//! TL;DW CLI entry point.

use anyhow::Result;
use clap::Parser;
use tldw::cli::{commands, Cli, Commands};
use tldw::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.as_deref().map(Settings::expand_path);
    let settings = Settings::load_from(config_path.as_ref())?;

    // -v flags win over the configured level
    let log_level = match cli.verbose {
        0 => settings.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("tldw={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    match &cli.command {
        Commands::Chat { url, language } => {
            commands::run_chat(url, language.clone(), settings).await?;
        }

        Commands::Ask {
            url,
            question,
            language,
            sources,
        } => {
            commands::run_ask(url, question, language.clone(), *sources, settings).await?;
        }

        Commands::Notes {
            url,
            language,
            output,
        } => {
            commands::run_notes(url, language.clone(), output.clone(), settings).await?;
        }

        Commands::Transcript {
            url,
            language,
            output,
        } => {
            commands::run_transcript(url, language.clone(), output.clone(), settings).await?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings, config_path.as_deref())?;
        }

        Commands::Config { action } => {
            commands::run_config(action, config_path, settings)?;
        }
    }

    Ok(())
}
