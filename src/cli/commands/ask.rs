//! Ask command implementation.

use super::{load_session, run_preflight, resolve_language};
use crate::cli::preflight::Operation;
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use anyhow::Result;

/// Run the ask command.
pub async fn run_ask(
    url: &str,
    question: &str,
    language: Option<String>,
    show_sources: bool,
    settings: Settings,
) -> Result<()> {
    run_preflight(Operation::Chat)?;

    let language = resolve_language(language, &settings);
    let orchestrator = Orchestrator::new(settings)?;
    let mut session = load_session(&orchestrator, url, &language).await?;

    let spinner = Output::spinner("Thinking...");
    let result = session.ask(question).await;
    spinner.finish_and_clear();

    match result {
        Ok(response) => {
            println!("\n{}\n", response.answer);

            if show_sources && !response.sources.is_empty() {
                Output::header("Sources");
                for source in &response.sources {
                    Output::passage(source);
                }
            }
        }
        Err(e) => {
            Output::error(&format!("Failed to generate answer: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
