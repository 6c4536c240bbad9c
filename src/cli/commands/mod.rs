//! CLI command implementations.

mod ask;
mod chat;
mod config;
mod doctor;
mod notes;
mod transcript;

pub use ask::run_ask;
pub use chat::run_chat;
pub use config::run_config;
pub use doctor::run_doctor;
pub use notes::run_notes;
pub use transcript::run_transcript;

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use crate::session::Session;

/// Caption language from the flag, or the configured default.
fn resolve_language(language: Option<String>, settings: &Settings) -> String {
    language.unwrap_or_else(|| settings.transcript.default_language.clone())
}

/// Run pre-flight checks, pointing at `tldw doctor` on failure.
fn run_preflight(operation: Operation) -> anyhow::Result<()> {
    if let Err(e) = preflight::check(operation) {
        Output::error(&format!("{}", e));
        Output::info("Run 'tldw doctor' for detailed diagnostics.");
        return Err(e.into());
    }
    Ok(())
}

/// Fetch (and translate) a transcript behind a spinner.
async fn load_transcript(
    orchestrator: &Orchestrator,
    url: &str,
    language: &str,
) -> anyhow::Result<String> {
    let spinner = Output::spinner("Fetching transcript...");
    let result = orchestrator.fetch_transcript(url, language).await;
    spinner.finish_and_clear();

    match result {
        Ok(transcript) => Ok(transcript),
        Err(e) => {
            Output::error(&format!("Failed to load transcript: {}", e));
            Err(e.into())
        }
    }
}

/// Fetch a transcript and index it into a ready session.
async fn load_session(
    orchestrator: &Orchestrator,
    url: &str,
    language: &str,
) -> anyhow::Result<Session> {
    let transcript = load_transcript(orchestrator, url, language).await?;

    let spinner = Output::spinner("Indexing transcript...");
    let result = orchestrator.build_session(&transcript).await;
    spinner.finish_and_clear();

    match result {
        Ok(session) => {
            let passages = session.index().map(|index| index.len()).unwrap_or(0);
            Output::success(&format!("Indexed {} passages", passages));
            Ok(session)
        }
        Err(e) => {
            Output::error(&format!("Failed to index transcript: {}", e));
            Err(e.into())
        }
    }
}
