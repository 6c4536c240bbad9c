//! Transcript command: print a video's transcript.

use super::{load_transcript, run_preflight, resolve_language};
use crate::cli::preflight::Operation;
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use anyhow::Result;

/// Run the transcript command.
pub async fn run_transcript(
    url: &str,
    language: Option<String>,
    output: Option<String>,
    settings: Settings,
) -> Result<()> {
    let language = resolve_language(language, &settings);
    if language.eq_ignore_ascii_case(&settings.translation.target_language) {
        run_preflight(Operation::Fetch)?;
    } else {
        run_preflight(Operation::FetchAndTranslate)?;
    }

    let orchestrator = Orchestrator::new(settings)?;
    let transcript = load_transcript(&orchestrator, url, &language).await?;

    match output {
        Some(path) => {
            let path = Settings::expand_path(&path);
            std::fs::write(&path, &transcript)?;
            Output::success(&format!(
                "Transcript ({} characters) written to {}",
                transcript.chars().count(),
                path.display()
            ));
        }
        None => println!("{}", transcript),
    }

    Ok(())
}
