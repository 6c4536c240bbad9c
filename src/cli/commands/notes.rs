//! Notes command: key topics and detailed notes for a video.

use super::{load_transcript, run_preflight, resolve_language};
use crate::cli::preflight::Operation;
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use anyhow::Result;

/// Run the notes command.
pub async fn run_notes(
    url: &str,
    language: Option<String>,
    output: Option<String>,
    settings: Settings,
) -> Result<()> {
    run_preflight(Operation::Chat)?;

    let language = resolve_language(language, &settings);
    let orchestrator = Orchestrator::new(settings)?;
    let transcript = load_transcript(&orchestrator, url, &language).await?;

    let summarizer = orchestrator.summarizer();
    let spinner = Output::spinner("Writing topics and notes...");
    let result = futures::try_join!(summarizer.topics(&transcript), summarizer.notes(&transcript));
    spinner.finish_and_clear();

    let (topics, notes) = match result {
        Ok(pair) => pair,
        Err(e) => {
            Output::error(&format!("Failed to generate notes: {}", e));
            return Err(e.into());
        }
    };

    let document = render_document(&topics, &notes);

    match output {
        Some(path) => {
            let path = Settings::expand_path(&path);
            std::fs::write(&path, &document)?;
            Output::success(&format!("Notes written to {}", path.display()));
        }
        None => println!("{}", document),
    }

    Ok(())
}

fn render_document(topics: &str, notes: &str) -> String {
    format!(
        "## Key Topics\n\n{}\n\n## Notes\n\n{}\n",
        topics.trim(),
        notes.trim()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_document() {
        let doc = render_document("1. Cats\n", "\n- Cats purr.");
        assert_eq!(doc, "## Key Topics\n\n1. Cats\n\n## Notes\n\n- Cats purr.\n");
    }
}
