//! CLI module for TL;DW.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// TL;DW - Too Long; Didn't Watch
///
/// Chat with a YouTube video, or turn it into topics and notes, from its transcript.
#[derive(Parser, Debug)]
#[command(name = "tldw")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "TLDW_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive chat about a video
    Chat {
        /// YouTube URL or video ID
        url: String,

        /// Caption language to fetch (defaults to the configured language)
        #[arg(short, long)]
        language: Option<String>,
    },

    /// Ask a single question about a video
    Ask {
        /// YouTube URL or video ID
        url: String,

        /// The question to ask
        question: String,

        /// Caption language to fetch
        #[arg(short, long)]
        language: Option<String>,

        /// Show the passages the answer was grounded on
        #[arg(short, long)]
        sources: bool,
    },

    /// Generate the key topics and detailed notes for a video
    Notes {
        /// YouTube URL or video ID
        url: String,

        /// Caption language to fetch
        #[arg(short, long)]
        language: Option<String>,

        /// Write the notes to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Print a video's transcript (translated when needed)
    Transcript {
        /// YouTube URL or video ID
        url: String,

        /// Caption language to fetch
        #[arg(short, long)]
        language: Option<String>,

        /// Write the transcript to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Check system requirements and configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chat_with_language() {
        let cli = Cli::try_parse_from(["tldw", "chat", "dQw4w9WgXcQ", "-l", "es"]).unwrap();
        match cli.command {
            Commands::Chat { url, language } => {
                assert_eq!(url, "dQw4w9WgXcQ");
                assert_eq!(language.as_deref(), Some("es"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_ask() {
        let cli = Cli::try_parse_from(["tldw", "-vv", "ask", "dQw4w9WgXcQ", "What is it about?", "--sources"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Ask { sources: true, .. }));
    }

    #[test]
    fn test_question_required() {
        assert!(Cli::try_parse_from(["tldw", "ask", "dQw4w9WgXcQ"]).is_err());
    }
}
