//! Interactive chat command.

use super::{load_session, run_preflight, resolve_language};
use crate::cli::preflight::Operation;
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use console::style;
use std::io::{self, BufRead, Write};

/// What a line typed at the prompt asks for.
#[derive(Debug, PartialEq, Eq)]
enum ChatInput<'a> {
    Empty,
    Exit,
    Clear,
    Question(&'a str),
}

fn parse_input(line: &str) -> ChatInput<'_> {
    let line = line.trim();
    if line.is_empty() {
        ChatInput::Empty
    } else if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
        ChatInput::Exit
    } else if line.eq_ignore_ascii_case("clear") {
        ChatInput::Clear
    } else {
        ChatInput::Question(line)
    }
}

/// Run the interactive chat command.
pub async fn run_chat(url: &str, language: Option<String>, settings: Settings) -> anyhow::Result<()> {
    run_preflight(Operation::Chat)?;

    let language = resolve_language(language, &settings);
    let orchestrator = Orchestrator::new(settings)?;
    let mut session = load_session(&orchestrator, url, &language).await?;

    println!("\n{}", style("TL;DW Chat").bold().cyan());
    println!(
        "{}\n",
        style("Ask about the video, or 'exit' to quit. Use 'clear' to reset the conversation.").dim()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} ", style("You:").green().bold());
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match parse_input(&line) {
            ChatInput::Empty => continue,
            ChatInput::Exit => {
                Output::info("Goodbye!");
                break;
            }
            ChatInput::Clear => {
                session.clear_history();
                Output::info("Conversation history cleared.");
            }
            ChatInput::Question(question) => {
                let spinner = Output::spinner("Thinking...");
                let result = session.ask(question).await;
                spinner.finish_and_clear();

                match result {
                    Ok(response) => {
                        println!("\n{} {}\n", style("TL;DW:").cyan().bold(), response.answer);
                    }
                    Err(e) => {
                        Output::error(&format!("Error: {}", e));
                    }
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input() {
        assert_eq!(parse_input("   \n"), ChatInput::Empty);
        assert_eq!(parse_input("EXIT\n"), ChatInput::Exit);
        assert_eq!(parse_input("quit"), ChatInput::Exit);
        assert_eq!(parse_input("clear"), ChatInput::Clear);
        assert_eq!(
            parse_input("  Why do cats purr?\n"),
            ChatInput::Question("Why do cats purr?")
        );
    }
}
