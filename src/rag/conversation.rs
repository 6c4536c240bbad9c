//! Conversation log and the paired history derived from it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// One message in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

/// A user turn and the assistant turn that answered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub user: String,
    pub assistant: String,
}

/// Append-only, chronologically ordered conversation turns.
///
/// Alternation is not enforced: consecutive turns of the same role and a
/// trailing unanswered user turn are both allowed.
#[derive(Debug, Clone, Default)]
pub struct ConversationLog {
    turns: Vec<Turn>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, role: Role, content: impl Into<String>) {
        self.turns.push(Turn {
            role,
            content: content.into(),
        });
    }

    /// Every user turn immediately followed by an assistant turn, in order.
    ///
    /// Derived from the current turns on each call.
    pub fn paired_history(&self) -> Vec<HistoryEntry> {
        self.turns
            .windows(2)
            .filter(|w| w[0].role == Role::User && w[1].role == Role::Assistant)
            .map(|w| HistoryEntry {
                user: w[0].content.clone(),
                assistant: w[1].content.clone(),
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

/// Render history as `User: …\nAssistant: …` blocks separated by newlines.
pub fn format_history(entries: &[HistoryEntry]) -> String {
    entries
        .iter()
        .map(|entry| format!("User: {}\nAssistant: {}", entry.user, entry.assistant))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(user: &str, assistant: &str) -> HistoryEntry {
        HistoryEntry {
            user: user.to_string(),
            assistant: assistant.to_string(),
        }
    }

    #[test]
    fn test_trailing_user_turn_omitted() {
        let mut log = ConversationLog::new();
        log.append(Role::User, "a");
        log.append(Role::Assistant, "b");
        log.append(Role::User, "c");

        assert_eq!(log.paired_history(), vec![pair("a", "b")]);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_consecutive_same_role_turns() {
        let mut log = ConversationLog::new();
        log.append(Role::User, "first try");
        log.append(Role::User, "resubmitted");
        log.append(Role::Assistant, "answer");
        log.append(Role::Assistant, "extra");
        log.append(Role::User, "next");
        log.append(Role::Assistant, "next answer");

        assert_eq!(
            log.paired_history(),
            vec![pair("resubmitted", "answer"), pair("next", "next answer")]
        );
    }

    #[test]
    fn test_history_reflects_latest_appends() {
        let mut log = ConversationLog::new();
        assert!(log.paired_history().is_empty());

        log.append(Role::User, "q1");
        assert!(log.paired_history().is_empty());

        log.append(Role::Assistant, "a1");
        assert_eq!(log.paired_history(), vec![pair("q1", "a1")]);

        log.clear();
        assert!(log.is_empty());
        assert!(log.paired_history().is_empty());
    }

    #[test]
    fn test_format_history() {
        let entries = vec![pair("What is X?", "X is Y."), pair("And Z?", "Z is W.")];
        assert_eq!(
            format_history(&entries),
            "User: What is X?\nAssistant: X is Y.\nUser: And Z?\nAssistant: Z is W."
        );
        assert_eq!(format_history(&[]), "");
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::User.to_string(), "user");
        assert_eq!(Role::Assistant.to_string(), "assistant");
    }
}
