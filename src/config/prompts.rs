//! Prompt templates for TL;DW.
//!
//! Prompts can be customized by placing TOML files in the custom prompts directory.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Answer returned when neither the retrieved passages nor the history contain the answer.
pub const FALLBACK_ANSWER: &str =
    "I couldn’t find that information in the database. Could you please rephrase or ask something else?";

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub rag: RagPrompts,
    pub translation: TranslationPrompts,
    pub summary: SummaryPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: HashMap<String, String>,
}

/// Prompts for grounded question answering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RagPrompts {
    /// Template with `{{context}}`, `{{history}}`, `{{question}}` and `{{fallback}}`.
    pub answer: String,
    /// Sentence returned when the answer is not in the context or history.
    pub fallback: String,
}

impl Default for RagPrompts {
    fn default() -> Self {
        Self {
            answer: r#"You are a kind, polite, and precise assistant helping the user based on a video transcript.

Rules:
- Use BOTH the retrieved video context and the previous chat history to understand the user's intent.
- Maintain conversational flow and stay aware of what was said earlier.
- Answer ONLY using the retrieved context or information logically inferred from it.
- If the answer is not in the context or chat history, reply with exactly:
  "{{fallback}}"
- Keep your answers concise, clear, and friendly.

====== Retrieved Video Context ======
{{context}}

====== Chat History ======
{{history}}

====== User's New Question ======
{{question}}

====== Assistant's Answer ======
"#
            .to_string(),
            fallback: FALLBACK_ANSWER.to_string(),
        }
    }
}

/// Prompts for transcript translation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationPrompts {
    /// Template with `{{transcript}}` and `{{target_language}}`.
    pub user: String,
}

impl Default for TranslationPrompts {
    fn default() -> Self {
        Self {
            user: r#"You are an expert translator with deep cultural and linguistic knowledge.
I will provide you with a transcript. Translate it into {{target_language}} with absolute accuracy, preserving:
- Full meaning and context (no omissions, no additions).
- Tone and style (formal/informal, emotional/neutral as in the original).
- Nuances, idioms, and cultural expressions (adapt appropriately while keeping intent).
- The speaker's voice (same perspective, no rewriting into third person).
Do not summarize or simplify. Output only the translation.

Transcript:
{{transcript}}"#
                .to_string(),
        }
    }
}

/// Prompts for one-shot summaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryPrompts {
    /// Key topics template with `{{transcript}}`.
    pub topics: String,
    /// Study notes template with `{{transcript}}`.
    pub notes: String,
}

impl Default for SummaryPrompts {
    fn default() -> Self {
        Self {
            topics: r#"You are an assistant that extracts the 5 most important topics discussed in a video transcript.

Rules:
- Summarize into exactly 5 major points.
- Each point should represent a key topic or concept, not small details.
- Keep wording concise and focused on the technical content.
- Do not phrase them as questions or opinions.
- Output a numbered list.
- Only include points that are discussed in the transcript.

Transcript:
{{transcript}}"#
                .to_string(),

            notes: r#"You are an AI note-taker. Read the following video transcript and produce well-structured, concise notes.

Requirements:
- Present the output as bulleted points, grouped into clear sections.
- Highlight key takeaways, important facts, and examples.
- Use short, clear sentences (no long paragraphs).
- If the transcript covers multiple themes, organize them under subheadings.
- Do not add information that is not present in the transcript.

Transcript:
{{transcript}}"#
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = super::Settings::expand_path(dir);

            let rag_path = custom_path.join("rag.toml");
            if rag_path.exists() {
                let content = std::fs::read_to_string(&rag_path)?;
                prompts.rag = toml::from_str(&content)?;
            }

            let translation_path = custom_path.join("translation.toml");
            if translation_path.exists() {
                let content = std::fs::read_to_string(&translation_path)?;
                prompts.translation = toml::from_str(&content)?;
            }

            let summary_path = custom_path.join("summary.toml");
            if summary_path.exists() {
                let content = std::fs::read_to_string(&summary_path)?;
                prompts.summary = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    ///
    /// The template is scanned once, left to right. Substituted values are
    /// never scanned again, so a value containing `{{name}}` is inserted
    /// verbatim. Unknown placeholders are left as they are.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        let mut result = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(open) = rest.find("{{") {
            result.push_str(&rest[..open]);
            let after = &rest[open + 2..];

            let value = after
                .find("}}")
                .and_then(|close| vars.get(&after[..close]).map(|value| (close, value)));

            match value {
                Some((close, value)) => {
                    result.push_str(value);
                    rest = &after[close + 2..];
                }
                None => {
                    result.push_str("{{");
                    rest = after;
                }
            }
        }

        result.push_str(rest);
        result
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(&self, template: &str, vars: &HashMap<String, String>) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}
