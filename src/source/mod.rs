//! Transcript sources.
//!
//! A source turns a video id and caption language into plain transcript text.

mod rate_limit;
mod youtube;

pub use rate_limit::{RateLimitPolicy, RateLimitedSource};
pub use youtube::YoutubeTranscriptSource;

use crate::error::{Result, TldwError};
use async_trait::async_trait;
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

/// Trait for transcript providers.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch the transcript of `video_id` in `language`.
    ///
    /// Fails with `TranscriptUnavailable` when captions are disabled or not
    /// offered in that language.
    async fn fetch(&self, video_id: &str, language: &str) -> Result<String>;
}

fn video_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("static regex is valid"))
}

fn valid_id(candidate: &str) -> Option<String> {
    video_id_regex()
        .is_match(candidate)
        .then(|| candidate.to_string())
}

/// Extract a YouTube video id from a URL or a bare 11-character id.
pub fn extract_video_id(input: &str) -> Result<String> {
    let input = input.trim();

    if let Some(id) = valid_id(input) {
        return Ok(id);
    }

    let parsed = Url::parse(input).or_else(|_| Url::parse(&format!("https://{}", input)));

    let id = parsed.ok().and_then(|url| {
        let host = url.host_str()?.trim_start_matches("www.").trim_start_matches("m.");
        let mut segments = url.path_segments()?.filter(|s| !s.is_empty());

        match host {
            "youtu.be" => segments.next().and_then(valid_id),
            "youtube.com" | "music.youtube.com" | "youtube-nocookie.com" => {
                match segments.next()? {
                    "watch" => url
                        .query_pairs()
                        .find(|(key, _)| key == "v")
                        .and_then(|(_, value)| valid_id(&value)),
                    "embed" | "shorts" | "v" | "live" => segments.next().and_then(valid_id),
                    _ => None,
                }
            }
            _ => None,
        }
    });

    id.ok_or_else(|| {
        TldwError::InvalidInput(format!("Invalid YouTube URL or video id: {}", input))
    })
}
