//! YouTube captions via yt-dlp.

use super::TranscriptSource;
use crate::error::{Result, TldwError};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Fetches manual or automatic YouTube captions with `yt-dlp`.
pub struct YoutubeTranscriptSource {
    binary: String,
}

impl YoutubeTranscriptSource {
    pub fn new() -> Self {
        Self::with_binary("yt-dlp")
    }

    /// Use a specific yt-dlp executable.
    pub fn with_binary(binary: &str) -> Self {
        Self {
            binary: binary.to_string(),
        }
    }

    /// Find the subtitle file yt-dlp wrote into `dir`.
    fn find_subtitle_file(dir: &Path) -> Result<Option<PathBuf>> {
        let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "json3"))
            .collect();
        files.sort();
        Ok(files.into_iter().next())
    }

    /// Join caption events into one line of text.
    fn parse_json3(content: &str) -> Result<String> {
        let captions: Json3 = serde_json::from_str(content)?;

        let text = captions
            .events
            .iter()
            .map(|event| {
                event
                    .segs
                    .iter()
                    .map(|seg| seg.utf8.as_str())
                    .collect::<String>()
            })
            .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        Ok(text)
    }
}

impl Default for YoutubeTranscriptSource {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct Json3 {
    #[serde(default)]
    events: Vec<Json3Event>,
}

#[derive(Debug, Deserialize)]
struct Json3Event {
    #[serde(default)]
    segs: Vec<Json3Segment>,
}

#[derive(Debug, Deserialize)]
struct Json3Segment {
    #[serde(default)]
    utf8: String,
}

#[async_trait]
impl TranscriptSource for YoutubeTranscriptSource {
    #[instrument(skip(self))]
    async fn fetch(&self, video_id: &str, language: &str) -> Result<String> {
        let dir = tempfile::tempdir()?;
        let url = format!("https://www.youtube.com/watch?v={}", video_id);
        let template = dir.path().join("%(id)s.%(ext)s");

        info!("Fetching {} captions for {}", language, video_id);

        let output = tokio::process::Command::new(&self.binary)
            .args([
                "--skip-download",
                "--write-subs",
                "--write-auto-subs",
                "--sub-format",
                "json3",
                "--no-warnings",
                "--sub-langs",
                language,
                "-o",
            ])
            .arg(&template)
            .arg(&url)
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    TldwError::ToolNotFound(self.binary.clone())
                } else {
                    TldwError::ToolFailed(format!("Failed to run {}: {}", self.binary, e))
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if stderr.contains("Video unavailable") || stderr.contains("Private video") {
                return Err(TldwError::TranscriptUnavailable(format!(
                    "Video {} is unavailable: {}",
                    video_id,
                    stderr.trim()
                )));
            }
            return Err(TldwError::ToolFailed(format!(
                "{} failed for {}: {}",
                self.binary,
                video_id,
                stderr.trim()
            )));
        }

        let path = Self::find_subtitle_file(dir.path())?.ok_or_else(|| {
            TldwError::TranscriptUnavailable(format!(
                "Subtitles are disabled for video {} or not available in language '{}'",
                video_id, language
            ))
        })?;

        debug!("Reading captions from {}", path.display());
        let content = tokio::fs::read_to_string(&path).await?;
        let text = Self::parse_json3(&content)?;

        if text.trim().is_empty() {
            return Err(TldwError::TranscriptUnavailable(format!(
                "Captions for video {} are empty",
                video_id
            )));
        }

        info!("Fetched transcript with {} characters", text.chars().count());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json3() {
        let json = r#"{
            "wireMagic": "pb3",
            "events": [
                {"tStartMs": 0, "dDurationMs": 1000, "segs": [{"utf8": "Hello"}, {"utf8": " everyone,"}]},
                {"tStartMs": 1000, "aAppend": 1, "segs": [{"utf8": "\n"}]},
                {"tStartMs": 1200},
                {"tStartMs": 2000, "segs": [{"utf8": "welcome   to\nthe show."}]}
            ]
        }"#;

        let text = YoutubeTranscriptSource::parse_json3(json).unwrap();
        assert_eq!(text, "Hello everyone, welcome to the show.");
    }

    #[test]
    fn test_parse_json3_invalid() {
        assert!(YoutubeTranscriptSource::parse_json3("not json").is_err());
    }

    #[test]
    fn test_find_subtitle_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(YoutubeTranscriptSource::find_subtitle_file(dir.path()).unwrap().is_none());

        std::fs::write(dir.path().join("abc.info.json"), "{}").unwrap();
        std::fs::write(dir.path().join("abc.en.json3"), "{}").unwrap();

        let found = YoutubeTranscriptSource::find_subtitle_file(dir.path()).unwrap().unwrap();
        assert!(found.ends_with("abc.en.json3"));
    }

    #[tokio::test]
    async fn test_missing_binary() {
        let source = YoutubeTranscriptSource::with_binary("definitely-not-a-real-yt-dlp-binary");
        let err = source.fetch("dQw4w9WgXcQ", "en").await.unwrap_err();
        assert!(matches!(err, TldwError::ToolNotFound(_)));
    }
}
