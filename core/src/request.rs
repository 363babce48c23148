use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_SENTENCES: usize = 3;
pub const SENTENCE_RANGE: RangeInclusive<usize> = 1..=10;

/// Which summaries a caller wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Extractive,
    Abstractive,
    Both,
}

impl Mode {
    pub fn includes_extractive(self) -> bool { matches!(self, Mode::Extractive | Mode::Both) }

    pub fn includes_abstractive(self) -> bool { matches!(self, Mode::Abstractive | Mode::Both) }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Mode::Extractive => "extractive",
            Mode::Abstractive => "abstractive",
            Mode::Both => "both",
        };
        f.write_str(s)
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "extractive" => Ok(Mode::Extractive),
            "abstractive" => Ok(Mode::Abstractive),
            "both" => Ok(Mode::Both),
            other => Err(format!("unknown mode '{other}' (expected extractive, abstractive or both)")),
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RequestError {
    #[error("Please enter some text to summarize.")]
    EmptyText,

    #[error("sentence count must be between 1 and 10, got {0}")]
    SentenceCount(usize),
}

/// What a presentation surface hands to the summarizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRequest {
    pub text: String,
    #[serde(default)]
    pub mode: Mode,
    #[serde(default = "default_sentences")]
    pub sentences: usize,
}
fn default_sentences() -> usize { DEFAULT_SENTENCES }

impl SummaryRequest {
    pub fn new(text: impl Into<String>, mode: Mode, sentences: usize) -> Self {
        Self { text: text.into(), mode, sentences }
    }

    /// Boundary checks performed by the UI layers; the summarizer itself only
    /// knows about the too-short threshold.
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.text.trim().is_empty() {
            return Err(RequestError::EmptyText);
        }
        if self.mode.includes_extractive() && !SENTENCE_RANGE.contains(&self.sentences) {
            return Err(RequestError::SentenceCount(self.sentences));
        }
        Ok(())
    }
}

/// Results keyed by path; a path that was not requested is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extractive: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abstractive: Option<String>,
}
