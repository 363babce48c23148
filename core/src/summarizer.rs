use crate::frequency::FrequencyTable;
use crate::generator::{summary_prompt, GenerationError, TextGenerator};
use crate::preprocess::preprocess;
use crate::request::{SummaryReport, SummaryRequest};
use crate::scorer::score_sentences;
use crate::selector::{join_summary, select};
use crate::tokenizer::{sentence_split, word_count};
use thiserror::Error;
use tracing::{debug, warn};

pub const TOO_SHORT_MESSAGE: &str = "Text is too short to summarize.";
pub const MIN_WORDS: usize = 10;

#[derive(Error, Debug)]
pub enum SummarizeError {
    /// Fewer than [`MIN_WORDS`] words. Renders as [`TOO_SHORT_MESSAGE`].
    #[error("Text is too short to summarize.")]
    TooShort,

    #[error("Error in abstractive summarization: {0}")]
    Generation(#[from] GenerationError),
}

fn ensure_long_enough(text: &str) -> Result<(), SummarizeError> {
    if word_count(text) < MIN_WORDS {
        Err(SummarizeError::TooShort)
    } else {
        Ok(())
    }
}

/// Frequency-based extractive summary of at most `sentence_count` sentences.
pub fn try_extractive(text: &str, sentence_count: usize) -> Result<String, SummarizeError> {
    ensure_long_enough(text)?;
    let sentences = sentence_split(text);
    if sentences.len() <= sentence_count {
        debug!(sentences = sentences.len(), requested = sentence_count, "document already short enough");
        let all: Vec<&str> = sentences.iter().map(String::as_str).collect();
        return Ok(join_summary(&all));
    }

    let table = FrequencyTable::from_text(text);
    let scored = score_sentences(&sentences, &table);
    let selected = select(&sentences, scored, sentence_count);
    debug!(
        sentences = sentences.len(),
        vocabulary = table.len(),
        selected = selected.len(),
        "extractive summary built"
    );
    Ok(join_summary(&selected))
}

/// Like [`try_extractive`] but always yields displayable text.
pub fn extractive_summarize(text: &str, sentence_count: usize) -> String {
    try_extractive(text, sentence_count).unwrap_or_else(|err| err.to_string())
}

/// One generator call with the summary prompt. No retries.
pub fn try_abstractive(generator: &dyn TextGenerator, text: &str) -> Result<String, SummarizeError> {
    ensure_long_enough(text)?;
    let prompt = summary_prompt(text);
    generator.generate(&prompt).map_err(|err| {
        warn!(error = %err, "abstractive summarization failed");
        SummarizeError::from(err)
    })
}

/// Like [`try_abstractive`] but failures come back as an error string.
pub fn abstractive_summarize(generator: &dyn TextGenerator, text: &str) -> String {
    try_abstractive(generator, text).unwrap_or_else(|err| err.to_string())
}

/// Preprocess once, then run whichever paths the request's mode selects.
pub fn summarize(request: &SummaryRequest, generator: &dyn TextGenerator) -> SummaryReport {
    let text = preprocess(&request.text);
    debug!(mode = %request.mode, words = word_count(&text), "summarizing");
    SummaryReport {
        extractive: request
            .mode
            .includes_extractive()
            .then(|| extractive_summarize(&text, request.sentences)),
        abstractive: request
            .mode
            .includes_abstractive()
            .then(|| abstractive_summarize(generator, &text)),
    }
}
