use crate::frequency::FrequencyTable;
use crate::stopwords::is_stopword;
use crate::tokenizer::word_split;

/// A sentence paired with its position in the document and its score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredSentence<'a> {
    pub index: usize,
    pub text: &'a str,
    pub score: u64,
}

/// Sum of document-wide frequencies of the sentence's words.
///
/// A word repeated k times contributes k times its frequency. Stopwords are
/// skipped outright rather than relying on their absence from the table.
pub fn score_sentence(sentence: &str, table: &FrequencyTable) -> u64 {
    word_split(sentence)
        .iter()
        .filter(|w| !is_stopword(w))
        .map(|w| u64::from(table.get(w)))
        .sum()
}

/// Score every non-blank sentence, keeping its original index.
pub fn score_sentences<'a>(sentences: &'a [String], table: &FrequencyTable) -> Vec<ScoredSentence<'a>> {
    sentences
        .iter()
        .enumerate()
        .filter(|(_, s)| !s.trim().is_empty())
        .map(|(index, s)| ScoredSentence { index, text: s.as_str(), score: score_sentence(s, table) })
        .collect()
}
