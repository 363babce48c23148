use crate::stopwords::filter_stopwords;
use crate::tokenizer::word_split;
use std::collections::HashMap;

/// Document-wide word counts over non-stopword tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: HashMap<String, u32>,
}

impl FrequencyTable {
    /// Count an already filtered token stream. Tokens are compared verbatim.
    pub fn build<I>(tokens: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut counts: HashMap<String, u32> = HashMap::new();
        for token in tokens {
            *counts.entry(token).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Tokenize, filter stopwords and count in one go.
    pub fn from_text(text: &str) -> Self {
        Self::build(filter_stopwords(word_split(text)))
    }

    /// Occurrences of `word`, zero when it was never seen.
    pub fn get(&self, word: &str) -> u32 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize { self.counts.len() }

    pub fn is_empty(&self) -> bool { self.counts.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(w, c)| (w.as_str(), *c))
    }
}
