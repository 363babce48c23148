//! Extractive and abstractive text summarization.
//!
//! The extractive path is self-contained: preprocess, split into sentences
//! and words, count non-stopword frequencies, score each sentence by the sum
//! of its words' frequencies, keep the top sentences in document order. The
//! abstractive path hands the text to a [`TextGenerator`].

pub mod frequency;
pub mod generator;
pub mod preprocess;
pub mod request;
pub mod scorer;
pub mod selector;
pub mod stopwords;
pub mod summarizer;
pub mod tokenizer;

pub use frequency::FrequencyTable;
pub use generator::{load_generator, GenerationError, GenerationParams, GroqClient, TextGenerator, Unconfigured};
pub use preprocess::preprocess;
pub use request::{Mode, RequestError, SummaryReport, SummaryRequest};
pub use scorer::ScoredSentence;
pub use summarizer::{
    abstractive_summarize, extractive_summarize, summarize, try_abstractive, try_extractive, SummarizeError,
    MIN_WORDS, TOO_SHORT_MESSAGE,
};
