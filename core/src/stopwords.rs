use lazy_static::lazy_static;
use std::collections::HashSet;

lazy_static! {
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "i","me","my","myself","we","our","ours","ourselves",
            "you","you're","you've","you'll","you'd","your","yours","yourself","yourselves",
            "he","him","his","himself","she","she's","her","hers","herself",
            "it","it's","its","itself","they","them","their","theirs","themselves",
            "what","which","who","whom"
        ];
        words.iter().copied().collect()
    };
}

/// Case-insensitive membership test against the fixed stopword table.
pub fn is_stopword(token: &str) -> bool {
    if token.chars().any(char::is_uppercase) {
        STOPWORDS.contains(token.to_lowercase().as_str())
    } else {
        STOPWORDS.contains(token)
    }
}

/// Drop stopwords and blank tokens, keeping the survivors in order.
pub fn filter_stopwords<I>(tokens: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    tokens
        .into_iter()
        .filter(|t| !t.trim().is_empty() && !is_stopword(t))
        .collect()
}
