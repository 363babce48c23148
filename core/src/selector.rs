use crate::scorer::ScoredSentence;
use std::cmp::Reverse;

/// Indices of the sentences to keep, in document order.
///
/// When the document has no more than `count` sentences every index is
/// returned without ranking. Otherwise sentences are ranked by score
/// descending with lower index winning ties, cut to `count`, then put back
/// into document order.
pub fn select_indices(total: usize, mut scored: Vec<ScoredSentence<'_>>, count: usize) -> Vec<usize> {
    if total <= count {
        return (0..total).collect();
    }
    scored.sort_by_key(|s| (Reverse(s.score), s.index));
    let mut chosen: Vec<usize> = scored.into_iter().take(count).map(|s| s.index).collect();
    chosen.sort_unstable();
    chosen
}

/// Pick up to `count` sentences and return them in document order.
pub fn select<'a>(sentences: &'a [String], scored: Vec<ScoredSentence<'a>>, count: usize) -> Vec<&'a str> {
    select_indices(sentences.len(), scored, count)
        .into_iter()
        .map(|i| sentences[i].as_str())
        .collect()
}

pub fn join_summary(selected: &[&str]) -> String {
    selected.join(" ")
}
