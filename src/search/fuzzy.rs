//! Subsequence scoring used to rank symbols and options
//!
//! Lower scores are better. A query matches a candidate when its characters
//! appear in order (case-insensitively); the score is the sum of the matched
//! positions, minus [`CONTIGUOUS_BONUS`] when the whole query appears as a
//! contiguous substring.

use rapidfuzz::distance::indel;
use std::cmp::Ordering;

/// Subtracted from the score when the query occurs contiguously
pub const CONTIGUOUS_BONUS: i64 = 10;

/// Minimum similarity for a "did you mean" suggestion
pub const SUGGESTION_CUTOFF: f64 = 0.6;

/// Score `candidate` against `query`, `None` when the query is not a subsequence.
/// The empty query matches everything with score 0.
pub fn match_score(candidate: &str, query: &str) -> Option<i64> {
    if query.is_empty() {
        return Some(0);
    }

    let candidate = candidate.to_lowercase();
    let query = query.to_lowercase();
    let haystack: Vec<char> = candidate.chars().collect();

    let mut from = 0;
    let mut score = 0i64;
    for ch in query.chars() {
        let position = from + haystack.get(from..)?.iter().position(|c| *c == ch)?;
        score += position as i64;
        from = position + 1;
    }

    if candidate.contains(&query) {
        score -= CONTIGUOUS_BONUS;
    }
    Some(score)
}

/// Keep the items whose key matches `query`, best first.
/// Ties on score are broken by the key, so the order is deterministic.
pub fn rank<'k, T>(items: impl IntoIterator<Item = (&'k str, T)>, query: &str) -> Vec<(&'k str, T)> {
    let mut scored: Vec<(i64, &'k str, T)> = items
        .into_iter()
        .filter_map(|(key, item)| match_score(key, query).map(|score| (score, key, item)))
        .collect();
    scored.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));
    scored.into_iter().map(|(_, key, item)| (key, item)).collect()
}

/// Normalized edit similarity in `[0, 1]`, 1 meaning identical
pub fn similarity(a: &str, b: &str) -> f64 {
    indel::normalized_similarity(a.chars(), b.chars())
}

/// The single candidate most similar to `query`, provided it reaches
/// [`SUGGESTION_CUTOFF`].
///
/// Equally similar candidates resolve to the lexicographically smallest one,
/// unlike `difflib.get_close_matches`, which returns the largest.
pub fn closest_match<'c>(query: &str, candidates: impl IntoIterator<Item = &'c str>) -> Option<&'c str> {
    candidates
        .into_iter()
        .map(|candidate| (similarity(query, candidate), candidate))
        .filter(|(ratio, _)| *ratio >= SUGGESTION_CUTOFF)
        .max_by(|a, b| {
            a.0.partial_cmp(&b.0)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.1.cmp(a.1))
        })
        .map(|(_, candidate)| candidate)
}
