use std::hash::Hash;

use indexmap::IndexMap;

/// All contiguous windows of `n` chars, left to right.
///
/// Empty when `n` is zero or longer than `s`.
pub fn extract_ngrams(s: &str, n: usize) -> Vec<&str> {
    if n == 0 {
        return Vec::new();
    }

    let mut bounds: Vec<usize> = s.char_indices().map(|(i, _)| i).collect();
    bounds.push(s.len());
    if bounds.len() <= n {
        return Vec::new();
    }

    bounds
        .windows(n + 1)
        .map(|w| &s[w[0]..w[n]])
        .collect()
}

/// Count occurrences and rank them by descending count. Ties keep
/// first-seen order.
pub fn rank_by_count<T, I>(items: I) -> Vec<(T, usize)>
where
    T: Hash + Eq,
    I: IntoIterator<Item = T>,
{
    let mut counts: IndexMap<T, usize> = IndexMap::new();
    for item in items {
        *counts.entry(item).or_insert(0) += 1;
    }

    let mut ranked: Vec<(T, usize)> = counts.into_iter().collect();
    // sort_by is stable, so equal counts stay in insertion order
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

/// Count n-grams over every string in `corpus` and return the `limit` most
/// frequent. Ties keep first-seen order.
pub fn top_ngrams<S: AsRef<str>>(corpus: &[S], n: usize, limit: usize) -> Vec<(String, usize)> {
    let mut ranked = rank_by_count(corpus.iter().flat_map(|s| extract_ngrams(s.as_ref(), n)));
    ranked.truncate(limit);

    ranked
        .into_iter()
        .map(|(ngram, count)| (ngram.to_string(), count))
        .collect()
}
