//! Levenshtein distance calculation for spelling correction.

use std::cmp::min;

/// Calculate the Levenshtein distance between two strings.
///
/// This is the minimum number of single-character edits (insertions,
/// deletions, or substitutions) required to change one word into another.
/// Only two rows of the DP matrix are kept, sized by the shorter input.
pub fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();
    distance_chars(&a, &b)
}

/// Calculate Levenshtein distance with a maximum threshold for early termination.
///
/// Returns `None` if the distance exceeds the threshold. The result is
/// identical to [`levenshtein_distance`] whenever it is `Some`.
pub fn levenshtein_distance_threshold(s1: &str, s2: &str, threshold: usize) -> Option<usize> {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();
    distance_chars_threshold(&a, &b, threshold)
}

fn distance_chars(a: &[char], b: &[char]) -> usize {
    let (short, long) = order_by_length(a, b);

    if short.is_empty() {
        return long.len();
    }

    let mut prev_row: Vec<usize> = (0..=short.len()).collect();
    let mut curr_row = vec![0; short.len() + 1];

    for (i, &lc) in long.iter().enumerate() {
        curr_row[0] = i + 1;

        for (j, &sc) in short.iter().enumerate() {
            let cost = if lc == sc { 0 } else { 1 };

            curr_row[j + 1] = min(
                min(
                    prev_row[j + 1] + 1, // deletion
                    curr_row[j] + 1,     // insertion
                ),
                prev_row[j] + cost, // substitution
            );
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[short.len()]
}

fn distance_chars_threshold(a: &[char], b: &[char], threshold: usize) -> Option<usize> {
    let (short, long) = order_by_length(a, b);

    if long.len() - short.len() > threshold {
        return None;
    }

    if short.is_empty() {
        return Some(long.len());
    }

    let mut prev_row: Vec<usize> = (0..=short.len()).collect();
    let mut curr_row = vec![0; short.len() + 1];

    for (i, &lc) in long.iter().enumerate() {
        curr_row[0] = i + 1;
        let mut min_in_row = curr_row[0];

        for (j, &sc) in short.iter().enumerate() {
            let cost = if lc == sc { 0 } else { 1 };

            curr_row[j + 1] = min(
                min(prev_row[j + 1] + 1, curr_row[j] + 1),
                prev_row[j] + cost,
            );

            min_in_row = min(min_in_row, curr_row[j + 1]);
        }

        // Row minima never decrease, so the final cell cannot come back under the bound.
        if min_in_row > threshold {
            return None;
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    let distance = prev_row[short.len()];
    if distance <= threshold {
        Some(distance)
    } else {
        None
    }
}

fn order_by_length<'a>(a: &'a [char], b: &'a [char]) -> (&'a [char], &'a [char]) {
    if a.len() <= b.len() { (a, b) } else { (b, a) }
}

/// Distance calculator bound to one query string.
///
/// The query's characters are decoded once and reused for every candidate
/// during a vocabulary scan.
#[derive(Debug, Clone)]
pub struct LevenshteinMatcher {
    query: String,
    chars: Vec<char>,
}

impl LevenshteinMatcher {
    /// Create a new matcher for the given query string.
    pub fn new(query: impl Into<String>) -> Self {
        let query = query.into();
        let chars = query.chars().collect();
        LevenshteinMatcher { query, chars }
    }

    /// Get the original query string.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Length of the query in characters.
    pub fn query_len(&self) -> usize {
        self.chars.len()
    }

    /// First character of the query, if any.
    pub fn first_char(&self) -> Option<char> {
        self.chars.first().copied()
    }

    /// Calculate distance with threshold for early termination.
    ///
    /// Only the candidate is decoded; the query's characters are shared.
    pub fn distance_threshold(&self, candidate: &str, threshold: usize) -> Option<usize> {
        let candidate: Vec<char> = candidate.chars().collect();
        distance_chars_threshold(&self.chars, &candidate, threshold)
    }
}
