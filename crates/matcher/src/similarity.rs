//! String-similarity primitives used by the fuzzy and phonetic stages.
//!
//! Two different measures on purpose: the fuzzy stage scores with trigram
//! set overlap (robust to local typos, cheap over prefix blocks), while the
//! phonetic stage breaks ties inside a sound-alike block with an
//! edit-distance ratio, which penalizes transpositions and length drift
//! more sharply.

use std::collections::HashSet;

/// Trigram-overlap similarity between two strings: the Jaccard ratio of
/// their character 3-gram sets. Symmetric, deterministic, range [0, 1].
///
/// Each string is padded with two leading and one trailing space before
/// windowing, so short strings still produce boundary trigrams and leading
/// characters weigh more than interior ones.
pub fn trigram_similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let set_a = trigrams(a);
    let set_b = trigrams(b);
    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.len() + set_b.len() - intersection;

    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

fn trigrams(s: &str) -> HashSet<[char; 3]> {
    let mut padded: Vec<char> = Vec::with_capacity(s.chars().count() + 3);
    padded.push(' ');
    padded.push(' ');
    padded.extend(s.chars());
    padded.push(' ');

    padded
        .windows(3)
        .map(|w| [w[0], w[1], w[2]])
        .collect()
}

/// Edit-distance similarity expressed as a 0–100 ratio
/// (normalized Levenshtein × 100). Symmetric and deterministic.
pub fn edit_ratio(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b) * 100.0
}
