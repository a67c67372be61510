//! Fuzzy word-level and set-level string similarity.

use std::collections::HashSet;

use strsim::levenshtein;

/// Tokens shorter than this never participate in fuzzy comparison.
const MIN_FUZZY_LEN: usize = 4;

/// Minimum edit-distance similarity kept as a positive signal.
const EDIT_SIM_FLOOR: f64 = 0.7;

/// Similarity between two tokens in [0, 1].
///
/// Equal -> 1. Tokens under 4 chars only match exactly. Containment scores
/// proportionally to the length ratio, damped by 0.8. Otherwise Levenshtein,
/// kept only above the 0.7 floor.
pub fn word_similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    let len_a = a.chars().count();
    let len_b = b.chars().count();
    if len_a < MIN_FUZZY_LEN || len_b < MIN_FUZZY_LEN {
        return 0.0;
    }

    let (shorter, longer, short_len, long_len) = if len_a <= len_b {
        (a, b, len_a, len_b)
    } else {
        (b, a, len_b, len_a)
    };
    if longer.contains(shorter) {
        return short_len as f64 / long_len as f64 * 0.8;
    }

    let similarity = 1.0 - levenshtein(a, b) as f64 / long_len as f64;
    if similarity > EDIT_SIM_FLOOR {
        similarity
    } else {
        0.0
    }
}

/// Similarity between two token sequences in [0, 1].
///
/// The higher of: Jaccard over the exact token sets, or half the mean of the
/// positive pairwise word similarities among fuzzy-eligible tokens.
pub fn set_similarity(tokens_a: &[String], tokens_b: &[String]) -> f64 {
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let set_a: HashSet<&str> = tokens_a.iter().map(String::as_str).collect();
    let set_b: HashSet<&str> = tokens_b.iter().map(String::as_str).collect();
    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.len() + set_b.len() - intersection;
    let jaccard = intersection as f64 / union as f64;

    let mut positive_sum = 0.0;
    let mut positive_count = 0usize;
    for a in tokens_a {
        if a.chars().count() < MIN_FUZZY_LEN {
            continue;
        }
        for b in tokens_b {
            if b.chars().count() < MIN_FUZZY_LEN {
                continue;
            }
            let similarity = word_similarity(a, b);
            if similarity > 0.0 {
                positive_sum += similarity;
                positive_count += 1;
            }
        }
    }
    let partial = if positive_count == 0 {
        0.0
    } else {
        positive_sum / positive_count as f64
    };

    jaccard.max(partial * 0.5)
}
