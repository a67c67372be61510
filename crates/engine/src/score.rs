//! Field scorers and the weighted aggregator.
//!
//! Every scorer takes two raw cell values and a weight and returns a
//! sub-score in `[0, weight]`. Missing/unparsable values contribute 0 ("no
//! information"), never an active mismatch penalty.

use crate::alias::BrandAliasMap;
use crate::config::WeightConfig;
use crate::model::{ProductRecord, ScoreBreakdown};
use crate::normalize::{normalize_code, normalize_number, normalize_text, normalize_unit};
use crate::similarity::set_similarity;
use crate::token::tokenize;

/// Padded length of a hierarchical classification code.
const CLASSIFICATION_DIGITS: usize = 14;

/// Digit count at which the classification fraction saturates.
const CLASSIFICATION_FULL_MATCH: f64 = 10.0;

/// Trimmed equality on the primary code. A positive result short-circuits
/// the aggregator: the pair is the same product by identity.
pub fn identity_score(reference: &str, candidate: &str, weight: f64) -> f64 {
    let a = reference.trim();
    let b = candidate.trim();
    if !a.is_empty() && a == b {
        weight
    } else {
        0.0
    }
}

/// Full weight on normalized equality, else 0. Empty normalized sides never
/// match.
fn exact_text_score(a: &str, b: &str, weight: f64, normalize: fn(&str) -> String) -> f64 {
    let na = normalize(a);
    let nb = normalize(b);
    if !na.is_empty() && na == nb {
        weight
    } else {
        0.0
    }
}

/// Numeric equality after comma-decimal parsing. Either side unparsable -> 0.
fn exact_number_score(a: &str, b: &str, weight: f64) -> f64 {
    match (normalize_number(a), normalize_number(b)) {
        (Some(na), Some(nb)) if na == nb => weight,
        _ => 0.0,
    }
}

/// Compare hierarchical codes by consecutive 2-digit groups from the left.
///
/// Both codes are digit-normalized and right-padded with '0' to 14 chars;
/// matching stops at the first mismatching group. The matched digit count is
/// scored against a 10-digit full match, clamped to 1.0.
pub fn classification_score(reference: &str, candidate: &str, weight: f64) -> f64 {
    let a = normalize_code(reference);
    let b = normalize_code(candidate);
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let a = pad_code(&a);
    let b = pad_code(&b);

    let mut matched_digits = 0usize;
    for start in (0..CLASSIFICATION_DIGITS).step_by(2) {
        if a[start..start + 2] == b[start..start + 2] {
            matched_digits += 2;
        } else {
            break;
        }
    }

    let fraction = (matched_digits as f64 / CLASSIFICATION_FULL_MATCH).min(1.0);
    weight * fraction
}

fn pad_code(digits: &str) -> String {
    let mut padded = String::with_capacity(CLASSIFICATION_DIGITS);
    padded.push_str(digits);
    while padded.len() < CLASSIFICATION_DIGITS {
        padded.push('0');
    }
    padded
}

/// Piecewise price proximity. 0 when either price is missing or the
/// reference price is 0.
///
/// relDiff <= 5% -> 1.0, then linear segments 1.0->0.9 (to 10%),
/// 0.9->0.8 (to 20%), 0.8->0.5 (to 50%), 0.5->0.0 (to 100%), 0 beyond.
pub fn price_score(reference: &str, candidate: &str, weight: f64) -> f64 {
    let (Some(ref_price), Some(cand_price)) =
        (normalize_number(reference), normalize_number(candidate))
    else {
        return 0.0;
    };
    if ref_price == 0.0 {
        return 0.0;
    }

    let rel = (ref_price - cand_price).abs() / ref_price;
    let multiplier = if rel <= 0.05 {
        1.0
    } else if rel <= 0.10 {
        1.0 - (rel - 0.05) / 0.05 * 0.1
    } else if rel <= 0.20 {
        0.9 - (rel - 0.10) / 0.10 * 0.1
    } else if rel <= 0.50 {
        0.8 - (rel - 0.20) / 0.30 * 0.3
    } else if rel <= 1.00 {
        0.5 - (rel - 0.50) / 0.50 * 0.5
    } else {
        0.0
    };

    weight * multiplier.max(0.0)
}

/// Token-set similarity over both descriptions, scaled by the weight.
pub fn description_score(reference: &str, candidate: &str, weight: f64) -> f64 {
    set_similarity(&tokenize(reference), &tokenize(candidate)) * weight
}

/// Score one (reference, candidate) pair against a weight/alias snapshot.
///
/// The identity scorer runs first; when it fires, the total is exactly that
/// sub-score and every other criterion reports zero. Otherwise all criteria
/// are evaluated independently and summed. The full breakdown is always
/// returned for reviewer transparency.
pub fn score_pair(
    reference: &ProductRecord,
    candidate: &ProductRecord,
    weights: &WeightConfig,
    aliases: &BrandAliasMap,
) -> ScoreBreakdown {
    let code = identity_score(&reference.code, &candidate.code, weights.code);
    if code > 0.0 {
        return ScoreBreakdown {
            code,
            total: code,
            ..ScoreBreakdown::default()
        };
    }

    let effective_brand = aliases.resolve(&reference.brand);

    let mut breakdown = ScoreBreakdown {
        code: 0.0,
        barcode: exact_text_score(
            &reference.barcode,
            &candidate.barcode,
            weights.barcode,
            normalize_code,
        ),
        classification: classification_score(
            &reference.classification,
            &candidate.classification,
            weights.classification,
        ),
        brand: exact_text_score(
            effective_brand,
            &candidate.brand,
            weights.brand,
            normalize_text,
        ),
        quantity: exact_number_score(&reference.quantity, &candidate.quantity, weights.quantity),
        unit: exact_text_score(&reference.unit, &candidate.unit, weights.unit, normalize_unit),
        format: exact_text_score(
            &reference.format,
            &candidate.format,
            weights.format,
            normalize_text,
        ),
        flavor: exact_text_score(
            &reference.flavor,
            &candidate.flavor,
            weights.flavor,
            normalize_text,
        ),
        unit_count: exact_number_score(
            &reference.unit_count,
            &candidate.unit_count,
            weights.unit_count,
        ),
        price: price_score(&reference.price, &candidate.price, weights.price),
        description: description_score(
            &reference.description,
            &candidate.description,
            weights.description,
        ),
        total: 0.0,
    };
    breakdown.total = breakdown.sum();
    breakdown
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
