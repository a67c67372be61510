//! Operator-directed lookup: lexical pre-filter plus full re-scoring.

use ordered_float::OrderedFloat;
use std::cmp::Reverse;

use crate::alias::BrandAliasMap;
use crate::config::WeightConfig;
use crate::model::{ProductRecord, SearchHit, SearchOutput};
use crate::normalize::normalize_text;
use crate::score::score_pair;

/// Totals within this distance are considered tied; the lexical bonus breaks
/// the tie.
const SCORE_TIE_BAND: f64 = 0.01;

/// Count the satisfied lexical clauses for one candidate: code substring,
/// all terms in brand, all terms in description. Zero disqualifies.
fn lexical_bonus(record: &ProductRecord, folded_query: &str, terms: &[&str]) -> u32 {
    let mut bonus = 0;
    if normalize_text(&record.code).contains(folded_query) {
        bonus += 1;
    }
    let brand = normalize_text(&record.brand);
    if !brand.is_empty() && terms.iter().all(|term| brand.contains(term)) {
        bonus += 1;
    }
    let description = normalize_text(&record.description);
    if !description.is_empty() && terms.iter().all(|term| description.contains(term)) {
        bonus += 1;
    }
    bonus
}

/// Filter the catalog by the folded query, re-score the qualifying
/// candidates against the reference record, and order by total (within a
/// 0.01 tie band) then by lexical bonus. Reports the full qualifying count
/// alongside the truncated slice.
pub fn search(
    query: &str,
    reference: &ProductRecord,
    catalog: &[ProductRecord],
    weights: &WeightConfig,
    aliases: &BrandAliasMap,
    top_n: usize,
) -> SearchOutput {
    let folded = normalize_text(query);
    if folded.is_empty() {
        return SearchOutput { qualifying: 0, hits: Vec::new() };
    }
    let terms: Vec<&str> = folded.split_whitespace().collect();

    let mut hits: Vec<SearchHit> = catalog
        .iter()
        .filter_map(|record| {
            let bonus = lexical_bonus(record, &folded, &terms);
            if bonus == 0 {
                return None;
            }
            Some(SearchHit {
                record: record.clone(),
                score: score_pair(reference, record, weights, aliases),
                lexical_bonus: bonus,
            })
        })
        .collect();

    let qualifying = hits.len();

    // Bucket totals to the tie band so the comparator stays a total order;
    // the stable sort keeps catalog order for full ties.
    hits.sort_by_key(|hit| {
        (
            Reverse(OrderedFloat(band(hit.score.total))),
            Reverse(hit.lexical_bonus),
        )
    });
    hits.truncate(top_n);

    SearchOutput { qualifying, hits }
}

fn band(total: f64) -> f64 {
    (total / SCORE_TIE_BAND).round()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> ProductRecord {
        ProductRecord {
            code: "R-1".into(),
            description: "Leche Entera 1L".into(),
            ..ProductRecord::default()
        }
    }

    fn record(index: usize, code: &str, description: &str, brand: &str) -> ProductRecord {
        ProductRecord {
            index,
            code: code.into(),
            description: description.into(),
            brand: brand.into(),
            ..ProductRecord::default()
        }
    }

    fn run(query: &str, catalog: &[ProductRecord]) -> SearchOutput {
        search(
            query,
            &reference(),
            catalog,
            &WeightConfig::default(),
            &BrandAliasMap::new(),
            10,
        )
    }

    #[test]
    fn requires_every_term_in_one_clause() {
        let catalog = vec![
            record(0, "C-1", "Leche Entera Bolsa", ""),
            record(1, "C-2", "Leche Descremada", ""),
            record(2, "C-3", "Pan Molde Entera", ""),
        ];
        let out = run("leche entera", &catalog);
        assert_eq!(out.qualifying, 1);
        assert_eq!(out.hits[0].record.code, "C-1");
    }

    #[test]
    fn code_substring_qualifies() {
        let catalog = vec![
            record(0, "778899", "Pan Molde", ""),
            record(1, "112233", "Pan Molde", ""),
        ];
        let out = run("8899", &catalog);
        assert_eq!(out.qualifying, 1);
        assert_eq!(out.hits[0].record.code, "778899");
    }

    #[test]
    fn brand_clause_is_accent_and_case_insensitive() {
        let catalog = vec![record(0, "C-1", "Galletas Surtidas", "NESTLÉ")];
        let out = run("nestle", &catalog);
        assert_eq!(out.qualifying, 1);
    }

    #[test]
    fn lexical_bonus_breaks_score_ties() {
        // Same description (same aggregate total), second row also matches on
        // brand: two clauses beat one despite later catalog position.
        let catalog = vec![
            record(0, "C-1", "Leche Entera 1L", "COLUN"),
            record(1, "C-2", "Leche Entera 1L", "LECHE SUR"),
        ];
        let out = run("leche", &catalog);
        assert_eq!(out.qualifying, 2);
        assert_eq!(out.hits[0].record.code, "C-2");
        assert_eq!(out.hits[0].lexical_bonus, 2);
        assert_eq!(out.hits[1].lexical_bonus, 1);
    }

    #[test]
    fn orders_by_total_before_bonus() {
        // C-1 satisfies two clauses (code + description) but scores lower
        // overall; the total must win outside the tie band.
        let catalog = vec![
            record(0, "LECHE-99", "Postre Leche Asada", "TRENDY"),
            record(1, "C-2", "Leche Entera 1L", ""),
        ];
        let out = run("leche", &catalog);
        assert_eq!(out.hits[0].record.code, "C-2");
        assert_eq!(out.hits[1].lexical_bonus, 2);
    }

    #[test]
    fn reports_full_qualifying_count_past_truncation() {
        let catalog: Vec<ProductRecord> = (0..30)
            .map(|i| record(i, &format!("C-{i}"), "Leche Entera", ""))
            .collect();
        let out = search(
            "leche",
            &reference(),
            &catalog,
            &WeightConfig::default(),
            &BrandAliasMap::new(),
            5,
        );
        assert_eq!(out.qualifying, 30);
        assert_eq!(out.hits.len(), 5);
    }

    #[test]
    fn blank_query_matches_nothing() {
        let catalog = vec![record(0, "C-1", "Leche", "")];
        let out = run("   ", &catalog);
        assert_eq!(out.qualifying, 0);
        assert!(out.hits.is_empty());
    }
}
