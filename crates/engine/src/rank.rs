//! Top-N ranking of a whole catalog against one reference record.

use ordered_float::OrderedFloat;
use rayon::prelude::*;
use std::cmp::Reverse;

use crate::alias::BrandAliasMap;
use crate::config::WeightConfig;
use crate::model::{Candidate, ProductRecord};
use crate::score::score_pair;

/// Score every catalog record, drop non-positive totals, stable-sort by
/// total descending (ties keep catalog order), truncate to `top_n`.
///
/// Scoring is a pure function of the given snapshots, so catalog rows are
/// scored in parallel; the collect preserves catalog order before the sort.
pub fn rank(
    reference: &ProductRecord,
    catalog: &[ProductRecord],
    weights: &WeightConfig,
    aliases: &BrandAliasMap,
    top_n: usize,
) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = catalog
        .par_iter()
        .map(|record| Candidate {
            record: record.clone(),
            score: score_pair(reference, record, weights, aliases),
        })
        .collect();

    candidates.retain(|candidate| candidate.score.total > 0.0);
    candidates.sort_by_key(|candidate| Reverse(OrderedFloat(candidate.score.total)));
    candidates.truncate(top_n);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> ProductRecord {
        ProductRecord {
            index: 0,
            code: "R-1".into(),
            description: "Leche Entera 1L".into(),
            brand: "SOPROLE".into(),
            ..ProductRecord::default()
        }
    }

    fn catalog_record(index: usize, code: &str, description: &str, brand: &str) -> ProductRecord {
        ProductRecord {
            index,
            code: code.into(),
            description: description.into(),
            brand: brand.into(),
            ..ProductRecord::default()
        }
    }

    fn catalog() -> Vec<ProductRecord> {
        vec![
            catalog_record(0, "C-10", "Harina Sin Polvos", "SELECTA"),
            catalog_record(1, "C-11", "Leche Entera 1L", "SOPROLE"),
            catalog_record(2, "C-12", "Leche Entera 1L", "COLUN"),
            catalog_record(3, "C-13", "Leche Descremada 1L", "SOPROLE"),
        ]
    }

    #[test]
    fn ranks_best_candidate_first() {
        let hits = rank(
            &reference(),
            &catalog(),
            &WeightConfig::default(),
            &BrandAliasMap::new(),
            10,
        );
        assert_eq!(hits[0].record.code, "C-11");
    }

    #[test]
    fn excludes_non_positive_totals() {
        let hits = rank(
            &reference(),
            &catalog(),
            &WeightConfig::default(),
            &BrandAliasMap::new(),
            10,
        );
        assert!(hits.iter().all(|c| c.score.total > 0.0));
        assert!(hits.iter().all(|c| c.record.code != "C-10"));
    }

    #[test]
    fn truncates_to_top_n() {
        let hits = rank(
            &reference(),
            &catalog(),
            &WeightConfig::default(),
            &BrandAliasMap::new(),
            2,
        );
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn ties_preserve_catalog_order() {
        // Two candidates identical except source position.
        let catalog = vec![
            catalog_record(0, "C-20", "Leche Entera 1L", ""),
            catalog_record(1, "C-21", "Leche Entera 1L", ""),
        ];
        let hits = rank(
            &reference(),
            &catalog,
            &WeightConfig::default(),
            &BrandAliasMap::new(),
            10,
        );
        assert_eq!(hits[0].record.code, "C-20");
        assert_eq!(hits[1].record.code, "C-21");
    }

    #[test]
    fn deterministic_across_runs() {
        let first = rank(
            &reference(),
            &catalog(),
            &WeightConfig::default(),
            &BrandAliasMap::new(),
            10,
        );
        let second = rank(
            &reference(),
            &catalog(),
            &WeightConfig::default(),
            &BrandAliasMap::new(),
            10,
        );
        let codes =
            |hits: &[Candidate]| hits.iter().map(|c| c.record.code.clone()).collect::<Vec<_>>();
        assert_eq!(codes(&first), codes(&second));
    }

    #[test]
    fn empty_catalog_is_empty_result() {
        let hits = rank(
            &reference(),
            &[],
            &WeightConfig::default(),
            &BrandAliasMap::new(),
            10,
        );
        assert!(hits.is_empty());
    }
}
