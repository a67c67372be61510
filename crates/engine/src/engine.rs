//! Session facade: the one entry point a front end drives.
//!
//! Owns the two loaded datasets plus the current weight/alias snapshots.
//! Every pass reads the snapshots it was handed; replacing them installs a
//! new snapshot for the *next* pass and can never be observed mid-pass.

use serde::Serialize;

use crate::alias::BrandAliasMap;
use crate::config::{MatchConfig, WeightConfig};
use crate::dataset::{load_csv, Dataset};
use crate::error::MatchError;
use crate::model::{
    MatchOutcome, OutputRecord, RankReport, ReportMeta, SearchReport,
};
use crate::{rank, search};

#[derive(Debug)]
pub struct MatchSession {
    reference: Dataset,
    catalog: Dataset,
    weights: WeightConfig,
    aliases: BrandAliasMap,
}

/// Weight and alias snapshots, handed to the persistence collaborator so a
/// session can resume where it left off.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub weights: WeightConfig,
    pub aliases: BrandAliasMap,
}

impl MatchSession {
    pub fn new(
        reference: Dataset,
        catalog: Dataset,
        weights: WeightConfig,
        aliases: BrandAliasMap,
    ) -> Result<Self, MatchError> {
        weights.validate()?;
        Ok(Self {
            reference,
            catalog,
            weights,
            aliases,
        })
    }

    /// Build a session from a parsed config plus the two CSV payloads.
    pub fn from_config(
        config: &MatchConfig,
        reference_csv: &str,
        catalog_csv: &str,
    ) -> Result<Self, MatchError> {
        let reference = load_csv("reference", reference_csv)?;
        let catalog = load_csv("catalog", catalog_csv)?;
        Self::new(reference, catalog, config.weights, config.alias_map())
    }

    pub fn reference(&self) -> &Dataset {
        &self.reference
    }

    pub fn catalog(&self) -> &Dataset {
        &self.catalog
    }

    /// Rank the whole catalog against reference row `index`.
    pub fn rank(&self, index: usize, top_n: usize) -> Result<RankReport, MatchError> {
        let reference = self.reference.get(index)?;
        let candidates = rank::rank(
            reference,
            &self.catalog.records,
            &self.weights,
            &self.aliases,
            top_n,
        );
        Ok(RankReport {
            meta: self.meta(index, top_n),
            reference: reference.clone(),
            candidates,
        })
    }

    /// Lexical search over the catalog, re-scored against reference row
    /// `index`.
    pub fn search(
        &self,
        index: usize,
        query: &str,
        top_n: usize,
    ) -> Result<SearchReport, MatchError> {
        let reference = self.reference.get(index)?;
        let output = search::search(
            query,
            reference,
            &self.catalog.records,
            &self.weights,
            &self.aliases,
            top_n,
        );
        Ok(SearchReport {
            meta: self.meta(index, top_n),
            query: query.to_string(),
            reference: reference.clone(),
            qualifying: output.qualifying,
            hits: output.hits,
        })
    }

    /// Install a new weight snapshot. Takes effect on the next pass.
    pub fn set_weights(&mut self, weights: WeightConfig) -> Result<(), MatchError> {
        weights.validate()?;
        self.weights = weights;
        Ok(())
    }

    /// Record a brand correction. Takes effect on the next pass.
    pub fn set_alias(&mut self, original: &str, corrected: &str) {
        self.aliases.set(original, corrected);
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            weights: self.weights,
            aliases: self.aliases.clone(),
        }
    }

    /// Render the reviewer's decision for one reference row as the augmented
    /// output record.
    pub fn record_outcome(
        &self,
        index: usize,
        outcome: &MatchOutcome,
    ) -> Result<OutputRecord, MatchError> {
        let reference = self.reference.get(index)?;
        Ok(OutputRecord {
            record: reference.clone(),
            matched_code: outcome.render(),
        })
    }

    fn meta(&self, reference_index: usize, top_n: usize) -> ReportMeta {
        ReportMeta {
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            reference_index,
            top_n,
        }
    }
}
