use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::alias::BrandAliasMap;
use crate::error::MatchError;

// ---------------------------------------------------------------------------
// Weights
// ---------------------------------------------------------------------------

/// Per-criterion weights. Any snapshot deterministically reproduces scores
/// from the records alone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightConfig {
    pub code: f64,
    pub barcode: f64,
    pub classification: f64,
    pub brand: f64,
    pub quantity: f64,
    pub unit: f64,
    pub format: f64,
    pub flavor: f64,
    pub unit_count: f64,
    pub price: f64,
    pub description: f64,
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            code: 100.0,
            barcode: 60.0,
            classification: 40.0,
            brand: 15.0,
            quantity: 10.0,
            unit: 10.0,
            format: 10.0,
            flavor: 10.0,
            unit_count: 10.0,
            price: 15.0,
            description: 30.0,
        }
    }
}

impl WeightConfig {
    /// Criterion name / weight pairs, in breakdown order.
    pub fn entries(&self) -> [(&'static str, f64); 11] {
        [
            ("code", self.code),
            ("barcode", self.barcode),
            ("classification", self.classification),
            ("brand", self.brand),
            ("quantity", self.quantity),
            ("unit", self.unit),
            ("format", self.format),
            ("flavor", self.flavor),
            ("unit_count", self.unit_count),
            ("price", self.price),
            ("description", self.description),
        ]
    }

    /// Weights must be finite and non-negative; rejected here, before any
    /// scorer can see them.
    pub fn validate(&self) -> Result<(), MatchError> {
        for (name, weight) in self.entries() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(MatchError::ConfigValidation(format!(
                    "weight '{name}' must be a non-negative number, got {weight}"
                )));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct MatchConfig {
    pub name: String,
    pub datasets: DatasetsConfig,
    #[serde(default)]
    pub ranking: RankingConfig,
    #[serde(default)]
    pub weights: WeightConfig,
    #[serde(default)]
    pub aliases: HashMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatasetsConfig {
    /// CSV with the rows to match.
    pub reference: String,
    /// CSV with the candidate rows.
    pub catalog: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RankingConfig {
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

fn default_top_n() -> usize {
    10
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self { top_n: default_top_n() }
    }
}

impl MatchConfig {
    pub fn from_toml(input: &str) -> Result<Self, MatchError> {
        let config: MatchConfig =
            toml::from_str(input).map_err(|e| MatchError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        self.weights.validate()?;
        if self.ranking.top_n == 0 {
            return Err(MatchError::ConfigValidation(
                "ranking.top_n must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Build the alias map from the `[aliases]` table (corrections are
    /// upper-cased on insert).
    pub fn alias_map(&self) -> BrandAliasMap {
        let mut aliases = BrandAliasMap::new();
        for (original, corrected) in &self.aliases {
            aliases.set(original, corrected);
        }
        aliases
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
