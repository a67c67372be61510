//! `prodmatch-engine` — product matching, scoring, and ranking engine.
//!
//! Pure engine crate: receives pre-loaded records, returns ranked candidates
//! for human review. No UI or network dependencies. The engine never decides
//! a match; it only orders candidates, and acceptance is recorded elsewhere.

pub mod alias;
pub mod columns;
pub mod config;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod model;
pub mod normalize;
pub mod rank;
pub mod score;
pub mod search;
pub mod similarity;
pub mod token;

pub use alias::BrandAliasMap;
pub use config::{MatchConfig, WeightConfig};
pub use dataset::{load_csv, Dataset};
pub use engine::{MatchSession, SessionSnapshot};
pub use error::MatchError;
pub use model::{
    Candidate, MatchOutcome, OutputRecord, ProductRecord, RankReport, ScoreBreakdown,
    SearchReport, NO_MATCH_MARKER,
};
