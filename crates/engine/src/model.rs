use serde::Serialize;

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// One row of either dataset, resolved to fixed shape via the ColumnMap.
///
/// All fields hold the raw cell text; normalization happens at scoring time
/// so the source values stay untouched for the whole session.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductRecord {
    /// Stable source row index (0-based, data rows only).
    pub index: usize,
    pub code: String,
    pub description: String,
    pub brand: String,
    pub barcode: String,
    pub classification: String,
    pub quantity: String,
    pub unit: String,
    pub format: String,
    pub flavor: String,
    pub unit_count: String,
    pub price: String,
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Per-criterion sub-scores for one (reference, candidate) pair.
///
/// If `code` is positive the identity short-circuit applies: `total == code`
/// and every other sub-score is zero. Otherwise `total` is the plain sum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScoreBreakdown {
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
    pub total: f64,
}

impl ScoreBreakdown {
    /// Sum of all sub-scores, excluding `total` itself.
    pub fn sum(&self) -> f64 {
        self.code
            + self.barcode
            + self.classification
            + self.brand
            + self.quantity
            + self.unit
            + self.format
            + self.flavor
            + self.unit_count
            + self.price
            + self.description
    }
}

/// A catalog record plus its score against the active reference record.
/// Transient: recomputed whenever the reference row, weights, or aliases change.
#[derive(Debug, Clone, Serialize)]
pub struct Candidate {
    pub record: ProductRecord,
    pub score: ScoreBreakdown,
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// A candidate that passed the lexical pre-filter, with its clause bonus.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub record: ProductRecord,
    pub score: ScoreBreakdown,
    /// Number of satisfied lexical clauses (code / brand / description).
    pub lexical_bonus: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchOutput {
    /// Full count of qualifying candidates before truncation.
    pub qualifying: usize,
    pub hits: Vec<SearchHit>,
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Cell marker written when the reviewer rejects every candidate.
pub const NO_MATCH_MARKER: &str = "NO MATCH";

/// The reviewer's recorded decision for one reference row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// One or more accepted catalog codes.
    Matched(Vec<String>),
    /// Rejected, with an optional free-text reason.
    NoMatch(Option<String>),
}

impl MatchOutcome {
    /// Render the matched-code-output cell value.
    pub fn render(&self) -> String {
        match self {
            Self::Matched(codes) => codes.join(","),
            Self::NoMatch(None) => NO_MATCH_MARKER.to_string(),
            Self::NoMatch(Some(reason)) => format!("{NO_MATCH_MARKER}: {reason}"),
        }
    }
}

/// A reference record augmented with the rendered outcome cell.
#[derive(Debug, Clone, Serialize)]
pub struct OutputRecord {
    #[serde(flatten)]
    pub record: ProductRecord,
    pub matched_code: String,
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ReportMeta {
    pub engine_version: String,
    pub reference_index: usize,
    pub top_n: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankReport {
    pub meta: ReportMeta,
    pub reference: ProductRecord,
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    pub meta: ReportMeta,
    pub query: String,
    pub reference: ProductRecord,
    pub qualifying: usize,
    pub hits: Vec<SearchHit>,
}
