use serde::{Deserialize, Serialize};

use crate::core::types::{FixType, Gene};

/// One CDR3 row awaiting reconciliation.
///
/// `v` and `j` may each hold several comma-separated candidate ids exactly as
/// they came in from the upstream table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cdr3Record {
    /// Junction amino-acid sequence
    pub cdr3: String,

    /// Candidate V segment id(s), comma-separated
    pub v: String,

    /// Candidate J segment id(s), comma-separated
    pub j: String,

    /// Species of the receptor carrier
    pub species: String,

    /// Chain locus; only required for best-segment assignment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gene: Option<Gene>,
}

/// Final outcome of reconciling one CDR3 against its V and J segments.
///
/// Created once by the orchestrator, never mutated. The serialized field
/// names are a stable contract: downstream aggregation keys on them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixerResult {
    /// Corrected junction sequence
    pub cdr3: String,

    /// Input junction sequence, untouched
    pub cdr3_old: String,

    /// Whether the corrected sequence differs from the input
    #[serde(rename = "fixNeeded")]
    pub fix_needed: bool,

    /// Both sides ended in a trustworthy outcome
    pub good: bool,

    /// Corrected sequence ends with phenylalanine or tryptophan
    #[serde(rename = "jCanonical")]
    pub j_canonical: bool,

    #[serde(rename = "jFixType")]
    pub j_fix_type: FixType,

    /// Resolved J segment id (or the closest id attempted)
    #[serde(rename = "jId")]
    pub j_id: String,

    /// Offset where the J match begins in the corrected sequence; -1 when
    /// the J side found no usable match
    #[serde(rename = "jStart")]
    pub j_start: i32,

    /// Corrected sequence starts with cysteine
    #[serde(rename = "vCanonical")]
    pub v_canonical: bool,

    #[serde(rename = "vEnd")]
    pub v_end: i32,

    #[serde(rename = "vFixType")]
    pub v_fix_type: FixType,

    /// Resolved V segment id (or the closest id attempted)
    #[serde(rename = "vId")]
    pub v_id: String,
}

impl FixerResult {
    #[allow(clippy::too_many_arguments)] // flat record, one field per argument
    pub fn new(
        cdr3: String,
        cdr3_old: String,
        v_end: i32,
        j_start: i32,
        v_id: String,
        v_fix_type: FixType,
        j_id: String,
        j_fix_type: FixType,
    ) -> Self {
        let fix_needed = cdr3 != cdr3_old;
        let v_canonical = cdr3.starts_with('C');
        let j_canonical = cdr3.ends_with('F') || cdr3.ends_with('W');
        let good = v_fix_type.good() && j_fix_type.good();

        Self {
            cdr3,
            cdr3_old,
            fix_needed,
            good,
            j_canonical,
            j_fix_type,
            j_id,
            j_start,
            v_canonical,
            v_end,
            v_fix_type,
            v_id,
        }
    }

    /// Serialized column order of the flat record
    pub const COLUMNS: [&'static str; 12] = [
        "cdr3",
        "cdr3_old",
        "fixNeeded",
        "good",
        "jCanonical",
        "jFixType",
        "jId",
        "jStart",
        "vCanonical",
        "vEnd",
        "vFixType",
        "vId",
    ];

    /// Flat-record cells in [`FixerResult::COLUMNS`] order, for TSV emission
    #[must_use]
    pub fn to_row(&self) -> [String; 12] {
        [
            self.cdr3.clone(),
            self.cdr3_old.clone(),
            self.fix_needed.to_string(),
            self.good.to_string(),
            self.j_canonical.to_string(),
            self.j_fix_type.to_string(),
            self.j_id.clone(),
            self.j_start.to_string(),
            self.v_canonical.to_string(),
            self.v_end.to_string(),
            self.v_fix_type.to_string(),
            self.v_id.clone(),
        ]
    }
}
