use serde::{Deserialize, Serialize};

/// Receptor chain locus a segment belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gene {
    /// T-cell receptor alpha chain
    #[serde(rename = "TRA")]
    Tra,
    /// T-cell receptor beta chain
    #[serde(rename = "TRB")]
    Trb,
}

impl Gene {
    /// Parse a gene name (e.g. from a segment table row)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "TRA" => Some(Gene::Tra),
            "TRB" => Some(Gene::Trb),
            _ => None,
        }
    }
}

impl std::fmt::Display for Gene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tra => write!(f, "TRA"),
            Self::Trb => write!(f, "TRB"),
        }
    }
}

/// Role of a germline segment relative to the CDR3 junction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentType {
    /// V segment, contributes the 5′/N-terminal side
    Variable,
    /// J segment, contributes the 3′/C-terminal side
    Joining,
}

impl SegmentType {
    /// Classify a segment-type cell from the reference table.
    ///
    /// Anything that does not start with "v" or "j" (case-insensitive),
    /// e.g. Diversity rows, is not CDR3-proximal and returns `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('v') => Some(SegmentType::Variable),
            Some('j') => Some(SegmentType::Joining),
            _ => None,
        }
    }
}

impl std::fmt::Display for SegmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Variable => write!(f, "Variable"),
            Self::Joining => write!(f, "Joining"),
        }
    }
}

/// Outcome of one fix attempt on one side of a CDR3.
///
/// The taxonomy is closed: every fix attempt terminates in exactly one of
/// these seven values, including "no reference found" and "match too weak to
/// trust". None of them is an error.
///
/// Variant declaration order equals the preference rank, so the derived `Ord`
/// is the tie-break order used when several candidate segment ids compete:
/// the candidate whose outcome compares lowest wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FixType {
    /// CDR3 already consistent with the segment at offset 0
    NoFixNeeded,
    /// Leading residues dropped from the CDR3
    FixTrim,
    /// Missing segment residues prepended to the CDR3
    FixAdd,
    /// Bounded substitution: segment prefix in, CDR3 prefix out
    FixReplace,
    /// Candidate id resolved to no known segment
    FailedBadSegment,
    /// Substitution would discard more of the CDR3 than allowed
    FailedReplace,
    /// No overlap between CDR3 and segment at all
    FailedNoAlignment,
}

impl FixType {
    /// Preference rank; lower is better. Fixed for the lifetime of the enum.
    #[must_use]
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// Whether an edit was attempted (as opposed to not needed / not possible)
    #[must_use]
    pub fn fix_attempted(self) -> bool {
        !matches!(self, FixType::NoFixNeeded | FixType::FailedBadSegment)
    }

    /// Whether the outcome leaves the CDR3 boundary trustworthy
    #[must_use]
    pub fn good(self) -> bool {
        matches!(
            self,
            FixType::NoFixNeeded | FixType::FixTrim | FixType::FixAdd | FixType::FixReplace
        )
    }
}

impl std::fmt::Display for FixType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::NoFixNeeded => "NoFixNeeded",
            Self::FixTrim => "FixTrim",
            Self::FixAdd => "FixAdd",
            Self::FixReplace => "FixReplace",
            Self::FailedBadSegment => "FailedBadSegment",
            Self::FailedReplace => "FailedReplace",
            Self::FailedNoAlignment => "FailedNoAlignment",
        };
        write!(f, "{name}")
    }
}

/// How a codon-aligner re-assignment relates to an existing fix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Refinement {
    /// Existing fix stands
    Unchanged,
    /// Same segment, longer nucleotide-level match
    Realign,
    /// A different segment matches better by a meaningful margin
    ChangeSegment,
}

impl std::fmt::Display for Refinement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unchanged => write!(f, "Unchanged"),
            Self::Realign => write!(f, "Realign"),
            Self::ChangeSegment => write!(f, "ChangeSegment"),
        }
    }
}
