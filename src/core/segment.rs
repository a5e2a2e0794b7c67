use serde::{Deserialize, Serialize};

use crate::core::types::{Gene, SegmentType};

/// One germline segment row from the reference table.
///
/// Immutable after load. `reference_point` marks the conserved cysteine (V)
/// or phenylalanine/tryptophan (J) codon boundary used to trim the sequence
/// to its CDR3-proximal window before translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentRecord {
    /// Species key, lowercase-normalized (e.g. "homosapiens")
    pub species: String,

    /// Receptor chain locus
    pub gene: Gene,

    /// Variable or Joining
    pub segment_type: SegmentType,

    /// Segment identifier with allele suffix (e.g. "TRBV19*01")
    pub id: String,

    /// Conserved-residue codon boundary within `sequence`
    pub reference_point: usize,

    /// Germline nucleotide sequence
    pub sequence: String,
}

impl SegmentRecord {
    pub fn new(
        species: impl Into<String>,
        gene: Gene,
        segment_type: SegmentType,
        id: impl Into<String>,
        reference_point: usize,
        sequence: impl Into<String>,
    ) -> Self {
        Self {
            species: species.into(),
            gene,
            segment_type,
            id: id.into(),
            reference_point,
            sequence: sequence.into(),
        }
    }

    /// The CDR3-proximal part of the nucleotide sequence.
    ///
    /// V: from 3 bases before the reference point (the conserved cysteine
    /// codon) to the segment end. J: from the segment start to 4 bases past
    /// the reference point. Out-of-range reference points clamp to the
    /// sequence bounds.
    #[must_use]
    pub fn proximal_window(&self) -> &str {
        match self.segment_type {
            SegmentType::Variable => {
                let start = self.reference_point.saturating_sub(3).min(self.sequence.len());
                &self.sequence[start..]
            }
            SegmentType::Joining => {
                let end = (self.reference_point + 4).min(self.sequence.len());
                &self.sequence[..end]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_window() {
        let record = SegmentRecord::new(
            "homosapiens",
            Gene::Trb,
            SegmentType::Variable,
            "TRBV19*01",
            21,
            "GATTCTGCAGTGTACTTCTGTGCCAGCAGTATC",
        );
        assert_eq!(record.proximal_window(), "TGTGCCAGCAGTATC");
    }

    #[test]
    fn test_joining_window() {
        let record = SegmentRecord::new(
            "homosapiens",
            Gene::Trb,
            SegmentType::Joining,
            "TRBJ2-1*01",
            12,
            "CAATGAACAGTTTTTCGGACCAGGGACACGGCTC",
        );
        assert_eq!(record.proximal_window(), "CAATGAACAGTTTTTC");
    }

    #[test]
    fn test_window_clamps_to_bounds() {
        let v = SegmentRecord::new("x", Gene::Trb, SegmentType::Variable, "V", 2, "ACGT");
        assert_eq!(v.proximal_window(), "ACGT");

        let j = SegmentRecord::new("x", Gene::Trb, SegmentType::Joining, "J", 10, "ACGT");
        assert_eq!(j.proximal_window(), "ACGT");
    }
}
