use serde::{Deserialize, Serialize};

use crate::catalog::store::SegmentLibrary;
use crate::core::codon::codons_for;
use crate::core::record::FixerResult;
use crate::core::types::{Gene, Refinement, SegmentType};

/// Minimum nucleotide score for a Variable assignment to count
pub const MIN_NUC_V: usize = 5;

/// Minimum nucleotide score for a Joining assignment to count
pub const MIN_NUC_J: usize = 5;

/// Minimum amino-acid improvement before a different segment displaces an
/// already-fixed one
pub const MIN_DIFF_V: i32 = 2;
pub const MIN_DIFF_J: i32 = 2;

/// Score an amino-acid query against a raw nucleotide reference, extending a
/// prefix match under codon degeneracy.
///
/// Each query residue keeps a mask over its (at most six) synonymous codons;
/// each reference base intersects the mask at the matching codon position.
/// Extension stops at the first base with no surviving codon; a codon broken
/// mid-way contributes nothing, while a codon cut short by the end of the
/// reference keeps its compatible bases. The score is the number of
/// compatible nucleotide positions; divide by 3 for an amino-acid-equivalent
/// length.
pub fn align_nuc_to_aa(aa_query: &str, nt_reference: &str) -> usize {
    align(aa_query.bytes(), nt_reference.as_bytes(), false)
}

/// Reverse-mode scorer: consumes the reference right to left with codon
/// positions read in reverse order (2, 1, 0), aligning from the 3′ end.
pub fn align_nuc_to_aa_rev(aa_query: &str, nt_reference: &str) -> usize {
    align(aa_query.bytes().rev(), nt_reference.as_bytes(), true)
}

fn align(query: impl Iterator<Item = u8>, gene: &[u8], from_end: bool) -> usize {
    let mut score = 0;

    for (aa_pos, aa) in query.enumerate() {
        let codons = codons_for(aa);
        // Residues without a codon set (X, ?) cannot extend the match
        if codons.is_empty() {
            break;
        }
        if aa_pos * 3 >= gene.len() {
            break;
        }

        let mut mask: u8 = (1 << codons.len()) - 1;
        let mut gained = 0;
        let mut mismatched = false;
        let mut exhausted = false;

        for offset in 0..3 {
            let consumed = aa_pos * 3 + offset;
            if consumed >= gene.len() {
                exhausted = true;
                break;
            }
            let (codon_pos, base) = if from_end {
                (2 - offset, gene[gene.len() - 1 - consumed])
            } else {
                (offset, gene[consumed])
            };
            mask = surviving(codons, mask, codon_pos, base);
            if mask == 0 {
                mismatched = true;
                break;
            }
            gained += 1;
        }

        if !mismatched {
            score += gained;
        }
        if mismatched || exhausted {
            break;
        }
    }

    score
}

/// Codons still compatible after seeing `base` at `codon_pos`
fn surviving(codons: &[[u8; 3]], mask: u8, codon_pos: usize, base: u8) -> u8 {
    let mut next = 0u8;
    for (i, codon) in codons.iter().enumerate() {
        if mask & (1 << i) != 0 && codon[codon_pos] == base {
            next |= 1 << i;
        }
    }
    next
}

/// Best V/J segments for a CDR3 chosen purely by nucleotide identity.
///
/// Match lengths are in amino acids; -1 means nothing cleared the floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentAssignment {
    #[serde(rename = "vId")]
    pub v_id: Option<String>,

    #[serde(rename = "vMatchLen")]
    pub v_match_len: i32,

    #[serde(rename = "jId")]
    pub j_id: Option<String>,

    #[serde(rename = "jMatchLen")]
    pub j_match_len: i32,
}

/// A fix record after comparison against a codon-aligner assignment.
///
/// `result` is an updated copy of the input record (the input itself is
/// never mutated); superseded values are kept alongside. The seven-value
/// FixType taxonomy is untouched - the refinement labels live in their own
/// enum.
#[derive(Debug, Clone, Serialize)]
pub struct RefinedFix {
    #[serde(flatten)]
    pub result: FixerResult,

    #[serde(rename = "vRefinement")]
    pub v_refinement: Refinement,

    #[serde(rename = "jRefinement")]
    pub j_refinement: Refinement,

    #[serde(rename = "oldVId", skip_serializing_if = "Option::is_none")]
    pub old_v_id: Option<String>,

    #[serde(rename = "oldVEnd", skip_serializing_if = "Option::is_none")]
    pub old_v_end: Option<i32>,

    #[serde(rename = "oldJId", skip_serializing_if = "Option::is_none")]
    pub old_j_id: Option<String>,

    #[serde(rename = "oldJStart", skip_serializing_if = "Option::is_none")]
    pub old_j_start: Option<i32>,
}

/// Ranks candidate segments by codon-compatible nucleotide prefix match.
///
/// Used when segment selection must be driven purely by nucleotide identity
/// rather than the pre-trimmed amino-acid library: Variable rows are scored
/// with the forward aligner against their CDR3-proximal nucleotide window,
/// Joining rows with the reverse aligner.
pub struct SegmentAligner<'a> {
    library: &'a SegmentLibrary,
}

impl<'a> SegmentAligner<'a> {
    pub fn new(library: &'a SegmentLibrary) -> Self {
        Self { library }
    }

    /// Best-scoring V and J ids for a CDR3, first-listed on score ties.
    ///
    /// Scores below `MIN_NUC_V`/`MIN_NUC_J` nucleotides leave the id unset.
    pub fn assign(&self, cdr3: &str, species: &str, gene: Gene) -> SegmentAssignment {
        let mut v_id = None;
        let mut v_score: i64 = -1;
        for record in self
            .library
            .records_for(species, gene, SegmentType::Variable)
        {
            let score = align_nuc_to_aa(cdr3, record.proximal_window()) as i64;
            if score > v_score && score >= MIN_NUC_V as i64 {
                v_score = score;
                v_id = Some(record.id.clone());
            }
        }

        let mut j_id = None;
        let mut j_score: i64 = -1;
        for record in self.library.records_for(species, gene, SegmentType::Joining) {
            let score = align_nuc_to_aa_rev(cdr3, record.proximal_window()) as i64;
            if score > j_score && score >= MIN_NUC_J as i64 {
                j_score = score;
                j_id = Some(record.id.clone());
            }
        }

        SegmentAssignment {
            v_id,
            v_match_len: aa_len(v_score),
            j_id,
            j_match_len: aa_len(j_score),
        }
    }

    /// Fold a best-segment assignment into an existing fix record.
    ///
    /// Same segment with a longer match is a Realign; a different segment
    /// better by at least `MIN_DIFF_V`/`MIN_DIFF_J` amino acids is a
    /// ChangeSegment; anything else leaves the record as it was. `good` is
    /// recomputed from the final offsets.
    pub fn refine(&self, input: &FixerResult, assignment: &SegmentAssignment) -> RefinedFix {
        let mut result = input.clone();
        let mut refined = RefinedFix {
            result: input.clone(),
            v_refinement: Refinement::Unchanged,
            j_refinement: Refinement::Unchanged,
            old_v_id: None,
            old_v_end: None,
            old_j_id: None,
            old_j_start: None,
        };

        if assignment.v_match_len != -1 {
            let new_id = assignment.v_id.as_deref().unwrap_or("");
            if new_id == result.v_id {
                if assignment.v_match_len > result.v_end {
                    refined.old_v_end = Some(result.v_end);
                    result.v_end = assignment.v_match_len;
                    refined.v_refinement = Refinement::Realign;
                }
            } else if assignment.v_match_len - result.v_end >= MIN_DIFF_V {
                refined.old_v_id = Some(result.v_id.clone());
                refined.old_v_end = Some(result.v_end);
                result.v_id = new_id.to_string();
                result.v_end = assignment.v_match_len;
                refined.v_refinement = Refinement::ChangeSegment;
            }
        }

        if assignment.j_match_len != -1 {
            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)] // CDR3 scale
            let new_j_start = result.cdr3.len() as i32 - assignment.j_match_len;
            let new_id = assignment.j_id.as_deref().unwrap_or("");
            if new_id == result.j_id {
                if result.j_start > new_j_start {
                    refined.old_j_start = Some(result.j_start);
                    result.j_start = new_j_start;
                    refined.j_refinement = Refinement::Realign;
                }
            } else if result.j_start - new_j_start >= MIN_DIFF_J {
                refined.old_j_id = Some(result.j_id.clone());
                refined.old_j_start = Some(result.j_start);
                result.j_id = new_id.to_string();
                result.j_start = new_j_start;
                refined.j_refinement = Refinement::ChangeSegment;
            }
        }

        result.good = result.v_end != -1 && result.j_start != -1;
        refined.result = result;
        refined
    }
}

fn aa_len(score: i64) -> i32 {
    if score < 0 {
        return -1;
    }
    #[allow(clippy::cast_possible_truncation)] // CDR3 scale
    {
        (score / 3) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::segment::SegmentRecord;
    use crate::core::types::FixType;

    #[test]
    fn test_forward_full_codon_match() {
        assert_eq!(align_nuc_to_aa("A", "GCT"), 3);
        // Any synonymous codon matches
        assert_eq!(align_nuc_to_aa("A", "GCG"), 3);
    }

    #[test]
    fn test_forward_mismatch_scores_zero() {
        // GAT encodes D; the codon breaks mid-way and contributes nothing
        assert_eq!(align_nuc_to_aa("A", "GAT"), 0);
        assert_eq!(align_nuc_to_aa("M", "TTT"), 0);
    }

    #[test]
    fn test_forward_stops_at_first_break() {
        // CAS then a break: 9 bases, the trailing mismatch adds nothing
        assert_eq!(align_nuc_to_aa("CASS", "TGTGCCAGCGGG"), 9);
    }

    #[test]
    fn test_forward_partial_codon_at_reference_end_counts() {
        // C matches fully, A consumes the two remaining bases
        assert_eq!(align_nuc_to_aa("CA", "TGTGC"), 5);
    }

    #[test]
    fn test_forward_unknown_residue_ends_extension() {
        assert_eq!(align_nuc_to_aa("X", "GCT"), 0);
        assert_eq!(align_nuc_to_aa("CX", "TGTGCT"), 3);
    }

    #[test]
    fn test_reverse_matches_from_three_prime_end() {
        // Reverse mode reads the last codon first
        assert_eq!(align_nuc_to_aa_rev("F", "TTC"), 3);
        assert_eq!(align_nuc_to_aa_rev("FF", "TTTTTC"), 6);
        // Query residues are consumed from the right
        assert_eq!(align_nuc_to_aa_rev("NEQFF", "AATGAACAGTTTTTC"), 15);
    }

    #[test]
    fn test_reverse_partial_codon_at_reference_start_counts() {
        // F consumes TTC, the next F only the two bases left
        assert_eq!(align_nuc_to_aa_rev("FF", "TTTTC"), 5);
    }

    #[test]
    fn test_reverse_mismatch_scores_zero() {
        assert_eq!(align_nuc_to_aa_rev("F", "TGG"), 0);
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(align_nuc_to_aa("", "GCT"), 0);
        assert_eq!(align_nuc_to_aa("A", ""), 0);
        assert_eq!(align_nuc_to_aa_rev("", ""), 0);
    }

    fn aligner_library() -> SegmentLibrary {
        SegmentLibrary::from_records(vec![
            // Window TGTGCCAGCAGTATC, translates to CASSI
            SegmentRecord::new(
                "testspecies",
                Gene::Trb,
                SegmentType::Variable,
                "TRBV-A*01",
                3,
                "TGTGCCAGCAGTATC",
            ),
            // Window TGTGCCTGG, translates to CAW
            SegmentRecord::new(
                "testspecies",
                Gene::Trb,
                SegmentType::Variable,
                "TRBV-B*01",
                3,
                "TGTGCCTGG",
            ),
            // Window AATGAACAGTTTTTC, translates to NEQFF
            SegmentRecord::new(
                "testspecies",
                Gene::Trb,
                SegmentType::Joining,
                "TRBJ-A*01",
                11,
                "AATGAACAGTTTTTC",
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_assign_picks_best_segments() {
        let library = aligner_library();
        let aligner = SegmentAligner::new(&library);

        let assignment = aligner.assign("CASSIVGGNEQFF", "testspecies", Gene::Trb);
        assert_eq!(assignment.v_id.as_deref(), Some("TRBV-A*01"));
        assert_eq!(assignment.v_match_len, 5);
        assert_eq!(assignment.j_id.as_deref(), Some("TRBJ-A*01"));
        assert_eq!(assignment.j_match_len, 5);
    }

    #[test]
    fn test_assign_below_floor_yields_none() {
        let library = aligner_library();
        let aligner = SegmentAligner::new(&library);

        // Shares only the leading C with any V window: 3 < MIN_NUC_V
        let assignment = aligner.assign("CWWWWWW", "testspecies", Gene::Trb);
        assert_eq!(assignment.v_id, None);
        assert_eq!(assignment.v_match_len, -1);
        assert_eq!(assignment.j_id, None);
        assert_eq!(assignment.j_match_len, -1);
    }

    fn base_result() -> FixerResult {
        FixerResult::new(
            "CASSIVGGNEQFF".to_string(),
            "CASSIVGGNEQFF".to_string(),
            3,
            10,
            "TRBV-A*01".to_string(),
            FixType::NoFixNeeded,
            "TRBJ-A*01".to_string(),
            FixType::NoFixNeeded,
        )
    }

    #[test]
    fn test_refine_same_segment_longer_match_realigns() {
        let library = aligner_library();
        let aligner = SegmentAligner::new(&library);

        let assignment = aligner.assign("CASSIVGGNEQFF", "testspecies", Gene::Trb);
        let refined = aligner.refine(&base_result(), &assignment);

        assert_eq!(refined.v_refinement, Refinement::Realign);
        assert_eq!(refined.result.v_end, 5);
        assert_eq!(refined.old_v_end, Some(3));
        assert_eq!(refined.j_refinement, Refinement::Realign);
        assert_eq!(refined.result.j_start, 8);
        assert_eq!(refined.old_j_start, Some(10));
        assert!(refined.result.good);
    }

    #[test]
    fn test_refine_different_segment_needs_margin() {
        let library = aligner_library();
        let aligner = SegmentAligner::new(&library);

        let assignment = SegmentAssignment {
            v_id: Some("TRBV-B*01".to_string()),
            v_match_len: 4,
            j_id: None,
            j_match_len: -1,
        };
        // 4 - 3 = 1 < MIN_DIFF_V: stands
        let refined = aligner.refine(&base_result(), &assignment);
        assert_eq!(refined.v_refinement, Refinement::Unchanged);
        assert_eq!(refined.result.v_id, "TRBV-A*01");

        let assignment = SegmentAssignment {
            v_id: Some("TRBV-B*01".to_string()),
            v_match_len: 5,
            j_id: None,
            j_match_len: -1,
        };
        // 5 - 3 = 2 >= MIN_DIFF_V: reassigned
        let refined = aligner.refine(&base_result(), &assignment);
        assert_eq!(refined.v_refinement, Refinement::ChangeSegment);
        assert_eq!(refined.result.v_id, "TRBV-B*01");
        assert_eq!(refined.result.v_end, 5);
        assert_eq!(refined.old_v_id.as_deref(), Some("TRBV-A*01"));
    }

    #[test]
    fn test_refine_without_assignment_leaves_record() {
        let library = aligner_library();
        let aligner = SegmentAligner::new(&library);

        let assignment = SegmentAssignment {
            v_id: None,
            v_match_len: -1,
            j_id: None,
            j_match_len: -1,
        };
        let refined = aligner.refine(&base_result(), &assignment);
        assert_eq!(refined.v_refinement, Refinement::Unchanged);
        assert_eq!(refined.j_refinement, Refinement::Unchanged);
        assert_eq!(refined.result, base_result());
    }
}
