use crate::catalog::resolver::{NomenclatureResolver, SynonymTable};
use crate::catalog::store::SegmentLibrary;
use crate::core::record::FixerResult;
use crate::core::types::FixType;
use crate::matching::scanner::KmerScanner;

/// Default bound on how many leading query residues a replace may discard
pub const DEFAULT_MAX_REPLACE_SIZE: usize = 1;

/// Default minimum k-mer hit size
pub const DEFAULT_MIN_HIT_SIZE: usize = 2;

/// Tunables for the fixer
#[derive(Debug, Clone)]
pub struct FixerConfig {
    /// Longest CDR3 prefix a FixReplace may discard before the edit is
    /// rejected as unreliable (FailedReplace)
    pub max_replace_size: usize,

    /// Minimum substring length the scanner will consider a hit
    pub min_hit_size: usize,
}

impl Default for FixerConfig {
    fn default() -> Self {
        Self {
            max_replace_size: DEFAULT_MAX_REPLACE_SIZE,
            min_hit_size: DEFAULT_MIN_HIT_SIZE,
        }
    }
}

/// Outcome of fixing one side of a CDR3 against one candidate segment.
///
/// `fragment` is oriented the way the algorithm saw it: forward for the
/// 5′/V side, reversed for the 3′/J side. `match_size` is -1 when the side
/// produced no usable match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneSideFixResult {
    pub fragment: String,
    pub segment_id: String,
    pub fix_type: FixType,
    pub match_size: i32,
}

/// Reconciles CDR3 junctions with the germline segment library.
///
/// The J side is the V-side problem mirrored: both strings are reversed and
/// the forward algorithm is reused, threaded through one `five_prime`
/// parameter.
pub struct Cdr3Fixer<'a> {
    library: &'a SegmentLibrary,
    synonyms: &'a SynonymTable,
    config: FixerConfig,
}

impl<'a> Cdr3Fixer<'a> {
    /// Create a fixer with default tunables
    pub fn new(library: &'a SegmentLibrary, synonyms: &'a SynonymTable) -> Self {
        Self {
            library,
            synonyms,
            config: FixerConfig::default(),
        }
    }

    /// Create a fixer with custom tunables
    pub fn with_config(
        library: &'a SegmentLibrary,
        synonyms: &'a SynonymTable,
        config: FixerConfig,
    ) -> Self {
        Self {
            library,
            synonyms,
            config,
        }
    }

    /// Fix one end of a CDR3 against one candidate segment id.
    ///
    /// Resolution failure, a missing overlap, and an over-long replace all
    /// terminate in their FixType; nothing here is an error.
    pub fn fix_one_side(
        &self,
        cdr3: &str,
        candidate_id: &str,
        species: &str,
        five_prime: bool,
    ) -> OneSideFixResult {
        let resolver = NomenclatureResolver::new(self.library, self.synonyms);

        let window = self
            .resolve_window(&resolver, species, candidate_id)
            .map(|(id, window)| (id, window.to_string()));
        let Some((segment_id, window)) = window else {
            return OneSideFixResult {
                fragment: orient(cdr3, five_prime),
                segment_id: resolver.normalize(species, candidate_id),
                fix_type: FixType::FailedBadSegment,
                match_size: -1,
            };
        };

        let cdr3 = orient(cdr3, five_prime);
        let window = orient(&window, five_prime);

        let scanner = KmerScanner::new(&window, self.config.min_hit_size);
        let Some(hit) = scanner.scan(&cdr3) else {
            return OneSideFixResult {
                fragment: cdr3,
                segment_id,
                fix_type: FixType::FailedNoAlignment,
                match_size: -1,
            };
        };

        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)] // CDR3 scale
        let match_size = hit.match_size as i32;

        let (fragment, fix_type, match_size) = match (hit.start_in_segment, hit.start_in_cdr3) {
            (0, 0) => (cdr3, FixType::NoFixNeeded, match_size),
            (0, trimmed) => (cdr3[trimmed..].to_string(), FixType::FixTrim, match_size),
            (missing, 0) => (
                format!("{}{}", &window[..missing], cdr3),
                FixType::FixAdd,
                match_size,
            ),
            (missing, replaced) if replaced <= self.config.max_replace_size => (
                format!("{}{}", &window[..missing], &cdr3[replaced..]),
                FixType::FixReplace,
                match_size,
            ),
            // Replace would discard too much of the query: hand back the
            // full reference window as the rejection signal
            _ => (window, FixType::FailedReplace, -1),
        };

        OneSideFixResult {
            fragment,
            segment_id,
            fix_type,
            match_size,
        }
    }

    /// Fix both ends of a CDR3, V side first, then the J side on the
    /// V-corrected sequence.
    ///
    /// `v_ids` and `j_ids` may each carry several comma-separated candidate
    /// ids; per side, the candidate whose outcome has the lowest FixType
    /// rank wins, first-listed on ties.
    pub fn fix_both(&self, cdr3: &str, v_ids: &str, j_ids: &str, species: &str) -> FixerResult {
        let v_result = self.fix_best_candidate(cdr3, v_ids, species, true);
        let j_result = self.fix_best_candidate(&v_result.fragment, j_ids, species, false);

        let final_cdr3 = reverse(&j_result.fragment);

        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)] // CDR3 scale
        let j_start = if j_result.match_size < 0 {
            j_result.match_size
        } else {
            final_cdr3.len() as i32 - j_result.match_size
        };

        FixerResult::new(
            final_cdr3,
            cdr3.to_string(),
            v_result.match_size,
            j_start,
            v_result.segment_id,
            v_result.fix_type,
            j_result.segment_id,
            j_result.fix_type,
        )
    }

    /// Run one side once per comma-separated candidate and keep the best.
    ///
    /// An empty candidate list degenerates to a single failed resolution,
    /// i.e. FailedBadSegment, never an error.
    fn fix_best_candidate(
        &self,
        cdr3: &str,
        ids: &str,
        species: &str,
        five_prime: bool,
    ) -> OneSideFixResult {
        let mut best: Option<OneSideFixResult> = None;
        for id in ids.split(',') {
            let result = self.fix_one_side(cdr3, id, species, five_prime);
            let better = best
                .as_ref()
                .map_or(true, |b| result.fix_type.rank() < b.fix_type.rank());
            if better {
                best = Some(result);
            }
        }
        // split() yields at least one candidate for any input
        best.unwrap_or_else(|| OneSideFixResult {
            fragment: orient(cdr3, five_prime),
            segment_id: ids.to_string(),
            fix_type: FixType::FailedBadSegment,
            match_size: -1,
        })
    }

    fn resolve_window(
        &self,
        resolver: &NomenclatureResolver<'_>,
        species: &str,
        candidate_id: &str,
    ) -> Option<(String, &str)> {
        let resolved = resolver.resolve(species, candidate_id)?;
        let window = self.library.segment_window(species, &resolved)?;
        Some((resolved, window))
    }
}

fn reverse(s: &str) -> String {
    s.chars().rev().collect()
}

fn orient(s: &str, five_prime: bool) -> String {
    if five_prime {
        s.to_string()
    } else {
        reverse(s)
    }
}
