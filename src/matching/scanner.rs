use std::collections::HashMap;

/// Best overlap found between a query CDR3 and a reference segment window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// Offset of the match within the reference window
    pub start_in_segment: usize,

    /// Offset of the match within the query
    pub start_in_cdr3: usize,

    /// Length of the matched substring
    pub match_size: usize,
}

/// Exact-substring index over one reference window.
///
/// Construction enumerates every substring of the reference with length at
/// least `min_hit_size` and records its start offset; for a substring that
/// occurs more than once, the rightmost occurrence wins. The index is cheap
/// (reference windows are CDR3-scale) and is discarded after use.
pub struct KmerScanner {
    min_hit_size: usize,
    kmers: HashMap<String, usize>,
}

impl KmerScanner {
    pub fn new(reference: &str, min_hit_size: usize) -> Self {
        let mut kmers = HashMap::new();
        for size in min_hit_size..=reference.len() {
            for start in 0..=(reference.len() - size) {
                kmers.insert(reference[start..start + size].to_string(), start);
            }
        }
        Self { min_hit_size, kmers }
    }

    /// Find the longest overlap between `query` and the reference.
    ///
    /// Query substrings are enumerated with length in
    /// `[min_hit_size, len(query)]`, lengths ascending and positions left to
    /// right; only a strictly larger match displaces the best hit, so among
    /// equal-size maxima the leftmost one found first is kept.
    /// O(query²) lookups, acceptable at CDR3 scale.
    pub fn scan(&self, query: &str) -> Option<SearchResult> {
        let mut best: Option<SearchResult> = None;

        for size in self.min_hit_size..=query.len() {
            for start in 0..=(query.len() - size) {
                let kmer = &query[start..start + size];
                if let Some(&start_in_segment) = self.kmers.get(kmer) {
                    let hit = SearchResult {
                        start_in_segment,
                        start_in_cdr3: start,
                        match_size: size,
                    };
                    if best.map_or(true, |b| hit.match_size > b.match_size) {
                        best = Some(hit);
                    }
                }
            }
        }

        best.filter(|b| b.match_size > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_match() {
        // A query equal to the reference matches at 0/0 in full
        let scanner = KmerScanner::new("CASSI", 2);
        let hit = scanner.scan("CASSI").unwrap();
        assert_eq!(hit.start_in_segment, 0);
        assert_eq!(hit.start_in_cdr3, 0);
        assert_eq!(hit.match_size, 5);
    }

    #[test]
    fn test_full_reference_inside_longer_query() {
        let scanner = KmerScanner::new("CASSI", 2);
        let hit = scanner.scan("CASSIVGGNEQFF").unwrap();
        assert_eq!(hit.start_in_segment, 0);
        assert_eq!(hit.start_in_cdr3, 0);
        assert_eq!(hit.match_size, 5);
    }

    #[test]
    fn test_offset_match() {
        // Query is the reference with its first two residues missing
        let scanner = KmerScanner::new("CASSI", 2);
        let hit = scanner.scan("SSIVGG").unwrap();
        assert_eq!(hit.start_in_segment, 2);
        assert_eq!(hit.start_in_cdr3, 0);
        assert_eq!(hit.match_size, 3);
    }

    #[test]
    fn test_no_hit() {
        let scanner = KmerScanner::new("CASSI", 2);
        assert_eq!(scanner.scan("WGKL"), None);
    }

    #[test]
    fn test_min_hit_size_filters_short_overlaps() {
        // Only a single-residue overlap exists; below min_hit_size
        let scanner = KmerScanner::new("CAT", 2);
        assert_eq!(scanner.scan("TW"), None);
    }

    #[test]
    fn test_leftmost_of_equal_maxima_wins() {
        // "AB" occurs twice in the query; the left occurrence is reported
        let scanner = KmerScanner::new("AB", 2);
        let hit = scanner.scan("XABYABZ").unwrap();
        assert_eq!(hit.start_in_cdr3, 1);
        assert_eq!(hit.match_size, 2);
    }

    #[test]
    fn test_repeated_reference_substring_indexes_rightmost() {
        // "AB" occurs at 0 and 3 in the reference; the index keeps 3
        let scanner = KmerScanner::new("ABXAB", 2);
        let hit = scanner.scan("ABQ").unwrap();
        assert_eq!(hit.start_in_segment, 3);
        assert_eq!(hit.match_size, 2);
    }

    #[test]
    fn test_query_shorter_than_min_hit_yields_nothing() {
        let scanner = KmerScanner::new("CASSI", 2);
        assert_eq!(scanner.scan("C"), None);
        assert_eq!(scanner.scan(""), None);
    }

    #[test]
    fn test_query_contained_in_reference_matches_fully() {
        let scanner = KmerScanner::new("CASSI", 2);
        let hit = scanner.scan("ASS").unwrap();
        assert_eq!(hit.start_in_segment, 1);
        assert_eq!(hit.start_in_cdr3, 0);
        assert_eq!(hit.match_size, 3);
    }
}
