//! Nearest-match suggestions for mistyped command names.

/// Edit distance above which a candidate is excluded from suggestions.
pub const SUGGESTION_THRESHOLD: usize = 2;

/// Maximum number of suggestions returned for one miss.
pub const MAX_SUGGESTIONS: usize = 3;

/// Computes the Levenshtein (edit) distance between two strings.
///
/// Insertions, deletions, and substitutions all cost one.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Ranks `candidates` by edit distance to `input`, case-insensitively.
///
/// Candidates farther than `threshold` are excluded entirely; the survivors
/// are ordered closest-first (ties keep candidate input order) and capped at
/// [`MAX_SUGGESTIONS`].
pub fn suggest(input: &str, candidates: &[String], threshold: usize) -> Vec<String> {
    let needle = input.to_lowercase();
    let mut scored = candidates
        .iter()
        .filter_map(|candidate| {
            let distance = edit_distance(&needle, &candidate.to_lowercase());
            (distance <= threshold).then(|| (distance, candidate.clone()))
        })
        .collect::<Vec<_>>();
    scored.sort_by_key(|(distance, _)| *distance);
    scored
        .into_iter()
        .map(|(_, candidate)| candidate)
        .take(MAX_SUGGESTIONS)
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn candidates(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn distance_counts_unit_edits() {
        assert_eq!(edit_distance("goto", "goto"), 0);
        assert_eq!(edit_distance("fooo", "foo"), 1);
        assert_eq!(edit_distance("theme", "them"), 1);
        assert_eq!(edit_distance("skil", "skills"), 2);
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("abc", ""), 3);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let found = suggest("PROJETS", &candidates(&["projects", "contact"]), 2);
        assert_eq!(found, vec!["projects"]);
    }

    #[test]
    fn candidates_beyond_threshold_are_excluded() {
        let found = suggest("zzzzzz", &candidates(&["help", "about", "skills"]), 2);
        assert!(found.is_empty());
    }

    #[test]
    fn closest_candidate_ranks_first() {
        let found = suggest("helb", &candidates(&["whoami", "help", "hell"]), 2);
        assert_eq!(found[0], "help");
    }

    #[test]
    fn results_cap_at_three() {
        let found = suggest("abc", &candidates(&["abd", "abe", "abf", "abg"]), 2);
        assert_eq!(found.len(), MAX_SUGGESTIONS);
    }

    #[test]
    fn raising_the_threshold_never_shrinks_the_result_set() {
        let pool = candidates(&["goto", "help", "echo", "clear"]);
        let mut previous = Vec::new();
        for threshold in 0..=3 {
            let found = suggest("gato", &pool, threshold);
            for name in &previous {
                assert!(found.contains(name), "threshold widen dropped {name}");
            }
            previous = found;
        }
    }
}
