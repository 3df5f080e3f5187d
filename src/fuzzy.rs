//! Fuzzy matching used to filter list entries while typing

use std::cmp::Reverse;

use itertools::Itertools;

/// Narrows and ranks candidates against a query
pub trait FuzzyFilter {
    /// Returns the matching candidates, best match first
    fn filter<'a>(&self, candidates: &'a [String], query: &str) -> Vec<&'a str>;
}

/// Case-insensitive subsequence matcher
///
/// A candidate matches when every query character appears in it in order.
/// Runs of adjacent matched characters and matches close to the start rank
/// higher. Equal scores keep the candidate order, and an empty query keeps
/// every candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubsequenceFilter;

/// Bonus for a matched character directly after the previous match
const RUN_BONUS: i64 = 2;

impl SubsequenceFilter {
    /// Scores `candidate`, `None` if the query is not a subsequence of it
    pub fn score(candidate: &str, query: &str) -> Option<i64> {
        let mut query = query.chars().flat_map(char::to_lowercase).peekable();
        let mut score = 0;
        let mut first = None;
        let mut previous: Option<usize> = None;

        for (index, c) in candidate.chars().flat_map(char::to_lowercase).enumerate() {
            let Some(&wanted) = query.peek() else {
                break;
            };
            if c != wanted {
                continue;
            }
            query.next();
            score += 1;
            if previous.is_some_and(|p| p + 1 == index) {
                score += RUN_BONUS;
            }
            first.get_or_insert(index);
            previous = Some(index);
        }

        if query.peek().is_some() {
            return None;
        }
        Some(score - first.unwrap_or(0) as i64)
    }
}

impl FuzzyFilter for SubsequenceFilter {
    fn filter<'a>(&self, candidates: &'a [String], query: &str) -> Vec<&'a str> {
        if query.is_empty() {
            return candidates.iter().map(String::as_str).collect();
        }
        candidates
            .iter()
            .enumerate()
            .filter_map(|(index, candidate)| {
                Self::score(candidate, query).map(|score| (Reverse(score), index, candidate))
            })
            .sorted_by_key(|&(score, index, _)| (score, index))
            .map(|(_, _, candidate)| candidate.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|word| word.to_string()).collect()
    }

    #[test]
    fn test_empty_query_keeps_everything() {
        let candidates = words(&["pear", "apple", "fig"]);
        assert_eq!(
            SubsequenceFilter.filter(&candidates, ""),
            ["pear", "apple", "fig"]
        );
    }

    #[test]
    fn test_subsequence_is_case_insensitive() {
        assert!(SubsequenceFilter::score("Grapefruit", "gft").is_some());
        assert!(SubsequenceFilter::score("grapefruit", "GRAPE").is_some());
        assert_eq!(SubsequenceFilter::score("grape", "pg"), None);
        assert_eq!(SubsequenceFilter::score("", "a"), None);
    }

    #[test]
    fn test_runs_and_early_matches_rank_first() {
        let candidates = words(&["banana", "cabbage", "abacus", "bad"]);
        // "ab" is a run at 0 in abacus and a run at 1 in cabbage
        assert_eq!(
            SubsequenceFilter.filter(&candidates, "ab"),
            ["abacus", "cabbage"]
        );
    }

    #[test]
    fn test_equal_scores_keep_candidate_order() {
        let candidates = words(&["tab", "tub", "tib"]);
        assert_eq!(SubsequenceFilter.filter(&candidates, "tb"), ["tab", "tub", "tib"]);
    }
}
