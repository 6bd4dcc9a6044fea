//! Role reconciliation logic

use crate::config::ReconcilerConfig;
use crate::fuzzy::FuzzyMatcher;
use crate::normalize::normalize;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// How a candidate role was resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolutionKind {
    /// Normalized form equals an authoritative role's normalized form
    Exact,

    /// Raw string fuzzy-matched an authoritative role
    Fuzzy {
        /// The authoritative role that cleared the threshold first
        authoritative: String,
        /// Similarity ratio of the pair
        score: u8,
    },

    /// No authoritative role matched
    Unmatched,
}

/// Verdict for one (deduplicated) candidate role
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Original candidate string
    pub candidate: String,

    /// Normalized form used for exact matching
    pub normalized: String,

    /// How it resolved
    #[serde(flatten)]
    pub kind: ResolutionKind,
}

/// Outcome of reconciling candidate roles against authoritative roles
///
/// `matched_roles` holds original authoritative strings, `incorrect_roles`
/// holds original candidate strings; both are deduplicated by normalized form
/// and sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    /// True when at least one candidate role did not match
    pub is_incorrect: bool,

    /// Authoritative roles matched directly or fuzzily
    pub matched_roles: Vec<String>,

    /// Candidate roles with no authoritative counterpart
    pub incorrect_roles: Vec<String>,

    /// Per-candidate detail, ordered by normalized form
    pub resolutions: Vec<Resolution>,
}

/// The Reconciler classifies candidate roles as matched or incorrect
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    matcher: FuzzyMatcher,
}

impl Reconciler {
    /// Create a new Reconciler
    pub fn new(config: ReconcilerConfig) -> Self {
        Self {
            matcher: FuzzyMatcher::new(config.fuzzy_threshold),
        }
    }

    /// Reconcile candidate roles against the authoritative roles
    ///
    /// 1. Exact pass: candidates whose normalized form is an authoritative
    ///    normalized form match directly.
    /// 2. Fuzzy pass: every other candidate, in normalized-form order, is
    ///    compared raw against the raw authoritative roles in input order; the
    ///    first one reaching the threshold wins.
    pub fn reconcile<A, C>(&self, authoritative: &[A], candidates: &[C]) -> MatchResult
    where
        A: AsRef<str>,
        C: AsRef<str>,
    {
        let authoritative_norm: BTreeSet<String> = authoritative
            .iter()
            .map(|role| normalize(role.as_ref()))
            .collect();

        // Later duplicates overwrite earlier ones
        let mut candidate_by_norm: BTreeMap<String, &str> = BTreeMap::new();
        for role in candidates {
            candidate_by_norm.insert(normalize(role.as_ref()), role.as_ref());
        }

        let mut matched_norm: BTreeSet<String> = BTreeSet::new();
        let mut incorrect: BTreeSet<String> = BTreeSet::new();
        let mut resolutions = Vec::with_capacity(candidate_by_norm.len());

        for (normalized, &original) in &candidate_by_norm {
            let kind = if authoritative_norm.contains(normalized) {
                matched_norm.insert(normalized.clone());
                ResolutionKind::Exact
            } else {
                match self.first_fuzzy_match(original, authoritative) {
                    Some((role, score)) => {
                        debug!(
                            "Fuzzy match: '{}' -> '{}' (score {})",
                            original, role, score
                        );
                        matched_norm.insert(normalize(role));
                        ResolutionKind::Fuzzy {
                            authoritative: role.to_string(),
                            score,
                        }
                    }
                    None => {
                        debug!("No match for candidate '{}'", original);
                        incorrect.insert(original.to_string());
                        ResolutionKind::Unmatched
                    }
                }
            };

            resolutions.push(Resolution {
                candidate: original.to_string(),
                normalized: normalized.clone(),
                kind,
            });
        }

        let matched_roles = representatives(authoritative, &matched_norm);
        let incorrect_roles: Vec<String> = incorrect.into_iter().collect();

        MatchResult {
            is_incorrect: !incorrect_roles.is_empty(),
            matched_roles,
            incorrect_roles,
            resolutions,
        }
    }

    /// First authoritative role (input order) whose raw ratio clears the threshold
    fn first_fuzzy_match<'a, A: AsRef<str>>(
        &self,
        candidate: &str,
        authoritative: &'a [A],
    ) -> Option<(&'a str, u8)> {
        authoritative.iter().find_map(|role| {
            let role = role.as_ref();
            let score = self.matcher.score(candidate, role);
            (score >= self.matcher.threshold().value()).then_some((role, score))
        })
    }
}

/// One original authoritative string per matched normalized form, sorted
///
/// The first occurrence in input order represents its normalized form.
fn representatives<A: AsRef<str>>(authoritative: &[A], matched_norm: &BTreeSet<String>) -> Vec<String> {
    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut roles: BTreeSet<String> = BTreeSet::new();

    for role in authoritative {
        let role = role.as_ref();
        let normalized = normalize(role);
        if matched_norm.contains(&normalized) && seen.insert(normalized) {
            roles.insert(role.to_string());
        }
    }

    roles.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FuzzyThreshold;
    use proptest::prelude::*;

    const EMPTY: [&str; 0] = [];

    fn reconciler(threshold: u32) -> Reconciler {
        Reconciler::new(ReconcilerConfig::with_threshold(
            FuzzyThreshold::new(threshold).unwrap(),
        ))
    }

    #[test]
    fn test_both_empty() {
        let result = reconciler(80).reconcile(&EMPTY, &EMPTY);
        assert!(!result.is_incorrect);
        assert!(result.matched_roles.is_empty());
        assert!(result.incorrect_roles.is_empty());
    }

    #[test]
    fn test_no_candidates_is_not_incorrect() {
        let result = reconciler(80).reconcile(&["Engineer"], &EMPTY);
        assert!(!result.is_incorrect);
        assert!(result.matched_roles.is_empty());
        assert!(result.incorrect_roles.is_empty());
    }

    #[test]
    fn test_no_authoritative_roles_marks_every_candidate() {
        let result = reconciler(80).reconcile(&EMPTY, &["Engineer", "Analyst"]);
        assert!(result.is_incorrect);
        assert_eq!(result.incorrect_roles, vec!["Analyst", "Engineer"]);
    }

    #[test]
    fn test_exact_after_normalization() {
        let result = reconciler(80).reconcile(&["Software Engineer"], &["software engineer!"]);
        assert!(!result.is_incorrect);
        assert_eq!(result.matched_roles, vec!["Software Engineer"]);
        assert!(result.incorrect_roles.is_empty());
        assert_eq!(result.resolutions[0].kind, ResolutionKind::Exact);
    }

    #[test]
    fn test_fuzzy_match_respects_threshold() {
        let result = reconciler(70).reconcile(&["Senior Developer"], &["Sr. Developer"]);
        assert!(!result.is_incorrect);
        assert_eq!(result.matched_roles, vec!["Senior Developer"]);
        assert_eq!(
            result.resolutions[0].kind,
            ResolutionKind::Fuzzy {
                authoritative: "Senior Developer".to_string(),
                score: 83,
            }
        );

        let result = reconciler(99).reconcile(&["Senior Developer"], &["Sr. Developer"]);
        assert!(result.is_incorrect);
        assert!(result.matched_roles.is_empty());
        assert_eq!(result.incorrect_roles, vec!["Sr. Developer"]);
    }

    #[test]
    fn test_unrelated_role_is_incorrect() {
        let result = reconciler(80).reconcile(&["Project Manager"], &["Sales Executive"]);
        assert!(result.is_incorrect);
        assert_eq!(result.incorrect_roles, vec!["Sales Executive"]);
        assert!(result.matched_roles.is_empty());
    }

    #[test]
    fn test_first_match_wins_over_best_match() {
        // "Data Analysts" scores higher (92) but "Data Analyst I" comes first
        let authoritative = ["Data Analyst I", "Data Analysts"];
        let result = reconciler(80).reconcile(&authoritative, &["Data Analyst."]);
        assert_eq!(
            result.resolutions[0].kind,
            ResolutionKind::Fuzzy {
                authoritative: "Data Analyst I".to_string(),
                score: 89,
            }
        );
        assert_eq!(result.matched_roles, vec!["Data Analyst I"]);
    }

    #[test]
    fn test_duplicates_collapse() {
        let authoritative = ["Engineer", "engineer", "Engineer"];
        let candidates = ["ENGINEER", "Engineer!", "Clown", "clown"];
        let result = reconciler(80).reconcile(&authoritative, &candidates);

        assert_eq!(result.matched_roles, vec!["Engineer"]);
        // Last write wins among candidates sharing a normalized form
        assert_eq!(result.incorrect_roles, vec!["clown"]);
        assert_eq!(result.resolutions.len(), 2);
    }

    #[test]
    fn test_resolutions_sorted_by_normalized_form() {
        let result = reconciler(80).reconcile(
            &["QA Tester", "Business Analyst"],
            &["Zookeeper", "business analyst", "Actor"],
        );
        let order: Vec<_> = result.resolutions.iter().map(|r| r.normalized.as_str()).collect();
        assert_eq!(order, vec!["actor", "business analyst", "zookeeper"]);
    }

    #[test]
    fn test_output_is_stable_across_input_order() {
        let authoritative = ["Software Engineer", "Project Manager", "Senior Developer"];
        let a = reconciler(70).reconcile(&authoritative, &["Sr. Developer", "Sales Executive", "project manager"]);
        let b = reconciler(70).reconcile(&authoritative, &["project manager", "Sales Executive", "Sr. Developer"]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_accepts_owned_strings() {
        let authoritative = vec!["Engineer".to_string()];
        let candidates = vec!["engineer".to_string()];
        let result = Reconciler::default().reconcile(&authoritative, &candidates);
        assert_eq!(result.matched_roles, vec!["Engineer"]);
    }

    proptest! {
        #[test]
        fn prop_outputs_come_from_inputs(
            authoritative in prop::collection::vec("[A-Za-z .!]{0,12}", 0..6),
            candidates in prop::collection::vec("[A-Za-z .!]{0,12}", 0..6),
            threshold in 0u32..=100,
        ) {
            let result = reconciler(threshold).reconcile(&authoritative, &candidates);

            for role in &result.matched_roles {
                prop_assert!(authoritative.contains(role));
            }
            for role in &result.incorrect_roles {
                prop_assert!(candidates.contains(role));
            }
            prop_assert_eq!(result.is_incorrect, !result.incorrect_roles.is_empty());
        }

        #[test]
        fn prop_outputs_unique_by_normalized_form(
            authoritative in prop::collection::vec("[A-Za-z .!]{0,12}", 0..6),
            candidates in prop::collection::vec("[A-Za-z .!]{0,12}", 0..6),
        ) {
            let result = reconciler(80).reconcile(&authoritative, &candidates);

            let matched: BTreeSet<String> = result.matched_roles.iter().map(|r| normalize(r)).collect();
            prop_assert_eq!(matched.len(), result.matched_roles.len());
            let incorrect: BTreeSet<String> = result.incorrect_roles.iter().map(|r| normalize(r)).collect();
            prop_assert_eq!(incorrect.len(), result.incorrect_roles.len());
        }

        #[test]
        fn prop_candidates_drawn_from_authoritative_all_match(
            authoritative in prop::collection::vec("[A-Za-z ]{1,12}", 1..6),
        ) {
            let result = reconciler(100).reconcile(&authoritative, &authoritative);
            prop_assert!(!result.is_incorrect);
        }
    }
}
