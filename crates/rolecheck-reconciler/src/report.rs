//! Summary report over a reconciliation

use crate::reconciler::MatchResult;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Overall verdict of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Every candidate role matched an authoritative role
    Correct,

    /// At least one candidate role has no authoritative counterpart
    Incorrect,

    /// The document yielded no candidate roles
    NoRolesFound,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Correct => write!(f, "All document roles match the authoritative roles"),
            Verdict::Incorrect => write!(f, "Document contains roles that are not authoritative"),
            Verdict::NoRolesFound => write!(f, "No roles found in document"),
        }
    }
}

/// Structured result of one reconciliation, ready for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleReport {
    /// Number of distinct authoritative role strings
    pub authoritative_count: usize,

    /// Number of distinct candidate role strings
    pub candidate_count: usize,

    /// Matched authoritative roles
    pub matched_roles: Vec<String>,

    /// Unmatched candidate roles
    pub incorrect_roles: Vec<String>,

    /// Same as `verdict == Verdict::Incorrect`
    pub is_incorrect: bool,

    /// Overall verdict
    pub verdict: Verdict,
}

impl RoleReport {
    /// Build a report from the inputs and outcome of a reconciliation
    pub fn new<A, C>(authoritative: &[A], candidates: &[C], result: &MatchResult) -> Self
    where
        A: AsRef<str>,
        C: AsRef<str>,
    {
        let candidate_count = distinct(candidates);
        let verdict = if result.is_incorrect {
            Verdict::Incorrect
        } else if result.resolutions.is_empty() {
            Verdict::NoRolesFound
        } else {
            Verdict::Correct
        };

        Self {
            authoritative_count: distinct(authoritative),
            candidate_count,
            matched_roles: result.matched_roles.clone(),
            incorrect_roles: result.incorrect_roles.clone(),
            is_incorrect: result.is_incorrect,
            verdict,
        }
    }
}

fn distinct<S: AsRef<str>>(roles: &[S]) -> usize {
    roles.iter().map(AsRef::as_ref).collect::<BTreeSet<&str>>().len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Reconciler, ReconcilerConfig};

    fn report(authoritative: &[&str], candidates: &[&str]) -> RoleReport {
        let result = Reconciler::new(ReconcilerConfig::default()).reconcile(authoritative, candidates);
        RoleReport::new(authoritative, candidates, &result)
    }

    #[test]
    fn test_no_roles_found() {
        let report = report(&["Engineer"], &[]);
        assert_eq!(report.verdict, Verdict::NoRolesFound);
        assert!(!report.is_incorrect);
        assert_eq!(report.candidate_count, 0);
        assert_eq!(report.authoritative_count, 1);
    }

    #[test]
    fn test_correct_verdict() {
        let report = report(&["Engineer", "Analyst"], &["engineer"]);
        assert_eq!(report.verdict, Verdict::Correct);
        assert_eq!(report.matched_roles, vec!["Engineer"]);
    }

    #[test]
    fn test_incorrect_verdict() {
        let report = report(&["Project Manager"], &["Sales Executive"]);
        assert_eq!(report.verdict, Verdict::Incorrect);
        assert!(report.is_incorrect);
        assert_eq!(report.incorrect_roles, vec!["Sales Executive"]);
    }

    #[test]
    fn test_punctuation_only_roles_still_match() {
        let report = report(&["???"], &["!!!"]);
        assert_eq!(report.verdict, Verdict::Correct);
        assert_eq!(report.matched_roles, vec!["???"]);
        assert_eq!(report.candidate_count, 1);
    }

    #[test]
    fn test_counts_are_distinct_raw_strings() {
        let report = report(&["Engineer", "Engineer", "engineer"], &["Analyst", "Analyst"]);
        assert_eq!(report.authoritative_count, 2);
        assert_eq!(report.candidate_count, 1);
    }

    #[test]
    fn test_serializes_verdict_snake_case() {
        let report = report(&[], &[]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["verdict"], "no_roles_found");
        assert_eq!(json["is_incorrect"], false);
    }
}
