//! Rolecheck Reconciler
//!
//! Decides whether the roles found in a document are the roles an authoritative
//! source declares.
//!
//! The reconciler provides:
//! - Role normalization (case, punctuation and surrounding whitespace removed)
//! - Fuzzy similarity scoring on raw strings (0-100 ratio)
//! - Set reconciliation: exact matches on normalized forms first, then a
//!   deterministic first-match fuzzy scan for the rest
//! - A report summarizing counts, matches, mismatches and the verdict
//!
//! # Examples
//!
//! ```
//! use rolecheck_reconciler::{Reconciler, ReconcilerConfig};
//!
//! let reconciler = Reconciler::new(ReconcilerConfig::default());
//! let result = reconciler.reconcile(
//!     &["Software Engineer", "Project Manager"],
//!     &["software engineer!", "Sales Executive"],
//! );
//!
//! assert!(result.is_incorrect);
//! assert_eq!(result.matched_roles, vec!["Software Engineer"]);
//! assert_eq!(result.incorrect_roles, vec!["Sales Executive"]);
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod fuzzy;
mod normalize;
mod reconciler;
mod report;

pub use config::{FuzzyThreshold, ReconcilerConfig};
pub use error::ReconcilerError;
pub use fuzzy::{ratio, FuzzyMatcher};
pub use normalize::{normalize, normalize_opt};
pub use reconciler::{MatchResult, Reconciler, Resolution, ResolutionKind};
pub use report::{RoleReport, Verdict};
