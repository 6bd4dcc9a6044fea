//! Reconciler configuration

use crate::ReconcilerError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum fuzzy ratio (0-100) for two roles to be considered the same
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct FuzzyThreshold(u8);

impl FuzzyThreshold {
    /// Default threshold
    pub const DEFAULT: FuzzyThreshold = FuzzyThreshold(80);

    /// Create a threshold, rejecting values above 100
    pub fn new(value: u32) -> Result<Self, ReconcilerError> {
        if value > 100 {
            return Err(ReconcilerError::InvalidThreshold(value));
        }
        Ok(Self(value as u8))
    }

    /// Threshold value
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for FuzzyThreshold {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u32> for FuzzyThreshold {
    type Error = ReconcilerError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FuzzyThreshold> for u32 {
    fn from(threshold: FuzzyThreshold) -> Self {
        threshold.0 as u32
    }
}

impl fmt::Display for FuzzyThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Configuration for role reconciliation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcilerConfig {
    /// Fuzzy threshold applied to candidates without an exact normalized match
    #[serde(default)]
    pub fuzzy_threshold: FuzzyThreshold,
}

impl ReconcilerConfig {
    /// Configuration with an explicit threshold
    pub fn with_threshold(threshold: FuzzyThreshold) -> Self {
        Self {
            fuzzy_threshold: threshold,
        }
    }

    /// Strict preset: only near-identical spellings fuzzy-match
    pub fn strict() -> Self {
        Self::with_threshold(FuzzyThreshold(95))
    }

    /// Lenient preset: tolerates abbreviations such as "Sr." for "Senior"
    pub fn lenient() -> Self {
        Self::with_threshold(FuzzyThreshold(70))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_threshold() {
        assert_eq!(ReconcilerConfig::default().fuzzy_threshold.value(), 80);
    }

    #[test]
    fn test_threshold_bounds() {
        assert!(FuzzyThreshold::new(0).is_ok());
        assert!(FuzzyThreshold::new(100).is_ok());
        assert_eq!(
            FuzzyThreshold::new(101),
            Err(ReconcilerError::InvalidThreshold(101))
        );
    }

    #[test]
    fn test_presets_ordered() {
        assert!(ReconcilerConfig::strict().fuzzy_threshold > ReconcilerConfig::default().fuzzy_threshold);
        assert!(ReconcilerConfig::lenient().fuzzy_threshold < ReconcilerConfig::default().fuzzy_threshold);
    }

    #[test]
    fn test_threshold_deserialize_rejects_out_of_range() {
        let parsed: Result<ReconcilerConfig, _> =
            serde_json::from_str(r#"{"fuzzy_threshold": 150}"#);
        assert!(parsed.is_err());

        let parsed: ReconcilerConfig = serde_json::from_str(r#"{"fuzzy_threshold": 65}"#).unwrap();
        assert_eq!(parsed.fuzzy_threshold.value(), 65);
    }
}
