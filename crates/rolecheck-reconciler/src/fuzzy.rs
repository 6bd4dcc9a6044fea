//! Fuzzy string similarity

use crate::config::FuzzyThreshold;

/// Similarity ratio of two raw strings on a 0-100 scale
///
/// Edit-distance ratio where only insertions and deletions count:
/// `100 * (len(a) + len(b) - indel) / (len(a) + len(b))`, which equals
/// `200 * lcs / (len(a) + len(b))`. Lengths are in characters. The result is
/// rounded half-to-even. Identical strings score 100 (including two empty
/// strings); otherwise an empty side scores 0. Case and punctuation count.
///
/// # Examples
///
/// ```
/// use rolecheck_reconciler::ratio;
///
/// assert_eq!(ratio("Senior Developer", "Senior Developer"), 100);
/// assert_eq!(ratio("Senior Developer", "Sr. Developer"), 83);
/// assert_eq!(ratio("abc", ""), 0);
/// ```
pub fn ratio(a: &str, b: &str) -> u8 {
    if a == b {
        return 100;
    }
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = (a.len() + b.len()) as f64;
    let lcs = longest_common_subsequence(&a, &b) as f64;

    (200.0 * lcs / total).round_ties_even() as u8
}

/// Length of the longest common subsequence, two-row dynamic programming
fn longest_common_subsequence(a: &[char], b: &[char]) -> usize {
    let (outer, inner) = if a.len() >= b.len() { (a, b) } else { (b, a) };

    let mut previous = vec![0usize; inner.len() + 1];
    let mut current = vec![0usize; inner.len() + 1];

    for &x in outer {
        for (j, &y) in inner.iter().enumerate() {
            current[j + 1] = if x == y {
                previous[j] + 1
            } else {
                previous[j + 1].max(current[j])
            };
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[inner.len()]
}

/// Threshold-bound similarity check
#[derive(Debug, Clone, Copy, Default)]
pub struct FuzzyMatcher {
    threshold: FuzzyThreshold,
}

impl FuzzyMatcher {
    /// Create a matcher accepting pairs whose ratio reaches `threshold`
    pub fn new(threshold: FuzzyThreshold) -> Self {
        Self { threshold }
    }

    /// Configured threshold
    pub fn threshold(&self) -> FuzzyThreshold {
        self.threshold
    }

    /// Similarity score of two raw strings
    pub fn score(&self, a: &str, b: &str) -> u8 {
        ratio(a, b)
    }

    /// True iff `ratio(a, b) >= threshold`; symmetric in its arguments
    pub fn is_match(&self, a: &str, b: &str) -> bool {
        self.score(a, b) >= self.threshold.value()
    }
}
