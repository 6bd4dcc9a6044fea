//! Role normalization for equality comparison

/// Canonicalize a role string
///
/// Lowercases, drops every character that is neither a word character
/// (alphanumeric or `_`) nor whitespace, then trims surrounding whitespace.
/// Total, pure and idempotent.
///
/// # Examples
///
/// ```
/// use rolecheck_reconciler::normalize;
///
/// assert_eq!(normalize("  Software Engineer! "), "software engineer");
/// assert_eq!(normalize("Sr. Developer"), "sr developer");
/// assert_eq!(normalize("!!!"), "");
/// ```
pub fn normalize(role: &str) -> String {
    let lowered = role.to_lowercase();
    let kept: String = lowered
        .chars()
        .filter(|c| is_word_char(*c) || c.is_whitespace())
        .collect();
    kept.trim().to_string()
}

/// Normalize an optional role; a missing value normalizes to the empty string
pub fn normalize_opt(role: Option<&str>) -> String {
    role.map(normalize).unwrap_or_default()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
