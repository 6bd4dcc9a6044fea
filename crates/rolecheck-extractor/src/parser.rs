//! Parse LLM output into role names

use std::collections::BTreeSet;

/// Parsed role extraction reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleReply {
    /// The model listed these roles (deduplicated, case-sensitive)
    Roles(BTreeSet<String>),
    /// The model answered "None"
    NoneFound,
    /// The reply held nothing usable
    Empty,
}

impl RoleReply {
    /// Roles in the reply; empty unless `Roles`
    pub fn into_roles(self) -> BTreeSet<String> {
        match self {
            RoleReply::Roles(roles) => roles,
            RoleReply::NoneFound | RoleReply::Empty => BTreeSet::new(),
        }
    }
}

/// Parse a comma-separated role list
///
/// Tokens are trimmed and empty tokens dropped. Duplicates collapse only when
/// byte-identical; case folding happens later, during reconciliation.
pub fn parse_role_list(response: &str) -> RoleReply {
    let body = strip_code_fence(response);

    if is_none_reply(body) {
        return RoleReply::NoneFound;
    }

    let roles: BTreeSet<String> = body
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect();

    if roles.is_empty() {
        RoleReply::Empty
    } else {
        RoleReply::Roles(roles)
    }
}

fn is_none_reply(body: &str) -> bool {
    let bare = body
        .trim()
        .trim_end_matches('.')
        .trim_matches(|c| c == '\'' || c == '"');
    bare.eq_ignore_ascii_case("none")
}

/// Strip a surrounding markdown code block, if any
fn strip_code_fence(response: &str) -> &str {
    let trimmed = response.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }

    // Skip the opening line (``` or ```text) and the closing fence
    let Some((_, rest)) = trimmed.split_once('\n') else {
        return "";
    };
    rest.trim_end().trim_end_matches("```").trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles(items: &[&str]) -> RoleReply {
        RoleReply::Roles(items.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_parse_comma_separated() {
        assert_eq!(
            parse_role_list("Software Engineer, Project Manager,Data Analyst"),
            roles(&["Data Analyst", "Project Manager", "Software Engineer"])
        );
    }

    #[test]
    fn test_empty_tokens_dropped() {
        assert_eq!(
            parse_role_list(" , Engineer,, ,Analyst , "),
            roles(&["Analyst", "Engineer"])
        );
    }

    #[test]
    fn test_dedup_is_case_sensitive() {
        assert_eq!(
            parse_role_list("Engineer, Engineer, engineer"),
            roles(&["Engineer", "engineer"])
        );
    }

    #[test]
    fn test_none_reply() {
        assert_eq!(parse_role_list("None"), RoleReply::NoneFound);
        assert_eq!(parse_role_list("  none \n"), RoleReply::NoneFound);
        assert_eq!(parse_role_list("NONE."), RoleReply::NoneFound);
        assert_eq!(parse_role_list("'None'"), RoleReply::NoneFound);
    }

    #[test]
    fn test_role_containing_none_is_kept() {
        assert_eq!(parse_role_list("None Specialist"), roles(&["None Specialist"]));
    }

    #[test]
    fn test_empty_reply() {
        assert_eq!(parse_role_list(""), RoleReply::Empty);
        assert_eq!(parse_role_list(" ,, "), RoleReply::Empty);
    }

    #[test]
    fn test_markdown_wrapper() {
        let response = "```\nEngineer, Analyst\n```";
        assert_eq!(parse_role_list(response), roles(&["Analyst", "Engineer"]));

        let response = "```text\nNone\n```";
        assert_eq!(parse_role_list(response), RoleReply::NoneFound);
    }

    #[test]
    fn test_into_roles() {
        assert!(RoleReply::NoneFound.into_roles().is_empty());
        assert_eq!(parse_role_list("QA Tester").into_roles().len(), 1);
    }
}
