// src/models.rs
//
// Shared vocabulary for the commit-building flows.

/// The fixed semantic commit types offered by the push flow, with the
/// one-line descriptions shown in the selection menu.
pub const SEMANTIC_TYPES: &[(&str, &str)] = &[
    ("feat", "new user-facing feature"),
    ("fix", "bug fix"),
    ("refactor", "no behavior change"),
    ("perf", "performance improvement"),
    ("test", "add or update tests"),
    ("docs", "documentation only"),
    ("chore", "tooling, config, deps"),
    ("build", "build system changes"),
    ("ci", "CI/CD pipeline changes"),
    ("style", "formatting only"),
    ("revert", "revert previous change"),
];

/// The fixed commit scopes offered by the push flow. `none` drops the
/// parenthetical from the final title.
pub const SCOPES: &[&str] = &["auth", "api", "ui", "db", "cli", "build", "infra", "none"];

/// Assembles a conventional commit title: `type(scope): title`, or
/// `type: title` when the scope is `none`.
pub fn format_commit_title(semantic_type: &str, scope: &str, title: &str) -> String {
    if scope == "none" {
        format!("{}: {}", semantic_type, title)
    } else {
        format!("{}({}): {}", semantic_type, scope, title)
    }
}

/// Menu items for the semantic type selector, e.g. `feat      - new user-facing feature`.
pub fn semantic_type_menu_items() -> Vec<String> {
    SEMANTIC_TYPES
        .iter()
        .map(|(name, description)| format!("{:<9} - {}", name, description))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_with_scope() {
        assert_eq!(
            format_commit_title("feat", "auth", "add login button"),
            "feat(auth): add login button"
        );
    }

    #[test]
    fn test_title_scope_none_omits_parenthetical() {
        assert_eq!(
            format_commit_title("fix", "none", "handle empty input"),
            "fix: handle empty input"
        );
    }

    #[test]
    fn test_menu_items_start_with_type_name() {
        let items = semantic_type_menu_items();
        assert_eq!(items.len(), SEMANTIC_TYPES.len());
        assert!(items[0].starts_with("feat"));
        // The first whitespace-separated word is the bare type, ready to extract.
        assert_eq!(items[2].split_whitespace().next(), Some("refactor"));
    }
}
