//! Comparison of typed references against their canonical spelling.

/// Normalize whitespace in a string (trim and collapse multiple spaces).
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Suggest the canonical reference when it differs from what was typed.
///
/// Whitespace differences alone do not produce a suggestion; anything
/// else (case, abbreviations, verse ranges) does.
pub fn suggestion_for(typed: &str, canonical: &str) -> Option<String> {
    let canonical = normalize_whitespace(canonical);
    if canonical.is_empty() || normalize_whitespace(typed) == canonical {
        None
    } else {
        Some(canonical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  John   3:16 "), "John 3:16");
        assert_eq!(normalize_whitespace(""), "");
    }

    #[test]
    fn test_no_suggestion_when_equal() {
        assert_eq!(suggestion_for("John 3:16", "John 3:16"), None);
        assert_eq!(suggestion_for(" John  3:16", "John 3:16"), None);
    }

    #[test]
    fn test_suggestion_when_different() {
        assert_eq!(
            suggestion_for("jn 3:16", "John 3:16"),
            Some("John 3:16".to_string())
        );
        assert_eq!(
            suggestion_for("john 3:16", "John 3:16"),
            Some("John 3:16".to_string())
        );
    }

    #[test]
    fn test_no_suggestion_for_empty_canonical() {
        assert_eq!(suggestion_for("xyz", "  "), None);
    }
}
