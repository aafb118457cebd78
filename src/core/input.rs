use fancy_regex::Regex;
use std::sync::LazyLock;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("email pattern is a valid regex")
});

/// Check the basic `local@domain.tld` shape the service expects
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email).unwrap_or(false)
}

/// Split a comma-separated flag value into trimmed, non-empty items
///
/// `"a, b ,c"` becomes `["a", "b", "c"]`. Returns `None` when nothing is left,
/// so the field is omitted from the payload.
pub fn parse_list(raw: Option<&str>) -> Option<Vec<String>> {
    let items: Vec<String> = raw?
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect();

    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

/// Drop empty or whitespace-only text values
pub fn non_empty(raw: Option<String>) -> Option<String> {
    raw.filter(|value| !value.trim().is_empty())
}

/// Parse a boolean flag value (`true/1/yes/y/on`, `false/0/no/n/off`)
pub fn parse_bool(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "on" => Ok(true),
        "false" | "0" | "no" | "n" | "off" => Ok(false),
        other => Err(format!("expected true or false, got '{}'", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("jane@example.com"));
        assert!(is_valid_email("first.last+tag@sub.example.co"));
        assert!(is_valid_email("a_b%c-d@host-name.io"));
    }

    #[test]
    fn test_invalid_emails() {
        for email in [
            "",
            "plainaddress",
            "@example.com",
            "user@",
            "user@localhost",
            "user@example.c",
            "user name@example.com",
            "user@exa mple.com",
            "user@example.123",
        ] {
            assert!(!is_valid_email(email), "{} should be rejected", email);
        }
    }

    #[test]
    fn test_parse_list_trims_and_keeps_order() {
        assert_eq!(
            parse_list(Some(" a, b ,c ")),
            Some(vec!["a".to_string(), "b".to_string(), "c".to_string()])
        );
        assert_eq!(
            parse_list(Some("Machine Learning,NLP")),
            Some(vec!["Machine Learning".to_string(), "NLP".to_string()])
        );
    }

    #[test]
    fn test_parse_list_drops_empty_items() {
        assert_eq!(parse_list(Some("a,,b,")), Some(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(parse_list(Some(" , ")), None);
        assert_eq!(parse_list(Some("")), None);
        assert_eq!(parse_list(None), None);
    }

    #[test]
    fn test_parse_bool() {
        for raw in ["true", "TRUE", "1", "yes", "Y", "on"] {
            assert_eq!(parse_bool(raw), Ok(true), "{}", raw);
        }
        for raw in ["false", "0", "No", "n", "off"] {
            assert_eq!(parse_bool(raw), Ok(false), "{}", raw);
        }
        assert!(parse_bool("maybe").is_err());
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some("  ".to_string())), None);
        assert_eq!(non_empty(Some("bio".to_string())), Some("bio".to_string()));
    }
}
