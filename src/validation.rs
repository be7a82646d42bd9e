use once_cell::sync::Lazy;
use regex::Regex;

/// Whether `email` looks like an address the videoconferencing platform
/// will accept in a pre-assignment file. Comparison is case-insensitive.
pub fn is_valid_email(email: &str) -> bool {
    static RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(concat!(
            r"^[a-z0-9!#$%&'*+/=?^_`{|}~.-]+@",
            r"(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+",
            r"[a-z0-9](?:[a-z0-9-]*[a-z0-9])?$",
        ))
        .expect("valid regex")
    });
    RE.is_match(&email.to_lowercase())
}

/// Whether a pre-assignment field can be written as a single CSV cell the
/// importer will read back unchanged.
pub fn is_single_line(field: &str) -> bool {
    !field.contains(['\n', '\r'])
}

#[cfg(test)]
#[test]
fn test_email() {
    assert!(is_valid_email("hello@example.com"));
    assert!(is_valid_email("J.Doe+iv@Example.co.uk"));
    assert!(!is_valid_email("hello"));
    assert!(!is_valid_email("a,b@example.com"));
    assert!(!is_valid_email(""));
}

#[cfg(test)]
#[test]
fn test_single_line() {
    assert!(is_single_line("Debate Room 3, Upper"));
    assert!(!is_single_line("Debate\nRoom"));
}
