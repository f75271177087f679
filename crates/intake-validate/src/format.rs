//! Format helpers for email and phone values.

/// Standard single-`@` address shape with a dotted domain.
pub fn is_valid_email(value: &str) -> bool {
    let trimmed = value.trim();
    let mut parts = trimmed.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    if trimmed.chars().any(char::is_whitespace) {
        return false;
    }
    // Domain needs a dot with text on both sides
    let Some(dot) = domain.rfind('.') else {
        return false;
    };
    dot > 0 && dot < domain.len() - 1
}

/// Digits with an optional leading `+` and common separators, total length
/// 10 to 20 characters.
pub fn is_valid_phone(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.len() < 10 || trimmed.len() > 20 {
        return false;
    }
    let rest = trimmed.strip_prefix('+').unwrap_or(trimmed);
    if !rest.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }
    rest.chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("jane@x.com"));
        assert!(is_valid_email("jane.doe+tag@mail.example.org"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email("jane"));
        assert!(!is_valid_email("jane@"));
        assert!(!is_valid_email("@x.com"));
        assert!(!is_valid_email("jane@nodot"));
        assert!(!is_valid_email("jane@x."));
        assert!(!is_valid_email("jane@.com"));
        assert!(!is_valid_email("a@b@c.com"));
        assert!(!is_valid_email("jane doe@x.com"));
    }

    #[test]
    fn accepts_common_phone_shapes() {
        assert!(is_valid_phone("+1-555-010-9999"));
        assert!(is_valid_phone("(020) 7946 0958"));
        assert!(is_valid_phone("00441632960961"));
    }

    #[test]
    fn rejects_bad_phone_shapes() {
        assert!(!is_valid_phone("555-0199")); // too short
        assert!(!is_valid_phone("+1-555-010-9999-010-9999-99")); // too long
        assert!(!is_valid_phone("call me maybe")); // letters
        assert!(!is_valid_phone("----------")); // no digits
    }
}
