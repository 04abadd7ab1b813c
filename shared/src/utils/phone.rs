//! Phone number utilities
//!
//! Numbers are treated as opaque E.164 strings. The only normalization
//! applied anywhere is prepending the `+` prefix when it is missing; there
//! is deliberately no format validation.

/// Normalize a phone number to E.164 shape by ensuring a `+` prefix
pub fn normalize_phone_number(phone: &str) -> String {
    let trimmed = phone.trim();
    if trimmed.is_empty() || trimmed.starts_with('+') {
        trimmed.to_string()
    } else {
        format!("+{trimmed}")
    }
}

/// Mask a phone number for logs (e.g., +15****4567)
pub fn mask_phone_number(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    if chars.len() >= 7 {
        let head: String = chars[..3].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}****{tail}")
    } else {
        "****".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_adds_missing_prefix() {
        assert_eq!(normalize_phone_number("15551234567"), "+15551234567");
        assert_eq!(normalize_phone_number("  15551234567  "), "+15551234567");
    }

    #[test]
    fn test_normalize_keeps_existing_prefix() {
        assert_eq!(normalize_phone_number("+15551234567"), "+15551234567");
        assert_eq!(normalize_phone_number(" +1555 "), "+1555");
    }

    #[test]
    fn test_normalize_leaves_empty_alone() {
        assert_eq!(normalize_phone_number(""), "");
        assert_eq!(normalize_phone_number("   "), "");
    }

    #[test]
    fn test_mask_phone_number() {
        assert_eq!(mask_phone_number("+15551234567"), "+15****4567");
        assert_eq!(mask_phone_number("15551234567"), "155****4567");
        assert_eq!(mask_phone_number("+1555"), "****");
        assert_eq!(mask_phone_number(""), "****");
    }
}
