// ============================================================================
// Log Sanitization - keeps visitor-supplied text out of log structure
// ============================================================================
//
// Booking and contact forms are public, so names, locations and messages are
// attacker-controlled. Anything from a form goes through `sanitize_for_log`
// before it reaches a tracing macro:
//
// - newlines / carriage returns are flattened (no forged log lines)
// - ANSI escape sequences and other control characters are dropped
// - values are truncated to MAX_LOG_LENGTH characters
//
// Phone numbers are customer PII and are only ever logged masked.
//
// ============================================================================

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum number of characters of user input kept in a log line
const MAX_LOG_LENGTH: usize = 200;

static ANSI_ESCAPE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\x1b\[[0-9;]*[a-zA-Z]").expect("ANSI escape pattern is valid")
});

/// Sanitize user input for safe logging
///
/// # Examples:
/// ```
/// use zoi_rentals::utils::log_sanitizer::sanitize_for_log;
///
/// assert_eq!(
///     sanitize_for_log("Rahul\nINFO: Fake log entry"),
///     "Rahul INFO: Fake log entry"
/// );
/// assert_eq!(sanitize_for_log("test\x1b[31mred\x1b[0m"), "testred");
/// ```
pub fn sanitize_for_log(input: &str) -> String {
    let no_ansi = ANSI_ESCAPE_REGEX.replace_all(input, "");

    let flattened = no_ansi
        .replace('\n', " ")
        .replace('\r', " ")
        .replace('\t', " ");

    let printable: String = flattened
        .chars()
        .filter(|c| {
            let code = *c as u32;
            code >= 0x20 && code != 0x7F
        })
        .collect();

    // Truncate on a char boundary; multi-byte names are common in form input.
    if printable.chars().count() > MAX_LOG_LENGTH {
        let truncated: String = printable.chars().take(MAX_LOG_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        printable
    }
}

/// Sanitize an optional string for logging
pub fn sanitize_option_for_log(input: &Option<String>) -> String {
    match input {
        Some(value) => sanitize_for_log(value),
        None => "None".to_string(),
    }
}

/// Mask a phone number, keeping only the last three digits
///
/// ```
/// use zoi_rentals::utils::log_sanitizer::mask_phone;
///
/// assert_eq!(mask_phone("+91 98765 43210"), "***210");
/// ```
pub fn mask_phone(phone: &str) -> String {
    let digits: Vec<char> = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() <= 3 {
        return "***".to_string();
    }
    let tail: String = digits[digits.len() - 3..].iter().collect();
    format!("***{}", tail)
}

/// Redact secrets entirely, keeping only their length
pub fn redact_sensitive(input: &str) -> String {
    format!("[REDACTED-{}]", input.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_removes_newlines() {
        let input = "Anita\nINFO: Fake log entry";
        let result = sanitize_for_log(input);
        assert!(!result.contains('\n'));
        assert_eq!(result, "Anita INFO: Fake log entry");
    }

    #[test]
    fn test_sanitize_removes_ansi_escapes() {
        let result = sanitize_for_log("test\x1b[31mred text\x1b[0m");
        assert_eq!(result, "testred text");
    }

    #[test]
    fn test_sanitize_removes_control_chars() {
        assert_eq!(sanitize_for_log("test\x00\x01\x02data"), "testdata");
    }

    #[test]
    fn test_sanitize_truncates_long_strings() {
        let result = sanitize_for_log(&"a".repeat(300));
        assert_eq!(result.chars().count(), MAX_LOG_LENGTH + 3);
        assert!(result.ends_with("..."));
    }

    #[test]
    fn test_sanitize_truncates_multibyte_without_panicking() {
        let input = "गोवा".repeat(100);
        let result = sanitize_for_log(&input);
        assert!(result.ends_with("..."));
        assert!(result.starts_with("गोवा"));
    }

    #[test]
    fn test_sanitize_option() {
        assert_eq!(sanitize_option_for_log(&Some("Baga".to_string())), "Baga");
        assert_eq!(sanitize_option_for_log(&None), "None");
    }

    #[test]
    fn test_mask_phone() {
        assert_eq!(mask_phone("9876543210"), "***210");
        assert_eq!(mask_phone("+91-98765-43210"), "***210");
        assert_eq!(mask_phone("12"), "***");
    }

    #[test]
    fn test_redact_sensitive() {
        let result = redact_sensitive("service-role-key");
        assert!(!result.contains("service"));
        assert_eq!(result, "[REDACTED-16]");
    }
}
