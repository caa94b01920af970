//! Small shared utilities

/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a reservation receipt identifier.
///
/// Format: `REC-{YYYYMMDD}-{HHMMSS}-{6 uppercase alphanumeric}` where the
/// date/time components are the generation instant (local time), not the
/// event date. Uniqueness is best-effort: second granularity plus a random
/// suffix over a 36-character alphabet (36^6 ≈ 2.2 billion values).
pub fn receipt_id() -> String {
    use rand::Rng;
    const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    let now = chrono::Local::now();
    let mut rng = rand::thread_rng();
    let suffix: String = (0..6)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    format!(
        "REC-{}-{}-{}",
        now.format("%Y%m%d"),
        now.format("%H%M%S"),
        suffix
    )
}

/// Check whether a string looks like a deliverable email address.
///
/// Intentionally small: exactly one `@`, non-empty local part, a domain
/// with at least one dot and no empty labels, no whitespace anywhere.
pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    domain.contains('.') && domain.split('.').all(|label| !label.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_receipt_id_shape() {
        let id = receipt_id();
        let parts: Vec<&str> = id.split('-').collect();
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0], "REC");
        assert_eq!(parts[1].len(), 8);
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[2].len(), 6);
        assert!(parts[2].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[3].len(), 6);
        assert!(
            parts[3]
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        );
    }

    #[test]
    fn test_receipt_id_uniqueness() {
        let ids: HashSet<String> = (0..200).map(|_| receipt_id()).collect();
        assert_eq!(ids.len(), 200);
    }

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last@domain.co"));
        assert!(is_valid_email("name+tag@sub.domain.io"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("plainaddress"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("@domain.com"));
        assert!(!is_valid_email("user@domain"));
        assert!(!is_valid_email("user domain@example.com"));
        assert!(!is_valid_email("user@domain..com"));
    }
}
