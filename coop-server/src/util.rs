//! Password hashing and member-id helpers

use shared::models::roles;

pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    use argon2::password_hash::SaltString;
    use argon2::password_hash::rand_core::OsRng;
    use argon2::{Argon2, PasswordHasher};
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    use argon2::{Argon2, PasswordHash, PasswordVerifier};
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Member ids are typed with spaces or dashes (`1-234 567`); stored without.
pub fn normalize_id(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect()
}

/// Default role suggested by the first digit of a member id.
pub fn detect_role_from_id(id: &str) -> &'static str {
    match id.chars().next() {
        Some('1' | '2' | '6') => roles::CUSTOMER,
        Some('3') => roles::SUPPORT,
        Some('4') => roles::WORKER,
        Some('5') => roles::MARKETING,
        Some('9') => roles::ADMIN,
        _ => roles::NONE,
    }
}

/// Trimmed, lower-cased email; empty input is `None`.
pub fn normalize_email(raw: Option<&str>) -> Option<String> {
    raw.map(|e| e.trim().to_lowercase()).filter(|e| !e.is_empty())
}

/// Trimmed phone; empty input is `None`.
pub fn normalize_phone(raw: Option<&str>) -> Option<String> {
    raw.map(|p| p.trim().to_string()).filter(|p| !p.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_roundtrip() {
        let hash = hash_password("correct horse").unwrap();
        assert!(verify_password("correct horse", &hash));
        assert!(!verify_password("wrong horse", &hash));
        assert!(!verify_password("correct horse", "not-a-phc-string"));
    }

    #[test]
    fn test_normalize_id() {
        assert_eq!(normalize_id(" 1-234 567 "), "1234567");
        assert_eq!(normalize_id("9001"), "9001");
    }

    #[test]
    fn test_detect_role_from_id() {
        assert_eq!(detect_role_from_id("1001"), roles::CUSTOMER);
        assert_eq!(detect_role_from_id("6001"), roles::CUSTOMER);
        assert_eq!(detect_role_from_id("3001"), roles::SUPPORT);
        assert_eq!(detect_role_from_id("4001"), roles::WORKER);
        assert_eq!(detect_role_from_id("5001"), roles::MARKETING);
        assert_eq!(detect_role_from_id("9001"), roles::ADMIN);
        assert_eq!(detect_role_from_id("7001"), roles::NONE);
        assert_eq!(detect_role_from_id(""), roles::NONE);
    }

    #[test]
    fn test_normalize_contact() {
        assert_eq!(
            normalize_email(Some("  Ana@Example.COM ")).as_deref(),
            Some("ana@example.com")
        );
        assert_eq!(normalize_email(Some("   ")), None);
        assert_eq!(normalize_phone(Some(" 555-1234 ")).as_deref(), Some("555-1234"));
        assert_eq!(normalize_phone(None), None);
    }
}
