//! Field-format validators for party and account input.
//!
//! Each predicate is total over arbitrary input and has no side effects.
//! Callers re-prompt on false rather than aborting.

/// Exactly 10 decimal digits.
pub fn phone_is_valid(s: &str) -> bool {
    s.len() == 10 && s.bytes().all(|b| b.is_ascii_digit())
}

/// Exactly 12 decimal digits.
pub fn national_id_is_valid(s: &str) -> bool {
    s.len() == 12 && s.bytes().all(|b| b.is_ascii_digit())
}

/// 5 uppercase letters, 4 digits, 1 uppercase letter. Case-sensitive.
pub fn tax_id_is_valid(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 10
        && b[..5].iter().all(|c| c.is_ascii_uppercase())
        && b[5..9].iter().all(|c| c.is_ascii_digit())
        && b[9].is_ascii_uppercase()
}

/// One `@` with a non-empty local part, and a `.` in the domain with at
/// least one character on each side. Intentionally loose; not RFC 5322.
pub fn email_is_valid(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // A dot that is neither the first nor the last character of the domain.
    let d = domain.as_bytes();
    d.len() >= 3 && d[1..d.len() - 1].contains(&b'.')
}

/// 11 characters: 4 uppercase letters, a literal `0`, then 6 uppercase
/// alphanumerics.
pub fn routing_code_is_valid(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 11
        && b[..4].iter().all(|c| c.is_ascii_uppercase())
        && b[4] == b'0'
        && b[5..]
            .iter()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}
