//! Field-format validator tests.

use ledger_core::validate::{
    email_is_valid, national_id_is_valid, phone_is_valid, routing_code_is_valid, tax_id_is_valid,
};

#[test]
fn phone_accepts_exactly_ten_digits() {
    assert!(phone_is_valid("9876543210"));
    assert!(!phone_is_valid("987654321"), "nine digits");
    assert!(!phone_is_valid("98765432100"), "eleven digits");
    assert!(!phone_is_valid("98765o4321"), "letter in the middle");
    assert!(!phone_is_valid(""), "empty");
    assert!(!phone_is_valid("98765 4321"), "embedded space");
}

#[test]
fn national_id_accepts_exactly_twelve_digits() {
    assert!(national_id_is_valid("123412341234"));
    assert!(!national_id_is_valid("12341234123"));
    assert!(!national_id_is_valid("1234123412345"));
    assert!(!national_id_is_valid("12341234123x"));
}

/// Case-sensitive: lowercase letters never pass.
#[test]
fn tax_id_shape_is_exact() {
    assert!(tax_id_is_valid("ABCDE1234F"));
    assert!(!tax_id_is_valid("abcde1234f"), "lowercase");
    assert!(!tax_id_is_valid("ABCD1234FF"), "wrong shape");
    assert!(!tax_id_is_valid("ABCDE1234"), "too short");
    assert!(!tax_id_is_valid("ABCDE12345F"), "too long");
    assert!(!tax_id_is_valid("ABCDE12345"), "digit where letter expected");
}

#[test]
fn email_is_loose_but_not_anything() {
    assert!(email_is_valid("someone@example.com"));
    assert!(email_is_valid("a@b.c"));
    assert!(email_is_valid("first.last@sub.example.co"));
    assert!(!email_is_valid("no-at-sign.example.com"));
    assert!(!email_is_valid("@example.com"), "empty local part");
    assert!(!email_is_valid("someone@example"), "no dot in domain");
    assert!(!email_is_valid("someone@.com"), "dot leads the domain");
    assert!(!email_is_valid("someone@com."), "dot ends the domain");
    assert!(!email_is_valid("two@at@example.com"), "second @");
}

/// Total over arbitrary input, including multi-byte text.
#[test]
fn email_handles_non_ascii_input() {
    assert!(!email_is_valid("é@é"));
    assert!(email_is_valid("é@aé.bç"));
}

#[test]
fn routing_code_shape_is_exact() {
    assert!(routing_code_is_valid("SBIN0001234"));
    assert!(routing_code_is_valid("HDFC0AB12Z9"));
    assert!(!routing_code_is_valid("SBIN1001234"), "fifth char must be 0");
    assert!(!routing_code_is_valid("SBI00012345"), "digit in bank prefix");
    assert!(!routing_code_is_valid("sbin0001234"), "lowercase");
    assert!(!routing_code_is_valid("SBIN000123"), "ten chars");
    assert!(!routing_code_is_valid("SBIN00012345"), "twelve chars");
}
