//! Party record tests: kind-specific fields and field-selective updates.

use chrono::NaiveDate;
use ledger_core::{
    error::LedgerError,
    ledger::Ledger,
    party::{FirmDetails, PartyDraft, PartyKind, PartyUpdate},
};

fn ledger() -> Ledger {
    Ledger::in_memory().expect("in-memory ledger")
}

fn draft(kind: PartyKind, name: &str, tax_id: &str) -> PartyDraft {
    PartyDraft {
        kind,
        name: name.into(),
        phone: "9876543210".into(),
        email: "someone@example.com".into(),
        address: "12 Hill Street".into(),
        tax_id: tax_id.into(),
        national_id: "123412341234".into(),
        heir_name: None,
        heir_tax_id: None,
        firm: None,
        link_accounts: vec![],
    }
}

#[test]
fn investor_heir_roundtrips() {
    let mut ledger = ledger();
    let mut investor = draft(PartyKind::Investor, "Meena", "FGHIJ5678K");
    investor.heir_name = Some("Anil".into());
    investor.heir_tax_id = Some("PQRST3456U".into());
    let (record, _) = ledger.create_party(investor).unwrap();

    let fetched = ledger
        .get_party(PartyKind::Investor, record.party_id)
        .unwrap();
    assert_eq!(fetched.heir_name.as_deref(), Some("Anil"));
    assert_eq!(fetched.heir_tax_id.as_deref(), Some("PQRST3456U"));
}

#[test]
fn heir_fields_are_investor_only() {
    let mut ledger = ledger();
    let mut partner = draft(PartyKind::Partner, "Suresh", "FGHIJ5678K");
    partner.heir_name = Some("Anil".into());
    let err = ledger.create_party(partner).unwrap_err();
    assert!(matches!(
        err,
        LedgerError::Validation {
            field: "legal heir",
            ..
        }
    ));
}

#[test]
fn malformed_heir_tax_id_is_rejected() {
    let mut ledger = ledger();
    let mut investor = draft(PartyKind::Investor, "Meena", "FGHIJ5678K");
    investor.heir_tax_id = Some("pqrst3456u".into());
    let err = ledger.create_party(investor).unwrap_err();
    assert!(matches!(
        err,
        LedgerError::Validation {
            field: "heir tax id",
            ..
        }
    ));
}

#[test]
fn firm_details_roundtrip() {
    let mut ledger = ledger();
    let mut firm = draft(PartyKind::Firm, "Sharma Traders", "LMNOP9012Q");
    firm.firm = Some(FirmDetails {
        registered_date: NaiveDate::from_ymd_opt(2019, 6, 1).unwrap(),
        members: 3,
        percent_owned: 40.0,
        state: "Active".into(),
    });
    let (record, _) = ledger.create_party(firm).unwrap();

    let fetched = ledger.get_party(PartyKind::Firm, record.party_id).unwrap();
    let details = fetched.firm.expect("firm details");
    assert_eq!(
        details.registered_date,
        NaiveDate::from_ymd_opt(2019, 6, 1).unwrap()
    );
    assert_eq!(details.members, 3);
    assert_eq!(details.percent_owned, 40.0);
    assert_eq!(details.state, "Active");
}

#[test]
fn firm_without_details_is_rejected() {
    let mut ledger = ledger();
    let err = ledger
        .create_party(draft(PartyKind::Firm, "Sharma Traders", "LMNOP9012Q"))
        .unwrap_err();
    assert!(matches!(
        err,
        LedgerError::Validation {
            field: "firm details",
            ..
        }
    ));
}

#[test]
fn firm_details_on_an_individual_are_rejected() {
    let mut ledger = ledger();
    let mut borrower = draft(PartyKind::Borrower, "Ravi", "ABCDE1234F");
    borrower.firm = Some(FirmDetails {
        registered_date: NaiveDate::from_ymd_opt(2019, 6, 1).unwrap(),
        members: 3,
        percent_owned: 40.0,
        state: "Active".into(),
    });
    let err = ledger.create_party(borrower).unwrap_err();
    assert!(matches!(
        err,
        LedgerError::Validation {
            field: "firm details",
            ..
        }
    ));
}

/// Chosen fields change; everything else, including kind, stays.
#[test]
fn party_update_is_field_selective() {
    let mut ledger = ledger();
    let (record, _) = ledger
        .create_party(draft(PartyKind::Facilitator, "Suresh", "FGHIJ5678K"))
        .unwrap();

    let update = PartyUpdate {
        phone: Some("9123456780".into()),
        address: Some("44 Lake View".into()),
        ..PartyUpdate::default()
    };
    let (after, _) = ledger
        .update_party(PartyKind::Facilitator, record.party_id, update)
        .unwrap();
    assert_eq!(after.phone, "9123456780");
    assert_eq!(after.address, "44 Lake View");
    assert_eq!(after.name, "Suresh");
    assert_eq!(after.tax_id, "FGHIJ5678K");
    assert_eq!(after.kind, PartyKind::Facilitator);
}

/// An invalid value in an update is rejected and leaves the stored
/// record untouched.
#[test]
fn invalid_update_leaves_record_unchanged() {
    let mut ledger = ledger();
    let (record, _) = ledger
        .create_party(draft(PartyKind::Partner, "Suresh", "FGHIJ5678K"))
        .unwrap();

    let update = PartyUpdate {
        phone: Some("bad".into()),
        ..PartyUpdate::default()
    };
    let err = ledger
        .update_party(PartyKind::Partner, record.party_id, update)
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation { .. }));

    let fetched = ledger.get_party(PartyKind::Partner, record.party_id).unwrap();
    assert_eq!(fetched.phone, "9876543210");
}

#[test]
fn firm_scalar_update_merges_into_details() {
    let mut ledger = ledger();
    let mut firm = draft(PartyKind::Firm, "Sharma Traders", "LMNOP9012Q");
    firm.firm = Some(FirmDetails {
        registered_date: NaiveDate::from_ymd_opt(2019, 6, 1).unwrap(),
        members: 3,
        percent_owned: 40.0,
        state: "Active".into(),
    });
    let (record, _) = ledger.create_party(firm).unwrap();

    let update = PartyUpdate {
        members: Some(5),
        firm_state: Some("Inactive".into()),
        ..PartyUpdate::default()
    };
    let (after, _) = ledger
        .update_party(PartyKind::Firm, record.party_id, update)
        .unwrap();
    let details = after.firm.expect("firm details");
    assert_eq!(details.members, 5);
    assert_eq!(details.state, "Inactive");
    assert_eq!(details.percent_owned, 40.0);
}

#[test]
fn listing_is_scoped_by_kind() {
    let mut ledger = ledger();
    ledger
        .create_party(draft(PartyKind::Borrower, "Ravi", "ABCDE1234F"))
        .unwrap();
    ledger
        .create_party(draft(PartyKind::Investor, "Meena", "FGHIJ5678K"))
        .unwrap();

    assert_eq!(ledger.list_parties(PartyKind::Borrower).unwrap().len(), 1);
    assert_eq!(ledger.list_parties(PartyKind::Investor).unwrap().len(), 1);
    assert!(ledger.list_parties(PartyKind::Firm).unwrap().is_empty());
}
