//! Loan tests: recipient resolution by tax id, asset references, and
//! field-selective updates.

use ledger_core::{
    asset::{AssetDraft, AssetMode, AssetType, SizeUnit},
    error::LedgerError,
    ledger::Ledger,
    loan::{InterestFrequency, LoanDraft, LoanUpdate},
    party::{PartyDraft, PartyKind},
};

fn ledger_with_borrower(name: &str, tax_id: &str) -> Ledger {
    let mut ledger = Ledger::in_memory().expect("in-memory ledger");
    ledger
        .create_party(PartyDraft {
            kind: PartyKind::Borrower,
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
        })
        .unwrap();
    ledger
}

fn loan_draft(tax_id: &str) -> LoanDraft {
    LoanDraft {
        name: "House loan".into(),
        recipient_tax_id: tax_id.into(),
        principal: 10_000.0,
        interest_rate: 12.0,
        interest_frequency: InterestFrequency::Monthly,
        interest_expected: Some(1_200.0),
        interest_realized: None,
        interest_paid_up: None,
        state: "Active".into(),
        asset_id: None,
    }
}

/// The recipient stored on the loan is the borrower's name, found by
/// tax-id lookup at creation time.
#[test]
fn recipient_resolves_from_borrower_tax_id() {
    let mut ledger = ledger_with_borrower("Ravi Kumar", "ABCDE1234F");
    let loan = ledger.create_loan(loan_draft("ABCDE1234F")).unwrap();
    assert_eq!(loan.recipient, "Ravi Kumar");
    assert_eq!(loan.principal, 10_000.0);
    assert_eq!(loan.expenses, 0.0);
    assert_eq!(loan.interest_expected, Some(1_200.0));
}

#[test]
fn unknown_recipient_tax_id_is_rejected() {
    let mut ledger = ledger_with_borrower("Ravi Kumar", "ABCDE1234F");
    let err = ledger.create_loan(loan_draft("ZZZZZ9999Z")).unwrap_err();
    assert!(matches!(err, LedgerError::UnknownRecipient { .. }));
    assert!(err.is_recoverable());
    assert!(ledger.list_loans().unwrap().is_empty());
}

/// Only borrowers qualify as recipients; an investor with the same tax
/// id shape is not a match.
#[test]
fn recipient_lookup_only_matches_borrowers() {
    let mut ledger = Ledger::in_memory().unwrap();
    ledger
        .create_party(PartyDraft {
            kind: PartyKind::Investor,
            name: "Meena".into(),
            phone: "9876543210".into(),
            email: "meena@example.com".into(),
            address: "12 Hill Street".into(),
            tax_id: "ABCDE1234F".into(),
            national_id: "123412341234".into(),
            heir_name: None,
            heir_tax_id: None,
            firm: None,
            link_accounts: vec![],
        })
        .unwrap();
    let err = ledger.create_loan(loan_draft("ABCDE1234F")).unwrap_err();
    assert!(matches!(err, LedgerError::UnknownRecipient { .. }));
}

#[test]
fn loan_may_reference_an_existing_asset() {
    let mut ledger = ledger_with_borrower("Ravi", "ABCDE1234F");
    let asset = ledger
        .create_asset(AssetDraft {
            asset_type: AssetType::Land,
            asset_mode: AssetMode::CollateralMortgage,
            holder_name: "Ravi".into(),
            deed_id: "DEED-7".into(),
            size: 2.5,
            units: SizeUnit::Acres,
        })
        .unwrap();

    let mut draft = loan_draft("ABCDE1234F");
    draft.asset_id = Some(asset.asset_id);
    let loan = ledger.create_loan(draft).unwrap();
    assert_eq!(loan.asset_id, Some(asset.asset_id));
}

#[test]
fn loan_with_unknown_asset_is_rejected() {
    let mut ledger = ledger_with_borrower("Ravi", "ABCDE1234F");
    let mut draft = loan_draft("ABCDE1234F");
    draft.asset_id = Some(777);
    let err = ledger.create_loan(draft).unwrap_err();
    assert!(matches!(
        err,
        LedgerError::NotFound { entity: "asset", .. }
    ));
    assert!(ledger.list_loans().unwrap().is_empty());
}

/// Unset fields keep their stored values; interest fields can be filled
/// in later.
#[test]
fn loan_update_is_field_selective() {
    let mut ledger = ledger_with_borrower("Ravi", "ABCDE1234F");
    let loan = ledger.create_loan(loan_draft("ABCDE1234F")).unwrap();

    let update = LoanUpdate {
        state: Some("Closed".into()),
        interest_realized: Some(600.0),
        ..LoanUpdate::default()
    };
    let after = ledger.update_loan(loan.loan_id, update).unwrap();
    assert_eq!(after.state, "Closed");
    assert_eq!(after.interest_realized, Some(600.0));
    assert_eq!(after.principal, 10_000.0);
    assert_eq!(after.recipient, "Ravi");
    assert_eq!(after.interest_frequency, InterestFrequency::Monthly);
}

#[test]
fn updating_a_missing_loan_is_not_found() {
    let mut ledger = ledger_with_borrower("Ravi", "ABCDE1234F");
    let err = ledger
        .update_loan(
            41,
            LoanUpdate {
                state: Some("Closed".into()),
                ..LoanUpdate::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, LedgerError::NotFound { entity: "loan", .. }));
}
