//! Command dispatch tests: every operation is reachable through
//! `Ledger::execute`, independent of any input mechanism.

use ledger_core::{
    account::{AccountDraft, AccountType, AccountUpdate},
    asset::{AssetDraft, AssetMode, AssetType, SizeUnit},
    command::{CommandOutcome, LedgerCommand},
    error::LedgerError,
    ledger::Ledger,
    party::{PartyDraft, PartyKind},
};

fn ledger() -> Ledger {
    Ledger::in_memory().expect("in-memory ledger")
}

fn account_draft(holder: &str) -> AccountDraft {
    AccountDraft {
        holder_name: holder.into(),
        bank_name: "State Bank".into(),
        routing_code: "SBIN0001234".into(),
        number: "100200300".into(),
        branch: "Market Road".into(),
        account_type: AccountType::Current,
    }
}

fn borrower_draft(name: &str) -> PartyDraft {
    PartyDraft {
        kind: PartyKind::Borrower,
        name: name.into(),
        phone: "9876543210".into(),
        email: "someone@example.com".into(),
        address: "12 Hill Street".into(),
        tax_id: "ABCDE1234F".into(),
        national_id: "123412341234".into(),
        heir_name: None,
        heir_tax_id: None,
        firm: None,
        link_accounts: vec![],
    }
}

#[test]
fn create_then_get_account_through_dispatch() {
    let mut ledger = ledger();
    let created = ledger
        .execute(LedgerCommand::CreateAccount {
            draft: account_draft("Ravi"),
        })
        .unwrap();
    let CommandOutcome::Account(account) = created else {
        panic!("expected an account outcome");
    };

    let fetched = ledger
        .execute(LedgerCommand::GetAccount {
            account_id: account.account_id,
        })
        .unwrap();
    let CommandOutcome::Account(fetched) = fetched else {
        panic!("expected an account outcome");
    };
    assert_eq!(fetched.holder_name, "Ravi");
    assert_eq!(fetched.account_type, AccountType::Current);
    assert!(fetched.owner_party_id.is_none());
}

#[test]
fn search_accounts_matches_holder_substring() {
    let mut ledger = ledger();
    for holder in ["Ravi Kumar", "Meena Ravi", "Suresh"] {
        ledger.create_account(account_draft(holder)).unwrap();
    }
    let outcome = ledger
        .execute(LedgerCommand::SearchAccounts {
            holder_name: "Ravi".into(),
        })
        .unwrap();
    let CommandOutcome::Accounts(matches) = outcome else {
        panic!("expected accounts");
    };
    assert_eq!(matches.len(), 2);
}

/// Unset fields keep their stored values.
#[test]
fn account_update_is_field_selective() {
    let mut ledger = ledger();
    let account = ledger.create_account(account_draft("Ravi")).unwrap();

    let update = AccountUpdate {
        branch: Some("River Road".into()),
        ..AccountUpdate::default()
    };
    let after = ledger.update_account(account.account_id, update).unwrap();
    assert_eq!(after.branch, "River Road");
    assert_eq!(after.holder_name, "Ravi");
    assert_eq!(after.routing_code, "SBIN0001234");
}

#[test]
fn malformed_routing_code_is_a_recoverable_rejection() {
    let mut ledger = ledger();
    let mut draft = account_draft("Ravi");
    draft.routing_code = "sbin0001234".into();
    let err = ledger
        .execute(LedgerCommand::CreateAccount { draft })
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation { .. }));
    assert!(err.is_recoverable());
    assert!(ledger.list_accounts().unwrap().is_empty());
}

#[test]
fn malformed_party_fields_are_rejected_before_storage() {
    let mut ledger = ledger();

    let mut bad_phone = borrower_draft("Ravi");
    bad_phone.phone = "12345".into();
    assert!(matches!(
        ledger.create_party(bad_phone).unwrap_err(),
        LedgerError::Validation { field: "phone", .. }
    ));

    let mut bad_email = borrower_draft("Ravi");
    bad_email.email = "ravi-at-example.com".into();
    assert!(matches!(
        ledger.create_party(bad_email).unwrap_err(),
        LedgerError::Validation { field: "email", .. }
    ));

    let mut bad_tax = borrower_draft("Ravi");
    bad_tax.tax_id = "abcde1234f".into();
    assert!(matches!(
        ledger.create_party(bad_tax).unwrap_err(),
        LedgerError::Validation { field: "tax id", .. }
    ));

    assert!(ledger.list_parties(PartyKind::Borrower).unwrap().is_empty());
}

/// Each kind's submenu only sees its own records: fetching a borrower
/// id through the investor view is a not-found, not a leak.
#[test]
fn get_party_is_scoped_by_kind() {
    let mut ledger = ledger();
    let (borrower, _) = ledger.create_party(borrower_draft("Ravi")).unwrap();

    let err = ledger
        .execute(LedgerCommand::GetParty {
            kind: PartyKind::Investor,
            party_id: borrower.party_id,
        })
        .unwrap_err();
    assert!(matches!(err, LedgerError::NotFound { .. }));

    let ok = ledger
        .execute(LedgerCommand::GetParty {
            kind: PartyKind::Borrower,
            party_id: borrower.party_id,
        })
        .unwrap();
    assert!(matches!(ok, CommandOutcome::Party(_)));
}

#[test]
fn asset_roundtrip_and_size_guard() {
    let mut ledger = ledger();
    let outcome = ledger
        .execute(LedgerCommand::CreateAsset {
            draft: AssetDraft {
                asset_type: AssetType::Plot,
                asset_mode: AssetMode::CollateralRegistered,
                holder_name: "Ravi".into(),
                deed_id: "DEED-41".into(),
                size: 240.0,
                units: SizeUnit::SqYards,
            },
        })
        .unwrap();
    let CommandOutcome::Asset(asset) = outcome else {
        panic!("expected an asset");
    };
    assert_eq!(asset.units, SizeUnit::SqYards);

    let err = ledger
        .execute(LedgerCommand::CreateAsset {
            draft: AssetDraft {
                asset_type: AssetType::Land,
                asset_mode: AssetMode::SelfOwned,
                holder_name: "Ravi".into(),
                deed_id: "DEED-42".into(),
                size: 0.0,
                units: SizeUnit::Acres,
            },
        })
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation { field: "size", .. }));
}

/// Commands survive the JSON round-trip used by the IPC front-end.
#[test]
fn commands_roundtrip_through_json() {
    let json = r#"{
        "cmd": "create_party",
        "draft": {
            "kind": "BORROWER",
            "name": "Ravi",
            "phone": "9876543210",
            "email": "ravi@example.com",
            "address": "12 Hill Street",
            "tax_id": "ABCDE1234F",
            "national_id": "123412341234"
        }
    }"#;
    let cmd: LedgerCommand = serde_json::from_str(json).unwrap();
    let mut ledger = ledger();
    let outcome = ledger.execute(cmd).unwrap();
    let CommandOutcome::PartyChanged { record, links } = outcome else {
        panic!("expected a party outcome");
    };
    assert_eq!(record.kind, PartyKind::Borrower);
    assert!(links.accepted.is_empty());

    let rendered = serde_json::to_string(&ledger.execute(LedgerCommand::ListAccounts).unwrap());
    assert!(rendered.is_ok());
}
