//! Link registry tests: one account, at most one owning party.

use ledger_core::{
    account::{AccountDraft, AccountType},
    ledger::Ledger,
    link_registry::SkipReason,
    party::{FirmDetails, LinkUpdate, PartyDraft, PartyKind, PartyUpdate},
    types::RecordId,
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
        account_type: AccountType::Savings,
    }
}

fn party_draft(kind: PartyKind, name: &str, tax_id: &str, links: Vec<RecordId>) -> PartyDraft {
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
        link_accounts: links,
    }
}

/// Once borrower B owns the account, it reads as linked to everyone
/// except B itself.
#[test]
fn linked_account_is_linked_for_everyone_but_its_owner() {
    let mut ledger = ledger();
    let account = ledger.create_account(account_draft("Ravi")).unwrap();
    let (borrower, report) = ledger
        .create_party(party_draft(
            PartyKind::Borrower,
            "Ravi",
            "ABCDE1234F",
            vec![account.account_id],
        ))
        .unwrap();

    assert_eq!(report.accepted, vec![account.account_id]);
    assert_eq!(borrower.account_links, vec![account.account_id]);
    assert!(ledger.is_account_linked(account.account_id, None).unwrap());
    assert!(ledger
        .is_account_linked(account.account_id, Some(borrower.party_id + 1))
        .unwrap());
    assert!(!ledger
        .is_account_linked(account.account_id, Some(borrower.party_id))
        .unwrap());
}

/// A second party naming an already-owned account gets a skip, not an
/// error, and ends up with no links.
#[test]
fn claimed_account_is_skipped_for_other_parties() {
    let mut ledger = ledger();
    let account = ledger.create_account(account_draft("Ravi")).unwrap();
    ledger
        .create_party(party_draft(
            PartyKind::Borrower,
            "Ravi",
            "ABCDE1234F",
            vec![account.account_id],
        ))
        .unwrap();

    let (investor, report) = ledger
        .create_party(party_draft(
            PartyKind::Investor,
            "Meena",
            "FGHIJ5678K",
            vec![account.account_id],
        ))
        .unwrap();

    assert!(investor.account_links.is_empty());
    assert_eq!(report.accepted, Vec::<RecordId>::new());
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].reason, SkipReason::LinkedElsewhere);
}

/// Replacing a party's links with ids it already holds is accepted:
/// the party's own linkage never conflicts with itself.
#[test]
fn party_can_relink_its_own_account_during_update() {
    let mut ledger = ledger();
    let account = ledger.create_account(account_draft("Ravi")).unwrap();
    let (borrower, _) = ledger
        .create_party(party_draft(
            PartyKind::Borrower,
            "Ravi",
            "ABCDE1234F",
            vec![account.account_id],
        ))
        .unwrap();

    let update = PartyUpdate {
        links: Some(LinkUpdate::Replace {
            account_ids: vec![account.account_id],
        }),
        ..PartyUpdate::default()
    };
    let (after, report) = ledger
        .update_party(PartyKind::Borrower, borrower.party_id, update)
        .unwrap();

    assert_eq!(report.accepted, vec![account.account_id]);
    assert!(report.skipped.is_empty());
    assert_eq!(after.account_links, vec![account.account_id]);
}

/// Adding an id the party already holds is reported as a duplicate and
/// leaves the links unchanged.
#[test]
fn adding_a_held_link_is_a_duplicate_skip() {
    let mut ledger = ledger();
    let account = ledger.create_account(account_draft("Ravi")).unwrap();
    let (borrower, _) = ledger
        .create_party(party_draft(
            PartyKind::Borrower,
            "Ravi",
            "ABCDE1234F",
            vec![account.account_id],
        ))
        .unwrap();

    let update = PartyUpdate {
        links: Some(LinkUpdate::Add {
            account_ids: vec![account.account_id],
        }),
        ..PartyUpdate::default()
    };
    let (after, report) = ledger
        .update_party(PartyKind::Borrower, borrower.party_id, update)
        .unwrap();

    assert_eq!(after.account_links, vec![account.account_id]);
    assert_eq!(report.skipped[0].reason, SkipReason::AlreadyLinked);
}

/// Unknown ids are skipped per candidate; valid candidates in the same
/// request still land.
#[test]
fn unknown_candidates_do_not_poison_the_batch() {
    let mut ledger = ledger();
    let account = ledger.create_account(account_draft("Ravi")).unwrap();
    let (borrower, report) = ledger
        .create_party(party_draft(
            PartyKind::Borrower,
            "Ravi",
            "ABCDE1234F",
            vec![9999, account.account_id],
        ))
        .unwrap();

    assert_eq!(borrower.account_links, vec![account.account_id]);
    assert_eq!(report.skipped[0].account_id, 9999);
    assert_eq!(report.skipped[0].reason, SkipReason::UnknownAccount);
}

/// Clearing releases the account for someone else to claim.
#[test]
fn cleared_links_free_the_account() {
    let mut ledger = ledger();
    let account = ledger.create_account(account_draft("Ravi")).unwrap();
    let (borrower, _) = ledger
        .create_party(party_draft(
            PartyKind::Borrower,
            "Ravi",
            "ABCDE1234F",
            vec![account.account_id],
        ))
        .unwrap();

    let update = PartyUpdate {
        links: Some(LinkUpdate::Clear),
        ..PartyUpdate::default()
    };
    let (after, _) = ledger
        .update_party(PartyKind::Borrower, borrower.party_id, update)
        .unwrap();
    assert!(after.account_links.is_empty());
    assert!(!ledger.is_account_linked(account.account_id, None).unwrap());

    let (investor, report) = ledger
        .create_party(party_draft(
            PartyKind::Investor,
            "Meena",
            "FGHIJ5678K",
            vec![account.account_id],
        ))
        .unwrap();
    assert_eq!(investor.account_links, vec![account.account_id]);
    assert!(report.skipped.is_empty());
}

/// Removing a link the party does not hold is a per-candidate skip.
#[test]
fn removing_an_unheld_link_is_skipped() {
    let mut ledger = ledger();
    let account = ledger.create_account(account_draft("Ravi")).unwrap();
    let (borrower, _) = ledger
        .create_party(party_draft(PartyKind::Borrower, "Ravi", "ABCDE1234F", vec![]))
        .unwrap();

    let update = PartyUpdate {
        links: Some(LinkUpdate::Remove {
            account_ids: vec![account.account_id],
        }),
        ..PartyUpdate::default()
    };
    let (_, report) = ledger
        .update_party(PartyKind::Borrower, borrower.party_id, update)
        .unwrap();
    assert!(report.accepted.is_empty());
    assert_eq!(report.skipped[0].reason, SkipReason::NotLinked);
}

/// Firms participate in the exclusivity rule like every other kind.
#[test]
fn firm_ownership_blocks_other_parties() {
    let mut ledger = ledger();
    let account = ledger.create_account(account_draft("Sharma Traders")).unwrap();

    let mut firm = party_draft(
        PartyKind::Firm,
        "Sharma Traders",
        "LMNOP9012Q",
        vec![account.account_id],
    );
    firm.firm = Some(FirmDetails {
        registered_date: chrono::NaiveDate::from_ymd_opt(2019, 6, 1).unwrap(),
        members: 3,
        percent_owned: 40.0,
        state: "Active".into(),
    });
    let (firm, _) = ledger.create_party(firm).unwrap();
    assert_eq!(firm.account_links, vec![account.account_id]);

    let (borrower, report) = ledger
        .create_party(party_draft(
            PartyKind::Borrower,
            "Ravi",
            "ABCDE1234F",
            vec![account.account_id],
        ))
        .unwrap();
    assert!(borrower.account_links.is_empty());
    assert_eq!(report.skipped[0].reason, SkipReason::LinkedElsewhere);
}

/// The predicate itself errors on an account that does not exist.
#[test]
fn is_linked_requires_an_existing_account() {
    let ledger = ledger();
    assert!(ledger.is_account_linked(42, None).is_err());
}
