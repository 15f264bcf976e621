//! The command set: one variant per entity + operation.
//!
//! Every front-end (interactive menu, JSON-over-stdin, tests) builds
//! these values and hands them to `Ledger::execute`. No prompt or
//! rendering concern lives here.

use serde::{Deserialize, Serialize};

use crate::{
    account::{AccountDraft, AccountRecord, AccountUpdate},
    asset::{AssetDraft, AssetRecord, AssetUpdate},
    link_registry::LinkReport,
    loan::{LoanDraft, LoanRecord, LoanUpdate},
    party::{PartyDraft, PartyKind, PartyRecord, PartyUpdate},
    transaction::{TransactionDraft, TransactionRecord, TransactionUpdate},
    types::RecordId,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum LedgerCommand {
    // ── Account ───────────────────────────────────
    CreateAccount {
        draft: AccountDraft,
    },
    GetAccount {
        account_id: RecordId,
    },
    ListAccounts,
    SearchAccounts {
        holder_name: String,
    },
    UpdateAccount {
        account_id: RecordId,
        update: AccountUpdate,
    },

    // ── Party (borrower / investor / facilitator / partner / firm) ──
    CreateParty {
        draft: PartyDraft,
    },
    GetParty {
        kind: PartyKind,
        party_id: RecordId,
    },
    ListParties {
        kind: PartyKind,
    },
    UpdateParty {
        kind: PartyKind,
        party_id: RecordId,
        update: PartyUpdate,
    },

    // ── Asset ─────────────────────────────────────
    CreateAsset {
        draft: AssetDraft,
    },
    GetAsset {
        asset_id: RecordId,
    },
    ListAssets,
    UpdateAsset {
        asset_id: RecordId,
        update: AssetUpdate,
    },

    // ── Loan ──────────────────────────────────────
    CreateLoan {
        draft: LoanDraft,
    },
    GetLoan {
        loan_id: RecordId,
    },
    ListLoans,
    UpdateLoan {
        loan_id: RecordId,
        update: LoanUpdate,
    },

    // ── Transaction ───────────────────────────────
    RecordTransaction {
        draft: TransactionDraft,
    },
    GetTransaction {
        txn_id: RecordId,
    },
    ListTransactions,
    UpdateTransaction {
        txn_id: RecordId,
        update: TransactionUpdate,
    },
}

/// What a successfully executed command hands back. Adjacently tagged
/// so list outcomes serialize cleanly in the IPC mode.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", content = "data", rename_all = "snake_case")]
pub enum CommandOutcome {
    Account(AccountRecord),
    Accounts(Vec<AccountRecord>),
    Party(PartyRecord),
    Parties(Vec<PartyRecord>),
    /// A party create or update, with the report of which candidate
    /// links were accepted and which were skipped.
    PartyChanged {
        record: PartyRecord,
        links: LinkReport,
    },
    Asset(AssetRecord),
    Assets(Vec<AssetRecord>),
    Loan(LoanRecord),
    Loans(Vec<LoanRecord>),
    Transaction(TransactionRecord),
    Transactions(Vec<TransactionRecord>),
}
