//! The ledger service: validation, reference checks, and dispatch.
//!
//! `Ledger::execute` is the single entry point for every operation.
//! Field formats are checked here before anything touches storage;
//! referential lookups that find nothing fail with `NotFound` and abort
//! only the current operation.

use log::{debug, info};

use crate::{
    account::{AccountDraft, AccountRecord, AccountUpdate},
    asset::{AssetDraft, AssetRecord, AssetUpdate},
    command::{CommandOutcome, LedgerCommand},
    error::{LedgerError, LedgerResult},
    link_registry::{LinkPlan, LinkRegistry, LinkReport},
    loan::{LoanDraft, LoanRecord, LoanUpdate},
    party::{PartyDraft, PartyKind, PartyRecord, PartyUpdate},
    store::LedgerStore,
    transaction::{ExpenseSubtype, TransactionDraft, TransactionRecord, TransactionUpdate, TxnType},
    types::RecordId,
    validate,
};

pub struct Ledger {
    store: LedgerStore,
}

impl Ledger {
    /// Open (or create) the ledger at `path` and apply migrations.
    pub fn open(path: &str) -> LedgerResult<Self> {
        let store = LedgerStore::open(path)?;
        store.migrate()?;
        Ok(Self { store })
    }

    /// In-memory ledger (used in tests).
    pub fn in_memory() -> LedgerResult<Self> {
        let store = LedgerStore::in_memory()?;
        store.migrate()?;
        Ok(Self { store })
    }

    /// Dispatch a command to its operation.
    pub fn execute(&mut self, cmd: LedgerCommand) -> LedgerResult<CommandOutcome> {
        use CommandOutcome as Out;
        use LedgerCommand as Cmd;
        match cmd {
            Cmd::CreateAccount { draft } => self.create_account(draft).map(Out::Account),
            Cmd::GetAccount { account_id } => self.get_account(account_id).map(Out::Account),
            Cmd::ListAccounts => self.list_accounts().map(Out::Accounts),
            Cmd::SearchAccounts { holder_name } => {
                self.search_accounts(&holder_name).map(Out::Accounts)
            }
            Cmd::UpdateAccount { account_id, update } => {
                self.update_account(account_id, update).map(Out::Account)
            }

            Cmd::CreateParty { draft } => self
                .create_party(draft)
                .map(|(record, links)| Out::PartyChanged { record, links }),
            Cmd::GetParty { kind, party_id } => self.get_party(kind, party_id).map(Out::Party),
            Cmd::ListParties { kind } => self.list_parties(kind).map(Out::Parties),
            Cmd::UpdateParty {
                kind,
                party_id,
                update,
            } => self
                .update_party(kind, party_id, update)
                .map(|(record, links)| Out::PartyChanged { record, links }),

            Cmd::CreateAsset { draft } => self.create_asset(draft).map(Out::Asset),
            Cmd::GetAsset { asset_id } => self.get_asset(asset_id).map(Out::Asset),
            Cmd::ListAssets => self.list_assets().map(Out::Assets),
            Cmd::UpdateAsset { asset_id, update } => {
                self.update_asset(asset_id, update).map(Out::Asset)
            }

            Cmd::CreateLoan { draft } => self.create_loan(draft).map(Out::Loan),
            Cmd::GetLoan { loan_id } => self.get_loan(loan_id).map(Out::Loan),
            Cmd::ListLoans => self.list_loans().map(Out::Loans),
            Cmd::UpdateLoan { loan_id, update } => self.update_loan(loan_id, update).map(Out::Loan),

            Cmd::RecordTransaction { draft } => {
                self.record_transaction(draft).map(Out::Transaction)
            }
            Cmd::GetTransaction { txn_id } => self.get_transaction(txn_id).map(Out::Transaction),
            Cmd::ListTransactions => self.list_transactions().map(Out::Transactions),
            Cmd::UpdateTransaction { txn_id, update } => {
                self.update_transaction(txn_id, update).map(Out::Transaction)
            }
        }
    }

    /// The link registry's exclusivity check: is the account owned by
    /// any party other than `exclude_party`?
    pub fn is_account_linked(
        &self,
        account_id: RecordId,
        exclude_party: Option<RecordId>,
    ) -> LedgerResult<bool> {
        LinkRegistry::new(&self.store).is_linked(account_id, exclude_party)
    }

    // ── Account ───────────────────────────────────────────────────

    pub fn create_account(&mut self, draft: AccountDraft) -> LedgerResult<AccountRecord> {
        validate_account(&draft)?;
        let record = self.store.insert_account(&draft)?;
        info!(
            "account {} created for {}",
            record.account_id, record.holder_name
        );
        Ok(record)
    }

    pub fn get_account(&self, account_id: RecordId) -> LedgerResult<AccountRecord> {
        self.store
            .find_account(account_id)?
            .ok_or(LedgerError::NotFound {
                entity: "account",
                id: account_id,
            })
    }

    pub fn list_accounts(&self) -> LedgerResult<Vec<AccountRecord>> {
        self.store.all_accounts()
    }

    pub fn search_accounts(&self, holder_name: &str) -> LedgerResult<Vec<AccountRecord>> {
        self.store.accounts_by_holder(holder_name)
    }

    pub fn update_account(
        &mut self,
        account_id: RecordId,
        update: AccountUpdate,
    ) -> LedgerResult<AccountRecord> {
        let current = self.get_account(account_id)?;
        let merged = current.merged(&update);
        validate_account(&merged)?;
        self.store.update_account(account_id, &merged)?;
        info!("account {account_id} updated");
        self.get_account(account_id)
    }

    // ── Party ─────────────────────────────────────────────────────

    pub fn create_party(
        &mut self,
        draft: PartyDraft,
    ) -> LedgerResult<(PartyRecord, LinkReport)> {
        validate_party(&draft)?;
        let report = LinkRegistry::new(&self.store).vet_for_create(&draft.link_accounts)?;
        for skip in &report.skipped {
            debug!(
                "skipping account {} for new {}: {}",
                skip.account_id,
                draft.kind,
                skip.reason.describe()
            );
        }
        let record = self.store.insert_party(&draft, &report.accepted)?;
        info!(
            "{} {} created with {} linked account(s)",
            record.kind,
            record.party_id,
            record.account_links.len()
        );
        Ok((record, report))
    }

    pub fn get_party(&self, kind: PartyKind, party_id: RecordId) -> LedgerResult<PartyRecord> {
        match self.store.find_party(party_id)? {
            Some(record) if record.kind == kind => Ok(record),
            _ => Err(LedgerError::NotFound {
                entity: kind.as_str(),
                id: party_id,
            }),
        }
    }

    pub fn list_parties(&self, kind: PartyKind) -> LedgerResult<Vec<PartyRecord>> {
        self.store.parties_of_kind(kind)
    }

    pub fn update_party(
        &mut self,
        kind: PartyKind,
        party_id: RecordId,
        update: PartyUpdate,
    ) -> LedgerResult<(PartyRecord, LinkReport)> {
        let current = self.get_party(kind, party_id)?;
        let merged = current.merged(&update);
        validate_party(&merged)?;
        let (plan, report) = match &update.links {
            Some(link_update) => {
                LinkRegistry::new(&self.store).resolve_update(party_id, link_update)?
            }
            None => (LinkPlan::default(), LinkReport::default()),
        };
        for skip in &report.skipped {
            debug!(
                "skipping account {} for {} {}: {}",
                skip.account_id,
                kind,
                party_id,
                skip.reason.describe()
            );
        }
        self.store.update_party(party_id, &merged, &plan)?;
        info!("{kind} {party_id} updated");
        Ok((self.get_party(kind, party_id)?, report))
    }

    // ── Asset ─────────────────────────────────────────────────────

    pub fn create_asset(&mut self, draft: AssetDraft) -> LedgerResult<AssetRecord> {
        validate_asset(&draft)?;
        let record = self.store.insert_asset(&draft)?;
        info!(
            "asset {} created ({} {})",
            record.asset_id, record.asset_type, record.deed_id
        );
        Ok(record)
    }

    pub fn get_asset(&self, asset_id: RecordId) -> LedgerResult<AssetRecord> {
        self.store
            .find_asset(asset_id)?
            .ok_or(LedgerError::NotFound {
                entity: "asset",
                id: asset_id,
            })
    }

    pub fn list_assets(&self) -> LedgerResult<Vec<AssetRecord>> {
        self.store.all_assets()
    }

    pub fn update_asset(
        &mut self,
        asset_id: RecordId,
        update: AssetUpdate,
    ) -> LedgerResult<AssetRecord> {
        let current = self.get_asset(asset_id)?;
        let merged = current.merged(&update);
        validate_asset(&merged)?;
        self.store.update_asset(asset_id, &merged)?;
        info!("asset {asset_id} updated");
        self.get_asset(asset_id)
    }

    // ── Loan ──────────────────────────────────────────────────────

    /// Create a loan. The recipient is resolved by borrower tax-id
    /// lookup; an unknown tax id aborts the operation.
    pub fn create_loan(&mut self, draft: LoanDraft) -> LedgerResult<LoanRecord> {
        let borrower = self
            .store
            .find_borrower_by_tax_id(&draft.recipient_tax_id)?
            .ok_or_else(|| LedgerError::UnknownRecipient {
                tax_id: draft.recipient_tax_id.clone(),
            })?;
        if let Some(asset_id) = draft.asset_id {
            self.get_asset(asset_id)?;
        }
        let record = self.store.insert_loan(&draft, &borrower.name)?;
        info!(
            "loan {} created for {} (principal {})",
            record.loan_id, record.recipient, record.principal
        );
        Ok(record)
    }

    pub fn get_loan(&self, loan_id: RecordId) -> LedgerResult<LoanRecord> {
        self.store.find_loan(loan_id)?.ok_or(LedgerError::NotFound {
            entity: "loan",
            id: loan_id,
        })
    }

    pub fn list_loans(&self) -> LedgerResult<Vec<LoanRecord>> {
        self.store.all_loans()
    }

    pub fn update_loan(&mut self, loan_id: RecordId, update: LoanUpdate) -> LedgerResult<LoanRecord> {
        let current = self.get_loan(loan_id)?;
        let merged = current.merged(&update);
        if let Some(asset_id) = update.asset_id {
            self.get_asset(asset_id)?;
        }
        self.store.update_loan(&merged)?;
        info!("loan {loan_id} updated");
        self.get_loan(loan_id)
    }

    // ── Transaction ───────────────────────────────────────────────

    /// Record a transaction. The insert and any loan-balance effect are
    /// one unit of work; partial failure leaves neither behind.
    pub fn record_transaction(
        &mut self,
        draft: TransactionDraft,
    ) -> LedgerResult<TransactionRecord> {
        validate_transaction_shape(draft.txn_type, draft.expense_subtype, draft.amount)?;
        for account_id in [draft.from_account, draft.to_account].into_iter().flatten() {
            self.get_account(account_id)?;
        }
        if let Some(loan_id) = draft.loan_id {
            self.get_loan(loan_id)?;
        }
        let record = self.store.record_transaction(&draft)?;
        match (record.txn_type.loan_effect(), record.loan_id) {
            (Some(_), Some(loan_id)) => info!(
                "transaction {} recorded ({}), loan {} balance adjusted by {}",
                record.txn_id, record.txn_type, loan_id, record.amount
            ),
            _ => info!("transaction {} recorded ({})", record.txn_id, record.txn_type),
        }
        Ok(record)
    }

    pub fn get_transaction(&self, txn_id: RecordId) -> LedgerResult<TransactionRecord> {
        self.store
            .find_transaction(txn_id)?
            .ok_or(LedgerError::NotFound {
                entity: "transaction",
                id: txn_id,
            })
    }

    pub fn list_transactions(&self) -> LedgerResult<Vec<TransactionRecord>> {
        self.store.all_transactions()
    }

    /// Edit a recorded transaction. Loan balances are never
    /// re-propagated on edit.
    pub fn update_transaction(
        &mut self,
        txn_id: RecordId,
        update: TransactionUpdate,
    ) -> LedgerResult<TransactionRecord> {
        let current = self.get_transaction(txn_id)?;
        let merged = current.merged(&update);
        validate_transaction_shape(merged.txn_type, merged.expense_subtype, merged.amount)?;
        for account_id in [merged.from_account, merged.to_account].into_iter().flatten() {
            self.get_account(account_id)?;
        }
        if let Some(loan_id) = merged.loan_id {
            self.get_loan(loan_id)?;
        }
        self.store.update_transaction(&merged)?;
        info!("transaction {txn_id} updated");
        self.get_transaction(txn_id)
    }
}

// ── Draft validation ──────────────────────────────────────────────

fn validate_account(draft: &AccountDraft) -> LedgerResult<()> {
    if !validate::routing_code_is_valid(&draft.routing_code) {
        return Err(LedgerError::validation(
            "routing code",
            "must be 4 uppercase letters, a zero, then 6 uppercase alphanumerics",
        ));
    }
    Ok(())
}

fn validate_party(draft: &PartyDraft) -> LedgerResult<()> {
    if !validate::phone_is_valid(&draft.phone) {
        return Err(LedgerError::validation(
            "phone",
            "must be exactly 10 digits",
        ));
    }
    if !validate::email_is_valid(&draft.email) {
        return Err(LedgerError::validation(
            "email",
            "must contain one @ and a dotted domain",
        ));
    }
    if !validate::tax_id_is_valid(&draft.tax_id) {
        return Err(LedgerError::validation(
            "tax id",
            "must match the shape ABCDE1234F",
        ));
    }
    if !validate::national_id_is_valid(&draft.national_id) {
        return Err(LedgerError::validation(
            "national id",
            "must be exactly 12 digits",
        ));
    }
    if draft.kind != PartyKind::Investor
        && (draft.heir_name.is_some() || draft.heir_tax_id.is_some())
    {
        return Err(LedgerError::validation(
            "legal heir",
            "only investors may name a legal heir",
        ));
    }
    if let Some(heir_tax_id) = &draft.heir_tax_id {
        if !validate::tax_id_is_valid(heir_tax_id) {
            return Err(LedgerError::validation(
                "heir tax id",
                "must match the shape ABCDE1234F",
            ));
        }
    }
    match (draft.kind, &draft.firm) {
        (PartyKind::Firm, None) => Err(LedgerError::validation(
            "firm details",
            "required for firms",
        )),
        (PartyKind::Firm, Some(firm)) => {
            if firm.members <= 0 {
                return Err(LedgerError::validation(
                    "members",
                    "must be at least 1",
                ));
            }
            if !(0.0..=100.0).contains(&firm.percent_owned) {
                return Err(LedgerError::validation(
                    "percent owned",
                    "must be between 0 and 100",
                ));
            }
            Ok(())
        }
        (_, Some(_)) => Err(LedgerError::validation(
            "firm details",
            "only valid for firms",
        )),
        (_, None) => Ok(()),
    }
}

fn validate_asset(draft: &AssetDraft) -> LedgerResult<()> {
    if !(draft.size.is_finite() && draft.size > 0.0) {
        return Err(LedgerError::validation("size", "must be a positive number"));
    }
    Ok(())
}

fn validate_transaction_shape(
    txn_type: TxnType,
    expense_subtype: Option<ExpenseSubtype>,
    amount: f64,
) -> LedgerResult<()> {
    match (txn_type.requires_subtype(), expense_subtype) {
        (true, None) => {
            return Err(LedgerError::validation(
                "expense subtype",
                "required for business expenses",
            ))
        }
        (false, Some(_)) => {
            return Err(LedgerError::validation(
                "expense subtype",
                format!("not valid for {txn_type}"),
            ))
        }
        _ => {}
    }
    if !(amount.is_finite() && amount > 0.0) {
        return Err(LedgerError::validation(
            "amount",
            "must be a positive number",
        ));
    }
    Ok(())
}
