use rusqlite::{params, OptionalExtension, Row};

use super::LedgerStore;
use crate::{
    account::{AccountDraft, AccountRecord},
    error::{LedgerError, LedgerResult},
    types::RecordId,
};

fn account_row_mapper(row: &Row<'_>) -> rusqlite::Result<AccountRecord> {
    Ok(AccountRecord {
        account_id: row.get(0)?,
        holder_name: row.get(1)?,
        bank_name: row.get(2)?,
        routing_code: row.get(3)?,
        number: row.get(4)?,
        branch: row.get(5)?,
        account_type: row.get(6)?,
        owner_party_id: row.get(7)?,
    })
}

impl LedgerStore {
    // ── Account ───────────────────────────────────────────────────

    pub fn insert_account(&self, draft: &AccountDraft) -> LedgerResult<AccountRecord> {
        self.conn.execute(
            "INSERT INTO account (holder_name, bank_name, routing_code, number, branch, account_type)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                draft.holder_name,
                draft.bank_name,
                draft.routing_code,
                draft.number,
                draft.branch,
                draft.account_type,
            ],
        )?;
        Ok(AccountRecord {
            account_id: self.conn.last_insert_rowid(),
            holder_name: draft.holder_name.clone(),
            bank_name: draft.bank_name.clone(),
            routing_code: draft.routing_code.clone(),
            number: draft.number.clone(),
            branch: draft.branch.clone(),
            account_type: draft.account_type,
            owner_party_id: None,
        })
    }

    pub fn find_account(&self, account_id: RecordId) -> LedgerResult<Option<AccountRecord>> {
        self.conn
            .query_row(
                "SELECT account_id, holder_name, bank_name, routing_code, number, branch,
                        account_type, owner_party_id
                 FROM account WHERE account_id = ?1",
                params![account_id],
                account_row_mapper,
            )
            .optional()
            .map_err(Into::into)
    }

    pub fn all_accounts(&self) -> LedgerResult<Vec<AccountRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT account_id, holder_name, bank_name, routing_code, number, branch,
                    account_type, owner_party_id
             FROM account ORDER BY account_id ASC",
        )?;
        let rows = stmt.query_map([], account_row_mapper)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn accounts_by_holder(&self, holder_name: &str) -> LedgerResult<Vec<AccountRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT account_id, holder_name, bank_name, routing_code, number, branch,
                    account_type, owner_party_id
             FROM account WHERE holder_name LIKE '%' || ?1 || '%'
             ORDER BY account_id ASC",
        )?;
        let rows = stmt.query_map(params![holder_name], account_row_mapper)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn update_account(&self, account_id: RecordId, draft: &AccountDraft) -> LedgerResult<()> {
        let changed = self.conn.execute(
            "UPDATE account
             SET holder_name = ?1, bank_name = ?2, routing_code = ?3,
                 number = ?4, branch = ?5, account_type = ?6
             WHERE account_id = ?7",
            params![
                draft.holder_name,
                draft.bank_name,
                draft.routing_code,
                draft.number,
                draft.branch,
                draft.account_type,
                account_id,
            ],
        )?;
        if changed == 0 {
            return Err(LedgerError::NotFound {
                entity: "account",
                id: account_id,
            });
        }
        Ok(())
    }

    /// Ids of the accounts a party owns, in id order.
    pub fn accounts_owned_by(&self, party_id: RecordId) -> LedgerResult<Vec<RecordId>> {
        let mut stmt = self.conn.prepare(
            "SELECT account_id FROM account WHERE owner_party_id = ?1 ORDER BY account_id ASC",
        )?;
        let ids = stmt.query_map(params![party_id], |row| row.get(0))?;
        ids.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
