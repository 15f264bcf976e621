use rusqlite::{params, OptionalExtension, Row};

use super::LedgerStore;
use crate::{
    error::{LedgerError, LedgerResult},
    transaction::{LoanEffect, TransactionDraft, TransactionRecord},
    types::RecordId,
};

fn txn_row_mapper(row: &Row<'_>) -> rusqlite::Result<TransactionRecord> {
    Ok(TransactionRecord {
        txn_id: row.get(0)?,
        txn_type: row.get(1)?,
        expense_subtype: row.get(2)?,
        amount: row.get(3)?,
        mode: row.get(4)?,
        date: row.get(5)?,
        from_account: row.get(6)?,
        to_account: row.get(7)?,
        loan_id: row.get(8)?,
        via: row.get(9)?,
        notes: row.get(10)?,
    })
}

impl LedgerStore {
    // ── Transaction ───────────────────────────────────────────────

    /// Insert a transaction and apply its loan effect in one database
    /// transaction: either both land or neither does.
    pub fn record_transaction(
        &mut self,
        draft: &TransactionDraft,
    ) -> LedgerResult<TransactionRecord> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO txn (txn_type, expense_subtype, amount, mode, date,
                              from_account, to_account, loan_id, via, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                draft.txn_type,
                draft.expense_subtype,
                draft.amount,
                draft.mode,
                draft.date,
                draft.from_account,
                draft.to_account,
                draft.loan_id,
                draft.via,
                draft.notes,
            ],
        )?;
        let txn_id = tx.last_insert_rowid();

        // Balance propagation: only when the type qualifies and a loan
        // is referenced.
        if let (Some(effect), Some(loan_id)) = (draft.txn_type.loan_effect(), draft.loan_id) {
            let sql = match effect {
                LoanEffect::Disburse => {
                    "UPDATE loan SET principal = principal + ?1 WHERE loan_id = ?2"
                }
                LoanEffect::Repay => {
                    "UPDATE loan SET principal = principal - ?1 WHERE loan_id = ?2"
                }
                LoanEffect::Expense => {
                    "UPDATE loan SET expenses = expenses + ?1 WHERE loan_id = ?2"
                }
            };
            let changed = tx.execute(sql, params![draft.amount, loan_id])?;
            if changed == 0 {
                // Dropping the transaction rolls the insert back too.
                return Err(LedgerError::NotFound {
                    entity: "loan",
                    id: loan_id,
                });
            }
        }

        tx.commit()?;
        Ok(TransactionRecord {
            txn_id,
            txn_type: draft.txn_type,
            expense_subtype: draft.expense_subtype,
            amount: draft.amount,
            mode: draft.mode,
            date: draft.date,
            from_account: draft.from_account,
            to_account: draft.to_account,
            loan_id: draft.loan_id,
            via: draft.via.clone(),
            notes: draft.notes.clone(),
        })
    }

    pub fn find_transaction(&self, txn_id: RecordId) -> LedgerResult<Option<TransactionRecord>> {
        self.conn
            .query_row(
                "SELECT txn_id, txn_type, expense_subtype, amount, mode, date,
                        from_account, to_account, loan_id, via, notes
                 FROM txn WHERE txn_id = ?1",
                params![txn_id],
                txn_row_mapper,
            )
            .optional()
            .map_err(Into::into)
    }

    pub fn all_transactions(&self) -> LedgerResult<Vec<TransactionRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT txn_id, txn_type, expense_subtype, amount, mode, date,
                    from_account, to_account, loan_id, via, notes
             FROM txn ORDER BY txn_id ASC",
        )?;
        let rows = stmt.query_map([], txn_row_mapper)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Plain field update of a recorded transaction. Loan balances are
    /// not re-propagated; the propagation contract covers recording only.
    pub fn update_transaction(&self, record: &TransactionRecord) -> LedgerResult<()> {
        let changed = self.conn.execute(
            "UPDATE txn
             SET txn_type = ?1, expense_subtype = ?2, amount = ?3, mode = ?4, date = ?5,
                 from_account = ?6, to_account = ?7, loan_id = ?8, via = ?9, notes = ?10
             WHERE txn_id = ?11",
            params![
                record.txn_type,
                record.expense_subtype,
                record.amount,
                record.mode,
                record.date,
                record.from_account,
                record.to_account,
                record.loan_id,
                record.via,
                record.notes,
                record.txn_id,
            ],
        )?;
        if changed == 0 {
            return Err(LedgerError::NotFound {
                entity: "transaction",
                id: record.txn_id,
            });
        }
        Ok(())
    }
}
