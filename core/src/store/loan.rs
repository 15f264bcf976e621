use rusqlite::{params, OptionalExtension, Row};

use super::LedgerStore;
use crate::{
    error::{LedgerError, LedgerResult},
    loan::{LoanDraft, LoanRecord},
    types::RecordId,
};

fn loan_row_mapper(row: &Row<'_>) -> rusqlite::Result<LoanRecord> {
    Ok(LoanRecord {
        loan_id: row.get(0)?,
        name: row.get(1)?,
        recipient: row.get(2)?,
        principal: row.get(3)?,
        interest_rate: row.get(4)?,
        interest_frequency: row.get(5)?,
        interest_expected: row.get(6)?,
        interest_realized: row.get(7)?,
        interest_paid_up: row.get(8)?,
        expenses: row.get(9)?,
        state: row.get(10)?,
        asset_id: row.get(11)?,
    })
}

impl LedgerStore {
    // ── Loan ──────────────────────────────────────────────────────

    /// Insert a loan. `recipient` is the borrower name the ledger
    /// resolved from the draft's tax id.
    pub fn insert_loan(&self, draft: &LoanDraft, recipient: &str) -> LedgerResult<LoanRecord> {
        self.conn.execute(
            "INSERT INTO loan (name, recipient, principal, interest_rate, interest_frequency,
                               interest_expected, interest_realized, interest_paid_up,
                               expenses, loan_state, asset_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 0, ?9, ?10)",
            params![
                draft.name,
                recipient,
                draft.principal,
                draft.interest_rate,
                draft.interest_frequency,
                draft.interest_expected,
                draft.interest_realized,
                draft.interest_paid_up,
                draft.state,
                draft.asset_id,
            ],
        )?;
        Ok(LoanRecord {
            loan_id: self.conn.last_insert_rowid(),
            name: draft.name.clone(),
            recipient: recipient.to_string(),
            principal: draft.principal,
            interest_rate: draft.interest_rate,
            interest_frequency: draft.interest_frequency,
            interest_expected: draft.interest_expected,
            interest_realized: draft.interest_realized,
            interest_paid_up: draft.interest_paid_up,
            expenses: 0.0,
            state: draft.state.clone(),
            asset_id: draft.asset_id,
        })
    }

    pub fn find_loan(&self, loan_id: RecordId) -> LedgerResult<Option<LoanRecord>> {
        self.conn
            .query_row(
                "SELECT loan_id, name, recipient, principal, interest_rate, interest_frequency,
                        interest_expected, interest_realized, interest_paid_up,
                        expenses, loan_state, asset_id
                 FROM loan WHERE loan_id = ?1",
                params![loan_id],
                loan_row_mapper,
            )
            .optional()
            .map_err(Into::into)
    }

    pub fn all_loans(&self) -> LedgerResult<Vec<LoanRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT loan_id, name, recipient, principal, interest_rate, interest_frequency,
                    interest_expected, interest_realized, interest_paid_up,
                    expenses, loan_state, asset_id
             FROM loan ORDER BY loan_id ASC",
        )?;
        let rows = stmt.query_map([], loan_row_mapper)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Replace every mutable column of a loan with the merged record.
    pub fn update_loan(&self, record: &LoanRecord) -> LedgerResult<()> {
        let changed = self.conn.execute(
            "UPDATE loan
             SET name = ?1, recipient = ?2, principal = ?3, interest_rate = ?4,
                 interest_frequency = ?5, interest_expected = ?6, interest_realized = ?7,
                 interest_paid_up = ?8, expenses = ?9, loan_state = ?10, asset_id = ?11
             WHERE loan_id = ?12",
            params![
                record.name,
                record.recipient,
                record.principal,
                record.interest_rate,
                record.interest_frequency,
                record.interest_expected,
                record.interest_realized,
                record.interest_paid_up,
                record.expenses,
                record.state,
                record.asset_id,
                record.loan_id,
            ],
        )?;
        if changed == 0 {
            return Err(LedgerError::NotFound {
                entity: "loan",
                id: record.loan_id,
            });
        }
        Ok(())
    }
}
