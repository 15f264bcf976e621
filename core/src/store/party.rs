use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension, Row, Transaction};

use super::LedgerStore;
use crate::{
    error::{LedgerError, LedgerResult},
    link_registry::LinkPlan,
    party::{FirmDetails, PartyDraft, PartyKind, PartyRecord},
    types::RecordId,
};

fn party_row_mapper(row: &Row<'_>) -> rusqlite::Result<PartyRecord> {
    let registered_date: Option<NaiveDate> = row.get(10)?;
    let members: Option<i64> = row.get(11)?;
    let percent_owned: Option<f64> = row.get(12)?;
    let firm_state: Option<String> = row.get(13)?;
    let firm = match (registered_date, members, percent_owned, firm_state) {
        (Some(registered_date), Some(members), Some(percent_owned), Some(state)) => {
            Some(FirmDetails {
                registered_date,
                members,
                percent_owned,
                state,
            })
        }
        _ => None,
    };
    Ok(PartyRecord {
        party_id: row.get(0)?,
        kind: row.get(1)?,
        name: row.get(2)?,
        phone: row.get(3)?,
        email: row.get(4)?,
        address: row.get(5)?,
        tax_id: row.get(6)?,
        national_id: row.get(7)?,
        heir_name: row.get(8)?,
        heir_tax_id: row.get(9)?,
        firm,
        account_links: Vec::new(),
    })
}

/// Apply the link registry's plan to the account table inside the
/// party's unit of work. Claims are guarded so a claim never steals an
/// account that gained an owner since vetting.
fn apply_link_plan(
    tx: &Transaction<'_>,
    party_id: RecordId,
    plan: &LinkPlan,
) -> LedgerResult<()> {
    if plan.release_all {
        tx.execute(
            "UPDATE account SET owner_party_id = NULL WHERE owner_party_id = ?1",
            params![party_id],
        )?;
    }
    for &account_id in &plan.release {
        tx.execute(
            "UPDATE account SET owner_party_id = NULL
             WHERE account_id = ?1 AND owner_party_id = ?2",
            params![account_id, party_id],
        )?;
    }
    for &account_id in &plan.claim {
        tx.execute(
            "UPDATE account SET owner_party_id = ?1
             WHERE account_id = ?2
               AND (owner_party_id IS NULL OR owner_party_id = ?1)",
            params![party_id, account_id],
        )?;
    }
    Ok(())
}

impl LedgerStore {
    // ── Party ─────────────────────────────────────────────────────

    /// Insert a party and claim its vetted links in one unit of work.
    pub fn insert_party(
        &mut self,
        draft: &PartyDraft,
        claim: &[RecordId],
    ) -> LedgerResult<PartyRecord> {
        let tx = self.conn.transaction()?;
        let firm = draft.firm.as_ref();
        tx.execute(
            "INSERT INTO party (kind, name, phone, email, address, tax_id, national_id,
                                heir_name, heir_tax_id,
                                registered_date, members, percent_owned, firm_state)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                draft.kind,
                draft.name,
                draft.phone,
                draft.email,
                draft.address,
                draft.tax_id,
                draft.national_id,
                draft.heir_name,
                draft.heir_tax_id,
                firm.map(|f| f.registered_date),
                firm.map(|f| f.members),
                firm.map(|f| f.percent_owned),
                firm.map(|f| f.state.clone()),
            ],
        )?;
        let party_id = tx.last_insert_rowid();
        let plan = LinkPlan {
            claim: claim.to_vec(),
            ..LinkPlan::default()
        };
        apply_link_plan(&tx, party_id, &plan)?;
        tx.commit()?;

        self.find_party(party_id)?.ok_or(LedgerError::NotFound {
            entity: "party",
            id: party_id,
        })
    }

    pub fn find_party(&self, party_id: RecordId) -> LedgerResult<Option<PartyRecord>> {
        let record = self
            .conn
            .query_row(
                "SELECT party_id, kind, name, phone, email, address, tax_id, national_id,
                        heir_name, heir_tax_id, registered_date, members, percent_owned, firm_state
                 FROM party WHERE party_id = ?1",
                params![party_id],
                party_row_mapper,
            )
            .optional()?;
        match record {
            Some(mut record) => {
                record.account_links = self.accounts_owned_by(party_id)?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    pub fn parties_of_kind(&self, kind: PartyKind) -> LedgerResult<Vec<PartyRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT party_id, kind, name, phone, email, address, tax_id, national_id,
                    heir_name, heir_tax_id, registered_date, members, percent_owned, firm_state
             FROM party WHERE kind = ?1 ORDER BY party_id ASC",
        )?;
        let rows = stmt.query_map(params![kind], party_row_mapper)?;
        let mut records = rows.collect::<Result<Vec<_>, _>>()?;
        for record in &mut records {
            record.account_links = self.accounts_owned_by(record.party_id)?;
        }
        Ok(records)
    }

    /// The borrower holding this tax id, used to resolve loan recipients.
    pub fn find_borrower_by_tax_id(&self, tax_id: &str) -> LedgerResult<Option<PartyRecord>> {
        let record = self
            .conn
            .query_row(
                "SELECT party_id, kind, name, phone, email, address, tax_id, national_id,
                        heir_name, heir_tax_id, registered_date, members, percent_owned, firm_state
                 FROM party WHERE kind = 'BORROWER' AND tax_id = ?1",
                params![tax_id],
                party_row_mapper,
            )
            .optional()?;
        match record {
            Some(mut record) => {
                record.account_links = self.accounts_owned_by(record.party_id)?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    /// Update a party's scalar fields and apply its link plan in one
    /// unit of work. The kind is fixed at creation and never updated.
    pub fn update_party(
        &mut self,
        party_id: RecordId,
        draft: &PartyDraft,
        plan: &LinkPlan,
    ) -> LedgerResult<()> {
        let tx = self.conn.transaction()?;
        let firm = draft.firm.as_ref();
        let changed = tx.execute(
            "UPDATE party
             SET name = ?1, phone = ?2, email = ?3, address = ?4,
                 tax_id = ?5, national_id = ?6,
                 heir_name = ?7, heir_tax_id = ?8,
                 registered_date = ?9, members = ?10, percent_owned = ?11, firm_state = ?12
             WHERE party_id = ?13",
            params![
                draft.name,
                draft.phone,
                draft.email,
                draft.address,
                draft.tax_id,
                draft.national_id,
                draft.heir_name,
                draft.heir_tax_id,
                firm.map(|f| f.registered_date),
                firm.map(|f| f.members),
                firm.map(|f| f.percent_owned),
                firm.map(|f| f.state.clone()),
                party_id,
            ],
        )?;
        if changed == 0 {
            return Err(LedgerError::NotFound {
                entity: "party",
                id: party_id,
            });
        }
        apply_link_plan(&tx, party_id, plan)?;
        tx.commit()?;
        Ok(())
    }
}
