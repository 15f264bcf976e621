//! Party records: the borrowers, investors, facilitators, partners, and
//! firms that may own accounts and participate in loans.
//!
//! All five kinds share one table. Investors may name a legal heir;
//! firms carry registration details and a lifecycle state.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{wire_enum, RecordId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartyKind {
    Borrower,
    Investor,
    Facilitator,
    Partner,
    Firm,
}

wire_enum!(PartyKind {
    Borrower    => "BORROWER",
    Investor    => "INVESTOR",
    Facilitator => "FACILITATOR",
    Partner     => "PARTNER",
    Firm        => "FIRM",
});

/// Firm-only fields. `state` is free text; Active/Inactive/Closed by
/// convention, not enforced as a closed set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirmDetails {
    pub registered_date: NaiveDate,
    pub members: i64,
    pub percent_owned: f64,
    pub state: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartyRecord {
    pub party_id: RecordId,
    pub kind: PartyKind,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub tax_id: String,
    pub national_id: String,
    /// Legal heir, investors only.
    pub heir_name: Option<String>,
    pub heir_tax_id: Option<String>,
    pub firm: Option<FirmDetails>,
    /// Accounts owned by this party, read back from the account table.
    pub account_links: Vec<RecordId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartyDraft {
    pub kind: PartyKind,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub tax_id: String,
    pub national_id: String,
    #[serde(default)]
    pub heir_name: Option<String>,
    #[serde(default)]
    pub heir_tax_id: Option<String>,
    #[serde(default)]
    pub firm: Option<FirmDetails>,
    /// Candidate accounts to link; each is vetted and may be skipped.
    #[serde(default)]
    pub link_accounts: Vec<RecordId>,
}

/// How an update changes a party's set of owned accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum LinkUpdate {
    /// Release every current link, then claim the vetted candidates.
    Replace { account_ids: Vec<RecordId> },
    /// Claim the vetted candidates on top of the current links.
    Add { account_ids: Vec<RecordId> },
    /// Release the named links; ids the party does not hold are skipped.
    Remove { account_ids: Vec<RecordId> },
    /// Release every current link.
    Clear,
}

/// Field-selective update: `None` keeps the stored value. The kind of a
/// party is fixed at creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartyUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub tax_id: Option<String>,
    pub national_id: Option<String>,
    pub heir_name: Option<String>,
    pub heir_tax_id: Option<String>,
    pub registered_date: Option<NaiveDate>,
    pub members: Option<i64>,
    pub percent_owned: Option<f64>,
    pub firm_state: Option<String>,
    pub links: Option<LinkUpdate>,
}

impl PartyRecord {
    /// Merge the scalar fields of an update onto the stored record,
    /// returning the draft that should replace it. Link changes are
    /// resolved separately by the link registry.
    pub fn merged(&self, update: &PartyUpdate) -> PartyDraft {
        let firm = self.firm.as_ref().map(|f| FirmDetails {
            registered_date: update.registered_date.unwrap_or(f.registered_date),
            members: update.members.unwrap_or(f.members),
            percent_owned: update.percent_owned.unwrap_or(f.percent_owned),
            state: update.firm_state.clone().unwrap_or_else(|| f.state.clone()),
        });
        PartyDraft {
            kind: self.kind,
            name: update.name.clone().unwrap_or_else(|| self.name.clone()),
            phone: update.phone.clone().unwrap_or_else(|| self.phone.clone()),
            email: update.email.clone().unwrap_or_else(|| self.email.clone()),
            address: update
                .address
                .clone()
                .unwrap_or_else(|| self.address.clone()),
            tax_id: update.tax_id.clone().unwrap_or_else(|| self.tax_id.clone()),
            national_id: update
                .national_id
                .clone()
                .unwrap_or_else(|| self.national_id.clone()),
            heir_name: update.heir_name.clone().or_else(|| self.heir_name.clone()),
            heir_tax_id: update
                .heir_tax_id
                .clone()
                .or_else(|| self.heir_tax_id.clone()),
            firm,
            link_accounts: Vec::new(),
        }
    }
}
