//! Bank account records.

use serde::{Deserialize, Serialize};

use crate::types::{wire_enum, RecordId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountType {
    Savings,
    Current,
    Nro,
}

wire_enum!(AccountType {
    Savings => "SAVINGS",
    Current => "CURRENT",
    Nro     => "NRO",
});

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountRecord {
    pub account_id: RecordId,
    pub holder_name: String,
    pub bank_name: String,
    pub routing_code: String,
    pub number: String,
    pub branch: String,
    pub account_type: AccountType,
    /// The party that owns this account, if any. At most one party may
    /// own an account at any time.
    pub owner_party_id: Option<RecordId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountDraft {
    pub holder_name: String,
    pub bank_name: String,
    pub routing_code: String,
    pub number: String,
    pub branch: String,
    pub account_type: AccountType,
}

/// Field-selective update: `None` keeps the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountUpdate {
    pub holder_name: Option<String>,
    pub bank_name: Option<String>,
    pub routing_code: Option<String>,
    pub number: Option<String>,
    pub branch: Option<String>,
    pub account_type: Option<AccountType>,
}

impl AccountRecord {
    /// Merge an update onto the stored record, returning the draft that
    /// should replace it. Validation runs on the merged result.
    pub fn merged(&self, update: &AccountUpdate) -> AccountDraft {
        AccountDraft {
            holder_name: update
                .holder_name
                .clone()
                .unwrap_or_else(|| self.holder_name.clone()),
            bank_name: update
                .bank_name
                .clone()
                .unwrap_or_else(|| self.bank_name.clone()),
            routing_code: update
                .routing_code
                .clone()
                .unwrap_or_else(|| self.routing_code.clone()),
            number: update.number.clone().unwrap_or_else(|| self.number.clone()),
            branch: update.branch.clone().unwrap_or_else(|| self.branch.clone()),
            account_type: update.account_type.unwrap_or(self.account_type),
        }
    }
}
