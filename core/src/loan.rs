//! Loan records. The recipient is a borrower's name, resolved by tax-id
//! lookup when the loan is created.

use serde::{Deserialize, Serialize};

use crate::types::{wire_enum, Money, RecordId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterestFrequency {
    Monthly,
    Quarterly,
    Yearly,
    ThreeYearly,
}

wire_enum!(InterestFrequency {
    Monthly     => "Monthly",
    Quarterly   => "Quarterly",
    Yearly      => "Yearly",
    ThreeYearly => "3Yearly",
});

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanRecord {
    pub loan_id: RecordId,
    pub name: String,
    pub recipient: String,
    /// Running principal, adjusted by principal-flow transactions.
    pub principal: Money,
    pub interest_rate: f64,
    pub interest_frequency: InterestFrequency,
    pub interest_expected: Option<Money>,
    pub interest_realized: Option<Money>,
    pub interest_paid_up: Option<Money>,
    /// Accumulated business expenses charged against this loan.
    pub expenses: Money,
    /// Intended values Active/Inactive/Closed; stored as free text.
    pub state: String,
    pub asset_id: Option<RecordId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanDraft {
    pub name: String,
    /// Tax id of the borrower receiving the loan; resolved to a name.
    pub recipient_tax_id: String,
    pub principal: Money,
    pub interest_rate: f64,
    pub interest_frequency: InterestFrequency,
    #[serde(default)]
    pub interest_expected: Option<Money>,
    #[serde(default)]
    pub interest_realized: Option<Money>,
    #[serde(default)]
    pub interest_paid_up: Option<Money>,
    pub state: String,
    #[serde(default)]
    pub asset_id: Option<RecordId>,
}

/// Field-selective update: `None` keeps the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoanUpdate {
    pub name: Option<String>,
    pub recipient: Option<String>,
    pub principal: Option<Money>,
    pub interest_rate: Option<f64>,
    pub interest_frequency: Option<InterestFrequency>,
    pub interest_expected: Option<Money>,
    pub interest_realized: Option<Money>,
    pub interest_paid_up: Option<Money>,
    pub expenses: Option<Money>,
    pub state: Option<String>,
    pub asset_id: Option<RecordId>,
}

impl LoanRecord {
    /// Merge an update onto the stored record. Optional interest fields
    /// can be set but not cleared, matching the update forms.
    pub fn merged(&self, update: &LoanUpdate) -> LoanRecord {
        LoanRecord {
            loan_id: self.loan_id,
            name: update.name.clone().unwrap_or_else(|| self.name.clone()),
            recipient: update
                .recipient
                .clone()
                .unwrap_or_else(|| self.recipient.clone()),
            principal: update.principal.unwrap_or(self.principal),
            interest_rate: update.interest_rate.unwrap_or(self.interest_rate),
            interest_frequency: update
                .interest_frequency
                .unwrap_or(self.interest_frequency),
            interest_expected: update.interest_expected.or(self.interest_expected),
            interest_realized: update.interest_realized.or(self.interest_realized),
            interest_paid_up: update.interest_paid_up.or(self.interest_paid_up),
            expenses: update.expenses.unwrap_or(self.expenses),
            state: update.state.clone().unwrap_or_else(|| self.state.clone()),
            asset_id: update.asset_id.or(self.asset_id),
        }
    }
}
