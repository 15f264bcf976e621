//! Transaction records and the balance-propagation rule.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{wire_enum, Money, RecordId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxnType {
    PrincipalFromInvestor,
    PrincipalToInvestor,
    PrincipalToBorrower,
    PrincipalFromBorrower,
    InterestFromBorrower,
    InterestToInvestor,
    BusinessExpenses,
}

wire_enum!(TxnType {
    PrincipalFromInvestor => "PRINCIPAL FROM INVESTOR",
    PrincipalToInvestor   => "PRINCIPAL TO INVESTOR",
    PrincipalToBorrower   => "PRINCIPAL TO BORROWER",
    PrincipalFromBorrower => "PRINCIPAL FROM BORROWER",
    InterestFromBorrower  => "INTEREST FROM BORROWER",
    InterestToInvestor    => "INTEREST TO INVESTOR",
    BusinessExpenses      => "BUSINESS EXPENSES",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseSubtype {
    Legal,
    Travel,
    Registration,
    Brokerage,
    Other,
}

wire_enum!(ExpenseSubtype {
    Legal        => "Legal",
    Travel       => "Travel",
    Registration => "Registration",
    Brokerage    => "Brokerage",
    Other        => "Other",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxnMode {
    Cash,
    Online,
}

wire_enum!(TxnMode {
    Cash   => "CASH",
    Online => "ONLINE",
});

/// How a transaction type moves the referenced loan's running totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanEffect {
    /// principal += amount
    Disburse,
    /// principal -= amount
    Repay,
    /// expenses += amount
    Expense,
}

impl TxnType {
    /// The balance-propagation rule. `None` means the type leaves every
    /// loan untouched.
    pub fn loan_effect(&self) -> Option<LoanEffect> {
        match self {
            Self::PrincipalToBorrower => Some(LoanEffect::Disburse),
            Self::PrincipalFromBorrower => Some(LoanEffect::Repay),
            Self::BusinessExpenses => Some(LoanEffect::Expense),
            _ => None,
        }
    }

    /// Business expenses carry a subtype; no other type does.
    pub fn requires_subtype(&self) -> bool {
        matches!(self, Self::BusinessExpenses)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub txn_id: RecordId,
    pub txn_type: TxnType,
    pub expense_subtype: Option<ExpenseSubtype>,
    pub amount: Money,
    pub mode: TxnMode,
    pub date: NaiveDate,
    pub from_account: Option<RecordId>,
    pub to_account: Option<RecordId>,
    pub loan_id: Option<RecordId>,
    pub via: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionDraft {
    pub txn_type: TxnType,
    #[serde(default)]
    pub expense_subtype: Option<ExpenseSubtype>,
    pub amount: Money,
    pub mode: TxnMode,
    pub date: NaiveDate,
    #[serde(default)]
    pub from_account: Option<RecordId>,
    #[serde(default)]
    pub to_account: Option<RecordId>,
    #[serde(default)]
    pub loan_id: Option<RecordId>,
    #[serde(default)]
    pub via: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Field-selective update: `None` keeps the stored value. Editing a
/// recorded transaction never re-propagates loan balances.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionUpdate {
    pub txn_type: Option<TxnType>,
    pub expense_subtype: Option<ExpenseSubtype>,
    pub amount: Option<Money>,
    pub mode: Option<TxnMode>,
    pub date: Option<NaiveDate>,
    pub from_account: Option<RecordId>,
    pub to_account: Option<RecordId>,
    pub loan_id: Option<RecordId>,
    pub via: Option<String>,
    pub notes: Option<String>,
}

impl TransactionRecord {
    pub fn merged(&self, update: &TransactionUpdate) -> TransactionRecord {
        let txn_type = update.txn_type.unwrap_or(self.txn_type);
        // A type change away from business expenses drops the stored
        // subtype rather than tripping the storage check.
        let expense_subtype = if txn_type.requires_subtype() {
            update.expense_subtype.or(self.expense_subtype)
        } else {
            None
        };
        TransactionRecord {
            txn_id: self.txn_id,
            txn_type,
            expense_subtype,
            amount: update.amount.unwrap_or(self.amount),
            mode: update.mode.unwrap_or(self.mode),
            date: update.date.unwrap_or(self.date),
            from_account: update.from_account.or(self.from_account),
            to_account: update.to_account.or(self.to_account),
            loan_id: update.loan_id.or(self.loan_id),
            via: update.via.clone().or_else(|| self.via.clone()),
            notes: update.notes.clone().or_else(|| self.notes.clone()),
        }
    }
}
