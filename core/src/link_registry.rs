//! The link registry: one shared component that decides whether an
//! account may be linked to a party.
//!
//! RULE: an account is owned by at most one party, across all party
//! kinds. Every create and update that touches links consults this
//! module; nothing else decides link eligibility.

use serde::{Deserialize, Serialize};

use crate::{
    error::{LedgerError, LedgerResult},
    party::LinkUpdate,
    store::LedgerStore,
    types::RecordId,
};

/// Why a candidate account was not linked. Skips are reported back to
/// the caller, never treated as fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No account with this id exists.
    UnknownAccount,
    /// Another party already owns the account.
    LinkedElsewhere,
    /// The party already holds this link (or named it twice).
    AlreadyLinked,
    /// Removal was requested for a link the party does not hold.
    NotLinked,
}

impl SkipReason {
    pub fn describe(&self) -> &'static str {
        match self {
            Self::UnknownAccount => "no account found with this id",
            Self::LinkedElsewhere => "already linked to another party",
            Self::AlreadyLinked => "already linked to this party",
            Self::NotLinked => "not linked to this party",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedLink {
    pub account_id: RecordId,
    pub reason: SkipReason,
}

/// Outcome of vetting one batch of candidate links.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinkReport {
    /// Accounts the operation acted on, in request order.
    pub accepted: Vec<RecordId>,
    pub skipped: Vec<SkippedLink>,
}

impl LinkReport {
    fn skip(&mut self, account_id: RecordId, reason: SkipReason) {
        self.skipped.push(SkippedLink { account_id, reason });
    }
}

/// What the store should do to the account table for one party update.
/// Produced here, applied by `LedgerStore` inside the party's unit of
/// work.
#[derive(Debug, Clone, Default)]
pub struct LinkPlan {
    pub release_all: bool,
    pub release: Vec<RecordId>,
    pub claim: Vec<RecordId>,
}

pub struct LinkRegistry<'a> {
    store: &'a LedgerStore,
}

impl<'a> LinkRegistry<'a> {
    pub fn new(store: &'a LedgerStore) -> Self {
        Self { store }
    }

    /// Whether the account is owned by any party other than
    /// `exclude_party`. Passing the updating party's own id keeps its
    /// existing links from reading as conflicts with itself.
    pub fn is_linked(
        &self,
        account_id: RecordId,
        exclude_party: Option<RecordId>,
    ) -> LedgerResult<bool> {
        let account = self
            .store
            .find_account(account_id)?
            .ok_or(LedgerError::NotFound {
                entity: "account",
                id: account_id,
            })?;
        Ok(account
            .owner_party_id
            .is_some_and(|owner| Some(owner) != exclude_party))
    }

    /// Vet candidate links for a party that does not exist yet.
    pub fn vet_for_create(&self, candidates: &[RecordId]) -> LedgerResult<LinkReport> {
        self.vet(candidates, None, &[])
    }

    /// Resolve a link update for an existing party into a storage plan
    /// plus the report of what was accepted and skipped.
    pub fn resolve_update(
        &self,
        party_id: RecordId,
        update: &LinkUpdate,
    ) -> LedgerResult<(LinkPlan, LinkReport)> {
        match update {
            LinkUpdate::Replace { account_ids } => {
                let report = self.vet(account_ids, Some(party_id), &[])?;
                let plan = LinkPlan {
                    release_all: true,
                    claim: report.accepted.clone(),
                    ..LinkPlan::default()
                };
                Ok((plan, report))
            }
            LinkUpdate::Add { account_ids } => {
                let held = self.store.accounts_owned_by(party_id)?;
                let report = self.vet(account_ids, Some(party_id), &held)?;
                let plan = LinkPlan {
                    claim: report.accepted.clone(),
                    ..LinkPlan::default()
                };
                Ok((plan, report))
            }
            LinkUpdate::Remove { account_ids } => {
                let held = self.store.accounts_owned_by(party_id)?;
                let mut report = LinkReport::default();
                for &id in account_ids {
                    if held.contains(&id) && !report.accepted.contains(&id) {
                        report.accepted.push(id);
                    } else {
                        report.skip(id, SkipReason::NotLinked);
                    }
                }
                let plan = LinkPlan {
                    release: report.accepted.clone(),
                    ..LinkPlan::default()
                };
                Ok((plan, report))
            }
            LinkUpdate::Clear => {
                let plan = LinkPlan {
                    release_all: true,
                    ..LinkPlan::default()
                };
                Ok((plan, LinkReport::default()))
            }
        }
    }

    /// A candidate is accepted when the account exists and no party
    /// other than `exclude` owns it. `held` are links the party already
    /// holds, skipped as duplicates rather than re-claimed.
    fn vet(
        &self,
        candidates: &[RecordId],
        exclude: Option<RecordId>,
        held: &[RecordId],
    ) -> LedgerResult<LinkReport> {
        let mut report = LinkReport::default();
        for &id in candidates {
            if report.accepted.contains(&id) || held.contains(&id) {
                report.skip(id, SkipReason::AlreadyLinked);
                continue;
            }
            match self.store.find_account(id)? {
                None => report.skip(id, SkipReason::UnknownAccount),
                Some(account)
                    if account
                        .owner_party_id
                        .is_some_and(|owner| Some(owner) != exclude) =>
                {
                    report.skip(id, SkipReason::LinkedElsewhere)
                }
                Some(_) => report.accepted.push(id),
            }
        }
        Ok(report)
    }
}
