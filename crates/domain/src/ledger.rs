//! Role-membership state machine.
//!
//! All role state lives in one [`RoleLedger`] value: capacities, member
//! sets, and the approval/rejection vote maps that gate membership
//! transitions. Every operation either commits fully or returns an
//! [`AccessError`] with the ledger untouched; callers that need mutual
//! exclusion wrap the ledger in a lock and hold it across one whole
//! operation, never across two.

use std::collections::{BTreeMap, BTreeSet};

use conclave_core::{AccessError, AccessResult, AccountId, RoleKey};

/// Per-role membership and vote state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct RoleState {
    /// Grant-time capacity bound. Never enforced retroactively.
    maximum: u64,
    members: BTreeSet<AccountId>,
    /// Approval intents keyed by (voter, candidate).
    approvals: BTreeMap<(AccountId, AccountId), bool>,
    /// Rejection intents keyed by (voter, holder).
    rejections: BTreeMap<(AccountId, AccountId), bool>,
}

/// All role-membership state owned by the access-control core.
///
/// Invariants upheld by every mutation:
/// - `members.len() <= maximum` for every role, checked at grant time;
/// - every account holds at most one role across the whole ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleLedger {
    roles: BTreeMap<RoleKey, RoleState>,
    /// Reverse index enforcing the single-role-per-account invariant.
    holders: BTreeMap<AccountId, RoleKey>,
}

impl RoleLedger {
    /// Creates an empty ledger with no roles configured.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets or overwrites the capacity for a role, creating the role entry
    /// if this is its first configuration.
    ///
    /// Shrinking the maximum below current membership evicts nobody;
    /// capacity is enforced only when granting.
    pub fn set_maximum(&mut self, role: RoleKey, maximum: u64) {
        self.roles.entry(role).or_default().maximum = maximum;
    }

    /// Returns the configured capacity for a role, 0 when unconfigured.
    #[must_use]
    pub fn maximum(&self, role: RoleKey) -> u64 {
        self.roles.get(&role).map_or(0, |state| state.maximum)
    }

    /// Returns the number of current holders of a role.
    #[must_use]
    pub fn member_count(&self, role: RoleKey) -> usize {
        self.roles.get(&role).map_or(0, |state| state.members.len())
    }

    /// Returns the current holders of a role in stable order.
    #[must_use]
    pub fn members(&self, role: RoleKey) -> Vec<AccountId> {
        self.roles
            .get(&role)
            .map(|state| state.members.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Returns whether an account currently holds a role. Never fails.
    #[must_use]
    pub fn has_role(&self, role: RoleKey, account: AccountId) -> bool {
        self.roles
            .get(&role)
            .is_some_and(|state| state.members.contains(&account))
    }

    /// Returns the role an account currently holds, if any.
    #[must_use]
    pub fn role_of(&self, account: AccountId) -> Option<RoleKey> {
        self.holders.get(&account).copied()
    }

    /// Grants a role to an account.
    ///
    /// Preconditions, checked in order: the target must hold no role
    /// anywhere in the ledger, the role must have spare capacity, and —
    /// once the role already has two or more members — at least half of
    /// the current members (rounded up) must have approved this target.
    /// Seeding an empty or single-member role needs no votes.
    ///
    /// On success the target's pending approval votes for this role are
    /// cleared, so a later re-grant starts from a fresh quorum.
    pub fn grant(&mut self, role: RoleKey, target: AccountId) -> AccessResult<()> {
        if let Some(held) = self.holders.get(&target) {
            return Err(AccessError::AlreadyHasRole(format!(
                "account '{target}' already holds role '{held}'"
            )));
        }

        let Some(state) = self.roles.get_mut(&role) else {
            // Unconfigured roles have an effective maximum of 0.
            return Err(AccessError::CapacityOverflow(format!(
                "role '{role}' has no capacity configured"
            )));
        };

        if state.members.len() as u64 >= state.maximum {
            return Err(AccessError::CapacityOverflow(format!(
                "role '{role}' is at its maximum of {}",
                state.maximum
            )));
        }

        if state.members.len() >= 2 {
            let votes = state
                .members
                .iter()
                .filter(|member| {
                    state
                        .approvals
                        .get(&(**member, target))
                        .copied()
                        .unwrap_or(false)
                })
                .count();
            let required = quorum_threshold(state.members.len());
            if votes < required {
                return Err(AccessError::QuorumNotMet(format!(
                    "granting role '{role}' to '{target}' has {votes} of {required} required approvals"
                )));
            }
        }

        state.members.insert(target);
        state.approvals.retain(|(_, candidate), _| *candidate != target);
        self.holders.insert(target, role);
        Ok(())
    }

    /// Revokes a role from an account.
    ///
    /// A sole holder is removable unconditionally. Otherwise at least half
    /// of the other current members (rounded up) must have cast a rejection
    /// vote against the target. On success the target's pending rejection
    /// votes for this role are cleared.
    pub fn revoke(&mut self, role: RoleKey, target: AccountId) -> AccessResult<()> {
        let Some(state) = self.roles.get_mut(&role) else {
            return Err(AccessError::NotAHolder(format!(
                "account '{target}' does not hold role '{role}'"
            )));
        };

        if !state.members.contains(&target) {
            return Err(AccessError::NotAHolder(format!(
                "account '{target}' does not hold role '{role}'"
            )));
        }

        let electorate = state.members.len() - 1;
        if electorate > 0 {
            let votes = state
                .members
                .iter()
                .filter(|member| **member != target)
                .filter(|member| {
                    state
                        .rejections
                        .get(&(**member, target))
                        .copied()
                        .unwrap_or(false)
                })
                .count();
            let required = quorum_threshold(electorate);
            if votes < required {
                return Err(AccessError::QuorumNotMet(format!(
                    "revoking role '{role}' from '{target}' has {votes} of {required} required rejections"
                )));
            }
        }

        state.members.remove(&target);
        state.rejections.retain(|(_, holder), _| *holder != target);
        self.holders.remove(&target);
        Ok(())
    }

    /// Removes an account's own role membership without any quorum.
    ///
    /// The caller-is-account check belongs to the policy layer; here the
    /// account must simply hold the role. Pending rejection votes against
    /// the account are cleared alongside the membership.
    pub fn renounce(&mut self, role: RoleKey, account: AccountId) -> AccessResult<()> {
        let holds = self
            .roles
            .get(&role)
            .is_some_and(|state| state.members.contains(&account));
        if !holds {
            return Err(AccessError::NotAHolder(format!(
                "account '{account}' does not hold role '{role}'"
            )));
        }

        if let Some(state) = self.roles.get_mut(&role) {
            state.members.remove(&account);
            state.rejections.retain(|(_, holder), _| *holder != account);
        }
        self.holders.remove(&account);
        Ok(())
    }

    /// Records a member's intent to approve granting `target` this role.
    ///
    /// Only current members may vote; repeat casts by the same voter
    /// overwrite, so the call is idempotent with respect to quorum counts.
    pub fn record_approval(
        &mut self,
        role: RoleKey,
        voter: AccountId,
        target: AccountId,
        intent: bool,
    ) -> AccessResult<()> {
        let state = self.voting_state(role, voter)?;
        state.approvals.insert((voter, target), intent);
        Ok(())
    }

    /// Records a member's intent to reject retaining `target` in this role.
    ///
    /// Same voter rules as [`RoleLedger::record_approval`].
    pub fn record_rejection(
        &mut self,
        role: RoleKey,
        voter: AccountId,
        target: AccountId,
        intent: bool,
    ) -> AccessResult<()> {
        let state = self.voting_state(role, voter)?;
        state.rejections.insert((voter, target), intent);
        Ok(())
    }

    /// Looks up the role state after checking the voter is a member.
    fn voting_state(&mut self, role: RoleKey, voter: AccountId) -> AccessResult<&mut RoleState> {
        match self.roles.get_mut(&role) {
            Some(state) if state.members.contains(&voter) => Ok(state),
            _ => Err(AccessError::Unauthorized(format!(
                "account '{voter}' does not hold role '{role}' and cannot vote on it"
            ))),
        }
    }
}

/// Votes required from an electorate: at least half, rounded up.
///
/// The observable boundary is that one vote out of a two-member electorate
/// carries, while zero votes never do.
fn quorum_threshold(electorate: usize) -> usize {
    electorate.div_ceil(2)
}
