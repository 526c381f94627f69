// programs/cover_claims_processor/src/state.rs

use anchor_lang::prelude::*;
use cover_policy_manager::state::Policy;
use crate::errors::ClaimsError;

/// Claims processor configuration
/// PDA seeds: ["claims_config"]
#[account]
#[derive(InitSpace)]
pub struct ClaimsConfig {
    /// Adjudicates pending claims
    pub authority: Pubkey,

    /// Id the next claim will receive
    pub next_claim_id: u64,

    /// Reject claims larger than the policy's coverage amount
    pub cap_claims_at_coverage: bool,

    pub total_claims_approved: u64,

    pub total_claims_rejected: u64,

    pub total_paid_out: u64,

    /// Bump seed
    pub bump: u8,

    /// Bump of the ["claims_processor_authority"] PDA
    pub authority_bump: u8,
}

impl ClaimsConfig {
    pub const SEED_PREFIX: &'static [u8] = b"claims_config";
    pub const FIRST_CLAIM_ID: u64 = 1;
    pub const DEFAULT_CAP_CLAIMS_AT_COVERAGE: bool = true;

    pub fn allocate_claim_id(&mut self) -> Result<u64> {
        let id = self.next_claim_id;
        self.next_claim_id = id.checked_add(1).ok_or(ClaimsError::MathOverflow)?;
        Ok(id)
    }

    pub fn is_authority(&self, key: &Pubkey) -> bool {
        self.authority == *key
    }

    /// Checks a new claim against its policy, in order: ownership, policy
    /// status, amount.
    pub fn validate_filing(
        &self,
        policy: &Policy,
        claimant: &Pubkey,
        amount: u64,
        height: u64,
    ) -> Result<()> {
        require_keys_eq!(policy.policyholder, *claimant, ClaimsError::Unauthorized);
        require!(policy.is_active_at(height), ClaimsError::InvalidState);
        require!(amount > 0, ClaimsError::InvalidParameter);
        self.check_cap(policy, amount)
    }

    /// Checks run before an approval touches any peer: the claim is pending,
    /// its policy is still active, and the amount fits the cap as configured
    /// now (not as it was at filing).
    pub fn plan_approval(&self, claim: &Claim, policy: &Policy, height: u64) -> Result<Settlement> {
        claim.ensure_pending()?;
        require!(policy.is_active_at(height), ClaimsError::InvalidState);
        self.check_cap(policy, claim.amount)?;
        Ok(Settlement {
            claim_id: claim.id,
            policy_id: claim.policy_id,
            amount: claim.amount,
        })
    }

    /// Final step of an approval, after the policy is marked claimed and the
    /// payout has gone out.
    pub fn settle(&mut self, claim: &mut Claim, settlement: &Settlement, height: u64) -> Result<()> {
        claim.approve(height)?;
        self.total_claims_approved = self.total_claims_approved.saturating_add(1);
        self.total_paid_out = self.total_paid_out.saturating_add(settlement.amount);
        Ok(())
    }

    /// Rejection changes the claim only
    pub fn dismiss(&mut self, claim: &mut Claim, height: u64) -> Result<()> {
        claim.reject(height)?;
        self.total_claims_rejected = self.total_claims_rejected.saturating_add(1);
        Ok(())
    }

    fn check_cap(&self, policy: &Policy, amount: u64) -> Result<()> {
        if self.cap_claims_at_coverage {
            require!(amount <= policy.coverage_amount, ClaimsError::InvalidParameter);
        }
        Ok(())
    }
}

/// Payout owed by an approval that passed `plan_approval`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub claim_id: u64,
    pub policy_id: u64,
    pub amount: u64,
}

/// Claim status. Approved and Rejected are terminal.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum ClaimStatus {
    Pending,
    Approved,
    Rejected,
}

/// Request for payout against a policy
/// PDA seeds: ["claim", claim_id]
#[account]
#[derive(InitSpace)]
pub struct Claim {
    pub id: u64,

    pub policy_id: u64,

    pub claimant: Pubkey,

    pub amount: u64,

    pub status: ClaimStatus,

    pub filed_at_height: u64,

    /// Zero while pending
    pub resolved_at_height: u64,

    /// Bump seed
    pub bump: u8,
}

impl Claim {
    pub const SEED_PREFIX: &'static [u8] = b"claim";

    pub fn is_pending(&self) -> bool {
        self.status == ClaimStatus::Pending
    }

    pub fn ensure_pending(&self) -> Result<()> {
        require!(self.is_pending(), ClaimsError::InvalidState);
        Ok(())
    }

    pub fn approve(&mut self, height: u64) -> Result<()> {
        self.resolve(ClaimStatus::Approved, height)
    }

    pub fn reject(&mut self, height: u64) -> Result<()> {
        self.resolve(ClaimStatus::Rejected, height)
    }

    fn resolve(&mut self, to: ClaimStatus, height: u64) -> Result<()> {
        self.ensure_pending()?;
        self.status = to;
        self.resolved_at_height = height;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cover_policy_manager::state::PolicyStatus;

    fn config() -> ClaimsConfig {
        ClaimsConfig {
            authority: Pubkey::new_unique(),
            next_claim_id: ClaimsConfig::FIRST_CLAIM_ID,
            cap_claims_at_coverage: ClaimsConfig::DEFAULT_CAP_CLAIMS_AT_COVERAGE,
            total_claims_approved: 0,
            total_claims_rejected: 0,
            total_paid_out: 0,
            bump: 255,
            authority_bump: 254,
        }
    }

    fn policy(holder: Pubkey) -> Policy {
        Policy {
            id: 1,
            policyholder: holder,
            risk_id: 1,
            coverage_amount: 10_000,
            premium: 1_000,
            start_height: 100,
            end_height: 1100,
            status: PolicyStatus::Active,
            status_changed_at_height: 100,
            bump: 255,
        }
    }

    fn pending_claim(claimant: Pubkey, amount: u64) -> Claim {
        Claim {
            id: 1,
            policy_id: 1,
            claimant,
            amount,
            status: ClaimStatus::Pending,
            filed_at_height: 200,
            resolved_at_height: 0,
            bump: 255,
        }
    }

    fn err(e: ClaimsError) -> anchor_lang::error::Error {
        anchor_lang::error::Error::from(e)
    }

    #[test]
    fn test_filing_by_policyholder() {
        let config = config();
        let holder = Pubkey::new_unique();
        let policy = policy(holder);
        assert!(config.validate_filing(&policy, &holder, 5_000, 200).is_ok());
        assert!(config.validate_filing(&policy, &holder, 10_000, 200).is_ok());
    }

    #[test]
    fn test_filing_by_stranger() {
        let config = config();
        let policy = policy(Pubkey::new_unique());
        let result = config.validate_filing(&policy, &Pubkey::new_unique(), 5_000, 200);
        assert!(result.is_err());
        // require_keys_eq! attaches the compared keys, so compare the name
        match result.unwrap_err() {
            anchor_lang::error::Error::AnchorError(e) => {
                assert_eq!(e.error_name, "Unauthorized");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_filing_against_inactive_policy() {
        let config = config();
        let holder = Pubkey::new_unique();
        let mut policy = policy(holder);

        // Past the window
        assert_eq!(
            config.validate_filing(&policy, &holder, 5_000, 1100).unwrap_err(),
            err(ClaimsError::InvalidState)
        );

        policy.status = PolicyStatus::Claimed;
        assert_eq!(
            config.validate_filing(&policy, &holder, 5_000, 200).unwrap_err(),
            err(ClaimsError::InvalidState)
        );

        policy.status = PolicyStatus::Cancelled;
        assert!(config.validate_filing(&policy, &holder, 5_000, 200).is_err());
    }

    #[test]
    fn test_filing_amount_checks() {
        let mut config = config();
        let holder = Pubkey::new_unique();
        let policy = policy(holder);

        assert_eq!(
            config.validate_filing(&policy, &holder, 0, 200).unwrap_err(),
            err(ClaimsError::InvalidParameter)
        );
        assert_eq!(
            config.validate_filing(&policy, &holder, 10_001, 200).unwrap_err(),
            err(ClaimsError::InvalidParameter)
        );

        config.cap_claims_at_coverage = false;
        assert!(config.validate_filing(&policy, &holder, 10_001, 200).is_ok());
        assert!(config.validate_filing(&policy, &holder, 0, 200).is_err());
    }

    #[test]
    fn test_approval_settles_once() {
        let mut config = config();
        let holder = Pubkey::new_unique();
        let policy = policy(holder);
        let mut claim = pending_claim(holder, 5_000);

        let settlement = config.plan_approval(&claim, &policy, 300).unwrap();
        assert_eq!(
            settlement,
            Settlement { claim_id: 1, policy_id: 1, amount: 5_000 }
        );
        config.settle(&mut claim, &settlement, 300).unwrap();
        assert_eq!(claim.status, ClaimStatus::Approved);
        assert_eq!(claim.resolved_at_height, 300);
        assert_eq!(config.total_claims_approved, 1);
        assert_eq!(config.total_paid_out, 5_000);

        // Second attempt is refused before any payout is planned
        assert_eq!(
            config.plan_approval(&claim, &policy, 301).unwrap_err(),
            err(ClaimsError::InvalidState)
        );
        assert_eq!(
            config.settle(&mut claim, &settlement, 301).unwrap_err(),
            err(ClaimsError::InvalidState)
        );
        assert_eq!(config.total_claims_approved, 1);
        assert_eq!(config.total_paid_out, 5_000);
    }

    #[test]
    fn test_approval_requires_active_policy() {
        let config = config();
        let holder = Pubkey::new_unique();
        let mut policy = policy(holder);
        let claim = pending_claim(holder, 5_000);

        assert_eq!(
            config.plan_approval(&claim, &policy, 1100).unwrap_err(),
            err(ClaimsError::InvalidState)
        );

        policy.status = PolicyStatus::Claimed;
        assert_eq!(
            config.plan_approval(&claim, &policy, 300).unwrap_err(),
            err(ClaimsError::InvalidState)
        );
        assert_eq!(claim.status, ClaimStatus::Pending);
    }

    #[test]
    fn test_cap_reapplied_at_approval() {
        let mut config = config();
        let holder = Pubkey::new_unique();
        let policy = policy(holder);

        config.cap_claims_at_coverage = false;
        config.validate_filing(&policy, &holder, 20_000, 200).unwrap();
        let claim = pending_claim(holder, 20_000);
        assert!(config.plan_approval(&claim, &policy, 300).is_ok());

        config.cap_claims_at_coverage = true;
        assert_eq!(
            config.plan_approval(&claim, &policy, 300).unwrap_err(),
            err(ClaimsError::InvalidParameter)
        );
    }

    #[test]
    fn test_dismiss_touches_claim_only() {
        let mut config = config();
        let holder = Pubkey::new_unique();
        let policy = policy(holder);
        let mut claim = pending_claim(holder, 5_000);

        config.dismiss(&mut claim, 300).unwrap();
        assert_eq!(claim.status, ClaimStatus::Rejected);
        assert_eq!(config.total_claims_rejected, 1);
        assert_eq!(config.total_paid_out, 0);
        assert_eq!(policy.status, PolicyStatus::Active);

        assert_eq!(config.dismiss(&mut claim, 301).unwrap_err(), err(ClaimsError::InvalidState));
        assert!(config.plan_approval(&claim, &policy, 301).is_err());
        assert_eq!(config.total_claims_rejected, 1);
    }

    #[test]
    fn test_claim_ids() {
        let mut config = config();
        assert_eq!(config.allocate_claim_id().unwrap(), 1);
        assert_eq!(config.allocate_claim_id().unwrap(), 2);
        assert_eq!(config.next_claim_id, 3);

        config.next_claim_id = u64::MAX;
        assert_eq!(config.allocate_claim_id().unwrap_err(), err(ClaimsError::MathOverflow));
    }
}
