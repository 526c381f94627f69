// programs/cover_policy_manager/src/state.rs

use anchor_lang::prelude::*;
use crate::errors::PolicyManagerError;

/// Policy manager configuration
/// PDA seeds: ["manager_config"]
#[account]
#[derive(InitSpace)]
pub struct ManagerConfig {
    pub claims_processor_program: Pubkey,

    /// PDA the claims processor signs `mark_policy_claimed` with
    pub claims_processor_authority: Pubkey,

    /// Id the next policy will receive
    pub next_policy_id: u64,

    pub total_premiums_collected: u64,

    pub total_policies_claimed: u64,

    pub total_policies_expired: u64,

    /// Bump seed
    pub bump: u8,

    /// Bump of the ["policy_manager_authority"] PDA that signs treasury calls
    pub authority_bump: u8,
}

impl ManagerConfig {
    pub const SEED_PREFIX: &'static [u8] = b"manager_config";
    pub const FIRST_POLICY_ID: u64 = 1;

    pub fn is_claims_caller(&self, key: &Pubkey) -> bool {
        self.claims_processor_authority == *key
    }

    /// Record a priced policy under the next id. Nothing is written unless
    /// the terms are valid and an id is available.
    #[allow(clippy::too_many_arguments)]
    pub fn issue(
        &mut self,
        policy: &mut Policy,
        policyholder: Pubkey,
        risk_id: u64,
        coverage_amount: u64,
        premium: u64,
        height: u64,
        duration: u64,
        bump: u8,
    ) -> Result<u64> {
        let id = self.next_policy_id;
        let next_id = id.checked_add(1).ok_or(PolicyManagerError::MathOverflow)?;

        policy.open(id, policyholder, risk_id, coverage_amount, premium, height, duration, bump)?;

        self.next_policy_id = next_id;
        self.total_premiums_collected = self.total_premiums_collected.saturating_add(premium);
        Ok(id)
    }
}

/// Policy status state machine. Every transition leaves `Active`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum PolicyStatus {
    Active,
    /// An approved claim was paid against the policy
    Claimed,
    /// The validity window closed
    Expired,
    /// Reserved; no instruction produces it
    Cancelled,
}

/// Coverage contract between a policyholder and the pool
/// PDA seeds: ["policy", policy_id]
#[account]
#[derive(InitSpace)]
pub struct Policy {
    pub id: u64,

    pub policyholder: Pubkey,

    pub risk_id: u64,

    pub coverage_amount: u64,

    /// Fixed at creation
    pub premium: u64,

    pub start_height: u64,

    /// Exclusive: the policy is expired at `end_height`
    pub end_height: u64,

    /// Stored status. Readers should use `effective_status`.
    pub status: PolicyStatus,

    pub status_changed_at_height: u64,

    /// Bump seed
    pub bump: u8,
}

impl Policy {
    pub const SEED_PREFIX: &'static [u8] = b"policy";

    pub fn validate_terms(coverage_amount: u64, duration: u64) -> Result<()> {
        require!(coverage_amount > 0, PolicyManagerError::InvalidParameter);
        require!(duration > 0, PolicyManagerError::InvalidParameter);
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    pub fn open(
        &mut self,
        id: u64,
        policyholder: Pubkey,
        risk_id: u64,
        coverage_amount: u64,
        premium: u64,
        height: u64,
        duration: u64,
        bump: u8,
    ) -> Result<()> {
        Self::validate_terms(coverage_amount, duration)?;
        self.end_height = height
            .checked_add(duration)
            .ok_or(PolicyManagerError::MathOverflow)?;
        self.id = id;
        self.policyholder = policyholder;
        self.risk_id = risk_id;
        self.coverage_amount = coverage_amount;
        self.premium = premium;
        self.start_height = height;
        self.status = PolicyStatus::Active;
        self.status_changed_at_height = height;
        self.bump = bump;
        Ok(())
    }

    /// Status as observed at `height`. An active policy past its window reads
    /// as expired even before `expire_policy` persists it.
    pub fn effective_status(&self, height: u64) -> PolicyStatus {
        match self.status {
            PolicyStatus::Active if height >= self.end_height => PolicyStatus::Expired,
            status => status,
        }
    }

    pub fn is_active_at(&self, height: u64) -> bool {
        self.effective_status(height) == PolicyStatus::Active
    }

    /// Copy carrying the effective status, for read paths
    pub fn view_at(&self, height: u64) -> Policy {
        let mut view = self.clone();
        view.status = self.effective_status(height);
        view
    }

    pub fn mark_claimed(&mut self, height: u64) -> Result<()> {
        require!(self.is_active_at(height), PolicyManagerError::InvalidState);
        self.status = PolicyStatus::Claimed;
        self.status_changed_at_height = height;
        Ok(())
    }

    pub fn mark_expired(&mut self, height: u64) -> Result<()> {
        require!(
            self.status == PolicyStatus::Active
                && self.effective_status(height) == PolicyStatus::Expired,
            PolicyManagerError::InvalidState
        );
        self.status = PolicyStatus::Expired;
        self.status_changed_at_height = height;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_policy() -> Policy {
        Policy {
            id: 0,
            policyholder: Pubkey::default(),
            risk_id: 0,
            coverage_amount: 0,
            premium: 0,
            start_height: 0,
            end_height: 0,
            status: PolicyStatus::Active,
            status_changed_at_height: 0,
            bump: 0,
        }
    }

    fn open_policy(start: u64, duration: u64) -> Policy {
        let mut policy = blank_policy();
        policy
            .open(1, Pubkey::new_unique(), 1, 10_000, 1_000, start, duration, 255)
            .unwrap();
        policy
    }

    fn config() -> ManagerConfig {
        ManagerConfig {
            claims_processor_program: Pubkey::new_unique(),
            claims_processor_authority: Pubkey::new_unique(),
            next_policy_id: ManagerConfig::FIRST_POLICY_ID,
            total_premiums_collected: 0,
            total_policies_claimed: 0,
            total_policies_expired: 0,
            bump: 255,
            authority_bump: 254,
        }
    }

    #[test]
    fn test_open_sets_window() {
        let policy = open_policy(100, 1000);
        assert_eq!(policy.start_height, 100);
        assert_eq!(policy.end_height, 1100);
        assert_eq!(policy.status, PolicyStatus::Active);
        assert_eq!(policy.premium, 1_000);
    }

    #[test]
    fn test_open_rejects_bad_terms() {
        let mut policy = open_policy(0, 1);
        assert_eq!(
            policy
                .open(2, Pubkey::new_unique(), 1, 0, 0, 10, 100, 255)
                .unwrap_err(),
            anchor_lang::error::Error::from(PolicyManagerError::InvalidParameter)
        );
        assert_eq!(
            policy
                .open(2, Pubkey::new_unique(), 1, 100, 0, 10, 0, 255)
                .unwrap_err(),
            anchor_lang::error::Error::from(PolicyManagerError::InvalidParameter)
        );
        assert_eq!(
            policy
                .open(2, Pubkey::new_unique(), 1, 100, 0, u64::MAX, 1, 255)
                .unwrap_err(),
            anchor_lang::error::Error::from(PolicyManagerError::MathOverflow)
        );
        assert_eq!(policy.id, 1);
    }

    #[test]
    fn test_issue_assigns_sequential_ids() {
        let mut config = config();
        let holder = Pubkey::new_unique();

        let mut first = blank_policy();
        let id = config
            .issue(&mut first, holder, 7, 10_000, 1_000, 50, 1000, 255)
            .unwrap();
        assert_eq!(id, 1);
        assert_eq!(first.id, 1);
        assert_eq!(first.policyholder, holder);
        assert_eq!(first.risk_id, 7);
        assert_eq!(first.end_height, 1050);

        let mut second = blank_policy();
        let id = config
            .issue(&mut second, holder, 7, 5_000, 500, 60, 10, 254)
            .unwrap();
        assert_eq!(id, 2);
        assert_eq!(config.next_policy_id, 3);
        assert_eq!(config.total_premiums_collected, 1_500);
        // Earlier policy keeps the premium it was issued with
        assert_eq!(first.premium, 1_000);
    }

    #[test]
    fn test_failed_issue_consumes_no_id() {
        let mut config = config();
        let mut policy = blank_policy();

        assert_eq!(
            config
                .issue(&mut policy, Pubkey::new_unique(), 1, 0, 0, 10, 100, 255)
                .unwrap_err(),
            anchor_lang::error::Error::from(PolicyManagerError::InvalidParameter)
        );
        assert_eq!(config.next_policy_id, ManagerConfig::FIRST_POLICY_ID);
        assert_eq!(config.total_premiums_collected, 0);

        config.next_policy_id = u64::MAX;
        assert_eq!(
            config
                .issue(&mut policy, Pubkey::new_unique(), 1, 100, 10, 10, 100, 255)
                .unwrap_err(),
            anchor_lang::error::Error::from(PolicyManagerError::MathOverflow)
        );
        assert_eq!(policy.coverage_amount, 0);
        assert_eq!(config.total_premiums_collected, 0);
    }

    #[test]
    fn test_effective_status_expires_lazily() {
        let policy = open_policy(100, 1000);
        assert_eq!(policy.effective_status(100), PolicyStatus::Active);
        assert_eq!(policy.effective_status(1099), PolicyStatus::Active);
        assert_eq!(policy.effective_status(1100), PolicyStatus::Expired);
        // Stored status is untouched by reads
        assert_eq!(policy.status, PolicyStatus::Active);
        assert_eq!(policy.view_at(2000).status, PolicyStatus::Expired);
        assert_eq!(policy.view_at(500).status, PolicyStatus::Active);
    }

    #[test]
    fn test_mark_claimed_only_from_active() {
        let mut policy = open_policy(100, 1000);
        policy.mark_claimed(500).unwrap();
        assert_eq!(policy.status, PolicyStatus::Claimed);
        assert_eq!(policy.status_changed_at_height, 500);

        assert_eq!(
            policy.mark_claimed(501).unwrap_err(),
            anchor_lang::error::Error::from(PolicyManagerError::InvalidState)
        );
        // Claimed is terminal, even past the window
        assert_eq!(policy.effective_status(5000), PolicyStatus::Claimed);
    }

    #[test]
    fn test_cannot_claim_expired_policy() {
        let mut policy = open_policy(100, 1000);
        assert!(policy.mark_claimed(1100).is_err());
        assert_eq!(policy.status, PolicyStatus::Active);
    }

    #[test]
    fn test_mark_expired() {
        let mut policy = open_policy(100, 1000);
        assert_eq!(
            policy.mark_expired(1099).unwrap_err(),
            anchor_lang::error::Error::from(PolicyManagerError::InvalidState)
        );
        policy.mark_expired(1100).unwrap();
        assert_eq!(policy.status, PolicyStatus::Expired);
        assert!(policy.mark_expired(1200).is_err());
        assert!(policy.mark_claimed(1200).is_err());
    }

    #[test]
    fn test_active_policy_stays_claimable_until_window_closes() {
        // Only the claims path and expiry move a policy off Active
        let mut policy = open_policy(100, 1000);
        assert!(policy.mark_expired(201).is_err());
        assert_eq!(policy.status, PolicyStatus::Active);
        policy.mark_claimed(201).unwrap();
        assert_eq!(policy.status, PolicyStatus::Claimed);
    }

    #[test]
    fn test_cancelled_is_terminal() {
        let mut policy = open_policy(100, 1000);
        policy.status = PolicyStatus::Cancelled;
        assert_eq!(policy.effective_status(5000), PolicyStatus::Cancelled);
        assert!(policy.mark_claimed(200).is_err());
        assert!(policy.mark_expired(5000).is_err());
    }

    #[test]
    fn test_claims_caller_check() {
        let config = config();
        assert!(config.is_claims_caller(&config.claims_processor_authority));
        assert!(!config.is_claims_caller(&config.claims_processor_program));
        assert!(!config.is_claims_caller(&Pubkey::new_unique()));
    }
}
