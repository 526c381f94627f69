// programs/cover_pool_treasury/src/state.rs

use anchor_lang::prelude::*;
use cover_core::{bps, solvency};
use crate::errors::PoolTreasuryError;

/// Pool configuration and peer wiring
/// PDA seeds: ["pool_config"]
///
/// Also the token authority of the pool vault.
#[account]
#[derive(InitSpace)]
pub struct PoolConfig {
    /// Withdraws funds and sets the reserve ratio
    pub authority: Pubkey,

    /// Mint of the pooled token
    pub token_mint: Pubkey,

    /// Token account holding pooled capital
    pub pool_vault: Pubkey,

    pub policy_manager_program: Pubkey,

    pub claims_processor_program: Pubkey,

    /// PDA the policy manager signs `process_premium` with
    pub policy_manager_authority: Pubkey,

    /// PDA the claims processor signs `process_claim_payout` with
    pub claims_processor_authority: Pubkey,

    /// Bump seed
    pub bump: u8,

    /// Vault bump seed
    pub vault_bump: u8,
}

impl PoolConfig {
    pub const SEED_PREFIX: &'static [u8] = b"pool_config";
    pub const VAULT_SEED: &'static [u8] = b"pool_vault";

    pub fn is_authority(&self, key: &Pubkey) -> bool {
        self.authority == *key
    }

    /// Only the policy manager may route premiums into the pool
    pub fn is_premium_caller(&self, key: &Pubkey) -> bool {
        self.policy_manager_authority == *key
    }

    /// Only the claims processor may draw claim payouts
    pub fn is_payout_caller(&self, key: &Pubkey) -> bool {
        self.claims_processor_authority == *key
    }
}

/// Pooled capital accounting
/// PDA seeds: ["pool_state"]
#[account]
#[derive(InitSpace)]
pub struct PoolState {
    /// Funds held by the pool
    pub total_funds: u64,

    /// Share of `total_funds` that must stay in the pool (bps)
    pub reserve_ratio_bps: u16,

    pub total_deposited: u64,

    pub total_premiums: u64,

    pub total_paid_out: u64,

    pub total_withdrawn: u64,

    pub last_updated_height: u64,

    /// Bump seed
    pub bump: u8,
}

impl PoolState {
    pub const SEED_PREFIX: &'static [u8] = b"pool_state";
    pub const DEFAULT_RESERVE_RATIO_BPS: u16 = 2000; // 20%

    pub fn reserve_amount(&self) -> u64 {
        solvency::reserve_amount(self.total_funds, self.reserve_ratio_bps)
    }

    pub fn withdrawable_funds(&self) -> u64 {
        solvency::withdrawable(self.total_funds, self.reserve_ratio_bps)
    }

    pub fn status(&self) -> PoolStatus {
        PoolStatus {
            total_funds: self.total_funds,
            reserve_ratio_bps: self.reserve_ratio_bps,
            reserve_amount: self.reserve_amount(),
            withdrawable_funds: self.withdrawable_funds(),
            total_deposited: self.total_deposited,
            total_premiums: self.total_premiums,
            total_paid_out: self.total_paid_out,
            total_withdrawn: self.total_withdrawn,
        }
    }

    pub fn credit_deposit(&mut self, amount: u64, height: u64) -> Result<()> {
        require!(amount > 0, PoolTreasuryError::InvalidParameter);
        self.credit(amount, height)?;
        self.total_deposited = self.total_deposited.saturating_add(amount);
        Ok(())
    }

    pub fn credit_premium(&mut self, amount: u64, height: u64) -> Result<()> {
        self.credit(amount, height)?;
        self.total_premiums = self.total_premiums.saturating_add(amount);
        Ok(())
    }

    pub fn debit_withdrawal(&mut self, amount: u64, height: u64) -> Result<()> {
        self.release(amount, height)?;
        self.total_withdrawn = self.total_withdrawn.saturating_add(amount);
        Ok(())
    }

    pub fn debit_payout(&mut self, amount: u64, height: u64) -> Result<()> {
        self.release(amount, height)?;
        self.total_paid_out = self.total_paid_out.saturating_add(amount);
        Ok(())
    }

    /// Returns the previous ratio
    pub fn set_reserve_ratio(&mut self, ratio_bps: u32, height: u64) -> Result<u16> {
        let ratio = bps::checked_ratio(ratio_bps).ok_or(PoolTreasuryError::InvalidParameter)?;
        let old = self.reserve_ratio_bps;
        self.reserve_ratio_bps = ratio;
        self.last_updated_height = height;
        Ok(old)
    }

    fn credit(&mut self, amount: u64, height: u64) -> Result<()> {
        self.total_funds = self
            .total_funds
            .checked_add(amount)
            .ok_or(PoolTreasuryError::MathOverflow)?;
        self.last_updated_height = height;
        Ok(())
    }

    /// Withdrawable is recomputed from the current balance and ratio on every
    /// outflow.
    fn release(&mut self, amount: u64, height: u64) -> Result<()> {
        require!(
            solvency::can_release(self.total_funds, self.reserve_ratio_bps, amount),
            PoolTreasuryError::InsufficientFunds
        );
        self.total_funds = self
            .total_funds
            .checked_sub(amount)
            .ok_or(PoolTreasuryError::MathOverflow)?;
        self.last_updated_height = height;
        Ok(())
    }
}

/// Snapshot of pool figures returned by `get_pool_status`
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct PoolStatus {
    pub total_funds: u64,
    pub reserve_ratio_bps: u16,
    pub reserve_amount: u64,
    pub withdrawable_funds: u64,
    pub total_deposited: u64,
    pub total_premiums: u64,
    pub total_paid_out: u64,
    pub total_withdrawn: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(total_funds: u64) -> PoolState {
        PoolState {
            total_funds,
            reserve_ratio_bps: PoolState::DEFAULT_RESERVE_RATIO_BPS,
            total_deposited: total_funds,
            total_premiums: 0,
            total_paid_out: 0,
            total_withdrawn: 0,
            last_updated_height: 0,
            bump: 255,
        }
    }

    fn config() -> PoolConfig {
        PoolConfig {
            authority: Pubkey::new_unique(),
            token_mint: Pubkey::new_unique(),
            pool_vault: Pubkey::new_unique(),
            policy_manager_program: Pubkey::new_unique(),
            claims_processor_program: Pubkey::new_unique(),
            policy_manager_authority: Pubkey::new_unique(),
            claims_processor_authority: Pubkey::new_unique(),
            bump: 255,
            vault_bump: 254,
        }
    }

    #[test]
    fn test_withdraw_respects_reserve() {
        let mut state = pool(1000);
        assert_eq!(state.reserve_amount(), 200);
        assert_eq!(state.withdrawable_funds(), 800);

        assert_eq!(
            state.debit_withdrawal(900, 5).unwrap_err(),
            anchor_lang::error::Error::from(PoolTreasuryError::InsufficientFunds)
        );
        assert_eq!(state.total_funds, 1000);

        state.debit_withdrawal(700, 6).unwrap();
        assert_eq!(state.total_funds, 300);
        assert_eq!(state.total_withdrawn, 700);
        assert_eq!(state.last_updated_height, 6);
    }

    #[test]
    fn test_withdrawable_recomputed_after_each_outflow() {
        let mut state = pool(1000);
        state.debit_withdrawal(800, 1).unwrap();
        // 200 left, 20% reserve -> 160 withdrawable
        assert_eq!(state.withdrawable_funds(), 160);
        assert!(state.debit_payout(161, 2).is_err());
        state.debit_payout(160, 2).unwrap();
        assert_eq!(state.total_funds, 40);
        assert_eq!(state.total_paid_out, 160);
    }

    #[test]
    fn test_withdrawable_never_exceeds_total() {
        for total in [0u64, 1, 7, 999, 1000, u64::MAX] {
            for ratio in [0u16, 1, 2000, 9999, 10_000] {
                let mut state = pool(total);
                state.reserve_ratio_bps = ratio;
                assert!(state.withdrawable_funds() <= state.total_funds);
                assert_eq!(
                    state.withdrawable_funds() + state.reserve_amount(),
                    state.total_funds
                );
            }
        }
    }

    #[test]
    fn test_deposit_rejects_zero() {
        let mut state = pool(0);
        assert_eq!(
            state.credit_deposit(0, 1).unwrap_err(),
            anchor_lang::error::Error::from(PoolTreasuryError::InvalidParameter)
        );
        state.credit_deposit(500, 1).unwrap();
        assert_eq!(state.total_funds, 500);
        assert_eq!(state.total_deposited, 500);
    }

    #[test]
    fn test_credit_overflow() {
        let mut state = pool(u64::MAX);
        assert_eq!(
            state.credit_premium(1, 1).unwrap_err(),
            anchor_lang::error::Error::from(PoolTreasuryError::MathOverflow)
        );
        assert_eq!(state.total_funds, u64::MAX);
    }

    #[test]
    fn test_premium_credit() {
        let mut state = pool(1000);
        state.credit_premium(15_000, 3).unwrap();
        assert_eq!(state.total_funds, 16_000);
        assert_eq!(state.total_premiums, 15_000);
        assert_eq!(state.total_deposited, 1000);
    }

    #[test]
    fn test_reserve_ratio_bounds() {
        let mut state = pool(1000);
        assert_eq!(state.set_reserve_ratio(10_000, 1).unwrap(), 2000);
        assert_eq!(state.withdrawable_funds(), 0);
        assert!(state.debit_withdrawal(1, 2).is_err());

        assert_eq!(state.set_reserve_ratio(0, 3).unwrap(), 10_000);
        assert_eq!(state.withdrawable_funds(), 1000);

        assert_eq!(
            state.set_reserve_ratio(10_001, 4).unwrap_err(),
            anchor_lang::error::Error::from(PoolTreasuryError::InvalidParameter)
        );
        assert_eq!(state.reserve_ratio_bps, 0);

        // Wider than the stored field still reports InvalidParameter
        assert_eq!(
            state.set_reserve_ratio(70_000, 5).unwrap_err(),
            anchor_lang::error::Error::from(PoolTreasuryError::InvalidParameter)
        );
        assert_eq!(state.reserve_ratio_bps, 0);
        assert_eq!(state.last_updated_height, 3);
    }

    #[test]
    fn test_status_views_are_idempotent() {
        let state = pool(1000);
        let first = state.status();
        assert_eq!(first.reserve_amount, 200);
        assert_eq!(first.withdrawable_funds, 800);
        assert_eq!(state.status(), first);
        assert_eq!(state.total_funds, 1000);
    }

    #[test]
    fn test_peer_identity_checks() {
        let config = config();
        let stranger = Pubkey::new_unique();

        assert!(config.is_premium_caller(&config.policy_manager_authority));
        assert!(!config.is_premium_caller(&config.claims_processor_authority));
        assert!(!config.is_premium_caller(&config.authority));
        assert!(!config.is_premium_caller(&stranger));

        assert!(config.is_payout_caller(&config.claims_processor_authority));
        assert!(!config.is_payout_caller(&config.policy_manager_authority));
        assert!(!config.is_payout_caller(&config.authority));
        assert!(!config.is_payout_caller(&stranger));

        // Program ids themselves are not accepted, only their signing PDAs
        assert!(!config.is_premium_caller(&config.policy_manager_program));
        assert!(!config.is_payout_caller(&config.claims_processor_program));
    }

    #[test]
    fn test_vault_address_rederives_from_stored_bump() {
        let (vault, vault_bump) =
            Pubkey::find_program_address(&[PoolConfig::VAULT_SEED], &crate::ID);
        let mut config = config();
        config.pool_vault = vault;
        config.vault_bump = vault_bump;

        let rederived =
            Pubkey::create_program_address(&[PoolConfig::VAULT_SEED, &[config.vault_bump]], &crate::ID)
                .unwrap();
        assert_eq!(rederived, config.pool_vault);
    }
}
