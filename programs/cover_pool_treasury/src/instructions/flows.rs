// programs/cover_pool_treasury/src/instructions/flows.rs
//
// Privileged inflow/outflow entry points. Each accepts exactly one peer
// authority PDA, fixed at pool initialization.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount};
use cover_core::current_height;
use crate::state::{PoolConfig, PoolState};
use crate::errors::PoolTreasuryError;
use crate::events::{PremiumReceived, ClaimPayoutSent};

/// Route a policy premium into the pool (policy manager only)
#[derive(Accounts)]
pub struct ProcessPremium<'info> {
    #[account(
        seeds = [PoolConfig::SEED_PREFIX],
        bump = pool_config.bump,
    )]
    pub pool_config: Box<Account<'info, PoolConfig>>,

    #[account(
        mut,
        seeds = [PoolState::SEED_PREFIX],
        bump = pool_state.bump,
    )]
    pub pool_state: Box<Account<'info, PoolState>>,

    #[account(
        mut,
        seeds = [PoolConfig::VAULT_SEED],
        bump = pool_config.vault_bump,
        constraint = pool_vault.key() == pool_config.pool_vault @ PoolTreasuryError::InvalidVault
    )]
    pub pool_vault: Box<Account<'info, TokenAccount>>,

    /// Policyholder's token account
    #[account(
        mut,
        constraint = payer_token_account.mint == pool_config.token_mint @ PoolTreasuryError::InvalidMint
    )]
    pub payer_token_account: Box<Account<'info, TokenAccount>>,

    /// Owner of `payer_token_account`
    pub payer: Signer<'info>,

    /// Policy manager authority PDA
    #[account(
        constraint = pool_config.is_premium_caller(&caller.key()) @ PoolTreasuryError::Unauthorized
    )]
    pub caller: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn process_premium(ctx: Context<ProcessPremium>, amount: u64) -> Result<()> {
    let height = current_height()?;
    let state = &mut ctx.accounts.pool_state;

    state.credit_premium(amount, height)?;

    // A zero-factor profile prices coverage at zero
    if amount > 0 {
        token::transfer(
            CpiContext::new(
                ctx.accounts.token_program.to_account_info(),
                token::Transfer {
                    from: ctx.accounts.payer_token_account.to_account_info(),
                    to: ctx.accounts.pool_vault.to_account_info(),
                    authority: ctx.accounts.payer.to_account_info(),
                },
            ),
            amount,
        )?;
    }

    emit!(PremiumReceived {
        payer: ctx.accounts.payer.key(),
        amount,
        total_funds: state.total_funds,
        height,
    });

    Ok(())
}

/// Pay an approved claim out of withdrawable funds (claims processor only)
#[derive(Accounts)]
pub struct ProcessClaimPayout<'info> {
    #[account(
        seeds = [PoolConfig::SEED_PREFIX],
        bump = pool_config.bump,
    )]
    pub pool_config: Box<Account<'info, PoolConfig>>,

    #[account(
        mut,
        seeds = [PoolState::SEED_PREFIX],
        bump = pool_state.bump,
    )]
    pub pool_state: Box<Account<'info, PoolState>>,

    #[account(
        mut,
        seeds = [PoolConfig::VAULT_SEED],
        bump = pool_config.vault_bump,
        constraint = pool_vault.key() == pool_config.pool_vault @ PoolTreasuryError::InvalidVault
    )]
    pub pool_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = recipient.mint == pool_config.token_mint @ PoolTreasuryError::InvalidMint
    )]
    pub recipient: Box<Account<'info, TokenAccount>>,

    /// Claims processor authority PDA
    #[account(
        constraint = pool_config.is_payout_caller(&caller.key()) @ PoolTreasuryError::Unauthorized
    )]
    pub caller: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn process_claim_payout(ctx: Context<ProcessClaimPayout>, amount: u64) -> Result<()> {
    let height = current_height()?;
    let state = &mut ctx.accounts.pool_state;

    state.debit_payout(amount, height)?;

    if amount > 0 {
        let seeds = &[
            PoolConfig::SEED_PREFIX,
            &[ctx.accounts.pool_config.bump],
        ];
        let signer_seeds = &[&seeds[..]];

        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                token::Transfer {
                    from: ctx.accounts.pool_vault.to_account_info(),
                    to: ctx.accounts.recipient.to_account_info(),
                    authority: ctx.accounts.pool_config.to_account_info(),
                },
                signer_seeds,
            ),
            amount,
        )?;
    }

    let withdrawable_after = state.withdrawable_funds();
    msg!(
        "Claim payout {} sent, withdrawable now {}",
        amount,
        withdrawable_after
    );

    emit!(ClaimPayoutSent {
        recipient: ctx.accounts.recipient.key(),
        amount,
        total_funds: state.total_funds,
        withdrawable_after,
        height,
    });

    Ok(())
}
