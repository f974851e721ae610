use crate::account_structs::*;
use crate::error::*;
use crate::events::*;
use crate::guard;
use crate::state::{
    apply_redemption_fee, calculate_assets_to_shares, calculate_required_assets,
    calculate_shares_to_stake_units, migrate_schema, validate_fee_bps, MAX_ADMINISTRATORS,
    SCHEMA_VERSION,
};
use anchor_lang::prelude::*;
use anchor_lang::solana_program::program::{get_return_data, invoke, invoke_signed};
use anchor_lang::system_program;
use anchor_spl::token::{self, Approve, Burn, CloseAccount, MintTo, SyncNative, Transfer};
use staking_interface::provider::{self, SubmitParams};
use staking_interface::queue::{self, ClaimWithdrawalParams, RequestWithdrawalsParams};

/*
# Accounting model

Shares are a proportional claim on the vault's staked position. The position
itself lives with the external staking provider: the vault holds receipt
units in a PDA-owned token account and prices them through the provider's
pricing views on every instruction, never caching the result across calls.

All conversions floor. The gas buffer is reserved from every stake so the
staking call can cover its own execution cost; whatever the call leaves
behind is refunded to the payer in the same instruction.

The redemption fee is charged once, on the gross unstaked value. `withdraw`
treats its input as the gross pre-fee amount; `redeem` derives the gross
value from the shares being burned. Both paths unstake gross, pay the net
amount out and retain the fee in wrapped-asset custody. The asymmetry is in
the input denomination only and is intentional, mirroring the
deposit/redeem preview split.
*/

pub fn initialize(
    ctx: Context<Initialize>,
    fee_bps: u16,
    fee_administrators: Vec<Pubkey>,
    max_deposit: u64,
) -> Result<()> {
    guard::validate_program_update_authority(&ctx.accounts.program_data, &ctx.accounts.signer)?;
    require!(
        fee_administrators.len() <= MAX_ADMINISTRATORS,
        VaultError::TooManyAdministrators
    );
    validate_fee_bps(fee_bps)?;
    require!(
        ctx.accounts.provider_state.key() != Pubkey::default(),
        VaultError::InvalidStakingProvider
    );
    require!(
        ctx.accounts.queue_state.key() != Pubkey::default(),
        VaultError::InvalidWithdrawalQueue
    );

    let config = &mut ctx.accounts.vault_config;
    config.version = SCHEMA_VERSION;
    config.base_asset_mint = ctx.accounts.base_asset_mint.key();
    config.share_mint = ctx.accounts.share_mint.key();
    config.receipt_mint = ctx.accounts.receipt_mint.key();
    config.staking_provider = ctx.accounts.staking_provider.key();
    config.provider_state = ctx.accounts.provider_state.key();
    config.withdrawal_queue = ctx.accounts.withdrawal_queue.key();
    config.queue_state = ctx.accounts.queue_state.key();
    config.fee_basis_points = fee_bps;
    config.max_deposit = max_deposit;
    config.fee_administrators = fee_administrators;
    config.paused = false;
    config.locked = false;
    config.bump = ctx.bumps.vault_config;

    msg!(
        "Vault initialized: provider {}, queue {}, fee {} bps",
        config.staking_provider,
        config.withdrawal_queue,
        config.fee_basis_points
    );
    Ok(())
}

pub fn deposit(ctx: Context<Deposit>, assets: u64) -> Result<u64> {
    guard::acquire_lock(&mut ctx.accounts.vault_config)?;
    require!(!ctx.accounts.vault_config.paused, VaultError::ProtocolPaused);
    require!(assets > 0, VaultError::InvalidAmount);
    require!(
        assets <= ctx.accounts.vault_config.max_deposit,
        VaultError::ExceededMaxDeposit
    );

    // Snapshot before staking: the conversion prices against the position
    // as it stood when the depositor entered.
    let total_shares = ctx.accounts.share_mint.supply;
    let receipt_balance = ctx.accounts.vault_receipt_account.amount;
    let total_staked_value = query_pooled_value(
        &ctx.accounts.provider_program,
        &ctx.accounts.provider_state,
        receipt_balance,
    )?;
    msg!("Current total_shares: {}", total_shares);
    msg!("Current total_staked_value: {}", total_staked_value);
    msg!("Deposit amount: {}", assets);

    let vault_authority_bump = ctx.bumps.vault_authority;
    let outcome = stake_into_provider(ctx.accounts, vault_authority_bump, assets)?;

    let shares = calculate_assets_to_shares(assets, total_shares, total_staked_value)?;
    require!(shares > 0, VaultError::DepositTooSmall);
    msg!("Shares to mint calculated: {}", shares);

    // Mint only after the stake succeeded so a staking failure never leaves
    // shares outstanding.
    mint_shares_to_receiver(ctx.accounts, ctx.bumps.mint_authority, shares)?;

    let total_shares_after = total_shares
        .checked_add(shares)
        .ok_or(VaultError::Overflow)?;
    emit!(DepositEvent {
        user: ctx.accounts.signer.key(),
        receiver: ctx.accounts.receiver_share_account.owner,
        deposit_amount: assets,
        staked_amount: outcome.staked_lamports,
        receipt_units: outcome.receipt_units,
        minted_shares: shares,
        refunded_lamports: outcome.refunded_lamports,
        share_mint: ctx.accounts.share_mint.key(),
        total_shares: total_shares_after,
        totals_last_update_slot: Clock::get()?.slot,
    });

    guard::release_lock(&mut ctx.accounts.vault_config);
    Ok(shares)
}

pub fn mint(ctx: Context<Deposit>, shares: u64) -> Result<u64> {
    guard::acquire_lock(&mut ctx.accounts.vault_config)?;
    require!(!ctx.accounts.vault_config.paused, VaultError::ProtocolPaused);
    require!(shares > 0, VaultError::InvalidAmount);

    let total_shares = ctx.accounts.share_mint.supply;
    let receipt_balance = ctx.accounts.vault_receipt_account.amount;
    let total_staked_value = query_pooled_value(
        &ctx.accounts.provider_program,
        &ctx.accounts.provider_state,
        receipt_balance,
    )?;

    let required_assets = calculate_required_assets(shares, total_shares, total_staked_value)?;
    require!(
        required_assets <= ctx.accounts.vault_config.max_deposit,
        VaultError::ExceededMaxDeposit
    );
    msg!("Required assets for {} shares: {}", shares, required_assets);

    let vault_authority_bump = ctx.bumps.vault_authority;
    stake_into_provider(ctx.accounts, vault_authority_bump, required_assets)?;

    mint_shares_to_receiver(ctx.accounts, ctx.bumps.mint_authority, shares)?;

    let total_shares_after = total_shares
        .checked_add(shares)
        .ok_or(VaultError::Overflow)?;
    emit!(MintEvent {
        user: ctx.accounts.signer.key(),
        receiver: ctx.accounts.receiver_share_account.owner,
        shares,
        assets_paid: required_assets,
        share_mint: ctx.accounts.share_mint.key(),
        total_shares: total_shares_after,
        totals_last_update_slot: Clock::get()?.slot,
    });

    guard::release_lock(&mut ctx.accounts.vault_config);
    Ok(required_assets)
}

pub fn withdraw(ctx: Context<Redeem>, assets: u64) -> Result<u64> {
    guard::acquire_lock(&mut ctx.accounts.vault_config)?;
    require!(!ctx.accounts.vault_config.paused, VaultError::ProtocolPaused);
    require!(assets > 0, VaultError::InvalidAmount);

    let total_shares = ctx.accounts.share_mint.supply;
    let receipt_balance = ctx.accounts.vault_receipt_account.amount;
    let total_staked_value = query_pooled_value(
        &ctx.accounts.provider_program,
        &ctx.accounts.provider_state,
        receipt_balance,
    )?;

    // Deposit-side conversion: `assets` is the gross amount to unstake.
    let shares = calculate_assets_to_shares(assets, total_shares, total_staked_value)?;
    require!(shares > 0, VaultError::InvalidAmount);
    require!(shares <= total_shares, VaultError::InsufficientStakedBalance);
    msg!("Withdraw {} gross assets burns {} shares", assets, shares);

    // Burn before the external unstake calls.
    burn_shares_from_owner(ctx.accounts, shares)?;

    let vault_authority_bump = ctx.bumps.vault_authority;
    unstake_from_provider(ctx.accounts, vault_authority_bump, assets)?;

    let fee_bps = ctx.accounts.vault_config.fee_basis_points;
    let (net_assets, fee) = apply_redemption_fee(assets, fee_bps)?;
    require!(
        ctx.accounts.vault_asset_account.amount >= net_assets,
        VaultError::InsufficientVaultBalance
    );

    // The fee stays behind in wrapped-asset custody.
    transfer_assets_to_receiver(ctx.accounts, vault_authority_bump, net_assets)?;

    let total_shares_after = total_shares
        .checked_sub(shares)
        .ok_or(VaultError::Overflow)?;
    emit!(WithdrawEvent {
        user: ctx.accounts.signer.key(),
        owner: ctx.accounts.owner.key(),
        receiver: ctx.accounts.receiver_asset_account.owner,
        gross_assets: assets,
        net_assets,
        fee_retained: fee,
        shares_burned: shares,
        total_shares: total_shares_after,
        totals_last_update_slot: Clock::get()?.slot,
    });

    guard::release_lock(&mut ctx.accounts.vault_config);
    Ok(shares)
}

pub fn redeem(ctx: Context<Redeem>, shares: u64) -> Result<u64> {
    guard::acquire_lock(&mut ctx.accounts.vault_config)?;
    require!(!ctx.accounts.vault_config.paused, VaultError::ProtocolPaused);
    require!(shares > 0, VaultError::InvalidAmount);

    let total_shares = ctx.accounts.share_mint.supply;
    let receipt_balance = ctx.accounts.vault_receipt_account.amount;

    let gross_units = calculate_shares_to_stake_units(shares, total_shares, receipt_balance)?;
    let gross_value = query_pooled_value(
        &ctx.accounts.provider_program,
        &ctx.accounts.provider_state,
        gross_units,
    )?;
    let fee_bps = ctx.accounts.vault_config.fee_basis_points;
    let (assets, fee) = apply_redemption_fee(gross_value, fee_bps)?;
    require!(assets > 0, VaultError::InvalidAmount);
    msg!("Redeem {} shares for {} net assets", shares, assets);

    // Burn before the external unstake calls.
    burn_shares_from_owner(ctx.accounts, shares)?;

    // Unstake the full gross value; only the net amount leaves custody.
    let vault_authority_bump = ctx.bumps.vault_authority;
    unstake_from_provider(ctx.accounts, vault_authority_bump, gross_value)?;

    require!(
        ctx.accounts.vault_asset_account.amount >= assets,
        VaultError::InsufficientVaultBalance
    );
    // The fee stays behind in wrapped-asset custody.
    transfer_assets_to_receiver(ctx.accounts, vault_authority_bump, assets)?;

    let total_shares_after = total_shares
        .checked_sub(shares)
        .ok_or(VaultError::Overflow)?;
    emit!(RedeemEvent {
        user: ctx.accounts.signer.key(),
        owner: ctx.accounts.owner.key(),
        receiver: ctx.accounts.receiver_asset_account.owner,
        shares_burned: shares,
        gross_value,
        redeemed_assets: assets,
        fee_retained: fee,
        total_shares: total_shares_after,
        totals_last_update_slot: Clock::get()?.slot,
    });

    guard::release_lock(&mut ctx.accounts.vault_config);
    Ok(assets)
}

pub fn set_fee_basis_points(ctx: Context<SetFee>, fee_bps: u16) -> Result<()> {
    let config = &mut ctx.accounts.vault_config;
    require!(
        config
            .fee_administrators
            .contains(&ctx.accounts.signer.key()),
        VaultError::UnauthorizedFeeAdministrator
    );
    validate_fee_bps(fee_bps)?;

    let old_fee_bps = config.fee_basis_points;
    config.fee_basis_points = fee_bps;

    emit!(FeeBasisPointsUpdated {
        admin: ctx.accounts.signer.key(),
        old_fee_bps,
        new_fee_bps: fee_bps,
    });
    Ok(())
}

/// Returns value via return_data for efficient CPI access
pub fn get_fee_basis_points(ctx: Context<FeeView>) -> Result<u64> {
    let fee = ctx.accounts.vault_config.fee_basis_points as u64;
    anchor_lang::solana_program::program::set_return_data(&fee.to_le_bytes());
    Ok(fee)
}

/// Shares a deposit of `assets` would mint right now.
pub fn preview_deposit(ctx: Context<PreviewContext>, assets: u64) -> Result<u64> {
    let shares = preview_assets_to_shares(&ctx, assets)?;
    anchor_lang::solana_program::program::set_return_data(&shares.to_le_bytes());
    Ok(shares)
}

/// Shares a withdrawal of `assets` gross would burn right now. Same
/// conversion as `preview_deposit`.
pub fn preview_withdraw(ctx: Context<PreviewContext>, assets: u64) -> Result<u64> {
    let shares = preview_assets_to_shares(&ctx, assets)?;
    anchor_lang::solana_program::program::set_return_data(&shares.to_le_bytes());
    Ok(shares)
}

/// Net assets `shares` would redeem for right now, fee deducted.
pub fn preview_redeem(ctx: Context<PreviewContext>, shares: u64) -> Result<u64> {
    let assets = preview_shares_to_assets(&ctx, shares)?;
    anchor_lang::solana_program::program::set_return_data(&assets.to_le_bytes());
    Ok(assets)
}

/// Share-denominated preview on the redeem side. Same conversion as
/// `preview_redeem`.
pub fn preview_mint(ctx: Context<PreviewContext>, shares: u64) -> Result<u64> {
    let assets = preview_shares_to_assets(&ctx, shares)?;
    anchor_lang::solana_program::program::set_return_data(&assets.to_le_bytes());
    Ok(assets)
}

pub fn pause(ctx: Context<Pause>, pause: bool) -> Result<()> {
    guard::validate_program_update_authority(&ctx.accounts.program_data, &ctx.accounts.signer)?;
    let config = &mut ctx.accounts.vault_config;
    config.paused = pause;

    msg!("Protocol paused: {}", pause);
    Ok(())
}

pub fn update_fee_administrators(
    ctx: Context<UpdateFeeAdministrators>,
    new_administrators: Vec<Pubkey>,
) -> Result<()> {
    guard::validate_program_update_authority(&ctx.accounts.program_data, &ctx.accounts.signer)?;
    require!(
        new_administrators.len() <= MAX_ADMINISTRATORS,
        VaultError::TooManyAdministrators
    );

    let config = &mut ctx.accounts.vault_config;
    config.fee_administrators = new_administrators;

    msg!(
        "Fee administrators updated. New count: {}",
        config.fee_administrators.len()
    );
    Ok(())
}

/// Bring the config account forward to the current schema. Share supply and
/// holder balances live in SPL accounts and must be bit-identical across a
/// migration; the event records the supply for off-chain verification.
pub fn migrate(ctx: Context<Migrate>) -> Result<()> {
    guard::validate_program_update_authority(&ctx.accounts.program_data, &ctx.accounts.signer)?;

    let config = &mut ctx.accounts.vault_config;
    let (from_version, to_version) = migrate_schema(config)?;

    emit!(VaultMigrated {
        admin: ctx.accounts.signer.key(),
        from_version,
        to_version,
        total_shares: ctx.accounts.share_mint.supply,
    });
    msg!("Migrated config schema {} -> {}", from_version, to_version);
    Ok(())
}

// ========== GATEWAYS ==========

struct StakeOutcome {
    staked_lamports: u64,
    receipt_units: u64,
    refunded_lamports: u64,
}

/// Pull the wrapped asset from the payer, unwrap it, stake everything above
/// the gas buffer with the provider and refund whatever the call leaves on
/// the vault authority.
fn stake_into_provider<'info>(
    accounts: &mut Deposit<'info>,
    vault_authority_bump: u8,
    amount: u64,
) -> Result<StakeOutcome> {
    require!(
        amount > crate::state::GAS_BUFFER_LAMPORTS,
        VaultError::BufferTooSmall
    );

    // Wrapped-asset custody, immediately consumed by the unwrap.
    token::transfer(
        CpiContext::new(
            accounts.token_program.to_account_info(),
            Transfer {
                from: accounts.user_asset_account.to_account_info(),
                to: accounts.unwrap_account.to_account_info(),
                authority: accounts.signer.to_account_info(),
            },
        ),
        amount,
    )?;

    let lamports_before = accounts.vault_authority.lamports();
    let seeds: &[&[u8]] = &[b"vault_authority", &[vault_authority_bump]];
    let signer_seeds = &[&seeds[..]];

    // Unwrap: closing the temp wSOL account releases its lamports (amount
    // plus the temp account's rent) to the vault authority.
    token::close_account(CpiContext::new_with_signer(
        accounts.token_program.to_account_info(),
        CloseAccount {
            account: accounts.unwrap_account.to_account_info(),
            destination: accounts.vault_authority.to_account_info(),
            authority: accounts.vault_authority.to_account_info(),
        },
        signer_seeds,
    ))?;

    let stake_amount = amount - crate::state::GAS_BUFFER_LAMPORTS;
    let receipt_before = accounts.vault_receipt_account.amount;

    let ix = provider::submit(
        accounts.provider_program.key(),
        accounts.provider_state.key(),
        accounts.provider_reserve.key(),
        accounts.vault_authority.key(),
        accounts.receipt_mint.key(),
        accounts.vault_receipt_account.key(),
        accounts.token_program.key(),
        accounts.system_program.key(),
        SubmitParams {
            referral: Pubkey::default(),
            value: stake_amount,
        },
    )?;
    invoke_signed(
        &ix,
        &[
            accounts.provider_state.to_account_info(),
            accounts.provider_reserve.to_account_info(),
            accounts.vault_authority.to_account_info(),
            accounts.receipt_mint.to_account_info(),
            accounts.vault_receipt_account.to_account_info(),
            accounts.token_program.to_account_info(),
            accounts.system_program.to_account_info(),
            accounts.provider_program.to_account_info(),
        ],
        signer_seeds,
    )?;

    accounts.vault_receipt_account.reload()?;
    let receipt_units = accounts
        .vault_receipt_account
        .amount
        .checked_sub(receipt_before)
        .ok_or(VaultError::Overflow)?;
    msg!("Staked {} lamports for {} receipt units", stake_amount, receipt_units);

    // Refund everything the staking call left behind: the unused buffer and
    // the temp account's rent. A failed refund aborts the whole operation.
    let refunded_lamports = accounts
        .vault_authority
        .lamports()
        .saturating_sub(lamports_before);
    if refunded_lamports > 0 {
        system_program::transfer(
            CpiContext::new_with_signer(
                accounts.system_program.to_account_info(),
                system_program::Transfer {
                    from: accounts.vault_authority.to_account_info(),
                    to: accounts.signer.to_account_info(),
                },
                signer_seeds,
            ),
            refunded_lamports,
        )?;
    }

    Ok(StakeOutcome {
        staked_lamports: stake_amount,
        receipt_units,
        refunded_lamports,
    })
}

/// Request `assets` lamports from the withdrawal queue and claim them in the
/// same call, then wrap the claimed value into the vault's wrapped-asset
/// custody. Assumes the queue fulfills synchronously; a delayed queue fails
/// the claim and the whole instruction reverts.
fn unstake_from_provider<'info>(
    accounts: &mut Redeem<'info>,
    vault_authority_bump: u8,
    assets: u64,
) -> Result<u64> {
    let units_needed = query_units_for_value(
        &accounts.provider_program,
        &accounts.provider_state,
        assets,
    )?;
    require!(
        units_needed <= accounts.vault_receipt_account.amount,
        VaultError::InsufficientStakedBalance
    );

    let seeds: &[&[u8]] = &[b"vault_authority", &[vault_authority_bump]];
    let signer_seeds = &[&seeds[..]];

    // Allowance for the queue over the vault's receipt units.
    token::approve(
        CpiContext::new_with_signer(
            accounts.token_program.to_account_info(),
            Approve {
                to: accounts.vault_receipt_account.to_account_info(),
                delegate: accounts.queue_authority.to_account_info(),
                authority: accounts.vault_authority.to_account_info(),
            },
            signer_seeds,
        ),
        units_needed,
    )?;

    let lamports_before = accounts.vault_authority.lamports();

    let ix = queue::request_withdrawals(
        accounts.queue_program.key(),
        accounts.queue_state.key(),
        accounts.vault_receipt_account.key(),
        accounts.queue_receipt_custody.key(),
        accounts.queue_authority.key(),
        accounts.vault_authority.key(),
        accounts.token_program.key(),
        RequestWithdrawalsParams {
            amounts: vec![assets],
            owner: accounts.vault_authority.key(),
        },
    )?;
    invoke_signed(
        &ix,
        &[
            accounts.queue_state.to_account_info(),
            accounts.vault_receipt_account.to_account_info(),
            accounts.queue_receipt_custody.to_account_info(),
            accounts.queue_authority.to_account_info(),
            accounts.vault_authority.to_account_info(),
            accounts.token_program.to_account_info(),
            accounts.queue_program.to_account_info(),
        ],
        signer_seeds,
    )?;
    let (program, data) = get_return_data().ok_or(VaultError::EmptyWithdrawalBatch)?;
    require_keys_eq!(
        program,
        accounts.queue_program.key(),
        VaultError::InvalidWithdrawalQueue
    );
    let request_id =
        staking_interface::parse_u64_return(&data).ok_or(VaultError::EmptyWithdrawalBatch)?;
    emit!(WithdrawalRequested {
        request_id,
        amount: assets,
        owner: accounts.vault_authority.key(),
    });

    let ix = queue::claim_withdrawal(
        accounts.queue_program.key(),
        accounts.queue_state.key(),
        accounts.vault_authority.key(),
        accounts.system_program.key(),
        ClaimWithdrawalParams { request_id },
    )?;
    invoke_signed(
        &ix,
        &[
            accounts.queue_state.to_account_info(),
            accounts.vault_authority.to_account_info(),
            accounts.system_program.to_account_info(),
            accounts.queue_program.to_account_info(),
        ],
        signer_seeds,
    )?;

    let claimed = accounts
        .vault_authority
        .lamports()
        .saturating_sub(lamports_before);
    require!(claimed >= assets, VaultError::UnstakeShortfall);
    msg!("Claimed {} lamports for request {}", claimed, request_id);

    // Wrap the claimed value back into the vault's wrapped-asset account.
    system_program::transfer(
        CpiContext::new_with_signer(
            accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: accounts.vault_authority.to_account_info(),
                to: accounts.vault_asset_account.to_account_info(),
            },
            signer_seeds,
        ),
        assets,
    )?;
    token::sync_native(CpiContext::new(
        accounts.token_program.to_account_info(),
        SyncNative {
            account: accounts.vault_asset_account.to_account_info(),
        },
    ))?;
    accounts.vault_asset_account.reload()?;

    emit!(WithdrawalClaimed {
        request_id,
        claimed_lamports: claimed,
    });
    Ok(request_id)
}

// ========== CPI VIEWS & TOKEN PLUMBING ==========

/// Price `units` receipt units in lamports through the provider.
fn query_pooled_value<'info>(
    provider_program: &UncheckedAccount<'info>,
    provider_state: &UncheckedAccount<'info>,
    units: u64,
) -> Result<u64> {
    if units == 0 {
        return Ok(0);
    }
    let ix = provider::pooled_value_by_units(provider_program.key(), provider_state.key(), units)?;
    invoke(
        &ix,
        &[
            provider_state.to_account_info(),
            provider_program.to_account_info(),
        ],
    )?;
    read_u64_return(provider_program.key())
}

/// Receipt units the provider prices at `value` lamports.
fn query_units_for_value<'info>(
    provider_program: &UncheckedAccount<'info>,
    provider_state: &UncheckedAccount<'info>,
    value: u64,
) -> Result<u64> {
    if value == 0 {
        return Ok(0);
    }
    let ix = provider::units_by_pooled_value(provider_program.key(), provider_state.key(), value)?;
    invoke(
        &ix,
        &[
            provider_state.to_account_info(),
            provider_program.to_account_info(),
        ],
    )?;
    read_u64_return(provider_program.key())
}

fn read_u64_return(expected_program: Pubkey) -> Result<u64> {
    let (program, data) = get_return_data().ok_or(VaultError::MissingReturnData)?;
    require_keys_eq!(program, expected_program, VaultError::MissingReturnData);
    Ok(staking_interface::parse_u64_return(&data).ok_or(VaultError::MissingReturnData)?)
}

fn preview_assets_to_shares(ctx: &Context<PreviewContext>, assets: u64) -> Result<u64> {
    let total_shares = ctx.accounts.share_mint.supply;
    let total_staked_value = query_pooled_value(
        &ctx.accounts.provider_program,
        &ctx.accounts.provider_state,
        ctx.accounts.vault_receipt_account.amount,
    )?;
    calculate_assets_to_shares(assets, total_shares, total_staked_value)
}

fn preview_shares_to_assets(ctx: &Context<PreviewContext>, shares: u64) -> Result<u64> {
    let total_shares = ctx.accounts.share_mint.supply;
    let gross_units = calculate_shares_to_stake_units(
        shares,
        total_shares,
        ctx.accounts.vault_receipt_account.amount,
    )?;
    let gross_value = query_pooled_value(
        &ctx.accounts.provider_program,
        &ctx.accounts.provider_state,
        gross_units,
    )?;
    let (net, _) = apply_redemption_fee(gross_value, ctx.accounts.vault_config.fee_basis_points)?;
    Ok(net)
}

fn mint_shares_to_receiver<'info>(
    accounts: &Deposit<'info>,
    mint_authority_bump: u8,
    shares: u64,
) -> Result<()> {
    let seeds: &[&[u8]] = &[b"mint_authority", &[mint_authority_bump]];
    let signer = &[&seeds[..]];
    token::mint_to(
        CpiContext::new_with_signer(
            accounts.token_program.to_account_info(),
            MintTo {
                mint: accounts.share_mint.to_account_info(),
                to: accounts.receiver_share_account.to_account_info(),
                authority: accounts.mint_authority.to_account_info(),
            },
            signer,
        ),
        shares,
    )
}

fn burn_shares_from_owner<'info>(accounts: &Redeem<'info>, shares: u64) -> Result<()> {
    // SPL burn authorizes either the owner or a delegate spending allowance.
    token::burn(
        CpiContext::new(
            accounts.token_program.to_account_info(),
            Burn {
                mint: accounts.share_mint.to_account_info(),
                from: accounts.owner_share_account.to_account_info(),
                authority: accounts.signer.to_account_info(),
            },
        ),
        shares,
    )
}

fn transfer_assets_to_receiver<'info>(
    accounts: &Redeem<'info>,
    vault_authority_bump: u8,
    amount: u64,
) -> Result<()> {
    let seeds: &[&[u8]] = &[b"vault_authority", &[vault_authority_bump]];
    let signer = &[&seeds[..]];
    token::transfer(
        CpiContext::new_with_signer(
            accounts.token_program.to_account_info(),
            Transfer {
                from: accounts.vault_asset_account.to_account_info(),
                to: accounts.receiver_asset_account.to_account_info(),
                authority: accounts.vault_authority.to_account_info(),
            },
            signer,
        ),
        amount,
    )
}
