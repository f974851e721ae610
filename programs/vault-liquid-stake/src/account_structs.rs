use crate::error::*;
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

#[allow(deprecated)]
use anchor_lang::solana_program::bpf_loader_upgradeable::{self};

// Helper function to derive the program data address
fn get_program_data_address(program_id: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[program_id.as_ref()], &bpf_loader_upgradeable::id()).0
}

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = signer,
        space = VaultConfig::LEN,
        seeds = [b"vault_config"],
        bump
    )]
    pub vault_config: Account<'info, VaultConfig>,

    /// CHECK: System-owned PDA that holds native lamports in flight and owns
    /// the vault token accounts. It doubles as the bare receive entry point:
    /// lamports can be sent to it directly with no program involvement.
    #[account(
        seeds = [b"vault_authority"],
        bump
    )]
    pub vault_authority: UncheckedAccount<'info>,

    /// Deposits arrive as the wrapped native asset only; anything else has
    /// no unwrap path.
    #[account(
        constraint = base_asset_mint.key() == anchor_spl::token::spl_token::native_mint::ID @ VaultError::InvalidBaseAssetMint
    )]
    pub base_asset_mint: Account<'info, Mint>,

    #[account(
        constraint = share_mint.key() != base_asset_mint.key() @ VaultError::ShareAndAssetCannotBeSame,
        constraint = share_mint.supply == 0 @ VaultError::ShareMintNotEmpty
    )]
    pub share_mint: Account<'info, Mint>,

    /// CHECK: PDA mint authority for the share mint, validated by seeds
    #[account(
        seeds = [b"mint_authority"],
        bump,
        constraint = mint_authority.key() == share_mint.mint_authority.unwrap() @ VaultError::InvalidMintAuthority
    )]
    pub mint_authority: UncheckedAccount<'info>,

    pub receipt_mint: Account<'info, Mint>,

    /// Wrapped-asset custody; retained redemption fees accumulate here.
    #[account(
        init,
        payer = signer,
        seeds = [b"vault_assets"],
        bump,
        token::mint = base_asset_mint,
        token::authority = vault_authority,
    )]
    pub vault_asset_account: Account<'info, TokenAccount>,

    /// Receipt-unit custody; its balance is the provider-reported staked
    /// position and is always read live, never cached in config.
    #[account(
        init,
        payer = signer,
        seeds = [b"vault_receipts"],
        bump,
        token::mint = receipt_mint,
        token::authority = vault_authority,
    )]
    pub vault_receipt_account: Account<'info, TokenAccount>,

    /// CHECK: opaque staking-provider program, only required to be executable
    #[account(
        constraint = staking_provider.executable @ VaultError::InvalidStakingProvider
    )]
    pub staking_provider: UncheckedAccount<'info>,

    /// CHECK: provider state account, passed through to provider instructions
    pub provider_state: UncheckedAccount<'info>,

    /// CHECK: opaque withdrawal-queue program, only required to be executable
    #[account(
        constraint = withdrawal_queue.executable @ VaultError::InvalidWithdrawalQueue
    )]
    pub withdrawal_queue: UncheckedAccount<'info>,

    /// CHECK: queue state account, passed through to queue instructions
    pub queue_state: UncheckedAccount<'info>,

    #[account(mut)]
    pub signer: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,

    /// CHECK: This is the program data account that contains the update authority
    #[account(
        constraint = program_data.key() == get_program_data_address(&crate::id()) @ VaultError::InvalidProgramData
    )]
    pub program_data: UncheckedAccount<'info>,
}

/// Accounts for the stake-side instructions (`deposit` and `mint`).
#[derive(Accounts)]
pub struct Deposit<'info> {
    #[account(
        mut,
        seeds = [b"vault_config"],
        bump = vault_config.bump
    )]
    pub vault_config: Account<'info, VaultConfig>,

    /// CHECK: System-owned PDA, transient lamport custody during unwrap/stake
    #[account(
        mut,
        seeds = [b"vault_authority"],
        bump
    )]
    pub vault_authority: UncheckedAccount<'info>,

    #[account(
        constraint = base_asset_mint.key() == vault_config.base_asset_mint @ VaultError::InvalidBaseAssetMint
    )]
    pub base_asset_mint: Account<'info, Mint>,

    /// Per-call wrapped-asset account; funded from the payer, then closed to
    /// the vault authority to release the native lamports.
    #[account(
        init,
        payer = signer,
        seeds = [b"unwrap", signer.key().as_ref()],
        bump,
        token::mint = base_asset_mint,
        token::authority = vault_authority,
    )]
    pub unwrap_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = share_mint.key() == vault_config.share_mint @ VaultError::InvalidShareMint
    )]
    pub share_mint: Account<'info, Mint>,

    /// CHECK: PDA mint authority for the share mint, validated by seeds
    #[account(
        seeds = [b"mint_authority"],
        bump,
        constraint = mint_authority.key() == share_mint.mint_authority.unwrap() @ VaultError::InvalidMintAuthority
    )]
    pub mint_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        constraint = receipt_mint.key() == vault_config.receipt_mint @ VaultError::InvalidReceiptMint
    )]
    pub receipt_mint: Account<'info, Mint>,

    #[account(
        mut,
        seeds = [b"vault_receipts"],
        bump,
        token::mint = vault_config.receipt_mint,
        constraint = vault_receipt_account.owner == vault_authority.key() @ VaultError::InvalidVaultAuthority
    )]
    pub vault_receipt_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub signer: Signer<'info>,

    #[account(
        mut,
        token::mint = vault_config.base_asset_mint,
        constraint = user_asset_account.owner == signer.key() @ VaultError::InvalidTokenOwner
    )]
    pub user_asset_account: Account<'info, TokenAccount>,

    /// Share destination; its owner is the `receiver` of the operation.
    #[account(
        mut,
        token::mint = vault_config.share_mint
    )]
    pub receiver_share_account: Account<'info, TokenAccount>,

    /// CHECK: opaque staking-provider program
    #[account(
        constraint = provider_program.key() == vault_config.staking_provider @ VaultError::InvalidStakingProvider
    )]
    pub provider_program: UncheckedAccount<'info>,

    /// CHECK: provider state account, validated against config
    #[account(
        mut,
        constraint = provider_state.key() == vault_config.provider_state @ VaultError::InvalidStakingProvider
    )]
    pub provider_state: UncheckedAccount<'info>,

    /// CHECK: provider reserve that receives the staked lamports; the
    /// provider validates it against its own state
    #[account(mut)]
    pub provider_reserve: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

/// Accounts for the unstake-side instructions (`withdraw` and `redeem`).
#[derive(Accounts)]
pub struct Redeem<'info> {
    #[account(
        mut,
        seeds = [b"vault_config"],
        bump = vault_config.bump
    )]
    pub vault_config: Account<'info, VaultConfig>,

    /// CHECK: System-owned PDA, receives the claimed lamports before re-wrap
    #[account(
        mut,
        seeds = [b"vault_authority"],
        bump
    )]
    pub vault_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [b"vault_assets"],
        bump,
        token::mint = vault_config.base_asset_mint,
        constraint = vault_asset_account.owner == vault_authority.key() @ VaultError::InvalidVaultAuthority
    )]
    pub vault_asset_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = share_mint.key() == vault_config.share_mint @ VaultError::InvalidShareMint
    )]
    pub share_mint: Account<'info, Mint>,

    /// CHECK: share owner; burning is authorized by `signer`, either the
    /// owner itself or an SPL delegate spending its allowance
    pub owner: UncheckedAccount<'info>,

    #[account(
        mut,
        token::mint = vault_config.share_mint,
        constraint = owner_share_account.owner == owner.key() @ VaultError::InvalidTokenOwner
    )]
    pub owner_share_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        token::mint = vault_config.base_asset_mint
    )]
    pub receiver_asset_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [b"vault_receipts"],
        bump,
        token::mint = vault_config.receipt_mint,
        constraint = vault_receipt_account.owner == vault_authority.key() @ VaultError::InvalidVaultAuthority
    )]
    pub vault_receipt_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub signer: Signer<'info>,

    /// CHECK: opaque staking-provider program
    #[account(
        constraint = provider_program.key() == vault_config.staking_provider @ VaultError::InvalidStakingProvider
    )]
    pub provider_program: UncheckedAccount<'info>,

    /// CHECK: provider state account, validated against config
    #[account(
        constraint = provider_state.key() == vault_config.provider_state @ VaultError::InvalidStakingProvider
    )]
    pub provider_state: UncheckedAccount<'info>,

    /// CHECK: opaque withdrawal-queue program
    #[account(
        constraint = queue_program.key() == vault_config.withdrawal_queue @ VaultError::InvalidWithdrawalQueue
    )]
    pub queue_program: UncheckedAccount<'info>,

    /// CHECK: queue state account, validated against config
    #[account(
        mut,
        constraint = queue_state.key() == vault_config.queue_state @ VaultError::InvalidWithdrawalQueue
    )]
    pub queue_state: UncheckedAccount<'info>,

    /// CHECK: queue authority that spends the receipt allowance; the queue
    /// validates it against its own state
    pub queue_authority: UncheckedAccount<'info>,

    /// CHECK: queue custody account credited with the locked receipt units
    #[account(mut)]
    pub queue_receipt_custody: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct SetFee<'info> {
    #[account(
        mut,
        seeds = [b"vault_config"],
        bump = vault_config.bump
    )]
    pub vault_config: Account<'info, VaultConfig>,

    pub signer: Signer<'info>,
}

#[derive(Accounts)]
pub struct FeeView<'info> {
    #[account(
        seeds = [b"vault_config"],
        bump = vault_config.bump
    )]
    pub vault_config: Account<'info, VaultConfig>,
}

/// Read-only accounts shared by the four preview instructions.
#[derive(Accounts)]
pub struct PreviewContext<'info> {
    #[account(
        seeds = [b"vault_config"],
        bump = vault_config.bump
    )]
    pub vault_config: Account<'info, VaultConfig>,

    #[account(
        constraint = share_mint.key() == vault_config.share_mint @ VaultError::InvalidShareMint
    )]
    pub share_mint: Account<'info, Mint>,

    #[account(
        seeds = [b"vault_receipts"],
        bump,
        token::mint = vault_config.receipt_mint
    )]
    pub vault_receipt_account: Account<'info, TokenAccount>,

    /// CHECK: opaque staking-provider program
    #[account(
        constraint = provider_program.key() == vault_config.staking_provider @ VaultError::InvalidStakingProvider
    )]
    pub provider_program: UncheckedAccount<'info>,

    /// CHECK: provider state account, validated against config
    #[account(
        constraint = provider_state.key() == vault_config.provider_state @ VaultError::InvalidStakingProvider
    )]
    pub provider_state: UncheckedAccount<'info>,
}

#[derive(Accounts)]
pub struct Pause<'info> {
    #[account(
        mut,
        seeds = [b"vault_config"],
        bump = vault_config.bump
    )]
    pub vault_config: Account<'info, VaultConfig>,

    /// CHECK: This is the program data account that contains the update authority
    #[account(
        constraint = program_data.key() == get_program_data_address(&crate::id()) @ VaultError::InvalidProgramData
    )]
    pub program_data: UncheckedAccount<'info>,

    pub signer: Signer<'info>,
}

#[derive(Accounts)]
pub struct UpdateFeeAdministrators<'info> {
    #[account(
        mut,
        seeds = [b"vault_config"],
        bump = vault_config.bump
    )]
    pub vault_config: Account<'info, VaultConfig>,

    /// CHECK: This is the program data account that contains the update authority
    #[account(
        constraint = program_data.key() == get_program_data_address(&crate::id()) @ VaultError::InvalidProgramData
    )]
    pub program_data: UncheckedAccount<'info>,

    pub signer: Signer<'info>,
}

#[derive(Accounts)]
pub struct Migrate<'info> {
    #[account(
        mut,
        seeds = [b"vault_config"],
        bump = vault_config.bump
    )]
    pub vault_config: Account<'info, VaultConfig>,

    #[account(
        constraint = share_mint.key() == vault_config.share_mint @ VaultError::InvalidShareMint
    )]
    pub share_mint: Account<'info, Mint>,

    /// CHECK: This is the program data account that contains the update authority
    #[account(
        constraint = program_data.key() == get_program_data_address(&crate::id()) @ VaultError::InvalidProgramData
    )]
    pub program_data: UncheckedAccount<'info>,

    pub signer: Signer<'info>,
}
