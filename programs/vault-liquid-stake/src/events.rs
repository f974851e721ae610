use anchor_lang::prelude::*;

#[event]
pub struct DepositEvent {
    pub user: Pubkey,
    pub receiver: Pubkey,
    pub deposit_amount: u64,
    pub staked_amount: u64,
    pub receipt_units: u64,
    pub minted_shares: u64,
    pub refunded_lamports: u64,
    pub share_mint: Pubkey,
    pub total_shares: u64,
    pub totals_last_update_slot: u64,
}

#[event]
pub struct MintEvent {
    pub user: Pubkey,
    pub receiver: Pubkey,
    pub shares: u64,
    pub assets_paid: u64,
    pub share_mint: Pubkey,
    pub total_shares: u64,
    pub totals_last_update_slot: u64,
}

#[event]
pub struct WithdrawEvent {
    pub user: Pubkey,
    pub owner: Pubkey,
    pub receiver: Pubkey,
    pub gross_assets: u64,
    pub net_assets: u64,
    pub fee_retained: u64,
    pub shares_burned: u64,
    pub total_shares: u64,
    pub totals_last_update_slot: u64,
}

#[event]
pub struct RedeemEvent {
    pub user: Pubkey,
    pub owner: Pubkey,
    pub receiver: Pubkey,
    pub shares_burned: u64,
    pub gross_value: u64,
    pub redeemed_assets: u64,
    pub fee_retained: u64,
    pub total_shares: u64,
    pub totals_last_update_slot: u64,
}

#[event]
pub struct WithdrawalRequested {
    pub request_id: u64,
    pub amount: u64,
    pub owner: Pubkey,
}

#[event]
pub struct WithdrawalClaimed {
    pub request_id: u64,
    pub claimed_lamports: u64,
}

#[event]
pub struct FeeBasisPointsUpdated {
    pub admin: Pubkey,
    pub old_fee_bps: u16,
    pub new_fee_bps: u16,
}

#[event]
pub struct VaultMigrated {
    pub admin: Pubkey,
    pub from_version: u8,
    pub to_version: u8,
    pub total_shares: u64,
}
