//! Withdrawal-queue instructions.
//!
//! The queue converts staked value back to lamports through a request/claim
//! protocol. `request_withdrawals` pulls receipt units from the owner's
//! token account (under a prior SPL allowance to the queue authority) and
//! answers with the request id of the single enqueued item. `claim_withdrawal`
//! pays the requested lamports out to the recipient.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_lang::solana_program::program_error::ProgramError;

/// Discriminator for `request_withdrawals(amounts, owner)`.
pub const REQUEST_WITHDRAWALS: u8 = 0;
/// Discriminator for `claim_withdrawal(request_id)`.
pub const CLAIM_WITHDRAWAL: u8 = 1;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct RequestWithdrawalsParams {
    /// Lamport-denominated amounts, one queue entry each.
    pub amounts: Vec<u64>,
    /// Owner entitled to claim the resulting requests.
    pub owner: Pubkey,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClaimWithdrawalParams {
    pub request_id: u64,
}

/// Account order for `request_withdrawals`:
/// 0. queue state (writable)
/// 1. source receipt token account, debited under allowance (writable)
/// 2. queue receipt custody, credited with the locked units (writable)
/// 3. queue authority, the approved delegate
/// 4. owner of the future claims (writable, signer)
/// 5. SPL Token program
///
/// Answer via return data: the id of the first enqueued request (u64 LE).
pub fn request_withdrawals(
    program_id: Pubkey,
    state: Pubkey,
    source: Pubkey,
    custody: Pubkey,
    queue_authority: Pubkey,
    owner: Pubkey,
    token_program: Pubkey,
    params: RequestWithdrawalsParams,
) -> Result<Instruction> {
    let mut data = vec![REQUEST_WITHDRAWALS];
    data.extend_from_slice(
        &params
            .try_to_vec()
            .map_err(|_| ProgramError::InvalidInstructionData)?,
    );
    Ok(Instruction {
        program_id,
        accounts: vec![
            AccountMeta::new(state, false),
            AccountMeta::new(source, false),
            AccountMeta::new(custody, false),
            AccountMeta::new_readonly(queue_authority, false),
            AccountMeta::new(owner, true),
            AccountMeta::new_readonly(token_program, false),
        ],
        data,
    })
}

/// Account order for `claim_withdrawal`:
/// 0. queue state (writable)
/// 1. recipient of the claimed lamports (writable, signer)
/// 2. System program
pub fn claim_withdrawal(
    program_id: Pubkey,
    state: Pubkey,
    recipient: Pubkey,
    system_program: Pubkey,
    params: ClaimWithdrawalParams,
) -> Result<Instruction> {
    let mut data = vec![CLAIM_WITHDRAWAL];
    data.extend_from_slice(
        &params
            .try_to_vec()
            .map_err(|_| ProgramError::InvalidInstructionData)?,
    );
    Ok(Instruction {
        program_id,
        accounts: vec![
            AccountMeta::new(state, false),
            AccountMeta::new(recipient, true),
            AccountMeta::new_readonly(system_program, false),
        ],
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_encodes_single_item_batch() {
        let owner = Pubkey::new_unique();
        let ix = request_withdrawals(
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            owner,
            Pubkey::new_unique(),
            RequestWithdrawalsParams {
                amounts: vec![5_000_000],
                owner,
            },
        )
        .unwrap();
        assert_eq!(ix.data[0], REQUEST_WITHDRAWALS);
        let params = RequestWithdrawalsParams::deserialize(&mut &ix.data[1..]).unwrap();
        assert_eq!(params.amounts, vec![5_000_000]);
        assert_eq!(params.owner, owner);
    }

    #[test]
    fn claim_encodes_request_id() {
        let ix = claim_withdrawal(
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            ClaimWithdrawalParams { request_id: 9 },
        )
        .unwrap();
        assert_eq!(ix.data[0], CLAIM_WITHDRAWAL);
        let params = ClaimWithdrawalParams::deserialize(&mut &ix.data[1..]).unwrap();
        assert_eq!(params.request_id, 9);
    }
}
