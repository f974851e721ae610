use anchor_lang::prelude::*;

#[error_code]
pub enum VaultError {
    #[msg("Invalid amount")]
    InvalidAmount = 1,
    #[msg("Amount does not cover the gas buffer")]
    BufferTooSmall = 2,
    #[msg("Deposit amount is too small - would not receive any shares")]
    DepositTooSmall = 3,
    #[msg("Deposit exceeds the maximum allowed")]
    ExceededMaxDeposit = 4,
    #[msg("Fee exceeds the maximum of 10000 basis points")]
    InvalidFee = 5,

    #[msg("Base asset mint must be the native mint")]
    InvalidBaseAssetMint = 6,
    #[msg("Invalid share mint provided")]
    InvalidShareMint = 7,
    #[msg("Share mint must have zero supply at initialization")]
    ShareMintNotEmpty = 8,
    #[msg("Invalid receipt mint provided")]
    InvalidReceiptMint = 9,
    #[msg("Staking provider account is not an executable program")]
    InvalidStakingProvider = 10,
    #[msg("Withdrawal queue account is not an executable program")]
    InvalidWithdrawalQueue = 11,
    #[msg("Share and base asset mints cannot be the same")]
    ShareAndAssetCannotBeSame = 12,
    #[msg("Too many fee administrators")]
    TooManyAdministrators = 13,

    #[msg("Invalid mint provided")]
    InvalidMint = 14,
    #[msg("Invalid mint authority")]
    InvalidMintAuthority = 15,
    #[msg("Invalid vault authority")]
    InvalidVaultAuthority = 16,
    #[msg("Invalid token owner")]
    InvalidTokenOwner = 17,
    #[msg("Insufficient vault balance")]
    InsufficientVaultBalance = 18,
    #[msg("Insufficient staked balance")]
    InsufficientStakedBalance = 19,

    #[msg("ProgramData account did not match expected PDA.")]
    InvalidProgramData = 20,
    #[msg("Program has no upgrade authority (set to None).")]
    NoUpgradeAuthority = 21,
    #[msg("Signer is not the upgrade authority.")]
    InvalidUpgradeAuthority = 22,
    #[msg("Signer is not a fee administrator")]
    UnauthorizedFeeAdministrator = 23,

    #[msg("Withdrawal queue returned no request id")]
    EmptyWithdrawalBatch = 24,
    #[msg("Claimed less than the requested withdrawal amount")]
    UnstakeShortfall = 25,
    #[msg("Staking provider returned no pricing data")]
    MissingReturnData = 26,

    #[msg("Operation is already in flight")]
    ReentrantCall = 27,
    #[msg("Protocol is paused")]
    ProtocolPaused = 28,
    #[msg("Config schema version is newer than this program")]
    SchemaVersionAhead = 29,

    #[msg("Arithmetic overflow")]
    Overflow = 30,
    #[msg("Division by zero error")]
    DivisionByZero = 31,
}
