use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // ============================================
    // INITIALIZATION ERRORS (1-5)
    // ============================================
    /// Contract already initialized
    AlreadyInitialized = 1,
    /// Contract not initialized
    NotInitialized = 2,

    // ============================================
    // AUTHORIZATION ERRORS (10-15)
    // ============================================
    /// Caller is not the admin
    Unauthorized = 10,

    // ============================================
    // ARGUMENT ERRORS (20-29)
    // ============================================
    /// Malformed constructor or setter input, or zero quantity
    InvalidArgument = 20,

    // ============================================
    // ISSUANCE ERRORS (30-39)
    // ============================================
    /// Mint would push total issued past the supply cap
    SupplyExceeded = 30,
    /// Mint would push the requester past the per-wallet cap
    WalletCapExceeded = 31,

    // ============================================
    // PAYMENT ERRORS (40-49)
    // ============================================
    /// Payment is not exactly quantity × unit cost
    PaymentMismatch = 40,
    /// Held balance is zero
    NothingToWithdraw = 41,
    /// Requester's payment-token balance is below the required payment
    InsufficientFunds = 42,

    // ============================================
    // COLLABORATOR ERRORS (50-59)
    // ============================================
    /// Registry rejected a token id assignment
    RegistrationFailed = 50,

    // ============================================
    // OPERATIONAL ERRORS (60-69)
    // ============================================
    /// Self-service minting is paused
    ContractPaused = 60,
}
