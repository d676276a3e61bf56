use soroban_sdk::{contracttype, Address};

pub const LEDGER_TTL_THRESHOLD: u32 = 518_400; // ~30 days
pub const LEDGER_TTL_EXTEND: u32 = 3_110_400; // ~180 days

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Initialized,
    Operators(Address),
    Owner(u32),               // token_id -> owner
    Balance(Address),         // owner -> number of tokens held
    OwnerToken(Address, u32), // (owner, index) -> token_id
    OwnedIndex(u32),          // token_id -> index in its owner's list
    TokenByIndex(u32),        // registration index -> token_id
    TotalSupply,
}
