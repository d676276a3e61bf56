use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // Initialization errors
    AlreadyInitialized = 1,
    NotInitialized = 2,

    // Authorization errors
    NotOperator = 4,

    // Token errors
    TokenAlreadyRegistered = 10,
    TokenNotFound = 11,
    NotOwner = 12,
    IndexOutOfBounds = 13,
}
