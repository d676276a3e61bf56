use crate::error::Error;
use soroban_sdk::{contracttype, Address, Env, String};

// Defaults applied at initialization, denominated in stroops of the payment token
pub const DEFAULT_UNIT_PRICE: i128 = 10_000;
pub const DEFAULT_DISCOUNT_PRICE: i128 = 50_000;
pub const DEFAULT_SUPPLY_CAP: u32 = 10;
pub const DEFAULT_PER_WALLET_CAP: u32 = 2;

pub const MAX_NAME_LEN: u32 = 50;
pub const MAX_SYMBOL_LEN: u32 = 10;

pub const LEDGER_TTL_THRESHOLD: u32 = 518_400; // ~30 days
pub const LEDGER_TTL_EXTEND: u32 = 3_110_400; // ~180 days

/// Pricing and cap parameters. Only the admin setters change these.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Policy {
    /// Price per token for participants not on the allow-list
    pub unit_price: i128,
    /// Price per token for allow-listed participants
    pub discount_price: i128,
    /// Maximum number of tokens that may ever exist
    pub supply_cap: u32,
    /// Maximum tokens one participant may self-mint over the sale lifetime
    pub per_wallet_cap: u32,
}

impl Policy {
    pub fn defaults() -> Self {
        Policy {
            unit_price: DEFAULT_UNIT_PRICE,
            discount_price: DEFAULT_DISCOUNT_PRICE,
            supply_cap: DEFAULT_SUPPLY_CAP,
            per_wallet_cap: DEFAULT_PER_WALLET_CAP,
        }
    }
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct Collection {
    pub name: String,
    pub symbol: String,
    pub base_uri: String,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Registry,
    PaymentToken,
    Policy,
    Collection,
    TotalIssued,
    Issued(Address),  // participant -> self-minted count
    Allowed(Address), // allow-list membership
    Initialized,
    Paused,
}

pub struct Storage;

impl Storage {
    pub fn is_initialized(env: &Env) -> bool {
        env.storage().instance().has(&DataKey::Initialized)
    }

    pub fn set_initialized(env: &Env) {
        env.storage().instance().set(&DataKey::Initialized, &true);
    }

    pub fn extend_instance(env: &Env) {
        env.storage()
            .instance()
            .extend_ttl(LEDGER_TTL_THRESHOLD, LEDGER_TTL_EXTEND);
    }

    // Admin
    pub fn admin(env: &Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)
    }

    pub fn set_admin(env: &Env, admin: &Address) {
        env.storage().instance().set(&DataKey::Admin, admin);
    }

    // Collaborators
    pub fn registry(env: &Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Registry)
            .ok_or(Error::NotInitialized)
    }

    pub fn set_registry(env: &Env, registry: &Address) {
        env.storage().instance().set(&DataKey::Registry, registry);
    }

    pub fn payment_token(env: &Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::PaymentToken)
            .ok_or(Error::NotInitialized)
    }

    pub fn set_payment_token(env: &Env, token: &Address) {
        env.storage().instance().set(&DataKey::PaymentToken, token);
    }

    // Policy
    pub fn policy(env: &Env) -> Result<Policy, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Policy)
            .ok_or(Error::NotInitialized)
    }

    pub fn set_policy(env: &Env, policy: &Policy) {
        env.storage().instance().set(&DataKey::Policy, policy);
    }

    pub fn collection(env: &Env) -> Result<Collection, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Collection)
            .ok_or(Error::NotInitialized)
    }

    pub fn set_collection(env: &Env, collection: &Collection) {
        env.storage()
            .instance()
            .set(&DataKey::Collection, collection);
    }

    // Issuance counters
    pub fn total_issued(env: &Env) -> u32 {
        env.storage()
            .instance()
            .get(&DataKey::TotalIssued)
            .unwrap_or(0)
    }

    /// Hands out the next token id, which is always the current total, and
    /// advances the total past it.
    pub fn reserve_token_id(env: &Env) -> Result<u32, Error> {
        let token_id = Self::total_issued(env);
        let next = token_id.checked_add(1).ok_or(Error::SupplyExceeded)?;
        env.storage().instance().set(&DataKey::TotalIssued, &next);
        Ok(token_id)
    }

    pub fn issued_to(env: &Env, participant: &Address) -> u32 {
        env.storage()
            .persistent()
            .get(&DataKey::Issued(participant.clone()))
            .unwrap_or(0)
    }

    pub fn set_issued_to(env: &Env, participant: &Address, count: u32) {
        let key = DataKey::Issued(participant.clone());
        env.storage().persistent().set(&key, &count);
        env.storage()
            .persistent()
            .extend_ttl(&key, LEDGER_TTL_THRESHOLD, LEDGER_TTL_EXTEND);
    }

    // Allow-list
    pub fn is_allowed(env: &Env, identity: &Address) -> bool {
        env.storage()
            .persistent()
            .has(&DataKey::Allowed(identity.clone()))
    }

    pub fn set_allowed(env: &Env, identity: &Address, allowed: bool) {
        let key = DataKey::Allowed(identity.clone());
        if allowed {
            env.storage().persistent().set(&key, &true);
            env.storage()
                .persistent()
                .extend_ttl(&key, LEDGER_TTL_THRESHOLD, LEDGER_TTL_EXTEND);
        } else {
            env.storage().persistent().remove(&key);
        }
    }

    // Pause flag
    pub fn is_paused(env: &Env) -> bool {
        env.storage()
            .instance()
            .get::<DataKey, bool>(&DataKey::Paused)
            .unwrap_or(false)
    }

    pub fn set_paused(env: &Env, paused: bool) {
        env.storage().instance().set(&DataKey::Paused, &paused);
    }
}
