#![no_std]

mod access;
mod error;
mod events;
mod pricing;
mod registry;
mod storage;
mod validation;


pub use error::Error;
pub use storage::Policy;

use access::require_admin;
use events::*;
use pricing::{required_payment, unit_cost};
use storage::{Collection, Storage};
use validation::{check_supply, check_wallet, validate_cap, validate_collection, validate_price};

use soroban_sdk::{contract, contractimpl, log, token, Address, Env, String, Symbol, Vec};

#[contract]
pub struct MintController;

#[contractimpl]
impl MintController {
    // ============================================
    // INITIALIZATION & ADMIN
    // ============================================

    /// Initialize the collection with default pricing and caps
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    /// - `InvalidArgument`: name not 1..=50 bytes, symbol not 1..=10 bytes, or empty base URI
    pub fn initialize(
        env: Env,
        admin: Address,
        registry: Address,
        payment_token: Address,
        name: String,
        symbol: String,
        base_uri: String,
    ) -> Result<(), Error> {
        if Storage::is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }

        validate_collection(&name, &symbol, &base_uri)?;

        admin.require_auth();

        Storage::set_initialized(&env);
        Storage::set_admin(&env, &admin);
        Storage::set_registry(&env, &registry);
        Storage::set_payment_token(&env, &payment_token);
        Storage::set_policy(&env, &storage::Policy::defaults());
        Storage::set_collection(
            &env,
            &Collection {
                name: name.clone(),
                symbol: symbol.clone(),
                base_uri,
            },
        );
        Storage::set_paused(&env, false);
        Storage::extend_instance(&env);

        env.events().publish(
            (Symbol::new(&env, "initialized"),),
            InitializedEvent {
                admin,
                registry,
                payment_token,
                name,
                symbol,
            },
        );

        Ok(())
    }

    /// Stop self-service minting
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: Caller is not admin
    pub fn pause(env: Env, caller: Address) -> Result<(), Error> {
        require_admin(&env, &caller)?;

        Storage::set_paused(&env, true);
        env.events()
            .publish((Symbol::new(&env, "paused"),), PausedEvent { paused: true });
        Ok(())
    }

    /// Resume self-service minting
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: Caller is not admin
    pub fn unpause(env: Env, caller: Address) -> Result<(), Error> {
        require_admin(&env, &caller)?;

        Storage::set_paused(&env, false);
        env.events()
            .publish((Symbol::new(&env, "paused"),), PausedEvent { paused: false });
        Ok(())
    }

    /// Hand the admin role to another address
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: Caller is not admin
    pub fn transfer_admin(env: Env, caller: Address, new_admin: Address) -> Result<(), Error> {
        require_admin(&env, &caller)?;

        Storage::set_admin(&env, &new_admin);

        env.events().publish(
            (Symbol::new(&env, "admin_transferred"),),
            AdminTransferredEvent {
                previous_admin: caller,
                new_admin,
            },
        );
        Ok(())
    }

    // ============================================
    // SELF-SERVICE MINT
    // ============================================

    /// Buy `quantity` tokens for exactly `quantity × unit cost`
    ///
    /// The supply cap is inclusive: `total_issued` may reach `supply_cap`
    /// but a request that would carry it past the cap is rejected whole.
    /// Ids are handed out sequentially, each equal to `total_issued` at the
    /// moment it is reserved.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `ContractPaused`: Self-service minting is paused
    /// - `InvalidArgument`: quantity is zero
    /// - `SupplyExceeded`: Would exceed the supply cap
    /// - `WalletCapExceeded`: Would exceed the requester's per-wallet cap
    /// - `PaymentMismatch`: payment is not exactly quantity × unit cost
    /// - `InsufficientFunds`: Requester's balance cannot cover the payment
    /// - `RegistrationFailed`: Registry rejected a token id
    pub fn mint_tokens(
        env: Env,
        requester: Address,
        quantity: u32,
        payment: i128,
    ) -> Result<Vec<u32>, Error> {
        Self::check_not_paused(&env)?;

        if quantity == 0 {
            return Err(Error::InvalidArgument);
        }

        requester.require_auth();

        let policy = Storage::policy(&env)?;

        // Validate: Supply cap (inclusive)
        let new_total = check_supply(Storage::total_issued(&env), quantity, policy.supply_cap)?;

        // Validate: Per-wallet cap
        let new_count = check_wallet(
            Storage::issued_to(&env, &requester),
            quantity,
            policy.per_wallet_cap,
        )?;

        // Validate: Exact payment for the requester's tier
        let cost = unit_cost(&policy, Storage::is_allowed(&env, &requester));
        let required = required_payment(quantity, cost).ok_or(Error::InvalidArgument)?;
        if payment != required {
            return Err(Error::PaymentMismatch);
        }

        let payment_token = Storage::payment_token(&env)?;
        let registry = Storage::registry(&env)?;

        // Validate: Requester can cover the payment
        let payment_client = token::Client::new(&env, &payment_token);
        if payment_client.balance(&requester) < payment {
            return Err(Error::InsufficientFunds);
        }

        payment_client.transfer(&requester, &env.current_contract_address(), &payment);

        Storage::set_issued_to(&env, &requester, new_count);

        let mut token_ids = Vec::new(&env);
        for _ in 0..quantity {
            let token_id = Storage::reserve_token_id(&env)?;
            registry::register(&env, &registry, &requester, token_id)?;
            token_ids.push_back(token_id);
        }
        debug_assert_eq!(Storage::total_issued(&env), new_total);

        Storage::extend_instance(&env);

        env.events().publish(
            (Symbol::new(&env, "tokens_minted"), requester.clone()),
            TokensMintedEvent {
                requester,
                token_ids: token_ids.clone(),
                unit_cost: cost,
                payment,
            },
        );

        Ok(token_ids)
    }

    // ============================================
    // PRIVILEGED MINT
    // ============================================

    /// Mint one token straight to `recipient`, skipping price, wallet cap and pause
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: Caller is not admin
    /// - `SupplyExceeded`: Supply cap already reached
    /// - `RegistrationFailed`: Registry rejected the token id
    pub fn mint_to(env: Env, admin: Address, recipient: Address) -> Result<u32, Error> {
        require_admin(&env, &admin)?;

        let policy = Storage::policy(&env)?;
        if Storage::total_issued(&env) >= policy.supply_cap {
            return Err(Error::SupplyExceeded);
        }

        let registry = Storage::registry(&env)?;
        let token_id = Storage::reserve_token_id(&env)?;
        registry::register(&env, &registry, &recipient, token_id)?;

        Storage::extend_instance(&env);
        log!(&env, "admin mint", token_id);

        env.events().publish(
            (Symbol::new(&env, "admin_minted"), recipient.clone()),
            AdminMintedEvent {
                recipient,
                token_id,
            },
        );

        Ok(token_id)
    }

    // ============================================
    // POLICY SETTERS
    // ============================================

    /// Replace the metadata base URI (any value, including empty)
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: Caller is not admin
    pub fn set_metadata_base_uri(env: Env, caller: Address, base_uri: String) -> Result<(), Error> {
        require_admin(&env, &caller)?;

        let mut collection = Storage::collection(&env)?;
        collection.base_uri = base_uri.clone();
        Storage::set_collection(&env, &collection);

        env.events().publish(
            (Symbol::new(&env, "base_uri_updated"),),
            BaseUriUpdatedEvent { base_uri },
        );
        Ok(())
    }

    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: Caller is not admin
    /// - `InvalidArgument`: price must be positive
    pub fn set_unit_price(env: Env, caller: Address, price: i128) -> Result<(), Error> {
        require_admin(&env, &caller)?;
        validate_price(price)?;

        Self::update_policy(&env, "unit_price", |policy| policy.unit_price = price)
    }

    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: Caller is not admin
    /// - `InvalidArgument`: price must be positive
    pub fn set_discount_price(env: Env, caller: Address, price: i128) -> Result<(), Error> {
        require_admin(&env, &caller)?;
        validate_price(price)?;

        Self::update_policy(&env, "discount_price", |policy| policy.discount_price = price)
    }

    /// Replace the supply cap. No check against tokens already issued: a cap
    /// below `total_issued` halts all further minting.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: Caller is not admin
    /// - `InvalidArgument`: cap must be positive
    pub fn set_supply_cap(env: Env, caller: Address, cap: u32) -> Result<(), Error> {
        require_admin(&env, &caller)?;
        validate_cap(cap)?;

        Self::update_policy(&env, "supply_cap", |policy| policy.supply_cap = cap)
    }

    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: Caller is not admin
    /// - `InvalidArgument`: cap must be positive
    pub fn set_per_wallet_cap(env: Env, caller: Address, cap: u32) -> Result<(), Error> {
        require_admin(&env, &caller)?;
        validate_cap(cap)?;

        Self::update_policy(&env, "per_wallet_cap", |policy| policy.per_wallet_cap = cap)
    }

    /// Put `identity` on the discount tier
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: Caller is not admin
    pub fn allow(env: Env, caller: Address, identity: Address) -> Result<(), Error> {
        require_admin(&env, &caller)?;

        Storage::set_allowed(&env, &identity, true);
        Self::publish_allow_list(&env, identity, true);
        Ok(())
    }

    /// Drop `identity` from the discount tier. No-op if absent.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: Caller is not admin
    pub fn disallow(env: Env, caller: Address, identity: Address) -> Result<(), Error> {
        require_admin(&env, &caller)?;

        Storage::set_allowed(&env, &identity, false);
        Self::publish_allow_list(&env, identity, false);
        Ok(())
    }

    // ============================================
    // FUNDS
    // ============================================

    /// Send the whole held balance to the admin
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: Caller is not admin
    /// - `NothingToWithdraw`: Held balance is zero
    pub fn withdraw_funds(env: Env, admin: Address) -> Result<i128, Error> {
        require_admin(&env, &admin)?;

        let payment_token = Storage::payment_token(&env)?;
        let client = token::Client::new(&env, &payment_token);

        let amount = client.balance(&env.current_contract_address());
        if amount <= 0 {
            return Err(Error::NothingToWithdraw);
        }

        client.transfer(&env.current_contract_address(), &admin, &amount);
        log!(&env, "withdrawn", amount);

        env.events().publish(
            (Symbol::new(&env, "funds_withdrawn"), admin.clone()),
            FundsWithdrawnEvent { admin, amount },
        );

        Ok(amount)
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    /// Tokens `requester` has self-minted so far
    pub fn my_issued_count(env: Env, requester: Address) -> u32 {
        Storage::issued_to(&env, &requester)
    }

    /// Payment-token balance held by the contract
    pub fn held_balance(env: Env) -> Result<i128, Error> {
        let payment_token = Storage::payment_token(&env)?;
        Ok(token::Client::new(&env, &payment_token).balance(&env.current_contract_address()))
    }

    pub fn total_issued(env: Env) -> u32 {
        Storage::total_issued(&env)
    }

    pub fn policy(env: Env) -> Result<Policy, Error> {
        Storage::policy(&env)
    }

    pub fn unit_price(env: Env) -> Result<i128, Error> {
        Ok(Storage::policy(&env)?.unit_price)
    }

    pub fn discount_price(env: Env) -> Result<i128, Error> {
        Ok(Storage::policy(&env)?.discount_price)
    }

    pub fn supply_cap(env: Env) -> Result<u32, Error> {
        Ok(Storage::policy(&env)?.supply_cap)
    }

    pub fn per_wallet_cap(env: Env) -> Result<u32, Error> {
        Ok(Storage::policy(&env)?.per_wallet_cap)
    }

    pub fn metadata_base_uri(env: Env) -> Result<String, Error> {
        Ok(Storage::collection(&env)?.base_uri)
    }

    pub fn name(env: Env) -> Result<String, Error> {
        Ok(Storage::collection(&env)?.name)
    }

    pub fn symbol(env: Env) -> Result<String, Error> {
        Ok(Storage::collection(&env)?.symbol)
    }

    /// Check if address is on the allow-list
    pub fn is_allowed(env: Env, identity: Address) -> bool {
        Storage::is_allowed(&env, &identity)
    }

    pub fn is_paused(env: Env) -> bool {
        Storage::is_paused(&env)
    }

    pub fn admin(env: Env) -> Result<Address, Error> {
        Storage::admin(&env)
    }

    pub fn registry(env: Env) -> Result<Address, Error> {
        Storage::registry(&env)
    }

    pub fn payment_token(env: Env) -> Result<Address, Error> {
        Storage::payment_token(&env)
    }
}

impl MintController {
    // ============================================
    // INTERNAL HELPERS
    // ============================================

    fn check_not_paused(env: &Env) -> Result<(), Error> {
        if Storage::is_paused(env) {
            return Err(Error::ContractPaused);
        }
        Ok(())
    }

    fn update_policy(env: &Env, field: &str, apply: impl FnOnce(&mut Policy)) -> Result<(), Error> {
        let mut policy = Storage::policy(env)?;
        apply(&mut policy);
        Storage::set_policy(env, &policy);

        env.events().publish(
            (Symbol::new(env, "policy_updated"), Symbol::new(env, field)),
            PolicyUpdatedEvent { policy },
        );
        Ok(())
    }

    fn publish_allow_list(env: &Env, identity: Address, allowed: bool) {
        env.events().publish(
            (Symbol::new(env, "allow_list"), identity.clone()),
            AllowListEvent { identity, allowed },
        );
    }
}
