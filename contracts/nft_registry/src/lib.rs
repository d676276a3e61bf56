#![no_std]

mod error;
mod events;
mod storage;

pub use error::Error;
use events::{RegisteredEvent, TransferEvent};
use storage::{DataKey, LEDGER_TTL_EXTEND, LEDGER_TTL_THRESHOLD};

use soroban_sdk::{contract, contractimpl, Address, Env, IntoVal, Symbol, TryFromVal, Val, Vec};

#[contract]
pub struct NftRegistry;

#[contractimpl]
impl NftRegistry {
    /// Initialize the registry
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    pub fn initialize(env: Env, admin: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();

        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage()
            .instance()
            .extend_ttl(LEDGER_TTL_THRESHOLD, LEDGER_TTL_EXTEND);

        Ok(())
    }

    /// Allow a contract (the mint controller) to create tokens
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    pub fn add_operator(env: Env, operator: Address) -> Result<(), Error> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)?;
        admin.require_auth();

        env.storage()
            .instance()
            .set(&DataKey::Operators(operator), &true);

        Ok(())
    }

    /// Revoke an operator
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    pub fn remove_operator(env: Env, operator: Address) -> Result<(), Error> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)?;
        admin.require_auth();

        env.storage()
            .instance()
            .remove(&DataKey::Operators(operator));

        Ok(())
    }

    /// Record `owner` as the owner of a brand new `token_id`
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `NotOperator`: Caller is not a registered operator
    /// - `TokenAlreadyRegistered`: Token id already has an owner
    pub fn register_new_token(
        env: Env,
        operator: Address,
        owner: Address,
        token_id: u32,
    ) -> Result<(), Error> {
        if !env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::NotInitialized);
        }

        operator.require_auth();

        if !Self::is_operator(env.clone(), operator.clone()) {
            return Err(Error::NotOperator);
        }

        let owner_key = DataKey::Owner(token_id);
        if env.storage().persistent().has(&owner_key) {
            return Err(Error::TokenAlreadyRegistered);
        }

        Self::write(&env, &owner_key, &owner);
        Self::credit(&env, &owner, token_id);

        let index = Self::total_supply(env.clone());
        Self::write(&env, &DataKey::TokenByIndex(index), &token_id);
        env.storage()
            .instance()
            .set(&DataKey::TotalSupply, &(index + 1));

        env.storage()
            .instance()
            .extend_ttl(LEDGER_TTL_THRESHOLD, LEDGER_TTL_EXTEND);

        env.events().publish(
            (Symbol::new(&env, "registered"), token_id),
            RegisteredEvent {
                token_id,
                owner,
                operator,
            },
        );

        Ok(())
    }

    /// Move a token between owners
    ///
    /// # Errors
    /// - `TokenNotFound`: Token id was never registered
    /// - `NotOwner`: `from` does not own the token
    pub fn transfer(env: Env, from: Address, to: Address, token_id: u32) -> Result<(), Error> {
        from.require_auth();

        let owner_key = DataKey::Owner(token_id);
        let owner: Address = Self::read(&env, &owner_key).ok_or(Error::TokenNotFound)?;

        if owner != from {
            return Err(Error::NotOwner);
        }

        Self::debit(&env, &from, token_id);
        Self::write(&env, &owner_key, &to);
        Self::credit(&env, &to, token_id);

        env.events().publish(
            (Symbol::new(&env, "transfer"), token_id),
            TransferEvent {
                token_id,
                from,
                to,
            },
        );

        Ok(())
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    /// Owner of a token
    pub fn owner_of(env: Env, token_id: u32) -> Result<Address, Error> {
        Self::read(&env, &DataKey::Owner(token_id)).ok_or(Error::TokenNotFound)
    }

    /// Number of tokens held by an owner
    pub fn balance_of(env: Env, owner: Address) -> u32 {
        Self::read(&env, &DataKey::Balance(owner)).unwrap_or(0)
    }

    /// Token id at `index` in the owner's list
    pub fn token_of_owner_by_index(env: Env, owner: Address, index: u32) -> Result<u32, Error> {
        Self::read(&env, &DataKey::OwnerToken(owner, index)).ok_or(Error::IndexOutOfBounds)
    }

    /// Ids held by an owner. Reads one entry per token held, so meant for
    /// off-chain queries rather than cross-contract calls.
    pub fn tokens_of_owner(env: Env, owner: Address) -> Vec<u32> {
        let balance = Self::balance_of(env.clone(), owner.clone());
        let mut owned = Vec::new(&env);
        for index in 0..balance {
            if let Some(token_id) = Self::read(&env, &DataKey::OwnerToken(owner.clone(), index)) {
                owned.push_back(token_id);
            }
        }
        owned
    }

    /// Number of tokens ever registered
    pub fn total_supply(env: Env) -> u32 {
        env.storage()
            .instance()
            .get(&DataKey::TotalSupply)
            .unwrap_or(0)
    }

    /// Token id at `index` in registration order
    pub fn token_by_index(env: Env, index: u32) -> Result<u32, Error> {
        Self::read(&env, &DataKey::TokenByIndex(index)).ok_or(Error::IndexOutOfBounds)
    }

    /// Check if address is an operator
    pub fn is_operator(env: Env, address: Address) -> bool {
        env.storage()
            .instance()
            .get::<DataKey, bool>(&DataKey::Operators(address))
            .unwrap_or(false)
    }

    // ============================================
    // INTERNAL HELPERS
    // ============================================

    fn read<V: TryFromVal<Env, Val>>(env: &Env, key: &DataKey) -> Option<V> {
        env.storage().persistent().get(key)
    }

    fn write<V: IntoVal<Env, Val>>(env: &Env, key: &DataKey, value: &V) {
        env.storage().persistent().set(key, value);
        env.storage()
            .persistent()
            .extend_ttl(key, LEDGER_TTL_THRESHOLD, LEDGER_TTL_EXTEND);
    }

    fn credit(env: &Env, owner: &Address, token_id: u32) {
        let balance_key = DataKey::Balance(owner.clone());
        let balance: u32 = Self::read(env, &balance_key).unwrap_or(0);

        Self::write(env, &DataKey::OwnerToken(owner.clone(), balance), &token_id);
        Self::write(env, &DataKey::OwnedIndex(token_id), &balance);
        Self::write(env, &balance_key, &(balance + 1));
    }

    /// Swap-remove `token_id` from the owner's indexed list: the owner's last
    /// token takes over the freed slot.
    fn debit(env: &Env, owner: &Address, token_id: u32) {
        let balance_key = DataKey::Balance(owner.clone());
        let balance: u32 = Self::read(env, &balance_key).unwrap_or(0);
        if balance == 0 {
            return;
        }

        let last = balance - 1;
        let index: u32 = Self::read(env, &DataKey::OwnedIndex(token_id)).unwrap_or(last);

        if index != last {
            let last_key = DataKey::OwnerToken(owner.clone(), last);
            if let Some(moved) = Self::read::<u32>(env, &last_key) {
                Self::write(env, &DataKey::OwnerToken(owner.clone(), index), &moved);
                Self::write(env, &DataKey::OwnedIndex(moved), &index);
            }
        }

        env.storage()
            .persistent()
            .remove(&DataKey::OwnerToken(owner.clone(), last));
        env.storage()
            .persistent()
            .remove(&DataKey::OwnedIndex(token_id));

        if last == 0 {
            env.storage().persistent().remove(&balance_key);
        } else {
            Self::write(env, &balance_key, &last);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use soroban_sdk::{testutils::Address as _, vec, Address, Env};

    fn setup(env: &Env) -> (NftRegistryClient<'_>, Address) {
        let contract_id = env.register(NftRegistry, ());
        let client = NftRegistryClient::new(env, &contract_id);

        let admin = Address::generate(env);
        client.initialize(&admin);

        let operator = Address::generate(env);
        client.add_operator(&operator);

        (client, operator)
    }

    #[test]
    fn test_initialize() {
        let env = Env::default();
        env.mock_all_auths();

        let contract_id = env.register(NftRegistry, ());
        let client = NftRegistryClient::new(&env, &contract_id);

        let admin = Address::generate(&env);
        client.initialize(&admin);

        let result = client.try_initialize(&admin);
        assert_eq!(result, Err(Ok(Error::AlreadyInitialized)));
    }

    #[test]
    fn test_register_and_enumerate() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, operator) = setup(&env);

        let alice = Address::generate(&env);
        let bob = Address::generate(&env);

        client.register_new_token(&operator, &alice, &0);
        client.register_new_token(&operator, &bob, &1);
        client.register_new_token(&operator, &alice, &2);

        assert_eq!(client.owner_of(&0), alice);
        assert_eq!(client.owner_of(&1), bob);
        assert_eq!(client.balance_of(&alice), 2);
        assert_eq!(client.tokens_of_owner(&alice), vec![&env, 0u32, 2u32]);
        assert_eq!(client.total_supply(), 3);
        assert_eq!(client.token_by_index(&1), 1);
        assert_eq!(client.try_token_by_index(&3), Err(Ok(Error::IndexOutOfBounds)));
    }

    #[test]
    fn test_duplicate_token_rejected() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, operator) = setup(&env);

        let alice = Address::generate(&env);
        client.register_new_token(&operator, &alice, &7);

        let result = client.try_register_new_token(&operator, &alice, &7);
        assert_eq!(result, Err(Ok(Error::TokenAlreadyRegistered)));
        assert_eq!(client.balance_of(&alice), 1);
    }

    #[test]
    fn test_non_operator_rejected() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, operator) = setup(&env);

        let stranger = Address::generate(&env);
        let alice = Address::generate(&env);

        let result = client.try_register_new_token(&stranger, &alice, &0);
        assert_eq!(result, Err(Ok(Error::NotOperator)));

        client.remove_operator(&operator);
        let result = client.try_register_new_token(&operator, &alice, &0);
        assert_eq!(result, Err(Ok(Error::NotOperator)));
        assert_eq!(client.try_owner_of(&0), Err(Ok(Error::TokenNotFound)));
    }

    #[test]
    fn test_transfer() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, operator) = setup(&env);

        let alice = Address::generate(&env);
        let bob = Address::generate(&env);

        client.register_new_token(&operator, &alice, &0);
        client.register_new_token(&operator, &alice, &1);
        client.transfer(&alice, &bob, &0);

        assert_eq!(client.owner_of(&0), bob);
        assert_eq!(client.balance_of(&alice), 1);
        assert_eq!(client.balance_of(&bob), 1);
        assert_eq!(client.tokens_of_owner(&alice), vec![&env, 1u32]);
        assert_eq!(client.tokens_of_owner(&bob), vec![&env, 0u32]);
    }

    #[test]
    fn test_transfer_not_owner() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, operator) = setup(&env);

        let alice = Address::generate(&env);
        let bob = Address::generate(&env);

        client.register_new_token(&operator, &alice, &0);

        let result = client.try_transfer(&bob, &alice, &0);
        assert_eq!(result, Err(Ok(Error::NotOwner)));

        let result = client.try_transfer(&alice, &bob, &5);
        assert_eq!(result, Err(Ok(Error::TokenNotFound)));
    }

    #[test]
    fn test_enumeration_over_many_tokens() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, operator) = setup(&env);

        let alice = Address::generate(&env);
        let bob = Address::generate(&env);

        for token_id in 0..200u32 {
            let owner = if token_id % 4 == 0 { &bob } else { &alice };
            client.register_new_token(&operator, owner, &token_id);
        }

        assert_eq!(client.total_supply(), 200);
        assert_eq!(client.token_by_index(&0), 0);
        assert_eq!(client.token_by_index(&199), 199);
        assert_eq!(client.try_token_by_index(&200), Err(Ok(Error::IndexOutOfBounds)));

        assert_eq!(client.balance_of(&alice), 150);
        assert_eq!(client.balance_of(&bob), 50);
        assert_eq!(client.token_of_owner_by_index(&bob, &0), 0);
        assert_eq!(client.token_of_owner_by_index(&bob, &49), 196);
        assert_eq!(client.tokens_of_owner(&bob).len(), 50);
        assert_eq!(
            client.try_token_of_owner_by_index(&bob, &50),
            Err(Ok(Error::IndexOutOfBounds))
        );
    }

    #[test]
    fn test_transfer_swap_removes_from_owner_list() {
        let env = Env::default();
        env.mock_all_auths();
        let (client, operator) = setup(&env);

        let alice = Address::generate(&env);
        let bob = Address::generate(&env);

        for token_id in 0..4u32 {
            client.register_new_token(&operator, &alice, &token_id);
        }

        // Alice's last token fills the slot freed by token 1
        client.transfer(&alice, &bob, &1);
        assert_eq!(client.tokens_of_owner(&alice), vec![&env, 0u32, 3u32, 2u32]);
        assert_eq!(client.tokens_of_owner(&bob), vec![&env, 1u32]);

        // Removing the last entry needs no swap
        client.transfer(&alice, &bob, &2);
        assert_eq!(client.tokens_of_owner(&alice), vec![&env, 0u32, 3u32]);
        assert_eq!(client.tokens_of_owner(&bob), vec![&env, 1u32, 2u32]);

        client.transfer(&alice, &bob, &0);
        client.transfer(&alice, &bob, &3);
        assert_eq!(client.balance_of(&alice), 0);
        assert_eq!(client.tokens_of_owner(&alice), Vec::new(&env));
        assert_eq!(client.tokens_of_owner(&bob), vec![&env, 1u32, 2u32, 0u32, 3u32]);

        // Registration order is untouched by transfers
        assert_eq!(client.token_by_index(&1), 1);
        assert_eq!(client.total_supply(), 4);
    }
}
