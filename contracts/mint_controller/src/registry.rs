use crate::error::Error;
use soroban_sdk::{contractclient, Address, Env};

/// The slice of the asset registry this controller depends on.
#[allow(dead_code)]
#[contractclient(name = "RegistryClient")]
pub trait RegistryInterface {
    fn register_new_token(env: Env, operator: Address, owner: Address, token_id: u32);
}

/// Records `owner` as the owner of `token_id` in the registry. Any rejection
/// by the registry surfaces as `RegistrationFailed`.
pub fn register(env: &Env, registry: &Address, owner: &Address, token_id: u32) -> Result<(), Error> {
    let client = RegistryClient::new(env, registry);

    match client.try_register_new_token(&env.current_contract_address(), owner, &token_id) {
        Ok(Ok(())) => Ok(()),
        _ => Err(Error::RegistrationFailed),
    }
}
