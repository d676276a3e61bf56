use crate::error::Error;
use crate::storage::Storage;
use soroban_sdk::{Address, Env};

/// Fails with `Unauthorized` unless `caller` is the stored admin, then
/// requires the caller's signature.
pub fn require_admin(env: &Env, caller: &Address) -> Result<(), Error> {
    let admin = Storage::admin(env)?;
    if *caller != admin {
        return Err(Error::Unauthorized);
    }

    caller.require_auth();
    Ok(())
}
