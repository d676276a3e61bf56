use crate::error::Error;
use crate::storage::{MAX_NAME_LEN, MAX_SYMBOL_LEN};
use soroban_sdk::String;

/// Validate collection identity supplied at initialization
///
/// Rules:
/// - name: 1..=50 bytes
/// - symbol: 1..=10 bytes
/// - base_uri: non-empty
pub fn validate_collection(name: &String, symbol: &String, base_uri: &String) -> Result<(), Error> {
    if name.len() == 0 || name.len() > MAX_NAME_LEN {
        return Err(Error::InvalidArgument);
    }

    if symbol.len() == 0 || symbol.len() > MAX_SYMBOL_LEN {
        return Err(Error::InvalidArgument);
    }

    if base_uri.len() == 0 {
        return Err(Error::InvalidArgument);
    }

    Ok(())
}

pub fn validate_price(price: i128) -> Result<(), Error> {
    if price <= 0 {
        return Err(Error::InvalidArgument);
    }
    Ok(())
}

pub fn validate_cap(cap: u32) -> Result<(), Error> {
    if cap == 0 {
        return Err(Error::InvalidArgument);
    }
    Ok(())
}

/// Supply cap is inclusive: the total may reach `supply_cap` but never pass it.
/// Returns the total after the mint.
pub fn check_supply(total_issued: u32, quantity: u32, supply_cap: u32) -> Result<u32, Error> {
    match total_issued.checked_add(quantity) {
        Some(new_total) if new_total <= supply_cap => Ok(new_total),
        _ => Err(Error::SupplyExceeded),
    }
}

/// Per-wallet cap is inclusive as well. Returns the participant's count after the mint.
pub fn check_wallet(already_issued: u32, quantity: u32, per_wallet_cap: u32) -> Result<u32, Error> {
    match already_issued.checked_add(quantity) {
        Some(new_count) if new_count <= per_wallet_cap => Ok(new_count),
        _ => Err(Error::WalletCapExceeded),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::Env;

    #[test]
    fn test_collection_bounds() {
        let env = Env::default();
        let uri = String::from_str(&env, "ipfs://base/");

        let name_50 = String::from_str(&env, "abcdefghijabcdefghijabcdefghijabcdefghijabcdefghij");
        let name_51 = String::from_str(&env, "abcdefghijabcdefghijabcdefghijabcdefghijabcdefghijk");
        let symbol_10 = String::from_str(&env, "ABCDEFGHIJ");
        let symbol_11 = String::from_str(&env, "ABCDEFGHIJK");
        let empty = String::from_str(&env, "");

        assert_eq!(validate_collection(&name_50, &symbol_10, &uri), Ok(()));
        assert_eq!(
            validate_collection(&name_51, &symbol_10, &uri),
            Err(Error::InvalidArgument)
        );
        assert_eq!(
            validate_collection(&name_50, &symbol_11, &uri),
            Err(Error::InvalidArgument)
        );
        assert_eq!(
            validate_collection(&empty, &symbol_10, &uri),
            Err(Error::InvalidArgument)
        );
        assert_eq!(
            validate_collection(&name_50, &empty, &uri),
            Err(Error::InvalidArgument)
        );
        assert_eq!(
            validate_collection(&name_50, &symbol_10, &empty),
            Err(Error::InvalidArgument)
        );
    }

    #[test]
    fn test_supply_cap_inclusive() {
        assert_eq!(check_supply(2, 1, 3), Ok(3));
        assert_eq!(check_supply(3, 1, 3), Err(Error::SupplyExceeded));
        assert_eq!(check_supply(0, 4, 3), Err(Error::SupplyExceeded));
    }

    #[test]
    fn test_supply_cap_below_issued() {
        // Cap lowered under the current total blocks every further mint
        assert_eq!(check_supply(5, 1, 3), Err(Error::SupplyExceeded));
    }

    #[test]
    fn test_supply_overflow() {
        assert_eq!(check_supply(u32::MAX, 1, u32::MAX), Err(Error::SupplyExceeded));
    }

    #[test]
    fn test_wallet_cap() {
        assert_eq!(check_wallet(0, 2, 2), Ok(2));
        assert_eq!(check_wallet(2, 1, 2), Err(Error::WalletCapExceeded));
    }

    #[test]
    fn test_positive_guards() {
        assert_eq!(validate_price(1), Ok(()));
        assert_eq!(validate_price(0), Err(Error::InvalidArgument));
        assert_eq!(validate_price(-5), Err(Error::InvalidArgument));
        assert_eq!(validate_cap(1), Ok(()));
        assert_eq!(validate_cap(0), Err(Error::InvalidArgument));
    }
}
