use crate::storage::Policy;

/// Per-token price for a participant: the discount tier when allow-listed,
/// the standard tier otherwise.
pub fn unit_cost(policy: &Policy, allow_listed: bool) -> i128 {
    if allow_listed {
        policy.discount_price
    } else {
        policy.unit_price
    }
}

/// Exact payment required for `quantity` tokens at `unit_cost`
///
/// Formula: required = quantity × unit_cost
pub fn required_payment(quantity: u32, unit_cost: i128) -> Option<i128> {
    (quantity as i128).checked_mul(unit_cost)
}
