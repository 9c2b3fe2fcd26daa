//! Shared proptest generators for customer inputs.

use customer_service::NewCustomer;
use proptest::prelude::*;

/// Generate customer names, including the empty name.
pub fn customer_name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[A-Z][a-z]{1,12}( [A-Z][a-z]{1,12}){0,2}",
        "\\PC{1,40}",
    ]
}

/// Generate card-like account numbers.
pub fn account_number_strategy() -> impl Strategy<Value = String> {
    "[0-9]{12,19}"
}

/// Generate arbitrary non-empty text, including multi-byte characters.
pub fn secret_text_strategy() -> impl Strategy<Value = String> {
    "\\PC{1,64}"
}

/// Generate a complete new customer.
pub fn new_customer_strategy() -> impl Strategy<Value = NewCustomer> {
    (customer_name_strategy(), account_number_strategy())
        .prop_map(|(name, account)| NewCustomer::new(name, account))
}
