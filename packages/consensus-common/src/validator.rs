//! Stateless input checks shared by the registries. They never fail on
//! their own; callers turn a `false` into the matching contract error.

/// The empty string plays the role of the null address.
pub fn is_null_address(address: &str) -> bool {
    address.trim().is_empty()
}

pub fn is_valid_address(address: &str) -> bool {
    !is_null_address(address)
}

pub fn is_valid_string(value: &str) -> bool {
    !value.trim().is_empty()
}
