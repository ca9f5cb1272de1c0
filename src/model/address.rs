use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// An account address on the execution substrate.
///
/// Addresses are the caller identity for every operation: the administrator,
/// voters, and candidates are all plain addresses. The ledger never
/// authenticates an address itself; the substrate has already done so by the
/// time a call reaches us.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Address {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl From<&str> for Address {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

#[cfg(test)]
mod examples {
    use super::*;

    impl Address {
        pub fn example_admin() -> Self {
            "0xadmin0000000000000000000000000000000001".into()
        }

        pub fn example_voter() -> Self {
            "0xvoter0000000000000000000000000000000001".into()
        }
    }
}
