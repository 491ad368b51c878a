//! Role state for contract modules
//!
//! The ledger recognizes two privileged roles: the owner, fixed at
//! construction, and a single reassignable minter. Callers are identified
//! by explicit `Address` parameters; there is no ambient caller context.

use serde::{Deserialize, Serialize};
use std::fmt;
use types::ids::Address;

/// Privileged roles recognized by the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Administers the minter role, the allow/deny lists, and the vault reference
    Owner,
    /// Authorized to increase total supply
    Minter,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Owner => write!(f, "owner"),
            Role::Minter => write!(f, "minter"),
        }
    }
}

/// Role assignments for a ledger instance.
///
/// Ownership is immutable once set. The minter starts unset; the ledger
/// gates reassignment behind the owner check.
#[derive(Debug, Clone)]
pub struct AccessControl {
    owner: Address,
    minter: Option<Address>,
}

impl AccessControl {
    /// Create role state with the deploying owner.
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            minter: None,
        }
    }

    /// Check if a caller is the owner.
    pub fn is_owner(&self, caller: Address) -> bool {
        caller == self.owner
    }

    /// Check if a caller is the current minter.
    pub fn is_minter(&self, caller: Address) -> bool {
        self.minter == Some(caller)
    }

    /// Assign the minter role. Authorization is the caller's responsibility.
    pub fn set_minter(&mut self, minter: Address) {
        self.minter = Some(minter);
    }

    /// Get the owner address.
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Get the current minter, if one is set.
    pub fn minter(&self) -> Option<Address> {
        self.minter
    }
}
