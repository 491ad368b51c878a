//! Contract events
//!
//! Events are immutable records appended by contract operations. The ledger
//! and the vault each keep their own append-only log, readable via
//! `events()` and consumable via `drain_events()`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use types::ids::Address;

/// Tokens moved between two accounts
///
/// `fee` is the portion diverted to the vault; zero on fee-free paths.
/// `amount` is the full amount debited from the sender, so the recipient
/// received `amount - fee`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferExecuted {
    pub from: Address,
    pub to: Address,
    pub amount: Decimal,
    pub fee: Decimal,
}

/// New supply credited to the minter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Minted {
    pub to: Address,
    pub amount: Decimal,
}

/// Supply destroyed from a holder's balance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Burned {
    pub from: Address,
    pub amount: Decimal,
}

/// Spending allowance set to an absolute amount
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalSet {
    pub owner: Address,
    pub spender: Address,
    pub amount: Decimal,
}

/// Vault balance swept to the vault owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultSwept {
    pub vault: Address,
    pub recipient: Address,
    pub amount: Decimal,
}

/// Enum wrapper for all contract events, enabling uniform handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractEvent {
    TransferExecuted(TransferExecuted),
    Minted(Minted),
    Burned(Burned),
    ApprovalSet(ApprovalSet),
    VaultSwept(VaultSwept),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_executed_serialization() {
        let event = TransferExecuted {
            from: Address::new(),
            to: Address::new(),
            amount: Decimal::from(500),
            fee: Decimal::from(25),
        };
        let json = serde_json::to_string(&event).unwrap();
        let deser: TransferExecuted = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deser);
    }

    #[test]
    fn test_contract_event_enum_variant() {
        let event = ContractEvent::Minted(Minted {
            to: Address::new(),
            amount: Decimal::from(1000),
        });
        assert!(matches!(event, ContractEvent::Minted(_)));
    }

    #[test]
    fn test_vault_swept_serialization() {
        let event = VaultSwept {
            vault: Address::new(),
            recipient: Address::new(),
            amount: Decimal::from(25),
        };
        let json = serde_json::to_string(&event).unwrap();
        let deser: VaultSwept = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deser);
    }

    #[test]
    fn test_approval_set_serialization() {
        let event = ApprovalSet {
            owner: Address::new(),
            spender: Address::new(),
            amount: Decimal::from(42),
        };
        let json = serde_json::to_string(&event).unwrap();
        let deser: ApprovalSet = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deser);
    }
}
