//! Contract-specific error types
//!
//! Error taxonomy for ledger and vault operations. Every failure is
//! terminal for the triggering call and leaves all contract state
//! unchanged; callers branch on the variant, never on message text.

use thiserror::Error;

use crate::security::Role;

/// Ledger-specific errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("Unauthorized: caller is not the {role}")]
    Unauthorized { role: Role },

    #[error("Insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: String, available: String },

    #[error("Insufficient allowance: required {required}, available {available}")]
    InsufficientAllowance { required: String, available: String },

    #[error("Sender is blacklisted: {sender}")]
    SenderBlacklisted { sender: String },

    #[error("Arithmetic overflow in supply or balance calculation")]
    Overflow,

    #[error("Amount must be non-negative")]
    InvalidAmount,
}

/// Vault-specific errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VaultError {
    #[error("Unauthorized: caller is not the vault owner")]
    Unauthorized,

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_messages_distinguish_roles() {
        let owner_gated = LedgerError::Unauthorized { role: Role::Owner };
        let minter_gated = LedgerError::Unauthorized { role: Role::Minter };
        assert_eq!(owner_gated.to_string(), "Unauthorized: caller is not the owner");
        assert_eq!(minter_gated.to_string(), "Unauthorized: caller is not the minter");
        assert_ne!(owner_gated.to_string(), minter_gated.to_string());
    }

    #[test]
    fn test_insufficient_balance_display() {
        let err = LedgerError::InsufficientBalance {
            required: "300".to_string(),
            available: "200".to_string(),
        };
        assert!(err.to_string().contains("300"));
        assert!(err.to_string().contains("200"));
    }

    #[test]
    fn test_vault_error_from_ledger() {
        let ledger_err = LedgerError::Overflow;
        let vault_err: VaultError = ledger_err.into();
        assert!(matches!(vault_err, VaultError::Ledger(LedgerError::Overflow)));
    }

    #[test]
    fn test_vault_unauthorized_display() {
        let err = VaultError::Unauthorized;
        assert_eq!(err.to_string(), "Unauthorized: caller is not the vault owner");
    }
}
