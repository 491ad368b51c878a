//! Token Ledger Contract Logic
//!
//! This crate implements the contract layer for the fungible token,
//! covering balance and allowance accounting, role-gated minting, transfer
//! fee diversion, and the fee vault's sweep operation.
//!
//! # Modules
//! - `errors`: Contract-specific error types
//! - `events`: Contract events appended by state-changing operations
//! - `security`: Role state (owner, minter) and membership checks
//! - `ledger`: Balances, allowances, allow/deny lists, fee logic
//! - `vault`: Fee accumulation account and owner-gated sweep
//!
//! # Version
//! v0.1.0

pub mod errors;
pub mod events;
pub mod security;
pub mod ledger;
pub mod vault;

/// Contract ABI version (frozen after release)
pub const CONTRACT_ABI_VERSION: &str = "1.0.0";
