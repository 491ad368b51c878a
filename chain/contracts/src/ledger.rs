//! Ledger — token balances, allowances, fee diversion, and access gates
//!
//! Implements the token's accounting engine:
//! - Balance bookkeeping with overflow-checked arithmetic
//! - Allowance bookkeeping for delegated spending
//! - Owner-gated minter role, whitelist, blacklist, and vault reference
//! - 5% fee diversion on fee-eligible transfers
//!
//! Every operation validates fully before committing state, so a returned
//! error leaves balances, allowances, and role/list state untouched.

use rust_decimal::Decimal;
use sha2::{Digest, Sha256};
use std::collections::{HashMap, HashSet};
use types::ids::Address;

use crate::errors::LedgerError;
use crate::events::{ApprovalSet, Burned, ContractEvent, Minted, TransferExecuted};
use crate::security::{AccessControl, Role};

/// Transfer fee rate applied on fee-eligible paths (5%).
pub fn fee_rate() -> Decimal {
    Decimal::new(5, 2)
}

/// Core token ledger.
///
/// Balances are stored as `HashMap<Address, Decimal>`; allowances as
/// `HashMap<(Address, Address), Decimal>` keyed (owner, spender).
///
/// Invariant: the sum of all balances equals total supply at all times.
/// Only mint and burn change total supply.
#[derive(Debug)]
pub struct Ledger {
    /// Balances: address -> amount
    balances: HashMap<Address, Decimal>,
    /// Allowances: (owner, spender) -> remaining spendable amount
    allowances: HashMap<(Address, Address), Decimal>,
    /// Total supply, conserved by transfers
    total_supply: Decimal,
    /// Owner and minter role state
    access_control: AccessControl,
    /// Fee-exempt senders
    whitelist: HashSet<Address>,
    /// Forbidden senders
    blacklist: HashSet<Address>,
    /// Fee recipient; fee logic is inactive while unset
    vault_address: Option<Address>,
    /// Emitted events log (append-only)
    events: Vec<ContractEvent>,
}

impl Ledger {
    /// Create a ledger with the full initial supply credited to `owner`.
    ///
    /// The owner role is fixed to `owner`; the minter and vault start
    /// unset and both lists start empty.
    pub fn new(owner: Address, initial_supply: Decimal) -> Result<Self, LedgerError> {
        check_amount(initial_supply)?;
        let mut balances = HashMap::new();
        balances.insert(owner, initial_supply);
        Ok(Self {
            balances,
            allowances: HashMap::new(),
            total_supply: initial_supply,
            access_control: AccessControl::new(owner),
            whitelist: HashSet::new(),
            blacklist: HashSet::new(),
            vault_address: None,
            events: Vec::new(),
        })
    }

    // ───────────────────────── Access Control ─────────────────────────

    /// Assign the minter role. Owner-only.
    pub fn set_minter(&mut self, caller: Address, minter: Address) -> Result<(), LedgerError> {
        self.check_owner(caller)?;
        self.access_control.set_minter(minter);
        Ok(())
    }

    /// Add an address to the fee-exempt whitelist. Owner-only, idempotent.
    pub fn add_to_whitelist(&mut self, caller: Address, address: Address) -> Result<(), LedgerError> {
        self.check_owner(caller)?;
        self.whitelist.insert(address);
        Ok(())
    }

    /// Add an address to the sender blacklist. Owner-only, idempotent.
    pub fn add_to_blacklist(&mut self, caller: Address, address: Address) -> Result<(), LedgerError> {
        self.check_owner(caller)?;
        self.blacklist.insert(address);
        Ok(())
    }

    /// Set the vault address, activating fee diversion. Owner-only.
    ///
    /// Replaces any prior vault address. The new vault is whitelisted in
    /// the same call: the sweep back to the vault owner must never itself
    /// be fee-eligible.
    pub fn set_vault_address(&mut self, caller: Address, vault: Address) -> Result<(), LedgerError> {
        self.check_owner(caller)?;
        self.whitelist.insert(vault);
        self.vault_address = Some(vault);
        Ok(())
    }

    // ───────────────────────── Supply Operations ─────────────────────────

    /// Mint new supply to the caller's balance. Minter-only.
    pub fn mint(&mut self, caller: Address, amount: Decimal) -> Result<ContractEvent, LedgerError> {
        if !self.access_control.is_minter(caller) {
            return Err(LedgerError::Unauthorized { role: Role::Minter });
        }
        check_amount(amount)?;

        let new_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        self.credit(caller, amount)?;
        self.total_supply = new_supply;

        let event = ContractEvent::Minted(Minted { to: caller, amount });
        self.events.push(event.clone());
        Ok(event)
    }

    /// Burn supply from the caller's own balance.
    pub fn burn(&mut self, caller: Address, amount: Decimal) -> Result<ContractEvent, LedgerError> {
        check_amount(amount)?;
        self.debit(caller, amount)?;
        self.total_supply -= amount;

        let event = ContractEvent::Burned(Burned {
            from: caller,
            amount,
        });
        self.events.push(event.clone());
        Ok(event)
    }

    /// Burn supply from `owner`'s balance against the caller's allowance.
    ///
    /// The allowance is checked before the balance and both are checked
    /// before any state changes, so a failure consumes nothing.
    pub fn burn_from(
        &mut self,
        caller: Address,
        owner: Address,
        amount: Decimal,
    ) -> Result<ContractEvent, LedgerError> {
        check_amount(amount)?;
        self.check_allowance(owner, caller, amount)?;
        self.debit(owner, amount)?;
        self.total_supply -= amount;
        self.consume_allowance(owner, caller, amount);

        let event = ContractEvent::Burned(Burned {
            from: owner,
            amount,
        });
        self.events.push(event.clone());
        Ok(event)
    }

    // ───────────────────────── Transfers ─────────────────────────

    /// Transfer tokens from the caller to `to`.
    ///
    /// A fee of `floor(amount * 0.05)` is diverted to the vault when a
    /// vault address is configured and the caller is not whitelisted;
    /// the recipient receives the remainder, so the diverted fee plus the
    /// delivered amount always equals the debited amount.
    pub fn transfer(
        &mut self,
        caller: Address,
        to: Address,
        amount: Decimal,
    ) -> Result<ContractEvent, LedgerError> {
        check_amount(amount)?;
        let fee = self.execute_transfer(caller, to, amount)?;

        let event = ContractEvent::TransferExecuted(TransferExecuted {
            from: caller,
            to,
            amount,
            fee,
        });
        self.events.push(event.clone());
        Ok(event)
    }

    /// Transfer tokens from `from` to `to` against the caller's allowance.
    ///
    /// Fee eligibility is keyed on `from`'s whitelist status. The
    /// allowance is decremented by the full requested amount regardless
    /// of any fee.
    pub fn transfer_from(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        amount: Decimal,
    ) -> Result<ContractEvent, LedgerError> {
        check_amount(amount)?;
        self.check_sender(from)?;
        self.check_allowance(from, caller, amount)?;
        let fee = self.execute_transfer(from, to, amount)?;
        self.consume_allowance(from, caller, amount);

        let event = ContractEvent::TransferExecuted(TransferExecuted {
            from,
            to,
            amount,
            fee,
        });
        self.events.push(event.clone());
        Ok(event)
    }

    /// Set the caller's allowance for `spender` to exactly `amount`.
    pub fn approve(
        &mut self,
        caller: Address,
        spender: Address,
        amount: Decimal,
    ) -> Result<ContractEvent, LedgerError> {
        check_amount(amount)?;
        self.allowances.insert((caller, spender), amount);

        let event = ContractEvent::ApprovalSet(ApprovalSet {
            owner: caller,
            spender,
            amount,
        });
        self.events.push(event.clone());
        Ok(event)
    }

    // ───────────────────────── Queries ─────────────────────────

    /// Get the balance of an address.
    pub fn balance_of(&self, account: Address) -> Decimal {
        self.balances.get(&account).copied().unwrap_or(Decimal::ZERO)
    }

    /// Get the remaining allowance from `owner` to `spender`.
    pub fn allowance(&self, owner: Address, spender: Address) -> Decimal {
        self.allowances
            .get(&(owner, spender))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Get the total supply.
    pub fn total_supply(&self) -> Decimal {
        self.total_supply
    }

    /// Get the owner address.
    pub fn owner(&self) -> Address {
        self.access_control.owner()
    }

    /// Get the current minter, if one is set.
    pub fn minter(&self) -> Option<Address> {
        self.access_control.minter()
    }

    /// Get the configured vault address, if any.
    pub fn vault_address(&self) -> Option<Address> {
        self.vault_address
    }

    /// Check if an address is fee-exempt.
    pub fn is_whitelisted(&self, address: Address) -> bool {
        self.whitelist.contains(&address)
    }

    /// Check if an address is a forbidden sender.
    pub fn is_blacklisted(&self, address: Address) -> bool {
        self.blacklist.contains(&address)
    }

    // ───────────────────────── Integrity ─────────────────────────

    /// Check the conservation law: sum of all balances equals total supply.
    pub fn check_conservation(&self) -> bool {
        let circulating: Decimal = self.balances.values().copied().sum();
        circulating == self.total_supply
    }

    /// Deterministic SHA-256 digest of supply, balances, and allowances.
    ///
    /// Two ledgers that went through the same operations produce the same
    /// digest; a failed operation leaves the digest unchanged.
    pub fn state_digest(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(b"ledger-state");
        hasher.update(self.total_supply.serialize());

        let mut holders: Vec<&Address> = self.balances.keys().collect();
        holders.sort();
        for address in holders {
            hasher.update(b"balance");
            hasher.update(address.as_uuid().as_bytes());
            hasher.update(self.balances[address].serialize());
        }

        let mut approvals: Vec<&(Address, Address)> = self.allowances.keys().collect();
        approvals.sort();
        for key in approvals {
            hasher.update(b"allowance");
            hasher.update(key.0.as_uuid().as_bytes());
            hasher.update(key.1.as_uuid().as_bytes());
            hasher.update(self.allowances[key].serialize());
        }

        hasher.finalize().into()
    }

    // ───────────────────────── Events ─────────────────────────

    /// Get all emitted events.
    pub fn events(&self) -> &[ContractEvent] {
        &self.events
    }

    /// Drain all events (consume and clear).
    pub fn drain_events(&mut self) -> Vec<ContractEvent> {
        std::mem::take(&mut self.events)
    }

    // ───────────────────────── Internal ─────────────────────────

    /// Move `amount` from `from` to `to`, diverting the fee if eligible.
    /// Returns the diverted fee. All checks precede all balance changes.
    fn execute_transfer(
        &mut self,
        from: Address,
        to: Address,
        amount: Decimal,
    ) -> Result<Decimal, LedgerError> {
        self.check_sender(from)?;

        let available = self.balance_of(from);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                required: amount.to_string(),
                available: available.to_string(),
            });
        }

        let fee_recipient = self
            .vault_address
            .filter(|_| !self.whitelist.contains(&from));

        match fee_recipient {
            Some(vault) => {
                let fee = amount
                    .checked_mul(fee_rate())
                    .ok_or(LedgerError::Overflow)?
                    .floor();
                let net = amount - fee;
                self.debit(from, amount)?;
                self.credit(to, net)?;
                self.credit(vault, fee)?;
                Ok(fee)
            }
            None => {
                self.debit(from, amount)?;
                self.credit(to, amount)?;
                Ok(Decimal::ZERO)
            }
        }
    }

    fn check_owner(&self, caller: Address) -> Result<(), LedgerError> {
        if !self.access_control.is_owner(caller) {
            return Err(LedgerError::Unauthorized { role: Role::Owner });
        }
        Ok(())
    }

    fn check_sender(&self, sender: Address) -> Result<(), LedgerError> {
        if self.blacklist.contains(&sender) {
            return Err(LedgerError::SenderBlacklisted {
                sender: sender.to_string(),
            });
        }
        Ok(())
    }

    fn check_allowance(
        &self,
        owner: Address,
        spender: Address,
        amount: Decimal,
    ) -> Result<(), LedgerError> {
        let current = self.allowance(owner, spender);
        if current < amount {
            return Err(LedgerError::InsufficientAllowance {
                required: amount.to_string(),
                available: current.to_string(),
            });
        }
        Ok(())
    }

    fn consume_allowance(&mut self, owner: Address, spender: Address, amount: Decimal) {
        if let Some(remaining) = self.allowances.get_mut(&(owner, spender)) {
            *remaining -= amount;
        }
    }

    /// Credit with overflow protection.
    fn credit(&mut self, account: Address, amount: Decimal) -> Result<(), LedgerError> {
        let current = self.balances.entry(account).or_insert(Decimal::ZERO);
        let new_balance = current.checked_add(amount).ok_or(LedgerError::Overflow)?;
        *current = new_balance;
        Ok(())
    }

    /// Debit with balance verification.
    fn debit(&mut self, account: Address, amount: Decimal) -> Result<(), LedgerError> {
        let current = self.balance_of(account);
        if current < amount {
            return Err(LedgerError::InsufficientBalance {
                required: amount.to_string(),
                available: current.to_string(),
            });
        }
        self.balances.insert(account, current - amount);
        Ok(())
    }
}

fn check_amount(amount: Decimal) -> Result<(), LedgerError> {
    if amount < Decimal::ZERO {
        return Err(LedgerError::InvalidAmount);
    }
    Ok(())
}
