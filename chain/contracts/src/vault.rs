//! Vault — fee accumulation account and owner-gated sweep
//!
//! The vault takes no action to get funded: the ledger credits diverted
//! transfer fees directly to the vault's address. The vault's only
//! operation reads that balance and sweeps it, in full, to the vault's
//! designated owner.

use rust_decimal::Decimal;
use types::ids::Address;

use crate::errors::VaultError;
use crate::events::{ContractEvent, VaultSwept};
use crate::ledger::Ledger;

/// Fee accumulation account with a designated sweep recipient.
///
/// The vault holds its own ledger address. `Ledger::set_vault_address`
/// whitelists that address, so the sweep transfer is never itself
/// fee-eligible.
#[derive(Debug)]
pub struct Vault {
    /// The vault's account on the ledger
    address: Address,
    /// The only caller allowed to sweep
    owner: Address,
    /// Emitted events log (append-only)
    events: Vec<ContractEvent>,
}

impl Vault {
    /// Create a vault owned by `owner`, with a fresh ledger address.
    pub fn new(owner: Address) -> Self {
        Self {
            address: Address::new(),
            owner,
            events: Vec::new(),
        }
    }

    /// The vault's account address on the ledger.
    pub fn address(&self) -> Address {
        self.address
    }

    /// The address allowed to sweep.
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Current accumulated balance on the ledger.
    pub fn balance(&self, ledger: &Ledger) -> Decimal {
        ledger.balance_of(self.address)
    }

    /// Sweep the vault's entire balance to its owner.
    ///
    /// Caller must be the vault owner. Sweeping an empty vault transfers
    /// zero and succeeds.
    pub fn withdraw(
        &mut self,
        ledger: &mut Ledger,
        caller: Address,
    ) -> Result<ContractEvent, VaultError> {
        if caller != self.owner {
            return Err(VaultError::Unauthorized);
        }

        let amount = ledger.balance_of(self.address);
        ledger.transfer(self.address, self.owner, amount)?;

        let event = ContractEvent::VaultSwept(VaultSwept {
            vault: self.address,
            recipient: self.owner,
            amount,
        });
        self.events.push(event.clone());
        Ok(event)
    }

    /// Get all emitted events.
    pub fn events(&self) -> &[ContractEvent] {
        &self.events
    }

    /// Drain all events (consume and clear).
    pub fn drain_events(&mut self) -> Vec<ContractEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Ledger, Vault, Address) {
        let deployer = Address::new();
        let mut ledger = Ledger::new(deployer, Decimal::from(1000)).unwrap();
        let vault = Vault::new(deployer);
        ledger.set_vault_address(deployer, vault.address()).unwrap();
        (ledger, vault, deployer)
    }

    fn fund_vault(ledger: &mut Ledger, deployer: Address) {
        // a 500 transfer from a non-whitelisted sender diverts 25
        ledger
            .transfer(deployer, Address::new(), Decimal::from(500))
            .unwrap();
    }

    #[test]
    fn test_withdraw_sweeps_full_balance() {
        let (mut ledger, mut vault, deployer) = setup();
        fund_vault(&mut ledger, deployer);
        assert_eq!(vault.balance(&ledger), Decimal::from(25));

        vault.withdraw(&mut ledger, deployer).unwrap();
        assert_eq!(vault.balance(&ledger), Decimal::ZERO);
        assert_eq!(ledger.balance_of(deployer), Decimal::from(525));
        assert!(ledger.check_conservation());
    }

    #[test]
    fn test_withdraw_is_fee_free_while_fees_active() {
        let (mut ledger, mut vault, deployer) = setup();
        fund_vault(&mut ledger, deployer);

        let event = vault.withdraw(&mut ledger, deployer).unwrap();
        match event {
            ContractEvent::VaultSwept(swept) => assert_eq!(swept.amount, Decimal::from(25)),
            other => panic!("unexpected event: {:?}", other),
        }
        // nothing leaked back into the vault through the sweep itself
        assert_eq!(vault.balance(&ledger), Decimal::ZERO);
    }

    #[test]
    fn test_withdraw_unauthorized() {
        let (mut ledger, mut vault, deployer) = setup();
        fund_vault(&mut ledger, deployer);

        let eve = Address::new();
        let result = vault.withdraw(&mut ledger, eve);
        assert_eq!(result, Err(VaultError::Unauthorized));
        assert_eq!(vault.balance(&ledger), Decimal::from(25));
    }

    #[test]
    fn test_withdraw_empty_vault_is_noop() {
        let (mut ledger, mut vault, deployer) = setup();
        let before = ledger.balance_of(deployer);

        vault.withdraw(&mut ledger, deployer).unwrap();
        assert_eq!(ledger.balance_of(deployer), before);
        assert_eq!(vault.balance(&ledger), Decimal::ZERO);
    }

    #[test]
    fn test_vault_accumulates_across_transfers() {
        let (mut ledger, vault, deployer) = setup();
        ledger
            .transfer(deployer, Address::new(), Decimal::from(200))
            .unwrap();
        ledger
            .transfer(deployer, Address::new(), Decimal::from(300))
            .unwrap();
        // 10 + 15
        assert_eq!(vault.balance(&ledger), Decimal::from(25));
    }

    #[test]
    fn test_withdraw_records_event() {
        let (mut ledger, mut vault, deployer) = setup();
        fund_vault(&mut ledger, deployer);
        vault.withdraw(&mut ledger, deployer).unwrap();
        assert_eq!(vault.events().len(), 1);
        let drained = vault.drain_events();
        assert_eq!(drained.len(), 1);
        assert!(vault.events().is_empty());
    }

    #[test]
    fn test_vault_owner_distinct_from_ledger_owner() {
        let deployer = Address::new();
        let treasurer = Address::new();
        let mut ledger = Ledger::new(deployer, Decimal::from(1000)).unwrap();
        let mut vault = Vault::new(treasurer);
        ledger.set_vault_address(deployer, vault.address()).unwrap();
        ledger
            .transfer(deployer, Address::new(), Decimal::from(500))
            .unwrap();

        // the ledger owner is not the vault owner here
        assert_eq!(
            vault.withdraw(&mut ledger, deployer),
            Err(VaultError::Unauthorized)
        );
        vault.withdraw(&mut ledger, treasurer).unwrap();
        assert_eq!(ledger.balance_of(treasurer), Decimal::from(25));
    }
}
