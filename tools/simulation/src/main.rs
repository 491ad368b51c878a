//! Deployment scenario driver
//!
//! Deploys a fresh ledger and vault and walks the full fee lifecycle:
//! a fee-free transfer before the vault is wired, a fee-eligible transfer
//! after, and the owner's sweep of the accumulated fees. Wiring order
//! matters: transfers made before `set_vault_address` pay no fee.

use contracts::ledger::Ledger;
use contracts::vault::Vault;
use rust_decimal::Decimal;
use types::ids::Address;

fn main() -> Result<(), anyhow::Error> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    tracing::info!("Deploying token ledger");

    let deployer = Address::new();
    let alice = Address::new();
    let bob = Address::new();

    let mut ledger = Ledger::new(deployer, Decimal::from(1000))?;
    tracing::info!(
        owner = %deployer,
        supply = %ledger.total_supply(),
        "Ledger deployed"
    );

    // Vault not wired yet: this transfer is fee-free
    ledger.transfer(deployer, alice, Decimal::from(500))?;
    tracing::info!(
        alice = %ledger.balance_of(alice),
        deployer = %ledger.balance_of(deployer),
        "Fee-free transfer settled"
    );

    let mut vault = Vault::new(deployer);
    ledger.set_vault_address(deployer, vault.address())?;
    tracing::info!(vault = %vault.address(), "Vault wired; fee diversion active");

    ledger.transfer(alice, bob, Decimal::from(500))?;
    tracing::info!(
        bob = %ledger.balance_of(bob),
        vault = %vault.balance(&ledger),
        "Fee-eligible transfer settled"
    );

    vault.withdraw(&mut ledger, deployer)?;
    tracing::info!(
        deployer = %ledger.balance_of(deployer),
        vault = %vault.balance(&ledger),
        "Vault swept"
    );

    tracing::info!(
        conserved = ledger.check_conservation(),
        events = ledger.events().len(),
        "Scenario complete"
    );

    Ok(())
}
