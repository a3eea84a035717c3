//! Walkthrough of the oracle: bootstrap, a grant flow, and a live audit
//! subscriber.
//!
//! Run with `RUST_LOG=debug cargo run --example acl_demo` to see the
//! decision tracing.

use resguard_acl::{AclOracle, OracleConfig};
use resguard_core::{ActionSelector, Identity};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let admin = Identity::new([0xad; 32]);
    let alice = Identity::new([1u8; 32]);
    let bob = Identity::new([2u8; 32]);

    let oracle = AclOracle::in_memory(OracleConfig {
        administrator: admin,
    })?;

    // Watch the audit stream while we work
    let mut feed = oracle.audit().subscribe();
    let watcher = tokio::spawn(async move {
        while let Ok(event) = feed.recv().await {
            println!("[audit #{:03}] {} {:?}", event.seq, event.actor, event.kind);
        }
    });

    let id = oracle
        .ledger()
        .register(alice, "ipfs://bafy.../report.pdf", alice)
        .await?;
    println!("registered {} -> owner {}", id, alice);

    let edit = ActionSelector::edit();
    println!(
        "bob may edit before grant: {}",
        oracle.engine().is_authorized(&id, &bob, &edit).await?
    );

    oracle.permissions().grant(alice, id, bob).await?;
    println!(
        "bob may edit after grant:  {}",
        oracle.engine().is_authorized(&id, &bob, &edit).await?
    );

    oracle.permissions().revoke(alice, id, bob).await?;
    oracle.ledger().delete_record(alice, id).await?;
    println!(
        "alice may edit after delete: {}",
        oracle.engine().is_authorized(&id, &alice, &edit).await?
    );

    let stats = oracle.audit().stats().await;
    println!("{} audit events recorded", stats.total_events);

    watcher.abort();
    Ok(())
}
