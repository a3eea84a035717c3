//! Authorization decision engine
//!
//! The one function external callers actually query. Pure read: no side
//! effects, no locks beyond the store's own, safe to call arbitrarily often
//! and concurrently against the most recently committed state.

use crate::error::Result;
use crate::ledger::ResourceLedger;
use crate::permissions::PermissionTable;
use resguard_core::{ActionSelector, Identity, ResourceId};
use std::sync::Arc;
use tracing::debug;

/// Composes ledger and permission state into an allow/deny answer
pub struct AuthorizationEngine {
    ledger: Arc<ResourceLedger>,
    permissions: Arc<PermissionTable>,
}

impl AuthorizationEngine {
    /// Create an engine over the ledger and permission table
    pub fn new(ledger: Arc<ResourceLedger>, permissions: Arc<PermissionTable>) -> Self {
        Self {
            ledger,
            permissions,
        }
    }

    /// Decide whether `caller` may perform `action` on `resource`.
    ///
    /// Decision order:
    /// 1. unregistered resource: deny, for every caller;
    /// 2. caller is the current owner: allow, for every action selector;
    /// 3. caller holds a standing grant: allow (all selectors are treated
    ///    identically under the current policy);
    /// 4. otherwise: deny.
    ///
    /// The selector is an extension point for a future per-action policy
    /// table; callers must not assume the engine discriminates on it today.
    pub async fn is_authorized(
        &self,
        resource: &ResourceId,
        caller: &Identity,
        action: &ActionSelector,
    ) -> Result<bool> {
        let Some(owner) = self.ledger.owner_of(resource).await? else {
            debug!(resource = %resource, caller = %caller, action = %action, "deny: unregistered");
            return Ok(false);
        };

        if owner == *caller {
            debug!(resource = %resource, caller = %caller, action = %action, "allow: owner");
            return Ok(true);
        }

        if self.permissions.is_granted(resource, caller).await? {
            debug!(resource = %resource, caller = %caller, action = %action, "allow: standing grant");
            return Ok(true);
        }

        debug!(resource = %resource, caller = %caller, action = %action, "deny: no grant");
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::AuditEmitter;
    use crate::store::{AclStore, MemoryStore};
    use tokio::sync::Mutex;

    fn identity(byte: u8) -> Identity {
        Identity::new([byte; 32])
    }

    fn engine() -> (Arc<ResourceLedger>, Arc<PermissionTable>, AuthorizationEngine) {
        let store: Arc<dyn AclStore> = Arc::new(MemoryStore::new());
        let commit = Arc::new(Mutex::new(()));
        let audit = AuditEmitter::shared();
        let ledger = Arc::new(ResourceLedger::new(
            store.clone(),
            commit.clone(),
            audit.clone(),
        ));
        let permissions = Arc::new(PermissionTable::new(
            store,
            ledger.clone(),
            commit,
            audit,
        ));
        let engine = AuthorizationEngine::new(ledger.clone(), permissions.clone());
        (ledger, permissions, engine)
    }

    #[tokio::test]
    async fn test_owner_is_always_authorized() {
        let (ledger, _permissions, engine) = engine();
        let alice = identity(1);
        let id = ledger.register(alice, "loc://A", alice).await.unwrap();

        for action in ["edit", "delete", "rename", "anything-at-all"] {
            let selector = ActionSelector::new(action);
            assert!(engine.is_authorized(&id, &alice, &selector).await.unwrap());
            // Idempotent across repeated calls
            assert!(engine.is_authorized(&id, &alice, &selector).await.unwrap());
        }
    }

    #[tokio::test]
    async fn test_unregistered_resource_denies_everyone() {
        let (_ledger, _permissions, engine) = engine();
        let ghost = ResourceId::from_location("loc://ghost");

        assert!(!engine
            .is_authorized(&ghost, &identity(1), &ActionSelector::edit())
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_grant_allows_every_action() {
        let (ledger, permissions, engine) = engine();
        let alice = identity(1);
        let bob = identity(2);
        let id = ledger.register(alice, "loc://A", alice).await.unwrap();

        assert!(!engine
            .is_authorized(&id, &bob, &ActionSelector::edit())
            .await
            .unwrap());

        permissions.grant(alice, id, bob).await.unwrap();

        // A general grant covers every selector
        assert!(engine
            .is_authorized(&id, &bob, &ActionSelector::edit())
            .await
            .unwrap());
        assert!(engine
            .is_authorized(&id, &bob, &ActionSelector::delete())
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_revoke_restores_pre_grant_state() {
        let (ledger, permissions, engine) = engine();
        let alice = identity(1);
        let bob = identity(2);
        let id = ledger.register(alice, "loc://A", alice).await.unwrap();

        permissions.grant(alice, id, bob).await.unwrap();
        permissions.revoke(alice, id, bob).await.unwrap();

        assert!(!engine
            .is_authorized(&id, &bob, &ActionSelector::edit())
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_deletion_denies_former_owner() {
        let (ledger, _permissions, engine) = engine();
        let alice = identity(1);
        let id = ledger.register(alice, "loc://A", alice).await.unwrap();

        ledger.delete_record(alice, id).await.unwrap();

        assert!(!engine
            .is_authorized(&id, &alice, &ActionSelector::edit())
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_transfer_preserves_grants() {
        let (ledger, permissions, engine) = engine();
        let alice = identity(1);
        let bob = identity(2);
        let carol = identity(3);
        let id = ledger.register(alice, "loc://A", alice).await.unwrap();

        permissions.grant(alice, id, bob).await.unwrap();
        ledger.transfer_ownership(alice, id, carol).await.unwrap();

        // Grant persists under the new owner until explicitly revoked
        assert!(engine
            .is_authorized(&id, &bob, &ActionSelector::edit())
            .await
            .unwrap());
        assert!(engine
            .is_authorized(&id, &carol, &ActionSelector::edit())
            .await
            .unwrap());
        assert!(!engine
            .is_authorized(&id, &alice, &ActionSelector::edit())
            .await
            .unwrap());
    }
}
