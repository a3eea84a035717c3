//! Standing permission grants
//!
//! A grant is a persistent, non-expiring permission keyed by (resource,
//! user), scoped independently of the resource's registration state. Grants
//! are created and destroyed only by the resource's current owner; deleting
//! the resource does not touch them.

use crate::audit::{AuditEmitter, AuditKind};
use crate::error::{AclError, Result};
use crate::ledger::ResourceLedger;
use crate::store::AclStore;
use resguard_core::{Identity, ResourceId};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// Grant state for every (resource, user) pair
pub struct PermissionTable {
    store: Arc<dyn AclStore>,
    ledger: Arc<ResourceLedger>,
    commit: Arc<Mutex<()>>,
    audit: Arc<AuditEmitter>,
}

impl PermissionTable {
    /// Create a permission table over the same store and commit lock as the
    /// resource ledger it consults for ownership checks.
    pub fn new(
        store: Arc<dyn AclStore>,
        ledger: Arc<ResourceLedger>,
        commit: Arc<Mutex<()>>,
        audit: Arc<AuditEmitter>,
    ) -> Self {
        Self {
            store,
            ledger,
            commit,
            audit,
        }
    }

    /// Issue a standing modification grant for `user` on `resource`.
    ///
    /// Only the current owner may grant. An unregistered resource has no
    /// owner to match, so granting on one fails `Forbidden` without a
    /// dedicated existence check.
    pub async fn grant(&self, caller: Identity, resource: ResourceId, user: Identity) -> Result<()> {
        let _commit = self.commit.lock().await;

        self.require_owner(&resource, &caller).await?;
        if user.is_zero() {
            return Err(AclError::invalid("grantee must not be null"));
        }

        self.store.set_grant_flag(&resource, &user, true).await?;
        self.audit
            .emit(caller, AuditKind::PermissionGranted { resource, user })
            .await;

        info!(resource = %resource, user = %user, "permission granted");
        Ok(())
    }

    /// Withdraw a standing grant. Idempotent: revoking an absent grant
    /// succeeds silently.
    pub async fn revoke(
        &self,
        caller: Identity,
        resource: ResourceId,
        user: Identity,
    ) -> Result<()> {
        let _commit = self.commit.lock().await;

        self.require_owner(&resource, &caller).await?;
        if user.is_zero() {
            return Err(AclError::invalid("grantee must not be null"));
        }

        self.store.set_grant_flag(&resource, &user, false).await?;
        self.audit
            .emit(caller, AuditKind::PermissionRevoked { resource, user })
            .await;

        info!(resource = %resource, user = %user, "permission revoked");
        Ok(())
    }

    /// Whether a standing grant exists for (resource, user). Pure read.
    pub async fn is_granted(&self, resource: &ResourceId, user: &Identity) -> Result<bool> {
        self.store.grant_flag(resource, user).await
    }

    async fn require_owner(&self, resource: &ResourceId, caller: &Identity) -> Result<()> {
        match self.ledger.owner_of(resource).await? {
            Some(owner) if owner == *caller => Ok(()),
            Some(_) => Err(AclError::forbidden("caller is not the resource owner")),
            None => Err(AclError::forbidden(
                "resource is not registered, no owner to match",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn identity(byte: u8) -> Identity {
        Identity::new([byte; 32])
    }

    fn components() -> (Arc<ResourceLedger>, PermissionTable) {
        let store: Arc<dyn AclStore> = Arc::new(MemoryStore::new());
        let commit = Arc::new(Mutex::new(()));
        let audit = AuditEmitter::shared();
        let ledger = Arc::new(ResourceLedger::new(
            store.clone(),
            commit.clone(),
            audit.clone(),
        ));
        let table = PermissionTable::new(store, ledger.clone(), commit, audit);
        (ledger, table)
    }

    #[tokio::test]
    async fn test_grant_and_revoke() {
        let (ledger, table) = components();
        let alice = identity(1);
        let bob = identity(2);

        let id = ledger.register(alice, "loc://A", alice).await.unwrap();
        assert!(!table.is_granted(&id, &bob).await.unwrap());

        table.grant(alice, id, bob).await.unwrap();
        assert!(table.is_granted(&id, &bob).await.unwrap());

        table.revoke(alice, id, bob).await.unwrap();
        assert!(!table.is_granted(&id, &bob).await.unwrap());
    }

    #[tokio::test]
    async fn test_revoke_is_idempotent() {
        let (ledger, table) = components();
        let alice = identity(1);
        let bob = identity(2);

        let id = ledger.register(alice, "loc://A", alice).await.unwrap();

        // Never granted; revoking still succeeds
        table.revoke(alice, id, bob).await.unwrap();
        table.revoke(alice, id, bob).await.unwrap();
        assert!(!table.is_granted(&id, &bob).await.unwrap());
    }

    #[tokio::test]
    async fn test_non_owner_cannot_grant() {
        let (ledger, table) = components();
        let alice = identity(1);
        let mallory = identity(2);

        let id = ledger.register(alice, "loc://A", alice).await.unwrap();
        let err = table.grant(mallory, id, mallory).await.unwrap_err();
        assert!(matches!(err, AclError::Forbidden(_)));
        assert!(!table.is_granted(&id, &mallory).await.unwrap());
    }

    #[tokio::test]
    async fn test_grant_on_unregistered_resource_is_forbidden() {
        let (_ledger, table) = components();
        let alice = identity(1);
        let ghost = ResourceId::from_location("loc://ghost");

        let err = table.grant(alice, ghost, identity(2)).await.unwrap_err();
        assert!(matches!(err, AclError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_grant_rejects_null_grantee() {
        let (ledger, table) = components();
        let alice = identity(1);

        let id = ledger.register(alice, "loc://A", alice).await.unwrap();
        let err = table.grant(alice, id, Identity::ZERO).await.unwrap_err();
        assert!(matches!(err, AclError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_grants_survive_deletion() {
        let (ledger, table) = components();
        let alice = identity(1);
        let bob = identity(2);

        let id = ledger.register(alice, "loc://A", alice).await.unwrap();
        table.grant(alice, id, bob).await.unwrap();
        ledger.delete_record(alice, id).await.unwrap();

        // The flag is still on record even though the resource is gone
        assert!(table.is_granted(&id, &bob).await.unwrap());
    }
}
