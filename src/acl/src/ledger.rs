//! Resource ledger: ownership and location records
//!
//! All mutations run under the shared commit lock, so the ledger behaves as
//! a single global sequential log: every operation either commits in full or
//! fails before any state is touched, and overlapping writes are resolved
//! purely by commit order.

use crate::audit::{self, AuditEmitter, AuditKind};
use crate::error::{AclError, Result};
use crate::store::AclStore;
use crate::types::ResourceRecord;
use resguard_core::{Identity, ResourceId};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Ownership and location state for every registered resource
pub struct ResourceLedger {
    store: Arc<dyn AclStore>,
    commit: Arc<Mutex<()>>,
    audit: Arc<AuditEmitter>,
}

impl ResourceLedger {
    /// Create a ledger over a storage backend.
    ///
    /// The commit lock must be the same instance shared with every other
    /// component that mutates overlapping state.
    pub fn new(store: Arc<dyn AclStore>, commit: Arc<Mutex<()>>, audit: Arc<AuditEmitter>) -> Self {
        Self {
            store,
            commit,
            audit,
        }
    }

    /// Register a resource under a proposed owner and return its id.
    ///
    /// The id is the BLAKE3 digest of the location string, so registration is
    /// idempotent on collision detection, not on content: two callers picking
    /// the same location string always collide on the same id, and the second
    /// registration fails with `AlreadyExists`.
    pub async fn register(
        &self,
        caller: Identity,
        location_uri: &str,
        proposed_owner: Identity,
    ) -> Result<ResourceId> {
        let _commit = self.commit.lock().await;

        if location_uri.is_empty() {
            return Err(AclError::invalid("location URI must not be empty"));
        }
        if proposed_owner.is_zero() {
            return Err(AclError::invalid("proposed owner must not be null"));
        }

        let id = ResourceId::from_location(location_uri);
        if self.store.resource(&id).await?.is_some() {
            return Err(AclError::AlreadyExists(id));
        }

        let record = ResourceRecord {
            owner: proposed_owner,
            location_uri: location_uri.to_string(),
        };
        self.store.put_resource(id, record.clone()).await?;
        self.audit.emit(caller, audit::registered(id, &record)).await;

        info!(resource = %id, owner = %proposed_owner, "resource registered");
        Ok(id)
    }

    /// Hand the resource to a new owner.
    ///
    /// Standing grants are not modified: they persist and apply under the new
    /// owner's regime until explicitly revoked.
    pub async fn transfer_ownership(
        &self,
        caller: Identity,
        id: ResourceId,
        new_owner: Identity,
    ) -> Result<()> {
        let _commit = self.commit.lock().await;

        let mut record = self.require_owner(&id, &caller).await?;
        if new_owner.is_zero() {
            return Err(AclError::invalid("new owner must not be null"));
        }

        let previous_owner = record.owner;
        record.owner = new_owner;
        self.store.put_resource(id, record).await?;
        self.audit
            .emit(
                caller,
                AuditKind::OwnershipTransferred {
                    resource: id,
                    previous_owner,
                    new_owner,
                },
            )
            .await;

        info!(resource = %id, from = %previous_owner, to = %new_owner, "ownership transferred");
        Ok(())
    }

    /// Rewrite the recorded location string. The resource id is derived from
    /// the original location and is unaffected.
    pub async fn update_location(
        &self,
        caller: Identity,
        id: ResourceId,
        new_uri: &str,
    ) -> Result<()> {
        let _commit = self.commit.lock().await;

        let mut record = self.require_owner(&id, &caller).await?;
        if new_uri.is_empty() {
            return Err(AclError::invalid("location URI must not be empty"));
        }

        record.location_uri = new_uri.to_string();
        self.store.put_resource(id, record).await?;
        self.audit
            .emit(
                caller,
                AuditKind::LocationUpdated {
                    resource: id,
                    new_uri: new_uri.to_string(),
                },
            )
            .await;

        info!(resource = %id, "location record updated");
        Ok(())
    }

    /// Unregister the resource: owner and location are cleared and every
    /// authorization query for the id resolves to deny.
    ///
    /// Permission grants for the id are left in place. If the same location
    /// string is registered again later (yielding the identical id), those
    /// grants become live again under the new owner without being re-issued;
    /// owners who want a clean slate must revoke before deleting.
    pub async fn delete_record(&self, caller: Identity, id: ResourceId) -> Result<()> {
        let _commit = self.commit.lock().await;

        self.require_owner(&id, &caller).await?;
        self.store.remove_resource(&id).await?;
        self.audit
            .emit(caller, AuditKind::ResourceDeleted { resource: id })
            .await;

        info!(resource = %id, "resource deleted");
        Ok(())
    }

    /// Read the full record for a resource; `None` when unregistered
    pub async fn lookup(&self, id: &ResourceId) -> Result<Option<ResourceRecord>> {
        self.store.resource(id).await
    }

    /// Read the current owner; `None` when unregistered
    pub async fn owner_of(&self, id: &ResourceId) -> Result<Option<Identity>> {
        Ok(self.store.resource(id).await?.map(|record| record.owner))
    }

    /// Load the record and require that `caller` is its current owner.
    /// An unregistered resource has no owner to match, so it is `Forbidden`
    /// for every caller.
    async fn require_owner(&self, id: &ResourceId, caller: &Identity) -> Result<ResourceRecord> {
        match self.store.resource(id).await? {
            Some(record) if record.owner == *caller => Ok(record),
            Some(_) => {
                debug!(resource = %id, caller = %caller, "owner check failed");
                Err(AclError::forbidden("caller is not the resource owner"))
            }
            None => Err(AclError::forbidden(
                "resource is not registered, no owner to match",
            )),
        }
    }
}
