//! Ledger storage abstraction
//!
//! The oracle runs against an abstract key-value store with atomic
//! single-writer-per-key semantics, not a concrete database. The components
//! never touch a backend directly; they go through [`AclStore`], and the
//! shared commit lock in the components serializes every read-modify-write
//! sequence, so implementations only need per-call atomicity.

use crate::error::Result;
use crate::types::ResourceRecord;
use async_trait::async_trait;
use resguard_core::{Identity, ResourceId};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Storage backend for resource records and permission grants
#[async_trait]
pub trait AclStore: Send + Sync {
    /// Get the record for a resource, if registered
    async fn resource(&self, id: &ResourceId) -> Result<Option<ResourceRecord>>;

    /// Store (insert or overwrite) a resource record
    async fn put_resource(&self, id: ResourceId, record: ResourceRecord) -> Result<()>;

    /// Remove a resource record; removing an absent record is a no-op
    async fn remove_resource(&self, id: &ResourceId) -> Result<()>;

    /// Whether a standing grant exists for (resource, user)
    async fn grant_flag(&self, id: &ResourceId, user: &Identity) -> Result<bool>;

    /// Set or clear the grant flag for (resource, user)
    async fn set_grant_flag(&self, id: &ResourceId, user: &Identity, granted: bool) -> Result<()>;
}

/// In-memory store implementation
pub struct MemoryStore {
    resources: RwLock<HashMap<ResourceId, ResourceRecord>>,
    grants: RwLock<HashMap<(ResourceId, Identity), bool>>,
}

impl MemoryStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self {
            resources: RwLock::new(HashMap::new()),
            grants: RwLock::new(HashMap::new()),
        }
    }

    /// Number of registered resources (test and introspection helper)
    pub async fn resource_count(&self) -> usize {
        self.resources.read().await.len()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AclStore for MemoryStore {
    async fn resource(&self, id: &ResourceId) -> Result<Option<ResourceRecord>> {
        let resources = self.resources.read().await;
        Ok(resources.get(id).cloned())
    }

    async fn put_resource(&self, id: ResourceId, record: ResourceRecord) -> Result<()> {
        let mut resources = self.resources.write().await;
        resources.insert(id, record);
        Ok(())
    }

    async fn remove_resource(&self, id: &ResourceId) -> Result<()> {
        let mut resources = self.resources.write().await;
        resources.remove(id);
        Ok(())
    }

    async fn grant_flag(&self, id: &ResourceId, user: &Identity) -> Result<bool> {
        let grants = self.grants.read().await;
        Ok(grants.get(&(*id, *user)).copied().unwrap_or(false))
    }

    async fn set_grant_flag(&self, id: &ResourceId, user: &Identity, granted: bool) -> Result<()> {
        let mut grants = self.grants.write().await;
        if granted {
            grants.insert((*id, *user), true);
        } else {
            // Clearing removes the entry outright so revoked pairs do not
            // accumulate in the map.
            grants.remove(&(*id, *user));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(owner_byte: u8, uri: &str) -> ResourceRecord {
        ResourceRecord {
            owner: Identity::new([owner_byte; 32]),
            location_uri: uri.to_string(),
        }
    }

    #[tokio::test]
    async fn test_resource_crud() {
        let store = MemoryStore::new();
        let id = ResourceId::from_location("loc://A");

        assert!(store.resource(&id).await.unwrap().is_none());

        store.put_resource(id, record(1, "loc://A")).await.unwrap();
        let stored = store.resource(&id).await.unwrap().unwrap();
        assert_eq!(stored.location_uri, "loc://A");
        assert_eq!(store.resource_count().await, 1);

        store.remove_resource(&id).await.unwrap();
        assert!(store.resource(&id).await.unwrap().is_none());

        // Removing again is a no-op
        store.remove_resource(&id).await.unwrap();
    }

    #[tokio::test]
    async fn test_grant_flags() {
        let store = MemoryStore::new();
        let id = ResourceId::from_location("loc://A");
        let user = Identity::new([9u8; 32]);

        assert!(!store.grant_flag(&id, &user).await.unwrap());

        store.set_grant_flag(&id, &user, true).await.unwrap();
        assert!(store.grant_flag(&id, &user).await.unwrap());

        store.set_grant_flag(&id, &user, false).await.unwrap();
        assert!(!store.grant_flag(&id, &user).await.unwrap());
    }

    #[tokio::test]
    async fn test_grants_survive_resource_removal() {
        let store = MemoryStore::new();
        let id = ResourceId::from_location("loc://A");
        let user = Identity::new([9u8; 32]);

        store.put_resource(id, record(1, "loc://A")).await.unwrap();
        store.set_grant_flag(&id, &user, true).await.unwrap();
        store.remove_resource(&id).await.unwrap();

        assert!(store.grant_flag(&id, &user).await.unwrap());
    }
}
