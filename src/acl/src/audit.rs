//! Append-only audit stream for ledger state transitions
//!
//! Every successful mutating operation appends exactly one structured event;
//! failed calls append nothing. The log is the off-process reconstruction
//! source for the ledger: replaying the events in `seq` order rebuilds every
//! ownership and permission transition. Emission never blocks or fails the
//! primary operation.

use crate::types::ResourceRecord;
use chrono::{DateTime, Utc};
use resguard_core::{Identity, ResourceId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::debug;

/// Capacity of the live broadcast feed; a lagging subscriber loses old
/// events, never the emitter.
const FEED_CAPACITY: usize = 1024;

/// What happened, with the new values carried inline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuditKind {
    /// A resource was registered
    ResourceRegistered {
        resource: ResourceId,
        owner: Identity,
        location_uri: String,
    },

    /// Resource ownership changed hands
    OwnershipTransferred {
        resource: ResourceId,
        previous_owner: Identity,
        new_owner: Identity,
    },

    /// The recorded location string was rewritten
    LocationUpdated {
        resource: ResourceId,
        new_uri: String,
    },

    /// A resource was unregistered
    ResourceDeleted { resource: ResourceId },

    /// A standing modification grant was issued
    PermissionGranted {
        resource: ResourceId,
        user: Identity,
    },

    /// A standing modification grant was withdrawn
    PermissionRevoked {
        resource: ResourceId,
        user: Identity,
    },

    /// Control of the oracle service itself was handed off
    AuthorityTransferred {
        previous_admin: Identity,
        new_admin: Identity,
    },
}

impl AuditKind {
    /// The resource this event concerns, if any
    pub fn resource(&self) -> Option<ResourceId> {
        match self {
            AuditKind::ResourceRegistered { resource, .. }
            | AuditKind::OwnershipTransferred { resource, .. }
            | AuditKind::LocationUpdated { resource, .. }
            | AuditKind::ResourceDeleted { resource }
            | AuditKind::PermissionGranted { resource, .. }
            | AuditKind::PermissionRevoked { resource, .. } => Some(*resource),
            AuditKind::AuthorityTransferred { .. } => None,
        }
    }
}

/// One audit record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Position in the global commit order (monotonic, gap-free)
    pub seq: u64,

    /// Unique event identifier
    pub id: String,

    /// When the transition committed
    pub timestamp: DateTime<Utc>,

    /// Identity that performed the operation
    pub actor: Identity,

    /// The transition itself
    pub kind: AuditKind,
}

/// Audit stream statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditStats {
    /// Total events recorded since bootstrap
    pub total_events: usize,

    /// Sequence number of the most recent event, if any
    pub last_seq: Option<u64>,
}

/// Append-only event log with a live broadcast feed
pub struct AuditEmitter {
    log: RwLock<Vec<AuditEvent>>,
    feed: broadcast::Sender<AuditEvent>,
}

impl AuditEmitter {
    /// Create an empty audit stream
    pub fn new() -> Self {
        let (feed, _) = broadcast::channel(FEED_CAPACITY);
        Self {
            log: RwLock::new(Vec::new()),
            feed,
        }
    }

    /// Create a shared audit stream
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Append one event to the stream.
    ///
    /// Infallible: subscribers that dropped or lagged are ignored. Callers
    /// invoke this only after the state transition has been applied, so the
    /// log holds committed transitions exclusively.
    pub async fn emit(&self, actor: Identity, kind: AuditKind) {
        let mut log = self.log.write().await;
        let event = AuditEvent {
            seq: log.len() as u64,
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            actor,
            kind,
        };

        debug!(seq = event.seq, actor = %event.actor, "audit event: {:?}", event.kind);

        // A send error only means there are no live subscribers.
        let _ = self.feed.send(event.clone());
        log.push(event);
    }

    /// Subscribe to the live event feed
    pub fn subscribe(&self) -> broadcast::Receiver<AuditEvent> {
        self.feed.subscribe()
    }

    /// Snapshot of every recorded event, in commit order
    pub async fn events(&self) -> Vec<AuditEvent> {
        self.log.read().await.clone()
    }

    /// Events concerning one resource, in commit order
    pub async fn for_resource(&self, id: &ResourceId) -> Vec<AuditEvent> {
        self.log
            .read()
            .await
            .iter()
            .filter(|event| event.kind.resource() == Some(*id))
            .cloned()
            .collect()
    }

    /// Events performed by one actor, in commit order
    pub async fn for_actor(&self, actor: &Identity) -> Vec<AuditEvent> {
        self.log
            .read()
            .await
            .iter()
            .filter(|event| event.actor == *actor)
            .cloned()
            .collect()
    }

    /// Stream statistics
    pub async fn stats(&self) -> AuditStats {
        let log = self.log.read().await;
        AuditStats {
            total_events: log.len(),
            last_seq: log.last().map(|event| event.seq),
        }
    }
}

impl Default for AuditEmitter {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience constructor for registration events
pub fn registered(id: ResourceId, record: &ResourceRecord) -> AuditKind {
    AuditKind::ResourceRegistered {
        resource: id,
        owner: record.owner,
        location_uri: record.location_uri.clone(),
    }
}
