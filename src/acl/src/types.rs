//! Ledger records and the oracle call surface

use resguard_core::{ActionSelector, Identity, ResourceId};
use serde::{Deserialize, Serialize};

/// Per-resource ledger state.
///
/// A resource is registered iff a record exists for its id; the owner of a
/// live record is never the null identity. The location string is
/// record-keeping only — rewriting it never changes the resource id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecord {
    /// Current owner (non-null while registered)
    pub owner: Identity,

    /// Last-known location of the resource bytes
    pub location_uri: String,
}

/// Oracle bootstrap configuration.
///
/// Created once at service bootstrap and injected into the oracle; the
/// administrative identity is mutable afterwards only through
/// `transfer_service_authority`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleConfig {
    /// Identity allowed to hand off or retire the oracle service itself.
    /// Holds no power over individual resources or grants.
    pub administrator: Identity,
}

/// A single protocol call, addressed to the oracle's dispatch surface
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum OracleCall {
    /// Register a resource under a proposed owner
    Register {
        location_uri: String,
        proposed_owner: Identity,
    },

    /// Hand the resource to a new owner (current owner only)
    TransferOwnership {
        resource: ResourceId,
        new_owner: Identity,
    },

    /// Rewrite the recorded location string (current owner only)
    UpdateLocationRecord {
        resource: ResourceId,
        new_uri: String,
    },

    /// Unregister the resource (current owner only)
    DeleteRecord { resource: ResourceId },

    /// Give a user a standing modification grant (current owner only)
    Grant {
        resource: ResourceId,
        user: Identity,
    },

    /// Withdraw a standing grant (current owner only, idempotent)
    Revoke {
        resource: ResourceId,
        user: Identity,
    },

    /// Ask whether a caller may perform an action on a resource
    IsAuthorized {
        resource: ResourceId,
        caller: Identity,
        action: ActionSelector,
    },

    /// Read the recorded location string
    LookupLocation { resource: ResourceId },

    /// Hand the oracle service to a new administrator (current admin only)
    TransferServiceAuthority { new_admin: Identity },
}

/// Request envelope for the dispatch surface.
///
/// `attached_value` models out-of-band value transfer riding on a call; the
/// ACL protocol has no use for it and any nonzero amount is rejected before
/// the call is examined.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleRequest {
    /// Authenticated caller identity (authentication happens upstream)
    pub caller: Identity,

    /// Value attached to the call; must be zero
    #[serde(default)]
    pub attached_value: u64,

    /// The operation to perform
    pub call: OracleCall,
}

impl OracleRequest {
    /// Build a plain request with no attached value
    pub fn new(caller: Identity, call: OracleCall) -> Self {
        Self {
            caller,
            attached_value: 0,
            call,
        }
    }
}

/// Reply from the dispatch surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OracleReply {
    /// Resource id returned by `register`
    Resource { id: ResourceId },

    /// Decision returned by `is_authorized`
    Authorized { allowed: bool },

    /// Location returned by `lookup_location` (empty when unregistered)
    Location { uri: String },

    /// Successful mutation with nothing to return
    Done,
}
