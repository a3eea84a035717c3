//! Oracle bootstrap and protocol dispatch
//!
//! `AclOracle` is the service object an integrating transport embeds: it
//! wires the store, ledger, permission table, decision engine, authority,
//! and audit stream together at bootstrap, and exposes one `dispatch` entry
//! point covering the full operation table.

use crate::audit::AuditEmitter;
use crate::authority::ServiceAuthority;
use crate::engine::AuthorizationEngine;
use crate::error::{AclError, Result};
use crate::ledger::ResourceLedger;
use crate::permissions::PermissionTable;
use crate::store::{AclStore, MemoryStore};
use crate::types::{OracleCall, OracleConfig, OracleReply, OracleRequest};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// The assembled ACL oracle service
pub struct AclOracle {
    ledger: Arc<ResourceLedger>,
    permissions: Arc<PermissionTable>,
    engine: AuthorizationEngine,
    authority: ServiceAuthority,
    audit: Arc<AuditEmitter>,
}

impl AclOracle {
    /// Assemble the oracle over a storage backend.
    ///
    /// One commit lock is created here and shared by every component, which
    /// is what makes the service a single globally-ordered ledger.
    pub fn new(config: OracleConfig, store: Arc<dyn AclStore>) -> Result<Self> {
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
            commit.clone(),
            audit.clone(),
        ));
        let engine = AuthorizationEngine::new(ledger.clone(), permissions.clone());
        let authority = ServiceAuthority::new(config.administrator, commit, audit.clone())?;

        info!(administrator = %config.administrator, "ACL oracle initialized");

        Ok(Self {
            ledger,
            permissions,
            engine,
            authority,
            audit,
        })
    }

    /// Assemble the oracle over a fresh in-memory store
    pub fn in_memory(config: OracleConfig) -> Result<Self> {
        Self::new(config, Arc::new(MemoryStore::new()))
    }

    /// The resource ledger
    pub fn ledger(&self) -> &ResourceLedger {
        &self.ledger
    }

    /// The permission table
    pub fn permissions(&self) -> &PermissionTable {
        &self.permissions
    }

    /// The decision engine
    pub fn engine(&self) -> &AuthorizationEngine {
        &self.engine
    }

    /// The administrative authority
    pub fn authority(&self) -> &ServiceAuthority {
        &self.authority
    }

    /// The audit stream
    pub fn audit(&self) -> &AuditEmitter {
        &self.audit
    }

    /// Execute one protocol call on behalf of an authenticated caller.
    ///
    /// The envelope is vetted before the call is examined: the ACL protocol
    /// carries no value, so any nonzero attached amount is rejected outright
    /// for every call kind, mutating or not.
    pub async fn dispatch(&self, request: OracleRequest) -> Result<OracleReply> {
        if request.attached_value != 0 {
            warn!(
                caller = %request.caller,
                value = request.attached_value,
                "rejected call with attached value"
            );
            return Err(AclError::invalid(
                "the ACL protocol does not accept attached value",
            ));
        }

        let caller = request.caller;
        match request.call {
            OracleCall::Register {
                location_uri,
                proposed_owner,
            } => {
                let id = self
                    .ledger
                    .register(caller, &location_uri, proposed_owner)
                    .await?;
                Ok(OracleReply::Resource { id })
            }

            OracleCall::TransferOwnership {
                resource,
                new_owner,
            } => {
                self.ledger
                    .transfer_ownership(caller, resource, new_owner)
                    .await?;
                Ok(OracleReply::Done)
            }

            OracleCall::UpdateLocationRecord { resource, new_uri } => {
                self.ledger.update_location(caller, resource, &new_uri).await?;
                Ok(OracleReply::Done)
            }

            OracleCall::DeleteRecord { resource } => {
                self.ledger.delete_record(caller, resource).await?;
                Ok(OracleReply::Done)
            }

            OracleCall::Grant { resource, user } => {
                self.permissions.grant(caller, resource, user).await?;
                Ok(OracleReply::Done)
            }

            OracleCall::Revoke { resource, user } => {
                self.permissions.revoke(caller, resource, user).await?;
                Ok(OracleReply::Done)
            }

            OracleCall::IsAuthorized {
                resource,
                caller: subject,
                action,
            } => {
                let allowed = self.engine.is_authorized(&resource, &subject, &action).await?;
                Ok(OracleReply::Authorized { allowed })
            }

            OracleCall::LookupLocation { resource } => {
                let uri = self
                    .ledger
                    .lookup(&resource)
                    .await?
                    .map(|record| record.location_uri)
                    .unwrap_or_default();
                Ok(OracleReply::Location { uri })
            }

            OracleCall::TransferServiceAuthority { new_admin } => {
                self.authority.transfer(caller, new_admin).await?;
                Ok(OracleReply::Done)
            }
        }
    }
}
