//! Administrative control of the oracle service
//!
//! A single privileged identity that can hand off or retire the oracle
//! itself. It has no read or write power over any resource or grant; the
//! decision engine never consults it.

use crate::audit::{AuditEmitter, AuditKind};
use crate::error::{AclError, Result};
use resguard_core::Identity;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::info;

/// The oracle's administrative identity
pub struct ServiceAuthority {
    administrator: RwLock<Identity>,
    commit: Arc<Mutex<()>>,
    audit: Arc<AuditEmitter>,
}

impl ServiceAuthority {
    /// Create the authority with its bootstrap administrator.
    /// Fails if the administrator is the null identity.
    pub fn new(
        administrator: Identity,
        commit: Arc<Mutex<()>>,
        audit: Arc<AuditEmitter>,
    ) -> Result<Self> {
        if administrator.is_zero() {
            return Err(AclError::invalid("administrator must not be null"));
        }
        Ok(Self {
            administrator: RwLock::new(administrator),
            commit,
            audit,
        })
    }

    /// Hand the oracle service to a new administrator
    pub async fn transfer(&self, caller: Identity, new_admin: Identity) -> Result<()> {
        let _commit = self.commit.lock().await;

        let current = *self.administrator.read().await;
        if caller != current {
            return Err(AclError::forbidden(
                "caller is not the service administrator",
            ));
        }
        if new_admin.is_zero() {
            return Err(AclError::invalid("new administrator must not be null"));
        }

        *self.administrator.write().await = new_admin;
        self.audit
            .emit(
                caller,
                AuditKind::AuthorityTransferred {
                    previous_admin: current,
                    new_admin,
                },
            )
            .await;

        info!(from = %current, to = %new_admin, "service authority transferred");
        Ok(())
    }

    /// The current administrative identity. Pure read.
    pub async fn current(&self) -> Identity {
        *self.administrator.read().await
    }
}
