//! # Resguard ACL
//!
//! Authorization oracle for remotely-stored resources: a tamper-evident
//! ledger of who owns a resource and who, besides the owner, may modify or
//! delete it. A storage backend holding the actual bytes asks one question
//! before honoring a mutation: "is this caller allowed to perform this
//! action on this resource?"
//!
//! ## Features
//!
//! - **Deterministic resource ids**: BLAKE3 digest of the canonical location
//!   string, so re-registrations of the same location always collide
//! - **Airtight ownership**: no registered resource without a non-null
//!   owner; every mutation is owner-gated and all-or-nothing
//! - **Standing grants**: persistent per-(resource, user) modification
//!   permissions, preserved across ownership transfers
//! - **Append-only audit stream** with a live broadcast feed
//! - **Pluggable storage** behind an async trait
//!
//! ## Example
//!
//! ```rust
//! use resguard_acl::{AclOracle, OracleConfig};
//! use resguard_core::{ActionSelector, Identity};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let alice = Identity::new([1u8; 32]);
//!     let bob = Identity::new([2u8; 32]);
//!
//!     let oracle = AclOracle::in_memory(OracleConfig { administrator: alice })?;
//!
//!     let id = oracle.ledger().register(alice, "loc://report.pdf", alice).await?;
//!     oracle.permissions().grant(alice, id, bob).await?;
//!
//!     let allowed = oracle
//!         .engine()
//!         .is_authorized(&id, &bob, &ActionSelector::edit())
//!         .await?;
//!     assert!(allowed);
//!
//!     Ok(())
//! }
//! ```

pub mod audit;
pub mod authority;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod oracle;
pub mod permissions;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use audit::{AuditEmitter, AuditEvent, AuditKind, AuditStats};
pub use authority::ServiceAuthority;
pub use engine::AuthorizationEngine;
pub use error::{AclError, Result};
pub use ledger::ResourceLedger;
pub use oracle::AclOracle;
pub use permissions::PermissionTable;
pub use store::{AclStore, MemoryStore};
pub use types::{OracleCall, OracleConfig, OracleReply, OracleRequest, ResourceRecord};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
