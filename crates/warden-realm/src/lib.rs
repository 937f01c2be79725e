// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! In-memory collaborators for the Warden security facade.
//!
//! This crate supplies working implementations of the `warden-core`
//! seams, suitable for tests, examples, and small single-process
//! deployments:
//!
//! - [`MemoryRealm`] - an account registry acting as both
//!   `Authenticator` (Argon2 password verification, locked/expired
//!   account states, failed-attempt throttling) and `Authorizer`
//!   (role checks plus permission checks over scope grants).
//! - [`ScopePermission`] - a colon-delimited permission with `*`
//!   wildcard segments, e.g. `doc:read` or `doc:*`.
//! - [`MemorySessionManager`] - a TTL-based session store.
//!
//! # Example
//!
//! ```
//! use warden_realm::{Account, MemoryRealm};
//!
//! let realm = MemoryRealm::builder("accounts")
//! 	.with_account(Account::new("alice", "hunter2").with_role("editor"))
//! 	.with_role_permissions("editor", ["doc:read", "doc:write"])
//! 	.build()
//! 	.unwrap();
//! assert_eq!(realm.name(), "accounts");
//! ```

pub mod error;
pub mod permission;
pub mod realm;
pub mod session_store;

mod password;

pub use error::{PermissionParseError, RealmError};
pub use permission::ScopePermission;
pub use realm::{Account, MemoryRealm, MemoryRealmBuilder};
pub use session_store::MemorySessionManager;
