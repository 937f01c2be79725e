// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Per-user security facade.
//!
//! A [`Subject`] is the application's view of the user behind the current
//! interaction: who they are, what they may do, whether they have proven
//! themselves, and which session carries their state. The facade owns
//! identity state and transition ordering; credential verification,
//! permission matching, and session storage are delegated to the
//! [`Authenticator`], [`Authorizer`], and [`SessionManager`] collaborators
//! wired in at construction.
//!
//! [`Authenticator`]: warden_core::Authenticator
//! [`Authorizer`]: warden_core::Authorizer
//! [`SessionManager`]: warden_core::SessionManager
//!
//! # Overview
//!
//! - [`Subject`] - identity, authorization queries, login/logout, session
//! - [`SubjectBuilder`] - assembly, including remembered identities and
//!   inherited session ids
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use warden_core::UsernamePasswordToken;
//! use warden_realm::{Account, MemoryRealm, MemorySessionManager};
//! use warden_subject::Subject;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let realm = Arc::new(
//! 	MemoryRealm::builder("accounts")
//! 		.with_account(Account::new("alice", "hunter2").with_permission("doc:*"))
//! 		.build()?,
//! );
//! let sessions = Arc::new(MemorySessionManager::new());
//!
//! let subject = Subject::builder(realm.clone(), realm.clone(), sessions).build();
//! subject.login(&UsernamePasswordToken::new("alice", "hunter2"))?;
//!
//! assert!(subject.is_authenticated());
//! assert!(subject.is_permitted("doc:read")?);
//!
//! subject.logout()?;
//! assert!(!subject.has_identity());
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod subject;

// Facade
pub use builder::SubjectBuilder;
pub use subject::Subject;
