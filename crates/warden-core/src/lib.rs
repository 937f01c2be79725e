// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core contracts for the Warden security facade.
//!
//! This crate defines the vocabulary shared by the `Subject` facade
//! (`warden-subject`) and its collaborators: identity values and their
//! realm-tagged aggregation, authentication tokens, the permission and
//! authorizer seams, session handles, and the error taxonomy. It performs
//! no I/O and implements no policy; concrete collaborators live in crates
//! like `warden-realm`.
//!
//! # Overview
//!
//! - [`Principal`] / [`PrincipalCollection`] - opaque identity values with
//!   typed lookup, aggregated across identity sources in insertion order.
//! - [`AuthenticationToken`] / [`Authenticator`] - identity-plus-proof
//!   submissions and the verification seam consumed by `login`.
//! - [`Permission`] / [`PermissionArg`] / [`Authorizer`] - opaque
//!   capability descriptors and the evaluation seam; string expressions
//!   and resolved objects answer identically.
//! - [`Session`] / [`SessionManager`] - thin session handles and the
//!   storage seam behind lazy session creation.
//!
//! # Example
//!
//! ```
//! use warden_core::{Principal, PrincipalCollection, UsernamePasswordToken};
//!
//! let token = UsernamePasswordToken::new("alice", "hunter2").with_host("10.0.0.1");
//! assert_eq!(token.username(), "alice");
//!
//! // Identity aggregated from two sources; insertion order is canonical.
//! let mut principals = PrincipalCollection::new();
//! principals.add("accounts", Principal::new("alice".to_string()));
//! principals.add("directory", Principal::new(42_i64));
//!
//! assert_eq!(principals.first_of::<String>(), Some(&"alice".to_string()));
//! assert_eq!(principals.all_of::<i64>(), vec![&42_i64]);
//! assert!(principals.first_of::<bool>().is_none());
//! ```

pub mod authc;
pub mod authz;
pub mod error;
pub mod principal;
pub mod secret;
pub mod session;

pub use authc::{AuthenticationToken, Authenticator, UsernamePasswordToken};
pub use authz::{Authorizer, Permission, PermissionArg};
pub use error::{AuthenticationError, AuthorizationError, EvaluationError, SessionError};
pub use principal::{Principal, PrincipalCollection};
pub use secret::SecretString;
pub use session::{Session, SessionContext, SessionId, SessionManager};
