// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the in-memory realm.

use thiserror::Error;

/// Errors raised while parsing a scope permission expression.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PermissionParseError {
	/// The expression was empty or all whitespace
	#[error("empty permission expression")]
	Empty,

	/// A colon-delimited segment was empty
	#[error("empty segment in permission expression: {0}")]
	EmptySegment(String),
}

/// Errors raised while assembling a [`MemoryRealm`].
///
/// [`MemoryRealm`]: crate::realm::MemoryRealm
#[derive(Debug, Error)]
pub enum RealmError {
	/// A granted permission expression failed to parse
	#[error("invalid permission grant {expr:?}: {source}")]
	InvalidGrant {
		/// The grant expression as configured
		expr: String,
		/// The underlying parse failure
		#[source]
		source: PermissionParseError,
	},

	/// Password hashing failed while registering an account
	#[error("password hashing failed for account {0}")]
	Hashing(String),

	/// Two accounts were registered under the same username
	#[error("duplicate account: {0}")]
	DuplicateAccount(String),
}
