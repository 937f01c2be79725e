// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error taxonomy for the Warden security facade.
//!
//! Four separate domains so callers can tell apart "who are you" failures
//! ([`AuthenticationError`]), "the check itself broke" failures
//! ([`EvaluationError`]), "you are not allowed" outcomes
//! ([`AuthorizationError`]), and session-store failures ([`SessionError`]).
//!
//! Denial is not an error for the boolean query family: `is_permitted`
//! reports it as `Ok(false)` and reserves `Err` for evaluation failures.
//! Only the enforcing `check_*` family turns denial into
//! [`AuthorizationError`].

use thiserror::Error;

/// Errors raised while proving an identity during login.
///
/// Variants are cause-specific so callers can react differently to a
/// mistyped password versus a locked account.
#[derive(Debug, Error)]
pub enum AuthenticationError {
	/// No account exists for the submitted principal
	#[error("unknown account: {0}")]
	UnknownAccount(String),

	/// The account exists but the submitted credentials do not match
	#[error("incorrect credentials for account: {0}")]
	IncorrectCredentials(String),

	/// The account is administratively locked
	#[error("account is locked: {0}")]
	LockedAccount(String),

	/// The account's credentials have expired and must be reset
	#[error("credentials expired for account: {0}")]
	ExpiredCredentials(String),

	/// Too many consecutive failed attempts
	#[error("too many failed login attempts for account: {0}")]
	ExcessiveAttempts(String),

	/// The token is malformed or of an unsupported kind
	#[error("authentication token rejected: {0}")]
	InvalidToken(String),

	/// The authenticator's backing store failed
	#[error("authentication backend failure: {0}")]
	Backend(String),
}

/// Errors of authorization evaluation, as opposed to denial.
///
/// Returned by the boolean query family and wrapped into
/// [`AuthorizationError::Evaluation`] by the enforcing family. A denied
/// permission is never an `EvaluationError`.
#[derive(Debug, Error)]
pub enum EvaluationError {
	/// A permission expression could not be parsed by the authorizer
	#[error("unresolvable permission expression {expr:?}: {reason}")]
	UnresolvablePermission {
		/// The expression as submitted
		expr: String,
		/// Resolver-supplied explanation
		reason: String,
	},

	/// The authorizer was handed a permission type it does not understand
	#[error("permission type not supported by this authorizer; expected {0}")]
	UnsupportedPermission(&'static str),

	/// The authorizer's backing store failed
	#[error("authorization backend failure: {0}")]
	Backend(String),
}

/// Errors raised by the enforcing `check_*` family.
#[derive(Debug, Error)]
pub enum AuthorizationError {
	/// The subject does not hold the required permission
	#[error("permission denied: {permission}")]
	PermissionDenied {
		/// Description of the permission that was required
		permission: String,
	},

	/// The subject does not hold the required role
	#[error("role not held: {role}")]
	RoleNotHeld {
		/// The role that was required
		role: String,
	},

	/// The check could not be evaluated at all
	#[error(transparent)]
	Evaluation(#[from] EvaluationError),
}

/// Errors raised by the session manager.
#[derive(Debug, Error)]
pub enum SessionError {
	/// The session store failed
	#[error("session backend failure: {0}")]
	Backend(String),
}
