// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authentication tokens and the authenticator seam.
//!
//! A token is a submission of identity plus proof, consumed by the
//! subject's `login`. The facade never inspects tokens; they pass through
//! to the [`Authenticator`] unchanged, and the authenticator answers with
//! the full set of principals it associates with the account.

use crate::error::AuthenticationError;
use crate::principal::{Principal, PrincipalCollection};
use crate::secret::SecretString;

/// A submission of identity plus proof.
pub trait AuthenticationToken: Send + Sync {
	/// The claimed identity, e.g. a username.
	fn principal(&self) -> Principal;

	/// The proof material for the claim.
	fn credentials(&self) -> &SecretString;

	/// Whether the identity should be remembered beyond the
	/// authenticated interaction.
	fn remember_me(&self) -> bool {
		false
	}

	/// Origin host of the submission, when known.
	fn host(&self) -> Option<&str> {
		None
	}
}

/// The classic username/password token.
#[derive(Clone, Debug)]
pub struct UsernamePasswordToken {
	username: String,
	password: SecretString,
	remember_me: bool,
	host: Option<String>,
}

impl UsernamePasswordToken {
	/// Builds a token claiming `username`, proved by `password`.
	pub fn new(username: impl Into<String>, password: impl Into<SecretString>) -> Self {
		Self {
			username: username.into(),
			password: password.into(),
			remember_me: false,
			host: None,
		}
	}

	/// Marks the identity to be remembered across interactions.
	pub fn with_remember_me(mut self, remember_me: bool) -> Self {
		self.remember_me = remember_me;
		self
	}

	/// Records the host the submission originated from.
	pub fn with_host(mut self, host: impl Into<String>) -> Self {
		self.host = Some(host.into());
		self
	}

	/// The submitted username.
	pub fn username(&self) -> &str {
		&self.username
	}
}

impl AuthenticationToken for UsernamePasswordToken {
	fn principal(&self) -> Principal {
		Principal::new(self.username.clone())
	}

	fn credentials(&self) -> &SecretString {
		&self.password
	}

	fn remember_me(&self) -> bool {
		self.remember_me
	}

	fn host(&self) -> Option<&str> {
		self.host.as_deref()
	}
}

/// Verifies authentication tokens and derives the resulting identity.
///
/// Implementations typically consult an account store. The returned
/// collection carries every principal the source associates with the
/// account, tagged with the source's realm name; its first entry becomes
/// the subject's primary principal.
pub trait Authenticator: Send + Sync {
	/// Verifies `token`, returning the authenticated principals.
	///
	/// Failures are cause-specific so callers can distinguish bad
	/// credentials from locked or expired accounts.
	fn authenticate(
		&self,
		token: &dyn AuthenticationToken,
	) -> Result<PrincipalCollection, AuthenticationError>;
}
