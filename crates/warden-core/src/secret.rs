// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Zeroizing credential wrapper.
//!
//! Credentials live in memory only as long as the token that carries
//! them. [`SecretString`] wipes its buffer on drop and redacts itself
//! from both `Debug` and `Display`, so tokens can appear in logs without
//! leaking proof material. Equality is not implemented; verification
//! belongs to an authenticator.

use std::fmt;

use zeroize::Zeroizing;

/// A secret value that never shows up in logs and is wiped on drop.
#[derive(Clone)]
pub struct SecretString(Zeroizing<String>);

impl SecretString {
	/// Wraps raw secret material.
	pub fn new(secret: impl Into<String>) -> Self {
		Self(Zeroizing::new(secret.into()))
	}

	/// Grants access to the secret for verification.
	///
	/// Callers must not copy the value into longer-lived storage.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Length in bytes, usable for validation without exposure.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// True when the secret is empty.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl From<String> for SecretString {
	fn from(secret: String) -> Self {
		Self::new(secret)
	}
}

impl From<&str> for SecretString {
	fn from(secret: &str) -> Self {
		Self::new(secret)
	}
}

impl fmt::Debug for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("SecretString(<redacted>)")
	}
}

impl fmt::Display for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("<redacted>")
	}
}
