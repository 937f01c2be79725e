// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Argon2 password hashing for the in-memory realm.
//!
//! Production builds use the Argon2id defaults (memory 19456 KiB,
//! iterations 2, parallelism 1). Test builds of this crate use reduced
//! parameters so account fixtures stay fast; the parameters travel inside
//! the PHC string, so hashes verify regardless of which instance minted
//! them.

use argon2::{
	password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
	Argon2,
};

#[cfg(test)]
use argon2::{Algorithm, Params, Version};

#[inline]
fn argon2_instance() -> Argon2<'static> {
	#[cfg(test)]
	{
		// Fast, insecure parameters for tests ONLY.
		let params = Params::new(
			1024, // memory_kib: 1 MiB
			1,    // iterations
			1,    // parallelism
			None, // output length = default
		)
		.expect("valid Argon2 params for tests");
		Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
	}

	#[cfg(not(test))]
	{
		Argon2::default()
	}
}

/// Hashes a password into PHC string form with a fresh random salt.
pub(crate) fn hash(password: &str) -> Result<String, argon2::password_hash::Error> {
	let salt = SaltString::generate(&mut OsRng);
	argon2_instance()
		.hash_password(password.as_bytes(), &salt)
		.map(|hash| hash.to_string())
}

/// Verifies a password against a stored PHC string.
///
/// `Ok(false)` on mismatch; `Err` only when the stored hash itself is
/// malformed.
pub(crate) fn verify(password: &str, phc: &str) -> Result<bool, argon2::password_hash::Error> {
	let parsed = PasswordHash::new(phc)?;
	Ok(argon2_instance()
		.verify_password(password.as_bytes(), &parsed)
		.is_ok())
}
