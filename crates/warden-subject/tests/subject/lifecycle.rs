// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Login and logout state transitions, end to end.

use std::sync::Arc;

use warden_core::{AuthenticationError, UsernamePasswordToken};
use warden_realm::{Account, MemoryRealm, MemorySessionManager};

use super::support::{alice_subject, anonymous_subject, stack};

/// **Test: Failed login leaves the subject unchanged**
///
/// Authentication failures of every cause leave an anonymous subject
/// anonymous: no principals, no session, no authenticated flag.
#[test]
fn failed_login_leaves_the_subject_unchanged() {
	let (realm, sessions) = stack();
	let subject = anonymous_subject(&realm, &sessions);

	let err = subject
		.login(&UsernamePasswordToken::new("alice", "wrong"))
		.unwrap_err();
	assert!(matches!(err, AuthenticationError::IncorrectCredentials(_)));

	let err = subject
		.login(&UsernamePasswordToken::new("mallory", "whatever"))
		.unwrap_err();
	assert!(matches!(err, AuthenticationError::UnknownAccount(_)));

	assert!(!subject.has_identity());
	assert!(!subject.is_authenticated());
	assert!(subject.get_session(false).unwrap().is_none());
}

/// **Test: Logout then relogin produces a fresh binding**
///
/// After logout the subject is anonymous and sessionless; a second login
/// rebinds identity and a new session is created on demand.
#[test]
fn logout_then_relogin_produces_a_fresh_binding() {
	let (realm, sessions) = stack();
	let subject = alice_subject(&realm, &sessions);

	let first_session = subject.session().unwrap();
	subject.logout().unwrap();

	assert!(!subject.has_identity());
	assert!(subject.get_session(false).unwrap().is_none());
	assert_eq!(sessions.active_sessions(), 0);

	subject
		.login(&UsernamePasswordToken::new("alice", "hunter2"))
		.unwrap();
	let second_session = subject.session().unwrap();

	assert!(subject.is_authenticated());
	assert_ne!(second_session.id, first_session.id);
}

/// **Test: Logout is idempotent**
///
/// A second logout of the same subject is a no-op, not an error.
#[test]
fn logout_is_idempotent() {
	let (realm, sessions) = stack();
	let subject = alice_subject(&realm, &sessions);
	let _ = subject.session().unwrap();

	subject.logout().unwrap();
	subject.logout().unwrap();

	assert_eq!(sessions.active_sessions(), 0);
	assert!(!subject.has_identity());
}

/// **Test: Lockout after repeated failures**
///
/// With an attempt budget configured, repeated bad passwords escalate
/// from incorrect-credentials to excessive-attempts at the facade.
#[test]
fn lockout_after_repeated_failures() {
	let realm = Arc::new(
		MemoryRealm::builder("accounts")
			.with_account(Account::new("alice", "hunter2"))
			.with_max_attempts(2)
			.build()
			.unwrap(),
	);
	let sessions = Arc::new(MemorySessionManager::new());
	let subject = anonymous_subject(&realm, &sessions);

	for _ in 0..2 {
		let err = subject
			.login(&UsernamePasswordToken::new("alice", "wrong"))
			.unwrap_err();
		assert!(matches!(err, AuthenticationError::IncorrectCredentials(_)));
	}

	let err = subject
		.login(&UsernamePasswordToken::new("alice", "hunter2"))
		.unwrap_err();
	assert!(matches!(err, AuthenticationError::ExcessiveAttempts(_)));
	assert!(!subject.has_identity());
}
