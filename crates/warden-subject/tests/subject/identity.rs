// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Identity binding and typed principal access.

use warden_core::{Principal, PrincipalCollection, UsernamePasswordToken};
use warden_subject::Subject;

use super::support::{alice_subject, anonymous_subject, stack};

/// **Test: Login binds the realm's full principal set**
///
/// After a successful login the subject carries the username as primary
/// principal and the account's numeric id alongside it, both tagged with
/// the realm name.
#[test]
fn login_binds_the_realms_full_principal_set() {
	let (realm, sessions) = stack();
	let subject = alice_subject(&realm, &sessions);

	let primary = subject.principal().unwrap();
	assert_eq!(primary.get::<String>(), Some(&"alice".to_string()));

	assert_eq!(*subject.principal_of::<i64>().unwrap(), 42);
	assert_eq!(subject.principals().realm_names(), vec!["accounts"]);
	assert_eq!(subject.principals().len(), 2);
}

/// **Test: Typed access spans identity sources**
///
/// A subject seeded from two sources answers typed queries across all of
/// them in contribution order, and misses are absent rather than errors.
#[test]
fn typed_access_spans_identity_sources() {
	let (realm, sessions) = stack();

	let mut principals = PrincipalCollection::of("accounts", Principal::new("alice".to_string()));
	principals.add("directory", Principal::new(7_i64));
	principals.add("directory", Principal::new("cn=alice,ou=staff".to_string()));

	let subject = Subject::builder(realm.clone(), realm.clone(), sessions.clone())
		.with_principals(principals)
		.build();

	let names: Vec<String> = subject
		.principals_of::<String>()
		.iter()
		.map(|name| name.as_ref().clone())
		.collect();
	assert_eq!(
		names,
		vec!["alice".to_string(), "cn=alice,ou=staff".to_string()]
	);
	assert_eq!(*subject.principal_of::<i64>().unwrap(), 7);
	assert!(subject.principal_of::<bool>().is_none());
	assert_eq!(
		subject.principals().realm_names(),
		vec!["accounts", "directory"]
	);
}

/// **Test: Remembered identity authorizes without authentication**
///
/// A remembered subject keeps answering authorization queries, while
/// `is_authenticated` stays false until a real login on this instance.
#[test]
fn remembered_identity_authorizes_without_authentication() {
	let (realm, sessions) = stack();
	let subject = Subject::builder(realm.clone(), realm.clone(), sessions.clone())
		.with_principals(PrincipalCollection::of(
			"accounts",
			Principal::new("alice".to_string()),
		))
		.build();

	assert!(subject.is_remembered());
	assert!(!subject.is_authenticated());
	assert!(subject.is_permitted("doc:read").unwrap());
	assert!(subject.has_role("editor").unwrap());

	subject
		.login(&UsernamePasswordToken::new("alice", "hunter2"))
		.unwrap();
	assert!(subject.is_authenticated());
	assert!(!subject.is_remembered());
}

/// **Test: Anonymous subject holds nothing**
///
/// Without identity every permission and role query answers false, and
/// the demand forms fail with denial errors.
#[test]
fn anonymous_subject_holds_nothing() {
	let (realm, sessions) = stack();
	let subject = anonymous_subject(&realm, &sessions);

	assert!(!subject.has_identity());
	assert!(subject.principal().is_none());
	assert!(!subject.is_permitted("doc:read").unwrap());
	assert!(!subject.has_role("viewer").unwrap());
	assert!(subject.check_permission("doc:read").is_err());
	assert!(subject.check_role("viewer").is_err());
}
