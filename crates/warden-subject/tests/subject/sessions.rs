// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Session negotiation against the in-memory store.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use warden_core::SessionManager;
use warden_realm::MemorySessionManager;
use warden_subject::Subject;

use super::support::{alice_subject, anonymous_subject, stack, standard_realm};

/// **Test: Session spans the authenticated interaction**
///
/// Login, create a session on first use, keep it across authorization
/// calls, and retire it at logout.
#[test]
fn session_spans_the_authenticated_interaction() {
	let (realm, sessions) = stack();
	let subject = alice_subject(&realm, &sessions);
	assert_eq!(sessions.active_sessions(), 0);

	let session = subject.session().unwrap();
	assert_eq!(sessions.active_sessions(), 1);

	assert!(subject.is_permitted("doc:read").unwrap());
	assert_eq!(subject.get_session(false).unwrap().unwrap().id, session.id);
	assert_eq!(subject.session().unwrap().id, session.id);
	assert_eq!(sessions.active_sessions(), 1);

	subject.logout().unwrap();
	assert!(subject.get_session(false).unwrap().is_none());
	assert_eq!(sessions.active_sessions(), 0);
	assert!(sessions.get(&session.id).unwrap().is_none());
}

/// **Test: Anonymous subjects can hold sessions**
///
/// Sessions do not require identity; an anonymous subject carries state
/// the same way.
#[test]
fn anonymous_subjects_can_hold_sessions() {
	let (realm, sessions) = stack();
	let subject = anonymous_subject(&realm, &sessions);

	let session = subject.session().unwrap();
	assert!(!subject.has_identity());
	assert_eq!(sessions.active_sessions(), 1);
	assert_eq!(subject.get_session(false).unwrap().unwrap().id, session.id);
}

/// **Test: Inherited session is resumed across subjects**
///
/// A second subject built with the first one's session id resumes the
/// same session instead of creating another.
#[test]
fn inherited_session_is_resumed_across_subjects() {
	let (realm, sessions) = stack();
	let first = alice_subject(&realm, &sessions);
	let session = first.session().unwrap();

	let resumed = Subject::builder(realm.clone(), realm.clone(), sessions.clone())
		.with_session_id(session.id)
		.build();

	let inherited = resumed.get_session(false).unwrap().unwrap();
	assert_eq!(inherited.id, session.id);
	assert_eq!(sessions.active_sessions(), 1);
}

/// **Test: Expired inherited session is discarded**
///
/// When the store has expired the inherited id, the subject reports no
/// session, and a later create starts a fresh one.
#[test]
fn expired_inherited_session_is_discarded() {
	let realm = standard_realm();
	let sessions = Arc::new(MemorySessionManager::with_ttl(Duration::from_millis(20)));

	let first = anonymous_subject(&realm, &sessions);
	let session = first.session().unwrap();

	thread::sleep(Duration::from_millis(40));

	let resumed = Subject::builder(realm.clone(), realm.clone(), sessions.clone())
		.with_session_id(session.id)
		.build();

	assert!(resumed.get_session(false).unwrap().is_none());

	let fresh = resumed.session().unwrap();
	assert_ne!(fresh.id, session.id);
}

/// **Test: Host propagates into the session record**
///
/// The subject's origin host is recorded on sessions it creates.
#[test]
fn host_propagates_into_the_session_record() {
	let (realm, sessions) = stack();
	let subject = Subject::builder(realm.clone(), realm.clone(), sessions.clone())
		.with_host("192.0.2.9")
		.build();

	let session = subject.session().unwrap();
	assert_eq!(session.host.as_deref(), Some("192.0.2.9"));
	assert_eq!(subject.host(), Some("192.0.2.9"));
}

/// **Test: Concurrent first access creates a single session**
///
/// Threads racing on the first session access all observe the same
/// session id, and the store records exactly one creation.
#[test]
fn concurrent_first_access_creates_a_single_session() {
	let (realm, sessions) = stack();
	let subject = Arc::new(alice_subject(&realm, &sessions));

	let handles: Vec<_> = (0..8)
		.map(|_| {
			let subject = Arc::clone(&subject);
			thread::spawn(move || subject.session().unwrap().id)
		})
		.collect();

	let ids: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

	assert!(ids.windows(2).all(|pair| pair[0] == pair[1]));
	assert_eq!(sessions.active_sessions(), 1);
}
