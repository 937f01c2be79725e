// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Assembly of [`Subject`] instances.

use std::sync::Arc;

use warden_core::{Authenticator, Authorizer, PrincipalCollection, SessionId, SessionManager};

use crate::subject::Subject;

/// Assembles a [`Subject`] around its three collaborator seams.
///
/// A plain build yields an anonymous, unauthenticated subject. Seeding
/// principals produces a *remembered* identity: usable for authorization
/// queries, but [`Subject::is_authenticated`] stays `false` until a real
/// login on the built instance. Seeding a session id re-attaches a session
/// from a previous interaction; the id is resolved lazily on first session
/// access and silently discarded if the store no longer knows it.
pub struct SubjectBuilder {
	authenticator: Arc<dyn Authenticator>,
	authorizer: Arc<dyn Authorizer>,
	session_manager: Arc<dyn SessionManager>,
	principals: PrincipalCollection,
	session_id: Option<SessionId>,
	host: Option<String>,
}

impl SubjectBuilder {
	/// Starts a builder over the given collaborators.
	pub fn new(
		authenticator: Arc<dyn Authenticator>,
		authorizer: Arc<dyn Authorizer>,
		session_manager: Arc<dyn SessionManager>,
	) -> Self {
		Self {
			authenticator,
			authorizer,
			session_manager,
			principals: PrincipalCollection::new(),
			session_id: None,
			host: None,
		}
	}

	/// Seeds a remembered identity.
	#[must_use]
	pub fn with_principals(mut self, principals: PrincipalCollection) -> Self {
		self.principals = principals;
		self
	}

	/// Re-attaches the session with the given id, if it still exists.
	#[must_use]
	pub fn with_session_id(mut self, id: SessionId) -> Self {
		self.session_id = Some(id);
		self
	}

	/// Records the host the interaction originates from. Propagated into
	/// sessions created for this subject.
	#[must_use]
	pub fn with_host(mut self, host: impl Into<String>) -> Self {
		self.host = Some(host.into());
		self
	}

	/// Builds the subject.
	#[must_use]
	pub fn build(self) -> Subject {
		Subject::assemble(
			self.authenticator,
			self.authorizer,
			self.session_manager,
			self.principals,
			self.session_id,
			self.host,
		)
	}
}
