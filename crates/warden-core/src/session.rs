// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Session handles and the session-manager seam.
//!
//! A [`Session`] here is a handle, not the session state itself: id,
//! start instant, origin host. Everything attached to a session lives
//! behind the [`SessionManager`], which is also the only party allowed to
//! create or invalidate one. The subject negotiates sessions lazily and
//! never caches state beyond the handle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SessionError;

/// Unique identifier for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
	/// Generates a new time-ordered (UUIDv7) id.
	#[must_use]
	pub fn new() -> Self {
		Self(Uuid::now_v7())
	}

	#[must_use]
	pub fn as_uuid(&self) -> &Uuid {
		&self.0
	}
}

impl Default for SessionId {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Display for SessionId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl std::str::FromStr for SessionId {
	type Err = uuid::Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(Self(Uuid::parse_str(s)?))
	}
}

/// A session handle as seen by the subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
	/// Unique id, assigned by the manager at creation
	pub id: SessionId,
	/// Creation instant
	pub started_at: DateTime<Utc>,
	/// Origin host recorded at creation, when known
	pub host: Option<String>,
}

/// Context handed to the manager when a session is created.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
	/// Origin host of the interaction, when known
	pub host: Option<String>,
}

impl SessionContext {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Records the origin host.
	#[must_use]
	pub fn with_host(mut self, host: impl Into<String>) -> Self {
		self.host = Some(host.into());
		self
	}
}

/// Creates, resolves, and invalidates sessions.
///
/// Absence is not an error: `get` reports an unknown or expired id as
/// `Ok(None)`. `Err` is reserved for store failures.
pub trait SessionManager: Send + Sync {
	/// Creates a new session.
	fn start(&self, context: &SessionContext) -> Result<Session, SessionError>;

	/// Resolves an id to its live session, if any.
	fn get(&self, id: &SessionId) -> Result<Option<Session>, SessionError>;

	/// Removes a session. Unknown ids are a no-op.
	fn invalidate(&self, id: &SessionId) -> Result<(), SessionError>;
}
