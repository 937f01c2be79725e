// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! TTL-based in-memory session manager.
//!
//! Sessions expire a fixed interval after creation and are pruned lazily
//! on lookup. Invalidation is idempotent: removing an unknown or expired
//! id is a no-op.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use chrono::Utc;
use parking_lot::RwLock;
use tracing::debug;
use warden_core::{Session, SessionContext, SessionError, SessionId, SessionManager};

const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

struct SessionRecord {
	session: Session,
	expires_at: Instant,
}

/// In-memory [`SessionManager`] with a fixed time-to-live.
pub struct MemorySessionManager {
	ttl: Duration,
	sessions: RwLock<HashMap<SessionId, SessionRecord>>,
}

impl MemorySessionManager {
	/// A manager with the default one-hour TTL.
	pub fn new() -> Self {
		Self::with_ttl(DEFAULT_TTL)
	}

	/// A manager expiring sessions `ttl` after creation.
	pub fn with_ttl(ttl: Duration) -> Self {
		Self {
			ttl,
			sessions: RwLock::new(HashMap::new()),
		}
	}

	/// Number of live (unexpired) sessions currently stored.
	pub fn active_sessions(&self) -> usize {
		let now = Instant::now();
		self.sessions
			.read()
			.values()
			.filter(|record| record.expires_at > now)
			.count()
	}
}

impl Default for MemorySessionManager {
	fn default() -> Self {
		Self::new()
	}
}

impl SessionManager for MemorySessionManager {
	fn start(&self, context: &SessionContext) -> Result<Session, SessionError> {
		let session = Session {
			id: SessionId::new(),
			started_at: Utc::now(),
			host: context.host.clone(),
		};
		let record = SessionRecord {
			session: session.clone(),
			expires_at: Instant::now() + self.ttl,
		};
		self.sessions.write().insert(session.id, record);
		debug!(session_id = %session.id, host = ?session.host, "session started");
		Ok(session)
	}

	fn get(&self, id: &SessionId) -> Result<Option<Session>, SessionError> {
		let now = Instant::now();
		{
			let sessions = self.sessions.read();
			match sessions.get(id) {
				None => return Ok(None),
				Some(record) if record.expires_at > now => {
					return Ok(Some(record.session.clone()))
				}
				Some(_) => {}
			}
		}
		// Expired: prune under the write lock. Expiry never moves later,
		// so the record cannot have come back to life in between.
		self.sessions.write().remove(id);
		debug!(session_id = %id, "session expired");
		Ok(None)
	}

	fn invalidate(&self, id: &SessionId) -> Result<(), SessionError> {
		let removed = self.sessions.write().remove(id).is_some();
		debug!(session_id = %id, removed, "session invalidated");
		Ok(())
	}
}
