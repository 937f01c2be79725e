// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The [`Subject`] facade: identity, authorization queries, login/logout,
//! and lazy session binding for a single user interaction.

use std::any::Any;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, instrument, warn};
use warden_core::{
	AuthenticationError, AuthenticationToken, Authenticator, AuthorizationError, Authorizer,
	EvaluationError, PermissionArg, Principal, PrincipalCollection, Session, SessionContext,
	SessionError, SessionId, SessionManager,
};

use crate::builder::SubjectBuilder;

/// Who the subject is and whether they proved it here.
#[derive(Default)]
struct IdentityState {
	principals: PrincipalCollection,
	authenticated: bool,
}

/// Session attachment of a subject.
enum SessionBinding {
	/// No session, and none requested yet.
	Unbound,
	/// An id carried over from a previous interaction, not yet resolved
	/// against the store.
	Inherited(SessionId),
	/// A live session handle.
	Bound(Session),
}

/// The security-specific view of the user driving the current interaction.
///
/// One `Subject` represents one logical interaction, human or daemon,
/// anonymous or known. All methods take `&self`; a subject can be shared
/// freely across the threads serving its interaction.
///
/// Built via [`Subject::builder`]. Query methods return `Result` because
/// evaluation is delegated: `Ok(false)` means "denied", `Err` means "could
/// not be decided".
pub struct Subject {
	authenticator: Arc<dyn Authenticator>,
	authorizer: Arc<dyn Authorizer>,
	session_manager: Arc<dyn SessionManager>,
	host: Option<String>,
	identity: RwLock<IdentityState>,
	// Serializes login/logout end to end. Identity stays readable while a
	// transition is in flight; readers see either the old state or the new
	// one, never a mix.
	transition: Mutex<()>,
	session: Mutex<SessionBinding>,
}

impl Subject {
	/// Starts a [`SubjectBuilder`] over the given collaborators.
	pub fn builder(
		authenticator: Arc<dyn Authenticator>,
		authorizer: Arc<dyn Authorizer>,
		session_manager: Arc<dyn SessionManager>,
	) -> SubjectBuilder {
		SubjectBuilder::new(authenticator, authorizer, session_manager)
	}

	pub(crate) fn assemble(
		authenticator: Arc<dyn Authenticator>,
		authorizer: Arc<dyn Authorizer>,
		session_manager: Arc<dyn SessionManager>,
		principals: PrincipalCollection,
		session_id: Option<SessionId>,
		host: Option<String>,
	) -> Self {
		Self {
			authenticator,
			authorizer,
			session_manager,
			host,
			identity: RwLock::new(IdentityState {
				principals,
				authenticated: false,
			}),
			transition: Mutex::new(()),
			session: Mutex::new(match session_id {
				Some(id) => SessionBinding::Inherited(id),
				None => SessionBinding::Unbound,
			}),
		}
	}

	// ---- identity ----

	/// The primary principal, or `None` for an anonymous subject.
	///
	/// The primary principal is the first one contributed to the bound
	/// collection, which for realm-produced identities is the principal the
	/// owning realm considers canonical.
	pub fn principal(&self) -> Option<Principal> {
		self.identity.read().principals.primary().cloned()
	}

	/// The first bound principal whose payload is a `T`.
	pub fn principal_of<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
		let identity = self.identity.read();
		let found = identity
			.principals
			.iter()
			.find_map(|(_, principal)| principal.downcast::<T>());
		found
	}

	/// Every bound principal whose payload is a `T`, in insertion order.
	pub fn principals_of<T: Any + Send + Sync>(&self) -> Vec<Arc<T>> {
		let identity = self.identity.read();
		identity
			.principals
			.iter()
			.filter_map(|(_, principal)| principal.downcast::<T>())
			.collect()
	}

	/// A snapshot of the full realm-tagged principal collection.
	pub fn principals(&self) -> PrincipalCollection {
		self.identity.read().principals.clone()
	}

	/// Whether any identity is bound, authenticated or remembered.
	pub fn has_identity(&self) -> bool {
		!self.identity.read().principals.is_empty()
	}

	/// Whether this subject proved its identity by a successful
	/// [`login`](Subject::login) on this instance.
	pub fn is_authenticated(&self) -> bool {
		self.identity.read().authenticated
	}

	/// Whether this subject carries an identity it has not proven here:
	/// a remembered identity from a previous interaction.
	///
	/// Remembered and authenticated are mutually exclusive; both are
	/// `false` for an anonymous subject.
	pub fn is_remembered(&self) -> bool {
		let identity = self.identity.read();
		!identity.principals.is_empty() && !identity.authenticated
	}

	/// The host this subject's interaction originates from, if known.
	pub fn host(&self) -> Option<&str> {
		self.host.as_deref()
	}

	// ---- authorization ----

	/// Whether this subject holds `permission`.
	///
	/// Accepts a permission object or a string expression; both travel
	/// through the same [`Authorizer`] resolution, so equivalent forms
	/// always answer alike. `Ok(false)` is a denial; `Err` means the check
	/// could not be evaluated.
	pub fn is_permitted<'a>(
		&self,
		permission: impl Into<PermissionArg<'a>>,
	) -> Result<bool, EvaluationError> {
		let principals = self.snapshot_principals();
		self.evaluate(&principals, permission.into())
	}

	/// Evaluates every permission, answering positionally.
	///
	/// `result[i]` answers `permissions[i]`: order is preserved, duplicates
	/// are evaluated as many times as they appear, and a denial does not
	/// stop the remaining evaluations.
	pub fn is_each_permitted<'a, I>(&self, permissions: I) -> Result<Vec<bool>, EvaluationError>
	where
		I: IntoIterator,
		I::Item: Into<PermissionArg<'a>>,
	{
		let principals = self.snapshot_principals();
		permissions
			.into_iter()
			.map(|permission| self.evaluate(&principals, permission.into()))
			.collect()
	}

	/// Whether this subject holds every listed permission.
	///
	/// Vacuously true for an empty list. May stop at the first permission
	/// not held.
	pub fn is_permitted_all<'a, I>(&self, permissions: I) -> Result<bool, EvaluationError>
	where
		I: IntoIterator,
		I::Item: Into<PermissionArg<'a>>,
	{
		let principals = self.snapshot_principals();
		for permission in permissions {
			if !self.evaluate(&principals, permission.into())? {
				return Ok(false);
			}
		}
		Ok(true)
	}

	/// Demands `permission`, failing with
	/// [`AuthorizationError::PermissionDenied`] when it is not held.
	pub fn check_permission<'a>(
		&self,
		permission: impl Into<PermissionArg<'a>>,
	) -> Result<(), AuthorizationError> {
		let principals = self.snapshot_principals();
		self.demand(&principals, permission.into())
	}

	/// Demands every listed permission, failing at the first one not held.
	pub fn check_permissions<'a, I>(&self, permissions: I) -> Result<(), AuthorizationError>
	where
		I: IntoIterator,
		I::Item: Into<PermissionArg<'a>>,
	{
		let principals = self.snapshot_principals();
		for permission in permissions {
			self.demand(&principals, permission.into())?;
		}
		Ok(())
	}

	/// Whether this subject holds the named role.
	pub fn has_role(&self, role: &str) -> Result<bool, EvaluationError> {
		let principals = self.snapshot_principals();
		self.authorizer.has_role(&principals, role)
	}

	/// Evaluates every role, answering positionally.
	///
	/// Same contract as [`is_each_permitted`](Subject::is_each_permitted):
	/// `result[i]` answers `roles[i]`, duplicates included, no
	/// short-circuit.
	pub fn has_each_role<I, S>(&self, roles: I) -> Result<Vec<bool>, EvaluationError>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let principals = self.snapshot_principals();
		roles
			.into_iter()
			.map(|role| self.authorizer.has_role(&principals, role.as_ref()))
			.collect()
	}

	/// Whether this subject holds every listed role.
	///
	/// Vacuously true for an empty list. May stop at the first role not
	/// held.
	pub fn has_all_roles<I, S>(&self, roles: I) -> Result<bool, EvaluationError>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let principals = self.snapshot_principals();
		for role in roles {
			if !self.authorizer.has_role(&principals, role.as_ref())? {
				return Ok(false);
			}
		}
		Ok(true)
	}

	/// Demands the named role, failing with
	/// [`AuthorizationError::RoleNotHeld`] when it is not held.
	pub fn check_role(&self, role: &str) -> Result<(), AuthorizationError> {
		let principals = self.snapshot_principals();
		self.demand_role(&principals, role)
	}

	/// Demands every listed role, failing at the first one not held.
	pub fn check_roles<I, S>(&self, roles: I) -> Result<(), AuthorizationError>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let principals = self.snapshot_principals();
		for role in roles {
			self.demand_role(&principals, role.as_ref())?;
		}
		Ok(())
	}

	// Principals are snapshot-cloned so no identity lock is held across
	// authorizer calls.
	fn snapshot_principals(&self) -> PrincipalCollection {
		self.identity.read().principals.clone()
	}

	fn evaluate(
		&self,
		principals: &PrincipalCollection,
		permission: PermissionArg<'_>,
	) -> Result<bool, EvaluationError> {
		match permission {
			PermissionArg::Object(permission) => {
				self.authorizer.is_permitted(principals, permission)
			}
			PermissionArg::Expr(expr) => {
				let resolved = self.authorizer.resolve_permission(expr)?;
				self.authorizer.is_permitted(principals, resolved.as_ref())
			}
		}
	}

	fn demand(
		&self,
		principals: &PrincipalCollection,
		permission: PermissionArg<'_>,
	) -> Result<(), AuthorizationError> {
		if self.evaluate(principals, permission)? {
			Ok(())
		} else {
			let permission = permission.describe();
			debug!(%permission, "permission denied");
			Err(AuthorizationError::PermissionDenied { permission })
		}
	}

	fn demand_role(
		&self,
		principals: &PrincipalCollection,
		role: &str,
	) -> Result<(), AuthorizationError> {
		if self.authorizer.has_role(principals, role)? {
			Ok(())
		} else {
			debug!(role, "role not held");
			Err(AuthorizationError::RoleNotHeld {
				role: role.to_string(),
			})
		}
	}

	// ---- authentication ----

	/// Authenticates this subject with `token`.
	///
	/// On success the principals returned by the [`Authenticator`] replace
	/// any previous identity and the subject becomes authenticated. On
	/// failure nothing changes: a failed login never leaves a subject half
	/// logged in, and an already-bound identity survives untouched.
	#[instrument(level = "debug", skip(self, token))]
	pub fn login(&self, token: &dyn AuthenticationToken) -> Result<(), AuthenticationError> {
		let _transition = self.transition.lock();
		match self.authenticator.authenticate(token) {
			Ok(principals) => {
				let mut identity = self.identity.write();
				identity.principals = principals;
				identity.authenticated = true;
				drop(identity);
				debug!(remember_me = token.remember_me(), "login succeeded");
				Ok(())
			}
			Err(err) => {
				warn!(error = %err, "login failed");
				Err(err)
			}
		}
	}

	/// Releases this subject's identity and session.
	///
	/// Local state is cleared unconditionally; if the session store then
	/// fails to invalidate the detached session, the error is reported but
	/// the subject is already anonymous. Logging out an anonymous subject
	/// is a no-op.
	#[instrument(level = "debug", skip(self))]
	pub fn logout(&self) -> Result<(), SessionError> {
		let _transition = self.transition.lock();

		{
			let mut identity = self.identity.write();
			identity.principals = PrincipalCollection::new();
			identity.authenticated = false;
		}

		let binding = {
			let mut session = self.session.lock();
			std::mem::replace(&mut *session, SessionBinding::Unbound)
		};
		match binding {
			SessionBinding::Bound(session) => {
				debug!(session_id = %session.id, "invalidating session on logout");
				self.session_manager.invalidate(&session.id)
			}
			SessionBinding::Inherited(id) => {
				debug!(session_id = %id, "invalidating inherited session on logout");
				self.session_manager.invalidate(&id)
			}
			SessionBinding::Unbound => Ok(()),
		}
	}

	// ---- sessions ----

	/// The session for this subject, created on first use.
	///
	/// At most one session is ever created per subject: concurrent callers
	/// race for a single creation and every later call returns the same
	/// session until logout detaches it.
	pub fn session(&self) -> Result<Session, SessionError> {
		let mut binding = self.session.lock();
		if let Some(session) = self.resolve_binding(&mut binding)? {
			return Ok(session);
		}
		let context = self.session_context();
		let session = self.session_manager.start(&context)?;
		debug!(session_id = %session.id, "session created");
		*binding = SessionBinding::Bound(session.clone());
		Ok(session)
	}

	/// The current session, creating one only when `create` is `true`.
	///
	/// With `create` set this is [`session`](Subject::session). Without it,
	/// `Ok(None)` means this subject has no session and none was made; an
	/// inherited id that the store no longer recognizes is discarded and
	/// also answers `Ok(None)`.
	pub fn get_session(&self, create: bool) -> Result<Option<Session>, SessionError> {
		if create {
			return self.session().map(Some);
		}
		let mut binding = self.session.lock();
		self.resolve_binding(&mut binding)
	}

	// Resolves the binding without creating. An inherited id is looked up
	// once and either promoted to a bound handle or cleared when stale.
	// Caller holds the session lock.
	fn resolve_binding(
		&self,
		binding: &mut SessionBinding,
	) -> Result<Option<Session>, SessionError> {
		if let SessionBinding::Bound(session) = &*binding {
			return Ok(Some(session.clone()));
		}
		if let SessionBinding::Inherited(id) = &*binding {
			let id = *id;
			return match self.session_manager.get(&id)? {
				Some(session) => {
					*binding = SessionBinding::Bound(session.clone());
					Ok(Some(session))
				}
				None => {
					debug!(session_id = %id, "inherited session is stale, discarding");
					*binding = SessionBinding::Unbound;
					Ok(None)
				}
			};
		}
		Ok(None)
	}

	fn session_context(&self) -> SessionContext {
		match &self.host {
			Some(host) => SessionContext::new().with_host(host.clone()),
			None => SessionContext::new(),
		}
	}
}

impl std::fmt::Debug for Subject {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let identity = self.identity.read();
		f.debug_struct("Subject")
			.field("principals", &identity.principals)
			.field("authenticated", &identity.authenticated)
			.field("host", &self.host)
			.finish_non_exhaustive()
	}
}
