// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Account-backed authenticator and authorizer.
//!
//! [`MemoryRealm`] holds a frozen account registry assembled by
//! [`MemoryRealmBuilder`]. Passwords are stored as Argon2 PHC strings,
//! never in clear. The realm implements both collaborator seams: it
//! authenticates username/password tokens, and it answers role and scope
//! permission queries for any `String` principal naming one of its
//! accounts. An account may carry direct permission grants, roles, and
//! additional principals (such as a numeric user id) contributed on
//! login.

use std::any::type_name;
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, instrument, warn};
use warden_core::{
	AuthenticationError, AuthenticationToken, Authenticator, Authorizer, EvaluationError,
	Permission, Principal, PrincipalCollection, SecretString,
};

use crate::error::{PermissionParseError, RealmError};
use crate::password;
use crate::permission::ScopePermission;

/// Declarative account used to assemble a [`MemoryRealm`].
#[derive(Clone)]
pub struct Account {
	username: String,
	password: SecretString,
	roles: Vec<String>,
	permissions: Vec<String>,
	extra_principals: Vec<Principal>,
	locked: bool,
	credentials_expired: bool,
}

impl Account {
	/// Starts an account for `username` authenticating with `password`.
	pub fn new(username: impl Into<String>, password: impl Into<SecretString>) -> Self {
		Self {
			username: username.into(),
			password: password.into(),
			roles: Vec::new(),
			permissions: Vec::new(),
			extra_principals: Vec::new(),
			locked: false,
			credentials_expired: false,
		}
	}

	/// Grants a role.
	pub fn with_role(mut self, role: impl Into<String>) -> Self {
		self.roles.push(role.into());
		self
	}

	/// Grants a scope permission; the expression is parsed at realm
	/// build time.
	pub fn with_permission(mut self, expr: impl Into<String>) -> Self {
		self.permissions.push(expr.into());
		self
	}

	/// Attaches an additional principal contributed on successful login,
	/// e.g. a numeric user id alongside the username.
	pub fn with_principal(mut self, principal: Principal) -> Self {
		self.extra_principals.push(principal);
		self
	}

	/// Marks the account administratively locked.
	pub fn locked(mut self) -> Self {
		self.locked = true;
		self
	}

	/// Marks the account's credentials expired.
	pub fn expired_credentials(mut self) -> Self {
		self.credentials_expired = true;
		self
	}
}

#[derive(Debug)]
struct AccountRecord {
	password_phc: String,
	roles: Vec<String>,
	permissions: Vec<ScopePermission>,
	extra_principals: Vec<Principal>,
	locked: bool,
	credentials_expired: bool,
}

/// Builder for [`MemoryRealm`].
pub struct MemoryRealmBuilder {
	name: String,
	accounts: Vec<Account>,
	role_permissions: Vec<(String, Vec<String>)>,
	max_attempts: Option<u32>,
}

impl MemoryRealmBuilder {
	/// Registers an account.
	pub fn with_account(mut self, account: Account) -> Self {
		self.accounts.push(account);
		self
	}

	/// Grants scope permissions to every holder of `role`.
	pub fn with_role_permissions<I, S>(mut self, role: impl Into<String>, exprs: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.role_permissions
			.push((role.into(), exprs.into_iter().map(Into::into).collect()));
		self
	}

	/// Rejects logins after `max` consecutive failed attempts, until a
	/// successful login resets the counter.
	pub fn with_max_attempts(mut self, max: u32) -> Self {
		self.max_attempts = Some(max);
		self
	}

	/// Hashes passwords, parses grants, and freezes the registry.
	pub fn build(self) -> Result<MemoryRealm, RealmError> {
		let mut accounts = HashMap::new();
		for account in self.accounts {
			if accounts.contains_key(&account.username) {
				return Err(RealmError::DuplicateAccount(account.username));
			}
			let phc = password::hash(account.password.expose())
				.map_err(|_| RealmError::Hashing(account.username.clone()))?;
			let record = AccountRecord {
				password_phc: phc,
				roles: account.roles,
				permissions: parse_grants(&account.permissions)?,
				extra_principals: account.extra_principals,
				locked: account.locked,
				credentials_expired: account.credentials_expired,
			};
			accounts.insert(account.username, record);
		}

		let mut role_permissions: HashMap<String, Vec<ScopePermission>> = HashMap::new();
		for (role, exprs) in self.role_permissions {
			role_permissions
				.entry(role)
				.or_default()
				.extend(parse_grants(&exprs)?);
		}

		Ok(MemoryRealm {
			name: self.name.into(),
			accounts,
			role_permissions,
			max_attempts: self.max_attempts,
			failed_attempts: Mutex::new(HashMap::new()),
		})
	}
}

fn parse_grants(exprs: &[String]) -> Result<Vec<ScopePermission>, RealmError> {
	exprs
		.iter()
		.map(|expr| {
			expr.parse().map_err(|source| RealmError::InvalidGrant {
				expr: expr.clone(),
				source,
			})
		})
		.collect()
}

/// In-memory account registry implementing both [`Authenticator`] and
/// [`Authorizer`].
#[derive(Debug)]
pub struct MemoryRealm {
	name: Arc<str>,
	accounts: HashMap<String, AccountRecord>,
	role_permissions: HashMap<String, Vec<ScopePermission>>,
	max_attempts: Option<u32>,
	failed_attempts: Mutex<HashMap<String, u32>>,
}

impl MemoryRealm {
	/// Starts a builder for a realm named `name`.
	///
	/// The name tags every principal this realm contributes.
	pub fn builder(name: impl Into<String>) -> MemoryRealmBuilder {
		MemoryRealmBuilder {
			name: name.into(),
			accounts: Vec::new(),
			role_permissions: Vec::new(),
			max_attempts: None,
		}
	}

	/// The realm name used to tag contributed principals.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Consecutive failed login attempts currently recorded for
	/// `username`.
	pub fn failed_attempts(&self, username: &str) -> u32 {
		self.failed_attempts
			.lock()
			.get(username)
			.copied()
			.unwrap_or(0)
	}

	fn is_granted(&self, account: &AccountRecord, required: &ScopePermission) -> bool {
		if account
			.permissions
			.iter()
			.any(|granted| granted.implies(required))
		{
			return true;
		}
		account.roles.iter().any(|role| {
			self.role_permissions
				.get(role)
				.map_or(false, |grants| grants.iter().any(|granted| granted.implies(required)))
		})
	}
}

impl Authenticator for MemoryRealm {
	#[instrument(level = "debug", skip(self, token), fields(realm = %self.name))]
	fn authenticate(
		&self,
		token: &dyn AuthenticationToken,
	) -> Result<PrincipalCollection, AuthenticationError> {
		let claimed = token.principal();
		let Some(username) = claimed.get::<String>().cloned() else {
			return Err(AuthenticationError::InvalidToken(
				"claimed principal is not a username".to_string(),
			));
		};

		let Some(account) = self.accounts.get(&username) else {
			debug!(username = %username, "login rejected: unknown account");
			return Err(AuthenticationError::UnknownAccount(username));
		};

		if account.locked {
			warn!(username = %username, "login rejected: account locked");
			return Err(AuthenticationError::LockedAccount(username));
		}

		if let Some(max) = self.max_attempts {
			if self.failed_attempts(&username) >= max {
				warn!(username = %username, max_attempts = max, "login rejected: attempt budget exhausted");
				return Err(AuthenticationError::ExcessiveAttempts(username));
			}
		}

		let verified = password::verify(token.credentials().expose(), &account.password_phc)
			.map_err(|err| {
				AuthenticationError::Backend(format!("stored credential hash is invalid: {err}"))
			})?;
		if !verified {
			let mut attempts = self.failed_attempts.lock();
			let count = attempts.entry(username.clone()).or_insert(0);
			*count += 1;
			debug!(username = %username, attempts = *count, "login rejected: incorrect credentials");
			return Err(AuthenticationError::IncorrectCredentials(username));
		}

		if account.credentials_expired {
			warn!(username = %username, "login rejected: credentials expired");
			return Err(AuthenticationError::ExpiredCredentials(username));
		}

		self.failed_attempts.lock().remove(&username);

		let mut principals =
			PrincipalCollection::of(Arc::clone(&self.name), Principal::new(username.clone()));
		for extra in &account.extra_principals {
			principals.add(Arc::clone(&self.name), extra.clone());
		}
		debug!(username = %username, principal_count = principals.len(), "login accepted");
		Ok(principals)
	}
}

impl Authorizer for MemoryRealm {
	fn resolve_permission(&self, expr: &str) -> Result<Box<dyn Permission>, EvaluationError> {
		let permission: ScopePermission = expr.parse().map_err(|err: PermissionParseError| {
			EvaluationError::UnresolvablePermission {
				expr: expr.to_string(),
				reason: err.to_string(),
			}
		})?;
		Ok(Box::new(permission))
	}

	fn is_permitted(
		&self,
		principals: &PrincipalCollection,
		permission: &dyn Permission,
	) -> Result<bool, EvaluationError> {
		let Some(required) = permission.as_any().downcast_ref::<ScopePermission>() else {
			return Err(EvaluationError::UnsupportedPermission(
				type_name::<ScopePermission>(),
			));
		};
		let granted = principals.all_of::<String>().into_iter().any(|username| {
			self.accounts
				.get(username)
				.map_or(false, |account| self.is_granted(account, required))
		});
		debug!(realm = %self.name, permission = %required, granted, "permission evaluated");
		Ok(granted)
	}

	fn has_role(
		&self,
		principals: &PrincipalCollection,
		role: &str,
	) -> Result<bool, EvaluationError> {
		Ok(principals.all_of::<String>().into_iter().any(|username| {
			self.accounts
				.get(username)
				.map_or(false, |account| account.roles.iter().any(|held| held == role))
		}))
	}
}
