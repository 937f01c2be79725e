// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Permission contracts and the authorizer seam.
//!
//! The facade treats permissions as opaque: both construction and
//! comparison live behind the [`Authorizer`]. Call sites may submit
//! either a resolved [`Permission`] object or a string expression; the
//! expression form is normalized through
//! [`Authorizer::resolve_permission`] before evaluation, so the two forms
//! answer identically.

use std::any::Any;
use std::fmt;

use crate::error::EvaluationError;
use crate::principal::PrincipalCollection;

/// An opaque capability descriptor.
///
/// Implementations are realm-specific; [`as_any`] lets a realm recover
/// its own concrete type at evaluation time.
///
/// [`as_any`]: Permission::as_any
pub trait Permission: fmt::Debug + Send + Sync + 'static {
	/// Upcast used by authorizers to downcast to their concrete type.
	fn as_any(&self) -> &dyn Any;
}

/// A permission argument: an already-resolved object or a string
/// expression awaiting resolution.
///
/// Both forms convert via `From`, so facade entry points accept
/// `impl Into<PermissionArg>` and callers write either
/// `subject.is_permitted("doc:read")` or
/// `subject.is_permitted(&resolved)`.
#[derive(Clone, Copy)]
pub enum PermissionArg<'a> {
	/// A resolved permission object.
	Object(&'a dyn Permission),
	/// A string expression, resolved by the authorizer.
	Expr(&'a str),
}

impl PermissionArg<'_> {
	/// Human-readable description for denial messages and logs.
	pub fn describe(&self) -> String {
		match self {
			Self::Object(permission) => format!("{permission:?}"),
			Self::Expr(expr) => (*expr).to_string(),
		}
	}
}

impl fmt::Debug for PermissionArg<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Object(permission) => write!(f, "{permission:?}"),
			Self::Expr(expr) => write!(f, "{expr:?}"),
		}
	}
}

impl<'a> From<&'a str> for PermissionArg<'a> {
	fn from(expr: &'a str) -> Self {
		Self::Expr(expr)
	}
}

impl<'a> From<&'a String> for PermissionArg<'a> {
	fn from(expr: &'a String) -> Self {
		Self::Expr(expr.as_str())
	}
}

impl<'a, P: Permission> From<&'a P> for PermissionArg<'a> {
	fn from(permission: &'a P) -> Self {
		Self::Object(permission)
	}
}

impl<'a> From<&'a dyn Permission> for PermissionArg<'a> {
	fn from(permission: &'a dyn Permission) -> Self {
		Self::Object(permission)
	}
}

/// Evaluates permissions and roles for a set of principals.
///
/// The facade owns aggregation and ordering; implementations own
/// matching. Denial must be reported as `Ok(false)` - `Err` is reserved
/// for evaluation failures such as an unreachable backing store.
pub trait Authorizer: Send + Sync {
	/// Parses a string expression into this authorizer's permission type.
	fn resolve_permission(&self, expr: &str) -> Result<Box<dyn Permission>, EvaluationError>;

	/// Whether `principals` hold `permission`.
	fn is_permitted(
		&self,
		principals: &PrincipalCollection,
		permission: &dyn Permission,
	) -> Result<bool, EvaluationError>;

	/// Whether `principals` hold the named role.
	fn has_role(
		&self,
		principals: &PrincipalCollection,
		role: &str,
	) -> Result<bool, EvaluationError>;
}
