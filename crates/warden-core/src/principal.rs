// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Identity values and their realm-tagged aggregation.
//!
//! A [`Principal`] is an opaque identifying value supplied by the
//! application: a username, a numeric user id, a key fingerprint. Warden
//! never interprets the payload; it stores it, clones it cheaply, and
//! hands it back on request, with typed lookup via downcasting.
//!
//! A [`PrincipalCollection`] aggregates principals from one or more
//! identity sources ("realms"), preserving insertion order. The first
//! entry is the *primary* principal, the identity the application treats
//! as canonical. Typed lookups walk the collection in insertion order and
//! report absence as `None` or an empty vec, never as an error.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// An opaque application identity value.
///
/// Payloads must be `Debug` so principals can appear in audit output; the
/// rendering is captured once at construction, so formatting cost is not
/// paid per log line.
#[derive(Clone)]
pub struct Principal {
	value: Arc<dyn Any + Send + Sync>,
	repr: Arc<str>,
}

impl Principal {
	/// Wraps an identity value.
	pub fn new<T>(value: T) -> Self
	where
		T: Any + Send + Sync + fmt::Debug,
	{
		let repr = format!("{value:?}").into();
		Self {
			value: Arc::new(value),
			repr,
		}
	}

	/// Borrows the payload as `T`, if that is its type.
	pub fn get<T: Any>(&self) -> Option<&T> {
		self.value.downcast_ref::<T>()
	}

	/// True when the payload is a `T`.
	pub fn is<T: Any>(&self) -> bool {
		self.value.is::<T>()
	}

	/// Clones out a shared handle to the payload as `T`.
	pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
		Arc::clone(&self.value).downcast::<T>().ok()
	}
}

impl fmt::Debug for Principal {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.repr)
	}
}

#[derive(Clone, Debug)]
struct PrincipalEntry {
	realm: Arc<str>,
	principal: Principal,
}

/// Insertion-ordered principals tagged by contributing realm.
#[derive(Clone, Debug, Default)]
pub struct PrincipalCollection {
	entries: Vec<PrincipalEntry>,
}

impl PrincipalCollection {
	/// An empty collection: an anonymous subject.
	pub fn new() -> Self {
		Self::default()
	}

	/// A collection holding a single principal from one realm.
	pub fn of(realm: impl Into<Arc<str>>, principal: Principal) -> Self {
		let mut collection = Self::new();
		collection.add(realm, principal);
		collection
	}

	/// Appends a principal contributed by `realm`.
	pub fn add(&mut self, realm: impl Into<Arc<str>>, principal: Principal) {
		self.entries.push(PrincipalEntry {
			realm: realm.into(),
			principal,
		});
	}

	/// Appends every entry of `other`, preserving both insertion orders.
	pub fn merge(&mut self, other: PrincipalCollection) {
		self.entries.extend(other.entries);
	}

	/// The primary principal: the first one contributed.
	///
	/// When sources disagree, the first contributing source wins; the
	/// answer is stable for the lifetime of a binding and is re-derived
	/// only when a later login replaces the collection.
	pub fn primary(&self) -> Option<&Principal> {
		self.entries.first().map(|entry| &entry.principal)
	}

	/// First principal whose payload is a `T`, in insertion order.
	pub fn first_of<T: Any>(&self) -> Option<&T> {
		self.entries.iter().find_map(|entry| entry.principal.get::<T>())
	}

	/// Every principal whose payload is a `T`, in insertion order.
	pub fn all_of<T: Any>(&self) -> Vec<&T> {
		self.entries
			.iter()
			.filter_map(|entry| entry.principal.get::<T>())
			.collect()
	}

	/// Principals contributed by `realm`, in insertion order.
	pub fn from_realm<'a>(&'a self, realm: &'a str) -> impl Iterator<Item = &'a Principal> {
		self.entries
			.iter()
			.filter(move |entry| &*entry.realm == realm)
			.map(|entry| &entry.principal)
	}

	/// Distinct contributing realms, in first-contribution order.
	pub fn realm_names(&self) -> Vec<&str> {
		let mut names: Vec<&str> = Vec::new();
		for entry in &self.entries {
			if !names.contains(&&*entry.realm) {
				names.push(&entry.realm);
			}
		}
		names
	}

	/// Iterates `(realm, principal)` pairs in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &Principal)> {
		self.entries.iter().map(|entry| (&*entry.realm, &entry.principal))
	}

	/// Number of principals across all realms.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// True when no source has contributed a principal.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
