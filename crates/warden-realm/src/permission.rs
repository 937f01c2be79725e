// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Colon-delimited scope permissions with wildcard segments.
//!
//! Expressions are sequences of segments separated by `:`, compared
//! case-insensitively. A `*` segment matches any segment, and a granted
//! expression that runs out of segments implies everything below it:
//! `doc` and `doc:*` both imply `doc:read`, while `doc:read` does not
//! imply `doc`. Segments are single-valued; there is no sub-part list
//! syntax inside a segment.

use std::any::Any;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use warden_core::Permission;

use crate::error::PermissionParseError;

const WILDCARD: &str = "*";

/// A parsed scope permission such as `doc:read` or `doc:*`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ScopePermission {
	parts: Vec<String>,
}

impl ScopePermission {
	/// Parses an expression; equivalent to [`str::parse`].
	pub fn new(expr: &str) -> Result<Self, PermissionParseError> {
		expr.parse()
	}

	/// Whether this (granted) permission satisfies `required`.
	///
	/// Walks both expressions segment by segment: a `*` grant segment
	/// matches anything, a grant that is a strict prefix of the
	/// requirement matches the rest implicitly, and any trailing grant
	/// segments must all be wildcards.
	pub fn implies(&self, required: &ScopePermission) -> bool {
		let mut granted = self.parts.iter();
		for required_part in &required.parts {
			match granted.next() {
				None => return true,
				Some(part) if part != WILDCARD && part != required_part => return false,
				Some(_) => {}
			}
		}
		granted.all(|part| part == WILDCARD)
	}

	/// The segments of this permission, lowercased.
	pub fn parts(&self) -> &[String] {
		&self.parts
	}
}

impl FromStr for ScopePermission {
	type Err = PermissionParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let trimmed = s.trim();
		if trimmed.is_empty() {
			return Err(PermissionParseError::Empty);
		}
		let mut parts = Vec::new();
		for segment in trimmed.split(':') {
			let segment = segment.trim();
			if segment.is_empty() {
				return Err(PermissionParseError::EmptySegment(s.to_string()));
			}
			parts.push(segment.to_lowercase());
		}
		Ok(Self { parts })
	}
}

impl std::fmt::Display for ScopePermission {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.parts.join(":"))
	}
}

impl std::fmt::Debug for ScopePermission {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "ScopePermission({})", self)
	}
}

impl Permission for ScopePermission {
	fn as_any(&self) -> &dyn Any {
		self
	}
}

impl Serialize for ScopePermission {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}

impl<'de> Deserialize<'de> for ScopePermission {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let expr = String::deserialize(deserializer)?;
		expr.parse().map_err(D::Error::custom)
	}
}
