// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization queries routed through the realm.

use warden_core::{AuthorizationError, UsernamePasswordToken};
use warden_realm::ScopePermission;

use super::support::{alice_subject, anonymous_subject, stack};

/// **Test: Scope implication flows through the facade**
///
/// Alice's direct `doc:*` grant satisfies any permission in the `doc`
/// scope but nothing outside it; her `editor` role adds `draft:*`.
#[test]
fn scope_implication_flows_through_the_facade() {
	let (realm, sessions) = stack();
	let subject = alice_subject(&realm, &sessions);

	assert!(subject.is_permitted("doc:read").unwrap());
	assert!(subject.is_permitted("doc:write:42").unwrap());
	assert!(subject.is_permitted("draft:save").unwrap());
	assert!(!subject.is_permitted("printer:print").unwrap());
}

/// **Test: Expression and object forms answer alike**
///
/// The same permission expressed as a string and as a parsed
/// `ScopePermission` yields identical answers.
#[test]
fn expression_and_object_forms_answer_alike() {
	let (realm, sessions) = stack();
	let subject = alice_subject(&realm, &sessions);

	for expr in ["doc:read", "printer:print", "draft:save"] {
		let object = ScopePermission::new(expr).unwrap();
		assert_eq!(
			subject.is_permitted(&object).unwrap(),
			subject.is_permitted(expr).unwrap(),
			"disagreement on {expr}",
		);
	}
}

/// **Test: Bulk checks answer positionally**
///
/// Each bulk result lines up with its input, duplicates included, and
/// the all-form agrees with the fold of the each-form.
#[test]
fn bulk_checks_answer_positionally() {
	let (realm, sessions) = stack();
	let subject = alice_subject(&realm, &sessions);

	let asked = ["doc:read", "printer:print", "doc:read", "draft:save"];
	let answers = subject.is_each_permitted(asked).unwrap();
	assert_eq!(answers, vec![true, false, true, true]);

	assert!(!subject.is_permitted_all(asked).unwrap());
	assert!(subject.is_permitted_all(["doc:read", "draft:save"]).unwrap());
	assert!(subject.is_permitted_all(Vec::<&str>::new()).unwrap());

	let roles = subject.has_each_role(["editor", "admin", "staff"]).unwrap();
	assert_eq!(roles, vec![true, false, true]);
	assert!(subject.has_all_roles(["editor", "staff"]).unwrap());
	assert!(!subject.has_all_roles(["editor", "admin"]).unwrap());
}

/// **Test: Demand forms agree with query forms**
///
/// `check_*` succeeds exactly where the query forms answer true, and
/// the denial error names what was missing.
#[test]
fn demand_forms_agree_with_query_forms() {
	let (realm, sessions) = stack();
	let subject = alice_subject(&realm, &sessions);

	subject.check_permission("doc:read").unwrap();
	subject
		.check_permissions(["doc:read", "draft:save"])
		.unwrap();
	subject.check_role("editor").unwrap();
	subject.check_roles(["editor", "staff"]).unwrap();

	let err = subject.check_permission("printer:print").unwrap_err();
	assert!(matches!(
		err,
		AuthorizationError::PermissionDenied { permission } if permission == "printer:print"
	));

	let err = subject.check_roles(["editor", "admin"]).unwrap_err();
	assert!(matches!(err, AuthorizationError::RoleNotHeld { role } if role == "admin"));
}

/// **Test: Malformed expression is an evaluation error**
///
/// A denial is a clean false, but an expression the realm cannot parse
/// surfaces as an error through every form.
#[test]
fn malformed_expression_is_an_evaluation_error() {
	let (realm, sessions) = stack();
	let subject = alice_subject(&realm, &sessions);

	assert!(subject.is_permitted("doc::read").is_err());
	assert!(subject.is_each_permitted(["doc:read", "doc::read"]).is_err());

	let err = subject.check_permission("doc::read").unwrap_err();
	assert!(matches!(err, AuthorizationError::Evaluation(_)));
}

/// **Test: Authorization reflects the identity**
///
/// Bob's subject answers from bob's grants; alice's grants do not leak
/// across subjects sharing the same realm.
#[test]
fn authorization_reflects_the_identity() {
	let (realm, sessions) = stack();

	let bob = anonymous_subject(&realm, &sessions);
	bob.login(&UsernamePasswordToken::new("bob", "sw0rdf1sh"))
		.unwrap();

	assert!(bob.is_permitted("doc:read").unwrap());
	assert!(!bob.is_permitted("doc:write").unwrap());
	assert!(bob.has_role("viewer").unwrap());
	assert!(!bob.has_role("editor").unwrap());

	let alice = alice_subject(&realm, &sessions);
	assert!(alice.is_permitted("doc:write").unwrap());
}
