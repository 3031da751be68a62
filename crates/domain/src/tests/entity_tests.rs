// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    ACTIVE_FLAG, Admin, CreateStudent, DomainError, Entity, NewAdmin, Role, Specification, Student,
};
use std::str::FromStr;
use time::OffsetDateTime;
use time::macros::datetime;

fn create_test_admin() -> Admin {
    Admin::from_create(
        String::from("a-1"),
        NewAdmin {
            username: String::from("root"),
            phone_number: String::from("+998900000000"),
            password_hash: String::from("$2b$07$hash"),
            role: Role::SuperAdmin,
        },
        datetime!(2026-01-15 10:00 UTC),
    )
}

#[test]
fn test_role_parsing_is_case_insensitive() {
    assert_eq!(Role::from_str("admin"), Ok(Role::Admin));
    assert_eq!(Role::from_str(" SuperAdmin "), Ok(Role::SuperAdmin));
    assert_eq!(
        Role::from_str("ID"),
        Err(DomainError::InvalidRole(String::from("ID")))
    );
}

#[test]
fn test_specification_round_trips_through_tag() {
    let spec: Specification = Specification::from_str("korean").unwrap();
    assert_eq!(spec, Specification::Korean);
    assert_eq!(spec.to_string(), "KOREAN");
    assert!(Specification::from_str("klingon").is_err());
}

#[test]
fn test_new_entity_is_active_and_not_deleted() {
    let admin: Admin = create_test_admin();
    assert!(admin.soft_state().is_active);
    assert!(!admin.soft_state().is_deleted);
    assert_eq!(admin.created_at, admin.updated_at);
    assert_eq!(admin.id(), "a-1");
}

#[test]
fn test_admin_serialization_hides_password_hash() {
    let value: serde_json::Value = serde_json::to_value(create_test_admin()).unwrap();
    assert!(value.get("passwordHash").is_none());
    assert_eq!(value["role"], "SUPERADMIN");
    assert_eq!(value["isActive"], true);
    assert_eq!(value["isDeleted"], false);
    assert_eq!(value["createdAt"], "2026-01-15T10:00:00Z");
}

#[test]
fn test_status_flag_lookup() {
    let student: Student = Student::from_create(
        String::from("s-1"),
        CreateStudent {
            first_name: String::from("Aziz"),
            last_name: String::from("Rahimov"),
            phone_number: String::from("+998935556677"),
            email: None,
        },
        OffsetDateTime::UNIX_EPOCH,
    );

    assert_eq!(student.status_flag(ACTIVE_FLAG), Some(true));
    assert_eq!(student.status_flag("isVerified"), None);
    assert_eq!(student.full_name(), "Aziz Rahimov");
}
