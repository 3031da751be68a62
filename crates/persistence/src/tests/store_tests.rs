// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{create_test_admin, create_test_student, create_test_teacher};
use crate::{FindOne, Persistence, PersistenceError, Store};
use hmhy_domain::{
    ACTIVE_FLAG, Admin, AdminChanges, Patch, Role, Specification, Student, Teacher, TeacherChanges,
};

fn create_persistence_with_teacher() -> Persistence {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let teacher: Teacher =
        create_test_teacher("t-1", "Dilnoza Karimova", "dilnoza@example.com", "+998901234567");
    Store::<Teacher>::insert(&mut persistence, &teacher).unwrap();
    persistence
}

fn load_teacher(persistence: &mut Persistence, id: &str) -> Teacher {
    Store::<Teacher>::find_one(persistence, &FindOne::any(id))
        .unwrap()
        .unwrap()
}

#[test]
fn test_insert_and_find_round_trip() {
    let mut persistence: Persistence = create_persistence_with_teacher();
    let teacher: Teacher = load_teacher(&mut persistence, "t-1");

    assert_eq!(teacher.full_name, "Dilnoza Karimova");
    assert_eq!(teacher.specification, Specification::English);
    assert!(teacher.state.is_active);
    assert!(!teacher.state.is_deleted);
}

#[test]
fn test_duplicate_phone_is_constraint_violation() {
    let mut persistence: Persistence = create_persistence_with_teacher();
    let duplicate: Teacher =
        create_test_teacher("t-2", "Other", "other@example.com", "+998901234567");

    let err: PersistenceError = Store::<Teacher>::insert(&mut persistence, &duplicate).unwrap_err();
    assert!(err.is_constraint_violation(), "unexpected error: {err}");
}

#[test]
fn test_field_changes_leave_absent_fields_untouched() {
    let mut persistence: Persistence = create_persistence_with_teacher();
    let changes: TeacherChanges = TeacherChanges {
        hourly_price: Some(150_000),
        specification: Some(Specification::Korean),
        ..TeacherChanges::default()
    };

    let affected: u64 =
        Store::<Teacher>::update_by_id(&mut persistence, "t-1", &Patch::Changes(changes)).unwrap();
    assert_eq!(affected, 1);

    let teacher: Teacher = load_teacher(&mut persistence, "t-1");
    assert_eq!(teacher.hourly_price, 150_000);
    assert_eq!(teacher.specification, Specification::Korean);
    assert_eq!(teacher.email, "dilnoza@example.com");
    assert!(teacher.updated_at > teacher.created_at);
}

#[test]
fn test_soft_delete_hides_row_from_live_lookup() {
    let mut persistence: Persistence = create_persistence_with_teacher();

    Store::<Teacher>::update_by_id(
        &mut persistence,
        "t-1",
        &Patch::SoftDelete {
            reason: Some(String::from("left the platform")),
            deleted_by: String::from("admin-1"),
        },
    )
    .unwrap();

    let live: Option<Teacher> =
        Store::<Teacher>::find_one(&mut persistence, &FindOne::live("t-1")).unwrap();
    assert!(live.is_none());

    let teacher: Teacher = load_teacher(&mut persistence, "t-1");
    assert!(teacher.state.is_deleted);
    assert_eq!(
        teacher.state.deletion_reason.as_deref(),
        Some("left the platform")
    );
    assert_eq!(teacher.state.deleted_by.as_deref(), Some("admin-1"));
}

#[test]
fn test_restore_clears_deletion_metadata() {
    let mut persistence: Persistence = create_persistence_with_teacher();
    Store::<Teacher>::update_by_id(
        &mut persistence,
        "t-1",
        &Patch::SoftDelete {
            reason: Some(String::from("duplicate")),
            deleted_by: String::from("admin-1"),
        },
    )
    .unwrap();

    Store::<Teacher>::update_by_id(&mut persistence, "t-1", &Patch::Restore).unwrap();

    let teacher: Teacher = load_teacher(&mut persistence, "t-1");
    assert!(!teacher.state.is_deleted);
    assert!(teacher.state.deletion_reason.is_none());
    assert!(teacher.state.deleted_by.is_none());
}

#[test]
fn test_set_flag_updates_activity() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let student: Student = create_test_student("s-1", "Aziz", "+998935556677", 0);
    Store::<Student>::insert(&mut persistence, &student).unwrap();

    Store::<Student>::update_by_id(
        &mut persistence,
        "s-1",
        &Patch::SetFlag {
            field: ACTIVE_FLAG.to_string(),
            value: false,
        },
    )
    .unwrap();

    let student: Student = Store::<Student>::find_one(&mut persistence, &FindOne::live("s-1"))
        .unwrap()
        .unwrap();
    assert!(!student.state.is_active);
}

#[test]
fn test_set_unknown_flag_is_rejected() {
    let mut persistence: Persistence = create_persistence_with_teacher();

    let err: PersistenceError = Store::<Teacher>::update_by_id(
        &mut persistence,
        "t-1",
        &Patch::SetFlag {
            field: String::from("isVerified"),
            value: true,
        },
    )
    .unwrap_err();
    assert_eq!(err, PersistenceError::UnknownField(String::from("isVerified")));
}

#[test]
fn test_update_missing_row_affects_nothing() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let changes: AdminChanges = AdminChanges {
        username: Some(String::from("ghost")),
        ..AdminChanges::default()
    };

    let affected: u64 =
        Store::<Admin>::update_by_id(&mut persistence, "missing", &Patch::Changes(changes))
            .unwrap();
    assert_eq!(affected, 0);
}

#[test]
fn test_hard_delete_removes_row() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let admin: Admin = create_test_admin("a-1", "alpha", "+998900000001", Role::Admin);
    Store::<Admin>::insert(&mut persistence, &admin).unwrap();

    assert_eq!(
        Store::<Admin>::delete_by_id(&mut persistence, "a-1").unwrap(),
        1
    );
    assert_eq!(
        Store::<Admin>::delete_by_id(&mut persistence, "a-1").unwrap(),
        0
    );

    let found: Option<Admin> =
        Store::<Admin>::find_one(&mut persistence, &FindOne::any("a-1")).unwrap();
    assert!(found.is_none());
}
