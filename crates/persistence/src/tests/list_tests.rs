// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{create_test_student, create_test_teacher};
use crate::{FindMany, Persistence, PersistenceError, Store};
use hmhy_domain::{Patch, Student, Teacher};

const STUDENT_SEARCH: &[&str] = &["firstName", "lastName", "phoneNumber"];

fn create_persistence_with_students(count: i64) -> Persistence {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    for n in 0..count {
        let student: Student = create_test_student(
            &format!("s-{n}"),
            &format!("Student{n}"),
            &format!("+99893000{n:04}"),
            n,
        );
        Store::<Student>::insert(&mut persistence, &student).unwrap();
    }
    persistence
}

fn list(persistence: &mut Persistence, query: &FindMany) -> (Vec<Student>, u64) {
    Store::<Student>::find_many(persistence, query).unwrap()
}

#[test]
fn test_window_and_total() {
    let mut persistence: Persistence = create_persistence_with_students(23);
    let query: FindMany = FindMany {
        skip: 20,
        take: 10,
        ..FindMany::default()
    };

    let (items, total): (Vec<Student>, u64) = list(&mut persistence, &query);
    assert_eq!(total, 23);
    assert_eq!(items.len(), 3);
}

#[test]
fn test_newest_first() {
    let mut persistence: Persistence = create_persistence_with_students(3);
    let query: FindMany = FindMany {
        take: 10,
        ..FindMany::default()
    };

    let (items, _): (Vec<Student>, u64) = list(&mut persistence, &query);
    let ids: Vec<&str> = items.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["s-2", "s-1", "s-0"]);
}

#[test]
fn test_search_is_case_insensitive_substring() {
    let mut persistence: Persistence = create_persistence_with_students(12);
    let query: FindMany = FindMany {
        search: Some(String::from("student1")),
        search_fields: STUDENT_SEARCH.to_vec(),
        take: 10,
        ..FindMany::default()
    };

    let (items, total): (Vec<Student>, u64) = list(&mut persistence, &query);
    // Student1, Student10, Student11
    assert_eq!(total, 3);
    assert!(items.iter().all(|s| s.first_name.starts_with("Student1")));
}

#[test]
fn test_search_matches_phone_number() {
    let mut persistence: Persistence = create_persistence_with_students(5);
    let query: FindMany = FindMany {
        search: Some(String::from("0004")),
        search_fields: STUDENT_SEARCH.to_vec(),
        take: 10,
        ..FindMany::default()
    };

    let (items, total): (Vec<Student>, u64) = list(&mut persistence, &query);
    assert_eq!(total, 1);
    assert_eq!(items[0].id, "s-4");
}

#[test]
fn test_search_wildcards_are_literal() {
    let mut persistence: Persistence = create_persistence_with_students(5);
    let query: FindMany = FindMany {
        search: Some(String::from("%")),
        search_fields: STUDENT_SEARCH.to_vec(),
        take: 10,
        ..FindMany::default()
    };

    let (_, total): (Vec<Student>, u64) = list(&mut persistence, &query);
    assert_eq!(total, 0);
}

#[test]
fn test_deleted_rows_excluded_unless_requested() {
    let mut persistence: Persistence = create_persistence_with_students(4);
    Store::<Student>::update_by_id(
        &mut persistence,
        "s-1",
        &Patch::SoftDelete {
            reason: None,
            deleted_by: String::from("admin-1"),
        },
    )
    .unwrap();

    let mut query: FindMany = FindMany {
        take: 10,
        ..FindMany::default()
    };
    assert_eq!(list(&mut persistence, &query).1, 3);

    query.include_deleted = true;
    assert_eq!(list(&mut persistence, &query).1, 4);
}

#[test]
fn test_activity_filter() {
    let mut persistence: Persistence = create_persistence_with_students(4);
    Store::<Student>::update_by_id(
        &mut persistence,
        "s-2",
        &Patch::SetFlag {
            field: String::from("isActive"),
            value: false,
        },
    )
    .unwrap();

    let query: FindMany = FindMany {
        is_active: Some(false),
        take: 10,
        ..FindMany::default()
    };
    let (items, total): (Vec<Student>, u64) = list(&mut persistence, &query);
    assert_eq!(total, 1);
    assert_eq!(items[0].id, "s-2");
}

#[test]
fn test_like_pattern_escapes_wildcards() {
    let query: FindMany = FindMany {
        search: Some(String::from(" 50%_OFF ")),
        search_fields: STUDENT_SEARCH.to_vec(),
        ..FindMany::default()
    };
    assert_eq!(query.like_pattern().as_deref(), Some("%50\\%\\_off%"));

    let blank: FindMany = FindMany {
        search: Some(String::from("   ")),
        search_fields: STUDENT_SEARCH.to_vec(),
        ..FindMany::default()
    };
    assert!(blank.like_pattern().is_none());

    let no_fields: FindMany = FindMany {
        search: Some(String::from("off")),
        ..FindMany::default()
    };
    assert!(no_fields.like_pattern().is_none());
}

#[test]
fn test_search_folds_non_ascii_case() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let ivan: Student = create_test_student("s-ivan", "Иван", "+998930000001", 0);
    let olga: Student = create_test_student("s-olga", "ОЛЬГА", "+998930000002", 1);
    Store::<Student>::insert(&mut persistence, &ivan).unwrap();
    Store::<Student>::insert(&mut persistence, &olga).unwrap();

    for (term, expected) in [("иван", "s-ivan"), ("ИВАН", "s-ivan"), ("ольга", "s-olga")] {
        let query: FindMany = FindMany {
            search: Some(term.to_string()),
            search_fields: STUDENT_SEARCH.to_vec(),
            take: 10,
            ..FindMany::default()
        };
        let (items, total): (Vec<Student>, u64) = list(&mut persistence, &query);
        assert_eq!(total, 1, "search for {term}");
        assert_eq!(items[0].id, expected);
    }
}

#[test]
fn test_search_limited_to_given_fields() {
    let mut persistence: Persistence = create_persistence_with_students(3);
    let query: FindMany = FindMany {
        search: Some(String::from("student")),
        search_fields: vec!["phoneNumber"],
        take: 10,
        ..FindMany::default()
    };

    assert_eq!(list(&mut persistence, &query).1, 0);
}

#[test]
fn test_unknown_search_field_is_rejected() {
    let mut persistence: Persistence = create_persistence_with_students(1);
    let query: FindMany = FindMany {
        search: Some(String::from("x")),
        search_fields: vec!["passwordHash"],
        take: 10,
        ..FindMany::default()
    };

    let err: PersistenceError = Store::<Student>::find_many(&mut persistence, &query).unwrap_err();
    assert_eq!(err, PersistenceError::UnknownField(String::from("passwordHash")));
}

fn create_persistence_with_teachers() -> Persistence {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let mut aziz: Teacher =
        create_test_teacher("t-aziz", "Aziz Nurmatov", "aziz@example.com", "+998901000001");
    aziz.level = String::from("C1");
    let mut laylo: Teacher =
        create_test_teacher("t-laylo", "Laylo Saidova", "laylo@example.com", "+998901000002");
    laylo.specification = hmhy_domain::Specification::Korean;
    laylo.description = Some(String::from("Корейский язык для начинающих"));

    Store::<Teacher>::insert(&mut persistence, &aziz).unwrap();
    Store::<Teacher>::insert(&mut persistence, &laylo).unwrap();
    persistence
}

#[test]
fn test_teacher_attribute_filters() {
    let mut persistence: Persistence = create_persistence_with_teachers();

    let by_specification: FindMany = FindMany {
        attributes: vec![("specification", String::from("KOREAN"))],
        take: 10,
        ..FindMany::default()
    };
    let (items, total): (Vec<Teacher>, u64) =
        Store::<Teacher>::find_many(&mut persistence, &by_specification).unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].id, "t-laylo");

    let by_level: FindMany = FindMany {
        attributes: vec![("level", String::from("c1"))],
        take: 10,
        ..FindMany::default()
    };
    let (items, total): (Vec<Teacher>, u64) =
        Store::<Teacher>::find_many(&mut persistence, &by_level).unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].id, "t-aziz");
}

#[test]
fn test_teacher_search_covers_nullable_description() {
    let mut persistence: Persistence = create_persistence_with_teachers();
    let query: FindMany = FindMany {
        search: Some(String::from("корейский")),
        search_fields: vec!["description"],
        take: 10,
        ..FindMany::default()
    };

    let (items, total): (Vec<Teacher>, u64) =
        Store::<Teacher>::find_many(&mut persistence, &query).unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].id, "t-laylo");
}

#[test]
fn test_attribute_filter_on_student_is_rejected() {
    let mut persistence: Persistence = create_persistence_with_students(1);
    let query: FindMany = FindMany {
        attributes: vec![("level", String::from("B2"))],
        take: 10,
        ..FindMany::default()
    };

    let err: PersistenceError = Store::<Student>::find_many(&mut persistence, &query).unwrap_err();
    assert_eq!(err, PersistenceError::UnknownField(String::from("level")));
}
