// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod list_tests;
mod store_tests;

use hmhy_domain::{
    Admin, CreateStudent, CreateTeacher, Entity, NewAdmin, Role, Specification, Student, Teacher,
};
use time::{Duration, OffsetDateTime};
use time::macros::datetime;

pub fn create_test_time(offset_minutes: i64) -> OffsetDateTime {
    datetime!(2026-02-01 09:00 UTC) + Duration::minutes(offset_minutes)
}

pub fn create_test_admin(id: &str, username: &str, phone_number: &str, role: Role) -> Admin {
    Admin::from_create(
        id.to_string(),
        NewAdmin {
            username: username.to_string(),
            phone_number: phone_number.to_string(),
            password_hash: String::from("$2b$07$not-a-real-hash"),
            role,
        },
        create_test_time(0),
    )
}

pub fn create_test_teacher(id: &str, full_name: &str, email: &str, phone_number: &str) -> Teacher {
    Teacher::from_create(
        id.to_string(),
        CreateTeacher {
            full_name: full_name.to_string(),
            email: email.to_string(),
            phone_number: phone_number.to_string(),
            specification: Specification::English,
            level: String::from("B2"),
            description: None,
            hourly_price: 100_000,
            image_url: None,
        },
        create_test_time(0),
    )
}

pub fn create_test_student(id: &str, first_name: &str, phone_number: &str, minute: i64) -> Student {
    Student::from_create(
        id.to_string(),
        CreateStudent {
            first_name: first_name.to_string(),
            last_name: String::from("Test"),
            phone_number: phone_number.to_string(),
            email: None,
        },
        create_test_time(minute),
    )
}
