// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use hmhy_domain::{
    Admin, CreateStudent, CreateTeacher, Entity, NewAdmin, Patch, Role, Specification,
};
use hmhy_persistence::{FindMany, FindOne, Persistence, PersistenceError, Store};
use std::cell::Cell;
use std::sync::Arc;
use time::OffsetDateTime;
use time::macros::datetime;

use crate::token::{Clock, CookieSink, CookieSpec, FixedClock, TokenService, TokenSettings};

pub const TEST_PASSWORD: &str = "s3cret-pass";

pub fn create_test_now() -> OffsetDateTime {
    datetime!(2026-03-01 08:00 UTC)
}

pub fn create_test_settings() -> TokenSettings {
    TokenSettings {
        access_secret: String::from("access-secret-for-tests"),
        access_lifetime_days: 1,
        refresh_secret: String::from("refresh-secret-for-tests"),
        refresh_lifetime_days: 7,
    }
}

pub fn create_test_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::new(create_test_now()))
}

pub fn create_test_token_service(clock: Arc<FixedClock>) -> TokenService {
    let clock: Arc<dyn Clock> = clock;
    TokenService::new(create_test_settings(), clock)
}

pub fn create_test_teacher_input(full_name: &str, email: &str, phone_number: &str) -> CreateTeacher {
    CreateTeacher {
        full_name: full_name.to_string(),
        email: email.to_string(),
        phone_number: phone_number.to_string(),
        specification: Specification::English,
        level: String::from("C1"),
        description: Some(String::from("IELTS preparation")),
        hourly_price: 120_000,
        image_url: None,
    }
}

pub fn create_test_student_input(first_name: &str, phone_number: &str) -> CreateStudent {
    CreateStudent {
        first_name: first_name.to_string(),
        last_name: String::from("Rahimov"),
        phone_number: phone_number.to_string(),
        email: Some(format!("{}@example.com", first_name.to_lowercase())),
    }
}

/// Inserts an admin whose password is [`TEST_PASSWORD`].
pub fn create_test_admin(
    persistence: &mut Persistence,
    username: &str,
    phone_number: &str,
    role: Role,
) -> Admin {
    let admin: Admin = Admin::from_create(
        format!("admin-{username}"),
        NewAdmin {
            username: username.to_string(),
            phone_number: phone_number.to_string(),
            password_hash: crate::hash_password(TEST_PASSWORD).unwrap(),
            role,
        },
        create_test_now(),
    );
    Store::<Admin>::insert(persistence, &admin).unwrap();
    admin
}

/// Records cookies written by the code under test.
#[derive(Debug, Default)]
pub struct RecordingCookies {
    pub set: Vec<CookieSpec>,
    pub removed: Vec<(String, &'static str)>,
}

impl CookieSink for RecordingCookies {
    fn set_cookie(&mut self, cookie: CookieSpec) {
        self.set.push(cookie);
    }

    fn remove_cookie(&mut self, name: &str, path: &'static str) {
        self.removed.push((name.to_string(), path));
    }
}

/// A store wrapper counting every write that reaches the inner store.
pub struct CountingStore<'a, S> {
    pub inner: S,
    pub writes: &'a Cell<usize>,
}

impl<'a, S> CountingStore<'a, S> {
    pub const fn new(inner: S, writes: &'a Cell<usize>) -> Self {
        Self { inner, writes }
    }

    fn record(&self) {
        self.writes.set(self.writes.get() + 1);
    }
}

impl<E: Entity, S: Store<E>> Store<E> for CountingStore<'_, S> {
    fn insert(&mut self, entity: &E) -> Result<(), PersistenceError> {
        self.record();
        self.inner.insert(entity)
    }

    fn find_one(&mut self, query: &FindOne) -> Result<Option<E>, PersistenceError> {
        self.inner.find_one(query)
    }

    fn find_many(&mut self, query: &FindMany) -> Result<(Vec<E>, u64), PersistenceError> {
        self.inner.find_many(query)
    }

    fn update_by_id(
        &mut self,
        id: &str,
        patch: &Patch<E::Changes>,
    ) -> Result<u64, PersistenceError> {
        self.record();
        self.inner.update_by_id(id, patch)
    }

    fn delete_by_id(&mut self, id: &str) -> Result<u64, PersistenceError> {
        self.record();
        self.inner.delete_by_id(id)
    }
}
