// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! [`CookieSink`] over the `axum-extra` cookie jar.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite as JarSameSite};
use hmhy_api::{CookieSink, CookieSpec, SameSite};
use time::Duration;

/// Collects cookie changes for the response.
#[derive(Debug, Default)]
pub struct JarSink {
    jar: CookieJar,
}

impl JarSink {
    #[must_use]
    pub const fn new(jar: CookieJar) -> Self {
        Self { jar }
    }

    /// The jar to return from the handler.
    #[must_use]
    pub fn into_jar(self) -> CookieJar {
        self.jar
    }
}

impl CookieSink for JarSink {
    fn set_cookie(&mut self, cookie: CookieSpec) {
        let same_site: JarSameSite = match cookie.same_site {
            SameSite::Lax => JarSameSite::Lax,
            SameSite::None => JarSameSite::None,
        };
        let built: Cookie<'static> = Cookie::build((cookie.name, cookie.value))
            .http_only(cookie.http_only)
            .secure(cookie.secure)
            .same_site(same_site)
            .path(cookie.path)
            .max_age(Duration::seconds(cookie.max_age_seconds))
            .build();

        self.jar = std::mem::take(&mut self.jar).add(built);
    }

    /// Emits an expired cookie so the client drops it even when the request
    /// did not carry it.
    fn remove_cookie(&mut self, name: &str, path: &'static str) {
        let mut removal: Cookie<'static> = Cookie::build((name.to_string(), "")).path(path).build();
        removal.make_removal();
        self.jar = std::mem::take(&mut self.jar).add(removal);
    }
}
