// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use hmhy_api::{
    AuthGate, BaseService, Clock, EmailService, MailError, MailMessage, Mailer, SystemClock,
    TokenPayload, TokenService, TokenSettings, prepare_new_admin,
};
use hmhy_domain::{Admin, CreateAdminRequest, NewAdmin, Role};
use hmhy_persistence::Persistence;
use serde_json::{Value, json};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex as StdMutex};
use tokio::sync::Mutex;
use tower::ServiceExt;
use uuid::Uuid;

use crate::config::{SuperadminSeed, UploadSettings};
use crate::files::LocalFileStore;
use crate::router::{AppState, build_router};

pub const SUPERADMIN_USERNAME: &str = "root";
pub const SUPERADMIN_PASSWORD: &str = "root-pass-123";
pub const BASE_URL: &str = "http://localhost:3000";
pub const BOUNDARY: &str = "hmhy-test-boundary";

/// Records sent mail; can be switched to fail every send.
#[derive(Debug, Default)]
pub struct RecordingMailer {
    pub sent: StdMutex<Vec<MailMessage>>,
    pub failing: AtomicBool,
}

impl RecordingMailer {
    pub fn recipients(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|message| message.to.clone())
            .collect()
    }
}

impl Mailer for RecordingMailer {
    fn send(&self, message: &MailMessage) -> Result<(), MailError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(MailError::Transport(String::from("connection refused")));
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

/// A router over fresh state plus handles to inspect that state.
pub struct TestApp {
    pub state: AppState,
    pub mailer: Arc<RecordingMailer>,
    pub upload_root: PathBuf,
    pub superadmin: Admin,
}

impl TestApp {
    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    /// An access token for `id` carrying `role`.
    pub fn token_for(&self, id: &str, role: Role) -> String {
        self.state
            .tokens
            .issue_access(&TokenPayload::new(id, role.as_str()))
            .unwrap()
    }

    pub fn superadmin_token(&self) -> String {
        self.token_for(&self.superadmin.id, Role::SuperAdmin)
    }

    /// Inserts an admin through the facade and returns it.
    pub async fn create_admin(&self, username: &str, phone_number: &str, role: Role) -> Admin {
        let new_admin: NewAdmin = prepare_new_admin(CreateAdminRequest {
            username: username.to_string(),
            phone_number: phone_number.to_string(),
            password: String::from("admin-pass-123"),
            role: Some(role),
        })
        .unwrap();

        let mut persistence = self.state.persistence.lock().await;
        let mut service: BaseService<Admin, &mut Persistence> =
            BaseService::new(&mut *persistence);
        service.create(new_admin).unwrap().data
    }
}

pub fn create_test_token_settings() -> TokenSettings {
    TokenSettings {
        access_secret: String::from("server-access-secret"),
        access_lifetime_days: 1,
        refresh_secret: String::from("server-refresh-secret"),
        refresh_lifetime_days: 7,
    }
}

pub fn create_test_upload_settings() -> UploadSettings {
    UploadSettings {
        upload_dir: String::from("uploads"),
        base_url: String::from(BASE_URL),
    }
}

/// Builds app state over an in-memory store with a seeded superadmin.
pub fn create_test_app() -> TestApp {
    let mut persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    let seed: SuperadminSeed = SuperadminSeed {
        username: String::from(SUPERADMIN_USERNAME),
        password: String::from(SUPERADMIN_PASSWORD),
        phone_number: String::from("+998900000001"),
    };
    crate::seed_superadmin(&mut persistence, &seed).unwrap();
    let superadmin: Admin = persistence
        .find_admin_by_username(SUPERADMIN_USERNAME)
        .unwrap()
        .expect("superadmin seeded");

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let tokens: TokenService = TokenService::new(create_test_token_settings(), clock);

    let upload_root: PathBuf = std::env::temp_dir().join(format!("hmhy-uploads-{}", Uuid::new_v4()));
    std::fs::create_dir_all(&upload_root).unwrap();
    let files: LocalFileStore = LocalFileStore::new(upload_root.clone(), &create_test_upload_settings());

    let mailer: Arc<RecordingMailer> = Arc::new(RecordingMailer::default());
    let transport: Arc<dyn Mailer> = mailer.clone();

    let state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        gate: Arc::new(AuthGate::new(tokens.clone())),
        tokens: Arc::new(tokens),
        files: Arc::new(files),
        mail: Arc::new(EmailService::new(transport, BASE_URL)),
        production: false,
    };

    TestApp {
        state,
        mailer,
        upload_root,
        superadmin,
    }
}

/// Builds a JSON request, optionally authenticated.
pub fn json_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Builds a multipart upload carrying one file.
pub fn multipart_request(token: &str, file_name: &str, mime: &str, bytes: &[u8]) -> Request<Body> {
    let mut body: Vec<u8> = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {mime}\r\n\r\n").as_bytes());
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri("/api/v1/files")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Sends a request and returns the status and the JSON body (`Null` if empty).
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status: StatusCode = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

pub fn create_test_teacher_body(full_name: &str, email: &str, phone_number: &str) -> Value {
    json!({
        "fullName": full_name,
        "email": email,
        "phoneNumber": phone_number,
        "specification": "ENGLISH",
        "level": "C1",
        "hourlyPrice": 150_000,
    })
}

pub fn create_test_student_body(first_name: &str, phone_number: &str) -> Value {
    json!({
        "firstName": first_name,
        "lastName": "Yusupova",
        "phoneNumber": phone_number,
        "email": format!("{}@example.com", first_name.to_lowercase()),
    })
}

/// Creates a teacher over HTTP as the superadmin and returns its id.
pub async fn create_teacher(app: &TestApp, full_name: &str, email: &str, phone_number: &str) -> String {
    let (status, body) = send(
        app.router(),
        json_request(
            Method::POST,
            "/api/v1/teachers",
            Some(&app.superadmin_token()),
            Some(create_test_teacher_body(full_name, email, phone_number)),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["data"]["id"].as_str().unwrap().to_string()
}
