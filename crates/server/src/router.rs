// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Router assembly.
//!
//! Every route is registered from [`Operation::ALL`]: the path and method
//! come from the operation, the handler from [`endpoint`], and the gate
//! layer from [`requirement`]. Stored uploads are served as static files
//! under the upload directory's name.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{Method as HttpMethod, Uri},
    middleware,
    routing::{MethodFilter, MethodRouter, on},
};
use hmhy_api::{
    Access, ApiError, AuthGate, EmailService, Mailer, Method, Operation, TokenService,
    requirement,
};
use hmhy_domain::{Admin, Student, Teacher};
use hmhy_persistence::Persistence;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::{
    cors::CorsLayer, limit::RequestBodyLimitLayer, services::ServeDir, trace::TraceLayer,
};

use crate::files::{LocalFileStore, UPLOAD_BODY_LIMIT};
use crate::handlers::{admins, auth, crud, files, health, students, teachers};
use crate::http_error::{HttpError, render_errors};
use crate::session::{GateLayer, require_access};

/// Prefix of every API route.
pub const API_PREFIX: &str = "/api/v1";

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// The single store, locked for one operation sequence at a time.
    pub persistence: Arc<Mutex<Persistence>>,
    pub tokens: Arc<TokenService>,
    pub gate: Arc<AuthGate>,
    pub files: Arc<LocalFileStore>,
    pub mail: Arc<EmailService<Arc<dyn Mailer>>>,
    /// Selects the production cookie attributes.
    pub production: bool,
}

const fn method_filter(method: Method) -> MethodFilter {
    match method {
        Method::Get => MethodFilter::GET,
        Method::Post => MethodFilter::POST,
        Method::Patch => MethodFilter::PATCH,
        Method::Delete => MethodFilter::DELETE,
    }
}

/// The handler serving `op`, bound to the operation's method.
fn endpoint(op: Operation) -> MethodRouter<AppState> {
    let filter: MethodFilter = method_filter(op.route().0);

    match op {
        Operation::SignIn => on(filter, auth::sign_in),
        Operation::Refresh => on(filter, auth::refresh),
        Operation::SignOut => on(filter, auth::sign_out),
        Operation::Me => on(filter, auth::me),

        Operation::CreateAdmin => on(filter, admins::create),
        Operation::ListAdmins => on(filter, crud::list::<Admin>),
        Operation::GetAdmin => on(filter, crud::get_by_id::<Admin>),
        Operation::UpdateAdmin => on(filter, admins::update),
        Operation::ToggleAdminStatus => on(filter, crud::toggle_status::<Admin>),
        Operation::DeleteAdmin => on(filter, crud::delete::<Admin>),

        Operation::CreateTeacher => on(filter, teachers::create),
        Operation::ListTeachers => on(filter, crud::list::<Teacher>),
        Operation::GetTeacher => on(filter, crud::get_by_id::<Teacher>),
        Operation::UpdateTeacher => on(filter, teachers::update),
        Operation::SoftDeleteTeacher => on(filter, crud::soft_delete::<Teacher>),
        Operation::RestoreTeacher => on(filter, crud::restore::<Teacher>),
        Operation::ToggleTeacherStatus => on(filter, crud::toggle_status::<Teacher>),
        Operation::DeleteTeacher => on(filter, crud::delete::<Teacher>),

        Operation::CreateStudent => on(filter, students::create),
        Operation::ListStudents => on(filter, crud::list::<Student>),
        Operation::GetStudent => on(filter, crud::get_by_id::<Student>),
        Operation::UpdateStudent => on(filter, students::update),
        Operation::SoftDeleteStudent => on(filter, crud::soft_delete::<Student>),
        Operation::RestoreStudent => on(filter, crud::restore::<Student>),
        Operation::ToggleStudentStatus => on(filter, crud::toggle_status::<Student>),
        Operation::DeleteStudent => on(filter, crud::delete::<Student>),

        Operation::UploadFile => on(filter, files::upload),
        Operation::DeleteFile => on(filter, files::delete),

        Operation::Health => on(filter, health::health),
    }
}

/// Fallback for unmatched routes.
#[allow(clippy::unused_async)]
async fn not_found(method: HttpMethod, uri: Uri) -> HttpError {
    HttpError(ApiError::NotFound {
        message: format!("Cannot {method} {}", uri.path()),
    })
}

/// Builds the application router.
///
/// Operations sharing a path are merged into one method router; each keeps
/// its own gate layer.
pub fn build_router(app_state: AppState) -> Router {
    let mut api: Router<AppState> = Router::new();

    for op in Operation::ALL {
        let (_, path) = op.route();
        let mut method_router: MethodRouter<AppState> = endpoint(op);

        if let Access::Authenticated(tags) = requirement(op) {
            let layer: GateLayer = GateLayer {
                gate: Arc::clone(&app_state.gate),
                tags,
            };
            method_router =
                method_router.route_layer(middleware::from_fn_with_state(layer, require_access));
        }

        api = api.route(path, method_router);
    }

    let uploads: ServeDir = ServeDir::new(app_state.files.root());
    let uploads_path: String = app_state.files.mount_path().to_string();

    Router::new()
        .nest(API_PREFIX, api)
        .nest_service(&uploads_path, uploads)
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
        .layer(RequestBodyLimitLayer::new(UPLOAD_BODY_LIMIT))
        .layer(middleware::from_fn(render_errors))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
        .with_state(app_state)
}
