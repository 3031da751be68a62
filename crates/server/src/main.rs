// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod config;
mod cookies;
mod extract;
mod files;
mod handlers;
mod http_error;
mod logging;
mod router;
mod session;

#[cfg(test)]
mod tests;

use axum::Router;
use clap::Parser;
use hmhy_api::{
    AuthGate, Clock, EmailService, LogMailer, Mailer, SystemClock, TokenService,
    prepare_new_admin,
};
use hmhy_domain::{Admin, CreateAdminRequest, Entity, NewAdmin, Role};
use hmhy_persistence::{Persistence, SeedOutcome};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use crate::config::{Args, ServerConfig, SuperadminSeed};
use crate::files::LocalFileStore;
use crate::logging::{LogGuards, init_tracing};
use crate::router::{AppState, build_router};

/// Creates the configured superadmin unless one already exists.
///
/// # Errors
///
/// Returns an error if the credentials fail validation or the store fails.
fn seed_superadmin(
    persistence: &mut Persistence,
    seed: &SuperadminSeed,
) -> Result<SeedOutcome, Box<dyn std::error::Error>> {
    let new_admin: NewAdmin = prepare_new_admin(CreateAdminRequest {
        username: seed.username.clone(),
        phone_number: seed.phone_number.clone(),
        password: seed.password.clone(),
        role: Some(Role::SuperAdmin),
    })
    .map_err(|e| format!("Invalid superadmin credentials: {e:?}"))?;

    let admin: Admin = Admin::from_create(
        Uuid::new_v4().to_string(),
        new_admin,
        OffsetDateTime::now_utc(),
    );
    Ok(persistence.seed_superadmin(&admin)?)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();
    let config: ServerConfig = ServerConfig::try_from(args)?;

    let _log_guards: LogGuards = init_tracing(config.log_format, &config.log_dir)?;
    info!(log_dir = %config.log_dir.display(), "Initializing HMHY Server");

    let mut persistence: Persistence = if let Some(db_path) = &config.database {
        info!(path = %db_path.display(), "Using file-based database");
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    if seed_superadmin(&mut persistence, &config.superadmin)? == SeedOutcome::Created {
        info!(username = %config.superadmin.username, "Superadmin created");
    }

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let tokens: Arc<TokenService> = Arc::new(TokenService::new(config.tokens.clone(), clock));

    let files: LocalFileStore = LocalFileStore::new(
        PathBuf::from(&config.uploads.upload_dir),
        &config.uploads,
    );
    files.ensure_root().await?;

    let mailer: Arc<dyn Mailer> = Arc::new(LogMailer);

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        gate: Arc::new(AuthGate::new(TokenService::clone(&tokens))),
        tokens,
        files: Arc::new(files),
        mail: Arc::new(EmailService::new(mailer, config.uploads.base_url.clone())),
        production: config.production,
    };

    let app: Router = build_router(app_state);

    let addr: SocketAddr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(%addr, production = config.production, "Server listening");

    let listener: tokio::net::TcpListener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
