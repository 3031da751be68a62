// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Command-line and environment configuration.
//!
//! [`Args`] is parsed once in `main` and converted into a [`ServerConfig`];
//! components receive the sub-configurations they need.

use clap::{Parser, ValueEnum};
use hmhy_api::TokenSettings;
use std::path::PathBuf;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable output.
    Pretty,
    /// One JSON object per line.
    Json,
}

/// HMHY Server - HTTP server for the HMHY tutoring platform
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "DATABASE_PATH")]
    pub database: Option<PathBuf>,

    /// Port to bind the server to
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Deployment environment; `production` enables secure cookies
    #[arg(long, env = "APP_ENV", default_value = "development")]
    pub app_env: String,

    /// Secret signing access tokens
    #[arg(long, env = "ACCESS_TOKEN_KEY")]
    pub access_token_key: String,

    /// Access token lifetime in days
    #[arg(long, env = "ACCESS_TOKEN_TIME", default_value_t = 1)]
    pub access_token_time: i64,

    /// Secret signing refresh tokens
    #[arg(long, env = "REFRESH_TOKEN_KEY")]
    pub refresh_token_key: String,

    /// Refresh token lifetime in days
    #[arg(long, env = "REFRESH_TOKEN_TIME", default_value_t = 7)]
    pub refresh_token_time: i64,

    /// Username of the superadmin seeded on first start
    #[arg(long, env = "SUPERADMIN_USERNAME")]
    pub superadmin_username: String,

    /// Password of the seeded superadmin
    #[arg(long, env = "SUPERADMIN_PASSWORD")]
    pub superadmin_password: String,

    /// Phone number of the seeded superadmin
    #[arg(long, env = "SUPERADMIN_PHONE_NUMBER")]
    pub superadmin_phone_number: String,

    /// Directory receiving uploads, also the URL segment they are served under
    #[arg(long, env = "FILE_UPLOAD_NAME", default_value = "uploads")]
    pub file_upload_name: String,

    /// Public base URL used to build file locators and mail links
    #[arg(long, env = "BASE_URL", default_value = "http://localhost:3000")]
    pub base_url: String,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Directory receiving the rotated `error/` and `info/` log files
    #[arg(long, env = "LOG_DIR", default_value = "logs")]
    pub log_dir: PathBuf,
}

/// Credentials of the superadmin created when none exists.
#[derive(Clone)]
pub struct SuperadminSeed {
    pub username: String,
    pub password: String,
    pub phone_number: String,
}

impl std::fmt::Debug for SuperadminSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuperadminSeed")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("phone_number", &self.phone_number)
            .finish()
    }
}

/// Where uploads are written and how they are addressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSettings {
    /// Directory name, relative to the working directory.
    pub upload_dir: String,
    /// Public base URL without a trailing slash.
    pub base_url: String,
}

/// Validated server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub database: Option<PathBuf>,
    pub production: bool,
    pub tokens: TokenSettings,
    pub superadmin: SuperadminSeed,
    pub uploads: UploadSettings,
    pub log_format: LogFormat,
    pub log_dir: PathBuf,
}

impl TryFrom<Args> for ServerConfig {
    type Error = String;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let tokens: TokenSettings = TokenSettings {
            access_secret: args.access_token_key,
            access_lifetime_days: args.access_token_time,
            refresh_secret: args.refresh_token_key,
            refresh_lifetime_days: args.refresh_token_time,
        };
        tokens.validate()?;

        if args.superadmin_username.trim().is_empty() {
            return Err(String::from("SUPERADMIN_USERNAME must not be empty"));
        }

        let upload_dir: String = args.file_upload_name.trim_matches('/').to_string();
        if upload_dir.is_empty() || upload_dir.contains("..") {
            return Err(format!(
                "FILE_UPLOAD_NAME is not a usable directory name: {}",
                args.file_upload_name
            ));
        }

        Ok(Self {
            port: args.port,
            database: args.database,
            production: args.app_env.eq_ignore_ascii_case("production"),
            tokens,
            superadmin: SuperadminSeed {
                username: args.superadmin_username,
                password: args.superadmin_password,
                phone_number: args.superadmin_phone_number,
            },
            uploads: UploadSettings {
                upload_dir,
                base_url: args.base_url.trim_end_matches('/').to_string(),
            },
            log_format: args.log_format,
            log_dir: args.log_dir,
        })
    }
}
