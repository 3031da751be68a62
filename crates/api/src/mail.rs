// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Outgoing mail.
//!
//! [`EmailService`] composes messages and hands them to a [`Mailer`]
//! transport. Welcome mail is critical and its failures propagate; reminders
//! and notifications are best-effort and failures are only logged.

use std::sync::Arc;
use thiserror::Error;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{debug, error, info};

/// A composed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Transport failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MailError {
    #[error("Invalid recipient: {0}")]
    InvalidRecipient(String),

    #[error("Mail transport failed: {0}")]
    Transport(String),
}

/// Delivers composed messages.
pub trait Mailer: Send + Sync {
    /// Sends one message.
    ///
    /// # Errors
    ///
    /// Returns an error if the message cannot be delivered.
    fn send(&self, message: &MailMessage) -> Result<(), MailError>;
}

impl<M: Mailer + ?Sized> Mailer for Arc<M> {
    fn send(&self, message: &MailMessage) -> Result<(), MailError> {
        (**self).send(message)
    }
}

/// A transport that records messages in the log instead of delivering them.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

impl Mailer for LogMailer {
    fn send(&self, message: &MailMessage) -> Result<(), MailError> {
        if message.to.trim().is_empty() {
            return Err(MailError::InvalidRecipient(message.to.clone()));
        }

        info!(to = %message.to, subject = %message.subject, "Mail sent");
        debug!(body = %message.body, "Mail body");
        Ok(())
    }
}

/// Details of an upcoming lesson.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonReminder {
    pub email: String,
    pub student_name: String,
    pub teacher_name: String,
    pub subject: String,
    pub start_time: OffsetDateTime,
    pub meet_link: Option<String>,
}

/// Composes platform mail.
#[derive(Debug, Clone)]
pub struct EmailService<M> {
    mailer: M,
    app_url: String,
}

impl<M: Mailer> EmailService<M> {
    /// # Arguments
    ///
    /// * `mailer` - The transport
    /// * `app_url` - Public URL linked from messages
    pub fn new(mailer: M, app_url: impl Into<String>) -> Self {
        Self {
            mailer,
            app_url: app_url.into(),
        }
    }

    /// The transport.
    pub const fn mailer(&self) -> &M {
        &self.mailer
    }

    /// Sends the registration welcome.
    ///
    /// # Errors
    ///
    /// Returns the transport error; welcome mail is not best-effort.
    pub fn send_welcome(
        &self,
        email: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<(), MailError> {
        let message: MailMessage = MailMessage {
            to: email.to_string(),
            subject: String::from("Welcome to HMHY Education!"),
            body: format!(
                "Hello {first_name} {last_name},\n\nYour account is ready. Sign in at {}.",
                self.app_url
            ),
        };

        self.mailer.send(&message).map_err(|e| {
            error!(to = %email, error = %e, "Failed to send welcome email");
            e
        })?;
        info!(to = %email, "Welcome email sent");
        Ok(())
    }

    /// Sends a lesson reminder. Failures are logged and swallowed.
    pub fn send_lesson_reminder(&self, reminder: &LessonReminder) {
        let start: String = reminder
            .start_time
            .format(&Rfc3339)
            .unwrap_or_else(|_| reminder.start_time.to_string());
        let mut body: String = format!(
            "Hello {},\n\nYour {} lesson with {} starts at {start}.",
            reminder.student_name, reminder.subject, reminder.teacher_name
        );
        if let Some(link) = &reminder.meet_link {
            body.push_str(&format!("\nJoin: {link}"));
        }

        let message: MailMessage = MailMessage {
            to: reminder.email.clone(),
            subject: format!("Lesson Reminder: {}", reminder.subject),
            body,
        };
        self.best_effort(&message, "lesson reminder");
    }

    /// Sends a free-form notification. Failures are logged and swallowed.
    pub fn send_notification(&self, email: &str, subject: &str, body: &str) {
        let message: MailMessage = MailMessage {
            to: email.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        };
        self.best_effort(&message, "notification");
    }

    fn best_effort(&self, message: &MailMessage, kind: &str) {
        match self.mailer.send(message) {
            Ok(()) => info!(to = %message.to, kind, "Email sent"),
            Err(e) => error!(to = %message.to, kind, error = %e, "Failed to send email"),
        }
    }
}
