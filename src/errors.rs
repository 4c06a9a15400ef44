//! Unified application error type.
//! All modules (db, store, core, cli, utils) return AppError to keep the
//! error handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Serialization
    // ---------------------------
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    // ---------------------------
    // User store
    // ---------------------------
    #[error("{0}")]
    Validation(String),

    #[error("Username already exists")]
    UserExists,

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Authentication failed for user {0}")]
    Auth(String),

    #[error("Error saving user data: {0}")]
    UserSave(String),

    // ---------------------------
    // Goals / sessions
    // ---------------------------
    #[error("Goal not found: {0}")]
    GoalNotFound(String),

    #[error("A goal named '{0}' already exists")]
    GoalExists(String),

    #[error("Invalid session: {0}")]
    InvalidSession(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
