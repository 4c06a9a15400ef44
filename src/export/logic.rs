// src/export/logic.rs

use crate::core::session::SessionLogic;
use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::SessionExport;
use crate::ui::messages::warning;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Export sessions.
    ///
    /// - `file`: absolute output path
    /// - `range`: `None`, `"all"`, `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, or two
    ///   of those (same format) joined by `:`
    ///
    /// Returns the number of rows written.
    pub fn export(
        pool: &mut DbPool,
        format: ExportFormat,
        file: &str,
        range: Option<&str>,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        // bad ranges fail before any prompt
        let sessions = SessionLogic::list(&pool.conn, range)?;

        if sessions.is_empty() {
            warning("No sessions found for selected range.");
            return Ok(0);
        }

        ensure_writable(path, force)?;

        let rows: Vec<SessionExport> = sessions.iter().map(SessionExport::from).collect();

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
        }

        ttlog_soft(
            &pool.conn,
            "export",
            &path.to_string_lossy(),
            &format!(
                "{} session(s) as {} ({})",
                rows.len(),
                format.as_str(),
                range.unwrap_or("all")
            ),
        );

        Ok(rows.len())
    }
}
