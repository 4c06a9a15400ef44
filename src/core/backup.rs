use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use std::fs;
use std::io::{Write, stdin, stdout};
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

fn confirm_overwrite(dest: &Path) -> AppResult<bool> {
    println!(
        "⚠️  The file '{}' already exists.\nDo you want to overwrite it? [y/N]: ",
        dest.display()
    );
    print!("> ");
    stdout().flush().ok();

    let mut answer = String::new();
    stdin().read_line(&mut answer)?;
    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

impl BackupLogic {
    /// Copy the database file to `dest_file`, zipping it when `compress` is set.
    /// Returns the path of the file written, or `None` if the user declined
    /// to overwrite.
    pub fn backup(
        pool: &mut DbPool,
        db_path: &str,
        dest_file: &str,
        compress: bool,
        force: bool,
    ) -> AppResult<Option<PathBuf>> {
        let src = Path::new(db_path);
        let dest = Path::new(dest_file);

        if !src.exists() {
            return Err(AppError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Database not found: {}", src.display()),
            )));
        }

        if let Some(parent) = dest.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        if dest.exists() && !force && !confirm_overwrite(dest)? {
            warning("Backup cancelled by user.");
            return Ok(None);
        }

        // Flush pending WAL pages before copying the file.
        pool.conn
            .execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")
            .ok();

        fs::copy(src, dest)?;
        success(format!("Backup created: {}", dest.display()));

        let final_path = if compress {
            let compressed = compress_backup(dest)?;
            if let Err(e) = fs::remove_file(dest) {
                warning(format!("Failed to remove uncompressed backup: {}", e));
            }
            compressed
        } else {
            dest.to_path_buf()
        };

        ttlog_soft(
            &pool.conn,
            "backup",
            &final_path.to_string_lossy(),
            if compress {
                "Backup created and compressed"
            } else {
                "Backup created"
            },
        );

        Ok(Some(final_path))
    }
}

/// Compress a backup into `<name>.zip` next to it.
fn compress_backup(path: &Path) -> AppResult<PathBuf> {
    let zip_path = path.with_extension("zip");
    let entry_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "rpomo.sqlite".to_string());

    let file = fs::File::create(&zip_path)?;
    let mut zip = ZipWriter::new(file);
    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let mut f = fs::File::open(path)?;
    zip.start_file(entry_name, options)
        .map_err(std::io::Error::other)?;
    std::io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(std::io::Error::other)?;

    success(format!("Compressed: {}", zip_path.display()));
    Ok(zip_path)
}
