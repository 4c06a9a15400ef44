use crate::config::Config;
use crate::errors::{AppError, AppResult};
use std::fs;
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    pub fn print(path: &Path) -> AppResult<()> {
        let content = fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        println!("{}", content);
        Ok(())
    }

    /// Keys absent from the file; they are served from defaults at runtime.
    pub fn check(path: &Path) -> AppResult<Vec<&'static str>> {
        if !path.exists() {
            return Err(AppError::Config(format!(
                "configuration file not found: {} (run `rpomo init`)",
                path.display()
            )));
        }
        Config::missing_keys(path)
    }

    pub fn edit(path: &Path, editor: Option<&str>) -> AppResult<()> {
        let ed = editor
            .map(str::to_string)
            .or_else(|| std::env::var("EDITOR").ok())
            .or_else(|| std::env::var("VISUAL").ok())
            .unwrap_or_else(|| {
                if cfg!(target_os = "windows") {
                    "notepad".into()
                } else {
                    "nano".into()
                }
            });

        let status = Command::new(&ed)
            .arg(path)
            .status()
            .map_err(|e| AppError::Config(format!("cannot launch '{}': {}", ed, e)))?;

        if !status.success() {
            return Err(AppError::Config(format!("editor '{}' exited with {}", ed, status)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_reports_missing_keys() {
        let path = std::env::temp_dir().join("rpomo_check_config.conf");
        fs::write(&path, "database: /tmp/x.sqlite\nlog_level: debug\n").unwrap();

        let missing = ConfigLogic::check(&path).unwrap();
        assert_eq!(missing.len(), 6);
        assert!(missing.contains(&"pomodoro_minutes"));

        fs::remove_file(&path).ok();
        assert!(matches!(ConfigLogic::check(&path), Err(AppError::Config(_))));
    }
}
