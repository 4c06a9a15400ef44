use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Every key a complete configuration file carries.
pub const CONFIG_KEYS: [&str; 8] = [
    "database",
    "users_file",
    "pomodoro_minutes",
    "short_break_minutes",
    "long_break_minutes",
    "long_break_every",
    "default_goal_color",
    "log_level",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_users_file")]
    pub users_file: String,
    #[serde(default = "default_pomodoro")]
    pub pomodoro_minutes: u32,
    #[serde(default = "default_short_break")]
    pub short_break_minutes: u32,
    #[serde(default = "default_long_break")]
    pub long_break_minutes: u32,
    #[serde(default = "default_long_break_every")]
    pub long_break_every: u32,
    #[serde(default = "default_goal_color")]
    pub default_goal_color: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_users_file() -> String {
    Config::users_file_path().to_string_lossy().to_string()
}
fn default_pomodoro() -> u32 {
    25
}
fn default_short_break() -> u32 {
    5
}
fn default_long_break() -> u32 {
    15
}
fn default_long_break_every() -> u32 {
    4
}
fn default_goal_color() -> String {
    "#77DD77".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            users_file: default_users_file(),
            pomodoro_minutes: default_pomodoro(),
            short_break_minutes: default_short_break(),
            long_break_minutes: default_long_break(),
            long_break_every: default_long_break_every(),
            default_goal_color: default_goal_color(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("rpomo")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".rpomo")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rpomo.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rpomo.sqlite")
    }

    /// Return the full path of the JSON user store
    pub fn users_file_path() -> PathBuf {
        Self::config_dir().join("users.json")
    }

    /// Directory holding the daily application log files
    pub fn logs_dir() -> PathBuf {
        Self::config_dir().join("logs")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Config::default());
        }

        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("cannot parse {}: {}", path.display(), e)))
    }

    /// Keys absent from the configuration file (filled with defaults on load).
    pub fn missing_keys(path: &Path) -> AppResult<Vec<&'static str>> {
        if !path.exists() {
            return Ok(CONFIG_KEYS.to_vec());
        }

        let content = fs::read_to_string(path)?;
        let value: serde_yaml::Value = serde_yaml::from_str(&content)?;
        let map = value.as_mapping();

        Ok(CONFIG_KEYS
            .iter()
            .copied()
            .filter(|k| {
                map.map(|m| !m.contains_key(*k)).unwrap_or(true)
            })
            .collect())
    }

    /// Write this configuration as YAML to `path`.
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let mut file = fs::File::create(path)?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }

    /// Initialize configuration and data files.
    ///
    /// `custom_db` / `custom_users` may be absolute or relative to the
    /// configuration directory. In test mode the config file is not written.
    pub fn init_all(
        custom_db: Option<&str>,
        custom_users: Option<&str>,
        is_test: bool,
    ) -> AppResult<Self> {
        let dir = Self::config_dir();
        if !is_test {
            fs::create_dir_all(&dir)?;
        }

        let resolve = |name: &str| {
            let p = Path::new(name);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        };

        let db_path = custom_db.map(resolve).unwrap_or_else(Self::database_file);
        let users_path = custom_users
            .map(resolve)
            .unwrap_or_else(Self::users_file_path);

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            users_file: users_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        if !is_test {
            config.save_to(&Self::config_file())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        println!("✅ Database:    {:?}", db_path);
        println!("✅ Users file:  {:?}", users_path);

        Ok(config)
    }
}
