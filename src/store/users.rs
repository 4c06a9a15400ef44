//! JSON user store with SHA-256 password hashes.
//!
//! The whole file is rewritten on each mutation. Before writing, the
//! previous file is copied next to it as `<file>.backup`.

use crate::errors::{AppError, AppResult};
use crate::models::user::{StoredUser, USER_TS_FORMAT, UserInfo, UserRecord};
use chrono::Local;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const INVALID_USERNAME_CHARS: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// SHA-256 of the password as lowercase hex.
pub fn hash_password(password: &str) -> String {
    let digest = Sha256::digest(password.as_bytes());
    format!("{:x}", digest)
}

pub fn validate_username(username: &str) -> AppResult<()> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation("Username cannot be empty".into()));
    }
    let len = trimmed.chars().count();
    if len < 3 {
        return Err(AppError::Validation(
            "Username must be at least 3 characters".into(),
        ));
    }
    if len > 50 {
        return Err(AppError::Validation(
            "Username cannot exceed 50 characters".into(),
        ));
    }
    if username.contains(&INVALID_USERNAME_CHARS[..]) {
        return Err(AppError::Validation(
            "Username contains invalid characters".into(),
        ));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> AppResult<()> {
    if password.is_empty() {
        return Err(AppError::Validation("Password cannot be empty".into()));
    }
    let len = password.chars().count();
    if len < 6 {
        return Err(AppError::Validation(
            "Password must be at least 6 characters".into(),
        ));
    }
    if len > 128 {
        return Err(AppError::Validation(
            "Password cannot exceed 128 characters".into(),
        ));
    }
    Ok(())
}

fn now_stamp() -> String {
    Local::now().format(USER_TS_FORMAT).to_string()
}

fn backup_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".backup");
    PathBuf::from(name)
}

pub struct UserStore {
    path: PathBuf,
    users: BTreeMap<String, StoredUser>,
}

impl UserStore {
    /// Load the store. A missing or unreadable file yields an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let users = Self::load(&path);
        log::info!("user store opened: {} ({} users)", path.display(), users.len());
        Self { path, users }
    }

    fn load(path: &Path) -> BTreeMap<String, StoredUser> {
        if !path.exists() {
            log::info!("no user file at {}, starting fresh", path.display());
            return BTreeMap::new();
        }

        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                log::error!("cannot read {}: {}", path.display(), e);
                return BTreeMap::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(users) => users,
            Err(e) => {
                log::error!("malformed user file {}: {}", path.display(), e);
                BTreeMap::new()
            }
        }
    }

    /// Re-read the file from disk, dropping in-memory state.
    pub fn reload(&mut self) {
        self.users = Self::load(&self.path);
        log::info!("user store reloaded: {} users", self.users.len());
    }

    fn save(&self) -> AppResult<()> {
        if self.path.exists() {
            fs::copy(&self.path, backup_path_for(&self.path))?;
        }
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.path, to_pretty_json(&self.users)?)?;
        log::info!("user store saved: {}", self.path.display());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backup_path(&self) -> PathBuf {
        backup_path_for(&self.path)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn usernames(&self) -> Vec<String> {
        self.users.keys().cloned().collect()
    }

    pub fn user_exists(&self, username: &str) -> bool {
        self.users.contains_key(username.trim())
    }

    pub fn user_info(&self, username: &str) -> Option<UserInfo> {
        let name = username.trim();
        self.users
            .get(name)
            .map(|stored| UserInfo::from_stored(name, stored))
    }

    pub fn register(&mut self, username: &str, password: &str) -> AppResult<()> {
        log::info!("registration attempt for {}", username);
        validate_username(username)?;
        validate_password(password)?;

        let name = username.trim().to_string();
        if self.user_exists(&name) {
            return Err(AppError::UserExists);
        }

        let record = UserRecord {
            password_hash: hash_password(password),
            created_at: now_stamp(),
            last_login: None,
            login_count: 0,
            is_active: true,
            password_updated: None,
            deactivated_at: None,
        };
        self.users
            .insert(name.clone(), StoredUser::Record(record));

        if let Err(e) = self.save() {
            self.users.remove(&name);
            log::error!("registration of {} rolled back: {}", name, e);
            return Err(AppError::UserSave(e.to_string()));
        }

        log::info!("user {} registered", name);
        Ok(())
    }

    /// Check credentials without touching the record.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        let name = username.trim();
        if name.is_empty() || password.is_empty() {
            return false;
        }
        match self.users.get(name) {
            Some(stored) => stored.is_active() && stored.password_hash() == hash_password(password),
            None => false,
        }
    }

    /// Check credentials; on success bump the login statistics.
    pub fn authenticate(&mut self, username: &str, password: &str) -> AppResult<bool> {
        log::info!("authentication attempt for {}", username);
        if username.trim().is_empty() || password.is_empty() {
            return Ok(false);
        }

        let name = username.trim();
        let Some(stored) = self.users.get_mut(name) else {
            log::warn!("user {} not found", name);
            return Ok(false);
        };

        if !stored.is_active() {
            log::warn!("user {} is deactivated", name);
            return Ok(false);
        }

        if stored.password_hash() != hash_password(password) {
            log::warn!("invalid password for user {}", name);
            return Ok(false);
        }

        if let StoredUser::Record(record) = stored {
            record.last_login = Some(now_stamp());
            record.login_count += 1;
            self.save()?;
        }

        log::info!("user {} authenticated", name);
        Ok(true)
    }

    pub fn change_password(
        &mut self,
        username: &str,
        old_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        if !self.authenticate(username, old_password)? {
            return Err(AppError::Auth(username.trim().to_string()));
        }
        validate_password(new_password)?;

        let name = username.trim();
        let hash = hash_password(new_password);
        let stamp = now_stamp();

        match self.users.get_mut(name) {
            Some(StoredUser::Record(record)) => {
                record.password_hash = hash;
                record.password_updated = Some(stamp);
            }
            Some(legacy @ StoredUser::Legacy(_)) => {
                *legacy = StoredUser::Record(UserRecord {
                    password_hash: hash,
                    created_at: stamp.clone(),
                    last_login: None,
                    login_count: 0,
                    is_active: true,
                    password_updated: Some(stamp),
                    deactivated_at: None,
                });
            }
            None => return Err(AppError::UserNotFound(name.to_string())),
        }

        self.save()?;
        log::info!("password updated for {}", name);
        Ok(())
    }

    pub fn deactivate(&mut self, username: &str) -> AppResult<()> {
        let name = username.trim();
        let stamp = now_stamp();

        match self.users.get_mut(name) {
            Some(StoredUser::Record(record)) => {
                record.is_active = false;
                record.deactivated_at = Some(stamp);
            }
            Some(legacy @ StoredUser::Legacy(_)) => {
                let hash = legacy.password_hash().to_string();
                *legacy = StoredUser::Record(UserRecord {
                    password_hash: hash,
                    created_at: stamp.clone(),
                    last_login: None,
                    login_count: 0,
                    is_active: false,
                    password_updated: None,
                    deactivated_at: Some(stamp),
                });
            }
            None => return Err(AppError::UserNotFound(name.to_string())),
        }

        self.save()?;
        log::info!("user {} deactivated", name);
        Ok(())
    }

    /// Dump every user to `target`, or to a timestamped file next to the store.
    pub fn backup_to(&self, target: Option<&Path>) -> AppResult<PathBuf> {
        let dest = match target {
            Some(p) => p.to_path_buf(),
            None => {
                let name = format!(
                    "users_backup_{}.json",
                    Local::now().format("%Y%m%d_%H%M%S")
                );
                match self.path.parent() {
                    Some(dir) if !dir.as_os_str().is_empty() => dir.join(name),
                    _ => PathBuf::from(name),
                }
            }
        };

        fs::write(&dest, to_pretty_json(&self.users)?)?;
        log::info!("user data backed up to {}", dest.display());
        Ok(dest)
    }
}

fn to_pretty_json<T: Serialize>(value: &T) -> AppResult<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(buf)
}
