use crate::cli::parser::{Commands, UserCommands};
use crate::config::Config;
use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::store::users::UserStore;
use crate::ui::messages::{error, header, info, success};
use crate::utils::path::expand_tilde;
use rpassword::prompt_password;
use std::path::Path;

/// Use the value given on the command line, or ask for it without echo.
fn password_or_prompt(given: &Option<String>, prompt: &str) -> AppResult<String> {
    match given {
        Some(p) => Ok(p.clone()),
        None => Ok(prompt_password(prompt)?),
    }
}

/// Audit a user-store change. Skipped when no database has been initialized.
fn audit(cfg: &Config, operation: &str, username: &str, message: &str) {
    if !Path::new(&cfg.database).exists() {
        log::info!("no database at {}, {} not audited", cfg.database, operation);
        return;
    }
    match DbPool::new(&cfg.database) {
        Ok(pool) => ttlog_soft(&pool.conn, operation, username, message),
        Err(e) => log::warn!("cannot open {} for audit: {}", cfg.database, e),
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::User { action } = cmd else {
        return Ok(());
    };

    let mut store = UserStore::open(&cfg.users_file);

    match action {
        UserCommands::Register { username, password } => {
            let password = match password {
                Some(p) => p.clone(),
                None => {
                    let first = prompt_password("Password: ")?;
                    let again = prompt_password("Confirm password: ")?;
                    if first != again {
                        return Err(AppError::Validation("Passwords do not match".into()));
                    }
                    first
                }
            };
            store.register(username, &password)?;
            audit(cfg, "user_register", username.trim(), "user registered");
            success(format!("User '{}' registered.", username.trim()));
        }

        UserCommands::Login { username, password } => {
            let password = password_or_prompt(password, "Password: ")?;
            if store.authenticate(username, &password)? {
                audit(cfg, "user_login", username.trim(), "login");
                success(format!("Welcome back, {}!", username.trim()));
            } else {
                error("Invalid username or password.");
                return Err(AppError::Auth(username.trim().to_string()));
            }
        }

        UserCommands::Passwd {
            username,
            old_password,
            new_password,
        } => {
            let old = password_or_prompt(old_password, "Current password: ")?;
            let new = password_or_prompt(new_password, "New password: ")?;
            store.change_password(username, &old, &new)?;
            audit(cfg, "user_passwd", username.trim(), "password changed");
            success(format!("Password updated for '{}'.", username.trim()));
        }

        UserCommands::Deactivate { username, password } => {
            let password = password_or_prompt(password, "Password: ")?;
            if !store.verify(username, &password) {
                return Err(AppError::Auth(username.trim().to_string()));
            }
            store.deactivate(username)?;
            audit(cfg, "user_deactivate", username.trim(), "user deactivated");
            success(format!("User '{}' deactivated.", username.trim()));
        }

        UserCommands::Info { username } => {
            let info_rec = store
                .user_info(username)
                .ok_or_else(|| AppError::UserNotFound(username.trim().to_string()))?;

            header(format!("User {}", info_rec.username));
            let dash = || "--".to_string();
            println!("  Created:          {}", info_rec.created_at.clone().unwrap_or_else(dash));
            println!("  Last login:       {}", info_rec.last_login.clone().unwrap_or_else(dash));
            println!("  Logins:           {}", info_rec.login_count);
            println!(
                "  Active:           {}",
                if info_rec.is_active { "yes" } else { "no" }
            );
            if let Some(ts) = &info_rec.password_updated {
                println!("  Password changed: {}", ts);
            }
            if let Some(ts) = &info_rec.deactivated_at {
                println!("  Deactivated:      {}", ts);
            }
        }

        UserCommands::List => {
            header(format!("Users ({})", store.len()));
            if store.is_empty() {
                info("No users registered.");
            }
            for name in store.usernames() {
                let active = store.user_info(&name).map(|u| u.is_active).unwrap_or(true);
                if active {
                    println!("  {}", name);
                } else {
                    println!("  {} (deactivated)", name);
                }
            }
        }

        UserCommands::Backup { file } => {
            let target = file.as_deref().map(expand_tilde);
            let dest = store.backup_to(target.as_deref())?;
            audit(
                cfg,
                "user_backup",
                "",
                &format!("{} user(s) backed up to {}", store.len(), dest.display()),
            );
            success(format!("User data backed up to {}", dest.display()));
        }
    }

    Ok(())
}
