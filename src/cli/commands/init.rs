use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::store::users::UserStore;

/// Handle the `init` command
///
/// Creates the config directory and file and the SQLite database with its
/// schema. The user store is only reported; it is written on first registration.
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.db.as_deref(), cli.users.as_deref(), cli.test)?;

    println!("⚙️  Initializing rpomo…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗄️  Database   : {}", &cfg.database);

    let pool = DbPool::new(&cfg.database)?;
    println!("✅ Database initialized at {}", &cfg.database);

    let store = UserStore::open(&cfg.users_file);
    println!("👤 Users      : {} ({} account(s))", store.path().display(), store.len());

    ttlog_soft(
        &pool.conn,
        "init",
        "Database initialized",
        &format!("Database initialized at {}", &cfg.database),
    );

    println!("🎉 rpomo initialization completed!");
    Ok(())
}
