use crate::export::ExportFormat;
use crate::models::session_kind::SessionKind;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rpomo
/// Pomodoro timer and study-goal tracker backed by SQLite
#[derive(Parser)]
#[command(
    name = "rpomo",
    version = env!("CARGO_PKG_VERSION"),
    about = "A Pomodoro timer and study-goal tracker: log focus sessions and daily goals in SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override the JSON user store path
    #[arg(global = true, long = "users")]
    pub users: Option<String>,

    /// Run in test mode (no config or log file written)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database, user store and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Specify the editor to use (vim, nano, or custom path)")]
        editor: Option<String>,
    },

    /// Manage the database (integrity checks, import, etc.)
    Db {
        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,

        #[arg(
            long = "import-history",
            value_name = "FILE",
            help = "Import sessions from a legacy history.db file"
        )]
        import_history: Option<String>,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage local user accounts
    User {
        #[command(subcommand)]
        action: UserCommands,
    },

    /// Run a countdown (pomodoro or break)
    Timer {
        #[arg(long, value_enum, default_value = "pomodoro")]
        kind: SessionKind,

        #[arg(long, help = "Override the configured length in minutes")]
        minutes: Option<u32>,

        #[arg(long, value_name = "TITLE", help = "Goal credited with each focus minute")]
        goal: Option<String>,

        #[arg(
            long,
            default_value_t = 1,
            help = "Number of pomodoros to run, with breaks in between"
        )]
        cycles: u32,

        #[arg(long = "no-save", help = "Do not record the session")]
        no_save: bool,

        #[arg(long = "tick-ms", default_value_t = 1000, hide = true)]
        tick_ms: u64,
    },

    /// Add a focus session by hand
    Add {
        /// Date of the session (YYYY-MM-DD)
        date: String,

        /// Start time (HH:MM)
        start: String,

        /// End time (HH:MM)
        end: String,
    },

    /// List recorded sessions
    List {
        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,

        #[arg(long = "today", help = "Show only today's sessions")]
        now: bool,

        #[arg(long = "chart", help = "Draw minutes per day as a bar chart")]
        chart: bool,
    },

    /// Manage daily goals
    Goal {
        #[command(subcommand)]
        action: GoalCommands,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f', help = "Overwrite without asking")]
        force: bool,
    },

    /// Export session data
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// Create a new account
    Register {
        username: String,

        #[arg(long, help = "Password (prompted when omitted)")]
        password: Option<String>,
    },

    /// Check credentials
    Login {
        username: String,

        #[arg(long, help = "Password (prompted when omitted)")]
        password: Option<String>,
    },

    /// Change a password
    Passwd {
        username: String,

        #[arg(long = "old", help = "Current password (prompted when omitted)")]
        old_password: Option<String>,

        #[arg(long = "new", help = "New password (prompted when omitted)")]
        new_password: Option<String>,
    },

    /// Disable an account (login is refused afterwards)
    Deactivate {
        username: String,

        #[arg(long, help = "Password (prompted when omitted)")]
        password: Option<String>,
    },

    /// Show account details
    Info { username: String },

    /// List all accounts
    List,

    /// Write a full copy of the user store
    Backup {
        #[arg(long, value_name = "FILE")]
        file: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum GoalCommands {
    /// Create a goal
    Add {
        title: String,

        #[arg(
            long,
            default_value_t = 0,
            allow_negative_numbers = true,
            help = "Target in minutes (0 = open-ended)"
        )]
        target: i64,

        #[arg(long, help = "Colour as #RRGGBB (default from config)")]
        color: Option<String>,
    },

    /// Show goals with their progress
    List,

    /// Change title, target or colour
    Edit {
        title: String,

        #[arg(long = "title", value_name = "NEW_TITLE")]
        new_title: Option<String>,

        #[arg(long, allow_negative_numbers = true)]
        target: Option<i64>,

        #[arg(long)]
        color: Option<String>,
    },

    /// Delete a goal
    Del { title: String },

    /// Credit minutes of work to a goal
    Log { title: String, minutes: u32 },

    /// Zero the progress of every goal
    Reset,
}
