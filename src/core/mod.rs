pub mod backup;
pub mod config;
pub mod goal;
pub mod history;
pub mod log;
pub mod session;
pub mod timer;
