pub mod goal;
pub mod session;
pub mod session_kind;
pub mod session_source;
pub mod user;
