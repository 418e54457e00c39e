pub mod context;
pub mod roles;
pub mod token;

pub use context::{Session, SessionContext};
pub use roles::{authorize, Access, Role};

/// Seconds since the epoch, the unit every session timestamp uses.
pub fn now_unix() -> i64 {
    chrono::Utc::now().timestamp()
}
