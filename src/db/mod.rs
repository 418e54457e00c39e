pub mod connection;
pub mod sessions;
