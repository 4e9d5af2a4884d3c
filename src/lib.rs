pub mod config;
pub mod log;
pub mod markers;
pub mod server;
pub mod session;
