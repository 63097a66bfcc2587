pub mod config;
pub mod consts;
pub mod dispatch;
pub mod envelope;
pub mod error;
pub mod operations;
pub mod oracle;
pub mod request;
pub mod server;
