//! Configuration for the autocommit client: which backend to talk to and how to authenticate
//!

pub mod client_config;

pub use crate::config::client_config::ClientConfig;
pub use crate::config::client_config::CLIENT_CONFIG_FILENAME;
