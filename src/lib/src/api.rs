//! # API - functions to interact with the automation backend
//!
//! `client` wraps each REST call, `endpoint` builds the urls they hit
//!

pub mod client;
pub mod endpoint;
