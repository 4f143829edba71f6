//! Client side state machines that sit between the REST calls and whatever renders them
//!

pub mod countdown;
pub mod dashboard;
pub mod poller;
pub mod repository_form;
pub mod routes;
pub mod session;
