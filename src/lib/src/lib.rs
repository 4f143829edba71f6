//! libautocommit
//!
//! Client for the automated daily commit service.
//!
//! # Examples
//!
//! Who is signed in, and may they see the dashboard:
//!
//! ```no_run
//! use libautocommit::config::ClientConfig;
//! use libautocommit::core::routes::{self, RouteDecision};
//! use libautocommit::core::session;
//!
//! # async fn run() -> Result<(), libautocommit::error::AutoCommitError> {
//! let config = ClientConfig::get_or_create()?;
//! let check = session::check(&config).await;
//! match routes::gate("/dashboard", &check) {
//!     RouteDecision::Render(route) => println!("showing {route}"),
//!     RouteDecision::Redirect(route) => println!("go to {route}"),
//!     RouteDecision::NotFound => println!("404"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Watch the countdown to the next automated commit:
//!
//! ```no_run
//! use libautocommit::config::ClientConfig;
//! use libautocommit::core::poller::{self, PollerEvent, RemoteStatusSource};
//! use libautocommit::opts::PollOpts;
//!
//! # async fn run() -> Result<(), libautocommit::error::AutoCommitError> {
//! let config = ClientConfig::get_or_create()?;
//! let mut handle = poller::spawn(RemoteStatusSource::new(config), PollOpts::default());
//! while let Some(event) = handle.next_event().await {
//!     if let PollerEvent::Tick(seconds) = event {
//!         println!("{seconds}s to go");
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod constants;
pub mod core;
pub mod error;
pub mod model;
pub mod opts;
pub mod util;
pub mod view;
