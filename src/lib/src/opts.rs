pub mod poll_opts;

pub use crate::opts::poll_opts::PollOpts;
