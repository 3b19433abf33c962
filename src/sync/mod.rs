//! Background request handling for the TUI
//!
//! Network calls run on a worker thread; [`LoadGuard`] decides which of the
//! results that come back are still wanted.

pub mod guard;
pub mod worker;

pub use guard::{LoadChannel, LoadGuard, Ticket};
pub use worker::{Job, JobResult, Outcome, Worker};
