pub mod poll_controller;
pub mod summary_logger;

pub use poll_controller::{ControlError, PollController, PollError, PollHandle};
pub use summary_logger::SummaryLoggerWorker;
