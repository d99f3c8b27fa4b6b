pub mod client;
pub mod config;
pub mod contract;
pub mod error;
pub mod logging;
pub mod models;
pub mod report;
pub mod runner;

pub use error::{AppError, Result};
