//! smart-ats library: resume screening against a job description

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod llm;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{AtsError, Result};
